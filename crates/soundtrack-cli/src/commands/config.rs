use soundtrack_core::AppConfig;

use super::CommandResult;
use crate::cli::ConfigAction;

pub fn run(action: ConfigAction) -> CommandResult {
    let path = AppConfig::config_path();
    match action {
        ConfigAction::Path => println!("{}", path.display()),
        ConfigAction::Show => print!("{}", AppConfig::load_from(&path)?.to_toml_string()?),
        ConfigAction::Init => {
            AppConfig::write_default(&path)?;
            println!("Wrote default config to {}", path.display());
        }
    }
    Ok(())
}
