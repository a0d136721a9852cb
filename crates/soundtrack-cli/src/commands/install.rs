use soundtrack_core::install::{install, InstallScope};

use super::CommandResult;

pub fn run(global: bool, force: bool) -> CommandResult {
    let scope = if global {
        println!("🌍 Installing globally...");
        InstallScope::Global
    } else {
        println!("📁 Installing for this repository...");
        InstallScope::Local
    };

    let installed = install(scope, force)?;
    if let Some(dir) = &installed.configured_hooks_path {
        println!("⚙️  Set git core.hooksPath to {}", dir.display());
    }
    println!("✅ Installed hook at {}", installed.hook_path.display());
    println!("🎵 Your commits will now include the currently playing track.");
    println!("\nTry it while some music is playing:");
    println!("  git commit -m \"feat: add awesome feature\"");
    Ok(())
}
