pub mod macos;
pub mod mpris;
pub mod wsl;

pub use macos::AppleScriptProbe;
pub use mpris::PlayerctlProbe;
pub use wsl::WslBridgeProbe;

use std::path::Path;

/// Whether `program` can be found on `PATH`.
pub fn has_program(program: &str) -> bool {
    which::which(program).is_ok()
}

/// Whether we are running inside WSL (Windows Subsystem for Linux).
pub fn is_wsl() -> bool {
    if std::env::var_os("WSL_DISTRO_NAME").is_some_and(|v| !v.is_empty()) {
        return true;
    }
    std::fs::read_to_string(Path::new("/proc/version"))
        .map(|version| kernel_is_wsl(&version))
        .unwrap_or(false)
}

/// Whether a `/proc/version` string belongs to a WSL kernel.
pub fn kernel_is_wsl(version: &str) -> bool {
    version.to_lowercase().contains("microsoft")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kernel_is_wsl() {
        assert!(kernel_is_wsl(
            "Linux version 5.15.153.1-microsoft-standard-WSL2 (root@941d701f84f1)"
        ));
        assert!(kernel_is_wsl("Linux version 4.4.0-19041-Microsoft"));
        assert!(!kernel_is_wsl("Linux version 6.8.0-45-generic (buildd@lcy02-amd64-075)"));
    }

    #[test]
    fn test_has_program_missing() {
        assert!(!has_program("soundtrack-no-such-program"));
    }
}
