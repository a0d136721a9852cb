//! Installing the `prepare-commit-msg` hook, per repository or globally.

use std::path::{Path, PathBuf};
use std::process::Command;

use directories::BaseDirs;
use tracing::{debug, info};

use crate::error::SoundtrackError;

pub const HOOK_NAME: &str = "prepare-commit-msg";

/// Second line of every script we write; lets a reinstall replace our own
/// hook without `--force`.
const HOOK_MARKER: &str = "# soundtrack git hook";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InstallScope {
    Local,
    Global,
}

#[derive(Debug, Clone)]
pub struct Installed {
    pub hook_path: PathBuf,
    /// Set when `core.hooksPath` was pointed at a new directory.
    pub configured_hooks_path: Option<PathBuf>,
}

/// Shell script that forwards git's hook arguments to `exe hook`.
pub fn hook_script(exe: &Path) -> String {
    format!(
        "#!/bin/sh\n{HOOK_MARKER}\n# Appends the currently playing track to commit messages.\n\n\"{}\" hook \"$1\" \"$2\" \"$3\"\n",
        exe.display()
    )
}

/// Write the hook into `hooks_dir`, creating the directory as needed.
///
/// A hook we did not write is only replaced when `force` is set.
pub fn write_hook(hooks_dir: &Path, exe: &Path, force: bool) -> Result<PathBuf, SoundtrackError> {
    std::fs::create_dir_all(hooks_dir)?;
    let path = hooks_dir.join(HOOK_NAME);

    if path.exists() && !force {
        let existing = std::fs::read_to_string(&path).unwrap_or_default();
        if !existing.contains(HOOK_MARKER) {
            return Err(SoundtrackError::HookExists(path));
        }
        debug!(path = %path.display(), "Replacing previously installed hook");
    }

    std::fs::write(&path, hook_script(exe))?;
    make_executable(&path)?;
    Ok(path)
}

#[cfg(unix)]
fn make_executable(path: &Path) -> std::io::Result<()> {
    use std::os::unix::fs::PermissionsExt;
    std::fs::set_permissions(path, std::fs::Permissions::from_mode(0o755))
}

#[cfg(not(unix))]
fn make_executable(_path: &Path) -> std::io::Result<()> {
    Ok(())
}

/// Install the hook for `scope`, pointing it at the running executable.
pub fn install(scope: InstallScope, force: bool) -> Result<Installed, SoundtrackError> {
    let exe = std::env::current_exe()?;

    let installed = match scope {
        InstallScope::Local => Installed {
            hook_path: write_hook(&local_hooks_dir()?, &exe, force)?,
            configured_hooks_path: None,
        },
        InstallScope::Global => {
            let (dir, configured) = global_hooks_dir()?;
            let hook_path = write_hook(&dir, &exe, force)?;
            let configured_hooks_path = if configured {
                None
            } else {
                git(&["config", "--global", "core.hooksPath", &dir.to_string_lossy()])?;
                Some(dir)
            };
            Installed {
                hook_path,
                configured_hooks_path,
            }
        }
    };

    info!(path = %installed.hook_path.display(), "Installed {HOOK_NAME} hook");
    Ok(installed)
}

/// Hooks directory of the repository containing the working directory.
pub fn local_hooks_dir() -> Result<PathBuf, SoundtrackError> {
    let output = Command::new("git")
        .args(["rev-parse", "--git-path", "hooks"])
        .output()
        .map_err(|e| SoundtrackError::Git(format!("failed to run git: {e}")))?;
    if !output.status.success() {
        return Err(SoundtrackError::NotARepository);
    }
    let dir = String::from_utf8_lossy(&output.stdout).trim().to_string();
    if dir.is_empty() {
        return Err(SoundtrackError::NotARepository);
    }
    Ok(PathBuf::from(dir))
}

/// Global hooks directory, and whether git is already configured to use it.
pub fn global_hooks_dir() -> Result<(PathBuf, bool), SoundtrackError> {
    let home = BaseDirs::new()
        .map(|dirs| dirs.home_dir().to_path_buf())
        .ok_or_else(|| SoundtrackError::Git("cannot determine home directory".into()))?;

    // `git config` exits 1 when the key is unset.
    if let Ok(configured) = git(&["config", "--global", "core.hooksPath"]) {
        if !configured.is_empty() {
            return Ok((expand_home(&configured, &home), true));
        }
    }

    let config_home = std::env::var_os("XDG_CONFIG_HOME")
        .map(PathBuf::from)
        .filter(|p| p.is_absolute())
        .unwrap_or_else(|| home.join(".config"));
    Ok((config_home.join("git").join("hooks"), false))
}

fn expand_home(path: &str, home: &Path) -> PathBuf {
    if path == "~" {
        home.to_path_buf()
    } else if let Some(rest) = path.strip_prefix("~/") {
        home.join(rest)
    } else {
        PathBuf::from(path)
    }
}

fn git(args: &[&str]) -> Result<String, SoundtrackError> {
    let output = Command::new("git")
        .args(args)
        .output()
        .map_err(|e| SoundtrackError::Git(format!("failed to run git: {e}")))?;
    if !output.status.success() {
        return Err(SoundtrackError::Git(
            String::from_utf8_lossy(&output.stderr).trim().to_string(),
        ));
    }
    Ok(String::from_utf8_lossy(&output.stdout).trim().to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hook_script_contents() {
        let script = hook_script(Path::new("/usr/local/bin/soundtrack"));
        assert!(script.starts_with("#!/bin/sh\n"));
        assert!(script.contains(HOOK_MARKER));
        assert!(script.contains("\"/usr/local/bin/soundtrack\" hook \"$1\" \"$2\" \"$3\"\n"));
    }

    #[test]
    fn test_write_fresh_hook() {
        let dir = tempfile::tempdir().unwrap();
        let hooks = dir.path().join("hooks");
        let path = write_hook(&hooks, Path::new("/bin/soundtrack"), false).unwrap();
        assert_eq!(path, hooks.join(HOOK_NAME));
        let contents = std::fs::read_to_string(&path).unwrap();
        assert!(contents.contains("\"/bin/soundtrack\" hook"));

        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            let mode = std::fs::metadata(&path).unwrap().permissions().mode();
            assert_eq!(mode & 0o777, 0o755);
        }
    }

    #[test]
    fn test_foreign_hook_needs_force() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(HOOK_NAME);
        std::fs::write(&path, "#!/bin/sh\nexec lint-commit \"$1\"\n").unwrap();

        let err = write_hook(dir.path(), Path::new("/bin/soundtrack"), false).unwrap_err();
        assert!(matches!(err, SoundtrackError::HookExists(p) if p == path));
        assert!(std::fs::read_to_string(&path).unwrap().contains("lint-commit"));

        write_hook(dir.path(), Path::new("/bin/soundtrack"), true).unwrap();
        assert!(std::fs::read_to_string(&path).unwrap().contains(HOOK_MARKER));
    }

    #[test]
    fn test_own_hook_is_replaced() {
        let dir = tempfile::tempdir().unwrap();
        write_hook(dir.path(), Path::new("/old/soundtrack"), false).unwrap();
        let path = write_hook(dir.path(), Path::new("/new/soundtrack"), false).unwrap();
        let contents = std::fs::read_to_string(path).unwrap();
        assert!(contents.contains("/new/soundtrack"));
        assert!(!contents.contains("/old/soundtrack"));
    }

    #[test]
    fn test_expand_home() {
        let home = Path::new("/home/dev");
        assert_eq!(expand_home("~/.hooks", home), PathBuf::from("/home/dev/.hooks"));
        assert_eq!(expand_home("~", home), PathBuf::from("/home/dev"));
        assert_eq!(expand_home("/etc/hooks", home), PathBuf::from("/etc/hooks"));
    }
}
