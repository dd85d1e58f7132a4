//! Where the CLI reads its config and writes its log.

use std::ffi::OsString;
use std::fs;
use std::fs::File;
use std::io;
use std::path::Path;
use std::path::PathBuf;

use directories::ProjectDirs;

/// Environment variable overriding the log directory.
pub const LOG_DIR_ENV: &str = "KVK_LOG_DIR";

const CONFIG_FILE: &str = "config.json";
const LOG_FILE: &str = "kvk.log";
const PREVIOUS_LOG_FILE: &str = "kvk.log.1";

fn project_dirs() -> Option<ProjectDirs> {
    ProjectDirs::from("in", "icar", "kvk")
}

/// Default config file in the platform config directory
/// (`~/.config/kvk/config.json` on Linux).
pub fn default_config_file() -> Option<PathBuf> {
    project_dirs().map(|dirs| dirs.config_dir().join(CONFIG_FILE))
}

/// Picks the log directory: `--log-dir`, then `$KVK_LOG_DIR`, then the
/// platform cache directory.
pub fn log_dir(flag: Option<&Path>, env: Option<OsString>) -> Option<PathBuf> {
    if let Some(dir) = flag {
        return Some(dir.to_path_buf());
    }
    match env {
        Some(dir) if !dir.is_empty() => Some(PathBuf::from(dir)),
        _ => project_dirs().map(|dirs| dirs.cache_dir().to_path_buf()),
    }
}

/// Creates a fresh `kvk.log` in `dir`.
///
/// The previous run's log is kept as `kvk.log.1`; anything older is
/// overwritten.
pub fn open_log(dir: &Path) -> io::Result<File> {
    fs::create_dir_all(dir)?;
    let path = dir.join(LOG_FILE);
    if path.exists() {
        fs::rename(&path, dir.join(PREVIOUS_LOG_FILE))?;
    }
    File::create(path)
}
