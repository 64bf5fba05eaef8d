use std::{
    env,
    fs::{self, OpenOptions},
    io::Write,
    path::{Path, PathBuf},
};

use chrono::Local;

pub const PROBE_LOG_FILE: &str = "gtk-compat-probe.log";
pub const LOG_DIR_ENV: &str = "GTK_COMPAT_LOG_DIR";

pub fn resolve_log_path(home_dir: Option<PathBuf>, file_name: &str) -> PathBuf {
    resolve_log_path_with_override(env::var(LOG_DIR_ENV).ok(), home_dir, file_name)
}

fn resolve_log_path_with_override(
    dir_override: Option<String>,
    home_dir: Option<PathBuf>,
    file_name: &str,
) -> PathBuf {
    if let Some(dir) = dir_override {
        let dir = PathBuf::from(dir.trim());
        if !dir.as_os_str().is_empty() {
            return dir.join(file_name);
        }
    }

    match home_dir {
        Some(home) => home.join(".cache").join("gtk-compat").join(file_name),
        None => env::temp_dir().join(file_name),
    }
}

fn format_log_line(scope: &str, message: &str) -> String {
    format!(
        "[{}] [{}] {}\n",
        Local::now().format("%Y-%m-%d %H:%M:%S%.3f"),
        scope,
        message
    )
}

pub fn append_log_line(path: &Path, scope: &str, message: &str) -> Result<(), String> {
    if let Some(parent_dir) = path.parent() {
        fs::create_dir_all(parent_dir).map_err(|error| {
            format!(
                "Failed to create log directory {}: {}",
                parent_dir.display(),
                error
            )
        })?;
    }

    let mut file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .map_err(|error| format!("Failed to open log file {}: {}", path.display(), error))?;
    file.write_all(format_log_line(scope, message).as_bytes())
        .map_err(|error| format!("Failed to write log file {}: {}", path.display(), error))
}

fn append_scoped_log(scope: &str, message: &str) {
    let path = resolve_log_path(home::home_dir(), PROBE_LOG_FILE);
    if let Err(error) = append_log_line(&path, scope, message) {
        eprintln!("[{scope}] {message} (log unavailable: {error})");
        return;
    }
    if cfg!(debug_assertions) {
        eprintln!("[{scope}] {message}");
    }
}

pub fn append_probe_log(message: &str) {
    append_scoped_log("probe", message);
}

pub fn append_appearance_log(message: &str) {
    append_scoped_log("appearance", message);
}
