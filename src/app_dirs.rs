use directories::ProjectDirs;
use std::path::PathBuf;

const APP_NAME: &str = "wpmtest";

/// Centralized application directory resolution
pub struct AppDirs;

impl AppDirs {
    pub fn config_path() -> PathBuf {
        if let Some(pd) = ProjectDirs::from("", "", APP_NAME) {
            pd.config_dir().join("config.json")
        } else {
            PathBuf::from("wpmtest_config.json")
        }
    }

    /// Where the log file goes; the terminal belongs to the TUI.
    pub fn log_dir() -> PathBuf {
        if let Ok(home) = std::env::var("HOME") {
            PathBuf::from(home)
                .join(".local")
                .join("state")
                .join(APP_NAME)
        } else if let Some(pd) = ProjectDirs::from("", "", APP_NAME) {
            pd.data_local_dir().to_path_buf()
        } else {
            std::env::temp_dir().join(APP_NAME)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn config_path_is_json() {
        let path = AppDirs::config_path();
        assert_eq!(path.file_name().unwrap(), "config.json");
    }

    #[test]
    fn log_dir_is_app_specific() {
        assert!(AppDirs::log_dir().ends_with(APP_NAME));
    }
}
