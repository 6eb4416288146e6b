//! Settings file handling.
//!
//! Loads the JSON settings file listing the Redmine instances to poll:
//!
//! ```json
//! {
//!   "redmine_settings": [
//!     { "token": "your_token", "url": "http://192.168.1.10/" }
//!   ]
//! }
//! ```

use crate::error::{MenuError, Result};
use crate::models::Instance;
use serde::{Deserialize, Serialize};
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

/// Settings file name under `~/.config/bitbar/`.
const SETTINGS_FILE_NAME: &str = "multiple-redmine-show-my-task.json";

/// Root settings structure.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Settings {
    /// Instances to poll, in order.
    pub redmine_settings: Vec<Instance>,
}

impl Settings {
    /// Load settings from a file path.
    ///
    /// A missing file is `ConfigMissing`; anything unreadable or not matching
    /// the expected shape is `ConfigInvalid`.
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| match e.kind() {
            ErrorKind::NotFound => MenuError::ConfigMissing {
                path: path.to_path_buf(),
            },
            _ => MenuError::ConfigInvalid {
                path: path.to_path_buf(),
                reason: e.to_string(),
            },
        })?;

        Self::parse(path, &content)
    }

    fn parse(path: &Path, content: &str) -> Result<Self> {
        serde_json::from_str(content).map_err(|e| MenuError::ConfigInvalid {
            path: path.to_path_buf(),
            reason: e.to_string(),
        })
    }

    /// Example settings written by `--init-config`.
    pub fn example() -> Self {
        Self {
            redmine_settings: vec![
                Instance {
                    url: "http://192.168.1.10/".to_string(),
                    token: "your_token".to_string(),
                },
                Instance {
                    url: "http://192.168.1.12:10081/".to_string(),
                    token: "your_token".to_string(),
                },
            ],
        }
    }

    /// Pretty JSON for the example settings file.
    pub fn example_json() -> String {
        serde_json::to_string_pretty(&Self::example()).unwrap_or_default()
    }
}

/// Default settings path: `$HOME/.config/bitbar/multiple-redmine-show-my-task.json`.
///
/// Falls back to a relative path when no home directory can be resolved, so
/// the load step reports `ConfigMissing` instead of failing here.
pub fn default_settings_path() -> PathBuf {
    let base = resolve_home_dir().unwrap_or_default();
    base.join(".config").join("bitbar").join(SETTINGS_FILE_NAME)
}

fn resolve_home_dir() -> Option<PathBuf> {
    ["HOME", "USERPROFILE"].iter().find_map(|var| {
        std::env::var(var)
            .ok()
            .map(|value| value.trim().to_owned())
            .filter(|value| !value.is_empty())
            .map(PathBuf::from)
    })
}
