use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use anyhow::Context;
use hitcast_model::DEFAULT_ARTIFACT_PATH;
use hitcast_ui::ThemeMode;
use serde::{Deserialize, Serialize};
use tracing::warn;

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
#[serde(default)]
pub struct AppSettings {
    /// Read once at startup; edits apply on the next launch.
    pub model_path: PathBuf,
    pub theme: ThemeMode,
}

impl Default for AppSettings {
    fn default() -> Self {
        Self {
            model_path: PathBuf::from(DEFAULT_ARTIFACT_PATH),
            theme: ThemeMode::Dark,
        }
    }
}

impl AppSettings {
    /// Settings from the user config dir, or defaults if there are none yet.
    pub fn load_or_default() -> Self {
        let Some(path) = settings_path() else {
            return Self::default();
        };
        match Self::load_from(&path) {
            Ok(settings) => settings,
            Err(err) => {
                let first_run = err
                    .downcast_ref::<std::io::Error>()
                    .is_some_and(|io| io.kind() == ErrorKind::NotFound);
                if !first_run {
                    warn!(path = %path.display(), error = %err, "ignoring unreadable settings");
                }
                Self::default()
            }
        }
    }

    pub fn save(&self) -> anyhow::Result<()> {
        let path = settings_path().context("no user config directory on this platform")?;
        self.save_to(&path)
    }

    pub fn load_from(path: &Path) -> anyhow::Result<Self> {
        let data = std::fs::read_to_string(path)?;
        serde_json::from_str(&data).with_context(|| format!("parse settings {}", path.display()))
    }

    pub fn save_to(&self, path: &Path) -> anyhow::Result<()> {
        if let Some(dir) = path.parent() {
            std::fs::create_dir_all(dir)
                .with_context(|| format!("create settings dir {}", dir.display()))?;
        }
        let json = serde_json::to_string_pretty(self)?;
        std::fs::write(path, json).with_context(|| format!("write settings {}", path.display()))
    }
}

fn settings_path() -> Option<PathBuf> {
    dirs::config_dir().map(|base| base.join("hitcast").join("settings.json"))
}
