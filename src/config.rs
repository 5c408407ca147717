use std::path::PathBuf;

use serde::Deserialize;

const DEFAULT_DB_NAME: &str = "quizbowl.db";
const CONFIG_FILE_NAME: &str = "config.json";
const DEFAULT_SAMPLE_SIZE: usize = 10;

pub fn get_db_path() -> PathBuf {
    if let Ok(path) = std::env::var("QUIZBOWL_DB") {
        return PathBuf::from(path);
    }

    let config_dir = dirs::config_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("quizbowl");

    std::fs::create_dir_all(&config_dir).ok();
    config_dir.join(DEFAULT_DB_NAME)
}

/// User configuration, read from `config.json` next to the database when
/// present. Everything has a default; a missing or malformed file falls back
/// to defaults with a log line rather than failing startup.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Maximum questions drawn per attempt.
    pub sample_size: usize,
    /// Shuffle question order at session start.
    pub shuffle_questions: bool,
    /// Re-shuffle each question's options when presented.
    pub shuffle_options: bool,
    /// Shared admin secret; admin commands are refused when unset.
    pub admin_secret: Option<String>,
    /// When set, restricts every store operation to these course names.
    pub allowed_courses: Option<Vec<String>>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            sample_size: DEFAULT_SAMPLE_SIZE,
            shuffle_questions: true,
            shuffle_options: false,
            admin_secret: None,
            allowed_courses: None,
        }
    }
}

impl Config {
    pub fn load() -> Self {
        let path = get_db_path()
            .parent()
            .map(|dir| dir.join(CONFIG_FILE_NAME))
            .unwrap_or_else(|| PathBuf::from(CONFIG_FILE_NAME));

        match std::fs::read_to_string(&path) {
            Ok(raw) => match serde_json::from_str(&raw) {
                Ok(config) => config,
                Err(e) => {
                    log::warn!("ignoring malformed {}: {}", path.display(), e);
                    Self::default()
                }
            },
            Err(_) => Self::default(),
        }
    }

    pub fn course_allowed(&self, name: &str) -> bool {
        match &self.allowed_courses {
            Some(list) => list.iter().any(|c| c == name),
            None => true,
        }
    }
}
