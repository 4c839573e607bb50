use std::path::{Path, PathBuf};

use crossterm::event::KeyCode;
use serde::Deserialize;

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    pub general: GeneralConfig,
    pub table: TableConfig,
    pub colors: ColorsConfig,
    pub keybinds: KeybindsConfig,
}

#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct GeneralConfig {
    pub refresh_rate_ms: u64,
    /// Pause between the two counter reads of one utilization computation.
    /// Clamped to a 50 ms floor at sampler construction.
    pub sample_delay_ms: u64,
    pub default_sort: String,
    pub sparkline_length: usize,
}

impl Default for GeneralConfig {
    fn default() -> Self {
        GeneralConfig {
            refresh_rate_ms: 1000,
            sample_delay_ms: 50,
            default_sort: "cpu".to_string(),
            sparkline_length: 60,
        }
    }
}

#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct TableConfig {
    /// 0 means fit to the terminal height.
    pub max_rows: usize,
    pub show_full_command: bool,
}

impl Default for TableConfig {
    fn default() -> Self {
        TableConfig {
            max_rows: 0,
            show_full_command: true,
        }
    }
}

#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct ColorsConfig {
    pub theme: String,
}

impl Default for ColorsConfig {
    fn default() -> Self {
        ColorsConfig {
            theme: "dark".to_string(),
        }
    }
}

#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct KeybindsConfig {
    pub quit: String,
    pub help: String,
    pub cycle_sort: String,
    pub refresh: String,
    pub pause: String,
    pub cycle_theme: String,
}

impl Default for KeybindsConfig {
    fn default() -> Self {
        KeybindsConfig {
            quit: "q".to_string(),
            help: "?".to_string(),
            cycle_sort: "s".to_string(),
            refresh: "r".to_string(),
            pause: "p".to_string(),
            cycle_theme: "t".to_string(),
        }
    }
}

pub fn parse_key(s: &str) -> Option<KeyCode> {
    match s {
        "Enter" => Some(KeyCode::Enter),
        "Esc" | "Escape" => Some(KeyCode::Esc),
        "Tab" => Some(KeyCode::Tab),
        "Space" => Some(KeyCode::Char(' ')),
        "Backspace" => Some(KeyCode::Backspace),
        "Delete" => Some(KeyCode::Delete),
        _ => {
            let mut chars = s.chars();
            match (chars.next(), chars.next()) {
                (Some(c), None) => Some(KeyCode::Char(c)),
                _ => None,
            }
        }
    }
}

pub fn config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|p| p.join("ticktop").join("config.toml"))
}

pub fn load_config() -> Config {
    match config_path() {
        Some(path) if path.exists() => load_config_from_path(&path),
        _ => Config::default(),
    }
}

pub fn load_config_from_path(path: &Path) -> Config {
    match std::fs::read_to_string(path) {
        Ok(contents) => toml::from_str(&contents).unwrap_or_default(),
        Err(_) => Config::default(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_values() {
        let config = Config::default();
        assert_eq!(config.general.refresh_rate_ms, 1000);
        assert_eq!(config.general.sample_delay_ms, 50);
        assert_eq!(config.general.default_sort, "cpu");
        assert_eq!(config.table.max_rows, 0);
        assert_eq!(config.colors.theme, "dark");
        assert_eq!(config.keybinds.quit, "q");
        assert_eq!(config.keybinds.cycle_theme, "t");
    }

    #[test]
    fn parse_partial_toml() {
        let toml_str = r#"
[general]
refresh_rate_ms = 500
"#;
        let config: Config = toml::from_str(toml_str).unwrap();
        assert_eq!(config.general.refresh_rate_ms, 500);
        // Other fields keep their defaults
        assert_eq!(config.general.sample_delay_ms, 50);
        assert_eq!(config.general.default_sort, "cpu");
    }

    #[test]
    fn parse_full_toml() {
        let toml_str = r#"
[general]
refresh_rate_ms = 2000
sample_delay_ms = 80
default_sort = "memory"

[table]
max_rows = 40
show_full_command = false

[colors]
theme = "light"

[keybinds]
quit = "x"
pause = "Space"
"#;
        let config: Config = toml::from_str(toml_str).unwrap();
        assert_eq!(config.general.refresh_rate_ms, 2000);
        assert_eq!(config.general.sample_delay_ms, 80);
        assert_eq!(config.general.default_sort, "memory");
        assert_eq!(config.table.max_rows, 40);
        assert!(!config.table.show_full_command);
        assert_eq!(config.colors.theme, "light");
        assert_eq!(config.keybinds.quit, "x");
        assert_eq!(parse_key(&config.keybinds.pause), Some(KeyCode::Char(' ')));
    }

    #[test]
    fn missing_file_returns_default() {
        let config = load_config_from_path(Path::new("/nonexistent/path/config.toml"));
        assert_eq!(config.general.refresh_rate_ms, 1000);
    }

    #[test]
    fn invalid_toml_returns_default() {
        let temp = std::env::temp_dir().join("ticktop_test_invalid.toml");
        std::fs::write(&temp, "this is not valid toml {{{{").unwrap();
        let config = load_config_from_path(&temp);
        assert_eq!(config.general.refresh_rate_ms, 1000);
        let _ = std::fs::remove_file(&temp);
    }

    #[test]
    fn parse_key_named_and_single_char() {
        assert_eq!(parse_key("q"), Some(KeyCode::Char('q')));
        assert_eq!(parse_key("?"), Some(KeyCode::Char('?')));
        assert_eq!(parse_key("Enter"), Some(KeyCode::Enter));
        assert_eq!(parse_key("not-a-key"), None);
    }
}
