use anyhow::{Context, Result};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::PathBuf;

use crate::theme::Theme;

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub interpreter: InterpreterConfig,
    pub editor: EditorConfig,
    pub layout: LayoutConfig,
    pub theme_name: String,
    #[serde(skip)]
    pub theme: Theme,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct InterpreterConfig {
    pub path: PathBuf,
}

impl Default for InterpreterConfig {
    fn default() -> Self {
        Self {
            path: PathBuf::from("python3"),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct EditorConfig {
    pub tab_size: usize,
    pub auto_indent: bool,
    pub show_line_numbers: bool,
}

impl Default for EditorConfig {
    fn default() -> Self {
        Self {
            tab_size: 4,
            auto_indent: true,
            show_line_numbers: true,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LayoutConfig {
    pub output_height: u16,
    pub output_min_height: u16,
    pub output_max_height: u16,
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            output_height: 12,
            output_min_height: 5,
            output_max_height: 40,
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            interpreter: InterpreterConfig::default(),
            editor: EditorConfig::default(),
            layout: LayoutConfig::default(),
            theme_name: String::from("dark"),
            theme: Theme::dark(),
        }
    }
}

impl Config {
    pub fn load() -> Result<Self> {
        let config_path = Self::config_file_path()?;

        if config_path.exists() {
            let content = fs::read_to_string(&config_path)
                .with_context(|| format!("Failed to read config: {}", config_path.display()))?;
            let mut config: Config =
                toml::from_str(&content).with_context(|| "Failed to parse config file")?;
            config.theme = Theme::from_name(&config.theme_name);
            Ok(config)
        } else {
            let config = Config::default();
            config.save()?;
            Ok(config)
        }
    }

    pub fn set_theme(&mut self, name: &str) {
        self.theme_name = name.to_string();
        self.theme = Theme::from_name(name);
    }

    pub fn save(&self) -> Result<()> {
        let config_path = Self::config_file_path()?;

        if let Some(parent) = config_path.parent() {
            fs::create_dir_all(parent)?;
        }

        let content = toml::to_string_pretty(self)?;
        fs::write(&config_path, content)?;
        Ok(())
    }

    fn config_file_path() -> Result<PathBuf> {
        let proj_dirs = ProjectDirs::from("com", "scriptpad", "scriptpad")
            .context("Could not determine config directory")?;
        Ok(proj_dirs.config_dir().join("config.toml"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_fill_missing_fields() {
        let config: Config = toml::from_str("").unwrap();
        assert_eq!(config.interpreter.path, PathBuf::from("python3"));
        assert_eq!(config.editor.tab_size, 4);
        assert!(config.editor.auto_indent);
        assert_eq!(config.layout.output_height, 12);
        assert_eq!(config.theme_name, "dark");
    }

    #[test]
    fn round_trips_through_toml() {
        let mut config = Config::default();
        config.interpreter.path = PathBuf::from("/usr/bin/python3.12");
        config.editor.tab_size = 2;
        config.theme_name = String::from("gruvbox");

        let text = toml::to_string_pretty(&config).unwrap();
        let back: Config = toml::from_str(&text).unwrap();
        assert_eq!(back.interpreter.path, PathBuf::from("/usr/bin/python3.12"));
        assert_eq!(back.editor.tab_size, 2);
        assert_eq!(back.theme_name, "gruvbox");
    }

    #[test]
    fn partial_section_keeps_other_defaults() {
        let config: Config = toml::from_str("[editor]\ntab_size = 8\n").unwrap();
        assert_eq!(config.editor.tab_size, 8);
        assert!(config.editor.show_line_numbers);
        assert_eq!(config.interpreter.path, PathBuf::from("python3"));
    }
}
