// Flag definition file loaders

use crate::{ConfigError, FlagDefinition, Result, parse_bool};
use serde::Deserialize;
use std::fs;
use std::path::Path;
use tracing::debug;

/// Supported flag file formats
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum FileFormat {
    Json,
    Toml,
    Env,
}

impl FileFormat {
    pub fn from_extension(ext: &str) -> Option<Self> {
        match ext.to_lowercase().as_str() {
            "json" => Some(FileFormat::Json),
            "toml" => Some(FileFormat::Toml),
            "env" => Some(FileFormat::Env),
            _ => None,
        }
    }
}

/// Top-level layout shared by the JSON and TOML formats.
#[derive(Debug, Default, Deserialize)]
struct FlagFile {
    #[serde(default)]
    flags: Vec<FlagDefinition>,
}

/// Flag definition file loader
pub struct FlagLoader {
    format: FileFormat,
}

impl FlagLoader {
    pub fn new(format: FileFormat) -> Self {
        Self { format }
    }

    /// Auto-detect format from file extension
    ///
    /// Files named `.env` (no stem) are treated as the env format.
    pub fn auto(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let ext = path
            .extension()
            .or_else(|| path.file_name().filter(|name| *name == ".env"))
            .and_then(|s| s.to_str())
            .ok_or_else(|| ConfigError::LoadError("No file extension found".to_string()))?;

        let format = FileFormat::from_extension(ext.trim_start_matches('.'))
            .ok_or_else(|| ConfigError::UnsupportedFormat(ext.to_string()))?;

        Ok(Self::new(format))
    }

    pub fn format(&self) -> FileFormat {
        self.format
    }

    /// Load flag definitions from file
    pub fn load_file(&self, path: impl AsRef<Path>) -> Result<Vec<FlagDefinition>> {
        let path = path.as_ref();
        let content = fs::read_to_string(path).map_err(|e| {
            ConfigError::LoadError(format!("Failed to read {}: {}", path.display(), e))
        })?;

        let definitions = self.parse(&content)?;
        debug!(
            path = %path.display(),
            count = definitions.len(),
            "Loaded flag definitions"
        );
        Ok(definitions)
    }

    /// Parse flag definitions from string
    pub fn parse(&self, content: &str) -> Result<Vec<FlagDefinition>> {
        match self.format {
            FileFormat::Json => self.parse_json(content),
            FileFormat::Toml => self.parse_toml(content),
            FileFormat::Env => self.parse_env(content),
        }
    }

    fn parse_json(&self, content: &str) -> Result<Vec<FlagDefinition>> {
        let file: FlagFile = serde_json::from_str(content)?;
        Ok(file.flags)
    }

    fn parse_toml(&self, content: &str) -> Result<Vec<FlagDefinition>> {
        let file: FlagFile = toml::from_str(content)?;
        Ok(file.flags)
    }

    fn parse_env(&self, content: &str) -> Result<Vec<FlagDefinition>> {
        let mut definitions = Vec::new();

        for line in content.lines() {
            let line = line.trim();
            if line.is_empty() || line.starts_with('#') {
                continue;
            }

            let Some((key, value)) = line.split_once('=') else {
                return Err(ConfigError::ParseError(format!("Expected NAME=value: {}", line)));
            };

            let key = key.trim();
            let value = value.trim().trim_matches('"').trim_matches('\'');
            definitions.push(FlagDefinition::new(key, parse_bool(key, value)?));
        }

        Ok(definitions)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_json() {
        let loader = FlagLoader::new(FileFormat::Json);
        let json = r#"{
            "flags": [
                {"name": "simple", "enabled": true},
                {"name": "descriptive", "enabled": false, "description": "extra"}
            ]
        }"#;

        let flags = loader.parse(json).unwrap();
        assert_eq!(flags.len(), 2);
        assert_eq!(flags[0], FlagDefinition::new("simple", true));
        assert_eq!(flags[1].description.as_deref(), Some("extra"));
    }

    #[test]
    fn test_parse_json_without_flags() {
        let loader = FlagLoader::new(FileFormat::Json);
        assert!(loader.parse("{}").unwrap().is_empty());
    }

    #[test]
    fn test_parse_toml() {
        let loader = FlagLoader::new(FileFormat::Toml);
        let toml = r#"
            [[flags]]
            name = "simple"
            enabled = true

            [[flags]]
            name = "descriptive"
            enabled = false
            description = "a little extra explanation"
        "#;

        let flags = loader.parse(toml).unwrap();
        let names: Vec<&str> = flags.iter().map(|f| f.name.as_str()).collect();
        assert_eq!(names, ["simple", "descriptive"]);
        assert!(flags[0].enabled);
    }

    #[test]
    fn test_parse_toml_defaults_to_disabled() {
        let loader = FlagLoader::new(FileFormat::Toml);
        let flags = loader.parse("[[flags]]\nname = \"quiet\"\n").unwrap();
        assert!(!flags[0].enabled);
    }

    #[test]
    fn test_parse_env() {
        let loader = FlagLoader::new(FileFormat::Env);
        let env = r#"
            simple=true
            # Comment
            descriptive = 0
            QUOTED="on"
        "#;

        let flags = loader.parse(env).unwrap();
        assert_eq!(
            flags,
            vec![
                FlagDefinition::new("simple", true),
                FlagDefinition::new("descriptive", false),
                FlagDefinition::new("QUOTED", true),
            ]
        );
    }

    #[test]
    fn test_parse_env_invalid_value() {
        let loader = FlagLoader::new(FileFormat::Env);
        let err = loader.parse("simple=maybe").unwrap_err();
        assert!(matches!(err, ConfigError::InvalidValue { .. }));
    }

    #[test]
    fn test_parse_env_missing_separator() {
        let loader = FlagLoader::new(FileFormat::Env);
        assert!(matches!(
            loader.parse("simple"),
            Err(ConfigError::ParseError(_))
        ));
    }

    #[test]
    fn test_parse_errors() {
        assert!(matches!(
            FlagLoader::new(FileFormat::Json).parse("{"),
            Err(ConfigError::JsonError(_))
        ));
        assert!(matches!(
            FlagLoader::new(FileFormat::Toml).parse("[[flags]"),
            Err(ConfigError::TomlError(_))
        ));
    }

    #[test]
    fn test_format_detection() {
        assert_eq!(FileFormat::from_extension("json"), Some(FileFormat::Json));
        assert_eq!(FileFormat::from_extension("TOML"), Some(FileFormat::Toml));
        assert_eq!(FileFormat::from_extension("env"), Some(FileFormat::Env));
        assert_eq!(FileFormat::from_extension("unknown"), None);
    }

    #[test]
    fn test_auto() {
        assert_eq!(
            FlagLoader::auto("flags.toml").unwrap().format(),
            FileFormat::Toml
        );
        assert_eq!(FlagLoader::auto(".env").unwrap().format(), FileFormat::Env);
        assert!(matches!(
            FlagLoader::auto("flags.yaml"),
            Err(ConfigError::UnsupportedFormat(_))
        ));
        assert!(matches!(
            FlagLoader::auto("flags"),
            Err(ConfigError::LoadError(_))
        ));
    }
}
