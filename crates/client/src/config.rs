//! Sheet client configuration loaded from the environment.
use std::env;
use std::path::PathBuf;

use anyhow::Result;

/// How derived state is printed.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
}

impl std::str::FromStr for OutputFormat {
    type Err = anyhow::Error;

    fn from_str(value: &str) -> Result<Self> {
        match value.to_ascii_lowercase().as_str() {
            "text" => Ok(Self::Text),
            "json" => Ok(Self::Json),
            other => anyhow::bail!("unknown output format `{other}`"),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SheetConfig {
    pub character: PathBuf,
    pub catalog: Option<PathBuf>,
    pub rules: Option<PathBuf>,
    pub rebuild: bool,
    pub output: OutputFormat,
}

impl SheetConfig {
    /// Construct configuration from process environment variables.
    ///
    /// Environment variables:
    /// - `SHEET_CHARACTER` - Character document, `.ron` or `.json` (required)
    /// - `SHEET_CATALOG` - Item catalog merged into the inventory (optional)
    /// - `SHEET_RULES` - Rules TOML (default: built-in rules)
    /// - `SHEET_REBUILD` - Rebuild the baseline before recomputing (default: false)
    /// - `SHEET_OUTPUT` - `text` or `json` (default: text)
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let character = lookup("SHEET_CHARACTER")
            .map(PathBuf::from)
            .ok_or_else(|| anyhow::anyhow!("SHEET_CHARACTER must name a character document"))?;

        let output = match lookup("SHEET_OUTPUT") {
            Some(value) => value.parse()?,
            None => OutputFormat::default(),
        };

        Ok(Self {
            character,
            catalog: lookup("SHEET_CATALOG").map(PathBuf::from),
            rules: lookup("SHEET_RULES").map(PathBuf::from),
            rebuild: lookup("SHEET_REBUILD")
                .as_deref()
                .and_then(parse_bool)
                .unwrap_or(false),
            output,
        })
    }
}

fn parse_bool(value: &str) -> Option<bool> {
    match value.to_lowercase().as_str() {
        "true" | "1" | "yes" | "on" => Some(true),
        "false" | "0" | "no" | "off" => Some(false),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn config(vars: &[(&str, &str)]) -> Result<SheetConfig> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(key, value)| (key.to_string(), value.to_string()))
            .collect();
        SheetConfig::from_lookup(|key| vars.get(key).cloned())
    }

    #[test]
    fn character_is_required() {
        assert!(config(&[]).is_err());
    }

    #[test]
    fn defaults_apply() {
        let config = config(&[("SHEET_CHARACTER", "aria.ron")]).expect("config");
        assert_eq!(config.character, PathBuf::from("aria.ron"));
        assert_eq!(config.catalog, None);
        assert!(!config.rebuild);
        assert_eq!(config.output, OutputFormat::Text);
    }

    #[test]
    fn flags_parse() {
        let config = config(&[
            ("SHEET_CHARACTER", "aria.ron"),
            ("SHEET_REBUILD", "1"),
            ("SHEET_OUTPUT", "JSON"),
            ("SHEET_RULES", "rules.toml"),
        ])
        .expect("config");
        assert!(config.rebuild);
        assert_eq!(config.output, OutputFormat::Json);
        assert_eq!(config.rules, Some(PathBuf::from("rules.toml")));
    }

    #[test]
    fn unknown_output_is_an_error() {
        assert!(config(&[("SHEET_CHARACTER", "a.ron"), ("SHEET_OUTPUT", "yaml")]).is_err());
    }
}
