use std::fs;
use std::path::Path;

use regex::Regex;
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use crate::error::{DashboardError, DashboardResult};

pub const DEFAULT_TITLE: &str = "Anúncios de Fármacos Monitor Campista (1880-1884)";

pub const DEFAULT_COLORS: [&str; 6] = [
    "#007F77", // teal-700, accent
    "#4385BE", // blue-600
    "#8B7EC8", // purple-600
    "#D83232", // red-700
    "#BC6F00", // orange-700
    "#6F6E69", // gray-600, neutral end-stop
];

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DashboardConfig {
    #[serde(default = "default_title")]
    pub title: String,
    #[serde(default)]
    pub theme: Theme,
    #[serde(default)]
    pub links: Vec<Link>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Theme {
    pub colors: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Link {
    pub label: String,
    pub url: String,
}

fn default_title() -> String {
    DEFAULT_TITLE.to_string()
}

impl Default for Theme {
    fn default() -> Self {
        Self {
            colors: DEFAULT_COLORS.iter().map(|color| color.to_string()).collect(),
        }
    }
}

impl Default for DashboardConfig {
    fn default() -> Self {
        Self {
            title: default_title(),
            theme: Theme::default(),
            links: Vec::new(),
        }
    }
}

impl Theme {
    pub fn accent(&self) -> &str {
        self.colors.first().map(String::as_str).unwrap_or(DEFAULT_COLORS[0])
    }
}

pub fn load_config(path: &Path) -> DashboardResult<DashboardConfig> {
    if !path.exists() {
        warn!(path = %path.display(), "config file missing, using built-in theme");
        return Ok(DashboardConfig::default());
    }

    let raw = fs::read_to_string(path).map_err(|err| DashboardError::Config {
        path: path.to_path_buf(),
        reason: err.to_string(),
    })?;
    let config = parse_config(&raw).map_err(|reason| DashboardError::Config {
        path: path.to_path_buf(),
        reason,
    })?;

    info!(
        path = %path.display(),
        colors = config.theme.colors.len(),
        links = config.links.len(),
        "loaded dashboard config"
    );
    Ok(config)
}

fn parse_config(raw: &str) -> Result<DashboardConfig, String> {
    let config: DashboardConfig = toml::from_str(raw).map_err(|err| err.to_string())?;
    validate_theme(&config.theme)?;
    Ok(config)
}

fn validate_theme(theme: &Theme) -> Result<(), String> {
    if theme.colors.is_empty() {
        return Err("theme.colors must list at least one color".to_string());
    }

    let pattern = Regex::new(r"^#[0-9A-Fa-f]{6}$").map_err(|err| err.to_string())?;
    if let Some(bad) = theme.colors.iter().find(|color| !pattern.is_match(color)) {
        return Err(format!("theme color is not #RRGGBB: {bad}"));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_file_uses_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let config = load_config(&dir.path().join("dashboard.toml")).unwrap();
        assert_eq!(config, DashboardConfig::default());
        assert_eq!(config.theme.accent(), "#007F77");
        assert_eq!(config.theme.colors.len(), 6);
    }

    #[test]
    fn parses_title_colors_and_links() {
        let config = parse_config(
            r##"
            title = "Monitor Campista"

            [theme]
            colors = ["#112233", "#abcdef"]

            [[links]]
            label = "Hemeroteca"
            url = "https://memoria.bn.br"
            "##,
        )
        .unwrap();

        assert_eq!(config.title, "Monitor Campista");
        assert_eq!(config.theme.colors, vec!["#112233", "#abcdef"]);
        assert_eq!(config.links.len(), 1);
        assert_eq!(config.links[0].label, "Hemeroteca");
    }

    #[test]
    fn omitted_sections_fall_back_to_defaults() {
        let config = parse_config("").unwrap();
        assert_eq!(config.title, DEFAULT_TITLE);
        assert_eq!(config.theme, Theme::default());
    }

    #[test]
    fn rejects_malformed_colors() {
        let err = parse_config("[theme]\ncolors = [\"teal\"]\n").unwrap_err();
        assert!(err.contains("teal"), "{err}");

        let err = parse_config("[theme]\ncolors = []\n").unwrap_err();
        assert!(err.contains("at least one"), "{err}");
    }

    #[test]
    fn unparsable_file_is_a_config_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("dashboard.toml");
        fs::write(&path, "title = [").unwrap();

        let err = load_config(&path).unwrap_err();
        assert!(matches!(err, DashboardError::Config { .. }));
    }
}
