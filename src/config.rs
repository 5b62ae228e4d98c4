// ============================================================================
// Configuration : configs.json
// ============================================================================
// Même fichier et mêmes clés que le front web :
//   { "API_BASE_URL": "http://localhost:5000/" }
//
// Ordre de recherche :
// 1. chemin dans SIGNALBOARD_CONFIG
// 2. ./configs.json
// 3. <config_dir>/signalboard/configs.json (dirs)
//
// Fichier absent → valeurs par défaut. Fichier présent mais invalide → erreur.
// SIGNALBOARD_API_BASE_URL remplace l'URL de base dans tous les cas.
// ============================================================================

use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::{Context, Result};
use serde::Deserialize;
use tracing::{debug, info};

use crate::chart::DEFAULT_CHART_TITLE;

/// Nom du fichier de configuration
pub const CONFIG_FILE_NAME: &str = "configs.json";

/// Variable d'environnement : chemin explicite du fichier
pub const CONFIG_PATH_ENV: &str = "SIGNALBOARD_CONFIG";

/// Variable d'environnement : URL de base du backend
pub const BASE_URL_ENV: &str = "SIGNALBOARD_API_BASE_URL";

pub const DEFAULT_API_BASE_URL: &str = "http://localhost:5000/";
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Configuration de l'application
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    #[serde(rename = "API_BASE_URL")]
    pub api_base_url: String,

    #[serde(rename = "REQUEST_TIMEOUT_SECS")]
    pub request_timeout_secs: u64,

    #[serde(rename = "CHART_TITLE")]
    pub chart_title: String,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            api_base_url: DEFAULT_API_BASE_URL.to_string(),
            request_timeout_secs: DEFAULT_TIMEOUT_SECS,
            chart_title: DEFAULT_CHART_TITLE.to_string(),
        }
    }
}

impl AppConfig {
    /// Charge la configuration depuis l'environnement et le disque
    pub fn load() -> Result<Self> {
        let explicit = std::env::var_os(CONFIG_PATH_ENV).map(PathBuf::from);
        let mut config = match find_config_file(explicit) {
            Some(path) => Self::from_file(&path)?,
            None => {
                info!("No configuration file found, using defaults");
                Self::default()
            }
        };

        config.apply_base_url_override(std::env::var(BASE_URL_ENV).ok());
        Ok(config)
    }

    /// Parse un fichier de configuration
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Impossible de lire la configuration {}", path.display()))?;

        let config: AppConfig = serde_json::from_str(&content)
            .with_context(|| format!("Configuration invalide dans {}", path.display()))?;

        info!(path = %path.display(), base_url = %config.api_base_url, "Configuration loaded");
        Ok(config)
    }

    /// Remplace l'URL de base si une valeur non vide est fournie
    pub fn apply_base_url_override(&mut self, base_url: Option<String>) {
        if let Some(url) = base_url.filter(|u| !u.trim().is_empty()) {
            debug!(base_url = %url, "Base URL overridden from environment");
            self.api_base_url = url;
        }
    }

    /// Construit l'URL complète d'un endpoint
    ///
    /// Fonctionne avec ou sans "/" final dans l'URL de base :
    /// endpoint("signals") sur "http://h:5000" et "http://h:5000/" → "http://h:5000/signals"
    pub fn endpoint(&self, path: &str) -> String {
        format!(
            "{}/{}",
            self.api_base_url.trim_end_matches('/'),
            path.trim_start_matches('/')
        )
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }
}

/// Premier fichier existant selon l'ordre de recherche
///
/// Un chemin explicite est toujours retenu, même s'il n'existe pas :
/// l'erreur de lecture sera alors remontée.
fn find_config_file(explicit: Option<PathBuf>) -> Option<PathBuf> {
    if explicit.is_some() {
        return explicit;
    }

    let local = PathBuf::from(CONFIG_FILE_NAME);
    if local.is_file() {
        return Some(local);
    }

    dirs::config_dir()
        .map(|dir| dir.join("signalboard").join(CONFIG_FILE_NAME))
        .filter(|path| path.is_file())
}

// ============================================================================
// Tests unitaires
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn write_config(content: &str) -> NamedTempFile {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(content.as_bytes()).unwrap();
        file
    }

    #[test]
    fn test_defaults() {
        let config = AppConfig::default();
        assert_eq!(config.api_base_url, "http://localhost:5000/");
        assert_eq!(config.request_timeout(), Duration::from_secs(30));
        assert_eq!(config.chart_title, "VN30F1M Chart");
    }

    #[test]
    fn test_from_file_partial() {
        let file = write_config(r#"{ "API_BASE_URL": "http://10.0.0.5:8000" }"#);
        let config = AppConfig::from_file(file.path()).unwrap();

        assert_eq!(config.api_base_url, "http://10.0.0.5:8000");
        assert_eq!(config.request_timeout_secs, 30);
        assert_eq!(config.chart_title, "VN30F1M Chart");
    }

    #[test]
    fn test_from_file_invalid() {
        let file = write_config("{ not json");
        let err = AppConfig::from_file(file.path()).unwrap_err();
        assert!(err.to_string().contains("Configuration invalide"));
    }

    #[test]
    fn test_explicit_path_is_kept() {
        let path = PathBuf::from("/nonexistent/configs.json");
        assert_eq!(find_config_file(Some(path.clone())), Some(path.clone()));
        assert!(AppConfig::from_file(&path).is_err());
    }

    #[test]
    fn test_endpoint_joining() {
        let mut config = AppConfig::default();
        assert_eq!(config.endpoint("signals"), "http://localhost:5000/signals");

        config.api_base_url = "http://localhost:5000".to_string();
        assert_eq!(config.endpoint("/build"), "http://localhost:5000/build");
    }

    #[test]
    fn test_base_url_override() {
        let mut config = AppConfig::default();

        config.apply_base_url_override(Some("  ".to_string()));
        assert_eq!(config.api_base_url, DEFAULT_API_BASE_URL);

        config.apply_base_url_override(Some("http://backend:5000/".to_string()));
        assert_eq!(config.api_base_url, "http://backend:5000/");

        config.apply_base_url_override(None);
        assert_eq!(config.api_base_url, "http://backend:5000/");
    }
}
