//! Configuration loading for azure-devops-mcp
//!
//! Configuration is loaded from:
//! 1. Environment variables (AZURE_DEVOPS_ORG_URL, AZURE_DEVOPS_PAT, ...)
//! 2. File named by AZURE_DEVOPS_CONFIG_PATH
//! 3. ~/.config/azure-devops-mcp.toml
//! 4. Default values
//!
//! The result is an explicit [`AdoConfig`] value handed to the client
//! constructor; nothing in this crate reads credentials from the
//! environment after startup.

use anyhow::{bail, Context, Result};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use url::Url;

/// Main configuration structure
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AdoConfig {
    /// Organization URL, e.g. `https://dev.azure.com/contoso`
    #[serde(default)]
    pub organization_url: String,
    /// Personal access token (sent as basic auth with an empty username)
    #[serde(default)]
    pub pat: String,
    /// Project used when a tool invocation does not name one
    #[serde(default)]
    pub default_project: Option<String>,
    /// Repository used when a tool invocation does not name one
    #[serde(default)]
    pub default_repository: Option<String>,
    /// REST API version sent with every call
    #[serde(default = "default_api_version")]
    pub api_version: String,
    /// Upper bound, in seconds, for mutating backend calls
    #[serde(default = "default_mutation_timeout")]
    pub mutation_timeout_secs: u64,
}

fn default_api_version() -> String {
    "7.1".to_string()
}

fn default_mutation_timeout() -> u64 {
    30
}

impl Default for AdoConfig {
    fn default() -> Self {
        Self {
            organization_url: String::new(),
            pat: String::new(),
            default_project: None,
            default_repository: None,
            api_version: default_api_version(),
            mutation_timeout_secs: default_mutation_timeout(),
        }
    }
}

impl AdoConfig {
    /// Load configuration from file and environment, then validate it.
    pub fn load() -> Result<Self> {
        let mut config = if let Some(path) = Self::find_config_path() {
            if path.exists() {
                tracing::info!("Loading config from: {}", path.display());
                let content = std::fs::read_to_string(&path)
                    .with_context(|| format!("reading {}", path.display()))?;
                toml::from_str(&content)
                    .with_context(|| format!("parsing {}", path.display()))?
            } else {
                Self::default()
            }
        } else {
            Self::default()
        };

        // Environment variables win over the file
        if let Ok(v) = std::env::var("AZURE_DEVOPS_ORG_URL") {
            config.organization_url = v;
        }
        if let Ok(v) = std::env::var("AZURE_DEVOPS_PAT") {
            config.pat = v;
        }
        if let Ok(v) = std::env::var("AZURE_DEVOPS_PROJECT") {
            config.default_project = Some(v);
        }
        if let Ok(v) = std::env::var("AZURE_DEVOPS_REPOSITORY") {
            config.default_repository = Some(v);
        }
        if let Ok(v) = std::env::var("AZURE_DEVOPS_API_VERSION") {
            config.api_version = v;
        }

        config.validate()?;
        Ok(config)
    }

    /// Check that the fields every backend call needs are present.
    pub fn validate(&self) -> Result<()> {
        if self.organization_url.is_empty() {
            bail!("organization URL not configured (set AZURE_DEVOPS_ORG_URL)");
        }
        Url::parse(&self.organization_url)
            .with_context(|| format!("invalid organization URL: {}", self.organization_url))?;
        if self.pat.is_empty() {
            bail!("personal access token not configured (set AZURE_DEVOPS_PAT)");
        }
        Ok(())
    }

    fn find_config_path() -> Option<PathBuf> {
        if let Ok(path) = std::env::var("AZURE_DEVOPS_CONFIG_PATH") {
            return Some(PathBuf::from(path));
        }
        if let Ok(home) = std::env::var("HOME") {
            return Some(
                PathBuf::from(home)
                    .join(".config")
                    .join("azure-devops-mcp.toml"),
            );
        }
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn valid() -> AdoConfig {
        AdoConfig {
            organization_url: "https://dev.azure.com/contoso".to_string(),
            pat: "token".to_string(),
            ..Default::default()
        }
    }

    #[test]
    fn test_validate_ok() {
        assert!(valid().validate().is_ok());
    }

    #[test]
    fn test_validate_missing_org() {
        let config = AdoConfig {
            organization_url: String::new(),
            ..valid()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validate_missing_pat() {
        let config = AdoConfig {
            pat: String::new(),
            ..valid()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_file_defaults() {
        let config: AdoConfig = toml::from_str(
            r#"
            organization_url = "https://dev.azure.com/contoso"
            pat = "token"
            default_project = "Website"
            "#,
        )
        .unwrap();
        assert_eq!(config.api_version, "7.1");
        assert_eq!(config.default_project.as_deref(), Some("Website"));
        assert_eq!(config.default_repository, None);
        assert_eq!(config.mutation_timeout_secs, 30);
    }
}
