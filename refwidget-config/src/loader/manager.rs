use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};

use crate::constants::{self, env};
use crate::credentials::Credentials;
use crate::loader::config::WidgetConfig;

/// Loads, merges, and validates the widget configuration.
///
/// Precedence (lowest to highest): built-in defaults, `refwidget.toml`,
/// environment variables. Command-line overrides are applied by the caller on
/// top of [`ConfigManager::config_mut`] before the configuration is frozen.
#[derive(Debug, Clone)]
pub struct ConfigManager {
    config: WidgetConfig,
    credentials: Credentials,
    config_path: Option<PathBuf>,
}

impl ConfigManager {
    /// Load configuration from the process environment.
    ///
    /// `explicit_path` (typically `--config`) wins over `REFWIDGET_CONFIG_PATH`,
    /// which wins over `refwidget.toml` in the current directory.
    pub fn load(explicit_path: Option<&Path>) -> Result<Self> {
        let workspace = std::env::current_dir().context("Failed to resolve current directory")?;
        Self::load_with_lookup(explicit_path, &workspace, |key| std::env::var(key).ok())
    }

    /// Load configuration using an arbitrary environment lookup.
    pub fn load_with_lookup<F>(
        explicit_path: Option<&Path>,
        workspace: &Path,
        lookup: F,
    ) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let env_path = lookup(env::CONFIG_PATH)
            .map(|value| value.trim().to_string())
            .filter(|value| !value.is_empty())
            .map(PathBuf::from);

        let (mut config, config_path) = match (explicit_path, env_path) {
            (Some(path), _) => (Self::load_toml_from_file(path)?, Some(path.to_path_buf())),
            (None, Some(path)) => {
                let config = Self::load_toml_from_file(&path).with_context(|| {
                    format!(
                        "Failed to load configuration from {}={}",
                        env::CONFIG_PATH,
                        path.display()
                    )
                })?;
                (config, Some(path))
            }
            (None, None) => {
                let candidate = workspace.join(constants::CONFIG_FILE_NAME);
                if candidate.exists() {
                    (Self::load_toml_from_file(&candidate)?, Some(candidate))
                } else {
                    tracing::debug!(
                        workspace = %workspace.display(),
                        "no {} found; using built-in defaults",
                        constants::CONFIG_FILE_NAME
                    );
                    (WidgetConfig::default(), None)
                }
            }
        };

        Self::apply_env_overrides(&mut config, &lookup);
        let credentials = Credentials::from_lookup(&config.credentials, &lookup);

        config.validate().with_context(|| match &config_path {
            Some(path) => format!("Invalid configuration in {}", path.display()),
            None => "Invalid configuration".to_string(),
        })?;

        Ok(Self {
            config,
            credentials,
            config_path,
        })
    }

    fn load_toml_from_file(path: &Path) -> Result<WidgetConfig> {
        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;
        Self::parse_toml(&content)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))
    }

    /// Parse configuration from TOML text without touching the environment.
    pub fn parse_toml(content: &str) -> Result<WidgetConfig> {
        let config: WidgetConfig = toml::from_str(content).context("Invalid TOML")?;
        Ok(config)
    }

    fn apply_env_overrides<F>(config: &mut WidgetConfig, lookup: &F)
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(alias) = lookup(env::TENANT_ALIAS)
            && !alias.is_empty()
        {
            config.api.tenant_alias = alias;
        }
        if let Some(base_url) = lookup(env::API_BASE_URL)
            && !base_url.trim().is_empty()
        {
            config.api.base_url = base_url.trim().to_string();
        }
    }

    pub fn config(&self) -> &WidgetConfig {
        &self.config
    }

    /// Mutable access for command-line overrides applied before start-up completes.
    pub fn config_mut(&mut self) -> &mut WidgetConfig {
        &mut self.config
    }

    pub fn credentials(&self) -> &Credentials {
        &self.credentials
    }

    pub fn config_path(&self) -> Option<&Path> {
        self.config_path.as_deref()
    }

    /// Validate once more and hand out the frozen configuration.
    pub fn into_parts(self) -> Result<(WidgetConfig, Credentials)> {
        self.config.validate()?;
        Ok((self.config, self.credentials))
    }
}
