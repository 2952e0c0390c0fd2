//! Start-up wiring: resolve configuration and credentials once, apply
//! command-line overrides, and freeze the result for the screen.

use anyhow::{Context, Result};
use refwidget_config::{ConfigManager, Credentials, WidgetConfig};

use crate::args::Cli;

/// Immutable inputs for one run of the widget screen.
#[derive(Debug, Clone)]
pub struct StartupContext {
    pub config: WidgetConfig,
    pub credentials: Credentials,
}

impl StartupContext {
    pub fn from_cli_args(args: &Cli) -> Result<Self> {
        let mut manager =
            ConfigManager::load(args.config.as_deref()).context("Failed to load configuration")?;
        if let Some(path) = manager.config_path() {
            tracing::debug!(path = %path.display(), "loaded configuration file");
        }

        apply_cli_overrides(manager.config_mut(), args);
        let (config, credentials) = manager.into_parts()?;

        tracing::debug!(
            tenant_alias = %config.api.tenant_alias,
            api_base_url = %config.api.base_url,
            content_mode = %config.render.content_mode,
            credentials = ?credentials,
            "startup configuration resolved"
        );

        Ok(Self {
            config,
            credentials,
        })
    }
}

fn apply_cli_overrides(config: &mut WidgetConfig, args: &Cli) {
    if let Some(alias) = &args.tenant_alias {
        config.api.tenant_alias.clone_from(alias);
    }
    if let Some(user_id) = &args.user_id {
        config.identity.id.clone_from(user_id);
    }
    if let Some(account_id) = &args.account_id {
        config.identity.account_id.clone_from(account_id);
    }
    if let Some(mode) = args.content_mode {
        config.render.content_mode = mode;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;
    use refwidget_config::ContentMode;

    #[test]
    fn cli_values_override_config() {
        let args = Cli::parse_from([
            "refwidget",
            "--tenant-alias",
            "cli_tenant",
            "--user-id",
            "cli_user",
            "--account-id",
            "cli_account",
            "--content-mode",
            "desktop",
        ]);
        let mut config = WidgetConfig::default();
        config.api.tenant_alias = "file_tenant".into();

        apply_cli_overrides(&mut config, &args);

        assert_eq!(config.api.tenant_alias, "cli_tenant");
        assert_eq!(config.identity.id, "cli_user");
        assert_eq!(config.identity.account_id, "cli_account");
        assert_eq!(config.render.content_mode, ContentMode::Desktop);
    }

    #[test]
    fn absent_flags_leave_config_alone() {
        let args = Cli::parse_from(["refwidget"]);
        let mut config = WidgetConfig::default();
        config.identity.id = "kept".into();

        apply_cli_overrides(&mut config, &args);

        assert_eq!(config.identity.id, "kept");
        assert_eq!(config.render.content_mode, ContentMode::Mobile);
    }
}
