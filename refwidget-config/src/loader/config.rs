use std::fmt;
use std::str::FromStr;

use anyhow::{Result, ensure};
use serde::{Deserialize, Serialize};

use crate::constants;
use crate::credentials::CredentialsConfig;
use crate::timeouts::TimeoutsConfig;

/// Root configuration loaded from `refwidget.toml` and the environment.
///
/// Built once at process start and treated as immutable afterwards.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct WidgetConfig {
    #[serde(default)]
    pub api: ApiConfig,
    #[serde(default)]
    pub identity: IdentityConfig,
    #[serde(default)]
    pub render: RenderConfig,
    #[serde(default)]
    pub timeouts: TimeoutsConfig,
    #[serde(default)]
    pub credentials: CredentialsConfig,
}

impl WidgetConfig {
    pub fn validate(&self) -> Result<()> {
        self.render.validate()?;
        self.timeouts.validate()?;
        Ok(())
    }
}

/// Referral API endpoint settings.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct ApiConfig {
    /// Scheme and host of the referral API, without a trailing path.
    #[serde(default = "ApiConfig::default_base_url")]
    pub base_url: String,
    /// Per-tenant namespace segment. Not validated; an empty alias yields a
    /// request the API rejects.
    #[serde(default)]
    pub tenant_alias: String,
    #[serde(default = "ApiConfig::default_widget_type")]
    pub widget_type: String,
    #[serde(default = "ApiConfig::default_engagement_medium")]
    pub engagement_medium: String,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: Self::default_base_url(),
            tenant_alias: String::new(),
            widget_type: Self::default_widget_type(),
            engagement_medium: Self::default_engagement_medium(),
        }
    }
}

impl ApiConfig {
    fn default_base_url() -> String {
        constants::api::DEFAULT_BASE_URL.to_string()
    }

    fn default_widget_type() -> String {
        constants::api::DEFAULT_WIDGET_TYPE.to_string()
    }

    fn default_engagement_medium() -> String {
        constants::api::DEFAULT_ENGAGEMENT_MEDIUM.to_string()
    }
}

/// Optional identity attributes that may be included in the upsert body.
/// `id` and `accountId` are always sent.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum IdentityField {
    FirstName,
    LastName,
    Email,
    Locale,
    CountryCode,
}

impl IdentityField {
    pub const ALL: [Self; 5] = [
        Self::FirstName,
        Self::LastName,
        Self::Email,
        Self::Locale,
        Self::CountryCode,
    ];
}

/// The advocate's identity as configured. `id` and `account_id` are opaque,
/// usually hashed, identifiers.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct IdentityConfig {
    #[serde(default)]
    pub id: String,
    #[serde(default)]
    pub account_id: String,
    #[serde(default)]
    pub first_name: Option<String>,
    #[serde(default)]
    pub last_name: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub locale: Option<String>,
    #[serde(default)]
    pub country_code: Option<String>,
    /// Which optional fields travel in the request body.
    #[serde(default = "IdentityConfig::default_include_fields")]
    pub include_fields: Vec<IdentityField>,
}

impl Default for IdentityConfig {
    fn default() -> Self {
        Self {
            id: String::new(),
            account_id: String::new(),
            first_name: None,
            last_name: None,
            email: None,
            locale: None,
            country_code: None,
            include_fields: Self::default_include_fields(),
        }
    }
}

impl IdentityConfig {
    fn default_include_fields() -> Vec<IdentityField> {
        IdentityField::ALL.to_vec()
    }
}

/// Display-density hint handed to the embedded browser.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ContentMode {
    #[default]
    Mobile,
    Desktop,
}

impl ContentMode {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Mobile => "mobile",
            Self::Desktop => "desktop",
        }
    }
}

impl fmt::Display for ContentMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ContentMode {
    type Err = String;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "mobile" => Ok(Self::Mobile),
            "desktop" => Ok(Self::Desktop),
            other => Err(format!(
                "unknown content mode '{other}' (expected 'mobile' or 'desktop')"
            )),
        }
    }
}

/// Settings for the embedded browser context the widget renders into.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct RenderConfig {
    /// Base URL for resolving relative references inside the widget markup.
    #[serde(default = "RenderConfig::default_base_url")]
    pub base_url: String,
    /// Markup shown when the API response carries no template.
    #[serde(default = "RenderConfig::default_fallback_html")]
    pub fallback_html: String,
    #[serde(default)]
    pub content_mode: ContentMode,
    #[serde(default = "RenderConfig::default_javascript_enabled")]
    pub javascript_enabled: bool,
    /// Origins the embedded context may load from. `*` allows every origin.
    #[serde(default = "RenderConfig::default_origin_whitelist")]
    pub origin_whitelist: Vec<String>,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            base_url: Self::default_base_url(),
            fallback_html: Self::default_fallback_html(),
            content_mode: ContentMode::default(),
            javascript_enabled: Self::default_javascript_enabled(),
            origin_whitelist: Self::default_origin_whitelist(),
        }
    }
}

impl RenderConfig {
    fn default_base_url() -> String {
        constants::render::DEFAULT_BASE_URL.to_string()
    }

    fn default_fallback_html() -> String {
        constants::render::FALLBACK_HTML.to_string()
    }

    const fn default_javascript_enabled() -> bool {
        true
    }

    fn default_origin_whitelist() -> Vec<String> {
        vec![constants::render::ALLOW_ALL_ORIGINS.to_string()]
    }

    pub fn validate(&self) -> Result<()> {
        ensure!(
            !self.base_url.trim().is_empty(),
            "render.base_url must not be empty"
        );
        ensure!(
            !self.origin_whitelist.is_empty(),
            "render.origin_whitelist must list at least one origin (use \"*\" to allow all)"
        );
        Ok(())
    }
}
