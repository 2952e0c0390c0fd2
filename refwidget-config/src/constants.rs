//! Built-in defaults for the referral widget integration.

pub mod api {
    /// Production SaaSquatch API host.
    pub const DEFAULT_BASE_URL: &str = "https://app.referralsaasquatch.com";
    /// Unencoded widget type; encoded as `p%2F27048%2Fw%2FreferrerWidget` on the wire.
    pub const DEFAULT_WIDGET_TYPE: &str = "p/27048/w/referrerWidget";
    pub const DEFAULT_ENGAGEMENT_MEDIUM: &str = "EMBED";
}

pub mod render {
    /// Base URL used to resolve relative references inside the widget markup.
    pub const DEFAULT_BASE_URL: &str = "https://ssqt.co";
    pub const FALLBACK_HTML: &str = "<p>No HTML content received.</p>";
    pub const ALLOW_ALL_ORIGINS: &str = "*";
}

pub mod env {
    pub const TENANT_ALIAS: &str = "SAASQUATCH_TENANT_ALIAS";
    pub const API_KEY: &str = "SAASQUATCH_API_KEY";
    pub const ACCOUNT_SID: &str = "SAASQUATCH_ACCOUNT_SID";
    pub const JWT: &str = "SAASQUATCH_JWT";
    pub const API_BASE_URL: &str = "SAASQUATCH_API_BASE_URL";
    pub const CONFIG_PATH: &str = "REFWIDGET_CONFIG_PATH";
}

pub const CONFIG_FILE_NAME: &str = "refwidget.toml";
