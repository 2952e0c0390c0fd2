//! Configuration for the referral widget screen.
//!
//! The screen receives one immutable [`WidgetConfig`] plus resolved
//! [`Credentials`] at construction. Both are produced here from, in order of
//! increasing precedence, built-in defaults, `refwidget.toml`, a `.env` file,
//! and the process environment:
//!
//! ```toml
//! [api]
//! tenant_alias = "test_a1b2c3"
//!
//! [identity]
//! id = "21dd3d5674f146e0c8ffeeb43fbbc3bf292b62beaf0315b7af6bfeeef2ee0a2f"
//! account_id = "21dd3d5674f146e0c8ffeeb43fbbc3bf292b62beaf0315b7af6bfeeef2ee0a2f"
//! first_name = "John"
//! locale = "en_CA"
//!
//! [render]
//! content_mode = "mobile"
//! ```

pub mod constants;
pub mod credentials;
pub mod loader;
pub mod secret;
pub mod timeouts;

pub use credentials::{Credentials, CredentialsConfig, load_dotenv};
pub use loader::{
    ApiConfig, ConfigManager, ContentMode, IdentityConfig, IdentityField, RenderConfig,
    WidgetConfig,
};
pub use secret::Secret;
pub use timeouts::TimeoutsConfig;
