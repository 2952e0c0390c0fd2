mod config;
mod manager;


pub use config::{
    ApiConfig, ContentMode, IdentityConfig, IdentityField, RenderConfig, WidgetConfig,
};
pub use manager::ConfigManager;
