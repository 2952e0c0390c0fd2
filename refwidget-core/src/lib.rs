//! Fetch, authenticate, and render flow for the SaaSquatch referral widget.
//!
//! A [`WidgetScreen`] owns one request built from the immutable
//! [`WidgetConfig`](refwidget_config::WidgetConfig). Mounting it performs a
//! single Basic-authenticated `PUT` to the upsert endpoint and settles the
//! [`ViewState`] into `Ready(html)` or `Error(message)`. A [`RenderSurface`]
//! displays each state; `Ready` markup is wrapped in a document carrying the
//! embedded-browser settings.
//!
//! ```rust,ignore
//! use refwidget_config::ConfigManager;
//! use refwidget_core::{DocumentSurface, EmbedOptions, RenderSurface, WidgetScreen};
//!
//! let (config, credentials) = ConfigManager::load(None)?.into_parts()?;
//! let screen = WidgetScreen::new(&config, &credentials);
//! let mut surface = DocumentSurface::new(EmbedOptions::from_config(&config.render));
//!
//! surface.render(&screen.state())?;
//! surface.render(&screen.mount().await)?;
//! ```

pub mod auth;
pub mod client;
pub mod error;
pub mod identity;
pub mod render;
pub mod request;
pub mod screen;
pub mod state;

pub use client::{WidgetClient, WidgetFetcher, WidgetResponse};
pub use error::FetchError;
pub use identity::{Identity, UpsertPayload};
pub use render::{DocumentSurface, EmbedOptions, Frame, RenderSurface, render_document};
pub use request::{WidgetRequest, build_upsert_request};
pub use screen::{FETCH_FAILED_MESSAGE, WidgetScreen};
pub use state::ViewState;
