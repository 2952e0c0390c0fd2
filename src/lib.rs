//! refwidget - display the SaaSquatch referral widget for one advocate.
//!
//! The binary resolves configuration and credentials, mounts a
//! [`refwidget_core::WidgetScreen`], and shows its state on a terminal or
//! browser surface. Library consumers usually want `refwidget-core` directly.

pub mod args;
pub mod startup;
pub mod surface;

pub use args::Cli;
pub use startup::StartupContext;
pub use surface::{BrowserSurface, PrintSurface};
