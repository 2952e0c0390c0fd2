//! Shared helpers reused across the refwidget crates. Keeps the core screen
//! logic free of client construction details, log redaction rules, and the
//! error reporting contract the host application plugs into.

pub mod errors;
pub mod http;
pub mod sanitizer;

pub use errors::{ErrorReporter, MemoryErrorReporter, NoopErrorReporter};
pub use sanitizer::redact_secrets;
