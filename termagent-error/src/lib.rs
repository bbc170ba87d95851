//! # termagent-error
//!
//! Unified error handling for termagent.
//!
//! ## Design Philosophy
//!
//! - **ErrorKind**: Know what error occurred (e.g., ConfigMissing, InferenceFailed)
//! - **ErrorStatus**: Decide how to handle it (Permanent, Temporary, Persistent)
//! - **Error Context**: Assist in locating the cause with rich context
//! - **Error Source**: Wrap underlying errors without leaking raw types
//!
//! ## Usage
//!
//! ```rust
//! use termagent_error::{Error, ErrorKind};
//!
//! fn example() -> Result<(), Error> {
//!     Err(Error::new(ErrorKind::ConfigMissing, "GEMINI_API_KEY is not set")
//!         .with_operation("settings::load")
//!         .with_context("variable", "GEMINI_API_KEY"))
//! }
//! ```
//!
//! ## Principles
//!
//! - All fallible functions return `Result<T, termagent_error::Error>`
//! - External errors are wrapped with `set_source(err)`
//! - Same error handled once, subsequent ops only append context
//! - Don't abuse `From<OtherError>` to prevent raw error leakage

mod error;
mod kind;
mod status;

pub use error::Error;
pub use kind::ErrorKind;
pub use status::ErrorStatus;

/// Result type alias using termagent Error
pub type Result<T> = std::result::Result<T, Error>;
