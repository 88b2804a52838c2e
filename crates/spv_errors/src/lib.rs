//! Classified errors for the wallet's layered architecture.
//!
//! Failures are classified by a [`Subtype`] registered under a [`Kind`]
//! (a node in a fixed taxonomy tree). Lower layers create errors with
//! [`Subtype::error`] or [`Subtype::wrap`]; upper layers add context with
//! [`Error::decorate`], which keeps the underlying classification intact
//! so the transport layer can map the error to an HTTP response without
//! inspecting messages.
//!
//! Errors are immutable values. Wrapping and property attachment return
//! new errors, so a shared preconstructed error is never modified by a
//! call site.

use std::sync::LazyLock;

pub use error::{Chain, Error, LogChain, MAX_CHAIN_DEPTH};
pub use property::{CODE, PropertyKey, PropertyType, PropertyValue, STATUS_CODE};
pub use response::{ErrorResponse, INTERNAL_ERROR_MESSAGE};
pub use taxonomy::{Kind, Subtype};

mod error;
mod property;
mod response;
mod taxonomy;

/// Validation failures at an API edge. Maps to 400 by default.
pub static ILLEGAL_ARGUMENT: LazyLock<Kind> = LazyLock::new(|| Kind::new("illegal_argument"));

/// A requested resource does not exist. Maps to 404 by default.
pub static DATA_UNAVAILABLE: LazyLock<Kind> = LazyLock::new(|| Kind::new("data_unavailable"));

/// Unexpected IO/persistence failures. Maps to 500; messages are logged,
/// never returned to clients.
pub static INTERNAL_ERROR: LazyLock<Kind> = LazyLock::new(|| Kind::new("internal_error"));
