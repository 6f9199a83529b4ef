//! Error handling for the Resistance engine.

pub mod domain;
pub mod error_code;

pub use domain::{GameError, NotFoundKind};
pub use error_code::ErrorCode;
