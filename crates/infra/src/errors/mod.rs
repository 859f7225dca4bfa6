//! Infrastructure error conversions

pub mod conversions;

pub use conversions::InfraError;
pub(crate) use conversions::{status_error, IntoRemoteError};
