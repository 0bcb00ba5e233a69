//! DNS MX resolution.
//!
//! The public entry point is [`resolve_mx`], which performs a synchronous
//! lookup using the system resolver (with a bounded query lifetime) and
//! returns a [`MxStatus`] describing the outcome. Records come back sorted
//! ascending by preference; equal preferences keep the resolver's order.

mod error;
mod resolver;
mod types;

pub use error::MxError as Error;
pub use resolver::{DEFAULT_DNS_TIMEOUT, resolve_mx};
pub use types::{MxRecord, MxStatus};

#[cfg(test)]
mod tests;
