//! Wire framing for the advisor service.

#[cfg(feature = "std")]
pub mod http;
