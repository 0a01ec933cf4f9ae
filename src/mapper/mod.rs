//! Conversions between the wire contract and the request context.
//!
//! - [`inbound`] - transport request → [`RequestContext`](crate::context::RequestContext)
//! - [`outbound`] - context → transport response
//!
//! Both directions are synchronous and pure; neither ever suspends.

pub mod inbound;
pub mod outbound;

pub use inbound::from_transport;
pub use outbound::to_transport;
