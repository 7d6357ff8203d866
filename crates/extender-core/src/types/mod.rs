//! Records the host passes into hook invocations.
//!
//! Connection, session, and subscription identifiers are opaque strings
//! minted by the host; nothing here validates or interprets them.

pub mod connection;
pub mod context;
pub mod destination;
pub mod payload;
pub mod session;
pub mod subscription;

pub use connection::{ConnectionRequest, DedicatedConnection};
pub use context::ClientContext;
pub use destination::{Destination, DestinationKind, EndpointInfo};
pub use payload::ObjectPayload;
pub use session::SessionInfo;
pub use subscription::{SubscriptionInfo, SubscriptionKind};
