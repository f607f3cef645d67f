//! Domain layer: connection model, message model and the traits the
//! infrastructure layer implements.

pub mod entity;
pub mod error;
pub mod inbound;
pub mod message;
pub mod registry;
pub mod sink;
pub mod value_object;

pub use entity::Connection;
pub use error::{DeliveryError, InboundError};
pub use inbound::{CloseReason, InboundFrame};
pub use message::ChatEvent;
pub use registry::ConnectionRegistry;
pub use sink::MessageSink;
pub use value_object::{ConnectionId, Username};
