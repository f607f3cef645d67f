//! Infrastructure layer: concrete registry and transport implementations,
//! plus the wire DTOs.

pub mod dto;
pub mod message_sink;
pub mod registry;
