//! Conversation core: transcript storage, reply classification, the typing
//! simulation, and the formatted view used for rendering.

pub mod dispatch;
pub mod store;
pub mod transcript;
pub mod typing;
