//! Core abstractions for trade-desk
//!
//! This crate defines the types threaded through the advisory pipeline:
//! the conversation state and its reducer, the tagged message type, the
//! ticker symbol, the per-request context and the `Stage` trait implemented
//! by every pipeline node.

pub mod context;
pub mod error;
pub mod message;
pub mod stage;
pub mod state;
pub mod ticker;

pub use context::Context;
pub use error::{Error, Result};
pub use message::{Message, Role};
pub use stage::{ReportSlot, Stage, StageOutput};
pub use state::ConversationState;
pub use ticker::Ticker;
