//! Tool management and execution framework for trade-desk
//!
//! This crate provides the `Tool` trait for callable functions, the
//! `ToolRegistry` that a transport is constructed with, and small helpers for
//! building JSON input schemas.

pub mod registry;
pub mod schema;
pub mod tool;

pub use registry::ToolRegistry;
pub use tool::{Tool, ToolDefinition};
