//! Pipeline orchestration for trade-desk
//!
//! This crate provides the fixed three-node state machine that threads a
//! conversation through the Researcher, Quant and Manager stages.

pub mod graph;
pub mod pipeline;

// Re-export for convenience
pub use graph::PipelineGraph;
pub use pipeline::{Pipeline, PipelineBuilder, PipelineNode};
