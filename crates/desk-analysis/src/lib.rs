//! Three-stage stock advisory pipeline
//!
//! This crate wires the trade-desk building blocks into a working desk:
//!
//! - Ticker extraction from free-text questions
//! - Deterministic mock indicators derived from the symbol
//! - Position sizing with the 2% risk rule
//! - Researcher, Quant and Manager stages run by a sequential [`Pipeline`]
//! - Tools exposing the calculator and the stage reports to a transport
//!
//! # Example
//!
//! ```
//! use desk_analysis::{DeskConfig, TradingDesk};
//!
//! let desk = TradingDesk::new(DeskConfig::default()).unwrap();
//! let report = desk.analyze("AAPL", None).unwrap();
//!
//! assert_eq!(report.risk.position_size, 16);
//! assert!(report.final_message.contains("**Final Recommendation:**"));
//! ```
//!
//! [`Pipeline`]: desk_workflow::Pipeline

pub mod config;
pub mod desk;
pub mod format;
pub mod indicators;
pub mod risk;
pub mod stages;
pub mod ticker;
pub mod tools;

pub use config::DeskConfig;
pub use desk::{AnalysisReport, AnalysisRequest, TradingDesk};
pub use indicators::{Indicators, TradeLevels};
pub use risk::RiskResult;
pub use stages::{ManagerStage, QuantStage, ResearcherStage};
pub use tools::{RiskCalculatorTool, default_registry};
