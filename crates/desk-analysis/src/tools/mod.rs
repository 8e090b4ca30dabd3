//! Tools exposing the desk to a tool-invocation transport

mod reports;
mod risk_calculator;

pub use reports::{ReportKind, ReportTool};
pub use risk_calculator::RiskCalculatorTool;

use desk_tools::ToolRegistry;
use std::sync::Arc;

/// Registry holding the risk calculator and the three report tools
pub fn default_registry() -> ToolRegistry {
    ToolRegistry::new()
        .with_tool(Arc::new(RiskCalculatorTool::new()))
        .with_tool(Arc::new(ReportTool::new(ReportKind::Researcher)))
        .with_tool(Arc::new(ReportTool::new(ReportKind::Quant)))
        .with_tool(Arc::new(ReportTool::new(ReportKind::Manager)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_registry() {
        let registry = default_registry();
        let names: Vec<String> = registry.definitions().into_iter().map(|d| d.name).collect();
        assert_eq!(
            names,
            vec![
                "calculate_risk",
                "manager_consolidation",
                "quant_analysis",
                "researcher_analysis",
            ]
        );
    }
}
