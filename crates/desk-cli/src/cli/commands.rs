use super::{OutputFormat, SizingArgs};
use anyhow::Result;
use comfy_table::{ContentArrangement, Table, presets::UTF8_FULL};
use desk_analysis::format::currency;
use desk_analysis::{AnalysisReport, AnalysisRequest, RiskResult, TradingDesk, default_registry, risk};
use desk_mcp::ToolServer;
use std::sync::Arc;
use tracing::info;

pub fn analyze(desk: &TradingDesk, request: AnalysisRequest, json: bool) -> Result<()> {
    let report = desk.analyze_request(request)?;
    print_report(&report, json)
}

pub fn ask(desk: &TradingDesk, question: &str, sizing: &SizingArgs, json: bool) -> Result<()> {
    let request = sizing.apply(desk.question_request(question)?);
    let report = desk.analyze_request(request)?;
    print_report(&report, json)
}

pub fn print_report(report: &AnalysisReport, json: bool) -> Result<()> {
    if json {
        println!("{}", serde_json::to_string_pretty(report)?);
        return Ok(());
    }

    println!("{}\n", report.researcher_report);
    println!("{}\n", report.quant_report);
    println!("{}", report.final_message);
    for warning in &report.warnings {
        println!("\n⚠️  Warning: {warning}");
    }
    Ok(())
}

pub fn calculate_risk(
    ticker: &str,
    price: f64,
    balance: f64,
    stop_loss: f64,
    format: OutputFormat,
) -> Result<()> {
    let result = risk::size(&ticker.trim().to_uppercase(), price, balance, stop_loss)?;

    match format {
        OutputFormat::Text => println!("{}", result.to_report()),
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&result)?),
        OutputFormat::Table => println!("{}", risk_table(&result)),
    }
    Ok(())
}

fn risk_table(result: &RiskResult) -> Table {
    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_header(vec![format!("{} risk", result.ticker), "Value".to_string()]);

    let rows = [
        ("Account balance", currency(result.account_balance)),
        (
            "Risk per trade",
            format!(
                "{} ({}%)",
                currency(result.risk_per_trade),
                result.risk_percentage
            ),
        ),
        ("Current price", currency(result.price)),
        (
            "Stop-loss price",
            format!(
                "{} ({}% below)",
                currency(result.stop_loss_price),
                result.stop_loss_percent
            ),
        ),
        ("Risk per share", currency(result.risk_per_share)),
        ("Recommended shares", result.position_size.to_string()),
        ("Total investment", currency(result.total_investment)),
        (
            "Portfolio allocation",
            format!("{:.1}%", result.portfolio_allocation),
        ),
        ("Maximum loss", currency(result.max_loss)),
        ("Take-profit target", currency(result.take_profit_price)),
    ];
    for (label, value) in rows {
        table.add_row(vec![label.to_string(), value]);
    }
    table
}

pub fn tools(json: bool) -> Result<()> {
    let definitions = default_registry().definitions();

    if json {
        println!("{}", serde_json::to_string_pretty(&definitions)?);
        return Ok(());
    }

    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_header(vec!["Tool", "Description", "Required"]);
    for definition in definitions {
        let required = definition.input_schema["required"]
            .as_array()
            .map(|fields| {
                fields
                    .iter()
                    .filter_map(serde_json::Value::as_str)
                    .collect::<Vec<_>>()
                    .join(", ")
            })
            .unwrap_or_default();
        table.add_row(vec![definition.name, definition.description, required]);
    }
    println!("{table}");
    Ok(())
}

pub async fn serve() -> Result<()> {
    let registry = Arc::new(default_registry());
    info!("Serving {} tools on stdio", registry.len());
    ToolServer::new(registry).serve_stdio().await?;
    Ok(())
}

pub fn graph(desk: &TradingDesk, mermaid: bool) {
    let graph = desk.pipeline().graph();
    if mermaid {
        print!("{}", graph.to_mermaid());
    } else {
        print!("{}", graph.to_ascii());
    }
}
