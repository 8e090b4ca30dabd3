use anyhow::Result;
use clap::{Args, Parser, Subcommand, ValueEnum};
use desk_analysis::{AnalysisRequest, DeskConfig, TradingDesk};
use desk_utils::LogFormat;

pub mod chat;
pub mod commands;

#[derive(Parser, Debug)]
#[command(
    name = "trade-desk",
    version,
    about = "Three-stage stock advisory desk with 2% rule position sizing"
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Log output format: pretty or json (default from DESK_LOG_FORMAT)
    #[arg(long, global = true)]
    pub log_format: Option<LogFormat>,

    /// Fail on unrecognized tickers and empty questions instead of warning
    #[arg(long, global = true)]
    pub strict: bool,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Run the Researcher, Quant and Manager stages for a ticker
    Analyze {
        /// Ticker symbol to analyze
        ticker: String,

        /// User message (defaults to "Analyze <TICKER> for trading")
        #[arg(short, long)]
        message: Option<String>,

        #[command(flatten)]
        sizing: SizingArgs,

        /// Print the full report as JSON
        #[arg(long)]
        json: bool,
    },

    /// Ask a free-text question; the ticker is extracted from it
    Ask {
        /// The question, e.g. "analyze AAPL now"
        #[arg(required = true, num_args = 1..)]
        question: Vec<String>,

        #[command(flatten)]
        sizing: SizingArgs,

        /// Print the full report as JSON
        #[arg(long)]
        json: bool,
    },

    /// Size a position with the 2% rule
    Risk {
        /// Ticker symbol
        ticker: String,

        /// Current stock price
        #[arg(long)]
        price: f64,

        /// Account balance
        #[arg(long)]
        balance: f64,

        /// Stop-loss distance below entry, in percent
        #[arg(long, default_value_t = desk_analysis::risk::DEFAULT_STOP_LOSS_PERCENT)]
        stop_loss: f64,

        /// Output format
        #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
        format: OutputFormat,
    },

    /// List the tools exposed by `serve`
    Tools {
        /// Print the tool definitions as JSON
        #[arg(long)]
        json: bool,
    },

    /// Serve the tools over JSON-RPC on stdin/stdout
    Serve,

    /// Print the pipeline graph
    Graph {
        /// Render as a Mermaid flowchart instead of ASCII
        #[arg(long)]
        mermaid: bool,
    },

    /// Interactive session: type questions, get analyses
    Chat,
}

/// Per-request sizing inputs, overriding the configured defaults
#[derive(Args, Debug, Default)]
pub struct SizingArgs {
    /// Entry price (default from DESK_PRICE or 125)
    #[arg(long)]
    pub price: Option<f64>,

    /// Account balance (default from DESK_BALANCE or 10000)
    #[arg(long)]
    pub balance: Option<f64>,

    /// Stop-loss percent (default from DESK_STOP_LOSS_PERCENT or 10)
    #[arg(long)]
    pub stop_loss: Option<f64>,
}

impl SizingArgs {
    pub fn apply(&self, mut request: AnalysisRequest) -> AnalysisRequest {
        request.price = self.price;
        request.balance = self.balance;
        request.stop_loss_percent = self.stop_loss;
        request
    }
}

#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
pub enum OutputFormat {
    Text,
    Table,
    Json,
}

/// Desk configuration from the environment, with CLI overrides
fn desk_config(cli: &Cli) -> Result<DeskConfig> {
    let mut config = DeskConfig::default().with_env()?;
    if cli.strict {
        config.strict_input = true;
    }
    config.validate()?;
    Ok(config)
}

pub async fn run(cli: Cli) -> Result<()> {
    match &cli.command {
        Commands::Analyze {
            ticker,
            message,
            sizing,
            json,
        } => {
            let desk = TradingDesk::new(desk_config(&cli)?)?;
            let mut request = sizing.apply(AnalysisRequest::new(ticker.as_str()));
            request.user_message.clone_from(message);
            commands::analyze(&desk, request, *json)
        }
        Commands::Ask {
            question,
            sizing,
            json,
        } => {
            let desk = TradingDesk::new(desk_config(&cli)?)?;
            commands::ask(&desk, &question.join(" "), sizing, *json)
        }
        Commands::Risk {
            ticker,
            price,
            balance,
            stop_loss,
            format,
        } => commands::calculate_risk(ticker, *price, *balance, *stop_loss, *format),
        Commands::Tools { json } => commands::tools(*json),
        Commands::Serve => commands::serve().await,
        Commands::Graph { mermaid } => {
            let desk = TradingDesk::new(desk_config(&cli)?)?;
            commands::graph(&desk, *mermaid);
            Ok(())
        }
        Commands::Chat => {
            let desk = TradingDesk::new(desk_config(&cli)?)?;
            chat::run(&desk)
        }
    }
}
