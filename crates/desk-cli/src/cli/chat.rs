//! Interactive analysis session

use super::commands::print_report;
use anyhow::Result;
use desk_analysis::TradingDesk;
use std::io::{self, BufRead, Write};

const PROMPT: &str = "desk> ";

fn print_banner() {
    println!(
        r#"
╔══════════════════════════════════════════════════════════════╗
║                     Trade Desk                               ║
║                                                              ║
║  Commands:                                                   ║
║    /analyze <symbol>  - Full three-stage analysis            ║
║    /graph             - Show the pipeline                    ║
║    /help              - Show this help                       ║
║    /exit              - Exit                                 ║
║                                                              ║
║  Or ask in plain text:                                       ║
║    "Analyze TSLA for trading"                                ║
╚══════════════════════════════════════════════════════════════╝
"#
    );
}

/// What one line of input asks for
#[derive(Debug, PartialEq, Eq)]
enum Input<'a> {
    Exit,
    Help,
    Graph,
    Analyze(&'a str),
    Ask(&'a str),
    Unknown(&'a str),
}

fn parse_input(line: &str) -> Input<'_> {
    let Some(command) = line.strip_prefix('/') else {
        return Input::Ask(line);
    };
    let (name, rest) = command.split_once(' ').unwrap_or((command, ""));
    match name {
        "exit" | "quit" => Input::Exit,
        "help" => Input::Help,
        "graph" => Input::Graph,
        "analyze" if !rest.trim().is_empty() => Input::Analyze(rest.trim()),
        _ => Input::Unknown(line),
    }
}

pub fn run(desk: &TradingDesk) -> Result<()> {
    print_banner();

    let stdin = io::stdin();
    let mut stdout = io::stdout();

    loop {
        print!("{PROMPT}");
        stdout.flush()?;

        let mut line = String::new();
        match stdin.lock().read_line(&mut line) {
            Ok(0) => {
                println!("\nGoodbye!");
                break;
            }
            Ok(_) => {}
            Err(e) => {
                eprintln!("Error reading input: {e}");
                continue;
            }
        }

        let line = line.trim();
        if line.is_empty() {
            continue;
        }

        let outcome = match parse_input(line) {
            Input::Exit => {
                println!("Goodbye!");
                break;
            }
            Input::Help => {
                print_banner();
                continue;
            }
            Input::Graph => {
                print!("{}", desk.pipeline().graph().to_ascii());
                continue;
            }
            Input::Unknown(command) => {
                eprintln!("Unknown command: {command} (try /help)\n");
                continue;
            }
            Input::Analyze(ticker) => desk.analyze(ticker, None),
            Input::Ask(text) => desk.ask(text),
        };

        match outcome {
            Ok(report) => {
                print_report(&report, false)?;
                println!();
            }
            Err(e) => eprintln!("Error: {e}\n"),
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_input() {
        assert_eq!(parse_input("/exit"), Input::Exit);
        assert_eq!(parse_input("/quit"), Input::Exit);
        assert_eq!(parse_input("/help"), Input::Help);
        assert_eq!(parse_input("/graph"), Input::Graph);
        assert_eq!(parse_input("/analyze  tsla "), Input::Analyze("tsla"));
        assert_eq!(parse_input("/analyze"), Input::Unknown("/analyze"));
        assert_eq!(parse_input("/buy AAPL"), Input::Unknown("/buy AAPL"));
        assert_eq!(parse_input("analyze AAPL now"), Input::Ask("analyze AAPL now"));
    }
}
