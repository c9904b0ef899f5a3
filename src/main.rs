use clap::{Parser, Subcommand};
use std::io::Read;
use std::net::IpAddr;
use std::path::PathBuf;

use fincalc::api::{Calculation, evaluate, run_http_server};
use fincalc::error::{FinanceError, FinanceResult};
use fincalc::logging::init_logging;

#[derive(Parser, Debug)]
#[command(
    name = "fincalc",
    about = "SIP, savings and EPF projections, inflation discounting and SWP drawdown schedules"
)]
struct Cli {
    /// Log level (trace, debug, info, warn, error); RUST_LOG overrides it
    #[arg(long, global = true, default_value = "info")]
    log_level: String,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Serve the JSON API
    Serve {
        #[arg(long, default_value_t = 8080)]
        port: u16,
        #[arg(long, default_value = "0.0.0.0")]
        bind: IpAddr,
    },
    /// Evaluate one calculator over a JSON payload and print the result
    Calc {
        #[arg(value_enum)]
        calculation: Calculation,
        /// Payload file; reads stdin when omitted
        #[arg(long)]
        input: Option<PathBuf>,
    },
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();
    init_logging(&cli.log_level);

    let result = match cli.command {
        Command::Serve { port, bind } => {
            run_http_server(bind, port).await.map_err(FinanceError::from)
        }
        Command::Calc { calculation, input } => run_calc(calculation, input),
    };

    if let Err(e) = result {
        eprintln!("Error: {e}");
        std::process::exit(1);
    }
}

fn run_calc(calculation: Calculation, input: Option<PathBuf>) -> FinanceResult<()> {
    let json = match input {
        Some(path) => std::fs::read_to_string(path)?,
        None => {
            let mut buf = String::new();
            std::io::stdin().read_to_string(&mut buf)?;
            buf
        }
    };

    tracing::debug!(?calculation, "evaluating payload");
    let value = evaluate(calculation, &json)?;
    println!("{}", serde_json::to_string_pretty(&value)?);
    Ok(())
}
