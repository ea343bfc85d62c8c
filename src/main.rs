//! CLI for rabbit-demo
//!
//! Subcommands:
//! - `sender`: publish the demo messages and exit
//! - `receiver`: consume the demo messages until a key is pressed

use clap::Parser;
use rabbit_demo::config::load_config;
use rabbit_demo::receiver::{self, wait_for_keypress};
use rabbit_demo::sender;
use rabbit_demo::utils::{Result, logging};
use std::process::ExitCode;
use tracing::error;

#[derive(Parser)]
#[command(name = "rabbit-demo")]
enum Command {
    /// Publish the demo messages to DemoExchange, one per interval
    Sender,
    /// Consume DemoQueue with manual acks until a key is pressed
    Receiver,
}

#[tokio::main]
async fn main() -> ExitCode {
    let _ = dotenvy::dotenv();
    let cmd = Command::parse();

    match run(cmd).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("{e}");
            ExitCode::FAILURE
        }
    }
}

async fn run(cmd: Command) -> Result<()> {
    let config = match load_config() {
        Ok(config) => config,
        Err(e) => {
            logging::init("info");
            return Err(e.into());
        }
    };
    logging::init(&config.logging.level);

    match cmd {
        Command::Sender => {
            sender::run(&config).await?;
        }
        Command::Receiver => {
            receiver::run(&config, wait_for_keypress()).await?;
        }
    }

    Ok(())
}
