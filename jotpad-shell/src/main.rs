use std::process::ExitCode;

use clap::Parser;

mod cli;
mod commands;
mod render;

#[tokio::main(flavor = "current_thread")]
async fn main() -> ExitCode {
    env_logger::init();

    let cli = cli::Cli::parse();
    match commands::run(cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(message) => {
            eprintln!("jotpad: {message}");
            ExitCode::FAILURE
        }
    }
}
