use std::io::{self, Write};
use std::time::Duration;

use anyhow::Result;
use clap::Parser;
use goalsaver::cli::{
    Cli, Command, Feedback, run_interactive, run_project, write_calculation, write_presets,
};
use goalsaver::log::init_logging;
use tokio::io::BufReader;
use tokio::sync::mpsc::unbounded_channel;

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    init_logging(cli.verbose);

    let result = run(cli.command).await;
    if let Err(e) = &result {
        tracing::error!(error = %e, "goalsaver failed");
    }
    result
}

async fn run(command: Command) -> Result<()> {
    match command {
        Command::Serve { port } => goalsaver::api::run_http_server(port).await?,
        Command::Project(args) => run_project(&args, &mut io::stdout().lock())?,
        Command::Presets => write_presets(&mut io::stdout().lock())?,
        Command::Interactive { debounce_ms } => {
            let (tx, mut rx) = unbounded_channel();
            let printer = tokio::spawn(async move {
                while let Some(item) = rx.recv().await {
                    match item {
                        Feedback::Notice(message) => eprintln!("! {message}"),
                        Feedback::Calculation(calculation) => {
                            let mut out = io::stdout().lock();
                            let printed = write_calculation(&mut out, &calculation)
                                .and_then(|()| writeln!(out).map_err(Into::into));
                            if let Err(e) = printed {
                                tracing::warn!(error = %e, "failed to print result");
                            }
                        }
                    }
                }
            });

            let stdin = BufReader::new(tokio::io::stdin());
            run_interactive(stdin, Duration::from_millis(debounce_ms), tx).await?;
            printer.await?;
        }
    }
    Ok(())
}
