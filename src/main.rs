use clap::Parser;
use leasectl::{
    storage::{self, Bootstrap},
    Args, ClientConfig, Command, DhcpClient,
};
use std::{error::Error as StdError, process::ExitCode};
use tracing_subscriber::EnvFilter;

async fn run(args: Args) -> Result<(), Box<dyn StdError>> {
    // Configuration is checked before any file or network I/O.
    let config = ClientConfig::from_env()?;

    for outcome in storage::ensure_data_files(&config)? {
        match outcome {
            Bootstrap::Created(path) => println!("Created {}", path.display()),
            Bootstrap::Existing(path) => println!("Found {}", path.display()),
        }
    }

    let Some(name) = args.command else {
        return Ok(());
    };
    let Some(command) = Command::lookup(&name) else {
        tracing::debug!("Ignoring unknown command '{}'", name);
        return Ok(());
    };

    let client = DhcpClient::new(config);
    command.run(&client, &args.args).await?;
    Ok(())
}

#[tokio::main]
async fn main() -> ExitCode {
    let args = Args::parse();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    // Display plus the source chain; returning the error would print its Debug form.
    match run(args).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {}", e);
            let mut source = e.source();
            while let Some(cause) = source {
                eprintln!("  caused by: {}", cause);
                source = cause.source();
            }
            ExitCode::FAILURE
        }
    }
}
