use std::fs::File;

use anyhow::{Context, Result};
use clap::Parser;
use env_logger::{Env, Target};
use orderdesk::cli::Cli;

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(&cli)?;
    orderdesk::run(cli).await
}

fn init_logging(cli: &Cli) -> Result<()> {
    let mut builder = env_logger::Builder::from_env(Env::default().default_filter_or("warn"));
    if let Some(path) = cli.log_file.as_deref() {
        let file = File::create(path)
            .with_context(|| format!("creating log file {} failed", path.display()))?;
        builder.target(Target::Pipe(Box::new(file)));
    }
    builder.init();
    Ok(())
}
