use clap::Parser;
use valuedesk_cli::config::Config;
use valuedesk_cli::main_lib::init_tracing;
use valuedesk_cli::{execute, render, Cli, Scenario};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = Config::from_env();
    init_tracing(&config);
    let cli = Cli::parse();

    let scenario = Scenario::load(cli.command.scenario_path())?;
    let output = execute(&cli.command, &scenario, &config).await?;
    println!("{}", render(&output, config.output)?);
    Ok(())
}
