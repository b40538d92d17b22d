use anyhow::Context;
use clap::Parser;
use kube_scorecard::{
    checks::Registry,
    cli::{Cli, Commands, ScoreArgs},
    config::ScoreConfig,
    formatter, parser, score,
    types::Grade,
};
use std::process;

fn main() {
    match run() {
        Ok(code) => process::exit(code),
        Err(e) => {
            eprintln!("Error: {:#}", e);
            process::exit(2);
        }
    }
}

fn run() -> anyhow::Result<i32> {
    let cli = Cli::parse();
    cli.init_logging();

    let config = cli.load_config().context("failed to load configuration")?;

    match &cli.command {
        Commands::Score(args) => handle_score(args, config),
        Commands::List => handle_list(&config),
    }
}

fn handle_score(args: &ScoreArgs, config: ScoreConfig) -> anyhow::Result<i32> {
    let config = args.apply(config);

    let docs = parser::load_paths(&args.paths)?;
    log::info!("loaded {} documents", docs.len());

    let scorecard = score::score_documents(&docs, &config)?;
    formatter::print_scorecard(&scorecard, args.output_format);

    let failed = match scorecard.worst_grade() {
        Some(Grade::Critical) => true,
        Some(Grade::Warning) => args.exit_one_on_warning,
        _ => false,
    };
    Ok(if failed { 1 } else { 0 })
}

fn handle_list(config: &ScoreConfig) -> anyhow::Result<i32> {
    let registry = Registry::builtin(config)?;

    println!("{:<42} {:<24} {:<9} NAME", "ID", "TARGET", "OPTIONAL");
    for check in registry.iter() {
        println!(
            "{:<42} {:<24} {:<9} {}",
            check.id,
            check.target().to_string(),
            if check.optional { "yes" } else { "no" },
            check.name
        );
    }
    Ok(0)
}
