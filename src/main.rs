use anyhow::Result;
use clap::Parser;
use loghour::{actions, analyze, source, utils, Args};
use tracing::error;

fn run(args: &Args) -> Result<()> {
    if let Some(path) = &args.actions {
        let values = actions::load_actions(path)?;
        actions::print_action_report(&values);
        return Ok(());
    }

    let result = analyze::analyze_logs(args)?;
    if args.json {
        println!("{}", serde_json::to_string_pretty(&result)?);
    } else {
        analyze::print_analysis_results(&result, args);
    }
    Ok(())
}

fn main() -> Result<()> {
    let args = Args::parse();
    utils::setup_logging(args.verbose);

    if args.init {
        return source::init_sample_log();
    }

    utils::validate_args(&args)?;

    if let Err(e) = run(&args) {
        error!("Error: {:#}", e);
        std::process::exit(1);
    }
    Ok(())
}
