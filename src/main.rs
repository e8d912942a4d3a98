use clap::Parser;
use reorg::cli::Args;
use reorg::error::AppError;
use reorg::guess::GuessOptions;
use reorg::organizer::{run_organizer, RunOptions};
use reorg::output::{display_dry_run, display_execution_result, list_organizers};
use reorg::{logging, scanner};
use tracing::{error, info};

fn main() {
    let args = Args::parse();

    logging::init(args.verbose);

    if let Err(e) = run(args) {
        error!("{}", e);
        eprintln!("\nError: {}", e.detailed_message());
        std::process::exit(e.exit_code().into());
    }
}

fn run(args: Args) -> Result<(), AppError> {
    if args.list {
        list_organizers(&mut std::io::stdout())
            .map_err(|e| AppError::Other(format!("Failed to write output: {}", e)))?;
        return Ok(());
    }

    // clap enforces this; the guard keeps the invariant local.
    let key = args
        .organizer
        .as_deref()
        .ok_or_else(|| AppError::Other("--organizer is required".to_string()))?;

    scanner::validate_root(&args.path)?;

    let options = RunOptions {
        root: args.path,
        mime_filter: args.mime,
        dry_run: args.dry_run,
        force: args.force,
        guess_options: GuessOptions {
            media_type: None,
            date_order: args.date_order.map(Into::into),
        },
    };

    let report = run_organizer(key, &options)?;

    info!(
        operations = report.mutation_count(),
        skipped = report.skip_count(),
        "Run complete"
    );

    if options.dry_run {
        display_dry_run(&report, &mut std::io::stdout())
    } else {
        display_execution_result(&report, &mut std::io::stdout())
    }
    .map_err(|e| AppError::Other(format!("Failed to write output: {}", e)))?;

    Ok(())
}
