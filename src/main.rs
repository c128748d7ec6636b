//! Piranhito's entry point.
//! Parses the command line, builds the profile registry once and runs the
//! selected pipeline over the target directory.

use piranhito::{
    cli::{get_args, Args},
    error::{default_error_handler, Error, Result},
    ignore::parse_ignore_file,
    logger::init_logger,
    processor::{BatchOptions, Processor},
    Engine, ProfileRegistry,
};

/// Main application entry point.
fn main() {
    let args = get_args();
    init_logger(args.verbose);

    if let Err(err) = run(args) {
        default_error_handler(err);
    }
}

/// Main application logic execution.
///
/// # Flow
/// 1. Loads the built-in profiles or the ones given with `--profiles`
/// 2. Resolves the project profile, failing before any file is touched
/// 3. Processes `.piranhitoignore` patterns
/// 4. Runs the selected pipeline over every matching file
fn run(args: Args) -> Result<()> {
    if !args.directory.is_dir() {
        return Err(Error::ConfigError(format!(
            "'{}' is not a directory",
            args.directory.display()
        )));
    }

    let registry = match &args.profiles {
        Some(path) => ProfileRegistry::load(path)?,
        None => ProfileRegistry::builtin()?,
    };
    let pipeline = args.pipeline();
    let ignored = parse_ignore_file(&args.directory)?;

    let mut processor = Processor::new(
        Engine::from_entropy(&registry),
        &args.project,
        pipeline,
        &args.directory,
        &ignored,
    )?;

    let summary = processor.run(BatchOptions {
        recursive: args.recursive,
        dry_run: args.dry_run,
    })?;

    println!(
        "{} of '{}' completed: {} file(s) processed, {} changed, {} failed.",
        pipeline, args.project, summary.processed, summary.changed, summary.failed
    );
    Ok(())
}
