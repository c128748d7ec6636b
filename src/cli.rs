//! Command-line interface implementation for piranhito.
//! Provides argument parsing and help text formatting using clap.

use clap::{error::ErrorKind, ArgGroup, CommandFactory, Parser};
use std::path::PathBuf;

use crate::pipeline::Pipeline;

/// Command-line arguments structure for piranhito.
#[derive(Parser, Debug)]
#[command(
    author,
    version,
    about = "Piranhito: strips feature-gated code from tagged source trees",
    long_about = None
)]
#[command(group(ArgGroup::new("mode").required(true).args(["transform", "copyright"])))]
pub struct Args {
    /// Strip features, substitute strings and tidy up the sources
    #[arg(short = 'x', long)]
    pub transform: bool,

    /// Align copyright headers
    #[arg(short, long)]
    pub copyright: bool,

    /// Id of the project profile to apply
    #[arg(value_name = "PROJECT")]
    pub project: String,

    /// Directory holding the files to rewrite in place
    #[arg(value_name = "DIRECTORY")]
    pub directory: PathBuf,

    /// Profile file (JSON or YAML), or a directory holding piranhito.{json,yml,yaml}.
    /// The built-in profiles are used when omitted.
    #[arg(short, long, value_name = "PATH")]
    pub profiles: Option<PathBuf>,

    /// Descend into subdirectories
    #[arg(short, long)]
    pub recursive: bool,

    /// Run the pipelines and report, without writing any file
    #[arg(long)]
    pub dry_run: bool,

    /// Enable verbose logging output
    #[arg(short, long)]
    pub verbose: bool,
}

impl Args {
    /// The pipeline selected by `-x` or `-c`.
    pub fn pipeline(&self) -> Pipeline {
        if self.copyright {
            Pipeline::Copyright
        } else {
            Pipeline::Transform
        }
    }
}

/// Parses command line arguments and returns the Args structure.
///
/// # Exits
/// * With status code 1 if required arguments are missing
/// * With clap's default error handling for other argument errors
pub fn get_args() -> Args {
    match Args::try_parse() {
        Ok(args) => args,
        Err(e) => {
            if e.kind() == ErrorKind::MissingRequiredArgument {
                let _ = Args::command()
                    .help_template(
                        r#"{about-section}
{usage-heading} {usage}

{all-args}
{after-help}
"#,
                    )
                    .print_help();
                std::process::exit(1);
            } else {
                e.exit();
            }
        }
    }
}
