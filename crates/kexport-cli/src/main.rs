//! `kexport` - build the namespace package from a symbol manifest

use anyhow::{Context, Result};
use clap::{value_parser, Arg, ArgAction, ArgMatches, Command};
use kexport_core::{BuildConfig, PackageBuilder, ReleaseChannel, SymbolManifest};
use std::path::PathBuf;
use std::process::ExitCode;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

fn cli() -> Command {
    Command::new("kexport")
        .version(kexport_core::VERSION)
        .about("Generates the public API namespace package from discovered symbols")
        .subcommand_required(true)
        .arg_required_else_help(true)
        .subcommand(
            Command::new("build")
                .about("Write the flat package and the versioned API trees")
                .arg(
                    Arg::new("manifest")
                        .long("manifest")
                        .required(true)
                        .value_parser(value_parser!(PathBuf))
                        .help("Symbol manifest (JSON) produced by discovery"),
                )
                .arg(
                    Arg::new("out")
                        .long("out")
                        .required(true)
                        .value_parser(value_parser!(PathBuf))
                        .help("Output directory"),
                )
                .arg(
                    Arg::new("config")
                        .long("config")
                        .value_parser(value_parser!(PathBuf))
                        .help("Build configuration (TOML); defaults apply when omitted"),
                )
                .arg(
                    Arg::new("nightly")
                        .long("nightly")
                        .action(ArgAction::SetTrue)
                        .help("Stamp a nightly version and distribution name"),
                )
                .arg(
                    Arg::new("rc")
                        .long("rc")
                        .conflicts_with("nightly")
                        .help("Release candidate suffix, e.g. rc1"),
                )
                .arg(
                    Arg::new("verbose")
                        .long("verbose")
                        .short('v')
                        .action(ArgAction::SetTrue)
                        .help("Log every written file and skipped symbol"),
                ),
        )
}

fn init_tracing(verbose: bool) {
    let default = if verbose { "debug" } else { "info" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));

    let registry = tracing_subscriber::registry().with(filter);
    if std::env::var("LOG_FORMAT").is_ok_and(|f| f == "json") {
        registry.with(fmt::layer().json().with_target(true)).init();
    } else {
        registry.with(fmt::layer().with_target(false)).init();
    }
}

/// Result of a successful `build`, as printed
#[derive(Debug)]
struct BuildSummary {
    version: String,
    distribution: String,
    files_written: usize,
}

fn build(args: &ArgMatches) -> Result<BuildSummary> {
    let manifest_path = args
        .get_one::<PathBuf>("manifest")
        .context("--manifest is required")?;
    let out_dir = args.get_one::<PathBuf>("out").context("--out is required")?;

    let config = match args.get_one::<PathBuf>("config") {
        Some(path) => {
            tracing::info!("using config {}", path.display());
            BuildConfig::load(path).with_context(|| format!("loading config {}", path.display()))?
        }
        None => BuildConfig::default(),
    };
    let channel = ReleaseChannel::from_flags(args.get_flag("nightly"), args.get_one::<String>("rc").cloned());

    let manifest = SymbolManifest::load(manifest_path)
        .with_context(|| format!("loading manifest {}", manifest_path.display()))?;
    let outcome = PackageBuilder::new(config, channel)
        .build(&manifest, out_dir)
        .with_context(|| format!("building package into {}", out_dir.display()))?;

    Ok(BuildSummary {
        version: outcome.version,
        distribution: outcome.distribution,
        files_written: outcome.generation.files_written(),
    })
}

fn main() -> ExitCode {
    let matches = cli().get_matches();

    match matches.subcommand() {
        Some(("build", args)) => {
            init_tracing(args.get_flag("verbose"));
            match build(args) {
                Ok(summary) => {
                    println!("Distribution: {}", summary.distribution);
                    println!("Version: {}", summary.version);
                    println!("Files written: {}", summary.files_written);
                    ExitCode::SUCCESS
                }
                Err(e) => {
                    eprintln!("error: {e:#}");
                    ExitCode::FAILURE
                }
            }
        }
        _ => ExitCode::FAILURE,
    }
}
