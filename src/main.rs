use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;

use siteroute::config::{RedirectRule, generate_init_template, parse_redirects_file};
use siteroute::route::calc_routes;
use siteroute::rules::RuleSet;

const DEFAULT_REDIRECTS_FILE: &str = "_redirects";

#[derive(Parser)]
#[command(name = "siteroute")]
#[command(
	author,
	version,
	about = "Resolve static site request paths into ordered candidate replies"
)]
#[command(arg_required_else_help = true)]
struct Cli {
	#[command(subcommand)]
	command: Option<Commands>,

	/// Redirects file (`_redirects` format, or TOML when it ends in .toml)
	#[arg(short = 'c', long = "config", global = true, value_name = "FILE")]
	redirects: Option<PathBuf>,

	/// Log rule matching decisions to stderr
	#[arg(short, long, global = true)]
	verbose: bool,

	/// Create a template _redirects in the current directory
	#[arg(long)]
	init: bool,

	/// Overwrite existing _redirects when using --init
	#[arg(long, requires = "init")]
	force: bool,
}

#[derive(Subcommand)]
enum Commands {
	/// Print the candidate chain for a request path
	Resolve {
		/// Project (storage namespace) name
		project: String,

		/// Request path, e.g. /blog/post
		path: String,
	},
	/// Redirects file commands
	Config {
		#[command(subcommand)]
		action: ConfigAction,
	},
}

#[derive(Subcommand)]
enum ConfigAction {
	/// Display parsed rules and any that will be skipped
	Show,
	/// Check the redirects file for errors without resolving anything
	Validate,
}

fn main() -> ExitCode {
	let cli = Cli::parse();
	init_logging(cli.verbose);

	match run(cli) {
		Ok(code) => code,
		Err(e) => {
			eprintln!("error: {e:?}");
			ExitCode::FAILURE
		}
	}
}

fn init_logging(verbose: bool) {
	let default = if verbose { "debug" } else { "warn" };
	let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
	tracing_subscriber::fmt()
		.with_env_filter(filter)
		.with_writer(std::io::stderr)
		.with_target(false)
		.init();
}

fn run(cli: Cli) -> Result<ExitCode> {
	if cli.init {
		return handle_init(cli.force);
	}

	let config = cli.redirects.as_deref();
	match cli.command {
		Some(Commands::Resolve { project, path }) => handle_resolve(config, &project, &path),
		Some(Commands::Config { action }) => match action {
			ConfigAction::Show => handle_config_show(config),
			ConfigAction::Validate => handle_config_validate(config),
		},
		// arg_required_else_help keeps us from getting here with nothing to do
		None => Ok(ExitCode::SUCCESS),
	}
}

/// Load rules from `--config`, or from `_redirects` when it exists.
///
/// Returns the path read, if any.
fn load_rules(config: Option<&Path>) -> Result<(Option<PathBuf>, Vec<RedirectRule>)> {
	let path = match config {
		Some(path) => path.to_path_buf(),
		None => {
			let default = PathBuf::from(DEFAULT_REDIRECTS_FILE);
			if !default.exists() {
				return Ok((None, Vec::new()));
			}
			default
		}
	};

	let rules = parse_redirects_file(&path)
		.with_context(|| format!("Failed to load {}", path.display()))?;
	Ok((Some(path), rules))
}

fn handle_init(force: bool) -> Result<ExitCode> {
	let config_path = PathBuf::from(DEFAULT_REDIRECTS_FILE);

	if config_path.exists() && !force {
		anyhow::bail!("_redirects already exists. Use --force to overwrite.");
	}

	std::fs::write(&config_path, generate_init_template())
		.with_context(|| format!("Failed to write {}", config_path.display()))?;

	println!("Created _redirects");
	Ok(ExitCode::SUCCESS)
}

fn handle_resolve(config: Option<&Path>, project: &str, path: &str) -> Result<ExitCode> {
	let (_, rules) = load_rules(config)?;
	let rules = RuleSet::compile(&rules);

	for reply in calc_routes(project, path, &rules) {
		println!("{reply}");
	}

	Ok(ExitCode::SUCCESS)
}

fn handle_config_show(config: Option<&Path>) -> Result<ExitCode> {
	let (source, rules) = load_rules(config)?;

	let Some(source) = source else {
		println!("No redirects file found.");
		return Ok(ExitCode::SUCCESS);
	};

	println!("# Source: {}", source.display());
	println!("# rules: {}", rules.len());
	println!();

	for (i, rule) in rules.iter().enumerate() {
		println!("  Rule {}:", i + 1);
		println!("    from: {}", rule.from);
		println!("    to: {}", rule.to);
		println!("    status: {}", rule.status);
		if rule.force {
			println!("    force: true");
		}
		for (key, value) in &rule.query {
			println!("    query: {}={}", key, value);
		}
		if rule.is_self_redirect() {
			println!("    (ignored: redirects to itself)");
		}
		println!();
	}

	let compiled = RuleSet::compile(&rules);
	for err in compiled.rejected() {
		println!("Skipped: {}", err);
	}

	Ok(ExitCode::SUCCESS)
}

fn handle_config_validate(config: Option<&Path>) -> Result<ExitCode> {
	let (source, rules) = match load_rules(config) {
		Ok(loaded) => loaded,
		Err(e) => {
			eprintln!("Configuration error: {:#}", e);
			return Ok(ExitCode::FAILURE);
		}
	};

	let Some(source) = source else {
		println!("No redirects file found.");
		return Ok(ExitCode::SUCCESS);
	};

	let compiled = RuleSet::compile(&rules);
	if compiled.rejected().is_empty() {
		println!("{} is valid ({} rules)", source.display(), rules.len());
		return Ok(ExitCode::SUCCESS);
	}

	eprintln!("{} has invalid rules:", source.display());
	for err in compiled.rejected() {
		eprintln!("  {}", err);
	}
	Ok(ExitCode::FAILURE)
}
