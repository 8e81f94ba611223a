use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use std::fs::File;
use std::io::{self, BufRead, BufReader, BufWriter, Write};
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;

use prg2p::config::{MergedConfig, discover_configs, load_merged_config, user_config_path};
use prg2p::format::format_line;
use prg2p::rules::DEFAULT_RULES;
use prg2p::{DoubleTrie, G2pError, Interpreter, Mode, Transcriber};

#[derive(Parser)]
#[command(name = "prg2p")]
#[command(
	author,
	version,
	about = "Rule-based grapheme-to-phoneme converter",
	long_about = "Rule-based grapheme-to-phoneme converter.\n\n\
	              Reads whitespace-delimited words from the given files (or standard input) \
	              and writes one line per word: word, number of transcriptions, and the \
	              transcriptions separated by '|'."
)]
struct Cli {
	#[command(subcommand)]
	command: Option<Commands>,

	/// File with g2p rules (default: built-in Polish rules)
	#[arg(short, long, value_name = "FILE")]
	rules: Option<PathBuf>,

	/// Which transcriptions to print: first, all or last
	#[arg(short, long, value_name = "MODE", conflicts_with = "all")]
	mode: Option<Mode>,

	/// Print all allowed transcriptions (same as --mode all)
	#[arg(short, long)]
	all: bool,

	/// Log debug information to stderr
	#[arg(short, long)]
	verbose: bool,

	/// Files to read words from
	#[arg(value_name = "INPUT")]
	inputs: Vec<PathBuf>,
}

#[derive(Subcommand)]
enum Commands {
	/// Check a rule file for errors without transcribing anything
	Check {
		/// File with g2p rules (default: configured or built-in rules)
		#[arg(short, long, value_name = "FILE")]
		rules: Option<PathBuf>,
	},
	/// Configuration management commands
	Config {
		#[command(subcommand)]
		action: ConfigAction,
	},
}

#[derive(Subcommand)]
enum ConfigAction {
	/// Display discovered config files and effective settings
	Show,
}

fn main() -> ExitCode {
	match run() {
		Ok(code) => code,
		Err(e) => {
			eprintln!("error: {e:?}");
			ExitCode::FAILURE
		}
	}
}

fn run() -> Result<ExitCode> {
	let cli = Cli::parse();
	init_tracing(cli.verbose);

	// Handle subcommands
	if let Some(command) = cli.command {
		return match command {
			Commands::Check { rules } => handle_check(rules.as_deref()),
			Commands::Config { action } => match action {
				ConfigAction::Show => handle_config_show(),
			},
		};
	}

	let config = load_config()?;
	let mode = if cli.all {
		Mode::All
	} else {
		cli.mode.or(config.mode).unwrap_or_default()
	};
	let g2p = load_transcriber(cli.rules.as_deref(), &config)?;

	handle_transcribe(&g2p, mode, &cli.inputs)
}

fn init_tracing(verbose: bool) {
	let filter = if verbose {
		EnvFilter::new("prg2p=debug")
	} else {
		EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"))
	};
	tracing_subscriber::fmt()
		.with_env_filter(filter)
		.with_writer(io::stderr)
		.init();
}

fn load_config() -> Result<MergedConfig> {
	let cwd = std::env::current_dir().context("Failed to get current directory")?;
	load_merged_config(&cwd).context("Failed to load configuration")
}

/// Rule file from the command line, then from config; `None` means built-in rules.
fn rules_path(flag: Option<&Path>, config: &MergedConfig) -> Option<PathBuf> {
	flag.map(Path::to_path_buf).or_else(|| config.rules.clone())
}

fn load_transcriber(flag: Option<&Path>, config: &MergedConfig) -> Result<Transcriber> {
	match rules_path(flag, config) {
		Some(path) => prg2p::load_file(&path)
			.with_context(|| format!("Failed to load rules from {}", path.display())),
		None => Transcriber::with_default_rules().context("Failed to load built-in rules"),
	}
}

fn handle_transcribe(g2p: &Transcriber, mode: Mode, inputs: &[PathBuf]) -> Result<ExitCode> {
	let stdout = io::stdout();
	let mut out = BufWriter::new(stdout.lock());
	let mut failed = 0;

	if inputs.is_empty() {
		failed += transcribe_stream(g2p, mode, io::stdin().lock(), &mut out)
			.context("Failed to transcribe standard input")?;
	} else {
		for path in inputs {
			let file = File::open(path)
				.with_context(|| format!("Failed to open {}", path.display()))?;
			failed += transcribe_stream(g2p, mode, BufReader::new(file), &mut out)
				.with_context(|| format!("Failed to transcribe {}", path.display()))?;
		}
	}

	out.flush().context("Failed to write output")?;

	if failed > 0 {
		eprintln!("{failed} word(s) could not be transcribed");
		return Ok(ExitCode::FAILURE);
	}
	Ok(ExitCode::SUCCESS)
}

/// Transcribe every word in `reader`, returning how many words failed.
fn transcribe_stream(
	g2p: &Transcriber,
	mode: Mode,
	reader: impl BufRead,
	out: &mut impl Write,
) -> Result<usize> {
	let mut failed = 0;
	for line in reader.lines() {
		let line = line.context("Failed to read input")?;
		for word in line.split_whitespace() {
			match g2p.transcribe(word, mode) {
				Ok(trans) => writeln!(out, "{}", format_line(word, &trans))?,
				// A word that cannot be transcribed does not stop the rest
				Err(e @ G2pError::Match { .. }) => {
					eprintln!("warning: {e}");
					failed += 1;
				}
				Err(e) => return Err(e.into()),
			}
		}
	}
	Ok(failed)
}

fn handle_check(flag: Option<&Path>) -> Result<ExitCode> {
	let config = load_config()?;
	let path = rules_path(flag, &config);

	let mut interp = Interpreter::new();
	let scanned = match &path {
		Some(path) => {
			let file = File::open(path)
				.with_context(|| format!("Failed to open {}", path.display()))?;
			interp.scan(BufReader::new(file))
		}
		None => interp.scan(DEFAULT_RULES.as_bytes()),
	};

	let name = path
		.as_ref()
		.map_or_else(|| "built-in rules".to_string(), |p| p.display().to_string());

	if let Err(e) = scanned {
		eprintln!("{name}: {e}");
		if let Some(kind) = std::error::Error::source(&e) {
			eprintln!("  caused by: {kind}");
		}
		return Ok(ExitCode::FAILURE);
	}

	let trie = DoubleTrie::build(interp.rules());
	println!(
		"{name}: {} variables, {} rules, {} trie nodes",
		interp.variables().len(),
		interp.rules().len(),
		trie.len()
	);
	Ok(ExitCode::SUCCESS)
}

fn handle_config_show() -> Result<ExitCode> {
	let cwd = std::env::current_dir().context("Failed to get current directory")?;
	let configs = discover_configs(&cwd).context("Failed to discover config files")?;

	if configs.is_empty() {
		println!("No configuration files found.");
	} else {
		println!("Configuration files (in cascade order):\n");

		for loaded in &configs {
			println!("# Source: {}", loaded.path.display());
			println!("# root: {}", loaded.config.root);
			if let Some(ref rules) = loaded.config.rules {
				println!("  rules: {}", rules.display());
			}
			if let Some(mode) = loaded.config.mode {
				println!("  mode: {mode}");
			}
			println!();
		}
	}

	let merged = prg2p::config::merge_configs(&configs);
	println!("Effective settings:");
	match merged.rules {
		Some(ref rules) => println!("  rules: {}", rules.display()),
		None => println!("  rules: (built-in)"),
	}
	println!("  mode: {}", merged.mode.unwrap_or_default());

	// Show user config path
	if let Ok(user_path) = user_config_path() {
		println!("User config path: {}", user_path.display());
		if user_path.exists() {
			println!("  (exists)");
		} else {
			println!("  (not found)");
		}
	}

	Ok(ExitCode::SUCCESS)
}
