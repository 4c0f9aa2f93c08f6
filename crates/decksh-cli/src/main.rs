//! decksh CLI entry point.
//!
//! Usage:
//!   decksh script.dsh            # Run a script against a fresh deck
//!   decksh -c <script>           # Execute script text and exit
//!   decksh --commands            # List the deck command table

use std::env;
use std::process::ExitCode;
use std::sync::Arc;

use anyhow::{Context, Result};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use decksh_kernel::{Interpreter, InterpreterConfig, MemoryDeck, SlidesDispatcher};
use decksh_types::Slide;

fn main() -> ExitCode {
    // Initialize tracing (respects RUST_LOG env var)
    tracing_subscriber::registry()
        .with(fmt::layer())
        .with(EnvFilter::from_default_env())
        .init();

    match run() {
        Ok(code) => code,
        Err(e) => {
            eprintln!("Error: {e:?}");
            ExitCode::FAILURE
        }
    }
}

fn run() -> Result<ExitCode> {
    let args: Vec<String> = env::args().skip(1).collect();

    let mut timeout_ms: Option<u64> = None;
    let mut command: Option<String> = None;
    let mut script_path: Option<String> = None;

    let mut iter = args.iter();
    while let Some(arg) = iter.next() {
        match arg.as_str() {
            "--help" | "-h" => {
                print_help();
                return Ok(ExitCode::SUCCESS);
            }
            "--version" | "-V" => {
                println!("decksh {}", env!("CARGO_PKG_VERSION"));
                return Ok(ExitCode::SUCCESS);
            }
            "--commands" => {
                print_commands();
                return Ok(ExitCode::SUCCESS);
            }
            "-c" => {
                let text = iter.next().context("-c requires a script argument")?;
                command = Some(text.clone());
            }
            other => {
                if let Some(ms) = other.strip_prefix("--timeout=") {
                    timeout_ms = Some(ms.parse().context("--timeout expects milliseconds")?);
                } else if other.starts_with('-') {
                    eprintln!("Unknown option: {other}");
                    eprintln!("Run 'decksh --help' for usage.");
                    return Ok(ExitCode::FAILURE);
                } else {
                    script_path = Some(other.to_string());
                }
            }
        }
    }

    let source = match (command, script_path) {
        (Some(text), _) => text,
        (None, Some(path)) => std::fs::read_to_string(&path)
            .with_context(|| format!("Failed to read script: {path}"))?,
        (None, None) => {
            print_help();
            return Ok(ExitCode::FAILURE);
        }
    };

    run_source(&source, timeout_ms)
}

fn print_help() {
    println!(
        r#"decksh v{} — slide-deck scripting

Usage:
  decksh <script.dsh>          Run a script file
  decksh -c <script>           Execute script text and exit
  decksh --commands            List the deck command table

Options:
  --timeout=<ms>               Script timeout in milliseconds (default 30000)
  -h, --help                   Show this help
  -V, --version                Show version

Examples:
  decksh build-deck.dsh
  decksh -c 'ADDRESS SLIDES "list-slides"'
  decksh --timeout=5000 demo.dsh
"#,
        env!("CARGO_PKG_VERSION")
    );
}

/// Print the dispatcher's command table with parameter shapes.
fn print_commands() {
    let dispatcher = SlidesDispatcher::new(Arc::new(MemoryDeck::new()));
    for schema in dispatcher.schemas() {
        println!("{:<18} {}", schema.name, schema.description);
        for param in &schema.params {
            let marker = if param.required { "required" } else { "optional" };
            println!(
                "    {:<14} {:<8} {:<8} {}",
                param.name, param.param_type, marker, param.description
            );
        }
    }
}

/// Run script text against a fresh deck, streaming SAY output to stdout.
fn run_source(source: &str, timeout_ms: Option<u64>) -> Result<ExitCode> {
    let deck = Arc::new(MemoryDeck::with_slides(vec![overview_slide()]));
    let dispatcher = Arc::new(SlidesDispatcher::new(deck));

    let config = match timeout_ms {
        Some(ms) => InterpreterConfig::with_timeout_ms(ms),
        None => InterpreterConfig::default(),
    };
    let interp = Interpreter::new(dispatcher).with_config(config);

    let rt = tokio::runtime::Runtime::new()?;
    let outcome = rt.block_on(interp.execute_streaming(source, &mut |line| {
        println!("{line}");
    }));

    if outcome.success {
        Ok(ExitCode::SUCCESS)
    } else {
        if let Some(error) = &outcome.error {
            eprintln!("ERROR: {error}");
        }
        Ok(ExitCode::from(outcome.error_code as u8))
    }
}

/// The protected slide every fresh deck starts with.
fn overview_slide() -> Slide {
    let mut slide = Slide::new("overview", "Overview");
    slide.active = true;
    slide
}
