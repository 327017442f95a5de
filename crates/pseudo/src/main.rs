//! `pseudo` command line: translate natural-language pseudocode into source code.

mod config;

use anyhow::{Context, bail};
use clap::{Args, Parser, Subcommand};
use config::{PseudoConfig, parse_source};
use pseudo_syntax::{IndentChar, SourceTag, TargetTag};
use std::io::Read;
use std::path::{Path, PathBuf};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "pseudo", version, about = "Translate natural-language pseudocode into source code")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Translate text into a target language
    Translate(TranslateArgs),

    /// Print the parsed tree as JSON
    Parse {
        /// Input file (stdin when omitted or "-")
        file: Option<PathBuf>,

        /// Source language, or "auto" to detect
        #[arg(long)]
        from: Option<String>,

        /// Pretty-print the JSON
        #[arg(long)]
        pretty: bool,
    },

    /// Print the detected source language
    Detect {
        /// Input file (stdin when omitted or "-")
        file: Option<PathBuf>,
    },

    /// List source and target languages
    Languages,
}

#[derive(Args)]
struct TranslateArgs {
    /// Input file (stdin when omitted or "-")
    file: Option<PathBuf>,

    /// Target language (falls back to [defaults] target in config)
    #[arg(long, short)]
    to: Option<String>,

    /// Source language, or "auto" to detect
    #[arg(long, short)]
    from: Option<String>,

    /// Characters per indentation level
    #[arg(long)]
    indent_size: Option<usize>,

    /// Indent with tabs
    #[arg(long)]
    tabs: bool,

    /// Drop comment lines from the output
    #[arg(long)]
    no_comments: bool,

    /// JavaScript/TypeScript: emit 'use strict' and strict equality
    #[arg(long)]
    strict: bool,
}

/// Reset SIGPIPE to default behavior so piping to `head` etc. doesn't panic.
#[cfg(unix)]
fn reset_sigpipe() {
    // SAFETY: libc::signal only changes the disposition of SIGPIPE back to
    // terminate-on-broken-pipe. No memory is touched.
    unsafe {
        libc::signal(libc::SIGPIPE, libc::SIG_DFL);
    }
}

#[cfg(not(unix))]
fn reset_sigpipe() {}

fn init_tracing() {
    let filter = EnvFilter::try_from_env("PSEUDO_LOG").unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn read_input(file: Option<&Path>) -> anyhow::Result<String> {
    match file {
        Some(path) if path != Path::new("-") => std::fs::read_to_string(path)
            .with_context(|| format!("failed to read {}", path.display())),
        _ => {
            let mut text = String::new();
            std::io::stdin()
                .read_to_string(&mut text)
                .context("failed to read stdin")?;
            Ok(text)
        }
    }
}

/// Source tag from the flag, then the file extension, then config.
/// `None` means detect.
fn resolve_source(
    flag: Option<&str>,
    file: Option<&Path>,
    config: &PseudoConfig,
) -> anyhow::Result<Option<SourceTag>> {
    if flag.is_some() {
        return parse_source(flag);
    }
    let by_extension = file
        .and_then(|path| path.extension())
        .and_then(|ext| ext.to_str())
        .and_then(pseudo_syntax::reader_for_extension)
        .map(|reader| reader.language());
    if by_extension.is_some() {
        return Ok(by_extension);
    }
    config.source()
}

fn translate(args: TranslateArgs, config: &PseudoConfig) -> anyhow::Result<()> {
    let target: TargetTag = match args.to.as_deref() {
        Some(name) => name.parse()?,
        None => match config.target()? {
            Some(target) => target,
            None => bail!("no target language: pass --to or set [defaults] target in config"),
        },
    };

    let mut options = config.generate_options();
    if let Some(size) = args.indent_size {
        options.indent_size = size;
    }
    if args.tabs {
        options.indent_char = IndentChar::Tab;
    }
    if args.no_comments {
        options.include_comments = false;
    }
    if args.strict {
        options.strict_mode = true;
    }

    let file = args.file.as_deref();
    let source = resolve_source(args.from.as_deref(), file, config)?;
    let text = read_input(file)?;
    let output = pseudo_syntax::translate(&text, source, target, &options)?;
    println!("{output}");
    Ok(())
}

fn languages() {
    println!("sources:");
    for reader in pseudo_syntax::readers() {
        let status = if reader.implemented() {
            "implemented"
        } else {
            "aliased to natural"
        };
        let extensions: Vec<_> = reader.extensions().iter().map(|e| format!(".{e}")).collect();
        println!(
            "  {:<12} {:<20} {}",
            reader.language().name(),
            status,
            extensions.join(" ")
        );
    }
    println!("targets:");
    for writer in pseudo_syntax::writers() {
        println!("  {:<12} .{}", writer.language().name(), writer.extension());
    }
}

fn run(cli: Cli) -> anyhow::Result<()> {
    let cwd = std::env::current_dir().context("failed to read working directory")?;
    let config = PseudoConfig::load(&cwd);

    match cli.command {
        Command::Translate(args) => translate(args, &config)?,
        Command::Parse { file, from, pretty } => {
            let source = resolve_source(from.as_deref(), file.as_deref(), &config)?;
            let text = read_input(file.as_deref())?;
            let tree = pseudo_syntax::parse(&text, source);
            let json = if pretty {
                serde_json::to_string_pretty(&tree)?
            } else {
                serde_json::to_string(&tree)?
            };
            println!("{json}");
        }
        Command::Detect { file } => {
            let text = read_input(file.as_deref())?;
            println!("{}", pseudo_syntax::detect_language(&text));
        }
        Command::Languages => languages(),
    }
    Ok(())
}

fn main() {
    reset_sigpipe();
    init_tracing();

    if let Err(e) = run(Cli::parse()) {
        eprintln!("error: {e:#}");
        std::process::exit(1);
    }
}
