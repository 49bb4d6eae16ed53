//! Sail CLI
//!
//! Converts HTML to Sail. The selection (a line range, or the whole input)
//! is converted and replaced, and the full text is written back out.

mod notify;
mod selection;

use std::fs;
use std::io::{self, Read};
use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::Parser;
use sail_convert::{ConvertOptions, ParseMode, convert_with_options};
use sail_html::print_tree;
use tracing::debug;
use tracing_subscriber::EnvFilter;
use tracing_subscriber::util::SubscriberInitExt;

use selection::{LineRange, splice};

/// Sail — convert HTML into Sail notation
#[derive(Parser, Debug)]
#[command(name = "sail")]
#[command(author, version, about, long_about = None)]
#[command(after_help = r#"EXAMPLES:
    # Convert a file and print the result
    sail page.html

    # Convert an inline snippet
    sail --html '<div id="x">hello</div>'

    # Convert lines 10 to 24 of a file in place
    sail --lines 10:24 --in-place page.html

    # Read from stdin, reject markup the parser had to repair
    cat page.html | sail --strict

    # Inspect the parsed tree
    sail --dump-tree --html '<p>a<b>b</b></p>'
"#)]
struct Cli {
    /// HTML file to convert (reads stdin when omitted)
    #[arg(value_name = "FILE", conflicts_with = "html")]
    path: Option<PathBuf>,

    /// Convert this HTML string instead of a file
    #[arg(long, value_name = "HTML")]
    html: Option<String>,

    /// Convert only these lines (1-based, inclusive), e.g. 3:12
    #[arg(long, value_name = "START:END")]
    lines: Option<LineRange>,

    /// Write the result to this file instead of stdout
    #[arg(short, long, value_name = "FILE", conflicts_with = "in_place")]
    output: Option<PathBuf>,

    /// Overwrite FILE with the result
    #[arg(short, long, requires = "path")]
    in_place: bool,

    /// Parse mode: auto, fragment or document
    #[arg(long, value_name = "MODE", default_value_t = ParseMode::Auto)]
    mode: ParseMode,

    /// Fail on any parse error, even ones the parser can recover from
    #[arg(long)]
    strict: bool,

    /// Print the parsed tree instead of converting
    #[arg(long, conflicts_with = "json")]
    dump_tree: bool,

    /// Print the parsed tree as JSON instead of converting
    #[arg(long)]
    json: bool,

    /// Enable debug tracing on stderr (filter with RUST_LOG)
    #[arg(short, long)]
    trace: bool,
}

fn main() -> Result<ExitCode> {
    let cli = Cli::parse();
    if cli.trace {
        init_tracing();
    }

    let source = read_input(&cli)?;
    let options = ConvertOptions {
        mode: cli.mode,
        strict: cli.strict,
    };

    let range = match cli.lines {
        Some(lines) => lines.byte_range(&source)?,
        None => 0..source.len(),
    };
    let selected = &source[range.clone()];
    debug!(bytes = selected.len(), "selected input");

    if cli.dump_tree || cli.json {
        dump_tree(&cli, selected, options)?;
        return Ok(ExitCode::SUCCESS);
    }

    match convert_with_options(selected, &options) {
        Ok(conversion) => {
            notify::issues(&conversion.issues);
            let replaced = splice(&source, range, &conversion.output);
            write_output(&cli, &replaced)?;
            notify::success();
            Ok(ExitCode::SUCCESS)
        }
        Err(err) => {
            notify::failure(&err);
            Ok(ExitCode::FAILURE)
        }
    }
}

/// Install a stderr fmt subscriber; `RUST_LOG` overrides the debug default.
fn init_tracing() {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("debug"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .finish()
        .init();
    debug!("tracing initialized");
}

/// Read from `--html`, FILE or stdin, in that order.
fn read_input(cli: &Cli) -> Result<String> {
    if let Some(ref html) = cli.html {
        return Ok(html.clone());
    }
    if let Some(ref path) = cli.path {
        return fs::read_to_string(path)
            .with_context(|| format!("Failed to read '{}'", path.display()));
    }
    let mut buf = String::new();
    let _bytes = io::stdin()
        .read_to_string(&mut buf)
        .context("Failed to read stdin")?;
    Ok(buf)
}

/// Write to `--output`, back to FILE with `--in-place`, or to stdout.
fn write_output(cli: &Cli, text: &str) -> Result<()> {
    let target = if cli.in_place {
        cli.path.as_ref()
    } else {
        cli.output.as_ref()
    };
    match target {
        Some(path) => fs::write(path, text)
            .with_context(|| format!("Failed to write '{}'", path.display())),
        None => {
            println!("{text}");
            Ok(())
        }
    }
}

/// Print the parsed tree as an indented dump or as JSON.
fn dump_tree(cli: &Cli, html: &str, options: ConvertOptions) -> Result<()> {
    let parsed = options.parser().parse(html)?;
    notify::issues(&parsed.issues);

    if cli.json {
        let json = serde_json::to_string_pretty(&parsed.tree.serializable(parsed.tree.root()))?;
        println!("{json}");
    } else {
        println!("=== Parsed Tree ({} mode) ===", parsed.mode);
        print_tree(&parsed.tree, parsed.tree.root());
    }
    Ok(())
}
