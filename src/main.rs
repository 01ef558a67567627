//! The `quire` binary.

use std::fs;
use std::io::{self, Read, Write};
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use tracing_subscriber::prelude::*;
use tracing_subscriber::{fmt, EnvFilter};

use quire::{Options, ParseOptions, RenderOptions};

/// Renders CommonMark to HTML
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// The CommonMark files to parse; or standard input if none passed
    #[arg(value_name = "FILE")]
    files: Vec<PathBuf>,

    /// Allow raw HTML and dangerous URLs
    #[arg(long = "unsafe")]
    unsafe_: bool,

    /// Treat newlines as hard line breaks
    #[arg(long)]
    hardbreaks: bool,

    /// Default value for fenced code block's info strings if none is given
    #[arg(long, value_name = "INFO")]
    default_info_string: Option<String>,

    /// An extra character to use as an emphasis delimiter, like `*`
    #[arg(long = "emphasis-delimiter", value_name = "CHAR")]
    emphasis_delimiters: Vec<char>,

    /// Write output to FILE instead of stdout
    #[arg(short, long, value_name = "FILE")]
    output: Option<PathBuf>,
}

fn main() -> Result<()> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_writer(io::stderr))
        .init();

    let cli = Cli::parse();

    let options = Options {
        parse: ParseOptions {
            default_info_string: cli.default_info_string.clone(),
            emphasis_delimiters: cli.emphasis_delimiters.clone(),
        },
        render: RenderOptions {
            hardbreaks: cli.hardbreaks,
            unsafe_: cli.unsafe_,
        },
    };

    let input = read_input(&cli.files)?;
    let html = quire::markdown_bytes_to_html(&input, &options).context("reading input")?;

    match cli.output {
        Some(ref path) => {
            fs::write(path, html).with_context(|| format!("writing {}", path.display()))?
        }
        None => {
            let stdout = io::stdout();
            let mut lock = stdout.lock();
            lock.write_all(html.as_bytes())?;
            lock.flush()?;
        }
    }

    Ok(())
}

#[tracing::instrument(level = "debug")]
fn read_input(files: &[PathBuf]) -> Result<Vec<u8>> {
    let mut input = Vec::new();

    if files.is_empty() {
        io::stdin()
            .read_to_end(&mut input)
            .map_err(quire::Error::from)
            .context("reading standard input")?;
    } else {
        for path in files {
            let mut file = fs::File::open(path)
                .map_err(quire::Error::from)
                .with_context(|| format!("opening {}", path.display()))?;
            file.read_to_end(&mut input)
                .map_err(quire::Error::from)
                .with_context(|| format!("reading {}", path.display()))?;
        }
    }

    tracing::debug!(bytes = input.len(), "read input");
    Ok(input)
}
