use anyhow::{bail, Context, Result};
use clap::Parser;
use std::io::{self, Read};
use std::path::PathBuf;
use tracing::{error, info};
use tracing_subscriber::{fmt::format::FmtSpan, EnvFilter};
use xmeta::{
    analyse, from_json_slice, Config, Converter, Meta, DEFAULT_MAX_DEPTH, DEFAULT_ROOT,
    XML_DECLARATION,
};

#[derive(Debug, Parser)]
#[command(name = "xmeta", version, about = "Render JSON data as XML")]
struct Args {
    /// JSON data file (defaults to stdin)
    #[arg(value_name = "DATA")]
    data: Option<PathBuf>,

    /// JSON meta description; without one the data is described automatically
    #[arg(short, long, value_name = "META")]
    meta: Option<PathBuf>,

    /// Root element name for automatic descriptions
    #[arg(short, long, conflicts_with = "meta")]
    root: Option<String>,

    /// Output file (defaults to stdout)
    #[arg(short, long, value_name = "OUTPUT")]
    output: Option<PathBuf>,

    /// Leave out the XML declaration
    #[arg(long)]
    no_declaration: bool,

    /// Maximum nesting depth of descriptions and embeds
    #[arg(long, default_value_t = DEFAULT_MAX_DEPTH)]
    max_depth: usize,
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_span_events(FmtSpan::CLOSE)
        .with_writer(io::stderr)
        .with_target(false)
        .without_time()
        .init();

    if let Err(e) = run(Args::parse()) {
        error!("{e:#}");
        std::process::exit(1);
    }
}

fn run(args: Args) -> Result<()> {
    let data = from_json_slice(&read_input(&args.data)?).context("invalid data")?;

    let meta = match &args.meta {
        Some(path) => {
            info!("Reading description: {}", path.display());
            let bytes = std::fs::read(path)
                .with_context(|| format!("failed to read meta file {}", path.display()))?;
            Meta::Value(from_json_slice(&bytes).context("invalid meta description")?)
        }
        None => analyse(&data, args.root.as_deref().unwrap_or(DEFAULT_ROOT)),
    };

    let config = Config::default().with_max_depth(args.max_depth);
    let converter = Converter::with_config(&data, Some(meta), config)?;

    let mut xml = String::new();
    if !args.no_declaration {
        xml.push_str(XML_DECLARATION);
    }
    xml.push_str(converter.as_str());

    match &args.output {
        Some(path) => std::fs::write(path, xml)
            .with_context(|| format!("failed to write output file {}", path.display())),
        None => {
            println!("{xml}");
            Ok(())
        }
    }
}

fn read_input(path: &Option<PathBuf>) -> Result<Vec<u8>> {
    match path {
        Some(path) => std::fs::read(path)
            .with_context(|| format!("failed to read data file {}", path.display())),
        None => {
            let mut buffer = Vec::new();
            io::stdin()
                .read_to_end(&mut buffer)
                .context("failed to read stdin")?;
            if buffer.iter().all(u8::is_ascii_whitespace) {
                bail!("no input provided on stdin");
            }
            Ok(buffer)
        }
    }
}
