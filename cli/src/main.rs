use anyhow::{Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use std::fs::File;
use std::io::{self, BufReader, BufWriter, Write};
use std::path::{Path, PathBuf};
use swagger_ir_core::{convert, ConvertOptions, MarkerStyle};
use tracing::level_filters::LevelFilter;

#[derive(Parser)]
#[command(name = "swagger-ir")]
#[command(about = "Convert Swagger definitions into a normalized intermediate type representation")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Enable verbose logging (sets log level to debug)
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Convert the definitions of a Swagger document (JSON or YAML)
    Convert {
        /// Input Swagger document
        input: PathBuf,

        /// Output file (defaults to stdout if not specified)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Marker keys used in the untagged output
        #[arg(long, value_enum, default_value_t = MarkerArg::Dunder)]
        markers: MarkerArg,

        /// Emit the explicitly tagged form instead of the untagged wire form
        #[arg(long)]
        tagged: bool,

        /// Max schema nesting depth
        #[arg(long, default_value_t = 50)]
        max_depth: usize,

        /// Output format
        #[arg(long, value_enum, default_value_t = OutputFormat::Pretty)]
        format: OutputFormat,
    },
}

#[derive(Copy, Clone, PartialEq, Eq, PartialOrd, Ord, ValueEnum)]
enum MarkerArg {
    Dunder,
    Plain,
}

impl From<MarkerArg> for MarkerStyle {
    fn from(val: MarkerArg) -> Self {
        match val {
            MarkerArg::Dunder => MarkerStyle::Dunder,
            MarkerArg::Plain => MarkerStyle::Plain,
        }
    }
}

#[derive(Copy, Clone, PartialEq, Eq, PartialOrd, Ord, ValueEnum)]
enum OutputFormat {
    Pretty,
    Compact,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Logs go to stderr so stdout stays clean for JSON
    let log_level = if cli.verbose {
        LevelFilter::DEBUG
    } else {
        LevelFilter::WARN
    };
    tracing_subscriber::fmt()
        .with_max_level(log_level)
        .with_writer(std::io::stderr)
        .init();

    match cli.command {
        Commands::Convert {
            input,
            output,
            markers,
            tagged,
            max_depth,
            format,
        } => {
            let document = read_document(&input)?;

            let options = ConvertOptions {
                max_depth,
                markers: markers.into(),
            };

            let result = convert(&document, &options)
                .map_err(|e| anyhow::Error::from(e).context("Conversion failed"))?;

            if tagged {
                write_json(&result.types, output.as_ref(), format)?;
            } else {
                let wire = result
                    .to_wire()
                    .map_err(|e| anyhow::Error::from(e).context("Encoding failed"))?;
                write_json(&wire, output.as_ref(), format)?;
            }
        }
    }

    Ok(())
}

/// Parse `path` as YAML when its extension says so, JSON otherwise.
fn read_document(path: &Path) -> Result<serde_json::Value> {
    let file = File::open(path)
        .with_context(|| format!("Failed to open input file: {}", path.display()))?;
    let reader = BufReader::new(file);

    let is_yaml = matches!(
        path.extension().and_then(|ext| ext.to_str()),
        Some("yaml" | "yml")
    );
    if is_yaml {
        serde_yaml::from_reader(reader)
            .with_context(|| format!("Failed to parse YAML document from: {}", path.display()))
    } else {
        serde_json::from_reader(reader)
            .with_context(|| format!("Failed to parse JSON document from: {}", path.display()))
    }
}

fn write_json<T: serde::Serialize>(
    val: &T,
    path: Option<&PathBuf>,
    format: OutputFormat,
) -> Result<()> {
    let mut writer: Box<dyn Write> = if let Some(p) = path {
        let file = File::create(p)
            .with_context(|| format!("Failed to create output file: {}", p.display()))?;
        Box::new(BufWriter::new(file))
    } else {
        Box::new(BufWriter::new(io::stdout()))
    };

    match format {
        OutputFormat::Pretty => {
            serde_json::to_writer_pretty(&mut writer, val).context("Failed to write JSON")?;
        }
        OutputFormat::Compact => {
            serde_json::to_writer(&mut writer, val).context("Failed to write JSON")?;
        }
    }

    // Ensure trailing newline
    writeln!(writer).context("Failed to write trailing newline")?;
    writer.flush().context("Failed to flush output")?;

    Ok(())
}
