//! DxfTool 命令行入口
//!
//! ```text
//! dxftool export --name "punkt wysokościowy" plik.dxf --output export.csv
//! dxftool export a.dxf b.dxf --output-dir wyniki/
//! dxftool inspect plik.dxf --json
//! ```

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};
use clap::{Args, Parser, Subcommand};
use rayon::prelude::*;
use tracing::{error, info, Level};
use tracing_subscriber::FmtSubscriber;

use dxftool_file::{DxfParser, ExportLayout, ParserConfig, DEFAULT_HIGH_POINT_NAME};

/// 输出文件扩展名
const OUTPUT_EXTENSION: &str = "csv";

#[derive(Debug, Parser)]
#[command(name = "dxftool", version)]
#[command(about = "Export high point coordinates from DXF drawings")]
struct Cli {
    #[command(subcommand)]
    command: Command,
    /// JSON configuration file.
    #[arg(long, global = true)]
    config: Option<PathBuf>,
    /// Log debug output.
    #[arg(short, long, global = true, conflicts_with = "quiet")]
    verbose: bool,
    /// Only log warnings and errors.
    #[arg(short, long, global = true)]
    quiet: bool,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Export high point coordinates to a line-delimited file.
    Export(ExportArgs),
    /// Print detected encoding, version and processing path.
    Inspect(InspectArgs),
}

#[derive(Debug, Args)]
struct ExportArgs {
    /// High point name (layer) to export.
    #[arg(long, default_value = DEFAULT_HIGH_POINT_NAME)]
    name: String,
    /// Source DXF files.
    #[arg(required = true)]
    inputs: Vec<PathBuf>,
    /// Output file (single input only; defaults to the input with a .csv extension).
    #[arg(long, conflicts_with = "output_dir")]
    output: Option<PathBuf>,
    /// Output directory; each input is written to `<stem>.csv`.
    #[arg(long)]
    output_dir: Option<PathBuf>,
    /// Write one `;`-separated row per high point.
    #[arg(long)]
    rows: bool,
}

#[derive(Debug, Args)]
struct InspectArgs {
    /// Source DXF files.
    #[arg(required = true)]
    inputs: Vec<PathBuf>,
    /// Print one JSON object per file.
    #[arg(long)]
    json: bool,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // 初始化日志
    let level = if cli.verbose {
        Level::DEBUG
    } else if cli.quiet {
        Level::WARN
    } else {
        Level::INFO
    };
    tracing::subscriber::set_global_default(
        FmtSubscriber::builder()
            .with_max_level(level)
            .with_writer(std::io::stderr)
            .finish(),
    )?;

    let config = match &cli.config {
        Some(path) => ParserConfig::load(path)
            .with_context(|| format!("failed to load config {}", path.display()))?,
        None => ParserConfig::default(),
    };

    match cli.command {
        Command::Export(args) => run_export(config, args),
        Command::Inspect(args) => run_inspect(config, args),
    }
}

/// 每个输入对应的输出路径
fn output_paths(args: &ExportArgs) -> Result<Vec<PathBuf>> {
    if let Some(output) = &args.output {
        if args.inputs.len() > 1 {
            bail!("--output takes a single input, use --output-dir for several files");
        }
        return Ok(vec![output.clone()]);
    }

    let paths = args
        .inputs
        .iter()
        .map(|input| match &args.output_dir {
            Some(dir) => output_in_dir(dir, input),
            None => input.with_extension(OUTPUT_EXTENSION),
        })
        .collect();
    Ok(paths)
}

fn output_in_dir(dir: &Path, input: &Path) -> PathBuf {
    // 文件名主干可能带点（`plan.v2.dxf`）
    let mut name = input.file_stem().unwrap_or(input.as_os_str()).to_os_string();
    name.push(".");
    name.push(OUTPUT_EXTENSION);
    dir.join(name)
}

fn run_export(mut config: ParserConfig, args: ExportArgs) -> Result<()> {
    if args.rows {
        config.layout = ExportLayout::Rows;
    }
    let parser = DxfParser::new(config)?;
    let outputs = output_paths(&args)?;

    if let Some(dir) = &args.output_dir {
        fs::create_dir_all(dir)
            .with_context(|| format!("failed to create {}", dir.display()))?;
    }

    // 各文件互不依赖，并行处理
    let results: Vec<_> = args
        .inputs
        .par_iter()
        .zip(outputs.par_iter())
        .map(|(input, output)| (input, output, parser.parse(&args.name, input, output)))
        .collect();

    let mut failed = 0;
    for (input, output, result) in results {
        match result {
            Ok(count) => println!("{}\t{}\t{}", count, input.display(), output.display()),
            Err(e) => {
                error!("Failed to export {}: {}", input.display(), e);
                failed += 1;
            }
        }
    }

    if failed > 0 {
        bail!("{} of {} file(s) failed", failed, args.inputs.len());
    }
    info!("Done");
    Ok(())
}

fn run_inspect(config: ParserConfig, args: InspectArgs) -> Result<()> {
    let parser = DxfParser::new(config)?;

    for input in &args.inputs {
        let inspection = parser
            .inspect(input)
            .with_context(|| format!("failed to inspect {}", input.display()))?;

        if args.json {
            println!("{}", serde_json::to_string(&inspection)?);
        } else {
            println!(
                "{}: encoding={} version={} path={:?}",
                input.display(),
                inspection.encoding,
                inspection.version,
                inspection.path
            );
        }
    }
    Ok(())
}
