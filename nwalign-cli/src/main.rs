use std::fs::File;
use std::io::{BufReader, BufWriter, Write};
use std::path::{Path, PathBuf};
use std::time::Instant;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use nwalign_core::{align, parse_input, CostModel, Limits, DEFAULT_MAX_SEQ_LEN, DEFAULT_MAX_TABLE_CELLS};

#[derive(Parser)]
#[command(name = "nwalign")]
#[command(about = "Minimum-cost global alignment of DNA sequences")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Expand both descriptions, align them, and write the result
    Align {
        /// Input file with the two compact sequence descriptions
        input: PathBuf,

        /// Output file for the five-line result artifact
        output: PathBuf,

        /// JSON file with an alternative cost model
        #[arg(short, long)]
        costs: Option<PathBuf>,

        /// Override the gap penalty of the cost model
        #[arg(short, long)]
        gap: Option<u32>,

        /// Maximum expanded sequence length, in symbols
        #[arg(long, default_value_t = DEFAULT_MAX_SEQ_LEN)]
        max_seq_len: usize,

        /// Maximum number of DP table cells
        #[arg(long, default_value_t = DEFAULT_MAX_TABLE_CELLS)]
        max_table_cells: u64,
    },

    /// Expand both descriptions and print them to stdout
    Expand {
        /// Input file with the two compact sequence descriptions
        input: PathBuf,

        /// Maximum expanded sequence length, in symbols
        #[arg(long, default_value_t = DEFAULT_MAX_SEQ_LEN)]
        max_seq_len: usize,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging
    let log_level = if cli.verbose { "debug" } else { "info" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(log_level)).init();

    match cli.command {
        Commands::Align {
            input,
            output,
            costs,
            gap,
            max_seq_len,
            max_table_cells,
        } => cmd_align(
            input,
            output,
            costs,
            gap,
            Limits {
                max_seq_len,
                max_table_cells,
            },
        ),
        Commands::Expand { input, max_seq_len } => cmd_expand(input, max_seq_len),
    }
}

fn cmd_align(
    input: PathBuf,
    output: PathBuf,
    costs: Option<PathBuf>,
    gap: Option<u32>,
    limits: Limits,
) -> Result<()> {
    let model = load_model(costs, gap)?;
    let (s1, s2) = expand_input(&input, limits.max_seq_len)?;
    log::info!("expanded sequences: {} and {} symbols", s1.len(), s2.len());

    let start = Instant::now();
    let alignment = align(&s1, &s2, &model, &limits)?;
    let elapsed_ms = start.elapsed().as_secs_f64() * 1000.0;
    let rss_kib = resident_memory_kib();

    log::info!(
        "optimal cost {} in {:.2} ms, rss {} KiB",
        alignment.cost,
        elapsed_ms,
        rss_kib
    );

    if let Some(parent) = output.parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("creating directory {}", parent.display()))?;
        }
    }

    let file = File::create(&output).with_context(|| format!("creating {}", output.display()))?;
    let mut writer = BufWriter::new(file);
    writeln!(writer, "{}", alignment.cost)?;
    writer.write_all(&alignment.row1)?;
    writeln!(writer)?;
    writer.write_all(&alignment.row2)?;
    writeln!(writer)?;
    writeln!(writer, "{}", elapsed_ms)?;
    writeln!(writer, "{}", rss_kib)?;
    writer.flush()?;

    log::info!("wrote {}", output.display());
    Ok(())
}

fn cmd_expand(input: PathBuf, max_seq_len: usize) -> Result<()> {
    let (s1, s2) = expand_input(&input, max_seq_len)?;
    log::info!("expanded sequences: {} and {} symbols", s1.len(), s2.len());
    println!("{}", String::from_utf8_lossy(&s1));
    println!("{}", String::from_utf8_lossy(&s2));
    Ok(())
}

fn load_model(costs: Option<PathBuf>, gap: Option<u32>) -> Result<CostModel> {
    let mut model = match costs {
        Some(path) => CostModel::from_json_file(&path)
            .with_context(|| format!("loading cost model from {}", path.display()))?,
        None => CostModel::default(),
    };
    if let Some(gap) = gap {
        model.gap = gap;
    }
    Ok(model)
}

fn expand_input(input: &Path, max_seq_len: usize) -> Result<(Vec<u8>, Vec<u8>)> {
    let file = File::open(input).with_context(|| format!("opening {}", input.display()))?;
    let (d1, d2) = parse_input(BufReader::new(file))?;
    log::debug!(
        "description 1: {} base symbols, {} insertions; description 2: {} base symbols, {} insertions",
        d1.base.len(),
        d1.positions.len(),
        d2.base.len(),
        d2.positions.len()
    );
    let s1 = d1.expand(max_seq_len)?;
    let s2 = d2.expand(max_seq_len)?;
    Ok((s1, s2))
}

/// Resident set size in KiB, sampled via `ps`. Instrumentation only;
/// returns 0 when the measurement is unavailable.
fn resident_memory_kib() -> u64 {
    let pid = std::process::id();
    let output = std::process::Command::new("ps")
        .args(["-o", "rss=", "-p"])
        .arg(pid.to_string())
        .output();
    match output {
        Ok(out) if out.status.success() => String::from_utf8_lossy(&out.stdout)
            .trim()
            .parse()
            .unwrap_or(0),
        _ => {
            log::warn!("could not sample resident memory via ps");
            0
        }
    }
}
