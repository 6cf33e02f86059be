use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use env_logger::Env;
use lazyseq::{sorter::DEFAULT_BUFFER_LINES, ExternalSorter, ExtsortConfig};
use log::info;

/// Sort the lines of a text file that may not fit into memory.
///
/// The input is sorted in chunks that are spilled to temporary files and
/// merged into OUTPUT in ascending byte order. Duplicate lines are kept.
#[derive(Debug, Parser)]
#[command(name = "external-sort", version)]
struct Args {
    /// The file to sort.
    input: PathBuf,

    /// Where to write the sorted lines.
    output: PathBuf,

    /// The number of lines sorted in memory per spill file.
    #[arg(long, default_value_t = DEFAULT_BUFFER_LINES)]
    buffer_lines: usize,

    /// The directory for spill files. Defaults to the system temp directory.
    #[arg(long)]
    temp_dir: Option<PathBuf>,
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(Env::default().default_filter_or("info")).init();
    let args = Args::parse();

    let mut config = ExtsortConfig::default().buffer_lines(args.buffer_lines);
    if let Some(temp_dir) = args.temp_dir {
        config = config.temp_file_folder(temp_dir);
    }

    let summary = ExternalSorter::new(config)
        .sort_file(&args.input, &args.output)
        .with_context(|| {
            format!(
                "failed to sort {} into {}",
                args.input.display(),
                args.output.display()
            )
        })?;

    info!("done, {} spill units merged", summary.spill_units);
    Ok(())
}
