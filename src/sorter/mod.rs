//! External merge sort over lines.
//!
//! Lines are handled as raw bytes, so input in any encoding is sorted
//! and written back unchanged. The input is read in chunks of a fixed number of lines. Each chunk is
//! sorted in memory and moved to a spill unit; the spill units are then
//! merged back into one sorted stream. Only one chunk plus one line per
//! spill unit is held in memory at any time.

use std::{
    fs::File,
    io::{BufRead, BufReader, BufWriter, Write},
    num::NonZeroUsize,
    path::{Path, PathBuf},
};

use log::{debug, info};

use crate::{
    error::Result,
    group::eager::Groups,
    grouper::Always,
    lines::{LineReader, ReadPolicy},
    merge::Merge,
    orderer::{ErrorsFirst, OrdOrderer, Orderer},
    spill::{codec::CompressionCodec, SpillCollection},
};

/// The number of lines per spill unit unless configured otherwise.
pub const DEFAULT_BUFFER_LINES: usize = 1000;

/// The configuration for the external sorting.
#[derive(Clone, Debug)]
pub struct ExtsortConfig {
    /// the number of lines sorted in memory before they are spilled.
    pub(crate) buffer_lines: NonZeroUsize,
    pub temp_file_folder: PathBuf,
    pub(crate) compression: CompressionCodec,
    /// what to do when reading the input fails.
    pub(crate) read_policy: ReadPolicy,
}

impl Default for ExtsortConfig {
    /// 1000 lines per spill unit in the system temp directory,
    /// without compression, failing on input errors.
    fn default() -> Self {
        Self {
            buffer_lines: NonZeroUsize::new(DEFAULT_BUFFER_LINES).unwrap_or(NonZeroUsize::MIN),
            temp_file_folder: std::env::temp_dir(),
            compression: CompressionCodec::default(),
            read_policy: ReadPolicy::default(),
        }
    }
}

impl ExtsortConfig {
    /// Updates the number of lines per spill unit. 0 is treated as 1.
    pub fn buffer_lines(self, lines: usize) -> Self {
        Self {
            buffer_lines: NonZeroUsize::new(lines).unwrap_or(NonZeroUsize::MIN),
            ..self
        }
    }
    /// Updates the temp_file_folder attribute.
    /// Useful for fluent-style api usage.
    pub fn temp_file_folder(self, folder: impl Into<PathBuf>) -> Self {
        Self {
            temp_file_folder: folder.into(),
            ..self
        }
    }
    /// Updates the codec used for spill units.
    pub fn compression(self, compression: CompressionCodec) -> Self {
        Self {
            compression,
            ..self
        }
    }
    /// Updates how failures reading the input are handled.
    pub fn read_policy(self, read_policy: ReadPolicy) -> Self {
        Self {
            read_policy,
            ..self
        }
    }
}

/// Statistics about a finished sort.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct SortSummary {
    /// the number of lines written to the output.
    pub lines: u64,
    /// the number of spill units created.
    pub spill_units: usize,
}

/// a stable sort, so lines the orderer considers equal keep their input order.
fn buffer_sort(orderer: &impl Orderer<Vec<u8>>, buffer: &mut [Vec<u8>]) {
    buffer.sort_by(|a, b| orderer.compare(a, b));
}

#[cfg(feature = "parallel_sort")]
fn par_buffer_sort<O>(orderer: &O, buffer: &mut [Vec<u8>])
where
    O: Orderer<Vec<u8>> + Sync,
{
    use rayon::slice::ParallelSliceMut;
    buffer.par_sort_by(|a, b| orderer.compare(a, b));
}

pub struct ExternalSorter {
    config: ExtsortConfig,
}

impl ExternalSorter {
    pub fn new(options: ExtsortConfig) -> Self {
        Self { config: options }
    }

    /// Sorts the lines of `input` in ascending byte order and writes them
    /// to `output`, one per line. Lines that compare equal keep their input order.
    ///
    /// # Errors
    /// Any failure reading the input (unless the read policy is best effort),
    /// writing a spill unit, reading it back or writing the output aborts the sort.
    /// Spill units created up to that point are removed.
    pub fn sort_lines<R, W>(&self, input: R, output: W) -> Result<SortSummary>
    where
        R: BufRead,
        W: Write,
    {
        self.run(input, output, OrdOrderer::new(), buffer_sort)
    }

    /// Sorts the lines of `input` with a custom orderer.
    pub fn sort_lines_by<R, W, O>(&self, input: R, output: W, orderer: O) -> Result<SortSummary>
    where
        R: BufRead,
        W: Write,
        O: Orderer<Vec<u8>>,
    {
        self.run(input, output, orderer, buffer_sort)
    }

    /// Like [`ExternalSorter::sort_lines_by`], but sorts each chunk with rayon.
    #[cfg(feature = "parallel_sort")]
    pub fn par_sort_lines_by<R, W, O>(&self, input: R, output: W, orderer: O) -> Result<SortSummary>
    where
        R: BufRead,
        W: Write,
        O: Orderer<Vec<u8>> + Sync,
    {
        self.run(input, output, orderer, par_buffer_sort)
    }

    /// Sorts the file at `input` into a newly created file at `output`.
    pub fn sort_file(&self, input: &Path, output: &Path) -> Result<SortSummary> {
        info!("reading {}", input.display());
        let reader = BufReader::new(File::open(input)?);
        let writer = File::create(output)?;
        let summary = self.sort_lines(reader, writer)?;
        info!(
            "wrote {} lines to {} using {} spill units",
            summary.lines,
            output.display(),
            summary.spill_units
        );
        Ok(summary)
    }

    fn run<R, W, O, F>(
        &self,
        input: R,
        output: W,
        orderer: O,
        mut buffer_sort: F,
    ) -> Result<SortSummary>
    where
        R: BufRead,
        W: Write,
        O: Orderer<Vec<u8>>,
        F: FnMut(&O, &mut [Vec<u8>]),
    {
        let max_buffer_size = self.config.buffer_lines.get();
        let mut spills = SpillCollection::new(
            self.config.temp_file_folder.clone(),
            self.config.compression,
        );

        let lines = LineReader::new(input, self.config.read_policy).records::<Vec<u8>>();
        let chunks = Groups::new(lines, Always).max_group_size(max_buffer_size);

        for chunk in chunks {
            let mut sort_buffer = chunk.into_iter().collect::<Result<Vec<Vec<u8>>>>()?;
            if sort_buffer.len() < max_buffer_size {
                // we could not completely fill the buffer, so we know that this
                // is the last run that will be generated.
                debug!("final spill of {} lines", sort_buffer.len());
            }
            buffer_sort(&orderer, &mut sort_buffer);
            spills.add_run(&mut sort_buffer)?;
        }

        let spill_units = spills.len();
        debug!("merging {spill_units} spill units");

        let runs = spills.into_runs();
        let mut writer = BufWriter::new(output);
        let mut lines_written = 0;
        for line in Merge::new(runs, ErrorsFirst(orderer)) {
            writer.write_all(&line?)?;
            writer.write_all(b"\n")?;
            lines_written += 1;
        }
        writer.flush()?;

        Ok(SortSummary {
            lines: lines_written,
            spill_units,
        })
    }
}
