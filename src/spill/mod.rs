//! Sorted runs moved out of memory into temporary files.

use std::{
    fs::File,
    io::{BufRead, Seek, SeekFrom},
    path::PathBuf,
};

use log::debug;

use crate::{
    error::Result,
    lines::{LineReader, ReadPolicy},
};

use self::codec::CompressionCodec;

pub mod codec;

/// A sorted run of raw lines stored in an anonymous temporary file.
///
/// The file has no name in the file system, so it disappears when the
/// handle is dropped or the process exits, whichever comes first.
pub struct SpillUnit {
    file: File,
    num_entries: usize,
}

impl SpillUnit {
    pub fn num_entries(&self) -> usize {
        self.num_entries
    }
}

/// The spill units created during one sort.
pub struct SpillCollection {
    sort_folder: PathBuf,
    units: Vec<SpillUnit>,
    compression_choice: CompressionCodec,
}

impl SpillCollection {
    pub fn new(sort_folder: PathBuf, compression_choice: CompressionCodec) -> Self {
        Self {
            sort_folder,
            units: Vec::new(),
            compression_choice,
        }
    }

    pub fn len(&self) -> usize {
        self.units.len()
    }

    pub fn is_empty(&self) -> bool {
        self.units.is_empty()
    }

    /// Moves the contents of `source` into a new spill unit.
    /// `source` must already be sorted. When the call completes
    /// successfully, `source` is empty and ready for reuse.
    pub fn add_run(&mut self, source: &mut Vec<Vec<u8>>) -> Result<()> {
        let mut file = tempfile::tempfile_in(&self.sort_folder)?;
        let num_entries = source.len();
        self.compression_choice
            .write_lines(&mut file, source.iter().map(Vec::as_slice))?;

        // seek to the beginning of the file to ensure that we will actually read its contents
        file.seek(SeekFrom::Start(0))?;

        debug!(
            "spilled run {} with {} lines to {}",
            self.units.len(),
            num_entries,
            self.sort_folder.display()
        );
        source.clear();
        self.units.push(SpillUnit { file, num_entries });
        Ok(())
    }

    /// Turns every spill unit into a line sequence.
    /// A read failure on a spill unit is always reported, never skipped.
    pub fn into_runs(self) -> Vec<LineReader<Box<dyn BufRead>, Vec<u8>>> {
        let codec = self.compression_choice;
        self.units
            .into_iter()
            .map(|unit| {
                LineReader::new(codec.reader(unit.file), ReadPolicy::FailFast)
                    .strip_carriage_return(false)
                    .records()
            })
            .collect()
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn spilled_lines_read_back_in_order() {
        let dir = tempfile::tempdir().unwrap();
        let mut spills = SpillCollection::new(dir.path().to_owned(), CompressionCodec::default());

        let mut first = vec![b"a".to_vec(), b"c\r".to_vec(), Vec::new()];
        let mut second = vec![b"b\xe9".to_vec()];
        spills.add_run(&mut first).unwrap();
        spills.add_run(&mut second).unwrap();
        assert!(first.is_empty());
        assert_eq!(2, spills.len());
        assert_eq!(3, spills.units[0].num_entries());

        let runs: Vec<Vec<Vec<u8>>> = spills
            .into_runs()
            .into_iter()
            .map(|run| run.collect::<Result<_>>().unwrap())
            .collect();
        assert_eq!(vec![b"a".to_vec(), b"c\r".to_vec(), Vec::new()], runs[0]);
        assert_eq!(vec![b"b\xe9".to_vec()], runs[1]);
    }

    #[test]
    fn spill_files_leave_no_trace() {
        let dir = tempfile::tempdir().unwrap();
        let mut spills = SpillCollection::new(dir.path().to_owned(), CompressionCodec::default());
        spills.add_run(&mut vec![b"x".to_vec()]).unwrap();
        assert_eq!(0, std::fs::read_dir(dir.path()).unwrap().count());
    }

    #[test]
    fn missing_folder_is_a_storage_error() {
        let dir = tempfile::tempdir().unwrap();
        let mut spills = SpillCollection::new(dir.path().join("nope"), CompressionCodec::default());
        let mut run = vec![b"x".to_vec()];
        assert!(spills.add_run(&mut run).unwrap_err().is_storage());
        assert_eq!(1, run.len());
    }
}
