use std::{
    fs::File,
    io::{self, BufRead, BufReader, BufWriter, Write},
};

/// How spill units are encoded on disk.
#[derive(Clone, Copy, Debug, Default)]
pub enum CompressionCodec {
    #[default]
    NoCompression,
    #[cfg(feature = "compression_lz4_flex")]
    Lz4Flex,
}

impl CompressionCodec {
    /// writes every line followed by a newline and flushes the file.
    /// Lines are written byte for byte.
    pub fn write_lines<'a>(
        self,
        file: &mut File,
        lines: impl Iterator<Item = &'a [u8]>,
    ) -> io::Result<()> {
        match self {
            CompressionCodec::NoCompression => {
                let mut writer = BufWriter::new(file);
                write_all_lines(&mut writer, lines)?;
                writer.flush()
            }
            #[cfg(feature = "compression_lz4_flex")]
            CompressionCodec::Lz4Flex => {
                use ::lz4_flex::frame::FrameEncoder;
                let mut encoder = FrameEncoder::new(BufWriter::new(file));
                write_all_lines(&mut encoder, lines)?;
                encoder.finish().map_err(io::Error::from)?.flush()
            }
        }
    }

    /// wraps a spill file positioned at its start in a decoding reader.
    pub fn reader(self, file: File) -> Box<dyn BufRead> {
        match self {
            CompressionCodec::NoCompression => Box::new(BufReader::new(file)),
            #[cfg(feature = "compression_lz4_flex")]
            CompressionCodec::Lz4Flex => {
                let decoder = lz4_flex::frame::FrameDecoder::new(file);
                Box::new(BufReader::new(decoder))
            }
        }
    }
}

fn write_all_lines<'a>(
    writer: &mut impl Write,
    lines: impl Iterator<Item = &'a [u8]>,
) -> io::Result<()> {
    for line in lines {
        writer.write_all(line)?;
        writer.write_all(b"\n")?;
    }
    Ok(())
}
