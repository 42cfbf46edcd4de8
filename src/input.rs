//! Opening zone files as line sources

use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

use anyhow::{bail, Context, Result};
use clap::ValueEnum;
use flate2::read::MultiGzDecoder;
use serde::{Deserialize, Serialize};

use crate::core::ReaderLineSource;
use crate::utils::GZIP_MAGIC;

/// How input files are encoded
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Compression {
    /// Plain text
    #[default]
    None,
    /// Gzip compressed
    Gzip,
    /// Gzip if the file starts with the gzip magic bytes, plain otherwise
    Auto,
}

/// Line source over an opened zone file
pub type ZoneLines = ReaderLineSource<Box<dyn BufRead>>;

/// Open a zone file, decompressing it when asked to
pub fn open_zone_file(path: &Path, compression: Compression) -> Result<ZoneLines> {
    let file = File::open(path)
        .with_context(|| format!("Failed to open zone file: {}", path.display()))?;
    let mut reader = BufReader::new(file);

    let gzip = match compression {
        Compression::None => false,
        Compression::Gzip => {
            if !has_gzip_magic(&mut reader, path)? {
                bail!("{} is not gzip compressed", path.display());
            }
            true
        }
        Compression::Auto => has_gzip_magic(&mut reader, path)?,
    };

    let reader: Box<dyn BufRead> = if gzip {
        let mut decoder = BufReader::new(MultiGzDecoder::new(reader));
        // Surfaces a corrupt header before any output is produced
        decoder
            .fill_buf()
            .with_context(|| format!("Failed to decompress zone file: {}", path.display()))?;
        tracing::debug!(path = %path.display(), "reading gzip compressed zone");
        Box::new(decoder)
    } else {
        Box::new(reader)
    };

    Ok(ReaderLineSource::new(reader))
}

fn has_gzip_magic(reader: &mut BufReader<File>, path: &Path) -> Result<bool> {
    let head = reader
        .fill_buf()
        .with_context(|| format!("Failed to read zone file: {}", path.display()))?;
    Ok(head.starts_with(&GZIP_MAGIC))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::LineSource;
    use flate2::write::GzEncoder;
    use std::io::Write;
    use tempfile::TempDir;

    fn write_gzip(path: &Path, content: &str) {
        let file = File::create(path).unwrap();
        let mut encoder = GzEncoder::new(file, flate2::Compression::default());
        encoder.write_all(content.as_bytes()).unwrap();
        encoder.finish().unwrap();
    }

    fn read_all(mut source: ZoneLines) -> Vec<String> {
        let mut lines = Vec::new();
        while source.advance().unwrap() {
            lines.push(String::from_utf8_lossy(source.current_line()).into_owned());
        }
        lines
    }

    #[test]
    fn test_open_plain() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("zone.txt");
        std::fs::write(&path, "a\nb\n").unwrap();

        let source = open_zone_file(&path, Compression::None).unwrap();
        assert_eq!(read_all(source), vec!["a", "b"]);
    }

    #[test]
    fn test_open_gzip() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("zone.txt.gz");
        write_gzip(&path, "a\nb\n");

        let source = open_zone_file(&path, Compression::Gzip).unwrap();
        assert_eq!(read_all(source), vec!["a", "b"]);

        let source = open_zone_file(&path, Compression::Auto).unwrap();
        assert_eq!(read_all(source), vec!["a", "b"]);
    }

    #[test]
    fn test_auto_falls_back_to_plain() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("zone.txt");
        std::fs::write(&path, "plain\n").unwrap();

        let source = open_zone_file(&path, Compression::Auto).unwrap();
        assert_eq!(read_all(source), vec!["plain"]);
    }

    #[test]
    fn test_gzip_requested_on_plain_file() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("zone.txt");
        std::fs::write(&path, "plain\n").unwrap();

        let err = open_zone_file(&path, Compression::Gzip).err().unwrap();
        assert!(err.to_string().contains("not gzip compressed"));
    }

    #[test]
    fn test_missing_file() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("missing.txt");

        let err = open_zone_file(&path, Compression::None).err().unwrap();
        assert!(err.to_string().contains("Failed to open zone file"));
    }

    #[test]
    fn test_concatenated_gzip_members() {
        let dir = TempDir::new().unwrap();
        let first = dir.path().join("first.gz");
        let second = dir.path().join("second.gz");
        write_gzip(&first, "a\n");
        write_gzip(&second, "b\n");

        let mut joined = std::fs::read(&first).unwrap();
        joined.extend(std::fs::read(&second).unwrap());
        let path = dir.path().join("joined.gz");
        std::fs::write(&path, joined).unwrap();

        let source = open_zone_file(&path, Compression::Gzip).unwrap();
        assert_eq!(read_all(source), vec!["a", "b"]);
    }
}
