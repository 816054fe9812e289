// src/ingest/mod.rs

use anyhow::{Context, Result};
use std::{fs, path::Path};

/// Label used for the pasted text block, which has no file name of its own.
pub const PASTED_LABEL: &str = "pasted data";

/// One unit of input: an uploaded CSV file or the single pasted block.
/// The raw text is owned here and dropped once it has been parsed into a
/// table; sources never share state with each other.
#[derive(Debug, Clone)]
pub struct Source {
    /// File name (or `PASTED_LABEL`), used in chart titles and error reports.
    pub name: String,
    /// Full CSV payload, decoded as UTF-8.
    pub text: String,
}

impl Source {
    /// Read `path` fully into memory and decode it as strict UTF-8.
    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().to_string())
            .unwrap_or_else(|| path.display().to_string());

        let bytes =
            fs::read(path).with_context(|| format!("reading CSV file {}", path.display()))?;
        let text = String::from_utf8(bytes)
            .with_context(|| format!("{} is not valid UTF-8", path.display()))?;

        Ok(Self { name, text })
    }

    /// Wrap an already-buffered pasted block under the fixed label.
    pub fn pasted(text: impl Into<String>) -> Self {
        Self {
            name: PASTED_LABEL.to_string(),
            text: text.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn from_path_reads_utf8_and_names_by_file() -> Result<()> {
        let mut tmp = NamedTempFile::new()?;
        tmp.write_all("Activitati,a,b\nDesign,1,2\n".as_bytes())?;

        let source = Source::from_path(tmp.path())?;
        assert_eq!(
            source.name,
            tmp.path().file_name().unwrap().to_string_lossy()
        );
        assert!(source.text.starts_with("Activitati"));
        Ok(())
    }

    #[test]
    fn from_path_rejects_invalid_utf8() -> Result<()> {
        let mut tmp = NamedTempFile::new()?;
        tmp.write_all(&[0x41, 0xff, 0xfe, 0x42])?;

        let err = Source::from_path(tmp.path()).unwrap_err();
        assert!(err.to_string().contains("not valid UTF-8"));
        Ok(())
    }

    #[test]
    fn pasted_uses_fixed_label() {
        let source = Source::pasted("a,b\n1,2\n");
        assert_eq!(source.name, PASTED_LABEL);
    }

    #[test]
    fn missing_file_is_an_error() {
        assert!(Source::from_path("/definitely/not/here.csv").is_err());
    }
}
