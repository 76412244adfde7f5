use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use tempfile::NamedTempFile;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum PersistError {
    #[error("download directory missing or not writable: {0}")]
    OutputDir(String),
    #[error("refusing to write outside the download directory: {0:?}")]
    InvalidName(String),
    #[error("io error: {0}")]
    Io(#[from] io::Error),
}

/// Ensure the download directory exists and is a directory; create it if missing.
pub fn ensure_output_dir(dir: &Path) -> Result<(), PersistError> {
    match fs::metadata(dir) {
        Ok(meta) if meta.is_dir() => Ok(()),
        Ok(_) => Err(PersistError::OutputDir(format!(
            "{} is not a directory",
            dir.display()
        ))),
        Err(err) if err.kind() == io::ErrorKind::NotFound => {
            fs::create_dir_all(dir).map_err(|e| PersistError::OutputDir(e.to_string()))
        }
        Err(err) => Err(PersistError::OutputDir(err.to_string())),
    }
}

/// Writes whole files into one directory: temp file first, then rename, so a
/// failed download never leaves a truncated file under the final name.
pub struct AtomicFileWriter {
    dir: PathBuf,
}

impl AtomicFileWriter {
    pub fn new(dir: PathBuf) -> Self {
        Self { dir }
    }

    pub fn write(&self, filename: &str, content: &[u8]) -> Result<PathBuf, PersistError> {
        let name = plain_file_name(filename)?;
        ensure_output_dir(&self.dir)?;

        let target = self.dir.join(name);
        let mut tmp = NamedTempFile::new_in(&self.dir)?;
        tmp.write_all(content)?;
        tmp.as_file_mut().sync_all()?;
        tmp.persist(&target).map_err(|e| PersistError::Io(e.error))?;
        Ok(target)
    }
}

/// Accepts only a bare file name: no separators, no `.`/`..`.
fn plain_file_name(filename: &str) -> Result<&str, PersistError> {
    let is_plain = !filename.is_empty()
        && filename != "."
        && filename != ".."
        && !filename.contains(['/', '\\']);
    if is_plain {
        Ok(filename)
    } else {
        Err(PersistError::InvalidName(filename.to_string()))
    }
}
