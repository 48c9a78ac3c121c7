use crate::error::ReportError;
use crate::report::ReportRequest;
use log::info;
use std::fs;
use std::path::{Path, PathBuf};

/// Writes report bodies to disk.
#[derive(Debug, Clone)]
pub struct ReportWriter {
    dir: PathBuf,
    file_override: Option<PathBuf>,
}

impl ReportWriter {
    /// Write reports into `dir` under their default file names.
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self {
            dir: dir.into(),
            file_override: None,
        }
    }

    /// Writer for the current working directory.
    pub fn current_dir() -> Self {
        Self::new(".")
    }

    /// Write to `path` instead of the default file name.
    pub fn with_output(mut self, path: impl Into<PathBuf>) -> Self {
        self.file_override = Some(path.into());
        self
    }

    pub fn target_path(&self, request: &ReportRequest) -> PathBuf {
        match &self.file_override {
            Some(path) => path.clone(),
            None => self.dir.join(request.file_name()),
        }
    }

    /// Write `body` verbatim, replacing any existing file.
    pub fn write(&self, request: &ReportRequest, body: &[u8]) -> Result<PathBuf, ReportError> {
        let path = self.target_path(request);
        write_file(&path, body)?;
        info!("Wrote {} bytes of {} report to {}", body.len(), request.kind, path.display());
        Ok(path)
    }
}

fn write_file(path: &Path, body: &[u8]) -> Result<(), ReportError> {
    fs::write(path, body).map_err(|source| ReportError::Write {
        path: path.to_path_buf(),
        source,
    })
}
