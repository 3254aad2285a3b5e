use std::fs::File;
use std::io::Read;
use std::path::Path;

use tracing::debug;

use crate::error::{Error, Result};
use crate::executor::Limits;

/// Default cap on source size: 1 MiB.
pub const DEFAULT_SOURCE_LIMIT: usize = 1024 * 1024;

/// Policy applied around the interpreter core.
#[derive(Debug, Clone)]
pub struct RunConfig {
    /// Largest source file accepted, in bytes.
    pub source_limit: usize,
    /// Maximum instructions dispatched per run (`None` for unbounded).
    pub step_limit: Option<usize>,
}

impl Default for RunConfig {
    fn default() -> Self {
        Self {
            source_limit: DEFAULT_SOURCE_LIMIT,
            step_limit: None,
        }
    }
}

impl RunConfig {
    pub fn limits(&self) -> Limits {
        Limits {
            step_limit: self.step_limit,
            cancel: None,
        }
    }
}

/// Read a source file, rejecting it if it is larger than
/// `config.source_limit` bytes or is not UTF-8.
pub fn load_source(path: &Path, config: &RunConfig) -> Result<String> {
    let read_err = |source: std::io::Error| Error::ReadSource {
        path: path.to_path_buf(),
        source,
    };

    let file = File::open(path).map_err(read_err)?;
    let mut bytes = Vec::new();
    // One byte past the limit is enough to tell that it was exceeded.
    file.take(config.source_limit as u64 + 1)
        .read_to_end(&mut bytes)
        .map_err(read_err)?;
    if bytes.len() > config.source_limit {
        return Err(Error::SourceTooLarge {
            path: path.to_path_buf(),
            limit: config.source_limit,
        });
    }
    debug!(path = %path.display(), bytes = bytes.len(), "source loaded");

    String::from_utf8(bytes)
        .map_err(|e| read_err(std::io::Error::new(std::io::ErrorKind::InvalidData, e)))
}
