use crate::domain::ports::Storage;
use crate::utils::error::Result;
use std::fs;
use std::io::Read;
use std::path::Path;

pub const STDIN_PATH: &str = "-";

/// Reads input from the local filesystem, or stdin for `-`.
#[derive(Debug, Clone, Default)]
pub struct LocalStorage {
    base_path: Option<String>,
}

impl LocalStorage {
    pub fn new() -> Self {
        Self::default()
    }

    /// Resolves relative paths against `base_path`.
    pub fn with_base_path(base_path: impl Into<String>) -> Self {
        Self {
            base_path: Some(base_path.into()),
        }
    }
}

impl Storage for LocalStorage {
    fn read_input(&self, path: &str) -> Result<Vec<u8>> {
        if path == STDIN_PATH {
            let mut data = Vec::new();
            std::io::stdin().lock().read_to_end(&mut data)?;
            return Ok(data);
        }

        let full_path = match &self.base_path {
            Some(base) => Path::new(base).join(path),
            None => Path::new(path).to_path_buf(),
        };

        tracing::debug!("Reading input from {}", full_path.display());
        Ok(fs::read(full_path)?)
    }
}
