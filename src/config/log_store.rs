use crate::core::LogSink;
use crate::utils::error::Result;
use std::fs::OpenOptions;
use std::io::Write;
use std::path::Path;

/// Appends task log lines to plain-text files under a base directory.
#[derive(Debug, Clone)]
pub struct LocalLogStore {
    base_path: String,
}

impl LocalLogStore {
    pub fn new(base_path: String) -> Self {
        Self { base_path }
    }
}

impl LogSink for LocalLogStore {
    async fn append(&self, file: &str, line: &str) -> Result<()> {
        let full_path = Path::new(&self.base_path).join(file);

        if let Some(parent) = full_path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let mut log_file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(full_path)?;
        writeln!(log_file, "{}", line)?;
        Ok(())
    }
}
