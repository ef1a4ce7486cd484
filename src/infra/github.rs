use std::fs::OpenOptions;
use std::io::Write;
use std::path::PathBuf;

use tracing::debug;

use crate::error::{AppError, AppResult};
use crate::services::OutputSink;

/// Writes outputs in the GitHub Actions file-command format: records are
/// appended to the file named by `GITHUB_OUTPUT`, or printed to stdout when
/// the run happens outside the runner.
pub struct GithubActionOutput {
    output_path: Option<PathBuf>,
}

impl GithubActionOutput {
    pub fn new(output_path: Option<PathBuf>) -> Self {
        Self { output_path }
    }

    // The heredoc delimiter is derived from the value so reruns produce
    // byte-identical records.
    fn render_record(name: &str, value: &str) -> AppResult<String> {
        let digest = blake3::hash(value.as_bytes()).to_hex();
        let delimiter = format!("ghadelim-{}", &digest.as_str()[..16]);
        if value.lines().any(|line| line == delimiter) {
            return Err(AppError::Output(format!(
                "value of output {name} collides with its delimiter"
            )));
        }
        Ok(format!("{name}<<{delimiter}\n{value}\n{delimiter}\n"))
    }
}

impl OutputSink for GithubActionOutput {
    fn set_output(&self, name: &str, value: &str) -> AppResult<()> {
        let record = Self::render_record(name, value)?;
        match &self.output_path {
            Some(path) => {
                let mut file = OpenOptions::new().create(true).append(true).open(path)?;
                file.write_all(record.as_bytes())?;
            }
            None => {
                debug!(name, "GITHUB_OUTPUT not set, writing to stdout");
                std::io::stdout().write_all(record.as_bytes())?;
            }
        }
        Ok(())
    }
}
