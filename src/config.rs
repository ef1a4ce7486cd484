use std::env;
use std::path::PathBuf;

use crate::error::AppResult;

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub workspace_root: PathBuf,
    pub github_output: Option<PathBuf>,
}

impl AppConfig {
    /// Resolve the run configuration from the process environment.
    ///
    /// The workspace root prefers an explicit CLI override, then the
    /// `GITHUB_WORKSPACE` checkout path the Actions runner exports, then
    /// the current directory.
    pub fn load(dir_override: Option<PathBuf>) -> AppResult<Self> {
        let workspace_root = match dir_override {
            Some(dir) => dir,
            None => match env::var_os("GITHUB_WORKSPACE") {
                Some(workspace) => PathBuf::from(workspace),
                None => env::current_dir()?,
            },
        };

        Ok(Self {
            workspace_root,
            github_output: env::var_os("GITHUB_OUTPUT").map(PathBuf::from),
        })
    }
}
