use std::sync::Arc;

use crate::config::AppConfig;
use crate::services::{OutputSink, VersionControlService};

#[derive(Clone)]
pub struct AppContext {
    pub config: AppConfig,
    pub version_control: Arc<dyn VersionControlService>,
    pub outputs: Arc<dyn OutputSink>,
}

impl AppContext {
    pub fn new(
        config: AppConfig,
        version_control: Arc<dyn VersionControlService>,
        outputs: Arc<dyn OutputSink>,
    ) -> Self {
        Self {
            config,
            version_control,
            outputs,
        }
    }
}
