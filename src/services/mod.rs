pub mod output_sink;
pub mod version_control;

pub use output_sink::OutputSink;
pub use version_control::VersionControlService;
