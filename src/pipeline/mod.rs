//! Processing pipeline components.

mod coordinator;
mod processor;

pub use coordinator::{ensure_output_dir, output_file_name, output_path_for};
pub use processor::{JobOptions, JobResult, run_job, run_pipeline};
