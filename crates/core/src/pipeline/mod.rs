pub mod align_manuscript_use_case;
pub mod alignment_result;
pub mod pipeline_logger;
