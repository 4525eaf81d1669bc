pub mod dataset_merger;
pub mod export_writer;
pub mod template_engine;
pub mod vertical_context;

pub use dataset_merger::{merge_datasets, merge_goldens, merge_pairs, MergeTarget};
pub use export_writer::ExportWriter;
pub use template_engine::build_conversation;
pub use vertical_context::VerticalContext;
