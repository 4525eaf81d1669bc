pub mod json_loader;

pub use json_loader::{load_dataset_file, load_dataset_files, DATASET_FILE_SUFFIX};
