pub mod dataset;
pub mod loaders;
pub mod options;

pub use dataset::{
    Conversation, DatasetDoc, DatasetMetadata, DatasetPair, DocumentKind, Expected, ExpectedTurn,
    FinalOutcome, GoldenDoc, GoldenEntry, Turn,
};
pub use loaders::{load_dataset_file, load_dataset_files};
pub use options::{Difficulty, Domain, Outcome, Role};
