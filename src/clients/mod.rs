pub mod dataset_client;
pub mod response;
pub mod settings_client;

pub use dataset_client::{DatasetClient, SaveReceipt};
pub use settings_client::{SettingsClient, SettingsResponse};
