pub mod app_config;
pub mod config;
pub mod labels;
pub mod listing;

pub use app_config::AppConfig;
pub use config::{
    load_app_config, load_app_config_from_env, load_label_config, DEFAULT_USER_AGENT,
};
pub use labels::{load_labels, parse_labels, validate_labels, LabelConfig, LabelEntry};
pub use listing::{Field, ListingRecord, COLUMNS};

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid value for {var}: {reason}")]
    InvalidEnvVar { var: String, reason: String },

    #[error("failed to read labels file {path}: {source}")]
    LabelsFileIo {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse labels file: {0}")]
    LabelsFileParse(#[from] serde_yaml::Error),

    #[error("invalid label configuration: {0}")]
    Validation(String),
}
