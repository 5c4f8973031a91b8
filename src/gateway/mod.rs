pub mod file;
pub mod http;

use crate::config::EditorSettings;
use crate::document::{Configuration, ValidationError};

pub use file::FileGateway;
pub use http::HttpGateway;

#[derive(Debug, thiserror::Error)]
pub enum GatewayError {
    #[error("{0}")]
    Transport(String),
    #[error("Failed to load configuration")]
    LoadStatus { status: u16 },
    #[error("{detail}")]
    Rejected { status: u16, detail: String },
    #[error("invalid configuration payload: {0}")]
    Decode(String),
    #[error("failed to encode configuration: {0}")]
    Encode(#[source] serde_json::Error),
    #[error("failed to read file {path}: {source}")]
    Read {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("invalid json in {path}: {source}")]
    Parse {
        path: String,
        #[source]
        source: serde_json::Error,
    },
    #[error("failed to write file {path}: {source}")]
    Write {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("Invalid configuration: {0}")]
    Invalid(#[from] ValidationError),
}

/// Where the document comes from and goes back to. Both calls block until the
/// backend answers.
pub trait PersistenceGateway {
    fn load(&self) -> Result<Configuration, GatewayError>;
    fn save(&self, config: &Configuration) -> Result<(), GatewayError>;
}

impl<T: PersistenceGateway + ?Sized> PersistenceGateway for Box<T> {
    fn load(&self) -> Result<Configuration, GatewayError> {
        (**self).load()
    }

    fn save(&self, config: &Configuration) -> Result<(), GatewayError> {
        (**self).save(config)
    }
}

/// A file gateway when `models_file` is set, the HTTP backend otherwise.
pub fn gateway_from_settings(settings: &EditorSettings) -> Box<dyn PersistenceGateway> {
    match &settings.models_file {
        Some(path) => {
            tracing::info!(path = %path.display(), "using file gateway");
            Box::new(FileGateway::new(path))
        }
        None => {
            let gateway = HttpGateway::from_settings(settings);
            tracing::info!(url = gateway.load_url(), "using http gateway");
            Box::new(gateway)
        }
    }
}
