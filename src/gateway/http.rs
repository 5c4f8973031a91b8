use super::{GatewayError, PersistenceGateway};
use crate::config::EditorSettings;
use crate::document::Configuration;

/// Talks to the backend's load and save endpoints.
#[derive(Debug, Clone)]
pub struct HttpGateway {
    load_url: String,
    save_url: String,
}

impl HttpGateway {
    pub fn new(load_url: impl Into<String>, save_url: impl Into<String>) -> Self {
        Self {
            load_url: load_url.into(),
            save_url: save_url.into(),
        }
    }

    pub fn from_settings(settings: &EditorSettings) -> Self {
        Self::new(settings.load_url(), settings.save_url())
    }

    pub fn load_url(&self) -> &str {
        &self.load_url
    }

    pub fn save_url(&self) -> &str {
        &self.save_url
    }
}

fn is_success(status: u16) -> bool {
    (200..300).contains(&status)
}

fn rejection(status: u16, body: String) -> GatewayError {
    let detail = if body.trim().is_empty() {
        format!("Failed to save configuration (status {status})")
    } else {
        body
    };
    GatewayError::Rejected { status, detail }
}

impl PersistenceGateway for HttpGateway {
    fn load(&self) -> Result<Configuration, GatewayError> {
        let response = match ureq::get(&self.load_url)
            .set("accept", "application/json")
            .call()
        {
            Ok(response) => response,
            Err(ureq::Error::Status(status, _)) => {
                return Err(GatewayError::LoadStatus { status })
            }
            Err(err) => return Err(GatewayError::Transport(err.to_string())),
        };

        let status = response.status();
        if !is_success(status) {
            return Err(GatewayError::LoadStatus { status });
        }

        let config = response
            .into_json::<Configuration>()
            .map_err(|e| GatewayError::Decode(e.to_string()))?;
        tracing::debug!(url = %self.load_url, models = config.models.len(), "loaded configuration");
        Ok(config)
    }

    fn save(&self, config: &Configuration) -> Result<(), GatewayError> {
        let body = serde_json::to_string(config).map_err(GatewayError::Encode)?;
        let response = match ureq::post(&self.save_url)
            .set("content-type", "application/json")
            .send_string(&body)
        {
            Ok(response) => response,
            Err(ureq::Error::Status(status, response)) => {
                let body = response.into_string().unwrap_or_default();
                return Err(rejection(status, body));
            }
            Err(err) => return Err(GatewayError::Transport(err.to_string())),
        };

        let status = response.status();
        if !is_success(status) {
            let body = response.into_string().unwrap_or_default();
            return Err(rejection(status, body));
        }
        tracing::debug!(url = %self.save_url, "saved configuration");
        Ok(())
    }
}
