use super::{GatewayError, PersistenceGateway};
use crate::document::{validate_for_persistence, Configuration};
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::time::{SystemTime, UNIX_EPOCH};

/// Reads and writes `models.json` directly, applying the checks the backend
/// runs before it persists a document.
#[derive(Debug, Clone)]
pub struct FileGateway {
    path: PathBuf,
}

impl FileGateway {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl PersistenceGateway for FileGateway {
    fn load(&self) -> Result<Configuration, GatewayError> {
        let raw = fs::read_to_string(&self.path).map_err(|source| GatewayError::Read {
            path: self.path.display().to_string(),
            source,
        })?;
        Configuration::from_json(&raw).map_err(|source| GatewayError::Parse {
            path: self.path.display().to_string(),
            source,
        })
    }

    fn save(&self, config: &Configuration) -> Result<(), GatewayError> {
        validate_for_persistence(config)?;
        let mut body = serde_json::to_vec_pretty(config).map_err(GatewayError::Encode)?;
        body.push(b'\n');
        write_atomically(&self.path, &body).map_err(|source| GatewayError::Write {
            path: self.path.display().to_string(),
            source,
        })?;
        tracing::debug!(path = %self.path.display(), "wrote configuration file");
        Ok(())
    }
}

/// Writes next to the target and renames over it, so readers never observe a
/// half-written document.
fn write_atomically(path: &Path, content: &[u8]) -> std::io::Result<()> {
    let parent = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };
    let tmp_path = parent.join(format!(
        ".{}.tmp-{}-{}",
        path.file_name()
            .and_then(|name| name.to_str())
            .unwrap_or("models.json"),
        std::process::id(),
        SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|elapsed| elapsed.as_nanos())
            .unwrap_or(0),
    ));

    let written = fs::OpenOptions::new()
        .create_new(true)
        .write(true)
        .open(&tmp_path)
        .and_then(|mut file| {
            file.write_all(content)?;
            file.sync_all()
        });
    if let Err(err) = written.and_then(|()| fs::rename(&tmp_path, path)) {
        let _ = fs::remove_file(&tmp_path);
        return Err(err);
    }
    Ok(())
}
