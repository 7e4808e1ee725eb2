use std::io;
use thiserror::Error;

/// Failure while querying one of the platform collaborators.
#[derive(Debug, Error)]
pub enum PlatformError {
    #[error("permission denied: {0}")]
    PermissionDenied(String),
    #[error("service unavailable: {0}")]
    Unavailable(String),
    #[error("location provider not found: {0}")]
    ProviderNotFound(String),
    #[error("`{command}` exited with status {status}: {stderr}")]
    Command {
        command: String,
        status: i32,
        stderr: String,
    },
    #[error("unexpected output from `{command}`: {output}")]
    Parse { command: String, output: String },
    #[error(transparent)]
    Io(#[from] io::Error),
}

/// Failure that escaped every per-check guard. Callers should treat this as
/// "unknown", not as a genuine location.
#[derive(Debug, Error)]
pub enum DetectError {
    #[error("Error checking mock location: could not read platform tier: {0}")]
    Tier(#[source] PlatformError),
    #[error("Error checking mock location: {message}")]
    Unexpected {
        message: String,
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },
}

/// A collaborator panicked while a check was running.
#[derive(Debug, Error)]
#[error("detection panicked: {0}")]
pub struct Panicked(pub String);

#[derive(Debug, Error)]
pub enum DenylistError {
    #[error("failed to read denylist: {0}")]
    Io(#[from] io::Error),
    #[error("invalid denylist: {0}")]
    Parse(#[from] serde_json::Error),
}
