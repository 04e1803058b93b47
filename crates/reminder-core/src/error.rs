//! Error types for the reminder core.

use reminder_models::PriorityClass;
use thiserror::Error;

/// The project document could not be read or the environment is incomplete.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// The document could not be read.
    #[error("cannot read project document: {0}")]
    Io(#[from] std::io::Error),

    /// The document is not well-formed XML.
    #[error("cannot parse project document at byte {position}: {message}")]
    Xml { position: u64, message: String },

    /// The document has no root element.
    #[error("project document has no root element")]
    MissingRoot,

    /// A required environment variable is not set.
    #[error("environment variable {0} is not set")]
    MissingEnv(&'static str),

    /// An environment variable has an unusable value.
    #[error("environment variable {name} is invalid: {message}")]
    InvalidEnv { name: &'static str, message: String },
}

/// Why a project's settings were rejected.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum RejectionReason {
    #[error("invalid project id")]
    InvalidProjectId,

    #[error("invalid recipient list")]
    InvalidRecipients,

    #[error("invalid days given for {0}")]
    InvalidThreshold(PriorityClass),

    #[error("invalid comment policy")]
    InvalidCommentPolicy,
}

/// A project that failed validation.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("project {project_id}: {reason}")]
pub struct ValidationFailure {
    /// Project id as written in the document.
    pub project_id: String,
    pub reason: RejectionReason,
}

/// A tracker timestamp that could not be parsed.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("invalid tracker timestamp '{0}'")]
pub struct TimestampError(pub String);

/// A remote call to the tracker failed.
#[derive(Error, Debug)]
pub enum TrackerError {
    /// The request could not be sent or the connection failed.
    #[error("tracker request failed: {0}")]
    Request(String),

    /// The tracker answered with a non-success status.
    #[error("tracker returned {status}: {body}")]
    Status { status: u16, body: String },

    /// The response body did not have the expected shape.
    #[error("cannot decode tracker response: {0}")]
    Decode(String),

    /// A timestamp in the response could not be parsed.
    #[error(transparent)]
    Timestamp(#[from] TimestampError),
}

/// A report could not be delivered.
#[derive(Error, Debug)]
pub enum DeliveryError {
    /// A sender or recipient address is malformed.
    #[error("invalid address '{address}': {message}")]
    Address { address: String, message: String },

    /// The message could not be assembled.
    #[error("cannot build message: {0}")]
    Build(String),

    /// The mail server refused or could not be reached.
    #[error("mail transport failed: {0}")]
    Transport(String),
}

/// Triage of a project stopped before the ticket stream ended.
#[derive(Error, Debug)]
pub enum TriageError {
    #[error("tracker query failed: {0}")]
    Tracker(#[from] TrackerError),
}

/// Result type alias for core operations.
pub type Result<T, E = TriageError> = std::result::Result<T, E>;
