//! Loader for the XML project document.
//!
//! The document lists one `<project>` element per tracker project:
//!
//! ```xml
//! <projects>
//!   <project>
//!     <ID>10231</ID>
//!     <Critical>1</Critical>
//!     <Severe>3</Severe>
//!     <Moderate>7</Moderate>
//!     <Minor>None</Minor>
//!     <MoreInformation>5</MoreInformation>
//!     <comment_config>external</comment_config>
//!     <logger>INFO</logger>
//!     <mailID>support-leads@example.com</mailID>
//!   </project>
//! </projects>
//! ```
//!
//! Missing and empty elements load as `None`. Interpreting them (absent vs.
//! disabled) is left to validation.

use std::path::Path;

use quick_xml::events::Event;
use quick_xml::Reader;
use reminder_models::PriorityClass;
use tracing::{debug, warn};

use crate::error::ConfigError;

const PROJECT_TAG: &str = "project";

/// Unvalidated settings for one project, as written in the document.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RawProjectConfig {
    pub project_id: Option<String>,
    pub critical: Option<String>,
    pub severe: Option<String>,
    pub moderate: Option<String>,
    pub minor: Option<String>,
    pub more_information: Option<String>,
    pub comment_config: Option<String>,
    pub logger: Option<String>,
    /// Every non-empty `mailID` entry, in document order.
    pub recipients: Vec<String>,
}

impl RawProjectConfig {
    /// Raw threshold text for a class.
    pub fn threshold(&self, class: PriorityClass) -> Option<&str> {
        let value = match class {
            PriorityClass::Critical => &self.critical,
            PriorityClass::Severe => &self.severe,
            PriorityClass::Moderate => &self.moderate,
            PriorityClass::Minor => &self.minor,
            PriorityClass::MoreInformation => &self.more_information,
        };
        value.as_deref()
    }

    /// Project id for log lines, `None` when absent.
    pub fn display_id(&self) -> &str {
        self.project_id.as_deref().unwrap_or("None")
    }

    /// Requested log verbosity, if the `logger` field names a known level.
    pub fn log_verbosity(&self) -> Option<LogVerbosity> {
        let requested = self.logger.as_deref()?;
        let verbosity = LogVerbosity::parse(requested);
        if verbosity.is_none() {
            warn!(project_id = %self.display_id(), logger = %requested, "Logger level is not set properly");
        }
        verbosity
    }

    fn set_field(&mut self, tag: &str, value: &str) {
        if value.is_empty() {
            return;
        }

        let slot = match tag {
            "ID" => &mut self.project_id,
            "Critical" => &mut self.critical,
            "Severe" => &mut self.severe,
            "Moderate" => &mut self.moderate,
            "Minor" => &mut self.minor,
            "MoreInformation" => &mut self.more_information,
            "comment_config" => &mut self.comment_config,
            "logger" => &mut self.logger,
            "mailID" => {
                self.recipients.push(value.to_string());
                return;
            }
            other => {
                debug!(tag = %other, "Ignoring unknown project element");
                return;
            }
        };

        // First occurrence wins.
        if slot.is_none() {
            *slot = Some(value.to_string());
        }
    }
}

/// Log verbosity a project can request.
///
/// Ordered from least to most verbose so the aggregate is a plain `max`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum LogVerbosity {
    Error,
    Warn,
    Info,
    Debug,
}

impl LogVerbosity {
    /// Parses `DEBUG`, `INFO`, `WARNING`, `ERROR` or `CRITICAL` (any case).
    ///
    /// `CRITICAL` has no tracing counterpart and maps to `Error`.
    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_ascii_uppercase().as_str() {
            "DEBUG" => Some(LogVerbosity::Debug),
            "INFO" => Some(LogVerbosity::Info),
            "WARNING" | "WARN" => Some(LogVerbosity::Warn),
            "ERROR" | "CRITICAL" => Some(LogVerbosity::Error),
            _ => None,
        }
    }

    /// The matching tracing level.
    pub fn as_level(self) -> tracing::Level {
        match self {
            LogVerbosity::Error => tracing::Level::ERROR,
            LogVerbosity::Warn => tracing::Level::WARN,
            LogVerbosity::Info => tracing::Level::INFO,
            LogVerbosity::Debug => tracing::Level::DEBUG,
        }
    }

    /// Most verbose level requested by any project, `Error` if none asks.
    pub fn aggregate(projects: &[RawProjectConfig]) -> Self {
        projects
            .iter()
            .filter_map(RawProjectConfig::log_verbosity)
            .max()
            .unwrap_or(LogVerbosity::Error)
    }
}

/// Parse a project document.
///
/// # Errors
/// Returns [`ConfigError::Xml`] for malformed XML and
/// [`ConfigError::MissingRoot`] when there is no element at all.
pub fn parse_document(xml: &str) -> Result<Vec<RawProjectConfig>, ConfigError> {
    let mut reader = Reader::from_str(xml);
    reader.config_mut().trim_text(true);

    let mut projects = Vec::new();
    let mut current: Option<RawProjectConfig> = None;
    let mut field: Option<String> = None;
    let mut text = String::new();
    let mut saw_root = false;

    loop {
        match reader.read_event() {
            Ok(Event::Start(e)) => {
                saw_root = true;
                let name = String::from_utf8_lossy(e.local_name().as_ref()).into_owned();
                if name == PROJECT_TAG {
                    current = Some(RawProjectConfig::default());
                } else if current.is_some() {
                    field = Some(name);
                    text.clear();
                }
            }
            Ok(Event::Empty(e)) => {
                saw_root = true;
                if e.local_name().as_ref() == PROJECT_TAG.as_bytes() {
                    projects.push(RawProjectConfig::default());
                }
            }
            Ok(Event::Text(e)) => {
                if field.is_some() {
                    let value = e.unescape().map_err(|err| xml_error(&reader, err))?;
                    text.push_str(&value);
                }
            }
            Ok(Event::CData(e)) => {
                if field.is_some() {
                    text.push_str(&String::from_utf8_lossy(&e));
                }
            }
            Ok(Event::End(e)) => {
                if e.local_name().as_ref() == PROJECT_TAG.as_bytes() {
                    if let Some(project) = current.take() {
                        projects.push(project);
                    }
                    field = None;
                } else if let (Some(project), Some(tag)) = (current.as_mut(), field.take()) {
                    project.set_field(&tag, text.trim());
                    text.clear();
                }
            }
            Ok(Event::Eof) => break,
            Err(err) => return Err(xml_error(&reader, err)),
            _ => {}
        }
    }

    if !saw_root {
        return Err(ConfigError::MissingRoot);
    }

    debug!(count = projects.len(), "Parsed project document");
    Ok(projects)
}

/// Read and parse a project document from disk.
///
/// # Errors
/// Returns [`ConfigError::Io`] if the file cannot be read, otherwise the
/// errors of [`parse_document`].
pub fn load_document(path: &Path) -> Result<Vec<RawProjectConfig>, ConfigError> {
    let xml = std::fs::read_to_string(path)?;
    parse_document(&xml)
}

fn xml_error(reader: &Reader<&[u8]>, err: impl std::fmt::Display) -> ConfigError {
    ConfigError::Xml {
        position: reader.buffer_position(),
        message: err.to_string(),
    }
}
