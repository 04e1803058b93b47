//! Validation of raw project settings.
//!
//! Validation is fail-fast: the first invalid field rejects the project, in
//! the order project id, recipients, thresholds (Critical to
//! MoreInformation), comment policy.

use std::sync::LazyLock;

use regex::Regex;
use reminder_models::{CommentPolicy, PriorityClass, ProjectConfig, Threshold, Thresholds};
use tracing::{error, info};

use crate::document::RawProjectConfig;
use crate::error::{RejectionReason, ValidationFailure};

/// Literal that disables a threshold.
pub const DISABLED_SENTINEL: &str = "None";

/// One or two digits.
static DAYS_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[0-9]{1,2}$").expect("Invalid days regex"));

/// Validate one project's raw settings.
///
/// # Errors
/// Returns the first [`RejectionReason`] encountered.
pub fn validate(raw: &RawProjectConfig) -> Result<ProjectConfig, RejectionReason> {
    let project_id = raw
        .project_id
        .as_deref()
        .map(str::trim)
        .filter(|id| !id.is_empty() && id.chars().all(|c| c.is_ascii_digit()))
        .ok_or(RejectionReason::InvalidProjectId)?
        .to_string();

    let recipients = parse_recipients(&raw.recipients);
    if recipients.is_empty() {
        return Err(RejectionReason::InvalidRecipients);
    }

    let mut thresholds = Thresholds::uniform(Threshold::Disabled);
    for class in PriorityClass::ALL {
        let threshold = parse_threshold(raw.threshold(class))
            .ok_or(RejectionReason::InvalidThreshold(class))?;
        thresholds = thresholds.with(class, threshold);
    }

    let comment_policy = raw
        .comment_config
        .as_deref()
        .and_then(parse_comment_policy)
        .ok_or(RejectionReason::InvalidCommentPolicy)?;

    Ok(ProjectConfig {
        project_id,
        thresholds,
        comment_policy,
        recipients,
    })
}

/// Parse a threshold field.
///
/// Absent and `None` disable the class. Otherwise the value must be one or
/// two digits; zero is rejected rather than read as "due immediately".
pub fn parse_threshold(value: Option<&str>) -> Option<Threshold> {
    let Some(value) = value.map(str::trim) else {
        return Some(Threshold::Disabled);
    };

    if value.eq_ignore_ascii_case(DISABLED_SENTINEL) {
        return Some(Threshold::Disabled);
    }

    if !DAYS_REGEX.is_match(value) {
        return None;
    }

    match value.parse::<u8>() {
        Ok(0) | Err(_) => None,
        Ok(days) => Some(Threshold::Days(days)),
    }
}

/// Parse a comment policy (`internal`, `external`, `all` or `any`, any case).
pub fn parse_comment_policy(value: &str) -> Option<CommentPolicy> {
    match value.trim().to_ascii_lowercase().as_str() {
        "internal" => Some(CommentPolicy::Internal),
        "external" => Some(CommentPolicy::External),
        "all" | "any" => Some(CommentPolicy::Any),
        _ => None,
    }
}

/// Split recipient entries on `;`, trimming and dropping blanks and repeats.
pub fn parse_recipients(entries: &[String]) -> Vec<String> {
    let mut recipients: Vec<String> = Vec::new();
    for address in entries.iter().flat_map(|entry| entry.split(';')) {
        let address = address.trim();
        if address.is_empty() || address.eq_ignore_ascii_case(DISABLED_SENTINEL) {
            continue;
        }
        if !recipients.iter().any(|known| known == address) {
            recipients.push(address.to_string());
        }
    }
    recipients
}

/// Validate every project in document order.
///
/// Projects without an `ID` element are skipped with an info log. Each
/// remaining project yields its own result so the caller decides whether one
/// failure aborts the run.
pub fn validate_projects(
    raws: &[RawProjectConfig],
) -> Vec<Result<ProjectConfig, ValidationFailure>> {
    raws.iter()
        .filter(|raw| {
            if raw.project_id.is_none() {
                info!("No Id for the project");
                return false;
            }
            true
        })
        .map(|raw| {
            info!(project_id = %raw.display_id(), "Validating project configuration");
            validate(raw).map_err(|reason| {
                error!(project_id = %raw.display_id(), %reason, "Invalid configuration");
                ValidationFailure {
                    project_id: raw.display_id().to_string(),
                    reason,
                }
            })
        })
        .collect()
}
