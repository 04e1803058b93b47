//! Priority classes used for SLA thresholds.

use serde::{Deserialize, Serialize};
use std::fmt;

/// A priority class with its own SLA threshold.
///
/// The first four mirror the tracker's severity levels. `MoreInformation`
/// is synthetic: tickets waiting on the reporter are routed to it by status,
/// not by priority.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PriorityClass {
    Critical,
    Severe,
    Moderate,
    Minor,
    MoreInformation,
}

impl PriorityClass {
    /// All classes, in the order their thresholds are validated.
    pub const ALL: [PriorityClass; 5] = [
        PriorityClass::Critical,
        PriorityClass::Severe,
        PriorityClass::Moderate,
        PriorityClass::Minor,
        PriorityClass::MoreInformation,
    ];

    /// Maps a tracker priority name onto a class.
    ///
    /// Accepts both the bare name (`Critical`) and the numbered form used by
    /// the tracker (`1 - Critical`), case-insensitively. Only the four
    /// severity levels can be reached this way.
    pub fn from_tracker_name(name: &str) -> Option<Self> {
        let bare = match name.split_once(" - ") {
            Some((rank, rest)) if rank.trim().chars().all(|c| c.is_ascii_digit()) => rest,
            _ => name,
        };

        match bare.trim().to_ascii_lowercase().as_str() {
            "critical" => Some(PriorityClass::Critical),
            "severe" => Some(PriorityClass::Severe),
            "moderate" => Some(PriorityClass::Moderate),
            "minor" => Some(PriorityClass::Minor),
            _ => None,
        }
    }

    /// Name of the element holding this class's threshold in the project document.
    pub fn field_name(self) -> &'static str {
        match self {
            PriorityClass::Critical => "Critical",
            PriorityClass::Severe => "Severe",
            PriorityClass::Moderate => "Moderate",
            PriorityClass::Minor => "Minor",
            PriorityClass::MoreInformation => "MoreInformation",
        }
    }

    /// Human label for reports and logs.
    pub fn label(self) -> &'static str {
        match self {
            PriorityClass::MoreInformation => "More Information",
            other => other.field_name(),
        }
    }
}

impl fmt::Display for PriorityClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}
