//! Validated per-project settings.

use serde::{Deserialize, Serialize};

use crate::priority::PriorityClass;

/// Grace period for one priority class.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Threshold {
    /// Tickets of this class are never flagged.
    Disabled,
    /// Calendar days allowed without qualifying activity (1..=99).
    Days(u8),
}

impl Threshold {
    /// Returns the day count, or `None` when disabled.
    pub fn days(self) -> Option<u8> {
        match self {
            Threshold::Disabled => None,
            Threshold::Days(days) => Some(days),
        }
    }

    /// Returns true if this threshold never triggers.
    pub fn is_disabled(self) -> bool {
        matches!(self, Threshold::Disabled)
    }
}

/// One threshold per priority class. Every class is always present.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Thresholds {
    pub critical: Threshold,
    pub severe: Threshold,
    pub moderate: Threshold,
    pub minor: Threshold,
    pub more_information: Threshold,
}

impl Thresholds {
    /// Creates a set where every class uses the same threshold.
    pub fn uniform(threshold: Threshold) -> Self {
        Self {
            critical: threshold,
            severe: threshold,
            moderate: threshold,
            minor: threshold,
            more_information: threshold,
        }
    }

    /// Looks up the threshold for a class.
    pub fn get(&self, class: PriorityClass) -> Threshold {
        match class {
            PriorityClass::Critical => self.critical,
            PriorityClass::Severe => self.severe,
            PriorityClass::Moderate => self.moderate,
            PriorityClass::Minor => self.minor,
            PriorityClass::MoreInformation => self.more_information,
        }
    }

    /// Returns a copy with one class replaced.
    pub fn with(mut self, class: PriorityClass, threshold: Threshold) -> Self {
        match class {
            PriorityClass::Critical => self.critical = threshold,
            PriorityClass::Severe => self.severe = threshold,
            PriorityClass::Moderate => self.moderate = threshold,
            PriorityClass::Minor => self.minor = threshold,
            PriorityClass::MoreInformation => self.more_information = threshold,
        }
        self
    }
}

/// Which comments reset the SLA clock.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CommentPolicy {
    /// Only internal (agent-only) comments count.
    Internal,
    /// Only public comments count.
    External,
    /// Any comment counts.
    Any,
}

/// Settings for one project, produced by validation and never mutated.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProjectConfig {
    /// Numeric tracker project id.
    pub project_id: String,

    /// Grace period per priority class.
    pub thresholds: Thresholds,

    /// Which comments count as qualifying activity.
    pub comment_policy: CommentPolicy,

    /// Notification addresses, in document order, without duplicates.
    pub recipients: Vec<String>,
}
