//! Wizard step definitions and the progress tracker.

use serde::Serialize;

use crate::error::CoreError;

/// The five steps of the application wizard, in order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum WizardStep {
    Start,
    Details,
    Documents,
    Confirmation,
    Status,
}

/// Total number of steps in the wizard.
pub const TOTAL_STEPS: usize = 5;

impl WizardStep {
    /// Every step, in order.
    pub const ALL: [WizardStep; TOTAL_STEPS] = [
        Self::Start,
        Self::Details,
        Self::Documents,
        Self::Confirmation,
        Self::Status,
    ];

    /// Convert a 0-based index to a step.
    pub fn from_index(index: usize) -> Result<Self, CoreError> {
        Self::ALL.get(index).copied().ok_or_else(|| {
            CoreError::Validation(format!(
                "Invalid step index {index}. Must be between 0 and {}",
                TOTAL_STEPS - 1
            ))
        })
    }

    /// 0-based position of the step.
    pub fn index(self) -> usize {
        match self {
            Self::Start => 0,
            Self::Details => 1,
            Self::Documents => 2,
            Self::Confirmation => 3,
            Self::Status => 4,
        }
    }

    /// Short title shown in the tracker.
    pub fn title(self) -> &'static str {
        match self {
            Self::Start => "Start",
            Self::Details => "Details",
            Self::Documents => "Documents",
            Self::Confirmation => "Confirm",
            Self::Status => "Status",
        }
    }

    /// One-line description shown under the title.
    pub fn description(self) -> &'static str {
        match self {
            Self::Start => "Begin application",
            Self::Details => "Personal information",
            Self::Documents => "Upload documents",
            Self::Confirmation => "Review details",
            Self::Status => "Application status",
        }
    }

    /// The following step, or `None` at the terminal step.
    pub fn next(self) -> Option<Self> {
        Self::ALL.get(self.index() + 1).copied()
    }

    /// The preceding step, or `None` at the first step.
    pub fn previous(self) -> Option<Self> {
        self.index().checked_sub(1).map(|i| Self::ALL[i])
    }

    pub fn is_terminal(self) -> bool {
        self == Self::Status
    }
}

// ---------------------------------------------------------------------------
// Tracker
// ---------------------------------------------------------------------------

/// Where a step sits relative to the current one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum StepProgress {
    Completed,
    Current,
    Upcoming,
}

/// One entry of the progress tracker.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TrackerEntry {
    pub step: WizardStep,
    pub title: &'static str,
    pub description: &'static str,
    pub progress: StepProgress,
}

/// Build the tracker for the given current step.
pub fn tracker(current: WizardStep) -> Vec<TrackerEntry> {
    WizardStep::ALL
        .into_iter()
        .map(|step| TrackerEntry {
            step,
            title: step.title(),
            description: step.description(),
            progress: match step.index().cmp(&current.index()) {
                std::cmp::Ordering::Less => StepProgress::Completed,
                std::cmp::Ordering::Equal => StepProgress::Current,
                std::cmp::Ordering::Greater => StepProgress::Upcoming,
            },
        })
        .collect()
}
