//! Dialog stages.
//!
//! The conversation is strictly linear. Every input stage may loop on itself:
//! rejected input re-prompts, and the date stage also loops when suggestion
//! retrieval fails or comes back empty.

use std::fmt;

use crate::domain::foundation::StateMachine;

/// Where a scheduling conversation currently is.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum DialogStage {
    /// Waiting for the meeting subject.
    #[default]
    AwaitingSubject,

    /// Waiting for the meeting length in minutes.
    AwaitingDuration,

    /// Waiting for a comma-separated attendee list.
    AwaitingAttendees,

    /// Waiting for the day to search.
    AwaitingDate,

    /// Candidate slots are listed; waiting for the user's pick.
    AwaitingSlotSelection,

    /// Meeting created. Terminal.
    Booked,

    /// Booking was attempted and failed. Terminal.
    Failed,
}

impl DialogStage {
    /// Returns true if this stage consumes user input.
    pub fn accepts_input(&self) -> bool {
        !self.is_terminal()
    }

    /// The question asked when entering (or re-entering) this stage.
    pub fn prompt(&self) -> &'static str {
        match self {
            Self::AwaitingSubject => "Please enter the subject of the meeting.",
            Self::AwaitingDuration => "Please enter the duration of the meeting in minutes.",
            Self::AwaitingAttendees => {
                "Please enter emails of the participants separated by comma."
            }
            Self::AwaitingDate => {
                "Please enter when you want to have the meeting. e.g. 2017-10-10"
            }
            Self::AwaitingSlotSelection => "Please enter the number of the slot to book.",
            Self::Booked => "Your meeting is booked.",
            Self::Failed => "This conversation has ended.",
        }
    }

    /// Short label for log lines.
    pub fn label(&self) -> &'static str {
        match self {
            Self::AwaitingSubject => "subject",
            Self::AwaitingDuration => "duration",
            Self::AwaitingAttendees => "attendees",
            Self::AwaitingDate => "date",
            Self::AwaitingSlotSelection => "slot_selection",
            Self::Booked => "booked",
            Self::Failed => "failed",
        }
    }
}

impl StateMachine for DialogStage {
    fn can_transition_to(&self, target: &Self) -> bool {
        self.valid_transitions().contains(target)
    }

    fn valid_transitions(&self) -> Vec<Self> {
        use DialogStage::*;
        match self {
            AwaitingSubject => vec![AwaitingSubject, AwaitingDuration],
            AwaitingDuration => vec![AwaitingDuration, AwaitingAttendees],
            AwaitingAttendees => vec![AwaitingAttendees, AwaitingDate],
            AwaitingDate => vec![AwaitingDate, AwaitingSlotSelection],
            AwaitingSlotSelection => vec![AwaitingSlotSelection, Booked, Failed],
            Booked => vec![],
            Failed => vec![],
        }
    }
}

impl fmt::Display for DialogStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}
