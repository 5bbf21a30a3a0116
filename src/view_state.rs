//! Page-wide UI state. Owned by the root component and changed only through
//! [`ViewAction`] messages.

use serde::{Deserialize, Serialize};

use crate::contact::{ContactField, ContactFields, Submission, SubmissionEvent, SubmitOutcome, SubmitTicket};
use crate::content::PROJECTS;
use crate::navigation::SectionId;
use crate::scroll::ScrollReading;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    #[default]
    Light,
    Dark,
}

impl Theme {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Light => "light",
            Self::Dark => "dark",
        }
    }

    pub fn toggled(self) -> Self {
        match self {
            Self::Light => Self::Dark,
            Self::Dark => Self::Light,
        }
    }

    pub fn toggle_label(self) -> String {
        let next = self.toggled().as_str();
        format!("Switch to {next} theme")
    }

    pub fn pressed(self) -> bool {
        matches!(self, Self::Dark)
    }

    /// Icon for the toggle: the sun offers light mode, the moon dark mode.
    pub fn icon(self) -> &'static str {
        match self {
            Self::Light => "☾",
            Self::Dark => "☀",
        }
    }
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ViewState {
    pub theme: Theme,
    pub is_scrolled: bool,
    pub active_section: SectionId,
    pub hovered_project: Option<usize>,
    pub submission: Submission,
    pub contact: ContactFields,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ViewAction {
    ToggleTheme,
    Scrolled(ScrollReading),
    Navigate(SectionId),
    HoverProject(Option<usize>),
    EditContact(ContactField, String),
    SubmitStarted(SubmitTicket),
    Submission(SubmissionEvent),
}

impl ViewState {
    pub fn submit_in_flight(&self) -> bool {
        self.submission.in_flight()
    }

    pub fn submit_succeeded(&self) -> bool {
        self.submission.succeeded()
    }

    /// Applies `action` and reports whether anything changed.
    pub fn apply(&mut self, action: ViewAction) -> bool {
        match action {
            ViewAction::ToggleTheme => {
                self.theme = self.theme.toggled();
                true
            }
            ViewAction::Scrolled(reading) => {
                let changed = self.is_scrolled != reading.is_scrolled
                    || self.active_section != reading.active_section;
                self.is_scrolled = reading.is_scrolled;
                self.active_section = reading.active_section;
                changed
            }
            ViewAction::Navigate(id) => replace(&mut self.active_section, id),
            ViewAction::HoverProject(index) => {
                let index = index.filter(|index| *index < PROJECTS.len());
                replace(&mut self.hovered_project, index)
            }
            ViewAction::EditContact(field, value) => {
                if self.contact.get(field) == value {
                    return false;
                }
                self.contact.set(field, value);
                true
            }
            ViewAction::SubmitStarted(ticket) => self.submission.begin(ticket),
            ViewAction::Submission(SubmissionEvent::Settled { ticket, outcome }) => {
                if !self.submission.settle(ticket, outcome) {
                    return false;
                }
                if outcome == SubmitOutcome::Delivered {
                    self.contact = ContactFields::default();
                }
                true
            }
            ViewAction::Submission(SubmissionEvent::SuccessExpired(ticket)) => {
                self.submission.expire(ticket)
            }
        }
    }
}

fn replace<T: PartialEq>(slot: &mut T, value: T) -> bool {
    if *slot == value {
        return false;
    }
    *slot = value;
    true
}
