//! The notices returned for one requested date.

use serde::Serialize;

use crate::types::{MeetingNotice, Notice};

/// Outcome of a single notices request.
///
/// Holds either the parsed notices or the error message the portal sent
/// back in an `<Error>` element.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Notices {
    date: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    notices: Option<Vec<Notice>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    error_message: Option<String>,
}

impl Notices {
    /// An empty container for `date`, before any response is applied.
    pub fn new(date: impl Into<String>) -> Self {
        Self {
            date: date.into(),
            notices: None,
            error_message: None,
        }
    }

    pub(crate) fn set_notices(&mut self, notices: Vec<Notice>) {
        self.notices = Some(notices);
    }

    /// Record a portal error. The notice list is set to empty since none
    /// were parsed.
    pub(crate) fn set_error(&mut self, message: impl Into<String>) {
        self.error_message = Some(message.into());
        self.notices = Some(Vec::new());
    }

    /// The date string this request was made for.
    #[must_use]
    pub fn date(&self) -> &str {
        &self.date
    }

    /// All notices, in the order they were parsed.
    #[must_use]
    pub fn notices(&self) -> Option<&[Notice]> {
        self.notices.as_deref()
    }

    /// Notices matching `filter`. Empty when no list was populated.
    pub fn filter<F>(&self, mut filter: F) -> Vec<&Notice>
    where
        F: FnMut(&Notice) -> bool,
    {
        self.notices
            .iter()
            .flatten()
            .filter(|&notice| filter(notice))
            .collect()
    }

    /// Only the meeting notices.
    #[must_use]
    pub fn meetings(&self) -> Vec<&MeetingNotice> {
        self.notices
            .iter()
            .flatten()
            .filter_map(Notice::as_meeting)
            .collect()
    }

    /// The error message reported by the portal, if any.
    #[must_use]
    pub fn error_message(&self) -> Option<&str> {
        self.error_message.as_deref()
    }

    /// `true` unless both an error message and a notice list are present.
    ///
    /// A container that was never populated, or that holds zero notices
    /// without an error, counts as a success.
    #[must_use]
    pub fn is_success(&self) -> bool {
        self.error_message.is_none() || self.notices.is_none()
    }

    /// Consume the container, returning the notice list.
    #[must_use]
    pub fn into_notices(self) -> Option<Vec<Notice>> {
        self.notices
    }
}
