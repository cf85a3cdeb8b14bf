//! Core data types for notices.

use std::fmt;

use chrono::NaiveDate;
use serde::Serialize;

use crate::config::MEETING_DATE_FORMAT;

/// Index used when the portal sends no (or a non-numeric) `index` attribute.
pub const NO_INDEX: i32 = -1;

/// Audience a notice is aimed at.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Level {
    All,
    Juniors,
    Seniors,
    Other,
}

impl Level {
    /// Get the string value used by the portal.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::All => "ALL",
            Self::Juniors => "JUNIORS",
            Self::Seniors => "SENIORS",
            Self::Other => "OTHER",
        }
    }

    /// Parse from `<Level>` text.
    ///
    /// Matching is case-insensitive but otherwise exact: surrounding
    /// whitespace, year levels and any other text all map to [`Level::Other`].
    ///
    /// # Examples
    /// ```
    /// use kamar_notices::types::Level;
    ///
    /// assert_eq!(Level::from_text("juniors"), Level::Juniors);
    /// assert_eq!(Level::from_text("Year 13"), Level::Other);
    /// ```
    #[must_use]
    pub fn from_text(text: &str) -> Self {
        match text.to_uppercase().as_str() {
            "ALL" => Self::All,
            "JUNIORS" => Self::Juniors,
            "SENIORS" => Self::Seniors,
            _ => Self::Other,
        }
    }
}

impl fmt::Display for Level {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A general notice posted on the portal.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GeneralNotice {
    /// Order in which the portal stores the notice, or [`NO_INDEX`].
    pub index: i32,

    /// Audience of the notice.
    pub level: Level,

    /// Title of the notice.
    pub subject: String,

    /// Content of the notice (may be empty).
    pub body: String,

    /// Code of the teacher who posted it (e.g., "SD").
    pub teacher: String,
}

impl GeneralNotice {
    /// Create a new notice.
    #[must_use]
    pub fn new(
        index: i32,
        level: Level,
        subject: impl Into<String>,
        body: impl Into<String>,
        teacher: impl Into<String>,
    ) -> Self {
        Self {
            index,
            level,
            subject: subject.into(),
            body: body.into(),
            teacher: teacher.into(),
        }
    }
}

/// A notice announcing a meeting.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MeetingNotice {
    #[serde(flatten)]
    pub notice: GeneralNotice,

    /// Where the meeting takes place.
    pub place: String,

    /// Display date such as "Wed 1 Jan". Not guaranteed to be parseable.
    pub date: String,

    /// Meeting time (may be empty).
    pub time: String,
}

impl MeetingNotice {
    #[must_use]
    pub fn new(
        notice: GeneralNotice,
        place: impl Into<String>,
        date: impl Into<String>,
        time: impl Into<String>,
    ) -> Self {
        Self {
            notice,
            place: place.into(),
            date: date.into(),
            time: time.into(),
        }
    }

    /// Parse the display date for a given year.
    ///
    /// The portal omits the year, so the caller supplies it. Returns `None`
    /// when the text does not follow `<weekday> <day> <month>` or when the
    /// weekday does not fall on that day in `year`.
    ///
    /// # Examples
    /// ```
    /// use chrono::NaiveDate;
    /// use kamar_notices::types::{GeneralNotice, Level, MeetingNotice};
    ///
    /// let notice = GeneralNotice::new(1, Level::All, "Staff", "", "SD");
    /// let meeting = MeetingNotice::new(notice, "Library", "Wed 1 Jan", "");
    /// assert_eq!(meeting.parsed_date(2020), NaiveDate::from_ymd_opt(2020, 1, 1));
    /// assert_eq!(meeting.parsed_date(2021), None); // 1 Jan 2021 was a Friday
    /// ```
    #[must_use]
    pub fn parsed_date(&self, year: i32) -> Option<NaiveDate> {
        let text = format!("{} {year}", self.date.trim());
        let format = format!("{MEETING_DATE_FORMAT} %Y");
        NaiveDate::parse_from_str(&text, &format).ok()
    }
}

/// A notice of either kind.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum Notice {
    General(GeneralNotice),
    Meeting(MeetingNotice),
}

impl Notice {
    /// Fields shared by both kinds.
    #[must_use]
    pub fn general(&self) -> &GeneralNotice {
        match self {
            Self::General(notice) => notice,
            Self::Meeting(meeting) => &meeting.notice,
        }
    }

    #[must_use]
    pub fn index(&self) -> i32 {
        self.general().index
    }

    #[must_use]
    pub fn level(&self) -> Level {
        self.general().level
    }

    #[must_use]
    pub fn subject(&self) -> &str {
        &self.general().subject
    }

    #[must_use]
    pub fn body(&self) -> &str {
        &self.general().body
    }

    #[must_use]
    pub fn teacher(&self) -> &str {
        &self.general().teacher
    }

    #[must_use]
    pub fn is_meeting(&self) -> bool {
        matches!(self, Self::Meeting(_))
    }

    /// The meeting details, if this is a meeting notice.
    #[must_use]
    pub fn as_meeting(&self) -> Option<&MeetingNotice> {
        match self {
            Self::Meeting(meeting) => Some(meeting),
            Self::General(_) => None,
        }
    }
}

impl From<GeneralNotice> for Notice {
    fn from(notice: GeneralNotice) -> Self {
        Self::General(notice)
    }
}

impl From<MeetingNotice> for Notice {
    fn from(meeting: MeetingNotice) -> Self {
        Self::Meeting(meeting)
    }
}
