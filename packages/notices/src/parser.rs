//! Parsing of `GetNotices` responses.
//!
//! A successful response holds `<General>` and `<Meeting>` elements, each with
//! an optional `index` attribute and one child element per field:
//!
//! ```xml
//! <NoticesResults>
//!   <Notices>
//!     <General index="0">
//!       <Level>ALL</Level>
//!       <Subject>Test 1</Subject>
//!       <Body></Body>
//!       <Teacher>SD</Teacher>
//!     </General>
//!     <Meeting index="1">
//!       <Level>Seniors</Level>
//!       <Subject>Prefects</Subject>
//!       <Body>Quick catch up</Body>
//!       <Teacher>AB</Teacher>
//!       <PlaceMeet>Room 12</PlaceMeet>
//!       <DateMeet>Wed 1 Jan</DateMeet>
//!       <TimeMeet>1:30pm</TimeMeet>
//!     </Meeting>
//!   </Notices>
//! </NoticesResults>
//! ```
//!
//! A failed request returns an `<Error>` element instead.

use roxmltree::{Document, Node};

use crate::error::Result;
use crate::notices::Notices;
use crate::types::{GeneralNotice, Level, MeetingNotice, Notice, NO_INDEX};
use crate::xml::{element_children, elements_named, get_tag_name, text_content};

pub const ERROR_TAG: &str = "Error";
pub const GENERAL_TAG: &str = "General";
pub const MEETING_TAG: &str = "Meeting";

/// Parse a raw response body.
///
/// # Returns
/// The populated [`Notices`], or [`NoticesError::XmlParse`](crate::error::NoticesError::XmlParse)
/// if the body is not well-formed XML.
pub fn parse_response(xml: &str, date: &str) -> Result<Notices> {
    let doc = Document::parse(xml)?;
    Ok(parse_notices(&doc, date))
}

/// Extract the notices, or the portal's error message, from a response document.
pub fn parse_notices(doc: &Document<'_>, date: &str) -> Notices {
    let mut notices = Notices::new(date);

    if let Some(error) = elements_named(doc, ERROR_TAG).first() {
        let message = text_content(*error);
        tracing::warn!(error = %message, date, "Portal reported an error");
        notices.set_error(message);
        return notices;
    }

    let general = elements_named(doc, GENERAL_TAG);
    let meetings = elements_named(doc, MEETING_TAG);

    let parsed: Vec<Notice> = select_nodes(&general, &meetings)
        .into_iter()
        .filter_map(parse_notice)
        .collect();

    tracing::debug!(
        date,
        general = general.len(),
        meetings = meetings.len(),
        parsed = parsed.len(),
        "Parsed notices"
    );
    notices.set_notices(parsed);
    notices
}

/// Pick the nodes to parse from the `General` and `Meeting` sequences.
///
/// Position `i` runs over `0..general.len() + meetings.len()`. Positions below
/// `general.len()` take `general[i]`; the rest take `meetings[i]`, using the
/// combined position rather than an offset into `meetings`. Positions past
/// the end of the chosen sequence select nothing. With one `General` and two
/// `Meeting` elements this yields `general[0]` and `meetings[1]`.
pub fn select_nodes<'a, 'input>(
    general: &[Node<'a, 'input>],
    meetings: &[Node<'a, 'input>],
) -> Vec<Node<'a, 'input>> {
    (0..general.len() + meetings.len())
        .filter_map(|i| {
            let nodes = if i >= general.len() { meetings } else { general };
            let node = nodes.get(i).copied();
            if node.is_none() {
                tracing::debug!(position = i, "No notice node at position");
            }
            node
        })
        .collect()
}

/// Parse a single `<General>` or `<Meeting>` element.
///
/// Returns `None` when a required child element is missing. Meetings also
/// need `PlaceMeet`, `DateMeet` and `TimeMeet`.
pub fn parse_notice(node: Node<'_, '_>) -> Option<Notice> {
    if !node.is_element() {
        return None;
    }
    let tag = get_tag_name(node);
    let is_meeting = tag == MEETING_TAG;
    let index = node
        .attribute("index")
        .and_then(|value| value.parse().ok())
        .unwrap_or(NO_INDEX);

    let mut level = None;
    let mut subject = None;
    let mut body = None;
    let mut teacher = None;
    let mut place = None;
    let mut date = None;
    let mut time = None;

    for child in element_children(node) {
        let slot = match get_tag_name(child) {
            "Level" => {
                level = Some(Level::from_text(&text_content(child)));
                continue;
            }
            "Subject" => &mut subject,
            "Body" => &mut body,
            "Teacher" => &mut teacher,
            "PlaceMeet" => &mut place,
            "DateMeet" => &mut date,
            "TimeMeet" => &mut time,
            _ => continue,
        };
        *slot = Some(text_content(child));
    }

    let (Some(level), Some(subject), Some(body), Some(teacher)) = (level, subject, body, teacher)
    else {
        tracing::debug!(tag, index, "Dropping notice with missing fields");
        return None;
    };
    let notice = GeneralNotice::new(index, level, subject, body, teacher);

    if !is_meeting {
        return Some(notice.into());
    }

    let (Some(place), Some(date), Some(time)) = (place, date, time) else {
        tracing::debug!(tag, index, "Dropping meeting without place, date or time");
        return None;
    };
    Some(MeetingNotice::new(notice, place, date, time).into())
}
