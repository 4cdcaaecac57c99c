use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};

use super::SpecialistId;

/// Display format for message dates, e.g. `03/14/24`.
pub const MESSAGE_DATE_FORMAT: &str = "%m/%d/%y";
/// Display format for message times, e.g. `9:05 AM`.
pub const MESSAGE_TIME_FORMAT: &str = "%-I:%M %p";

/// Parse a `MM/DD/YY` message date.
pub fn parse_message_date(date: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(date.trim(), MESSAGE_DATE_FORMAT).ok()
}

/// Parse an `h:mm AM` timestamp into minutes since midnight.
pub fn parse_message_time(timestamp: &str) -> Option<u32> {
    let (clock, period) = timestamp.trim().split_once(' ')?;
    let (hours, minutes) = clock.split_once(':')?;
    let hours: u32 = hours.parse().ok()?;
    let minutes: u32 = minutes.parse().ok()?;

    if !(1..=12).contains(&hours) || minutes > 59 {
        return None;
    }

    let hour24 = match period.to_ascii_uppercase().as_str() {
        "AM" if hours == 12 => 0,
        "AM" => hours,
        "PM" if hours == 12 => 12,
        "PM" => hours + 12,
        _ => return None,
    };

    Some(hour24 * 60 + minutes)
}

/// Chronological sort key for a (date, time) pair. Unparseable parts sort first.
pub fn chronological_key(date: &str, timestamp: &str) -> (Option<NaiveDate>, u32) {
    (
        parse_message_date(date),
        parse_message_time(timestamp).unwrap_or(0),
    )
}

/// Format a local datetime into the (timestamp, date) display pair.
pub fn format_message_stamp(at: NaiveDateTime) -> (String, String) {
    (
        at.format(MESSAGE_TIME_FORMAT).to_string(),
        at.format(MESSAGE_DATE_FORMAT).to_string(),
    )
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FileAttachment {
    pub file_name: String,
    pub original_name: String,
    pub file_type: String,
    pub file_size: u64,
}

/// A message in the interactive chat.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChatMessage {
    pub id: String,
    pub user_id: String,
    pub is_from_user: bool,
    pub sender_id: Option<SpecialistId>,
    pub sender_name: Option<String>,
    pub sender_role: Option<String>,
    pub sender_color: Option<String>,
    pub message: String,
    pub timestamp: String,
    pub date: String,
    pub attachments: Vec<FileAttachment>,
}

impl ChatMessage {
    pub fn sent_on(&self) -> Option<NaiveDate> {
        parse_message_date(&self.date)
    }

    pub fn chronological_key(&self) -> (Option<NaiveDate>, u32) {
        chronological_key(&self.date, &self.timestamp)
    }

    /// Sender label for prompts: the name, or "User" for unnamed member messages.
    pub fn sender_label(&self) -> &str {
        self.sender_name.as_deref().unwrap_or("User")
    }
}

/// Insert shape for a chat message; the store assigns the id.
#[derive(Debug, Clone, PartialEq)]
pub struct NewChatMessage {
    pub user_id: String,
    pub is_from_user: bool,
    pub sender_id: Option<SpecialistId>,
    pub sender_name: Option<String>,
    pub sender_role: Option<String>,
    pub sender_color: Option<String>,
    pub message: String,
    pub timestamp: String,
    pub date: String,
    pub attachments: Vec<FileAttachment>,
}

/// An entry in the scripted member history.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Conversation {
    pub id: String,
    pub is_from_member: bool,
    pub sender_id: Option<SpecialistId>,
    pub sender_name: Option<String>,
    pub sender_role: Option<String>,
    pub sender_color: Option<String>,
    pub message: String,
    pub timestamp: String,
    pub date: String,
    pub month_label: Option<String>,
}

impl Conversation {
    pub fn chronological_key(&self) -> (Option<NaiveDate>, u32) {
        chronological_key(&self.date, &self.timestamp)
    }

    /// Case-insensitive match on message text, sender name or sender role.
    pub fn matches(&self, query: &str) -> bool {
        let query = query.to_lowercase();
        let contains = |field: Option<&str>| {
            field
                .map(|value| value.to_lowercase().contains(&query))
                .unwrap_or(false)
        };

        contains(Some(&self.message))
            || contains(self.sender_name.as_deref())
            || contains(self.sender_role.as_deref())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TeamMember {
    pub id: SpecialistId,
    pub name: String,
    pub role: String,
    pub color: String,
    pub avatar: String,
}
