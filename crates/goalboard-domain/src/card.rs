use serde::{Deserialize, Deserializer, Serialize};
use std::convert::Infallible;
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;

use crate::column::ColumnId;
use crate::field_update::FieldUpdate;
use crate::media;

/// Opaque card identifier.
///
/// New cards get a v4 UUID, but any string is accepted from stored boards
/// and imports. Bare JSON numbers are read as their decimal text.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(transparent)]
pub struct CardId(String);

impl CardId {
    pub fn generate() -> Self {
        Self(Uuid::new_v4().to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for CardId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<String> for CardId {
    fn from(id: String) -> Self {
        Self(id)
    }
}

impl From<&str> for CardId {
    fn from(id: &str) -> Self {
        Self(id.to_string())
    }
}

impl FromStr for CardId {
    type Err = Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self::from(s))
    }
}

impl<'de> Deserialize<'de> for CardId {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum RawId {
            Text(String),
            Number(serde_json::Number),
        }

        Ok(match RawId::deserialize(deserializer)? {
            RawId::Text(id) => Self(id),
            RawId::Number(n) => Self(n.to_string()),
        })
    }
}

pub const MAX_PROGRESS: u8 = 100;

/// Round and clamp a raw progress value into `0..=100`.
pub fn clamp_progress(value: f64) -> u8 {
    value.round().clamp(0.0, f64::from(MAX_PROGRESS)) as u8
}

/// Reads any JSON number as a clamped percentage; other values count as unset.
pub(crate) fn lenient_progress<'de, D>(deserializer: D) -> Result<Option<u8>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<serde_json::Value>::deserialize(deserializer)?;
    Ok(value
        .as_ref()
        .and_then(serde_json::Value::as_f64)
        .map(clamp_progress))
}

/// Where a card stands with respect to the parking lot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ParkingStatus {
    /// Outside the lot; neither tag field is present
    Unparked,
    /// In the lot with neither tag set
    Untagged,
    Future,
    Completed,
}

impl ParkingStatus {
    /// Status after a card is dropped back into the lot it already sits in.
    /// The tags swap: the new future flag is the old completed flag and the
    /// other way round, so an untagged card stays untagged.
    pub fn toggled(self) -> Self {
        match self {
            ParkingStatus::Future => ParkingStatus::Completed,
            ParkingStatus::Completed => ParkingStatus::Future,
            other => other,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Card {
    pub id: CardId,
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub youtube_link: Option<String>,
    #[serde(
        default,
        deserialize_with = "lenient_progress",
        skip_serializing_if = "Option::is_none"
    )]
    pub progress: Option<u8>,
    pub column: ColumnId,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub is_future: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub is_completed: Option<bool>,
}

impl Card {
    pub fn new(column: ColumnId, title: String) -> Self {
        Self {
            id: CardId::generate(),
            title,
            description: String::new(),
            youtube_link: None,
            progress: None,
            column,
            is_future: None,
            is_completed: None,
        }
    }

    pub fn parking_status(&self) -> ParkingStatus {
        if !self.column.is_parking() {
            return ParkingStatus::Unparked;
        }
        if self.is_completed == Some(true) {
            ParkingStatus::Completed
        } else if self.is_future == Some(true) {
            ParkingStatus::Future
        } else {
            ParkingStatus::Untagged
        }
    }

    /// Writes both tag fields; `Unparked` removes them entirely.
    pub fn set_parking_status(&mut self, status: ParkingStatus) {
        let (is_future, is_completed) = match status {
            ParkingStatus::Unparked => (None, None),
            ParkingStatus::Untagged => (Some(false), Some(false)),
            ParkingStatus::Future => (Some(true), Some(false)),
            ParkingStatus::Completed => (Some(false), Some(true)),
        };
        self.is_future = is_future;
        self.is_completed = is_completed;
    }

    pub fn has_parking_tags(&self) -> bool {
        self.is_future.is_some() || self.is_completed.is_some()
    }

    /// Drop tags outside the parking lot and resolve a card tagged both
    /// future and completed to completed.
    pub fn normalize_tags(&mut self) {
        if !self.column.is_parking() {
            if self.has_parking_tags() {
                self.set_parking_status(ParkingStatus::Unparked);
            }
        } else if self.is_future == Some(true) && self.is_completed == Some(true) {
            self.set_parking_status(ParkingStatus::Completed);
        }
    }

    pub fn update(&mut self, updates: CardUpdate) {
        if let Some(title) = updates.title {
            self.title = title;
        }
        if let Some(description) = updates.description {
            self.description = description;
        }
        updates.youtube_link.apply_to(&mut self.youtube_link);
        updates
            .progress
            .map(|p| p.min(MAX_PROGRESS))
            .apply_to(&mut self.progress);
    }

    pub fn youtube_video_id(&self) -> Option<&str> {
        self.youtube_link.as_deref().and_then(media::youtube_video_id)
    }

    pub fn embed_url(&self) -> Option<String> {
        self.youtube_video_id().map(media::embed_url)
    }
}

/// Partial update of a card's content fields. Location and parking tags are
/// only changed by moves.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CardUpdate {
    pub title: Option<String>,
    pub description: Option<String>,
    pub youtube_link: FieldUpdate<String>,
    pub progress: FieldUpdate<u8>,
}

impl CardUpdate {
    pub fn is_empty(&self) -> bool {
        self.title.is_none()
            && self.description.is_none()
            && !self.youtube_link.is_change()
            && !self.progress.is_change()
    }
}
