use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use serde::{Deserialize, Serialize};

/// A candidate track as handed over by the track source.
///
/// Only `uri` is required; every other attribute falls back to a neutral
/// default so partially populated records still flow through the engine.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Track {
    pub uri: String,
    #[serde(default)]
    pub name: String,
    #[serde(default, alias = "artist")]
    pub artist_name: String,
    #[serde(default)]
    pub artist_id: String,
    #[serde(default)]
    pub duration_ms: u64,
    #[serde(default)]
    pub album: Album,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub explicit: Option<bool>,
    #[serde(default)]
    pub popularity: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub release_year: Option<i32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub release_date: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub saved_at: Option<String>,
    /// Unprocessed JSON payload of the record, kept for late metadata lookups.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub raw: Option<String>,
}

/// Album a track belongs to. Sources either send just the album name or a
/// nested object; both deserialize into this shape.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(from = "AlbumRepr")]
pub struct Album {
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub release_date: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub explicit: Option<bool>,
}

#[derive(Deserialize)]
#[serde(untagged)]
enum AlbumRepr {
    Name(String),
    Full {
        #[serde(default)]
        name: String,
        #[serde(default)]
        release_date: Option<String>,
        #[serde(default)]
        explicit: Option<bool>,
    },
}

impl From<AlbumRepr> for Album {
    fn from(repr: AlbumRepr) -> Self {
        match repr {
            AlbumRepr::Name(name) => Album {
                name,
                ..Album::default()
            },
            AlbumRepr::Full {
                name,
                release_date,
                explicit,
            } => Album {
                name,
                release_date,
                explicit,
            },
        }
    }
}

impl Track {
    /// Release year from the explicit field, then the album date, then the
    /// track date. Dates are expected as `YYYY` or `YYYY-...`.
    pub fn year(&self) -> Option<i32> {
        if self.release_year.is_some() {
            return self.release_year;
        }
        self.album
            .release_date
            .as_deref()
            .and_then(year_from_date)
            .or_else(|| self.release_date.as_deref().and_then(year_from_date))
    }

    /// Parsed `saved_at` timestamp; unparsable values count as missing.
    ///
    /// Accepts RFC 3339, and ISO-8601 date-times or plain dates without an
    /// offset, which are read as UTC.
    pub fn saved_at(&self) -> Option<DateTime<Utc>> {
        let raw = self.saved_at.as_deref()?.trim();
        if let Ok(t) = DateTime::parse_from_rfc3339(raw) {
            return Some(t.with_timezone(&Utc));
        }
        if let Ok(t) = NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S%.f") {
            return Some(t.and_utc());
        }
        NaiveDate::parse_from_str(raw, "%Y-%m-%d")
            .ok()
            .and_then(|d| d.and_hms_opt(0, 0, 0))
            .map(|t| t.and_utc())
    }
}

fn year_from_date(date: &str) -> Option<i32> {
    date.trim().split('-').next()?.trim().parse().ok()
}
