//! Data models for channels and generated programmes.
//!
//! This module defines the core data structures used throughout the application:
//! - [`Channel`]: A channel as declared in the channel configuration file
//! - [`Programme`]: A single generated guide entry bound to a channel
//! - [`Slot`]: A hard-coded programme template repeated every day
//!
//! Channel records use camelCase keys on disk (`displayName`) to stay
//! compatible with existing `channels.json` files.

use crate::error::{GuideError, GuideResult};
use chrono::{DateTime, Utc};
use serde::Deserialize;

/// A channel as read from the channel configuration.
///
/// # Fields
///
/// * `id` - Unique identifier, referenced by every programme of the channel
/// * `display_name` - Human readable channel name
/// * `icon` - Optional logo URL; empty strings are treated as absent
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Channel {
    /// The channel identifier used in `programme[channel]`.
    pub id: String,
    /// The name rendered in `<display-name>`.
    pub display_name: String,
    /// The logo URL rendered as `<icon src="..."/>`.
    #[serde(default)]
    pub icon: Option<String>,
}

impl Channel {
    /// Icon URL, if one is configured and non-empty.
    pub fn icon_src(&self) -> Option<&str> {
        self.icon.as_deref().filter(|s| !s.is_empty())
    }
}

/// A generated programme entry.
///
/// Programmes can only be built through [`Programme::new`], which guarantees
/// that `stop` is strictly after `start`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Programme {
    /// The programme title.
    pub title: String,
    /// A one-line description of the programme.
    pub description: String,
    /// Start instant (UTC).
    pub start: DateTime<Utc>,
    /// Stop instant (UTC), strictly after `start`.
    pub stop: DateTime<Utc>,
    /// Identifier of the owning [`Channel`].
    pub channel: String,
}

impl Programme {
    /// Build a programme, rejecting empty or inverted time windows.
    pub fn new(
        title: impl Into<String>,
        description: impl Into<String>,
        start: DateTime<Utc>,
        stop: DateTime<Utc>,
        channel: impl Into<String>,
    ) -> GuideResult<Self> {
        let title = title.into();
        if stop <= start {
            return Err(GuideError::Invariant(format!(
                "programme {title:?} stops at {stop} which is not after its start {start}"
            )));
        }
        Ok(Self {
            title,
            description: description.into(),
            start,
            stop,
            channel: channel.into(),
        })
    }

    /// True when the two programmes share any instant.
    pub fn overlaps(&self, other: &Programme) -> bool {
        self.start < other.stop && other.start < self.stop
    }
}

/// A daily programme template.
///
/// Hours are offsets from midnight UTC of the scheduled day.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Slot {
    pub title: &'static str,
    pub description: &'static str,
    pub start_hour: u32,
    pub stop_hour: u32,
}

/// The fixed daily line-up, in emission order.
pub const DAILY_SLOTS: [Slot; 3] = [
    Slot {
        title: "Morning Show",
        description: "Daily morning show.",
        start_hour: 8,
        stop_hour: 10,
    },
    Slot {
        title: "Midday Magazine",
        description: "Midday features and talk.",
        start_hour: 12,
        stop_hour: 14,
    },
    Slot {
        title: "Evening News",
        description: "Local and national news.",
        start_hour: 20,
        stop_hour: 22,
    },
];
