//! Channel configuration loading and validation.
//!
//! The channel list is a JSON array by default, or YAML when the file ends in
//! `.yaml` / `.yml`:
//!
//! ```json
//! [
//!   { "id": "ch1", "displayName": "Channel One", "icon": "https://example.com/ch1.png" },
//!   { "id": "ch2", "displayName": "Channel Two" }
//! ]
//! ```
//!
//! Every problem with the file (missing, unreadable, malformed, or failing
//! validation) is reported as [`GuideError::Config`] before any schedule is
//! generated.

use crate::error::{GuideError, GuideResult};
use crate::models::Channel;
use itertools::Itertools;
use std::path::Path;
use tokio::fs;
use tracing::{debug, info, instrument};
use url::Url;

/// Serialization format of a channel file, chosen by extension.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChannelFormat {
    Json,
    Yaml,
}

impl ChannelFormat {
    /// Pick the format from the file extension, defaulting to JSON.
    pub fn from_path(path: &Path) -> Self {
        match path
            .extension()
            .and_then(|e| e.to_str())
            .map(|e| e.to_ascii_lowercase())
            .as_deref()
        {
            Some("yaml") | Some("yml") => Self::Yaml,
            _ => Self::Json,
        }
    }
}

/// Read, parse and validate the channel list at `path`.
///
/// # Errors
///
/// Returns [`GuideError::Config`] if the file cannot be read, does not parse,
/// or fails [`validate_channels`].
#[instrument(level = "info", skip_all, fields(path = %path.display()))]
pub async fn load_channels(path: &Path) -> GuideResult<Vec<Channel>> {
    let raw = fs::read_to_string(path)
        .await
        .map_err(|e| GuideError::config(path, format!("cannot read channel list: {e}")))?;

    let format = ChannelFormat::from_path(path);
    debug!(?format, bytes = raw.len(), "Read channel list");

    let channels = parse_channels(&raw, format).map_err(|reason| GuideError::config(path, reason))?;
    validate_channels(&channels).map_err(|reason| GuideError::config(path, reason))?;

    info!(count = channels.len(), "Loaded channels");
    Ok(channels)
}

/// Deserialize a channel list without validating it.
pub fn parse_channels(raw: &str, format: ChannelFormat) -> Result<Vec<Channel>, String> {
    match format {
        ChannelFormat::Json => serde_json::from_str(raw).map_err(|e| format!("malformed JSON: {e}")),
        ChannelFormat::Yaml => serde_yaml::from_str(raw).map_err(|e| format!("malformed YAML: {e}")),
    }
}

/// Check the invariants the generator and emitter rely on.
///
/// - `id` and `displayName` are non-empty
/// - `id` is unique across the list
/// - a non-empty `icon` is an absolute URL
///
/// Duplicate ids are rejected rather than passed through, since guide
/// consumers key programmes by channel id.
pub fn validate_channels(channels: &[Channel]) -> Result<(), String> {
    for (index, channel) in channels.iter().enumerate() {
        if channel.id.trim().is_empty() {
            return Err(format!("channel #{index} has an empty id"));
        }
        if channel.display_name.trim().is_empty() {
            return Err(format!("channel {:?} has an empty displayName", channel.id));
        }
        if let Some(icon) = channel.icon_src() {
            Url::parse(icon)
                .map_err(|e| format!("channel {:?} has an invalid icon URL {icon:?}: {e}", channel.id))?;
        }
    }

    let duplicates = channels
        .iter()
        .map(|c| c.id.as_str())
        .duplicates()
        .collect::<Vec<_>>();
    if !duplicates.is_empty() {
        return Err(format!("duplicate channel id(s): {}", duplicates.join(", ")));
    }

    Ok(())
}
