//! Sample schedule generation.
//!
//! Every channel gets the same three [`DAILY_SLOTS`] on every day of the
//! horizon. Output order is channel-major, then day, then slot, so the
//! generated guide is byte-for-byte stable for a given input.

use crate::error::{GuideError, GuideResult};
use crate::models::{Channel, DAILY_SLOTS, Programme};
use crate::utils::midnight_utc;
use chrono::{DateTime, Datelike, Days, NaiveDate, TimeDelta, Utc};
use itertools::Itertools;
use tracing::{debug, info, instrument};

/// Default number of days covered by a generated guide.
pub const DEFAULT_HORIZON_DAYS: u32 = 7;

/// Longest horizon accepted by [`generate`].
pub const MAX_HORIZON_DAYS: u32 = 366;

/// Years an XMLTV timestamp can carry in its four-digit year field.
const XMLTV_YEARS: std::ops::RangeInclusive<i32> = 0..=9999;

/// Generate the sample schedule for `channels`.
///
/// # Arguments
///
/// * `channels` - Channels in the order they should appear in the guide
/// * `reference_day` - First UTC calendar day of the guide
/// * `horizon_days` - Number of consecutive days to cover (0 yields nothing)
///
/// # Returns
///
/// `channels.len() * horizon_days * 3` programmes, or an invariant error if
/// the horizon exceeds [`MAX_HORIZON_DAYS`] or leaves the years an XMLTV
/// timestamp can represent.
#[instrument(level = "info", skip_all, fields(channels = channels.len(), %reference_day, horizon_days = horizon_days))]
pub fn generate(
    channels: &[Channel],
    reference_day: NaiveDate,
    horizon_days: u32,
) -> GuideResult<Vec<Programme>> {
    check_horizon(reference_day, horizon_days)?;

    let day0 = midnight_utc(reference_day);
    let mut schedule = Vec::with_capacity(channels.len() * horizon_days as usize * DAILY_SLOTS.len());

    for channel in channels {
        for offset in 0..horizon_days {
            let day = day0
                .checked_add_days(Days::new(u64::from(offset)))
                .ok_or_else(|| {
                    GuideError::Invariant(format!("day {offset} after {reference_day} is out of range"))
                })?;
            schedule.extend(programmes_for_day(channel, day)?);
        }
        debug!(channel = %channel.id, "Generated channel schedule");
    }

    info!(programmes = schedule.len(), "Generated schedule");
    Ok(schedule)
}

/// Reject horizons that are too long or whose days fall outside `0000..=9999`.
fn check_horizon(reference_day: NaiveDate, horizon_days: u32) -> GuideResult<()> {
    if horizon_days > MAX_HORIZON_DAYS {
        return Err(GuideError::Invariant(format!(
            "horizon of {horizon_days} days exceeds the maximum of {MAX_HORIZON_DAYS}"
        )));
    }
    if horizon_days == 0 {
        return Ok(());
    }

    let last_day = reference_day.checked_add_days(Days::new(u64::from(horizon_days - 1)));
    match last_day {
        Some(last) if XMLTV_YEARS.contains(&reference_day.year()) && XMLTV_YEARS.contains(&last.year()) => Ok(()),
        _ => Err(GuideError::Invariant(format!(
            "{horizon_days} days from {reference_day} leave the years 0000-9999 of XMLTV timestamps"
        ))),
    }
}

/// The three daily programmes of `channel` on the day starting at `day`.
fn programmes_for_day(channel: &Channel, day: DateTime<Utc>) -> GuideResult<Vec<Programme>> {
    let programmes = DAILY_SLOTS
        .iter()
        .map(|slot| {
            Programme::new(
                slot.title,
                slot.description,
                day + TimeDelta::hours(i64::from(slot.start_hour)),
                day + TimeDelta::hours(i64::from(slot.stop_hour)),
                channel.id.as_str(),
            )
        })
        .collect::<GuideResult<Vec<_>>>()?;

    if let Some((a, b)) = programmes.iter().tuple_combinations().find(|(a, b)| a.overlaps(b)) {
        return Err(GuideError::Invariant(format!(
            "{:?} and {:?} overlap on channel {:?}",
            a.title, b.title, channel.id
        )));
    }

    Ok(programmes)
}
