use std::time::{SystemTime, UNIX_EPOCH};
use crate::types::{AccessKeyError, Timestamp, WINDOW_STEP, DEFAULT_TIMING_OFFSET};

pub fn current_timestamp() -> Result<Timestamp, AccessKeyError> {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_secs())
        .map_err(|_| AccessKeyError::ClockBeforeEpoch)
}

/// Resolve an optional override to a unix timestamp in seconds.
pub fn get_time(time: Option<Timestamp>) -> Result<Timestamp, AccessKeyError> {
    match time {
        Some(t) => Ok(t),
        None => current_timestamp(),
    }
}

/// Shift `now` back by `timing_offset` and floor it to the window step.
pub fn window_for(timing_offset: Timestamp, now: Timestamp) -> Result<Timestamp, AccessKeyError> {
    let t = now
        .checked_sub(timing_offset)
        .ok_or(AccessKeyError::NegativeWindow { now, offset: timing_offset })?;

    Ok(t - t % WINDOW_STEP)
}

/// Seconds until the window containing `now` rolls over.
pub fn seconds_left_in_window(timing_offset: Timestamp, now: Timestamp) -> Timestamp {
    WINDOW_STEP - now.wrapping_sub(timing_offset) % WINDOW_STEP
}

/// Parse an operator supplied offset the way deployed displays do.
///
/// Leading whitespace and a `+` sign are skipped and the leading run of
/// decimal digits is read, so `"20s"` is 20. Anything that does not yield a
/// positive number falls back to [`DEFAULT_TIMING_OFFSET`]; a zero offset
/// is treated as unset.
pub fn parse_timing_offset(offset: &str) -> Timestamp {
    let trimmed = offset.trim_start();
    if trimmed.starts_with('-') {
        log::warn!("negative timing offset {:?} replaced by {}s", offset, DEFAULT_TIMING_OFFSET);
        return DEFAULT_TIMING_OFFSET;
    }
    let unsigned = trimmed.strip_prefix('+').unwrap_or(trimmed);

    let digits_end = unsigned
        .find(|c: char| !c.is_ascii_digit())
        .unwrap_or(unsigned.len());

    match unsigned[..digits_end].parse::<Timestamp>() {
        Ok(0) | Err(_) => DEFAULT_TIMING_OFFSET,
        Ok(v) => v,
    }
}
