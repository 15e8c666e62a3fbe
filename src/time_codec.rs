/*!
 * Fixed-width timestamp codec for cue timing.
 *
 * Converts between a seconds offset and the `HH:MM:SS.mmm` form used on
 * track timing lines. `encode` and `decode` are strict inverses at
 * millisecond precision: `decode(encode(x))` equals `x` truncated to whole
 * milliseconds for every non-negative finite `x`.
 */

use once_cell::sync::Lazy;
use regex::Regex;

use crate::errors::FormatError;

// @const: Strict HH:MM:SS.mmm pattern; hours widen past two digits, never shrink
static TIMESTAMP_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^(\d{2,}):(\d{2}):(\d{2})\.(\d{3})$").unwrap()
});

/// Encode a non-negative seconds offset as a zero-padded `HH:MM:SS.mmm`
/// timestamp. Sub-millisecond remainder is truncated, never rounded; negative
/// and non-finite offsets are rejected rather than clamped.
pub fn encode(seconds: f64) -> Result<String, FormatError> {
    Ok(format_ms(whole_ms(seconds)?))
}

/// Decode a strict `HH:MM:SS.mmm` timestamp back to a seconds offset.
///
/// Any deviation from the fixed-width pattern fails, as does a minutes or
/// seconds field of 60 or more. Hours carry no upper bound, so multi-day
/// offsets stay representable.
pub fn decode(timestamp: &str) -> Result<f64, FormatError> {
    let caps = TIMESTAMP_REGEX
        .captures(timestamp)
        .ok_or_else(|| FormatError::MalformedTimestamp {
            input: timestamp.to_string(),
            reason: "expected HH:MM:SS.mmm".to_string(),
        })?;

    // Fields are all digits by the pattern; a parse failure can only mean the
    // hours run past what u64 carries.
    let hours: u64 = caps[1]
        .parse()
        .map_err(|_| FormatError::MalformedTimestamp {
            input: timestamp.to_string(),
            reason: "hours field overflows".to_string(),
        })?;
    // Two- and three-digit fields cannot overflow or fail to parse.
    let minutes: u64 = caps[2].parse().unwrap_or(0);
    let seconds: u64 = caps[3].parse().unwrap_or(0);
    let millis: u64 = caps[4].parse().unwrap_or(0);

    if minutes >= 60 {
        return Err(FormatError::FieldOutOfRange {
            input: timestamp.to_string(),
            field: "minutes",
        });
    }
    if seconds >= 60 {
        return Err(FormatError::FieldOutOfRange {
            input: timestamp.to_string(),
            field: "seconds",
        });
    }

    let total_ms = hours
        .checked_mul(3_600_000)
        .and_then(|ms| ms.checked_add(minutes * 60_000 + seconds * 1_000 + millis))
        .ok_or_else(|| FormatError::MalformedTimestamp {
            input: timestamp.to_string(),
            reason: "hours field overflows".to_string(),
        })?;

    Ok(total_ms as f64 / 1000.0)
}

/// Reduce a seconds offset to whole milliseconds, rejecting anything that has
/// no timestamp form.
///
/// Truncation is defined as the largest whole millisecond not exceeding the
/// input. Rounding first absorbs representation error for millisecond-exact
/// inputs (`1.001f64 * 1000.0` lands at `1000.9999999999999`); the guard
/// steps back whenever the rounded value overshoots.
pub(crate) fn whole_ms(seconds: f64) -> Result<u64, FormatError> {
    if !seconds.is_finite() {
        return Err(FormatError::NonFiniteTime);
    }
    if seconds < 0.0 {
        return Err(FormatError::NegativeTime(seconds));
    }
    let scaled = seconds * 1000.0;
    if scaled >= u64::MAX as f64 {
        return Err(FormatError::OversizedTime(seconds));
    }

    let mut ms = scaled.round() as u64;
    if ms > 0 && (ms as f64) / 1000.0 > seconds {
        ms -= 1;
    }
    Ok(ms)
}

/// Format a whole-millisecond offset as `HH:MM:SS.mmm`.
pub(crate) fn format_ms(ms: u64) -> String {
    let hours = ms / 3_600_000;
    let minutes = (ms % 3_600_000) / 60_000;
    let seconds = (ms % 60_000) / 1_000;
    let millis = ms % 1_000;

    format!("{:02}:{:02}:{:02}.{:03}", hours, minutes, seconds, millis)
}
