//! Helpers for the host's three-digit counters (timer and remaining flags).

/// Largest value a three-digit counter can show.
pub const COUNTER_MAX: u32 = 999;

/// Formats `num` as a zero-padded three-digit string. Negative values show their magnitude, as
/// the flag counter does when the player over-flags; values past 999 saturate.
pub fn format_counter(num: i64) -> String {
    let shown = num.unsigned_abs().min(COUNTER_MAX.into());
    format!("{:03}", shown)
}
