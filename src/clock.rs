//! Clock display formatting.

/// Formats a second count as zero-padded `HH:MM:SS`.
///
/// The hours field is at least two digits and widens as needed past
/// `99:59:59` rather than wrapping or truncating.
pub fn format_clock(total_seconds: u64) -> String {
    let hours = total_seconds / 3600;
    let minutes = (total_seconds % 3600) / 60;
    let seconds = total_seconds % 60;
    format!("{hours:02}:{minutes:02}:{seconds:02}")
}
