//! Formatting utilities used for CLI and export outputs.

/// Minutes → `HH:MM`, e.g. estimates and folded pauses.
pub fn mins2hhmm(mins: i64) -> String {
    let sign = if mins < 0 { "-" } else { "" };
    let m = mins.abs();
    format!("{}{:02}:{:02}", sign, m / 60, m % 60)
}

/// Timer display: milliseconds → `HH:MM:SS`. Hours are not wrapped at 24.
pub fn format_hms(ms: i64) -> String {
    let secs = ms.max(0) / 1000;
    format!("{:02}:{:02}:{:02}", secs / 3600, (secs % 3600) / 60, secs % 60)
}

/// Fixed-width text progress bar; `ratio` is clamped to 0..=1 for the fill,
/// the percentage label keeps the real value.
pub fn progress_bar(ratio: f64, width: usize) -> String {
    let ratio = if ratio.is_finite() { ratio.max(0.0) } else { 0.0 };
    let filled = ((ratio.min(1.0) * width as f64).round() as usize).min(width);

    format!(
        "[{}{}] {:>3.0}%",
        "#".repeat(filled),
        ".".repeat(width - filled),
        ratio * 100.0
    )
}
