/// Format whole seconds as `m:ss` for the timer and history rows.
pub fn format_time(secs: u32) -> String {
    format!("{}:{:02}", secs / 60, secs % 60)
}

/// Ratio as a whole percentage, clamped to 0..=100. A zero denominator
/// reads as full progress rather than dividing by zero.
pub fn percent(current: u32, target: u32) -> u16 {
    if target == 0 {
        return 100;
    }
    (((current as f64 / target as f64) * 100.0).round() as u16).min(100)
}
