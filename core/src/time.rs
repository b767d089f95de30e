use anyhow::{anyhow, Result};

/// Format an hour float as `HH:MM`, 14.5 -> "14:30". A time that rounds up
/// to midnight is shown as "00:00".
pub fn format_time_of_day(time: f64) -> String {
    let (hours, minutes) = split_hours(time);
    format!("{:02}:{:02}", hours.rem_euclid(24), minutes)
}

/// Whole hours and rounded minutes of an hour float. A minute value that
/// rounds up to 60 is carried into the hour, which may then reach 24.
pub fn split_hours(time: f64) -> (i64, i64) {
    let hours = time.floor();
    let minutes = ((time - hours) * 60.0).round() as i64;
    let hours = hours as i64;
    if minutes == 60 {
        (hours + 1, 0)
    } else {
        (hours, minutes)
    }
}

/// Parse "14:30", "9:05" or "14.5" into an hour float.
pub fn parse_time_of_day(input: &str) -> Result<f64> {
    let input = input.trim();
    if input.is_empty() {
        return Err(anyhow!("Empty time string"));
    }

    if let Some((h_str, m_str)) = input.split_once(':') {
        let hours: u32 = h_str.parse().map_err(|_| anyhow!("Invalid hour: {}", h_str))?;
        let minutes: u32 = m_str.parse().map_err(|_| anyhow!("Invalid minutes: {}", m_str))?;
        if minutes >= 60 {
            return Err(anyhow!("Minutes out of range: {}", minutes));
        }
        return Ok(hours as f64 + minutes as f64 / 60.0);
    }

    let value: f64 = input.parse().map_err(|_| anyhow!("Could not parse time: {}", input))?;
    if !value.is_finite() {
        return Err(anyhow!("Could not parse time: {}", input));
    }
    Ok(value)
}
