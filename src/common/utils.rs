use std::time::Duration;

/// Format an elapsed duration for log lines, e.g. "1m 05.20s" or "312ms"
pub fn format_elapsed(elapsed: Duration) -> String {
    let secs = elapsed.as_secs_f64();
    if secs < 1.0 {
        format!("{}ms", elapsed.as_millis())
    } else if secs < 60.0 {
        format!("{:.2}s", secs)
    } else {
        let minutes = elapsed.as_secs() / 60;
        let rem = secs - (minutes * 60) as f64;
        format!("{}m {:05.2}s", minutes, rem)
    }
}
