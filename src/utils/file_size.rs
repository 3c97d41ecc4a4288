/// Size mentioned in the drop zone hint. Advisory only, never enforced.
pub const ADVISORY_LIMIT_BYTES: u64 = 10 * 1024 * 1024;

pub fn format_size(size: u64) -> String {
    const UNITS: [&str; 4] = ["B", "KB", "MB", "GB"];
    let mut value = size as f64;
    let mut unit = 0;

    while value >= 1024.0 && unit < UNITS.len() - 1 {
        value /= 1024.0;
        unit += 1;
    }

    if unit == 0 {
        format!("{} {}", size, UNITS[0])
    } else {
        format!("{:.1} {}", value, UNITS[unit])
    }
}

pub fn over_advisory_limit(size: u64) -> bool {
    size > ADVISORY_LIMIT_BYTES
}
