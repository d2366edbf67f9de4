const UNITS: [&str; 5] = ["B", "KB", "MB", "GB", "TB"];

/// Human-readable size for the grid tiles, e.g. `1.50 KB`.
pub fn format_size(size: u64) -> String {
    let mut value = size as f64;
    let mut unit = 0;

    while value >= 1024.0 && unit < UNITS.len() - 1 {
        value /= 1024.0;
        unit += 1;
    }

    if unit == 0 {
        format!("{} {}", size, UNITS[0])
    } else {
        format!("{:.2} {}", value, UNITS[unit])
    }
}
