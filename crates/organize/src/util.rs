const UNITS: [&str; 4] = ["B", "KB", "MB", "GB"];

/// Human-readable size in binary units with at most one decimal
/// (`1536` is `"1.5 KB"`, `2048` is `"2 KB"`).
pub fn format_size(bytes: u64) -> String {
    let mut value = bytes as f64;
    let mut unit = 0;
    while value >= 1024.0 && unit < UNITS.len() - 1 {
        value /= 1024.0;
        unit += 1;
    }
    let rounded = format!("{value:.1}");
    let rounded = rounded.strip_suffix(".0").unwrap_or(&rounded);
    format!("{rounded} {}", UNITS[unit])
}
