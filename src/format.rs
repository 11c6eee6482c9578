//! Human-readable formatting for the raw figures the dashboard API serves.

/// Format a bandwidth figure given in Mbps.
///
/// Values at or above 1000 Mbps switch to Gbps. The threshold compares the
/// raw value, so 999.999 still renders as `"1000.00 Mbps"`.
pub fn format_bandwidth(mbps: f64) -> String {
    if mbps < 1000.0 {
        format!("{:.2} Mbps", mbps)
    } else {
        format!("{:.2} Gbps", mbps / 1000.0)
    }
}

/// Format a byte count with 1024-based units, capped at TB.
pub fn format_bytes(bytes: f64) -> String {
    const UNITS: [&str; 5] = ["B", "KB", "MB", "GB", "TB"];

    let mut size = bytes;
    let mut unit = 0;
    while size >= 1024.0 && unit < UNITS.len() - 1 {
        size /= 1024.0;
        unit += 1;
    }

    format!("{:.2} {}", size, UNITS[unit])
}

/// Format a load fraction (0.0..=1.0 nominal) as a percentage.
pub fn format_load(load: f64) -> String {
    format!("{:.2}%", load * 100.0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bandwidth_below_threshold_stays_mbps() {
        assert_eq!(format_bandwidth(0.0), "0.00 Mbps");
        assert_eq!(format_bandwidth(999.0), "999.00 Mbps");
    }

    #[test]
    fn bandwidth_rounds_before_display_but_compares_raw() {
        // 999.999 < 1000 keeps the Mbps branch even though it rounds to 1000.00
        assert_eq!(format_bandwidth(999.999), "1000.00 Mbps");
    }

    #[test]
    fn bandwidth_at_threshold_switches_to_gbps() {
        assert_eq!(format_bandwidth(1000.0), "1.00 Gbps");
        assert_eq!(format_bandwidth(2500.0), "2.50 Gbps");
    }

    #[test]
    fn bytes_zero_and_exact_boundaries() {
        assert_eq!(format_bytes(0.0), "0.00 B");
        assert_eq!(format_bytes(1023.0), "1023.00 B");
        assert_eq!(format_bytes(1024.0), "1.00 KB");
        assert_eq!(format_bytes(1536.0), "1.50 KB");
        assert_eq!(format_bytes(1024.0 * 1024.0 * 1024.0), "1.00 GB");
    }

    #[test]
    fn bytes_cap_at_tb() {
        // 1024^5 would be 1 PB; the unit table stops at TB
        assert_eq!(format_bytes(1024f64.powi(5)), "1024.00 TB");
        assert_eq!(format_bytes(1024f64.powi(6)), "1048576.00 TB");
    }

    #[test]
    fn load_renders_as_percent() {
        assert_eq!(format_load(0.0), "0.00%");
        assert_eq!(format_load(0.1234), "12.34%");
        assert_eq!(format_load(1.0), "100.00%");
    }
}
