//! Shared formatting helpers for human-readable snapshot output.
//!
//! All pure formatting functions live here. Functions that differ between
//! compact table columns and verbose detail lines are parameterized via
//! [`FmtStyle`].

/// Controls compact (table columns) vs verbose (detail lines) output.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum FmtStyle {
    /// Compact: no spaces, short suffixes ("1.5G", "512B")
    Compact,
    /// Detail: spaces, full suffixes ("1.5 GiB", "512 B")
    Detail,
}

/// Format byte count as human-readable size.
///
/// Compact: `"1.5G"`, `"100.3M"`, `"50.0K"`, `"512B"`
/// Detail:  `"1.5 GiB"`, `"100.3 MiB"`, `"50.0 KiB"`, `"512 B"`
pub fn format_bytes(bytes: u64, style: FmtStyle) -> String {
    let (g, m, k, b) = match style {
        FmtStyle::Compact => ("G", "M", "K", "B"),
        FmtStyle::Detail => (" GiB", " MiB", " KiB", " B"),
    };
    let f = bytes as f64;
    if bytes >= 1024 * 1024 * 1024 {
        format!("{:.1}{}", f / (1024.0 * 1024.0 * 1024.0), g)
    } else if bytes >= 1024 * 1024 {
        format!("{:.1}{}", f / (1024.0 * 1024.0), m)
    } else if bytes >= 1024 {
        format!("{:.1}{}", f / 1024.0, k)
    } else {
        format!("{}{}", bytes, b)
    }
}

/// Format a signed byte count; negative values get a leading `-`.
///
/// Derived memory figures can go negative on inconsistent kernels and are
/// shown as such rather than hidden.
pub fn format_bytes_i64(bytes: i64, style: FmtStyle) -> String {
    let abs = format_bytes(bytes.unsigned_abs(), style);
    if bytes < 0 { format!("-{abs}") } else { abs }
}

/// Format `part` as a percentage of `total`, `"-"` when total is zero.
pub fn format_percent(part: u64, total: u64) -> String {
    if total == 0 {
        return "-".to_string();
    }
    format!("{:.1}%", part as f64 / total as f64 * 100.0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_bytes_compact() {
        assert_eq!(format_bytes(512, FmtStyle::Compact), "512B");
        assert_eq!(format_bytes(50 * 1024, FmtStyle::Compact), "50.0K");
        assert_eq!(format_bytes(3 * 1024 * 1024 / 2, FmtStyle::Compact), "1.5M");
        assert_eq!(
            format_bytes(3 * 1024 * 1024 * 1024 / 2, FmtStyle::Compact),
            "1.5G"
        );
    }

    #[test]
    fn test_format_bytes_detail() {
        assert_eq!(format_bytes(0, FmtStyle::Detail), "0 B");
        assert_eq!(format_bytes(2048, FmtStyle::Detail), "2.0 KiB");
        assert_eq!(
            format_bytes(16 * 1024 * 1024 * 1024, FmtStyle::Detail),
            "16.0 GiB"
        );
    }

    #[test]
    fn test_format_bytes_i64() {
        assert_eq!(format_bytes_i64(2048, FmtStyle::Detail), "2.0 KiB");
        assert_eq!(format_bytes_i64(-2048, FmtStyle::Detail), "-2.0 KiB");
        assert_eq!(format_bytes_i64(i64::MIN, FmtStyle::Compact).chars().next(), Some('-'));
    }

    #[test]
    fn test_format_percent() {
        assert_eq!(format_percent(1, 4), "25.0%");
        assert_eq!(format_percent(0, 0), "-");
    }
}
