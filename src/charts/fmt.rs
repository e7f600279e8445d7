//! Number formatting for chart labels. Formatting is the last step:
//! values reach these functions at full precision.

/// Thousands separators: 1970 -> "1,970".
pub fn thousands(n: u64) -> String {
    let digits = n.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}

/// Compact dollar amount from cents: "$912", "$45.3K", "$199.7M", "$1.72B".
pub fn dollars_compact(cents: u64) -> String {
    let dollars = cents as f64 / 100.0;
    if dollars >= 1e9 {
        format!("${:.2}B", dollars / 1e9)
    } else if dollars >= 1e6 {
        format!("${:.1}M", dollars / 1e6)
    } else if dollars >= 1e3 {
        format!("${:.1}K", dollars / 1e3)
    } else {
        format!("${:.0}", dollars)
    }
}

/// Dollars in millions with one decimal: "$199.7M". Used where a chart's
/// whole axis is denominated in millions.
pub fn dollars_millions(cents: u64) -> String {
    format!("${:.1}M", cents as f64 / 100.0 / 1e6)
}

/// One-decimal percentage: 21.3 -> "21.3%". The single rounding point for
/// every rate in the dashboard.
pub fn percent(value: f64) -> String {
    format!("{:.1}%", value)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_thousands() {
        assert_eq!(thousands(0), "0");
        assert_eq!(thousands(999), "999");
        assert_eq!(thousands(1_970), "1,970");
        assert_eq!(thousands(1_234_567), "1,234,567");
    }

    #[test]
    fn test_dollars_compact() {
        assert_eq!(dollars_compact(91_200), "$912");
        assert_eq!(dollars_compact(45_300_000), "$453.0K");
        assert_eq!(dollars_compact(19_970_000_000), "$199.7M");
        assert_eq!(dollars_compact(172_000_000_000), "$1.72B");
    }

    #[test]
    fn test_dollars_millions() {
        assert_eq!(dollars_millions(19_970_000_000), "$199.7M");
        assert_eq!(dollars_millions(50_000_00), "$0.1M");
    }

    #[test]
    fn test_percent_rounds_once() {
        assert_eq!(percent(21.26), "21.3%");
        assert_eq!(percent(0.0), "0.0%");
    }
}
