//! Rupee formatting with Indian digit grouping (12,34,567).

/// Currency symbol prefixed to cost strings.
pub const RUPEE: &str = "₹";

/// Round half up, matching how amounts are shown on the dashboard.
///
/// Compares the fractional part directly; `(value + 0.5).floor()` rounds
/// 0.49999999999999994 up to 1.
pub fn round_half_up(value: f64) -> i64 {
    let floor = value.floor();
    if value - floor >= 0.5 {
        floor as i64 + 1
    } else {
        floor as i64
    }
}

/// Group digits the Indian way: last three, then pairs.
pub fn group_indian(amount: i64) -> String {
    let digits = amount.unsigned_abs().to_string();
    let grouped = if digits.len() <= 3 {
        digits
    } else {
        let (head, tail) = digits.split_at(digits.len() - 3);
        let mut groups: Vec<&str> = Vec::new();
        let mut end = head.len();
        while end > 0 {
            let start = end.saturating_sub(2);
            groups.push(&head[start..end]);
            end = start;
        }
        groups.reverse();
        format!("{},{}", groups.join(","), tail)
    };

    if amount < 0 {
        format!("-{}", grouped)
    } else {
        grouped
    }
}

/// Format a whole-rupee amount, e.g. `₹1,23,456`.
pub fn format_inr(amount: i64) -> String {
    format!("{}{}", RUPEE, group_indian(amount))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_round_half_up() {
        assert_eq!(round_half_up(2.5), 3);
        assert_eq!(round_half_up(2.49), 2);
        assert_eq!(round_half_up(-2.5), -2);
        assert_eq!(round_half_up(1618.744), 1619);
    }

    #[test]
    fn test_round_half_up_just_below_half() {
        assert_eq!(round_half_up(0.49999999999999994), 0);
        assert_eq!(round_half_up(0.5), 1);
    }

    #[test]
    fn test_group_indian() {
        assert_eq!(group_indian(0), "0");
        assert_eq!(group_indian(999), "999");
        assert_eq!(group_indian(1000), "1,000");
        assert_eq!(group_indian(12345), "12,345");
        assert_eq!(group_indian(123456), "1,23,456");
        assert_eq!(group_indian(1234567), "12,34,567");
        assert_eq!(group_indian(-123456), "-1,23,456");
    }

    #[test]
    fn test_format_inr() {
        assert_eq!(format_inr(8500), "₹8,500");
        assert_eq!(format_inr(42), "₹42");
    }
}
