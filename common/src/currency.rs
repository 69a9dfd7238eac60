/// Rupee sign used in user-facing messages.
pub const RUPEE: &str = "₹";

/// Format a rupee amount for messages. Whole amounts print without decimals
/// (`₹38`), fractional amounts keep their digits (`₹43.5`).
pub fn format_inr(amount: f64) -> String {
    format!("{RUPEE}{amount}")
}

/// Round to paise.
pub fn round_paise(amount: f64) -> f64 {
    (amount * 100.0).round() / 100.0
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn whole_amounts_drop_decimals() {
        assert_eq!(format_inr(38.0), "₹38");
        assert_eq!(format_inr(43.5), "₹43.5");
    }

    #[test]
    fn rounding_to_paise() {
        assert_eq!(round_paise(10.005_1), 10.01);
        assert_eq!(round_paise(90.0), 90.0);
    }
}
