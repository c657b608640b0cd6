/// Round `numerator / denominator` to two decimal places, half away from zero.
///
/// The quotient is rounded from its exact value in integer arithmetic, so a
/// ratio like 1.005 rounds to 1.01 instead of falling victim to binary float
/// representation. A zero denominator yields 0.
pub fn round2_ratio(numerator: u64, denominator: u64) -> f64 {
    if denominator == 0 {
        return 0.0;
    }
    let num = numerator as u128 * 100;
    let den = denominator as u128;
    let hundredths = (2 * num + den) / (2 * den);
    hundredths as f64 / 100.0
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_round2_ratio_basic() {
        assert_eq!(round2_ratio(60, 3), 20.0);
        assert_eq!(round2_ratio(200, 3), 66.67);
        assert_eq!(round2_ratio(100, 3), 33.33);
    }

    #[test]
    fn test_round2_ratio_half_rounds_away_from_zero() {
        // 1.005 and 0.125 sit exactly on the rounding boundary
        assert_eq!(round2_ratio(201, 200), 1.01);
        assert_eq!(round2_ratio(1, 8), 0.13);
        assert_eq!(round2_ratio(1, 400), 0.0);
        assert_eq!(round2_ratio(1, 200), 0.01);
    }

    #[test]
    fn test_round2_ratio_zero_denominator() {
        assert_eq!(round2_ratio(42, 0), 0.0);
        assert_eq!(round2_ratio(0, 0), 0.0);
    }

    #[test]
    fn test_round2_ratio_large_values() {
        assert_eq!(round2_ratio(u64::MAX, u64::MAX), 1.0);
    }
}
