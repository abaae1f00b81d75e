/// Round to two decimal places, half away from zero.
///
/// This is the only rounding step applied to reported figures. Intermediate
/// values stay at full precision until they are written to an output field.
pub fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_round2() {
        assert_eq!(round2(75.0), 75.0);
        assert_eq!(round2(66.666_666), 66.67);
        assert_eq!(round2(33.333_333), 33.33);
        assert_eq!(round2(0.0), 0.0);
        assert_eq!(round2(-1.234), -1.23);
    }
}
