//! Numeric normalization for reported values

/// Bytes per gibibyte (2^30)
pub const BYTES_PER_GIB: f64 = 1_073_741_824.0;

/// Convert a byte count to gibibytes, rounded to one decimal place
///
/// Capacity selection compares candidates on this rounded value, so the
/// rounding lives here rather than at the formatting boundary.
pub fn bytes_to_gib(bytes: u64) -> f64 {
    (bytes as f64 / BYTES_PER_GIB * 10.0).round() / 10.0
}

/// Round a utilization reading to the nearest whole percent
pub fn round_percent(value: f64) -> u32 {
    value.round().max(0.0) as u32
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn one_gib_converts_to_one_point_zero() {
        assert_eq!(bytes_to_gib(1_073_741_824), 1.0);
    }

    #[test]
    fn zero_bytes_is_a_valid_zero_reading() {
        assert_eq!(bytes_to_gib(0), 0.0);
    }

    #[test]
    fn conversion_rounds_to_one_decimal() {
        // 1.25 GiB rounds to 1.3, 1.24 GiB rounds to 1.2
        assert_eq!(bytes_to_gib(1_342_177_280), 1.3);
        assert_eq!(bytes_to_gib(1_331_439_862), 1.2);
        // 8 GiB exactly
        assert_eq!(bytes_to_gib(8 * 1_073_741_824), 8.0);
    }

    #[test]
    fn conversion_is_monotonic() {
        let samples = [0u64, 1, 536_870_912, 1_073_741_824, 3_221_225_472, u64::MAX / 2];
        for pair in samples.windows(2) {
            assert!(bytes_to_gib(pair[0]) <= bytes_to_gib(pair[1]));
        }
    }

    #[test]
    fn percent_rounds_to_nearest_whole() {
        assert_eq!(round_percent(69.5), 70);
        assert_eq!(round_percent(69.4), 69);
        assert_eq!(round_percent(0.0), 0);
    }
}
