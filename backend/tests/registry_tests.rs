//! Registry validation property-based and unit tests
//!
//! Covers the RSBSA number format, area bounds, and the harvested-area
//! constraint against the planted area.

use proptest::prelude::*;
use rust_decimal::Decimal;

use shared::validation::{
    validate_area_hectares, validate_harvest_area, validate_philippine_mobile,
    validate_rsbsa_number,
};

// ============================================================================
// Property Test Strategies
// ============================================================================

/// Generate a well-formed RSBSA number (2-2-2-3-6 digit groups)
fn valid_rsbsa_strategy() -> impl Strategy<Value = String> {
    (0..100u32, 0..100u32, 0..100u32, 0..1000u32, 0..1_000_000u32).prop_map(
        |(region, province, municipality, barangay, sequence)| {
            format!(
                "{:02}-{:02}-{:02}-{:03}-{:06}",
                region, province, municipality, barangay, sequence
            )
        },
    )
}

/// Area in hectares: 0.01 to 100.00
fn area_strategy() -> impl Strategy<Value = Decimal> {
    (1..=10_000i64).prop_map(|n| Decimal::new(n, 2))
}

// ============================================================================
// Property-Based Tests
// ============================================================================

proptest! {
    /// Every well-formed RSBSA number validates
    #[test]
    fn test_valid_rsbsa_accepted(number in valid_rsbsa_strategy()) {
        prop_assert!(validate_rsbsa_number(&number).is_ok());
    }

    /// Dropping any group breaks validation
    #[test]
    fn test_truncated_rsbsa_rejected(number in valid_rsbsa_strategy()) {
        let truncated = number.rsplit_once('-').unwrap().0;
        prop_assert!(validate_rsbsa_number(truncated).is_err());
    }

    /// Plausible areas validate; their negation never does
    #[test]
    fn test_area_sign(area in area_strategy()) {
        prop_assert!(validate_area_hectares(area).is_ok());
        prop_assert!(validate_area_hectares(-area).is_err());
    }

    /// A harvest never exceeds its planting
    #[test]
    fn test_harvest_area_bounded_by_planted(
        planted in area_strategy(),
        harvested in area_strategy()
    ) {
        let result = validate_harvest_area(harvested, planted);
        if harvested <= planted {
            prop_assert!(result.is_ok());
        } else {
            prop_assert!(result.is_err());
        }
    }
}

// ============================================================================
// Unit Tests: RSBSA Format
// ============================================================================

#[cfg(test)]
mod rsbsa_tests {
    use super::*;

    #[test]
    fn test_reference_number() {
        assert!(validate_rsbsa_number("06-30-18-014-000001").is_ok());
    }

    #[test]
    fn test_wrong_group_lengths() {
        assert!(validate_rsbsa_number("006-30-18-014-000001").is_err());
        assert!(validate_rsbsa_number("06-30-18-14-000001").is_err());
        assert!(validate_rsbsa_number("06-30-18-014-0001").is_err());
    }

    #[test]
    fn test_non_digit_groups() {
        assert!(validate_rsbsa_number("A6-30-18-014-000001").is_err());
        assert!(validate_rsbsa_number("06-30-18-014-00000x").is_err());
    }
}

// ============================================================================
// Unit Tests: Contact Numbers
// ============================================================================

#[cfg(test)]
mod contact_tests {
    use super::*;

    #[test]
    fn test_local_and_international_formats() {
        assert!(validate_philippine_mobile("09171234567").is_ok());
        assert!(validate_philippine_mobile("+639171234567").is_ok());
        assert!(validate_philippine_mobile("0917 123 4567").is_ok());
    }

    #[test]
    fn test_rejects_landline_and_garbage() {
        assert!(validate_philippine_mobile("033-123-4567").is_err());
        assert!(validate_philippine_mobile("hello").is_err());
        assert!(validate_philippine_mobile("").is_err());
    }
}
