//! Validation utilities for the Provincial Agriculture Management Platform
//!
//! Includes Philippines-specific validations for RSBSA registry numbers and
//! contact details.

use rust_decimal::Decimal;

// ============================================================================
// Agricultural Record Validations
// ============================================================================

/// Validate a planted/harvested area in hectares (non-negative, sane upper bound)
pub fn validate_area_hectares(area: Decimal) -> Result<(), &'static str> {
    if area < Decimal::ZERO {
        return Err("Area cannot be negative");
    }
    // No single barangay parcel reaches 10,000 ha
    if area > Decimal::from(10_000) {
        return Err("Area exceeds the plausible maximum of 10,000 hectares");
    }
    Ok(())
}

/// Validate production weight in kilograms
pub fn validate_production_kg(production: Decimal) -> Result<(), &'static str> {
    if production < Decimal::ZERO {
        return Err("Production cannot be negative");
    }
    Ok(())
}

/// Validate that a harvested area does not exceed the planted area
pub fn validate_harvest_area(
    area_harvested: Decimal,
    area_planted: Decimal,
) -> Result<(), &'static str> {
    validate_area_hectares(area_harvested)?;
    if area_harvested > area_planted {
        return Err("Harvested area cannot exceed the planted area");
    }
    Ok(())
}

// ============================================================================
// Philippines-Specific Validations
// ============================================================================

/// Validate an RSBSA system-generated number.
///
/// Format: `RR-PP-MM-BBB-NNNNNN`, the region, province, municipality,
/// barangay, and farmer sequence as dash-separated digit groups
/// (e.g. `06-30-18-014-000001`).
pub fn validate_rsbsa_number(number: &str) -> Result<(), &'static str> {
    const GROUP_LENGTHS: [usize; 5] = [2, 2, 2, 3, 6];

    let groups: Vec<&str> = number.split('-').collect();
    if groups.len() != GROUP_LENGTHS.len() {
        return Err("RSBSA number must have 5 dash-separated groups");
    }
    for (group, expected_len) in groups.iter().zip(GROUP_LENGTHS) {
        if group.len() != expected_len || !group.chars().all(|c| c.is_ascii_digit()) {
            return Err("RSBSA number groups must be digits in 2-2-2-3-6 format");
        }
    }
    Ok(())
}

/// Validate Philippine mobile number format
/// Accepts: 09171234567, 0917-123-4567, +639171234567
pub fn validate_philippine_mobile(phone: &str) -> Result<(), &'static str> {
    let digits: String = phone.chars().filter(|c| c.is_ascii_digit()).collect();

    // Local format: 11 digits starting with 09
    if digits.len() == 11 && digits.starts_with("09") {
        return Ok(());
    }
    // International format: 12 digits starting with 639
    if digits.len() == 12 && digits.starts_with("639") {
        return Ok(());
    }
    Err("Invalid Philippine mobile number")
}

// ============================================================================
// General Validations
// ============================================================================

/// Validate email format (basic check)
pub fn validate_email(email: &str) -> Result<(), &'static str> {
    if email.contains('@') && email.contains('.') && email.len() >= 5 {
        Ok(())
    } else {
        Err("Invalid email format")
    }
}

/// Validate password strength
pub fn validate_password(password: &str) -> Result<(), &'static str> {
    if password.len() < 8 {
        return Err("Password must be at least 8 characters");
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_valid_rsbsa_numbers() {
        assert!(validate_rsbsa_number("06-30-18-014-000001").is_ok());
        assert!(validate_rsbsa_number("01-01-01-001-999999").is_ok());
    }

    #[test]
    fn test_invalid_rsbsa_numbers() {
        assert!(validate_rsbsa_number("").is_err());
        assert!(validate_rsbsa_number("06-30-18-014").is_err()); // Missing group
        assert!(validate_rsbsa_number("6-30-18-014-000001").is_err()); // Short group
        assert!(validate_rsbsa_number("06-30-18-014-00000A").is_err()); // Non-digit
        assert!(validate_rsbsa_number("06 30 18 014 000001").is_err()); // Wrong separator
    }

    #[test]
    fn test_area_validation() {
        assert!(validate_area_hectares(Decimal::ZERO).is_ok());
        assert!(validate_area_hectares(Decimal::new(25, 1)).is_ok()); // 2.5
        assert!(validate_area_hectares(Decimal::from(-1)).is_err());
        assert!(validate_area_hectares(Decimal::from(10_001)).is_err());
    }

    #[test]
    fn test_harvest_area_validation() {
        let planted = Decimal::from(3);
        assert!(validate_harvest_area(Decimal::from(2), planted).is_ok());
        assert!(validate_harvest_area(planted, planted).is_ok());
        assert!(validate_harvest_area(Decimal::from(4), planted).is_err());
        assert!(validate_harvest_area(Decimal::from(-1), planted).is_err());
    }

    #[test]
    fn test_philippine_mobile() {
        assert!(validate_philippine_mobile("09171234567").is_ok());
        assert!(validate_philippine_mobile("0917-123-4567").is_ok());
        assert!(validate_philippine_mobile("+639171234567").is_ok());
        assert!(validate_philippine_mobile("1234567").is_err());
        assert!(validate_philippine_mobile("08171234567").is_err());
    }

    #[test]
    fn test_email_validation() {
        assert!(validate_email("opa@province.gov.ph").is_ok());
        assert!(validate_email("nope").is_err());
    }
}
