//! Validation helpers for CultivaLab
//!
//! Pure shape and range checks; the services translate failures into their
//! own error types.

/// Lowest accepted daily mean temperature in °C (inclusive).
pub const MIN_TEMPERATURE: f64 = -10.0;

/// Upper bound for daily mean temperature in °C (exclusive; 56.7 °C is the
/// highest air temperature ever recorded).
pub const MAX_TEMPERATURE: f64 = 56.7;

/// Hours in a day; upper bound for daily sunlight (inclusive).
pub const MAX_SUN_HOURS: f64 = 24.0;

const MIN_USERNAME_LENGTH: usize = 3;
const MAX_USERNAME_LENGTH: usize = 32;
const MIN_PASSWORD_LENGTH: usize = 8;

// ============================================================================
// Weather Validations
// ============================================================================

/// Validate a daily mean temperature, accepted range [-10, 56.7) °C
pub fn validate_temperature(temperature: f64) -> Result<(), &'static str> {
    if !temperature.is_finite() {
        return Err("Temperature must be a finite number");
    }
    if temperature < MIN_TEMPERATURE {
        return Err("Temperature cannot be below -10 °C");
    }
    if temperature >= MAX_TEMPERATURE {
        return Err("Temperature must be below 56.7 °C");
    }
    Ok(())
}

/// Validate a daily rainfall volume in mm
pub fn validate_rain(rain: f64) -> Result<(), &'static str> {
    if !rain.is_finite() {
        return Err("Rain must be a finite number");
    }
    if rain < 0.0 {
        return Err("Rain cannot be negative");
    }
    Ok(())
}

/// Validate daily sunlight, accepted range [0, 24] hours
pub fn validate_sun_hours(sun_hours: f64) -> Result<(), &'static str> {
    if !sun_hours.is_finite() {
        return Err("Sun hours must be a finite number");
    }
    if sun_hours < 0.0 {
        return Err("Sun hours cannot be negative");
    }
    if sun_hours > MAX_SUN_HOURS {
        return Err("Sun hours cannot exceed 24");
    }
    Ok(())
}

// ============================================================================
// Account Validations
// ============================================================================

/// Validate a username (3-32 characters, not blank)
pub fn validate_username(username: &str) -> Result<(), &'static str> {
    let trimmed = username.trim();
    if trimmed.is_empty() {
        return Err("Username cannot be blank");
    }
    if trimmed.len() < MIN_USERNAME_LENGTH {
        return Err("Username must be at least 3 characters");
    }
    if trimmed.len() > MAX_USERNAME_LENGTH {
        return Err("Username must be at most 32 characters");
    }
    Ok(())
}

/// Validate password strength
pub fn validate_password(password: &str) -> Result<(), &'static str> {
    if password.len() < MIN_PASSWORD_LENGTH {
        return Err("Password must be at least 8 characters");
    }
    Ok(())
}

// ============================================================================
// Crop Validations
// ============================================================================

/// Validate a crop or crop-type name (not blank or whitespace-only)
pub fn validate_name(name: &str) -> Result<(), &'static str> {
    if name.trim().is_empty() {
        return Err("Name cannot be blank");
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    // ========================================================================
    // Weather Validation Tests
    // ========================================================================

    #[test]
    fn test_validate_temperature_valid() {
        assert!(validate_temperature(25.0).is_ok());
        assert!(validate_temperature(0.0).is_ok());
        // Lower bound is inclusive
        assert!(validate_temperature(-10.0).is_ok());
        assert!(validate_temperature(56.69).is_ok());
    }

    #[test]
    fn test_validate_temperature_invalid() {
        assert!(validate_temperature(-10.01).is_err());
        // Upper bound is exclusive
        assert!(validate_temperature(56.7).is_err());
        assert!(validate_temperature(100.0).is_err());
        assert!(validate_temperature(f64::NAN).is_err());
        assert!(validate_temperature(f64::INFINITY).is_err());
    }

    #[test]
    fn test_validate_rain_valid() {
        assert!(validate_rain(0.0).is_ok());
        assert!(validate_rain(5.5).is_ok());
        assert!(validate_rain(300.0).is_ok());
    }

    #[test]
    fn test_validate_rain_invalid() {
        assert!(validate_rain(-0.01).is_err());
        assert!(validate_rain(f64::NAN).is_err());
    }

    #[test]
    fn test_validate_sun_hours_valid() {
        assert!(validate_sun_hours(0.0).is_ok());
        assert!(validate_sun_hours(8.0).is_ok());
        assert!(validate_sun_hours(24.0).is_ok());
    }

    #[test]
    fn test_validate_sun_hours_invalid() {
        assert!(validate_sun_hours(-0.1).is_err());
        assert!(validate_sun_hours(24.01).is_err());
        assert!(validate_sun_hours(f64::NAN).is_err());
    }

    // ========================================================================
    // Account Validation Tests
    // ========================================================================

    #[test]
    fn test_validate_username_valid() {
        assert!(validate_username("ana").is_ok());
        assert!(validate_username("farmer_01").is_ok());
    }

    #[test]
    fn test_validate_username_invalid() {
        assert!(validate_username("").is_err());
        assert!(validate_username("   ").is_err());
        assert!(validate_username("ab").is_err()); // Too short
        assert!(validate_username(&"a".repeat(33)).is_err()); // Too long
    }

    #[test]
    fn test_validate_password() {
        assert!(validate_password("password123").is_ok());
        assert!(validate_password("12345678").is_ok());
        assert!(validate_password("short").is_err());
    }

    // ========================================================================
    // Crop Validation Tests
    // ========================================================================

    #[test]
    fn test_validate_name() {
        assert!(validate_name("Winter wheat").is_ok());
        assert!(validate_name("").is_err());
        assert!(validate_name(" \t ").is_err());
    }
}
