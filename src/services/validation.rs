use regex::Regex;
use std::sync::LazyLock;

use crate::domain::house::House;
use crate::services::error_handling::{ListingError, LogHelper};

static SCRIPT_INJECTION_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)(<script|javascript:|on\w+\s*=|<iframe|<embed|<object)")
        .expect("static pattern is valid")
});

/// Size limits for listing fields
pub struct SizeLimits;

impl SizeLimits {
    pub const MAX_TEXT_LENGTH: usize = 200;
    pub const MAX_PRICE: f64 = 1e12;
}

/// Input validation for listings entering the store
pub struct InputValidator;

impl InputValidator {
    /// Check a free-text field such as an address or country. The value is never altered.
    pub fn validate_text(field: &str, value: &str) -> Result<(), ListingError> {
        let trimmed = value.trim();

        if trimmed.is_empty() {
            return Err(Self::reject(field, value, "cannot be empty"));
        }

        if trimmed.chars().count() > SizeLimits::MAX_TEXT_LENGTH {
            return Err(Self::reject(field, value, "cannot exceed 200 characters"));
        }

        if SCRIPT_INJECTION_PATTERN.is_match(trimmed) {
            return Err(Self::reject(field, value, "contains script content"));
        }

        if value.chars().any(|c| c.is_control() && !c.is_whitespace()) {
            return Err(Self::reject(field, value, "contains control characters"));
        }

        Ok(())
    }

    /// Validate an asking price
    pub fn validate_price(price: f64) -> Result<(), ListingError> {
        if price.is_nan() || price.is_infinite() {
            return Err(Self::reject("price", &price.to_string(), "must be a valid number"));
        }
        if price < 0.0 {
            return Err(Self::reject("price", &price.to_string(), "cannot be negative"));
        }
        if price > SizeLimits::MAX_PRICE {
            return Err(Self::reject("price", &price.to_string(), "is unrealistically large"));
        }
        Ok(())
    }

    /// Validate a whole listing as given
    pub fn validate_house(house: &House) -> Result<(), ListingError> {
        Self::validate_text("address", &house.address)?;
        Self::validate_text("country", &house.country)?;
        Self::validate_price(house.price)
    }

    fn reject(field: &str, value: &str, reason: &str) -> ListingError {
        LogHelper::log_validation_failure(field, value, reason);
        ListingError::validation(field, reason)
    }
}
