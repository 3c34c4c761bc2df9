use anyhow::{Context, Result};
use std::fmt;
use thiserror::Error;
use tracing::{error, info, warn};

use crate::domain::house::HouseId;

/// Errors the listing store reports back to the view layer.
#[derive(Error, Debug)]
pub enum ListingError {
    #[error("A listing with id {id} already exists")]
    DuplicateId { id: HouseId },

    #[error("Validation failed for {field}: {reason}")]
    Validation { field: String, reason: String },
}

impl ListingError {
    pub fn validation(field: impl Into<String>, reason: impl Into<String>) -> Self {
        ListingError::Validation {
            field: field.into(),
            reason: reason.into(),
        }
    }
}

/// Error context wrapper for better debugging
pub struct ErrorContext {
    operation: String,
    details: Vec<(String, String)>,
}

impl ErrorContext {
    pub fn new(operation: impl Into<String>) -> Self {
        Self {
            operation: operation.into(),
            details: Vec::new(),
        }
    }

    pub fn with_detail(mut self, key: impl Into<String>, value: impl fmt::Display) -> Self {
        self.details.push((key.into(), value.to_string()));
        self
    }

    pub fn wrap<T>(self, result: Result<T>) -> Result<T> {
        result.with_context(|| {
            let mut msg = format!("Operation '{}' failed", self.operation);
            if !self.details.is_empty() {
                msg.push_str(" with context:");
                for (key, value) in self.details {
                    msg.push_str(&format!("\n  {}: {}", key, value));
                }
            }
            msg
        })
    }
}

/// Structured logging helpers
pub struct LogHelper;

impl LogHelper {
    pub fn log_listing_operation(operation: &str, house_id: HouseId, success: bool) {
        if success {
            info!(
                house_id = %house_id,
                operation = %operation,
                "Listing operation completed"
            );
        } else {
            warn!(
                house_id = %house_id,
                operation = %operation,
                "Listing operation had no effect"
            );
        }
    }

    pub fn log_error_with_context(context: &str, error: &anyhow::Error) {
        error!(
            context = %context,
            error = %error,
            error_chain = ?error.chain().map(|e| e.to_string()).collect::<Vec<_>>(),
            "Error occurred"
        );
    }

    pub fn log_validation_failure(field: &str, value: &str, reason: &str) {
        warn!(
            field = %field,
            value = %value,
            reason = %reason,
            "Validation failed"
        );
    }
}

/// User-friendly error messages
pub struct UserErrorFormatter;

impl UserErrorFormatter {
    pub fn format_for_ui(error: &anyhow::Error) -> String {
        if let Some(listing_error) = error.downcast_ref::<ListingError>() {
            return Self::format_listing_error(listing_error);
        }

        let error_str = error.to_string().to_lowercase();
        if error_str.contains("database") || error_str.contains("sqlite") {
            return "A storage error occurred. Your last change may not have been saved.".to_string();
        }

        "An unexpected error occurred. Please try again.".to_string()
    }

    fn format_listing_error(error: &ListingError) -> String {
        match error {
            ListingError::DuplicateId { id } => {
                format!("Listing {} is already on the market.", id)
            }
            ListingError::Validation { field, reason } => {
                format!("Invalid {}: {}", field, reason)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_formatting() {
        let error = ListingError::DuplicateId { id: HouseId(9) };
        let formatted = UserErrorFormatter::format_listing_error(&error);
        assert!(formatted.contains("already on the market"));
    }

    #[test]
    fn test_format_for_ui_downcasts() {
        let error = anyhow::Error::new(ListingError::validation("price", "cannot be negative"));
        assert_eq!(
            UserErrorFormatter::format_for_ui(&error),
            "Invalid price: cannot be negative"
        );
    }

    #[test]
    fn test_error_context() {
        let result: Result<()> = Err(anyhow::anyhow!("disk full"));

        let wrapped = ErrorContext::new("persist_search")
            .with_detail("key", "search")
            .with_detail("attempt", 1)
            .wrap(result);

        let error_msg = format!("{:#}", wrapped.unwrap_err());
        assert!(error_msg.contains("persist_search"));
        assert!(error_msg.contains("key: search"));
        assert!(error_msg.contains("disk full"));
    }
}
