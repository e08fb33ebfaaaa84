use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A single failed checkout condition.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct CheckoutError {
    pub error_code: i32,
    pub message: String,
}

impl CheckoutError {
    pub fn new(error_code: i32, message: impl Into<String>) -> Self {
        Self {
            error_code,
            message: message.into(),
        }
    }
}

/// Reference to the order created during checkout, filled by the order
/// save step before payment persistence runs.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct SaveOrder {
    pub order_id: Uuid,
    pub order_reference: String,
}

/// Shared response object passed through the checkout plugin stacks.
/// Plugins report failed conditions by recording errors here instead of
/// returning them; the checkout succeeded when no errors were recorded.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CheckoutResponse {
    pub errors: Vec<CheckoutError>,
    pub save_order: Option<SaveOrder>,
}

impl CheckoutResponse {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_save_order(order_id: Uuid, order_reference: impl Into<String>) -> Self {
        Self {
            errors: Vec::new(),
            save_order: Some(SaveOrder {
                order_id,
                order_reference: order_reference.into(),
            }),
        }
    }

    pub fn add_error(&mut self, error: CheckoutError) {
        self.errors.push(error);
    }

    pub fn is_success(&self) -> bool {
        self.errors.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn response_without_errors_is_success() {
        let response = CheckoutResponse::new();
        assert!(response.is_success());
    }

    #[test]
    fn recorded_error_fails_the_response() {
        let mut response = CheckoutResponse::new();
        response.add_error(CheckoutError::new(4001, "payment method unavailable"));
        assert!(!response.is_success());
        assert_eq!(response.errors.len(), 1);
    }
}
