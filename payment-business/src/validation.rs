use std::sync::Arc;

use payment_core::checkout::{CheckoutError, CheckoutResponse};
use payment_core::quote::Quote;
use payment_core::repository::PaymentMethodRepository;
use payment_core::{PaymentError, PaymentResult};

/// Error recorded for a selected method that does not exist or is not
/// offered in the quote's store.
pub const ERROR_CODE_PAYMENT_METHOD_INVALID: i32 = 4001;

/// Validates that every payment selected on the quote (legacy single
/// payment included) maps to a method available in the quote's store.
pub struct QuotePaymentValidator {
    repository: Arc<dyn PaymentMethodRepository>,
}

impl QuotePaymentValidator {
    pub fn new(repository: Arc<dyn PaymentMethodRepository>) -> Self {
        Self { repository }
    }

    /// Records one error per invalid selection and returns whether all
    /// selections were valid.
    pub async fn is_quote_payment_method_valid(
        &self,
        quote: &Quote,
        response: &mut CheckoutResponse,
    ) -> PaymentResult<bool> {
        let mut valid = true;

        for payment in quote.all_payments() {
            let method = self
                .repository
                .find_method_by_key(&payment.method_key)
                .await
                .map_err(PaymentError::storage)?;

            let available = method
                .map(|m| m.is_available_for_store(&quote.store))
                .unwrap_or(false);

            if !available {
                valid = false;
                response.add_error(CheckoutError::new(
                    ERROR_CODE_PAYMENT_METHOD_INVALID,
                    format!(
                        "Payment method {} is not available in store {}",
                        payment.method_key, quote.store
                    ),
                ));
            }
        }

        Ok(valid)
    }
}
