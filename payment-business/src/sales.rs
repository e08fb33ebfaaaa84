use std::sync::Arc;

use tracing::info;

use payment_core::checkout::{CheckoutError, CheckoutResponse};
use payment_core::quote::Payment;
use payment_core::repository::SalesPaymentRepository;
use payment_core::sales::{Order, SalesPayment};
use payment_core::{PaymentError, PaymentResult};

/// Error recorded when payment persistence runs without a saved order.
pub const ERROR_CODE_ORDER_NOT_SAVED: i32 = 4002;

/// Default payment persistence for providers without an order-saver
/// plugin of their own.
pub struct SalesPaymentWriter {
    repository: Arc<dyn SalesPaymentRepository>,
}

impl SalesPaymentWriter {
    pub fn new(repository: Arc<dyn SalesPaymentRepository>) -> Self {
        Self { repository }
    }

    /// Persists one quote payment against the order recorded on the
    /// response. A missing save-order reference is a recorded checkout
    /// error, not a storage failure.
    pub async fn save_payment(
        &self,
        payment: &Payment,
        response: &mut CheckoutResponse,
    ) -> PaymentResult<()> {
        let Some(save_order) = response.save_order.clone() else {
            response.add_error(CheckoutError::new(
                ERROR_CODE_ORDER_NOT_SAVED,
                format!(
                    "Cannot persist payment {}: no order was saved for this checkout",
                    payment.payment_selection
                ),
            ));
            return Ok(());
        };

        let sales_payment = SalesPayment::from_payment(save_order.order_id, payment);
        self.repository
            .save_sales_payment(&sales_payment)
            .await
            .map_err(PaymentError::storage)?;

        info!(
            order_reference = %save_order.order_reference,
            method_key = %payment.method_key,
            amount = payment.amount,
            "Saved sales payment"
        );
        Ok(())
    }
}

/// Read side of persisted order payments.
pub struct SalesPaymentReader {
    repository: Arc<dyn SalesPaymentRepository>,
}

impl SalesPaymentReader {
    pub fn new(repository: Arc<dyn SalesPaymentRepository>) -> Self {
        Self { repository }
    }

    /// Returns the persisted amount for the row matching the given
    /// payment's order and method key.
    pub async fn get_price_to_pay(&self, sales_payment: &SalesPayment) -> PaymentResult<i64> {
        let stored = self
            .repository
            .find_by_order_and_method(sales_payment.order_id, &sales_payment.method_key)
            .await
            .map_err(PaymentError::storage)?;

        stored
            .map(|row| row.amount)
            .ok_or_else(|| PaymentError::SalesPaymentNotFound {
                order_id: sales_payment.order_id,
                method_key: sales_payment.method_key.clone(),
            })
    }
}

/// Attaches persisted payments to an order.
pub struct PaymentHydrator {
    repository: Arc<dyn SalesPaymentRepository>,
}

impl PaymentHydrator {
    pub fn new(repository: Arc<dyn SalesPaymentRepository>) -> Self {
        Self { repository }
    }

    pub async fn hydrate_order_payments(&self, mut order: Order) -> PaymentResult<Order> {
        order.payments = self
            .repository
            .list_by_order(order.id)
            .await
            .map_err(PaymentError::storage)?;
        Ok(order)
    }
}
