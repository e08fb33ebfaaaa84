pub mod checkout;
pub mod method;
pub mod plugin;
pub mod quote;
pub mod repository;
pub mod sales;

pub use checkout::{CheckoutError, CheckoutResponse, SaveOrder};
pub use method::{
    PaymentMethod, PaymentMethodResponse, PaymentMethods, PaymentProvider,
    PaymentProviderCollection, PaymentProviderResponse, StoreRelation,
};
pub use quote::{CalculableObject, Payment, Quote, Totals};
pub use sales::{Order, SalesPayment};

#[derive(Debug, thiserror::Error)]
pub enum PaymentError {
    #[error("No sales payment recorded for order {order_id} and method {method_key}")]
    SalesPaymentNotFound {
        order_id: uuid::Uuid,
        method_key: String,
    },
    #[error("Storage error: {0}")]
    Storage(String),
}

impl PaymentError {
    pub fn storage(err: impl std::fmt::Display) -> Self {
        PaymentError::Storage(err.to_string())
    }
}

pub type PaymentResult<T> = Result<T, PaymentError>;
