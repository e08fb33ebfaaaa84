use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::quote::Payment;

/// Persisted payment row for a placed order.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct SalesPayment {
    pub id: Uuid,
    pub order_id: Uuid,
    pub provider_key: String,
    pub method_key: String,
    pub amount: i64,
    pub created_at: DateTime<Utc>,
}

impl SalesPayment {
    /// Builds the persistence row from a quote payment and the order it
    /// was saved for.
    pub fn from_payment(order_id: Uuid, payment: &Payment) -> Self {
        Self {
            id: Uuid::new_v4(),
            order_id,
            provider_key: payment.provider_key.clone(),
            method_key: payment.method_key.clone(),
            amount: payment.amount,
            created_at: Utc::now(),
        }
    }
}

/// Order view used by the payment hydrator.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Order {
    pub id: Uuid,
    pub order_reference: String,
    pub payments: Vec<SalesPayment>,
}

impl Order {
    pub fn new(id: Uuid, order_reference: impl Into<String>) -> Self {
        Self {
            id,
            order_reference: order_reference.into(),
            payments: Vec::new(),
        }
    }
}
