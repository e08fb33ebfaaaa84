use serde::{Deserialize, Serialize};

/// A payment selected on a quote. `available_amount` is set for
/// limited-amount methods (gift cards, store credit) and `None` for
/// methods that can cover any remainder.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Payment {
    pub provider_key: String,
    pub method_key: String,
    pub payment_selection: String,
    pub amount: i64,
    pub available_amount: Option<i64>,
}

impl Payment {
    pub fn new(provider_key: impl Into<String>, method_key: impl Into<String>) -> Self {
        let provider_key = provider_key.into();
        let method_key = method_key.into();
        let payment_selection = format!("{}.{}", provider_key, method_key);
        Self {
            provider_key,
            method_key,
            payment_selection,
            amount: 0,
            available_amount: None,
        }
    }

    pub fn with_available_amount(mut self, available_amount: i64) -> Self {
        self.available_amount = Some(available_amount);
        self
    }
}

/// Quote totals in minor units.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct Totals {
    pub grand_total: i64,
    pub price_to_pay: i64,
}

/// The cart being checked out. Payment selections live in `payments`;
/// `payment` is the legacy single-payment field and every consumer has
/// to consider both.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Quote {
    pub customer_reference: Option<String>,
    pub store: String,
    pub currency: String,
    pub totals: Totals,
    pub payment: Option<Payment>,
    pub payments: Vec<Payment>,
}

impl Quote {
    pub fn new(store: impl Into<String>, currency: impl Into<String>) -> Self {
        Self {
            customer_reference: None,
            store: store.into(),
            currency: currency.into(),
            totals: Totals::default(),
            payment: None,
            payments: Vec::new(),
        }
    }

    /// All selected payments, legacy field included.
    pub fn all_payments(&self) -> impl Iterator<Item = &Payment> {
        self.payments.iter().chain(self.payment.iter())
    }
}

/// Recalculation input: the totals to distribute plus the payments
/// receiving the distribution.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CalculableObject {
    pub totals: Totals,
    pub payments: Vec<Payment>,
}

impl CalculableObject {
    pub fn from_quote(quote: &Quote) -> Self {
        Self {
            totals: quote.totals.clone(),
            payments: quote.all_payments().cloned().collect(),
        }
    }
}
