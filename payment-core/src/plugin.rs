use async_trait::async_trait;

use crate::checkout::CheckoutResponse;
use crate::method::PaymentMethod;
use crate::quote::Quote;

/// Checkout pre-condition, run before the order is saved. A failed
/// condition is recorded on the response; the plugin never aborts the
/// stack itself.
#[async_trait]
pub trait CheckoutPreConditionPlugin: Send + Sync {
    /// Provider this plugin checks payments for.
    fn provider_key(&self) -> &str;

    async fn check(&self, quote: &Quote, response: &mut CheckoutResponse);
}

/// Post-check hook, run after the order and its payments were saved.
#[async_trait]
pub trait CheckoutPostSavePlugin: Send + Sync {
    fn provider_key(&self) -> &str;

    async fn execute(&self, quote: &Quote, response: &mut CheckoutResponse);
}

/// Provider-specific payment persistence during order save. When no
/// plugin is registered for a payment's provider, the default
/// sales-payment writer persists it instead.
#[async_trait]
pub trait PaymentOrderSaverPlugin: Send + Sync {
    fn provider_key(&self) -> &str;

    async fn save_payment(&self, quote: &Quote, response: &mut CheckoutResponse);
}

/// Narrows the available-method list for a quote (e.g. hide invoice
/// payment above a cart total).
#[async_trait]
pub trait PaymentMethodFilterPlugin: Send + Sync {
    async fn filter(&self, methods: Vec<PaymentMethod>, quote: &Quote) -> Vec<PaymentMethod>;
}
