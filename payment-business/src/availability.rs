use std::sync::Arc;

use payment_core::method::PaymentMethods;
use payment_core::plugin::PaymentMethodFilterPlugin;
use payment_core::quote::Quote;
use payment_core::repository::PaymentMethodRepository;
use payment_core::{PaymentError, PaymentResult};

/// Assembles the method list offered during checkout: active methods
/// related to the quote's store, narrowed by the filter plugin stack.
pub struct PaymentMethodMarshaller {
    repository: Arc<dyn PaymentMethodRepository>,
    filters: Vec<Arc<dyn PaymentMethodFilterPlugin>>,
}

impl PaymentMethodMarshaller {
    pub fn new(
        repository: Arc<dyn PaymentMethodRepository>,
        filters: Vec<Arc<dyn PaymentMethodFilterPlugin>>,
    ) -> Self {
        Self {
            repository,
            filters,
        }
    }

    pub async fn get_available_methods(&self, quote: &Quote) -> PaymentResult<PaymentMethods> {
        let mut methods = self
            .repository
            .list_methods_for_store(&quote.store)
            .await
            .map_err(PaymentError::storage)?;

        for filter in &self.filters {
            methods = filter.filter(methods, quote).await;
        }

        Ok(PaymentMethods::new(methods))
    }
}
