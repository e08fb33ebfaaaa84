use std::sync::Arc;

use uuid::Uuid;

use payment_core::method::{PaymentMethodResponse, PaymentProviderCollection};
use payment_core::repository::PaymentMethodRepository;
use payment_core::{PaymentError, PaymentResult};

/// Read side of the payment method administration surface.
pub struct PaymentMethodReader {
    repository: Arc<dyn PaymentMethodRepository>,
}

impl PaymentMethodReader {
    pub fn new(repository: Arc<dyn PaymentMethodRepository>) -> Self {
        Self { repository }
    }

    /// A missing method is an unsuccessful response, not an error.
    pub async fn find_payment_method_by_id(&self, id: Uuid) -> PaymentResult<PaymentMethodResponse> {
        let method = self
            .repository
            .find_method(id)
            .await
            .map_err(PaymentError::storage)?;

        Ok(match method {
            Some(method) => PaymentMethodResponse::success(method),
            None => PaymentMethodResponse::failure(format!("Payment method {} not found", id)),
        })
    }

    /// Providers offering at least one active method in the given store,
    /// with exactly those methods attached.
    pub async fn get_available_payment_providers_for_store(
        &self,
        store: &str,
    ) -> PaymentResult<PaymentProviderCollection> {
        let methods = self
            .repository
            .list_methods_for_store(store)
            .await
            .map_err(PaymentError::storage)?;

        let mut providers = Vec::new();
        for mut provider in self
            .repository
            .list_providers()
            .await
            .map_err(PaymentError::storage)?
        {
            let provider_methods: Vec<_> = methods
                .iter()
                .filter(|m| m.provider_id == provider.id)
                .cloned()
                .collect();
            if !provider_methods.is_empty() {
                provider.methods = provider_methods;
                providers.push(provider);
            }
        }

        Ok(PaymentProviderCollection { providers })
    }
}
