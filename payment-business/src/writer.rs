use std::sync::Arc;

use tracing::info;
use uuid::Uuid;

use payment_core::method::{
    PaymentMethod, PaymentMethodResponse, PaymentProvider, PaymentProviderResponse,
};
use payment_core::repository::PaymentMethodRepository;
use payment_core::{PaymentError, PaymentResult};

/// Write side of the payment method administration surface. Required
/// fields and duplicate keys produce unsuccessful responses; only
/// storage failures are errors.
pub struct PaymentMethodWriter {
    repository: Arc<dyn PaymentMethodRepository>,
}

impl PaymentMethodWriter {
    pub fn new(repository: Arc<dyn PaymentMethodRepository>) -> Self {
        Self { repository }
    }

    /// Creates the provider and any nested methods with their store
    /// relations. Nothing is persisted when validation fails.
    pub async fn create_payment_provider(
        &self,
        mut provider: PaymentProvider,
    ) -> PaymentResult<PaymentProviderResponse> {
        if provider.provider_key.is_empty() {
            return Ok(PaymentProviderResponse::failure(
                "Payment provider key is required",
            ));
        }
        if provider.name.is_empty() {
            return Ok(PaymentProviderResponse::failure(
                "Payment provider name is required",
            ));
        }
        for method in &provider.methods {
            if method.method_key.is_empty() {
                return Ok(PaymentProviderResponse::failure(
                    "Payment method key is required",
                ));
            }
            if method.name.is_empty() {
                return Ok(PaymentProviderResponse::failure(
                    "Payment method name is required",
                ));
            }
            if self.method_key_taken(&method.method_key).await? {
                return Ok(PaymentProviderResponse::failure(format!(
                    "Payment method {} already exists",
                    method.method_key
                )));
            }
        }

        let existing = self
            .repository
            .find_provider_by_key(&provider.provider_key)
            .await
            .map_err(PaymentError::storage)?;
        if existing.is_some() {
            return Ok(PaymentProviderResponse::failure(format!(
                "Payment provider {} already exists",
                provider.provider_key
            )));
        }

        for method in &mut provider.methods {
            method.provider_id = provider.id;
        }

        self.repository
            .save_provider(&provider)
            .await
            .map_err(PaymentError::storage)?;
        for method in &provider.methods {
            self.repository
                .save_method(method)
                .await
                .map_err(PaymentError::storage)?;
        }

        info!(
            provider_key = %provider.provider_key,
            methods = provider.methods.len(),
            "Created payment provider"
        );
        Ok(PaymentProviderResponse::success(provider))
    }

    pub async fn create_payment_method(
        &self,
        method: PaymentMethod,
    ) -> PaymentResult<PaymentMethodResponse> {
        if method.method_key.is_empty() {
            return Ok(PaymentMethodResponse::failure(
                "Payment method key is required",
            ));
        }
        if method.name.is_empty() {
            return Ok(PaymentMethodResponse::failure(
                "Payment method name is required",
            ));
        }
        if self.method_key_taken(&method.method_key).await? {
            return Ok(PaymentMethodResponse::failure(format!(
                "Payment method {} already exists",
                method.method_key
            )));
        }

        self.repository
            .save_method(&method)
            .await
            .map_err(PaymentError::storage)?;

        info!(method_key = %method.method_key, "Created payment method");
        Ok(PaymentMethodResponse::success(method))
    }

    /// Replaces the stored method, store relation included.
    pub async fn update_payment_method(
        &self,
        mut method: PaymentMethod,
    ) -> PaymentResult<PaymentMethodResponse> {
        let existing = self
            .repository
            .find_method(method.id)
            .await
            .map_err(PaymentError::storage)?;
        if existing.is_none() {
            return Ok(PaymentMethodResponse::failure(format!(
                "Payment method {} not found",
                method.id
            )));
        }

        method.updated_at = chrono::Utc::now();
        self.repository
            .update_method(&method)
            .await
            .map_err(PaymentError::storage)?;

        info!(method_key = %method.method_key, "Updated payment method");
        Ok(PaymentMethodResponse::success(method))
    }

    pub async fn activate_payment_method(&self, id: Uuid) -> PaymentResult<PaymentMethodResponse> {
        self.set_active(id, true).await
    }

    pub async fn deactivate_payment_method(
        &self,
        id: Uuid,
    ) -> PaymentResult<PaymentMethodResponse> {
        self.set_active(id, false).await
    }

    // Method keys are unique across providers, same as the database
    // constraint.
    async fn method_key_taken(&self, method_key: &str) -> PaymentResult<bool> {
        let existing = self
            .repository
            .find_method_by_key(method_key)
            .await
            .map_err(PaymentError::storage)?;
        Ok(existing.is_some())
    }

    async fn set_active(&self, id: Uuid, is_active: bool) -> PaymentResult<PaymentMethodResponse> {
        let method = self
            .repository
            .find_method(id)
            .await
            .map_err(PaymentError::storage)?;

        let Some(mut method) = method else {
            return Ok(PaymentMethodResponse::failure(format!(
                "Payment method {} not found",
                id
            )));
        };

        method.is_active = is_active;
        method.updated_at = chrono::Utc::now();
        self.repository
            .update_method(&method)
            .await
            .map_err(PaymentError::storage)?;

        info!(method_key = %method.method_key, is_active, "Toggled payment method");
        Ok(PaymentMethodResponse::success(method))
    }
}
