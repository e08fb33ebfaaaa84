use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Stores a payment method is offered in.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct StoreRelation {
    pub stores: Vec<String>,
}

impl StoreRelation {
    pub fn new(stores: Vec<String>) -> Self {
        Self { stores }
    }

    pub fn contains(&self, store: &str) -> bool {
        self.stores.iter().any(|s| s == store)
    }
}

/// A concrete way to pay, owned by a provider.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct PaymentMethod {
    pub id: Uuid,
    pub provider_id: Uuid,
    pub method_key: String,
    pub name: String,
    pub is_active: bool,
    pub store_relation: StoreRelation,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl PaymentMethod {
    pub fn new(provider_id: Uuid, method_key: impl Into<String>, name: impl Into<String>) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            provider_id,
            method_key: method_key.into(),
            name: name.into(),
            is_active: true,
            store_relation: StoreRelation::default(),
            created_at: now,
            updated_at: now,
        }
    }

    pub fn with_stores(mut self, stores: Vec<String>) -> Self {
        self.store_relation = StoreRelation::new(stores);
        self
    }

    /// Offered for a store when active and related to it.
    pub fn is_available_for_store(&self, store: &str) -> bool {
        self.is_active && self.store_relation.contains(store)
    }
}

/// A payment integration (e.g. an acquirer) grouping its methods.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PaymentProvider {
    pub id: Uuid,
    pub provider_key: String,
    pub name: String,
    pub methods: Vec<PaymentMethod>,
    pub created_at: DateTime<Utc>,
}

impl PaymentProvider {
    pub fn new(provider_key: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            provider_key: provider_key.into(),
            name: name.into(),
            methods: Vec::new(),
            created_at: Utc::now(),
        }
    }
}

/// Method list returned to the checkout step.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PaymentMethods {
    pub methods: Vec<PaymentMethod>,
}

impl PaymentMethods {
    pub fn new(methods: Vec<PaymentMethod>) -> Self {
        Self { methods }
    }

    pub fn is_empty(&self) -> bool {
        self.methods.is_empty()
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PaymentProviderCollection {
    pub providers: Vec<PaymentProvider>,
}

/// Outcome of a method read or write. Business failures (missing row,
/// missing required field) are reported here, not as errors.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PaymentMethodResponse {
    pub is_successful: bool,
    pub payment_method: Option<PaymentMethod>,
    pub messages: Vec<String>,
}

impl PaymentMethodResponse {
    pub fn success(payment_method: PaymentMethod) -> Self {
        Self {
            is_successful: true,
            payment_method: Some(payment_method),
            messages: Vec::new(),
        }
    }

    pub fn failure(message: impl Into<String>) -> Self {
        Self {
            is_successful: false,
            payment_method: None,
            messages: vec![message.into()],
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PaymentProviderResponse {
    pub is_successful: bool,
    pub payment_provider: Option<PaymentProvider>,
    pub messages: Vec<String>,
}

impl PaymentProviderResponse {
    pub fn success(payment_provider: PaymentProvider) -> Self {
        Self {
            is_successful: true,
            payment_provider: Some(payment_provider),
            messages: Vec::new(),
        }
    }

    pub fn failure(message: impl Into<String>) -> Self {
        Self {
            is_successful: false,
            payment_provider: None,
            messages: vec![message.into()],
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn method_availability_requires_active_and_store_relation() {
        let provider = PaymentProvider::new("dummy", "Dummy");
        let method = PaymentMethod::new(provider.id, "dummy.invoice", "Invoice")
            .with_stores(vec!["DE".to_string(), "AT".to_string()]);

        assert!(method.is_available_for_store("DE"));
        assert!(!method.is_available_for_store("US"));

        let mut inactive = method.clone();
        inactive.is_active = false;
        assert!(!inactive.is_available_for_store("DE"));
    }
}
