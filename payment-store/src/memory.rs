use std::collections::HashMap;

use async_trait::async_trait;
use tokio::sync::RwLock;
use uuid::Uuid;

use payment_core::method::{PaymentMethod, PaymentProvider};
use payment_core::repository::{PaymentMethodRepository, SalesPaymentRepository};
use payment_core::sales::SalesPayment;

/// In-memory implementation of both payment repositories, used by tests
/// and embedded setups.
#[derive(Default)]
pub struct InMemoryPaymentStore {
    providers: RwLock<HashMap<Uuid, PaymentProvider>>,
    methods: RwLock<HashMap<Uuid, PaymentMethod>>,
    sales_payments: RwLock<HashMap<Uuid, SalesPayment>>,
}

impl InMemoryPaymentStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl PaymentMethodRepository for InMemoryPaymentStore {
    async fn save_provider(
        &self,
        provider: &PaymentProvider,
    ) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
        self.providers
            .write()
            .await
            .insert(provider.id, provider.clone());
        Ok(())
    }

    async fn find_provider_by_key(
        &self,
        provider_key: &str,
    ) -> Result<Option<PaymentProvider>, Box<dyn std::error::Error + Send + Sync>> {
        Ok(self
            .providers
            .read()
            .await
            .values()
            .find(|p| p.provider_key == provider_key)
            .cloned())
    }

    async fn list_providers(
        &self,
    ) -> Result<Vec<PaymentProvider>, Box<dyn std::error::Error + Send + Sync>> {
        let mut providers: Vec<_> = self.providers.read().await.values().cloned().collect();
        providers.sort_by(|a, b| a.provider_key.cmp(&b.provider_key));
        Ok(providers)
    }

    async fn save_method(
        &self,
        method: &PaymentMethod,
    ) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
        self.methods.write().await.insert(method.id, method.clone());
        Ok(())
    }

    async fn update_method(
        &self,
        method: &PaymentMethod,
    ) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
        self.methods.write().await.insert(method.id, method.clone());
        Ok(())
    }

    async fn find_method(
        &self,
        id: Uuid,
    ) -> Result<Option<PaymentMethod>, Box<dyn std::error::Error + Send + Sync>> {
        Ok(self.methods.read().await.get(&id).cloned())
    }

    async fn find_method_by_key(
        &self,
        method_key: &str,
    ) -> Result<Option<PaymentMethod>, Box<dyn std::error::Error + Send + Sync>> {
        Ok(self
            .methods
            .read()
            .await
            .values()
            .find(|m| m.method_key == method_key)
            .cloned())
    }

    async fn list_methods_for_store(
        &self,
        store: &str,
    ) -> Result<Vec<PaymentMethod>, Box<dyn std::error::Error + Send + Sync>> {
        let mut methods: Vec<_> = self
            .methods
            .read()
            .await
            .values()
            .filter(|m| m.is_available_for_store(store))
            .cloned()
            .collect();
        methods.sort_by(|a, b| a.method_key.cmp(&b.method_key));
        Ok(methods)
    }
}

#[async_trait]
impl SalesPaymentRepository for InMemoryPaymentStore {
    async fn save_sales_payment(
        &self,
        sales_payment: &SalesPayment,
    ) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
        self.sales_payments
            .write()
            .await
            .insert(sales_payment.id, sales_payment.clone());
        Ok(())
    }

    async fn list_by_order(
        &self,
        order_id: Uuid,
    ) -> Result<Vec<SalesPayment>, Box<dyn std::error::Error + Send + Sync>> {
        let mut payments: Vec<_> = self
            .sales_payments
            .read()
            .await
            .values()
            .filter(|p| p.order_id == order_id)
            .cloned()
            .collect();
        payments.sort_by_key(|p| p.created_at);
        Ok(payments)
    }

    async fn find_by_order_and_method(
        &self,
        order_id: Uuid,
        method_key: &str,
    ) -> Result<Option<SalesPayment>, Box<dyn std::error::Error + Send + Sync>> {
        Ok(self
            .sales_payments
            .read()
            .await
            .values()
            .find(|p| p.order_id == order_id && p.method_key == method_key)
            .cloned())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use payment_core::quote::Payment;

    #[tokio::test]
    async fn store_filter_excludes_inactive_and_unrelated_methods() {
        let store = InMemoryPaymentStore::new();
        let provider = PaymentProvider::new("dummy", "Dummy");
        store.save_provider(&provider).await.unwrap();

        let related = PaymentMethod::new(provider.id, "dummy.invoice", "Invoice")
            .with_stores(vec!["DE".to_string()]);
        let unrelated = PaymentMethod::new(provider.id, "dummy.transfer", "Transfer")
            .with_stores(vec!["US".to_string()]);
        let mut inactive = PaymentMethod::new(provider.id, "dummy.cod", "Cash on delivery")
            .with_stores(vec!["DE".to_string()]);
        inactive.is_active = false;

        for method in [&related, &unrelated, &inactive] {
            store.save_method(method).await.unwrap();
        }

        let methods = store.list_methods_for_store("DE").await.unwrap();
        assert_eq!(methods.len(), 1);
        assert_eq!(methods[0].method_key, "dummy.invoice");
    }

    #[tokio::test]
    async fn sales_payments_can_be_found_by_order_and_method() {
        let store = InMemoryPaymentStore::new();
        let order_id = Uuid::new_v4();

        let mut payment = Payment::new("dummy", "dummy.invoice");
        payment.amount = 4_200;
        let sales_payment = SalesPayment::from_payment(order_id, &payment);
        store.save_sales_payment(&sales_payment).await.unwrap();

        let found = store
            .find_by_order_and_method(order_id, "dummy.invoice")
            .await
            .unwrap()
            .unwrap();
        assert_eq!(found.amount, 4_200);

        let missing = store
            .find_by_order_and_method(order_id, "dummy.transfer")
            .await
            .unwrap();
        assert!(missing.is_none());
    }
}
