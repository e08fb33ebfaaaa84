use async_trait::async_trait;
use uuid::Uuid;

use crate::method::{PaymentMethod, PaymentProvider};
use crate::sales::SalesPayment;

/// Repository trait for payment provider and method data access
#[async_trait]
pub trait PaymentMethodRepository: Send + Sync {
    async fn save_provider(
        &self,
        provider: &PaymentProvider,
    ) -> Result<(), Box<dyn std::error::Error + Send + Sync>>;

    async fn find_provider_by_key(
        &self,
        provider_key: &str,
    ) -> Result<Option<PaymentProvider>, Box<dyn std::error::Error + Send + Sync>>;

    async fn list_providers(
        &self,
    ) -> Result<Vec<PaymentProvider>, Box<dyn std::error::Error + Send + Sync>>;

    async fn save_method(
        &self,
        method: &PaymentMethod,
    ) -> Result<(), Box<dyn std::error::Error + Send + Sync>>;

    /// Replaces the stored row, store relation included.
    async fn update_method(
        &self,
        method: &PaymentMethod,
    ) -> Result<(), Box<dyn std::error::Error + Send + Sync>>;

    async fn find_method(
        &self,
        id: Uuid,
    ) -> Result<Option<PaymentMethod>, Box<dyn std::error::Error + Send + Sync>>;

    async fn find_method_by_key(
        &self,
        method_key: &str,
    ) -> Result<Option<PaymentMethod>, Box<dyn std::error::Error + Send + Sync>>;

    /// Active methods related to the given store.
    async fn list_methods_for_store(
        &self,
        store: &str,
    ) -> Result<Vec<PaymentMethod>, Box<dyn std::error::Error + Send + Sync>>;
}

/// Repository trait for persisted order payments
#[async_trait]
pub trait SalesPaymentRepository: Send + Sync {
    async fn save_sales_payment(
        &self,
        sales_payment: &SalesPayment,
    ) -> Result<(), Box<dyn std::error::Error + Send + Sync>>;

    async fn list_by_order(
        &self,
        order_id: Uuid,
    ) -> Result<Vec<SalesPayment>, Box<dyn std::error::Error + Send + Sync>>;

    async fn find_by_order_and_method(
        &self,
        order_id: Uuid,
        method_key: &str,
    ) -> Result<Option<SalesPayment>, Box<dyn std::error::Error + Send + Sync>>;
}
