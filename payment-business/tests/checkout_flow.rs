use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use async_trait::async_trait;
use uuid::Uuid;

use payment_business::{PaymentFacade, PaymentPlugins};
use payment_core::checkout::{CheckoutError, CheckoutResponse};
use payment_core::method::{PaymentMethod, PaymentProvider};
use payment_core::plugin::{
    CheckoutPostSavePlugin, CheckoutPreConditionPlugin, PaymentMethodFilterPlugin,
    PaymentOrderSaverPlugin,
};
use payment_core::quote::{Payment, Quote};
use payment_core::repository::{PaymentMethodRepository, SalesPaymentRepository};
use payment_core::sales::{Order, SalesPayment};
use payment_core::PaymentError;
use payment_store::InMemoryPaymentStore;

struct RejectingPreConditionPlugin {
    provider_key: String,
}

#[async_trait]
impl CheckoutPreConditionPlugin for RejectingPreConditionPlugin {
    fn provider_key(&self) -> &str {
        &self.provider_key
    }

    async fn check(&self, _quote: &Quote, response: &mut CheckoutResponse) {
        response.add_error(CheckoutError::new(4900, "card declined"));
    }
}

struct CountingPostSavePlugin {
    provider_key: String,
    calls: Arc<AtomicUsize>,
}

#[async_trait]
impl CheckoutPostSavePlugin for CountingPostSavePlugin {
    fn provider_key(&self) -> &str {
        &self.provider_key
    }

    async fn execute(&self, _quote: &Quote, _response: &mut CheckoutResponse) {
        self.calls.fetch_add(1, Ordering::SeqCst);
    }
}

struct NoopOrderSaverPlugin {
    provider_key: String,
    calls: Arc<AtomicUsize>,
}

#[async_trait]
impl PaymentOrderSaverPlugin for NoopOrderSaverPlugin {
    fn provider_key(&self) -> &str {
        &self.provider_key
    }

    async fn save_payment(&self, _quote: &Quote, _response: &mut CheckoutResponse) {
        self.calls.fetch_add(1, Ordering::SeqCst);
    }
}

struct MaxTotalFilterPlugin {
    method_key: String,
    max_grand_total: i64,
}

#[async_trait]
impl PaymentMethodFilterPlugin for MaxTotalFilterPlugin {
    async fn filter(&self, methods: Vec<PaymentMethod>, quote: &Quote) -> Vec<PaymentMethod> {
        if quote.totals.grand_total <= self.max_grand_total {
            return methods;
        }
        methods
            .into_iter()
            .filter(|m| m.method_key != self.method_key)
            .collect()
    }
}

async fn store_with_methods() -> Arc<InMemoryPaymentStore> {
    let store = Arc::new(InMemoryPaymentStore::new());
    let provider = PaymentProvider::new("dummy", "Dummy");
    store.save_provider(&provider).await.unwrap();

    for (key, name) in [("dummy.invoice", "Invoice"), ("dummy.transfer", "Transfer")] {
        let method =
            PaymentMethod::new(provider.id, key, name).with_stores(vec!["DE".to_string()]);
        store.save_method(&method).await.unwrap();
    }
    store
}

fn quote_with_payment(provider_key: &str, method_key: &str, amount: i64) -> Quote {
    let mut quote = Quote::new("DE", "EUR");
    let mut payment = Payment::new(provider_key, method_key);
    payment.amount = amount;
    quote.totals.grand_total = amount;
    quote.totals.price_to_pay = amount;
    quote.payments.push(payment);
    quote
}

fn facade_over(store: &Arc<InMemoryPaymentStore>, plugins: PaymentPlugins) -> PaymentFacade {
    PaymentFacade::new(store.clone(), store.clone(), plugins)
}

#[tokio::test]
async fn pre_check_passes_without_matching_plugins() {
    let store = store_with_methods().await;
    let facade = facade_over(&store, PaymentPlugins::new());

    let quote = quote_with_payment("dummy", "dummy.invoice", 5_000);
    let mut response = CheckoutResponse::new();

    let ok = facade.checkout_pre_check(&quote, &mut response).await.unwrap();
    assert!(ok);
    assert!(response.is_success());
}

#[tokio::test]
async fn pre_check_records_plugin_errors_on_the_response() {
    let store = store_with_methods().await;
    let plugins = PaymentPlugins::new().with_pre_condition(Arc::new(RejectingPreConditionPlugin {
        provider_key: "dummy".to_string(),
    }));
    let facade = facade_over(&store, plugins);

    let quote = quote_with_payment("dummy", "dummy.invoice", 5_000);
    let mut response = CheckoutResponse::new();

    let ok = facade.checkout_pre_check(&quote, &mut response).await.unwrap();
    assert!(!ok);
    assert_eq!(response.errors.len(), 1);
    assert_eq!(response.errors[0].error_code, 4900);
}

#[tokio::test]
async fn pre_check_skips_plugins_of_other_providers() {
    let store = store_with_methods().await;
    let plugins = PaymentPlugins::new().with_pre_condition(Arc::new(RejectingPreConditionPlugin {
        provider_key: "other".to_string(),
    }));
    let facade = facade_over(&store, plugins);

    let quote = quote_with_payment("dummy", "dummy.invoice", 5_000);
    let mut response = CheckoutResponse::new();

    assert!(facade.checkout_pre_check(&quote, &mut response).await.unwrap());
}

#[tokio::test]
async fn post_check_runs_matching_plugins_for_legacy_payment_too() {
    let store = store_with_methods().await;
    let calls = Arc::new(AtomicUsize::new(0));
    let plugins = PaymentPlugins::new().with_post_save(Arc::new(CountingPostSavePlugin {
        provider_key: "dummy".to_string(),
        calls: calls.clone(),
    }));
    let facade = facade_over(&store, plugins);

    let mut quote = quote_with_payment("dummy", "dummy.invoice", 5_000);
    quote.payment = Some(Payment::new("dummy", "dummy.transfer"));
    let mut response = CheckoutResponse::new();

    facade.checkout_post_check(&quote, &mut response).await.unwrap();
    assert_eq!(calls.load(Ordering::SeqCst), 2);
}

#[tokio::test]
async fn save_payment_falls_back_to_sales_payment_writer() {
    let store = store_with_methods().await;
    let facade = facade_over(&store, PaymentPlugins::new());

    let order_id = Uuid::new_v4();
    let quote = quote_with_payment("dummy", "dummy.invoice", 5_000);
    let mut response = CheckoutResponse::with_save_order(order_id, "DE--1");

    facade.save_payment_for_checkout(&quote, &mut response).await.unwrap();
    assert!(response.is_success());

    let persisted = store.list_by_order(order_id).await.unwrap();
    assert_eq!(persisted.len(), 1);
    assert_eq!(persisted[0].method_key, "dummy.invoice");
    assert_eq!(persisted[0].amount, 5_000);
}

#[tokio::test]
async fn save_payment_prefers_the_provider_plugin_over_the_default_writer() {
    let store = store_with_methods().await;
    let calls = Arc::new(AtomicUsize::new(0));
    let plugins = PaymentPlugins::new().with_order_saver(Arc::new(NoopOrderSaverPlugin {
        provider_key: "dummy".to_string(),
        calls: calls.clone(),
    }));
    let facade = facade_over(&store, plugins);

    let order_id = Uuid::new_v4();
    let quote = quote_with_payment("dummy", "dummy.invoice", 5_000);
    let mut response = CheckoutResponse::with_save_order(order_id, "DE--2");

    facade.save_payment_for_checkout(&quote, &mut response).await.unwrap();

    assert_eq!(calls.load(Ordering::SeqCst), 1);
    // The plugin handled persistence; the default writer stayed out.
    assert!(store.list_by_order(order_id).await.unwrap().is_empty());
}

#[tokio::test]
async fn save_payment_without_saved_order_records_an_error() {
    let store = store_with_methods().await;
    let facade = facade_over(&store, PaymentPlugins::new());

    let quote = quote_with_payment("dummy", "dummy.invoice", 5_000);
    let mut response = CheckoutResponse::new();

    facade.save_payment_for_checkout(&quote, &mut response).await.unwrap();
    assert!(!response.is_success());
}

#[tokio::test]
async fn save_payment_stops_after_a_recorded_error() {
    let store = store_with_methods().await;
    let facade = facade_over(&store, PaymentPlugins::new());

    let order_id = Uuid::new_v4();
    let mut quote = quote_with_payment("dummy", "dummy.invoice", 5_000);
    let mut second = Payment::new("dummy", "dummy.transfer");
    second.amount = 1_000;
    quote.payments.push(second);

    let mut response = CheckoutResponse::with_save_order(order_id, "DE--3");
    response.add_error(CheckoutError::new(4900, "pre-condition failed earlier"));

    facade.save_payment_for_checkout(&quote, &mut response).await.unwrap();
    assert!(store.list_by_order(order_id).await.unwrap().is_empty());
}

#[tokio::test]
async fn available_methods_runs_the_filter_stack() {
    let store = store_with_methods().await;
    let plugins = PaymentPlugins::new().with_method_filter(Arc::new(MaxTotalFilterPlugin {
        method_key: "dummy.invoice".to_string(),
        max_grand_total: 10_000,
    }));
    let facade = facade_over(&store, plugins);

    let cheap = quote_with_payment("dummy", "dummy.invoice", 5_000);
    let methods = facade.get_available_methods(&cheap).await.unwrap();
    assert_eq!(methods.methods.len(), 2);

    let expensive = quote_with_payment("dummy", "dummy.invoice", 50_000);
    let methods = facade.get_available_methods(&expensive).await.unwrap();
    let keys: Vec<&str> = methods.methods.iter().map(|m| m.method_key.as_str()).collect();
    assert_eq!(keys, vec!["dummy.transfer"]);
}

#[tokio::test]
async fn hydrate_order_payments_attaches_persisted_rows() {
    let store = store_with_methods().await;
    let facade = facade_over(&store, PaymentPlugins::new());

    let order_id = Uuid::new_v4();
    let quote = quote_with_payment("dummy", "dummy.invoice", 7_500);
    let mut response = CheckoutResponse::with_save_order(order_id, "DE--4");
    facade.save_payment_for_checkout(&quote, &mut response).await.unwrap();

    let order = facade
        .hydrate_order_payments(Order::new(order_id, "DE--4"))
        .await
        .unwrap();
    assert_eq!(order.payments.len(), 1);
    assert_eq!(order.payments[0].amount, 7_500);
}

#[tokio::test]
async fn price_to_pay_reads_the_persisted_amount() {
    let store = store_with_methods().await;
    let facade = facade_over(&store, PaymentPlugins::new());

    let order_id = Uuid::new_v4();
    let quote = quote_with_payment("dummy", "dummy.invoice", 7_500);
    let mut response = CheckoutResponse::with_save_order(order_id, "DE--5");
    facade.save_payment_for_checkout(&quote, &mut response).await.unwrap();

    let lookup = SalesPayment::from_payment(order_id, &quote.payments[0]);
    let amount = facade.get_payment_method_price_to_pay(&lookup).await.unwrap();
    assert_eq!(amount, 7_500);

    let missing = SalesPayment::from_payment(Uuid::new_v4(), &quote.payments[0]);
    let err = facade.get_payment_method_price_to_pay(&missing).await.unwrap_err();
    assert!(matches!(err, PaymentError::SalesPaymentNotFound { .. }));
}
