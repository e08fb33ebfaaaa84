use std::sync::Arc;

use tracing::warn;

use payment_core::checkout::CheckoutResponse;
use payment_core::plugin::{
    CheckoutPostSavePlugin, CheckoutPreConditionPlugin, PaymentMethodFilterPlugin,
    PaymentOrderSaverPlugin,
};
use payment_core::quote::Quote;
use payment_core::PaymentResult;

use crate::sales::SalesPaymentWriter;

/// Configured plugin stacks, in execution order. Plays the role of the
/// module's dependency provider: other modules register their strategy
/// objects here.
#[derive(Default)]
pub struct PaymentPlugins {
    pub pre_condition: Vec<Arc<dyn CheckoutPreConditionPlugin>>,
    pub post_save: Vec<Arc<dyn CheckoutPostSavePlugin>>,
    pub order_saver: Vec<Arc<dyn PaymentOrderSaverPlugin>>,
    pub method_filter: Vec<Arc<dyn PaymentMethodFilterPlugin>>,
}

impl PaymentPlugins {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_pre_condition(mut self, plugin: Arc<dyn CheckoutPreConditionPlugin>) -> Self {
        self.pre_condition.push(plugin);
        self
    }

    pub fn with_post_save(mut self, plugin: Arc<dyn CheckoutPostSavePlugin>) -> Self {
        self.post_save.push(plugin);
        self
    }

    pub fn with_order_saver(mut self, plugin: Arc<dyn PaymentOrderSaverPlugin>) -> Self {
        self.order_saver.push(plugin);
        self
    }

    pub fn with_method_filter(mut self, plugin: Arc<dyn PaymentMethodFilterPlugin>) -> Self {
        self.method_filter.push(plugin);
        self
    }
}

/// Runs the checkout plugin stacks against a quote. Checkout plugins are
/// matched to quote payments by provider key; a payment whose provider
/// registered no plugin needs no checks, except during order save where
/// the default sales-payment writer takes over.
pub struct CheckoutPluginExecutor {
    plugins: PaymentPlugins,
    sales_payment_writer: SalesPaymentWriter,
}

impl CheckoutPluginExecutor {
    pub fn new(plugins: PaymentPlugins, sales_payment_writer: SalesPaymentWriter) -> Self {
        Self {
            plugins,
            sales_payment_writer,
        }
    }

    /// Runs every matching pre-condition plugin. The stack runs to
    /// completion so the response aggregates all failed conditions.
    /// Returns whether the response is still error-free.
    pub async fn execute_pre_check(
        &self,
        quote: &Quote,
        response: &mut CheckoutResponse,
    ) -> PaymentResult<bool> {
        for payment in quote.all_payments() {
            for plugin in &self.plugins.pre_condition {
                if plugin.provider_key() == payment.provider_key {
                    plugin.check(quote, response).await;
                }
            }
        }
        Ok(response.is_success())
    }

    /// Runs every matching post-save plugin.
    pub async fn execute_post_check(
        &self,
        quote: &Quote,
        response: &mut CheckoutResponse,
    ) -> PaymentResult<()> {
        for payment in quote.all_payments() {
            for plugin in &self.plugins.post_save {
                if plugin.provider_key() == payment.provider_key {
                    plugin.execute(quote, response).await;
                }
            }
        }
        Ok(())
    }

    /// Persists each quote payment, either through the provider's
    /// order-saver plugin or through the default writer. Stops once an
    /// error was recorded so nothing is persisted past a failure.
    pub async fn execute_order_saver(
        &self,
        quote: &Quote,
        response: &mut CheckoutResponse,
    ) -> PaymentResult<()> {
        for payment in quote.all_payments() {
            if !response.is_success() {
                warn!(
                    provider_key = %payment.provider_key,
                    "Skipping payment persistence, checkout response already has errors"
                );
                break;
            }

            let mut handled = false;
            for plugin in &self.plugins.order_saver {
                if plugin.provider_key() == payment.provider_key {
                    plugin.save_payment(quote, response).await;
                    handled = true;
                }
            }

            if !handled {
                self.sales_payment_writer
                    .save_payment(payment, response)
                    .await?;
            }
        }
        Ok(())
    }
}
