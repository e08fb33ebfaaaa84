use std::sync::Arc;

use uuid::Uuid;

use payment_core::checkout::CheckoutResponse;
use payment_core::method::{
    PaymentMethod, PaymentMethodResponse, PaymentMethods, PaymentProvider,
    PaymentProviderCollection, PaymentProviderResponse,
};
use payment_core::quote::{CalculableObject, Quote};
use payment_core::repository::{PaymentMethodRepository, SalesPaymentRepository};
use payment_core::sales::{Order, SalesPayment};
use payment_core::PaymentResult;

use crate::availability::PaymentMethodMarshaller;
use crate::calculation::PaymentCalculator;
use crate::executor::{CheckoutPluginExecutor, PaymentPlugins};
use crate::reader::PaymentMethodReader;
use crate::sales::{PaymentHydrator, SalesPaymentReader, SalesPaymentWriter};
use crate::validation::QuotePaymentValidator;
use crate::writer::PaymentMethodWriter;

/// Public API of the payment module. Every operation forwards to exactly
/// one collaborator; the business strategy lives in the registered
/// plugin stacks and the repositories behind them.
pub struct PaymentFacade {
    marshaller: PaymentMethodMarshaller,
    executor: CheckoutPluginExecutor,
    reader: PaymentMethodReader,
    writer: PaymentMethodWriter,
    validator: QuotePaymentValidator,
    calculator: PaymentCalculator,
    sales_reader: SalesPaymentReader,
    hydrator: PaymentHydrator,
}

impl PaymentFacade {
    pub fn new(
        method_repository: Arc<dyn PaymentMethodRepository>,
        sales_payment_repository: Arc<dyn SalesPaymentRepository>,
        mut plugins: PaymentPlugins,
    ) -> Self {
        let filters = std::mem::take(&mut plugins.method_filter);
        Self {
            marshaller: PaymentMethodMarshaller::new(method_repository.clone(), filters),
            executor: CheckoutPluginExecutor::new(
                plugins,
                SalesPaymentWriter::new(sales_payment_repository.clone()),
            ),
            reader: PaymentMethodReader::new(method_repository.clone()),
            writer: PaymentMethodWriter::new(method_repository.clone()),
            validator: QuotePaymentValidator::new(method_repository),
            calculator: PaymentCalculator::new(),
            sales_reader: SalesPaymentReader::new(sales_payment_repository.clone()),
            hydrator: PaymentHydrator::new(sales_payment_repository),
        }
    }

    pub async fn get_available_methods(&self, quote: &Quote) -> PaymentResult<PaymentMethods> {
        self.marshaller.get_available_methods(quote).await
    }

    pub fn recalculate_payments(&self, calculable: &mut CalculableObject) {
        self.calculator.recalculate_payments(calculable)
    }

    pub async fn get_available_payment_providers_for_store(
        &self,
        store: &str,
    ) -> PaymentResult<PaymentProviderCollection> {
        self.reader
            .get_available_payment_providers_for_store(store)
            .await
    }

    pub async fn find_payment_method_by_id(
        &self,
        id: Uuid,
    ) -> PaymentResult<PaymentMethodResponse> {
        self.reader.find_payment_method_by_id(id).await
    }

    pub async fn create_payment_provider(
        &self,
        provider: PaymentProvider,
    ) -> PaymentResult<PaymentProviderResponse> {
        self.writer.create_payment_provider(provider).await
    }

    pub async fn create_payment_method(
        &self,
        method: PaymentMethod,
    ) -> PaymentResult<PaymentMethodResponse> {
        self.writer.create_payment_method(method).await
    }

    pub async fn update_payment_method(
        &self,
        method: PaymentMethod,
    ) -> PaymentResult<PaymentMethodResponse> {
        self.writer.update_payment_method(method).await
    }

    pub async fn activate_payment_method(&self, id: Uuid) -> PaymentResult<PaymentMethodResponse> {
        self.writer.activate_payment_method(id).await
    }

    pub async fn deactivate_payment_method(
        &self,
        id: Uuid,
    ) -> PaymentResult<PaymentMethodResponse> {
        self.writer.deactivate_payment_method(id).await
    }

    pub async fn is_quote_payment_method_valid(
        &self,
        quote: &Quote,
        response: &mut CheckoutResponse,
    ) -> PaymentResult<bool> {
        self.validator
            .is_quote_payment_method_valid(quote, response)
            .await
    }

    pub async fn checkout_pre_check(
        &self,
        quote: &Quote,
        response: &mut CheckoutResponse,
    ) -> PaymentResult<bool> {
        self.executor.execute_pre_check(quote, response).await
    }

    pub async fn checkout_post_check(
        &self,
        quote: &Quote,
        response: &mut CheckoutResponse,
    ) -> PaymentResult<()> {
        self.executor.execute_post_check(quote, response).await
    }

    pub async fn save_payment_for_checkout(
        &self,
        quote: &Quote,
        response: &mut CheckoutResponse,
    ) -> PaymentResult<()> {
        self.executor.execute_order_saver(quote, response).await
    }

    pub async fn get_payment_method_price_to_pay(
        &self,
        sales_payment: &SalesPayment,
    ) -> PaymentResult<i64> {
        self.sales_reader.get_price_to_pay(sales_payment).await
    }

    pub async fn hydrate_order_payments(&self, order: Order) -> PaymentResult<Order> {
        self.hydrator.hydrate_order_payments(order).await
    }
}
