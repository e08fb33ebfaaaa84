use payment_core::quote::CalculableObject;

/// Distributes `price_to_pay` across the selected payments. Methods with
/// a limited amount consume first, in selection order, each capped at
/// its available amount; the first unlimited payment takes the
/// remainder and any further unlimited payments get zero.
#[derive(Debug, Default)]
pub struct PaymentCalculator;

impl PaymentCalculator {
    pub fn new() -> Self {
        Self
    }

    pub fn recalculate_payments(&self, calculable: &mut CalculableObject) {
        let mut remaining = calculable.totals.price_to_pay.max(0);

        for payment in &mut calculable.payments {
            if let Some(available) = payment.available_amount {
                payment.amount = remaining.min(available.max(0));
                remaining -= payment.amount;
            }
        }

        for payment in &mut calculable.payments {
            if payment.available_amount.is_none() {
                payment.amount = remaining;
                remaining = 0;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use payment_core::quote::{Payment, Totals};

    fn calculable(price_to_pay: i64, payments: Vec<Payment>) -> CalculableObject {
        CalculableObject {
            totals: Totals {
                grand_total: price_to_pay,
                price_to_pay,
            },
            payments,
        }
    }

    #[test]
    fn unlimited_payment_takes_the_full_total() {
        let mut calculable = calculable(10_000, vec![Payment::new("dummy", "dummy.invoice")]);
        PaymentCalculator::new().recalculate_payments(&mut calculable);
        assert_eq!(calculable.payments[0].amount, 10_000);
    }

    #[test]
    fn limited_payments_consume_before_the_unlimited_one() {
        let gift_card = Payment::new("gift_card", "gift_card.standard").with_available_amount(3_000);
        let invoice = Payment::new("dummy", "dummy.invoice");

        let mut calculable = calculable(10_000, vec![gift_card, invoice]);
        PaymentCalculator::new().recalculate_payments(&mut calculable);

        assert_eq!(calculable.payments[0].amount, 3_000);
        assert_eq!(calculable.payments[1].amount, 7_000);
    }

    #[test]
    fn limited_payment_is_capped_at_the_price_to_pay() {
        let gift_card = Payment::new("gift_card", "gift_card.standard").with_available_amount(9_999);
        let invoice = Payment::new("dummy", "dummy.invoice");

        let mut calculable = calculable(5_000, vec![gift_card, invoice]);
        PaymentCalculator::new().recalculate_payments(&mut calculable);

        assert_eq!(calculable.payments[0].amount, 5_000);
        assert_eq!(calculable.payments[1].amount, 0);
    }

    #[test]
    fn second_unlimited_payment_gets_zero() {
        let first = Payment::new("dummy", "dummy.invoice");
        let second = Payment::new("dummy", "dummy.transfer");

        let mut calculable = calculable(4_200, vec![first, second]);
        PaymentCalculator::new().recalculate_payments(&mut calculable);

        assert_eq!(calculable.payments[0].amount, 4_200);
        assert_eq!(calculable.payments[1].amount, 0);
    }
}
