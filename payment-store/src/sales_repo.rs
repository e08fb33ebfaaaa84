use async_trait::async_trait;
use sqlx::postgres::PgRow;
use sqlx::{PgPool, Row};
use uuid::Uuid;

use payment_core::repository::SalesPaymentRepository;
use payment_core::sales::SalesPayment;

pub struct PostgresSalesPaymentRepository {
    pub pool: PgPool,
}

impl PostgresSalesPaymentRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

fn sales_payment_from_row(row: &PgRow) -> Result<SalesPayment, sqlx::Error> {
    Ok(SalesPayment {
        id: row.try_get("id")?,
        order_id: row.try_get("order_id")?,
        provider_key: row.try_get("provider_key")?,
        method_key: row.try_get("method_key")?,
        amount: row.try_get("amount")?,
        created_at: row.try_get("created_at")?,
    })
}

#[async_trait]
impl SalesPaymentRepository for PostgresSalesPaymentRepository {
    async fn save_sales_payment(
        &self,
        sales_payment: &SalesPayment,
    ) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
        sqlx::query(
            r#"
            INSERT INTO sales_payments (id, order_id, provider_key, method_key, amount, created_at)
            VALUES ($1, $2, $3, $4, $5, $6)
            "#,
        )
        .bind(sales_payment.id)
        .bind(sales_payment.order_id)
        .bind(&sales_payment.provider_key)
        .bind(&sales_payment.method_key)
        .bind(sales_payment.amount)
        .bind(sales_payment.created_at)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    async fn list_by_order(
        &self,
        order_id: Uuid,
    ) -> Result<Vec<SalesPayment>, Box<dyn std::error::Error + Send + Sync>> {
        let rows = sqlx::query(
            r#"
            SELECT id, order_id, provider_key, method_key, amount, created_at
            FROM sales_payments
            WHERE order_id = $1
            ORDER BY created_at
            "#,
        )
        .bind(order_id)
        .fetch_all(&self.pool)
        .await?;

        let mut payments = Vec::with_capacity(rows.len());
        for row in &rows {
            payments.push(sales_payment_from_row(row)?);
        }
        Ok(payments)
    }

    async fn find_by_order_and_method(
        &self,
        order_id: Uuid,
        method_key: &str,
    ) -> Result<Option<SalesPayment>, Box<dyn std::error::Error + Send + Sync>> {
        let row = sqlx::query(
            r#"
            SELECT id, order_id, provider_key, method_key, amount, created_at
            FROM sales_payments
            WHERE order_id = $1 AND method_key = $2
            "#,
        )
        .bind(order_id)
        .bind(method_key)
        .fetch_optional(&self.pool)
        .await?;

        match row {
            Some(row) => Ok(Some(sales_payment_from_row(&row)?)),
            None => Ok(None),
        }
    }
}
