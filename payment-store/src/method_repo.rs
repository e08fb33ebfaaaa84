use async_trait::async_trait;
use sqlx::postgres::PgRow;
use sqlx::{PgPool, Row};
use uuid::Uuid;

use payment_core::method::{PaymentMethod, PaymentProvider, StoreRelation};
use payment_core::repository::PaymentMethodRepository;

pub struct PostgresPaymentMethodRepository {
    pub pool: PgPool,
}

impl PostgresPaymentMethodRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

// Runtime-checked queries; rows are mapped by hand since the schema is
// not available at build time.
fn method_from_row(row: &PgRow) -> Result<PaymentMethod, sqlx::Error> {
    Ok(PaymentMethod {
        id: row.try_get("id")?,
        provider_id: row.try_get("provider_id")?,
        method_key: row.try_get("method_key")?,
        name: row.try_get("name")?,
        is_active: row.try_get("is_active")?,
        store_relation: StoreRelation::new(row.try_get("store_names")?),
        created_at: row.try_get("created_at")?,
        updated_at: row.try_get("updated_at")?,
    })
}

fn provider_from_row(row: &PgRow) -> Result<PaymentProvider, sqlx::Error> {
    Ok(PaymentProvider {
        id: row.try_get("id")?,
        provider_key: row.try_get("provider_key")?,
        name: row.try_get("name")?,
        methods: Vec::new(),
        created_at: row.try_get("created_at")?,
    })
}

#[async_trait]
impl PaymentMethodRepository for PostgresPaymentMethodRepository {
    async fn save_provider(
        &self,
        provider: &PaymentProvider,
    ) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
        sqlx::query(
            r#"
            INSERT INTO payment_providers (id, provider_key, name, created_at)
            VALUES ($1, $2, $3, $4)
            "#,
        )
        .bind(provider.id)
        .bind(&provider.provider_key)
        .bind(&provider.name)
        .bind(provider.created_at)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    async fn find_provider_by_key(
        &self,
        provider_key: &str,
    ) -> Result<Option<PaymentProvider>, Box<dyn std::error::Error + Send + Sync>> {
        let row = sqlx::query(
            r#"
            SELECT id, provider_key, name, created_at
            FROM payment_providers
            WHERE provider_key = $1
            "#,
        )
        .bind(provider_key)
        .fetch_optional(&self.pool)
        .await?;

        match row {
            Some(row) => Ok(Some(provider_from_row(&row)?)),
            None => Ok(None),
        }
    }

    async fn list_providers(
        &self,
    ) -> Result<Vec<PaymentProvider>, Box<dyn std::error::Error + Send + Sync>> {
        let rows = sqlx::query(
            r#"
            SELECT id, provider_key, name, created_at
            FROM payment_providers
            ORDER BY provider_key
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        let mut providers = Vec::with_capacity(rows.len());
        for row in &rows {
            providers.push(provider_from_row(row)?);
        }
        Ok(providers)
    }

    async fn save_method(
        &self,
        method: &PaymentMethod,
    ) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
        sqlx::query(
            r#"
            INSERT INTO payment_methods
                (id, provider_id, method_key, name, is_active, store_names, created_at, updated_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
            "#,
        )
        .bind(method.id)
        .bind(method.provider_id)
        .bind(&method.method_key)
        .bind(&method.name)
        .bind(method.is_active)
        .bind(&method.store_relation.stores)
        .bind(method.created_at)
        .bind(method.updated_at)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    async fn update_method(
        &self,
        method: &PaymentMethod,
    ) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
        sqlx::query(
            r#"
            UPDATE payment_methods
            SET method_key = $2, name = $3, is_active = $4, store_names = $5, updated_at = $6
            WHERE id = $1
            "#,
        )
        .bind(method.id)
        .bind(&method.method_key)
        .bind(&method.name)
        .bind(method.is_active)
        .bind(&method.store_relation.stores)
        .bind(method.updated_at)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    async fn find_method(
        &self,
        id: Uuid,
    ) -> Result<Option<PaymentMethod>, Box<dyn std::error::Error + Send + Sync>> {
        let row = sqlx::query(
            r#"
            SELECT id, provider_id, method_key, name, is_active, store_names, created_at, updated_at
            FROM payment_methods
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        match row {
            Some(row) => Ok(Some(method_from_row(&row)?)),
            None => Ok(None),
        }
    }

    async fn find_method_by_key(
        &self,
        method_key: &str,
    ) -> Result<Option<PaymentMethod>, Box<dyn std::error::Error + Send + Sync>> {
        let row = sqlx::query(
            r#"
            SELECT id, provider_id, method_key, name, is_active, store_names, created_at, updated_at
            FROM payment_methods
            WHERE method_key = $1
            "#,
        )
        .bind(method_key)
        .fetch_optional(&self.pool)
        .await?;

        match row {
            Some(row) => Ok(Some(method_from_row(&row)?)),
            None => Ok(None),
        }
    }

    async fn list_methods_for_store(
        &self,
        store: &str,
    ) -> Result<Vec<PaymentMethod>, Box<dyn std::error::Error + Send + Sync>> {
        let rows = sqlx::query(
            r#"
            SELECT id, provider_id, method_key, name, is_active, store_names, created_at, updated_at
            FROM payment_methods
            WHERE is_active AND $1 = ANY(store_names)
            ORDER BY method_key
            "#,
        )
        .bind(store)
        .fetch_all(&self.pool)
        .await?;

        let mut methods = Vec::with_capacity(rows.len());
        for row in &rows {
            methods.push(method_from_row(row)?);
        }
        Ok(methods)
    }
}
