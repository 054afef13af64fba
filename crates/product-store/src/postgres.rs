use async_trait::async_trait;
use serde_json::{Map, Value};
use sqlx::{PgPool, Row, postgres::PgRow};

use crate::{Product, ProductId, Result, store::ProductStore};

const PRODUCT_COLUMNS: &str = "id, name, selling_price, purchase_price, attributes";

/// PostgreSQL-backed product store.
#[derive(Clone)]
pub struct PostgresProductStore {
    pool: PgPool,
}

impl PostgresProductStore {
    /// Creates a new PostgreSQL product store.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Gets a reference to the underlying connection pool.
    pub fn pool(&self) -> &PgPool {
        &self.pool
    }

    /// Runs the database migrations.
    pub async fn run_migrations(&self) -> std::result::Result<(), sqlx::migrate::MigrateError> {
        sqlx::migrate!("../../migrations").run(&self.pool).await
    }

    fn row_to_product(row: PgRow) -> Result<Product> {
        let attributes: Value = row.try_get("attributes")?;
        let attributes: Map<String, Value> = serde_json::from_value(attributes)?;

        Ok(Product {
            id: ProductId::new(row.try_get("id")?),
            name: row.try_get("name")?,
            selling_price: row.try_get("selling_price")?,
            purchase_price: row.try_get("purchase_price")?,
            attributes,
        })
    }

    async fn fetch_products(&self, sql: &str) -> Result<Vec<Product>> {
        let rows = sqlx::query(sql).fetch_all(&self.pool).await?;
        rows.into_iter().map(Self::row_to_product).collect()
    }

    async fn insert_new(&self, product: &Product) -> Result<Option<Product>> {
        let row = sqlx::query(&format!(
            r#"
            INSERT INTO products (name, selling_price, purchase_price, attributes)
            VALUES ($1, $2, $3, $4)
            RETURNING {PRODUCT_COLUMNS}
            "#
        ))
        .bind(&product.name)
        .bind(product.selling_price)
        .bind(product.purchase_price)
        .bind(Value::Object(product.attributes.clone()))
        .fetch_optional(&self.pool)
        .await?;

        row.map(Self::row_to_product).transpose()
    }

    async fn upsert(&self, product: &Product) -> Result<Option<Product>> {
        let mut tx = self.pool.begin().await?;

        let row = sqlx::query(&format!(
            r#"
            INSERT INTO products (id, name, selling_price, purchase_price, attributes)
            VALUES ($1, $2, $3, $4, $5)
            ON CONFLICT (id) DO UPDATE SET
                name = EXCLUDED.name,
                selling_price = EXCLUDED.selling_price,
                purchase_price = EXCLUDED.purchase_price,
                attributes = EXCLUDED.attributes
            RETURNING {PRODUCT_COLUMNS}
            "#
        ))
        .bind(product.id.as_i32())
        .bind(&product.name)
        .bind(product.selling_price)
        .bind(product.purchase_price)
        .bind(Value::Object(product.attributes.clone()))
        .fetch_optional(&mut *tx)
        .await?;

        // Keep generated ids clear of explicitly written ones
        if product.id.as_i32() > 0 {
            sqlx::query(
                r#"
                SELECT setval('products_id_seq', GREATEST($1, CASE WHEN is_called THEN last_value ELSE 0 END))
                FROM products_id_seq
                "#,
            )
            .bind(i64::from(product.id.as_i32()))
            .execute(&mut *tx)
            .await?;
        }

        tx.commit().await?;
        row.map(Self::row_to_product).transpose()
    }
}

#[async_trait]
impl ProductStore for PostgresProductStore {
    async fn find_all(&self) -> Result<Vec<Product>> {
        self.fetch_products(&format!(
            "SELECT {PRODUCT_COLUMNS} FROM products ORDER BY id ASC"
        ))
        .await
    }

    async fn find_by_id(&self, id: ProductId) -> Result<Option<Product>> {
        let row = sqlx::query(&format!(
            "SELECT {PRODUCT_COLUMNS} FROM products WHERE id = $1"
        ))
        .bind(id.as_i32())
        .fetch_optional(&self.pool)
        .await?;

        row.map(Self::row_to_product).transpose()
    }

    async fn save(&self, product: Product) -> Result<Option<Product>> {
        tracing::debug!(id = %product.id, "saving product");
        if product.id.is_assigned() {
            self.upsert(&product).await
        } else {
            self.insert_new(&product).await
        }
    }

    async fn delete(&self, id: ProductId) -> Result<()> {
        let result = sqlx::query("DELETE FROM products WHERE id = $1")
            .bind(id.as_i32())
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            tracing::debug!(%id, "delete of unknown product ignored");
        }
        Ok(())
    }

    async fn find_all_ordered_by_name_asc(&self) -> Result<Vec<Product>> {
        self.fetch_products(&format!(
            r#"SELECT {PRODUCT_COLUMNS} FROM products ORDER BY name COLLATE "C" ASC, id ASC"#
        ))
        .await
    }

    async fn find_selling_price_above(&self, threshold: i64) -> Result<Vec<Product>> {
        let rows = sqlx::query(&format!(
            "SELECT {PRODUCT_COLUMNS} FROM products WHERE selling_price > $1 ORDER BY id ASC"
        ))
        .bind(threshold)
        .fetch_all(&self.pool)
        .await?;

        rows.into_iter().map(Self::row_to_product).collect()
    }
}
