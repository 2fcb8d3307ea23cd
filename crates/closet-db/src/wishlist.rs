use closet_core::models::WishlistItem;
use closet_core::AppError;
use sqlx::{PgPool, Postgres};
use uuid::Uuid;

/// Repository for per-customer wishlists
#[derive(Clone)]
pub struct WishlistRepository {
    pool: PgPool,
}

impl WishlistRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    #[tracing::instrument(skip(self), fields(db.table = "wishlist_items", db.operation = "select"))]
    pub async fn list(&self, customer_id: Uuid) -> Result<Vec<WishlistItem>, AppError> {
        let items = sqlx::query_as::<Postgres, WishlistItem>(
            "SELECT * FROM wishlist_items WHERE customer_id = $1 ORDER BY created_at DESC",
        )
        .bind(customer_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(items)
    }

    /// Idempotent add: re-adding an existing product returns the existing row.
    #[tracing::instrument(skip(self), fields(db.table = "wishlist_items", db.operation = "upsert"))]
    pub async fn add(&self, customer_id: Uuid, product_id: Uuid) -> Result<WishlistItem, AppError> {
        let inserted = sqlx::query_as::<Postgres, WishlistItem>(
            r#"
            INSERT INTO wishlist_items (id, customer_id, product_id)
            VALUES ($1, $2, $3)
            ON CONFLICT (customer_id, product_id) DO NOTHING
            RETURNING *
            "#,
        )
        .bind(Uuid::new_v4())
        .bind(customer_id)
        .bind(product_id)
        .fetch_optional(&self.pool)
        .await?;

        match inserted {
            Some(item) => Ok(item),
            None => {
                let item = sqlx::query_as::<Postgres, WishlistItem>(
                    "SELECT * FROM wishlist_items WHERE customer_id = $1 AND product_id = $2",
                )
                .bind(customer_id)
                .bind(product_id)
                .fetch_one(&self.pool)
                .await?;
                Ok(item)
            }
        }
    }

    #[tracing::instrument(skip(self), fields(db.table = "wishlist_items", db.operation = "delete"))]
    pub async fn remove(&self, customer_id: Uuid, product_id: Uuid) -> Result<bool, AppError> {
        let result =
            sqlx::query("DELETE FROM wishlist_items WHERE customer_id = $1 AND product_id = $2")
                .bind(customer_id)
                .bind(product_id)
                .execute(&self.pool)
                .await?;

        Ok(result.rows_affected() > 0)
    }
}
