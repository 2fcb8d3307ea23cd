use closet_core::models::{AddToCartRequest, CartItem};
use closet_core::AppError;
use sqlx::{PgPool, Postgres};
use uuid::Uuid;

/// Repository for per-customer shopping carts
#[derive(Clone)]
pub struct CartRepository {
    pool: PgPool,
}

impl CartRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    #[tracing::instrument(skip(self), fields(db.table = "cart_items", db.operation = "select"))]
    pub async fn list(&self, customer_id: Uuid) -> Result<Vec<CartItem>, AppError> {
        let items = sqlx::query_as::<Postgres, CartItem>(
            "SELECT * FROM cart_items WHERE customer_id = $1 ORDER BY created_at",
        )
        .bind(customer_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(items)
    }

    /// Add to cart; re-adding the same product/variant increments quantity.
    #[tracing::instrument(skip(self, req), fields(db.table = "cart_items", db.operation = "upsert"))]
    pub async fn add(
        &self,
        customer_id: Uuid,
        req: &AddToCartRequest,
    ) -> Result<CartItem, AppError> {
        let mut tx = self.pool.begin().await?;

        let existing = sqlx::query_as::<Postgres, CartItem>(
            "SELECT * FROM cart_items \
             WHERE customer_id = $1 AND product_id = $2 AND variant_id IS NOT DISTINCT FROM $3",
        )
        .bind(customer_id)
        .bind(req.product_id)
        .bind(req.variant_id)
        .fetch_optional(&mut *tx)
        .await?;

        let item = match existing {
            Some(existing) => {
                sqlx::query_as::<Postgres, CartItem>(
                    "UPDATE cart_items SET quantity = quantity + $2 WHERE id = $1 RETURNING *",
                )
                .bind(existing.id)
                .bind(req.quantity)
                .fetch_one(&mut *tx)
                .await?
            }
            None => {
                sqlx::query_as::<Postgres, CartItem>(
                    r#"
                    INSERT INTO cart_items (id, customer_id, product_id, variant_id, quantity)
                    VALUES ($1, $2, $3, $4, $5)
                    RETURNING *
                    "#,
                )
                .bind(Uuid::new_v4())
                .bind(customer_id)
                .bind(req.product_id)
                .bind(req.variant_id)
                .bind(req.quantity)
                .fetch_one(&mut *tx)
                .await?
            }
        };

        tx.commit().await?;

        Ok(item)
    }

    #[tracing::instrument(skip(self), fields(db.table = "cart_items", db.operation = "update", db.record_id = %item_id))]
    pub async fn update_quantity(
        &self,
        customer_id: Uuid,
        item_id: Uuid,
        quantity: i32,
    ) -> Result<Option<CartItem>, AppError> {
        let item = sqlx::query_as::<Postgres, CartItem>(
            "UPDATE cart_items SET quantity = $3 WHERE id = $1 AND customer_id = $2 RETURNING *",
        )
        .bind(item_id)
        .bind(customer_id)
        .bind(quantity)
        .fetch_optional(&self.pool)
        .await?;

        Ok(item)
    }

    #[tracing::instrument(skip(self), fields(db.table = "cart_items", db.operation = "delete", db.record_id = %item_id))]
    pub async fn remove(&self, customer_id: Uuid, item_id: Uuid) -> Result<bool, AppError> {
        let result = sqlx::query("DELETE FROM cart_items WHERE id = $1 AND customer_id = $2")
            .bind(item_id)
            .bind(customer_id)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }

    #[tracing::instrument(skip(self), fields(db.table = "cart_items", db.operation = "delete"))]
    pub async fn clear(&self, customer_id: Uuid) -> Result<(), AppError> {
        sqlx::query("DELETE FROM cart_items WHERE customer_id = $1")
            .bind(customer_id)
            .execute(&self.pool)
            .await?;

        Ok(())
    }
}
