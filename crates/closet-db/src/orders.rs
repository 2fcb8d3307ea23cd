use closet_core::models::{
    CheckoutRequest, Order, OrderDetail, OrderItem, OrderStatus, Product, ProductVariant,
};
use closet_core::AppError;
use rust_decimal::Decimal;
use sqlx::{PgPool, Postgres, QueryBuilder};
use uuid::Uuid;

/// Generate a human-readable order number.
pub(crate) fn generate_order_number() -> String {
    format!("ORD-{:08}", rand::random::<u32>() % 100_000_000)
}

/// Repository for orders and order lines
#[derive(Clone)]
pub struct OrderRepository {
    pool: PgPool,
}

impl OrderRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Create an order and its lines in one transaction.
    ///
    /// Prices are snapshotted at checkout time: variant lines use the variant
    /// price, plain product lines use the discounted product price. Variant
    /// stock is decremented and the checkout fails if any line cannot be
    /// covered.
    #[tracing::instrument(skip(self, req), fields(db.table = "orders", db.operation = "insert"))]
    pub async fn checkout(&self, req: &CheckoutRequest) -> Result<OrderDetail, AppError> {
        let mut tx = self.pool.begin().await?;

        let (delivery_fee, delivery_region, delivery_area) =
            match req.delivery_location_id {
                Some(location_id) => {
                    let row: Option<(Decimal, String, String)> = sqlx::query_as(
                        "SELECT fee, region, area FROM delivery_locations WHERE id = $1",
                    )
                    .bind(location_id)
                    .fetch_optional(&mut *tx)
                    .await?;

                    let (fee, region, area) = row.ok_or_else(|| {
                        AppError::NotFound("Delivery location not found".to_string())
                    })?;
                    (fee, Some(region), Some(area))
                }
                None => (Decimal::ZERO, None, None),
            };

        let mut subtotal = Decimal::ZERO;
        let mut lines = Vec::with_capacity(req.items.len());

        for item in &req.items {
            let product = sqlx::query_as::<Postgres, Product>(
                "SELECT * FROM products WHERE id = $1",
            )
            .bind(item.product_id)
            .fetch_optional(&mut *tx)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Product {} not found", item.product_id)))?;

            let unit_price = match item.variant_id {
                Some(variant_id) => {
                    let variant = sqlx::query_as::<Postgres, ProductVariant>(
                        "SELECT * FROM product_variants WHERE id = $1 AND product_id = $2",
                    )
                    .bind(variant_id)
                    .bind(item.product_id)
                    .fetch_optional(&mut *tx)
                    .await?
                    .ok_or_else(|| {
                        AppError::NotFound(format!("Variant {} not found", variant_id))
                    })?;

                    let updated = sqlx::query(
                        "UPDATE product_variants SET stock_quantity = stock_quantity - $2 \
                         WHERE id = $1 AND stock_quantity >= $2",
                    )
                    .bind(variant_id)
                    .bind(item.quantity)
                    .execute(&mut *tx)
                    .await?;

                    if updated.rows_affected() == 0 {
                        return Err(AppError::Conflict(format!(
                            "Insufficient stock for variant {}",
                            variant_id
                        )));
                    }

                    variant.price
                }
                None => product.discounted_price,
            };

            let line_total = unit_price * Decimal::from(item.quantity);
            subtotal += line_total;
            lines.push((item, product.name.clone(), unit_price, line_total));
        }

        let total = subtotal + delivery_fee;

        let order = sqlx::query_as::<Postgres, Order>(
            r#"
            INSERT INTO orders
                (id, order_number, customer_id, status, payment_code,
                 subtotal, delivery_fee, total, delivery_region, delivery_area)
            VALUES ($1, $2, $3, 'pending', $4, $5, $6, $7, $8, $9)
            RETURNING *
            "#,
        )
        .bind(Uuid::new_v4())
        .bind(generate_order_number())
        .bind(req.customer_id)
        .bind(&req.payment_code)
        .bind(subtotal)
        .bind(delivery_fee)
        .bind(total)
        .bind(&delivery_region)
        .bind(&delivery_area)
        .fetch_one(&mut *tx)
        .await?;

        let mut items = Vec::with_capacity(lines.len());
        for (item, product_name, unit_price, line_total) in lines {
            let row = sqlx::query_as::<Postgres, OrderItem>(
                r#"
                INSERT INTO order_items
                    (id, order_id, product_id, variant_id, product_name, quantity, unit_price, line_total)
                VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
                RETURNING *
                "#,
            )
            .bind(Uuid::new_v4())
            .bind(order.id)
            .bind(item.product_id)
            .bind(item.variant_id)
            .bind(&product_name)
            .bind(item.quantity)
            .bind(unit_price)
            .bind(line_total)
            .fetch_one(&mut *tx)
            .await?;
            items.push(row);
        }

        tx.commit().await?;

        tracing::info!(
            order_id = %order.id,
            order_number = %order.order_number,
            total = %order.total,
            "Order created"
        );

        Ok(OrderDetail { order, items })
    }

    #[tracing::instrument(skip(self), fields(db.table = "orders", db.operation = "select"))]
    pub async fn list(
        &self,
        page: u32,
        per_page: u32,
        status: Option<&str>,
        region: Option<&str>,
    ) -> Result<(Vec<Order>, i64), AppError> {
        let offset = (page.saturating_sub(1) as i64) * per_page as i64;

        let mut query = QueryBuilder::<Postgres>::new("SELECT * FROM orders WHERE TRUE");
        push_order_filters(&mut query, status, region);
        query.push(" ORDER BY created_at DESC LIMIT ");
        query.push_bind(per_page as i64);
        query.push(" OFFSET ");
        query.push_bind(offset);

        let orders = query.build_query_as::<Order>().fetch_all(&self.pool).await?;

        let mut count_query = QueryBuilder::<Postgres>::new("SELECT COUNT(*) FROM orders WHERE TRUE");
        push_order_filters(&mut count_query, status, region);
        let total: i64 = count_query
            .build_query_scalar()
            .fetch_one(&self.pool)
            .await?;

        Ok((orders, total))
    }

    #[tracing::instrument(skip(self), fields(db.table = "orders", db.operation = "select", db.record_id = %id))]
    pub async fn get(&self, id: Uuid) -> Result<Option<Order>, AppError> {
        let order = sqlx::query_as::<Postgres, Order>("SELECT * FROM orders WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

        Ok(order)
    }

    #[tracing::instrument(skip(self), fields(db.table = "orders", db.operation = "select", db.record_id = %id))]
    pub async fn get_detail(&self, id: Uuid) -> Result<Option<OrderDetail>, AppError> {
        let Some(order) = self.get(id).await? else {
            return Ok(None);
        };

        let items = sqlx::query_as::<Postgres, OrderItem>(
            "SELECT * FROM order_items WHERE order_id = $1",
        )
        .bind(id)
        .fetch_all(&self.pool)
        .await?;

        Ok(Some(OrderDetail { order, items }))
    }

    #[tracing::instrument(skip(self), fields(db.table = "orders", db.operation = "update", db.record_id = %id))]
    pub async fn update_status(
        &self,
        id: Uuid,
        status: OrderStatus,
    ) -> Result<Option<Order>, AppError> {
        let order = sqlx::query_as::<Postgres, Order>(
            "UPDATE orders SET status = $2, updated_at = now() WHERE id = $1 RETURNING *",
        )
        .bind(id)
        .bind(status.as_str())
        .fetch_optional(&self.pool)
        .await?;

        Ok(order)
    }

    /// Order-number prefix search used by the admin global search.
    #[tracing::instrument(skip(self), fields(db.table = "orders", db.operation = "select"))]
    pub async fn search(&self, q: &str, limit: i64) -> Result<Vec<Order>, AppError> {
        let orders = sqlx::query_as::<Postgres, Order>(
            "SELECT * FROM orders WHERE order_number ILIKE $1 ORDER BY created_at DESC LIMIT $2",
        )
        .bind(format!("%{}%", q))
        .bind(limit)
        .fetch_all(&self.pool)
        .await?;

        Ok(orders)
    }
}

fn push_order_filters(
    query: &mut QueryBuilder<'_, Postgres>,
    status: Option<&str>,
    region: Option<&str>,
) {
    if let Some(status) = status {
        query.push(" AND status = ");
        query.push_bind(status.to_string());
    }
    if let Some(region) = region {
        query.push(" AND delivery_region = ");
        query.push_bind(region.to_string());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_order_number_format() {
        let number = generate_order_number();
        assert!(number.starts_with("ORD-"));
        assert_eq!(number.len(), 12);
        assert!(number[4..].chars().all(|c| c.is_ascii_digit()));
    }
}
