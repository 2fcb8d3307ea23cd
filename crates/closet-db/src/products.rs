use closet_core::models::{
    CreateProductRequest, LowStockVariant, Product, ProductDetail, ProductVariant,
    UpdateProductRequest,
};
use closet_core::AppError;
use sqlx::{PgPool, Postgres, QueryBuilder};
use uuid::Uuid;

/// Repository for products and their variants
#[derive(Clone)]
pub struct ProductRepository {
    pool: PgPool,
}

impl ProductRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// List products, newest first, with optional category and name filters.
    #[tracing::instrument(skip(self), fields(db.table = "products", db.operation = "select"))]
    pub async fn list(
        &self,
        page: u32,
        per_page: u32,
        category_id: Option<Uuid>,
        search: Option<&str>,
    ) -> Result<(Vec<Product>, i64), AppError> {
        let offset = (page.saturating_sub(1) as i64) * per_page as i64;

        let mut query = QueryBuilder::<Postgres>::new("SELECT * FROM products WHERE TRUE");
        push_product_filters(&mut query, category_id, search);
        query.push(" ORDER BY created_at DESC LIMIT ");
        query.push_bind(per_page as i64);
        query.push(" OFFSET ");
        query.push_bind(offset);

        let products = query
            .build_query_as::<Product>()
            .fetch_all(&self.pool)
            .await?;

        let mut count_query =
            QueryBuilder::<Postgres>::new("SELECT COUNT(*) FROM products WHERE TRUE");
        push_product_filters(&mut count_query, category_id, search);
        let total: i64 = count_query
            .build_query_scalar()
            .fetch_one(&self.pool)
            .await?;

        Ok((products, total))
    }

    #[tracing::instrument(skip(self), fields(db.table = "products", db.operation = "select", db.record_id = %id))]
    pub async fn get(&self, id: Uuid) -> Result<Option<Product>, AppError> {
        let product = sqlx::query_as::<Postgres, Product>("SELECT * FROM products WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

        Ok(product)
    }

    /// Get a product with its variant set.
    #[tracing::instrument(skip(self), fields(db.table = "products", db.operation = "select", db.record_id = %id))]
    pub async fn get_detail(&self, id: Uuid) -> Result<Option<ProductDetail>, AppError> {
        let Some(product) = self.get(id).await? else {
            return Ok(None);
        };

        let variants = self.variants(id).await?;

        Ok(Some(ProductDetail { product, variants }))
    }

    #[tracing::instrument(skip(self), fields(db.table = "product_variants", db.operation = "select"))]
    pub async fn variants(&self, product_id: Uuid) -> Result<Vec<ProductVariant>, AppError> {
        let variants = sqlx::query_as::<Postgres, ProductVariant>(
            "SELECT * FROM product_variants WHERE product_id = $1 ORDER BY size, color",
        )
        .bind(product_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(variants)
    }

    /// Create a product together with its variants in one transaction.
    #[tracing::instrument(skip(self, req), fields(db.table = "products", db.operation = "insert"))]
    pub async fn create(&self, req: &CreateProductRequest) -> Result<ProductDetail, AppError> {
        let mut tx = self.pool.begin().await?;

        let product = sqlx::query_as::<Postgres, Product>(
            r#"
            INSERT INTO products (id, name, description, category_id, price, discount_percent, images)
            VALUES ($1, $2, $3, $4, $5, $6, $7)
            RETURNING *
            "#,
        )
        .bind(Uuid::new_v4())
        .bind(&req.name)
        .bind(&req.description)
        .bind(req.category_id)
        .bind(req.price)
        .bind(req.discount_percent)
        .bind(&req.images)
        .fetch_one(&mut *tx)
        .await?;

        let mut variants = Vec::with_capacity(req.variants.len());
        for variant in &req.variants {
            let row = sqlx::query_as::<Postgres, ProductVariant>(
                r#"
                INSERT INTO product_variants (id, product_id, size, color, price, stock_quantity)
                VALUES ($1, $2, $3, $4, $5, $6)
                RETURNING *
                "#,
            )
            .bind(Uuid::new_v4())
            .bind(product.id)
            .bind(&variant.size)
            .bind(&variant.color)
            .bind(variant.price)
            .bind(variant.stock_quantity)
            .fetch_one(&mut *tx)
            .await?;
            variants.push(row);
        }

        tx.commit().await?;

        Ok(ProductDetail { product, variants })
    }

    /// Partially update a product; a present `variants` list replaces the
    /// existing set wholesale.
    #[tracing::instrument(skip(self, req), fields(db.table = "products", db.operation = "update", db.record_id = %id))]
    pub async fn update(
        &self,
        id: Uuid,
        req: &UpdateProductRequest,
    ) -> Result<Option<ProductDetail>, AppError> {
        let mut tx = self.pool.begin().await?;

        let product = sqlx::query_as::<Postgres, Product>(
            r#"
            UPDATE products SET
                name = COALESCE($2, name),
                description = COALESCE($3, description),
                category_id = COALESCE($4, category_id),
                price = COALESCE($5, price),
                discount_percent = COALESCE($6, discount_percent),
                images = COALESCE($7, images),
                updated_at = now()
            WHERE id = $1
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(&req.name)
        .bind(&req.description)
        .bind(req.category_id)
        .bind(req.price)
        .bind(req.discount_percent)
        .bind(&req.images)
        .fetch_optional(&mut *tx)
        .await?;

        let Some(product) = product else {
            return Ok(None);
        };

        if let Some(new_variants) = &req.variants {
            sqlx::query("DELETE FROM product_variants WHERE product_id = $1")
                .bind(id)
                .execute(&mut *tx)
                .await?;

            for variant in new_variants {
                sqlx::query(
                    r#"
                    INSERT INTO product_variants (id, product_id, size, color, price, stock_quantity)
                    VALUES ($1, $2, $3, $4, $5, $6)
                    "#,
                )
                .bind(Uuid::new_v4())
                .bind(id)
                .bind(&variant.size)
                .bind(&variant.color)
                .bind(variant.price)
                .bind(variant.stock_quantity)
                .execute(&mut *tx)
                .await?;
            }
        }

        tx.commit().await?;

        let variants = self.variants(id).await?;

        Ok(Some(ProductDetail { product, variants }))
    }

    #[tracing::instrument(skip(self), fields(db.table = "products", db.operation = "delete", db.record_id = %id))]
    pub async fn delete(&self, id: Uuid) -> Result<bool, AppError> {
        let result = sqlx::query("DELETE FROM products WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }

    /// Name search used by the admin global search.
    #[tracing::instrument(skip(self), fields(db.table = "products", db.operation = "select"))]
    pub async fn search(&self, q: &str, limit: i64) -> Result<Vec<Product>, AppError> {
        let products = sqlx::query_as::<Postgres, Product>(
            "SELECT * FROM products WHERE name ILIKE $1 ORDER BY name LIMIT $2",
        )
        .bind(format!("%{}%", q))
        .bind(limit)
        .fetch_all(&self.pool)
        .await?;

        Ok(products)
    }

    /// Variants at or under the restock threshold.
    #[tracing::instrument(skip(self), fields(db.table = "product_variants", db.operation = "select"))]
    pub async fn low_stock(&self, threshold: i32) -> Result<Vec<LowStockVariant>, AppError> {
        let variants = sqlx::query_as::<Postgres, LowStockVariant>(
            r#"
            SELECT v.id, v.product_id, p.name AS product_name, v.size, v.color, v.stock_quantity
            FROM product_variants v
            JOIN products p ON p.id = v.product_id
            WHERE v.stock_quantity <= $1
            ORDER BY v.stock_quantity ASC
            "#,
        )
        .bind(threshold)
        .fetch_all(&self.pool)
        .await?;

        Ok(variants)
    }
}

fn push_product_filters(
    query: &mut QueryBuilder<'_, Postgres>,
    category_id: Option<Uuid>,
    search: Option<&str>,
) {
    if let Some(category_id) = category_id {
        query.push(" AND category_id = ");
        query.push_bind(category_id);
    }
    if let Some(search) = search {
        query.push(" AND name ILIKE ");
        query.push_bind(format!("%{}%", search));
    }
}
