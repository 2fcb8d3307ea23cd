use closet_core::models::{
    Category, CategoryAttributes, CategoryAttributesRequest, CreateCategoryRequest,
};
use closet_core::AppError;
use sqlx::{PgPool, Postgres};
use uuid::Uuid;

/// Repository for categories and their variant configuration
#[derive(Clone)]
pub struct CategoryRepository {
    pool: PgPool,
}

/// Derive a URL slug from a category name.
pub(crate) fn slugify(name: &str) -> String {
    name.trim()
        .to_lowercase()
        .chars()
        .map(|c| if c.is_alphanumeric() { c } else { '-' })
        .collect::<String>()
        .split('-')
        .filter(|s| !s.is_empty())
        .collect::<Vec<_>>()
        .join("-")
}

impl CategoryRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    #[tracing::instrument(skip(self), fields(db.table = "categories", db.operation = "select"))]
    pub async fn list(&self) -> Result<Vec<Category>, AppError> {
        let categories =
            sqlx::query_as::<Postgres, Category>("SELECT * FROM categories ORDER BY name")
                .fetch_all(&self.pool)
                .await?;

        Ok(categories)
    }

    #[tracing::instrument(skip(self), fields(db.table = "categories", db.operation = "select", db.record_id = %id))]
    pub async fn get(&self, id: Uuid) -> Result<Option<Category>, AppError> {
        let category =
            sqlx::query_as::<Postgres, Category>("SELECT * FROM categories WHERE id = $1")
                .bind(id)
                .fetch_optional(&self.pool)
                .await?;

        Ok(category)
    }

    #[tracing::instrument(skip(self, req), fields(db.table = "categories", db.operation = "insert"))]
    pub async fn create(&self, req: &CreateCategoryRequest) -> Result<Category, AppError> {
        let slug = slugify(&req.name);

        let category = sqlx::query_as::<Postgres, Category>(
            r#"
            INSERT INTO categories (id, name, slug, description, parent_id, image_url)
            VALUES ($1, $2, $3, $4, $5, $6)
            RETURNING *
            "#,
        )
        .bind(Uuid::new_v4())
        .bind(&req.name)
        .bind(&slug)
        .bind(&req.description)
        .bind(req.parent_id)
        .bind(&req.image_url)
        .fetch_one(&self.pool)
        .await?;

        Ok(category)
    }

    /// Full update; the slug follows the new name.
    #[tracing::instrument(skip(self, req), fields(db.table = "categories", db.operation = "update", db.record_id = %id))]
    pub async fn update(
        &self,
        id: Uuid,
        req: &CreateCategoryRequest,
    ) -> Result<Option<Category>, AppError> {
        let slug = slugify(&req.name);

        let category = sqlx::query_as::<Postgres, Category>(
            r#"
            UPDATE categories
            SET name = $2, slug = $3, description = $4, parent_id = $5, image_url = $6
            WHERE id = $1
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(&req.name)
        .bind(&slug)
        .bind(&req.description)
        .bind(req.parent_id)
        .bind(&req.image_url)
        .fetch_optional(&self.pool)
        .await?;

        Ok(category)
    }

    #[tracing::instrument(skip(self), fields(db.table = "categories", db.operation = "delete", db.record_id = %id))]
    pub async fn delete(&self, id: Uuid) -> Result<bool, AppError> {
        let result = sqlx::query("DELETE FROM categories WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }

    #[tracing::instrument(skip(self), fields(db.table = "category_attributes", db.operation = "select"))]
    pub async fn attributes(
        &self,
        category_id: Uuid,
    ) -> Result<Option<CategoryAttributes>, AppError> {
        let attributes = sqlx::query_as::<Postgres, CategoryAttributes>(
            "SELECT * FROM category_attributes WHERE category_id = $1",
        )
        .bind(category_id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(attributes)
    }

    #[tracing::instrument(skip(self, req), fields(db.table = "category_attributes", db.operation = "upsert"))]
    pub async fn upsert_attributes(
        &self,
        category_id: Uuid,
        req: &CategoryAttributesRequest,
    ) -> Result<CategoryAttributes, AppError> {
        let attributes = sqlx::query_as::<Postgres, CategoryAttributes>(
            r#"
            INSERT INTO category_attributes (category_id, has_sizes, has_colors, size_options, color_options)
            VALUES ($1, $2, $3, $4, $5)
            ON CONFLICT (category_id) DO UPDATE SET
                has_sizes = EXCLUDED.has_sizes,
                has_colors = EXCLUDED.has_colors,
                size_options = EXCLUDED.size_options,
                color_options = EXCLUDED.color_options
            RETURNING *
            "#,
        )
        .bind(category_id)
        .bind(req.has_sizes)
        .bind(req.has_colors)
        .bind(&req.size_options)
        .bind(&req.color_options)
        .fetch_one(&self.pool)
        .await?;

        Ok(attributes)
    }

    /// Name search used by the admin global search.
    #[tracing::instrument(skip(self), fields(db.table = "categories", db.operation = "select"))]
    pub async fn search(&self, q: &str, limit: i64) -> Result<Vec<Category>, AppError> {
        let categories = sqlx::query_as::<Postgres, Category>(
            "SELECT * FROM categories WHERE name ILIKE $1 ORDER BY name LIMIT $2",
        )
        .bind(format!("%{}%", q))
        .bind(limit)
        .fetch_all(&self.pool)
        .await?;

        Ok(categories)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_slugify_basic() {
        assert_eq!(slugify("Better Days"), "better-days");
        assert_eq!(slugify("Kids' Shoes"), "kids-shoes");
    }

    #[test]
    fn test_slugify_collapses_separators() {
        assert_eq!(slugify("  New   Arrivals!  "), "new-arrivals");
        assert_eq!(slugify("A--B"), "a-b");
    }
}
