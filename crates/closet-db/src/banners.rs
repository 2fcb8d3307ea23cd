use closet_core::models::{BannerRequest, MarketingBanner};
use closet_core::AppError;
use sqlx::{PgPool, Postgres};
use uuid::Uuid;

/// Repository for marketing banners
#[derive(Clone)]
pub struct BannerRepository {
    pool: PgPool,
}

impl BannerRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// List banners in display order; `active_only` restricts to live ones.
    #[tracing::instrument(skip(self), fields(db.table = "marketing_banners", db.operation = "select"))]
    pub async fn list(&self, active_only: bool) -> Result<Vec<MarketingBanner>, AppError> {
        let sql = if active_only {
            "SELECT * FROM marketing_banners WHERE active ORDER BY position, created_at"
        } else {
            "SELECT * FROM marketing_banners ORDER BY position, created_at"
        };

        let banners = sqlx::query_as::<Postgres, MarketingBanner>(sql)
            .fetch_all(&self.pool)
            .await?;

        Ok(banners)
    }

    #[tracing::instrument(skip(self), fields(db.table = "marketing_banners", db.operation = "select", db.record_id = %id))]
    pub async fn get(&self, id: Uuid) -> Result<Option<MarketingBanner>, AppError> {
        let banner = sqlx::query_as::<Postgres, MarketingBanner>(
            "SELECT * FROM marketing_banners WHERE id = $1",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(banner)
    }

    #[tracing::instrument(skip(self, req), fields(db.table = "marketing_banners", db.operation = "insert"))]
    pub async fn create(&self, req: &BannerRequest) -> Result<MarketingBanner, AppError> {
        let banner = sqlx::query_as::<Postgres, MarketingBanner>(
            r#"
            INSERT INTO marketing_banners (id, title, subtitle, image_url, link_url, active, position)
            VALUES ($1, $2, $3, $4, $5, $6, $7)
            RETURNING *
            "#,
        )
        .bind(Uuid::new_v4())
        .bind(&req.title)
        .bind(&req.subtitle)
        .bind(&req.image_url)
        .bind(&req.link_url)
        .bind(req.active)
        .bind(req.position)
        .fetch_one(&self.pool)
        .await?;

        Ok(banner)
    }

    #[tracing::instrument(skip(self, req), fields(db.table = "marketing_banners", db.operation = "update", db.record_id = %id))]
    pub async fn update(
        &self,
        id: Uuid,
        req: &BannerRequest,
    ) -> Result<Option<MarketingBanner>, AppError> {
        let banner = sqlx::query_as::<Postgres, MarketingBanner>(
            r#"
            UPDATE marketing_banners
            SET title = $2, subtitle = $3, image_url = $4, link_url = $5, active = $6, position = $7
            WHERE id = $1
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(&req.title)
        .bind(&req.subtitle)
        .bind(&req.image_url)
        .bind(&req.link_url)
        .bind(req.active)
        .bind(req.position)
        .fetch_optional(&self.pool)
        .await?;

        Ok(banner)
    }

    #[tracing::instrument(skip(self), fields(db.table = "marketing_banners", db.operation = "delete", db.record_id = %id))]
    pub async fn delete(&self, id: Uuid) -> Result<bool, AppError> {
        let result = sqlx::query("DELETE FROM marketing_banners WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }
}
