use closet_core::models::{DeliveryLocation, DeliveryLocationRequest};
use closet_core::AppError;
use sqlx::{PgPool, Postgres};
use uuid::Uuid;

/// Repository for admin-managed delivery locations
#[derive(Clone)]
pub struct DeliveryRepository {
    pool: PgPool,
}

impl DeliveryRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    #[tracing::instrument(skip(self), fields(db.table = "delivery_locations", db.operation = "select"))]
    pub async fn list(&self) -> Result<Vec<DeliveryLocation>, AppError> {
        let locations = sqlx::query_as::<Postgres, DeliveryLocation>(
            "SELECT * FROM delivery_locations ORDER BY region, area",
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(locations)
    }

    #[tracing::instrument(skip(self), fields(db.table = "delivery_locations", db.operation = "select", db.record_id = %id))]
    pub async fn get(&self, id: Uuid) -> Result<Option<DeliveryLocation>, AppError> {
        let location = sqlx::query_as::<Postgres, DeliveryLocation>(
            "SELECT * FROM delivery_locations WHERE id = $1",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(location)
    }

    #[tracing::instrument(skip(self, req), fields(db.table = "delivery_locations", db.operation = "insert"))]
    pub async fn create(&self, req: &DeliveryLocationRequest) -> Result<DeliveryLocation, AppError> {
        let location = sqlx::query_as::<Postgres, DeliveryLocation>(
            r#"
            INSERT INTO delivery_locations (id, region, area, fee, estimated_days)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING *
            "#,
        )
        .bind(Uuid::new_v4())
        .bind(&req.region)
        .bind(&req.area)
        .bind(req.fee)
        .bind(req.estimated_days)
        .fetch_one(&self.pool)
        .await?;

        Ok(location)
    }

    #[tracing::instrument(skip(self, req), fields(db.table = "delivery_locations", db.operation = "update", db.record_id = %id))]
    pub async fn update(
        &self,
        id: Uuid,
        req: &DeliveryLocationRequest,
    ) -> Result<Option<DeliveryLocation>, AppError> {
        let location = sqlx::query_as::<Postgres, DeliveryLocation>(
            r#"
            UPDATE delivery_locations
            SET region = $2, area = $3, fee = $4, estimated_days = $5
            WHERE id = $1
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(&req.region)
        .bind(&req.area)
        .bind(req.fee)
        .bind(req.estimated_days)
        .fetch_optional(&self.pool)
        .await?;

        Ok(location)
    }

    #[tracing::instrument(skip(self), fields(db.table = "delivery_locations", db.operation = "delete", db.record_id = %id))]
    pub async fn delete(&self, id: Uuid) -> Result<bool, AppError> {
        let result = sqlx::query("DELETE FROM delivery_locations WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }
}
