//! Admin-managed delivery options shown at checkout.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
pub struct DeliveryLocation {
    pub id: Uuid,
    pub region: String,
    pub area: String,
    pub fee: Decimal,
    pub estimated_days: i32,
}

#[derive(Debug, Deserialize, ToSchema, Validate)]
pub struct DeliveryLocationRequest {
    #[validate(length(min = 1, max = 128, message = "Region must be between 1 and 128 characters"))]
    pub region: String,
    #[validate(length(min = 1, max = 128, message = "Area must be between 1 and 128 characters"))]
    pub area: String,
    pub fee: Decimal,
    #[validate(range(min = 0, message = "Estimated days cannot be negative"))]
    pub estimated_days: i32,
}
