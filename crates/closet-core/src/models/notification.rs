//! Order notifications for the admin feed.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

/// One observed order-insert event, enriched with the customer's name.
///
/// Notifications live in the in-process feed and its persisted mirror; the
/// orders table remains the source of truth.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct OrderNotification {
    pub id: Uuid,
    pub order_id: Uuid,
    pub payment_code: String,
    pub amount: Decimal,
    pub customer_name: String,
    pub order_status: String,
    pub region: Option<String>,
    pub created_at: DateTime<Utc>,
    pub read: bool,
}
