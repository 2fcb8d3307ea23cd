use closet_core::models::{
    CreateAddressRequest, CreateCustomerRequest, Customer, CustomerAddress, UpdateCustomerRequest,
};
use closet_core::AppError;
use sqlx::{PgPool, Postgres, QueryBuilder};
use uuid::Uuid;

/// Repository for customers and their saved addresses
#[derive(Clone)]
pub struct CustomerRepository {
    pool: PgPool,
}

impl CustomerRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    #[tracing::instrument(skip(self), fields(db.table = "customers", db.operation = "select"))]
    pub async fn list(
        &self,
        page: u32,
        per_page: u32,
        search: Option<&str>,
    ) -> Result<(Vec<Customer>, i64), AppError> {
        let offset = (page.saturating_sub(1) as i64) * per_page as i64;

        let mut query = QueryBuilder::<Postgres>::new("SELECT * FROM customers WHERE TRUE");
        push_customer_filters(&mut query, search);
        query.push(" ORDER BY created_at DESC LIMIT ");
        query.push_bind(per_page as i64);
        query.push(" OFFSET ");
        query.push_bind(offset);

        let customers = query
            .build_query_as::<Customer>()
            .fetch_all(&self.pool)
            .await?;

        let mut count_query =
            QueryBuilder::<Postgres>::new("SELECT COUNT(*) FROM customers WHERE TRUE");
        push_customer_filters(&mut count_query, search);
        let total: i64 = count_query
            .build_query_scalar()
            .fetch_one(&self.pool)
            .await?;

        Ok((customers, total))
    }

    #[tracing::instrument(skip(self), fields(db.table = "customers", db.operation = "select", db.record_id = %id))]
    pub async fn get(&self, id: Uuid) -> Result<Option<Customer>, AppError> {
        let customer = sqlx::query_as::<Postgres, Customer>("SELECT * FROM customers WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

        Ok(customer)
    }

    /// Point lookup of a customer's display name, used by the notification feed.
    #[tracing::instrument(skip(self), fields(db.table = "customers", db.operation = "select", db.record_id = %id))]
    pub async fn display_name(&self, id: Uuid) -> Result<Option<String>, AppError> {
        let name: Option<String> =
            sqlx::query_scalar("SELECT name FROM customers WHERE id = $1")
                .bind(id)
                .fetch_optional(&self.pool)
                .await?;

        Ok(name)
    }

    #[tracing::instrument(skip(self, req), fields(db.table = "customers", db.operation = "insert"))]
    pub async fn create(&self, req: &CreateCustomerRequest) -> Result<Customer, AppError> {
        let customer = sqlx::query_as::<Postgres, Customer>(
            r#"
            INSERT INTO customers (id, name, email, phone)
            VALUES ($1, $2, $3, $4)
            RETURNING *
            "#,
        )
        .bind(Uuid::new_v4())
        .bind(&req.name)
        .bind(&req.email)
        .bind(&req.phone)
        .fetch_one(&self.pool)
        .await?;

        Ok(customer)
    }

    #[tracing::instrument(skip(self, req), fields(db.table = "customers", db.operation = "update", db.record_id = %id))]
    pub async fn update(
        &self,
        id: Uuid,
        req: &UpdateCustomerRequest,
    ) -> Result<Option<Customer>, AppError> {
        let customer = sqlx::query_as::<Postgres, Customer>(
            r#"
            UPDATE customers SET
                name = COALESCE($2, name),
                email = COALESCE($3, email),
                phone = COALESCE($4, phone)
            WHERE id = $1
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(&req.name)
        .bind(&req.email)
        .bind(&req.phone)
        .fetch_optional(&self.pool)
        .await?;

        Ok(customer)
    }

    /// Name/email search used by the admin global search.
    #[tracing::instrument(skip(self), fields(db.table = "customers", db.operation = "select"))]
    pub async fn search(&self, q: &str, limit: i64) -> Result<Vec<Customer>, AppError> {
        let customers = sqlx::query_as::<Postgres, Customer>(
            "SELECT * FROM customers WHERE name ILIKE $1 OR email ILIKE $1 ORDER BY name LIMIT $2",
        )
        .bind(format!("%{}%", q))
        .bind(limit)
        .fetch_all(&self.pool)
        .await?;

        Ok(customers)
    }

    #[tracing::instrument(skip(self), fields(db.table = "customer_addresses", db.operation = "select"))]
    pub async fn addresses(&self, customer_id: Uuid) -> Result<Vec<CustomerAddress>, AppError> {
        let addresses = sqlx::query_as::<Postgres, CustomerAddress>(
            "SELECT * FROM customer_addresses WHERE customer_id = $1 ORDER BY is_default DESC, label",
        )
        .bind(customer_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(addresses)
    }

    /// Add an address; marking it default clears the flag on the others.
    #[tracing::instrument(skip(self, req), fields(db.table = "customer_addresses", db.operation = "insert"))]
    pub async fn create_address(
        &self,
        customer_id: Uuid,
        req: &CreateAddressRequest,
    ) -> Result<CustomerAddress, AppError> {
        let mut tx = self.pool.begin().await?;

        if req.is_default {
            sqlx::query("UPDATE customer_addresses SET is_default = FALSE WHERE customer_id = $1")
                .bind(customer_id)
                .execute(&mut *tx)
                .await?;
        }

        let address = sqlx::query_as::<Postgres, CustomerAddress>(
            r#"
            INSERT INTO customer_addresses (id, customer_id, label, line1, line2, city, region, is_default)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
            RETURNING *
            "#,
        )
        .bind(Uuid::new_v4())
        .bind(customer_id)
        .bind(&req.label)
        .bind(&req.line1)
        .bind(&req.line2)
        .bind(&req.city)
        .bind(&req.region)
        .bind(req.is_default)
        .fetch_one(&mut *tx)
        .await?;

        tx.commit().await?;

        Ok(address)
    }

    /// Replace an address; marking it default clears the flag on the others.
    #[tracing::instrument(skip(self, req), fields(db.table = "customer_addresses", db.operation = "update", db.record_id = %address_id))]
    pub async fn update_address(
        &self,
        customer_id: Uuid,
        address_id: Uuid,
        req: &CreateAddressRequest,
    ) -> Result<Option<CustomerAddress>, AppError> {
        let mut tx = self.pool.begin().await?;

        if req.is_default {
            sqlx::query("UPDATE customer_addresses SET is_default = FALSE WHERE customer_id = $1")
                .bind(customer_id)
                .execute(&mut *tx)
                .await?;
        }

        let address = sqlx::query_as::<Postgres, CustomerAddress>(
            r#"
            UPDATE customer_addresses
            SET label = $3, line1 = $4, line2 = $5, city = $6, region = $7, is_default = $8
            WHERE id = $1 AND customer_id = $2
            RETURNING *
            "#,
        )
        .bind(address_id)
        .bind(customer_id)
        .bind(&req.label)
        .bind(&req.line1)
        .bind(&req.line2)
        .bind(&req.city)
        .bind(&req.region)
        .bind(req.is_default)
        .fetch_optional(&mut *tx)
        .await?;

        tx.commit().await?;

        Ok(address)
    }

    #[tracing::instrument(skip(self), fields(db.table = "customer_addresses", db.operation = "delete", db.record_id = %address_id))]
    pub async fn delete_address(
        &self,
        customer_id: Uuid,
        address_id: Uuid,
    ) -> Result<bool, AppError> {
        let result =
            sqlx::query("DELETE FROM customer_addresses WHERE id = $1 AND customer_id = $2")
                .bind(address_id)
                .bind(customer_id)
                .execute(&self.pool)
                .await?;

        Ok(result.rows_affected() > 0)
    }
}

fn push_customer_filters(query: &mut QueryBuilder<'_, Postgres>, search: Option<&str>) {
    if let Some(search) = search {
        let pattern = format!("%{}%", search);
        query.push(" AND (name ILIKE ");
        query.push_bind(pattern.clone());
        query.push(" OR email ILIKE ");
        query.push_bind(pattern);
        query.push(")");
    }
}
