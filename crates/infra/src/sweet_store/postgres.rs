//! Postgres-backed catalog store.
//!
//! The quantity invariant (`0 <= quantity`) is enforced at the database
//! level: purchases run as a single conditional `UPDATE ... WHERE quantity
//! >= $n`, so concurrent buyers can never drive the stored quantity below
//! zero, and a `CHECK` constraint backs the same rule up in the schema.

use std::str::FromStr;
use std::sync::Arc;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use sqlx::{FromRow, PgPool, Row};
use tracing::instrument;

use sweetshop_catalog::{Category, Sweet, SweetDraft, SweetFilter};
use sweetshop_core::SweetId;
use sweetshop_inventory::plan_purchase;

use super::{StoreError, SweetStore};

/// How many times a purchase retries after losing a conditional update race
/// that a re-read says it should have won.
const PURCHASE_ATTEMPTS: u32 = 3;

const SWEET_COLUMNS: &str = "id, name, category, description, price, quantity, created_at, updated_at";

/// Postgres-backed catalog store.
///
/// Uses the sqlx connection pool, so cloning is cheap and the store is
/// `Send + Sync`.
#[derive(Debug, Clone)]
pub struct PostgresSweetStore {
    pool: Arc<PgPool>,
}

impl PostgresSweetStore {
    pub fn new(pool: PgPool) -> Self {
        Self {
            pool: Arc::new(pool),
        }
    }
}

#[async_trait]
impl SweetStore for PostgresSweetStore {
    #[instrument(skip(self, draft), fields(name = %draft.name), err)]
    async fn insert(&self, draft: SweetDraft) -> Result<Sweet, StoreError> {
        let sweet = Sweet::from_draft(draft);

        sqlx::query(
            r#"
            INSERT INTO sweets (id, name, category, description, price, quantity, created_at, updated_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
            "#,
        )
        .bind(sweet.id.as_uuid())
        .bind(&sweet.name)
        .bind(sweet.category.as_str())
        .bind(&sweet.description)
        .bind(sweet.price)
        .bind(sweet.quantity)
        .bind(sweet.created_at)
        .bind(sweet.updated_at)
        .execute(&*self.pool)
        .await
        .map_err(|e| map_write_error(e, &sweet.name))?;

        Ok(sweet)
    }

    #[instrument(skip(self, draft), fields(id = %id, name = %draft.name), err)]
    async fn replace(&self, id: SweetId, draft: SweetDraft) -> Result<Sweet, StoreError> {
        let row = sqlx::query(&format!(
            r#"
            UPDATE sweets
            SET name = $2, category = $3, description = $4, price = $5, quantity = $6, updated_at = $7
            WHERE id = $1
            RETURNING {SWEET_COLUMNS}
            "#,
        ))
        .bind(id.as_uuid())
        .bind(&draft.name)
        .bind(draft.category.as_str())
        .bind(&draft.description)
        .bind(draft.price)
        .bind(draft.quantity)
        .bind(Utc::now())
        .fetch_optional(&*self.pool)
        .await
        .map_err(|e| map_write_error(e, &draft.name))?;

        match row {
            Some(row) => SweetRow::from_row(&row)?.into_sweet(),
            None => Err(StoreError::NotFound),
        }
    }

    #[instrument(skip(self), fields(id = %id), err)]
    async fn delete(&self, id: SweetId) -> Result<(), StoreError> {
        let result = sqlx::query("DELETE FROM sweets WHERE id = $1")
            .bind(id.as_uuid())
            .execute(&*self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(StoreError::NotFound);
        }
        Ok(())
    }

    #[instrument(skip(self), fields(id = %id), err)]
    async fn get(&self, id: SweetId) -> Result<Sweet, StoreError> {
        let row = sqlx::query(&format!(
            "SELECT {SWEET_COLUMNS} FROM sweets WHERE id = $1"
        ))
        .bind(id.as_uuid())
        .fetch_optional(&*self.pool)
        .await?;

        match row {
            Some(row) => SweetRow::from_row(&row)?.into_sweet(),
            None => Err(StoreError::NotFound),
        }
    }

    #[instrument(skip(self), err)]
    async fn list(&self) -> Result<Vec<Sweet>, StoreError> {
        let rows = sqlx::query(&format!(
            "SELECT {SWEET_COLUMNS} FROM sweets ORDER BY lower(name) ASC"
        ))
        .fetch_all(&*self.pool)
        .await?;

        rows.iter()
            .map(|row| SweetRow::from_row(row)?.into_sweet())
            .collect()
    }

    #[instrument(skip(self, filter), err)]
    async fn search(&self, filter: &SweetFilter) -> Result<Vec<Sweet>, StoreError> {
        // One parameterized query; absent filter fields collapse to TRUE.
        let rows = sqlx::query(&format!(
            r#"
            SELECT {SWEET_COLUMNS}
            FROM sweets
            WHERE ($1::text IS NULL OR name ILIKE ('%' || $1 || '%') ESCAPE '\')
                AND ($2::text IS NULL OR category = $2)
                AND ($3::numeric IS NULL OR price >= $3)
                AND ($4::numeric IS NULL OR price <= $4)
            ORDER BY lower(name) ASC
            "#,
        ))
        .bind(filter.name.as_deref().map(escape_like))
        .bind(filter.category.map(|c| c.as_str()))
        .bind(filter.min_price)
        .bind(filter.max_price)
        .fetch_all(&*self.pool)
        .await?;

        rows.iter()
            .map(|row| SweetRow::from_row(row)?.into_sweet())
            .collect()
    }

    #[instrument(skip(self), fields(id = %id, quantity), err)]
    async fn purchase(&self, id: SweetId, quantity: i64) -> Result<Sweet, StoreError> {
        for attempt in 0..PURCHASE_ATTEMPTS {
            // The guarded update only matches while enough stock remains, so
            // two buyers can never both take the last unit.
            let row = sqlx::query(&format!(
                r#"
                UPDATE sweets
                SET quantity = quantity - $2, updated_at = $3
                WHERE id = $1 AND quantity >= $2
                RETURNING {SWEET_COLUMNS}
                "#,
            ))
            .bind(id.as_uuid())
            .bind(quantity)
            .bind(Utc::now())
            .fetch_optional(&*self.pool)
            .await?;

            if let Some(row) = row {
                return SweetRow::from_row(&row)?.into_sweet();
            }

            // Nothing matched: the record is missing or stock is short.
            // Re-read to tell the two apart; NotFound propagates from get.
            let current = self.get(id).await?;
            plan_purchase(&current.name, current.quantity, quantity)?;

            // The re-read says the purchase should succeed, so a concurrent
            // adjustment landed between the update and the read.
            tracing::debug!(attempt, "purchase lost a stock race, retrying");
        }

        Err(StoreError::Contention)
    }

    #[instrument(skip(self), fields(id = %id, quantity), err)]
    async fn restock(&self, id: SweetId, quantity: i64) -> Result<Sweet, StoreError> {
        let row = sqlx::query(&format!(
            r#"
            UPDATE sweets
            SET quantity = quantity + $2, updated_at = $3
            WHERE id = $1
            RETURNING {SWEET_COLUMNS}
            "#,
        ))
        .bind(id.as_uuid())
        .bind(quantity)
        .bind(Utc::now())
        .fetch_optional(&*self.pool)
        .await?;

        match row {
            Some(row) => SweetRow::from_row(&row)?.into_sweet(),
            None => Err(StoreError::NotFound),
        }
    }
}

/// Escape `LIKE` pattern metacharacters so a bound search term matches
/// literally instead of acting as a wildcard.
fn escape_like(raw: &str) -> String {
    raw.replace('\\', "\\\\")
        .replace('%', "\\%")
        .replace('_', "\\_")
}

/// Map a write-path sqlx error, turning unique violations on the name index
/// into `Duplicate`.
fn map_write_error(err: sqlx::Error, name: &str) -> StoreError {
    if is_unique_violation(&err) {
        return StoreError::Duplicate {
            field: "name",
            value: name.to_string(),
        };
    }
    StoreError::Database(err)
}

/// Check if an error is a unique constraint violation (PostgreSQL 23505).
fn is_unique_violation(err: &sqlx::Error) -> bool {
    if let sqlx::Error::Database(db_err) = err {
        if let Some(code) = db_err.code() {
            return code.as_ref() == "23505";
        }
    }
    false
}

#[derive(Debug)]
struct SweetRow {
    id: uuid::Uuid,
    name: String,
    category: String,
    description: String,
    price: Decimal,
    quantity: i64,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl<'r> sqlx::FromRow<'r, sqlx::postgres::PgRow> for SweetRow {
    fn from_row(row: &'r sqlx::postgres::PgRow) -> Result<Self, sqlx::Error> {
        Ok(SweetRow {
            id: row.try_get("id")?,
            name: row.try_get("name")?,
            category: row.try_get("category")?,
            description: row.try_get("description")?,
            price: row.try_get("price")?,
            quantity: row.try_get("quantity")?,
            created_at: row.try_get("created_at")?,
            updated_at: row.try_get("updated_at")?,
        })
    }
}

impl SweetRow {
    fn into_sweet(self) -> Result<Sweet, StoreError> {
        let category = Category::from_str(&self.category)
            .map_err(|e| StoreError::Database(sqlx::Error::Decode(Box::new(e))))?;

        Ok(Sweet {
            id: SweetId::from_uuid(self.id),
            name: self.name,
            category,
            description: self.description,
            price: self.price,
            quantity: self.quantity,
            created_at: self.created_at,
            updated_at: self.updated_at,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::escape_like;

    #[test]
    fn escape_like_neutralizes_pattern_metacharacters() {
        assert_eq!(escape_like("caramel"), "caramel");
        assert_eq!(escape_like("100% cocoa"), "100\\% cocoa");
        assert_eq!(escape_like("rock_candy"), "rock\\_candy");
        assert_eq!(escape_like("back\\slash"), "back\\\\slash");
        assert_eq!(escape_like("%_\\"), "\\%\\_\\\\");
    }
}
