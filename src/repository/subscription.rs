use sqlx::sqlite::SqlitePool;

use crate::models::subscription::{NewSubscription, Subscription};

const COLUMNS: &str =
    "id, name, category, amount, currency, billing_cycle, billing_date, status, is_trial";

/// Resource store over the `subscriptions` table. Every statement filters on
/// `user_id`, so ownership is checked by the same statement that reads or writes.
#[derive(Clone)]
pub struct SubscriptionRepository {
    db: SqlitePool,
}

impl SubscriptionRepository {
    pub fn new(db: SqlitePool) -> Self {
        Self { db }
    }

    pub async fn list(&self, user_id: i64) -> Result<Vec<Subscription>, sqlx::Error> {
        sqlx::query_as::<_, Subscription>(&format!(
            "SELECT {COLUMNS} FROM subscriptions WHERE user_id = ? ORDER BY id ASC"
        ))
        .bind(user_id)
        .fetch_all(&self.db)
        .await
    }

    pub async fn find(&self, id: i64, user_id: i64) -> Result<Option<Subscription>, sqlx::Error> {
        sqlx::query_as::<_, Subscription>(&format!(
            "SELECT {COLUMNS} FROM subscriptions WHERE id = ? AND user_id = ?"
        ))
        .bind(id)
        .bind(user_id)
        .fetch_optional(&self.db)
        .await
    }

    pub async fn create(
        &self,
        sub: &NewSubscription,
        user_id: i64,
    ) -> Result<Subscription, sqlx::Error> {
        sqlx::query_as::<_, Subscription>(&format!(
            "INSERT INTO subscriptions
             (user_id, name, category, amount, currency, billing_cycle, billing_date,
              status, is_trial)
             VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?)
             RETURNING {COLUMNS}"
        ))
        .bind(user_id)
        .bind(&sub.name)
        .bind(&sub.category)
        .bind(sub.amount)
        .bind(&sub.currency)
        .bind(&sub.billing_cycle)
        .bind(&sub.billing_date)
        .bind(&sub.status)
        .bind(sub.is_trial)
        .fetch_one(&self.db)
        .await
    }

    /// Returns the number of rows removed; zero means missing or not owned.
    pub async fn delete(&self, id: i64, user_id: i64) -> Result<u64, sqlx::Error> {
        let result = sqlx::query("DELETE FROM subscriptions WHERE id = ? AND user_id = ?")
            .bind(id)
            .bind(user_id)
            .execute(&self.db)
            .await?;
        Ok(result.rows_affected())
    }
}
