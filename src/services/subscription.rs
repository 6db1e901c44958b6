use crate::{
    error::{is_unique_violation, AppError},
    models::subscription::{CreateSubscriptionRequest, SubscriptionResponse},
    repository::SubscriptionRepository,
};

const NOT_FOUND: &str = "subscription not found";

/// Subscription operations scoped to the calling user. A row owned by someone
/// else is reported exactly like a missing one.
#[derive(Clone)]
pub struct SubscriptionService {
    subscriptions: SubscriptionRepository,
}

impl SubscriptionService {
    pub fn new(subscriptions: SubscriptionRepository) -> Self {
        Self { subscriptions }
    }

    /// Ordered by id, ascending.
    pub async fn list(&self, user_id: i64) -> Result<Vec<SubscriptionResponse>, AppError> {
        let subs = self.subscriptions.list(user_id).await?;
        Ok(subs.into_iter().map(Into::into).collect())
    }

    pub async fn get(&self, id: i64, user_id: i64) -> Result<SubscriptionResponse, AppError> {
        self.subscriptions
            .find(id, user_id)
            .await?
            .map(Into::into)
            .ok_or(AppError::NotFound(NOT_FOUND))
    }

    pub async fn create(
        &self,
        req: CreateSubscriptionRequest,
        user_id: i64,
    ) -> Result<SubscriptionResponse, AppError> {
        let new_sub = req.validate().map_err(AppError::Validation)?;

        let created = self
            .subscriptions
            .create(&new_sub, user_id)
            .await
            .map_err(|e| {
                if is_unique_violation(&e) {
                    AppError::Conflict(format!("subscription '{}' already exists", new_sub.name))
                } else {
                    AppError::Sqlx(e)
                }
            })?;

        tracing::debug!("User {} created subscription {}", user_id, created.id);
        Ok(created.into())
    }

    pub async fn delete(&self, id: i64, user_id: i64) -> Result<(), AppError> {
        match self.subscriptions.delete(id, user_id).await? {
            0 => Err(AppError::NotFound(NOT_FOUND)),
            _ => {
                tracing::debug!("User {} deleted subscription {}", user_id, id);
                Ok(())
            }
        }
    }
}
