use serde::{Deserialize, Serialize};

pub const DEFAULT_CURRENCY: &str = "THB";
pub const DEFAULT_STATUS: &str = "active";

/// The columns of a `subscriptions` row that are returned to the owner.
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct Subscription {
    pub id: i64,
    pub name: String,
    pub category: String,
    pub amount: f64,
    pub currency: String,
    pub billing_cycle: String,
    pub billing_date: String,
    pub status: String,
    pub is_trial: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SubscriptionResponse {
    pub id: i64,
    pub name: String,
    pub category: String,
    pub amount: f64,
    pub currency: String,
    pub billing_cycle: String,
    pub billing_date: String,
    pub status: String,
    pub is_trial: bool,
}

impl From<Subscription> for SubscriptionResponse {
    fn from(sub: Subscription) -> Self {
        Self {
            id: sub.id,
            name: sub.name,
            category: sub.category,
            amount: sub.amount,
            currency: sub.currency,
            billing_cycle: sub.billing_cycle,
            billing_date: sub.billing_date,
            status: sub.status,
            is_trial: sub.is_trial,
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct CreateSubscriptionRequest {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub category: String,
    #[serde(default)]
    pub amount: f64,
    #[serde(default)]
    pub currency: String,
    #[serde(default)]
    pub billing_cycle: String,
    #[serde(default)]
    pub billing_date: String,
    #[serde(default)]
    pub status: String,
    #[serde(default)]
    pub is_trial: bool,
}

/// A validated subscription ready to be inserted.
#[derive(Debug, Clone, PartialEq)]
pub struct NewSubscription {
    pub name: String,
    pub category: String,
    pub amount: f64,
    pub currency: String,
    pub billing_cycle: String,
    pub billing_date: String,
    pub status: String,
    pub is_trial: bool,
}

impl CreateSubscriptionRequest {
    /// Checks required fields and fills in store defaults. Submitted values are
    /// stored as given; trimming only decides whether a field is blank.
    pub fn validate(self) -> Result<NewSubscription, String> {
        if is_blank(&self.name) {
            return Err("name is required".to_string());
        }
        if !self.amount.is_finite() || self.amount <= 0.0 {
            return Err("amount must be greater than zero".to_string());
        }
        if is_blank(&self.billing_cycle) {
            return Err("billing_cycle is required".to_string());
        }
        if is_blank(&self.billing_date) {
            return Err("billing_date is required".to_string());
        }

        Ok(NewSubscription {
            name: self.name,
            category: self.category,
            amount: self.amount,
            currency: or_default(self.currency, DEFAULT_CURRENCY),
            billing_cycle: self.billing_cycle,
            billing_date: self.billing_date,
            status: or_default(self.status, DEFAULT_STATUS),
            is_trial: self.is_trial,
        })
    }
}

fn is_blank(value: &str) -> bool {
    value.trim().is_empty()
}

// Only an omitted (empty) value takes the default.
fn or_default(value: String, default: &str) -> String {
    if value.is_empty() {
        default.to_string()
    } else {
        value
    }
}
