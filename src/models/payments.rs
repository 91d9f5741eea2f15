// rosterhub/src/models/payments.rs
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use uuid::Uuid;

// All money is integer minor units (cents)

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PaymentStatus {
    #[serde(rename = "unpaid")]
    Unpaid,
    #[serde(rename = "partial")]
    Partial,
    #[serde(rename = "paid")]
    Paid,
}

impl Default for PaymentStatus {
    fn default() -> Self {
        PaymentStatus::Unpaid
    }
}

impl PaymentStatus {
    // Three-way threshold: a pure function of paid total and due amount
    pub fn for_amounts(paid_cents: i64, due_cents: i64) -> Self {
        if paid_cents >= due_cents {
            PaymentStatus::Paid
        } else if paid_cents > 0 {
            PaymentStatus::Partial
        } else {
            PaymentStatus::Unpaid
        }
    }
}

#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct PaymentEntry {
    pub id: String,
    pub amount_cents: i64,
    pub date: DateTime<Utc>,
    pub note: Option<String>,
}

impl PaymentEntry {
    pub fn new(amount_cents: i64, date: DateTime<Utc>, note: Option<String>) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            amount_cents,
            date,
            note,
        }
    }
}

// Per-player settlement record inside one payment period.
// Invariant: paid_cents == sum of entry amounts.
#[derive(Serialize, Deserialize, Debug, Clone, Default)]
pub struct PlayerPayment {
    pub status: PaymentStatus,
    pub paid_cents: i64,
    // Stamped exactly when status first reaches Paid, cleared if it drops back
    pub paid_at: Option<DateTime<Utc>>,
    pub entries: Vec<PaymentEntry>,
}

#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct PaymentPeriod {
    pub id: String,
    pub title: String,
    pub amount_cents: i64,
    // Keyed by player id; only enrolled players appear here
    pub payments: HashMap<String, PlayerPayment>,
}

impl PaymentPeriod {
    pub fn new(title: &str, amount_cents: i64, player_ids: &[String]) -> Self {
        let payments = player_ids
            .iter()
            .map(|id| (id.clone(), PlayerPayment::default()))
            .collect();
        Self {
            id: Uuid::new_v4().to_string(),
            title: title.to_string(),
            amount_cents,
            payments,
        }
    }
}
