use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PaymentStatus {
    Pending,
    Approved,
    Rejected,
}

impl PaymentStatus {
    /// Approved and rejected are absorbing states.
    pub fn is_terminal(&self) -> bool {
        !matches!(self, PaymentStatus::Pending)
    }
}

/// One purchasable credit bundle, as configured by the operator.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct Tier {
    pub index: u8,
    pub price: u32,
    pub messages: u32,
    pub images: u32,
}

/// One record per purchase attempt, keyed by uuid.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PaymentRecord {
    pub id: String,
    pub user_id: i64,
    pub tier: u8,
    pub amount: u32,
    pub messages: u32,
    pub images: u32,
    pub status: PaymentStatus,
    #[serde(default)]
    pub utr_id: Option<String>,
    #[serde(default)]
    pub utr_date: Option<DateTime<Utc>>,
    #[serde(default)]
    pub screenshot_received: bool,
    #[serde(default)]
    pub screenshot_date: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
    #[serde(default)]
    pub approved_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub rejected_at: Option<DateTime<Utc>>,
}

impl PaymentRecord {
    /// A payment with both UTR and screenshot on file, still pending the
    /// operator's decision.
    pub fn awaiting_review(&self) -> bool {
        self.status == PaymentStatus::Pending && self.screenshot_received
    }
}
