use chrono::Utc;
use sled::Db;
use uuid::Uuid;

use super::dto::{PaymentRecord, PaymentStatus, Tier};
use crate::error::{StoreError, StoreResult};
use crate::store::Collection;
use crate::users::handler::Users;

const TREE_NAME: &str = "payments";

/// Payment store and the pending → approved/rejected state machine.
///
/// Approval is the only path that touches the owning user's ledger, and
/// the credit is tied to the state transition itself, so re-approving an
/// already-approved payment can never double-credit.
#[derive(Clone)]
pub struct Payments {
    records: Collection<PaymentRecord>,
}

impl Payments {
    pub fn new(db: &Db) -> StoreResult<Self> {
        Ok(Self {
            records: Collection::open(db, TREE_NAME)?,
        })
    }

    pub fn create(&self, user_id: i64, tier: &Tier) -> StoreResult<PaymentRecord> {
        let record = PaymentRecord {
            id: Uuid::new_v4().to_string(),
            user_id,
            tier: tier.index,
            amount: tier.price,
            messages: tier.messages,
            images: tier.images,
            status: PaymentStatus::Pending,
            utr_id: None,
            utr_date: None,
            screenshot_received: false,
            screenshot_date: None,
            created_at: Utc::now(),
            approved_at: None,
            rejected_at: None,
        };
        self.records.create(&record.id, &record)?;
        Ok(record)
    }

    pub fn get(&self, id: &str) -> StoreResult<Option<PaymentRecord>> {
        self.records.get(id)
    }

    pub fn expect(&self, id: &str) -> StoreResult<PaymentRecord> {
        self.records.expect(id)
    }

    pub fn all(&self) -> StoreResult<Vec<PaymentRecord>> {
        self.records.all()
    }

    pub fn pending(&self) -> StoreResult<Vec<PaymentRecord>> {
        Ok(self
            .all()?
            .into_iter()
            .filter(|payment| payment.status == PaymentStatus::Pending)
            .collect())
    }

    /// Record the transaction reference the user sent.
    pub fn attach_utr(&self, id: &str, utr: &str) -> StoreResult<PaymentRecord> {
        let utr = utr.to_string();
        self.records.update(id, move |mut payment| {
            payment.utr_id = Some(utr.clone());
            payment.utr_date = Some(Utc::now());
            payment
        })
    }

    /// Record that the proof-of-payment screenshot arrived.
    pub fn mark_screenshot(&self, id: &str) -> StoreResult<PaymentRecord> {
        self.records.update(id, |mut payment| {
            payment.screenshot_received = true;
            payment.screenshot_date = Some(Utc::now());
            payment
        })
    }

    /// Operator approval. Credits the owner exactly when the pending →
    /// approved transition happens; approving an already-approved payment
    /// is an idempotent no-op, approving a rejected one is refused.
    pub fn approve(&self, users: &Users, id: &str) -> StoreResult<PaymentRecord> {
        let mut transitioned = false;
        let payment = self.records.update(id, |mut payment| {
            transitioned = false;
            if payment.status == PaymentStatus::Pending {
                payment.status = PaymentStatus::Approved;
                payment.approved_at = Some(Utc::now());
                transitioned = true;
            }
            payment
        })?;

        if payment.status == PaymentStatus::Rejected {
            return Err(StoreError::Validation(format!(
                "payment {} was already rejected",
                id
            )));
        }

        if transitioned {
            match users.credit_purchase(
                payment.user_id,
                payment.messages,
                payment.images,
                payment.amount,
            ) {
                Ok(_) => {}
                // Owner deleted between purchase and approval: keep the
                // payment approved, there is nobody left to credit.
                Err(StoreError::NotFound(_)) => {
                    log::warn!(
                        "approved payment {} has no owning user {}",
                        payment.id,
                        payment.user_id
                    );
                }
                Err(e) => return Err(e),
            }
        }

        Ok(payment)
    }

    /// Operator rejection. No ledger mutation; rejecting twice is an
    /// idempotent no-op, rejecting an approved payment is refused.
    pub fn reject(&self, id: &str) -> StoreResult<PaymentRecord> {
        let payment = self.records.update(id, |mut payment| {
            if payment.status == PaymentStatus::Pending {
                payment.status = PaymentStatus::Rejected;
                payment.rejected_at = Some(Utc::now());
            }
            payment
        })?;

        if payment.status == PaymentStatus::Approved {
            return Err(StoreError::Validation(format!(
                "payment {} was already approved",
                id
            )));
        }

        Ok(payment)
    }
}
