use chrono::Utc;
use sled::Db;
use uuid::Uuid;

use super::dto::{
    ChatMood, PremiumStatus, ReferralBonus, StartingCredits, UserRecord, UserUpdate,
};
use crate::error::StoreResult;
use crate::store::Collection;

const TREE_NAME: &str = "users";

/// User store plus the credit ledger and payment-flow flag transitions
/// that operate on it. All mutations are atomic per user.
#[derive(Clone)]
pub struct Users {
    records: Collection<UserRecord>,
}

impl Users {
    pub fn new(db: &Db) -> StoreResult<Self> {
        Ok(Self {
            records: Collection::open(db, TREE_NAME)?,
        })
    }

    pub fn create(
        &self,
        telegram_id: i64,
        referred_by: Option<String>,
        starting: StartingCredits,
    ) -> StoreResult<UserRecord> {
        let now = Utc::now();
        let referral_code: String = Uuid::new_v4().simple().to_string().chars().take(8).collect();
        let record = UserRecord {
            telegram_id,
            referral_code,
            referred_by,
            referred_users: Vec::new(),
            messages_left: starting.messages,
            images_left: starting.images,
            premium_status: PremiumStatus::Free,
            total_spent: 0,
            chat_mood: ChatMood::default(),
            has_joined_channel: false,
            awaiting_utr: false,
            awaiting_screenshot: false,
            pending_payment_id: None,
            pending_utr: None,
            joined_at: now,
            last_active: now,
        };
        self.records.create(&telegram_id.to_string(), &record)?;
        Ok(record)
    }

    pub fn get(&self, telegram_id: i64) -> StoreResult<Option<UserRecord>> {
        self.records.get(&telegram_id.to_string())
    }

    /// Like `get` but absent records are a `NotFound` error.
    pub fn expect(&self, telegram_id: i64) -> StoreResult<UserRecord> {
        self.records.expect(&telegram_id.to_string())
    }

    pub fn delete(&self, telegram_id: i64) -> StoreResult<()> {
        self.records.remove(&telegram_id.to_string())
    }

    pub fn exists(&self, telegram_id: i64) -> StoreResult<bool> {
        self.records.contains(&telegram_id.to_string())
    }

    pub fn all(&self) -> StoreResult<Vec<UserRecord>> {
        self.records.all()
    }

    /// Shallow-merge an admin edit onto the record.
    pub fn apply(&self, telegram_id: i64, update: &UserUpdate) -> StoreResult<UserRecord> {
        self.records
            .update(&telegram_id.to_string(), |record| update.apply(record))
    }

    pub fn find_by_referral_code(&self, referral_code: &str) -> StoreResult<Option<UserRecord>> {
        Ok(self
            .all()?
            .into_iter()
            .find(|user| user.referral_code == referral_code))
    }

    /// Spend one message credit. Draining an empty balance is a silent
    /// no-op so callers can pre-check and prompt the user themselves.
    pub fn decrement_messages(&self, telegram_id: i64) -> StoreResult<UserRecord> {
        self.records.update(&telegram_id.to_string(), |mut user| {
            if user.messages_left > 0 {
                user.messages_left -= 1;
                user.last_active = Utc::now();
            }
            user
        })
    }

    /// Spend one image credit. No-op at zero, same as `decrement_messages`.
    pub fn decrement_images(&self, telegram_id: i64) -> StoreResult<UserRecord> {
        self.records.update(&telegram_id.to_string(), |mut user| {
            if user.images_left > 0 {
                user.images_left -= 1;
                user.last_active = Utc::now();
            }
            user
        })
    }

    /// Credit the owner of `referral_code` for inviting `new_user_id`.
    ///
    /// Returns whether the bonus was applied. The membership check and the
    /// append happen inside one atomic update, so the same invitee can
    /// never credit the same referrer twice, even under concurrent calls.
    pub fn add_referral(
        &self,
        referral_code: &str,
        new_user_id: i64,
        bonus: ReferralBonus,
    ) -> StoreResult<bool> {
        let Some(referrer) = self.find_by_referral_code(referral_code)? else {
            return Ok(false);
        };

        let mut applied = false;
        self.records
            .update(&referrer.telegram_id.to_string(), |mut user| {
                applied = false;
                if user.referred_users.contains(&new_user_id) {
                    return user;
                }
                user.referred_users.push(new_user_id);
                user.messages_left += bonus.messages;
                user.images_left += bonus.images;
                applied = true;
                user
            })?;
        Ok(applied)
    }

    /// Approval-only path: add the purchased credits and record the spend.
    pub fn credit_purchase(
        &self,
        telegram_id: i64,
        messages: u32,
        images: u32,
        amount: u32,
    ) -> StoreResult<UserRecord> {
        self.records.update(&telegram_id.to_string(), |mut user| {
            user.messages_left += messages;
            user.images_left += images;
            user.premium_status = PremiumStatus::Premium;
            user.total_spent += amount;
            user
        })
    }

    pub fn set_mood(&self, telegram_id: i64, mood: ChatMood) -> StoreResult<UserRecord> {
        self.records.update(&telegram_id.to_string(), |mut user| {
            user.chat_mood = mood;
            user
        })
    }

    pub fn mark_channel_joined(&self, telegram_id: i64) -> StoreResult<UserRecord> {
        self.records.update(&telegram_id.to_string(), |mut user| {
            user.has_joined_channel = true;
            user
        })
    }

    /// Tier selected: start collecting the UTR for the new payment.
    pub fn begin_payment(&self, telegram_id: i64, payment_id: &str) -> StoreResult<UserRecord> {
        let payment_id = payment_id.to_string();
        self.records.update(&telegram_id.to_string(), move |mut user| {
            user.awaiting_utr = true;
            user.awaiting_screenshot = false;
            user.pending_payment_id = Some(payment_id.clone());
            user
        })
    }

    /// Valid UTR arrived: move on to collecting the screenshot.
    pub fn utr_received(&self, telegram_id: i64, utr: &str) -> StoreResult<UserRecord> {
        let utr = utr.to_string();
        self.records.update(&telegram_id.to_string(), move |mut user| {
            user.awaiting_utr = false;
            user.awaiting_screenshot = true;
            user.pending_utr = Some(utr.clone());
            user
        })
    }

    /// Proof received: the payment now only waits on the operator.
    pub fn screenshot_received(&self, telegram_id: i64) -> StoreResult<UserRecord> {
        self.records.update(&telegram_id.to_string(), |mut user| {
            user.awaiting_screenshot = false;
            user.pending_payment_id = None;
            user
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::StoreError;

    const STARTING: StartingCredits = StartingCredits {
        messages: 10,
        images: 3,
    };
    const BONUS: ReferralBonus = ReferralBonus {
        messages: 5,
        images: 2,
    };

    fn open_users() -> Users {
        let db = sled::Config::new().temporary(true).open().unwrap();
        Users::new(&db).unwrap()
    }

    #[test]
    fn create_seeds_starting_credits_and_unique_codes() {
        let users = open_users();
        let a = users.create(1, None, STARTING).unwrap();
        let b = users.create(2, None, STARTING).unwrap();
        assert_eq!(a.messages_left, 10);
        assert_eq!(a.images_left, 3);
        assert_eq!(a.referral_code.len(), 8);
        assert_ne!(a.referral_code, b.referral_code);
        assert!(!a.has_joined_channel);
    }

    #[test]
    fn create_twice_is_a_duplicate() {
        let users = open_users();
        users.create(1, None, STARTING).unwrap();
        let err = users.create(1, None, STARTING).unwrap_err();
        assert!(matches!(err, StoreError::DuplicateKey(_)));
    }

    #[test]
    fn balances_never_go_negative() {
        let users = open_users();
        users
            .create(1, None, StartingCredits { messages: 2, images: 1 })
            .unwrap();
        for _ in 0..5 {
            users.decrement_messages(1).unwrap();
            users.decrement_images(1).unwrap();
        }
        let user = users.expect(1).unwrap();
        assert_eq!(user.messages_left, 0);
        assert_eq!(user.images_left, 0);
    }

    #[test]
    fn decrement_at_zero_is_a_noop() {
        let users = open_users();
        users
            .create(1, None, StartingCredits { messages: 0, images: 0 })
            .unwrap();
        let before = users.expect(1).unwrap();
        let after = users.decrement_messages(1).unwrap();
        assert_eq!(after.messages_left, 0);
        // An empty decrement must not count as activity either.
        assert_eq!(after.last_active, before.last_active);
    }

    #[test]
    fn referral_bonus_is_applied_exactly_once_per_invitee() {
        let users = open_users();
        let referrer = users.create(1, None, STARTING).unwrap();

        assert!(users.add_referral(&referrer.referral_code, 2, BONUS).unwrap());
        assert!(!users.add_referral(&referrer.referral_code, 2, BONUS).unwrap());

        let referrer = users.expect(1).unwrap();
        assert_eq!(referrer.referred_users, vec![2]);
        assert_eq!(referrer.messages_left, STARTING.messages + BONUS.messages);
        assert_eq!(referrer.images_left, STARTING.images + BONUS.images);
    }

    #[test]
    fn unknown_referral_code_is_not_applied() {
        let users = open_users();
        users.create(1, None, STARTING).unwrap();
        assert!(!users.add_referral("nope1234", 2, BONUS).unwrap());
    }

    #[test]
    fn distinct_invitees_each_grant_a_bonus() {
        let users = open_users();
        let referrer = users.create(1, None, STARTING).unwrap();
        assert!(users.add_referral(&referrer.referral_code, 2, BONUS).unwrap());
        assert!(users.add_referral(&referrer.referral_code, 3, BONUS).unwrap());
        let referrer = users.expect(1).unwrap();
        assert_eq!(referrer.referred_users, vec![2, 3]);
        assert_eq!(
            referrer.messages_left,
            STARTING.messages + 2 * BONUS.messages
        );
    }

    #[test]
    fn payment_flags_are_mutually_exclusive_through_the_flow() {
        let users = open_users();
        users.create(1, None, STARTING).unwrap();

        let user = users.begin_payment(1, "pay-1").unwrap();
        assert!(user.awaiting_utr && !user.awaiting_screenshot);
        assert_eq!(user.pending_payment_id.as_deref(), Some("pay-1"));

        let user = users.utr_received(1, "112233445566").unwrap();
        assert!(!user.awaiting_utr && user.awaiting_screenshot);
        assert_eq!(user.pending_utr.as_deref(), Some("112233445566"));

        let user = users.screenshot_received(1).unwrap();
        assert!(!user.awaiting_utr && !user.awaiting_screenshot);
        assert!(user.pending_payment_id.is_none());
    }

    #[test]
    fn admin_update_merges_only_present_fields() {
        let users = open_users();
        users.create(1, None, STARTING).unwrap();
        let update = UserUpdate {
            messages_left: Some(99),
            chat_mood: Some(ChatMood::Erotic),
            ..Default::default()
        };
        let user = users.apply(1, &update).unwrap();
        assert_eq!(user.messages_left, 99);
        assert_eq!(user.chat_mood, ChatMood::Erotic);
        assert_eq!(user.images_left, STARTING.images);
        assert_eq!(user.premium_status, PremiumStatus::Free);
    }

    #[test]
    fn find_by_referral_code_scans_the_tree() {
        let users = open_users();
        users.create(1, None, STARTING).unwrap();
        let b = users.create(2, None, STARTING).unwrap();
        let found = users.find_by_referral_code(&b.referral_code).unwrap();
        assert_eq!(found.map(|u| u.telegram_id), Some(2));
    }
}
