use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChatMood {
    #[default]
    Normal,
    Erotic,
}

impl ChatMood {
    pub fn as_str(&self) -> &'static str {
        match self {
            ChatMood::Normal => "normal",
            ChatMood::Erotic => "erotic",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PremiumStatus {
    Free,
    Premium,
}

/// One record per end-user identity, keyed by decimal Telegram id.
///
/// `awaiting_utr` and `awaiting_screenshot` are never both true; either one
/// being set implies `pending_payment_id` points at the in-flight payment.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserRecord {
    pub telegram_id: i64,
    pub referral_code: String,
    #[serde(default)]
    pub referred_by: Option<String>,
    #[serde(default)]
    pub referred_users: Vec<i64>,
    pub messages_left: u32,
    pub images_left: u32,
    pub premium_status: PremiumStatus,
    pub total_spent: u32,
    pub chat_mood: ChatMood,
    pub has_joined_channel: bool,
    #[serde(default)]
    pub awaiting_utr: bool,
    #[serde(default)]
    pub awaiting_screenshot: bool,
    #[serde(default)]
    pub pending_payment_id: Option<String>,
    #[serde(default)]
    pub pending_utr: Option<String>,
    pub joined_at: DateTime<Utc>,
    pub last_active: DateTime<Utc>,
}

impl UserRecord {
    pub fn is_premium(&self) -> bool {
        self.premium_status == PremiumStatus::Premium
    }

    pub fn in_payment_flow(&self) -> bool {
        self.awaiting_utr || self.awaiting_screenshot
    }
}

/// Credits a brand-new account starts with.
#[derive(Debug, Clone, Copy)]
pub struct StartingCredits {
    pub messages: u32,
    pub images: u32,
}

/// Bonus granted to a referrer per successful invite.
#[derive(Debug, Clone, Copy)]
pub struct ReferralBonus {
    pub messages: u32,
    pub images: u32,
}

/// Admin-editable subset of a user record. Absent fields are left
/// untouched; the merge happens inside one atomic store update.
#[derive(Debug, Default, Clone, Serialize, Deserialize)]
pub struct UserUpdate {
    pub messages_left: Option<u32>,
    pub images_left: Option<u32>,
    pub premium_status: Option<PremiumStatus>,
    pub chat_mood: Option<ChatMood>,
    pub has_joined_channel: Option<bool>,
}

impl UserUpdate {
    pub fn apply(&self, mut record: UserRecord) -> UserRecord {
        if let Some(messages_left) = self.messages_left {
            record.messages_left = messages_left;
        }
        if let Some(images_left) = self.images_left {
            record.images_left = images_left;
        }
        if let Some(premium_status) = self.premium_status {
            record.premium_status = premium_status;
        }
        if let Some(chat_mood) = self.chat_mood {
            record.chat_mood = chat_mood;
        }
        if let Some(has_joined_channel) = self.has_joined_channel {
            record.has_joined_channel = has_joined_channel;
        }
        record
    }
}
