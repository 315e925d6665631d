use std::env;
use std::path::PathBuf;

use amora_core::payments::dto::Tier;
use amora_core::users::dto::{ReferralBonus, StartingCredits};
use amora_core::validation::is_valid_upi;
use reqwest::Url;

/// Everything the bot reads from the environment, collected once at
/// start-up.
#[derive(Clone)]
pub struct BotConfig {
    pub bot_name: String,
    pub channel_url: Url,
    pub upi_id: String,
    pub starting: StartingCredits,
    pub referral_bonus: ReferralBonus,
    pub tiers: [Tier; 2],
    /// Whether a canned fallback reply still costs a message credit.
    pub charge_on_fallback: bool,
    pub images_dir: PathBuf,
    pub db_path: String,
    pub admin_addr: String,
}

fn env_or(key: &str, default: &str) -> String {
    env::var(key).unwrap_or_else(|_| default.to_string())
}

fn env_u32(key: &str, default: u32) -> u32 {
    env::var(key)
        .ok()
        .and_then(|value| value.parse().ok())
        .unwrap_or(default)
}

fn env_flag(key: &str) -> bool {
    matches!(env::var(key).as_deref(), Ok("1") | Ok("true"))
}

impl BotConfig {
    pub fn from_env() -> Self {
        let upi_id = env::var("UPI_ID").expect("UPI_ID not set");
        if !is_valid_upi(&upi_id) {
            log::warn!("UPI_ID {:?} does not look like a valid UPI address", upi_id);
        }

        let channel_url = Url::parse(&env::var("CHANNEL_URL").expect("CHANNEL_URL not set"))
            .expect("CHANNEL_URL is not a valid URL");

        Self {
            bot_name: env_or("BOT_NAME", "Amora"),
            channel_url,
            upi_id,
            starting: StartingCredits {
                messages: env_u32("STARTING_MESSAGES", 10),
                images: env_u32("STARTING_IMAGES", 3),
            },
            referral_bonus: ReferralBonus {
                messages: env_u32("REFERRAL_BONUS_MESSAGES", 10),
                images: env_u32("REFERRAL_BONUS_IMAGES", 3),
            },
            tiers: [
                Tier {
                    index: 1,
                    price: env_u32("TIER_1_PRICE", 199),
                    messages: env_u32("TIER_1_MESSAGES", 100),
                    images: env_u32("TIER_1_IMAGES", 20),
                },
                Tier {
                    index: 2,
                    price: env_u32("TIER_2_PRICE", 499),
                    messages: env_u32("TIER_2_MESSAGES", 300),
                    images: env_u32("TIER_2_IMAGES", 60),
                },
            ],
            charge_on_fallback: env_flag("CHARGE_ON_FALLBACK"),
            images_dir: PathBuf::from(env_or("IMAGES_DIR", "images")),
            db_path: env_or("AMORA_DB_PATH", "amora_db"),
            admin_addr: env_or("ADMIN_ADDR", "0.0.0.0:3000"),
        }
    }

    pub fn tier(&self, index: u8) -> Option<&Tier> {
        self.tiers.iter().find(|tier| tier.index == index)
    }
}
