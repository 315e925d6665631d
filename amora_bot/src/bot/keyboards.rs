use amora_core::payments::dto::Tier;
use reqwest::Url;
use teloxide::types::{InlineKeyboardButton, InlineKeyboardMarkup};

pub fn main_menu() -> InlineKeyboardMarkup {
    InlineKeyboardMarkup::new(vec![
        vec![InlineKeyboardButton::callback(
            "🔗 Get Referral Link",
            "referral",
        )],
        vec![InlineKeyboardButton::callback(
            "🖼️ Send Me a Picture",
            "picture",
        )],
        vec![InlineKeyboardButton::callback("💰 Credits", "credits")],
        vec![InlineKeyboardButton::callback("⭐ Premium Plan", "premium")],
        vec![InlineKeyboardButton::callback("💕 Chat Mood", "mood")],
    ])
}

pub fn mood_menu() -> InlineKeyboardMarkup {
    InlineKeyboardMarkup::new(vec![
        vec![InlineKeyboardButton::callback(
            "😇 Normal Chat",
            "mood_normal",
        )],
        vec![InlineKeyboardButton::callback(
            "🔥 Erotic Chat",
            "mood_erotic",
        )],
        vec![InlineKeyboardButton::callback(
            "🔙 Back to Menu",
            "main_menu",
        )],
    ])
}

pub fn channel_menu(channel_url: &Url) -> InlineKeyboardMarkup {
    InlineKeyboardMarkup::new(vec![
        vec![InlineKeyboardButton::url(
            "📢 Join Channel",
            channel_url.clone(),
        )],
        vec![InlineKeyboardButton::callback(
            "✅ I Joined",
            "check_subscription",
        )],
    ])
}

pub fn premium_menu(tiers: &[Tier]) -> InlineKeyboardMarkup {
    let mut rows: Vec<Vec<InlineKeyboardButton>> = tiers
        .iter()
        .map(|tier| {
            vec![InlineKeyboardButton::callback(
                format!(
                    "₹{} - {} msgs + {} pics",
                    tier.price, tier.messages, tier.images
                ),
                format!("buy_tier{}", tier.index),
            )]
        })
        .collect();
    rows.push(vec![InlineKeyboardButton::callback(
        "🔙 Back to Menu",
        "main_menu",
    )]);
    InlineKeyboardMarkup::new(rows)
}
