//! Shared message texts and small helpers for amora_bot.

/// Deep link that starts the bot carrying this user's referral code.
pub fn referral_link(bot_username: &str, referral_code: &str) -> String {
    format!("https://t.me/{}?start={}", bot_username, referral_code)
}

pub fn menu_text(bot_name: &str) -> String {
    format!(
        "Welcome back, baby! 😍💕\n\nI'm {}, your loving virtual girlfriend! I'm here to chat, flirt, and make you happy! 🥰\n\nWhat would you like to do with me today? 😘",
        bot_name
    )
}

pub fn out_of_messages_text() -> &'static str {
    "Aww baby, you're out of message credits! 😢\n\nGet more by:\n🔗 Referring friends\n⭐ Buying premium plans\n\nI want to chat with you so badly! 🥺💕"
}

pub fn out_of_images_text() -> &'static str {
    "Aww baby, you're out of image credits! 😢\n\nGet more by:\n🔗 Referring friends\n⭐ Buying premium plans\n\nI want to send you pictures so badly! 🥺💕"
}

pub fn apologetic_text() -> &'static str {
    "Sorry baby, something went wrong! 😢 Try again later!"
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn referral_link_embeds_the_code() {
        assert_eq!(
            referral_link("amora_bot", "ab12cd34"),
            "https://t.me/amora_bot?start=ab12cd34"
        );
    }
}
