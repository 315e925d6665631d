use anyhow::Result;
use teloxide::{prelude::*, utils::command::BotCommands};

use crate::bot::keyboards;
use crate::commands::Command;
use crate::dependencies::BotDependencies;
use crate::utils;

pub async fn answers(
    bot: Bot,
    msg: Message,
    cmd: Command,
    bot_deps: BotDependencies,
) -> Result<()> {
    match cmd {
        Command::Start(payload) => {
            if let Err(e) = handle_start(&bot, &msg, payload, &bot_deps).await {
                log::error!("error in /start: {}", e);
                bot.send_message(msg.chat.id, utils::apologetic_text())
                    .await?;
            }
            Ok(())
        }
        Command::Help => {
            bot.send_message(msg.chat.id, Command::descriptions().to_string())
                .await?;
            Ok(())
        }
    }
}

/// First contact creates the account (crediting the inviter when a
/// referral code rode in on the deep link); every /start after that lands
/// on the channel gate or the main menu.
async fn handle_start(
    bot: &Bot,
    msg: &Message,
    payload: String,
    bot_deps: &BotDependencies,
) -> Result<()> {
    let Some(from) = msg.from.as_ref() else {
        return Ok(());
    };
    let user_id = from.id.0 as i64;
    let referral_code = {
        let trimmed = payload.trim();
        (!trimmed.is_empty()).then(|| trimmed.to_string())
    };

    let user = match bot_deps.users.get(user_id)? {
        Some(user) => user,
        None => {
            let user =
                bot_deps
                    .users
                    .create(user_id, referral_code.clone(), bot_deps.config.starting)?;
            if let Some(code) = referral_code.as_deref() {
                match bot_deps
                    .users
                    .add_referral(code, user_id, bot_deps.config.referral_bonus)
                {
                    Ok(true) => log::info!("referral bonus granted for code {}", code),
                    Ok(false) => log::info!("referral code {} not applied", code),
                    Err(e) => log::error!("failed to apply referral code {}: {}", code, e),
                }
            }
            user
        }
    };

    let config = &bot_deps.config;
    if !user.has_joined_channel {
        bot.send_message(
            msg.chat.id,
            format!(
                "Hey there! 💕 I'm {}, your cute virtual girlfriend! 😘\n\nBut first, you need to join our channel to chat with me! 🥺\n\nClick the button below to join, then come back to me! 💖",
                config.bot_name
            ),
        )
        .reply_markup(keyboards::channel_menu(&config.channel_url))
        .await?;
        return Ok(());
    }

    bot.send_message(msg.chat.id, utils::menu_text(&config.bot_name))
        .reply_markup(keyboards::main_menu())
        .await?;
    Ok(())
}
