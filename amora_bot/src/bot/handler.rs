//! Free-text and photo handling.
//!
//! The payment state machine gets first claim on the input: while a user
//! is mid-purchase their text is a UTR candidate and their photos are
//! payment proof. Only after that does the credit-gated chat path run.

use anyhow::Result;
use teloxide::{prelude::*, types::ChatAction};

use amora_core::users::dto::UserRecord;
use amora_core::validation::is_valid_utr;

use crate::bot::keyboards;
use crate::dependencies::BotDependencies;
use crate::utils;

pub async fn handle_message(bot: Bot, msg: Message, bot_deps: BotDependencies) -> Result<()> {
    // Commands are routed upstream; skip anything that looks like one.
    if msg.text().map(|text| text.starts_with('/')).unwrap_or(false) {
        return Ok(());
    }
    let Some(from) = msg.from.as_ref() else {
        return Ok(());
    };
    let user_id = from.id.0 as i64;

    if let Err(e) = process_message(&bot, &msg, user_id, &bot_deps).await {
        log::error!("error handling message from {}: {}", user_id, e);
        bot.send_message(msg.chat.id, utils::apologetic_text())
            .await?;
    }
    Ok(())
}

async fn process_message(
    bot: &Bot,
    msg: &Message,
    user_id: i64,
    bot_deps: &BotDependencies,
) -> Result<()> {
    let Some(user) = bot_deps.users.get(user_id)? else {
        bot.send_message(msg.chat.id, "Please start the bot first! /start")
            .await?;
        return Ok(());
    };

    if msg.photo().is_some() {
        return handle_photo(bot, msg, &user, bot_deps).await;
    }

    let Some(text) = msg.text() else {
        return Ok(());
    };

    if user.awaiting_utr && user.pending_payment_id.is_some() {
        return handle_utr_candidate(bot, msg, &user, text, bot_deps).await;
    }

    if user.awaiting_screenshot {
        bot.send_message(
            msg.chat.id,
            "Baby, I'm waiting for your payment screenshot! 📸💕\n\nPlease send the screenshot as a photo, not text! 😘",
        )
        .await?;
        return Ok(());
    }

    if user.messages_left == 0 {
        bot.send_message(msg.chat.id, utils::out_of_messages_text())
            .reply_markup(keyboards::main_menu())
            .await?;
        return Ok(());
    }

    bot.send_chat_action(msg.chat.id, ChatAction::Typing).await?;

    let reply = bot_deps.generator.chat(text, &user).await;
    if !reply.fallback || bot_deps.config.charge_on_fallback {
        bot_deps.users.decrement_messages(user_id)?;
    }
    bot.send_message(msg.chat.id, reply.text).await?;
    Ok(())
}

/// Text received while a payment is waiting on its transaction reference.
async fn handle_utr_candidate(
    bot: &Bot,
    msg: &Message,
    user: &UserRecord,
    text: &str,
    bot_deps: &BotDependencies,
) -> Result<()> {
    let Some(payment_id) = user.pending_payment_id.as_deref() else {
        return Ok(());
    };

    let candidate = text.trim();
    if !is_valid_utr(candidate) {
        bot.send_message(
            msg.chat.id,
            "Baby, that doesn't look like a valid UTR ID! 🥺\n\nUTR ID should be 12 digits (like: 123456789012)\n\nPlease check your payment confirmation and send the correct UTR ID! 😘💕",
        )
        .await?;
        return Ok(());
    }

    bot_deps.payments.attach_utr(payment_id, candidate)?;
    bot_deps.users.utr_received(user.telegram_id, candidate)?;

    bot.send_message(
        msg.chat.id,
        format!(
            "Great baby! 💕 UTR ID received: {}\n\nNow please send me the payment screenshot to complete the verification! 📸\n\nI'm so excited to give you those credits! 😘💖",
            candidate
        ),
    )
    .await?;
    Ok(())
}

async fn handle_photo(
    bot: &Bot,
    msg: &Message,
    user: &UserRecord,
    bot_deps: &BotDependencies,
) -> Result<()> {
    if user.awaiting_screenshot {
        if let Some(payment_id) = user.pending_payment_id.as_deref() {
            bot_deps.payments.mark_screenshot(payment_id)?;
            bot_deps.users.screenshot_received(user.telegram_id)?;

            bot.send_message(
                msg.chat.id,
                format!(
                    "Perfect baby! 📸💕\n\nI've received your payment screenshot with UTR ID: {}\n\nYour payment is now submitted for admin approval. You'll get your credits soon! 😘\n\nPlease be patient, darling! 💖",
                    user.pending_utr.as_deref().unwrap_or("-")
                ),
            )
            .reply_markup(keyboards::main_menu())
            .await?;
            return Ok(());
        }
    }

    // Unsolicited upload: acknowledge, change nothing.
    bot.send_message(
        msg.chat.id,
        "Thanks for the screenshot, baby! 📸💕\n\nBut I need you to follow the payment process first. Use the Premium Plan button! 😘",
    )
    .reply_markup(keyboards::main_menu())
    .await?;
    Ok(())
}
