//! Callback-query handlers for amora_bot.

use anyhow::Result;
use teloxide::{
    prelude::*,
    types::{CallbackQuery, ChatId, InputFile, MaybeInaccessibleMessage, MessageId},
};

use amora_core::users::dto::{ChatMood, UserRecord};

use crate::bot::keyboards;
use crate::dependencies::BotDependencies;
use crate::utils;

pub async fn handle_callback_query(
    bot: Bot,
    query: CallbackQuery,
    bot_deps: BotDependencies,
) -> Result<()> {
    let Some(data) = query.data.clone() else {
        return Ok(());
    };
    let user_id = query.from.id.0 as i64;

    // Stop the button spinner before doing any real work.
    bot.answer_callback_query(query.id.clone()).await?;

    let Some(MaybeInaccessibleMessage::Regular(message)) = query.message.as_ref() else {
        return Ok(());
    };
    let chat_id = message.chat.id;
    let message_id = message.id;

    let outcome = match data.as_str() {
        "check_subscription" => handle_check_subscription(&bot, chat_id, message_id, user_id, &bot_deps).await,
        "mood" => handle_mood_menu(&bot, chat_id, message_id).await,
        "mood_normal" => handle_mood_selected(&bot, chat_id, message_id, user_id, ChatMood::Normal, &bot_deps).await,
        "mood_erotic" => handle_mood_selected(&bot, chat_id, message_id, user_id, ChatMood::Erotic, &bot_deps).await,
        "main_menu" => handle_main_menu(&bot, chat_id, message_id, &bot_deps).await,
        "referral" => handle_referral(&bot, chat_id, user_id, &bot_deps).await,
        "picture" => handle_picture(&bot, chat_id, user_id, &bot_deps).await,
        "credits" => handle_credits(&bot, chat_id, user_id, &bot_deps).await,
        "premium" => handle_premium(&bot, chat_id, &bot_deps).await,
        "buy_tier1" => handle_buy(&bot, chat_id, user_id, 1, &bot_deps).await,
        "buy_tier2" => handle_buy(&bot, chat_id, user_id, 2, &bot_deps).await,
        _ => {
            log::warn!("unknown callback action {:?} from {}", data, user_id);
            Ok(())
        }
    };

    if let Err(e) = outcome {
        log::error!("error handling callback {:?} from {}: {}", data, user_id, e);
        bot.send_message(chat_id, utils::apologetic_text()).await?;
    }
    Ok(())
}

/// Fetch the caller's record, prompting for /start when it is missing.
async fn require_user(
    bot: &Bot,
    chat_id: ChatId,
    user_id: i64,
    bot_deps: &BotDependencies,
) -> Result<Option<UserRecord>> {
    match bot_deps.users.get(user_id)? {
        Some(user) => Ok(Some(user)),
        None => {
            bot.send_message(chat_id, "Please start the bot first! /start")
                .await?;
            Ok(None)
        }
    }
}

/// The user claims to have joined the channel; take their word for it and
/// open the main menu.
async fn handle_check_subscription(
    bot: &Bot,
    chat_id: ChatId,
    message_id: MessageId,
    user_id: i64,
    bot_deps: &BotDependencies,
) -> Result<()> {
    if require_user(bot, chat_id, user_id, bot_deps).await?.is_none() {
        return Ok(());
    }
    bot_deps.users.mark_channel_joined(user_id)?;

    bot.edit_message_text(
        chat_id,
        message_id,
        format!(
            "Yay! Welcome to my world, darling! 💕😍\n\nI'm {}, your cute virtual girlfriend! I'm here to chat, flirt, and make you happy! 🥰\n\nWhat would you like to do with me today? 😘",
            bot_deps.config.bot_name
        ),
    )
    .reply_markup(keyboards::main_menu())
    .await?;
    Ok(())
}

async fn handle_mood_menu(bot: &Bot, chat_id: ChatId, message_id: MessageId) -> Result<()> {
    bot.edit_message_text(
        chat_id,
        message_id,
        "Choose your chat mood, baby! 💕\n\n😇 Normal: Sweet, caring, romantic chat\n🔥 Erotic: Passionate, naughty chat\n\nWhat mood are you in today, jaan? 😘",
    )
    .reply_markup(keyboards::mood_menu())
    .await?;
    Ok(())
}

async fn handle_mood_selected(
    bot: &Bot,
    chat_id: ChatId,
    message_id: MessageId,
    user_id: i64,
    mood: ChatMood,
    bot_deps: &BotDependencies,
) -> Result<()> {
    if require_user(bot, chat_id, user_id, bot_deps).await?.is_none() {
        return Ok(());
    }
    bot_deps.users.set_mood(user_id, mood)?;

    let text = match mood {
        ChatMood::Normal => "Perfect! 😇 Normal mode activated, baby! 💕\n\nI'll be your sweet, caring girlfriend now! Let's have romantic conversations! 🥰\n\nWhat would you like to do? 😘",
        ChatMood::Erotic => "Mmm... 🔥 Erotic mode activated, jaan! 😈💕\n\nI'm your naughty, passionate girlfriend now! Let's get wild! 🔥😘\n\nWhat do you want to do with me? 😏",
    };
    bot.edit_message_text(chat_id, message_id, text)
        .reply_markup(keyboards::main_menu())
        .await?;
    Ok(())
}

async fn handle_main_menu(
    bot: &Bot,
    chat_id: ChatId,
    message_id: MessageId,
    bot_deps: &BotDependencies,
) -> Result<()> {
    bot.edit_message_text(
        chat_id,
        message_id,
        utils::menu_text(&bot_deps.config.bot_name),
    )
    .reply_markup(keyboards::main_menu())
    .await?;
    Ok(())
}

async fn handle_referral(
    bot: &Bot,
    chat_id: ChatId,
    user_id: i64,
    bot_deps: &BotDependencies,
) -> Result<()> {
    let Some(user) = require_user(bot, chat_id, user_id, bot_deps).await? else {
        return Ok(());
    };
    let bonus = bot_deps.config.referral_bonus;
    let link = utils::referral_link(&bot_deps.bot_username, &user.referral_code);

    bot.send_message(
        chat_id,
        format!(
            "Here's your special referral link, baby! 💖\n\n🔗 {}\n\nShare this with your friends! When they join through your link, you'll get:\n💬 +{} messages\n🖼️ +{} image credits\n\nSpread the love! 😘💕",
            link, bonus.messages, bonus.images
        ),
    )
    .reply_markup(keyboards::main_menu())
    .await?;
    Ok(())
}

async fn handle_picture(
    bot: &Bot,
    chat_id: ChatId,
    user_id: i64,
    bot_deps: &BotDependencies,
) -> Result<()> {
    let Some(user) = require_user(bot, chat_id, user_id, bot_deps).await? else {
        return Ok(());
    };

    if user.images_left == 0 {
        bot.send_message(chat_id, utils::out_of_images_text())
            .reply_markup(keyboards::main_menu())
            .await?;
        return Ok(());
    }

    bot.send_message(
        chat_id,
        "Generating a special picture just for you, darling! 😘💕 Please wait...",
    )
    .await?;

    match bot_deps.media.pick(user.chat_mood) {
        Ok(path) => {
            let remaining = bot_deps.users.decrement_images(user_id)?.images_left;
            bot.send_photo(chat_id, InputFile::file(path))
                .caption(format!(
                    "Here's a special picture just for you, baby! 😍💖\n\nImages left: {} 🖼️",
                    remaining
                ))
                .reply_markup(keyboards::main_menu())
                .await?;
        }
        Err(e) => {
            log::error!("failed to pick an image for {}: {}", user_id, e);
            bot.send_message(
                chat_id,
                "Sorry baby, I couldn't get the image right now! 😢 Try again later!",
            )
            .await?;
        }
    }
    Ok(())
}

async fn handle_credits(
    bot: &Bot,
    chat_id: ChatId,
    user_id: i64,
    bot_deps: &BotDependencies,
) -> Result<()> {
    let Some(user) = require_user(bot, chat_id, user_id, bot_deps).await? else {
        return Ok(());
    };

    bot.send_message(
        chat_id,
        format!(
            "Here are your credits, sweetheart! 💖\n\n💬 Messages: {}\n🖼️ Images: {}\n⭐ Premium: {}\n\nReferred friends: {} 👥",
            user.messages_left,
            user.images_left,
            if user.is_premium() { "Active" } else { "Not Active" },
            user.referred_users.len()
        ),
    )
    .reply_markup(keyboards::main_menu())
    .await?;
    Ok(())
}

async fn handle_premium(bot: &Bot, chat_id: ChatId, bot_deps: &BotDependencies) -> Result<()> {
    let config = &bot_deps.config;
    let [tier1, tier2] = &config.tiers;

    bot.send_message(
        chat_id,
        format!(
            "💎 Premium Plans 💎\n\nChoose your plan, baby! 😘\n\n🥉 Tier 1: ₹{}\n💬 {} messages\n🖼️ {} images\n\n🥈 Tier 2: ₹{}\n💬 {} messages\n🖼️ {} images\n\nPayment via UPI: {} 💳",
            tier1.price, tier1.messages, tier1.images,
            tier2.price, tier2.messages, tier2.images,
            config.upi_id
        ),
    )
    .reply_markup(keyboards::premium_menu(&config.tiers))
    .await?;
    Ok(())
}

/// Tier selected: open a pending payment and start collecting the UTR.
async fn handle_buy(
    bot: &Bot,
    chat_id: ChatId,
    user_id: i64,
    tier_index: u8,
    bot_deps: &BotDependencies,
) -> Result<()> {
    if require_user(bot, chat_id, user_id, bot_deps).await?.is_none() {
        return Ok(());
    }
    let Some(tier) = bot_deps.config.tier(tier_index) else {
        log::error!("no configured tier {}", tier_index);
        return Ok(());
    };

    let payment = bot_deps.payments.create(user_id, tier)?;
    bot_deps.users.begin_payment(user_id, &payment.id)?;

    bot.send_message(
        chat_id,
        format!(
            "💳 Payment Instructions\n\nPlan: Tier {}\nAmount: ₹{}\nCredits: {} messages + {} images\n\n📱 UPI ID: {}\n\nSteps:\n1. Send ₹{} to the UPI ID above\n2. After payment, send me the UTR ID/Transaction ID\n3. Then send the payment screenshot\n4. Wait for admin approval\n\nPlease complete the payment and send me the UTR ID first, baby! 😘💕",
            tier.index,
            tier.price,
            tier.messages,
            tier.images,
            bot_deps.config.upi_id,
            tier.price
        ),
    )
    .await?;
    Ok(())
}
