mod ai;
mod assets;
mod bot;
mod callbacks;
mod commands;
mod config;
mod dependencies;
mod utils;

use std::env;
use std::sync::Arc;

use amora_core::payments::handler::Payments;
use amora_core::users::handler::Users;
use amora_server::{ServerState, router};
use teloxide::{dptree, prelude::*};

use crate::ai::handler::Generator;
use crate::assets::media_picker::MediaLibrary;
use crate::bot::handler_tree::handler_tree;
use crate::config::BotConfig;
use crate::dependencies::BotDependencies;

#[tokio::main]
async fn main() {
    dotenvy::dotenv().ok();
    tracing_subscriber::fmt::init();
    log::info!("Starting amora_bot...");

    let config = BotConfig::from_env();

    let bot = Bot::from_env();
    let me = bot.get_me().await.expect("Failed to get bot info");
    let bot_username = me.user.username.clone().expect("Bot has no username");

    let db = sled::open(&config.db_path).expect("Failed to open sled DB");
    let users = Users::new(&db).expect("Failed to open users tree");
    let payments = Payments::new(&db).expect("Failed to open payments tree");

    let horde_api_key = env::var("HORDE_API_KEY").expect("HORDE_API_KEY not set");
    let generator = Generator::new(horde_api_key, config.bot_name.clone());
    let media = MediaLibrary::new(config.images_dir.clone());

    // The operator dashboard runs in-process so it shares these store
    // handles with the dispatcher.
    let admin_state = Arc::new(ServerState::new(users.clone(), payments.clone()));
    let admin_addr = config.admin_addr.clone();
    tokio::spawn(async move {
        let listener = tokio::net::TcpListener::bind(&admin_addr)
            .await
            .expect("Failed to bind admin listener");
        log::info!("Admin server listening on {}", admin_addr);
        if let Err(e) = axum::serve(listener, router(admin_state)).await {
            log::error!("Admin server stopped: {}", e);
        }
    });

    let bot_deps = BotDependencies {
        users,
        payments,
        generator,
        media,
        config,
        bot_username,
    };

    Dispatcher::builder(bot, handler_tree())
        .dependencies(dptree::deps![bot_deps])
        .enable_ctrlc_handler()
        .build()
        .dispatch()
        .await;
}
