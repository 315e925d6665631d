use anyhow::Result;
use teloxide::{
    Bot,
    dispatching::{DpHandlerDescription, HandlerExt, UpdateFilterExt},
    dptree::{self, Handler},
    types::Update,
};

use crate::{
    bot::{answers::answers, handler::handle_message},
    callbacks::handle_callback_query,
    commands::Command,
    dependencies::BotDependencies,
};

pub fn handler_tree() -> Handler<'static, Result<()>, DpHandlerDescription> {
    dptree::entry()
        .branch(
            Update::filter_message()
                .branch(
                    dptree::entry()
                        .filter_command::<Command>()
                        .endpoint(answers),
                )
                // Everything that is not a command: payment-flow input or
                // free-text chat.
                .branch(dptree::entry().endpoint(handle_message)),
        )
        .branch(Update::filter_callback_query().endpoint(
            |bot: Bot, query: teloxide::types::CallbackQuery, bot_deps: BotDependencies| async move {
                handle_callback_query(bot, query, bot_deps).await
            },
        ))
}
