use teloxide::utils::command::BotCommands;

#[derive(BotCommands, Clone)]
#[command(
    rename_rule = "lowercase",
    description = "These commands are supported:"
)]
pub enum Command {
    #[command(description = "Start chatting (a referral code may follow the deep link).")]
    Start(String),
    #[command(description = "Display this text.")]
    Help,
}
