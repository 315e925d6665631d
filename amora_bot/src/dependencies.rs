use amora_core::payments::handler::Payments;
use amora_core::users::handler::Users;

use crate::ai::handler::Generator;
use crate::assets::media_picker::MediaLibrary;
use crate::config::BotConfig;

#[derive(Clone)]
pub struct BotDependencies {
    pub users: Users,
    pub payments: Payments,
    pub generator: Generator,
    pub media: MediaLibrary,
    pub config: BotConfig,
    pub bot_username: String,
}
