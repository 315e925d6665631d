use amora_core::payments::handler::Payments;
use amora_core::users::handler::Users;

/// Shared handles behind the admin surface. These are the same in-process
/// store handles the bot dispatcher uses, so both surfaces see one
/// consistent database.
#[derive(Clone)]
pub struct ServerState {
    pub users: Users,
    pub payments: Payments,
}

impl ServerState {
    pub fn new(users: Users, payments: Payments) -> Self {
        Self { users, payments }
    }
}
