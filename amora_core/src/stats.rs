use chrono::{Duration, Utc};
use serde::Serialize;

use crate::error::StoreResult;
use crate::payments::dto::PaymentStatus;
use crate::payments::handler::Payments;
use crate::users::handler::Users;

/// Dashboard headline numbers, computed by scanning both collections.
#[derive(Debug, Clone, Serialize)]
pub struct Stats {
    pub total_users: usize,
    pub active_users: usize,
    pub premium_users: usize,
    pub pending_payments: usize,
    pub total_revenue: u64,
}

pub fn collect(users: &Users, payments: &Payments) -> StoreResult<Stats> {
    let users = users.all()?;
    let payments = payments.all()?;
    let active_cutoff = Utc::now() - Duration::hours(24);

    Ok(Stats {
        total_users: users.len(),
        active_users: users
            .iter()
            .filter(|user| user.last_active > active_cutoff)
            .count(),
        premium_users: users.iter().filter(|user| user.is_premium()).count(),
        pending_payments: payments
            .iter()
            .filter(|payment| payment.status == PaymentStatus::Pending)
            .count(),
        total_revenue: payments
            .iter()
            .filter(|payment| payment.status == PaymentStatus::Approved)
            .map(|payment| payment.amount as u64)
            .sum(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::payments::dto::Tier;
    use crate::users::dto::StartingCredits;

    #[test]
    fn stats_count_users_and_approved_revenue() {
        let db = sled::Config::new().temporary(true).open().unwrap();
        let users = Users::new(&db).unwrap();
        let payments = Payments::new(&db).unwrap();
        let starting = StartingCredits { messages: 5, images: 1 };
        let tier = Tier { index: 1, price: 199, messages: 100, images: 20 };

        users.create(1, None, starting).unwrap();
        users.create(2, None, starting).unwrap();

        let approved = payments.create(1, &tier).unwrap();
        payments.approve(&users, &approved.id).unwrap();
        payments.create(2, &tier).unwrap();

        let stats = collect(&users, &payments).unwrap();
        assert_eq!(stats.total_users, 2);
        // Both were just created, so both count as active.
        assert_eq!(stats.active_users, 2);
        assert_eq!(stats.premium_users, 1);
        assert_eq!(stats.pending_payments, 1);
        assert_eq!(stats.total_revenue, 199);
    }
}
