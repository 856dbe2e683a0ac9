//! In-memory funder directory.

use dashmap::DashMap;
use shared_types::FunderId;

use crate::domain::account::FunderAccount;
use crate::domain::error::GatewayError;
use crate::ports::FunderDirectory;

#[derive(Default)]
pub struct InMemoryFunderDirectory {
    accounts: DashMap<FunderId, FunderAccount>,
}

impl InMemoryFunderDirectory {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&self, account: FunderAccount) {
        self.accounts.insert(account.id, account);
    }
}

impl FunderDirectory for InMemoryFunderDirectory {
    fn find(&self, id: FunderId) -> Result<Option<FunderAccount>, GatewayError> {
        Ok(self.accounts.get(&id).map(|a| a.clone()))
    }
}
