use async_trait::async_trait;
use tokio::sync::watch;

use super::ledger_model::Transaction;
use crate::Result;

/// Trait defining the contract for ledger storage.
///
/// The ledger is append-only. Observers subscribe to a watch channel that
/// delivers the full current transaction list on every change, not
/// incremental deltas; each delivery triggers a full re-aggregation
/// downstream. A closed channel means the last delivered state is stale and
/// should be kept, not discarded.
#[async_trait]
pub trait LedgerRepositoryTrait: Send + Sync {
    /// Append a transaction. The transaction has already passed intake
    /// validation by the time it reaches the repository.
    async fn append(&self, transaction: Transaction) -> Result<Transaction>;

    /// All transactions in ascending timestamp order, ties broken by
    /// insertion order.
    fn list(&self) -> Result<Vec<Transaction>>;

    /// Subscribe to ledger changes. The receiver's current value is the full
    /// transaction list as of subscription time.
    fn subscribe(&self) -> watch::Receiver<Vec<Transaction>>;
}
