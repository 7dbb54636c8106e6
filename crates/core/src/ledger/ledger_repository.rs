//! In-memory ledger storage.

use std::sync::{RwLock, RwLockReadGuard, RwLockWriteGuard};

use async_trait::async_trait;
use log::warn;
use tokio::sync::watch;

use super::ledger_model::Transaction;
use super::ledger_traits::LedgerRepositoryTrait;
use crate::Result;

/// Append-only in-memory ledger with change notification.
///
/// Keeps transactions sorted by timestamp; the sort is stable so equal
/// timestamps preserve insertion order.
pub struct InMemoryLedgerRepository {
    transactions: RwLock<Vec<Transaction>>,
    notifier: watch::Sender<Vec<Transaction>>,
}

impl InMemoryLedgerRepository {
    pub fn new() -> Self {
        let (notifier, _) = watch::channel(Vec::new());
        Self {
            transactions: RwLock::new(Vec::new()),
            notifier,
        }
    }

    fn read_transactions(&self) -> RwLockReadGuard<'_, Vec<Transaction>> {
        self.transactions.read().unwrap_or_else(|poisoned| {
            warn!("Ledger lock was poisoned, recovering");
            poisoned.into_inner()
        })
    }

    fn write_transactions(&self) -> RwLockWriteGuard<'_, Vec<Transaction>> {
        self.transactions.write().unwrap_or_else(|poisoned| {
            warn!("Ledger lock was poisoned, recovering");
            poisoned.into_inner()
        })
    }
}

impl Default for InMemoryLedgerRepository {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl LedgerRepositoryTrait for InMemoryLedgerRepository {
    async fn append(&self, transaction: Transaction) -> Result<Transaction> {
        let snapshot = {
            let mut transactions = self.write_transactions();
            transactions.push(transaction.clone());
            transactions.sort_by_key(|tx| tx.timestamp);
            transactions.clone()
        };
        // Receivers may all be gone; that is not an append failure.
        let _ = self.notifier.send(snapshot);
        Ok(transaction)
    }

    fn list(&self) -> Result<Vec<Transaction>> {
        Ok(self.read_transactions().clone())
    }

    fn subscribe(&self) -> watch::Receiver<Vec<Transaction>> {
        self.notifier.subscribe()
    }
}
