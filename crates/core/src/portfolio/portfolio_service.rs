//! Event-driven portfolio coordination.
//!
//! Each ledger change triggers a full re-aggregation and a fresh performance
//! snapshot; previous results are discarded, never updated incrementally.
//! O(n) recomputation per change is acceptable for personal-portfolio ledger
//! sizes.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, RwLock};

use log::{debug, error, warn};
use tokio::sync::watch;

use crate::errors::Result;
use crate::ledger::{LedgerRepositoryTrait, Transaction};
use crate::portfolio::holdings::{aggregate_holdings, Holding};
use crate::portfolio::performance::{PerformanceServiceTrait, PerformanceSnapshot};

pub struct PortfolioService {
    ledger: Arc<dyn LedgerRepositoryTrait>,
    performance: Arc<dyn PerformanceServiceTrait>,
    snapshot: RwLock<PerformanceSnapshot>,
    generation: AtomicU64,
}

impl PortfolioService {
    pub fn new(
        ledger: Arc<dyn LedgerRepositoryTrait>,
        performance: Arc<dyn PerformanceServiceTrait>,
    ) -> Self {
        Self {
            ledger,
            performance,
            snapshot: RwLock::new(PerformanceSnapshot::empty()),
            generation: AtomicU64::new(0),
        }
    }

    /// Current holdings from a fresh aggregation pass over the ledger.
    pub fn current_holdings(&self) -> Result<Vec<Holding>> {
        let transactions = self.ledger.list()?;
        Ok(aggregate_holdings(&transactions))
    }

    /// The most recently applied performance snapshot.
    pub fn latest_snapshot(&self) -> PerformanceSnapshot {
        self.snapshot
            .read()
            .unwrap_or_else(|poisoned| {
                warn!("Snapshot lock was poisoned, recovering");
                poisoned.into_inner()
            })
            .clone()
    }

    /// Re-aggregate the ledger and recompute performance.
    ///
    /// Price lookups can be slow, so a newer pass may start while this one is
    /// awaiting them. A superseded pass returns `Ok(None)` and its result is
    /// discarded rather than applied, so a stale snapshot can never overwrite
    /// a fresher one.
    pub async fn refresh(&self) -> Result<Option<PerformanceSnapshot>> {
        let pass = self.generation.fetch_add(1, Ordering::SeqCst) + 1;

        let transactions = self.ledger.list()?;
        let holdings = aggregate_holdings(&transactions);
        let snapshot = self.performance.calculate_performance(&holdings).await;

        let mut current = self.snapshot.write().unwrap_or_else(|poisoned| {
            warn!("Snapshot lock was poisoned, recovering");
            poisoned.into_inner()
        });
        // Checked under the write lock: a newer pass bumps the counter before
        // it can reach this lock, so a stale pass can never apply after it.
        if self.generation.load(Ordering::SeqCst) != pass {
            debug!("Refresh pass {} superseded, discarding result", pass);
            return Ok(None);
        }
        *current = snapshot.clone();
        Ok(Some(snapshot))
    }

    /// Observe the ledger and refresh on every change until the subscription
    /// ends. On subscription failure the last known snapshot is kept; stale
    /// data beats a crash here.
    pub async fn run(self: Arc<Self>, mut receiver: watch::Receiver<Vec<Transaction>>) {
        loop {
            if let Err(e) = self.refresh().await {
                error!("Portfolio refresh failed: {}", e);
            }
            if receiver.changed().await.is_err() {
                warn!("Ledger subscription closed, keeping last known snapshot");
                break;
            }
        }
    }
}
