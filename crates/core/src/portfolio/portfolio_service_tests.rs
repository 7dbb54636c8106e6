#[cfg(test)]
mod tests {
    use crate::ledger::{
        InMemoryLedgerRepository, LedgerRepositoryTrait, LedgerService, NewTransaction,
        SessionStore, UserSession,
    };
    use crate::portfolio::performance::PerformanceService;
    use crate::portfolio::PortfolioService;
    use async_trait::async_trait;
    use chrono::Utc;
    use rust_decimal_macros::dec;
    use std::sync::atomic::{AtomicBool, Ordering};
    use std::sync::Arc;
    use stockverse_market_data::{MarketDataError, PriceQuote, PriceSource};
    use tokio::sync::Notify;

    /// Returns a fixed price, but the first call blocks until released.
    /// Used to simulate a slow in-flight lookup being overtaken.
    struct GatedPriceSource {
        release: Notify,
        gate_armed: AtomicBool,
    }

    impl GatedPriceSource {
        fn new() -> Self {
            Self {
                release: Notify::new(),
                gate_armed: AtomicBool::new(true),
            }
        }
    }

    #[async_trait]
    impl PriceSource for GatedPriceSource {
        fn id(&self) -> &'static str {
            "GATED"
        }

        async fn get_price(&self, symbol: &str) -> Result<PriceQuote, MarketDataError> {
            if self.gate_armed.swap(false, Ordering::SeqCst) {
                self.release.notified().await;
            }
            Ok(PriceQuote::new(
                symbol.to_string(),
                dec!(100),
                Utc::now(),
                "GATED".to_string(),
            ))
        }
    }

    fn authenticated_ledger(
        repository: Arc<InMemoryLedgerRepository>,
    ) -> LedgerService {
        let session = Arc::new(SessionStore::new());
        session.sign_in(UserSession {
            user_id: "user-1".to_string(),
            email: None,
        });
        LedgerService::new(repository, session)
    }

    fn buy(symbol: &str, quantity: i64, price: i64) -> NewTransaction {
        NewTransaction {
            symbol: symbol.to_string(),
            company_name: None,
            quantity: quantity.into(),
            price: price.into(),
        }
    }

    #[tokio::test]
    async fn test_refresh_applies_snapshot() {
        let repository = Arc::new(InMemoryLedgerRepository::new());
        let ledger = authenticated_ledger(repository.clone());
        ledger.record_buy(buy("AAPL", 10, 90)).await.unwrap();

        let source = Arc::new(GatedPriceSource::new());
        source.gate_armed.store(false, Ordering::SeqCst);
        let service = PortfolioService::new(
            repository,
            Arc::new(PerformanceService::new(source)),
        );

        let snapshot = service.refresh().await.unwrap().unwrap();
        assert_eq!(snapshot.total_market_value, dec!(1000));
        assert_eq!(service.latest_snapshot(), snapshot);
    }

    #[tokio::test]
    async fn test_superseded_pass_is_discarded() {
        let repository = Arc::new(InMemoryLedgerRepository::new());
        let ledger = authenticated_ledger(repository.clone());
        ledger.record_buy(buy("AAPL", 10, 90)).await.unwrap();

        let source = Arc::new(GatedPriceSource::new());
        let service = Arc::new(PortfolioService::new(
            repository.clone(),
            Arc::new(PerformanceService::new(source.clone())),
        ));

        // First pass blocks on its price lookup.
        let stale = tokio::spawn({
            let service = service.clone();
            async move { service.refresh().await }
        });
        tokio::task::yield_now().await;

        // The ledger moves on and a newer pass completes in the meantime.
        ledger.record_buy(buy("MSFT", 2, 400)).await.unwrap();
        let fresh = service.refresh().await.unwrap().unwrap();
        assert_eq!(fresh.positions.len(), 2);

        // Release the stale pass: its result must be discarded, not applied.
        source.release.notify_one();
        let stale_result = stale.await.unwrap().unwrap();
        assert!(stale_result.is_none());
        assert_eq!(service.latest_snapshot(), fresh);
    }

    #[tokio::test]
    async fn test_current_holdings_tracks_ledger() {
        let repository = Arc::new(InMemoryLedgerRepository::new());
        let ledger = authenticated_ledger(repository.clone());

        let source = Arc::new(GatedPriceSource::new());
        source.gate_armed.store(false, Ordering::SeqCst);
        let service = PortfolioService::new(
            repository,
            Arc::new(PerformanceService::new(source)),
        );

        assert!(service.current_holdings().unwrap().is_empty());

        ledger.record_buy(buy("TSLA", 5, 200)).await.unwrap();
        let holdings = service.current_holdings().unwrap();
        assert_eq!(holdings.len(), 1);
        assert_eq!(holdings[0].symbol, "TSLA");
        assert_eq!(holdings[0].quantity, dec!(5));
    }

    #[tokio::test]
    async fn test_run_refreshes_on_ledger_change() {
        let repository = Arc::new(InMemoryLedgerRepository::new());
        let ledger = authenticated_ledger(repository.clone());

        let source = Arc::new(GatedPriceSource::new());
        source.gate_armed.store(false, Ordering::SeqCst);
        let service = Arc::new(PortfolioService::new(
            repository.clone(),
            Arc::new(PerformanceService::new(source)),
        ));

        let receiver = repository.subscribe();
        let worker = tokio::spawn(service.clone().run(receiver));

        ledger.record_buy(buy("NVDA", 1, 800)).await.unwrap();

        // Poll until the worker applies the refreshed snapshot.
        let mut applied = false;
        for _ in 0..50 {
            if service.latest_snapshot().positions.len() == 1 {
                applied = true;
                break;
            }
            tokio::time::sleep(std::time::Duration::from_millis(10)).await;
        }
        assert!(applied);

        worker.abort();
        assert!(worker.await.unwrap_err().is_cancelled());
    }
}
