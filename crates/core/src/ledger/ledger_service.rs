//! Transaction intake service.
//!
//! Enforces the boundary rules before anything reaches the ledger: an
//! authenticated session, positive integer quantity, positive price, a
//! non-empty uppercase symbol, and - for sells - enough aggregated shares.
//! Rejection here is deliberate; the aggregator's internal oversell clamp is
//! only a safety net for inconsistent data that never went through intake.

use std::sync::Arc;

use log::debug;
use rust_decimal::Decimal;
use tokio::sync::watch;

use super::ledger_model::{NewTransaction, Transaction, TransactionType};
use super::ledger_traits::LedgerRepositoryTrait;
use super::session::SessionStore;
use crate::errors::{Error, Result, ValidationError};
use crate::portfolio::holdings::aggregate_holdings;

pub struct LedgerService {
    repository: Arc<dyn LedgerRepositoryTrait>,
    session: Arc<SessionStore>,
}

impl LedgerService {
    pub fn new(repository: Arc<dyn LedgerRepositoryTrait>, session: Arc<SessionStore>) -> Self {
        Self {
            repository,
            session,
        }
    }

    /// Record a purchase.
    pub async fn record_buy(&self, input: NewTransaction) -> Result<Transaction> {
        self.require_session()?;
        let symbol = validate_intake(&input)?;
        debug!("Recording BUY {} x{} @ {}", symbol, input.quantity, input.price);

        let transaction = Transaction::record(
            symbol,
            normalize_company_name(input.company_name),
            TransactionType::Buy,
            input.quantity,
            input.price,
        );
        self.repository.append(transaction).await
    }

    /// Record a sale. The symbol and quantity are explicit caller inputs;
    /// sells of more shares than currently held are rejected outright.
    pub async fn record_sell(&self, input: NewTransaction) -> Result<Transaction> {
        self.require_session()?;
        let symbol = validate_intake(&input)?;

        let held = self.held_quantity(&symbol)?;
        if input.quantity > held {
            return Err(ValidationError::InsufficientShares {
                symbol,
                requested: input.quantity,
                held,
            }
            .into());
        }
        debug!("Recording SELL {} x{} @ {}", symbol, input.quantity, input.price);

        let transaction = Transaction::record(
            symbol,
            normalize_company_name(input.company_name),
            TransactionType::Sell,
            input.quantity,
            input.price,
        );
        self.repository.append(transaction).await
    }

    /// Current ordered transaction list.
    pub fn transactions(&self) -> Result<Vec<Transaction>> {
        self.repository.list()
    }

    /// Subscribe to ledger changes (full list per change).
    pub fn subscribe(&self) -> watch::Receiver<Vec<Transaction>> {
        self.repository.subscribe()
    }

    fn require_session(&self) -> Result<()> {
        if self.session.is_authenticated() {
            Ok(())
        } else {
            Err(Error::AuthRequired(
                "no active session for ledger mutation".to_string(),
            ))
        }
    }

    /// Net shares currently held for `symbol`, per a fresh aggregation pass.
    fn held_quantity(&self, symbol: &str) -> Result<Decimal> {
        let transactions = self.repository.list()?;
        let quantity = aggregate_holdings(&transactions)
            .into_iter()
            .find(|holding| holding.symbol == symbol)
            .map(|holding| holding.quantity)
            .unwrap_or(Decimal::ZERO);
        Ok(quantity)
    }
}

fn normalize_company_name(name: Option<String>) -> Option<String> {
    name.map(|n| n.trim().to_string()).filter(|n| !n.is_empty())
}

/// Validate caller input and return the canonical uppercase symbol.
fn validate_intake(input: &NewTransaction) -> Result<String> {
    let symbol = input.symbol.trim().to_uppercase();
    if symbol.is_empty() {
        return Err(ValidationError::EmptySymbol.into());
    }
    if input.quantity <= Decimal::ZERO || !input.quantity.fract().is_zero() {
        return Err(ValidationError::InvalidQuantity(input.quantity).into());
    }
    if input.price <= Decimal::ZERO {
        return Err(ValidationError::InvalidPrice(input.price).into());
    }
    Ok(symbol)
}
