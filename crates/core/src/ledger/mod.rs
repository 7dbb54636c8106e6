//! Ledger module - transaction models, repository trait, and intake service.

mod ledger_model;
mod ledger_repository;
mod ledger_service;
mod ledger_traits;
mod session;


pub use ledger_model::{NewTransaction, Transaction, TransactionType};
pub use ledger_repository::InMemoryLedgerRepository;
pub use ledger_service::LedgerService;
pub use ledger_traits::LedgerRepositoryTrait;
pub use session::{SessionStore, UserSession};
