//! # LX-05 Orchestration
//!
//! Turns user intents (pay, swap, convert, manage trustlines, fund an
//! account) into validated, previewed and executed ledger transactions.
//!
//! **Subsystem ID:** 05
//!
//! ## Operations
//!
//! | Operation | Preview | Execute | Ledger operations |
//! |-----------|---------|---------|-------------------|
//! | Payment | fee, total debit, confirmation token | PIN + token | `Payment` or `CreateAccount` |
//! | Swap | estimate, minimum, rate, price impact, route | PIN | `PathPaymentStrictSend` to self |
//! | Strict send | estimate, minimum receive, path | PIN | `PathPaymentStrictSend` |
//! | Strict receive | estimate, maximum send, path | PIN | `PathPaymentStrictReceive` |
//! | Add / remove trustline | | PIN | `ChangeTrust` |
//! | Fund account | | PIN | `CreateAccount` |
//!
//! A conversion paying XLM to an account that does not exist yet becomes a
//! path payment to the source followed by `CreateAccount`.
//!
//! ## Dependencies
//!
//! | Subsystem | Used for |
//! |-----------|----------|
//! | LX-01 | Reserve-aware spendable balance, minimum send amounts |
//! | LX-02 | Failure classification (through LX-04) |
//! | LX-03 | Confirmation tokens |
//! | LX-04 | Build, sign, submit and poll |
//!
//! ## Module Structure
//!
//! ```text
//! lx-05-orchestration/
//! ├── domain/          # requests, previews, envelope, config, errors
//! ├── algorithms/      # slippage, price impact, route, path selection
//! ├── ports/           # OrchestrationApi, ledger/identity/history ports
//! ├── adapters/        # in-memory ledger and collaborators
//! └── service/         # OrchestrationService
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod adapters;
pub mod algorithms;
pub mod domain;
pub mod ports;
pub mod service;

pub use adapters::{InMemoryHistoryStore, InMemoryLedger, RecordingNotifier, StaticIdentityProvider};
pub use domain::{
    ApiResponse, BestPathPolicy, ConversionMode, ExecuteConversionCommand, ExecutePaymentCommand,
    ExecutionReceipt, FiatWithdrawal, FundAccountCommand, HistoryDetail, HistoryRecord,
    OrchestrationError, OrchestratorConfig, PathQuote, PathRequest, PaymentPreview,
    PaymentRequest, Pin, PolicyConfig, ResponseStatus, Slippage, StrictReceivePreview,
    StrictSendPreview, SwapPreview, TrustlineCommand, WithdrawalConfirmed,
};
pub use ports::{
    AccountLoader, HistoryStore, IdentityProvider, NotificationDispatcher, OrchestrationApi,
    PathFinder,
};
pub use service::{OrchestrationDependencies, OrchestrationService};
