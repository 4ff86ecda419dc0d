//! # LX-03 Confirmation Token Store
//!
//! Short-lived, single-use tokens binding a previewed payment's critical
//! fields (source, destination, asset, amount, total debit) so the execute
//! step can prove the user confirms exactly what was previewed.
//!
//! **Subsystem ID:** 03
//!
//! ## Guarantees
//!
//! | Property | Mechanism |
//! |----------|-----------|
//! | Unguessable | 256 random bits, hex encoded |
//! | Single use | consume flag flipped under the map's shard lock |
//! | Exact binding | canonical strings compared byte for byte |
//! | Bounded lifetime | `expires_at` checked on validate, swept periodically |
//!
//! ## Module Structure
//!
//! ```text
//! lx-03-confirmation/
//! ├── domain/          # BoundFields, TokenRecord, ConfirmationConfig
//! ├── ports/           # ConfirmationTokenApi, TimeSource
//! └── adapters/        # InMemoryTokenStore, sweeper task
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod adapters;
pub mod domain;
pub mod ports;

pub use adapters::{spawn_sweeper, sweep_task, InMemoryTokenStore};
pub use domain::{BoundFields, ConfirmationConfig, ConfirmationToken, TokenCheck, TokenRecord};
pub use ports::{ConfirmationTokenApi, MockTimeSource, SystemTimeSource, TimeSource, Timestamp};
