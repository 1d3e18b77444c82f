//! FIFO lot matching and cost-basis tracking over exact decimals.
//!
//! The core is [`engine::match_sale`]: given an asset's purchase lots
//! ordered oldest first and a requested sale, it computes which lots are
//! consumed (fully or partially), the realized gain or loss, and the
//! per-lot mutations as a [`engine::ConsumptionPlan`]. The matcher is
//! pure; [`apply::apply_plan`] commits a plan to a [`ledger::LedgerStore`],
//! and [`PositionTracker`] ties both to a session's [`Position`]
//! aggregate.
//!
//! All arithmetic runs on [`Decimal`] (rust_decimal underneath); no step
//! rounds through binary floats.
//!
//! Concurrency: the crate computes synchronously and takes no locks.
//! Callers running purchases or sales for the same symbol concurrently
//! must serialize those calls, or the asset's lot set can lose updates.
//!
//! ```
//! use chrono::NaiveDate;
//! use lotbasis::{Decimal, InMemoryLedger, Position, PositionTracker, Symbol};
//!
//! let tracker = PositionTracker::new(InMemoryLedger::new());
//! let symbol = Symbol::from("AAPL");
//! let day = |d| NaiveDate::from_ymd_opt(2024, 1, d).unwrap();
//! let dec = |s| Decimal::from_str_exact(s).unwrap();
//!
//! let position = tracker
//!     .add_purchase(Position::new(), &symbol, day(2), dec("10"), dec("100"))
//!     .unwrap()
//!     .into_position();
//!
//! let (position, realized) = tracker
//!     .add_sale(position, &symbol, day(9), dec("4"), dec("130"))
//!     .unwrap()
//!     .into_parts();
//!
//! assert_eq!(realized, dec("120"));
//! assert_eq!(
//!     position.get(&symbol).unwrap().outstanding_quantity(),
//!     dec("6")
//! );
//! ```

pub mod apply;
pub mod domain;
pub mod engine;
pub mod error;
pub mod ledger;
pub mod position;

pub use apply::{apply_plan, ApplyError};
pub use domain::{Asset, AssetId, Decimal, LotId, PurchaseLot, SaleId, SaleRecord, Symbol};
pub use engine::{match_sale, ConsumptionPlan, LotAction, MatchOutcome};
pub use error::LedgerError;
pub use ledger::{InMemoryLedger, LedgerStore, StoreError};
pub use position::{
    AssetPosition, Position, PositionTracker, PurchaseOutcome, RejectReason, SaleOutcome,
};
