//! Domain types for FIFO lot accounting.
//!
//! This module provides:
//! - Exact numeric handling via the Decimal wrapper
//! - Domain primitives: Symbol, AssetId, LotId, SaleId
//! - Asset, PurchaseLot, and SaleRecord entities

pub mod asset;
pub mod decimal;
pub mod lot;
pub mod primitives;
pub mod sale;

pub use asset::Asset;
pub use decimal::Decimal;
pub use lot::PurchaseLot;
pub use primitives::{AssetId, LotId, SaleId, Symbol};
pub use sale::SaleRecord;
