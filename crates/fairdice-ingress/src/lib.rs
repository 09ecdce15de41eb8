//! # fairdice-ingress
//!
//! **Admission plane**: every wager enters the game here.
//!
//! ## Offer Flow
//!
//! ```text
//! TokenTransfer → quantity checks → OfferMemo::parse → RollUnder
//!     → bonus ceiling → duplicate hash → expiration → oracle signature
//!     → referrer → BetStore.insert → sweep → commit hash → FundPool.lock
//!     → Effect::Receipt
//! ```
//!
//! No bet is admitted without a valid oracle signature over its commitment.

pub mod memo;
pub mod offer;

pub use memo::{MemoError, OfferMemo};
pub use offer::OfferEngine;
