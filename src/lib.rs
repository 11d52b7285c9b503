//! Bull call spread scanner for the BYMA options board.
//!
//! The pipeline reads the board's quote table, decodes each instrument code
//! into type, strike and expiration, joins the underlying's spot price,
//! pairs strike-adjacent calls and keeps the pairs that pass the spot and
//! price filters of a [`config::SpreadConfig`]. Each selected pair gets a
//! payoff-at-expiration curve.
//!
//! The pure core (`decode`, `normalize`, `select`, `payoff`) builds without
//! default features. Network access, the CLI adapters and the HTTP form sit
//! behind the `full` feature.

pub mod analysis;
pub mod config;
pub mod decode;
pub mod enrich;
pub mod model;
pub mod normalize;
pub mod payoff;
pub mod select;
pub mod visualize;

#[cfg(feature = "full")]
pub mod api;
#[cfg(feature = "full")]
pub mod export;
#[cfg(feature = "full")]
pub mod fetch_data;
#[cfg(feature = "full")]
pub mod report;
#[cfg(feature = "full")]
pub mod telemetry;
