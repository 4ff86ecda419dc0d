//! # Algorithms
//!
//! Pure quote arithmetic: slippage bounds, price impact, route display and
//! path selection.

pub mod path_selection;
pub mod price_impact;
pub mod route;
pub mod slippage;

pub use path_selection::{select_strict_receive, select_strict_send};
pub use price_impact::{exchange_rate, price_impact_percent};
pub use route::build_route;
pub use slippage::{max_source, min_destination};
