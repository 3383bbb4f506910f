//! Rule-based recommendation engine.
//!
//! Infers the season from temperature, buckets raw weather readings, and
//! maps species/season/conditions to an ordered list of lure picks.

pub mod classify;
pub mod recommend;
pub mod season;
pub mod table;

pub use classify::{classify_cloud, classify_wind, time_of_day};
pub use recommend::{recommend, RuleInput, MAX_PICKS};
pub use season::infer_season;
pub use table::{base_picks, BasePick};
