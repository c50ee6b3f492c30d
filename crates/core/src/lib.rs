#![forbid(unsafe_code)]

pub mod bank;
pub mod error;
pub mod model;
pub mod time;

pub use bank::{QuestionBank, Tier, TierInfo};
pub use error::Error;
pub use time::Clock;
