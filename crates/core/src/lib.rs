#![forbid(unsafe_code)]

pub mod doomsday;
pub mod model;
pub mod time;

pub use doomsday::weekday_of;
pub use time::Clock;
