mod coerce;
mod snowflake;

pub use snowflake::*;
