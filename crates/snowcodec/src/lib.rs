mod coerce;
mod error;
mod id;
mod json;
mod radix;
#[cfg(feature = "serde")]
mod serde;
mod text;
mod time;

pub use crate::coerce::*;
pub use crate::error::*;
pub use crate::id::*;
pub use crate::radix::*;
#[cfg(feature = "serde")]
pub use crate::serde::*;
pub use crate::time::*;
