//! Text and legacy binary marshal slots.
//!
//! The binary slot predates the JSON convention and was repurposed to carry
//! text: it holds the base-2 digit string of the value (ASCII `0`/`1`), not
//! the packed big-endian bytes. Peers depend on that, so it stays text.

use crate::radix::parse_radix_bytes;
use crate::{Result, Snowflake};

impl Snowflake {
    /// Encodes this ID for a generic text slot: the bare decimal string.
    #[must_use]
    pub fn marshal_text(&self) -> Vec<u8> {
        self.to_decimal_string().into_bytes()
    }

    /// Decodes a bare decimal string from a text slot. Empty input is
    /// [`Snowflake::EMPTY`].
    ///
    /// # Errors
    ///
    /// Same as [`Snowflake::parse_decimal`]; bytes that are not valid UTF-8
    /// are reported as [`crate::Error::MalformedDigit`].
    pub fn unmarshal_text(text: &[u8]) -> Result<Self> {
        parse_radix_bytes(text, 10).map(Self::from_raw)
    }

    /// Encodes this ID for the legacy binary slot: the base-2 digit string.
    ///
    /// # Example
    ///
    /// ```
    /// use snowcodec::Snowflake;
    ///
    /// assert_eq!(Snowflake::from_raw(5).marshal_binary(), b"101");
    /// ```
    #[must_use]
    pub fn marshal_binary(&self) -> Vec<u8> {
        self.to_binary_string().into_bytes()
    }

    /// Decodes a base-2 digit string from the legacy binary slot. Empty input
    /// is [`Snowflake::EMPTY`].
    ///
    /// # Errors
    ///
    /// Same as [`Snowflake::parse_binary`].
    pub fn unmarshal_binary(data: &[u8]) -> Result<Self> {
        parse_radix_bytes(data, 2).map(Self::from_raw)
    }
}
