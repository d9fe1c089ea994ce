//! The JSON sentinel convention.
//!
//! JavaScript consumers parse JSON numbers as IEEE-754 doubles, which cannot
//! represent every `u64` above 2^53. Snowflakes are therefore written as
//! quoted decimal strings, and the empty sentinel `0` is written as `null`:
//!
//! | value | JSON             |
//! |-------|------------------|
//! | `0`   | `null`           |
//! | `n`   | `"<decimal n>"`  |
//!
//! Decoding is more lenient than encoding. It also accepts bare JSON
//! integers, leading zeros, the empty token, and a leading `-`, which sets
//! bit 63 instead of negating: `-1` decodes to `(1 << 63) | 1`, not to the
//! two's complement of -1.

use crate::{Error, Result, Snowflake};
use core::fmt;
#[cfg(feature = "tracing")]
use tracing::instrument;

const NULL: &[u8] = b"null";
const SIGN_BIT: u64 = 1 << 63;

impl Snowflake {
    /// Encodes this ID as a JSON value: `null` when empty, otherwise the
    /// decimal string in double quotes.
    ///
    /// # Example
    ///
    /// ```
    /// use snowcodec::Snowflake;
    ///
    /// assert_eq!(Snowflake::EMPTY.to_json(), "null");
    /// assert_eq!(Snowflake::from_raw(42).to_json(), r#""42""#);
    /// ```
    #[must_use]
    pub fn to_json(&self) -> String {
        let mut out = String::with_capacity(22);
        // Writing into a `String` cannot fail.
        let _ = self.write_json(&mut out);
        out
    }

    /// Writes the JSON encoding of this ID into `w` without allocating.
    ///
    /// # Errors
    ///
    /// Returns an error only if `w` does.
    pub fn write_json<W: fmt::Write>(&self, w: &mut W) -> fmt::Result {
        if self.is_empty() {
            return w.write_str("null");
        }
        let mut buf = [0; crate::MAX_DIGITS];
        w.write_char('"')?;
        w.write_str(self.encode_radix(10, &mut buf))?;
        w.write_char('"')
    }

    /// Decodes a single JSON token holding a Snowflake.
    ///
    /// `token` is the raw bytes of one JSON value, already isolated from its
    /// enclosing document by a JSON tokenizer. Accepted forms:
    ///
    /// - empty input or `null`: [`Snowflake::EMPTY`]
    /// - a quoted decimal string, e.g. `"00002349872349"` (leading zeros are
    ///   fine, `""` is empty)
    /// - a bare decimal integer, e.g. `69696969`
    /// - either of the above with a leading `-`, which sets bit 63
    ///
    /// # Errors
    ///
    /// - [`Error::MalformedDigit`] on any other byte, with its position in
    ///   `token`. A quoted `"null"` is malformed.
    /// - [`Error::Overflow`] if the magnitude does not fit in 64 bits
    ///
    /// # Example
    ///
    /// ```
    /// use snowcodec::{Error, Snowflake};
    ///
    /// assert_eq!(Snowflake::from_json(b"null")?, Snowflake::EMPTY);
    /// assert_eq!(Snowflake::from_json(b"\"00002349872349\"")?.to_raw(), 2_349_872_349);
    /// assert_eq!(Snowflake::from_json(b"-1")?.to_raw(), (1 << 63) | 1);
    /// assert!(matches!(
    ///     Snowflake::from_json(b"\"89945379a84753\""),
    ///     Err(Error::MalformedDigit { byte: b'a', .. })
    /// ));
    /// # Ok::<(), Error>(())
    /// ```
    #[cfg_attr(
        feature = "tracing",
        instrument(level = "trace", skip(token), fields(len = token.len()))
    )]
    pub fn from_json(token: &[u8]) -> Result<Self> {
        if token == NULL {
            return Ok(Self::EMPTY);
        }
        let raw = match token {
            [b'"', body @ .., b'"'] => {
                decode_sentinel_digits(body).map_err(|err| err.offset_by(1))?
            }
            _ => decode_sentinel_digits(token)?,
        };
        Ok(Self::from_raw(raw))
    }

    /// Decodes the contents of a JSON string (quotes already removed), such
    /// as the value a serde visitor receives. Unlike [`Snowflake::from_json`],
    /// neither `null` nor surrounding quotes are recognized here.
    #[cfg_attr(not(feature = "serde"), allow(dead_code))]
    pub(crate) fn from_json_contents(bytes: &[u8]) -> Result<Self> {
        decode_sentinel_digits(bytes).map(Self::from_raw)
    }
}

/// Accumulates an optionally `-`-prefixed run of decimal digits. Empty input
/// is zero.
fn decode_sentinel_digits(bytes: &[u8]) -> Result<u64> {
    let (sign, digits, offset) = match bytes {
        [] => return Ok(0),
        [b'-'] => {
            return Err(Error::MalformedDigit {
                byte: b'-',
                position: 0,
            });
        }
        [b'-', rest @ ..] => (SIGN_BIT, rest, 1),
        _ => (0, bytes, 0),
    };

    let mut magnitude: u64 = 0;
    for (i, &byte) in digits.iter().enumerate() {
        if !byte.is_ascii_digit() {
            return Err(Error::MalformedDigit {
                byte,
                position: offset + i,
            });
        }
        magnitude = magnitude
            .checked_mul(10)
            .and_then(|m| m.checked_add(u64::from(byte - b'0')))
            .ok_or(Error::Overflow)?;
    }
    Ok(sign | magnitude)
}
