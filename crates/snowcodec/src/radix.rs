use crate::{Error, Result, Snowflake};
use core::fmt;
use core::str::FromStr;
#[cfg(feature = "tracing")]
use tracing::instrument;

/// Size of a buffer that fits any radix encoding of a `u64` (64 binary
/// digits).
pub const MAX_DIGITS: usize = 64;

/// A stack buffer for [`Snowflake::encode_radix`].
pub type DigitBuf = [u8; MAX_DIGITS];

const DIGITS: &[u8; 36] = b"0123456789abcdefghijklmnopqrstuvwxyz";

impl Snowflake {
    /// Encodes this ID in the given radix into `buf` without heap allocation
    /// and returns the written digits.
    ///
    /// Digits above 9 are lowercase. There are no leading zeros; zero encodes
    /// as `"0"`.
    ///
    /// # Panics
    ///
    /// Panics if `radix` is outside `2..=36`.
    ///
    /// # Example
    ///
    /// ```
    /// use snowcodec::{DigitBuf, MAX_DIGITS, Snowflake};
    ///
    /// let mut buf: DigitBuf = [0; MAX_DIGITS];
    /// let id = Snowflake::from_raw(435_834_986_943);
    /// assert_eq!(id.encode_radix(16, &mut buf), "6579ca21bf");
    /// ```
    pub fn encode_radix<'buf>(&self, radix: u32, buf: &'buf mut DigitBuf) -> &'buf str {
        assert!((2..=36).contains(&radix), "invalid radix: {radix}");
        let radix = u64::from(radix);
        let mut n = self.to_raw();
        let mut pos = MAX_DIGITS;
        loop {
            pos -= 1;
            buf[pos] = DIGITS[(n % radix) as usize];
            n /= radix;
            if n == 0 {
                break;
            }
        }

        // SAFETY: every byte written comes from `DIGITS`, which is ASCII
        unsafe { core::str::from_utf8_unchecked(&buf[pos..]) }
    }

    fn to_radix_string(self, radix: u32) -> String {
        let mut buf = [0; MAX_DIGITS];
        self.encode_radix(radix, &mut buf).to_owned()
    }

    /// Canonical base-10 representation: no sign, no leading zeros.
    #[must_use]
    pub fn to_decimal_string(&self) -> String {
        self.to_radix_string(10)
    }

    /// Lowercase base-16 representation without a prefix.
    #[must_use]
    pub fn to_hex_string(&self) -> String {
        self.to_radix_string(16)
    }

    /// Lowercase base-16 representation with a `0x` prefix.
    #[must_use]
    pub fn to_pretty_hex_string(&self) -> String {
        let mut buf = [0; MAX_DIGITS];
        let digits = self.encode_radix(16, &mut buf);
        let mut out = String::with_capacity(digits.len() + 2);
        out.push_str("0x");
        out.push_str(digits);
        out
    }

    /// Binary-literal representation: a string of `0`/`1` characters with no
    /// leading zeros. This is display text, not a packed bit buffer.
    #[must_use]
    pub fn to_binary_string(&self) -> String {
        self.to_radix_string(2)
    }

    /// Parses `s` as an unsigned integer in `radix`.
    ///
    /// The empty string parses as [`Snowflake::EMPTY`] so that omitted
    /// optional fields decode to the sentinel. Signs, whitespace and prefixes
    /// are rejected.
    ///
    /// # Errors
    ///
    /// - [`Error::InvalidRadix`] if `radix` is outside `2..=36`
    /// - [`Error::MalformedDigit`] on the first byte that is not a digit of
    ///   `radix`
    /// - [`Error::Overflow`] if the value does not fit in 64 bits
    #[cfg_attr(feature = "tracing", instrument(level = "trace"))]
    pub fn parse_radix(s: &str, radix: u32) -> Result<Self> {
        parse_radix_bytes(s.as_bytes(), radix).map(Self::from_raw)
    }

    /// Parses a canonical base-10 string. See [`Snowflake::parse_radix`].
    ///
    /// # Errors
    ///
    /// Same as [`Snowflake::parse_radix`].
    pub fn parse_decimal(s: &str) -> Result<Self> {
        Self::parse_radix(s, 10)
    }

    /// Parses a base-16 string, with or without a `0x`/`0X` prefix.
    ///
    /// # Errors
    ///
    /// Same as [`Snowflake::parse_radix`]. A bare prefix with no digits is a
    /// [`Error::MalformedDigit`] on the prefix.
    pub fn parse_hex(s: &str) -> Result<Self> {
        match s.as_bytes() {
            [b'0', x @ (b'x' | b'X')] => Err(Error::MalformedDigit {
                byte: *x,
                position: 1,
            }),
            [b'0', b'x' | b'X', ..] => {
                Self::parse_radix(&s[2..], 16).map_err(|err| err.offset_by(2))
            }
            _ => Self::parse_radix(s, 16),
        }
    }

    /// Parses a binary-literal string of `0`/`1` characters.
    ///
    /// # Errors
    ///
    /// Same as [`Snowflake::parse_radix`].
    pub fn parse_binary(s: &str) -> Result<Self> {
        Self::parse_radix(s, 2)
    }

    /// Parses a decimal string, panicking on failure.
    ///
    /// Only for inputs whose validity the caller already guarantees, such as
    /// literals in source code or data this process serialized itself.
    ///
    /// # Panics
    ///
    /// Panics if `s` is not a valid decimal `u64`.
    ///
    /// # Example
    ///
    /// ```
    /// use snowcodec::Snowflake;
    ///
    /// let id = Snowflake::parse_decimal_or_panic("435639843545");
    /// assert_eq!(id.to_raw(), 435_639_843_545);
    /// ```
    #[must_use]
    #[track_caller]
    pub fn parse_decimal_or_panic(s: &str) -> Self {
        match Self::parse_decimal(s) {
            Ok(id) => id,
            Err(err) => panic!("invalid snowflake {s:?}: {err}"),
        }
    }
}

/// Strict unsigned parse of `bytes` in `radix`; empty input is zero.
pub(crate) fn parse_radix_bytes(bytes: &[u8], radix: u32) -> Result<u64> {
    if !(2..=36).contains(&radix) {
        return Err(Error::InvalidRadix { radix });
    }
    let mut acc: u64 = 0;
    for (position, &byte) in bytes.iter().enumerate() {
        let digit = char::from(byte)
            .to_digit(radix)
            .ok_or(Error::MalformedDigit { byte, position })?;
        acc = acc
            .checked_mul(u64::from(radix))
            .and_then(|acc| acc.checked_add(u64::from(digit)))
            .ok_or(Error::Overflow)?;
    }
    Ok(acc)
}

impl FromStr for Snowflake {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse_decimal(s)
    }
}

impl fmt::LowerHex for Snowflake {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::LowerHex::fmt(&self.to_raw(), f)
    }
}

impl fmt::UpperHex for Snowflake {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::UpperHex::fmt(&self.to_raw(), f)
    }
}

impl fmt::Binary for Snowflake {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Binary::fmt(&self.to_raw(), f)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn string_forms() {
        let id = Snowflake::from_raw(435_834_986_943);
        assert_eq!(id.to_decimal_string(), "435834986943");
        assert_eq!(id.to_hex_string(), "6579ca21bf");
        assert_eq!(id.to_pretty_hex_string(), "0x6579ca21bf");
        assert_eq!(
            id.to_binary_string(),
            "110010101111001110010100010000110111111"
        );
    }

    #[test]
    fn string_forms_of_zero_and_max() {
        let zero = Snowflake::EMPTY;
        assert_eq!(zero.to_decimal_string(), "0");
        assert_eq!(zero.to_hex_string(), "0");
        assert_eq!(zero.to_pretty_hex_string(), "0x0");
        assert_eq!(zero.to_binary_string(), "0");

        let max = Snowflake::from_raw(u64::MAX);
        assert_eq!(max.to_decimal_string(), "18446744073709551615");
        assert_eq!(max.to_hex_string(), "ffffffffffffffff");
        assert_eq!(max.to_binary_string(), "1".repeat(64));
    }

    #[test]
    fn formatting_traits_match_strings() {
        let id = Snowflake::from_raw(435_834_986_943);
        assert_eq!(format!("{id:x}"), id.to_hex_string());
        assert_eq!(format!("{id:#x}"), id.to_pretty_hex_string());
        assert_eq!(format!("{id:X}"), "6579CA21BF");
        assert_eq!(format!("{id:b}"), id.to_binary_string());
    }

    #[test]
    fn encode_radix_uses_tail_of_buffer() {
        let mut buf: DigitBuf = [b'#'; MAX_DIGITS];
        let id = Snowflake::from_raw(35);
        assert_eq!(id.encode_radix(36, &mut buf), "z");
        assert_eq!(buf[MAX_DIGITS - 1], b'z');
        assert_eq!(buf[MAX_DIGITS - 2], b'#');
    }

    #[test]
    #[should_panic(expected = "invalid radix")]
    fn encode_radix_rejects_bad_radix() {
        let mut buf: DigitBuf = [0; MAX_DIGITS];
        let _ = Snowflake::from_raw(1).encode_radix(37, &mut buf);
    }

    #[test]
    fn parse_decimal_valid() {
        let id = Snowflake::parse_decimal("435639843545").unwrap();
        assert_eq!(id.to_string(), "435639843545");
        assert_eq!(Snowflake::parse_decimal("11").unwrap().to_raw(), 11);
        assert_eq!(Snowflake::parse_decimal("0").unwrap(), Snowflake::EMPTY);
        assert_eq!(
            Snowflake::parse_decimal("18446744073709551615").unwrap(),
            Snowflake::from_raw(u64::MAX)
        );
        assert_eq!("42".parse::<Snowflake>().unwrap().to_raw(), 42);
    }

    // Empty input is the omitted-field convention, not an error. Pinned so a
    // change to this behavior is deliberate.
    #[test]
    fn parse_empty_is_sentinel() {
        assert_eq!(Snowflake::parse_decimal("").unwrap(), Snowflake::EMPTY);
        assert_eq!(Snowflake::parse_hex("").unwrap(), Snowflake::EMPTY);
        assert_eq!(Snowflake::parse_binary("").unwrap(), Snowflake::EMPTY);
    }

    #[test]
    fn parse_decimal_rejects_letters() {
        let err = Snowflake::parse_decimal("435639sd843545gf453s").unwrap_err();
        assert_eq!(
            err,
            Error::MalformedDigit {
                byte: b's',
                position: 6
            }
        );
    }

    #[test]
    fn parse_decimal_rejects_signs_and_whitespace() {
        for (input, byte) in [("-1", b'-'), ("+1", b'+'), (" 1", b' ')] {
            assert_eq!(
                Snowflake::parse_decimal(input).unwrap_err(),
                Error::MalformedDigit { byte, position: 0 }
            );
        }
    }

    #[test]
    fn parse_decimal_rejects_overflow() {
        // u64::MAX followed by another digit.
        let err = Snowflake::parse_decimal("184467440737095516151").unwrap_err();
        assert_eq!(err, Error::Overflow);
        let err = Snowflake::parse_decimal("18446744073709551616").unwrap_err();
        assert_eq!(err, Error::Overflow);
    }

    #[test]
    fn parse_hex_with_and_without_prefix() {
        let expected = Snowflake::from_raw(435_834_986_943);
        assert_eq!(Snowflake::parse_hex("6579ca21bf").unwrap(), expected);
        assert_eq!(Snowflake::parse_hex("0x6579ca21bf").unwrap(), expected);
        assert_eq!(Snowflake::parse_hex("0X6579CA21BF").unwrap(), expected);
        assert_eq!(Snowflake::parse_hex("0").unwrap(), Snowflake::EMPTY);
    }

    #[test]
    fn parse_hex_reports_positions_past_prefix() {
        assert_eq!(
            Snowflake::parse_hex("0x12g4").unwrap_err(),
            Error::MalformedDigit {
                byte: b'g',
                position: 4
            }
        );
        assert_eq!(
            Snowflake::parse_hex("0x").unwrap_err(),
            Error::MalformedDigit {
                byte: b'x',
                position: 1
            }
        );
        assert_eq!(
            Snowflake::parse_hex("1ffffffffffffffff").unwrap_err(),
            Error::Overflow
        );
    }

    #[test]
    fn parse_binary_literal() {
        let id = Snowflake::parse_binary("110010101111001110010100010000110111111").unwrap();
        assert_eq!(id.to_raw(), 435_834_986_943);
        assert_eq!(
            Snowflake::parse_binary("102").unwrap_err(),
            Error::MalformedDigit {
                byte: b'2',
                position: 2
            }
        );
        assert_eq!(
            Snowflake::parse_binary(&"1".repeat(65)).unwrap_err(),
            Error::Overflow
        );
    }

    #[test]
    fn parse_radix_rejects_bad_radix() {
        assert_eq!(
            Snowflake::parse_radix("1", 1).unwrap_err(),
            Error::InvalidRadix { radix: 1 }
        );
        assert_eq!(
            Snowflake::parse_radix("", 37).unwrap_err(),
            Error::InvalidRadix { radix: 37 }
        );
    }

    #[test]
    fn parse_radix_rejects_non_ascii() {
        let err = Snowflake::parse_decimal("12\u{e9}").unwrap_err();
        assert_eq!(
            err,
            Error::MalformedDigit {
                byte: 0xc3,
                position: 2
            }
        );
    }

    #[test]
    fn parse_or_panic_accepts_trusted_input() {
        assert_eq!(Snowflake::parse_decimal_or_panic("").to_raw(), 0);
        assert_eq!(Snowflake::parse_decimal_or_panic("11").to_raw(), 11);
    }

    #[test]
    #[should_panic(expected = "invalid snowflake")]
    fn parse_or_panic_on_letters() {
        let _ = Snowflake::parse_decimal_or_panic("435639sd843545gf453s");
    }

    #[test]
    #[should_panic(expected = "overflows")]
    fn parse_or_panic_on_overflow() {
        let _ = Snowflake::parse_decimal_or_panic("184467440737095516151");
    }
}
