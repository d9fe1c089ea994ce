use crate::Snowflake;
use core::fmt;
use serde::de::{self, Visitor};
use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// Serializes with the JSON sentinel convention: `none` (JSON `null`) when
/// empty, otherwise the decimal string.
impl Serialize for Snowflake {
    fn serialize<S>(&self, s: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        if self.is_empty() {
            return s.serialize_none();
        }
        let mut buf = [0; crate::MAX_DIGITS];
        s.serialize_str(self.encode_radix(10, &mut buf))
    }
}

/// Accepts `null`, unsigned integers, negative integers within the `i64`
/// range, and strings decoded with the [`Snowflake::from_json`] digit rules.
///
/// Self-describing formats such as `serde_json` hand `-0` and negatives below
/// `i64::MIN` to the visitor as floats, which are rejected. Their quoted forms
/// (`"-0"`, `"-18446744073709551615"`) decode as they do in `from_json`; for
/// bare tokens call `from_json` on the raw bytes instead.
///
/// Requires a self-describing format, since the input may be a string, a
/// number or null.
impl<'de> Deserialize<'de> for Snowflake {
    fn deserialize<D>(d: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        d.deserialize_any(SnowflakeVisitor)
    }
}

struct SnowflakeVisitor;

impl<'de> Visitor<'de> for SnowflakeVisitor {
    type Value = Snowflake;

    fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
        formatter.write_str("null, an integer, or a decimal string")
    }

    fn visit_none<E>(self) -> Result<Self::Value, E>
    where
        E: de::Error,
    {
        Ok(Snowflake::EMPTY)
    }

    fn visit_unit<E>(self) -> Result<Self::Value, E>
    where
        E: de::Error,
    {
        Ok(Snowflake::EMPTY)
    }

    fn visit_some<D>(self, d: D) -> Result<Self::Value, D::Error>
    where
        D: Deserializer<'de>,
    {
        Snowflake::deserialize(d)
    }

    #[inline]
    fn visit_u64<E>(self, v: u64) -> Result<Self::Value, E>
    where
        E: de::Error,
    {
        Ok(Snowflake::from_raw(v))
    }

    // Negative numbers set bit 63 rather than being reinterpreted, matching
    // the token decoder.
    #[inline]
    fn visit_i64<E>(self, v: i64) -> Result<Self::Value, E>
    where
        E: de::Error,
    {
        let sign = if v < 0 { 1 << 63 } else { 0 };
        Ok(Snowflake::from_raw(sign | v.unsigned_abs()))
    }

    #[inline]
    fn visit_str<E>(self, v: &str) -> Result<Self::Value, E>
    where
        E: de::Error,
    {
        Snowflake::from_json_contents(v.as_bytes()).map_err(E::custom)
    }

    // Same contents rule as `visit_str`: no quote stripping and no `null`.
    fn visit_bytes<E>(self, v: &[u8]) -> Result<Self::Value, E>
    where
        E: de::Error,
    {
        Snowflake::from_json_contents(v).map_err(E::custom)
    }
}

/// Serialize a Snowflake as its native integer, for consumers that read
/// 64-bit integers exactly. Use with `#[serde(with = "as_native")]`.
pub mod as_native {
    use super::{Deserialize, Deserializer, Serialize, Serializer};
    use crate::Snowflake;

    /// Serialize a Snowflake as its native integer representation.
    ///
    /// # Errors
    ///
    /// Returns an error if the underlying serializer fails.
    pub fn serialize<S>(id: &Snowflake, s: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        id.to_raw().serialize(s)
    }

    /// Deserialize a Snowflake from its native integer representation.
    ///
    /// # Errors
    ///
    /// Returns an error if the underlying deserializer fails or the value is
    /// not a `u64`.
    pub fn deserialize<'de, D>(d: D) -> Result<Snowflake, D::Error>
    where
        D: Deserializer<'de>,
    {
        u64::deserialize(d).map(Snowflake::from_raw)
    }
}

/// Serialize a Snowflake as a decimal string, including `"0"` for the empty
/// sentinel. Use with `#[serde(with = "as_decimal")]` when the consumer
/// cannot handle `null`.
pub mod as_decimal {
    use super::{Deserializer, Serializer};
    use crate::Snowflake;

    /// Serialize a Snowflake as a decimal string.
    ///
    /// # Errors
    ///
    /// Returns an error if the underlying serializer fails.
    pub fn serialize<S>(id: &Snowflake, s: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let mut buf = [0; crate::MAX_DIGITS];
        s.serialize_str(id.encode_radix(10, &mut buf))
    }

    /// Deserialize a Snowflake from a strict decimal string.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The underlying deserializer fails
    /// - The string is not a canonical unsigned decimal that fits in 64 bits
    pub fn deserialize<'de, D>(d: D) -> Result<Snowflake, D::Error>
    where
        D: Deserializer<'de>,
    {
        struct DecimalVisitor;

        impl serde::de::Visitor<'_> for DecimalVisitor {
            type Value = Snowflake;

            fn expecting(&self, formatter: &mut core::fmt::Formatter) -> core::fmt::Result {
                formatter.write_str("a decimal string")
            }

            #[inline]
            fn visit_str<E>(self, v: &str) -> Result<Self::Value, E>
            where
                E: serde::de::Error,
            {
                Snowflake::parse_decimal(v).map_err(E::custom)
            }
        }

        d.deserialize_str(DecimalVisitor)
    }
}
