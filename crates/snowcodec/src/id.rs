use core::fmt;

/// A 64-bit Snowflake ID.
///
/// - 42 bits timestamp (ms since a platform epoch, see [`DISCORD_EPOCH`] and
///   [`TWITTER_EPOCH`])
/// - 22 bits generator metadata (worker, process and sequence; not decoded)
///
/// ```text
///  Bit Index:  63             22 21                      0
///              +----------------+------------------------+
///  Field:      | timestamp (42) | generator metadata (22) |
///              +----------------+------------------------+
///              |<--- MSB ------ 64 bits ------- LSB ---->|
/// ```
///
/// The value `0` is reserved as the empty sentinel. A real generator never
/// produces it, since any ID created after the epoch carries a non-zero
/// timestamp.
///
/// # Example
///
/// ```
/// use snowcodec::Snowflake;
///
/// let id = Snowflake::from_raw(228_846_961_774_559_232);
/// assert!(id.is_valid());
/// assert_eq!(id.timestamp(), 54_561_367_458);
/// assert_eq!(id.to_string(), "228846961774559232");
/// ```
///
/// [`DISCORD_EPOCH`]: crate::DISCORD_EPOCH
/// [`TWITTER_EPOCH`]: crate::TWITTER_EPOCH
#[derive(Copy, Clone, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[repr(transparent)]
pub struct Snowflake {
    id: u64,
}

impl Snowflake {
    /// The empty sentinel.
    pub const EMPTY: Self = Self { id: 0 };

    /// Bitmask for extracting the 42-bit timestamp field. Occupies bits 22
    /// through 63.
    pub const TIMESTAMP_MASK: u64 = (1 << 42) - 1;

    /// Number of bits to shift the timestamp to its correct position (bit 22).
    pub const TIMESTAMP_SHIFT: u64 = 22;

    /// Converts a raw integer into a Snowflake.
    #[must_use]
    pub const fn from_raw(raw: u64) -> Self {
        Self { id: raw }
    }

    /// Converts this Snowflake into its raw integer.
    #[must_use]
    pub const fn to_raw(&self) -> u64 {
        self.id
    }

    /// Returns `true` if this is the empty sentinel (`0`).
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.id == 0
    }

    /// Returns `true` if the timestamp field is non-zero, i.e. the value is
    /// plausibly an ID created after its epoch.
    #[must_use]
    pub const fn is_valid(&self) -> bool {
        self.timestamp() >= 1
    }

    /// Extracts the timestamp field: milliseconds since the epoch the ID was
    /// generated against.
    #[must_use]
    pub const fn timestamp(&self) -> u64 {
        (self.id >> Self::TIMESTAMP_SHIFT) & Self::TIMESTAMP_MASK
    }

    /// Pairs this ID with its pre-rendered decimal string, for payloads whose
    /// consumers cannot parse a bare 64-bit number.
    #[must_use]
    pub fn json_struct(&self) -> SnowflakeJson {
        SnowflakeJson {
            id: *self,
            id_str: self.to_decimal_string(),
        }
    }
}

impl From<u64> for Snowflake {
    fn from(raw: u64) -> Self {
        Self::from_raw(raw)
    }
}

impl From<Snowflake> for u64 {
    fn from(id: Snowflake) -> Self {
        id.to_raw()
    }
}

impl fmt::Display for Snowflake {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.id, f)
    }
}

impl fmt::Debug for Snowflake {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Snowflake({})", self.id)
    }
}

/// A Snowflake together with its decimal string.
///
/// With the `serde` feature this serializes as
/// `{"id": "435834986943", "id_str": "435834986943"}`, where `id` follows the
/// null-for-empty convention of [`Snowflake`]'s own serde implementation.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash)]
pub struct SnowflakeJson {
    pub id: Snowflake,
    pub id_str: String,
}

impl From<Snowflake> for SnowflakeJson {
    fn from(id: Snowflake) -> Self {
        id.json_struct()
    }
}
