use crate::{Error, Result, Snowflake};
use std::borrow::Cow;

/// The closed set of inputs [`Snowflake::coerce`] accepts.
///
/// Native integers of every width convert through [`From`]; signed values
/// widen to `i64` and are reinterpreted as their two's complement bits, so
/// `-1i8` becomes `u64::MAX`. This differs from the JSON decoder, which maps a
/// leading `-` onto bit 63.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum Source<'a> {
    /// A signed integer of any native width.
    Signed(i64),
    /// An unsigned integer of any native width.
    Unsigned(u64),
    /// Decimal text. Invalid text coerces to [`Snowflake::EMPTY`].
    Decimal(Cow<'a, str>),
    /// An existing Snowflake, passed through unchanged.
    Snowflake(Snowflake),
    /// Any other type. Always rejected.
    Unsupported {
        /// Name of the rejected type, for diagnostics.
        type_name: &'static str,
    },
}

impl Source<'_> {
    /// Names an input of type `T` that has no Snowflake interpretation.
    #[must_use]
    pub fn unsupported<T: ?Sized>() -> Self {
        Self::Unsupported {
            type_name: core::any::type_name::<T>(),
        }
    }
}

macro_rules! impl_from_signed {
    ($($ty:ty),* $(,)?) => {
        $(
            impl From<$ty> for Source<'_> {
                fn from(v: $ty) -> Self {
                    Self::Signed(v as i64)
                }
            }
        )*
    };
}

macro_rules! impl_from_unsigned {
    ($($ty:ty),* $(,)?) => {
        $(
            impl From<$ty> for Source<'_> {
                fn from(v: $ty) -> Self {
                    Self::Unsigned(v as u64)
                }
            }
        )*
    };
}

impl_from_signed!(i8, i16, i32, i64, isize);
impl_from_unsigned!(u8, u16, u32, u64, usize);

impl<'a> From<&'a str> for Source<'a> {
    fn from(s: &'a str) -> Self {
        Self::Decimal(Cow::Borrowed(s))
    }
}

impl<'a> From<&'a String> for Source<'a> {
    fn from(s: &'a String) -> Self {
        Self::Decimal(Cow::Borrowed(s.as_str()))
    }
}

impl From<String> for Source<'_> {
    fn from(s: String) -> Self {
        Self::Decimal(Cow::Owned(s))
    }
}

impl From<Snowflake> for Source<'_> {
    fn from(id: Snowflake) -> Self {
        Self::Snowflake(id)
    }
}

impl Snowflake {
    /// Best-effort conversion of heterogeneous input into a Snowflake.
    ///
    /// Integers widen to 64 bits, decimal strings are parsed (invalid text
    /// silently becomes [`Snowflake::EMPTY`], unlike
    /// [`Snowflake::parse_decimal`]), and Snowflakes pass through.
    ///
    /// # Errors
    ///
    /// Returns [`Error::UnsupportedType`] for [`Source::Unsupported`].
    ///
    /// # Example
    ///
    /// ```
    /// use snowcodec::{Error, Snowflake, Source};
    ///
    /// assert_eq!(Snowflake::coerce(1i8)?.to_raw(), 1);
    /// assert_eq!(Snowflake::coerce("348563")?.to_raw(), 348_563);
    /// assert_eq!(Snowflake::coerce("not a number")?, Snowflake::EMPTY);
    ///
    /// struct Unknown;
    /// assert!(matches!(
    ///     Snowflake::coerce(Source::unsupported::<Unknown>()),
    ///     Err(Error::UnsupportedType { .. })
    /// ));
    /// # Ok::<(), Error>(())
    /// ```
    pub fn coerce<'a>(source: impl Into<Source<'a>>) -> Result<Self> {
        match source.into() {
            Source::Signed(v) => Ok(Self::from_raw(v as u64)),
            Source::Unsigned(v) => Ok(Self::from_raw(v)),
            Source::Decimal(text) => match Self::parse_decimal(&text) {
                Ok(id) => Ok(id),
                Err(_err) => {
                    #[cfg(feature = "tracing")]
                    tracing::debug!(
                        error = %_err,
                        input = %text,
                        "coercing invalid decimal text to empty snowflake"
                    );
                    Ok(Self::EMPTY)
                }
            },
            Source::Snowflake(id) => Ok(id),
            Source::Unsupported { type_name } => Err(Error::UnsupportedType { type_name }),
        }
    }
}

impl<'a> TryFrom<Source<'a>> for Snowflake {
    type Error = Error;

    fn try_from(source: Source<'a>) -> Result<Self> {
        Self::coerce(source)
    }
}
