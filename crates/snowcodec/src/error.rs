use thiserror::Error;

/// A result type defaulting to this crate's [`Error`].
pub type Result<T, E = Error> = core::result::Result<T, E>;

/// All possible errors that `snowcodec` can produce.
///
/// A returned error means the input was rejected as a whole; no partially
/// accumulated value is ever handed back alongside it.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Error)]
#[non_exhaustive]
pub enum Error {
    /// A byte that is not a digit of the expected radix was found where a
    /// digit was required.
    ///
    /// `position` is the byte offset into the input as given by the caller,
    /// including any surrounding quotes or prefixes.
    #[error("malformed digit 0x{byte:02x} at position {position}")]
    MalformedDigit { byte: u8, position: usize },

    /// The decoded magnitude does not fit in 64 bits.
    #[error("value overflows 64 bits")]
    Overflow,

    /// The requested radix is outside `2..=36`.
    #[error("invalid radix: {radix}")]
    InvalidRadix { radix: u32 },

    /// The coercion adapter was handed a type it does not recognize.
    #[error("unsupported type: {type_name}")]
    UnsupportedType { type_name: &'static str },
}

impl Error {
    /// Shifts the reported position of a [`Error::MalformedDigit`] by
    /// `offset` bytes. Other variants are returned unchanged.
    pub(crate) fn offset_by(self, offset: usize) -> Self {
        match self {
            Self::MalformedDigit { byte, position } => Self::MalformedDigit {
                byte,
                position: position + offset,
            },
            other => other,
        }
    }
}
