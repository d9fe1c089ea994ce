use crate::Snowflake;
use core::time::Duration;
use std::time::{SystemTime, UNIX_EPOCH};

/// Discord epoch: Thursday, January 1, 2015 00:00:00 UTC
pub const DISCORD_EPOCH: Duration = Duration::from_millis(1_420_070_400_000);

/// Twitter epoch: Thursday, November 4, 2010 1:42:54.657 UTC
pub const TWITTER_EPOCH: Duration = Duration::from_millis(1_288_834_974_657);

/// The epoch used by [`Snowflake::date`]: [`DISCORD_EPOCH`], or
/// [`TWITTER_EPOCH`] when the `twitter-epoch` feature is enabled.
#[cfg(not(feature = "twitter-epoch"))]
pub const DEFAULT_EPOCH: Duration = DISCORD_EPOCH;

/// The epoch used by [`Snowflake::date`]: [`DISCORD_EPOCH`], or
/// [`TWITTER_EPOCH`] when the `twitter-epoch` feature is enabled.
#[cfg(feature = "twitter-epoch")]
pub const DEFAULT_EPOCH: Duration = TWITTER_EPOCH;

fn epoch_millis(epoch: Duration) -> u64 {
    u64::try_from(epoch.as_millis()).unwrap_or(u64::MAX)
}

impl Snowflake {
    /// Returns the creation time in milliseconds since the Unix epoch: the
    /// timestamp field plus `epoch`.
    ///
    /// # Example
    ///
    /// ```
    /// use snowcodec::{DISCORD_EPOCH, Snowflake};
    ///
    /// let id = Snowflake::from_raw(228_846_961_774_559_232);
    /// assert_eq!(id.unix_millis_with_epoch(DISCORD_EPOCH), 1_474_631_767_458);
    /// ```
    #[must_use]
    pub fn unix_millis_with_epoch(&self, epoch: Duration) -> u64 {
        self.timestamp().saturating_add(epoch_millis(epoch))
    }

    /// Returns the creation time in whole seconds since the Unix epoch,
    /// truncating the millisecond part.
    #[must_use]
    pub fn unix_secs_with_epoch(&self, epoch: Duration) -> u64 {
        self.unix_millis_with_epoch(epoch) / 1000
    }

    /// Returns the creation time with millisecond precision.
    #[must_use]
    pub fn date_with_epoch(&self, epoch: Duration) -> SystemTime {
        UNIX_EPOCH + Duration::from_millis(self.unix_millis_with_epoch(epoch))
    }

    /// Returns the creation time truncated to whole seconds.
    #[must_use]
    pub fn date_secs_with_epoch(&self, epoch: Duration) -> SystemTime {
        UNIX_EPOCH + Duration::from_secs(self.unix_secs_with_epoch(epoch))
    }

    /// Creation time of a Discord-style ID.
    #[must_use]
    pub fn discord_date(&self) -> SystemTime {
        self.date_with_epoch(DISCORD_EPOCH)
    }

    /// Creation time of a Twitter-style ID.
    #[must_use]
    pub fn twitter_date(&self) -> SystemTime {
        self.date_with_epoch(TWITTER_EPOCH)
    }

    /// Creation time against [`DEFAULT_EPOCH`].
    #[must_use]
    pub fn date(&self) -> SystemTime {
        self.date_with_epoch(DEFAULT_EPOCH)
    }

    /// Creation time against [`DEFAULT_EPOCH`], truncated to whole seconds.
    #[must_use]
    pub fn date_secs(&self) -> SystemTime {
        self.date_secs_with_epoch(DEFAULT_EPOCH)
    }

    /// Builds the smallest ID whose creation time is `unix_millis` under
    /// `epoch`, with all metadata bits zero.
    ///
    /// This is a range bound for queries such as "IDs created after T", not a
    /// unique ID. Times before `epoch` clamp to [`Snowflake::EMPTY`]; times
    /// past the 42-bit timestamp range wrap.
    ///
    /// # Example
    ///
    /// ```
    /// use snowcodec::{DISCORD_EPOCH, Snowflake};
    ///
    /// let bound = Snowflake::from_unix_millis_with_epoch(1_474_631_767_458, DISCORD_EPOCH);
    /// assert!(bound <= Snowflake::from_raw(228_846_961_774_559_232));
    /// assert_eq!(bound.timestamp(), 54_561_367_458);
    /// ```
    #[must_use]
    pub fn from_unix_millis_with_epoch(unix_millis: u64, epoch: Duration) -> Self {
        let since_epoch = unix_millis.saturating_sub(epoch_millis(epoch));
        Self::from_raw((since_epoch & Self::TIMESTAMP_MASK) << Self::TIMESTAMP_SHIFT)
    }

    /// Same as [`Snowflake::from_unix_millis_with_epoch`] for a
    /// [`SystemTime`]. Times before the Unix epoch clamp to
    /// [`Snowflake::EMPTY`].
    #[must_use]
    pub fn from_datetime_with_epoch(datetime: SystemTime, epoch: Duration) -> Self {
        let unix_millis = datetime
            .duration_since(UNIX_EPOCH)
            .unwrap_or(Duration::ZERO)
            .as_millis();
        Self::from_unix_millis_with_epoch(u64::try_from(unix_millis).unwrap_or(u64::MAX), epoch)
    }
}
