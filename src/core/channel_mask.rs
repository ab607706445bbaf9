//! Channel identifiers and the per-record channel selection

use super::error::LoggerError;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Number of slots in the channel table
pub const CHANNEL_CAPACITY: usize = 16;

/// Index of a slot in the channel table. Id 0 is standard output.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub struct ChannelId(u8);

impl ChannelId {
    pub const STDOUT: ChannelId = ChannelId(0);

    /// Returns `None` when `raw` does not fit the channel table
    pub fn new(raw: usize) -> Option<Self> {
        (raw < CHANNEL_CAPACITY).then(|| ChannelId(raw as u8))
    }

    #[inline]
    pub fn index(self) -> usize {
        self.0 as usize
    }

    #[inline]
    pub fn raw(self) -> u8 {
        self.0
    }
}

impl TryFrom<u8> for ChannelId {
    type Error = LoggerError;

    fn try_from(raw: u8) -> Result<Self, Self::Error> {
        ChannelId::new(raw as usize).ok_or_else(|| LoggerError::invalid_channel(raw, CHANNEL_CAPACITY))
    }
}

impl From<ChannelId> for u8 {
    fn from(id: ChannelId) -> u8 {
        id.0
    }
}

impl fmt::Display for ChannelId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Fixed-width bit set of channel ids
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct ChannelMask(u16);

impl ChannelMask {
    pub const fn empty() -> Self {
        ChannelMask(0)
    }

    pub const fn stdout() -> Self {
        ChannelMask(1)
    }

    pub const fn all() -> Self {
        ChannelMask(u16::MAX)
    }

    pub const fn bits(self) -> u16 {
        self.0
    }

    #[must_use]
    pub fn with(mut self, id: ChannelId) -> Self {
        self.insert(id);
        self
    }

    pub fn insert(&mut self, id: ChannelId) {
        self.0 |= 1 << id.0;
    }

    pub fn remove(&mut self, id: ChannelId) {
        self.0 &= !(1 << id.0);
    }

    #[inline]
    pub fn contains(self, id: ChannelId) -> bool {
        self.0 & (1 << id.0) != 0
    }

    pub fn is_empty(self) -> bool {
        self.0 == 0
    }

    pub fn len(self) -> usize {
        self.0.count_ones() as usize
    }

    /// Selected ids in ascending order
    pub fn iter(self) -> impl Iterator<Item = ChannelId> {
        (0..CHANNEL_CAPACITY as u8)
            .map(ChannelId)
            .filter(move |id| self.contains(*id))
    }
}

impl FromIterator<ChannelId> for ChannelMask {
    fn from_iter<I: IntoIterator<Item = ChannelId>>(iter: I) -> Self {
        let mut mask = ChannelMask::empty();
        for id in iter {
            mask.insert(id);
        }
        mask
    }
}
