use serde::{Deserialize, Serialize};

use crate::error::DomainError;

/// Popularity score at or above which a track counts as a hit.
pub const HIT_THRESHOLD: f64 = 60.0;

#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(into = "u8", try_from = "u8")]
pub enum HitLabel {
    Miss = 0,
    Hit = 1,
}

impl HitLabel {
    pub fn from_popularity(popularity: f64) -> Self {
        if popularity >= HIT_THRESHOLD {
            HitLabel::Hit
        } else {
            HitLabel::Miss
        }
    }

    pub fn class_index(self) -> usize {
        self as usize
    }

    pub fn from_class_index(index: usize) -> Option<Self> {
        match index {
            0 => Some(HitLabel::Miss),
            1 => Some(HitLabel::Hit),
            _ => None,
        }
    }
}

impl From<HitLabel> for u8 {
    fn from(label: HitLabel) -> Self {
        label as u8
    }
}

impl TryFrom<u8> for HitLabel {
    type Error = DomainError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        HitLabel::from_class_index(value as usize)
            .ok_or_else(|| DomainError::validation(format!("label must be 0 or 1, got {value}")))
    }
}
