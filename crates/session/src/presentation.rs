use hitcast_domain::{Feature, HitLabel};
use serde::{Deserialize, Serialize};

pub const DISPLAY_ORDER: [Feature; 10] = [
    Feature::Danceability,
    Feature::Energy,
    Feature::Loudness,
    Feature::Speechiness,
    Feature::Acousticness,
    Feature::Instrumentalness,
    Feature::Liveness,
    Feature::Valence,
    Feature::Tempo,
    Feature::DurationMs,
];

pub const RADAR_FEATURES: [Feature; 7] = [
    Feature::Danceability,
    Feature::Energy,
    Feature::Speechiness,
    Feature::Acousticness,
    Feature::Instrumentalness,
    Feature::Liveness,
    Feature::Valence,
];

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum GaugeTone {
    /// 50% or more.
    Hit,
    /// Above zero but under 50%.
    Miss,
    /// Nothing scored yet.
    Idle,
}

impl GaugeTone {
    pub fn from_percent(percent: f64) -> Self {
        if percent >= 50.0 {
            GaugeTone::Hit
        } else if percent > 0.0 {
            GaugeTone::Miss
        } else {
            GaugeTone::Idle
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Verdict {
    ChartBuster,
    NeedsWork,
}

impl Verdict {
    pub fn from_label(label: HitLabel) -> Self {
        match label {
            HitLabel::Hit => Verdict::ChartBuster,
            HitLabel::Miss => Verdict::NeedsWork,
        }
    }

    pub fn headline(self) -> &'static str {
        match self {
            Verdict::ChartBuster => "CHART BUSTER!",
            Verdict::NeedsWork => "Needs Work",
        }
    }

    pub fn detail(self) -> &'static str {
        match self {
            Verdict::ChartBuster => "This track has strong hit potential",
            Verdict::NeedsWork => "Consider adjusting key features",
        }
    }
}
