use serde::{Deserialize, Serialize};

pub const FEATURE_COUNT: usize = 10;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum FeatureKind {
    Continuous,
    Integer,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct FeatureSpec {
    pub name: &'static str,
    pub kind: FeatureKind,
    pub min: f64,
    pub max: f64,
    pub step: f64,
    pub unit: Option<&'static str>,
    pub description: &'static str,
}

impl FeatureSpec {
    pub fn contains(&self, value: f64) -> bool {
        (self.min..=self.max).contains(&value)
    }

    pub fn clamp(&self, value: f64) -> f64 {
        let clamped = value.clamp(self.min, self.max);
        match self.kind {
            FeatureKind::Integer => clamped.round(),
            FeatureKind::Continuous => clamped,
        }
    }

    pub fn display_label(&self) -> String {
        let mut title = String::with_capacity(self.name.len() + 8);
        let mut upper = true;
        for ch in self.name.chars() {
            if ch == '_' {
                title.push(' ');
                upper = true;
            } else if upper {
                title.extend(ch.to_uppercase());
                upper = false;
            } else {
                title.push(ch);
            }
        }
        match self.unit {
            Some(unit) => format!("{title} ({unit})"),
            None => title,
        }
    }
}

/// Ordered feature layout shared by training and inference. The trained
/// ensemble only sees column positions, so this order is the contract.
#[derive(Debug)]
pub struct FeatureSchema {
    specs: [FeatureSpec; FEATURE_COUNT],
}

impl FeatureSchema {
    pub fn specs(&self) -> &[FeatureSpec; FEATURE_COUNT] {
        &self.specs
    }

    pub fn spec(&self, feature: Feature) -> &FeatureSpec {
        &self.specs[feature.index()]
    }

    pub fn names(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.specs.iter().map(|spec| spec.name)
    }

    pub fn owned_names(&self) -> Vec<String> {
        self.names().map(str::to_owned).collect()
    }

    pub fn index_of(&self, name: &str) -> Option<usize> {
        self.specs.iter().position(|spec| spec.name == name)
    }

    /// True when `names` lists exactly the schema's features in schema order.
    pub fn matches<S: AsRef<str>>(&self, names: &[S]) -> bool {
        names.len() == FEATURE_COUNT
            && names
                .iter()
                .zip(self.names())
                .all(|(given, expected)| given.as_ref() == expected)
    }
}

pub static FEATURE_SCHEMA: FeatureSchema = FeatureSchema {
    specs: [
        FeatureSpec {
            name: "acousticness",
            kind: FeatureKind::Continuous,
            min: 0.0,
            max: 1.0,
            step: 0.01,
            unit: None,
            description: "Confidence measure of whether the track is acoustic",
        },
        FeatureSpec {
            name: "danceability",
            kind: FeatureKind::Continuous,
            min: 0.0,
            max: 1.0,
            step: 0.01,
            unit: None,
            description:
                "How suitable a track is for dancing (0.0 = least danceable, 1.0 = most danceable)",
        },
        FeatureSpec {
            name: "duration_ms",
            kind: FeatureKind::Integer,
            min: 20_000.0,
            max: 500_000.0,
            step: 1_000.0,
            unit: Some("ms"),
            description: "Duration of the track in milliseconds",
        },
        FeatureSpec {
            name: "energy",
            kind: FeatureKind::Continuous,
            min: 0.0,
            max: 1.0,
            step: 0.01,
            unit: None,
            description:
                "Perceptual measure of intensity and power (0.0 = low energy, 1.0 = high energy)",
        },
        FeatureSpec {
            name: "instrumentalness",
            kind: FeatureKind::Continuous,
            min: 0.0,
            max: 1.0,
            step: 0.01,
            unit: None,
            description: "Predicts whether a track contains no vocals",
        },
        FeatureSpec {
            name: "liveness",
            kind: FeatureKind::Continuous,
            min: 0.0,
            max: 1.0,
            step: 0.01,
            unit: None,
            description: "Detects the presence of an audience in the recording",
        },
        FeatureSpec {
            name: "loudness",
            kind: FeatureKind::Continuous,
            min: -60.0,
            max: 0.0,
            step: 0.1,
            unit: Some("dB"),
            description: "Overall loudness of a track in decibels (dB)",
        },
        FeatureSpec {
            name: "speechiness",
            kind: FeatureKind::Continuous,
            min: 0.0,
            max: 1.0,
            step: 0.01,
            unit: None,
            description: "Presence of spoken words (0.0 = music, 1.0 = speech)",
        },
        FeatureSpec {
            name: "tempo",
            kind: FeatureKind::Continuous,
            min: 0.0,
            max: 250.0,
            step: 1.0,
            unit: Some("BPM"),
            description: "Overall estimated tempo in beats per minute (BPM)",
        },
        FeatureSpec {
            name: "valence",
            kind: FeatureKind::Continuous,
            min: 0.0,
            max: 1.0,
            step: 0.01,
            unit: None,
            description: "Musical positiveness (0.0 = sad/angry, 1.0 = happy/euphoric)",
        },
    ],
};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Feature {
    Acousticness = 0,
    Danceability = 1,
    DurationMs = 2,
    Energy = 3,
    Instrumentalness = 4,
    Liveness = 5,
    Loudness = 6,
    Speechiness = 7,
    Tempo = 8,
    Valence = 9,
}

impl Feature {
    pub const ALL: [Feature; FEATURE_COUNT] = [
        Feature::Acousticness,
        Feature::Danceability,
        Feature::DurationMs,
        Feature::Energy,
        Feature::Instrumentalness,
        Feature::Liveness,
        Feature::Loudness,
        Feature::Speechiness,
        Feature::Tempo,
        Feature::Valence,
    ];

    pub fn index(self) -> usize {
        self as usize
    }

    pub fn spec(self) -> &'static FeatureSpec {
        FEATURE_SCHEMA.spec(self)
    }

    pub fn name(self) -> &'static str {
        self.spec().name
    }

    pub fn from_name(name: &str) -> Option<Self> {
        FEATURE_SCHEMA.index_of(name).map(|index| Self::ALL[index])
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn schema_order_is_pinned() {
        let names: Vec<_> = FEATURE_SCHEMA.names().collect();
        assert_eq!(
            names,
            [
                "acousticness",
                "danceability",
                "duration_ms",
                "energy",
                "instrumentalness",
                "liveness",
                "loudness",
                "speechiness",
                "tempo",
                "valence",
            ]
        );
    }

    #[test]
    fn feature_handles_follow_schema_positions() {
        for (index, feature) in Feature::ALL.iter().enumerate() {
            assert_eq!(feature.index(), index);
            assert_eq!(Feature::from_name(feature.name()), Some(*feature));
        }
        assert_eq!(Feature::from_name("popularity"), None);
    }

    #[test]
    fn serde_names_match_schema_names() {
        for feature in Feature::ALL {
            let json = serde_json::to_string(&feature).unwrap();
            assert_eq!(json, format!("\"{}\"", feature.name()));
        }
    }

    #[test]
    fn matches_rejects_reordered_names() {
        let mut names = FEATURE_SCHEMA.owned_names();
        assert!(FEATURE_SCHEMA.matches(&names));
        names.swap(0, 1);
        assert!(!FEATURE_SCHEMA.matches(&names));
        names.swap(0, 1);
        names.pop();
        assert!(!FEATURE_SCHEMA.matches(&names));
    }

    #[test]
    fn spec_bounds_and_labels() {
        let duration = Feature::DurationMs.spec();
        assert!(duration.contains(20_000.0));
        assert!(duration.contains(500_000.0));
        assert!(!duration.contains(19_999.0));
        assert_eq!(duration.clamp(123_456.7), 123_457.0);
        assert_eq!(duration.display_label(), "Duration Ms (ms)");
        assert_eq!(Feature::Loudness.spec().display_label(), "Loudness (dB)");
        assert_eq!(Feature::Valence.spec().display_label(), "Valence");
    }
}
