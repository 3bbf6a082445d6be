use serde::{Deserialize, Serialize};

use crate::error::DomainError;
use crate::schema::{Feature, FEATURE_COUNT};

#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq)]
pub struct FeatureVector {
    pub acousticness: f64,
    pub danceability: f64,
    pub duration_ms: u32,
    pub energy: f64,
    pub instrumentalness: f64,
    pub liveness: f64,
    pub loudness: f64,
    pub speechiness: f64,
    pub tempo: f64,
    pub valence: f64,
}

impl FeatureVector {
    pub fn default_profile() -> Self {
        Self {
            acousticness: 0.5,
            danceability: 0.7,
            duration_ms: 200_000,
            energy: 0.8,
            instrumentalness: 0.0,
            liveness: 0.15,
            loudness: -5.0,
            speechiness: 0.1,
            tempo: 120.0,
            valence: 0.5,
        }
    }

    /// Every feature at the lower bound of its domain.
    pub fn zeroed() -> Self {
        let min = |feature: Feature| feature.spec().min;
        Self {
            acousticness: min(Feature::Acousticness),
            danceability: min(Feature::Danceability),
            duration_ms: min(Feature::DurationMs) as u32,
            energy: min(Feature::Energy),
            instrumentalness: min(Feature::Instrumentalness),
            liveness: min(Feature::Liveness),
            loudness: min(Feature::Loudness),
            speechiness: min(Feature::Speechiness),
            tempo: min(Feature::Tempo),
            valence: min(Feature::Valence),
        }
    }

    pub fn get(&self, feature: Feature) -> f64 {
        match feature {
            Feature::Acousticness => self.acousticness,
            Feature::Danceability => self.danceability,
            Feature::DurationMs => f64::from(self.duration_ms),
            Feature::Energy => self.energy,
            Feature::Instrumentalness => self.instrumentalness,
            Feature::Liveness => self.liveness,
            Feature::Loudness => self.loudness,
            Feature::Speechiness => self.speechiness,
            Feature::Tempo => self.tempo,
            Feature::Valence => self.valence,
        }
    }

    /// `duration_ms` is rounded to whole milliseconds and must fit a `u32`;
    /// the other features are stored as given.
    pub fn set(&mut self, feature: Feature, value: f64) -> Result<(), DomainError> {
        match feature {
            Feature::Acousticness => self.acousticness = value,
            Feature::Danceability => self.danceability = value,
            Feature::DurationMs => self.duration_ms = whole_millis(value)?,
            Feature::Energy => self.energy = value,
            Feature::Instrumentalness => self.instrumentalness = value,
            Feature::Liveness => self.liveness = value,
            Feature::Loudness => self.loudness = value,
            Feature::Speechiness => self.speechiness = value,
            Feature::Tempo => self.tempo = value,
            Feature::Valence => self.valence = value,
        }
        Ok(())
    }

    pub fn get_named(&self, name: &str) -> Result<f64, DomainError> {
        let feature =
            Feature::from_name(name).ok_or_else(|| DomainError::UnknownFeature(name.into()))?;
        Ok(self.get(feature))
    }

    pub fn set_named(&mut self, name: &str, value: f64) -> Result<(), DomainError> {
        let feature =
            Feature::from_name(name).ok_or_else(|| DomainError::UnknownFeature(name.into()))?;
        self.set(feature, value)
    }

    pub fn to_row(&self) -> [f64; FEATURE_COUNT] {
        Feature::ALL.map(|feature| self.get(feature))
    }

    pub fn from_row(row: [f64; FEATURE_COUNT]) -> Result<Self, DomainError> {
        let mut vector = Self::default_profile();
        for (feature, value) in Feature::ALL.into_iter().zip(row) {
            vector.set(feature, value)?;
        }
        Ok(vector)
    }

    /// Build a vector from a name to value mapping. Every schema feature must
    /// appear exactly once and no other names are accepted.
    pub fn from_named<I, S>(values: I) -> Result<Self, DomainError>
    where
        I: IntoIterator<Item = (S, f64)>,
        S: AsRef<str>,
    {
        let mut slots: [Option<f64>; FEATURE_COUNT] = [None; FEATURE_COUNT];
        for (name, value) in values {
            let name = name.as_ref();
            let feature =
                Feature::from_name(name).ok_or_else(|| DomainError::UnknownFeature(name.into()))?;
            let slot = &mut slots[feature.index()];
            if slot.is_some() {
                return Err(DomainError::validation(format!(
                    "feature `{name}` given more than once"
                )));
            }
            *slot = Some(value);
        }

        let mut row = [0.0; FEATURE_COUNT];
        for (feature, slot) in Feature::ALL.into_iter().zip(slots) {
            row[feature.index()] = slot.ok_or(DomainError::MissingFeature(feature.name()))?;
        }
        Self::from_row(row)
    }

    pub fn iter(&self) -> impl Iterator<Item = (Feature, f64)> + '_ {
        Feature::ALL.into_iter().map(move |feature| (feature, self.get(feature)))
    }

    pub fn check_finite(&self) -> Result<(), DomainError> {
        match self.iter().find(|(_, value)| !value.is_finite()) {
            Some((feature, value)) => Err(DomainError::NonFinite {
                feature: feature.name(),
                value,
            }),
            None => Ok(()),
        }
    }

    /// First feature outside its documented domain, if any. Inference does not
    /// require this; input surfaces use it to reject slider-impossible values.
    pub fn check_bounds(&self) -> Result<(), DomainError> {
        self.check_finite()?;
        for (feature, value) in self.iter() {
            let spec = feature.spec();
            if !spec.contains(value) {
                return Err(DomainError::OutOfBounds {
                    feature: spec.name,
                    value,
                    min: spec.min,
                    max: spec.max,
                });
            }
        }
        Ok(())
    }
}

fn whole_millis(value: f64) -> Result<u32, DomainError> {
    if !value.is_finite() {
        return Err(DomainError::NonFinite {
            feature: Feature::DurationMs.name(),
            value,
        });
    }
    let rounded = value.round();
    if rounded < 0.0 || rounded > f64::from(u32::MAX) {
        return Err(DomainError::validation(format!(
            "duration_ms = {value} is not a whole number of milliseconds"
        )));
    }
    Ok(rounded as u32)
}

impl Default for FeatureVector {
    fn default() -> Self {
        Self::default_profile()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::FEATURE_SCHEMA;

    #[test]
    fn row_follows_schema_order() {
        let mut vector = FeatureVector::zeroed();
        for (index, spec) in FEATURE_SCHEMA.specs().iter().enumerate() {
            vector.set_named(spec.name, spec.max).unwrap();
            assert_eq!(vector.to_row()[index], spec.max, "{}", spec.name);
        }
    }

    #[test]
    fn zeroed_profile_uses_lower_bounds() {
        let zeroed = FeatureVector::zeroed();
        assert_eq!(zeroed.loudness, -60.0);
        assert_eq!(zeroed.duration_ms, 20_000);
        assert_eq!(zeroed.tempo, 0.0);
        assert_eq!(zeroed.danceability, 0.0);
        assert!(zeroed.check_bounds().is_ok());
    }

    #[test]
    fn default_profile_is_within_bounds() {
        let profile = FeatureVector::default();
        assert_eq!(profile.danceability, 0.7);
        assert_eq!(profile.duration_ms, 200_000);
        assert!(profile.check_bounds().is_ok());
    }

    #[test]
    fn from_named_requires_every_feature_once() {
        let complete: Vec<(&str, f64)> = FEATURE_SCHEMA.names().map(|name| (name, 0.5)).collect();

        let missing = &complete[1..];
        assert_eq!(
            FeatureVector::from_named(missing.iter().copied()),
            Err(DomainError::MissingFeature("acousticness"))
        );

        let mut unknown = complete.clone();
        unknown.push(("track_popularity", 80.0));
        assert_eq!(
            FeatureVector::from_named(unknown),
            Err(DomainError::UnknownFeature("track_popularity".into()))
        );

        let mut duplicated = complete.clone();
        duplicated.push(("tempo", 90.0));
        assert!(FeatureVector::from_named(duplicated).is_err());

        let mut reversed = complete;
        reversed.reverse();
        let vector = FeatureVector::from_named(reversed).unwrap();
        assert_eq!(vector.tempo, 0.5);
        assert_eq!(vector.duration_ms, 1);
    }

    #[test]
    fn integer_feature_is_rounded() {
        let vector =
            FeatureVector::from_row([0.0, 0.0, 201_499.6, 0.0, 0.0, 0.0, -6.0, 0.0, 0.0, 0.0])
                .unwrap();
        assert_eq!(vector.duration_ms, 201_500);
    }

    #[test]
    fn unrepresentable_duration_is_rejected() {
        let named = |duration: f64| {
            FEATURE_SCHEMA.names().map(move |name| {
                let value = if name == "duration_ms" { duration } else { 0.5 };
                (name, value)
            })
        };

        assert!(matches!(
            FeatureVector::from_named(named(f64::NAN)),
            Err(DomainError::NonFinite { feature: "duration_ms", .. })
        ));
        assert!(matches!(
            FeatureVector::from_named(named(f64::INFINITY)),
            Err(DomainError::NonFinite { feature: "duration_ms", .. })
        ));
        assert!(matches!(
            FeatureVector::from_named(named(-5.0)),
            Err(DomainError::Validation(_))
        ));
        assert!(matches!(
            FeatureVector::from_named(named(1e12)),
            Err(DomainError::Validation(_))
        ));
        assert_eq!(FeatureVector::from_named(named(-0.4)).unwrap().duration_ms, 0);

        let mut vector = FeatureVector::default_profile();
        assert!(vector.set(Feature::DurationMs, f64::NAN).is_err());
        assert_eq!(vector.duration_ms, 200_000);
    }

    #[test]
    fn bounds_and_finiteness_checks() {
        let mut vector = FeatureVector::default_profile();
        vector.tempo = 251.0;
        assert!(matches!(
            vector.check_bounds(),
            Err(DomainError::OutOfBounds { feature: "tempo", .. })
        ));

        vector.tempo = f64::NAN;
        assert!(vector.check_finite().is_err());

        assert!(vector.get_named("bpm").is_err());
    }
}
