use std::fs::File;
use std::io::Read;
use std::path::Path;

use hitcast_domain::{Feature, FeatureVector, HitLabel, FEATURE_COUNT, FEATURE_SCHEMA};
use ndarray::{Array1, Array2, ArrayView1, ArrayView2, Axis};
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;
use tracing::info;

use crate::error::ModelError;

pub const DEFAULT_DATASET_PATH: &str = "spotify_songs.csv";
pub const POPULARITY_COLUMN: &str = "track_popularity";

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ClassBalance {
    pub hits: usize,
    pub misses: usize,
}

#[derive(Clone, Debug)]
pub struct TrainingSet {
    records: Array2<f64>,
    labels: Array1<usize>,
}

impl TrainingSet {
    pub fn from_csv_path<P: AsRef<Path>>(path: P) -> Result<Self, ModelError> {
        let path = path.as_ref();
        let file = File::open(path).map_err(|err| ModelError::io(path, err))?;
        let set = Self::from_csv_reader(file)?;
        info!(path = %path.display(), rows = set.len(), "loaded dataset");
        Ok(set)
    }

    /// Columns are located by header name, so their order in the file does
    /// not matter and extra columns are ignored. Cells are not imputed: an
    /// empty or non-numeric value rejects the whole dataset.
    pub fn from_csv_reader<R: Read>(reader: R) -> Result<Self, ModelError> {
        let mut csv = csv::Reader::from_reader(reader);
        let headers = csv
            .headers()
            .map_err(|err| ModelError::malformed(format!("unreadable header: {err}")))?
            .clone();
        let position = |name: &str| headers.iter().position(|header| header.trim() == name);

        let mut columns = Vec::with_capacity(FEATURE_COUNT + 1);
        let mut missing = Vec::new();
        for name in FEATURE_SCHEMA.names().chain([POPULARITY_COLUMN]) {
            match position(name) {
                Some(index) => columns.push((name, index)),
                None => missing.push(name),
            }
        }
        if !missing.is_empty() {
            return Err(ModelError::malformed(format!(
                "missing columns: {}",
                missing.join(", ")
            )));
        }

        let mut values = Vec::new();
        let mut labels = Vec::new();
        for record in csv.records() {
            let record = record.map_err(|err| ModelError::malformed(err.to_string()))?;
            let line = record.position().map(|pos| pos.line()).unwrap_or_default();
            for &(name, index) in &columns {
                let cell = record.get(index).unwrap_or_default().trim();
                let value = cell
                    .parse::<f64>()
                    .ok()
                    .filter(|value| value.is_finite())
                    .ok_or_else(|| {
                        ModelError::malformed(format!(
                            "line {line}: column `{name}` has non-numeric value {cell:?}"
                        ))
                    })?;
                if name == POPULARITY_COLUMN {
                    labels.push(HitLabel::from_popularity(value).class_index());
                } else if name == Feature::DurationMs.name() {
                    // Whole milliseconds, as stored in `FeatureVector::duration_ms`.
                    values.push(value.round());
                } else {
                    values.push(value);
                }
            }
        }
        Self::from_parts(values, labels)
    }

    pub fn from_examples(examples: &[(FeatureVector, f64)]) -> Result<Self, ModelError> {
        let mut values = Vec::with_capacity(examples.len() * FEATURE_COUNT);
        let mut labels = Vec::with_capacity(examples.len());
        for (features, popularity) in examples {
            values.extend_from_slice(&features.to_row());
            labels.push(HitLabel::from_popularity(*popularity).class_index());
        }
        Self::from_parts(values, labels)
    }

    fn from_parts(values: Vec<f64>, labels: Vec<usize>) -> Result<Self, ModelError> {
        if labels.is_empty() {
            return Err(ModelError::malformed("dataset has no rows"));
        }
        let records = Array2::from_shape_vec((labels.len(), FEATURE_COUNT), values)
            .map_err(|err| ModelError::malformed(err.to_string()))?;
        Ok(Self {
            records,
            labels: Array1::from(labels),
        })
    }

    pub fn len(&self) -> usize {
        self.labels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.labels.is_empty()
    }

    pub fn records(&self) -> ArrayView2<'_, f64> {
        self.records.view()
    }

    pub fn labels(&self) -> ArrayView1<'_, usize> {
        self.labels.view()
    }

    pub fn class_balance(&self) -> ClassBalance {
        let hits = self
            .labels
            .iter()
            .filter(|&&label| label == HitLabel::Hit.class_index())
            .count();
        ClassBalance {
            hits,
            misses: self.len() - hits,
        }
    }

    /// Shuffle rows with `seed` and set aside `fraction` of them.
    /// Returns `(train, holdout)`.
    pub fn split_holdout(&self, fraction: f64, seed: u64) -> Result<(Self, Self), ModelError> {
        if !(fraction > 0.0 && fraction < 1.0) {
            return Err(hitcast_domain::DomainError::validation(format!(
                "holdout fraction must be between 0 and 1, got {fraction}"
            ))
            .into());
        }
        let held = (self.len() as f64 * fraction).round() as usize;
        if held == 0 || held == self.len() {
            return Err(ModelError::malformed(format!(
                "{} rows are too few for a {fraction} holdout",
                self.len()
            )));
        }

        let mut order: Vec<usize> = (0..self.len()).collect();
        order.shuffle(&mut StdRng::seed_from_u64(seed));
        let (holdout, train) = order.split_at(held);
        Ok((self.select(train), self.select(holdout)))
    }

    fn select(&self, rows: &[usize]) -> Self {
        Self {
            records: self.records.select(Axis(0), rows),
            labels: self.labels.select(Axis(0), rows),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{synthetic_csv, synthetic_examples};

    #[test]
    fn reads_columns_by_name() {
        let csv = synthetic_csv(&synthetic_examples(20));
        let set = TrainingSet::from_csv_reader(csv.as_bytes()).unwrap();
        let direct = TrainingSet::from_examples(&synthetic_examples(20)).unwrap();
        assert_eq!(set.len(), 20);
        assert_eq!(set.records(), direct.records());
        assert_eq!(set.labels(), direct.labels());
    }

    #[test]
    fn missing_columns_are_reported() {
        let csv = "track_name,danceability,energy,track_popularity\nsong,0.5,0.5,70\n";
        let err = TrainingSet::from_csv_reader(csv.as_bytes()).unwrap_err();
        match err {
            ModelError::DatasetMalformed(message) => {
                assert!(message.contains("acousticness"));
                assert!(message.contains("valence"));
                assert!(!message.contains("danceability"));
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn empty_cells_are_not_imputed() {
        let header = FEATURE_SCHEMA
            .names()
            .chain([POPULARITY_COLUMN])
            .collect::<Vec<_>>()
            .join(",");
        let csv = format!("{header}\n0.1,0.2,200000,0.3,0,0.1,-5,0.05,120,0.4,65\n0.1,,200000,0.3,0,0.1,-5,0.05,120,0.4,65\n");
        let err = TrainingSet::from_csv_reader(csv.as_bytes()).unwrap_err();
        assert!(err.to_string().contains("danceability"), "{err}");
        assert!(err.to_string().contains("line 3"), "{err}");
    }

    #[test]
    fn duration_is_rounded_like_inference_input() {
        let header = FEATURE_SCHEMA
            .names()
            .chain([POPULARITY_COLUMN])
            .collect::<Vec<_>>()
            .join(",");
        let csv = format!("{header}\n0.1,0.2,201499.6,0.3,0,0.1,-5,0.05,120.4,0.4,65\n");
        let set = TrainingSet::from_csv_reader(csv.as_bytes()).unwrap();
        let column = Feature::DurationMs.index();
        assert_eq!(set.records()[[0, column]], 201_500.0);
        assert_eq!(set.records()[[0, Feature::Tempo.index()]], 120.4);

        let mut features = FeatureVector::default_profile();
        features.set(Feature::DurationMs, 201_499.6).unwrap();
        assert_eq!(features.to_row()[column], set.records()[[0, column]]);
    }

    #[test]
    fn header_only_dataset_is_rejected() {
        let header = FEATURE_SCHEMA
            .names()
            .chain([POPULARITY_COLUMN])
            .collect::<Vec<_>>()
            .join(",");
        let err = TrainingSet::from_csv_reader(header.as_bytes()).unwrap_err();
        assert!(matches!(err, ModelError::DatasetMalformed(_)));
    }

    #[test]
    fn missing_file_is_io_error() {
        let err = TrainingSet::from_csv_path("does-not-exist.csv").unwrap_err();
        assert!(matches!(err, ModelError::Io { .. }));
    }

    #[test]
    fn class_balance_uses_threshold() {
        let set = TrainingSet::from_examples(&[
            (FeatureVector::default(), 60.0),
            (FeatureVector::default(), 59.0),
            (FeatureVector::default(), 90.0),
        ])
        .unwrap();
        assert_eq!(set.class_balance(), ClassBalance { hits: 2, misses: 1 });
    }

    #[test]
    fn holdout_split_partitions_rows() {
        let set = TrainingSet::from_examples(&synthetic_examples(50)).unwrap();
        let (train, holdout) = set.split_holdout(0.2, 42).unwrap();
        assert_eq!(holdout.len(), 10);
        assert_eq!(train.len(), 40);

        let (again, _) = set.split_holdout(0.2, 42).unwrap();
        assert_eq!(again.records(), train.records());

        assert!(set.split_holdout(0.0, 42).is_err());
        assert!(set.split_holdout(1.0, 42).is_err());
    }
}
