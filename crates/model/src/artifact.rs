use std::fs::File;
use std::io::{BufWriter, ErrorKind, Write};
use std::path::Path;

use hitcast_domain::{HIT_THRESHOLD, FEATURE_SCHEMA};
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use crate::error::ModelError;
use crate::forest::HitForest;

pub const DEFAULT_ARTIFACT_PATH: &str = "spotify_model.bin";

const MAGIC: &[u8; 8] = b"HITCAST\x01";

#[derive(Serialize, Deserialize)]
pub struct ModelArtifact {
    pub schema: Vec<String>,
    pub hit_threshold: f64,
    pub trained_rows: usize,
    pub forest: HitForest,
}

impl ModelArtifact {
    pub fn new(forest: HitForest, trained_rows: usize) -> Self {
        Self {
            schema: FEATURE_SCHEMA.owned_names(),
            hit_threshold: HIT_THRESHOLD,
            trained_rows,
            forest,
        }
    }

    pub fn to_bytes(&self) -> Result<Vec<u8>, ModelError> {
        let mut bytes = MAGIC.to_vec();
        bincode::serialize_into(&mut bytes, self).map_err(|err| ModelError::Encode(err.to_string()))?;
        Ok(bytes)
    }

    /// `origin` only labels errors.
    pub fn from_bytes(bytes: &[u8], origin: &Path) -> Result<Self, ModelError> {
        let corrupt = |reason: String| ModelError::ArtifactCorrupt {
            path: origin.to_path_buf(),
            reason,
        };
        let payload = bytes
            .strip_prefix(MAGIC.as_slice())
            .ok_or_else(|| corrupt("not a hitcast model file".into()))?;
        let artifact: ModelArtifact =
            bincode::deserialize(payload).map_err(|err| corrupt(err.to_string()))?;

        if !FEATURE_SCHEMA.matches(&artifact.schema) {
            return Err(ModelError::SchemaMismatch {
                expected: FEATURE_SCHEMA.owned_names(),
                found: artifact.schema,
            });
        }
        if artifact.forest.tree_count() == 0 {
            return Err(corrupt("artifact holds no trees".into()));
        }
        if artifact.hit_threshold != HIT_THRESHOLD {
            warn!(
                threshold = artifact.hit_threshold,
                expected = HIT_THRESHOLD,
                "artifact was labeled with a different popularity threshold"
            );
        }
        Ok(artifact)
    }

    /// Overwrites `path` in place. A crash mid-write leaves a truncated file
    /// that later fails to load as corrupt.
    pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<(), ModelError> {
        let path = path.as_ref();
        let bytes = self.to_bytes()?;
        let file = File::create(path).map_err(|err| ModelError::io(path, err))?;
        let mut writer = BufWriter::new(file);
        writer
            .write_all(&bytes)
            .and_then(|_| writer.flush())
            .map_err(|err| ModelError::io(path, err))?;
        info!(path = %path.display(), bytes = bytes.len(), trees = self.forest.tree_count(), "saved model artifact");
        Ok(())
    }

    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, ModelError> {
        let path = path.as_ref();
        let bytes = match std::fs::read(path) {
            Ok(bytes) => bytes,
            Err(err) if err.kind() == ErrorKind::NotFound => {
                return Err(ModelError::ArtifactMissing {
                    path: path.to_path_buf(),
                })
            }
            Err(err) => return Err(ModelError::io(path, err)),
        };
        let artifact = Self::from_bytes(&bytes, path)?;
        info!(path = %path.display(), trees = artifact.forest.tree_count(), rows = artifact.trained_rows, "loaded model artifact");
        Ok(artifact)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dataset::TrainingSet;
    use crate::forest::ForestParams;
    use crate::testing::{probe, synthetic_examples};

    fn fitted() -> ModelArtifact {
        let set = TrainingSet::from_examples(&synthetic_examples(100)).unwrap();
        let params = ForestParams {
            n_trees: 10,
            ..Default::default()
        };
        let forest = HitForest::fit(set.records(), set.labels(), &params).unwrap();
        ModelArtifact::new(forest, set.len())
    }

    #[test]
    fn save_then_load_predicts_identically() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("model.bin");
        let artifact = fitted();
        artifact.save(&path).unwrap();
        let restored = ModelArtifact::load(&path).unwrap();

        assert_eq!(restored.trained_rows, 100);
        assert_eq!(restored.schema, FEATURE_SCHEMA.owned_names());
        let battery = [0.0, 0.1, 0.45, 0.55, 0.9, 1.0].map(probe);
        for features in &battery {
            assert_eq!(
                artifact.forest.predict(features),
                restored.forest.predict(features)
            );
        }
    }

    #[test]
    fn missing_file_is_reported_as_missing() {
        let dir = tempfile::tempdir().unwrap();
        let err = ModelArtifact::load(dir.path().join("absent.bin")).err().unwrap();
        assert!(matches!(err, ModelError::ArtifactMissing { .. }));
    }

    #[test]
    fn truncated_file_is_corrupt() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("model.bin");
        let bytes = fitted().to_bytes().unwrap();
        std::fs::write(&path, &bytes[..bytes.len() / 2]).unwrap();
        let err = ModelArtifact::load(&path).err().unwrap();
        assert!(matches!(err, ModelError::ArtifactCorrupt { .. }));

        std::fs::write(&path, b"joblib pickle").unwrap();
        let err = ModelArtifact::load(&path).err().unwrap();
        assert!(matches!(err, ModelError::ArtifactCorrupt { .. }));
    }

    #[test]
    fn reordered_schema_is_rejected() {
        let mut artifact = fitted();
        artifact.schema.swap(2, 3);
        let bytes = artifact.to_bytes().unwrap();
        let err = ModelArtifact::from_bytes(&bytes, Path::new("memory")).err().unwrap();
        match err {
            ModelError::SchemaMismatch { found, expected } => {
                assert_eq!(found[2], "energy");
                assert_eq!(expected[2], "duration_ms");
            }
            other => panic!("unexpected error: {other}"),
        }
    }
}
