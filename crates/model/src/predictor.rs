use std::path::{Path, PathBuf};
use std::sync::Arc;

use hitcast_domain::{FeatureVector, HitClassifier, Prediction};
use tracing::{debug, error};

use crate::artifact::ModelArtifact;
use crate::error::ModelError;

pub struct Predictor {
    artifact: ModelArtifact,
}

impl Predictor {
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, ModelError> {
        ModelArtifact::load(path).map(Self::from_artifact)
    }

    pub fn from_artifact(artifact: ModelArtifact) -> Self {
        Self { artifact }
    }

    pub fn artifact(&self) -> &ModelArtifact {
        &self.artifact
    }

    pub fn predict(&self, features: &FeatureVector) -> Result<Prediction, ModelError> {
        features.check_finite()?;
        let prediction = self.artifact.forest.predict(features);
        debug!(
            label = ?prediction.label,
            probability = prediction.hit_probability,
            "scored feature vector"
        );
        Ok(prediction)
    }
}

impl HitClassifier for Predictor {
    fn classify(&self, features: &FeatureVector) -> anyhow::Result<Prediction> {
        Ok(self.predict(features)?)
    }
}

pub enum ModelStatus {
    Ready(Arc<Predictor>),
    Unavailable { path: PathBuf, reason: String },
}

impl ModelStatus {
    /// Any load failure (missing, corrupt, wrong schema) leaves the process
    /// without a model; there is no fallback.
    pub fn load<P: AsRef<Path>>(path: P) -> Self {
        let path = path.as_ref();
        match Predictor::load(path) {
            Ok(predictor) => ModelStatus::Ready(Arc::new(predictor)),
            Err(err) => {
                error!(path = %path.display(), error = %err, "model unavailable");
                ModelStatus::Unavailable {
                    path: path.to_path_buf(),
                    reason: err.to_string(),
                }
            }
        }
    }

    pub fn is_ready(&self) -> bool {
        matches!(self, ModelStatus::Ready(_))
    }

    pub fn predictor(&self) -> Result<&Arc<Predictor>, ModelError> {
        match self {
            ModelStatus::Ready(predictor) => Ok(predictor),
            ModelStatus::Unavailable { path, reason } => Err(ModelError::Unavailable {
                path: path.clone(),
                reason: reason.clone(),
            }),
        }
    }

    pub fn predict(&self, features: &FeatureVector) -> Result<Prediction, ModelError> {
        self.predictor()?.predict(features)
    }
}

impl HitClassifier for ModelStatus {
    fn classify(&self, features: &FeatureVector) -> anyhow::Result<Prediction> {
        Ok(self.predict(features)?)
    }
}
