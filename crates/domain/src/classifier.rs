use anyhow::Result;

use crate::features::FeatureVector;
use crate::prediction::Prediction;

/// Anything that can score a feature vector. Implemented by the trained
/// ensemble; session logic depends only on this seam.
pub trait HitClassifier {
    fn classify(&self, features: &FeatureVector) -> Result<Prediction>;
}
