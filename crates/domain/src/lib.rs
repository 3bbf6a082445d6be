pub mod classifier;
pub mod error;
pub mod features;
pub mod label;
pub mod prediction;
pub mod schema;

pub use crate::classifier::HitClassifier;
pub use crate::error::DomainError;
pub use crate::features::FeatureVector;
pub use crate::label::{HitLabel, HIT_THRESHOLD};
pub use crate::prediction::Prediction;
pub use crate::schema::{Feature, FeatureKind, FeatureSchema, FeatureSpec, FEATURE_COUNT, FEATURE_SCHEMA};
