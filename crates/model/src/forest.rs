use hitcast_domain::{FeatureVector, HitLabel, Prediction, FEATURE_COUNT};
use linfa::prelude::*;
use linfa::Dataset;
use linfa_trees::{DecisionTree, SplitQuality};
use ndarray::{aview1, Array1, ArrayView1, ArrayView2, Axis};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::ModelError;

pub const DEFAULT_TREE_COUNT: usize = 100;
pub const DEFAULT_SEED: u64 = 42;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ForestParams {
    pub n_trees: usize,
    /// Seeds the bootstrap resampling; the same seed and data give the same forest.
    pub seed: u64,
}

impl Default for ForestParams {
    fn default() -> Self {
        Self {
            n_trees: DEFAULT_TREE_COUNT,
            seed: DEFAULT_SEED,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct VoteTally {
    pub hit_votes: usize,
    pub total: usize,
}

impl VoteTally {
    pub fn hit_probability(&self) -> f64 {
        if self.total == 0 {
            return 0.0;
        }
        self.hit_votes as f64 / self.total as f64
    }

    /// Majority vote. An exact tie resolves to [`HitLabel::Miss`].
    pub fn label(&self) -> HitLabel {
        if self.hit_votes * 2 > self.total {
            HitLabel::Hit
        } else {
            HitLabel::Miss
        }
    }

    pub fn into_prediction(self) -> Prediction {
        Prediction::new(self.label(), self.hit_probability())
    }
}

#[derive(Serialize, Deserialize)]
pub struct HitForest {
    trees: Vec<DecisionTree<f64, usize>>,
}

impl HitForest {
    pub fn fit(
        records: ArrayView2<f64>,
        labels: ArrayView1<usize>,
        params: &ForestParams,
    ) -> Result<Self, ModelError> {
        let rows = records.nrows();
        if rows == 0 {
            return Err(ModelError::malformed("cannot fit on an empty dataset"));
        }
        if records.ncols() != FEATURE_COUNT {
            return Err(ModelError::malformed(format!(
                "expected {FEATURE_COUNT} feature columns, got {}",
                records.ncols()
            )));
        }
        if labels.len() != rows {
            return Err(ModelError::malformed(format!(
                "{rows} records but {} labels",
                labels.len()
            )));
        }
        if params.n_trees == 0 {
            return Err(ModelError::Fit("forest needs at least one tree".into()));
        }

        let mut rng = StdRng::seed_from_u64(params.seed);
        let mut trees = Vec::with_capacity(params.n_trees);
        for index in 0..params.n_trees {
            let sample: Vec<usize> = (0..rows).map(|_| rng.gen_range(0..rows)).collect();
            let dataset = Dataset::new(
                records.select(Axis(0), &sample),
                labels.select(Axis(0), &sample),
            );
            let tree = DecisionTree::<f64, usize>::params()
                .split_quality(SplitQuality::Gini)
                .fit(&dataset)
                .map_err(|err| ModelError::Fit(err.to_string()))?;
            debug!(tree = index, "fitted decision tree");
            trees.push(tree);
        }
        Ok(Self { trees })
    }

    pub fn tree_count(&self) -> usize {
        self.trees.len()
    }

    pub fn votes(&self, row: &[f64; FEATURE_COUNT]) -> VoteTally {
        let records = aview1(&row[..]).insert_axis(Axis(0));
        let hit = HitLabel::Hit.class_index();
        let hit_votes = self
            .trees
            .iter()
            .filter(|tree| {
                let predicted: Array1<usize> = tree.predict(&records);
                predicted[0] == hit
            })
            .count();
        VoteTally {
            hit_votes,
            total: self.trees.len(),
        }
    }

    pub fn predict(&self, features: &FeatureVector) -> Prediction {
        self.votes(&features.to_row()).into_prediction()
    }

    pub fn predict_batch(&self, records: ArrayView2<f64>) -> Vec<Prediction> {
        let hit = HitLabel::Hit.class_index();
        let mut hit_votes = vec![0usize; records.nrows()];
        for tree in &self.trees {
            let predicted: Array1<usize> = tree.predict(&records);
            for (slot, class) in hit_votes.iter_mut().zip(predicted.iter()) {
                if *class == hit {
                    *slot += 1;
                }
            }
        }
        hit_votes
            .into_iter()
            .map(|hit_votes| {
                VoteTally {
                    hit_votes,
                    total: self.trees.len(),
                }
                .into_prediction()
            })
            .collect()
    }
}
