use hitcast_domain::HitLabel;
use serde::Serialize;

use crate::dataset::TrainingSet;
use crate::forest::HitForest;

#[derive(Clone, Copy, Debug, Default, Serialize, PartialEq, Eq)]
pub struct Evaluation {
    pub true_hits: usize,
    pub false_hits: usize,
    pub true_misses: usize,
    pub false_misses: usize,
}

impl Evaluation {
    pub fn score(forest: &HitForest, set: &TrainingSet) -> Self {
        let predictions = forest.predict_batch(set.records());
        predictions
            .iter()
            .zip(set.labels().iter())
            .fold(Self::default(), |mut eval, (prediction, &actual)| {
                eval.record(prediction.label, actual == HitLabel::Hit.class_index());
                eval
            })
    }

    fn record(&mut self, predicted: HitLabel, actual_hit: bool) {
        match (predicted, actual_hit) {
            (HitLabel::Hit, true) => self.true_hits += 1,
            (HitLabel::Hit, false) => self.false_hits += 1,
            (HitLabel::Miss, false) => self.true_misses += 1,
            (HitLabel::Miss, true) => self.false_misses += 1,
        }
    }

    pub fn samples(&self) -> usize {
        self.true_hits + self.false_hits + self.true_misses + self.false_misses
    }

    pub fn accuracy(&self) -> f64 {
        match self.samples() {
            0 => 0.0,
            n => (self.true_hits + self.true_misses) as f64 / n as f64,
        }
    }

    pub fn precision(&self) -> Option<f64> {
        let predicted_hits = self.true_hits + self.false_hits;
        (predicted_hits > 0).then(|| self.true_hits as f64 / predicted_hits as f64)
    }

    pub fn recall(&self) -> Option<f64> {
        let actual_hits = self.true_hits + self.false_misses;
        (actual_hits > 0).then(|| self.true_hits as f64 / actual_hits as f64)
    }
}
