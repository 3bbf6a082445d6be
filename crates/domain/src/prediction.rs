use serde::{Deserialize, Serialize};

use crate::label::HitLabel;

#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq)]
pub struct Prediction {
    pub label: HitLabel,
    pub hit_probability: f64,
}

impl Prediction {
    pub fn new(label: HitLabel, hit_probability: f64) -> Self {
        debug_assert!(
            (0.0..=1.0).contains(&hit_probability),
            "hit probability {hit_probability} outside [0, 1]"
        );
        Self {
            label,
            hit_probability,
        }
    }

    pub fn is_hit(&self) -> bool {
        self.label == HitLabel::Hit
    }

    pub fn percent(&self) -> f64 {
        self.hit_probability * 100.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn percent_scales_probability() {
        let prediction = Prediction::new(HitLabel::Hit, 0.87);
        assert!((prediction.percent() - 87.0).abs() < 1e-9);
        assert!(prediction.is_hit());
    }

    #[test]
    fn probability_is_kept_as_given() {
        assert_eq!(Prediction::new(HitLabel::Miss, 0.0).hit_probability, 0.0);
        assert_eq!(Prediction::new(HitLabel::Hit, 1.0).hit_probability, 1.0);
    }

    #[test]
    #[cfg(debug_assertions)]
    #[should_panic(expected = "outside [0, 1]")]
    fn out_of_range_probability_is_not_hidden() {
        let _ = Prediction::new(HitLabel::Hit, 1.4);
    }
}
