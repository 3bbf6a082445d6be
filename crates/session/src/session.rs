use anyhow::Result;
use hitcast_domain::{FeatureVector, HitClassifier, HitLabel, Prediction};
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::presentation::{GaugeTone, Verdict};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SessionState {
    pub inputs: FeatureVector,
    pub prediction_made: bool,
    pub last_label: Option<HitLabel>,
    pub hit_probability: f64,
}

impl SessionState {
    pub fn new() -> Self {
        Self {
            inputs: FeatureVector::default_profile(),
            prediction_made: false,
            last_label: None,
            hit_probability: 0.0,
        }
    }

    /// Zero every slider. The last prediction stays on screen until the next
    /// explicit analysis.
    pub fn reset_inputs(&mut self) {
        self.inputs = FeatureVector::zeroed();
    }

    pub fn record(&mut self, prediction: Prediction) {
        self.prediction_made = true;
        self.last_label = Some(prediction.label);
        self.hit_probability = prediction.hit_probability;
    }

    /// Score the current inputs. On failure the previous result is kept.
    pub fn analyze<C: HitClassifier + ?Sized>(&mut self, classifier: &C) -> Result<Prediction> {
        let prediction = classifier.classify(&self.inputs)?;
        info!(
            label = ?prediction.label,
            percent = prediction.percent(),
            "analyzed track"
        );
        self.record(prediction);
        Ok(prediction)
    }

    pub fn percent(&self) -> f64 {
        self.hit_probability * 100.0
    }

    pub fn gauge_tone(&self) -> GaugeTone {
        GaugeTone::from_percent(self.percent())
    }

    pub fn verdict(&self) -> Option<Verdict> {
        self.last_label.map(Verdict::from_label)
    }
}

impl Default for SessionState {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use anyhow::bail;

    struct Fixed(Prediction);

    impl HitClassifier for Fixed {
        fn classify(&self, _features: &FeatureVector) -> Result<Prediction> {
            Ok(self.0)
        }
    }

    struct Broken;

    impl HitClassifier for Broken {
        fn classify(&self, _features: &FeatureVector) -> Result<Prediction> {
            bail!("model unavailable")
        }
    }

    /// Scores danceability directly so tests can see which inputs were used.
    struct Echo;

    impl HitClassifier for Echo {
        fn classify(&self, features: &FeatureVector) -> Result<Prediction> {
            let label = if features.danceability > 0.5 {
                HitLabel::Hit
            } else {
                HitLabel::Miss
            };
            Ok(Prediction::new(label, features.danceability))
        }
    }

    #[test]
    fn starts_without_prediction() {
        let session = SessionState::new();
        assert!(!session.prediction_made);
        assert_eq!(session.hit_probability, 0.0);
        assert_eq!(session.last_label, None);
        assert_eq!(session.inputs, FeatureVector::default_profile());
        assert_eq!(session.verdict(), None);
        assert_eq!(session.gauge_tone(), GaugeTone::Idle);
    }

    #[test]
    fn reset_keeps_last_prediction() {
        let mut session = SessionState::new();
        session.analyze(&Fixed(Prediction::new(HitLabel::Hit, 0.82))).unwrap();
        session.reset_inputs();

        assert_eq!(session.inputs.loudness, -60.0);
        assert_eq!(session.inputs.duration_ms, 20_000);
        assert_eq!(session.inputs.tempo, 0.0);
        assert!(session.prediction_made);
        assert_eq!(session.last_label, Some(HitLabel::Hit));
        assert_eq!(session.hit_probability, 0.82);
    }

    #[test]
    fn each_analysis_overwrites_the_last() {
        let mut session = SessionState::new();
        session.analyze(&Echo).unwrap();
        assert_eq!(session.verdict(), Some(Verdict::ChartBuster));

        session.inputs.danceability = 0.2;
        session.analyze(&Echo).unwrap();
        assert_eq!(session.last_label, Some(HitLabel::Miss));
        assert_eq!(session.hit_probability, 0.2);
        assert_eq!(session.verdict(), Some(Verdict::NeedsWork));
    }

    #[test]
    fn failed_analysis_keeps_state() {
        let mut session = SessionState::new();
        session.analyze(&Fixed(Prediction::new(HitLabel::Miss, 0.3))).unwrap();
        let before = session.clone();
        assert!(session.analyze(&Broken).is_err());
        assert_eq!(session, before);
    }
}
