use std::collections::HashSet;
use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq, Clone)]
pub enum ReportError {
    #[error("A confidence report requires at least one model")]
    Empty,
    #[error("Model '{0}' appears more than once")]
    DuplicateModel(String),
    #[error("Best model '{0}' has no confidence entry")]
    UnknownBest(String),
}

/// The mean confidence computed for one model.
#[derive(Debug, Clone, PartialEq)]
pub struct ModelScore {
    pub model: String,
    pub mean: f64,
}

impl ModelScore {
    pub fn new(model: impl Into<String>, mean: f64) -> Self {
        Self {
            model: model.into(),
            mean,
        }
    }
}

/// Mean confidence per model for one extraction run, plus the best model.
///
/// Entries keep the order in which the models were scored. The report is
/// immutable once built: later steps only read it.
#[derive(Debug, Clone, PartialEq)]
pub struct ConfidenceReport {
    scores: Vec<ModelScore>,
    best: usize,
}

impl ConfidenceReport {
    /// Builds a report and selects the best model.
    ///
    /// The best model is the one with the strictly greatest mean. When several
    /// models share the maximum, the first one in `scores` wins. A `NaN` mean
    /// never displaces a finite one.
    ///
    /// # Errors
    ///
    /// Returns [`ReportError::Empty`] for an empty score list and
    /// [`ReportError::DuplicateModel`] if a model name repeats.
    pub fn new(scores: Vec<ModelScore>) -> Result<Self, ReportError> {
        Self::validate(&scores)?;

        let mut best = 0;
        for (i, score) in scores.iter().enumerate().skip(1) {
            let current = scores[best].mean;
            if score.mean > current || (current.is_nan() && !score.mean.is_nan()) {
                best = i;
            }
        }
        Ok(Self { scores, best })
    }

    /// Builds a report whose best model is already known, as when reading a
    /// persisted results table back.
    ///
    /// # Errors
    ///
    /// Same as [`ConfidenceReport::new`], plus [`ReportError::UnknownBest`] if
    /// `best_model` has no entry.
    pub fn with_best(scores: Vec<ModelScore>, best_model: &str) -> Result<Self, ReportError> {
        Self::validate(&scores)?;
        let best = scores
            .iter()
            .position(|s| s.model == best_model)
            .ok_or_else(|| ReportError::UnknownBest(best_model.to_string()))?;
        Ok(Self { scores, best })
    }

    fn validate(scores: &[ModelScore]) -> Result<(), ReportError> {
        if scores.is_empty() {
            return Err(ReportError::Empty);
        }
        let mut names = HashSet::with_capacity(scores.len());
        for score in scores {
            if !names.insert(score.model.as_str()) {
                return Err(ReportError::DuplicateModel(score.model.clone()));
            }
        }
        Ok(())
    }

    pub fn scores(&self) -> &[ModelScore] {
        &self.scores
    }

    pub fn best(&self) -> &ModelScore {
        &self.scores[self.best]
    }

    pub fn best_model(&self) -> &str {
        &self.best().model
    }

    pub fn get(&self, model: &str) -> Option<f64> {
        self.scores
            .iter()
            .find(|s| s.model == model)
            .map(|s| s.mean)
    }

    pub fn len(&self) -> usize {
        self.scores.len()
    }

    pub fn is_empty(&self) -> bool {
        self.scores.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn best_model_is_strict_maximum() {
        let report = ConfidenceReport::new(vec![
            ModelScore::new("modelA", 72.5),
            ModelScore::new("modelB", 91.0),
            ModelScore::new("modelC", 88.0),
        ])
        .unwrap();
        assert_eq!(report.best_model(), "modelB");
        assert_eq!(report.best().mean, 91.0);
    }

    #[test]
    fn ties_are_won_by_first_encountered_model() {
        let report = ConfidenceReport::new(vec![
            ModelScore::new("model_2", 70.0),
            ModelScore::new("model_0", 85.0),
            ModelScore::new("model_1", 85.0),
        ])
        .unwrap();
        assert_eq!(report.best_model(), "model_0");

        let reversed = ConfidenceReport::new(vec![
            ModelScore::new("model_1", 85.0),
            ModelScore::new("model_0", 85.0),
        ])
        .unwrap();
        assert_eq!(reversed.best_model(), "model_1");
    }

    #[test]
    fn nan_mean_does_not_win() {
        let report = ConfidenceReport::new(vec![
            ModelScore::new("broken", f64::NAN),
            ModelScore::new("ok", 12.0),
        ])
        .unwrap();
        assert_eq!(report.best_model(), "ok");
    }

    #[test]
    fn scores_keep_insertion_order() {
        let report = ConfidenceReport::new(vec![
            ModelScore::new("z", 1.0),
            ModelScore::new("a", 2.0),
        ])
        .unwrap();
        let names: Vec<_> = report.scores().iter().map(|s| s.model.as_str()).collect();
        assert_eq!(names, ["z", "a"]);
        assert_eq!(report.get("a"), Some(2.0));
        assert_eq!(report.get("missing"), None);
    }

    #[test]
    fn empty_and_duplicate_inputs_are_rejected() {
        assert_eq!(ConfidenceReport::new(vec![]), Err(ReportError::Empty));
        assert_eq!(
            ConfidenceReport::new(vec![ModelScore::new("m", 1.0), ModelScore::new("m", 2.0)]),
            Err(ReportError::DuplicateModel("m".into()))
        );
    }

    #[test]
    fn with_best_uses_given_model_and_rejects_unknown() {
        let scores = vec![ModelScore::new("a", 50.0), ModelScore::new("b", 50.0)];
        let report = ConfidenceReport::with_best(scores.clone(), "b").unwrap();
        assert_eq!(report.best_model(), "b");
        assert_eq!(
            ConfidenceReport::with_best(scores, "c"),
            Err(ReportError::UnknownBest("c".into()))
        );
    }
}
