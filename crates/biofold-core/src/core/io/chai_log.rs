use crate::core::models::report::ModelScore;
use regex::Regex;
use std::collections::BTreeMap;
use std::fs::File;
use std::io::{self, BufRead, BufReader};
use std::path::Path;
use std::sync::LazyLock;

static SCORE_LINE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"Score=([\d.]+), writing output to (.+\.cif)")
        .expect("Chai-1 score pattern must compile")
});

/// Aggregate scores that Chai-1 prints to its standard output while writing
/// each sampled model.
pub struct ChaiScoreLog;

impl ChaiScoreLog {
    /// Collects one score per model from `Score=<value>, writing output to <path>.cif`
    /// lines. The model name is the output file name without extension; a model
    /// reported twice keeps its last score. Results are sorted by model name.
    pub fn read_from(reader: impl BufRead) -> io::Result<Vec<ModelScore>> {
        let mut scores: BTreeMap<String, f64> = BTreeMap::new();

        for line in reader.lines() {
            let line = line?;
            let Some(caps) = SCORE_LINE.captures(&line) else {
                continue;
            };
            let Ok(score) = caps[1].parse::<f64>() else {
                continue;
            };
            let model = Path::new(&caps[2])
                .file_stem()
                .map(|s| s.to_string_lossy().into_owned())
                .unwrap_or_default();
            scores.insert(model, score);
        }

        Ok(scores
            .into_iter()
            .map(|(model, mean)| ModelScore::new(model, mean))
            .collect())
    }

    pub fn read_from_path<P: AsRef<Path>>(path: P) -> io::Result<Vec<ModelScore>> {
        let file = File::open(path)?;
        Self::read_from(BufReader::new(file))
    }
}
