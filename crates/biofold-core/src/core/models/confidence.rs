use std::collections::HashSet;

/// The confidence value attributed to a single residue of a predicted structure.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ResidueConfidence {
    pub residue_number: isize, // Residue sequence number from source file
    pub value: f64,            // Confidence proxy read from the B-factor column
}

/// Per-residue confidence values of one model, deduplicated by residue number.
///
/// Structure predictors repeat the per-residue confidence on every atom of the
/// residue, so only the first atom record seen for a residue number contributes.
/// Later records for the same residue number are ignored even when their value
/// differs (for example alternate conformations).
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ConfidenceProfile {
    residues: Vec<ResidueConfidence>,
    seen: HashSet<isize>,
}

impl ConfidenceProfile {
    pub fn new() -> Self {
        Self::default()
    }

    /// Records an atom's confidence value.
    ///
    /// # Return
    ///
    /// Returns `true` if the value was kept, `false` if the residue number had
    /// already been recorded.
    pub fn record(&mut self, residue_number: isize, value: f64) -> bool {
        if !self.seen.insert(residue_number) {
            return false;
        }
        self.residues.push(ResidueConfidence {
            residue_number,
            value,
        });
        true
    }

    pub fn residues(&self) -> &[ResidueConfidence] {
        &self.residues
    }

    pub fn len(&self) -> usize {
        self.residues.len()
    }

    pub fn is_empty(&self) -> bool {
        self.residues.is_empty()
    }

    /// Arithmetic mean of the per-residue values, or `None` for an empty profile.
    pub fn mean(&self) -> Option<f64> {
        if self.residues.is_empty() {
            return None;
        }
        let sum: f64 = self.residues.iter().map(|r| r.value).sum();
        Some(sum / self.residues.len() as f64)
    }
}

impl Extend<ResidueConfidence> for ConfidenceProfile {
    fn extend<T: IntoIterator<Item = ResidueConfidence>>(&mut self, iter: T) {
        for residue in iter {
            self.record(residue.residue_number, residue.value);
        }
    }
}

impl FromIterator<ResidueConfidence> for ConfidenceProfile {
    fn from_iter<T: IntoIterator<Item = ResidueConfidence>>(iter: T) -> Self {
        let mut profile = Self::new();
        profile.extend(iter);
        profile
    }
}
