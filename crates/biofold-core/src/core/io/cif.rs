use crate::core::io::traits::ConfidenceFile;
use crate::core::models::confidence::ConfidenceProfile;
use std::collections::HashMap;
use std::io::{self, BufRead};
use thiserror::Error;

pub const CONFIDENCE_FIELD: &str = "B_iso_or_equiv";
pub const RESIDUE_FIELD: &str = "auth_seq_id";

const ATOM_SITE_PREFIX: &str = "_atom_site.";
const ATOM_RECORD: &str = "ATOM";

#[derive(Debug, Error)]
pub enum CifError {
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),
    #[error("Atom site header does not declare '_atom_site.{0}'")]
    MissingField(&'static str),
    #[error("Parse error on line {line}: {kind}")]
    Parse { line: usize, kind: CifParseErrorKind },
}

#[derive(Debug, Error, PartialEq, Eq, Clone)]
pub enum CifParseErrorKind {
    #[error("Column '{field}' is at index {index} but the row has {found} columns")]
    MissingColumn {
        field: &'static str,
        index: usize,
        found: usize,
    },
    #[error("Invalid integer in column '{field}' (value: '{value}')")]
    InvalidInt { field: &'static str, value: String },
    #[error("Invalid float in column '{field}' (value: '{value}')")]
    InvalidFloat { field: &'static str, value: String },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct AtomSiteColumns {
    residue: usize,
    confidence: usize,
}

impl AtomSiteColumns {
    // Later duplicates of a column name win.
    fn from_headers(headers: &[String]) -> Result<Self, CifError> {
        let index: HashMap<&str, usize> = headers
            .iter()
            .enumerate()
            .map(|(i, h)| (h.rsplit_once('.').map_or(h.as_str(), |(_, name)| name), i))
            .collect();

        let confidence = *index
            .get(CONFIDENCE_FIELD)
            .ok_or(CifError::MissingField(CONFIDENCE_FIELD))?;
        let residue = *index
            .get(RESIDUE_FIELD)
            .ok_or(CifError::MissingField(RESIDUE_FIELD))?;
        Ok(Self {
            residue,
            confidence,
        })
    }
}

fn column<'a>(
    fields: &[&'a str],
    index: usize,
    field: &'static str,
    line: usize,
) -> Result<&'a str, CifError> {
    fields.get(index).copied().ok_or(CifError::Parse {
        line,
        kind: CifParseErrorKind::MissingColumn {
            field,
            index,
            found: fields.len(),
        },
    })
}

/// Reader for the `_atom_site` loop of mmCIF files written by structure predictors.
///
/// Header lines starting with `_atom_site.` are collected until the first `ATOM`
/// record; their order defines the column layout of the whitespace-separated
/// atom rows. `HETATM` rows are not scored.
pub struct CifFile;

impl ConfidenceFile for CifFile {
    type Error = CifError;

    fn read_from(reader: &mut impl BufRead) -> Result<ConfidenceProfile, Self::Error> {
        let mut headers: Vec<String> = Vec::new();
        let mut columns: Option<AtomSiteColumns> = None;
        let mut profile = ConfidenceProfile::new();

        for (line_num, line_res) in reader.lines().enumerate() {
            let line = line_res?;
            let line_num = line_num + 1;

            if line.starts_with(ATOM_RECORD) {
                let cols = match columns {
                    Some(cols) => cols,
                    None => {
                        let cols = AtomSiteColumns::from_headers(&headers)?;
                        columns = Some(cols);
                        cols
                    }
                };

                let fields: Vec<&str> = line.split_whitespace().collect();
                let res_str = column(&fields, cols.residue, RESIDUE_FIELD, line_num)?;
                let conf_str = column(&fields, cols.confidence, CONFIDENCE_FIELD, line_num)?;

                let residue_number: isize = res_str.parse().map_err(|_| CifError::Parse {
                    line: line_num,
                    kind: CifParseErrorKind::InvalidInt {
                        field: RESIDUE_FIELD,
                        value: res_str.into(),
                    },
                })?;
                let value: f64 = conf_str.parse().map_err(|_| CifError::Parse {
                    line: line_num,
                    kind: CifParseErrorKind::InvalidFloat {
                        field: CONFIDENCE_FIELD,
                        value: conf_str.into(),
                    },
                })?;

                profile.record(residue_number, value);
            } else if columns.is_none() && line.starts_with(ATOM_SITE_PREFIX) {
                headers.push(line.trim().to_string());
            }
        }

        if columns.is_none() {
            AtomSiteColumns::from_headers(&headers)?;
        }
        Ok(profile)
    }
}
