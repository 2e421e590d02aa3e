//! Named scalar parameters, seeded with defaults and optionally overridden
//! from a plain-text parameter file with one `<name> <value>` pair per line.

use std::collections::BTreeMap;
use std::fs::File;
use std::io::{self, BufRead, BufReader};
use std::path::Path;

use serde::{Deserialize, Serialize};

#[derive(Debug, thiserror::Error, PartialEq)]
pub enum ParameterError {
    #[error("parameter `{0}` is not defined")]
    Missing(String),

    #[error("parameter `{name}` = {value} is invalid: {reason}")]
    Invalid {
        name: String,
        value: f64,
        reason: &'static str,
    },
}

impl ParameterError {
    pub fn invalid(name: &str, value: f64, reason: &'static str) -> Self {
        ParameterError::Invalid {
            name: name.to_owned(),
            value,
            reason,
        }
    }
}

/// A single line of a parameter file that could not be understood.
#[derive(Debug, Clone, PartialEq)]
pub struct ParseIssue {
    pub line_number: usize,
    pub line: String,
}

/// What happened while reading a parameter file.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct LoadReport {
    pub file_found: bool,
    pub parameters_read: usize,
    pub parse_errors: Vec<ParseIssue>,
}

/// Ordered mapping from parameter name to value.
///
/// Problems build one of these from their documented defaults, then let a
/// parameter file override entries. Lookups of keys that were never seeded
/// are an error rather than a silent zero.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ParameterSet {
    values: BTreeMap<String, f64>,
}

impl ParameterSet {
    pub fn with_defaults(defaults: &[(&str, f64)]) -> ParameterSet {
        ParameterSet {
            values: defaults
                .iter()
                .map(|(name, value)| ((*name).to_owned(), *value))
                .collect(),
        }
    }

    pub fn set(&mut self, name: &str, value: f64) {
        self.values.insert(name.to_owned(), value);
    }

    pub fn get(&self, name: &str) -> Result<f64, ParameterError> {
        self.values
            .get(name)
            .copied()
            .ok_or_else(|| ParameterError::Missing(name.to_owned()))
    }

    pub fn contains(&self, name: &str) -> bool {
        self.values.contains_key(name)
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, f64)> {
        self.values.iter().map(|(name, value)| (name.as_str(), *value))
    }

    /// Override parameters from a file. A file that cannot be opened leaves
    /// every default in place and is only reported as a warning.
    pub fn load_from_path<P: AsRef<Path>>(&mut self, path: P) -> LoadReport {
        let path = path.as_ref();
        match File::open(path) {
            Ok(file) => match self.load_from_reader(BufReader::new(file)) {
                Ok(report) => {
                    log::info!("Parameters loaded.");
                    report
                }
                Err(err) => {
                    log::warn!("Failed to read parameter file {:?}: {}", path, err);
                    LoadReport {
                        file_found: true,
                        ..LoadReport::default()
                    }
                }
            },
            Err(err) => {
                log::warn!("Failed to open parameter file {:?}: {}", path, err);
                log::warn!("Using default parameters");
                LoadReport::default()
            }
        }
    }

    /// Read `<name> <value>` lines. Malformed lines, including lines that
    /// are not valid UTF-8, are logged with their line number and skipped;
    /// they never abort the load. Only a failing reader does.
    pub fn load_from_reader<R: BufRead>(&mut self, reader: R) -> io::Result<LoadReport> {
        let mut report = LoadReport {
            file_found: true,
            ..LoadReport::default()
        };

        for (index, bytes) in reader.split(b'\n').enumerate() {
            let mut bytes = bytes?;
            if bytes.last() == Some(&b'\r') {
                bytes.pop();
            }
            let line_number = index + 1;

            let parsed = match std::str::from_utf8(&bytes) {
                Ok(line) if line.trim().is_empty() => continue,
                Ok(line) => parse_line(line),
                Err(_) => None,
            };

            match parsed {
                Some((name, value)) => {
                    self.set(name, value);
                    report.parameters_read += 1;
                }
                None => {
                    log::warn!("Error reading parameter in line {}", line_number);
                    report.parse_errors.push(ParseIssue {
                        line_number,
                        line: String::from_utf8_lossy(&bytes).into_owned(),
                    });
                }
            }
        }

        Ok(report)
    }
}

// Values must be finite decimals; `nan` and `inf` are rejected.
// Anything after the value is ignored.
fn parse_line(line: &str) -> Option<(&str, f64)> {
    let mut tokens = line.split_whitespace();
    let name = tokens.next()?;
    let value = tokens
        .next()?
        .parse::<f64>()
        .ok()
        .filter(|value| value.is_finite())?;
    Some((name, value))
}
