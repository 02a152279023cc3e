//! Catalog sources: the `;`-separated line format and YAML record lists
//!
//! Line format, one record per line:
//!
//! ```text
//! Therapy;
//! Anxiety;worried,nervous;Therapy-2,Exercise-1;
//! ```
//!
//! Solutions must be loaded before characteristics, since affinities are
//! resolved against the solution catalog and unknown solutions are dropped.

use super::error::{CatalogError, CatalogResult};
use super::types::{Catalog, Characteristic, Solution};
use serde::Deserialize;
use std::path::Path;
use tracing::{debug, info};

/// A characteristic as written in a source, before affinities are resolved
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct CharacteristicRecord {
    pub name: String,
    #[serde(default)]
    pub synonyms: Vec<String>,
    #[serde(default)]
    pub affinities: Vec<AffinityRecord>,
}

/// An unresolved `(solution name, multiplier)` pair
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct AffinityRecord {
    pub solution: String,
    pub multiplier: f64,
}

/// A solution as written in a YAML source: either a bare name or `{ name }`
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
enum SolutionRecord {
    Name(String),
    Entry { name: String },
}

impl SolutionRecord {
    fn into_solution(self) -> Solution {
        match self {
            Self::Name(name) | Self::Entry { name } => Solution::new(name),
        }
    }
}

/// Lines that carry a record, with 1-based line numbers
fn record_lines(text: &str) -> impl Iterator<Item = (usize, &str)> {
    text.lines()
        .enumerate()
        .map(|(i, l)| (i + 1, l.trim()))
        .filter(|(_, l)| !l.is_empty() && !l.starts_with('#'))
}

fn malformed(line: usize, reason: impl Into<String>) -> CatalogError {
    CatalogError::Malformed {
        line,
        reason: reason.into(),
    }
}

/// Parse solutions in line format (`name;` per line)
pub fn parse_solutions(text: &str) -> CatalogResult<Catalog<Solution>> {
    let mut solutions = Vec::new();
    for (line, record) in record_lines(text) {
        let (name, _) = record
            .split_once(';')
            .ok_or_else(|| malformed(line, "solution record is missing its ';' terminator"))?;
        let name = name.trim();
        if name.is_empty() {
            return Err(malformed(line, "solution name is empty"));
        }
        solutions.push(Solution::new(name));
    }
    Catalog::new(solutions)
}

/// Parse one `solution-multiplier` token
fn parse_affinity(line: usize, token: &str) -> CatalogResult<AffinityRecord> {
    let (solution, multiplier) = token
        .split_once('-')
        .ok_or_else(|| malformed(line, format!("affinity '{}' has no '-' separator", token)))?;
    let multiplier = multiplier
        .trim()
        .parse::<f64>()
        .map_err(|_| CatalogError::InvalidMultiplier {
            line,
            token: token.to_string(),
        })?;
    Ok(AffinityRecord {
        solution: solution.trim().to_string(),
        multiplier,
    })
}

/// Parse characteristic records in line format without resolving affinities
pub fn parse_characteristic_records(text: &str) -> CatalogResult<Vec<CharacteristicRecord>> {
    let mut records = Vec::new();
    for (line, record) in record_lines(text) {
        let record = record.strip_suffix(';').unwrap_or(record);
        let mut sections = record.split(';');

        let name = sections.next().unwrap_or_default().trim();
        if name.is_empty() {
            return Err(malformed(line, "characteristic name is empty"));
        }
        let synonyms = sections.next().ok_or_else(|| {
            malformed(line, "characteristic record is missing its synonyms section")
        })?;
        let synonyms = split_list(synonyms).map(str::to_string).collect();

        let affinities = match sections.next() {
            Some(section) => split_list(section)
                .map(|token| parse_affinity(line, token))
                .collect::<CatalogResult<Vec<_>>>()?,
            None => Vec::new(),
        };

        if sections.next().is_some() {
            return Err(malformed(line, "characteristic record has too many sections"));
        }

        records.push(CharacteristicRecord {
            name: name.to_string(),
            synonyms,
            affinities,
        });
    }
    Ok(records)
}

fn split_list(section: &str) -> impl Iterator<Item = &str> {
    section.split(',').map(str::trim).filter(|s| !s.is_empty())
}

/// Resolve records against the solution catalog.
///
/// Affinities naming an uncataloged solution are dropped.
pub fn resolve_characteristics(
    records: Vec<CharacteristicRecord>,
    solutions: &Catalog<Solution>,
) -> CatalogResult<Catalog<Characteristic>> {
    let characteristics = records.into_iter().map(|record| {
        let mut ch = Characteristic::new(record.name);
        ch.synonyms = record.synonyms;
        for affinity in record.affinities {
            match solutions.get(&affinity.solution) {
                Some(solution) => {
                    ch = ch.with_affinity(solution.clone(), affinity.multiplier);
                }
                None => debug!(
                    characteristic = %ch.name,
                    solution = %affinity.solution,
                    "dropping affinity to uncataloged solution"
                ),
            }
        }
        ch
    });
    Catalog::new(characteristics.collect::<Vec<_>>())
}

/// Parse characteristics in line format and resolve them against `solutions`
pub fn parse_characteristics(
    text: &str,
    solutions: &Catalog<Solution>,
) -> CatalogResult<Catalog<Characteristic>> {
    resolve_characteristics(parse_characteristic_records(text)?, solutions)
}

/// Parse solutions from a YAML list of names or `{ name }` maps
pub fn parse_solutions_yaml(text: &str) -> CatalogResult<Catalog<Solution>> {
    let records: Vec<SolutionRecord> = serde_yaml::from_str(text)?;
    Catalog::new(records.into_iter().map(SolutionRecord::into_solution).collect::<Vec<_>>())
}

/// Parse characteristics from a YAML list of records
pub fn parse_characteristics_yaml(
    text: &str,
    solutions: &Catalog<Solution>,
) -> CatalogResult<Catalog<Characteristic>> {
    let records: Vec<CharacteristicRecord> = serde_yaml::from_str(text)?;
    resolve_characteristics(records, solutions)
}

fn read(path: &Path) -> CatalogResult<String> {
    std::fs::read_to_string(path).map_err(|source| CatalogError::Io {
        path: path.to_path_buf(),
        source,
    })
}

fn is_yaml(path: &Path) -> bool {
    matches!(
        path.extension().and_then(|e| e.to_str()),
        Some("yaml") | Some("yml")
    )
}

/// Load both catalogs from files, solutions first.
///
/// `.yaml`/`.yml` files are read as YAML, anything else as line format.
pub fn load_catalogs(
    characteristics_path: &Path,
    solutions_path: &Path,
) -> CatalogResult<(Catalog<Characteristic>, Catalog<Solution>)> {
    let solutions_text = read(solutions_path)?;
    let solutions = if is_yaml(solutions_path) {
        parse_solutions_yaml(&solutions_text)?
    } else {
        parse_solutions(&solutions_text)?
    };

    let characteristics_text = read(characteristics_path)?;
    let characteristics = if is_yaml(characteristics_path) {
        parse_characteristics_yaml(&characteristics_text, &solutions)?
    } else {
        parse_characteristics(&characteristics_text, &solutions)?
    };

    info!(
        characteristics = characteristics.len(),
        solutions = solutions.len(),
        "loaded catalogs"
    );
    Ok((characteristics, solutions))
}
