//! Catalog entries: characteristics, solutions, and the registry that holds them

use super::error::{CatalogError, CatalogResult};
use crate::graph::CENTER_NAME;
use regex_lite::Regex;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::hash::{Hash, Hasher};

/// Anything identified by a unique, case-sensitive name.
///
/// Catalog lookups, graph lookups and equality all go through the name, so a
/// plain `&str` can stand in for a full entry wherever only identity matters.
pub trait Named {
    fn name(&self) -> &str;
}

impl Named for str {
    fn name(&self) -> &str {
        self
    }
}

impl Named for String {
    fn name(&self) -> &str {
        self.as_str()
    }
}

impl<T: Named + ?Sized> Named for &T {
    fn name(&self) -> &str {
        (**self).name()
    }
}

/// A recommendable outcome. Only the name is meaningful.
#[derive(Debug, Clone, Eq, Serialize, Deserialize)]
pub struct Solution {
    pub name: String,
}

impl Solution {
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }
}

impl Named for Solution {
    fn name(&self) -> &str {
        &self.name
    }
}

impl PartialEq for Solution {
    fn eq(&self, other: &Self) -> bool {
        self.name == other.name
    }
}

impl Hash for Solution {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.name.hash(state);
    }
}

impl std::fmt::Display for Solution {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name)
    }
}

/// A weighted link from a characteristic to a solution it indicates
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Affinity {
    pub solution: Solution,
    /// Scale applied to the characteristic's weight when it propagates
    pub multiplier: f64,
}

/// An observable trait or topic with synonyms and declared affinities
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Characteristic {
    pub name: String,
    #[serde(default)]
    pub synonyms: Vec<String>,
    /// Declared in catalog order; one entry per solution
    #[serde(default)]
    pub affinities: Vec<Affinity>,
}

impl Characteristic {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            synonyms: Vec::new(),
            affinities: Vec::new(),
        }
    }

    /// Add a synonym
    pub fn with_synonym(mut self, synonym: impl Into<String>) -> Self {
        self.synonyms.push(synonym.into());
        self
    }

    /// Declare an affinity. A later declaration for the same solution replaces
    /// the earlier multiplier but keeps its position.
    pub fn with_affinity(mut self, solution: Solution, multiplier: f64) -> Self {
        match self.affinities.iter_mut().find(|a| a.solution == solution) {
            Some(existing) => existing.multiplier = multiplier,
            None => self.affinities.push(Affinity {
                solution,
                multiplier,
            }),
        }
        self
    }

    /// Multiplier declared for `solution`, if any
    pub fn multiplier_for(&self, solution: &(impl Named + ?Sized)) -> Option<f64> {
        self.affinities
            .iter()
            .find(|a| a.solution.name == solution.name())
            .map(|a| a.multiplier)
    }

    /// True if the name or any synonym occurs in `text` as a whole word,
    /// ignoring case.
    pub fn is_mentioned_in(&self, text: &str) -> bool {
        self.mention_pattern()
            .map_or(false, |re| re.is_match(&text.to_lowercase()))
    }

    /// One alternation over the lowercased name and synonyms
    fn mention_pattern(&self) -> Option<Regex> {
        let terms: Vec<String> = std::iter::once(&self.name)
            .chain(self.synonyms.iter())
            .map(|term| term.trim())
            .filter(|term| !term.is_empty())
            .map(|term| term_pattern(&term.to_lowercase()))
            .collect();
        if terms.is_empty() {
            return None;
        }
        Regex::new(&format!("(?:{})", terms.join("|"))).ok()
    }
}

impl Named for Characteristic {
    fn name(&self) -> &str {
        &self.name
    }
}

impl PartialEq for Characteristic {
    fn eq(&self, other: &Self) -> bool {
        self.name == other.name
    }
}

impl Eq for Characteristic {}

impl Hash for Characteristic {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.name.hash(state);
    }
}

impl std::fmt::Display for Characteristic {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name)
    }
}

/// `term` escaped, with `\b` on each side that begins or ends in a word
/// character
fn term_pattern(term: &str) -> String {
    let is_word = |c: char| c.is_ascii_alphanumeric() || c == '_';
    let lead = if term.starts_with(is_word) { r"\b" } else { "" };
    let trail = if term.ends_with(is_word) { r"\b" } else { "" };
    format!("{}{}{}", lead, regex_lite::escape(term), trail)
}

/// An ordered, name-keyed registry of entries.
///
/// Immutable once built. Iteration follows declaration order, which is also
/// the order the graph materializes nodes in.
#[derive(Debug, Clone)]
pub struct Catalog<T> {
    entries: Vec<T>,
    index: HashMap<String, usize>,
}

impl<T: Named> Catalog<T> {
    /// Build a catalog, rejecting duplicate names and the reserved center name
    pub fn new(entries: impl IntoIterator<Item = T>) -> CatalogResult<Self> {
        let mut catalog = Self {
            entries: Vec::new(),
            index: HashMap::new(),
        };
        for entry in entries {
            let name = entry.name().to_string();
            if name == CENTER_NAME {
                return Err(CatalogError::ReservedName(name));
            }
            if catalog.index.contains_key(&name) {
                return Err(CatalogError::DuplicateName(name));
            }
            catalog.index.insert(name, catalog.entries.len());
            catalog.entries.push(entry);
        }
        Ok(catalog)
    }

    /// An empty catalog
    pub fn empty() -> Self {
        Self {
            entries: Vec::new(),
            index: HashMap::new(),
        }
    }

    /// Look up an entry by name
    pub fn get(&self, name: &str) -> Option<&T> {
        self.index.get(name).map(|&i| &self.entries[i])
    }

    /// Check whether an entry with the same name is cataloged
    pub fn contains(&self, key: &(impl Named + ?Sized)) -> bool {
        self.index.contains_key(key.name())
    }

    /// Declaration position of an entry
    pub fn position(&self, name: &str) -> Option<usize> {
        self.index.get(name).copied()
    }

    /// Entries in declaration order
    pub fn iter(&self) -> impl Iterator<Item = &T> {
        self.entries.iter()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl<T: Named> Default for Catalog<T> {
    fn default() -> Self {
        Self::empty()
    }
}

impl Catalog<Characteristic> {
    /// Characteristics whose name or a synonym is mentioned in `text`,
    /// in declaration order
    pub fn mentioned_in(&self, text: &str) -> Vec<&Characteristic> {
        self.entries
            .iter()
            .filter(|ch| ch.is_mentioned_in(text))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn equality_is_by_name() {
        let a = Characteristic::new("Anxiety").with_synonym("worry");
        let b = Characteristic::new("Anxiety");
        assert_eq!(a, b);
        assert_ne!(Characteristic::new("anxiety"), b);
        assert_eq!(Solution::new("Therapy"), Solution::new("Therapy"));
    }

    #[test]
    fn catalog_rejects_duplicates() {
        let result = Catalog::new(vec![Solution::new("Therapy"), Solution::new("Therapy")]);
        assert!(matches!(result, Err(CatalogError::DuplicateName(n)) if n == "Therapy"));
    }

    #[test]
    fn catalog_rejects_center_name() {
        let result = Catalog::new(vec![Solution::new(CENTER_NAME)]);
        assert!(matches!(result, Err(CatalogError::ReservedName(_))));
    }

    #[test]
    fn catalog_preserves_declaration_order() {
        let catalog = Catalog::new(vec![
            Solution::new("Exercise"),
            Solution::new("Therapy"),
            Solution::new("Sleep"),
        ])
        .unwrap();
        let names: Vec<_> = catalog.iter().map(|s| s.name.as_str()).collect();
        assert_eq!(names, vec!["Exercise", "Therapy", "Sleep"]);
        assert_eq!(catalog.position("Sleep"), Some(2));
        assert!(catalog.contains("Therapy"));
        assert!(!catalog.contains("therapy"));
    }

    #[test]
    fn repeated_affinity_keeps_position() {
        let ch = Characteristic::new("Stress")
            .with_affinity(Solution::new("Therapy"), 1.0)
            .with_affinity(Solution::new("Exercise"), 1.0)
            .with_affinity(Solution::new("Therapy"), 3.0);
        assert_eq!(ch.affinities.len(), 2);
        assert_eq!(ch.affinities[0].solution.name, "Therapy");
        assert_eq!(ch.multiplier_for("Therapy"), Some(3.0));
        assert_eq!(ch.multiplier_for("Sleep"), None);
    }

    #[test]
    fn mentions_match_whole_words_case_insensitively() {
        let ch = Characteristic::new("Anxiety")
            .with_synonym("worried")
            .with_synonym("on edge");
        assert!(ch.is_mentioned_in("I think my ANXIETY is back"));
        assert!(ch.is_mentioned_in("always on edge lately"));
        assert!(ch.is_mentioned_in("worried."));
        assert!(!ch.is_mentioned_in("unworried and calm"));
        assert!(!ch.is_mentioned_in("hedge funds"));
    }

    #[test]
    fn mentions_survive_overlapping_partial_matches() {
        let lonely = Characteristic::new("Loneliness").with_synonym("on and on");
        assert!(lonely.is_mentioned_in("carbon and on and on"));

        let meh = Characteristic::new("Apathy").with_synonym("so so");
        assert!(meh.is_mentioned_in("aso so so"));
        assert!(!meh.is_mentioned_in("aso sox"));
    }

    #[test]
    fn mention_terms_are_matched_literally() {
        let ch = Characteristic::new("Stress").with_synonym("(overloaded)");
        assert!(ch.is_mentioned_in("feeling (overloaded) today"));
        assert!(!ch.is_mentioned_in("feeling overloaded today"));
        assert!(!ch.is_mentioned_in("stressed"));
    }

    #[test]
    fn catalog_mentions_follow_declaration_order() {
        let catalog = Catalog::new(vec![
            Characteristic::new("Procrastination").with_synonym("putting off"),
            Characteristic::new("Insomnia").with_synonym("can't sleep"),
            Characteristic::new("Anxiety"),
        ])
        .unwrap();
        let found: Vec<_> = catalog
            .mentioned_in("anxiety means I can't sleep and keep putting off work")
            .into_iter()
            .map(|c| c.name.as_str())
            .collect();
        assert_eq!(found, vec!["Procrastination", "Insomnia", "Anxiety"]);
    }
}
