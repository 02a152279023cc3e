//! Shared fixtures for integration tests
//!
//! A small wellbeing catalog in both source formats, written into a
//! temporary directory that lives as long as the returned guard.

#![allow(dead_code)]

use std::path::PathBuf;
use tempfile::TempDir;

pub const SOLUTIONS: &str = "\
# candidate recommendations
Exercise;
Therapy;
Sleep Hygiene;
";

pub const CHARACTERISTICS: &str = "\
Anxiety;worried,nervous;Therapy-2,Exercise-1;
Insomnia;can't sleep;Sleep Hygiene-1.5,Exercise-0.5;
Fatigue;tired,exhausted;Exercise-3,Acupuncture-9;
";

pub const SOLUTIONS_YAML: &str = "\
- Exercise
- name: Therapy
- Sleep Hygiene
";

pub const CHARACTERISTICS_YAML: &str = "\
- name: Anxiety
  synonyms: [worried, nervous]
  affinities:
    - { solution: Therapy, multiplier: 2.0 }
    - { solution: Exercise, multiplier: 1.0 }
- name: Insomnia
  synonyms: [\"can't sleep\"]
  affinities:
    - { solution: Sleep Hygiene, multiplier: 1.5 }
    - { solution: Exercise, multiplier: 0.5 }
- name: Fatigue
  synonyms: [tired, exhausted]
  affinities:
    - { solution: Exercise, multiplier: 3.0 }
    - { solution: Acupuncture, multiplier: 9.0 }
";

/// Catalog files on disk
pub struct CatalogFiles {
    pub dir: TempDir,
    pub characteristics: PathBuf,
    pub solutions: PathBuf,
}

impl CatalogFiles {
    /// Write a config pointing at these catalogs and return its path
    pub fn write_config(&self, extra: &str) -> PathBuf {
        let path = self.dir.path().join("config.yaml");
        let text = format!(
            "characteristics: {}\nsolutions: {}\n{}",
            self.characteristics.display(),
            self.solutions.display(),
            extra
        );
        std::fs::write(&path, text).expect("write config");
        path
    }
}

fn write_catalogs(characteristics: &str, solutions: &str, extension: &str) -> CatalogFiles {
    let dir = tempfile::tempdir().expect("create temp dir");
    let ch_path = dir.path().join(format!("characteristics.{}", extension));
    let sol_path = dir.path().join(format!("solutions.{}", extension));
    std::fs::write(&ch_path, characteristics).expect("write characteristics");
    std::fs::write(&sol_path, solutions).expect("write solutions");
    CatalogFiles {
        dir,
        characteristics: ch_path,
        solutions: sol_path,
    }
}

/// The fixture catalogs in line format
pub fn line_catalogs() -> CatalogFiles {
    write_catalogs(CHARACTERISTICS, SOLUTIONS, "txt")
}

/// The same catalogs as YAML
pub fn yaml_catalogs() -> CatalogFiles {
    write_catalogs(CHARACTERISTICS_YAML, SOLUTIONS_YAML, "yaml")
}
