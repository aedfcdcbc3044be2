//! Keyword rule table for expense categorization
//!
//! A description is scored against each category by counting how many of the
//! category's keywords occur as substrings of the lowercased text; the
//! highest-scoring category wins. Matching is literal substring containment,
//! no word boundaries, so "grocer" also matches "groceries".
//!
//! Rules are kept in first-listed-wins order: on a tied score the category
//! that appears earlier in the table takes the expense. The table is
//! persisted as a JSON array so that order survives a save/load cycle.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::error::Result;

/// Category assigned when no keyword matches
pub const FALLBACK_CATEGORY: &str = "Other";

/// A category and the keywords that select it
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CategoryRule {
    pub category: String,
    pub keywords: Vec<String>,
}

/// Built-in rule table used when no rules file exists
pub fn default_rules() -> Vec<CategoryRule> {
    fn rule(category: &str, keywords: &[&str]) -> CategoryRule {
        CategoryRule {
            category: category.to_string(),
            keywords: keywords.iter().map(|k| k.to_string()).collect(),
        }
    }

    vec![
        rule(
            "Food",
            &[
                "food",
                "meal",
                "restaurant",
                "cafe",
                "grocer",
                "pizza",
                "burger",
            ],
        ),
        rule(
            "Travel",
            &[
                "uber", "ola", "taxi", "bus", "train", "flight", "fuel", "petrol",
            ],
        ),
        rule(
            "Shopping",
            &[
                "amazon",
                "flipkart",
                "mall",
                "shop",
                "clothes",
                "electronics",
            ],
        ),
        rule(
            "Bills",
            &[
                "electric", "water", "wifi", "internet", "mobile", "recharge", "rent",
            ],
        ),
        rule("Entertainment", &["movie", "netflix", "spotify", "game"]),
        rule("Health", &["doctor", "pharmacy", "medicine", "hospital", "gym"]),
        rule(FALLBACK_CATEGORY, &[]),
    ]
}

/// Ordered keyword rule table backed by a JSON file
#[derive(Debug, Clone)]
pub struct CategoryRules {
    rules: Vec<CategoryRule>,
    path: PathBuf,
}

impl CategoryRules {
    /// Load rules from `path`, falling back to the built-in defaults
    ///
    /// A missing file is the normal first-run state; a file that fails to
    /// parse is logged and ignored. Neither case is an error for the caller.
    pub fn load_or_default(path: &Path) -> Self {
        let rules = match std::fs::read_to_string(path) {
            Ok(contents) => match serde_json::from_str::<Vec<CategoryRule>>(&contents) {
                Ok(mut rules) => {
                    // Keywords match against lowercased text, so normalize
                    // anything a hand-edited file may have introduced.
                    for rule in &mut rules {
                        for keyword in &mut rule.keywords {
                            *keyword = keyword.to_lowercase();
                        }
                    }
                    rules
                }
                Err(e) => {
                    warn!("Ignoring malformed rules file {}: {}", path.display(), e);
                    default_rules()
                }
            },
            Err(_) => {
                debug!("No rules file at {}, using defaults", path.display());
                default_rules()
            }
        };

        Self {
            rules,
            path: path.to_path_buf(),
        }
    }

    /// Path of the backing rules file
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// The rule table, in matching order
    pub fn rules(&self) -> &[CategoryRule] {
        &self.rules
    }

    /// Pick a category for a free-text description
    ///
    /// Returns the category with the strictly highest keyword hit count;
    /// earlier categories win ties. Empty keywords never match. Descriptions
    /// that hit nothing land in the fallback category.
    pub fn categorize(&self, description: &str) -> &str {
        let text = description.to_lowercase();

        let mut best = FALLBACK_CATEGORY;
        let mut best_count = 0;
        for rule in &self.rules {
            let count = rule
                .keywords
                .iter()
                .filter(|kw| !kw.is_empty() && text.contains(kw.as_str()))
                .count();
            if count > best_count {
                best_count = count;
                best = &rule.category;
            }
        }

        best
    }

    /// Add a keyword to a category, creating the category if needed
    ///
    /// Keywords are stored lowercased. Returns false if the keyword was
    /// already present.
    pub fn add_keyword(&mut self, category: &str, keyword: &str) -> bool {
        let keyword = keyword.to_lowercase();

        if let Some(rule) = self.rules.iter_mut().find(|r| r.category == category) {
            if rule.keywords.contains(&keyword) {
                return false;
            }
            rule.keywords.push(keyword);
            return true;
        }

        self.rules.push(CategoryRule {
            category: category.to_string(),
            keywords: vec![keyword],
        });
        true
    }

    /// Remove a keyword from a category
    ///
    /// Unknown categories and absent keywords are a no-op. Returns whether
    /// anything was removed.
    pub fn remove_keyword(&mut self, category: &str, keyword: &str) -> bool {
        let keyword = keyword.to_lowercase();

        match self.rules.iter_mut().find(|r| r.category == category) {
            Some(rule) => {
                let before = rule.keywords.len();
                rule.keywords.retain(|k| k != &keyword);
                rule.keywords.len() != before
            }
            None => false,
        }
    }

    /// Persist the table to its backing file
    ///
    /// Writes to a temp file in the same directory and renames it over the
    /// target, so a failed save leaves the previous file intact.
    pub fn save(&self) -> Result<()> {
        let contents = serde_json::to_string_pretty(&self.rules)?;

        let dir = match self.path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent,
            _ => Path::new("."),
        };
        let tmp = tempfile::NamedTempFile::new_in(dir)?;
        std::fs::write(tmp.path(), contents.as_bytes())?;
        tmp.persist(&self.path)
            .map_err(|e| crate::error::Error::Io(e.error))?;

        debug!("Saved {} categories to {}", self.rules.len(), self.path.display());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rules_at(path: &Path) -> CategoryRules {
        CategoryRules::load_or_default(path)
    }

    #[test]
    fn test_defaults_when_file_missing() {
        let dir = tempfile::TempDir::new().unwrap();
        let rules = rules_at(&dir.path().join("categories.json"));

        assert_eq!(rules.rules().len(), 7);
        assert_eq!(rules.rules()[0].category, "Food");
        assert_eq!(rules.rules()[6].category, "Other");
    }

    #[test]
    fn test_defaults_when_file_malformed() {
        let dir = tempfile::TempDir::new().unwrap();
        let path = dir.path().join("categories.json");
        std::fs::write(&path, "{not json").unwrap();

        let rules = rules_at(&path);
        assert_eq!(rules.rules().len(), 7);
    }

    #[test]
    fn test_categorize_matches_keyword() {
        let dir = tempfile::TempDir::new().unwrap();
        let rules = rules_at(&dir.path().join("categories.json"));

        assert_eq!(rules.categorize("Pizza from Domino's"), "Food");
        assert_eq!(rules.categorize("Uber to airport"), "Travel");
        assert_eq!(rules.categorize("monthly rent"), "Bills");
    }

    #[test]
    fn test_categorize_substring_containment() {
        let dir = tempfile::TempDir::new().unwrap();
        let rules = rules_at(&dir.path().join("categories.json"));

        // "grocer" matches inside "groceries"
        assert_eq!(rules.categorize("weekly groceries run"), "Food");
    }

    #[test]
    fn test_categorize_no_match_falls_back() {
        let dir = tempfile::TempDir::new().unwrap();
        let rules = rules_at(&dir.path().join("categories.json"));

        assert_eq!(rules.categorize("mystery purchase"), "Other");
    }

    #[test]
    fn test_categorize_most_hits_wins() {
        let dir = tempfile::TempDir::new().unwrap();
        let rules = rules_at(&dir.path().join("categories.json"));

        // One Travel hit ("bus") vs two Food hits ("pizza", "burger")
        assert_eq!(rules.categorize("pizza and burger near the bus stop"), "Food");
    }

    #[test]
    fn test_categorize_tie_goes_to_earlier_category() {
        let dir = tempfile::TempDir::new().unwrap();
        let rules = rules_at(&dir.path().join("categories.json"));

        // "cafe" (Food) and "train" (Travel) score one each; Food is listed
        // first in the default table.
        assert_eq!(rules.categorize("cafe at the train station"), "Food");
    }

    #[test]
    fn test_add_keyword_is_idempotent() {
        let dir = tempfile::TempDir::new().unwrap();
        let mut rules = rules_at(&dir.path().join("categories.json"));

        assert!(rules.add_keyword("Food", "Biryani"));
        assert!(!rules.add_keyword("Food", "biryani"));
        assert_eq!(rules.categorize("ordered biryani"), "Food");
    }

    #[test]
    fn test_add_keyword_creates_unknown_category() {
        let dir = tempfile::TempDir::new().unwrap();
        let mut rules = rules_at(&dir.path().join("categories.json"));

        assert!(rules.add_keyword("Pets", "vet"));
        assert_eq!(rules.rules().last().unwrap().category, "Pets");
        assert_eq!(rules.categorize("vet visit"), "Pets");
    }

    #[test]
    fn test_remove_keyword_round_trip() {
        let dir = tempfile::TempDir::new().unwrap();
        let mut rules = rules_at(&dir.path().join("categories.json"));

        rules.add_keyword("Food", "biryani");
        assert_eq!(rules.categorize("ordered biryani"), "Food");

        assert!(rules.remove_keyword("Food", "biryani"));
        assert_eq!(rules.categorize("ordered biryani"), "Other");
    }

    #[test]
    fn test_remove_keyword_unknown_category_is_noop() {
        let dir = tempfile::TempDir::new().unwrap();
        let mut rules = rules_at(&dir.path().join("categories.json"));

        assert!(!rules.remove_keyword("Nonexistent", "anything"));
    }

    #[test]
    fn test_save_and_reload_preserves_order() {
        let dir = tempfile::TempDir::new().unwrap();
        let path = dir.path().join("categories.json");

        let mut rules = rules_at(&path);
        rules.add_keyword("Food", "biryani");
        rules.save().unwrap();

        let reloaded = rules_at(&path);
        let categories: Vec<&str> = reloaded
            .rules()
            .iter()
            .map(|r| r.category.as_str())
            .collect();
        assert_eq!(
            categories,
            vec![
                "Food",
                "Travel",
                "Shopping",
                "Bills",
                "Entertainment",
                "Health",
                "Other"
            ]
        );
        assert_eq!(reloaded.categorize("ordered biryani"), "Food");
    }

    #[test]
    fn test_load_lowercases_keywords() {
        let dir = tempfile::TempDir::new().unwrap();
        let path = dir.path().join("categories.json");
        std::fs::write(
            &path,
            r#"[{"category": "Food", "keywords": ["PIZZA"]}]"#,
        )
        .unwrap();

        let rules = rules_at(&path);
        assert_eq!(rules.categorize("pizza night"), "Food");
    }
}
