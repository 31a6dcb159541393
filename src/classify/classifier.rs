use regex::Regex;

use crate::error::Result;
use crate::models::UNCLASSIFIED;

use super::AliasTable;

// ASCII word characters and spaces running to the end of the text.
const TRAILING_TEXT: &str = r"[0-9A-Za-z_ ]*$";

/// Tags text with the category named by its trailing words.
pub struct Classifier {
    aliases: AliasTable,
    trailing: Regex,
}

impl Classifier {
    pub fn new(aliases: AliasTable) -> Result<Self> {
        let trailing = Regex::new(TRAILING_TEXT).map_err(anyhow::Error::from)?;
        Ok(Self { aliases, trailing })
    }

    /// The category whose alias matches the end of `text`, if any.
    ///
    /// The whole trailing run is tried first, then the same run with its
    /// leading words dropped one at a time, so the longest matching alias
    /// wins.
    pub fn classify(&self, text: &str) -> Option<&str> {
        if self.aliases.is_empty() {
            return None;
        }

        let suffix = self.trailing_text(text);
        // Bound first so the iterator borrowing `suffix` is dropped before it.
        let category = candidates(&suffix).find_map(|candidate| self.aliases.category_of(candidate));
        category
    }

    /// Like [`classify`](Self::classify), falling back to the unclassified sentinel.
    pub fn category_for(&self, text: &str) -> String {
        self.classify(text).unwrap_or(UNCLASSIFIED).to_string()
    }

    fn trailing_text(&self, text: &str) -> String {
        self.trailing
            .find(text)
            .map(|m| m.as_str())
            .unwrap_or_default()
            .trim()
            .to_lowercase()
    }
}

fn candidates(suffix: &str) -> impl Iterator<Item = &str> {
    std::iter::once(suffix)
        .chain(
            suffix
                .match_indices(' ')
                .map(move |(i, _)| suffix[i..].trim_start()),
        )
        .filter(|candidate| !candidate.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn classifier(entries: &[(&str, &[&str])]) -> Classifier {
        let table = AliasTable::new(entries.iter().map(|(c, a)| (*c, a.iter()))).unwrap();
        Classifier::new(table).unwrap()
    }

    #[test]
    fn test_trailing_word_matches() {
        let c = classifier(&[("state", &["tigers"])]);
        assert_eq!(c.classify("Go tigers"), Some("state"));
        assert_eq!(c.classify("hello world"), None);
        assert_eq!(c.category_for("hello world"), "N/A");
    }

    #[test]
    fn test_trailing_run_stops_at_punctuation() {
        let c = classifier(&[("A", &["lions"]), ("B", &["eagles"])]);
        assert_eq!(c.classify("i can't believe it... lions"), Some("A"));
        assert_eq!(c.classify("who does that?! - Eagles  "), Some("B"));
        assert_eq!(c.classify("lions!"), None);
    }

    #[test]
    fn test_longest_alias_wins() {
        let c = classifier(&[
            ("redondo union", &["redondo union"]),
            ("union", &["union"]),
        ]);
        assert_eq!(c.classify("see you at prom, Redondo Union"), Some("redondo union"));
        assert_eq!(c.classify("see you at prom, the union"), Some("union"));
    }

    #[test]
    fn test_multi_word_alias_with_extra_spacing() {
        let c = classifier(&[("mira costa", &["mira costa"])]);
        assert_eq!(c.classify("love this place. MIRA COSTA "), Some("mira costa"));
        assert_eq!(c.classify("love this place. mira  costa"), None);
    }

    #[test]
    fn test_non_ascii_tail_is_not_a_word() {
        let c = classifier(&[("A", &["lions"])]);
        assert_eq!(c.classify("lions é"), None);
        assert_eq!(c.classify("é lions"), Some("A"));
    }

    #[test]
    fn test_empty_table_classifies_nothing() {
        let c = Classifier::new(AliasTable::default()).unwrap();
        assert_eq!(c.classify("Go tigers"), None);
        assert_eq!(c.category_for("Go tigers"), "N/A");
    }

    #[test]
    fn test_empty_text() {
        let c = classifier(&[("A", &["lions"])]);
        assert_eq!(c.classify(""), None);
        assert_eq!(c.classify("   "), None);
    }

    #[test]
    fn test_classification_is_pure() {
        let c = classifier(&[("state", &["tigers"]), ("A", &["lions"])]);
        let first: Vec<_> = ["Go tigers", "x lions", "nope"]
            .iter()
            .map(|t| c.category_for(t))
            .collect();
        let second: Vec<_> = ["nope", "x lions", "Go tigers"]
            .iter()
            .rev()
            .map(|t| c.category_for(t))
            .collect();
        assert_eq!(first, second);
        assert_eq!(first, vec!["state", "A", "N/A"]);
    }

    #[test]
    fn test_builtin_table_classifies_sign_offs() {
        let c = Classifier::new(AliasTable::builtin().unwrap()).unwrap();
        assert_eq!(c.classify("he never texted back - Mira Costa"), Some("mira costa"));
        assert_eq!(c.classify("worst cafeteria food. #PV"), Some("palos verdes"));
        assert_eq!(c.classify("just a random thought."), None);
    }

    #[test]
    fn test_builtin_table_ignores_everyday_endings() {
        let c = Classifier::new(AliasTable::builtin().unwrap()).unwrap();
        for text in [
            "ugh, we are heading south",
            "I lost my pen",
            "the wind is coming from the north",
            "go west",
            "my bishop took your rook. ru",
            "this one's on me mc",
            "yes",
        ] {
            assert_eq!(c.category_for(text), "N/A", "{text:?}");
        }
        assert_eq!(c.classify("see you at the game, West High"), Some("west high"));
    }
}
