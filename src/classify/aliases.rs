use std::collections::HashMap;

use crate::error::{AppError, Result};

/// South Bay high schools and the names people sign off with.
const BUILTIN: &[(&str, &[&str])] = &[
    ("mira costa", &["mira costa", "costa", "mchs", "mustangs"]),
    ("redondo union", &["redondo union", "redondo", "rhs", "seahawks", "sea hawks"]),
    ("palos verdes", &["palos verdes", "pv", "pvhs", "sea kings"]),
    ("peninsula", &["peninsula", "pvphs", "panthers"]),
    ("torrance", &["torrance", "ths", "tartars"]),
    ("west high", &["west high", "warriors"]),
    ("south high", &["south high", "spartans"]),
    ("north high", &["north high", "saxons"]),
    ("el segundo", &["el segundo", "eshs", "eagles"]),
    ("bishop montgomery", &["bishop montgomery", "bmhs", "knights"]),
    ("chadwick", &["chadwick", "dolphins"]),
];

/// Read-only lookup from a lowercase alias to the category that owns it.
///
/// Every alias belongs to exactly one category; construction fails if two
/// categories claim the same string.
#[derive(Debug, Clone, Default)]
pub struct AliasTable {
    by_alias: HashMap<String, String>,
}

impl AliasTable {
    pub fn new<I, C, A, S>(entries: I) -> Result<Self>
    where
        I: IntoIterator<Item = (C, A)>,
        C: AsRef<str>,
        A: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut by_alias: HashMap<String, String> = HashMap::new();

        for (category, aliases) in entries {
            let category = category.as_ref().trim();
            if category.is_empty() {
                return Err(AppError::Config("alias table has an empty category name".to_string()));
            }

            for alias in aliases {
                let alias = alias.as_ref().trim().to_lowercase();
                if alias.is_empty() {
                    return Err(AppError::Config(format!(
                        "category {:?} has an empty alias",
                        category
                    )));
                }
                if !alias.chars().all(|c| c.is_ascii_alphanumeric() || c == '_' || c == ' ') {
                    return Err(AppError::Config(format!(
                        "alias {:?} of {:?} can never match: only ASCII letters, digits, '_' and spaces end a text",
                        alias, category
                    )));
                }

                match by_alias.get(&alias) {
                    Some(owner) if owner != category => {
                        return Err(AppError::Config(format!(
                            "alias {:?} is claimed by both {:?} and {:?}",
                            alias, owner, category
                        )));
                    }
                    Some(_) => {}
                    None => {
                        by_alias.insert(alias, category.to_string());
                    }
                }
            }
        }

        Ok(Self { by_alias })
    }

    pub fn builtin() -> Result<Self> {
        Self::new(BUILTIN.iter().map(|(category, aliases)| (*category, aliases.iter())))
    }

    pub fn category_of(&self, alias: &str) -> Option<&str> {
        self.by_alias.get(alias).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.by_alias.len()
    }

    pub fn is_empty(&self) -> bool {
        self.by_alias.is_empty()
    }
}
