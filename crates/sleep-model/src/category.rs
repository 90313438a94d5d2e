//! Category maps produced by categorical encoding.
//!
//! A [`CategoryMap`] assigns the integer codes `0..n` to the `n` distinct
//! labels of one column. Missing cells are a category of their own, recorded
//! under [`MISSING_LABEL`]. Maps are returned by the encoder and passed around
//! explicitly (as [`Encodings`]) so that any later stage can turn a code back
//! into the label it came from.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::error::ModelError;

/// Label under which missing cells are coded.
pub const MISSING_LABEL: &str = "<missing>";

/// Order in which codes are handed out to distinct labels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EncodingOrder {
    /// First label seen gets code 0, the next new label code 1, and so on.
    #[default]
    FirstSeen,
    /// Labels are sorted lexicographically before codes are assigned.
    Sorted,
}

/// Label-to-code mapping for one encoded column.
///
/// Serializes as a `{label: code}` object.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(
    try_from = "BTreeMap<String, i64>",
    into = "BTreeMap<String, i64>"
)]
pub struct CategoryMap {
    /// Labels indexed by code.
    labels: Vec<String>,
    /// Reverse index: label -> code.
    codes: BTreeMap<String, i64>,
}

impl CategoryMap {
    /// Create an empty map.
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a map from the labels of a column.
    ///
    /// Duplicates are ignored, so `fit(["b", "a", "b"], FirstSeen)` yields
    /// `b -> 0, a -> 1`.
    pub fn fit<'a, I>(labels: I, order: EncodingOrder) -> Self
    where
        I: IntoIterator<Item = &'a str>,
    {
        let mut map = Self::new();
        match order {
            EncodingOrder::FirstSeen => {
                for label in labels {
                    map.insert(label);
                }
            }
            EncodingOrder::Sorted => {
                let mut distinct: Vec<&str> = labels.into_iter().collect();
                distinct.sort_unstable();
                distinct.dedup();
                for label in distinct {
                    map.insert(label);
                }
            }
        }
        map
    }

    /// Return the code for `label`, assigning the next free code if it is new.
    pub fn insert(&mut self, label: &str) -> i64 {
        if let Some(code) = self.codes.get(label) {
            return *code;
        }
        let code = self.labels.len() as i64;
        self.labels.push(label.to_string());
        self.codes.insert(label.to_string(), code);
        code
    }

    /// Code assigned to `label`, if any.
    pub fn code_of(&self, label: &str) -> Option<i64> {
        self.codes.get(label).copied()
    }

    /// Label that was assigned `code`, if any.
    pub fn label_of(&self, code: i64) -> Option<&str> {
        usize::try_from(code)
            .ok()
            .and_then(|idx| self.labels.get(idx))
            .map(String::as_str)
    }

    /// Code given to missing cells, if the column had any.
    pub fn missing_code(&self) -> Option<i64> {
        self.code_of(MISSING_LABEL)
    }

    /// Returns true if `code` stands for a missing cell.
    pub fn is_missing_code(&self, code: i64) -> bool {
        self.missing_code() == Some(code)
    }

    /// Number of distinct labels.
    pub fn len(&self) -> usize {
        self.labels.len()
    }

    /// Returns true if no label has been assigned a code.
    pub fn is_empty(&self) -> bool {
        self.labels.is_empty()
    }

    /// Labels in code order.
    pub fn labels(&self) -> &[String] {
        &self.labels
    }

    /// Iterate `(code, label)` pairs in code order.
    pub fn iter(&self) -> impl Iterator<Item = (i64, &str)> {
        self.labels
            .iter()
            .enumerate()
            .map(|(idx, label)| (idx as i64, label.as_str()))
    }
}

impl TryFrom<BTreeMap<String, i64>> for CategoryMap {
    type Error = ModelError;

    fn try_from(codes: BTreeMap<String, i64>) -> Result<Self, Self::Error> {
        let mut labels = vec![None; codes.len()];
        for (label, code) in &codes {
            let slot = usize::try_from(*code)
                .ok()
                .and_then(|idx| labels.get_mut(idx))
                .ok_or_else(|| {
                    ModelError::InvalidCategoryMap(format!(
                        "code {code} for '{label}' is outside 0..{}",
                        codes.len()
                    ))
                })?;
            if slot.is_some() {
                return Err(ModelError::InvalidCategoryMap(format!(
                    "code {code} is assigned twice"
                )));
            }
            *slot = Some(label.clone());
        }
        Ok(Self {
            labels: labels.into_iter().flatten().collect(),
            codes,
        })
    }
}

impl From<CategoryMap> for BTreeMap<String, i64> {
    fn from(map: CategoryMap) -> Self {
        map.codes
    }
}

/// Category maps for every encoded column, keyed by column name.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Encodings {
    columns: BTreeMap<String, CategoryMap>,
}

impl Encodings {
    /// Create an empty set of encodings.
    pub fn new() -> Self {
        Self::default()
    }

    /// Record the map for `column`, replacing any previous one.
    pub fn insert(&mut self, column: impl Into<String>, map: CategoryMap) {
        self.columns.insert(column.into(), map);
    }

    /// Map for `column`, if that column was encoded.
    pub fn get(&self, column: &str) -> Option<&CategoryMap> {
        self.columns.get(column)
    }

    /// Returns true if `column` was encoded.
    pub fn contains(&self, column: &str) -> bool {
        self.columns.contains_key(column)
    }

    /// Names of the encoded columns, sorted.
    pub fn column_names(&self) -> impl Iterator<Item = &str> {
        self.columns.keys().map(String::as_str)
    }

    /// Iterate `(column, map)` pairs sorted by column name.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &CategoryMap)> {
        self.columns.iter().map(|(name, map)| (name.as_str(), map))
    }

    /// Number of encoded columns.
    pub fn len(&self) -> usize {
        self.columns.len()
    }

    /// Returns true if nothing was encoded.
    pub fn is_empty(&self) -> bool {
        self.columns.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn first_seen_order_assigns_codes_in_appearance_order() {
        let map = CategoryMap::fit(
            ["Overweight", "Normal", "Normal", "Obese"],
            EncodingOrder::FirstSeen,
        );
        assert_eq!(map.code_of("Overweight"), Some(0));
        assert_eq!(map.code_of("Normal"), Some(1));
        assert_eq!(map.code_of("Obese"), Some(2));
        assert_eq!(map.len(), 3);
    }

    #[test]
    fn sorted_order_assigns_codes_lexicographically() {
        let map = CategoryMap::fit(
            ["Sleep Apnea", "None", "Insomnia", "None"],
            EncodingOrder::Sorted,
        );
        assert_eq!(map.labels(), ["Insomnia", "None", "Sleep Apnea"]);
    }

    #[test]
    fn label_of_rejects_unknown_codes() {
        let map = CategoryMap::fit(["Male", "Female"], EncodingOrder::FirstSeen);
        assert_eq!(map.label_of(1), Some("Female"));
        assert_eq!(map.label_of(2), None);
        assert_eq!(map.label_of(-1), None);
    }

    #[test]
    fn serializes_as_label_to_code_object() {
        let map = CategoryMap::fit(["Male", "Female"], EncodingOrder::FirstSeen);
        let json = serde_json::to_string(&map).expect("serialize map");
        assert_eq!(json, r#"{"Female":1,"Male":0}"#);
        let round: CategoryMap = serde_json::from_str(&json).expect("deserialize map");
        assert_eq!(round, map);
    }

    #[test]
    fn missing_label_is_an_ordinary_code() {
        let map = CategoryMap::fit(["Insomnia", MISSING_LABEL, "Sleep Apnea"], EncodingOrder::FirstSeen);
        assert_eq!(map.missing_code(), Some(1));
        assert!(map.is_missing_code(1));
        assert!(!map.is_missing_code(0));
        assert_eq!(CategoryMap::fit(["Male"], EncodingOrder::FirstSeen).missing_code(), None);
    }

    #[test]
    fn deserialize_rejects_gaps_in_codes() {
        let result: Result<CategoryMap, _> = serde_json::from_str(r#"{"a":0,"b":2}"#);
        assert!(result.is_err());
    }

    #[test]
    fn encodings_are_keyed_by_column() {
        let mut encodings = Encodings::new();
        encodings.insert(
            "Gender",
            CategoryMap::fit(["Male", "Female"], EncodingOrder::FirstSeen),
        );
        assert!(encodings.contains("Gender"));
        assert!(!encodings.contains("Occupation"));
        assert_eq!(encodings.column_names().collect::<Vec<_>>(), ["Gender"]);
    }
}
