//! Code-to-label tables for chart legends and axes.
//!
//! These tables never touch stored data. Charts use them to render a
//! relabeled copy of an encoded column.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::category::CategoryMap;

/// Display label per category code.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CodeLabels {
    labels: BTreeMap<i64, String>,
}

impl CodeLabels {
    /// Create an empty table.
    pub fn new() -> Self {
        Self::default()
    }

    /// Static BMI legend: `0 = Normal, 1 = Overweight, 2 = Obese`.
    pub fn bmi_default() -> Self {
        Self::from_pairs([(0, "Normal"), (1, "Overweight"), (2, "Obese")])
    }

    /// Static sleep-disorder legend: `0 = No Disorder, 1 = Insomnia, 2 = Apnea`.
    pub fn sleep_disorder_default() -> Self {
        Self::from_pairs([(0, "No Disorder"), (1, "Insomnia"), (2, "Apnea")])
    }

    /// Build a table from `(code, label)` pairs.
    pub fn from_pairs<'a, I>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (i64, &'a str)>,
    {
        Self {
            labels: pairs
                .into_iter()
                .map(|(code, label)| (code, label.to_string()))
                .collect(),
        }
    }

    /// Build a table from the map the encoder recorded for a column.
    ///
    /// `aliases` rewrites raw labels into friendlier display text, e.g.
    /// `"None" -> "No Disorder"`; labels without an alias are used as-is.
    pub fn from_category_map(map: &CategoryMap, aliases: &BTreeMap<String, String>) -> Self {
        Self {
            labels: map
                .iter()
                .map(|(code, label)| {
                    let display = aliases.get(label).map_or(label, String::as_str);
                    (code, display.to_string())
                })
                .collect(),
        }
    }

    /// Set the label for `code`.
    pub fn insert(&mut self, code: i64, label: impl Into<String>) {
        self.labels.insert(code, label.into());
    }

    /// Display label for `code`, if one is defined.
    pub fn label_for(&self, code: i64) -> Option<&str> {
        self.labels.get(&code).map(String::as_str)
    }

    /// Number of codes with a label.
    pub fn len(&self) -> usize {
        self.labels.len()
    }

    /// Returns true if no code has a label.
    pub fn is_empty(&self) -> bool {
        self.labels.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::category::EncodingOrder;

    #[test]
    fn static_tables_match_documented_legends() {
        let bmi = CodeLabels::bmi_default();
        assert_eq!(bmi.label_for(0), Some("Normal"));
        assert_eq!(bmi.label_for(2), Some("Obese"));
        let disorder = CodeLabels::sleep_disorder_default();
        assert_eq!(disorder.label_for(0), Some("No Disorder"));
        assert_eq!(disorder.label_for(2), Some("Apnea"));
        assert_eq!(disorder.label_for(3), None);
    }

    #[test]
    fn category_map_labels_apply_aliases() {
        let map = CategoryMap::fit(["None", "Sleep Apnea", "Insomnia"], EncodingOrder::FirstSeen);
        let aliases = BTreeMap::from([
            ("None".to_string(), "No Disorder".to_string()),
            ("Sleep Apnea".to_string(), "Apnea".to_string()),
        ]);
        let labels = CodeLabels::from_category_map(&map, &aliases);
        assert_eq!(labels.label_for(0), Some("No Disorder"));
        assert_eq!(labels.label_for(1), Some("Apnea"));
        assert_eq!(labels.label_for(2), Some("Insomnia"));
        assert_eq!(labels.len(), 3);
    }
}
