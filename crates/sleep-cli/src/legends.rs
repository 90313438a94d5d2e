//! Display labels for encoded columns.

use std::collections::BTreeMap;

use sleep_chart::ColumnLabels;
use sleep_model::columns::{BMI_CATEGORY, SLEEP_DISORDER};
use sleep_model::{CodeLabels, Encodings};

/// Where legend text for encoded columns comes from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LegendSource {
    /// Labels recorded by the encoder, rewritten through the display aliases.
    #[default]
    Encoded,
    /// Fixed BMI and sleep-disorder tables; other columns still use the encoder.
    Static,
}

/// Labels for every encoded column.
pub fn column_labels(
    encodings: &Encodings,
    aliases: &BTreeMap<String, String>,
    source: LegendSource,
) -> ColumnLabels {
    let mut labels: ColumnLabels = encodings
        .iter()
        .map(|(column, map)| (column.to_string(), CodeLabels::from_category_map(map, aliases)))
        .collect();
    if source == LegendSource::Static {
        labels.insert(BMI_CATEGORY.to_string(), CodeLabels::bmi_default());
        labels.insert(SLEEP_DISORDER.to_string(), CodeLabels::sleep_disorder_default());
    }
    labels
}

/// Labels for `column`, or an empty table when it was not encoded.
pub fn labels_for(labels: &ColumnLabels, column: &str) -> CodeLabels {
    labels.get(column).cloned().unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;
    use sleep_model::{CategoryMap, EncodingOrder};

    fn encodings() -> Encodings {
        let mut encodings = Encodings::new();
        encodings.insert(
            SLEEP_DISORDER,
            CategoryMap::fit(["Sleep Apnea", "None", "Insomnia"], EncodingOrder::FirstSeen),
        );
        encodings.insert(
            "Gender",
            CategoryMap::fit(["Male", "Female"], EncodingOrder::FirstSeen),
        );
        encodings
    }

    fn aliases() -> BTreeMap<String, String> {
        BTreeMap::from([
            ("None".to_string(), "No Disorder".to_string()),
            ("Sleep Apnea".to_string(), "Apnea".to_string()),
        ])
    }

    #[test]
    fn encoded_legends_follow_the_recorded_codes() {
        let labels = column_labels(&encodings(), &aliases(), LegendSource::Encoded);

        let disorder = &labels[SLEEP_DISORDER];
        assert_eq!(disorder.label_for(0), Some("Apnea"));
        assert_eq!(disorder.label_for(1), Some("No Disorder"));
        assert_eq!(labels["Gender"].label_for(1), Some("Female"));
        assert!(!labels.contains_key(BMI_CATEGORY));
    }

    #[test]
    fn static_legends_override_bmi_and_disorder_only() {
        let labels = column_labels(&encodings(), &aliases(), LegendSource::Static);

        assert_eq!(labels[SLEEP_DISORDER], CodeLabels::sleep_disorder_default());
        assert_eq!(labels[BMI_CATEGORY], CodeLabels::bmi_default());
        assert_eq!(labels["Gender"].label_for(0), Some("Male"));
    }

    #[test]
    fn missing_column_gets_empty_labels() {
        let labels = column_labels(&Encodings::new(), &aliases(), LegendSource::Encoded);
        assert!(labels_for(&labels, BMI_CATEGORY).is_empty());
    }
}
