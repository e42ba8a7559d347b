use std::collections::BTreeSet;

use crate::domain::features::N_FEATURES;
use crate::domain::record::TrainingRecord;

/// Feature matrix plus label-encoded targets.
///
/// `classes` is sorted and deduplicated; `labels[i]` indexes into it.
#[derive(Debug, Clone)]
pub struct LabeledDataset {
    pub rows:    Vec<[f64; N_FEATURES]>,
    pub labels:  Vec<usize>,
    pub classes: Vec<String>,
}

impl LabeledDataset {
    pub fn from_records(records: &[TrainingRecord]) -> Self {
        let classes: Vec<String> = records
            .iter()
            .map(|r| r.crop.clone())
            .collect::<BTreeSet<_>>()
            .into_iter()
            .collect();

        let rows = records.iter().map(|r| r.features().to_row()).collect();
        let labels = records
            .iter()
            .map(|r| classes.binary_search(&r.crop).unwrap_or_default())
            .collect();

        Self { rows, labels, classes }
    }

    pub fn len(&self) -> usize { self.rows.len() }

    pub fn is_empty(&self) -> bool { self.rows.is_empty() }

    pub fn n_classes(&self) -> usize { self.classes.len() }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_classes_sorted_and_labels_encoded() {
        let records = vec![
            TrainingRecord::new(25.0, 100.0, 6.5, "rice"),
            TrainingRecord::new(22.0, 60.0, 6.0, "maize"),
            TrainingRecord::new(24.0, 90.0, 6.4, "rice"),
        ];
        let ds = LabeledDataset::from_records(&records);
        assert_eq!(ds.classes, vec!["maize", "rice"]);
        assert_eq!(ds.labels, vec![1, 0, 1]);
        assert_eq!(ds.rows[1], [22.0, 60.0, 6.0]);
        assert_eq!(ds.n_classes(), 2);
    }

    #[test]
    fn test_empty_records() {
        let ds = LabeledDataset::from_records(&[]);
        assert!(ds.is_empty());
        assert_eq!(ds.n_classes(), 0);
    }
}
