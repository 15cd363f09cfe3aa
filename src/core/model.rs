//! Data model for the dashboard: datasets, algorithm records, chart payloads and
//! per-epoch metric snapshots.

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::error::{Result, VizError};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum Category {
    Supervised,
    Unsupervised,
}

impl Category {
    pub fn label(self) -> &'static str {
        match self {
            Category::Supervised => "supervised",
            Category::Unsupervised => "unsupervised",
        }
    }

    pub fn all() -> &'static [Category] {
        &[Category::Supervised, Category::Unsupervised]
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum AlgorithmType {
    Regression,
    Classification,
    Clustering,
    Dimensionality,
}

impl AlgorithmType {
    pub fn label(self) -> &'static str {
        match self {
            AlgorithmType::Regression => "regression",
            AlgorithmType::Classification => "classification",
            AlgorithmType::Clustering => "clustering",
            AlgorithmType::Dimensionality => "dimensionality",
        }
    }

    pub fn all() -> &'static [AlgorithmType] {
        &[
            AlgorithmType::Regression,
            AlgorithmType::Classification,
            AlgorithmType::Clustering,
            AlgorithmType::Dimensionality,
        ]
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum ChartKind {
    #[default]
    Scatter,
    Line,
    Bar,
}

impl ChartKind {
    pub fn label(self) -> &'static str {
        match self {
            ChartKind::Scatter => "scatter",
            ChartKind::Line => "line",
            ChartKind::Bar => "bar",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum PointShape {
    Circle,
    Star,
}

#[derive(Debug, Clone, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct SeriesStyle {
    pub background_color: String,
    pub border_color: String,
    /// Marker radius override; the charting surface default applies when unset.
    #[cfg_attr(feature = "serde", serde(default))]
    pub point_radius: Option<f64>,
    #[cfg_attr(feature = "serde", serde(default))]
    pub point_shape: Option<PointShape>,
}

impl SeriesStyle {
    pub fn new(background_color: &str, border_color: &str) -> Self {
        Self {
            background_color: background_color.to_string(),
            border_color: border_color.to_string(),
            point_radius: None,
            point_shape: None,
        }
    }

    pub fn with_marker(mut self, radius: f64, shape: PointShape) -> Self {
        self.point_radius = Some(radius);
        self.point_shape = Some(shape);
        self
    }
}

#[derive(Debug, Clone, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Series {
    pub label: String,
    pub points: Vec<Point>,
    pub style: SeriesStyle,
}

#[derive(Debug, Clone, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Visualization {
    pub kind: ChartKind,
    pub series: Vec<Series>,
}

#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Dataset {
    pub id: String,
    pub name: String,
    pub features: Vec<String>,
    pub samples: u32,
    pub source: String,
    pub description: String,
}

/// Metric name -> value, in insertion order.
///
/// Order matters: the metrics table header is read straight off the first
/// iteration, so two snapshots with the same names must list them the same way.
///
/// Serializes as a JSON object (`{"accuracy": 0.5, ...}`) with keys in that order.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Metrics(Vec<(String, f64)>);

impl Metrics {
    pub fn new() -> Self {
        Self(Vec::new())
    }

    /// Insert or overwrite. New names go to the end.
    pub fn insert(&mut self, name: &str, value: f64) {
        match self.0.iter_mut().find(|(n, _)| n == name) {
            Some(slot) => slot.1 = value,
            None => self.0.push((name.to_string(), value)),
        }
    }

    pub fn get(&self, name: &str) -> Option<f64> {
        self.0.iter().find(|(n, _)| n == name).map(|(_, v)| *v)
    }

    pub fn names(&self) -> impl Iterator<Item = &str> + '_ {
        self.0.iter().map(|(n, _)| n.as_str())
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, f64)> + '_ {
        self.0.iter().map(|(n, v)| (n.as_str(), *v))
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Same names in the same order.
    pub fn same_keys(&self, other: &Metrics) -> bool {
        self.names().eq(other.names())
    }
}

#[cfg(feature = "serde")]
impl Serialize for Metrics {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        use serde::ser::SerializeMap;
        let mut map = serializer.serialize_map(Some(self.0.len()))?;
        for (name, value) in &self.0 {
            map.serialize_entry(name, value)?;
        }
        map.end()
    }
}

#[cfg(feature = "serde")]
impl<'de> Deserialize<'de> for Metrics {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        struct MetricsVisitor;

        impl<'de> serde::de::Visitor<'de> for MetricsVisitor {
            type Value = Metrics;

            fn expecting(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
                f.write_str("a map of metric name to number")
            }

            fn visit_map<A: serde::de::MapAccess<'de>>(
                self,
                mut access: A,
            ) -> std::result::Result<Metrics, A::Error> {
                let mut m = Metrics::new();
                while let Some((name, value)) = access.next_entry::<String, f64>()? {
                    m.insert(&name, value);
                }
                Ok(m)
            }
        }

        deserializer.deserialize_map(MetricsVisitor)
    }
}

impl<S: Into<String>> FromIterator<(S, f64)> for Metrics {
    fn from_iter<I: IntoIterator<Item = (S, f64)>>(iter: I) -> Self {
        let mut m = Metrics::new();
        for (name, value) in iter {
            let name: String = name.into();
            m.insert(&name, value);
        }
        m
    }
}

#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Iteration {
    pub epoch: u32,
    pub metrics: Metrics,
}

#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Algorithm {
    pub id: String,
    pub name: String,
    pub category: Category,
    #[cfg_attr(feature = "serde", serde(rename = "type"))]
    pub algorithm_type: AlgorithmType,
    pub description: String,
    pub available_datasets: Vec<Dataset>,
    pub selected_dataset_id: String,
    pub max_epochs: u32,
    pub current_epochs: u32,
    pub visualization: Visualization,
    pub iterations: Vec<Iteration>,
}

impl Algorithm {
    pub fn dataset(&self, dataset_id: &str) -> Option<&Dataset> {
        self.available_datasets.iter().find(|d| d.id == dataset_id)
    }

    /// The dataset `selected_dataset_id` points at.
    pub fn selected_dataset(&self) -> Result<&Dataset> {
        self.dataset(&self.selected_dataset_id)
            .ok_or_else(|| VizError::dangling(&self.id, &self.selected_dataset_id))
    }

    /// Metric names in table-header order (empty when there are no iterations).
    pub fn metric_names(&self) -> Vec<String> {
        self.iterations
            .first()
            .map(|it| it.metrics.names().map(str::to_string).collect())
            .unwrap_or_default()
    }

    /// Check every record invariant: datasets present, unique, non-empty and
    /// resolvable, epoch bounds, contiguous 1-based iteration numbering and a
    /// uniform metric key set.
    pub fn validate(&self) -> Result<()> {
        if self.available_datasets.is_empty() {
            return Err(VizError::NoDatasets {
                algorithm_id: self.id.clone(),
            });
        }
        for (i, d) in self.available_datasets.iter().enumerate() {
            if self.available_datasets[..i].iter().any(|prev| prev.id == d.id) {
                return Err(VizError::DuplicateDataset {
                    algorithm_id: self.id.clone(),
                    dataset_id: d.id.clone(),
                });
            }
            if d.samples == 0 {
                return Err(VizError::InvalidDataset {
                    algorithm_id: self.id.clone(),
                    dataset_id: d.id.clone(),
                    reason: "samples must be > 0",
                });
            }
        }
        self.selected_dataset()?;

        if self.current_epochs == 0 || self.max_epochs == 0 {
            return Err(VizError::InvalidEpochs {
                algorithm_id: self.id.clone(),
            });
        }
        if self.current_epochs > self.max_epochs {
            return Err(VizError::EpochsOutOfRange {
                algorithm_id: self.id.clone(),
                epochs: self.current_epochs,
                max_epochs: self.max_epochs,
            });
        }

        if self.iterations.len() != self.current_epochs as usize {
            return Err(VizError::IterationsOutOfSync {
                algorithm_id: self.id.clone(),
                detail: format!(
                    "{} iterations for current_epochs {}",
                    self.iterations.len(),
                    self.current_epochs
                ),
            });
        }

        for (i, it) in self.iterations.iter().enumerate() {
            let expected = i as u32 + 1;
            if it.epoch != expected {
                return Err(VizError::IterationsOutOfSync {
                    algorithm_id: self.id.clone(),
                    detail: format!("position {i} holds epoch {} (expected {expected})", it.epoch),
                });
            }
        }

        if let Some((first, rest)) = self.iterations.split_first() {
            if let Some(bad) = rest.iter().find(|it| !it.metrics.same_keys(&first.metrics)) {
                return Err(VizError::InconsistentMetrics {
                    algorithm_id: self.id.clone(),
                    epoch: bad.epoch,
                });
            }
        }

        Ok(())
    }
}

#[cfg(test)]
pub(crate) mod fixtures {
    use super::*;

    pub(crate) fn dataset(id: &str) -> Dataset {
        Dataset {
            id: id.to_string(),
            name: format!("{id} name"),
            features: vec!["a".to_string(), "b".to_string()],
            samples: 10,
            source: "fixture".to_string(),
            description: format!("{id} description"),
        }
    }

    pub(crate) fn iterations(n: u32, names: &[&str]) -> Vec<Iteration> {
        (1..=n)
            .map(|epoch| Iteration {
                epoch,
                metrics: names.iter().map(|&name| (name, epoch as f64 / 10.0)).collect(),
            })
            .collect()
    }

    pub(crate) fn algorithm(
        id: &str,
        category: Category,
        algorithm_type: AlgorithmType,
    ) -> Algorithm {
        Algorithm {
            id: id.to_string(),
            name: id.to_uppercase(),
            category,
            algorithm_type,
            description: String::new(),
            available_datasets: vec![dataset("d1"), dataset("d2")],
            selected_dataset_id: "d1".to_string(),
            max_epochs: 100,
            current_epochs: 5,
            visualization: Visualization {
                kind: ChartKind::Scatter,
                series: vec![Series {
                    label: "s".to_string(),
                    points: vec![Point::new(1.0, 2.0), Point::new(3.0, 4.0)],
                    style: SeriesStyle::new("#000", "#fff"),
                }],
            },
            iterations: iterations(5, &["accuracy", "loss"]),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::fixtures::*;
    use super::*;

    #[test]
    fn metrics_keep_insertion_order() {
        let mut m = Metrics::new();
        m.insert("zeta", 1.0);
        m.insert("alpha", 2.0);
        m.insert("zeta", 3.0);
        let names: Vec<&str> = m.names().collect();
        assert_eq!(names, vec!["zeta", "alpha"]);
        assert_eq!(m.get("zeta"), Some(3.0));
        assert_eq!(m.get("missing"), None);
    }

    #[test]
    fn fixture_is_valid() {
        let a = algorithm("x", Category::Supervised, AlgorithmType::Classification);
        a.validate().unwrap();
        assert_eq!(a.metric_names(), vec!["accuracy", "loss"]);
    }

    #[test]
    fn selected_dataset_must_resolve() {
        let mut a = algorithm("x", Category::Supervised, AlgorithmType::Classification);
        a.selected_dataset_id = "nope".to_string();
        match a.selected_dataset() {
            Err(VizError::DanglingReference {
                algorithm_id,
                dataset_id,
            }) => {
                assert_eq!(algorithm_id, "x");
                assert_eq!(dataset_id, "nope");
            }
            other => panic!("expected DanglingReference, got {other:?}"),
        }
        assert!(a.validate().is_err());
    }

    #[test]
    fn validate_rejects_iteration_gaps() {
        let mut a = algorithm("x", Category::Supervised, AlgorithmType::Classification);
        a.iterations[2].epoch = 7;
        assert!(matches!(
            a.validate(),
            Err(VizError::IterationsOutOfSync { .. })
        ));

        let mut b = algorithm("y", Category::Supervised, AlgorithmType::Classification);
        b.iterations.pop();
        assert!(matches!(
            b.validate(),
            Err(VizError::IterationsOutOfSync { .. })
        ));
    }

    #[test]
    fn validate_rejects_mixed_metric_sets() {
        let mut a = algorithm("x", Category::Supervised, AlgorithmType::Classification);
        a.iterations[3].metrics.insert("extra", 0.0);
        assert!(matches!(
            a.validate(),
            Err(VizError::InconsistentMetrics { epoch: 4, .. })
        ));
    }

    #[test]
    fn validate_rejects_empty_datasets_and_epoch_bounds() {
        let mut a = algorithm("x", Category::Supervised, AlgorithmType::Classification);
        a.available_datasets.clear();
        assert!(matches!(a.validate(), Err(VizError::NoDatasets { .. })));

        let mut b = algorithm("y", Category::Supervised, AlgorithmType::Classification);
        b.max_epochs = 3;
        assert!(matches!(
            b.validate(),
            Err(VizError::EpochsOutOfRange { .. })
        ));
    }

    #[test]
    fn validate_rejects_duplicate_dataset_ids() {
        let mut a = algorithm("x", Category::Supervised, AlgorithmType::Classification);
        a.available_datasets.push(dataset("d1"));
        match a.validate() {
            Err(VizError::DuplicateDataset {
                algorithm_id,
                dataset_id,
            }) => {
                assert_eq!(algorithm_id, "x");
                assert_eq!(dataset_id, "d1");
            }
            other => panic!("expected DuplicateDataset, got {other:?}"),
        }
    }

    #[test]
    fn validate_rejects_empty_datasets_by_sample_count() {
        let mut a = algorithm("x", Category::Supervised, AlgorithmType::Classification);
        a.available_datasets[1].samples = 0;
        assert!(matches!(
            a.validate(),
            Err(VizError::InvalidDataset { dataset_id, .. }) if dataset_id == "d2"
        ));
    }

    #[cfg(feature = "serde")]
    #[test]
    fn metrics_serialize_as_ordered_object() {
        let m: Metrics = [("loss", 0.25), ("accuracy", 0.5)].into_iter().collect();
        let json = serde_json::to_string(&m).unwrap();
        assert_eq!(json, r#"{"loss":0.25,"accuracy":0.5}"#);

        let back: Metrics = serde_json::from_str(&json).unwrap();
        assert_eq!(back.names().collect::<Vec<_>>(), vec!["loss", "accuracy"]);
        assert_eq!(back, m);
    }

    #[test]
    fn metric_names_empty_without_iterations() {
        let mut a = algorithm("x", Category::Unsupervised, AlgorithmType::Clustering);
        a.iterations.clear();
        assert!(a.metric_names().is_empty());
    }
}
