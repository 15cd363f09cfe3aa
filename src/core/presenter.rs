//! Maps one algorithm record into what a card renders: chart payload, metrics
//! table, dataset panel, epoch selector and loading indicator.

use hashbrown::HashMap;

#[cfg(feature = "serde")]
use serde::Serialize;

use crate::config::DashboardConfig;
use crate::error::Result;
use crate::model::{Algorithm, AlgorithmType, Category, ChartKind, Series};
use crate::projector::capitalize;

/// Payload for the charting surface. Geometry is taken verbatim from the record.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize))]
pub struct ChartDescriptor {
    pub kind: ChartKind,
    pub series: Vec<Series>,
}

pub fn chart_descriptor(algo: &Algorithm) -> ChartDescriptor {
    ChartDescriptor {
        kind: algo.visualization.kind,
        series: algo.visualization.series.clone(),
    }
}

#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize))]
pub struct TableRow {
    pub epoch: u32,
    /// Raw values aligned with [`MetricsTable::columns`]; `None` where an iteration
    /// lacks that metric.
    pub values: Vec<Option<f64>>,
    /// Display strings aligned with [`MetricsTable::columns`].
    pub cells: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(Serialize))]
pub struct MetricsTable {
    /// Metric names from the first iteration. The epoch column is implicit.
    pub columns: Vec<String>,
    pub rows: Vec<TableRow>,
}

impl MetricsTable {
    pub const EPOCH_COLUMN: &'static str = "Epoch";
    pub const MISSING_CELL: &'static str = "-";

    pub fn is_empty(&self) -> bool {
        self.columns.is_empty() && self.rows.is_empty()
    }

    /// Header row including the leading epoch column.
    pub fn header(&self) -> Vec<&str> {
        if self.is_empty() {
            return Vec::new();
        }
        std::iter::once(Self::EPOCH_COLUMN)
            .chain(self.columns.iter().map(String::as_str))
            .collect()
    }
}

/// Rows ordered by epoch, cells formatted with `decimals` places.
///
/// A record without iterations yields an empty table.
pub fn metrics_table(algo: &Algorithm, decimals: usize) -> MetricsTable {
    let Some(first) = algo.iterations.first() else {
        return MetricsTable::default();
    };
    let columns: Vec<String> = first.metrics.names().map(str::to_string).collect();

    let mut iterations: Vec<_> = algo.iterations.iter().collect();
    iterations.sort_by_key(|it| it.epoch);

    let rows = iterations
        .into_iter()
        .map(|it| {
            let values: Vec<Option<f64>> = columns.iter().map(|c| it.metrics.get(c)).collect();
            let cells = values
                .iter()
                .map(|v| match v {
                    Some(v) => format_metric(*v, decimals),
                    None => MetricsTable::MISSING_CELL.to_string(),
                })
                .collect();
            TableRow {
                epoch: it.epoch,
                values,
                cells,
            }
        })
        .collect();

    MetricsTable { columns, rows }
}

pub fn format_metric(v: f64, decimals: usize) -> String {
    if v.is_nan() {
        return "NaN".to_string();
    }
    format!("{v:.decimals$}")
}

#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize))]
pub struct DatasetButton {
    pub id: String,
    pub name: String,
    pub active: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize))]
pub struct DatasetPanel {
    pub buttons: Vec<DatasetButton>,
    pub name: String,
    pub samples: u32,
    pub source: String,
    pub features: Vec<String>,
    pub description: String,
}

/// Dataset selector plus details of the selected dataset.
///
/// Fails with `DanglingReference` when the selection does not resolve.
pub fn dataset_panel(algo: &Algorithm) -> Result<DatasetPanel> {
    let selected = algo.selected_dataset()?;
    Ok(DatasetPanel {
        buttons: algo
            .available_datasets
            .iter()
            .map(|d| DatasetButton {
                id: d.id.clone(),
                name: d.name.clone(),
                active: d.id == selected.id,
            })
            .collect(),
        name: selected.name.clone(),
        samples: selected.samples,
        source: selected.source.clone(),
        features: selected.features.clone(),
        description: selected.description.clone(),
    })
}

#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize))]
pub struct EpochControl {
    pub current: u32,
    pub max: u32,
    /// Offered choices that fit under `max`.
    pub choices: Vec<u32>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(Serialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum LoadingState {
    #[default]
    Idle,
    Loading,
}

impl LoadingState {
    pub fn is_loading(self) -> bool {
        self == LoadingState::Loading
    }
}

/// Per-algorithm count of outstanding epoch-change requests.
///
/// `begin` on a request, `finish` once the store update resolved, whatever its
/// outcome. A card stays loading until every request it started has finished.
#[derive(Debug, Clone, Default)]
pub struct LoadingTracker {
    pending: HashMap<String, u32>,
}

impl LoadingTracker {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn begin(&mut self, id: &str) {
        *self.pending.entry(id.to_string()).or_insert(0) += 1;
    }

    /// Finishing an id with nothing outstanding is a no-op.
    pub fn finish(&mut self, id: &str) {
        if let Some(n) = self.pending.get_mut(id) {
            *n -= 1;
            if *n == 0 {
                self.pending.remove(id);
            }
        }
    }

    pub fn state(&self, id: &str) -> LoadingState {
        if self.pending.contains_key(id) {
            LoadingState::Loading
        } else {
            LoadingState::Idle
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize))]
pub struct AlgorithmCard {
    pub id: String,
    pub name: String,
    /// e.g. `supervised Learning - classification`.
    pub subtitle: String,
    pub description: String,
    pub category: Category,
    #[cfg_attr(feature = "serde", serde(rename = "type"))]
    pub algorithm_type: AlgorithmType,
    pub dataset: DatasetPanel,
    pub epochs: EpochControl,
    pub chart: ChartDescriptor,
    pub table: MetricsTable,
    pub loading: LoadingState,
}

pub fn present(
    algo: &Algorithm,
    loading: LoadingState,
    config: &DashboardConfig,
) -> Result<AlgorithmCard> {
    let dataset = dataset_panel(algo)?;
    Ok(AlgorithmCard {
        id: algo.id.clone(),
        name: algo.name.clone(),
        subtitle: format!(
            "{} Learning - {}",
            algo.category.label(),
            algo.algorithm_type.label()
        ),
        description: algo.description.clone(),
        category: algo.category,
        algorithm_type: algo.algorithm_type,
        dataset,
        epochs: EpochControl {
            current: algo.current_epochs,
            max: algo.max_epochs,
            choices: config
                .epoch_choices
                .iter()
                .copied()
                .filter(|&c| c <= algo.max_epochs)
                .collect(),
        },
        chart: chart_descriptor(algo),
        table: metrics_table(algo, config.metric_decimals),
        loading,
    })
}

/// Title-cased subtitle for surfaces that capitalise each part.
pub fn display_subtitle(card: &AlgorithmCard) -> String {
    format!(
        "{} Learning - {}",
        capitalize(card.category.label()),
        capitalize(card.algorithm_type.label())
    )
}
