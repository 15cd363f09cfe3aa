//! The dashboard session: single owner of the store, the filter selection, the
//! loading flags and the random source.
//!
//! UI events arrive as [`UserAction`]s and are applied one at a time. Every call
//! to [`Dashboard::render`] derives the whole view from the current snapshot, so
//! what the user sees always reflects the latest applied action.

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::catalog;
use crate::config::{ChartTheme, DashboardConfig};
use crate::error::{Result, VizError};
use crate::model::Algorithm;
use crate::prng::{Prng, RandomSource};
use crate::presenter::{self, AlgorithmCard, LoadingState, LoadingTracker};
use crate::projector::{self, CategoryFilter, FilterBar, FilterState, TypeFilter};
use crate::store::{AlgorithmStore, Mutation, Snapshot};

/// A discrete user interaction.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(tag = "type"))]
pub enum UserAction {
    SelectCategory {
        value: CategoryFilter,
    },
    SelectType {
        value: TypeFilter,
    },
    SelectDataset {
        algorithm_id: String,
        dataset_id: String,
    },
    SelectEpochs {
        algorithm_id: String,
        epochs: u32,
    },
}

/// An epoch change that has been requested but not yet applied.
///
/// Between [`Dashboard::request_epochs`] and [`Dashboard::complete_epochs`] the
/// card renders as loading.
#[derive(Debug, Clone, PartialEq, Eq)]
#[must_use = "a pending epoch change keeps its card loading until completed"]
pub struct PendingEpochs {
    algorithm_id: String,
    epochs: u32,
}

impl PendingEpochs {
    pub fn algorithm_id(&self) -> &str {
        &self.algorithm_id
    }

    pub fn epochs(&self) -> u32 {
        self.epochs
    }
}

/// Everything the page shows for one render pass.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize))]
pub struct DashboardView {
    pub version: u64,
    pub filters: FilterState,
    pub filter_bar: FilterBar,
    pub cards: Vec<AlgorithmCard>,
}

pub struct Dashboard<R: RandomSource = Prng> {
    store: AlgorithmStore,
    filters: FilterState,
    loading: LoadingTracker,
    rng: R,
    config: DashboardConfig,
}

impl Dashboard<Prng> {
    /// Session over the built-in catalog, seeded from `config.seed` (or the clock).
    pub fn with_config(config: DashboardConfig) -> Result<Self> {
        config.validate()?;
        let seed = config.seed.unwrap_or_else(clock_seed);
        info!(seed, "starting dashboard session");
        let mut rng = Prng::new(seed);
        let algorithms = catalog::seed_algorithms(&mut rng);
        Self::from_parts(algorithms, rng, config)
    }

    pub fn seeded(seed: u64) -> Result<Self> {
        Self::with_config(DashboardConfig::default().with_seed(seed))
    }
}

impl<R: RandomSource> Dashboard<R> {
    /// Session over arbitrary definitions with an explicit random source.
    pub fn from_parts(algorithms: Vec<Algorithm>, rng: R, config: DashboardConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self {
            store: AlgorithmStore::new(algorithms)?,
            filters: FilterState::default(),
            loading: LoadingTracker::new(),
            rng,
            config,
        })
    }

    pub fn config(&self) -> &DashboardConfig {
        &self.config
    }

    pub fn theme(&self) -> &ChartTheme {
        &self.config.theme
    }

    pub fn filters(&self) -> FilterState {
        self.filters
    }

    pub fn store(&self) -> &AlgorithmStore {
        &self.store
    }

    pub fn snapshot(&self) -> Snapshot {
        self.store.snapshot()
    }

    pub fn loading_state(&self, algorithm_id: &str) -> LoadingState {
        self.loading.state(algorithm_id)
    }

    /// Apply one user action.
    pub fn dispatch(&mut self, action: UserAction) -> Result<()> {
        debug!(?action, "dispatch");
        match action {
            UserAction::SelectCategory { value } => {
                self.select_category(value);
                Ok(())
            }
            UserAction::SelectType { value } => {
                self.select_type(value);
                Ok(())
            }
            UserAction::SelectDataset {
                algorithm_id,
                dataset_id,
            } => self.select_dataset(&algorithm_id, &dataset_id).map(|_| ()),
            UserAction::SelectEpochs {
                algorithm_id,
                epochs,
            } => self.select_epochs(&algorithm_id, epochs).map(|_| ()),
        }
    }

    pub fn select_category(&mut self, value: CategoryFilter) {
        self.filters.category = value;
    }

    pub fn select_type(&mut self, value: TypeFilter) {
        self.filters.algorithm_type = value;
    }

    pub fn select_dataset(&mut self, algorithm_id: &str, dataset_id: &str) -> Result<Mutation> {
        self.store.change_dataset(algorithm_id, dataset_id)
    }

    /// Request and immediately complete an epoch change.
    pub fn select_epochs(&mut self, algorithm_id: &str, epochs: u32) -> Result<Mutation> {
        let pending = self.request_epochs(algorithm_id, epochs)?;
        self.complete_epochs(pending)
    }

    /// First half of an epoch change: validate the choice and mark the card loading.
    pub fn request_epochs(&mut self, algorithm_id: &str, epochs: u32) -> Result<PendingEpochs> {
        if !self.config.allows_epochs(epochs) {
            return Err(VizError::UnsupportedEpochCount {
                epochs,
                choices: self.config.epoch_choices.clone(),
            });
        }
        self.loading.begin(algorithm_id);
        Ok(PendingEpochs {
            algorithm_id: algorithm_id.to_string(),
            epochs,
        })
    }

    /// Second half of an epoch change: run the store update, then clear the
    /// loading flag regardless of the outcome.
    pub fn complete_epochs(&mut self, pending: PendingEpochs) -> Result<Mutation> {
        let res = self
            .store
            .update_epochs(&pending.algorithm_id, pending.epochs, &mut self.rng);
        self.loading.finish(&pending.algorithm_id);
        res
    }

    /// Algorithms admitted by the current filters, in definition order.
    pub fn visible(&self) -> Vec<&Algorithm> {
        projector::project(self.store.iter(), &self.filters)
    }

    pub fn card(&self, algorithm_id: &str) -> Option<Result<AlgorithmCard>> {
        self.store.get(algorithm_id).map(|a| {
            presenter::present(a, self.loading.state(&a.id), &self.config)
        })
    }

    /// Full view for the current state. Any card that cannot be presented fails
    /// the whole render.
    pub fn render(&self) -> Result<DashboardView> {
        let cards = self
            .visible()
            .into_iter()
            .map(|a| presenter::present(a, self.loading.state(&a.id), &self.config))
            .collect::<Result<Vec<_>>>()?;
        Ok(DashboardView {
            version: self.store.version(),
            filters: self.filters,
            filter_bar: projector::filter_bar(&self.filters),
            cards,
        })
    }
}

fn clock_seed() -> u64 {
    use std::time::{SystemTime, UNIX_EPOCH};
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_nanos() as u64)
        .unwrap_or(Prng::DEFAULT_SEED)
}
