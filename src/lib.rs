//! # mlviz
//!
//! View-state core for a machine-learning algorithm dashboard.
//!
//! The crate owns a fixed collection of algorithm records (chart geometry,
//! dataset choices and a simulated per-epoch metric history), filters it by
//! category and type, and turns each record into a card payload that a UI
//! surface renders as a chart, a metrics table and a set of controls.
//!
//! ## Quick Start
//!
//! ```
//! use mlviz::prelude::*;
//!
//! let mut dash = Dashboard::seeded(42).unwrap();
//!
//! dash.dispatch(UserAction::SelectCategory {
//!     value: Filter::Only(Category::Supervised),
//! })
//! .unwrap();
//! dash.select_epochs("svm", 20).unwrap();
//!
//! let view = dash.render().unwrap();
//! assert_eq!(view.cards.len(), 4);
//! ```
//!
//! ## Feature Flags
//!
//! - `serde` (default): serialization of models, views and user actions, JSON config
//!
//! ## Modules
//!
//! - [`store`]: versioned algorithm records and their two mutations
//! - [`projector`]: category/type filtering
//! - [`presenter`]: card payloads and loading state
//! - [`session`]: the dashboard event loop owner

#[path = "core/error.rs"]
pub mod error;

#[path = "core/prng.rs"]
pub mod prng;

#[path = "core/model.rs"]
pub mod model;

#[path = "core/synth.rs"]
pub mod synth;

#[path = "core/catalog.rs"]
pub mod catalog;

#[path = "core/store.rs"]
pub mod store;

#[path = "core/projector.rs"]
pub mod projector;

#[path = "core/config.rs"]
pub mod config;

#[path = "core/presenter.rs"]
pub mod presenter;

#[path = "core/session.rs"]
pub mod session;

/// Prelude module for convenient imports.
///
/// ```
/// use mlviz::prelude::*;
/// ```
pub mod prelude {
    pub use crate::config::{ChartTheme, DashboardConfig};
    pub use crate::error::{Result, VizError};
    pub use crate::model::{
        Algorithm, AlgorithmType, Category, ChartKind, Dataset, Iteration, Metrics, Point, Series,
    };
    pub use crate::presenter::{AlgorithmCard, LoadingState, MetricsTable};
    pub use crate::prng::{Prng, RandomSource};
    pub use crate::projector::{CategoryFilter, Filter, FilterState, TypeFilter};
    pub use crate::session::{Dashboard, DashboardView, PendingEpochs, UserAction};
    pub use crate::store::{AlgorithmStore, Mutation, Snapshot};
}
