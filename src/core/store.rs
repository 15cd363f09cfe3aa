//! In-memory algorithm store.
//!
//! The store never edits a record in place. Every accepted mutation builds a new
//! [`Snapshot`] that shares the untouched records with its predecessor and carries
//! a freshly built copy of the one record that changed. Anyone still holding an
//! older snapshot keeps seeing a complete, consistent collection.

use std::sync::Arc;

use hashbrown::HashMap;
use tracing::{debug, warn};

use crate::error::{Result, VizError};
use crate::model::{Algorithm, Iteration, Metrics};
use crate::prng::RandomSource;

/// Outcome of a store mutation that did not fail validation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mutation {
    /// A new snapshot with this version is now current.
    Applied { version: u64 },
    /// No record has the requested id; the store is untouched.
    NotFound,
}

impl Mutation {
    pub fn is_applied(self) -> bool {
        matches!(self, Mutation::Applied { .. })
    }
}

/// Immutable view of the whole collection at one version.
#[derive(Debug, Clone)]
pub struct Snapshot {
    algorithms: Arc<[Arc<Algorithm>]>,
    index: Arc<HashMap<String, usize>>,
    version: u64,
}

impl Snapshot {
    pub fn version(&self) -> u64 {
        self.version
    }

    pub fn len(&self) -> usize {
        self.algorithms.len()
    }

    pub fn is_empty(&self) -> bool {
        self.algorithms.is_empty()
    }

    pub fn get(&self, id: &str) -> Option<&Algorithm> {
        self.position(id).map(|i| self.algorithms[i].as_ref())
    }

    /// Records in their original definition order.
    pub fn iter(&self) -> impl Iterator<Item = &Algorithm> + '_ {
        self.algorithms.iter().map(|a| a.as_ref())
    }

    #[cfg(test)]
    fn shared(&self, id: &str) -> Option<Arc<Algorithm>> {
        self.position(id).map(|i| Arc::clone(&self.algorithms[i]))
    }

    fn position(&self, id: &str) -> Option<usize> {
        self.index.get(id).copied()
    }

    /// New snapshot with the record at `pos` swapped for `record`.
    fn with_record(&self, pos: usize, record: Algorithm) -> Snapshot {
        let mut algorithms: Vec<Arc<Algorithm>> = self.algorithms.iter().cloned().collect();
        algorithms[pos] = Arc::new(record);
        Snapshot {
            algorithms: algorithms.into(),
            index: Arc::clone(&self.index),
            version: self.version + 1,
        }
    }
}

#[derive(Debug, Clone)]
pub struct AlgorithmStore {
    current: Snapshot,
}

impl AlgorithmStore {
    /// Build the store from static definitions. Every record is validated and ids
    /// must be unique.
    pub fn new(algorithms: Vec<Algorithm>) -> Result<Self> {
        let mut index = HashMap::with_capacity(algorithms.len());
        for (i, algo) in algorithms.iter().enumerate() {
            algo.validate()?;
            if index.insert(algo.id.clone(), i).is_some() {
                return Err(VizError::DuplicateAlgorithm {
                    id: algo.id.clone(),
                });
            }
        }

        debug!(count = algorithms.len(), "algorithm store initialized");

        let algorithms: Vec<Arc<Algorithm>> = algorithms.into_iter().map(Arc::new).collect();
        Ok(Self {
            current: Snapshot {
                algorithms: algorithms.into(),
                index: Arc::new(index),
                version: 0,
            },
        })
    }

    /// Cheap clone of the current snapshot.
    pub fn snapshot(&self) -> Snapshot {
        self.current.clone()
    }

    pub fn version(&self) -> u64 {
        self.current.version
    }

    pub fn len(&self) -> usize {
        self.current.len()
    }

    pub fn is_empty(&self) -> bool {
        self.current.is_empty()
    }

    pub fn get(&self, id: &str) -> Option<&Algorithm> {
        self.current.get(id)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Algorithm> + '_ {
        self.current.iter()
    }

    /// Set `current_epochs` and regenerate the iteration history with simulated
    /// metrics. Chart geometry is left as it is.
    ///
    /// Unknown ids are a no-op. `epochs` must lie in `1..=max_epochs`.
    pub fn update_epochs(
        &mut self,
        id: &str,
        epochs: u32,
        rng: &mut impl RandomSource,
    ) -> Result<Mutation> {
        let Some(pos) = self.current.position(id) else {
            debug!(id, "update_epochs: unknown algorithm, nothing to do");
            return Ok(Mutation::NotFound);
        };
        let old = &self.current.algorithms[pos];

        if epochs == 0 {
            warn!(id, "update_epochs: rejected zero epochs");
            return Err(VizError::InvalidEpochs {
                algorithm_id: id.to_string(),
            });
        }
        if epochs > old.max_epochs {
            warn!(id, epochs, max = old.max_epochs, "update_epochs: beyond max_epochs");
            return Err(VizError::EpochsOutOfRange {
                algorithm_id: id.to_string(),
                epochs,
                max_epochs: old.max_epochs,
            });
        }

        let names = old.metric_names();
        let record = Algorithm {
            current_epochs: epochs,
            iterations: simulate_iterations(&names, epochs, rng),
            ..Algorithm::clone(old)
        };

        self.current = self.current.with_record(pos, record);
        debug!(id, epochs, version = self.current.version, "epochs updated");
        Ok(Mutation::Applied {
            version: self.current.version,
        })
    }

    /// Point an algorithm at another of its datasets.
    ///
    /// Unknown algorithm ids are a no-op. A dataset id the algorithm does not
    /// offer is rejected and leaves the store untouched.
    pub fn change_dataset(&mut self, algorithm_id: &str, dataset_id: &str) -> Result<Mutation> {
        let Some(pos) = self.current.position(algorithm_id) else {
            debug!(algorithm_id, "change_dataset: unknown algorithm, nothing to do");
            return Ok(Mutation::NotFound);
        };
        let old = &self.current.algorithms[pos];

        if old.dataset(dataset_id).is_none() {
            warn!(algorithm_id, dataset_id, "change_dataset: dataset not offered");
            return Err(VizError::dangling(algorithm_id, dataset_id));
        }

        let record = Algorithm {
            selected_dataset_id: dataset_id.to_string(),
            ..Algorithm::clone(old)
        };

        self.current = self.current.with_record(pos, record);
        debug!(
            algorithm_id,
            dataset_id,
            version = self.current.version,
            "dataset selected"
        );
        Ok(Mutation::Applied {
            version: self.current.version,
        })
    }
}

/// Fresh iteration history of `epochs` entries over the given metric names.
///
/// Each value at epoch `i` is `u * 0.5 + (i / epochs) * 0.5` with an independent
/// draw `u` per metric, so the expected value climbs towards 1.0 while single runs
/// stay noisy.
pub fn simulate_iterations(
    names: &[String],
    epochs: u32,
    rng: &mut impl RandomSource,
) -> Vec<Iteration> {
    let total = epochs as f64;
    (1..=epochs)
        .map(|epoch| {
            let trend = epoch as f64 / total * 0.5;
            let metrics: Metrics = names
                .iter()
                .map(|name| (name.as_str(), rng.next_f64() * 0.5 + trend))
                .collect();
            Iteration { epoch, metrics }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::fixtures::algorithm;
    use crate::model::{AlgorithmType, Category};
    use crate::prng::testing::Scripted;
    use crate::prng::Prng;

    fn store() -> AlgorithmStore {
        AlgorithmStore::new(vec![
            algorithm("a", Category::Supervised, AlgorithmType::Classification),
            algorithm("b", Category::Unsupervised, AlgorithmType::Dimensionality),
            algorithm("c", Category::Supervised, AlgorithmType::Regression),
        ])
        .unwrap()
    }

    #[test]
    fn rejects_duplicate_ids() {
        let res = AlgorithmStore::new(vec![
            algorithm("a", Category::Supervised, AlgorithmType::Classification),
            algorithm("a", Category::Supervised, AlgorithmType::Regression),
        ]);
        assert!(matches!(res, Err(VizError::DuplicateAlgorithm { id }) if id == "a"));
    }

    #[test]
    fn rejects_invalid_records() {
        let mut bad = algorithm("a", Category::Supervised, AlgorithmType::Classification);
        bad.selected_dataset_id = "ghost".to_string();
        assert!(matches!(
            AlgorithmStore::new(vec![bad]),
            Err(VizError::DanglingReference { .. })
        ));

        let mut doubled = algorithm("a", Category::Supervised, AlgorithmType::Classification);
        doubled
            .available_datasets
            .push(crate::model::fixtures::dataset("d1"));
        assert!(matches!(
            AlgorithmStore::new(vec![doubled]),
            Err(VizError::DuplicateDataset { .. })
        ));

        let mut empty = algorithm("a", Category::Supervised, AlgorithmType::Classification);
        empty.available_datasets[0].samples = 0;
        assert!(matches!(
            AlgorithmStore::new(vec![empty]),
            Err(VizError::InvalidDataset { .. })
        ));
    }

    #[test]
    fn update_epochs_regenerates_iterations() {
        let mut s = store();
        let mut rng = Prng::new(1);
        for epochs in [5, 10, 20, 50, 100, 1] {
            let m = s.update_epochs("b", epochs, &mut rng).unwrap();
            assert!(m.is_applied());

            let b = s.get("b").unwrap();
            assert_eq!(b.current_epochs, epochs);
            assert_eq!(b.iterations.len(), epochs as usize);
            for (i, it) in b.iterations.iter().enumerate() {
                assert_eq!(it.epoch, i as u32 + 1);
                let names: Vec<&str> = it.metrics.names().collect();
                assert_eq!(names, vec!["accuracy", "loss"]);
            }
            b.validate().unwrap();
        }
    }

    #[test]
    fn update_epochs_uses_trend_formula() {
        let mut s = store();
        let mut rng = Scripted::constant(0.0);
        s.update_epochs("a", 4, &mut rng).unwrap();

        let a = s.get("a").unwrap();
        let acc: Vec<f64> = a
            .iterations
            .iter()
            .map(|it| it.metrics.get("accuracy").unwrap())
            .collect();
        assert_eq!(acc, vec![0.125, 0.25, 0.375, 0.5]);
        // Two metrics per epoch, one draw each.
        assert_eq!(rng.draws(), 8);
    }

    #[test]
    fn update_epochs_values_stay_in_band() {
        let mut s = store();
        let mut rng = Prng::new(9);
        s.update_epochs("a", 50, &mut rng).unwrap();
        for it in &s.get("a").unwrap().iterations {
            let floor = it.epoch as f64 / 50.0 * 0.5;
            for (_, v) in it.metrics.iter() {
                assert!(v >= floor && v < floor + 0.5, "value {v} outside band at epoch {}", it.epoch);
            }
        }
    }

    #[test]
    fn repeated_update_keeps_shape_not_values() {
        let mut s = store();
        let mut rng = Prng::new(21);
        s.update_epochs("a", 20, &mut rng).unwrap();
        let first = s.get("a").unwrap().clone();
        s.update_epochs("a", 20, &mut rng).unwrap();
        let second = s.get("a").unwrap();

        assert_eq!(first.current_epochs, second.current_epochs);
        let epochs_a: Vec<u32> = first.iterations.iter().map(|i| i.epoch).collect();
        let epochs_b: Vec<u32> = second.iterations.iter().map(|i| i.epoch).collect();
        assert_eq!(epochs_a, epochs_b);
        assert_ne!(first.iterations, second.iterations);
    }

    #[test]
    fn update_epochs_leaves_geometry_and_others_alone() {
        let mut s = store();
        let before = s.snapshot();
        s.update_epochs("a", 10, &mut Prng::new(2)).unwrap();

        let a_old = before.get("a").unwrap();
        let a_new = s.get("a").unwrap();
        assert_eq!(a_old.visualization, a_new.visualization);
        assert_eq!(a_old.selected_dataset_id, a_new.selected_dataset_id);
        assert_eq!(before.get("b"), s.get("b"));
        assert_eq!(before.get("c"), s.get("c"));
    }

    #[test]
    fn unknown_id_is_a_silent_noop() {
        let mut s = store();
        let before = s.snapshot();
        let mut rng = Scripted::constant(0.3);

        assert_eq!(s.update_epochs("zzz", 10, &mut rng).unwrap(), Mutation::NotFound);
        assert_eq!(s.change_dataset("zzz", "d2").unwrap(), Mutation::NotFound);
        assert_eq!(rng.draws(), 0);
        assert_eq!(s.version(), before.version());
        for (x, y) in before.iter().zip(s.iter()) {
            assert_eq!(x, y);
        }
    }

    #[test]
    fn update_epochs_validates_range() {
        let mut s = store();
        let mut rng = Prng::new(1);
        assert!(matches!(
            s.update_epochs("a", 0, &mut rng),
            Err(VizError::InvalidEpochs { .. })
        ));
        assert!(matches!(
            s.update_epochs("a", 101, &mut rng),
            Err(VizError::EpochsOutOfRange { max_epochs: 100, .. })
        ));
        assert_eq!(s.version(), 0);
        assert_eq!(s.get("a").unwrap().current_epochs, 5);
    }

    #[test]
    fn change_dataset_touches_only_selection() {
        let mut s = store();
        let before = s.get("a").unwrap().clone();
        let m = s.change_dataset("a", "d2").unwrap();
        assert_eq!(m, Mutation::Applied { version: 1 });

        let after = s.get("a").unwrap();
        assert_eq!(after.selected_dataset_id, "d2");
        let mut expected = before;
        expected.selected_dataset_id = "d2".to_string();
        assert_eq!(&expected, after);
    }

    #[test]
    fn change_dataset_rejects_foreign_dataset() {
        let mut s = store();
        let res = s.change_dataset("a", "iris");
        assert!(matches!(res, Err(VizError::DanglingReference { .. })));
        assert_eq!(s.version(), 0);
        assert_eq!(s.get("a").unwrap().selected_dataset_id, "d1");
    }

    #[test]
    fn old_snapshots_are_stable() {
        let mut s = store();
        let v0 = s.snapshot();
        s.change_dataset("b", "d2").unwrap();
        s.update_epochs("b", 20, &mut Prng::new(4)).unwrap();

        assert_eq!(v0.version(), 0);
        assert_eq!(v0.get("b").unwrap().selected_dataset_id, "d1");
        assert_eq!(v0.get("b").unwrap().iterations.len(), 5);
        assert_eq!(s.version(), 2);
        assert_eq!(s.get("b").unwrap().iterations.len(), 20);
    }

    #[test]
    fn untouched_records_are_shared_between_snapshots() {
        let mut s = store();
        let v0 = s.snapshot();
        s.change_dataset("a", "d2").unwrap();
        let v1 = s.snapshot();

        let b0 = v0.shared("b").unwrap();
        let b1 = v1.shared("b").unwrap();
        assert!(Arc::ptr_eq(&b0, &b1));
        assert!(!Arc::ptr_eq(&v0.shared("a").unwrap(), &v1.shared("a").unwrap()));
    }

    #[test]
    fn empty_history_regenerates_without_metrics() {
        let mut a = algorithm("a", Category::Supervised, AlgorithmType::Classification);
        a.iterations = crate::model::fixtures::iterations(5, &[]);
        let mut s = AlgorithmStore::new(vec![a]).unwrap();
        s.update_epochs("a", 10, &mut Prng::new(3)).unwrap();

        let a = s.get("a").unwrap();
        assert_eq!(a.iterations.len(), 10);
        assert!(a.iterations.iter().all(|it| it.metrics.is_empty()));
    }

    #[test]
    fn order_is_preserved() {
        let s = store();
        let ids: Vec<&str> = s.iter().map(|a| a.id.as_str()).collect();
        assert_eq!(ids, vec!["a", "b", "c"]);
    }
}
