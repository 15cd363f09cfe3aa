//! Category/type filtering of the algorithm collection and the filter button rows.

use std::fmt;
use std::str::FromStr;

#[cfg(feature = "serde")]
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::error::VizError;
use crate::model::{Algorithm, AlgorithmType, Category};

/// One filter dimension: everything, or exactly one value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Filter<T> {
    All,
    Only(T),
}

impl<T> Default for Filter<T> {
    fn default() -> Self {
        Filter::All
    }
}

impl<T: PartialEq + Copy> Filter<T> {
    pub fn matches(&self, value: T) -> bool {
        match self {
            Filter::All => true,
            Filter::Only(wanted) => *wanted == value,
        }
    }
}

pub type CategoryFilter = Filter<Category>;
pub type TypeFilter = Filter<AlgorithmType>;

/// Filter values that carry a UI label.
pub trait FilterValue: Copy + PartialEq + 'static {
    const DIMENSION: &'static str;
    fn label(self) -> &'static str;
    fn values() -> &'static [Self];
}

impl FilterValue for Category {
    const DIMENSION: &'static str = "category";

    fn label(self) -> &'static str {
        Category::label(self)
    }

    fn values() -> &'static [Self] {
        Category::all()
    }
}

impl FilterValue for AlgorithmType {
    const DIMENSION: &'static str = "type";

    fn label(self) -> &'static str {
        AlgorithmType::label(self)
    }

    fn values() -> &'static [Self] {
        AlgorithmType::all()
    }
}

impl<T: FilterValue> Filter<T> {
    pub fn label(self) -> &'static str {
        match self {
            Filter::All => "all",
            Filter::Only(v) => v.label(),
        }
    }

    /// `All` followed by every concrete value, in button order.
    pub fn options() -> Vec<Filter<T>> {
        std::iter::once(Filter::All)
            .chain(T::values().iter().copied().map(Filter::Only))
            .collect()
    }
}

impl<T: FilterValue> FromStr for Filter<T> {
    type Err = VizError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim();
        Self::options()
            .into_iter()
            .find(|f| f.label().eq_ignore_ascii_case(wanted))
            .ok_or_else(|| VizError::UnknownFilter {
                dimension: T::DIMENSION,
                value: s.to_string(),
            })
    }
}

impl<T: FilterValue> fmt::Display for Filter<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

#[cfg(feature = "serde")]
impl<T: FilterValue> Serialize for Filter<T> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.label())
    }
}

#[cfg(feature = "serde")]
impl<'de, T: FilterValue> Deserialize<'de> for Filter<T> {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}

/// Current selection in both filter dimensions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct FilterState {
    pub category: CategoryFilter,
    #[cfg_attr(feature = "serde", serde(rename = "type"))]
    pub algorithm_type: TypeFilter,
}

impl FilterState {
    pub fn new(category: CategoryFilter, algorithm_type: TypeFilter) -> Self {
        Self {
            category,
            algorithm_type,
        }
    }

    pub fn admits(&self, algo: &Algorithm) -> bool {
        self.category.matches(algo.category) && self.algorithm_type.matches(algo.algorithm_type)
    }
}

/// Visible subset of `algorithms` in source order.
pub fn project<'a, I>(algorithms: I, filters: &FilterState) -> Vec<&'a Algorithm>
where
    I: IntoIterator<Item = &'a Algorithm>,
{
    algorithms
        .into_iter()
        .filter(|a| filters.admits(a))
        .collect()
}

#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize))]
pub struct FilterButton {
    /// Value the button selects (`all`, `supervised`, ...).
    pub value: &'static str,
    /// Title-cased caption.
    pub caption: String,
    pub active: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize))]
pub struct FilterBar {
    pub category: Vec<FilterButton>,
    #[cfg_attr(feature = "serde", serde(rename = "type"))]
    pub algorithm_type: Vec<FilterButton>,
}

pub fn filter_bar(filters: &FilterState) -> FilterBar {
    FilterBar {
        category: buttons(filters.category),
        algorithm_type: buttons(filters.algorithm_type),
    }
}

fn buttons<T: FilterValue>(selected: Filter<T>) -> Vec<FilterButton> {
    Filter::<T>::options()
        .into_iter()
        .map(|f| FilterButton {
            value: f.label(),
            caption: capitalize(f.label()),
            active: f == selected,
        })
        .collect()
}

/// Upper-case the first character.
pub fn capitalize(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::fixtures::algorithm;

    fn sample() -> Vec<Algorithm> {
        vec![
            algorithm("pca", Category::Unsupervised, AlgorithmType::Dimensionality),
            algorithm("lda", Category::Supervised, AlgorithmType::Dimensionality),
            algorithm("tree", Category::Supervised, AlgorithmType::Classification),
            algorithm("kmeans", Category::Unsupervised, AlgorithmType::Clustering),
            algorithm("svm", Category::Supervised, AlgorithmType::Classification),
        ]
    }

    fn ids(v: &[&Algorithm]) -> Vec<String> {
        v.iter().map(|a| a.id.clone()).collect()
    }

    #[test]
    fn all_all_returns_everything_in_order() {
        let algos = sample();
        let out = project(&algos, &FilterState::default());
        assert_eq!(ids(&out), vec!["pca", "lda", "tree", "kmeans", "svm"]);
    }

    #[test]
    fn both_predicates_must_hold() {
        let algos = sample();
        let f = FilterState::new(
            Filter::Only(Category::Supervised),
            Filter::Only(AlgorithmType::Classification),
        );
        assert_eq!(ids(&project(&algos, &f)), vec!["tree", "svm"]);
    }

    #[test]
    fn single_dimension_filters() {
        let algos = sample();
        let by_cat = FilterState::new(Filter::Only(Category::Unsupervised), Filter::All);
        assert_eq!(ids(&project(&algos, &by_cat)), vec!["pca", "kmeans"]);

        let by_type = FilterState::new(Filter::All, Filter::Only(AlgorithmType::Dimensionality));
        assert_eq!(ids(&project(&algos, &by_type)), vec!["pca", "lda"]);
    }

    #[test]
    fn empty_projection() {
        let algos = sample();
        let f = FilterState::new(
            Filter::Only(Category::Unsupervised),
            Filter::Only(AlgorithmType::Regression),
        );
        assert!(project(&algos, &f).is_empty());
        assert!(project(std::iter::empty(), &FilterState::default()).is_empty());
    }

    #[test]
    fn filter_labels_round_trip() {
        for f in CategoryFilter::options() {
            assert_eq!(f.label().parse::<CategoryFilter>().unwrap(), f);
        }
        for f in TypeFilter::options() {
            assert_eq!(f.to_string().parse::<TypeFilter>().unwrap(), f);
        }
        assert_eq!(
            " Supervised ".parse::<CategoryFilter>().unwrap(),
            Filter::Only(Category::Supervised)
        );
        assert!(matches!(
            "semi".parse::<CategoryFilter>(),
            Err(VizError::UnknownFilter { dimension: "category", .. })
        ));
    }

    #[test]
    fn filter_bar_marks_exactly_one_active() {
        let f = FilterState::new(Filter::All, Filter::Only(AlgorithmType::Clustering));
        let bar = filter_bar(&f);

        let cats: Vec<&str> = bar.category.iter().map(|b| b.caption.as_str()).collect();
        assert_eq!(cats, vec!["All", "Supervised", "Unsupervised"]);
        assert_eq!(bar.algorithm_type.len(), 5);

        let active_cat: Vec<&str> = bar.category.iter().filter(|b| b.active).map(|b| b.value).collect();
        let active_type: Vec<&str> = bar
            .algorithm_type
            .iter()
            .filter(|b| b.active)
            .map(|b| b.value)
            .collect();
        assert_eq!(active_cat, vec!["all"]);
        assert_eq!(active_type, vec!["clustering"]);
    }

    #[test]
    fn capitalize_handles_edges() {
        assert_eq!(capitalize("dimensionality"), "Dimensionality");
        assert_eq!(capitalize(""), "");
    }
}
