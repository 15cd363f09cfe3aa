//! UI models and metadata that should be available on both wasm and native.
//!
//! Keeping these out of the wasm-only `web` module allows us to unit-test card
//! styling and chart geometry on the host.

use mlviz::model::{AlgorithmType, Point, Series};

/// Card header icon and background, keyed on algorithm type.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CardAccent {
    Dimensionality,
    Classification,
    General,
}

impl CardAccent {
    pub fn for_type(t: AlgorithmType) -> Self {
        match t {
            AlgorithmType::Dimensionality => CardAccent::Dimensionality,
            AlgorithmType::Classification => CardAccent::Classification,
            AlgorithmType::Regression | AlgorithmType::Clustering => CardAccent::General,
        }
    }

    pub fn icon(self) -> &'static str {
        match self {
            CardAccent::Dimensionality => "✨",
            CardAccent::Classification => "🌿",
            CardAccent::General => "🧠",
        }
    }

    pub fn icon_color(self) -> &'static str {
        match self {
            CardAccent::Dimensionality => "#c084fc",
            CardAccent::Classification => "#4ade80",
            CardAccent::General => "#818cf8",
        }
    }

    /// CSS background for the card body.
    pub fn gradient(self) -> &'static str {
        match self {
            CardAccent::Dimensionality => "linear-gradient(135deg, rgba(88, 28, 135, 0.5), rgba(49, 46, 129, 0.3), rgba(88, 28, 135, 0.5))",
            CardAccent::Classification => "linear-gradient(135deg, rgba(20, 83, 45, 0.5), rgba(6, 78, 59, 0.3), rgba(20, 83, 45, 0.5))",
            CardAccent::General => "linear-gradient(135deg, rgba(49, 46, 129, 0.5), rgba(30, 58, 138, 0.3), rgba(49, 46, 129, 0.5))",
        }
    }

    pub fn all() -> &'static [CardAccent] {
        &[
            CardAccent::Dimensionality,
            CardAccent::Classification,
            CardAccent::General,
        ]
    }
}

/// Data-space bounds of a chart, padded so markers do not touch the frame.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PlotBounds {
    pub min_x: f64,
    pub max_x: f64,
    pub min_y: f64,
    pub max_y: f64,
}

impl PlotBounds {
    /// Fraction of the data span added on every side.
    pub const PADDING: f64 = 0.05;

    /// Bounds over every point of every series. `None` when there are no points.
    pub fn from_series(series: &[Series]) -> Option<Self> {
        let mut points = series.iter().flat_map(|s| s.points.iter());
        let first = points.next()?;
        let mut b = PlotBounds {
            min_x: first.x,
            max_x: first.x,
            min_y: first.y,
            max_y: first.y,
        };
        for p in points {
            b.min_x = b.min_x.min(p.x);
            b.max_x = b.max_x.max(p.x);
            b.min_y = b.min_y.min(p.y);
            b.max_y = b.max_y.max(p.y);
        }
        Some(b.padded())
    }

    fn padded(self) -> Self {
        let pad = |lo: f64, hi: f64| {
            let span = (hi - lo).max(1.0);
            (lo - span * Self::PADDING, hi + span * Self::PADDING)
        };
        let (min_x, max_x) = pad(self.min_x, self.max_x);
        let (min_y, max_y) = pad(self.min_y, self.max_y);
        PlotBounds {
            min_x,
            max_x,
            min_y,
            max_y,
        }
    }

    /// Map a data point into a `w` x `h` pixel frame (y grows downwards).
    pub fn to_canvas(&self, p: Point, w: f64, h: f64) -> (f64, f64) {
        let nx = (p.x - self.min_x) / (self.max_x - self.min_x);
        let ny = (p.y - self.min_y) / (self.max_y - self.min_y);
        (nx * w, h - ny * h)
    }
}

/// Banner text after a user action: the error message, or empty once an action
/// succeeds so a stale error does not outlive the next good click.
pub fn status_line<T, E: std::fmt::Display>(outcome: &Result<T, E>) -> String {
    match outcome {
        Ok(_) => String::new(),
        Err(e) => e.to_string(),
    }
}

/// `n` evenly spaced tick values across `[lo, hi]`, endpoints included.
pub fn ticks(lo: f64, hi: f64, n: usize) -> Vec<f64> {
    match n {
        0 => Vec::new(),
        1 => vec![lo],
        _ => (0..n)
            .map(|i| lo + (hi - lo) * i as f64 / (n - 1) as f64)
            .collect(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mlviz::model::SeriesStyle;

    fn series(points: &[(f64, f64)]) -> Series {
        Series {
            label: "s".to_string(),
            points: points.iter().map(|&(x, y)| Point::new(x, y)).collect(),
            style: SeriesStyle::new("red", "red"),
        }
    }

    #[test]
    fn accent_inventory_is_stable() {
        for a in CardAccent::all() {
            assert!(!a.icon().trim().is_empty());
            assert!(a.gradient().starts_with("linear-gradient("));
            assert!(a.icon_color().starts_with('#'));
        }
        assert_eq!(
            CardAccent::for_type(AlgorithmType::Dimensionality),
            CardAccent::Dimensionality
        );
        assert_eq!(
            CardAccent::for_type(AlgorithmType::Classification),
            CardAccent::Classification
        );
        assert_eq!(CardAccent::for_type(AlgorithmType::Clustering), CardAccent::General);
        assert_eq!(CardAccent::for_type(AlgorithmType::Regression), CardAccent::General);
    }

    #[test]
    fn bounds_cover_all_series() {
        let s = [series(&[(0.0, 10.0), (100.0, 20.0)]), series(&[(50.0, -10.0)])];
        let b = PlotBounds::from_series(&s).unwrap();
        assert!((b.min_x - -5.0).abs() < 1e-9);
        assert!((b.max_x - 105.0).abs() < 1e-9);
        assert!((b.min_y - -11.5).abs() < 1e-9);
        assert!((b.max_y - 21.5).abs() < 1e-9);
    }

    #[test]
    fn bounds_of_nothing() {
        assert!(PlotBounds::from_series(&[]).is_none());
        assert!(PlotBounds::from_series(&[series(&[])]).is_none());
    }

    #[test]
    fn single_point_gets_a_usable_frame() {
        let b = PlotBounds::from_series(&[series(&[(3.0, 3.0)])]).unwrap();
        assert!(b.max_x > b.min_x);
        assert!(b.max_y > b.min_y);
        let (x, y) = b.to_canvas(Point::new(3.0, 3.0), 200.0, 100.0);
        assert!((x - 100.0).abs() < 1e-9);
        assert!((y - 50.0).abs() < 1e-9);
    }

    #[test]
    fn canvas_mapping_flips_y() {
        let b = PlotBounds {
            min_x: 0.0,
            max_x: 10.0,
            min_y: 0.0,
            max_y: 10.0,
        };
        assert_eq!(b.to_canvas(Point::new(0.0, 0.0), 100.0, 50.0), (0.0, 50.0));
        assert_eq!(b.to_canvas(Point::new(10.0, 10.0), 100.0, 50.0), (100.0, 0.0));
    }

    #[test]
    fn status_clears_on_success() {
        let failed: Result<(), String> = Err("unknown category filter 'x'".to_string());
        assert_eq!(status_line(&failed), "unknown category filter 'x'");

        let ok: Result<u32, String> = Ok(1);
        assert!(status_line(&ok).is_empty());
    }

    #[test]
    fn tick_spacing() {
        assert_eq!(ticks(0.0, 1.0, 3), vec![0.0, 0.5, 1.0]);
        assert_eq!(ticks(2.0, 4.0, 1), vec![2.0]);
        assert!(ticks(0.0, 1.0, 0).is_empty());
    }
}
