//! The five built-in algorithm definitions the dashboard starts from.
//!
//! Chart geometry is drawn once here from the supplied random source; metric
//! histories start at five epochs with hand-tuned values.

use crate::model::{
    Algorithm, AlgorithmType, Category, ChartKind, Dataset, Iteration, Metrics, Point, PointShape,
    Series, SeriesStyle, Visualization,
};
use crate::prng::RandomSource;
use crate::synth;

pub const SEED_EPOCHS: u32 = 5;
pub const MAX_EPOCHS: u32 = 100;

const INDIGO: (&str, &str) = ("rgba(129, 140, 248, 0.5)", "rgba(129, 140, 248, 1)");
const GREEN: (&str, &str) = ("rgba(34, 197, 94, 0.5)", "rgba(34, 197, 94, 1)");
const ORANGE: (&str, &str) = ("rgba(249, 115, 22, 0.5)", "rgba(249, 115, 22, 1)");
const RED: (&str, &str) = ("rgba(239, 68, 68, 0.5)", "rgba(239, 68, 68, 1)");
const GOLD: (&str, &str) = ("rgba(234, 179, 8, 0.8)", "rgba(234, 179, 8, 1)");

const CLUSTER_PALETTE: [(&str, &str); 3] = [INDIGO, GREEN, ORANGE];

fn style((bg, border): (&str, &str)) -> SeriesStyle {
    SeriesStyle::new(bg, border)
}

fn series(label: &str, points: Vec<Point>, style: SeriesStyle) -> Series {
    Series {
        label: label.to_string(),
        points,
        style,
    }
}

fn dataset(
    id: &str,
    name: &str,
    features: &[&str],
    samples: u32,
    source: &str,
    description: &str,
) -> Dataset {
    Dataset {
        id: id.to_string(),
        name: name.to_string(),
        features: features.iter().map(|f| f.to_string()).collect(),
        samples,
        source: source.to_string(),
        description: description.to_string(),
    }
}

/// `SEED_EPOCHS` iterations where metric `k` at 0-based step `i` is `base_k + i * step_k`.
fn seed_iterations(metrics: &[(&str, f64, f64)]) -> Vec<Iteration> {
    (0..SEED_EPOCHS)
        .map(|i| Iteration {
            epoch: i + 1,
            metrics: metrics
                .iter()
                .map(|&(name, base, step)| (name, base + i as f64 * step))
                .collect::<Metrics>(),
        })
        .collect()
}

/// Cluster series coloured from the three-colour palette.
fn palette_clusters(
    rng: &mut impl RandomSource,
    centers: &[Point],
    points_per_cluster: usize,
) -> Vec<Series> {
    synth::clusters(rng, centers, points_per_cluster, 15.0)
        .into_iter()
        .zip(CLUSTER_PALETTE.iter().cycle())
        .map(|(cluster, &colors)| series(&cluster.label, cluster.points, style(colors)))
        .collect()
}

struct Header<'a> {
    id: &'a str,
    name: &'a str,
    category: Category,
    algorithm_type: AlgorithmType,
    description: &'a str,
}

fn assemble(
    h: Header<'_>,
    datasets: Vec<Dataset>,
    series: Vec<Series>,
    metrics: &[(&str, f64, f64)],
) -> Algorithm {
    let selected_dataset_id = datasets
        .first()
        .map(|d| d.id.clone())
        .unwrap_or_default();
    Algorithm {
        id: h.id.to_string(),
        name: h.name.to_string(),
        category: h.category,
        algorithm_type: h.algorithm_type,
        description: h.description.to_string(),
        available_datasets: datasets,
        selected_dataset_id,
        max_epochs: MAX_EPOCHS,
        current_epochs: SEED_EPOCHS,
        visualization: Visualization {
            kind: ChartKind::Scatter,
            series,
        },
        iterations: seed_iterations(metrics),
    }
}

fn pca(rng: &mut impl RandomSource) -> Algorithm {
    assemble(
        Header {
            id: "pca",
            name: "Principal Component Analysis (PCA)",
            category: Category::Unsupervised,
            algorithm_type: AlgorithmType::Dimensionality,
            description: "A dimensionality reduction technique that transforms high-dimensional data into a lower-dimensional space while preserving maximum variance. PCA identifies the principal components (directions) along which the data varies the most.",
        },
        vec![
            dataset(
                "iris",
                "Iris Dataset",
                &["Sepal Length", "Sepal Width", "Petal Length", "Petal Width"],
                150,
                "UCI Machine Learning Repository",
                "Classic iris flower dataset with 4 features reduced to 2D",
            ),
            dataset(
                "digits",
                "Handwritten Digits",
                &["Pixel Values (784)", "Reduced Dimensions (2)"],
                1000,
                "MNIST Dataset",
                "Handwritten digits reduced from 784 to 2 dimensions",
            ),
        ],
        vec![series("Transformed Data", synth::ring(rng, 100), style(INDIGO))],
        &[
            ("explained_variance", 0.75, 0.05),
            ("reconstruction_error", 0.25, -0.04),
        ],
    )
}

fn lda(rng: &mut impl RandomSource) -> Algorithm {
    assemble(
        Header {
            id: "lda",
            name: "Linear Discriminant Analysis (LDA)",
            category: Category::Supervised,
            algorithm_type: AlgorithmType::Dimensionality,
            description: "A supervised dimensionality reduction technique that finds a linear combination of features that characterizes or separates two or more classes. LDA maximizes the separation between different classes while minimizing the spread within each class.",
        },
        vec![
            dataset(
                "wine",
                "Wine Dataset",
                &["Alcohol", "Malic Acid", "Ash", "Class"],
                178,
                "UCI Wine Dataset",
                "Wine chemical analysis dataset with 3 classes",
            ),
            dataset(
                "cancer",
                "Breast Cancer",
                &["Cell Size", "Cell Shape", "Adhesion", "Class"],
                569,
                "Wisconsin Breast Cancer Dataset",
                "Breast cancer diagnostic data with binary classification",
            ),
        ],
        palette_clusters(
            rng,
            &[
                Point::new(30.0, 30.0),
                Point::new(70.0, 70.0),
                Point::new(30.0, 70.0),
            ],
            20,
        ),
        &[("class_separation", 0.6, 0.08), ("accuracy", 0.8, 0.04)],
    )
}

fn decision_tree(rng: &mut impl RandomSource) -> Algorithm {
    let class0 = synth::ring(rng, 50);
    let class1 = synth::translate(synth::ring(rng, 50), 20.0, -20.0);
    assemble(
        Header {
            id: "decision-tree",
            name: "Decision Tree Classifier",
            category: Category::Supervised,
            algorithm_type: AlgorithmType::Classification,
            description: "A tree-structured classifier that recursively splits the data based on feature values. Each internal node represents a decision based on a feature, and each leaf node represents a class label. Decision trees are interpretable and can handle both numerical and categorical data.",
        },
        vec![
            dataset(
                "titanic",
                "Titanic",
                &["Age", "Sex", "Class", "Fare", "Survived"],
                891,
                "Titanic Dataset",
                "Passenger survival prediction from Titanic disaster",
            ),
            dataset(
                "credit",
                "Credit Risk",
                &["Income", "Age", "Employment", "Risk Level"],
                1000,
                "Credit Risk Assessment",
                "Credit risk classification dataset",
            ),
        ],
        vec![
            series("Class 0", class0, style(INDIGO)),
            series("Class 1", class1, style(GREEN)),
        ],
        &[("accuracy", 0.7, 0.06), ("gini_impurity", 0.3, -0.05)],
    )
}

fn svm(rng: &mut impl RandomSource) -> Algorithm {
    let class_a = synth::ring(rng, 40);
    let class_b = synth::translate(synth::ring(rng, 40), 30.0, 30.0);
    let support_vectors = vec![
        Point::new(45.0, 45.0),
        Point::new(55.0, 55.0),
        Point::new(65.0, 65.0),
    ];
    assemble(
        Header {
            id: "svm",
            name: "Support Vector Machine (SVM)",
            category: Category::Supervised,
            algorithm_type: AlgorithmType::Classification,
            description: "A powerful classifier that finds the optimal hyperplane to separate different classes with maximum margin. SVMs can handle both linear and non-linear classification through kernel functions, making them versatile for various problems.",
        },
        vec![
            dataset(
                "spam",
                "Spam Detection",
                &["Word Frequencies", "Email Length", "Special Chars", "Label"],
                5000,
                "Spam Email Dataset",
                "Email spam classification dataset",
            ),
            dataset(
                "sentiment",
                "Sentiment",
                &["Word Embeddings", "Text Length", "Sentiment"],
                2000,
                "Movie Reviews",
                "Movie review sentiment analysis",
            ),
        ],
        vec![
            series("Class A", class_a, style(INDIGO)),
            series("Class B", class_b, style(RED)),
            series(
                "Support Vectors",
                support_vectors,
                style(GOLD).with_marker(8.0, PointShape::Star),
            ),
        ],
        &[("accuracy", 0.85, 0.03), ("margin_width", 1.2, 0.2)],
    )
}

fn naive_bayes(rng: &mut impl RandomSource) -> Algorithm {
    assemble(
        Header {
            id: "naive-bayes",
            name: "Naive Bayes",
            category: Category::Supervised,
            algorithm_type: AlgorithmType::Classification,
            description: "A probabilistic classifier based on Bayes' theorem with an assumption of feature independence. Despite its simplicity and \"naive\" assumption, it performs remarkably well for text classification and other high-dimensional problems.",
        },
        vec![
            dataset(
                "news",
                "News Categories",
                &["Word Frequencies", "Article Length", "Category"],
                2000,
                "News Article Dataset",
                "News article categorization dataset",
            ),
            dataset(
                "language",
                "Language Detection",
                &["Character Frequencies", "Text Length", "Language"],
                1000,
                "Language Detection Dataset",
                "Text language classification dataset",
            ),
        ],
        palette_clusters(
            rng,
            &[
                Point::new(20.0, 20.0),
                Point::new(60.0, 60.0),
                Point::new(80.0, 30.0),
            ],
            25,
        ),
        &[("accuracy", 0.75, 0.05), ("log_likelihood", -0.5, 0.08)],
    )
}

/// Build the seed collection in display order: PCA, LDA, Decision Tree, SVM, Naive Bayes.
pub fn seed_algorithms(rng: &mut impl RandomSource) -> Vec<Algorithm> {
    vec![
        pca(rng),
        lda(rng),
        decision_tree(rng),
        svm(rng),
        naive_bayes(rng),
    ]
}
