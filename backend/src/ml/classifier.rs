//! Classifiers exported from scikit-learn
//!
//! Supported shapes are single decision trees, random forests (soft voting
//! over trees) and linear models (logistic regression, linear SVM).

use serde::Deserialize;

use super::ArtifactError;

/// Maps a scaled feature vector to an integer class label
pub trait Classifier: Send + Sync {
    fn n_features(&self) -> usize;

    fn predict(&self, features: &[f64]) -> Result<i64, ArtifactError>;
}

/// Node of an exported decision tree
#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(untagged)]
pub enum Node {
    Split {
        feature: usize,
        threshold: f64,
        left: usize,
        right: usize,
    },
    Leaf {
        value: Vec<f64>,
    },
}

/// Exported decision tree; node 0 is the root
#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct Tree {
    pub nodes: Vec<Node>,
}

impl Tree {
    fn validate(&self, n_classes: usize) -> Result<usize, ArtifactError> {
        if self.nodes.is_empty() {
            return Err(ArtifactError::Invalid("tree has no nodes".to_string()));
        }

        let mut max_feature = 0;
        for (index, node) in self.nodes.iter().enumerate() {
            match node {
                Node::Split {
                    feature,
                    threshold,
                    left,
                    right,
                } => {
                    // children always follow their parent, which also rules out cycles
                    if *left <= index || *right <= index {
                        return Err(ArtifactError::Invalid(format!(
                            "node {index} points backwards"
                        )));
                    }
                    if *left >= self.nodes.len() || *right >= self.nodes.len() {
                        return Err(ArtifactError::Invalid(format!(
                            "node {index} has a child out of range"
                        )));
                    }
                    if !threshold.is_finite() {
                        return Err(ArtifactError::Invalid(format!(
                            "node {index} has a non-finite threshold"
                        )));
                    }
                    max_feature = max_feature.max(feature + 1);
                }
                Node::Leaf { value } => {
                    if value.len() != n_classes {
                        return Err(ArtifactError::Invalid(format!(
                            "leaf {index} has {} class weights, expected {n_classes}",
                            value.len()
                        )));
                    }
                }
            }
        }
        Ok(max_feature)
    }

    /// Class distribution of the leaf `features` falls into, normalized to sum 1
    fn distribution(&self, features: &[f64]) -> Vec<f64> {
        let mut index = 0;
        loop {
            match &self.nodes[index] {
                Node::Split {
                    feature,
                    threshold,
                    left,
                    right,
                } => {
                    index = if features[*feature] <= *threshold {
                        *left
                    } else {
                        *right
                    };
                }
                Node::Leaf { value } => {
                    let total: f64 = value.iter().sum();
                    if total > 0.0 {
                        return value.iter().map(|v| v / total).collect();
                    }
                    return value.clone();
                }
            }
        }
    }
}

/// A classifier artifact as stored on disk
#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ClassifierArtifact {
    DecisionTree {
        n_features: usize,
        classes: Vec<i64>,
        tree: Tree,
    },
    RandomForest {
        n_features: usize,
        classes: Vec<i64>,
        trees: Vec<Tree>,
    },
    Linear {
        n_features: usize,
        classes: Vec<i64>,
        coef: Vec<Vec<f64>>,
        intercept: Vec<f64>,
    },
}

impl ClassifierArtifact {
    fn classes(&self) -> &[i64] {
        match self {
            ClassifierArtifact::DecisionTree { classes, .. }
            | ClassifierArtifact::RandomForest { classes, .. }
            | ClassifierArtifact::Linear { classes, .. } => classes,
        }
    }

    /// Check internal consistency and the expected vector width
    pub fn validate(&self, expected: usize) -> Result<(), ArtifactError> {
        if self.n_features() != expected {
            return Err(ArtifactError::FeatureCount {
                expected,
                actual: self.n_features(),
            });
        }

        let n_classes = self.classes().len();
        if n_classes < 2 {
            return Err(ArtifactError::Invalid(
                "classifier needs at least two classes".to_string(),
            ));
        }

        let used = match self {
            ClassifierArtifact::DecisionTree { tree, .. } => tree.validate(n_classes)?,
            ClassifierArtifact::RandomForest { trees, .. } => {
                if trees.is_empty() {
                    return Err(ArtifactError::Invalid("forest has no trees".to_string()));
                }
                let mut used = 0;
                for tree in trees {
                    used = used.max(tree.validate(n_classes)?);
                }
                used
            }
            ClassifierArtifact::Linear {
                coef, intercept, ..
            } => {
                let rows = if n_classes == 2 { 1 } else { n_classes };
                if coef.len() != rows || intercept.len() != rows {
                    return Err(ArtifactError::Invalid(format!(
                        "linear model needs {rows} coefficient rows and intercepts"
                    )));
                }
                if let Some(row) = coef.iter().find(|row| row.len() != expected) {
                    return Err(ArtifactError::FeatureCount {
                        expected,
                        actual: row.len(),
                    });
                }
                expected
            }
        };

        if used > expected {
            return Err(ArtifactError::Invalid(format!(
                "tree splits on feature {} of {expected}",
                used - 1
            )));
        }
        Ok(())
    }
}

/// Index of the largest score; ties go to the lowest index
fn argmax(scores: &[f64]) -> usize {
    let mut best = 0;
    for (index, score) in scores.iter().enumerate() {
        if *score > scores[best] {
            best = index;
        }
    }
    best
}

impl Classifier for ClassifierArtifact {
    fn n_features(&self) -> usize {
        match self {
            ClassifierArtifact::DecisionTree { n_features, .. }
            | ClassifierArtifact::RandomForest { n_features, .. }
            | ClassifierArtifact::Linear { n_features, .. } => *n_features,
        }
    }

    fn predict(&self, features: &[f64]) -> Result<i64, ArtifactError> {
        if features.len() != self.n_features() {
            return Err(ArtifactError::FeatureCount {
                expected: self.n_features(),
                actual: features.len(),
            });
        }
        if features.iter().any(|x| x.is_nan()) {
            return Err(ArtifactError::Invalid(
                "feature vector contains NaN".to_string(),
            ));
        }

        let classes = self.classes();
        let index = match self {
            ClassifierArtifact::DecisionTree { tree, .. } => argmax(&tree.distribution(features)),
            ClassifierArtifact::RandomForest { trees, .. } => {
                let mut votes = vec![0.0; classes.len()];
                for tree in trees {
                    for (vote, p) in votes.iter_mut().zip(tree.distribution(features)) {
                        *vote += p;
                    }
                }
                argmax(&votes)
            }
            ClassifierArtifact::Linear {
                coef, intercept, ..
            } => {
                let scores: Vec<f64> = coef
                    .iter()
                    .zip(intercept)
                    .map(|(row, b)| row.iter().zip(features).map(|(w, x)| w * x).sum::<f64>() + b)
                    .collect();
                if scores.len() == 1 {
                    usize::from(scores[0] > 0.0)
                } else {
                    argmax(&scores)
                }
            }
        };

        Ok(classes[index])
    }
}
