//! Random-forest adapter: Implementation of Classifier.
//!
//! Evaluates a forest exported by the offline training pipeline as JSON:
//!
//! - `feature_names`: training columns, in feature-vector order
//! - `classes`: class labels, in probability-vector order
//! - `trees[].nodes[]`: either a split `{feature, threshold, left, right}`
//!   (go `left` when `x[feature] <= threshold`) or a leaf `{value}` holding
//!   per-class sample weights
//!
//! Class probabilities are the mean over trees of each reached leaf's
//! normalized weights, matching scikit-learn's `predict_proba`.
//!
//! # Thread Safety
//!
//! The model is immutable after loading; prediction takes `&self` and can be
//! shared across threads behind an `Arc`.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use crate::ports::{Classifier, ClassifierError};

/// Forest export format version understood by this crate.
pub const FOREST_FORMAT_VERSION: u32 = 1;

/// A node of an exported decision tree.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum TreeNode {
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

/// One exported decision tree. Node 0 is the root.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DecisionTree {
    pub nodes: Vec<TreeNode>,
}

/// Forest parameters exported by the training pipeline.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExportedForest {
    pub format_version: u32,
    pub feature_names: Vec<String>,
    pub classes: Vec<String>,
    pub trees: Vec<DecisionTree>,
}

/// A loaded, validated random forest.
#[derive(Debug, Clone)]
pub struct RandomForestModel {
    forest: ExportedForest,
}

impl RandomForestModel {
    /// Parse and validate a forest from its JSON export.
    ///
    /// # Errors
    /// Returns `ClassifierError::InvalidModel` if the JSON is malformed or
    /// the forest violates a structural invariant.
    pub fn from_json(text: &str) -> Result<Self, ClassifierError> {
        let forest: ExportedForest = serde_json::from_str(text)
            .map_err(|e| ClassifierError::InvalidModel(format!("Invalid forest JSON: {e}")))?;
        Self::from_exported(forest)
    }

    /// Validate an already deserialized forest.
    ///
    /// # Errors
    /// Returns `ClassifierError::InvalidModel` describing the first problem.
    pub fn from_exported(forest: ExportedForest) -> Result<Self, ClassifierError> {
        validate(&forest).map_err(ClassifierError::InvalidModel)?;

        tracing::info!(
            "Loaded random forest (trees={}, features={}, classes={})",
            forest.trees.len(),
            forest.feature_names.len(),
            forest.classes.len()
        );

        Ok(Self { forest })
    }

    #[must_use]
    pub fn n_trees(&self) -> usize {
        self.forest.trees.len()
    }

    /// Walk one tree and return the normalized weights of the leaf reached.
    fn leaf_distribution(tree: &DecisionTree, features: &[f64]) -> Vec<f64> {
        let mut idx = 0;
        loop {
            match &tree.nodes[idx] {
                TreeNode::Split {
                    feature,
                    threshold,
                    left,
                    right,
                } => {
                    idx = if features[*feature] <= *threshold {
                        *left
                    } else {
                        *right
                    };
                }
                TreeNode::Leaf { value } => {
                    let total: f64 = value.iter().sum();
                    return value.iter().map(|w| w / total).collect();
                }
            }
        }
    }
}

/// Structural checks. Child indices must point forward, which rules out cycles.
fn validate(forest: &ExportedForest) -> Result<(), String> {
    if forest.format_version != FOREST_FORMAT_VERSION {
        return Err(format!(
            "Unsupported forest format version: {}",
            forest.format_version
        ));
    }

    let n_features = forest.feature_names.len();
    let n_classes = forest.classes.len();
    if n_features == 0 {
        return Err("Forest has no feature columns".into());
    }
    if n_classes == 0 {
        return Err("Forest has no classes".into());
    }
    if forest.feature_names.iter().collect::<BTreeSet<_>>().len() != n_features {
        return Err("Duplicate feature column".into());
    }
    if forest.classes.iter().collect::<BTreeSet<_>>().len() != n_classes {
        return Err("Duplicate class label".into());
    }
    if forest.trees.is_empty() {
        return Err("Forest has no trees".into());
    }

    for (t, tree) in forest.trees.iter().enumerate() {
        if tree.nodes.is_empty() {
            return Err(format!("Tree {t} has no nodes"));
        }
        let n_nodes = tree.nodes.len();
        for (i, node) in tree.nodes.iter().enumerate() {
            match node {
                TreeNode::Split {
                    feature,
                    threshold,
                    left,
                    right,
                } => {
                    if *feature >= n_features {
                        return Err(format!(
                            "Tree {t} node {i}: feature {feature} out of range"
                        ));
                    }
                    if !threshold.is_finite() {
                        return Err(format!("Tree {t} node {i}: non-finite threshold"));
                    }
                    for child in [*left, *right] {
                        if child <= i || child >= n_nodes {
                            return Err(format!(
                                "Tree {t} node {i}: child index {child} must be in ({i}, {n_nodes})"
                            ));
                        }
                    }
                }
                TreeNode::Leaf { value } => {
                    if value.len() != n_classes {
                        return Err(format!(
                            "Tree {t} node {i}: leaf has {} weights, expected {n_classes}",
                            value.len()
                        ));
                    }
                    if value.iter().any(|w| !w.is_finite() || *w < 0.0) {
                        return Err(format!("Tree {t} node {i}: invalid leaf weight"));
                    }
                    if value.iter().sum::<f64>() <= 0.0 {
                        return Err(format!("Tree {t} node {i}: leaf weights sum to zero"));
                    }
                }
            }
        }
    }

    Ok(())
}

impl Classifier for RandomForestModel {
    fn feature_names(&self) -> &[String] {
        &self.forest.feature_names
    }

    fn classes(&self) -> &[String] {
        &self.forest.classes
    }

    fn predict_proba(&self, features: &[f64]) -> Result<Vec<f64>, ClassifierError> {
        let expected = self.forest.feature_names.len();
        if features.len() != expected {
            return Err(ClassifierError::FeatureCountMismatch {
                expected,
                actual: features.len(),
            });
        }

        let mut proba = vec![0.0; self.forest.classes.len()];
        for tree in &self.forest.trees {
            for (p, w) in proba.iter_mut().zip(Self::leaf_distribution(tree, features)) {
                *p += w;
            }
        }

        let n_trees = self.forest.trees.len() as f64;
        for p in &mut proba {
            *p /= n_trees;
        }

        Ok(proba)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Two features, three classes, two stumps.
    fn stump_forest() -> ExportedForest {
        ExportedForest {
            format_version: 1,
            feature_names: vec!["curl".into(), "galls".into()],
            classes: vec!["healthy".into(), "nematode".into(), "virus".into()],
            trees: vec![
                DecisionTree {
                    nodes: vec![
                        TreeNode::Split {
                            feature: 0,
                            threshold: 0.5,
                            left: 1,
                            right: 2,
                        },
                        TreeNode::Leaf {
                            value: vec![10.0, 0.0, 0.0],
                        },
                        TreeNode::Leaf {
                            value: vec![1.0, 0.0, 9.0],
                        },
                    ],
                },
                DecisionTree {
                    nodes: vec![
                        TreeNode::Split {
                            feature: 1,
                            threshold: 0.5,
                            left: 1,
                            right: 2,
                        },
                        TreeNode::Leaf {
                            value: vec![3.0, 0.0, 1.0],
                        },
                        TreeNode::Leaf {
                            value: vec![0.0, 4.0, 0.0],
                        },
                    ],
                },
            ],
        }
    }

    #[test]
    fn test_predict_proba_averages_trees() {
        let model = RandomForestModel::from_exported(stump_forest()).expect("valid forest");
        let proba = model.predict_proba(&[1.0, 0.0]).expect("predict");

        // Tree 1: [0.1, 0, 0.9]; tree 2: [0.75, 0, 0.25]
        assert!((proba[0] - 0.425).abs() < 1e-12);
        assert!(proba[1].abs() < 1e-12);
        assert!((proba[2] - 0.575).abs() < 1e-12);
        assert!((proba.iter().sum::<f64>() - 1.0).abs() < 1e-12);
    }

    #[test]
    fn test_threshold_goes_left_when_equal() {
        let model = RandomForestModel::from_exported(stump_forest()).expect("valid forest");
        let proba = model.predict_proba(&[0.5, 0.5]).expect("predict");
        // Both trees go left: [1, 0, 0] and [0.75, 0, 0.25]
        assert!((proba[0] - 0.875).abs() < 1e-12);
    }

    #[test]
    fn test_feature_count_mismatch() {
        let model = RandomForestModel::from_exported(stump_forest()).expect("valid forest");
        let err = model.predict_proba(&[1.0]).expect_err("must fail");
        assert_eq!(
            err,
            ClassifierError::FeatureCountMismatch {
                expected: 2,
                actual: 1
            }
        );
    }

    #[test]
    fn test_rejects_backward_child() {
        let mut forest = stump_forest();
        forest.trees[0].nodes[0] = TreeNode::Split {
            feature: 0,
            threshold: 0.5,
            left: 0,
            right: 2,
        };
        let err = RandomForestModel::from_exported(forest).expect_err("must reject cycle");
        assert!(err.to_string().contains("child index"));
    }

    #[test]
    fn test_rejects_short_leaf() {
        let mut forest = stump_forest();
        forest.trees[1].nodes[2] = TreeNode::Leaf {
            value: vec![1.0, 1.0],
        };
        assert!(RandomForestModel::from_exported(forest).is_err());
    }

    #[test]
    fn test_parses_json_export() {
        let json = r#"{
            "format_version": 1,
            "feature_names": ["a"],
            "classes": ["x", "y"],
            "trees": [{"nodes": [
                {"feature": 0, "threshold": 0.5, "left": 1, "right": 2},
                {"value": [3, 1]},
                {"value": [0, 2]}
            ]}]
        }"#;
        let model = RandomForestModel::from_json(json).expect("valid JSON forest");
        assert_eq!(model.n_trees(), 1);
        assert_eq!(model.predict_proba(&[0.0]).expect("predict"), vec![0.75, 0.25]);
        assert_eq!(model.predict_proba(&[1.0]).expect("predict"), vec![0.0, 1.0]);
    }

    #[test]
    fn test_shipped_model_loads() {
        let text = std::fs::read_to_string("models/classifier.json").expect("read model");
        let model = RandomForestModel::from_json(&text).expect("shipped model is valid");
        assert!(model.classes().iter().any(|c| c == "healthy"));

        let none = vec![0.0; model.feature_names().len()];
        let proba = model.predict_proba(&none).expect("predict");
        let healthy = model
            .classes()
            .iter()
            .position(|c| c == "healthy")
            .expect("healthy class");
        assert!((proba[healthy] - 1.0).abs() < 1e-12);
    }
}
