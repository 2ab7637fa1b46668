//! Random-forest pipeline artifact.
//!
//! The artifact is a JSON document holding a column preprocessor and a
//! forest of decision trees in flat node-array form:
//!
//! ```json
//! {
//!   "format": "mhrisk-forest",
//!   "version": 1,
//!   "classes": ["No", "Yes"],
//!   "preprocessor": [
//!     { "type": "numeric", "column": "Age", "impute": 32.0 },
//!     { "type": "one_hot", "column": "Gender", "categories": ["Female", "Male"], "impute": "Male" }
//!   ],
//!   "trees": [
//!     { "nodes": [
//!       { "feature": 0, "threshold": 30.5, "left": 1, "right": 2 },
//!       { "value": [3.0, 1.0] },
//!       { "value": [1.0, 4.0] }
//!     ] }
//!   ]
//! }
//! ```
//!
//! A split sends the row left when `x[feature] <= threshold`. Leaf values are
//! per-class weights; each tree's leaf is normalized and the forest averages
//! the resulting distributions.

use std::path::Path;

use serde::{Deserialize, Serialize};

use super::{ClassProbabilities, Pipeline};
use crate::error::MlError;
use crate::record::{CellValue, SurveyRecord};

pub const ARTIFACT_FORMAT: &str = "mhrisk-forest";
pub const ARTIFACT_VERSION: u32 = 1;

/// Encodes one record column into one or more feature slots.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ColumnEncoder {
    /// Integer column; missing cells take `impute`.
    Numeric { column: String, impute: f64 },
    /// One slot per known category. Unknown categories encode as all zeros;
    /// missing cells take `impute` if set, otherwise all zeros.
    OneHot {
        column: String,
        categories: Vec<String>,
        #[serde(default)]
        impute: Option<String>,
    },
}

impl ColumnEncoder {
    pub fn column(&self) -> &str {
        match self {
            ColumnEncoder::Numeric { column, .. } | ColumnEncoder::OneHot { column, .. } => column,
        }
    }

    pub fn width(&self) -> usize {
        match self {
            ColumnEncoder::Numeric { .. } => 1,
            ColumnEncoder::OneHot { categories, .. } => categories.len(),
        }
    }

    fn encode(&self, cell: &CellValue, out: &mut Vec<f64>) -> Result<(), MlError> {
        match self {
            ColumnEncoder::Numeric { column, impute } => {
                let x = match cell {
                    CellValue::Integer(v) => *v as f64,
                    CellValue::Missing => *impute,
                    CellValue::Category(v) => {
                        return Err(MlError::schema(format!(
                            "column '{column}' is numeric but got category '{v}'"
                        )));
                    }
                };
                out.push(x);
            }
            ColumnEncoder::OneHot {
                column,
                categories,
                impute,
            } => {
                let value = match cell {
                    CellValue::Category(v) => Some(v.as_str()),
                    CellValue::Missing => impute.as_deref(),
                    CellValue::Integer(v) => {
                        return Err(MlError::schema(format!(
                            "column '{column}' is categorical but got number {v}"
                        )));
                    }
                };
                out.extend(
                    categories
                        .iter()
                        .map(|c| if Some(c.as_str()) == value { 1.0 } else { 0.0 }),
                );
            }
        }
        Ok(())
    }
}

/// A node in a flat decision tree.
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

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DecisionTree {
    pub nodes: Vec<TreeNode>,
}

impl DecisionTree {
    /// Walk to a leaf and return its normalized class distribution.
    ///
    /// Malformed trees are reported as inference errors, so a pipeline that
    /// skipped [`ForestPipeline::validate`] still cannot panic a handler.
    fn predict(&self, features: &[f64]) -> Result<Vec<f64>, MlError> {
        let mut idx = 0;
        // A well-formed walk visits each node at most once.
        for _ in 0..self.nodes.len() {
            let node = self
                .nodes
                .get(idx)
                .ok_or_else(|| MlError::inference(format!("tree has no node {idx}")))?;
            match node {
                TreeNode::Split {
                    feature,
                    threshold,
                    left,
                    right,
                } => {
                    let x = features.get(*feature).ok_or_else(|| {
                        MlError::inference(format!(
                            "node {idx} splits on feature {feature} but only {} features are encoded",
                            features.len()
                        ))
                    })?;
                    idx = if x <= threshold { *left } else { *right };
                }
                TreeNode::Leaf { value } => {
                    let total: f64 = value.iter().sum();
                    if total <= 0.0 {
                        return Err(MlError::inference(format!(
                            "leaf {idx} has no class weight"
                        )));
                    }
                    return Ok(value.iter().map(|v| v / total).collect());
                }
            }
        }
        Err(MlError::inference("tree walk did not reach a leaf"))
    }

    fn validate(&self, tree_idx: usize, width: usize, n_classes: usize) -> Result<(), MlError> {
        if self.nodes.is_empty() {
            return Err(MlError::model(format!("tree {tree_idx} has no nodes")));
        }
        let n = self.nodes.len();
        for (i, node) in self.nodes.iter().enumerate() {
            match node {
                TreeNode::Split {
                    feature,
                    threshold,
                    left,
                    right,
                } => {
                    if *feature >= width {
                        return Err(MlError::model(format!(
                            "tree {tree_idx} node {i} splits on feature {feature} but only {width} features are encoded"
                        )));
                    }
                    if !threshold.is_finite() {
                        return Err(MlError::model(format!(
                            "tree {tree_idx} node {i} has a non-finite threshold"
                        )));
                    }
                    // Children after parents: walks always terminate.
                    for child in [*left, *right] {
                        if child <= i || child >= n {
                            return Err(MlError::model(format!(
                                "tree {tree_idx} node {i} has invalid child index {child}"
                            )));
                        }
                    }
                }
                TreeNode::Leaf { value } => {
                    if value.len() != n_classes {
                        return Err(MlError::model(format!(
                            "tree {tree_idx} leaf {i} has {} weights for {n_classes} classes",
                            value.len()
                        )));
                    }
                    if value.iter().any(|v| !v.is_finite() || *v < 0.0) {
                        return Err(MlError::model(format!(
                            "tree {tree_idx} leaf {i} has a negative or non-finite weight"
                        )));
                    }
                }
            }
        }
        Ok(())
    }
}

/// Serialized preprocessor + random forest.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ForestPipeline {
    pub format: String,
    pub version: u32,
    pub classes: Vec<String>,
    pub preprocessor: Vec<ColumnEncoder>,
    pub trees: Vec<DecisionTree>,
}

impl ForestPipeline {
    /// Parse and validate an artifact.
    pub fn from_json(json: &str) -> Result<Self, MlError> {
        let pipeline: ForestPipeline = serde_json::from_str(json)
            .map_err(|e| MlError::model(format!("unreadable model artifact: {e}")))?;
        pipeline.validate()?;
        Ok(pipeline)
    }

    pub fn from_path(path: &Path) -> Result<Self, MlError> {
        let json = std::fs::read_to_string(path)?;
        Self::from_json(&json)
    }

    /// Number of encoded feature slots.
    pub fn width(&self) -> usize {
        self.preprocessor.iter().map(ColumnEncoder::width).sum()
    }

    pub fn validate(&self) -> Result<(), MlError> {
        if self.format != ARTIFACT_FORMAT {
            return Err(MlError::model(format!(
                "unsupported artifact format '{}', expected '{ARTIFACT_FORMAT}'",
                self.format
            )));
        }
        if self.version != ARTIFACT_VERSION {
            return Err(MlError::model(format!(
                "unsupported artifact version {}, expected {ARTIFACT_VERSION}",
                self.version
            )));
        }
        if self.classes.len() < 2 {
            return Err(MlError::model("artifact must declare at least two classes"));
        }
        if self.trees.is_empty() {
            return Err(MlError::model("artifact contains no trees"));
        }
        let width = self.width();
        if width == 0 {
            return Err(MlError::model("preprocessor encodes no features"));
        }
        for (i, tree) in self.trees.iter().enumerate() {
            tree.validate(i, width, self.classes.len())?;
        }
        Ok(())
    }

    /// Encode a record into the feature vector the trees were fit on.
    pub fn encode(&self, record: &SurveyRecord) -> Result<Vec<f64>, MlError> {
        let mut features = Vec::with_capacity(self.width());
        for encoder in &self.preprocessor {
            let cell = record.get(encoder.column()).ok_or_else(|| {
                MlError::schema(format!(
                    "column '{}' expected by the model is not in the record",
                    encoder.column()
                ))
            })?;
            encoder.encode(cell, &mut features)?;
        }
        Ok(features)
    }
}

impl Pipeline for ForestPipeline {
    fn predict_proba(&self, record: &SurveyRecord) -> Result<ClassProbabilities, MlError> {
        let features = self.encode(record)?;
        let mut acc = vec![0.0; self.classes.len()];
        for tree in &self.trees {
            for (slot, p) in acc.iter_mut().zip(tree.predict(&features)?) {
                *slot += p;
            }
        }
        let n = self.trees.len() as f64;
        Ok(ClassProbabilities(acc.into_iter().map(|s| s / n).collect()))
    }

    fn describe(&self) -> String {
        format!(
            "random forest: {} trees over {} encoded features",
            self.trees.len(),
            self.width()
        )
    }
}
