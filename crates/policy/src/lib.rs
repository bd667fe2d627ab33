//! Feed-forward policy network loaded from exported weights.
//!
//! The network is a fixed-shape MLP (7 inputs, two hidden layers of 64,
//! 3 outputs) trained offline; at runtime it is a pure function from a
//! state vector to the argmax action. Training stays out of process.

use std::fs;
use std::path::Path;

use serde::Deserialize;
use tracing::info;

use common::{Error, PolicyAction, PolicySource, Result};

pub const STATE_DIM: usize = 7;
pub const ACTION_DIM: usize = 3;
const HIDDEN_DIM: usize = 64;

/// Exported network parameters, one entry per linear layer.
///
/// `weights[i]` is row-major with one row per output unit, matching the
/// usual `state_dict` export of a linear layer.
#[derive(Debug, Deserialize)]
pub struct PolicyWeights {
    pub layers: Vec<LayerWeights>,
}

#[derive(Debug, Deserialize)]
pub struct LayerWeights {
    pub weights: Vec<Vec<f64>>,
    pub biases: Vec<f64>,
}

impl PolicyWeights {
    /// Reject anything that is not exactly 7 -> 64 -> 64 -> 3.
    fn validate(&self) -> Result<()> {
        let expected = [
            (STATE_DIM, HIDDEN_DIM),
            (HIDDEN_DIM, HIDDEN_DIM),
            (HIDDEN_DIM, ACTION_DIM),
        ];
        if self.layers.len() != expected.len() {
            return Err(Error::Policy(format!(
                "expected {} layers, found {}",
                expected.len(),
                self.layers.len()
            )));
        }
        for (i, (layer, (in_dim, out_dim))) in self.layers.iter().zip(expected).enumerate() {
            if layer.weights.len() != out_dim || layer.biases.len() != out_dim {
                return Err(Error::Policy(format!(
                    "layer {i}: expected {out_dim} output units"
                )));
            }
            if let Some(row) = layer.weights.iter().find(|row| row.len() != in_dim) {
                return Err(Error::Policy(format!(
                    "layer {i}: expected {in_dim} inputs per unit, found {}",
                    row.len()
                )));
            }
        }
        Ok(())
    }
}

/// ReLU MLP evaluator implementing [`PolicySource`].
pub struct MlpPolicy {
    weights: PolicyWeights,
}

impl MlpPolicy {
    pub fn new(weights: PolicyWeights) -> Result<Self> {
        weights.validate()?;
        Ok(Self { weights })
    }

    /// Load weights from a JSON export on disk.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let raw = fs::read_to_string(path)?;
        let weights: PolicyWeights = serde_json::from_str(&raw)?;
        let policy = Self::new(weights)?;
        info!(path = %path.display(), "policy network loaded");
        Ok(policy)
    }
}

impl PolicySource for MlpPolicy {
    fn infer(&self, state: &[f64; STATE_DIM]) -> Result<PolicyAction> {
        let mut activations: Vec<f64> = state.to_vec();
        let last = self.weights.layers.len() - 1;
        for (i, layer) in self.weights.layers.iter().enumerate() {
            activations = forward(layer, &activations, i < last);
        }

        let best = activations
            .iter()
            .enumerate()
            .max_by(|(_, a), (_, b)| a.total_cmp(b))
            .map(|(idx, _)| idx)
            .ok_or_else(|| Error::Policy("empty output layer".into()))?;

        PolicyAction::from_index(best)
            .ok_or_else(|| Error::Policy(format!("action index {best} out of range")))
    }
}

fn forward(layer: &LayerWeights, input: &[f64], relu: bool) -> Vec<f64> {
    layer
        .weights
        .iter()
        .zip(&layer.biases)
        .map(|(row, bias)| {
            let sum: f64 = row.iter().zip(input).map(|(w, x)| w * x).sum::<f64>() + bias;
            if relu {
                sum.max(0.0)
            } else {
                sum
            }
        })
        .collect()
}
