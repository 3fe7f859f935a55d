//! Feed-forward neural network classifier.
//!
//! ReLU hidden layers, a softmax output, cross-entropy loss with an L2
//! penalty, trained by mini-batch Adam. Stops once the epoch loss fails to
//! improve by `tolerance` for `n_iter_no_change` consecutive epochs.

use ndarray::{Array1, Array2, ArrayView1, ArrayView2, Axis, Zip};
use rand::SeedableRng;
use rand::distributions::{Distribution, Uniform};
use rand::seq::SliceRandom;
use rand_chacha::ChaCha8Rng;
use serde::{Deserialize, Serialize};

use super::{FittedEstimator, argmax_rows, n_classes};
use crate::error::ModelError;
use crate::{Estimator, Predictor, check_features, check_training_set};

const BETA_1: f64 = 0.9;
const BETA_2: f64 = 0.999;
const EPSILON: f64 = 1e-8;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MlpParams {
    pub hidden_layers: Vec<usize>,
    /// L2 penalty strength.
    pub alpha: f64,
    pub learning_rate: f64,
    pub max_epochs: usize,
    pub batch_size: usize,
    pub tolerance: f64,
    pub n_iter_no_change: usize,
    pub seed: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
struct Layer {
    weights: Array2<f64>,
    bias: Array1<f64>,
}

impl Layer {
    fn glorot(fan_in: usize, fan_out: usize, rng: &mut ChaCha8Rng) -> Self {
        let bound = (6.0 / (fan_in + fan_out) as f64).sqrt();
        let dist = Uniform::new_inclusive(-bound, bound);
        Layer {
            weights: Array2::from_shape_fn((fan_in, fan_out), |_| dist.sample(&mut *rng)),
            bias: Array1::from_shape_fn(fan_out, |_| dist.sample(&mut *rng)),
        }
    }

    fn forward(&self, input: &Array2<f64>) -> Array2<f64> {
        input.dot(&self.weights) + &self.bias
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FittedMlp {
    n_features: usize,
    layers: Vec<Layer>,
    epochs_run: usize,
    final_loss: f64,
}

impl FittedMlp {
    pub fn epochs_run(&self) -> usize {
        self.epochs_run
    }

    pub fn final_loss(&self) -> f64 {
        self.final_loss
    }

    /// Activations of every layer, input first, softmax probabilities last.
    fn activations(&self, x: &Array2<f64>) -> Vec<Array2<f64>> {
        forward_pass(&self.layers, x)
    }
}

/// Adam first and second moment estimates for one layer.
struct Moments {
    m_w: Array2<f64>,
    v_w: Array2<f64>,
    m_b: Array1<f64>,
    v_b: Array1<f64>,
}

impl Moments {
    fn for_layer(layer: &Layer) -> Self {
        Moments {
            m_w: Array2::zeros(layer.weights.raw_dim()),
            v_w: Array2::zeros(layer.weights.raw_dim()),
            m_b: Array1::zeros(layer.bias.raw_dim()),
            v_b: Array1::zeros(layer.bias.raw_dim()),
        }
    }
}

impl Estimator for MlpParams {
    fn fit(
        &self,
        x: ArrayView2<'_, f64>,
        y: ArrayView1<'_, usize>,
    ) -> Result<FittedEstimator, ModelError> {
        check_training_set(&x, &y)?;
        if self.batch_size == 0 || self.max_epochs == 0 {
            return Err(ModelError::fit(
                "mlp",
                "batch_size and max_epochs must be positive",
            ));
        }

        let n_samples = x.nrows();
        let n_features = x.ncols();
        let n_outputs = n_classes(&y).max(2);
        let mut rng = ChaCha8Rng::seed_from_u64(self.seed);

        let mut widths = Vec::with_capacity(self.hidden_layers.len() + 2);
        widths.push(n_features);
        widths.extend(self.hidden_layers.iter().copied());
        widths.push(n_outputs);
        let mut layers: Vec<Layer> = widths
            .windows(2)
            .map(|w| Layer::glorot(w[0], w[1], &mut rng))
            .collect();
        let mut moments: Vec<Moments> = layers.iter().map(Moments::for_layer).collect();

        let batch_size = self.batch_size.min(n_samples);
        let mut order: Vec<usize> = (0..n_samples).collect();
        let mut step = 0_i32;
        let mut best_loss = f64::INFINITY;
        let mut no_improvement = 0;
        let mut epochs_run = 0;
        let mut epoch_loss = f64::INFINITY;

        for _ in 0..self.max_epochs {
            order.shuffle(&mut rng);
            let mut accumulated = 0.0;

            for batch in order.chunks(batch_size) {
                let xb = x.select(Axis(0), batch);
                let yb = one_hot(batch.iter().map(|&i| y[i]), n_outputs);
                let activations = forward_pass(&layers, &xb);
                let Some(probs) = activations.last() else {
                    return Err(ModelError::fit("mlp", "network has no layers"));
                };

                accumulated += cross_entropy(probs, &yb) * batch.len() as f64;

                let grads = backward_pass(&layers, &activations, &yb, self.alpha);
                step += 1;
                let lr_t = self.learning_rate * (1.0 - BETA_2.powi(step)).sqrt()
                    / (1.0 - BETA_1.powi(step));
                for ((layer, moment), (grad_w, grad_b)) in
                    layers.iter_mut().zip(moments.iter_mut()).zip(grads)
                {
                    adam_update(&mut layer.weights, &mut moment.m_w, &mut moment.v_w, &grad_w, lr_t);
                    adam_update(&mut layer.bias, &mut moment.m_b, &mut moment.v_b, &grad_b, lr_t);
                }
            }

            let penalty: f64 = layers.iter().map(|l| l.weights.mapv(|w| w * w).sum()).sum();
            epoch_loss = accumulated / n_samples as f64 + 0.5 * self.alpha * penalty / n_samples as f64;
            epochs_run += 1;

            if !epoch_loss.is_finite() {
                return Err(ModelError::fit("mlp", "loss diverged"));
            }
            if epoch_loss > best_loss - self.tolerance {
                no_improvement += 1;
            } else {
                no_improvement = 0;
            }
            best_loss = best_loss.min(epoch_loss);
            if no_improvement > self.n_iter_no_change {
                tracing::debug!(epochs_run, loss = epoch_loss, "mlp converged");
                break;
            }
        }

        if epochs_run == self.max_epochs {
            tracing::warn!(
                max_epochs = self.max_epochs,
                loss = epoch_loss,
                "mlp reached max_epochs before converging"
            );
        }

        Ok(FittedEstimator::Mlp(FittedMlp {
            n_features,
            layers,
            epochs_run,
            final_loss: epoch_loss,
        }))
    }
}

impl Predictor for FittedMlp {
    fn predict(&self, x: ArrayView2<'_, f64>) -> Result<Array1<usize>, ModelError> {
        check_features(&x, self.n_features)?;
        let activations = self.activations(&x.to_owned());
        match activations.last() {
            Some(probs) => Ok(argmax_rows(probs)),
            None => Err(ModelError::fit("mlp", "network has no layers")),
        }
    }
}

fn forward_pass(layers: &[Layer], x: &Array2<f64>) -> Vec<Array2<f64>> {
    let mut activations = Vec::with_capacity(layers.len() + 1);
    activations.push(x.clone());
    let last = layers.len().saturating_sub(1);
    for (idx, layer) in layers.iter().enumerate() {
        let Some(input) = activations.last() else {
            break;
        };
        let mut z = layer.forward(input);
        if idx == last {
            softmax_rows(&mut z);
        } else {
            z.mapv_inplace(|v| v.max(0.0));
        }
        activations.push(z);
    }
    activations
}

/// Gradients `(dW, db)` per layer, in layer order.
fn backward_pass(
    layers: &[Layer],
    activations: &[Array2<f64>],
    targets: &Array2<f64>,
    alpha: f64,
) -> Vec<(Array2<f64>, Array1<f64>)> {
    let m = targets.nrows() as f64;
    let mut grads = Vec::with_capacity(layers.len());
    // Softmax with cross-entropy: dL/dz = p - y.
    let mut delta = &activations[layers.len()] - targets;

    for idx in (0..layers.len()).rev() {
        let input = &activations[idx];
        let grad_w = (input.t().dot(&delta) + &layers[idx].weights * alpha) / m;
        let grad_b = delta.sum_axis(Axis(0)) / m;
        if idx > 0 {
            let mut upstream = delta.dot(&layers[idx].weights.t());
            Zip::from(&mut upstream)
                .and(&activations[idx])
                .for_each(|d, &a| {
                    if a <= 0.0 {
                        *d = 0.0;
                    }
                });
            delta = upstream;
        }
        grads.push((grad_w, grad_b));
    }
    grads.reverse();
    grads
}

fn adam_update<D: ndarray::Dimension>(
    param: &mut ndarray::Array<f64, D>,
    m: &mut ndarray::Array<f64, D>,
    v: &mut ndarray::Array<f64, D>,
    grad: &ndarray::Array<f64, D>,
    lr_t: f64,
) {
    Zip::from(param)
        .and(m)
        .and(v)
        .and(grad)
        .for_each(|p, m, v, &g| {
            *m = BETA_1 * *m + (1.0 - BETA_1) * g;
            *v = BETA_2 * *v + (1.0 - BETA_2) * g * g;
            *p -= lr_t * *m / (v.sqrt() + EPSILON);
        });
}

fn softmax_rows(z: &mut Array2<f64>) {
    for mut row in z.rows_mut() {
        let max = row.fold(f64::NEG_INFINITY, |a, &b| a.max(b));
        row.mapv_inplace(|v| (v - max).exp());
        let sum = row.sum();
        row.mapv_inplace(|v| v / sum);
    }
}

fn one_hot(labels: impl Iterator<Item = usize>, n_classes: usize) -> Array2<f64> {
    let labels: Vec<usize> = labels.collect();
    let mut encoded = Array2::zeros((labels.len(), n_classes));
    for (row, class) in labels.into_iter().enumerate() {
        encoded[[row, class]] = 1.0;
    }
    encoded
}

/// Mean cross-entropy over the rows.
fn cross_entropy(probs: &Array2<f64>, targets: &Array2<f64>) -> f64 {
    let clipped = probs.mapv(|p| p.clamp(1e-10, 1.0 - 1e-10).ln());
    -(&clipped * targets).sum() / probs.nrows() as f64
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::array;

    #[test]
    fn softmax_rows_sum_to_one() {
        let mut z = array![[1.0, 2.0, 3.0], [1000.0, 1000.0, 1000.0]];
        softmax_rows(&mut z);
        for row in z.rows() {
            assert!((row.sum() - 1.0).abs() < 1e-12);
        }
        assert!(z[[0, 2]] > z[[0, 0]]);
    }

    #[test]
    fn one_hot_places_single_one() {
        let encoded = one_hot([2, 0].into_iter(), 3);
        assert_eq!(encoded, array![[0.0, 0.0, 1.0], [1.0, 0.0, 0.0]]);
    }

    #[test]
    fn learns_linearly_separable_classes() {
        let x = array![
            [0.0, 0.1],
            [0.1, 0.0],
            [0.2, 0.1],
            [0.1, 0.2],
            [2.0, 2.1],
            [2.1, 2.0],
            [2.2, 1.9],
            [1.9, 2.2],
        ];
        let y = array![0, 0, 0, 0, 1, 1, 1, 1];
        let params = MlpParams {
            hidden_layers: vec![8],
            alpha: 0.0001,
            learning_rate: 0.05,
            max_epochs: 300,
            batch_size: 8,
            tolerance: 1e-6,
            n_iter_no_change: 10,
            seed: 7,
        };
        let fitted = params.fit(x.view(), y.view()).unwrap();
        let predicted = fitted.predict(x.view()).unwrap();
        assert_eq!(predicted, y);
    }
}
