//! Embedding vector value object.

use serde::{Deserialize, Serialize};

/// A dense embedding vector with its native model dimensionality.
///
/// Providers return vectors of their native width (`dimensions`); the
/// embedder pads these to `D_canonical` before anything is persisted (spec
/// §4.I). `Embedding` itself makes no claim about which width it holds —
/// callers consult `dimensions` / `vector.len()`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Embedding {
    /// The vector components.
    pub vector: Vec<f32>,
    /// Name of the model that produced this vector (e.g. `"text-embedding-3-small"`).
    pub model: String,
    /// Length of `vector`, cached for convenient access.
    pub dimensions: usize,
}

impl Embedding {
    /// Construct an embedding, deriving `dimensions` from the vector length.
    #[must_use]
    pub fn new(vector: Vec<f32>, model: impl Into<String>) -> Self {
        let dimensions = vector.len();
        Self {
            vector,
            model: model.into(),
            dimensions,
        }
    }

    /// Right-pad `self.vector` with zeros up to `target`.
    ///
    /// No-op if already at or above `target` (callers guard the
    /// `native > canonical` case themselves per spec §4.I's fail-fast rule).
    pub fn pad_to(&mut self, target: usize) {
        if self.vector.len() < target {
            self.vector.resize(target, 0.0);
            self.dimensions = target;
        }
    }

    /// Cosine similarity between this vector and `other`.
    ///
    /// Returns `0.0` if either vector is all-zero (avoids a divide-by-zero
    /// on padded tail-only comparisons).
    #[must_use]
    pub fn cosine_similarity(&self, other: &[f32]) -> f32 {
        let len = self.vector.len().min(other.len());
        let mut dot = 0.0f32;
        let mut norm_a = 0.0f32;
        let mut norm_b = 0.0f32;
        for i in 0..len {
            dot += self.vector[i] * other[i];
            norm_a += self.vector[i] * self.vector[i];
            norm_b += other[i] * other[i];
        }
        if norm_a == 0.0 || norm_b == 0.0 {
            return 0.0;
        }
        dot / (norm_a.sqrt() * norm_b.sqrt())
    }
}

#[cfg(test)]
mod tests {
    use super::Embedding;

    #[test]
    fn pad_to_right_pads_with_zeros() {
        let mut e = Embedding::new(vec![1.0, 2.0, 3.0], "test-model");
        e.pad_to(6);
        assert_eq!(e.vector, vec![1.0, 2.0, 3.0, 0.0, 0.0, 0.0]);
        assert_eq!(e.dimensions, 6);
    }

    #[test]
    fn pad_to_is_noop_when_already_wide_enough() {
        let mut e = Embedding::new(vec![1.0, 2.0], "m");
        e.pad_to(2);
        assert_eq!(e.vector, vec![1.0, 2.0]);
    }

    #[test]
    fn cosine_similarity_of_identical_vectors_is_one() {
        let e = Embedding::new(vec![1.0, 0.0, 0.0], "m");
        assert!((e.cosine_similarity(&[1.0, 0.0, 0.0]) - 1.0).abs() < 1e-6);
    }
}
