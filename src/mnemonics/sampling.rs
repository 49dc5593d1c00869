//! Recency-weighted quiz sampling
//!
//! Each record's timestamp is normalized into `[0, 1]` over the table's
//! range (0 = oldest, 1 = newest) and turned into a weight:
//! - bias > 0: `age ^ bias`, newer records come up more often
//! - bias < 0: `(1 - age) ^ |bias|`, older records come up more often
//! - bias = 0: uniform
//!
//! Records without a timestamp count as the oldest.

use rand::seq::SliceRandom;
use rand::Rng;

/// Sampling weights for `timestamps`, normalized to sum to 1
///
/// Falls back to uniform weights when the bias is zero, when no record
/// carries a timestamp, or when every timestamp is equal.
pub fn sampling_weights(timestamps: &[Option<f64>], bias: f64) -> Vec<f64> {
    let n = timestamps.len();
    if n == 0 {
        return Vec::new();
    }
    let uniform = vec![1.0 / n as f64; n];

    if bias == 0.0 || !bias.is_finite() {
        return uniform;
    }

    let known = timestamps.iter().flatten().copied().filter(|t| t.is_finite());
    let (min, max) = known.fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), t| {
        (lo.min(t), hi.max(t))
    });
    let span = max - min;
    if !span.is_finite() || span <= 0.0 {
        return uniform;
    }

    let raw: Vec<f64> = timestamps
        .iter()
        .map(|ts| {
            let age = ts
                .filter(|t| t.is_finite())
                .map_or(0.0, |t| (t - min) / span);
            if bias > 0.0 {
                age.powf(bias)
            } else {
                (1.0 - age).powf(-bias)
            }
        })
        .collect();

    let total: f64 = raw.iter().sum();
    if total <= 0.0 {
        return uniform;
    }

    raw.into_iter().map(|w| w / total).collect()
}

/// Draw `count` distinct indices, weighted without replacement
///
/// Indices with a positive weight are drawn first; once they run out the
/// zero-weight ones fill the rest uniformly. The result is in random
/// order. `count` is capped at `weights.len()`.
pub fn weighted_sample_indices<R: Rng + ?Sized>(
    weights: &[f64],
    count: usize,
    rng: &mut R,
) -> Vec<usize> {
    let count = count.min(weights.len());
    let (weighted, mut unweighted): (Vec<usize>, Vec<usize>) =
        (0..weights.len()).partition(|&i| weights[i] > 0.0);

    let take = count.min(weighted.len());
    let drawn = weighted.choose_multiple_weighted(rng, take, |&i| weights[i]);
    let mut picked: Vec<usize> = match drawn {
        Ok(chosen) => chosen.copied().collect(),
        Err(e) => {
            log::warn!("Weighted draw failed ({}), drawing uniformly", e);
            weighted.choose_multiple(rng, take).copied().collect()
        }
    };
    picked.shuffle(rng);

    unweighted.shuffle(rng);
    picked.extend(unweighted.into_iter().take(count - picked.len()));

    picked
}
