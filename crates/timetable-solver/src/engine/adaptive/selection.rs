// Copyright (c) 2025 Felix Kahle.
//
// Permission is hereby granted, free of charge, to any person obtaining
// a copy of this software and associated documentation files (the
// "Software"), to deal in the Software without restriction, including
// without limitation the rights to use, copy, modify, merge, publish,
// distribute, sublicense, and/or sell copies of the Software, and to
// permit persons to whom the Software is furnished to do so, subject to
// the following conditions:
//
// The above copyright notice and this permission notice shall be
// included in all copies or substantial portions of the Software.
//
// THE SOFTWARE IS PROVIDED "AS IS", WITHOUT WARRANTY OF ANY KIND,
// EXPRESS OR IMPLIED, INCLUDING BUT NOT LIMITED TO THE WARRANTIES OF
// MERCHANTABILITY, FITNESS FOR A PARTICULAR PURPOSE AND
// NONINFRINGEMENT. IN NO EVENT SHALL THE AUTHORS OR COPYRIGHT HOLDERS BE
// LIABLE FOR ANY CLAIM, DAMAGES OR OTHER LIABILITY, WHETHER IN AN ACTION
// OF CONTRACT, TORT OR OTHERWISE, ARISING FROM, OUT OF OR IN CONNECTION
// WITH THE SOFTWARE OR THE USE OR OTHER DEALINGS IN THE SOFTWARE.

use crate::engine::adaptive::stats::OperatorStats;
use crate::search::operator::OperatorKind;
use rand::Rng;

/// Pursuit learning rate.
const LEARNING_RATE: f64 = 0.1;
/// Floor the losers' probabilities are pulled towards.
const PROBABILITY_FLOOR: f64 = 0.05;

/// Adaptive-pursuit operator selection: every update pulls the probability
/// of the best-scoring operator(s) towards 1 and all others towards the
/// floor. The vector is never re-normalized; the weighted draw divides by
/// the running total instead.
#[derive(Debug, Clone, Default)]
pub struct AdaptiveSelector {
    stats: [OperatorStats; 4],
}

impl AdaptiveSelector {
    pub fn new() -> Self {
        Self::default()
    }

    /// Draw an operator with probability proportional to its weight.
    pub fn select<R: Rng>(&self, rng: &mut R) -> OperatorKind {
        let total: f64 = self.stats.iter().map(|s| s.selection_probability).sum();
        if total <= 0.0 {
            return OperatorKind::ALL[rng.random_range(0..OperatorKind::ALL.len())];
        }

        let mut remaining = rng.random::<f64>() * total;
        for (i, s) in self.stats.iter().enumerate() {
            if remaining <= s.selection_probability {
                return OperatorKind::ALL[i];
            }
            remaining -= s.selection_probability;
        }
        OperatorKind::ALL[OperatorKind::ALL.len() - 1]
    }

    /// Record the outcome of a produced neighbor and run the pursuit update.
    /// `improvement` is the absolute fitness delta of the move.
    pub fn update_stats(&mut self, kind: OperatorKind, improved: bool, improvement: f64) {
        self.stats[kind.index()].record(improved, improvement);
        self.update_probabilities();
    }

    fn update_probabilities(&mut self) {
        let scores: Vec<f64> = self.stats.iter().map(|s| s.quality_score()).collect();
        let max_score = scores.iter().cloned().fold(f64::NEG_INFINITY, f64::max);

        // every operator tied on the maximum is rewarded
        for (s, score) in self.stats.iter_mut().zip(&scores) {
            let target = if *score == max_score {
                1.0
            } else {
                PROBABILITY_FLOOR
            };
            s.selection_probability += LEARNING_RATE * (target - s.selection_probability);
        }
    }

    #[inline]
    pub fn stats(&self) -> &[OperatorStats; 4] {
        &self.stats
    }

    #[inline]
    pub fn probability(&self, kind: OperatorKind) -> f64 {
        self.stats[kind.index()].selection_probability
    }
}
