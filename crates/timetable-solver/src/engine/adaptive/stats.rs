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

/// Per-operator bookkeeping for the adaptive selector.
#[derive(Debug, Clone)]
pub struct OperatorStats {
    /// moves that produced a valid neighbor (failed draws are not attempts)
    pub attempts: u64,
    /// attempts that improved the current fitness
    pub improvements: u64,
    /// arithmetic mean of the fitness gain over improving moves
    pub avg_improvement: f64,
    /// unnormalized selection weight maintained by the pursuit rule
    pub selection_probability: f64,
}

impl Default for OperatorStats {
    fn default() -> Self {
        Self {
            attempts: 0,
            improvements: 0,
            avg_improvement: 0.0,
            selection_probability: 0.25,
        }
    }
}

impl OperatorStats {
    /// Record the outcome of a move that produced a valid neighbor.
    pub fn record(&mut self, improved: bool, improvement: f64) {
        self.attempts += 1;
        if improved {
            self.improvements += 1;
            self.avg_improvement = (self.avg_improvement * (self.improvements - 1) as f64
                + improvement)
                / self.improvements as f64;
        }
    }

    /// Fraction of attempts that improved; 0.5 before the first attempt so
    /// untried operators compete on equal footing.
    #[inline]
    pub fn success_rate(&self) -> f64 {
        if self.attempts > 0 {
            self.improvements as f64 / self.attempts as f64
        } else {
            0.5
        }
    }

    /// Quality score driving the pursuit update.
    #[inline]
    pub fn quality_score(&self) -> f64 {
        self.success_rate() * (1.0 + self.avg_improvement / 100.0)
    }
}
