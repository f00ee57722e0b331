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

pub mod constraint;
pub mod engine;
pub mod search;

pub mod prelude {
    pub use crate::constraint::checker::ConstraintChecker;
    pub use crate::engine::adaptive::selection::AdaptiveSelector;
    pub use crate::engine::adaptive::stats::OperatorStats;
    pub use crate::engine::construction::ConstructionHeuristic;
    pub use crate::engine::elite::ElitePool;
    pub use crate::engine::local_search::LocalSearch;
    pub use crate::engine::solver::{SolveOutcome, SolveStats, Solver, SolverConfig};
    pub use crate::search::operator::{NeighborhoodOperator, OperatorKind, SearchContext};
}
