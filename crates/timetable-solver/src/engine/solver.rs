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

use crate::constraint::checker::ConstraintChecker;
use crate::engine::adaptive::selection::AdaptiveSelector;
use crate::engine::construction::ConstructionHeuristic;
use crate::engine::elite::ElitePool;
use crate::engine::local_search::LocalSearch;
use crate::search::operator::SearchContext;
use rand::seq::SliceRandom;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use std::time::{Duration, Instant};
use timetable_model::prelude::{Calendar, CourseIdentifier, Instance, Schedule};

/// Engine configuration. The weekly grid lives here rather than in the
/// instance document; the remaining knobs bound the two nested search loops.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SolverConfig {
    pub days: u32,
    pub periods_per_day: u32,
    /// outer multi-start restarts
    pub cp_iterations: usize,
    /// local-search iterations per restart
    pub ls_iterations: usize,
    pub seed: u64,
}

impl Default for SolverConfig {
    fn default() -> Self {
        Self {
            days: 5,
            periods_per_day: 8,
            cp_iterations: 5,
            ls_iterations: 10_000,
            seed: 0,
        }
    }
}

impl SolverConfig {
    #[inline]
    pub fn calendar(&self) -> Calendar {
        Calendar::new(self.days, self.periods_per_day)
    }
}

/// Summary statistics of a solve.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SolveStats {
    pub hard_violations: usize,
    pub soft_violations: i64,
    pub fitness: f64,
    pub runtime: Duration,
}

/// The best schedule found plus its summary. An infinite fitness means no
/// restart produced a schedule; callers must treat that as failure.
#[derive(Debug, Clone)]
pub struct SolveOutcome {
    pub schedule: Schedule,
    pub stats: SolveStats,
}

impl SolveOutcome {
    #[inline]
    pub fn is_failure(&self) -> bool {
        self.stats.fitness.is_infinite()
    }
}

/// Multi-start orchestrator: every restart builds a fresh greedy opening,
/// improves it with the local search, and the best final schedule across
/// restarts wins. The elite pool, the adaptive selector and the generator
/// live on the engine, so later restarts profit from earlier ones.
pub struct Solver<'a> {
    instance: &'a Instance,
    config: SolverConfig,
    checker: ConstraintChecker<'a>,
    selector: AdaptiveSelector,
    elite: ElitePool,
    rng: ChaCha8Rng,
}

impl<'a> Solver<'a> {
    pub fn new(instance: &'a Instance, config: SolverConfig) -> Self {
        Self {
            instance,
            config,
            checker: ConstraintChecker::new(instance),
            selector: AdaptiveSelector::new(),
            elite: ElitePool::default(),
            rng: ChaCha8Rng::seed_from_u64(config.seed),
        }
    }

    #[inline]
    pub fn config(&self) -> &SolverConfig {
        &self.config
    }

    #[tracing::instrument(level = "info", name = "Solve", skip_all)]
    pub fn solve(&mut self) -> SolveOutcome {
        let started = Instant::now();
        let calendar = self.config.calendar();
        let construction = ConstructionHeuristic::new();
        let local_search = LocalSearch::new(self.config.ls_iterations);

        let mut best = Schedule::unsolved();
        // tie-breaking order for the construction sort, reshuffled between
        // restarts so every restart explores a different opening
        let mut order: Vec<CourseIdentifier> = self.instance.iter_course_ids().collect();

        for restart in 0..self.config.cp_iterations {
            tracing::info!(
                restart = restart + 1,
                total = self.config.cp_iterations,
                "starting restart"
            );

            self.checker.clear_cache();
            let mut current =
                construction.build(self.instance, calendar, &mut self.checker, &order);
            tracing::info!(
                hard_violations = current.hard_violations(),
                fitness = current.fitness(),
                assignments = current.len(),
                "initial solution"
            );

            {
                let mut ctx = SearchContext::new(
                    self.instance,
                    calendar,
                    &mut self.checker,
                    &mut self.rng,
                );
                local_search.run(&mut current, &mut self.selector, &mut self.elite, &mut ctx);
            }
            tracing::info!(
                hard_violations = current.hard_violations(),
                fitness = current.fitness(),
                "after local search"
            );

            if current.fitness() < best.fitness() {
                best = current;
            }

            order.shuffle(&mut self.rng);
        }

        let runtime = started.elapsed();
        let stats = SolveStats {
            hard_violations: best.hard_violations(),
            soft_violations: best.soft_violations(),
            fitness: best.fitness(),
            runtime,
        };
        SolveOutcome {
            schedule: best,
            stats,
        }
    }
}
