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

use crate::engine::adaptive::selection::AdaptiveSelector;
use crate::engine::elite::ElitePool;
use crate::search::local_moves::{apply_operator, MoveAssignment};
use crate::search::operator::{NeighborhoodOperator, SearchContext};
use rand::Rng;
use timetable_model::prelude::Schedule;

/// Simulated-annealing local search over the four adaptive neighborhoods,
/// with stagnation-triggered perturbation and periodic path relinking
/// against the elite pool.
#[derive(Debug, Clone, Copy)]
pub struct LocalSearch {
    max_iterations: usize,
    max_no_improvement: usize,
    perturbation_strength: f64,
    relink_interval: usize,
    initial_temperature: f64,
}

impl LocalSearch {
    pub fn new(max_iterations: usize) -> Self {
        Self {
            max_iterations,
            max_no_improvement: 100,
            perturbation_strength: 0.1,
            relink_interval: 1000,
            initial_temperature: 100.0,
        }
    }

    #[inline]
    pub fn max_iterations(&self) -> usize {
        self.max_iterations
    }

    /// Run the search, leaving the best schedule observed in `schedule`.
    #[tracing::instrument(level = "debug", name = "Local Search", skip_all)]
    pub fn run<R: Rng>(
        &self,
        schedule: &mut Schedule,
        selector: &mut AdaptiveSelector,
        elite: &mut ElitePool,
        ctx: &mut SearchContext<'_, '_, R>,
    ) {
        let mut best = schedule.clone();
        let mut no_improvement = 0usize;

        for iteration in 0..self.max_iterations {
            let kind = selector.select(ctx.rng());

            let mut neighbor = schedule.clone();
            if apply_operator(kind, &mut neighbor, ctx) {
                ctx.checker().evaluate(&mut neighbor);

                // positive delta means the neighbor is better
                let improvement = schedule.fitness() - neighbor.fitness();
                let improved = improvement > 0.0;
                let temperature = self.initial_temperature
                    * (1.0 - iteration as f64 / self.max_iterations as f64);

                if improved || self.accept_worse(improvement, temperature, ctx.rng()) {
                    *schedule = neighbor;
                    if improved {
                        no_improvement = 0;
                        if schedule.fitness() < best.fitness() {
                            best = schedule.clone();
                            elite.offer(&best);
                            tracing::debug!(
                                iteration,
                                fitness = best.fitness(),
                                operator = %kind,
                                "new best"
                            );
                        }
                    }
                } else {
                    no_improvement += 1;
                }

                selector.update_stats(kind, improved, improvement.abs());
            }

            if no_improvement >= self.max_no_improvement {
                self.perturb(schedule, ctx);
                no_improvement = 0;
            }

            if iteration % self.relink_interval == 0 && !elite.is_empty() {
                let relinked = self.path_relink(schedule, elite, ctx);
                if relinked.fitness() < schedule.fitness() {
                    *schedule = relinked;
                }
            }
        }

        *schedule = best;
    }

    /// Metropolis acceptance for a worsening move.
    fn accept_worse<R: Rng>(&self, delta: f64, temperature: f64, rng: &mut R) -> bool {
        if temperature <= 0.0 {
            return false;
        }
        let probability = (-delta.abs() / temperature).exp();
        rng.random::<f64>() < probability
    }

    /// Diversification: redraw roughly a tenth of the assignments. A failed
    /// draw still consumes one of the moves; there is no retry.
    fn perturb<R: Rng>(&self, schedule: &mut Schedule, ctx: &mut SearchContext<'_, '_, R>) {
        let moves = ((schedule.len() as f64 * self.perturbation_strength) as usize).max(1);
        for _ in 0..moves {
            let _ = MoveAssignment.apply(schedule, ctx);
        }
        ctx.checker().clear_cache();
        ctx.checker().evaluate(schedule);
        tracing::debug!(moves, fitness = schedule.fitness(), "perturbed");
    }

    /// Walk from `source` towards a random elite, keeping the best feasible
    /// schedule seen along the way.
    fn path_relink<R: Rng>(
        &self,
        source: &Schedule,
        elite: &ElitePool,
        ctx: &mut SearchContext<'_, '_, R>,
    ) -> Schedule {
        let Some(target) = elite.pick_random(ctx.rng()) else {
            return source.clone();
        };
        let target = target.clone();

        let mut current = source.clone();
        let mut best = source.clone();

        let common = source.len().min(target.len());
        for position in 0..common {
            let from = source.assignments()[position];
            let to = target.assignments()[position];
            if from.room() == to.room() && from.slot() == to.slot() {
                continue;
            }

            let previous = current.assignments()[position];
            current.replace_assignment(position, to);
            ctx.checker().clear_cache();

            let candidate = current.assignments()[position];
            if ctx.checker().is_valid_assignment(&candidate, &current) {
                ctx.checker().evaluate(&mut current);
                if current.fitness() < best.fitness() {
                    best = current.clone();
                }
            } else {
                current.replace_assignment(position, previous);
                ctx.checker().clear_cache();
            }
        }

        best
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::constraint::checker::ConstraintChecker;
    use crate::engine::construction::ConstructionHeuristic;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;
    use timetable_model::prelude::{
        Assignment, Calendar, Course, CourseIdentifier, GroupIdentifier, Instance, Lecturer,
        LecturerIdentifier, Room, RoomIdentifier, StudentGroup,
    };
    use timetable_model::time::TimeSlot;

    /// `n` single-meeting courses, one per lecturer/group, `rooms`
    /// interchangeable rooms.
    fn independent_courses(n: usize, rooms: usize) -> Instance {
        let lecturers = (0..n)
            .map(|i| Lecturer::new(LecturerIdentifier::new(i), format!("Dr. {i}")))
            .collect();
        let groups = (0..n)
            .map(|i| StudentGroup::new(GroupIdentifier::new(i), format!("G{i}"), 20))
            .collect();
        let rooms = (0..rooms)
            .map(|i| Room::new(RoomIdentifier::new(i), format!("Room {i}"), 40))
            .collect();
        let courses = (0..n)
            .map(|i| {
                let mut c = Course::new(
                    CourseIdentifier::new(i),
                    format!("Course {i}"),
                    LecturerIdentifier::new(i),
                    1,
                    1,
                );
                c.add_group(GroupIdentifier::new(i));
                c
            })
            .collect();
        Instance::new(lecturers, groups, rooms, courses).unwrap()
    }

    #[test]
    fn test_empty_schedule_survives_the_loop() {
        let instance = independent_courses(1, 1);
        let mut checker = ConstraintChecker::new(&instance);
        let mut rng = ChaCha8Rng::seed_from_u64(0);
        let mut ctx = SearchContext::new(&instance, Calendar::default(), &mut checker, &mut rng);

        let mut schedule = Schedule::new();
        let mut selector = AdaptiveSelector::new();
        let mut elite = ElitePool::default();

        LocalSearch::new(200).run(&mut schedule, &mut selector, &mut elite, &mut ctx);
        assert!(schedule.is_empty());
        assert_eq!(schedule.fitness(), 0.0);
    }

    #[test]
    fn test_best_fitness_is_monotone_over_the_start() {
        let instance = independent_courses(6, 3);
        let mut checker = ConstraintChecker::new(&instance);
        let order: Vec<CourseIdentifier> = instance.iter_course_ids().collect();
        let calendar = Calendar::new(3, 4);
        let mut schedule =
            ConstructionHeuristic::new().build(&instance, calendar, &mut checker, &order);
        let initial_fitness = schedule.fitness();

        let mut rng = ChaCha8Rng::seed_from_u64(42);
        let mut ctx = SearchContext::new(&instance, calendar, &mut checker, &mut rng);
        let mut selector = AdaptiveSelector::new();
        let mut elite = ElitePool::default();
        LocalSearch::new(500).run(&mut schedule, &mut selector, &mut elite, &mut ctx);

        assert!(
            schedule.fitness() <= initial_fitness,
            "local search must never return something worse than its start"
        );
    }

    #[test]
    fn test_feasibility_is_preserved() {
        let instance = independent_courses(6, 3);
        let mut checker = ConstraintChecker::new(&instance);
        let order: Vec<CourseIdentifier> = instance.iter_course_ids().collect();
        let calendar = Calendar::new(3, 4);
        let mut schedule =
            ConstructionHeuristic::new().build(&instance, calendar, &mut checker, &order);
        assert_eq!(schedule.hard_violations(), 0);

        let mut rng = ChaCha8Rng::seed_from_u64(7);
        let mut ctx = SearchContext::new(&instance, calendar, &mut checker, &mut rng);
        let mut selector = AdaptiveSelector::new();
        let mut elite = ElitePool::default();
        LocalSearch::new(800).run(&mut schedule, &mut selector, &mut elite, &mut ctx);

        // pairwise hard constraints 3-5 hold for the returned best
        let assignments = schedule.assignments();
        for (i, a) in assignments.iter().enumerate() {
            for b in &assignments[i + 1..] {
                if a.course() == b.course() || a.slot() != b.slot() {
                    continue;
                }
                assert_ne!(a.room(), b.room(), "room conflict in accepted schedule");
                let ca = instance.course(a.course());
                let cb = instance.course(b.course());
                assert_ne!(
                    ca.lecturer(),
                    cb.lecturer(),
                    "lecturer conflict in accepted schedule"
                );
                assert!(
                    !ca.shares_group_with(cb),
                    "group conflict in accepted schedule"
                );
            }
        }
    }

    #[test]
    fn test_elite_pool_receives_improvements() {
        // start from a deliberately bad-but-feasible layout so the search
        // has room to improve and must populate the pool
        let instance = independent_courses(4, 4);
        let mut checker = ConstraintChecker::new(&instance);
        let calendar = Calendar::new(5, 8);

        let mut schedule = Schedule::new();
        for i in 0..4 {
            // all in the afternoon of one day with gaps
            schedule.push_assignment(Assignment::new(
                CourseIdentifier::new(i),
                RoomIdentifier::new(i),
                TimeSlot::new(0, (7 - i) as u32),
            ));
        }
        checker.evaluate(&mut schedule);
        assert!(schedule.fitness() > 0.0);

        let mut rng = ChaCha8Rng::seed_from_u64(3);
        let mut ctx = SearchContext::new(&instance, calendar, &mut checker, &mut rng);
        let mut selector = AdaptiveSelector::new();
        let mut elite = ElitePool::default();
        LocalSearch::new(2000).run(&mut schedule, &mut selector, &mut elite, &mut ctx);

        assert!(!elite.is_empty(), "improvements must feed the elite pool");
        assert!(elite.len() <= ElitePool::DEFAULT_CAPACITY);
        for s in elite.iter() {
            assert_eq!(s.hard_violations(), 0);
        }
    }

    #[test]
    fn test_path_relink_reaches_the_target_layout() {
        let instance = independent_courses(3, 3);
        let mut checker = ConstraintChecker::new(&instance);
        let calendar = Calendar::new(5, 8);

        // source: spread over the afternoon; target: compact morning layout
        let mut source = Schedule::new();
        let mut target = Schedule::new();
        for i in 0..3usize {
            source.push_assignment(Assignment::new(
                CourseIdentifier::new(i),
                RoomIdentifier::new(i),
                TimeSlot::new(i as u32, 7),
            ));
            target.push_assignment(Assignment::new(
                CourseIdentifier::new(i),
                RoomIdentifier::new(i),
                TimeSlot::new(i as u32, 0),
            ));
        }
        checker.evaluate(&mut source);
        checker.evaluate(&mut target);
        assert!(target.fitness() < source.fitness());

        let mut elite = ElitePool::default();
        elite.offer(&target);

        let mut rng = ChaCha8Rng::seed_from_u64(1);
        let mut ctx = SearchContext::new(&instance, calendar, &mut checker, &mut rng);
        let relinked = LocalSearch::new(10).path_relink(&source, &elite, &mut ctx);

        // every overwrite towards the target is feasible here, so the walk
        // must reach the target's fitness
        assert_eq!(relinked.fitness(), target.fitness());
    }
}
