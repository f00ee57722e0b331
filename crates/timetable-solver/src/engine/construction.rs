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
use std::cmp::Reverse;
use timetable_model::prelude::{
    Assignment, Calendar, Course, CourseIdentifier, Instance, RoomIdentifier, Schedule,
};
use timetable_model::time::TimeSlot;

/// Greedy constraint-propagation opening: hardest courses first, each
/// meeting placed into the most desirable slot that survives the hard
/// checks against the partial schedule. A meeting with no surviving
/// candidate is skipped with a diagnostic; the local search may or may not
/// recover it later.
#[derive(Debug, Clone, Copy, Default)]
pub struct ConstructionHeuristic;

impl ConstructionHeuristic {
    pub fn new() -> Self {
        Self
    }

    #[tracing::instrument(level = "debug", name = "Construction", skip_all)]
    pub fn build(
        &self,
        instance: &Instance,
        calendar: Calendar,
        checker: &mut ConstraintChecker<'_>,
        order: &[CourseIdentifier],
    ) -> Schedule {
        let mut schedule = Schedule::new();

        // hardest first: many groups and many students; the caller-supplied
        // order only breaks ties (the sort is stable)
        let mut course_order = order.to_vec();
        course_order.sort_by_key(|&id| {
            let course = instance.course(id);
            Reverse(course.group_count() as u64 * course.total_students(instance.groups()) as u64)
        });

        for &course_id in &course_order {
            let course = instance.course(course_id);
            for _ in 0..course.weekly_meetings() {
                match self.best_candidate(instance, calendar, checker, &schedule, course) {
                    Some(assignment) => {
                        schedule.push_assignment(assignment);
                        checker.clear_cache();
                    }
                    None => {
                        tracing::warn!(
                            course = course.name(),
                            "no feasible placement, skipping meeting"
                        );
                    }
                }
            }
        }

        checker.evaluate(&mut schedule);
        schedule
    }

    /// Enumerate rooms, then days, then start periods, keep the candidates
    /// passing the hard checks, and return the one with the lowest
    /// desirability key (first wins on ties).
    fn best_candidate(
        &self,
        instance: &Instance,
        calendar: Calendar,
        checker: &mut ConstraintChecker<'_>,
        schedule: &Schedule,
        course: &Course,
    ) -> Option<Assignment> {
        let last_start = calendar.last_start_period(course.duration())?;

        let mut best: Option<(i64, Assignment)> = None;
        for room_index in 0..instance.rooms().len() {
            let room = RoomIdentifier::new(room_index);
            for day in 0..calendar.days() {
                for period in 0..=last_start {
                    let candidate =
                        Assignment::new(course.id(), room, TimeSlot::new(day, period));
                    if !checker.is_valid_assignment(&candidate, schedule) {
                        continue;
                    }
                    let key = self.desirability_key(instance, course, &candidate);
                    match best {
                        Some((best_key, _)) if key >= best_key => {}
                        _ => best = Some((key, candidate)),
                    }
                }
            }
        }

        best.map(|(_, a)| a)
    }

    /// Lower is better: avoid undesirable slots, prefer mornings, prefer
    /// roomy rooms.
    fn desirability_key(&self, instance: &Instance, course: &Course, candidate: &Assignment) -> i64 {
        let slot = candidate.slot();
        let mut key = 0i64;

        if instance
            .lecturer(course.lecturer())
            .is_undesirable_slot(slot)
        {
            key += 100;
        }
        for &g in course.groups() {
            if instance.group(g).is_undesirable_slot(slot) {
                key += 50;
            }
        }
        key += 5 * slot.period() as i64;
        key -= instance.room(candidate.room()).capacity() as i64;

        key
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use timetable_model::prelude::{
        GroupIdentifier, Lecturer, LecturerIdentifier, Room, StudentGroup,
    };

    #[inline]
    fn lid(n: usize) -> LecturerIdentifier {
        LecturerIdentifier::new(n)
    }

    #[inline]
    fn gid(n: usize) -> GroupIdentifier {
        GroupIdentifier::new(n)
    }

    #[inline]
    fn rid(n: usize) -> RoomIdentifier {
        RoomIdentifier::new(n)
    }

    #[inline]
    fn cid(n: usize) -> CourseIdentifier {
        CourseIdentifier::new(n)
    }

    fn identity_order(instance: &Instance) -> Vec<CourseIdentifier> {
        instance.iter_course_ids().collect()
    }

    #[test]
    fn test_single_meeting_lands_in_the_only_slot() {
        // one course, one room, a 1x1 grid: the only candidate is (0, (0,0))
        let lecturers = vec![Lecturer::new(lid(0), "Dr. 0")];
        let groups = vec![StudentGroup::new(gid(0), "G0", 5)];
        let rooms = vec![Room::new(rid(0), "Room 0", 10)];
        let mut course = Course::new(cid(0), "Course 0", lid(0), 1, 1);
        course.add_group(gid(0));
        let instance = Instance::new(lecturers, groups, rooms, vec![course]).unwrap();

        let mut checker = ConstraintChecker::new(&instance);
        let schedule = ConstructionHeuristic::new().build(
            &instance,
            Calendar::new(1, 1),
            &mut checker,
            &identity_order(&instance),
        );

        assert_eq!(schedule.len(), 1);
        let a = schedule.assignments()[0];
        assert_eq!(a.course(), cid(0));
        assert_eq!(a.room(), rid(0));
        assert_eq!(a.slot(), TimeSlot::new(0, 0));
        assert_eq!(schedule.hard_violations(), 0);
        assert_eq!(schedule.soft_violations(), 0);
        assert_eq!(schedule.fitness(), 0.0);
    }

    #[test]
    fn test_oversubscribed_course_is_skipped() {
        // 30 students, capacity 10: no candidate survives, schedule stays
        // empty and evaluates to zero
        let lecturers = vec![Lecturer::new(lid(0), "Dr. 0")];
        let groups = vec![StudentGroup::new(gid(0), "G0", 30)];
        let rooms = vec![Room::new(rid(0), "Room 0", 10)];
        let mut course = Course::new(cid(0), "Course 0", lid(0), 1, 1);
        course.add_group(gid(0));
        let instance = Instance::new(lecturers, groups, rooms, vec![course]).unwrap();

        let mut checker = ConstraintChecker::new(&instance);
        let schedule = ConstructionHeuristic::new().build(
            &instance,
            Calendar::default(),
            &mut checker,
            &identity_order(&instance),
        );

        assert!(schedule.is_empty());
        assert_eq!(schedule.fitness(), 0.0);
    }

    #[test]
    fn test_shared_lecturer_courses_get_distinct_periods() {
        // two courses, one lecturer, two rooms, a 1x2 grid
        let lecturers = vec![Lecturer::new(lid(0), "Dr. 0")];
        let groups = vec![
            StudentGroup::new(gid(0), "G0", 20),
            StudentGroup::new(gid(1), "G1", 20),
        ];
        let rooms = vec![
            Room::new(rid(0), "Room 0", 40),
            Room::new(rid(1), "Room 1", 40),
        ];
        let mut c0 = Course::new(cid(0), "Course 0", lid(0), 1, 1);
        c0.add_group(gid(0));
        let mut c1 = Course::new(cid(1), "Course 1", lid(0), 1, 1);
        c1.add_group(gid(1));
        let instance = Instance::new(lecturers, groups, rooms, vec![c0, c1]).unwrap();

        let mut checker = ConstraintChecker::new(&instance);
        let schedule = ConstructionHeuristic::new().build(
            &instance,
            Calendar::new(1, 2),
            &mut checker,
            &identity_order(&instance),
        );

        assert_eq!(schedule.len(), 2);
        assert_eq!(schedule.hard_violations(), 0);
        let p0 = schedule.assignments()[0].slot().period();
        let p1 = schedule.assignments()[1].slot().period();
        assert_ne!(p0, p1);
    }

    #[test]
    fn test_undesirable_slot_is_avoided() {
        // 1x2 grid, lecturer dislikes period 1: the meeting must land at 0
        let mut lecturer = Lecturer::new(lid(0), "Dr. 0");
        lecturer.add_undesirable_slot(TimeSlot::new(0, 1));
        let groups = vec![StudentGroup::new(gid(0), "G0", 20)];
        let rooms = vec![Room::new(rid(0), "Room 0", 40)];
        let mut course = Course::new(cid(0), "Course 0", lid(0), 1, 1);
        course.add_group(gid(0));
        let instance = Instance::new(vec![lecturer], groups, rooms, vec![course]).unwrap();

        let mut checker = ConstraintChecker::new(&instance);
        let schedule = ConstructionHeuristic::new().build(
            &instance,
            Calendar::new(1, 2),
            &mut checker,
            &identity_order(&instance),
        );

        assert_eq!(schedule.len(), 1);
        assert_eq!(schedule.assignments()[0].slot(), TimeSlot::new(0, 0));
        assert_eq!(schedule.soft_violations(), 0);
    }

    #[test]
    fn test_hardest_courses_are_placed_first() {
        // the course with more groups/students gets the bigger room even
        // though it comes later in the caller's order
        let lecturers = vec![
            Lecturer::new(lid(0), "Dr. 0"),
            Lecturer::new(lid(1), "Dr. 1"),
        ];
        let groups = vec![
            StudentGroup::new(gid(0), "G0", 10),
            StudentGroup::new(gid(1), "G1", 35),
        ];
        let rooms = vec![
            Room::new(rid(0), "Small", 12),
            Room::new(rid(1), "Big", 40),
        ];
        let mut light = Course::new(cid(0), "Light", lid(0), 1, 1);
        light.add_group(gid(0));
        let mut heavy = Course::new(cid(1), "Heavy", lid(1), 1, 1);
        heavy.add_group(gid(1));
        let instance = Instance::new(lecturers, groups, rooms, vec![light, heavy]).unwrap();

        let mut checker = ConstraintChecker::new(&instance);
        let schedule = ConstructionHeuristic::new().build(
            &instance,
            Calendar::new(1, 1),
            &mut checker,
            &identity_order(&instance),
        );

        // heavy is placed first and takes the only room that fits it; light
        // then cannot share the slot's room and must take the small one...
        // which is also slot-conflicted, so it is skipped on a 1x1 grid
        // unless the small room is free. Room conflict is per-room, so light
        // fits into the small room at the same slot.
        assert_eq!(schedule.len(), 2);
        let heavy_asg = schedule
            .assignments()
            .iter()
            .find(|a| a.course() == cid(1))
            .unwrap();
        assert_eq!(heavy_asg.room(), rid(1));
        assert_eq!(schedule.hard_violations(), 0);
    }

    #[test]
    fn test_duration_longer_than_day_skips_meeting() {
        let lecturers = vec![Lecturer::new(lid(0), "Dr. 0")];
        let groups = vec![StudentGroup::new(gid(0), "G0", 10)];
        let rooms = vec![Room::new(rid(0), "Room 0", 40)];
        let mut course = Course::new(cid(0), "Marathon", lid(0), 4, 1);
        course.add_group(gid(0));
        let instance = Instance::new(lecturers, groups, rooms, vec![course]).unwrap();

        let mut checker = ConstraintChecker::new(&instance);
        let schedule = ConstructionHeuristic::new().build(
            &instance,
            Calendar::new(5, 3),
            &mut checker,
            &identity_order(&instance),
        );
        assert!(schedule.is_empty());
    }

    #[test]
    fn test_multi_meeting_course_spreads_across_days() {
        // two meetings, two days: the bunching penalty steers construction
        // only through the desirability key indirectly (it ranks by slot
        // desirability, not bunching), but both meetings must be placed
        let lecturers = vec![Lecturer::new(lid(0), "Dr. 0")];
        let groups = vec![StudentGroup::new(gid(0), "G0", 10)];
        let rooms = vec![Room::new(rid(0), "Room 0", 40)];
        let mut course = Course::new(cid(0), "Course 0", lid(0), 1, 2);
        course.add_group(gid(0));
        let instance = Instance::new(lecturers, groups, rooms, vec![course]).unwrap();

        let mut checker = ConstraintChecker::new(&instance);
        let schedule = ConstructionHeuristic::new().build(
            &instance,
            Calendar::new(2, 2),
            &mut checker,
            &identity_order(&instance),
        );

        assert_eq!(schedule.len(), 2);
        assert_eq!(schedule.positions_of(cid(0)).len(), 2);
        assert_eq!(schedule.hard_violations(), 0);
    }
}
