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

use std::collections::HashMap;
use timetable_model::prelude::{Assignment, CourseIdentifier, Instance, RoomIdentifier, Schedule};
use timetable_model::time::TimeSlot;

/// Weight of one hard-constraint violation in the combined fitness.
pub const HARD_VIOLATION_WEIGHT: f64 = 1000.0;

const LECTURER_GAP_WEIGHT: f64 = 10.0;
const GROUP_GAP_WEIGHT: f64 = 8.0;
/// Periods strictly after this one count as afternoon.
const AFTERNOON_PERIOD: u32 = 4;
const AFTERNOON_PENALTY: f64 = 3.0;
const SAME_DAY_REPEAT_WEIGHT: f64 = 20.0;
const DAILY_CLASS_LIMIT: usize = 4;
const OVERLOAD_WEIGHT: f64 = 15.0;

type CacheKey = (CourseIdentifier, RoomIdentifier, TimeSlot);

/// Validates candidate assignments against the hard constraints and scores
/// the soft-preference penalty of whole schedules.
///
/// Validation results are memoized under `(course, room, slot)`. The key
/// carries no fingerprint of the surrounding schedule, so the cache must be
/// cleared at every mutation boundary of the schedule it is queried against;
/// the engine does this at operator, construction and perturbation
/// boundaries, which keeps cached reuse exact.
#[derive(Debug)]
pub struct ConstraintChecker<'a> {
    instance: &'a Instance,
    cache: HashMap<CacheKey, bool>,
}

impl<'a> ConstraintChecker<'a> {
    pub fn new(instance: &'a Instance) -> Self {
        Self {
            instance,
            cache: HashMap::new(),
        }
    }

    #[inline]
    pub fn instance(&self) -> &'a Instance {
        self.instance
    }

    #[inline]
    pub fn clear_cache(&mut self) {
        self.cache.clear();
    }

    #[cfg(test)]
    fn cache_len(&self) -> usize {
        self.cache.len()
    }

    /// Would inserting `assignment` into `schedule` violate a hard
    /// constraint? Conflicts are checked against every existing assignment
    /// except those of the same course.
    pub fn is_valid_assignment(&mut self, assignment: &Assignment, schedule: &Schedule) -> bool {
        let key = (assignment.course(), assignment.room(), assignment.slot());
        if let Some(&cached) = self.cache.get(&key) {
            return cached;
        }
        let valid = self.check_hard_constraints(assignment, schedule);
        self.cache.insert(key, valid);
        valid
    }

    fn check_hard_constraints(&self, assignment: &Assignment, schedule: &Schedule) -> bool {
        let course = self.instance.course(assignment.course());
        let room = self.instance.room(assignment.room());

        if room.capacity() < course.total_students(self.instance.groups()) {
            return false;
        }
        if !room.has_features(course.required_features()) {
            return false;
        }

        for other in schedule.assignments() {
            if other.course() == assignment.course() {
                continue;
            }
            if other.slot() != assignment.slot() {
                continue;
            }
            if other.room() == assignment.room() {
                return false;
            }
            let other_course = self.instance.course(other.course());
            if other_course.lecturer() == course.lecturer() {
                return false;
            }
            if course.shares_group_with(other_course) {
                return false;
            }
        }

        true
    }

    /// Total soft penalty of `schedule` (sum of the six additive terms).
    pub fn evaluate_soft(&self, schedule: &Schedule) -> f64 {
        let instance = self.instance;
        let mut penalty = 0.0;

        let mut lecturer_slots: Vec<Vec<TimeSlot>> =
            vec![Vec::new(); instance.lecturers().len()];
        let mut group_slots: Vec<Vec<TimeSlot>> = vec![Vec::new(); instance.groups().len()];
        for a in schedule.assignments() {
            let course = instance.course(a.course());
            lecturer_slots[course.lecturer().index()].push(a.slot());
            for &g in course.groups() {
                group_slots[g.index()].push(a.slot());
            }
        }

        for slots in &mut lecturer_slots {
            slots.sort_unstable();
            penalty += same_day_gap_penalty(slots, LECTURER_GAP_WEIGHT);
        }
        for slots in &mut group_slots {
            slots.sort_unstable();
            penalty += same_day_gap_penalty(slots, GROUP_GAP_WEIGHT);
        }

        for a in schedule.assignments() {
            let course = instance.course(a.course());
            let lecturer = instance.lecturer(course.lecturer());
            if lecturer.is_undesirable_slot(a.slot()) {
                penalty += lecturer.undesirable_penalty();
            }
            for &g in course.groups() {
                let group = instance.group(g);
                if group.is_undesirable_slot(a.slot()) {
                    penalty += group.undesirable_penalty();
                }
            }
        }

        for a in schedule.assignments() {
            if a.slot().period() > AFTERNOON_PERIOD {
                penalty += AFTERNOON_PENALTY;
            }
        }

        // meetings of one course bunched onto the same day
        for (_, positions) in schedule.iter_course_positions() {
            let mut days: Vec<u32> = positions
                .iter()
                .map(|&p| schedule.assignments()[p].slot().day())
                .collect();
            days.sort_unstable();
            days.dedup();
            let repeats = positions.len() - days.len();
            penalty += repeats as f64 * SAME_DAY_REPEAT_WEIGHT;
        }

        // more than DAILY_CLASS_LIMIT classes on one day for a group
        for slots in &group_slots {
            let mut i = 0;
            while i < slots.len() {
                let day = slots[i].day();
                let mut j = i;
                while j < slots.len() && slots[j].day() == day {
                    j += 1;
                }
                let count = j - i;
                if count > DAILY_CLASS_LIMIT {
                    penalty += (count - DAILY_CLASS_LIMIT) as f64 * OVERLOAD_WEIGHT;
                }
                i = j;
            }
        }

        penalty
    }

    /// Recompute and store the aggregate evaluation of `schedule`:
    /// `fitness = 1000 * hard_violations + soft_penalty`, with
    /// `soft_violations` the integer truncation of the soft penalty.
    pub fn evaluate(&mut self, schedule: &mut Schedule) {
        let mut hard = 0usize;
        for i in 0..schedule.len() {
            let a = schedule.assignments()[i];
            if !self.is_valid_assignment(&a, schedule) {
                hard += 1;
            }
        }
        let soft = self.evaluate_soft(schedule);
        let fitness = hard as f64 * HARD_VIOLATION_WEIGHT + soft;
        schedule.set_evaluation(fitness, hard, soft as i64);
    }
}

fn same_day_gap_penalty(slots: &[TimeSlot], weight: f64) -> f64 {
    let mut penalty = 0.0;
    for pair in slots.windows(2) {
        if pair[1].day() == pair[0].day() {
            let gap = pair[1].period() as i64 - pair[0].period() as i64 - 1;
            penalty += gap as f64 * weight;
        }
    }
    penalty
}

#[cfg(test)]
mod tests {
    use super::*;
    use timetable_model::prelude::{
        Course, CourseIdentifier, GroupIdentifier, Lecturer, LecturerIdentifier, Room,
        RoomIdentifier, StudentGroup,
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

    #[inline]
    fn slot(d: u32, p: u32) -> TimeSlot {
        TimeSlot::new(d, p)
    }

    #[inline]
    fn asg(course: usize, room: usize, d: u32, p: u32) -> Assignment {
        Assignment::new(cid(course), rid(room), slot(d, p))
    }

    /// Two lecturers, two groups of 20, two feature-less rooms of 40, and
    /// `courses` built from (lecturer, groups, duration, meetings) tuples.
    fn instance_with(courses: &[(usize, &[usize], u32, u32)]) -> Instance {
        let lecturers = vec![
            Lecturer::new(lid(0), "Dr. Mary Jones"),
            Lecturer::new(lid(1), "Prof. John Smith"),
        ];
        let groups = vec![
            StudentGroup::new(gid(0), "CS-1A", 20),
            StudentGroup::new(gid(1), "CS-1B", 20),
        ];
        let rooms = vec![
            Room::new(rid(0), "Room A", 40),
            Room::new(rid(1), "Room B", 40),
        ];
        let courses = courses
            .iter()
            .enumerate()
            .map(|(i, &(lect, grps, duration, meetings))| {
                let mut c = Course::new(cid(i), format!("Course {i}"), lid(lect), duration, meetings);
                for &g in grps {
                    c.add_group(gid(g));
                }
                c
            })
            .collect();
        Instance::new(lecturers, groups, rooms, courses).unwrap()
    }

    #[test]
    fn test_room_capacity_is_enforced() {
        // both groups together are exactly 40 students, which still fits
        let instance = instance_with(&[(0, &[0, 1], 1, 1)]);
        let mut checker = ConstraintChecker::new(&instance);
        let schedule = Schedule::new();
        assert!(checker.is_valid_assignment(&asg(0, 0, 0, 0), &schedule));

        // shrink the room below the cohort size
        let lecturers = vec![Lecturer::new(lid(0), "Dr. Mary Jones")];
        let groups = vec![StudentGroup::new(gid(0), "CS-1A", 30)];
        let rooms = vec![Room::new(rid(0), "Small Room", 10)];
        let mut c = Course::new(cid(0), "Oversubscribed", lid(0), 1, 1);
        c.add_group(gid(0));
        let instance = Instance::new(lecturers, groups, rooms, vec![c]).unwrap();
        let mut checker = ConstraintChecker::new(&instance);
        assert!(!checker.is_valid_assignment(&asg(0, 0, 0, 0), &Schedule::new()));
    }

    #[test]
    fn test_room_features_are_enforced() {
        let lecturers = vec![Lecturer::new(lid(0), "Dr. Mary Jones")];
        let groups = vec![StudentGroup::new(gid(0), "CS-1A", 20)];
        let mut lab = Room::new(rid(0), "Lab A", 30);
        lab.add_feature(2);
        let plain = Room::new(rid(1), "Room B", 30);
        let mut c = Course::new(cid(0), "Operating Systems Lab", lid(0), 1, 1);
        c.add_group(gid(0));
        c.add_required_feature(2);
        let instance = Instance::new(lecturers, groups, vec![lab, plain], vec![c]).unwrap();

        let mut checker = ConstraintChecker::new(&instance);
        let schedule = Schedule::new();
        assert!(checker.is_valid_assignment(&asg(0, 0, 0, 0), &schedule));
        assert!(!checker.is_valid_assignment(&asg(0, 1, 0, 0), &schedule));
    }

    #[test]
    fn test_room_conflict_same_slot_is_invalid() {
        let instance = instance_with(&[(0, &[0], 1, 1), (1, &[1], 1, 1)]);
        let mut checker = ConstraintChecker::new(&instance);
        let mut schedule = Schedule::new();
        schedule.push_assignment(asg(0, 0, 0, 0));

        assert!(!checker.is_valid_assignment(&asg(1, 0, 0, 0), &schedule));
        // other room or other slot is fine
        assert!(checker.is_valid_assignment(&asg(1, 1, 0, 0), &schedule));
        assert!(checker.is_valid_assignment(&asg(1, 0, 0, 1), &schedule));
    }

    #[test]
    fn test_lecturer_conflict_same_slot_is_invalid() {
        // both courses taught by lecturer 0, different rooms and groups
        let instance = instance_with(&[(0, &[0], 1, 1), (0, &[1], 1, 1)]);
        let mut checker = ConstraintChecker::new(&instance);
        let mut schedule = Schedule::new();
        schedule.push_assignment(asg(0, 0, 0, 0));

        assert!(!checker.is_valid_assignment(&asg(1, 1, 0, 0), &schedule));
        assert!(checker.is_valid_assignment(&asg(1, 1, 0, 1), &schedule));
    }

    #[test]
    fn test_group_conflict_same_slot_is_invalid() {
        // different lecturers and rooms, shared group 0
        let instance = instance_with(&[(0, &[0], 1, 1), (1, &[0, 1], 1, 1)]);
        let mut checker = ConstraintChecker::new(&instance);
        let mut schedule = Schedule::new();
        schedule.push_assignment(asg(0, 0, 0, 0));

        assert!(!checker.is_valid_assignment(&asg(1, 1, 0, 0), &schedule));
        assert!(checker.is_valid_assignment(&asg(1, 1, 1, 0), &schedule));
    }

    #[test]
    fn test_same_course_assignments_do_not_conflict() {
        let instance = instance_with(&[(0, &[0], 1, 2)]);
        let mut checker = ConstraintChecker::new(&instance);
        let mut schedule = Schedule::new();
        schedule.push_assignment(asg(0, 0, 0, 0));

        // a second meeting of the same course in the same room and slot is
        // not a conflict at validation level
        assert!(checker.is_valid_assignment(&asg(0, 0, 0, 0), &schedule));
    }

    #[test]
    fn test_lecturer_gap_penalty() {
        // one lecturer, meetings at periods 0 and 3 of the same day:
        // 10 * (3 - 0 - 1) = 20
        let instance = instance_with(&[(0, &[0], 1, 1), (0, &[1], 1, 1)]);
        let checker = ConstraintChecker::new(&instance);
        let mut schedule = Schedule::new();
        schedule.push_assignment(asg(0, 0, 0, 0));
        schedule.push_assignment(asg(1, 1, 0, 3));

        // lecturer gap 20, group slots are singletons, no other penalties
        assert_eq!(checker.evaluate_soft(&schedule), 20.0);
    }

    #[test]
    fn test_group_gap_penalty() {
        // same group attends two courses, periods 1 and 4 on one day:
        // group gap 8 * 2 = 16; lecturers differ so no lecturer gap
        let instance = instance_with(&[(0, &[0], 1, 1), (1, &[0], 1, 1)]);
        let checker = ConstraintChecker::new(&instance);
        let mut schedule = Schedule::new();
        schedule.push_assignment(asg(0, 0, 0, 1));
        schedule.push_assignment(asg(1, 1, 0, 4));

        assert_eq!(checker.evaluate_soft(&schedule), 16.0);
    }

    #[test]
    fn test_undesirable_slot_penalties() {
        let mut lecturer =
            Lecturer::new(lid(0), "Prof. John Smith").with_undesirable_penalty(25.0);
        lecturer.add_undesirable_slot(slot(0, 0));
        let mut group = StudentGroup::new(gid(0), "CS-1A", 20);
        group.add_undesirable_slot(slot(0, 0));
        let rooms = vec![Room::new(rid(0), "Room A", 40)];
        let mut c = Course::new(cid(0), "Early Lecture", lid(0), 1, 1);
        c.add_group(gid(0));
        let instance = Instance::new(vec![lecturer], vec![group], rooms, vec![c]).unwrap();

        let checker = ConstraintChecker::new(&instance);
        let mut schedule = Schedule::new();
        schedule.push_assignment(asg(0, 0, 0, 0));

        // lecturer 25 + group 15
        assert_eq!(checker.evaluate_soft(&schedule), 40.0);
    }

    #[test]
    fn test_afternoon_penalty_applies_after_period_four() {
        let instance = instance_with(&[(0, &[0], 1, 1)]);
        let checker = ConstraintChecker::new(&instance);

        let mut schedule = Schedule::new();
        schedule.push_assignment(asg(0, 0, 0, 4));
        assert_eq!(checker.evaluate_soft(&schedule), 0.0);

        let mut schedule = Schedule::new();
        schedule.push_assignment(asg(0, 0, 0, 5));
        assert_eq!(checker.evaluate_soft(&schedule), 3.0);
    }

    #[test]
    fn test_same_day_bunching_penalty() {
        // two meetings of one course on the same day, far enough apart that
        // the lecturer/group gap arithmetic is exercised too:
        // periods 0 and 2 => gaps: lecturer 10, group 8, bunching 20
        let instance = instance_with(&[(0, &[0], 1, 2)]);
        let checker = ConstraintChecker::new(&instance);
        let mut schedule = Schedule::new();
        schedule.push_assignment(asg(0, 0, 0, 0));
        schedule.push_assignment(asg(0, 1, 0, 2));

        assert_eq!(checker.evaluate_soft(&schedule), 10.0 + 8.0 + 20.0);

        // spread across two days: no penalty at all
        let mut schedule = Schedule::new();
        schedule.push_assignment(asg(0, 0, 0, 0));
        schedule.push_assignment(asg(0, 1, 1, 0));
        assert_eq!(checker.evaluate_soft(&schedule), 0.0);
    }

    #[test]
    fn test_group_daily_overload_penalty() {
        // six courses for group 0 on one day at consecutive periods:
        // 2 over the limit of 4 => 15 * 2 = 30. Consecutive periods mean no
        // gap penalties; lecturers alternate so lecturer gaps don't apply
        // either (each teaches periods 2 apart => gap 1 each ... avoid that
        // by giving every course its own lecturer).
        let lecturers: Vec<Lecturer> = (0..6)
            .map(|i| Lecturer::new(lid(i), format!("Dr. {i}")))
            .collect();
        let groups = vec![StudentGroup::new(gid(0), "CS-1A", 10)];
        let rooms = vec![Room::new(rid(0), "Room A", 40)];
        let courses: Vec<Course> = (0..6)
            .map(|i| {
                let mut c = Course::new(cid(i), format!("Course {i}"), lid(i), 1, 1);
                c.add_group(gid(0));
                c
            })
            .collect();
        let instance = Instance::new(lecturers, groups, rooms, courses).unwrap();

        let checker = ConstraintChecker::new(&instance);
        let mut schedule = Schedule::new();
        for i in 0..6u32 {
            schedule.push_assignment(asg(i as usize, 0, 0, i));
        }

        // group gaps are zero (consecutive), afternoon penalty applies to
        // periods 5 only => 3; overload 30
        assert_eq!(checker.evaluate_soft(&schedule), 30.0 + 3.0);
    }

    #[test]
    fn test_evaluate_combines_hard_and_soft() {
        // two courses forced into the same room and slot
        let instance = instance_with(&[(0, &[0], 1, 1), (1, &[1], 1, 1)]);
        let mut checker = ConstraintChecker::new(&instance);
        let mut schedule = Schedule::new();
        schedule.push_assignment(asg(0, 0, 0, 5));
        schedule.push_assignment(asg(1, 0, 0, 5));

        checker.evaluate(&mut schedule);
        // both sides of the conflict count
        assert_eq!(schedule.hard_violations(), 2);
        // soft: two afternoon assignments
        assert_eq!(schedule.soft_violations(), 6);
        assert_eq!(schedule.fitness(), 2.0 * HARD_VIOLATION_WEIGHT + 6.0);
    }

    #[test]
    fn test_evaluate_empty_schedule_is_zero() {
        let instance = instance_with(&[(0, &[0], 1, 1)]);
        let mut checker = ConstraintChecker::new(&instance);
        let mut schedule = Schedule::new();
        checker.evaluate(&mut schedule);
        assert_eq!(schedule.fitness(), 0.0);
        assert_eq!(schedule.hard_violations(), 0);
        assert_eq!(schedule.soft_violations(), 0);
    }

    #[test]
    fn test_cache_memoizes_and_clears() {
        let instance = instance_with(&[(0, &[0], 1, 1)]);
        let mut checker = ConstraintChecker::new(&instance);
        let schedule = Schedule::new();

        assert_eq!(checker.cache_len(), 0);
        assert!(checker.is_valid_assignment(&asg(0, 0, 0, 0), &schedule));
        assert_eq!(checker.cache_len(), 1);

        // repeated query hits the cache, no growth
        assert!(checker.is_valid_assignment(&asg(0, 0, 0, 0), &schedule));
        assert_eq!(checker.cache_len(), 1);

        checker.clear_cache();
        assert_eq!(checker.cache_len(), 0);
    }
}
