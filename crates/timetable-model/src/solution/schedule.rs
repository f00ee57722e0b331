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

use crate::problem::course::CourseIdentifier;
use crate::solution::asg::Assignment;
use std::collections::BTreeMap;

/// A (possibly partial) timetable: the ordered assignment list, a secondary
/// index from course to the positions that belong to it, and the aggregate
/// evaluation written back by the constraint checker.
///
/// The position index is maintained by every mutation that can change which
/// course occupies a position; room and slot edits through
/// `assignment_mut` cannot invalidate it.
#[derive(Debug, Clone, Default)]
pub struct Schedule {
    assignments: Vec<Assignment>,
    course_positions: BTreeMap<CourseIdentifier, Vec<usize>>,
    fitness: f64,
    hard_violations: usize,
    soft_violations: i64,
}

impl Schedule {
    #[inline]
    pub fn new() -> Self {
        Self::default()
    }

    /// A sentinel schedule that compares worse than any evaluated one.
    pub fn unsolved() -> Self {
        let mut s = Self::new();
        s.fitness = f64::INFINITY;
        s
    }

    #[inline]
    pub fn assignments(&self) -> &[Assignment] {
        &self.assignments
    }

    #[inline]
    pub fn assignment_mut(&mut self, position: usize) -> &mut Assignment {
        &mut self.assignments[position]
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.assignments.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.assignments.is_empty()
    }

    /// Append a new assignment, recording its position under its course.
    pub fn push_assignment(&mut self, assignment: Assignment) {
        let position = self.assignments.len();
        self.assignments.push(assignment);
        self.course_positions
            .entry(assignment.course())
            .or_default()
            .push(position);
    }

    /// Overwrite the assignment at `position`, keeping the course index
    /// consistent when the course identity changes.
    pub fn replace_assignment(&mut self, position: usize, assignment: Assignment) {
        let old_course = self.assignments[position].course();
        let new_course = assignment.course();
        self.assignments[position] = assignment;

        if old_course != new_course {
            if let Some(positions) = self.course_positions.get_mut(&old_course) {
                positions.retain(|&p| p != position);
                if positions.is_empty() {
                    self.course_positions.remove(&old_course);
                }
            }
            let positions = self.course_positions.entry(new_course).or_default();
            let at = positions.partition_point(|&p| p < position);
            positions.insert(at, position);
        }
    }

    #[inline]
    pub fn positions_of(&self, course: CourseIdentifier) -> &[usize] {
        self.course_positions
            .get(&course)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    pub fn iter_course_positions(
        &self,
    ) -> impl Iterator<Item = (CourseIdentifier, &[usize])> + '_ {
        self.course_positions
            .iter()
            .map(|(&c, v)| (c, v.as_slice()))
    }

    pub fn clear(&mut self) {
        self.assignments.clear();
        self.course_positions.clear();
        self.fitness = 0.0;
        self.hard_violations = 0;
        self.soft_violations = 0;
    }

    #[inline]
    pub fn fitness(&self) -> f64 {
        self.fitness
    }

    #[inline]
    pub fn hard_violations(&self) -> usize {
        self.hard_violations
    }

    #[inline]
    pub fn soft_violations(&self) -> i64 {
        self.soft_violations
    }

    /// Record the evaluation results computed by the constraint checker.
    #[inline]
    pub fn set_evaluation(&mut self, fitness: f64, hard_violations: usize, soft_violations: i64) {
        self.fitness = fitness;
        self.hard_violations = hard_violations;
        self.soft_violations = soft_violations;
    }
}
