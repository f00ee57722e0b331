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

use crate::problem::course::{Course, CourseIdentifier};
use crate::problem::err::{GroupNotFoundError, InstanceError, LecturerNotFoundError};
use crate::problem::group::{GroupIdentifier, StudentGroup};
use crate::problem::lecturer::{Lecturer, LecturerIdentifier};
use crate::problem::room::{Room, RoomIdentifier};

/// The immutable problem catalogue: four dense tables in which every
/// identifier is the row index of its entity. Created once per run and
/// read-only afterwards.
#[derive(Debug, Clone, PartialEq)]
pub struct Instance {
    lecturers: Vec<Lecturer>,
    groups: Vec<StudentGroup>,
    rooms: Vec<Room>,
    courses: Vec<Course>,
}

impl Instance {
    pub fn new(
        lecturers: Vec<Lecturer>,
        groups: Vec<StudentGroup>,
        rooms: Vec<Room>,
        courses: Vec<Course>,
    ) -> Result<Self, InstanceError> {
        for (i, l) in lecturers.iter().enumerate() {
            if l.id().index() != i {
                return Err(InstanceError::MisindexedEntity {
                    table: "lecturers",
                    expected: i,
                    found: l.id().index(),
                });
            }
        }

        for (i, g) in groups.iter().enumerate() {
            if g.id().index() != i {
                return Err(InstanceError::MisindexedEntity {
                    table: "groups",
                    expected: i,
                    found: g.id().index(),
                });
            }
            if g.size() == 0 {
                return Err(InstanceError::NonPositiveGroupSize(g.id()));
            }
        }

        for (i, r) in rooms.iter().enumerate() {
            if r.id().index() != i {
                return Err(InstanceError::MisindexedEntity {
                    table: "rooms",
                    expected: i,
                    found: r.id().index(),
                });
            }
            if r.capacity() == 0 {
                return Err(InstanceError::NonPositiveRoomCapacity(r.id()));
            }
        }

        for (i, c) in courses.iter().enumerate() {
            if c.id().index() != i {
                return Err(InstanceError::MisindexedEntity {
                    table: "courses",
                    expected: i,
                    found: c.id().index(),
                });
            }
            if c.lecturer().index() >= lecturers.len() {
                return Err(LecturerNotFoundError::new(c.id(), c.lecturer()).into());
            }
            if c.groups().is_empty() {
                return Err(InstanceError::EmptyCourseGroups(c.id()));
            }
            for &g in c.groups() {
                if g.index() >= groups.len() {
                    return Err(GroupNotFoundError::new(c.id(), g).into());
                }
            }
            if c.duration() == 0 {
                return Err(InstanceError::NonPositiveDuration(c.id()));
            }
            if c.weekly_meetings() == 0 {
                return Err(InstanceError::NonPositiveMeetings(c.id()));
            }
        }

        Ok(Self {
            lecturers,
            groups,
            rooms,
            courses,
        })
    }

    #[inline]
    pub fn lecturers(&self) -> &[Lecturer] {
        &self.lecturers
    }

    #[inline]
    pub fn groups(&self) -> &[StudentGroup] {
        &self.groups
    }

    #[inline]
    pub fn rooms(&self) -> &[Room] {
        &self.rooms
    }

    #[inline]
    pub fn courses(&self) -> &[Course] {
        &self.courses
    }

    #[inline]
    pub fn lecturer(&self, id: LecturerIdentifier) -> &Lecturer {
        &self.lecturers[id.index()]
    }

    #[inline]
    pub fn group(&self, id: GroupIdentifier) -> &StudentGroup {
        &self.groups[id.index()]
    }

    #[inline]
    pub fn room(&self, id: RoomIdentifier) -> &Room {
        &self.rooms[id.index()]
    }

    #[inline]
    pub fn course(&self, id: CourseIdentifier) -> &Course {
        &self.courses[id.index()]
    }

    pub fn iter_course_ids(&self) -> impl Iterator<Item = CourseIdentifier> + '_ {
        (0..self.courses.len()).map(CourseIdentifier::new)
    }

    /// Total number of meetings a complete schedule would contain.
    #[inline]
    pub fn total_meetings(&self) -> usize {
        self.courses
            .iter()
            .map(|c| c.weekly_meetings() as usize)
            .sum()
    }
}
