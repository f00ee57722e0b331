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
use crate::problem::room::RoomIdentifier;
use crate::time::TimeSlot;

/// One meeting of a course placed into a room at a start slot. The course
/// identity of an assignment is fixed at construction; room and slot are the
/// mutable coordinates the local search moves around.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Assignment {
    course: CourseIdentifier,
    room: RoomIdentifier,
    slot: TimeSlot,
}

impl Assignment {
    #[inline]
    pub const fn new(course: CourseIdentifier, room: RoomIdentifier, slot: TimeSlot) -> Self {
        Self { course, room, slot }
    }

    #[inline]
    pub fn course(&self) -> CourseIdentifier {
        self.course
    }

    #[inline]
    pub fn room(&self) -> RoomIdentifier {
        self.room
    }

    #[inline]
    pub fn slot(&self) -> TimeSlot {
        self.slot
    }

    #[inline]
    pub fn set_room(&mut self, room: RoomIdentifier) {
        self.room = room;
    }

    #[inline]
    pub fn set_slot(&mut self, slot: TimeSlot) {
        self.slot = slot;
    }
}

impl std::fmt::Display for Assignment {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} in {} at {}", self.course, self.room, self.slot)
    }
}
