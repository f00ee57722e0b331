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
use crate::problem::group::GroupIdentifier;
use crate::problem::lecturer::LecturerIdentifier;
use crate::problem::room::RoomIdentifier;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct LecturerNotFoundError {
    course: CourseIdentifier,
    lecturer: LecturerIdentifier,
}

impl LecturerNotFoundError {
    pub fn new(course: CourseIdentifier, lecturer: LecturerIdentifier) -> Self {
        Self { course, lecturer }
    }

    pub fn course(&self) -> CourseIdentifier {
        self.course
    }

    pub fn lecturer(&self) -> LecturerIdentifier {
        self.lecturer
    }
}

impl std::fmt::Display for LecturerNotFoundError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "Course {} references unknown lecturer {}",
            self.course, self.lecturer
        )
    }
}

impl std::error::Error for LecturerNotFoundError {}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct GroupNotFoundError {
    course: CourseIdentifier,
    group: GroupIdentifier,
}

impl GroupNotFoundError {
    pub fn new(course: CourseIdentifier, group: GroupIdentifier) -> Self {
        Self { course, group }
    }

    pub fn course(&self) -> CourseIdentifier {
        self.course
    }

    pub fn group(&self) -> GroupIdentifier {
        self.group
    }
}

impl std::fmt::Display for GroupNotFoundError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "Course {} references unknown group {}",
            self.course, self.group
        )
    }
}

impl std::error::Error for GroupNotFoundError {}

/// Structural problems in an instance document.
#[derive(Debug, Clone, PartialEq)]
pub enum InstanceError {
    /// The entity at table row `found` carries identifier `expected`.
    MisindexedEntity {
        table: &'static str,
        expected: usize,
        found: usize,
    },
    LecturerNotFound(LecturerNotFoundError),
    GroupNotFound(GroupNotFoundError),
    EmptyCourseGroups(CourseIdentifier),
    NonPositiveDuration(CourseIdentifier),
    NonPositiveMeetings(CourseIdentifier),
    NonPositiveGroupSize(GroupIdentifier),
    NonPositiveRoomCapacity(RoomIdentifier),
}

impl std::fmt::Display for InstanceError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        use InstanceError::*;
        match self {
            MisindexedEntity {
                table,
                expected,
                found,
            } => write!(
                f,
                "Entity in table `{table}` at row {expected} carries id {found}"
            ),
            LecturerNotFound(e) => write!(f, "{}", e),
            GroupNotFound(e) => write!(f, "{}", e),
            EmptyCourseGroups(c) => write!(f, "Course {c} has no participating groups"),
            NonPositiveDuration(c) => write!(f, "Course {c} must have a duration of at least 1"),
            NonPositiveMeetings(c) => {
                write!(f, "Course {c} must have at least one weekly meeting")
            }
            NonPositiveGroupSize(g) => write!(f, "Group {g} must have a positive size"),
            NonPositiveRoomCapacity(r) => write!(f, "Room {r} must have a positive capacity"),
        }
    }
}

impl std::error::Error for InstanceError {}

impl From<LecturerNotFoundError> for InstanceError {
    fn from(err: LecturerNotFoundError) -> Self {
        InstanceError::LecturerNotFound(err)
    }
}

impl From<GroupNotFoundError> for InstanceError {
    fn from(err: GroupNotFoundError) -> Self {
        InstanceError::GroupNotFound(err)
    }
}

/// Errors surfaced while reading or writing instance documents. The engine
/// is never invoked when loading fails.
#[derive(Debug)]
pub enum InstanceLoadError {
    Io(std::io::Error),
    Json(serde_json::Error),
    /// A field that must be a non-negative count carried a negative value.
    NegativeField {
        field: &'static str,
        value: i64,
    },
    Instance(InstanceError),
}

impl From<std::io::Error> for InstanceLoadError {
    fn from(e: std::io::Error) -> Self {
        Self::Io(e)
    }
}

impl From<serde_json::Error> for InstanceLoadError {
    fn from(e: serde_json::Error) -> Self {
        Self::Json(e)
    }
}

impl From<InstanceError> for InstanceLoadError {
    fn from(e: InstanceError) -> Self {
        Self::Instance(e)
    }
}

impl std::fmt::Display for InstanceLoadError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        use InstanceLoadError::*;
        match self {
            Io(e) => write!(f, "I/O error: {e}"),
            Json(e) => write!(f, "JSON error: {e}"),
            NegativeField { field, value } => {
                write!(f, "field `{field}` must be non-negative, got {value}")
            }
            Instance(e) => write!(f, "instance error: {e}"),
        }
    }
}

impl std::error::Error for InstanceLoadError {}
