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

use crate::common::{Identifier, IdentifierMarkerName};
use crate::problem::group::{GroupIdentifier, StudentGroup};
use crate::problem::lecturer::LecturerIdentifier;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct CourseIdentifierMarker;

impl IdentifierMarkerName for CourseIdentifierMarker {
    const NAME: &'static str = "CourseId";
}

pub type CourseIdentifier = Identifier<usize, CourseIdentifierMarker>;

/// A course taught by one lecturer to one or more groups. Each of its
/// `weekly_meetings` meetings occupies `duration` consecutive periods and
/// needs a room providing all `required_features`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Course {
    id: CourseIdentifier,
    name: String,
    lecturer: LecturerIdentifier,
    groups: Vec<GroupIdentifier>,
    duration: u32,
    required_features: Vec<u32>,
    weekly_meetings: u32,
}

impl Course {
    #[inline]
    pub fn new(
        id: CourseIdentifier,
        name: impl Into<String>,
        lecturer: LecturerIdentifier,
        duration: u32,
        weekly_meetings: u32,
    ) -> Self {
        Self {
            id,
            name: name.into(),
            lecturer,
            groups: Vec::new(),
            duration,
            required_features: Vec::new(),
            weekly_meetings,
        }
    }

    #[inline]
    pub fn id(&self) -> CourseIdentifier {
        self.id
    }

    #[inline]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[inline]
    pub fn lecturer(&self) -> LecturerIdentifier {
        self.lecturer
    }

    #[inline]
    pub fn duration(&self) -> u32 {
        self.duration
    }

    #[inline]
    pub fn weekly_meetings(&self) -> u32 {
        self.weekly_meetings
    }

    #[inline]
    pub fn add_group(&mut self, group: GroupIdentifier) {
        self.groups.push(group);
    }

    #[inline]
    pub fn groups(&self) -> &[GroupIdentifier] {
        &self.groups
    }

    #[inline]
    pub fn group_count(&self) -> usize {
        self.groups.len()
    }

    #[inline]
    pub fn add_required_feature(&mut self, feature: u32) {
        self.required_features.push(feature);
    }

    #[inline]
    pub fn required_features(&self) -> &[u32] {
        &self.required_features
    }

    #[inline]
    pub fn shares_group_with(&self, other: &Course) -> bool {
        self.groups
            .iter()
            .any(|g| other.groups.iter().any(|o| o == g))
    }

    /// Combined size of all participating groups.
    ///
    /// Panics if a group identifier does not index `groups` (instance
    /// validation rules that out).
    #[inline]
    pub fn total_students(&self, groups: &[StudentGroup]) -> u32 {
        self.groups.iter().map(|g| groups[g.index()].size()).sum()
    }
}
