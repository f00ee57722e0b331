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
use crate::time::TimeSlot;
use std::collections::HashSet;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct GroupIdentifierMarker;

impl IdentifierMarkerName for GroupIdentifierMarker {
    const NAME: &'static str = "GroupId";
}

pub type GroupIdentifier = Identifier<usize, GroupIdentifierMarker>;

/// A cohort of students attending courses together.
#[derive(Debug, Clone, PartialEq)]
pub struct StudentGroup {
    id: GroupIdentifier,
    name: String,
    size: u32,
    undesirable_slots: HashSet<TimeSlot>,
    undesirable_penalty: f64,
}

impl StudentGroup {
    pub const DEFAULT_UNDESIRABLE_PENALTY: f64 = 15.0;

    #[inline]
    pub fn new(id: GroupIdentifier, name: impl Into<String>, size: u32) -> Self {
        Self {
            id,
            name: name.into(),
            size,
            undesirable_slots: HashSet::new(),
            undesirable_penalty: Self::DEFAULT_UNDESIRABLE_PENALTY,
        }
    }

    #[inline]
    pub fn with_undesirable_penalty(mut self, penalty: f64) -> Self {
        self.undesirable_penalty = penalty;
        self
    }

    #[inline]
    pub fn id(&self) -> GroupIdentifier {
        self.id
    }

    #[inline]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[inline]
    pub fn size(&self) -> u32 {
        self.size
    }

    #[inline]
    pub fn undesirable_penalty(&self) -> f64 {
        self.undesirable_penalty
    }

    #[inline]
    pub fn add_undesirable_slot(&mut self, slot: TimeSlot) {
        self.undesirable_slots.insert(slot);
    }

    #[inline]
    pub fn is_undesirable_slot(&self, slot: TimeSlot) -> bool {
        self.undesirable_slots.contains(&slot)
    }

    #[inline]
    pub fn undesirable_slots(&self) -> &HashSet<TimeSlot> {
        &self.undesirable_slots
    }
}
