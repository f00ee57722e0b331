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
pub struct LecturerIdentifierMarker;

impl IdentifierMarkerName for LecturerIdentifierMarker {
    const NAME: &'static str = "LecturerId";
}

pub type LecturerIdentifier = Identifier<usize, LecturerIdentifierMarker>;

/// A lecturer with the slots they would rather not teach in. Booking one of
/// those slots costs `undesirable_penalty` per booked meeting.
#[derive(Debug, Clone, PartialEq)]
pub struct Lecturer {
    id: LecturerIdentifier,
    name: String,
    undesirable_slots: HashSet<TimeSlot>,
    undesirable_penalty: f64,
}

impl Lecturer {
    pub const DEFAULT_UNDESIRABLE_PENALTY: f64 = 20.0;

    #[inline]
    pub fn new(id: LecturerIdentifier, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
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
    pub fn id(&self) -> LecturerIdentifier {
        self.id
    }

    #[inline]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[inline]
    pub fn undesirable_penalty(&self) -> f64 {
        self.undesirable_penalty
    }

    #[inline]
    pub fn set_undesirable_penalty(&mut self, penalty: f64) {
        self.undesirable_penalty = penalty;
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

#[cfg(test)]
mod tests {
    use super::*;

    #[inline]
    fn lid(n: usize) -> LecturerIdentifier {
        LecturerIdentifier::new(n)
    }

    #[test]
    fn test_new_lecturer_has_default_penalty_and_no_slots() {
        let l = Lecturer::new(lid(0), "Dr. Jane Smith");
        assert_eq!(l.id(), lid(0));
        assert_eq!(l.name(), "Dr. Jane Smith");
        assert_eq!(
            l.undesirable_penalty(),
            Lecturer::DEFAULT_UNDESIRABLE_PENALTY
        );
        assert!(l.undesirable_slots().is_empty());
    }

    #[test]
    fn test_undesirable_slot_membership() {
        let mut l = Lecturer::new(lid(1), "Prof. John Doe");
        l.add_undesirable_slot(TimeSlot::new(4, 7));
        l.add_undesirable_slot(TimeSlot::new(4, 7)); // duplicate insert is a no-op
        assert!(l.is_undesirable_slot(TimeSlot::new(4, 7)));
        assert!(!l.is_undesirable_slot(TimeSlot::new(0, 0)));
        assert_eq!(l.undesirable_slots().len(), 1);
    }

    #[test]
    fn test_penalty_override() {
        let l = Lecturer::new(lid(2), "Prof. Ada Lovelace").with_undesirable_penalty(25.0);
        assert_eq!(l.undesirable_penalty(), 25.0);
    }
}
