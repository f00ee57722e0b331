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
use std::collections::HashSet;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct RoomIdentifierMarker;

impl IdentifierMarkerName for RoomIdentifierMarker {
    const NAME: &'static str = "RoomId";
}

pub type RoomIdentifier = Identifier<usize, RoomIdentifierMarker>;

/// A room with a seat capacity and a set of integer feature tags
/// (projector, lab equipment, ...).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Room {
    id: RoomIdentifier,
    name: String,
    capacity: u32,
    features: HashSet<u32>,
}

impl Room {
    #[inline]
    pub fn new(id: RoomIdentifier, name: impl Into<String>, capacity: u32) -> Self {
        Self {
            id,
            name: name.into(),
            capacity,
            features: HashSet::new(),
        }
    }

    #[inline]
    pub fn id(&self) -> RoomIdentifier {
        self.id
    }

    #[inline]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[inline]
    pub fn capacity(&self) -> u32 {
        self.capacity
    }

    #[inline]
    pub fn add_feature(&mut self, feature: u32) {
        self.features.insert(feature);
    }

    #[inline]
    pub fn has_feature(&self, feature: u32) -> bool {
        self.features.contains(&feature)
    }

    /// True if the room provides every required feature tag.
    #[inline]
    pub fn has_features(&self, required: &[u32]) -> bool {
        required.iter().all(|f| self.features.contains(f))
    }

    #[inline]
    pub fn features(&self) -> &HashSet<u32> {
        &self.features
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[inline]
    fn rid(n: usize) -> RoomIdentifier {
        RoomIdentifier::new(n)
    }

    #[test]
    fn test_new_room() {
        let r = Room::new(rid(0), "Lecture Hall A", 120);
        assert_eq!(r.id(), rid(0));
        assert_eq!(r.name(), "Lecture Hall A");
        assert_eq!(r.capacity(), 120);
        assert!(r.features().is_empty());
    }

    #[test]
    fn test_has_features_requires_superset() {
        let mut r = Room::new(rid(1), "Lab B", 24);
        r.add_feature(1);
        r.add_feature(2);
        assert!(r.has_features(&[]));
        assert!(r.has_features(&[1]));
        assert!(r.has_features(&[1, 2]));
        assert!(!r.has_features(&[3]));
        assert!(!r.has_features(&[1, 3]));
        assert!(r.has_feature(2));
        assert!(!r.has_feature(3));
    }
}
