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

use serde::{Deserialize, Serialize};

/// A start slot in the weekly grid: `(day, period)`, ordered
/// lexicographically by day and then period.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, Default,
)]
pub struct TimeSlot {
    day: u32,
    period: u32,
}

impl TimeSlot {
    #[inline]
    pub const fn new(day: u32, period: u32) -> Self {
        Self { day, period }
    }

    #[inline]
    pub const fn day(&self) -> u32 {
        self.day
    }

    #[inline]
    pub const fn period(&self) -> u32 {
        self.period
    }
}

impl std::fmt::Display for TimeSlot {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "d{}p{}", self.day, self.period)
    }
}

/// The weekly grid every slot must fall into.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Calendar {
    days: u32,
    periods_per_day: u32,
}

impl Calendar {
    #[inline]
    pub const fn new(days: u32, periods_per_day: u32) -> Self {
        Self {
            days,
            periods_per_day,
        }
    }

    #[inline]
    pub const fn days(&self) -> u32 {
        self.days
    }

    #[inline]
    pub const fn periods_per_day(&self) -> u32 {
        self.periods_per_day
    }

    #[inline]
    pub fn contains(&self, slot: TimeSlot) -> bool {
        slot.day() < self.days && slot.period() < self.periods_per_day
    }

    /// Latest start period such that a meeting of `duration` periods still
    /// ends within the day, or `None` if the day is too short for it.
    #[inline]
    pub fn last_start_period(&self, duration: u32) -> Option<u32> {
        self.periods_per_day.checked_sub(duration)
    }

    /// All slots of the grid, day-major.
    pub fn iter_slots(&self) -> impl Iterator<Item = TimeSlot> + '_ {
        (0..self.days)
            .flat_map(move |d| (0..self.periods_per_day).map(move |p| TimeSlot::new(d, p)))
    }

    #[inline]
    pub fn slot_count(&self) -> usize {
        self.days as usize * self.periods_per_day as usize
    }
}

impl Default for Calendar {
    fn default() -> Self {
        Self::new(5, 8)
    }
}

impl std::fmt::Display for Calendar {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}x{}", self.days, self.periods_per_day)
    }
}
