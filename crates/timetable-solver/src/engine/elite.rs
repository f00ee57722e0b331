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

use rand::Rng;
use timetable_model::prelude::Schedule;

/// Bounded memory of the best schedules seen, used as path-relinking
/// targets. While there is room every offered schedule is kept; at capacity
/// an offer replaces the worst entry only if it beats it.
#[derive(Debug, Clone)]
pub struct ElitePool {
    capacity: usize,
    entries: Vec<Schedule>,
}

impl ElitePool {
    pub const DEFAULT_CAPACITY: usize = 10;

    pub fn new(capacity: usize) -> Self {
        Self {
            capacity,
            entries: Vec::with_capacity(capacity),
        }
    }

    pub fn offer(&mut self, schedule: &Schedule) {
        if self.entries.len() < self.capacity {
            self.entries.push(schedule.clone());
            return;
        }

        let Some(worst) = self.worst_index() else {
            return;
        };
        if schedule.fitness() < self.entries[worst].fitness() {
            self.entries[worst] = schedule.clone();
        }
    }

    /// Index of the first highest-fitness entry.
    fn worst_index(&self) -> Option<usize> {
        let mut worst: Option<usize> = None;
        for (i, s) in self.entries.iter().enumerate() {
            match worst {
                Some(w) if s.fitness() <= self.entries[w].fitness() => {}
                _ => worst = Some(i),
            }
        }
        worst
    }

    pub fn pick_random<R: Rng>(&self, rng: &mut R) -> Option<&Schedule> {
        if self.entries.is_empty() {
            return None;
        }
        Some(&self.entries[rng.random_range(0..self.entries.len())])
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    #[inline]
    pub fn iter(&self) -> impl Iterator<Item = &Schedule> {
        self.entries.iter()
    }
}

impl Default for ElitePool {
    fn default() -> Self {
        Self::new(Self::DEFAULT_CAPACITY)
    }
}
