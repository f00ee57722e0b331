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

use crate::constraint::checker::ConstraintChecker;
use rand::Rng;
use timetable_model::prelude::{Calendar, Instance, Schedule};

/// The four stochastic neighborhoods of the local search.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum OperatorKind {
    SwapRooms,
    SwapTimes,
    MoveAssignment,
    ChainSwap,
}

impl OperatorKind {
    pub const ALL: [OperatorKind; 4] = [
        OperatorKind::SwapRooms,
        OperatorKind::SwapTimes,
        OperatorKind::MoveAssignment,
        OperatorKind::ChainSwap,
    ];

    #[inline]
    pub fn name(&self) -> &'static str {
        match self {
            OperatorKind::SwapRooms => "swap_rooms",
            OperatorKind::SwapTimes => "swap_times",
            OperatorKind::MoveAssignment => "move_assignment",
            OperatorKind::ChainSwap => "chain_swap",
        }
    }

    /// Position in [`OperatorKind::ALL`]; used to index per-operator tables.
    #[inline]
    pub fn index(&self) -> usize {
        match self {
            OperatorKind::SwapRooms => 0,
            OperatorKind::SwapTimes => 1,
            OperatorKind::MoveAssignment => 2,
            OperatorKind::ChainSwap => 3,
        }
    }
}

impl std::fmt::Display for OperatorKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// Everything an operator application may touch: the immutable catalogue,
/// the weekly grid, the constraint checker and the engine's generator.
#[derive(Debug)]
pub struct SearchContext<'i, 'e, R: Rng> {
    instance: &'i Instance,
    calendar: Calendar,
    checker: &'e mut ConstraintChecker<'i>,
    rng: &'e mut R,
}

impl<'i, 'e, R: Rng> SearchContext<'i, 'e, R> {
    #[inline]
    pub fn new(
        instance: &'i Instance,
        calendar: Calendar,
        checker: &'e mut ConstraintChecker<'i>,
        rng: &'e mut R,
    ) -> Self {
        Self {
            instance,
            calendar,
            checker,
            rng,
        }
    }

    #[inline]
    pub fn instance(&self) -> &'i Instance {
        self.instance
    }

    #[inline]
    pub fn calendar(&self) -> Calendar {
        self.calendar
    }

    #[inline]
    pub fn checker(&mut self) -> &mut ConstraintChecker<'i> {
        self.checker
    }

    #[inline]
    pub fn rng(&mut self) -> &mut R {
        self.rng
    }
}

/// A local move: mutate `schedule` in place and report whether the result is
/// feasible. On `false` the schedule has been restored and the caller
/// discards the attempt; a failed draw is exploration, not an error.
pub trait NeighborhoodOperator<R: Rng> {
    fn kind(&self) -> OperatorKind;

    fn apply(&self, schedule: &mut Schedule, ctx: &mut SearchContext<'_, '_, R>) -> bool;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_operator_kind_names_and_indices() {
        assert_eq!(OperatorKind::SwapRooms.name(), "swap_rooms");
        assert_eq!(OperatorKind::ChainSwap.name(), "chain_swap");
        for (i, kind) in OperatorKind::ALL.iter().enumerate() {
            assert_eq!(kind.index(), i);
        }
        assert_eq!(OperatorKind::MoveAssignment.to_string(), "move_assignment");
    }
}
