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

use crate::search::operator::{NeighborhoodOperator, OperatorKind, SearchContext};
use rand::Rng;
use smallvec::SmallVec;
use timetable_model::prelude::{RoomIdentifier, Schedule, TimeSlot};

/// Pick two distinct assignments and exchange their rooms.
#[derive(Debug, Clone, Copy, Default)]
pub struct SwapRooms;

/// Pick two distinct assignments and exchange their start slots.
#[derive(Debug, Clone, Copy, Default)]
pub struct SwapTimes;

/// Pick one assignment and redraw its room, day and start period uniformly.
#[derive(Debug, Clone, Copy, Default)]
pub struct MoveAssignment;

/// Pick 3-4 distinct assignments and rotate their start slots by one.
#[derive(Debug, Clone, Copy, Default)]
pub struct ChainSwap;

impl<R: Rng> NeighborhoodOperator<R> for SwapRooms {
    fn kind(&self) -> OperatorKind {
        OperatorKind::SwapRooms
    }

    fn apply(&self, schedule: &mut Schedule, ctx: &mut SearchContext<'_, '_, R>) -> bool {
        if schedule.len() < 2 {
            return false;
        }
        ctx.checker().clear_cache();

        let first = ctx.rng().random_range(0..schedule.len());
        let second = ctx.rng().random_range(0..schedule.len());
        if first == second {
            return false;
        }

        let room_a = schedule.assignments()[first].room();
        let room_b = schedule.assignments()[second].room();
        schedule.assignment_mut(first).set_room(room_b);
        schedule.assignment_mut(second).set_room(room_a);

        let a = schedule.assignments()[first];
        let b = schedule.assignments()[second];
        if !ctx.checker().is_valid_assignment(&a, schedule)
            || !ctx.checker().is_valid_assignment(&b, schedule)
        {
            schedule.assignment_mut(first).set_room(room_a);
            schedule.assignment_mut(second).set_room(room_b);
            ctx.checker().clear_cache();
            return false;
        }

        true
    }
}

impl<R: Rng> NeighborhoodOperator<R> for SwapTimes {
    fn kind(&self) -> OperatorKind {
        OperatorKind::SwapTimes
    }

    fn apply(&self, schedule: &mut Schedule, ctx: &mut SearchContext<'_, '_, R>) -> bool {
        if schedule.len() < 2 {
            return false;
        }
        ctx.checker().clear_cache();

        let first = ctx.rng().random_range(0..schedule.len());
        let second = ctx.rng().random_range(0..schedule.len());
        if first == second {
            return false;
        }

        let slot_a = schedule.assignments()[first].slot();
        let slot_b = schedule.assignments()[second].slot();
        schedule.assignment_mut(first).set_slot(slot_b);
        schedule.assignment_mut(second).set_slot(slot_a);

        let a = schedule.assignments()[first];
        let b = schedule.assignments()[second];
        if !ctx.checker().is_valid_assignment(&a, schedule)
            || !ctx.checker().is_valid_assignment(&b, schedule)
        {
            schedule.assignment_mut(first).set_slot(slot_a);
            schedule.assignment_mut(second).set_slot(slot_b);
            ctx.checker().clear_cache();
            return false;
        }

        true
    }
}

impl<R: Rng> NeighborhoodOperator<R> for MoveAssignment {
    fn kind(&self) -> OperatorKind {
        OperatorKind::MoveAssignment
    }

    fn apply(&self, schedule: &mut Schedule, ctx: &mut SearchContext<'_, '_, R>) -> bool {
        if schedule.is_empty() {
            return false;
        }
        ctx.checker().clear_cache();

        let position = ctx.rng().random_range(0..schedule.len());
        let old = schedule.assignments()[position];

        let duration = ctx.instance().course(old.course()).duration();
        let Some(last_start) = ctx.calendar().last_start_period(duration) else {
            return false;
        };
        let room_count = ctx.instance().rooms().len();
        let days = ctx.calendar().days();

        let room = RoomIdentifier::new(ctx.rng().random_range(0..room_count));
        let day = ctx.rng().random_range(0..days);
        let period = ctx.rng().random_range(0..=last_start);

        schedule.assignment_mut(position).set_room(room);
        schedule
            .assignment_mut(position)
            .set_slot(TimeSlot::new(day, period));

        let moved = schedule.assignments()[position];
        if !ctx.checker().is_valid_assignment(&moved, schedule) {
            schedule.assignment_mut(position).set_room(old.room());
            schedule.assignment_mut(position).set_slot(old.slot());
            ctx.checker().clear_cache();
            return false;
        }

        true
    }
}

impl<R: Rng> NeighborhoodOperator<R> for ChainSwap {
    fn kind(&self) -> OperatorKind {
        OperatorKind::ChainSwap
    }

    fn apply(&self, schedule: &mut Schedule, ctx: &mut SearchContext<'_, '_, R>) -> bool {
        if schedule.len() < 3 {
            return false;
        }
        ctx.checker().clear_cache();

        let max_len = 4.min(schedule.len());
        let chain_len = ctx.rng().random_range(3..=max_len);

        let mut chain: SmallVec<[usize; 4]> = SmallVec::new();
        while chain.len() < chain_len {
            let position = ctx.rng().random_range(0..schedule.len());
            if !chain.contains(&position) {
                chain.push(position);
            }
        }

        let original: SmallVec<[TimeSlot; 4]> = chain
            .iter()
            .map(|&p| schedule.assignments()[p].slot())
            .collect();

        for i in 0..chain_len {
            schedule
                .assignment_mut(chain[i])
                .set_slot(original[(i + 1) % chain_len]);
        }

        for &position in &chain {
            let a = schedule.assignments()[position];
            if !ctx.checker().is_valid_assignment(&a, schedule) {
                for i in 0..chain_len {
                    schedule.assignment_mut(chain[i]).set_slot(original[i]);
                }
                ctx.checker().clear_cache();
                return false;
            }
        }

        true
    }
}

/// Apply the operator named by `kind` to `schedule`.
pub fn apply_operator<R: Rng>(
    kind: OperatorKind,
    schedule: &mut Schedule,
    ctx: &mut SearchContext<'_, '_, R>,
) -> bool {
    match kind {
        OperatorKind::SwapRooms => SwapRooms.apply(schedule, ctx),
        OperatorKind::SwapTimes => SwapTimes.apply(schedule, ctx),
        OperatorKind::MoveAssignment => MoveAssignment.apply(schedule, ctx),
        OperatorKind::ChainSwap => ChainSwap.apply(schedule, ctx),
    }
}
