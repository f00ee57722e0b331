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

//! JSON persistence of the problem instance: four top-level arrays
//! (`lecturers`, `groups`, `rooms`, `courses`) with slots spelled as
//! `{day, period}` objects and all counts as signed decimals.

use crate::problem::course::{Course, CourseIdentifier};
use crate::problem::err::InstanceLoadError;
use crate::problem::group::{GroupIdentifier, StudentGroup};
use crate::problem::instance::Instance;
use crate::problem::lecturer::{Lecturer, LecturerIdentifier};
use crate::problem::room::{Room, RoomIdentifier};
use crate::solution::schedule::Schedule;
use crate::time::TimeSlot;
use serde::{Deserialize, Serialize};
use std::fs::File;
use std::io::{BufReader, BufWriter, Read};
use std::path::Path;

#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
struct TimeSlotDto {
    day: i64,
    period: i64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
struct LecturerDto {
    id: i64,
    name: String,
    undesirable_slots: Vec<TimeSlotDto>,
    undesirable_penalty: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
struct GroupDto {
    id: i64,
    name: String,
    size: i64,
    undesirable_slots: Vec<TimeSlotDto>,
    undesirable_penalty: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
struct RoomDto {
    id: i64,
    name: String,
    capacity: i64,
    features: Vec<i64>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
struct CourseDto {
    id: i64,
    name: String,
    lecturer_id: i64,
    group_ids: Vec<i64>,
    duration: i64,
    required_features: Vec<i64>,
    weekly_meetings: i64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
struct InstanceDto {
    lecturers: Vec<LecturerDto>,
    groups: Vec<GroupDto>,
    rooms: Vec<RoomDto>,
    courses: Vec<CourseDto>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
struct AssignmentDto {
    course_id: i64,
    room_id: i64,
    time_slot: TimeSlotDto,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
struct ScheduleDto {
    assignments: Vec<AssignmentDto>,
    fitness: f64,
    hard_violations: i64,
    soft_violations: i64,
}

#[inline]
fn non_negative(field: &'static str, value: i64) -> Result<u64, InstanceLoadError> {
    u64::try_from(value).map_err(|_| InstanceLoadError::NegativeField { field, value })
}

fn slot_from_dto(dto: TimeSlotDto) -> Result<TimeSlot, InstanceLoadError> {
    let day = non_negative("day", dto.day)? as u32;
    let period = non_negative("period", dto.period)? as u32;
    Ok(TimeSlot::new(day, period))
}

fn slot_to_dto(slot: TimeSlot) -> TimeSlotDto {
    TimeSlotDto {
        day: slot.day() as i64,
        period: slot.period() as i64,
    }
}

fn sorted_slots(slots: &std::collections::HashSet<TimeSlot>) -> Vec<TimeSlotDto> {
    let mut v: Vec<TimeSlot> = slots.iter().copied().collect();
    v.sort();
    v.into_iter().map(slot_to_dto).collect()
}

fn instance_from_dto(dto: InstanceDto) -> Result<Instance, InstanceLoadError> {
    let mut lecturers = Vec::with_capacity(dto.lecturers.len());
    for l in dto.lecturers {
        let id = LecturerIdentifier::new(non_negative("lecturer.id", l.id)? as usize);
        let mut lecturer = Lecturer::new(id, l.name).with_undesirable_penalty(l.undesirable_penalty);
        for s in l.undesirable_slots {
            lecturer.add_undesirable_slot(slot_from_dto(s)?);
        }
        lecturers.push(lecturer);
    }

    let mut groups = Vec::with_capacity(dto.groups.len());
    for g in dto.groups {
        let id = GroupIdentifier::new(non_negative("group.id", g.id)? as usize);
        let size = non_negative("group.size", g.size)? as u32;
        let mut group =
            StudentGroup::new(id, g.name, size).with_undesirable_penalty(g.undesirable_penalty);
        for s in g.undesirable_slots {
            group.add_undesirable_slot(slot_from_dto(s)?);
        }
        groups.push(group);
    }

    let mut rooms = Vec::with_capacity(dto.rooms.len());
    for r in dto.rooms {
        let id = RoomIdentifier::new(non_negative("room.id", r.id)? as usize);
        let capacity = non_negative("room.capacity", r.capacity)? as u32;
        let mut room = Room::new(id, r.name, capacity);
        for feature in r.features {
            room.add_feature(non_negative("room.features", feature)? as u32);
        }
        rooms.push(room);
    }

    let mut courses = Vec::with_capacity(dto.courses.len());
    for c in dto.courses {
        let id = CourseIdentifier::new(non_negative("course.id", c.id)? as usize);
        let lecturer =
            LecturerIdentifier::new(non_negative("course.lecturer_id", c.lecturer_id)? as usize);
        let duration = non_negative("course.duration", c.duration)? as u32;
        let meetings = non_negative("course.weekly_meetings", c.weekly_meetings)? as u32;
        let mut course = Course::new(id, c.name, lecturer, duration, meetings);
        for g in c.group_ids {
            course.add_group(GroupIdentifier::new(
                non_negative("course.group_ids", g)? as usize
            ));
        }
        for feature in c.required_features {
            course.add_required_feature(non_negative("course.required_features", feature)? as u32);
        }
        courses.push(course);
    }

    Ok(Instance::new(lecturers, groups, rooms, courses)?)
}

fn instance_to_dto(instance: &Instance) -> InstanceDto {
    let lecturers = instance
        .lecturers()
        .iter()
        .map(|l| LecturerDto {
            id: l.id().index() as i64,
            name: l.name().to_string(),
            undesirable_slots: sorted_slots(l.undesirable_slots()),
            undesirable_penalty: l.undesirable_penalty(),
        })
        .collect();

    let groups = instance
        .groups()
        .iter()
        .map(|g| GroupDto {
            id: g.id().index() as i64,
            name: g.name().to_string(),
            size: g.size() as i64,
            undesirable_slots: sorted_slots(g.undesirable_slots()),
            undesirable_penalty: g.undesirable_penalty(),
        })
        .collect();

    let rooms = instance
        .rooms()
        .iter()
        .map(|r| {
            let mut features: Vec<i64> = r.features().iter().map(|&f| f as i64).collect();
            features.sort_unstable();
            RoomDto {
                id: r.id().index() as i64,
                name: r.name().to_string(),
                capacity: r.capacity() as i64,
                features,
            }
        })
        .collect();

    let courses = instance
        .courses()
        .iter()
        .map(|c| CourseDto {
            id: c.id().index() as i64,
            name: c.name().to_string(),
            lecturer_id: c.lecturer().index() as i64,
            group_ids: c.groups().iter().map(|g| g.index() as i64).collect(),
            duration: c.duration() as i64,
            required_features: c.required_features().iter().map(|&f| f as i64).collect(),
            weekly_meetings: c.weekly_meetings() as i64,
        })
        .collect();

    InstanceDto {
        lecturers,
        groups,
        rooms,
        courses,
    }
}

/// Reads instance documents and funnels every failure mode into
/// [`InstanceLoadError`]. Every loaded instance has passed full validation.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct InstanceLoader;

impl InstanceLoader {
    #[inline]
    pub fn new() -> Self {
        Self
    }

    pub fn from_path<P: AsRef<Path>>(&self, path: P) -> Result<Instance, InstanceLoadError> {
        let file = File::open(path.as_ref())?;
        let instance = self.from_reader(BufReader::new(file))?;
        tracing::info!(path = %path.as_ref().display(), "loaded instance");
        Ok(instance)
    }

    pub fn from_reader<R: Read>(&self, reader: R) -> Result<Instance, InstanceLoadError> {
        let dto: InstanceDto = serde_json::from_reader(reader)?;
        instance_from_dto(dto)
    }

    pub fn from_json_str(&self, text: &str) -> Result<Instance, InstanceLoadError> {
        let dto: InstanceDto = serde_json::from_str(text)?;
        instance_from_dto(dto)
    }
}

pub fn save_instance<P: AsRef<Path>>(
    instance: &Instance,
    path: P,
) -> Result<(), InstanceLoadError> {
    let file = File::create(path.as_ref())?;
    serde_json::to_writer_pretty(BufWriter::new(file), &instance_to_dto(instance))?;
    tracing::info!(path = %path.as_ref().display(), "saved instance");
    Ok(())
}

pub fn instance_to_json_string(instance: &Instance) -> Result<String, InstanceLoadError> {
    Ok(serde_json::to_string_pretty(&instance_to_dto(instance))?)
}

fn schedule_to_dto(schedule: &Schedule) -> ScheduleDto {
    ScheduleDto {
        assignments: schedule
            .assignments()
            .iter()
            .map(|a| AssignmentDto {
                course_id: a.course().index() as i64,
                room_id: a.room().index() as i64,
                time_slot: slot_to_dto(a.slot()),
            })
            .collect(),
        fitness: schedule.fitness(),
        hard_violations: schedule.hard_violations() as i64,
        soft_violations: schedule.soft_violations(),
    }
}

pub fn save_schedule<P: AsRef<Path>>(
    schedule: &Schedule,
    path: P,
) -> Result<(), InstanceLoadError> {
    let file = File::create(path.as_ref())?;
    serde_json::to_writer_pretty(BufWriter::new(file), &schedule_to_dto(schedule))?;
    tracing::info!(path = %path.as_ref().display(), "saved schedule");
    Ok(())
}

pub fn schedule_to_json_string(schedule: &Schedule) -> Result<String, InstanceLoadError> {
    Ok(serde_json::to_string_pretty(&schedule_to_dto(schedule))?)
}
