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

//! Seeded synthetic instance generation for demo runs and benchmarks.

use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use std::collections::HashSet;
use timetable_model::prelude::{
    Course, CourseIdentifier, GroupIdentifier, Instance, InstanceError, Lecturer,
    LecturerIdentifier, Room, RoomIdentifier, StudentGroup, TimeSlot,
};

const FIRST_NAMES: &[&str] = &[
    "James", "Mary", "John", "Patricia", "Robert", "Jennifer", "Michael", "Linda", "William",
    "Elizabeth", "David", "Barbara", "Richard", "Susan", "Joseph", "Jessica", "Thomas", "Sarah",
    "Charles", "Karen", "Christopher", "Nancy", "Daniel", "Lisa",
];

const LAST_NAMES: &[&str] = &[
    "Smith", "Johnson", "Williams", "Brown", "Jones", "Garcia", "Miller", "Davis", "Rodriguez",
    "Martinez", "Hernandez", "Lopez", "Gonzalez", "Wilson", "Anderson", "Thomas", "Taylor",
    "Moore", "Jackson", "Martin", "Lee", "Thompson", "White",
];

// more Dr. than Prof.
const TITLES: &[&str] = &["Dr.", "Prof.", "Dr.", "Prof.", "Dr."];

const COURSE_PREFIXES: &[&str] = &[
    "Introduction to",
    "Advanced",
    "Fundamentals of",
    "Applied",
    "Theoretical",
    "Practical",
    "Modern",
    "Contemporary",
    "Principles of",
    "Topics in",
];

const COURSE_SUBJECTS: &[&str] = &[
    "Algorithms",
    "Data Structures",
    "Database Systems",
    "Computer Networks",
    "Operating Systems",
    "Software Engineering",
    "Artificial Intelligence",
    "Machine Learning",
    "Computer Graphics",
    "Web Development",
    "Mobile Computing",
    "Cloud Computing",
    "Cybersecurity",
    "Distributed Systems",
    "Compiler Design",
    "Computer Architecture",
    "Human-Computer Interaction",
    "Data Mining",
    "Natural Language Processing",
    "Computer Vision",
    "Robotics",
    "Game Development",
    "Quantum Computing",
    "Blockchain",
    "Internet of Things",
    "Parallel Computing",
    "Discrete Mathematics",
    "Linear Algebra",
    "Calculus",
    "Statistics",
];

const ROOM_TYPES: &[&str] = &["Room", "Lab", "Lecture Hall", "Seminar Room", "Tutorial Room"];

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GeneratorConfig {
    pub lecturers: usize,
    pub groups: usize,
    pub rooms: usize,
    pub courses: usize,
    pub days: u32,
    pub periods_per_day: u32,
    /// chance a lecturer or group has undesirable slots at all
    pub undesirable_slot_probability: f64,
    /// chance a course requires special features
    pub course_feature_probability: f64,
    /// chance a room offers special features
    pub room_feature_probability: f64,
    pub seed: u64,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            lecturers: 10,
            groups: 12,
            rooms: 8,
            courses: 20,
            days: 5,
            periods_per_day: 8,
            undesirable_slot_probability: 0.15,
            course_feature_probability: 0.3,
            room_feature_probability: 0.4,
            seed: 42,
        }
    }
}

/// Deterministic random instance generation: the same seed always yields
/// the same catalogue.
pub struct InstanceGenerator {
    config: GeneratorConfig,
    rng: ChaCha8Rng,
}

impl InstanceGenerator {
    pub fn new(config: GeneratorConfig) -> Self {
        Self {
            config,
            rng: ChaCha8Rng::seed_from_u64(config.seed),
        }
    }

    pub fn generate(&mut self) -> Result<Instance, InstanceError> {
        let lecturers = self.generate_lecturers();
        let groups = self.generate_groups();
        let rooms = self.generate_rooms();
        let courses = self.generate_courses();
        Instance::new(lecturers, groups, rooms, courses)
    }

    fn random_slot(&mut self) -> TimeSlot {
        let day = self.rng.random_range(0..self.config.days);
        let period = self.rng.random_range(0..self.config.periods_per_day);
        TimeSlot::new(day, period)
    }

    fn generate_lecturers(&mut self) -> Vec<Lecturer> {
        let mut used_names: HashSet<String> = HashSet::new();
        let mut lecturers = Vec::with_capacity(self.config.lecturers);

        for i in 0..self.config.lecturers {
            let full_name = loop {
                let title = TITLES[self.rng.random_range(0..TITLES.len())];
                let first = FIRST_NAMES[self.rng.random_range(0..FIRST_NAMES.len())];
                let last = LAST_NAMES[self.rng.random_range(0..LAST_NAMES.len())];
                let candidate = format!("{title} {first} {last}");
                if used_names.insert(candidate.clone()) {
                    break candidate;
                }
            };

            let mut lecturer = Lecturer::new(LecturerIdentifier::new(i), full_name);
            if self.rng.random::<f64>() < self.config.undesirable_slot_probability {
                let slots = self.rng.random_range(2..=6usize);
                for _ in 0..slots {
                    let slot = self.random_slot();
                    lecturer.add_undesirable_slot(slot);
                }
                // seniority raises the penalty
                if lecturer.name().contains("Prof.") {
                    lecturer.set_undesirable_penalty(25.0);
                } else {
                    lecturer.set_undesirable_penalty(20.0);
                }
            }
            lecturers.push(lecturer);
        }

        lecturers
    }

    fn generate_groups(&mut self) -> Vec<StudentGroup> {
        let count = self.config.groups;
        let groups_per_year = count.div_ceil(4);
        let mut current_year = 1usize;
        let mut groups = Vec::with_capacity(count);

        for i in 0..count {
            let name = format!("CS-{current_year}{i}");
            let size = self.rng.random_range(15..=35u32);
            let mut group = StudentGroup::new(GroupIdentifier::new(i), name, size);

            if self.rng.random::<f64>() < self.config.undesirable_slot_probability {
                if current_year == 1 {
                    // first years avoid late slots at the end of the week
                    for p in self.config.periods_per_day.saturating_sub(2)
                        ..self.config.periods_per_day
                    {
                        group.add_undesirable_slot(TimeSlot::new(self.config.days - 1, p));
                    }
                } else if current_year >= 3 {
                    // senior years avoid early Monday slots
                    group.add_undesirable_slot(TimeSlot::new(0, 0));
                    group.add_undesirable_slot(TimeSlot::new(0, 1));
                }
                let extra = self.rng.random_range(1..=3usize);
                for _ in 0..extra {
                    let slot = self.random_slot();
                    group.add_undesirable_slot(slot);
                }
            }

            groups.push(group);
            if (i + 1) % groups_per_year == 0 && current_year < 4 {
                current_year += 1;
            }
        }

        groups
    }

    fn generate_rooms(&mut self) -> Vec<Room> {
        let count = self.config.rooms;
        // enough seats for the whole cohort at an assumed mean group size
        let min_total_capacity = self.config.groups as u32 * 25;
        let mut current_capacity = 0u32;
        let mut rooms = Vec::with_capacity(count);

        for i in 0..count {
            let room_type = ROOM_TYPES[self.rng.random_range(0..ROOM_TYPES.len())];
            let mut name = format!("{} {}", room_type, (b'A' + (i % 26) as u8) as char);
            if i >= 26 {
                name.push_str(&(i / 26 + 1).to_string());
            }

            let mut capacity = match room_type {
                "Lecture Hall" => self.rng.random_range(60..=120u32),
                "Lab" => self.rng.random_range(20..=30u32),
                "Seminar Room" => self.rng.random_range(15..=25u32),
                _ => self.rng.random_range(20..=100u32),
            };
            if i == count - 1 && current_capacity < min_total_capacity {
                capacity = capacity.max(min_total_capacity - current_capacity);
            }
            current_capacity += capacity;

            let mut room = Room::new(RoomIdentifier::new(i), name, capacity);
            if self.rng.random::<f64>() < self.config.room_feature_probability {
                // projector is common
                if self.rng.random::<f64>() < 0.7 {
                    room.add_feature(1);
                }
                // lab equipment
                if room_type == "Lab" || self.rng.random::<f64>() < 0.3 {
                    room.add_feature(2);
                }
                // special equipment is rare
                if self.rng.random::<f64>() < 0.1 {
                    room.add_feature(3);
                }
            }
            rooms.push(room);
        }

        rooms
    }

    fn unique_course_names(&mut self, needed: usize) -> Vec<String> {
        let mut combinations: Vec<(usize, usize)> = Vec::new();
        for p in 0..COURSE_PREFIXES.len() {
            for s in 0..COURSE_SUBJECTS.len() {
                combinations.push((p, s));
            }
        }
        combinations.shuffle(&mut self.rng);

        let mut names: Vec<String> = combinations
            .iter()
            .take(needed)
            .map(|&(p, s)| format!("{} {}", COURSE_PREFIXES[p], COURSE_SUBJECTS[s]))
            .collect();

        // numbered variants once the combination space is exhausted
        let base_len = names.len();
        let mut suffix = 2;
        while names.len() < needed {
            for i in 0..base_len {
                if names.len() >= needed {
                    break;
                }
                let variant = format!("{} {}", names[i], suffix);
                names.push(variant);
            }
            suffix += 1;
        }

        names
    }

    fn generate_courses(&mut self) -> Vec<Course> {
        let count = self.config.courses;
        let names = self.unique_course_names(count);
        let mut lecturer_load = vec![0u32; self.config.lecturers];
        let mut courses = Vec::with_capacity(count);

        for (i, name) in names.into_iter().enumerate() {
            let mut lecturer = self.rng.random_range(0..self.config.lecturers);
            // periodically rebalance onto the least loaded lecturer
            if i % 10 == 0 {
                let (min_index, &min_load) = lecturer_load
                    .iter()
                    .enumerate()
                    .min_by_key(|&(_, &load)| load)
                    .expect("at least one lecturer");
                if lecturer_load[lecturer] > min_load + 5 {
                    lecturer = min_index;
                }
            }

            let duration = self.rng.random_range(1..=3u32);
            let drawn_meetings = self.rng.random_range(1..=3u32);
            let meetings = if duration == 3 {
                drawn_meetings.min(2)
            } else {
                drawn_meetings
            };

            let mut course = Course::new(
                CourseIdentifier::new(i),
                name,
                LecturerIdentifier::new(lecturer),
                duration,
                meetings,
            );
            lecturer_load[lecturer] += duration * meetings;

            if self.rng.random::<f64>() < self.config.course_feature_probability {
                let name = course.name().to_string();
                if name.contains("Graphics")
                    || name.contains("Vision")
                    || name.contains("AI")
                    || self.rng.random::<f64>() < 0.5
                {
                    course.add_required_feature(1);
                }
                if name.contains("Programming")
                    || name.contains("Networks")
                    || name.contains("Operating")
                    || self.rng.random::<f64>() < 0.2
                {
                    course.add_required_feature(2);
                }
            }

            let wanted = self.rng.random_range(1..=3.min(self.config.groups));
            let mut selected: HashSet<usize> = HashSet::new();
            while selected.len() < wanted {
                let group = self.rng.random_range(0..self.config.groups);
                if selected.insert(group) {
                    course.add_group(GroupIdentifier::new(group));
                }
            }

            courses.push(course);
        }

        courses
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_generated_instance_is_valid_and_sized() {
        let mut generator = InstanceGenerator::new(GeneratorConfig::default());
        let instance = generator.generate().expect("generated instance is valid");
        assert_eq!(instance.lecturers().len(), 10);
        assert_eq!(instance.groups().len(), 12);
        assert_eq!(instance.rooms().len(), 8);
        assert_eq!(instance.courses().len(), 20);
        for c in instance.courses() {
            assert!(!c.groups().is_empty());
            assert!((1..=3).contains(&c.duration()));
            assert!((1..=3).contains(&c.weekly_meetings()));
            if c.duration() == 3 {
                assert!(c.weekly_meetings() <= 2);
            }
        }
    }

    #[test]
    fn test_same_seed_reproduces_the_catalogue() {
        let config = GeneratorConfig {
            seed: 99,
            ..GeneratorConfig::default()
        };
        let a = InstanceGenerator::new(config).generate().unwrap();
        let b = InstanceGenerator::new(config).generate().unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn test_room_capacity_floor_covers_cohort() {
        let config = GeneratorConfig {
            rooms: 3,
            groups: 20,
            ..GeneratorConfig::default()
        };
        let instance = InstanceGenerator::new(config).generate().unwrap();
        let total: u32 = instance.rooms().iter().map(|r| r.capacity()).sum();
        assert!(total >= 20 * 25);
    }

    #[test]
    fn test_course_names_are_unique() {
        // more courses than prefix/subject combinations forces numbered
        // variants; all names must still be distinct
        let config = GeneratorConfig {
            courses: 350,
            lecturers: 20,
            ..GeneratorConfig::default()
        };
        let instance = InstanceGenerator::new(config).generate().unwrap();
        let names: HashSet<&str> = instance.courses().iter().map(|c| c.name()).collect();
        assert_eq!(names.len(), 350);
    }
}
