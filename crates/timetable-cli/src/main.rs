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

mod gen;

use chrono::{DateTime, Utc};
use gen::{GeneratorConfig, InstanceGenerator};
use serde::Serialize;
use std::fs::File;
use std::io::BufWriter;
use std::time::Instant;
use timetable_model::prelude::{Instance, InstanceLoader};
use timetable_model::problem::loader::{save_instance, save_schedule};
use timetable_solver::prelude::{Solver, SolverConfig};
use tracing_subscriber::EnvFilter;

fn enable_tracing() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();
}

#[derive(Serialize)]
struct RunRecord {
    instance: String,
    start_ts: DateTime<Utc>, // RFC3339 via chrono (serde)
    end_ts: DateTime<Utc>,   // RFC3339 via chrono (serde)
    runtime_ms: u128,
    fitness: f64,
    hard_violations: usize,
    soft_violations: i64,
}

/// Usage: timetable-cli [instance.json] [seed] [cp_iterations] [ls_iterations]
///
/// Without an instance path a small synthetic catalogue is generated (and
/// saved next to the results so the run can be repeated).
fn main() {
    enable_tracing();

    let args: Vec<String> = std::env::args().collect();
    let instance_path = args.get(1).filter(|a| a.ends_with(".json")).cloned();
    let knob_offset = if instance_path.is_some() { 2 } else { 1 };
    let seed = parse_knob(&args, knob_offset, "seed", 0u64);
    let cp_iterations = parse_knob(&args, knob_offset + 1, "cp_iterations", 5usize);
    let ls_iterations = parse_knob(&args, knob_offset + 2, "ls_iterations", 10_000usize);

    let (instance, instance_name) = match &instance_path {
        Some(path) => match InstanceLoader::new().from_path(path) {
            Ok(instance) => (instance, path.clone()),
            Err(e) => {
                tracing::error!(path = %path, error = %e, "failed to load instance");
                std::process::exit(1);
            }
        },
        None => (generate_instance(seed), "generated_instance.json".into()),
    };

    tracing::info!(
        courses = instance.courses().len(),
        rooms = instance.rooms().len(),
        lecturers = instance.lecturers().len(),
        groups = instance.groups().len(),
        "starting hybrid constraint-propagation / local-search run"
    );

    let config = SolverConfig {
        cp_iterations,
        ls_iterations,
        seed,
        ..SolverConfig::default()
    };

    let start_ts = Utc::now();
    let t0 = Instant::now();
    let mut solver = Solver::new(&instance, config);
    let outcome = solver.solve();
    let runtime = t0.elapsed();
    let end_ts = Utc::now();

    if outcome.is_failure() {
        tracing::error!("no restart produced a schedule");
        std::process::exit(1);
    }

    println!("=== Final Solution ===");
    println!("Hard violations: {}", outcome.stats.hard_violations);
    println!("Soft violations: {}", outcome.stats.soft_violations);
    println!("Total fitness:   {}", outcome.stats.fitness);
    println!("Assignments:     {}", outcome.schedule.len());
    println!("Time taken:      {} ms", runtime.as_millis());

    if let Err(e) = save_schedule(&outcome.schedule, "schedule.json") {
        tracing::warn!(error = %e, "could not save schedule");
    }

    let record = RunRecord {
        instance: instance_name,
        start_ts,
        end_ts,
        runtime_ms: runtime.as_millis(),
        fitness: outcome.stats.fitness,
        hard_violations: outcome.stats.hard_violations,
        soft_violations: outcome.stats.soft_violations,
    };
    if let Err(e) = write_results(&[record], "results.json") {
        tracing::warn!(error = %e, "could not write run records");
    }
}

fn parse_knob<T: std::str::FromStr + Copy>(
    args: &[String],
    index: usize,
    name: &str,
    default: T,
) -> T {
    match args.get(index) {
        Some(raw) => match raw.parse() {
            Ok(v) => v,
            Err(_) => {
                tracing::warn!(name, raw = %raw, "could not parse knob, using default");
                default
            }
        },
        None => default,
    }
}

fn generate_instance(seed: u64) -> Instance {
    let config = GeneratorConfig {
        seed,
        ..GeneratorConfig::default()
    };
    let mut generator = InstanceGenerator::new(config);
    let instance = generator
        .generate()
        .expect("generator produces a valid instance");
    if let Err(e) = save_instance(&instance, "generated_instance.json") {
        tracing::warn!(error = %e, "could not save generated instance");
    }
    instance
}

fn write_results(records: &[RunRecord], path: &str) -> std::io::Result<()> {
    let file = File::create(path)?;
    serde_json::to_writer_pretty(BufWriter::new(file), records).map_err(std::io::Error::other)?;
    Ok(())
}
