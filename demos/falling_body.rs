//! Falling Body Demo - timed rigid-body drop onto a penalty-contact ground
//!
//! Run with: `cargo run --example falling_body [-- <output_dir>]`
//! Logging: `RUST_LOG=metrics_harness=debug cargo run --example falling_body`
//!
//! A sphere is released above a ground plane and integrated with
//! semi-implicit Euler until it comes to rest. Only the step loop is timed.
//! The run passes if the state stays finite and the sphere settles.

use std::process::ExitCode;

use anyhow::Context;
use metrics_harness::{Experiment, HarnessConfig, Metrics, Stopwatch, Workload};
use tracing_subscriber::EnvFilter;

const GRAVITY: f64 = -9.81;

/// Sphere dropped onto a spring-damper ground contact.
struct FallingBody {
    radius: f64,
    mass: f64,
    stiffness: f64,
    damping_ratio: f64,
    initial_height: f64,
    time_step: f64,
    num_steps: u32,
    timer: Stopwatch,
}

impl Default for FallingBody {
    fn default() -> Self {
        Self {
            radius: 0.1,
            mass: 1.0,
            stiffness: 1.0e5,
            damping_ratio: 0.5,
            initial_height: 1.0,
            time_step: 1.0e-4,
            num_steps: 20_000,
            timer: Stopwatch::new(),
        }
    }
}

impl FallingBody {
    fn contact_force(&self, height: f64, velocity: f64) -> f64 {
        let penetration = self.radius - height;
        if penetration <= 0.0 {
            return 0.0;
        }
        let damping = 2.0 * self.damping_ratio * (self.stiffness * self.mass).sqrt();
        // ground can push but never pull
        (self.stiffness * penetration - damping * velocity).max(0.0)
    }
}

impl Workload for FallingBody {
    fn run_workload(&mut self, metrics: &mut Metrics) -> bool {
        self.timer.reset();
        let mut height = self.initial_height;
        let mut velocity = 0.0;
        let mut max_penetration: f64 = 0.0;

        for _ in 0..self.num_steps {
            self.timer.start();
            let force = self.contact_force(height, velocity) + self.mass * GRAVITY;
            velocity += self.time_step * force / self.mass;
            height += self.time_step * velocity;
            self.timer.stop();

            if !height.is_finite() || !velocity.is_finite() {
                metrics.add("failure", "state became non-finite");
                return false;
            }
            max_penetration = max_penetration.max(self.radius - height);
        }

        let exec_time = self.timer.elapsed_seconds();
        let rest_penetration = self.mass * -GRAVITY / self.stiffness;
        let settled = velocity.abs() < 1.0e-2 && (self.radius - height - rest_penetration).abs() < 1.0e-3;

        metrics.add("num_steps", self.num_steps);
        metrics.add("avg_time_per_step", exec_time / f64::from(self.num_steps));
        metrics.add("final_height", height);
        metrics.add("final_velocity", velocity);
        metrics.add("max_penetration", max_penetration);
        metrics.add("integrator", "semi_implicit_euler");
        settled
    }

    fn elapsed_seconds(&self) -> f64 {
        self.timer.elapsed_seconds()
    }
}

fn run(out_dir: &str) -> anyhow::Result<bool> {
    let config = HarnessConfig::builder()
        .output_dir(out_dir)
        .verbose(true)
        .build();
    config
        .ensure_output_dir()
        .with_context(|| format!("Error creating directory {out_dir}"))?;

    let mut test = Experiment::new("utest_demo_FallingBody", "demo", FallingBody::default(), config)?;
    let report = test.run()?;
    Ok(report.passed())
}

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let out_dir = std::env::args().nth(1).unwrap_or_else(|| "../METRICS".to_string());
    match run(&out_dir) {
        Ok(passed) => {
            println!("falling body {}", if passed { "passed" } else { "failed" });
            ExitCode::SUCCESS
        }
        Err(err) => {
            eprintln!("{err:#}");
            ExitCode::FAILURE
        }
    }
}
