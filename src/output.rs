// ABOUTME: Output formatting for CLI feedback.
// ABOUTME: Supports normal, quiet (CI), and JSON output modes.

use serde::Serialize;
use std::time::Instant;

use crate::rollout::{DeploymentResult, RolloutRequest};

/// Output mode for CLI feedback.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputMode {
    /// Human-friendly output
    Normal,
    /// Minimal output for CI (only final result)
    Quiet,
    /// JSON lines for scripting
    Json,
}

/// Handles CLI output based on the configured mode.
pub struct Output {
    mode: OutputMode,
    start_time: Option<Instant>,
}

impl Output {
    pub fn new(mode: OutputMode) -> Self {
        Self {
            mode,
            start_time: None,
        }
    }

    /// Start timing an operation.
    pub fn start_timer(&mut self) {
        self.start_time = Some(Instant::now());
    }

    /// Get elapsed time since timer started.
    pub fn elapsed_secs(&self) -> f64 {
        self.start_time
            .map(|t| t.elapsed().as_secs_f64())
            .unwrap_or(0.0)
    }

    fn duration_secs(&self) -> Option<f64> {
        self.start_time.map(|_| self.elapsed_secs())
    }

    /// Announce what is about to be rolled out.
    pub fn start(&self, request: &RolloutRequest) {
        match self.mode {
            OutputMode::Normal => {
                println!("Cluster: {}", request.cluster);
                println!("Service: {}", request.service);
                println!("Image: {}", request.image);
            }
            OutputMode::Quiet => {}
            OutputMode::Json => print_json(&JsonEvent::Start {
                cluster: request.cluster.as_str(),
                service: request.service.as_str(),
                image: request.image.as_str(),
            }),
        }
    }

    /// Print a non-fatal warning.
    pub fn warning(&self, message: &str) {
        match self.mode {
            OutputMode::Normal | OutputMode::Quiet => eprintln!("Warning: {message}"),
            OutputMode::Json => print_json(&JsonEvent::Warning { message }),
        }
    }

    /// Report an accepted rollout.
    pub fn deployed(&self, result: &DeploymentResult) {
        match self.mode {
            OutputMode::Normal => {
                if !result.registered {
                    println!("Image unchanged; reusing current task definition");
                }
                println!("Deployed Task: {}", result.task_definition);
                println!("Pending Count: {}", result.pending_count);
                let elapsed = self.elapsed_secs();
                if elapsed > 0.0 {
                    println!("Deployment Success! ({:.1}s)", elapsed);
                } else {
                    println!("Deployment Success!");
                }
            }
            OutputMode::Quiet => {
                // Print only the essential result
                println!("{}", result.task_definition);
            }
            OutputMode::Json => print_json(&JsonEvent::Success {
                result,
                duration_secs: self.duration_secs(),
            }),
        }
    }

    /// Print an error message.
    pub fn error(&self, kind: &str, message: &str) {
        match self.mode {
            OutputMode::Normal | OutputMode::Quiet => {
                eprintln!("Error: {message}");
            }
            OutputMode::Json => {
                let event = JsonEvent::Error {
                    kind,
                    message,
                    duration_secs: self.duration_secs(),
                };
                if let Ok(json) = serde_json::to_string(&event) {
                    eprintln!("{json}");
                }
            }
        }
    }
}

fn print_json(event: &JsonEvent<'_>) {
    if let Ok(json) = serde_json::to_string(event) {
        println!("{json}");
    }
}

#[derive(Serialize)]
#[serde(tag = "event", rename_all = "snake_case")]
enum JsonEvent<'a> {
    Start {
        cluster: &'a str,
        service: &'a str,
        image: &'a str,
    },
    Warning {
        message: &'a str,
    },
    Success {
        result: &'a DeploymentResult,
        #[serde(skip_serializing_if = "Option::is_none")]
        duration_secs: Option<f64>,
    },
    Error {
        kind: &'a str,
        message: &'a str,
        #[serde(skip_serializing_if = "Option::is_none")]
        duration_secs: Option<f64>,
    },
}
