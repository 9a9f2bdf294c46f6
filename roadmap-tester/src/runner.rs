use colored::Colorize;
use serde::{Deserialize, Serialize};
use std::time::{Duration, Instant};

use crate::scenarios::Scenario;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScenarioResult {
    pub scenario_name: String,
    pub passed: bool,
    pub iterations_run: usize,
    pub successful_iterations: usize,
    pub failures: Vec<String>,
    #[serde(with = "duration_serde")]
    pub average_duration: Duration,
}

pub struct Runner {
    iterations: usize,
    verbose: bool,
}

impl Runner {
    pub fn new(iterations: usize, verbose: bool) -> Self {
        Self {
            iterations: iterations.max(1),
            verbose,
        }
    }

    pub fn run(&self, scenario: &Scenario) -> ScenarioResult {
        if self.verbose {
            println!("🧪 Testing scenario: {}", scenario.key.bright_white());
        }

        let mut successes = 0;
        let mut failures = Vec::new();
        let mut elapsed = Duration::ZERO;

        for i in 0..self.iterations {
            let start = Instant::now();
            let outcome = scenario.run();
            elapsed += start.elapsed();
            match outcome {
                Ok(()) => successes += 1,
                Err(err) => {
                    log::debug!("{} iteration {} failed: {err:#}", scenario.key, i + 1);
                    failures.push(format!("Iteration {}: {err:#}", i + 1));
                }
            }
        }

        ScenarioResult {
            scenario_name: scenario.key.to_string(),
            passed: failures.is_empty(),
            iterations_run: self.iterations,
            successful_iterations: successes,
            failures,
            average_duration: elapsed / u32::try_from(self.iterations).unwrap_or(u32::MAX),
        }
    }
}

mod duration_serde {
    use serde::{Deserialize, Deserializer, Serialize, Serializer};
    use std::time::Duration;

    pub fn serialize<S>(duration: &Duration, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        u64::try_from(duration.as_micros())
            .unwrap_or(u64::MAX)
            .serialize(serializer)
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<Duration, D::Error>
    where
        D: Deserializer<'de>,
    {
        let micros = u64::deserialize(deserializer)?;
        Ok(Duration::from_micros(micros))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scenarios;

    #[test]
    fn run_counts_every_iteration() {
        let scenario = scenarios::find("focus-cycle").expect("known scenario");
        let result = Runner::new(3, false).run(&scenario);
        assert!(result.passed);
        assert_eq!(result.iterations_run, 3);
        assert_eq!(result.successful_iterations, 3);
    }

    #[test]
    fn zero_iterations_still_runs_once() {
        let scenario = scenarios::find("config-defaults").expect("known scenario");
        let result = Runner::new(0, false).run(&scenario);
        assert_eq!(result.iterations_run, 1);
    }

    #[test]
    fn result_serializes_duration_as_micros() {
        let result = ScenarioResult {
            scenario_name: "x".into(),
            passed: true,
            iterations_run: 1,
            successful_iterations: 1,
            failures: Vec::new(),
            average_duration: Duration::from_micros(1500),
        };
        let json = serde_json::to_value(&result).expect("serialize");
        assert_eq!(json["average_duration"], 1500);
    }
}
