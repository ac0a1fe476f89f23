//! Test runner for executing scenario suites
//!
//! Manages scenario execution, result collection, and reporting.

use anyhow::Result;
use std::collections::HashMap;
use std::panic::{self, AssertUnwindSafe};
use std::time::{Duration, Instant};

/// Result of a scenario
#[derive(Debug)]
pub enum TestResult {
    Passed,
    Failed { reason: String },
}

impl TestResult {
    pub fn is_passed(&self) -> bool {
        matches!(self, TestResult::Passed)
    }
}

/// A single scenario
pub struct TestCase {
    /// Test name
    pub name: String,
    /// Test category
    pub category: String,
    /// Test function
    pub test_fn: Box<dyn FnOnce() -> Result<()>>,
}

impl TestCase {
    pub fn new<F>(name: &str, category: &str, test_fn: F) -> Self
    where
        F: FnOnce() -> Result<()> + 'static,
    {
        Self {
            name: name.to_string(),
            category: category.to_string(),
            test_fn: Box::new(test_fn),
        }
    }

    fn run(self) -> TestResult {
        match panic::catch_unwind(AssertUnwindSafe(self.test_fn)) {
            Ok(Ok(())) => TestResult::Passed,
            Ok(Err(err)) => TestResult::Failed {
                reason: format!("{:#}", err),
            },
            Err(payload) => TestResult::Failed {
                reason: payload
                    .downcast_ref::<&str>()
                    .map(|s| s.to_string())
                    .or_else(|| payload.downcast_ref::<String>().cloned())
                    .unwrap_or_else(|| "panicked".to_string()),
            },
        }
    }
}

/// Result of running a scenario
pub struct TestRun {
    /// Test name
    pub name: String,
    /// Test category
    pub category: String,
    /// Test result
    pub result: TestResult,
    /// Time taken
    pub duration: Duration,
}

impl TestRun {
    pub fn is_passed(&self) -> bool {
        self.result.is_passed()
    }
}

/// Test suite containing multiple scenarios
pub struct TestSuite {
    /// Suite name
    pub name: String,
    /// Test cases
    pub cases: Vec<TestCase>,
}

impl TestSuite {
    pub fn new(name: &str) -> Self {
        Self {
            name: name.to_string(),
            cases: Vec::new(),
        }
    }

    pub fn add<F>(&mut self, name: &str, test_fn: F) -> &mut Self
    where
        F: FnOnce() -> Result<()> + 'static,
    {
        self.cases.push(TestCase::new(name, &self.name, test_fn));
        self
    }
}

/// Test runner for executing suites
#[derive(Default)]
pub struct TestRunner {
    /// Test suites to run
    suites: Vec<TestSuite>,
    /// Filter pattern (None = run all)
    filter: Option<String>,
}

impl TestRunner {
    /// Create a new test runner
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a test suite
    pub fn add_suite(&mut self, suite: TestSuite) -> &mut Self {
        self.suites.push(suite);
        self
    }

    /// Set a filter pattern
    pub fn filter(&mut self, pattern: &str) -> &mut Self {
        self.filter = Some(pattern.to_string());
        self
    }

    /// Run all tests
    pub fn run(&mut self) -> RunResult {
        let start = Instant::now();
        let mut results = Vec::new();

        for suite in self.suites.drain(..) {
            tracing::info!("Running suite: {}", suite.name);

            for case in suite.cases {
                if let Some(ref pattern) = self.filter {
                    if !case.name.contains(pattern) && !case.category.contains(pattern) {
                        continue;
                    }
                }

                let test_start = Instant::now();
                tracing::debug!("Running test: {}::{}", case.category, case.name);

                let name = case.name.clone();
                let category = case.category.clone();
                let result = case.run();
                let duration = test_start.elapsed();

                match &result {
                    TestResult::Passed => tracing::info!("  ✓ {} ({:?})", name, duration),
                    TestResult::Failed { reason } => {
                        tracing::error!("  ✗ {} ({:?}): {}", name, duration, reason)
                    }
                }

                results.push(TestRun {
                    name,
                    category,
                    result,
                    duration,
                });
            }
        }

        RunResult::new(results, start.elapsed())
    }
}

/// Results from running tests
pub struct RunResult {
    /// Individual test results
    pub results: Vec<TestRun>,
    /// Total time taken
    pub duration: Duration,
}

impl RunResult {
    pub fn new(results: Vec<TestRun>, duration: Duration) -> Self {
        Self { results, duration }
    }

    /// Count of passed tests
    pub fn passed(&self) -> usize {
        self.results.iter().filter(|r| r.is_passed()).count()
    }

    /// Count of failed tests
    pub fn failed(&self) -> usize {
        self.results.iter().filter(|r| !r.is_passed()).count()
    }

    /// Total test count
    pub fn total(&self) -> usize {
        self.results.len()
    }

    /// All tests passed
    pub fn all_passed(&self) -> bool {
        self.results.iter().all(|r| r.is_passed())
    }

    /// Get results by category
    pub fn by_category(&self) -> HashMap<String, Vec<&TestRun>> {
        let mut map: HashMap<String, Vec<&TestRun>> = HashMap::new();
        for result in &self.results {
            map.entry(result.category.clone()).or_default().push(result);
        }
        map
    }

    /// Print summary
    pub fn print_summary(&self) {
        println!("\n╔══════════════════════════════════════════╗");
        println!("║         SCENARIO RESULTS SUMMARY         ║");
        println!("╠══════════════════════════════════════════╣");
        println!("║  Passed:  {:>5}                          ║", self.passed());
        println!("║  Failed:  {:>5}                          ║", self.failed());
        println!("║  Total:   {:>5}                          ║", self.total());
        println!("║  Time:    {:>8.2?}                      ║", self.duration);
        println!("╚══════════════════════════════════════════╝");

        if self.failed() > 0 {
            println!("\nFailed scenarios:");
            for run in &self.results {
                if let TestResult::Failed { reason } = &run.result {
                    println!("  ✗ {}::{}: {}", run.category, run.name, reason);
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_filter_and_failures() {
        let mut suite = TestSuite::new("keys");
        suite
            .add("passes", || Ok(()))
            .add("fails", || anyhow::bail!("wrong highlight"))
            .add("panics", || panic!("boom"));

        let mut runner = TestRunner::new();
        runner.add_suite(suite);
        let result = runner.run();
        assert_eq!(result.passed(), 1);
        assert_eq!(result.failed(), 2);
        assert!(!result.all_passed());
        assert_eq!(result.by_category()["keys"].len(), 3);

        let mut suite = TestSuite::new("keys");
        suite.add("passes", || Ok(())).add("fails", || anyhow::bail!("no"));
        let mut runner = TestRunner::new();
        runner.add_suite(suite).filter("pass");
        let result = runner.run();
        assert_eq!(result.total(), 1);
        assert!(result.all_passed());
    }
}
