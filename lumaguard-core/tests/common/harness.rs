//! Test harness for closed-loop scenarios
//!
//! Provides:
//! - Named test cases with wall-clock timing
//! - A seeded noise source for jittery lighting
//! - A summary printer in the same shape for every suite

use std::time::Instant;

/// Test result tracking
#[derive(Debug, Clone)]
pub struct TestResult {
    pub name: &'static str,
    pub passed: bool,
    pub duration_us: u64,
    pub error_message: Option<String>,
}

/// Runs named cases and collects their outcome
pub struct TestHarness {
    results: Vec<TestResult>,
}

impl TestHarness {
    pub fn new() -> Self {
        Self { results: Vec::new() }
    }

    /// Run a single test case
    pub fn run_test<F>(&mut self, name: &'static str, test_fn: F)
    where
        F: FnOnce() -> Result<(), String>,
    {
        let started = Instant::now();
        let result = test_fn();

        self.results.push(TestResult {
            name,
            passed: result.is_ok(),
            duration_us: started.elapsed().as_micros() as u64,
            error_message: result.err(),
        });
    }

    /// Run the same case over several parameter sets
    pub fn run_parameterized_test<T, F>(&mut self, name: &'static str, params: &[T], test_fn: F)
    where
        T: core::fmt::Debug,
        F: Fn(&T) -> Result<(), String>,
    {
        for param in params {
            let started = Instant::now();
            let result = test_fn(param).map_err(|e| format!("{:?}: {}", param, e));
            self.results.push(TestResult {
                name,
                passed: result.is_ok(),
                duration_us: started.elapsed().as_micros() as u64,
                error_message: result.err(),
            });
        }
    }

    /// Print test results summary
    pub fn print_summary(&self) {
        let total = self.results.len();
        let passed = self.results.iter().filter(|r| r.passed).count();

        println!("\nTest Results:");
        println!("============");
        println!("Total:  {}", total);
        println!("Passed: {}", passed);
        println!("Failed: {}", total - passed);

        for result in self.results.iter().filter(|r| !r.passed) {
            println!("  FAILED {}", result.name);
            if let Some(msg) = &result.error_message {
                println!("    Error: {}", msg);
            }
        }

        let max_us = self.results.iter().map(|r| r.duration_us).max().unwrap_or(0);
        println!("Slowest case: {} µs", max_us);
    }

    /// Check if all tests passed
    pub fn all_passed(&self) -> bool {
        self.results.iter().all(|r| r.passed)
    }

    /// First failure message, for assertion output
    pub fn first_failure(&self) -> Option<String> {
        self.results
            .iter()
            .find(|r| !r.passed)
            .map(|r| format!("{}: {}", r.name, r.error_message.clone().unwrap_or_default()))
    }
}

/// Seeded noise source for jittery scenes
///
/// xorshift64, so every run sees the same sequence.
pub struct TestRng(u64);

impl TestRng {
    pub fn new(seed: u64) -> Self {
        Self(seed | 1)
    }

    fn next_u64(&mut self) -> u64 {
        let mut x = self.0;
        x ^= x << 13;
        x ^= x >> 7;
        x ^= x << 17;
        self.0 = x;
        x
    }

    /// Uniform in `[-amplitude, amplitude)`
    pub fn jitter(&mut self, amplitude: f32) -> f32 {
        let unit = (self.next_u64() >> 40) as f32 / (1u64 << 24) as f32;
        (unit * 2.0 - 1.0) * amplitude
    }
}
