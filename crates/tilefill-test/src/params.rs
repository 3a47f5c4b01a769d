//! Regression test parameters and comparisons

use tilefill_core::Tile;

/// Regression test state
///
/// Tracks the test name, a running comparison index, and the recorded
/// failures. Comparisons report and accumulate instead of panicking,
/// so one run surfaces every mismatch; [`RegParams::cleanup`] returns
/// the overall verdict.
pub struct RegParams {
    /// Name of the test (e.g. "tilemorph")
    pub test_name: String,
    /// Current comparison index (incremented before each comparison)
    index: usize,
    /// Overall success status
    success: bool,
    /// Recorded failures
    failures: Vec<String>,
}

impl RegParams {
    /// Create new regression test parameters.
    pub fn new(test_name: &str) -> Self {
        eprintln!();
        eprintln!("////////////////   {}_reg   ////////////////", test_name);

        Self {
            test_name: test_name.to_string(),
            index: 0,
            success: true,
            failures: Vec::new(),
        }
    }

    /// Get the current comparison index.
    pub fn index(&self) -> usize {
        self.index
    }

    /// Compare two floating-point values within `delta`.
    pub fn compare_values(&mut self, expected: f64, actual: f64, delta: f64) -> bool {
        self.index += 1;
        let diff = (expected - actual).abs();

        if diff > delta {
            let msg = format!(
                "Failure in {}_reg: value comparison for index {}\n\
                 difference = {} but allowed delta = {}\n\
                 expected = {}, actual = {}",
                self.test_name, self.index, diff, delta, expected, actual
            );
            eprintln!("{}", msg);
            self.failures.push(msg);
            self.success = false;
            false
        } else {
            true
        }
    }

    /// Compare two boolean outcomes.
    pub fn compare_bool(&mut self, expected: bool, actual: bool) -> bool {
        self.compare_values(
            if expected { 1.0 } else { 0.0 },
            if actual { 1.0 } else { 0.0 },
            0.0,
        )
    }

    /// Compare two tiles pixel by pixel.
    pub fn compare_tiles(&mut self, tile1: &Tile, tile2: &Tile) -> bool {
        self.index += 1;

        for (i, (p1, p2)) in tile1.data().iter().zip(tile2.data()).enumerate() {
            if p1 != p2 {
                let msg = format!(
                    "Failure in {}_reg: tile comparison for index {} - \
                     pixel mismatch at ({}, {}): {} vs {}",
                    self.test_name,
                    self.index,
                    i % tilefill_core::TILE_SIZE,
                    i / tilefill_core::TILE_SIZE,
                    p1,
                    p2
                );
                eprintln!("{}", msg);
                self.failures.push(msg);
                self.success = false;
                return false;
            }
        }

        true
    }

    /// Report results and return the overall verdict.
    pub fn cleanup(self) -> bool {
        if self.success {
            eprintln!("SUCCESS: {}_reg", self.test_name);
        } else {
            eprintln!("FAILURE: {}_reg", self.test_name);
            for failure in &self.failures {
                eprintln!("  {}", failure);
            }
        }
        eprintln!();

        self.success
    }

    /// Check if all comparisons have passed so far.
    pub fn is_success(&self) -> bool {
        self.success
    }

    /// Get the list of failures.
    pub fn failures(&self) -> &[String] {
        &self.failures
    }
}
