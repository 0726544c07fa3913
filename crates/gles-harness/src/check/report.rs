use std::fmt::Display;

use super::CheckValue;

/// Exit status reported when every check passed.
pub const EXIT_SUCCESS: i32 = 0;

/// Exit status reported on initialization failure or any failed check.
pub const EXIT_FAILURE: i32 = -1;

/// Process-wide record of assertion outcomes.
///
/// Checks never abort the run. A failure is printed immediately and
/// remembered; the aggregate is consulted once all checks are done to pick
/// the visual cue and the exit code.
#[derive(Debug, Default, Clone)]
pub struct CheckReport {
    passed: u32,
    failures: u32,
}

impl CheckReport {
    pub fn new() -> Self {
        Self::default()
    }

    /// Compares `actual` with `expected`, prints an OK/FAIL line and records
    /// the outcome. Returns whether the values matched.
    pub fn check<T: CheckValue>(&mut self, actual: T, expected: T, label: &str) -> bool {
        let ok = actual.matches(expected);
        if ok {
            self.passed += 1;
            println!("{}", ok_line(label, actual));
        } else {
            self.failures += 1;
            for line in fail_lines(label, expected, actual) {
                eprintln!("{line}");
            }
        }
        log::debug!("check {label:?}: ok={ok}");
        ok
    }

    /// `true` once any check has failed.
    pub fn failed(&self) -> bool {
        self.failures > 0
    }

    pub fn passed(&self) -> u32 {
        self.passed
    }

    pub fn failures(&self) -> u32 {
        self.failures
    }

    pub fn total(&self) -> u32 {
        self.passed + self.failures
    }

    pub fn exit_code(&self) -> i32 {
        if self.failed() {
            EXIT_FAILURE
        } else {
            EXIT_SUCCESS
        }
    }

    /// Prints the final summary line. Runs without checks print nothing.
    pub fn print_summary(&self) {
        if self.total() == 0 {
            return;
        }
        if self.failed() {
            println!("{} of {} checks FAILED.", self.failures(), self.total());
        } else {
            println!("All {} checks passed.", self.passed());
        }
    }
}

/// Line printed to stdout for a passing check.
fn ok_line<T: Display>(label: &str, actual: T) -> String {
    format!("OK: {label} (Value: {actual})")
}

/// Lines printed to stderr for a failing check.
fn fail_lines<T: Display>(label: &str, expected: T, actual: T) -> [String; 2] {
    [
        format!("Assertion Failed: {label}"),
        format!("--> Expected: {expected}, but got: {actual}"),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    // ── output lines ──────────────────────────────────────────────────────

    #[test]
    fn ok_line_for_integers() {
        assert_eq!(
            ok_line("GL_ACTIVE_ATTRIBUTES", 2),
            "OK: GL_ACTIVE_ATTRIBUTES (Value: 2)"
        );
    }

    #[test]
    fn ok_line_for_floats() {
        assert_eq!(
            ok_line("MAG_FILTER (as float)", 9729.0f32),
            "OK: MAG_FILTER (as float) (Value: 9729)"
        );
        assert_eq!(ok_line("coverage", 0.5f32), "OK: coverage (Value: 0.5)");
    }

    #[test]
    fn fail_lines_for_integers() {
        assert_eq!(
            fail_lines("GL_LINK_STATUS", 1, 0),
            [
                "Assertion Failed: GL_LINK_STATUS".to_owned(),
                "--> Expected: 1, but got: 0".to_owned(),
            ]
        );
    }

    #[test]
    fn fail_lines_for_floats() {
        assert_eq!(
            fail_lines("WRAP_S (as float)", 0.01f32, 0.0),
            [
                "Assertion Failed: WRAP_S (as float)".to_owned(),
                "--> Expected: 0.01, but got: 0".to_owned(),
            ]
        );
    }

    // ── aggregate ─────────────────────────────────────────────────────────

    #[test]
    fn fresh_report_passes() {
        let r = CheckReport::new();
        assert!(!r.failed());
        assert_eq!(r.exit_code(), EXIT_SUCCESS);
        assert_eq!(r.total(), 0);
    }

    #[test]
    fn equal_values_pass() {
        let mut r = CheckReport::new();
        assert!(r.check(2, 2, "GL_ACTIVE_ATTRIBUTES"));
        assert!(r.check(9729.0f32, 9729.0, "MAG_FILTER (as float)"));
        assert!(!r.failed());
        assert_eq!(r.passed(), 2);
    }

    #[test]
    fn one_failure_sticks() {
        let mut r = CheckReport::new();
        assert!(r.check(1, 1, "a"));
        assert!(!r.check(1, 0, "b"));
        assert!(r.check(3, 3, "c"));
        assert!(r.failed());
        assert_eq!(r.failures(), 1);
        assert_eq!(r.exit_code(), EXIT_FAILURE);
    }

    #[test]
    fn float_outside_tolerance_fails() {
        let mut r = CheckReport::new();
        assert!(!r.check(0.0f32, 0.01, "WRAP_S (as float)"));
        assert!(r.failed());
    }

    #[test]
    fn exit_code_tracks_flag() {
        let mut r = CheckReport::new();
        for (actual, expected) in [(1, 1), (2, 2), (7, 8), (4, 4)] {
            r.check(actual, expected, "x");
            assert_eq!(r.exit_code() == EXIT_FAILURE, r.failed());
        }
        assert!(r.failed());
    }
}
