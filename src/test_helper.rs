//! Helpers shared by the unit tests.

use log::Level;

/// Assert that exactly `expected_warnings` were logged at warn level, in order.
pub fn check_warnings(expected_warnings: Vec<&str>) {
    testing_logger::validate(|captured_logs| {
        let captured_logs: Vec<_> = captured_logs
            .iter()
            .filter(|l| l.level == Level::Warn)
            .collect();
        assert_eq!(captured_logs.len(), expected_warnings.len());
        for (log, expected) in captured_logs.iter().zip(&expected_warnings) {
            assert_eq!(log.body, *expected);
        }
    });
}

/// Assert that exactly `expected` were logged at info level, in order.
pub fn check_infos(expected: Vec<&str>) {
    testing_logger::validate(|captured_logs| {
        let captured_logs: Vec<_> = captured_logs
            .iter()
            .filter(|l| l.level == Level::Info)
            .collect();
        assert_eq!(captured_logs.len(), expected.len());
        for (log, expected) in captured_logs.iter().zip(&expected) {
            assert_eq!(log.body, *expected);
        }
    });
}
