//! Plain-text rendering of scenario reports.

use std::fmt::Write;

use petstore_contract_application::{OperationOutcome, ScenarioReport};

/// Renders `report` as the text printed at the end of a run.
///
/// One line per operation, each failed check indented below its operation,
/// then a summary line.
#[must_use]
pub fn render_report(report: &ScenarioReport) -> String {
    let mut out = String::new();
    let _ = writeln!(
        out,
        "Contract run {} against {} (started {})",
        report.run_id,
        report.base_url,
        report.started_at.format("%Y-%m-%d %H:%M:%S UTC")
    );

    for outcome in &report.outcomes {
        match outcome {
            OperationOutcome::Verified(results) => {
                let tag = if results.all_passed() { "PASS" } else { "FAIL" };
                let _ = writeln!(
                    out,
                    "[{tag}] {} ({}/{} checks passed)",
                    results.operation, results.passed, results.total
                );
                for failure in results.failures() {
                    let _ = writeln!(
                        out,
                        "    - {}: {}",
                        failure.check.description(),
                        failure.error.as_deref().unwrap_or("check failed")
                    );
                }
            }
            OperationOutcome::TransportFailed { operation, error } => {
                let _ = writeln!(out, "[ERROR] {operation}: {error}");
            }
        }
    }

    let passed = report.outcomes.iter().filter(|o| o.passed()).count();
    let _ = write!(
        out,
        "{passed}/{} operations passed, {} of {} checks failed",
        report.outcomes.len(),
        report.failed_checks(),
        report.total_checks()
    );
    if report.transport_failures() > 0 {
        let _ = write!(out, ", {} transport failures", report.transport_failures());
    }
    out.push('\n');
    out
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};
    use petstore_contract_application::HttpClientError;
    use petstore_contract_domain::{Check, CheckResult, Operation, OperationResults};
    use pretty_assertions::assert_eq;
    use uuid::Uuid;

    fn report(outcomes: Vec<OperationOutcome>) -> ScenarioReport {
        ScenarioReport {
            run_id: Uuid::nil(),
            started_at: Utc.with_ymd_and_hms(2022, 10, 5, 1, 22, 6).unwrap(),
            base_url: "http://localhost:8080/v2/store".to_string(),
            outcomes,
        }
    }

    fn passing(operation: Operation) -> OperationOutcome {
        OperationOutcome::Verified(OperationResults::new(
            operation,
            vec![CheckResult::pass_with_value(
                Check::StatusCode { expected: 200 },
                "200",
            )],
        ))
    }

    #[test]
    fn test_all_passing() {
        let text = render_report(&report(vec![
            passing(Operation::PlaceOrder),
            passing(Operation::GetInventory),
        ]));

        assert_eq!(
            text,
            "Contract run 00000000-0000-0000-0000-000000000000 against \
             http://localhost:8080/v2/store (started 2022-10-05 01:22:06 UTC)\n\
             [PASS] PlaceOrder (1/1 checks passed)\n\
             [PASS] GetInventory (1/1 checks passed)\n\
             2/2 operations passed, 0 of 2 checks failed\n"
        );
    }

    #[test]
    fn test_failures_and_transport_errors() {
        let failed = OperationOutcome::Verified(OperationResults::new(
            Operation::GetOrderById,
            vec![
                CheckResult::pass_with_value(Check::StatusCode { expected: 200 }, "200"),
                CheckResult::fail_with_value(
                    Check::FieldCount { expected: 6 },
                    "7",
                    "Expected 6 fields, got 7",
                ),
            ],
        ));
        let transport = OperationOutcome::TransportFailed {
            operation: Operation::DeleteOrderById,
            error: HttpClientError::Timeout { timeout_ms: 100 },
        };

        let text = render_report(&report(vec![failed, transport]));
        let lines: Vec<&str> = text.lines().skip(1).collect();

        assert_eq!(
            lines,
            vec![
                "[FAIL] GetOrderById (1/2 checks passed)",
                "    - Body has 6 fields: Expected 6 fields, got 7",
                "[ERROR] DeleteOrderById: request timed out after 100ms",
                "0/2 operations passed, 1 of 2 checks failed, 1 transport failures",
            ]
        );
    }
}
