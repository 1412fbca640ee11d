//! Contract verifier implementation.
//!
//! Checks an observed response against an expected contract and produces
//! one result per expectation.

use petstore_contract_application::ports::ResponseVerifier;
use petstore_contract_domain::response::ResponseSpec;
use petstore_contract_domain::{
    BodyExpectation, Check, CheckResult, ExpectedContract, ExpectedHeader, FieldExpectation,
    OperationResults, format_list,
};
use serde_json::{Map, Value};

/// Verifier that runs every check of a contract against a response.
///
/// Checks run in a fixed order: status, headers, then the body (JSON
/// parse, field presence, field count, field values). All checks run and
/// are reported; only a body that fails to parse skips the field checks.
#[derive(Debug, Clone, Copy, Default)]
pub struct ContractVerifier;

impl ContractVerifier {
    /// Create a new contract verifier.
    #[must_use]
    pub const fn new() -> Self {
        Self
    }

    /// Run every check of `contract` against `response`.
    #[must_use]
    pub fn run(&self, contract: &ExpectedContract, response: &ResponseSpec) -> OperationResults {
        let mut results = Vec::with_capacity(contract.headers.len() + 16);

        results.push(Self::check_status_code(contract.status, response));
        results.push(Self::check_status_text(&contract.status_text, response));

        for header in &contract.headers {
            results.push(Self::check_header(header, response));
        }

        match parse_body(&response.body) {
            Ok(json) => {
                results.push(CheckResult::pass_with_value(
                    Check::JsonBody,
                    describe_json(&json),
                ));
                if let BodyExpectation::Object { fields } = &contract.body {
                    Self::check_fields(fields, &json, &mut results);
                }
            }
            Err(message) => results.push(CheckResult::fail(Check::JsonBody, message)),
        }

        OperationResults::new(contract.operation, results)
    }

    fn check_status_code(expected: u16, response: &ResponseSpec) -> CheckResult {
        let check = Check::StatusCode { expected };
        let actual = response.status;
        if actual == expected {
            CheckResult::pass_with_value(check, actual.to_string())
        } else {
            CheckResult::fail_with_value(
                check,
                actual.to_string(),
                format!("Expected status {expected}, got {actual}"),
            )
        }
    }

    fn check_status_text(expected: &str, response: &ResponseSpec) -> CheckResult {
        let check = Check::StatusText {
            expected: expected.to_string(),
        };
        let actual = &response.status_text;
        if actual == expected {
            CheckResult::pass_with_value(check, actual.clone())
        } else {
            CheckResult::fail_with_value(
                check,
                actual.clone(),
                format!("Expected status text '{expected}', got '{actual}'"),
            )
        }
    }

    fn check_header(expected: &ExpectedHeader, response: &ResponseSpec) -> CheckResult {
        let check = Check::Header {
            name: expected.name.clone(),
            expected: expected.values.clone(),
        };
        let actual = response.headers.values(&expected.name);
        if actual.is_empty() {
            return CheckResult::fail(check, format!("Header '{}' not found", expected.name));
        }

        let rendered = format_list(&actual);
        if actual.len() == expected.values.len()
            && actual.iter().zip(&expected.values).all(|(a, e)| *a == e.as_str())
        {
            CheckResult::pass_with_value(check, rendered)
        } else {
            CheckResult::fail_with_value(
                check,
                rendered.clone(),
                format!(
                    "Header '{}' mismatch: expected {}, got {}",
                    expected.name,
                    format_list(&expected.values),
                    rendered
                ),
            )
        }
    }

    fn check_fields(fields: &[FieldExpectation], json: &Value, results: &mut Vec<CheckResult>) {
        let empty = Map::new();
        let object = json.as_object().unwrap_or(&empty);

        for field in fields {
            let check = Check::FieldPresent {
                field: field.name.clone(),
            };
            results.push(match object.get(&field.name) {
                Some(value) if !value.is_null() => {
                    CheckResult::pass_with_value(check, value.to_string())
                }
                Some(_) => CheckResult::fail_with_value(
                    check,
                    "null",
                    format!("Field '{}' is null", field.name),
                ),
                None => CheckResult::fail(check, format!("Field '{}' is missing", field.name)),
            });
        }

        let check = Check::FieldCount {
            expected: fields.len(),
        };
        results.push(if json.is_object() {
            let actual = object.len();
            if actual == fields.len() {
                CheckResult::pass_with_value(check, actual.to_string())
            } else {
                CheckResult::fail_with_value(
                    check,
                    actual.to_string(),
                    format!(
                        "Expected {} fields, got {actual}: {}",
                        fields.len(),
                        field_names(object)
                    ),
                )
            }
        } else {
            CheckResult::fail_with_value(
                check,
                describe_json(json),
                "Body is not a JSON object",
            )
        });

        // Absent or null fields were already reported by the presence check.
        for field in fields.iter().filter(|f| f.expected.is_literal()) {
            let Some(actual) = object.get(&field.name).filter(|v| !v.is_null()) else {
                continue;
            };
            let check = Check::FieldValue {
                field: field.name.clone(),
                expected: field.expected.clone(),
            };
            results.push(if field.expected.matches(actual) {
                CheckResult::pass_with_value(check, actual.to_string())
            } else {
                CheckResult::fail_with_value(
                    check,
                    actual.to_string(),
                    format!(
                        "Field '{}' mismatch: expected {}, got {actual}",
                        field.name,
                        field.expected.describe()
                    ),
                )
            });
        }
    }
}

impl ResponseVerifier for ContractVerifier {
    fn verify(&self, contract: &ExpectedContract, response: &ResponseSpec) -> OperationResults {
        self.run(contract, response)
    }
}

/// Parses the body as JSON, rejecting a `null` document.
fn parse_body(body: &str) -> Result<Value, String> {
    match serde_json::from_str::<Value>(body) {
        Ok(Value::Null) => Err("Body is JSON null".to_string()),
        Ok(json) => Ok(json),
        Err(e) => Err(format!("Body is not valid JSON: {e}")),
    }
}

fn describe_json(json: &Value) -> String {
    match json {
        Value::Object(map) => format!("object with {} fields", map.len()),
        Value::Array(items) => format!("array with {} items", items.len()),
        other => other.to_string(),
    }
}

fn field_names(object: &Map<String, Value>) -> String {
    format_list(&object.keys().map(String::as_str).collect::<Vec<_>>())
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use std::time::Duration;

    use petstore_contract_domain::request::Headers;
    use petstore_contract_domain::{
        ContractBook, ExpectedValue, Operation, OrderFixture, petstore_headers,
    };
    use pretty_assertions::assert_eq;

    const ORDER_BODY: &str = r#"{"id":5,"petId":15,"quantity":35,"shipDate":"2022-10-05T01:22:06.626+0000","status":"avaiable","complete":true}"#;
    const DELETE_BODY: &str = r#"{"code":200,"type":"unknown","message":"5"}"#;

    fn book() -> ContractBook {
        ContractBook::petstore(&OrderFixture::default()).unwrap()
    }

    fn petstore_response_headers() -> Headers {
        petstore_headers()
            .into_iter()
            .fold(Headers::new(), |headers, h| {
                headers.with(h.name.to_lowercase(), h.values[0].clone())
            })
            .with("Date", "Wed, 05 Oct 2022 01:22:07 GMT")
    }

    fn response(status: u16, status_text: &str, headers: Headers, body: &str) -> ResponseSpec {
        ResponseSpec::new(
            status,
            status_text,
            headers,
            body.as_bytes(),
            Duration::from_millis(50),
        )
    }

    fn ok_response(body: &str) -> ResponseSpec {
        response(200, "OK", petstore_response_headers(), body)
    }

    fn failed_checks(results: &OperationResults) -> Vec<Check> {
        results.failures().map(|r| r.check.clone()).collect()
    }

    #[test]
    fn test_place_order_passes() {
        let results = ContractVerifier::new().run(
            book().contract(Operation::PlaceOrder),
            &ok_response(ORDER_BODY),
        );
        // status (2) + headers (7) + json (1) + presence (6) + count (1) + values (6)
        assert_eq!(results.total, 23);
        assert!(results.all_passed(), "{:?}", results.violations());
    }

    #[test]
    fn test_delete_order_passes() {
        let results = ContractVerifier::new().run(
            &book().contract(Operation::DeleteOrderById).for_order(5),
            &ok_response(DELETE_BODY),
        );
        assert_eq!(results.total, 17);
        assert!(results.all_passed(), "{:?}", results.violations());
    }

    #[test]
    fn test_inventory_only_needs_json() {
        let results = ContractVerifier::new().run(
            book().contract(Operation::GetInventory),
            &ok_response(r#"{"sold":4,"avaiable":1,"pending":2}"#),
        );
        assert_eq!(results.total, 10);
        assert!(results.all_passed());
    }

    #[test]
    fn test_inventory_rejects_null_body() {
        let results = ContractVerifier::new().run(
            book().contract(Operation::GetInventory),
            &ok_response("null"),
        );
        assert_eq!(failed_checks(&results), vec![Check::JsonBody]);
    }

    #[test]
    fn test_status_mismatch() {
        let results = ContractVerifier::new().run(
            book().contract(Operation::GetOrderById),
            &response(404, "Not Found", petstore_response_headers(), ORDER_BODY),
        );
        assert_eq!(
            failed_checks(&results),
            vec![
                Check::StatusCode { expected: 200 },
                Check::StatusText {
                    expected: "OK".to_string()
                },
            ]
        );
        assert_eq!(
            results.violations()[0],
            "GetOrderById: Expected status 200, got 404"
        );
    }

    #[test]
    fn test_missing_header() {
        let headers = Headers::new()
            .with("Content-Type", "application/json")
            .with("Server", "Jetty(9.2.9.v20150224)");
        let results = ContractVerifier::new().run(
            book().contract(Operation::GetInventory),
            &response(200, "OK", headers, "{}"),
        );
        assert_eq!(results.failed, 5);
        assert!(
            results
                .violations()
                .contains(&"GetInventory: Header 'Transfer-Encoding' not found".to_string())
        );
    }

    #[test]
    fn test_header_values_are_exact() {
        let headers = petstore_response_headers().with("Content-Type", "application/json");
        let results = ContractVerifier::new().run(
            book().contract(Operation::GetInventory),
            &response(200, "OK", headers, "{}"),
        );
        let failure = results.failures().next().unwrap();
        assert_eq!(
            failure.error.as_deref(),
            Some(
                "Header 'Content-Type' mismatch: expected [application/json], got [application/json, application/json]"
            )
        );
        assert_eq!(results.failed, 1);
    }

    #[test]
    fn test_header_value_is_case_sensitive() {
        let contract = book()
            .with_headers(&[ExpectedHeader::single("Connection", "keep-alive")])
            .contract(Operation::GetInventory)
            .clone();
        let headers = Headers::new().with("connection", "Keep-Alive");
        let results = ContractVerifier::new().run(&contract, &response(200, "OK", headers, "{}"));
        assert_eq!(results.failed, 1);
        assert_eq!(results.failures().next().unwrap().actual.as_deref(), Some("[Keep-Alive]"));
    }

    #[test]
    fn test_extra_field_fails_cardinality() {
        let body = r#"{"id":5,"petId":15,"quantity":35,"shipDate":"2022-10-05T01:22:06.626+0000","status":"avaiable","complete":true,"note":"x"}"#;
        let results = ContractVerifier::new().run(
            book().contract(Operation::PlaceOrder),
            &ok_response(body),
        );
        assert_eq!(failed_checks(&results), vec![Check::FieldCount { expected: 6 }]);
    }

    #[test]
    fn test_null_and_missing_fields() {
        let body = r#"{"id":5,"petId":null,"quantity":35,"shipDate":"2022-10-05T01:22:06.626+0000","status":"avaiable"}"#;
        let results = ContractVerifier::new().run(
            book().contract(Operation::GetOrderById),
            &ok_response(body),
        );
        assert_eq!(
            failed_checks(&results),
            vec![
                Check::FieldPresent {
                    field: "petId".to_string()
                },
                Check::FieldPresent {
                    field: "complete".to_string()
                },
                Check::FieldCount { expected: 6 },
            ]
        );
    }

    #[test]
    fn test_numbers_as_strings_fail() {
        let body = r#"{"id":"5","petId":15,"quantity":35,"shipDate":"2022-10-05T01:22:06.626+0000","status":"avaiable","complete":"true"}"#;
        let results = ContractVerifier::new().run(
            book().contract(Operation::GetOrderById),
            &ok_response(body),
        );
        assert_eq!(
            failed_checks(&results),
            vec![
                Check::FieldValue {
                    field: "id".to_string(),
                    expected: ExpectedValue::Integer(5),
                },
                Check::FieldValue {
                    field: "complete".to_string(),
                    expected: ExpectedValue::Boolean(true),
                },
            ]
        );
        assert_eq!(
            results.violations()[0],
            "GetOrderById: Field 'id' mismatch: expected 5, got \"5\""
        );
    }

    #[test]
    fn test_unnormalized_ship_date_fails() {
        let body = r#"{"id":5,"petId":15,"quantity":35,"shipDate":"2022-10-05T01:22:06.626Z","status":"avaiable","complete":true}"#;
        let results = ContractVerifier::new().run(
            book().contract(Operation::PlaceOrder),
            &ok_response(body),
        );
        assert_eq!(results.failed, 1);
        assert_eq!(
            results.failures().next().unwrap().actual.as_deref(),
            Some("\"2022-10-05T01:22:06.626Z\"")
        );
    }

    #[test]
    fn test_corrected_status_spelling_fails() {
        let body = r#"{"id":5,"petId":15,"quantity":35,"shipDate":"2022-10-05T01:22:06.626+0000","status":"available","complete":true}"#;
        let results = ContractVerifier::new().run(
            book().contract(Operation::PlaceOrder),
            &ok_response(body),
        );
        assert_eq!(
            failed_checks(&results),
            vec![Check::FieldValue {
                field: "status".to_string(),
                expected: ExpectedValue::Text("avaiable".to_string()),
            }]
        );
    }

    #[test]
    fn test_integral_float_satisfies_integer_field() {
        let body = r#"{"code":200.0,"type":"unknown","message":"5"}"#;
        let results = ContractVerifier::new().run(
            &book().contract(Operation::DeleteOrderById).for_order(5),
            &ok_response(body),
        );
        assert!(results.all_passed(), "{:?}", results.violations());

        let body = r#"{"code":200.5,"type":"unknown","message":"5"}"#;
        let results = ContractVerifier::new().run(
            &book().contract(Operation::DeleteOrderById).for_order(5),
            &ok_response(body),
        );
        assert_eq!(
            failed_checks(&results),
            vec![Check::FieldValue {
                field: "code".to_string(),
                expected: ExpectedValue::Integer(200),
            }]
        );
    }

    #[test]
    fn test_delete_message_must_name_addressed_order() {
        let results = ContractVerifier::new().run(
            &book().contract(Operation::DeleteOrderById).for_order(77),
            &ok_response(DELETE_BODY),
        );
        assert_eq!(
            failed_checks(&results),
            vec![Check::FieldValue {
                field: "message".to_string(),
                expected: ExpectedValue::Text("77".to_string()),
            }]
        );
    }

    #[test]
    fn test_invalid_json_skips_field_checks() {
        let results = ContractVerifier::new().run(
            &book().contract(Operation::DeleteOrderById).for_order(5),
            &ok_response("<html>oops</html>"),
        );
        // status (2) + headers (7) + json (1); no field checks
        assert_eq!(results.total, 10);
        assert_eq!(failed_checks(&results), vec![Check::JsonBody]);
    }

    #[test]
    fn test_array_body_fails_object_contract() {
        let results = ContractVerifier::new().run(
            &book().contract(Operation::DeleteOrderById).for_order(5),
            &ok_response("[1,2,3]"),
        );
        let failures = failed_checks(&results);
        assert_eq!(failures.len(), 4);
        assert_eq!(failures[3], Check::FieldCount { expected: 3 });
    }
}
