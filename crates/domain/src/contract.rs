//! Expected wire contracts of the order API.
//!
//! Contracts are plain data. The verifier receives one by reference and
//! never knows whether it came from [`ContractBook::petstore`] or from a
//! contract file pointed at another deployment.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::{DomainError, DomainResult};
use crate::fixture::OrderFixture;
use crate::operation::Operation;

/// Expected value list of one response header.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExpectedHeader {
    /// Header name, matched case-insensitively.
    pub name: String,
    /// Exact values in received order.
    pub values: Vec<String>,
}

impl ExpectedHeader {
    /// Creates a single-valued header expectation.
    #[must_use]
    pub fn single(name: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            values: vec![value.into()],
        }
    }
}

/// Expected value of one body field.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", content = "value", rename_all = "snake_case")]
pub enum ExpectedValue {
    /// Any non-null value.
    Present,
    /// A JSON number equal to this integer.
    Integer(i64),
    /// A JSON boolean.
    Boolean(bool),
    /// A JSON string, compared exactly.
    Text(String),
    /// The id of the addressed order, as a JSON string.
    ///
    /// Bound to a concrete id with [`ExpectedContract::for_order`]; an
    /// unbound placeholder never matches.
    OrderId,
}

impl ExpectedValue {
    /// Returns true if `actual` satisfies this expectation.
    ///
    /// Numbers only match numbers and booleans only match booleans; a string
    /// `"5"` does not satisfy `Integer(5)`. An integral float such as `5.0`
    /// satisfies `Integer(5)`, a fractional one such as `5.5` does not.
    #[must_use]
    pub fn matches(&self, actual: &Value) -> bool {
        match self {
            Self::Present => !actual.is_null(),
            Self::Integer(expected) => match actual.as_i64() {
                Some(n) => n == *expected,
                None => actual
                    .as_f64()
                    .is_some_and(|f| integral_float_equals(f, *expected)),
            },
            Self::Boolean(expected) => actual.as_bool() == Some(*expected),
            Self::Text(expected) => actual.as_str() == Some(expected.as_str()),
            Self::OrderId => false,
        }
    }

    /// Returns true if a literal value is asserted, not just presence.
    #[must_use]
    pub const fn is_literal(&self) -> bool {
        !matches!(self, Self::Present)
    }

    /// Human-readable rendering used in failure messages.
    #[must_use]
    pub fn describe(&self) -> String {
        match self {
            Self::Present => "<non-null>".to_string(),
            Self::Integer(n) => n.to_string(),
            Self::Boolean(b) => b.to_string(),
            Self::Text(s) => format!("\"{s}\""),
            Self::OrderId => "<order id>".to_string(),
        }
    }

    fn bind_order_id(&self, order_id: i64) -> Self {
        match self {
            Self::OrderId => Self::Text(order_id.to_string()),
            other => other.clone(),
        }
    }
}

fn integral_float_equals(actual: f64, expected: i64) -> bool {
    i32::try_from(expected).is_ok_and(|e| (actual - f64::from(e)).abs() < f64::EPSILON)
}

/// Expectation on one top-level body field.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldExpectation {
    /// Field name.
    pub name: String,
    /// Expected value.
    pub expected: ExpectedValue,
}

impl FieldExpectation {
    /// Creates a field expectation.
    #[must_use]
    pub fn new(name: impl Into<String>, expected: ExpectedValue) -> Self {
        Self {
            name: name.into(),
            expected,
        }
    }
}

/// Expected shape of the response body.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum BodyExpectation {
    /// Any parseable, non-null JSON document.
    AnyJson,
    /// A JSON object with exactly these top-level fields.
    Object {
        /// The complete field set.
        fields: Vec<FieldExpectation>,
    },
}

impl BodyExpectation {
    /// Returns the exact number of top-level keys, if constrained.
    #[must_use]
    #[allow(clippy::missing_const_for_fn)] // Vec::len is not const in stable
    pub fn field_count(&self) -> Option<usize> {
        match self {
            Self::AnyJson => None,
            Self::Object { fields } => Some(fields.len()),
        }
    }
}

/// Expected wire contract of one operation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExpectedContract {
    /// Operation the contract belongs to.
    pub operation: Operation,
    /// Expected status code.
    pub status: u16,
    /// Expected status reason text.
    pub status_text: String,
    /// Expected response headers.
    #[serde(default)]
    pub headers: Vec<ExpectedHeader>,
    /// Expected body shape.
    pub body: BodyExpectation,
}

impl ExpectedContract {
    /// Returns this contract with every [`ExpectedValue::OrderId`] bound
    /// to `order_id`.
    #[must_use]
    pub fn for_order(&self, order_id: i64) -> Self {
        let body = match &self.body {
            BodyExpectation::AnyJson => BodyExpectation::AnyJson,
            BodyExpectation::Object { fields } => BodyExpectation::Object {
                fields: fields
                    .iter()
                    .map(|f| {
                        FieldExpectation::new(f.name.clone(), f.expected.bind_order_id(order_id))
                    })
                    .collect(),
            },
        };
        Self {
            body,
            ..self.clone()
        }
    }
}

/// The contracts of all four operations, looked up by operation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "ContractSlots", into = "ContractSlots")]
pub struct ContractBook {
    place_order: ExpectedContract,
    get_order_by_id: ExpectedContract,
    delete_order_by_id: ExpectedContract,
    get_inventory: ExpectedContract,
}

/// Serialized form of [`ContractBook`], validated on the way in.
#[derive(Serialize, Deserialize)]
struct ContractSlots {
    place_order: ExpectedContract,
    get_order_by_id: ExpectedContract,
    delete_order_by_id: ExpectedContract,
    get_inventory: ExpectedContract,
}

impl TryFrom<ContractSlots> for ContractBook {
    type Error = DomainError;

    fn try_from(slots: ContractSlots) -> DomainResult<Self> {
        let book = Self {
            place_order: slots.place_order,
            get_order_by_id: slots.get_order_by_id,
            delete_order_by_id: slots.delete_order_by_id,
            get_inventory: slots.get_inventory,
        };
        for operation in Operation::all() {
            let found = book.contract(*operation).operation;
            if found != *operation {
                return Err(DomainError::MisplacedContract {
                    slot: operation.to_string(),
                    found: found.to_string(),
                });
            }
        }
        Ok(book)
    }
}

impl From<ContractBook> for ContractSlots {
    fn from(book: ContractBook) -> Self {
        Self {
            place_order: book.place_order,
            get_order_by_id: book.get_order_by_id,
            delete_order_by_id: book.delete_order_by_id,
            get_inventory: book.get_inventory,
        }
    }
}

impl ContractBook {
    /// Builds the contracts of the public petstore deployment for `fixture`.
    ///
    /// # Errors
    ///
    /// Returns an error if the fixture ship date cannot be normalized.
    pub fn petstore(fixture: &OrderFixture) -> DomainResult<Self> {
        let order_fields = order_fields(fixture)?;

        Ok(Self {
            place_order: ok_contract(
                Operation::PlaceOrder,
                BodyExpectation::Object {
                    fields: order_fields.clone(),
                },
            ),
            get_order_by_id: ok_contract(
                Operation::GetOrderById,
                BodyExpectation::Object {
                    fields: order_fields,
                },
            ),
            delete_order_by_id: ok_contract(
                Operation::DeleteOrderById,
                BodyExpectation::Object {
                    fields: vec![
                        FieldExpectation::new("code", ExpectedValue::Integer(200)),
                        FieldExpectation::new("type", ExpectedValue::Text("unknown".to_string())),
                        FieldExpectation::new("message", ExpectedValue::OrderId),
                    ],
                },
            ),
            get_inventory: ok_contract(Operation::GetInventory, BodyExpectation::AnyJson),
        })
    }

    /// Returns the contract of `operation`.
    #[must_use]
    pub const fn contract(&self, operation: Operation) -> &ExpectedContract {
        match operation {
            Operation::PlaceOrder => &self.place_order,
            Operation::GetOrderById => &self.get_order_by_id,
            Operation::DeleteOrderById => &self.delete_order_by_id,
            Operation::GetInventory => &self.get_inventory,
        }
    }

    /// Replaces the header expectations of every contract.
    #[must_use]
    pub fn with_headers(mut self, headers: &[ExpectedHeader]) -> Self {
        for contract in [
            &mut self.place_order,
            &mut self.get_order_by_id,
            &mut self.delete_order_by_id,
            &mut self.get_inventory,
        ] {
            contract.headers = headers.to_vec();
        }
        self
    }
}

/// Headers the petstore deployment returns on every operation.
#[must_use]
pub fn petstore_headers() -> Vec<ExpectedHeader> {
    vec![
        ExpectedHeader::single("Content-Type", "application/json"),
        ExpectedHeader::single("Transfer-Encoding", "chunked"),
        ExpectedHeader::single("Connection", "keep-alive"),
        ExpectedHeader::single("Access-Control-Allow-Origin", "*"),
        ExpectedHeader::single("Access-Control-Allow-Methods", "GET, POST, DELETE, PUT"),
        ExpectedHeader::single(
            "Access-Control-Allow-Headers",
            "Content-Type, api_key, Authorization",
        ),
        ExpectedHeader::single("Server", "Jetty(9.2.9.v20150224)"),
    ]
}

fn ok_contract(operation: Operation, body: BodyExpectation) -> ExpectedContract {
    ExpectedContract {
        operation,
        status: 200,
        status_text: "OK".to_string(),
        headers: petstore_headers(),
        body,
    }
}

fn order_fields(fixture: &OrderFixture) -> DomainResult<Vec<FieldExpectation>> {
    Ok(vec![
        FieldExpectation::new("id", ExpectedValue::Integer(fixture.id)),
        FieldExpectation::new("petId", ExpectedValue::Integer(fixture.pet_id)),
        FieldExpectation::new("quantity", ExpectedValue::Integer(fixture.quantity)),
        FieldExpectation::new("shipDate", ExpectedValue::Text(fixture.server_ship_date()?)),
        FieldExpectation::new("status", ExpectedValue::Text(fixture.status.clone())),
        FieldExpectation::new("complete", ExpectedValue::Boolean(fixture.complete)),
    ])
}
