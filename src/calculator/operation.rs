//! Supported calculator operations and how each one is served.

use crate::calculator::local::{self, Value};
use crate::error::ServiceError;

/// A local operation: takes the operand segments, produces a value.
pub type LocalHandler = fn(&[&str]) -> Result<Value, ServiceError>;

/// An operation the calculator knows by name.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operation {
    Add,
    Mul,
    Sub,
    Div,
}

/// Where an operation is computed.
#[derive(Debug, Clone, Copy)]
pub enum Route {
    /// Forwarded to the upstream v2 service.
    Upstream,
    /// Computed in-process by the given handler.
    Local(LocalHandler),
}

/// Name → operation table. Names are matched exactly (case-sensitive).
const OPERATIONS: [(&str, Operation); 4] = [
    ("add", Operation::Add),
    ("mul", Operation::Mul),
    ("sub", Operation::Sub),
    ("div", Operation::Div),
];

impl Operation {
    /// Resolve an operation name, `None` for anything unsupported.
    pub fn lookup(name: &str) -> Option<Self> {
        OPERATIONS
            .iter()
            .find(|(candidate, _)| *candidate == name)
            .map(|(_, op)| *op)
    }

    /// Name used in paths, logs and metric labels.
    pub fn name(self) -> &'static str {
        match self {
            Operation::Add => "add",
            Operation::Mul => "mul",
            Operation::Sub => "sub",
            Operation::Div => "div",
        }
    }

    pub fn route(self) -> Route {
        match self {
            Operation::Add | Operation::Mul => Route::Upstream,
            Operation::Sub => Route::Local(local::subtract),
            Operation::Div => Route::Local(local::divide),
        }
    }
}
