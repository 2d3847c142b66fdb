//! Command dispatcher.
//!
//! One dispatch runs:
//!
//! ```text
//! handle check → lookup → validate → marshal in → native call
//!              → translate status → marshal out
//! ```
//!
//! and yields exactly one of: a success reply, a failure reply, or a caller
//! [`Error`]. Store failures are replies, not errors.

use kvbridge_core::Value;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::handles::{Handle, HandleTable};
use crate::marshal::{from_native, to_native, Native};
use crate::registry::{Descriptor, Registry};
use crate::status::{translate, FailureKind, Translated};
use crate::{Error, Result};

/// Diagnostic code for calls on a dead handle.
pub const INVALID_HANDLE: &str = "invalid handle";

/// Diagnostic code for replies that do not match the operation's shape.
pub const MALFORMED_REPLY: &str = "malformed reply";

/// Outcome of one dispatch.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Reply {
    /// Success with the operation's data values
    Success(Vec<Value>),
    /// Failure with its class and diagnostic code
    Failure(FailureKind, String),
}

impl Reply {
    /// Whether the dispatch succeeded.
    pub fn is_success(&self) -> bool {
        matches!(self, Reply::Success(_))
    }

    /// Host calling convention: `[true, data...]` or `[false, kind, code]`.
    pub fn into_host(self) -> Vec<Value> {
        match self {
            Reply::Success(values) => {
                let mut out = Vec::with_capacity(values.len() + 1);
                out.push(Value::Bool(true));
                out.extend(values);
                out
            }
            Reply::Failure(kind, code) => vec![
                Value::Bool(false),
                Value::Str(kind.as_str().to_string()),
                Value::Str(code),
            ],
        }
    }
}

/// Runs operations from a registry against connections in a handle table.
#[derive(Debug, Clone, Copy)]
pub struct Dispatcher<'r> {
    registry: &'r Registry,
}

impl<'r> Dispatcher<'r> {
    /// Dispatcher over `registry`.
    pub fn new(registry: &'r Registry) -> Self {
        Self { registry }
    }

    /// Run `name` with `args` on the connection behind `handle`.
    pub fn dispatch(
        &self,
        table: &mut HandleTable,
        handle: Handle,
        name: &str,
        args: &[Value],
    ) -> Result<Reply> {
        debug!(target: "kvbridge::dispatch", %handle, op = name, args = args.len(), "Dispatch");

        let Some(client) = table.get_mut(handle) else {
            debug!(target: "kvbridge::dispatch", %handle, op = name, "Dead handle");
            return Ok(Reply::Failure(
                FailureKind::Connection,
                INVALID_HANDLE.to_string(),
            ));
        };

        let descriptor = self
            .registry
            .get(name)
            .ok_or_else(|| Error::UnknownOperation {
                name: name.to_string(),
            })?;

        validate(descriptor, args)?;
        let natives = marshal_args(descriptor, args)?;

        let native = descriptor.call.invoke(client, natives)?;
        let reply = match translate(native.status) {
            Translated::Success => marshal_outputs(descriptor, native.outputs),
            Translated::Failure(kind, code) => Reply::Failure(kind, code),
        };

        match &reply {
            Reply::Success(values) => {
                debug!(target: "kvbridge::dispatch", op = name, values = values.len(), "Success")
            }
            Reply::Failure(kind, code) => {
                debug!(target: "kvbridge::dispatch", op = name, %kind, code = code.as_str(), "Failure")
            }
        }
        Ok(reply)
    }
}

fn argument_error(descriptor: &Descriptor, slot: usize, reason: String) -> Error {
    Error::Argument {
        operation: descriptor.name.to_string(),
        slot,
        reason,
    }
}

fn validate(descriptor: &Descriptor, args: &[Value]) -> Result<()> {
    let min = descriptor.min_arity();
    let max = descriptor.max_arity();
    if args.len() < min {
        return Err(argument_error(
            descriptor,
            args.len() + 1,
            format!("expected at least {} arguments, got {}", min, args.len()),
        ));
    }
    if args.len() > max {
        return Err(argument_error(
            descriptor,
            max + 1,
            format!("expected at most {} arguments, got {}", max, args.len()),
        ));
    }
    for (i, (param, value)) in descriptor.params.iter().zip(args).enumerate() {
        if !param.required && value.is_nil() {
            continue;
        }
        if !param.kind.accepts(value) {
            return Err(argument_error(
                descriptor,
                i + 1,
                format!(
                    "{}: expected {}, got {}",
                    param.name,
                    param.kind.name(),
                    value.type_name()
                ),
            ));
        }
    }
    Ok(())
}

fn marshal_args(descriptor: &Descriptor, args: &[Value]) -> Result<Vec<Native>> {
    descriptor
        .params
        .iter()
        .enumerate()
        .map(|(i, param)| match args.get(i) {
            None => Ok(Native::Absent),
            Some(value) if !param.required && value.is_nil() => Ok(Native::Absent),
            Some(value) => to_native(value, param.kind, descriptor.map_mode)
                .map_err(|e| argument_error(descriptor, i + 1, format!("{}: {}", param.name, e))),
        })
        .collect()
}

fn marshal_outputs(descriptor: &Descriptor, outputs: Vec<Native>) -> Reply {
    if outputs.len() != descriptor.outputs.len() {
        debug!(
            target: "kvbridge::dispatch",
            op = descriptor.name,
            expected = descriptor.outputs.len(),
            got = outputs.len(),
            "Malformed reply"
        );
        return malformed();
    }
    let converted: std::result::Result<Vec<Value>, _> = outputs
        .into_iter()
        .zip(descriptor.outputs)
        .map(|(native, kind)| from_native(native, *kind, descriptor.map_mode))
        .collect();
    match converted {
        Ok(values) => Reply::Success(values),
        Err(e) => {
            debug!(target: "kvbridge::dispatch", op = descriptor.name, error = %e, "Malformed reply");
            malformed()
        }
    }
}

fn malformed() -> Reply {
    Reply::Failure(FailureKind::Unknown, MALFORMED_REPLY.to_string())
}
