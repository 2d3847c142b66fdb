//! Operation registry.
//!
//! Every operation the bridge exposes is described by a static
//! [`Descriptor`]: its name, family, parameter schema, result shape, map
//! mode, and the native call it is bound to. The arity of that call is part
//! of its type ([`NativeCall::Call0`] .. [`NativeCall::Call5`]), and
//! [`Registry::build`] refuses any descriptor whose schema length differs.
//!
//! The builtin tables live in `handlers`; [`Registry::global`] builds them
//! once per process.

use std::collections::HashMap;

use kvbridge_client::{Client, Reply as ClientReply};
use kvbridge_core::{MapMode, OutputKind, Param, Status};
use once_cell::sync::OnceCell;
use serde::{Deserialize, Serialize};

use crate::handlers;
use crate::marshal::Native;
use crate::{Error, Result};

// =============================================================================
// Native calls
// =============================================================================

/// Status and outputs of one native call.
///
/// Outputs are only present when the status is ok.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NativeReply {
    /// Client status
    pub status: Status,
    /// Outputs in result-shape order
    pub outputs: Vec<Native>,
}

impl NativeReply {
    /// Build from a client reply, converting the value only on success.
    pub fn new<T>(reply: ClientReply<T>, outputs: impl FnOnce(T) -> Vec<Native>) -> Self {
        let ClientReply { status, value } = reply;
        if status.is_ok() {
            Self {
                status,
                outputs: outputs(value),
            }
        } else {
            Self {
                status,
                outputs: Vec::new(),
            }
        }
    }

    /// Reply with no data.
    pub fn unit(reply: ClientReply<()>) -> Self {
        Self::new(reply, |()| Vec::new())
    }

    /// Reply with no data, ignoring the value of a successful call.
    pub fn discard<T>(reply: ClientReply<T>) -> Self {
        Self::new(reply, |_| Vec::new())
    }

    /// Reply with one string.
    pub fn str(reply: ClientReply<String>) -> Self {
        Self::new(reply, |s| vec![Native::Str(s)])
    }

    /// Reply with one integer.
    pub fn int(reply: ClientReply<i64>) -> Self {
        Self::new(reply, |n| vec![Native::Int(n)])
    }

    /// Reply with one sequence.
    pub fn strings(reply: ClientReply<Vec<String>>) -> Self {
        Self::new(reply, |v| vec![Native::Strings(v)])
    }

    /// Reply with one flat key/value sequence.
    pub fn pairs(reply: ClientReply<Vec<String>>) -> Self {
        Self::new(reply, |v| vec![Native::Pairs(v)])
    }
}

/// Native call taking no arguments.
pub type Call0 = fn(&mut dyn Client) -> Result<NativeReply>;
/// Native call taking one argument.
pub type Call1 = fn(&mut dyn Client, Native) -> Result<NativeReply>;
/// Native call taking two arguments.
pub type Call2 = fn(&mut dyn Client, Native, Native) -> Result<NativeReply>;
/// Native call taking three arguments.
pub type Call3 = fn(&mut dyn Client, Native, Native, Native) -> Result<NativeReply>;
/// Native call taking four arguments.
pub type Call4 = fn(&mut dyn Client, Native, Native, Native, Native) -> Result<NativeReply>;
/// Native call taking five arguments.
pub type Call5 = fn(&mut dyn Client, Native, Native, Native, Native, Native) -> Result<NativeReply>;

/// A native call bound to a descriptor. The variant fixes the arity.
#[derive(Debug, Clone, Copy)]
pub enum NativeCall {
    /// No arguments
    Call0(Call0),
    /// One argument
    Call1(Call1),
    /// Two arguments
    Call2(Call2),
    /// Three arguments
    Call3(Call3),
    /// Four arguments
    Call4(Call4),
    /// Five arguments
    Call5(Call5),
}

impl NativeCall {
    /// Number of native arguments.
    pub fn arity(&self) -> usize {
        match self {
            NativeCall::Call0(_) => 0,
            NativeCall::Call1(_) => 1,
            NativeCall::Call2(_) => 2,
            NativeCall::Call3(_) => 3,
            NativeCall::Call4(_) => 4,
            NativeCall::Call5(_) => 5,
        }
    }

    /// Invoke with exactly [`arity`](Self::arity) arguments.
    pub fn invoke(&self, client: &mut dyn Client, args: Vec<Native>) -> Result<NativeReply> {
        if args.len() != self.arity() {
            return Err(Error::Internal {
                reason: format!(
                    "native call takes {} arguments, got {}",
                    self.arity(),
                    args.len()
                ),
            });
        }
        let mut args = args.into_iter();
        let mut next = move || args.next().unwrap_or(Native::Absent);
        match *self {
            NativeCall::Call0(f) => f(client),
            NativeCall::Call1(f) => f(client, next()),
            NativeCall::Call2(f) => f(client, next(), next()),
            NativeCall::Call3(f) => f(client, next(), next(), next()),
            NativeCall::Call4(f) => f(client, next(), next(), next(), next()),
            NativeCall::Call5(f) => f(client, next(), next(), next(), next(), next()),
        }
    }
}

// =============================================================================
// Descriptors
// =============================================================================

/// Operation family.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Family {
    /// Scalar key-value
    Kv,
    /// Hash maps
    Hash,
    /// Queues
    Queue,
    /// Sorted sets
    Zset,
}

impl Family {
    /// Lowercase family name.
    pub fn name(&self) -> &'static str {
        match self {
            Family::Kv => "kv",
            Family::Hash => "hash",
            Family::Queue => "queue",
            Family::Zset => "zset",
        }
    }
}

/// Static description of one operation.
#[derive(Debug, Clone, Copy)]
pub struct Descriptor {
    /// Name the host calls it by
    pub name: &'static str,
    /// Family it belongs to
    pub family: Family,
    /// Ordered parameter schema
    pub params: &'static [Param],
    /// Kinds of the values returned on success
    pub outputs: &'static [OutputKind],
    /// How map values are marshaled
    pub map_mode: MapMode,
    /// Bound native call
    pub call: NativeCall,
}

impl Descriptor {
    /// Descriptor with string map mode.
    pub const fn new(
        name: &'static str,
        family: Family,
        params: &'static [Param],
        outputs: &'static [OutputKind],
        call: NativeCall,
    ) -> Self {
        Self {
            name,
            family,
            params,
            outputs,
            map_mode: MapMode::Strings,
            call,
        }
    }

    /// Same descriptor with integer map values.
    pub const fn integers(self) -> Self {
        Self {
            map_mode: MapMode::Integers,
            ..self
        }
    }

    /// Number of required parameters.
    pub fn min_arity(&self) -> usize {
        self.params.iter().filter(|p| p.required).count()
    }

    /// Number of parameters.
    pub fn max_arity(&self) -> usize {
        self.params.len()
    }

    /// One-line signature, e.g. `qpop(name: string, [count: integer]) -> string or list`.
    pub fn signature(&self) -> String {
        let params: Vec<String> = self
            .params
            .iter()
            .map(|p| {
                if p.required {
                    format!("{}: {}", p.name, p.kind.name())
                } else {
                    format!("[{}: {}]", p.name, p.kind.name())
                }
            })
            .collect();
        let outputs: Vec<&str> = self.outputs.iter().map(|o| o.name()).collect();
        let result = if outputs.is_empty() {
            "()".to_string()
        } else {
            outputs.join(", ")
        };
        format!("{}({}) -> {}", self.name, params.join(", "), result)
    }
}

// =============================================================================
// Registry
// =============================================================================

/// Operation table construction failure.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, thiserror::Error)]
pub enum RegistryError {
    /// Two descriptors share a name
    #[error("duplicate operation name: {name}")]
    DuplicateName {
        /// The repeated name
        name: String,
    },

    /// Schema length differs from the bound call's arity
    #[error("operation {name}: {params} parameters but native call takes {arity}")]
    ArityMismatch {
        /// Operation name
        name: String,
        /// Number of schema slots
        params: usize,
        /// Arity of the bound native call
        arity: usize,
    },

    /// A required parameter follows an optional one
    #[error("operation {name}: required parameter after optional one")]
    OptionalBeforeRequired {
        /// Operation name
        name: String,
    },
}

/// Name-indexed set of operation descriptors.
#[derive(Debug)]
pub struct Registry {
    by_name: HashMap<&'static str, Descriptor>,
    order: Vec<&'static str>,
}

static GLOBAL: OnceCell<std::result::Result<Registry, RegistryError>> = OnceCell::new();

impl Registry {
    /// Build from family tables.
    ///
    /// Names must be unique across all tables, since lookup is by bare name.
    pub fn build(tables: &[&[Descriptor]]) -> std::result::Result<Self, RegistryError> {
        let mut by_name = HashMap::new();
        for descriptor in tables.iter().flat_map(|t| t.iter()) {
            validate(descriptor)?;
            if by_name.insert(descriptor.name, *descriptor).is_some() {
                return Err(RegistryError::DuplicateName {
                    name: descriptor.name.to_string(),
                });
            }
        }
        let mut order: Vec<&'static str> = by_name.keys().copied().collect();
        order.sort_by_key(|name| (by_name[name].family, *name));
        Ok(Self { by_name, order })
    }

    /// The builtin operation tables, built once.
    ///
    /// A construction failure is returned on every call.
    pub fn global() -> std::result::Result<&'static Registry, RegistryError> {
        GLOBAL
            .get_or_init(|| Registry::build(handlers::TABLES))
            .as_ref()
            .map_err(Clone::clone)
    }

    /// Look up an operation.
    pub fn get(&self, name: &str) -> Option<&Descriptor> {
        self.by_name.get(name)
    }

    /// Operation names, by family then name.
    pub fn names(&self) -> &[&'static str] {
        &self.order
    }

    /// Descriptors, by family then name.
    pub fn iter(&self) -> impl Iterator<Item = &Descriptor> {
        self.order.iter().filter_map(|name| self.by_name.get(name))
    }

    /// Number of operations.
    pub fn len(&self) -> usize {
        self.by_name.len()
    }

    /// Whether the registry is empty.
    pub fn is_empty(&self) -> bool {
        self.by_name.is_empty()
    }
}

fn validate(descriptor: &Descriptor) -> std::result::Result<(), RegistryError> {
    if descriptor.params.len() != descriptor.call.arity() {
        return Err(RegistryError::ArityMismatch {
            name: descriptor.name.to_string(),
            params: descriptor.params.len(),
            arity: descriptor.call.arity(),
        });
    }
    let mut seen_optional = false;
    for param in descriptor.params {
        if param.required && seen_optional {
            return Err(RegistryError::OptionalBeforeRequired {
                name: descriptor.name.to_string(),
            });
        }
        seen_optional |= !param.required;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use kvbridge_client::{Script, ScriptedClient};
    use kvbridge_core::ParamKind;

    fn nothing(_: &mut dyn Client) -> Result<NativeReply> {
        Ok(NativeReply {
            status: Status::ok(),
            outputs: Vec::new(),
        })
    }

    fn one(_: &mut dyn Client, _: Native) -> Result<NativeReply> {
        Ok(NativeReply {
            status: Status::ok(),
            outputs: Vec::new(),
        })
    }

    const KEY: Param = Param::required("key", ParamKind::Str);
    const COUNT: Param = Param::optional("count", ParamKind::Int);

    #[test]
    fn test_builtin_tables_build() {
        let registry = Registry::global().unwrap();
        assert!(registry.len() > 40);
        assert!(registry.get("get").is_some());
        assert!(registry.get("zkeys").is_some());
        assert!(registry.get("nope").is_none());
    }

    #[test]
    fn test_global_is_shared() {
        let a = Registry::global().unwrap() as *const Registry;
        let b = Registry::global().unwrap() as *const Registry;
        assert_eq!(a, b);
    }

    #[test]
    fn test_builtin_schemas_match_arity() {
        for descriptor in Registry::global().unwrap().iter() {
            assert_eq!(
                descriptor.params.len(),
                descriptor.call.arity(),
                "{}",
                descriptor.name
            );
        }
    }

    #[test]
    fn test_names_sorted_by_family() {
        let registry = Registry::global().unwrap();
        let families: Vec<Family> = registry.iter().map(|d| d.family).collect();
        let mut sorted = families.clone();
        sorted.sort();
        assert_eq!(families, sorted);
        assert_eq!(registry.names()[0], "dbsize");
    }

    #[test]
    fn test_duplicate_within_family_rejected() {
        let table = [
            Descriptor::new("get", Family::Kv, &[], &[], NativeCall::Call0(nothing)),
            Descriptor::new("get", Family::Kv, &[], &[], NativeCall::Call0(nothing)),
        ];
        let err = Registry::build(&[&table]).unwrap_err();
        assert_eq!(err, RegistryError::DuplicateName { name: "get".into() });
    }

    #[test]
    fn test_duplicate_across_families_rejected() {
        let kv = [Descriptor::new("keys", Family::Kv, &[], &[], NativeCall::Call0(nothing))];
        let zset = [Descriptor::new("keys", Family::Zset, &[], &[], NativeCall::Call0(nothing))];
        assert!(matches!(
            Registry::build(&[&kv, &zset]),
            Err(RegistryError::DuplicateName { .. })
        ));
    }

    #[test]
    fn test_arity_mismatch_rejected() {
        let table = [Descriptor::new("get", Family::Kv, &[KEY, KEY], &[], NativeCall::Call1(one))];
        let err = Registry::build(&[&table]).unwrap_err();
        assert_eq!(
            err,
            RegistryError::ArityMismatch {
                name: "get".into(),
                params: 2,
                arity: 1
            }
        );
    }

    #[test]
    fn test_required_after_optional_rejected() {
        fn two(_: &mut dyn Client, _: Native, _: Native) -> Result<NativeReply> {
            unreachable!()
        }
        let table = [Descriptor::new("bad", Family::Queue, &[COUNT, KEY], &[], NativeCall::Call2(two))];
        assert!(matches!(
            Registry::build(&[&table]),
            Err(RegistryError::OptionalBeforeRequired { .. })
        ));
    }

    #[test]
    fn test_invoke_checks_argument_count() {
        let mut client = ScriptedClient::new(Script::ok());
        let call = NativeCall::Call1(one);
        assert!(call.invoke(&mut client, vec![]).is_err());
        assert!(call.invoke(&mut client, vec![Native::Int(1)]).is_ok());
    }

    #[test]
    fn test_signature() {
        let registry = Registry::global().unwrap();
        assert_eq!(
            registry.get("qpop").unwrap().signature(),
            "qpop(name: string, [count: integer]) -> string or list"
        );
        assert_eq!(
            registry.get("set").unwrap().signature(),
            "set(key: string, value: string) -> ()"
        );
    }

    #[test]
    fn test_native_reply_drops_outputs_on_failure() {
        let reply = NativeReply::str(ClientReply::fail(Status::not_found()));
        assert!(reply.outputs.is_empty());
        let reply = NativeReply::str(ClientReply::ok("v".to_string()));
        assert_eq!(reply.outputs, vec![Native::Str("v".into())]);
    }
}
