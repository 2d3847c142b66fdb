//! Core types for kvbridge
//!
//! This crate defines the types shared by every layer of the bridge:
//! - Value: the closed set of host values
//! - ParamKind / Param / OutputKind / MapMode: operation schema vocabulary
//! - Status / StatusKind: outcome of one native client call

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod kind;
pub mod status;
pub mod value;

pub use kind::{MapMode, OutputKind, Param, ParamKind};
pub use status::{Status, StatusKind};
pub use value::Value;
