//! Queue operations.
//!
//! `qpop` returns a single string when `count` is omitted and a list when it
//! is given, so its result shape is [`OutputKind::Strings`].

use kvbridge_client::Client;
use kvbridge_core::{OutputKind, Param, ParamKind};

use crate::marshal::Native;
use crate::registry::{Descriptor, Family, NativeCall, NativeReply};
use crate::Result;

const NAME: Param = Param::required("name", ParamKind::Str);
const ITEM: Param = Param::required("item", ParamKind::Strings);
const COUNT: Param = Param::optional("count", ParamKind::Int);
const BEGIN: Param = Param::required("begin", ParamKind::Int);
const END: Param = Param::required("end", ParamKind::Int);

/// Queue descriptors.
pub const OPERATIONS: &[Descriptor] = &[
    Descriptor::new(
        "qpush",
        Family::Queue,
        &[NAME, ITEM],
        &[OutputKind::Int],
        NativeCall::Call2(qpush),
    ),
    Descriptor::new(
        "qpop",
        Family::Queue,
        &[NAME, COUNT],
        &[OutputKind::Strings],
        NativeCall::Call2(qpop),
    ),
    Descriptor::new("qclear", Family::Queue, &[NAME], &[], NativeCall::Call1(qclear)),
    Descriptor::new(
        "qslice",
        Family::Queue,
        &[NAME, BEGIN, END],
        &[OutputKind::List],
        NativeCall::Call3(qslice),
    ),
];

fn qpush(c: &mut dyn Client, name: Native, items: Native) -> Result<NativeReply> {
    Ok(NativeReply::int(
        c.qpush(&name.into_str()?, &items.into_strings()?),
    ))
}

fn qpop(c: &mut dyn Client, name: Native, count: Native) -> Result<NativeReply> {
    let name = name.into_str()?;
    if count.is_absent() {
        Ok(NativeReply::str(c.qpop(&name)))
    } else {
        Ok(NativeReply::strings(c.qpop_many(&name, count.into_int()?)))
    }
}

fn qclear(c: &mut dyn Client, name: Native) -> Result<NativeReply> {
    Ok(NativeReply::discard(c.qclear(&name.into_str()?)))
}

fn qslice(c: &mut dyn Client, name: Native, begin: Native, end: Native) -> Result<NativeReply> {
    Ok(NativeReply::strings(c.qslice(
        &name.into_str()?,
        begin.into_int()?,
        end.into_int()?,
    )))
}
