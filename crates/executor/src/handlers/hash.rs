//! Hash map operations.

use kvbridge_client::Client;
use kvbridge_core::{OutputKind, Param, ParamKind};

use crate::handlers::to_count;
use crate::marshal::Native;
use crate::registry::{Descriptor, Family, NativeCall, NativeReply};
use crate::Result;

const NAME: Param = Param::required("name", ParamKind::Str);
const KEY: Param = Param::required("key", ParamKind::Str);
const VALUE: Param = Param::required("value", ParamKind::Str);
const START: Param = Param::required("start", ParamKind::Str);
const END: Param = Param::required("end", ParamKind::Str);
const LIMIT: Param = Param::required("limit", ParamKind::Int);
const KEYS: Param = Param::required("keys", ParamKind::List);
const BY: Param = Param::required("by", ParamKind::Int);
const KVS: Param = Param::required("kvs", ParamKind::Map);

/// Hash map descriptors.
pub const OPERATIONS: &[Descriptor] = &[
    Descriptor::new("hget", Family::Hash, &[NAME, KEY], &[OutputKind::Str], NativeCall::Call2(hget)),
    Descriptor::new("hset", Family::Hash, &[NAME, KEY, VALUE], &[], NativeCall::Call3(hset)),
    Descriptor::new("hdel", Family::Hash, &[NAME, KEY], &[], NativeCall::Call2(hdel)),
    Descriptor::new(
        "hincr",
        Family::Hash,
        &[NAME, KEY, BY],
        &[OutputKind::Int],
        NativeCall::Call3(hincr),
    ),
    Descriptor::new("hsize", Family::Hash, &[NAME], &[OutputKind::Int], NativeCall::Call1(hsize)),
    Descriptor::new("hclear", Family::Hash, &[NAME], &[OutputKind::Int], NativeCall::Call1(hclear)),
    Descriptor::new(
        "hkeys",
        Family::Hash,
        &[NAME, START, END, LIMIT],
        &[OutputKind::List],
        NativeCall::Call4(hkeys),
    ),
    Descriptor::new("hgetall", Family::Hash, &[NAME], &[OutputKind::Map], NativeCall::Call1(hgetall)),
    Descriptor::new(
        "hscan",
        Family::Hash,
        &[NAME, START, END, LIMIT],
        &[OutputKind::Map],
        NativeCall::Call4(hscan),
    ),
    Descriptor::new(
        "hrscan",
        Family::Hash,
        &[NAME, START, END, LIMIT],
        &[OutputKind::Map],
        NativeCall::Call4(hrscan),
    ),
    Descriptor::new(
        "multi_hget",
        Family::Hash,
        &[NAME, KEYS],
        &[OutputKind::Map],
        NativeCall::Call2(multi_hget),
    ),
    Descriptor::new(
        "multi_hset",
        Family::Hash,
        &[NAME, KVS],
        &[],
        NativeCall::Call2(multi_hset),
    ),
    Descriptor::new("multi_hdel", Family::Hash, &[NAME, KEYS], &[], NativeCall::Call2(multi_hdel)),
];

fn hget(c: &mut dyn Client, name: Native, key: Native) -> Result<NativeReply> {
    Ok(NativeReply::str(c.hget(&name.into_str()?, &key.into_str()?)))
}

fn hset(c: &mut dyn Client, name: Native, key: Native, value: Native) -> Result<NativeReply> {
    Ok(NativeReply::unit(c.hset(
        &name.into_str()?,
        &key.into_str()?,
        &value.into_str()?,
    )))
}

fn hdel(c: &mut dyn Client, name: Native, key: Native) -> Result<NativeReply> {
    Ok(NativeReply::unit(c.hdel(&name.into_str()?, &key.into_str()?)))
}

fn hincr(c: &mut dyn Client, name: Native, key: Native, by: Native) -> Result<NativeReply> {
    Ok(NativeReply::int(c.hincr(
        &name.into_str()?,
        &key.into_str()?,
        by.into_int()?,
    )))
}

fn hsize(c: &mut dyn Client, name: Native) -> Result<NativeReply> {
    Ok(NativeReply::int(c.hsize(&name.into_str()?)))
}

fn hclear(c: &mut dyn Client, name: Native) -> Result<NativeReply> {
    Ok(NativeReply::int(c.hclear(&name.into_str()?)))
}

fn hkeys(c: &mut dyn Client, name: Native, start: Native, end: Native, limit: Native) -> Result<NativeReply> {
    Ok(NativeReply::strings(c.hkeys(
        &name.into_str()?,
        &start.into_str()?,
        &end.into_str()?,
        to_count(limit)?,
    )))
}

fn hgetall(c: &mut dyn Client, name: Native) -> Result<NativeReply> {
    Ok(NativeReply::pairs(c.hgetall(&name.into_str()?)))
}

fn hscan(c: &mut dyn Client, name: Native, start: Native, end: Native, limit: Native) -> Result<NativeReply> {
    Ok(NativeReply::pairs(c.hscan(
        &name.into_str()?,
        &start.into_str()?,
        &end.into_str()?,
        to_count(limit)?,
    )))
}

fn hrscan(c: &mut dyn Client, name: Native, start: Native, end: Native, limit: Native) -> Result<NativeReply> {
    Ok(NativeReply::pairs(c.hrscan(
        &name.into_str()?,
        &start.into_str()?,
        &end.into_str()?,
        to_count(limit)?,
    )))
}

fn multi_hget(c: &mut dyn Client, name: Native, keys: Native) -> Result<NativeReply> {
    Ok(NativeReply::pairs(
        c.multi_hget(&name.into_str()?, &keys.into_strings()?),
    ))
}

fn multi_hset(c: &mut dyn Client, name: Native, kvs: Native) -> Result<NativeReply> {
    Ok(NativeReply::unit(
        c.multi_hset(&name.into_str()?, &kvs.into_pairs()?),
    ))
}

fn multi_hdel(c: &mut dyn Client, name: Native, keys: Native) -> Result<NativeReply> {
    Ok(NativeReply::unit(
        c.multi_hdel(&name.into_str()?, &keys.into_strings()?),
    ))
}
