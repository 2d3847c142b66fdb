//! Scalar key-value operations.

use kvbridge_client::Client;
use kvbridge_core::{OutputKind, Param, ParamKind};

use crate::handlers::to_count;
use crate::marshal::Native;
use crate::registry::{Descriptor, Family, NativeCall, NativeReply};
use crate::Result;

const KEY: Param = Param::required("key", ParamKind::Str);
const VALUE: Param = Param::required("value", ParamKind::Str);
const START: Param = Param::required("start", ParamKind::Str);
const END: Param = Param::required("end", ParamKind::Str);
const LIMIT: Param = Param::required("limit", ParamKind::Int);
const KEYS: Param = Param::required("keys", ParamKind::List);
const TTL: Param = Param::required("ttl", ParamKind::Int);
const BY: Param = Param::required("by", ParamKind::Int);
const KVS: Param = Param::required("kvs", ParamKind::Map);

/// Scalar KV descriptors.
pub const OPERATIONS: &[Descriptor] = &[
    Descriptor::new("dbsize", Family::Kv, &[], &[OutputKind::Int], NativeCall::Call0(dbsize)),
    Descriptor::new(
        "get_kv_range",
        Family::Kv,
        &[],
        &[OutputKind::Str, OutputKind::Str],
        NativeCall::Call0(get_kv_range),
    ),
    Descriptor::new("set_kv_range", Family::Kv, &[START, END], &[], NativeCall::Call2(set_kv_range)),
    Descriptor::new("set", Family::Kv, &[KEY, VALUE], &[], NativeCall::Call2(set)),
    Descriptor::new(
        "set_ttl",
        Family::Kv,
        &[KEY, VALUE, TTL],
        &[],
        NativeCall::Call3(set_ttl),
    ),
    Descriptor::new("get", Family::Kv, &[KEY], &[OutputKind::Str], NativeCall::Call1(get)),
    Descriptor::new("del", Family::Kv, &[KEY], &[], NativeCall::Call1(del)),
    Descriptor::new(
        "inc",
        Family::Kv,
        &[KEY, BY],
        &[OutputKind::Int],
        NativeCall::Call2(inc),
    ),
    Descriptor::new("keys", Family::Kv, &[START, END, LIMIT], &[OutputKind::List], NativeCall::Call3(keys)),
    Descriptor::new("scan", Family::Kv, &[START, END, LIMIT], &[OutputKind::Map], NativeCall::Call3(scan)),
    Descriptor::new("rscan", Family::Kv, &[START, END, LIMIT], &[OutputKind::Map], NativeCall::Call3(rscan)),
    Descriptor::new("multi_get", Family::Kv, &[KEYS], &[OutputKind::Map], NativeCall::Call1(multi_get)),
    Descriptor::new(
        "multi_set",
        Family::Kv,
        &[KVS],
        &[OutputKind::Int],
        NativeCall::Call1(multi_set),
    ),
    Descriptor::new("multi_del", Family::Kv, &[KEYS], &[OutputKind::Int], NativeCall::Call1(multi_del)),
];

fn dbsize(c: &mut dyn Client) -> Result<NativeReply> {
    Ok(NativeReply::int(c.dbsize()))
}

fn get_kv_range(c: &mut dyn Client) -> Result<NativeReply> {
    Ok(NativeReply::new(c.get_kv_range(), |(start, end)| {
        vec![Native::Str(start), Native::Str(end)]
    }))
}

fn set_kv_range(c: &mut dyn Client, start: Native, end: Native) -> Result<NativeReply> {
    Ok(NativeReply::unit(
        c.set_kv_range(&start.into_str()?, &end.into_str()?),
    ))
}

fn set(c: &mut dyn Client, key: Native, value: Native) -> Result<NativeReply> {
    Ok(NativeReply::unit(c.set(&key.into_str()?, &value.into_str()?)))
}

fn set_ttl(c: &mut dyn Client, key: Native, value: Native, ttl: Native) -> Result<NativeReply> {
    Ok(NativeReply::unit(c.setx(
        &key.into_str()?,
        &value.into_str()?,
        ttl.into_int()?,
    )))
}

fn get(c: &mut dyn Client, key: Native) -> Result<NativeReply> {
    Ok(NativeReply::str(c.get(&key.into_str()?)))
}

fn del(c: &mut dyn Client, key: Native) -> Result<NativeReply> {
    Ok(NativeReply::unit(c.del(&key.into_str()?)))
}

fn inc(c: &mut dyn Client, key: Native, by: Native) -> Result<NativeReply> {
    Ok(NativeReply::int(c.incr(&key.into_str()?, by.into_int()?)))
}

fn keys(c: &mut dyn Client, start: Native, end: Native, limit: Native) -> Result<NativeReply> {
    Ok(NativeReply::strings(c.keys(
        &start.into_str()?,
        &end.into_str()?,
        to_count(limit)?,
    )))
}

fn scan(c: &mut dyn Client, start: Native, end: Native, limit: Native) -> Result<NativeReply> {
    Ok(NativeReply::pairs(c.scan(
        &start.into_str()?,
        &end.into_str()?,
        to_count(limit)?,
    )))
}

fn rscan(c: &mut dyn Client, start: Native, end: Native, limit: Native) -> Result<NativeReply> {
    Ok(NativeReply::pairs(c.rscan(
        &start.into_str()?,
        &end.into_str()?,
        to_count(limit)?,
    )))
}

fn multi_get(c: &mut dyn Client, keys: Native) -> Result<NativeReply> {
    Ok(NativeReply::pairs(c.multi_get(&keys.into_strings()?)))
}

fn multi_set(c: &mut dyn Client, kvs: Native) -> Result<NativeReply> {
    let kvs = kvs.into_pairs()?;
    let written = (kvs.len() / 2) as i64;
    Ok(NativeReply::new(c.multi_set(&kvs), |()| {
        vec![Native::Int(written)]
    }))
}

fn multi_del(c: &mut dyn Client, keys: Native) -> Result<NativeReply> {
    let keys = keys.into_strings()?;
    let submitted = keys.len() as i64;
    Ok(NativeReply::new(c.multi_del(&keys), |()| {
        vec![Native::Int(submitted)]
    }))
}
