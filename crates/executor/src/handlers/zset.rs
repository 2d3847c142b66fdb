//! Sorted set operations.
//!
//! Scores are integers. Every row that carries a map marshals it in
//! [`MapMode::Integers`](kvbridge_core::MapMode::Integers), so the host sees
//! member → score maps with integer values.

use kvbridge_client::Client;
use kvbridge_core::{OutputKind, Param, ParamKind};

use crate::handlers::to_count;
use crate::marshal::Native;
use crate::registry::{Descriptor, Family, NativeCall, NativeReply};
use crate::Result;

const NAME: Param = Param::required("name", ParamKind::Str);
const KEY: Param = Param::required("key", ParamKind::Str);
const KEYS: Param = Param::required("keys", ParamKind::List);
const OFFSET: Param = Param::required("offset", ParamKind::Int);
const LIMIT: Param = Param::required("limit", ParamKind::Int);
const KEY_START: Param = Param::required("key_start", ParamKind::Str);
const SCORE_START: Param = Param::required("score_start", ParamKind::Int);
const SCORE_END: Param = Param::required("score_end", ParamKind::Int);
const BY: Param = Param::required("by", ParamKind::Int);
const SCORE: Param = Param::required("score", ParamKind::Int);
const MEMBERS: Param = Param::required("keys", ParamKind::Strings);
const ITEMS: Param = Param::required("items", ParamKind::Map);

/// Sorted set descriptors.
pub const OPERATIONS: &[Descriptor] = &[
    Descriptor::new(
        "zset",
        Family::Zset,
        &[NAME, KEY, SCORE],
        &[],
        NativeCall::Call3(zset),
    ),
    Descriptor::new("zget", Family::Zset, &[NAME, KEY], &[OutputKind::Int], NativeCall::Call2(zget)),
    Descriptor::new("zdel", Family::Zset, &[NAME, KEY], &[], NativeCall::Call2(zdel)),
    Descriptor::new("zincr", Family::Zset, &[NAME, KEY, BY], &[OutputKind::Int], NativeCall::Call3(zincr)),
    Descriptor::new("zsize", Family::Zset, &[NAME], &[OutputKind::Int], NativeCall::Call1(zsize)),
    Descriptor::new("zclear", Family::Zset, &[NAME], &[OutputKind::Int], NativeCall::Call1(zclear)),
    Descriptor::new(
        "zrange",
        Family::Zset,
        &[NAME, OFFSET, LIMIT],
        &[OutputKind::Map],
        NativeCall::Call3(zrange),
    )
    .integers(),
    Descriptor::new(
        "zrrange",
        Family::Zset,
        &[NAME, OFFSET, LIMIT],
        &[OutputKind::Map],
        NativeCall::Call3(zrrange),
    )
    .integers(),
    Descriptor::new(
        "zkeys",
        Family::Zset,
        &[NAME, KEY_START, SCORE_START, SCORE_END, LIMIT],
        &[OutputKind::List],
        NativeCall::Call5(zkeys),
    ),
    Descriptor::new(
        "zscan",
        Family::Zset,
        &[NAME, KEY_START, SCORE_START, SCORE_END, LIMIT],
        &[OutputKind::Map],
        NativeCall::Call5(zscan),
    )
    .integers(),
    Descriptor::new(
        "zrscan",
        Family::Zset,
        &[NAME, KEY_START, SCORE_START, SCORE_END, LIMIT],
        &[OutputKind::Map],
        NativeCall::Call5(zrscan),
    )
    .integers(),
    Descriptor::new(
        "multi_zget",
        Family::Zset,
        &[NAME, MEMBERS],
        &[OutputKind::Map],
        NativeCall::Call2(multi_zget),
    )
    .integers(),
    Descriptor::new(
        "multi_zset",
        Family::Zset,
        &[NAME, ITEMS],
        &[],
        NativeCall::Call2(multi_zset),
    )
    .integers(),
    Descriptor::new("multi_zdel", Family::Zset, &[NAME, KEYS], &[], NativeCall::Call2(multi_zdel)),
];

fn zset(c: &mut dyn Client, name: Native, key: Native, score: Native) -> Result<NativeReply> {
    Ok(NativeReply::unit(c.zset(
        &name.into_str()?,
        &key.into_str()?,
        score.into_int()?,
    )))
}

fn zget(c: &mut dyn Client, name: Native, key: Native) -> Result<NativeReply> {
    Ok(NativeReply::int(c.zget(&name.into_str()?, &key.into_str()?)))
}

fn zdel(c: &mut dyn Client, name: Native, key: Native) -> Result<NativeReply> {
    Ok(NativeReply::unit(c.zdel(&name.into_str()?, &key.into_str()?)))
}

fn zincr(c: &mut dyn Client, name: Native, key: Native, by: Native) -> Result<NativeReply> {
    Ok(NativeReply::int(c.zincr(
        &name.into_str()?,
        &key.into_str()?,
        by.into_int()?,
    )))
}

fn zsize(c: &mut dyn Client, name: Native) -> Result<NativeReply> {
    Ok(NativeReply::int(c.zsize(&name.into_str()?)))
}

fn zclear(c: &mut dyn Client, name: Native) -> Result<NativeReply> {
    Ok(NativeReply::int(c.zclear(&name.into_str()?)))
}

fn zrange(c: &mut dyn Client, name: Native, offset: Native, limit: Native) -> Result<NativeReply> {
    Ok(NativeReply::pairs(c.zrange(
        &name.into_str()?,
        to_count(offset)?,
        to_count(limit)?,
    )))
}

fn zrrange(c: &mut dyn Client, name: Native, offset: Native, limit: Native) -> Result<NativeReply> {
    Ok(NativeReply::pairs(c.zrrange(
        &name.into_str()?,
        to_count(offset)?,
        to_count(limit)?,
    )))
}

fn zkeys(
    c: &mut dyn Client,
    name: Native,
    key_start: Native,
    score_start: Native,
    score_end: Native,
    limit: Native,
) -> Result<NativeReply> {
    Ok(NativeReply::strings(c.zkeys(
        &name.into_str()?,
        &key_start.into_str()?,
        score_start.into_int()?,
        score_end.into_int()?,
        to_count(limit)?,
    )))
}

fn zscan(
    c: &mut dyn Client,
    name: Native,
    key_start: Native,
    score_start: Native,
    score_end: Native,
    limit: Native,
) -> Result<NativeReply> {
    Ok(NativeReply::pairs(c.zscan(
        &name.into_str()?,
        &key_start.into_str()?,
        score_start.into_int()?,
        score_end.into_int()?,
        to_count(limit)?,
    )))
}

fn zrscan(
    c: &mut dyn Client,
    name: Native,
    key_start: Native,
    score_start: Native,
    score_end: Native,
    limit: Native,
) -> Result<NativeReply> {
    Ok(NativeReply::pairs(c.zrscan(
        &name.into_str()?,
        &key_start.into_str()?,
        score_start.into_int()?,
        score_end.into_int()?,
        to_count(limit)?,
    )))
}

fn multi_zget(c: &mut dyn Client, name: Native, keys: Native) -> Result<NativeReply> {
    Ok(NativeReply::pairs(
        c.multi_zget(&name.into_str()?, &keys.into_strings()?),
    ))
}

fn multi_zset(c: &mut dyn Client, name: Native, items: Native) -> Result<NativeReply> {
    Ok(NativeReply::unit(
        c.multi_zset(&name.into_str()?, &items.into_scores()?),
    ))
}

fn multi_zdel(c: &mut dyn Client, name: Native, keys: Native) -> Result<NativeReply> {
    Ok(NativeReply::unit(
        c.multi_zdel(&name.into_str()?, &keys.into_strings()?),
    ))
}
