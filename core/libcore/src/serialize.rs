// Copyright (c) 2022 Huawei Technologies Co.,Ltd. All rights reserved.
//
// sysMaster is licensed under Mulan PSL v2.
// You can use this software according to the terms and conditions of the Mulan
// PSL v2.
// You may obtain a copy of Mulan PSL v2 at:
//         http://license.coscl.org.cn/MulanPSL2
// THIS SOFTWARE IS PROVIDED ON AN "AS IS" BASIS, WITHOUT WARRANTIES OF ANY
// KIND, EITHER EXPRESS OR IMPLIED, INCLUDING BUT NOT LIMITED TO
// NON-INFRINGEMENT, MERCHANTABILITY OR FIT FOR A PARTICULAR PURPOSE.
// See the Mulan PSL v2 for more details.

//! Runtime state handed from one manager instance to the next across re-exec.
//!
//! Every unit writes its state as `key=value` lines, one item per line.
//! Descriptors that must survive are duplicated into a [`FdSet`](crate::utils::fd::FdSet)
//! and referenced by number.
use crate::error::*;
use std::fmt::{self, Arguments};

fn check_key(key: &str) -> Result<()> {
    if key.is_empty() || key.contains('=') || key.contains('\n') {
        return Err(Error::InvalidData);
    }
    Ok(())
}

/// append one `key=value` line
pub fn serialize_item(f: &mut dyn fmt::Write, key: &str, value: &str) -> Result<()> {
    check_key(key)?;
    if value.contains('\n') {
        return Err(Error::InvalidData);
    }

    writeln!(f, "{}={}", key, value).context(FmtSnafu)
}

/// append one `key=value` line with a formatted value
pub fn serialize_item_format(f: &mut dyn fmt::Write, key: &str, args: Arguments<'_>) -> Result<()> {
    serialize_item(f, key, &fmt::format(args))
}

/// split one line at the first '='
pub fn deserialize_item(line: &str) -> Option<(&str, &str)> {
    let (key, value) = line.split_once('=')?;
    if key.is_empty() {
        return None;
    }
    Some((key, value))
}

/// split serialized data into items, blank and malformed lines are skipped
pub fn deserialize_items(data: &str) -> Vec<(&str, &str)> {
    let mut items = Vec::new();
    for line in data.lines() {
        if line.trim().is_empty() {
            continue;
        }
        match deserialize_item(line) {
            Some(item) => items.push(item),
            None => log::debug!("Failed to parse serialized line, ignoring: {}", line),
        }
    }
    items
}
