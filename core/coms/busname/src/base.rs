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

pub(super) const BUSNAMES_TARGET: &str = "busnames.target";
pub(super) const SYSINIT_TARGET: &str = "sysinit.target";
pub(super) const SHUTDOWN_TARGET: &str = "shutdown.target";

/// upper bound of a bus name as the bus daemon enforces it
const BUS_MAXIMUM_NAME_LENGTH: usize = 255;

/// check the name follows the bus naming rules: dot separated elements of
/// `[A-Za-z0-9_-]`, at least two elements, an element of a well-known name
/// must not start with a digit, unique names start with ':'.
pub(super) fn service_name_is_valid(name: &str) -> bool {
    if name.is_empty() || name.len() > BUS_MAXIMUM_NAME_LENGTH {
        return false;
    }

    let (unique, body) = match name.strip_prefix(':') {
        Some(rest) => (true, rest),
        None => (false, name),
    };

    let mut dot = true;
    let mut found_dot = false;
    for c in body.chars() {
        if c == '.' {
            if dot {
                return false;
            }
            dot = true;
            found_dot = true;
            continue;
        }

        let good = c.is_ascii_alphabetic()
            || ((!dot || unique) && c.is_ascii_digit())
            || c == '_'
            || c == '-';
        if !good {
            return false;
        }
        dot = false;
    }

    !dot && found_dot
}
