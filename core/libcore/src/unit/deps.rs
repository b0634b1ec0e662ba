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

use serde::{Deserialize, Serialize};
use std::{num::ParseIntError, str::FromStr};

/// the relations the unit types add between each other
#[allow(missing_docs)]
#[derive(Hash, PartialEq, Eq, Copy, Clone, Debug, Serialize, Deserialize)]
pub enum UnitRelations {
    UnitRequires,
    UnitWants,
    UnitRequiresBy,
    UnitWantsBy,

    UnitConflicts,
    UnitConflictedBy,

    UnitBefore,
    UnitAfter,

    UnitTriggers,
    UnitTriggeredBy,
}

#[allow(missing_docs)]
#[derive(PartialEq, Eq, Copy, Clone, Debug)]
pub enum UnitDependencyMask {
    File = 1 << 0,
    Implicit = 1 << 1,
    Default = 1 << 2,
}

#[allow(missing_docs)]
#[derive(PartialEq, Eq, Hash, Copy, Clone, Debug, Serialize, Deserialize)]
pub enum UnitType {
    UnitService = 0,
    UnitTarget,
    UnitSocket,
    UnitMount,
    UnitTimer,
    UnitPath,
    UnitBusName,
    UnitTypeMax,
    UnitTypeInvalid,
}

impl UnitType {
    ///
    pub fn iterator() -> impl Iterator<Item = UnitType> {
        [
            UnitType::UnitService,
            UnitType::UnitTarget,
            UnitType::UnitSocket,
            UnitType::UnitMount,
            UnitType::UnitTimer,
            UnitType::UnitPath,
            UnitType::UnitBusName,
        ]
        .iter()
        .copied()
    }
}

impl FromStr for UnitType {
    type Err = ParseIntError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let ret = match s.to_lowercase().as_str() {
            "service" => UnitType::UnitService,
            "target" => UnitType::UnitTarget,
            "socket" => UnitType::UnitSocket,
            "mount" => UnitType::UnitMount,
            "timer" => UnitType::UnitTimer,
            "path" => UnitType::UnitPath,
            "busname" => UnitType::UnitBusName,
            _ => UnitType::UnitTypeInvalid,
        };
        Ok(ret)
    }
}

impl From<UnitType> for String {
    fn from(u_t: UnitType) -> Self {
        match u_t {
            UnitType::UnitService => "service".into(),
            UnitType::UnitTarget => "target".into(),
            UnitType::UnitSocket => "socket".into(),
            UnitType::UnitMount => "mount".into(),
            UnitType::UnitTimer => "timer".into(),
            UnitType::UnitPath => "path".into(),
            UnitType::UnitBusName => "busname".into(),
            UnitType::UnitTypeMax => null_str!(""),
            UnitType::UnitTypeInvalid => null_str!(""),
        }
    }
}

/// parse UnitType by unit_name
pub fn unit_name_to_type(unit_name: &str) -> UnitType {
    match unit_name.rsplit_once('.') {
        None => UnitType::UnitTypeInvalid,
        Some((_, suffix)) => UnitType::from_str(suffix).unwrap_or(UnitType::UnitTypeInvalid),
    }
}
