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
//
#![allow(non_snake_case)]
use confique::Config;
use core::error::*;
use core::unit::UnitActiveState;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

#[derive(Config, Default, Clone, Debug, Serialize, Deserialize)]
pub(super) struct SectionBusName {
    /// bus name advertised, defaults to the unit prefix
    pub Name: Option<String>,
    /// service started on activation, defaults to `<prefix>.service`
    pub Service: Option<String>,
}

#[derive(PartialEq, Eq, Debug, Copy, Clone, Serialize, Deserialize)]
pub(crate) enum BusNameState {
    Dead,
    Listening,
    Running,
    Failed,
}

impl BusNameState {
    pub(super) fn to_unit_active_state(self) -> UnitActiveState {
        match self {
            BusNameState::Dead => UnitActiveState::InActive,
            BusNameState::Listening => UnitActiveState::Active,
            BusNameState::Running => UnitActiveState::Active,
            BusNameState::Failed => UnitActiveState::Failed,
        }
    }
}

impl fmt::Display for BusNameState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            BusNameState::Dead => "dead",
            BusNameState::Listening => "listening",
            BusNameState::Running => "running",
            BusNameState::Failed => "failed",
        };
        write!(f, "{}", s)
    }
}

impl FromStr for BusNameState {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        let state = match s {
            "dead" => BusNameState::Dead,
            "listening" => BusNameState::Listening,
            "running" => BusNameState::Running,
            "failed" => BusNameState::Failed,
            _ => return Err(Error::InvalidData),
        };
        Ok(state)
    }
}

#[derive(PartialEq, Eq, Debug, Copy, Clone, Serialize, Deserialize)]
pub(crate) enum BusNameResult {
    Success,
    FailureResources,
    FailureServicePermanent,
}

impl fmt::Display for BusNameResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            BusNameResult::Success => "success",
            BusNameResult::FailureResources => "resources",
            BusNameResult::FailureServicePermanent => "service-failed-permanent",
        };
        write!(f, "{}", s)
    }
}

impl FromStr for BusNameResult {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        let res = match s {
            "success" => BusNameResult::Success,
            "resources" => BusNameResult::FailureResources,
            "service-failed-permanent" => BusNameResult::FailureServicePermanent,
            _ => return Err(Error::InvalidData),
        };
        Ok(res)
    }
}
