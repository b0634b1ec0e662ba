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

//!
pub use base::{
    unit_name_is_valid, unit_name_to_prefix, unit_type_from_string, SubUnit, UnitBase,
    UnitNameFlags,
};
pub use deps::{unit_name_to_type, UnitDependencyMask, UnitRelations, UnitType};
pub use state::{UnitActiveState, UnitNotifyFlags};
pub use umif::{RunningMode, UmIf, UnitManagerObj, UnitMngUtil};

mod base;
mod deps;
mod state;
mod umif;
