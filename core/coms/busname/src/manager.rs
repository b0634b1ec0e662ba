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

use core::unit::{UmIf, UnitManagerObj, UnitMngUtil, UnitType};
use std::rc::Rc;

struct BusNameManager {}

// the declaration "pub(self)" is for identification only.
impl BusNameManager {
    pub(self) fn new() -> BusNameManager {
        BusNameManager {}
    }
}

impl UnitManagerObj for BusNameManager {
    fn private_section(&self, _unit_type: UnitType) -> String {
        "BusName".into()
    }

    fn can_transient(&self, _unit_type: UnitType) -> bool {
        false
    }

    fn job_status_message(
        &self,
        _unit_type: UnitType,
        starting: bool,
        description: &str,
    ) -> Option<String> {
        match starting {
            true => Some(format!("Listening on {}.", description)),
            false => Some(format!("Closed {}.", description)),
        }
    }
}

impl UnitMngUtil for BusNameManager {
    // every unit is handed the manager on creation
    fn attach_um(&self, _um: Rc<dyn UmIf>) {}
}

use core::declare_umobj_plugin;
declare_umobj_plugin!(BusNameManager, BusNameManager::new);
