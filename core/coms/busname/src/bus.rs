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

use super::config::BusNameConfig;
use super::mng::BusNameMng;
use std::rc::Rc;

/// read-only properties of a busname unit
pub struct BusNameBus {
    // associated objects
    config: Rc<BusNameConfig>,
    mng: Rc<BusNameMng>,
}

impl BusNameBus {
    pub(super) fn new(configr: &Rc<BusNameConfig>, mngr: &Rc<BusNameMng>) -> BusNameBus {
        BusNameBus {
            config: Rc::clone(configr),
            mng: Rc::clone(mngr),
        }
    }

    pub(super) fn unit_get_property(&self, key: &str) -> Option<String> {
        match key {
            "Name" => self.config.bus_name(),
            "Service" => self.config.service(),
            "Result" => Some(self.mng.get_result()),
            "SubState" => Some(self.mng.get_state()),
            _ => None,
        }
    }
}
