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

//!  The comm module provides management of common objects, mainly including references to UnitManager and the owner Unit.
//!  Every object of one busname unit shares the same comm.
//!
use core::unit::{UmIf, UnitBase};
use std::cell::RefCell;
use std::rc::{Rc, Weak};

pub(super) struct BusNameUnitComm {
    owner: RefCell<Option<Weak<dyn UnitBase>>>,
    um: RefCell<Rc<dyn UmIf>>,
}

impl BusNameUnitComm {
    pub(super) fn new(um: Rc<dyn UmIf>) -> Self {
        BusNameUnitComm {
            owner: RefCell::new(None),
            um: RefCell::new(um),
        }
    }

    pub(super) fn attach_unit(&self, unit: Rc<dyn UnitBase>) {
        self.owner.replace(Some(Rc::downgrade(&unit)));
    }

    pub(super) fn attach_um(&self, um: Rc<dyn UmIf>) {
        log::debug!("BusNameUnitComm attach_um action.");
        self.um.replace(um);
    }

    pub(super) fn owner(&self) -> Option<Rc<dyn UnitBase>> {
        if let Some(ref unit) = *self.owner.borrow() {
            unit.upgrade()
        } else {
            None
        }
    }

    pub(super) fn get_owner_id(&self) -> String {
        self.owner().map_or_else(|| "None".to_string(), |u| u.id())
    }

    pub(super) fn um(&self) -> Rc<dyn UmIf> {
        Rc::clone(&self.um.borrow())
    }
}
