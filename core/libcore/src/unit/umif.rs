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

//! UnitManager interfaces
use super::{UnitDependencyMask, UnitRelations, UnitType};
use crate::error::*;
use event::Events;
use std::os::unix::io::OwnedFd;
use std::rc::Rc;

/// the mode the manager instance runs in
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunningMode {
    /// the manager is the system instance
    System,
    /// the manager runs for one user session
    User,
}

impl RunningMode {
    /// the bus scope the mode talks to
    pub fn as_str(&self) -> &'static str {
        match self {
            RunningMode::System => "system",
            RunningMode::User => "user",
        }
    }
}

///The trait Defining Shared Behavior of UnitManager
///
///The Behavior shared with all SubUnit,
///
/// if SubUnit needs to obtain information about othes,
///
/// need create Self by attach a Impl UmIf
///
pub trait UmIf {
    ///add a unit dependency to th unit deplist
    /// can called by sub unit
    /// sub unit add some default dependency
    ///
    fn unit_add_dependency(
        &self,
        _unit_name: &str,
        _relation: UnitRelations,
        _target_name: &str,
        _add_ref: bool,
        _mask: UnitDependencyMask,
    ) -> Result<()> {
        Ok(())
    }

    ///add two unit dependency to the unit
    /// can called by sub unit
    /// sub unit add some default dependency
    ///
    fn unit_add_two_dependency(
        &self,
        _unit_name: &str,
        _ra: UnitRelations,
        _rb: UnitRelations,
        _target_name: &str,
        _add_ref: bool,
        _mask: UnitDependencyMask,
    ) -> Result<()> {
        Ok(())
    }

    /// load the unit for reference name
    fn load_unit_success(&self, _name: &str) -> bool {
        false
    }

    /// check if there is already a job of any type in process
    fn has_job(&self, _name: &str) -> bool {
        false
    }

    /// check if there is already a stop job in process
    fn has_stop_job(&self, _name: &str) -> bool {
        false
    }

    /// check if there is already a start job in process
    fn has_start_job(&self, _name: &str) -> bool {
        false
    }

    /// check the unit that will be triggered by {name} is in active or activating state
    fn relation_active_or_pending(&self, _name: &str) -> bool {
        false
    }

    /// starting a unit by pushing it to job queue
    fn unit_start_by_job(&self, _name: &str) -> Result<()> {
        Ok(())
    }

    /// the reactor all fd sources are registered in
    fn events(&self) -> Rc<dyn Events>;

    /// get the subunit state of unit
    fn get_subunit_state(&self, _unit_name: &str) -> String {
        String::new()
    }

    /// get the result of the last run of unit
    fn get_subunit_result(&self, _unit_name: &str) -> String {
        String::new()
    }

    /// the mode the manager runs in
    fn running_mode(&self) -> RunningMode {
        RunningMode::System
    }

    /// create a starter connection on the bus of scope and install a
    /// match for the activation of name, the returned fd becomes readable
    /// when a client addresses the name
    fn bus_create_starter(&self, _scope: &str, _name: &str) -> Result<OwnedFd> {
        Err(Error::UnitActionEOpNotSupp)
    }
}

/// the trait used for attach UnitManager to sub unit
pub trait UnitMngUtil {
    /// the method of attach to UnitManager to sub unit
    fn attach_um(&self, um: Rc<dyn UmIf>);
}

///The trait Defining Shared Behavior of sub unit-manager
pub trait UnitManagerObj: UnitMngUtil {
    ///
    fn enumerate_perpetual(&self) {}
    ///
    fn enumerate(&self) {}
    ///
    fn shutdown(&self) {}
    ///
    fn private_section(&self, _unit_type: UnitType) -> String {
        null_str!("")
    }
    ///
    fn can_transient(&self, _unit_type: UnitType) -> bool {
        false
    }
    /// the status line shown when a start (starting) or stop job of a unit
    /// with description finishes
    fn job_status_message(
        &self,
        _unit_type: UnitType,
        _starting: bool,
        _description: &str,
    ) -> Option<String> {
        None
    }
}

/// the macro for create a sub unit-manager instance
#[macro_export]
macro_rules! declare_umobj_plugin {
    ($unit_type:ty, $constructor:path) => {
        /// method for create the sub-unit-manager instance
        #[cfg_attr(feature = "plugin", no_mangle)]
        pub fn __um_obj_create(level: log::LevelFilter) -> *mut dyn $crate::unit::UnitManagerObj {
            #[cfg(feature = "plugin")]
            log::set_max_level(level);
            #[cfg(not(feature = "plugin"))]
            let _ = level;
            let construcotr: fn() -> $unit_type = $constructor;
            let obj = construcotr();
            let boxed: Box<dyn $crate::unit::UnitManagerObj> = Box::new(obj);
            Box::into_raw(boxed)
        }
    };
}
