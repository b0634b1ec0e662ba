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

use super::deps::UnitType;
use super::state::{UnitActiveState, UnitNotifyFlags};
use super::umif::UnitMngUtil;
use crate::error::*;
use crate::utils::fd::FdSet;
use bitflags::bitflags;
use std::any::Any;
use std::fmt;
use std::num::ParseIntError;
use std::str::FromStr;
use std::{path::PathBuf, rc::Rc};

///The trait Defining Shared Behavior from Base Unit  to SUB unit
///
/// only one impl,sub unit ref by impl UnitBase
///
pub trait UnitBase {
    ///
    fn id(&self) -> String;
    ///
    fn unit_type(&self) -> UnitType;

    /// report an active state change of the sub unit, the manager propagates it to jobs and dependencies
    fn notify(
        &self,
        original_state: UnitActiveState,
        new_state: UnitActiveState,
        flags: UnitNotifyFlags,
    );

    ///
    fn default_dependencies(&self) -> bool;

    ///
    fn description(&self) -> Option<String>;

    ///
    fn set_description(&self, description: &str);
}

///The trait Defining Shared Behavior of sub unit
///
/// difference sub unit ref by dynamic trait
///
pub trait SubUnit: UnitMngUtil {
    ///
    fn as_any(&self) -> &dyn Any;
    ///
    fn init(&self) {}

    /// release everything the sub unit holds, called before the unit is dropped
    fn done(&self) {}

    ///
    fn load(&self, conf: Vec<PathBuf>) -> Result<()>;

    /// human readable state, one "prefix key: value" line per item
    fn dump(&self, _prefix: &str) -> String {
        String::new()
    }

    /// Start a Unit
    /// Each Sub Unit need to implement its own start function
    ///
    fn start(&self) -> Result<()> {
        Ok(())
    }

    ///
    // process reentrant with force
    fn stop(&self, _force: bool) -> Result<()> {
        Ok(())
    }

    ///
    fn reset_failed(&self) {}

    /// called when a unit we trigger changes state or gains or loses a job
    fn trigger(&self, _other: &str) {}

    ///Get the the unit state
    ///
    /// Every sub unit  can define self states and map to [`UnitActiveState`]
    ///
    fn current_active_state(&self) -> UnitActiveState;

    /// Return the state of subunit, i.e. (mounted for .mount, running for .service, listening for .socket)
    fn get_subunit_state(&self) -> String;

    /// Return the result of the last run of the subunit, "success" if nothing failed
    fn get_subunit_result(&self) -> String {
        null_str!("success")
    }

    ///
    fn attach_unit(&self, unit: Rc<dyn UnitBase>);

    /// write the runtime state as key=value items before the manager re-executes,
    /// descriptors that must survive are duplicated into fds
    fn serialize(&self, _f: &mut dyn fmt::Write, _fds: &mut FdSet) -> Result<()> {
        Ok(())
    }

    /// consume one item written by serialize() of the previous manager instance
    fn deserialize_item(&self, _key: &str, _value: &str, _fds: &mut FdSet) {}

    /// rebuild external connections from the deserialized state
    fn coldplug(&self) -> Result<()> {
        Ok(())
    }

    /// read-only properties exposed on the bus
    fn unit_get_property(&self, _key: &str) -> Option<String> {
        None
    }
}

/// the macro for create a sub unit instance with dyn ref of UmIf,
/// which sub unit wants invoke um interface, about UmIf see doc of UmIf
#[macro_export]
macro_rules! declare_unitobj_plugin_with_param {
    ($unit_type:ty, $constructor:path) => {
        /// method for create the unit instance
        #[cfg_attr(feature = "plugin", no_mangle)]
        pub fn __subunit_create_with_params(
            um: Rc<dyn $crate::unit::UmIf>,
        ) -> *mut dyn $crate::unit::SubUnit {
            let construcotr: fn(um: Rc<dyn $crate::unit::UmIf>) -> $unit_type = $constructor;
            let obj = construcotr(um);
            let boxed: Box<dyn $crate::unit::SubUnit> = Box::new(obj);
            Box::into_raw(boxed)
        }
    };
}

bitflags! {
    /// used to when check the given unit name is valid
    pub struct UnitNameFlags: u8 {
        /// Allow foo.service
        const PLAIN = 1 << 0;
        /// Allow foo@.service
        const TEMPLATE = 1 << 1;
        /// Allow foo@123.service
        const INSTANCE = 1 << 2;
        /// Any of the above
        const ANY = Self::PLAIN.bits() | Self::TEMPLATE.bits() | Self::INSTANCE.bits();
    }
}

/// The maximum length of a valid unit name
const UNIT_NAME_MAX: usize = 255;

/// check if the given unit name is valid
pub fn unit_name_is_valid(name: &str, flag: UnitNameFlags) -> bool {
    if name.is_empty() {
        return false;
    }
    if name.len() > UNIT_NAME_MAX {
        return false;
    }
    /* Take foo@123.service for example, "foo@123" is its first_name,
     * "foo" is prefix or template_name, "service" is its last_name, suffix, or type.
     * "123.service" is instance_name. Bus names carry dots, so split at the last one. */
    let (first_name, last_name) = match name.rsplit_once('.') {
        None => return false,
        Some(v) => (v.0, v.1),
    };
    if first_name.is_empty() {
        return false;
    }
    let unit_type = match unit_type_from_string(last_name) {
        Err(_) => return false,
        Ok(v) => v,
    };
    if unit_type == UnitType::UnitTypeInvalid {
        return false;
    }
    match first_name.split_once('@') {
        None => flag.contains(UnitNameFlags::PLAIN),
        Some(v) => {
            /* "@" is the first character */
            if v.0.is_empty() {
                return false;
            }
            /* "@" is the last character */
            if v.1.is_empty() {
                return flag.contains(UnitNameFlags::TEMPLATE);
            }
            /* there is more than one "@" */
            if v.1.contains('@') {
                return false;
            }
            flag.contains(UnitNameFlags::INSTANCE)
        }
    }
}

/// strip the type suffix and the instance part: "foo@bar.service" -> "foo"
pub fn unit_name_to_prefix(name: &str) -> Option<String> {
    if !unit_name_is_valid(name, UnitNameFlags::ANY) {
        return None;
    }

    let stem = match name.split_once('@') {
        Some((prefix, _)) => prefix,
        None => name.rsplit_once('.').map(|(stem, _)| stem)?,
    };
    Some(stem.to_string())
}

/// convert the type string of one unit to UnitType
pub fn unit_type_from_string(type_string: &str) -> Result<UnitType, ParseIntError> {
    UnitType::from_str(type_string)
}
