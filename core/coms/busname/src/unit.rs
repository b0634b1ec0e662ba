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

use super::comm::BusNameUnitComm;
use super::config::BusNameConfig;
use super::mng::BusNameMng;
use crate::base::{service_name_is_valid, BUSNAMES_TARGET, SHUTDOWN_TARGET, SYSINIT_TARGET};
use crate::bus::BusNameBus;
use core::error::*;
use core::unit::{
    unit_name_to_prefix, unit_name_to_type, RunningMode, SubUnit, UmIf, UnitActiveState,
    UnitBase, UnitDependencyMask, UnitMngUtil, UnitRelations, UnitType,
};
use core::utils::fd::FdSet;
use std::fmt;
use std::path::PathBuf;
use std::rc::Rc;

struct BusNameUnit {
    comm: Rc<BusNameUnitComm>,
    mng: Rc<BusNameMng>,
    config: Rc<BusNameConfig>,
    bus: BusNameBus,
}

impl BusNameUnit {
    fn new(um: Rc<dyn UmIf>) -> BusNameUnit {
        let comm = Rc::new(BusNameUnitComm::new(um));
        let config = Rc::new(BusNameConfig::new());
        let mng = BusNameMng::new(&comm, &config);
        BusNameUnit {
            comm: Rc::clone(&comm),
            bus: BusNameBus::new(&config, &mng),
            mng,
            config,
        }
    }

    fn add_extras(&self) -> Result<()> {
        let um = self.comm.um();
        let u = match self.comm.owner() {
            None => {
                return Ok(());
            }
            Some(v) => v,
        };

        let prefix = match unit_name_to_prefix(&u.id()) {
            None => {
                return Err(Error::InvalidName { what: u.id() });
            }
            Some(v) => v,
        };

        if self.config.bus_name().is_none() {
            self.config.set_bus_name(&prefix);
        }

        if u.description().is_none() {
            if let Some(name) = self.config.bus_name() {
                u.set_description(&name);
            }
        }

        let service = self.load_related_service(&um, &u, &prefix)?;
        self.config.set_service(&service);

        um.unit_add_two_dependency(
            &u.id(),
            UnitRelations::UnitBefore,
            UnitRelations::UnitTriggers,
            &service,
            true,
            UnitDependencyMask::Implicit,
        )?;

        self.add_default_dependencies(&um, &u)
    }

    fn load_related_service(
        &self,
        um: &Rc<dyn UmIf>,
        u: &Rc<dyn UnitBase>,
        prefix: &str,
    ) -> Result<String> {
        let service = match self.config.service() {
            None => format!("{}.{}", prefix, String::from(UnitType::UnitService)),
            Some(v) => {
                if unit_name_to_type(&v) != UnitType::UnitService {
                    log::error!("{}: Service={} is not a service unit. Refusing.", u.id(), v);
                    return Err(Error::ConfigureError {
                        msg: format!("Service={} is not a service unit", v),
                    });
                }
                v
            }
        };

        if !um.load_unit_success(&service) {
            log::debug!("{}: related unit {} is not loaded yet.", u.id(), service);
        }

        Ok(service)
    }

    fn add_default_dependencies(&self, um: &Rc<dyn UmIf>, u: &Rc<dyn UnitBase>) -> Result<()> {
        if !u.default_dependencies() {
            return Ok(());
        }

        um.unit_add_dependency(
            &u.id(),
            UnitRelations::UnitBefore,
            BUSNAMES_TARGET,
            true,
            UnitDependencyMask::Default,
        )?;

        if um.running_mode() == RunningMode::System {
            um.unit_add_two_dependency(
                &u.id(),
                UnitRelations::UnitAfter,
                UnitRelations::UnitRequires,
                SYSINIT_TARGET,
                true,
                UnitDependencyMask::Default,
            )?;
        }

        um.unit_add_two_dependency(
            &u.id(),
            UnitRelations::UnitBefore,
            UnitRelations::UnitConflicts,
            SHUTDOWN_TARGET,
            true,
            UnitDependencyMask::Default,
        )
    }

    fn verify(&self) -> Result<()> {
        let id = self.comm.get_owner_id();
        let name = self.config.bus_name().unwrap_or_default();

        if !service_name_is_valid(&name) {
            log::error!(
                "{}'s Name= setting is not a valid service name Refusing.",
                id
            );
            return Err(Error::ConfigureError {
                msg: format!("invalid bus name {}", name),
            });
        }

        if format!("{}.busname", name) != id {
            log::error!("{}'s Name= setting doesn't match unit name. Refusing.", id);
            return Err(Error::ConfigureError {
                msg: format!("bus name {} doesn't match unit name {}", name, id),
            });
        }

        Ok(())
    }
}

impl SubUnit for BusNameUnit {
    fn as_any(&self) -> &dyn std::any::Any {
        self
    }

    fn load(&self, paths: Vec<PathBuf>) -> Result<()> {
        self.config.load(paths)?;

        self.add_extras()?;

        self.verify()
    }

    fn current_active_state(&self) -> UnitActiveState {
        self.mng.current_active_state()
    }

    fn get_subunit_state(&self) -> String {
        self.mng.get_state()
    }

    fn get_subunit_result(&self) -> String {
        self.mng.get_result()
    }

    fn attach_unit(&self, unit: Rc<dyn UnitBase>) {
        self.comm.attach_unit(unit);
    }

    fn init(&self) {}

    fn done(&self) {
        self.mng.release_resources();
    }

    fn dump(&self, prefix: &str) -> String {
        self.mng.dump(prefix)
    }

    fn start(&self) -> Result<()> {
        log::info!("BusName start {:?}", self.comm.get_owner_id());

        let service = self.config.service().unwrap_or_default();
        if !self.comm.um().load_unit_success(&service) {
            log::error!(
                "{}: Bus service {} not loaded, refusing.",
                self.comm.get_owner_id(),
                service
            );
            return Err(Error::UnitActionENoent);
        }

        self.mng.start_action();
        Ok(())
    }

    fn stop(&self, _force: bool) -> Result<()> {
        self.mng.stop_action();
        Ok(())
    }

    fn reset_failed(&self) {
        self.mng.reset_failed()
    }

    fn trigger(&self, other: &str) {
        self.mng.trigger_notify(other)
    }

    fn serialize(&self, f: &mut dyn fmt::Write, fds: &mut FdSet) -> Result<()> {
        self.mng.serialize(f, fds)
    }

    fn deserialize_item(&self, key: &str, value: &str, fds: &mut FdSet) {
        self.mng.deserialize_item(key, value, fds)
    }

    fn coldplug(&self) -> Result<()> {
        self.mng.coldplug()
    }

    fn unit_get_property(&self, key: &str) -> Option<String> {
        self.bus.unit_get_property(key)
    }
}

impl UnitMngUtil for BusNameUnit {
    fn attach_um(&self, um: Rc<dyn UmIf>) {
        self.comm.attach_um(um);
    }
}

use core::declare_unitobj_plugin_with_param;
declare_unitobj_plugin_with_param!(BusNameUnit, BusNameUnit::new);
