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

//! In-memory manager and unit used by the unit tests of this crate.
//!
use core::error::*;
use core::unit::{
    RunningMode, UmIf, UnitActiveState, UnitBase, UnitDependencyMask, UnitNotifyFlags,
    UnitRelations, UnitType,
};
use event::{EventState, Events, Source};
use std::cell::{Cell, RefCell};
use std::fs::File;
use std::os::unix::io::OwnedFd;
use std::rc::Rc;

pub(crate) fn dev_null() -> OwnedFd {
    OwnedFd::from(File::open("/dev/null").unwrap())
}

#[derive(Default)]
pub(crate) struct FakeEvents {
    sources: RefCell<Vec<(Rc<dyn Source>, EventState)>>,
    pub(crate) fail_add: Cell<bool>,
    pub(crate) fail_enable: Cell<bool>,
}

impl FakeEvents {
    pub(crate) fn registered(&self) -> usize {
        self.sources.borrow().len()
    }

    pub(crate) fn enabled(&self) -> usize {
        self.sources
            .borrow()
            .iter()
            .filter(|(_, state)| *state == EventState::On)
            .count()
    }

    pub(crate) fn source(&self) -> Option<Rc<dyn Source>> {
        self.sources.borrow().first().map(|(s, _)| s.clone())
    }

    fn position(&self, source: &Rc<dyn Source>) -> Option<usize> {
        self.sources
            .borrow()
            .iter()
            .position(|(s, _)| s.token() == source.token())
    }
}

impl Events for FakeEvents {
    fn add_source(&self, source: Rc<dyn Source>) -> event::Result<i32> {
        if self.fail_add.get() {
            return Err(event::Error::Other { word: "add_source" });
        }
        self.sources.borrow_mut().push((source, EventState::Off));
        Ok(0)
    }

    fn has_source(&self, source: Rc<dyn Source>) -> bool {
        self.position(&source).is_some()
    }

    fn del_source(&self, source: Rc<dyn Source>) -> event::Result<i32> {
        match self.position(&source) {
            None => Err(event::Error::NotRegistered {
                token: source.token(),
            }),
            Some(pos) => {
                self.sources.borrow_mut().remove(pos);
                Ok(0)
            }
        }
    }

    fn set_enabled(&self, source: Rc<dyn Source>, state: EventState) -> event::Result<i32> {
        if state == EventState::On && self.fail_enable.get() {
            return Err(event::Error::Other { word: "set_enabled" });
        }
        match self.position(&source) {
            None => Err(event::Error::NotRegistered {
                token: source.token(),
            }),
            Some(pos) => {
                self.sources.borrow_mut()[pos].1 = state;
                Ok(0)
            }
        }
    }
}

pub(crate) struct FakeUm {
    pub(crate) events: Rc<FakeEvents>,
    pub(crate) mode: Cell<RunningMode>,
    pub(crate) starter_fail: Cell<bool>,
    pub(crate) starter_calls: RefCell<Vec<(String, String)>>,
    pub(crate) job_fail: Cell<bool>,
    pub(crate) jobs: RefCell<Vec<String>>,
    pub(crate) stop_pending: Cell<bool>,
    pub(crate) service_active: Cell<bool>,
    pub(crate) service_loaded: Cell<bool>,
    pub(crate) service_job: Cell<bool>,
    pub(crate) sub_state: RefCell<String>,
    pub(crate) sub_result: RefCell<String>,
    pub(crate) deps: RefCell<Vec<(UnitRelations, String)>>,
}

impl FakeUm {
    pub(crate) fn new() -> Rc<FakeUm> {
        Rc::new(FakeUm {
            events: Rc::new(FakeEvents::default()),
            mode: Cell::new(RunningMode::System),
            starter_fail: Cell::new(false),
            starter_calls: RefCell::new(Vec::new()),
            job_fail: Cell::new(false),
            jobs: RefCell::new(Vec::new()),
            stop_pending: Cell::new(false),
            service_active: Cell::new(false),
            service_loaded: Cell::new(true),
            service_job: Cell::new(false),
            sub_state: RefCell::new(String::from("dead")),
            sub_result: RefCell::new(String::from("success")),
            deps: RefCell::new(Vec::new()),
        })
    }

    pub(crate) fn set_service(&self, state: &str, result: &str) {
        self.sub_state.replace(state.to_string());
        self.sub_result.replace(result.to_string());
    }
}

impl UmIf for FakeUm {
    fn unit_add_dependency(
        &self,
        _unit_name: &str,
        relation: UnitRelations,
        target_name: &str,
        _add_ref: bool,
        _mask: UnitDependencyMask,
    ) -> Result<()> {
        self.deps
            .borrow_mut()
            .push((relation, target_name.to_string()));
        Ok(())
    }

    fn unit_add_two_dependency(
        &self,
        unit_name: &str,
        ra: UnitRelations,
        rb: UnitRelations,
        target_name: &str,
        add_ref: bool,
        mask: UnitDependencyMask,
    ) -> Result<()> {
        self.unit_add_dependency(unit_name, ra, target_name, add_ref, mask)?;
        self.unit_add_dependency(unit_name, rb, target_name, add_ref, mask)
    }

    fn load_unit_success(&self, _name: &str) -> bool {
        self.service_loaded.get()
    }

    fn has_job(&self, _name: &str) -> bool {
        self.service_job.get()
    }

    fn has_stop_job(&self, _name: &str) -> bool {
        self.stop_pending.get()
    }

    fn relation_active_or_pending(&self, _name: &str) -> bool {
        self.service_active.get()
    }

    fn unit_start_by_job(&self, name: &str) -> Result<()> {
        if self.job_fail.get() {
            return Err(Error::UnitActionEAgain);
        }
        self.jobs.borrow_mut().push(name.to_string());
        Ok(())
    }

    fn events(&self) -> Rc<dyn Events> {
        self.events.clone()
    }

    fn get_subunit_state(&self, _unit_name: &str) -> String {
        self.sub_state.borrow().clone()
    }

    fn get_subunit_result(&self, _unit_name: &str) -> String {
        self.sub_result.borrow().clone()
    }

    fn running_mode(&self) -> RunningMode {
        self.mode.get()
    }

    fn bus_create_starter(&self, scope: &str, name: &str) -> Result<OwnedFd> {
        self.starter_calls
            .borrow_mut()
            .push((scope.to_string(), name.to_string()));
        if self.starter_fail.get() {
            return Err(Error::Nix {
                source: nix::Error::EMFILE,
            });
        }
        Ok(dev_null())
    }
}

pub(crate) struct FakeUnit {
    id: String,
    pub(crate) default_deps: Cell<bool>,
    pub(crate) description: RefCell<Option<String>>,
    pub(crate) notified: RefCell<Vec<(UnitActiveState, UnitActiveState)>>,
}

impl FakeUnit {
    pub(crate) fn new(id: &str) -> Rc<FakeUnit> {
        Rc::new(FakeUnit {
            id: id.to_string(),
            default_deps: Cell::new(true),
            description: RefCell::new(None),
            notified: RefCell::new(Vec::new()),
        })
    }
}

impl UnitBase for FakeUnit {
    fn id(&self) -> String {
        self.id.clone()
    }

    fn unit_type(&self) -> UnitType {
        UnitType::UnitBusName
    }

    fn notify(
        &self,
        original_state: UnitActiveState,
        new_state: UnitActiveState,
        _flags: UnitNotifyFlags,
    ) {
        self.notified
            .borrow_mut()
            .push((original_state, new_state));
    }

    fn default_dependencies(&self) -> bool {
        self.default_deps.get()
    }

    fn description(&self) -> Option<String> {
        self.description.borrow().clone()
    }

    fn set_description(&self, description: &str) {
        self.description.replace(Some(description.to_string()));
    }
}
