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

//! The starter owns the activation descriptor of one bus name and its
//! registration in the event loop.
//!
use crate::comm::BusNameUnitComm;
use core::error::*;
use core::utils::fd::FdSet;
use event::{EventState, Source};
use std::cell::RefCell;
use std::os::unix::io::{AsRawFd, OwnedFd, RawFd};
use std::rc::Rc;

pub(super) struct BusNameStarter {
    // associated objects
    comm: Rc<BusNameUnitComm>,

    // owned objects
    fd: RefCell<Option<OwnedFd>>,
    source: RefCell<Option<Rc<dyn Source>>>,
}

impl BusNameStarter {
    pub(super) fn new(commr: &Rc<BusNameUnitComm>) -> Self {
        BusNameStarter {
            comm: Rc::clone(commr),
            fd: RefCell::new(None),
            source: RefCell::new(None),
        }
    }

    pub(super) fn is_open(&self) -> bool {
        self.fd.borrow().is_some()
    }

    pub(super) fn is_watched(&self) -> bool {
        self.source.borrow().is_some()
    }

    pub(super) fn raw_fd(&self) -> Option<RawFd> {
        self.fd.borrow().as_ref().map(|fd| fd.as_raw_fd())
    }

    /// ask the manager for a starter connection of name, no-op when one is held
    pub(super) fn open(&self, name: &str) -> Result<()> {
        if self.is_open() {
            return Ok(());
        }

        let um = self.comm.um();
        let scope = um.running_mode().as_str();
        match um.bus_create_starter(scope, name) {
            Ok(fd) => {
                log::debug!(
                    "{}: opened starter fd {} on the {} bus.",
                    self.comm.get_owner_id(),
                    fd.as_raw_fd(),
                    scope
                );
                self.fd.replace(Some(fd));
                Ok(())
            }
            Err(e) => {
                log::warn!(
                    "{}: Failed to create starter connection on the {} bus: {}",
                    self.comm.get_owner_id(),
                    scope,
                    e
                );
                Err(e)
            }
        }
    }

    /// enable readiness delivery, the registration is created with create on first use
    pub(super) fn watch<F>(&self, create: F) -> Result<()>
    where
        F: FnOnce() -> Rc<dyn Source>,
    {
        if !self.is_open() {
            return Ok(());
        }

        let events = self.comm.um().events();
        let existing = self.source.borrow().clone();
        let source = match existing {
            Some(source) => source,
            None => {
                let source = create();
                if let Err(e) = events.add_source(source.clone()) {
                    log::warn!(
                        "{}: Failed to allocate event source: {}",
                        self.comm.get_owner_id(),
                        e
                    );
                    return Err(e.into());
                }
                self.source.replace(Some(source.clone()));
                source
            }
        };

        if let Err(e) = events.set_enabled(source, EventState::On) {
            log::warn!(
                "{}: Failed to enable event source: {}",
                self.comm.get_owner_id(),
                e
            );
            self.unwatch();
            return Err(e.into());
        }

        Ok(())
    }

    /// disable the registration, it stays allocated
    pub(super) fn unwatch(&self) {
        let source = match self.source.borrow().clone() {
            None => return,
            Some(v) => v,
        };

        if let Err(e) = self.comm.um().events().set_enabled(source, EventState::Off) {
            log::debug!(
                "{}: Failed to disable event source: {}",
                self.comm.get_owner_id(),
                e
            );
        }
    }

    /// drop the registration and the descriptor
    pub(super) fn close(&self) {
        if let Some(source) = self.source.take() {
            if let Err(e) = self.comm.um().events().del_source(source) {
                log::debug!(
                    "{}: Failed to remove event source: {}",
                    self.comm.get_owner_id(),
                    e
                );
            }
        }

        if let Some(fd) = self.fd.take() {
            log::debug!(
                "{}: closing starter fd {}.",
                self.comm.get_owner_id(),
                fd.as_raw_fd()
            );
        }
    }

    pub(super) fn release(&self) {
        self.unwatch();
        self.close();
    }

    /// duplicate the held descriptor into fds for the next manager instance
    pub(super) fn put_dup(&self, fds: &mut FdSet) -> Result<Option<RawFd>> {
        match self.fd.borrow().as_ref() {
            None => Ok(None),
            Some(fd) => fds.put_dup(fd).map(Some),
        }
    }

    /// adopt an inherited descriptor, a held one is closed first
    pub(super) fn set_fd(&self, fd: OwnedFd) {
        if self.is_open() {
            self.close();
        }
        self.fd.replace(Some(fd));
    }
}
