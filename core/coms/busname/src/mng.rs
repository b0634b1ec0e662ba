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

//! busname_mng is the core of the busname unit, implement the state transition, the
//! activation event handling and the runtime state carried across re-exec.
//!

use super::comm::BusNameUnitComm;
use super::config::BusNameConfig;
use super::rentry::{BusNameResult, BusNameState};
use super::starter::BusNameStarter;
use core::error::*;
use core::serialize::{serialize_item, serialize_item_format};
use core::unit::{unit_name_to_type, UnitActiveState, UnitNotifyFlags, UnitType};
use core::utils::fd::FdSet;
use core::IN_SET;
use event::Source;
use std::cell::RefCell;
use std::fmt::{self, Write};
use std::os::unix::prelude::RawFd;
use std::rc::{Rc, Weak};

/// the service sub states in which the service neither runs nor is about to
const SERVICE_REARM_STATES: [&str; 8] = [
    "dead",
    "stop",
    "stopsigterm",
    "stopsigkill",
    "stoppost",
    "finalsigterm",
    "finalsigkill",
    "autorestart",
];

/// the result the service reports once its start rate limit is hit
const SERVICE_START_LIMIT_HIT: &str = "failurestartlimithit";

pub(crate) struct BusNameMng {
    // associated objects
    comm: Rc<BusNameUnitComm>,
    config: Rc<BusNameConfig>,
    me: Weak<BusNameMng>,

    // owned objects
    starter: BusNameStarter,
    state: RefCell<BusNameState>,
    deserialized_state: RefCell<Option<BusNameState>>,
    result: RefCell<BusNameResult>,
}

// the declaration "pub(self)" is for identification only.
impl BusNameMng {
    pub(crate) fn new(commr: &Rc<BusNameUnitComm>, configr: &Rc<BusNameConfig>) -> Rc<BusNameMng> {
        Rc::new_cyclic(|me| BusNameMng {
            comm: Rc::clone(commr),
            config: Rc::clone(configr),
            me: me.clone(),
            starter: BusNameStarter::new(commr),
            state: RefCell::new(BusNameState::Dead),
            deserialized_state: RefCell::new(None),
            result: RefCell::new(BusNameResult::Success),
        })
    }

    pub(crate) fn start_action(&self) {
        assert!(
            IN_SET!(self.state(), BusNameState::Dead, BusNameState::Failed),
            "{}: start requested in state {}",
            self.comm.get_owner_id(),
            self.state()
        );

        self.set_result(BusNameResult::Success);
        self.enter_listening();
    }

    pub(crate) fn stop_action(&self) {
        assert!(
            IN_SET!(self.state(), BusNameState::Listening, BusNameState::Running),
            "{}: stop requested in state {}",
            self.comm.get_owner_id(),
            self.state()
        );

        self.enter_dead(BusNameResult::Success);
    }

    pub(crate) fn reset_failed(&self) {
        if self.state() == BusNameState::Failed {
            self.set_state(BusNameState::Dead);
        }
        self.set_result(BusNameResult::Success);
    }

    pub(crate) fn state(&self) -> BusNameState {
        *self.state.borrow()
    }

    pub(crate) fn get_state(&self) -> String {
        self.state().to_string()
    }

    pub(crate) fn result(&self) -> BusNameResult {
        *self.result.borrow()
    }

    pub(crate) fn get_result(&self) -> String {
        self.result().to_string()
    }

    fn set_result(&self, res: BusNameResult) {
        *self.result.borrow_mut() = res;
    }

    pub(crate) fn current_active_state(&self) -> UnitActiveState {
        self.state().to_unit_active_state()
    }

    fn bus_name(&self) -> String {
        self.config.bus_name().unwrap_or_default()
    }

    fn service(&self) -> String {
        self.config.service().unwrap_or_default()
    }

    fn set_state(&self, state: BusNameState) {
        let old_state = self.state();
        self.state.replace(state);

        if state != BusNameState::Listening {
            self.starter.unwatch();
        }

        if !IN_SET!(state, BusNameState::Listening, BusNameState::Running) {
            self.starter.close();
        }

        if state != old_state {
            log::debug!(
                "{} changed {} -> {}",
                self.comm.get_owner_id(),
                old_state,
                state
            );
        }

        if let Some(u) = self.comm.owner() {
            u.notify(
                old_state.to_unit_active_state(),
                state.to_unit_active_state(),
                UnitNotifyFlags::EMPTY,
            )
        }
    }

    fn watch(&self) -> Result<()> {
        let mng = self.me.clone();
        self.starter
            .watch(|| Rc::new(BusNameWatch::new(mng)) as Rc<dyn Source>)
    }

    pub(crate) fn enter_listening(&self) {
        if self.starter.open(&self.bus_name()).is_err() {
            self.enter_dead(BusNameResult::FailureResources);
            return;
        }

        if let Err(e) = self.watch() {
            log::warn!(
                "{}: Failed to watch starter fd: {}",
                self.comm.get_owner_id(),
                e
            );
            self.enter_dead(BusNameResult::FailureResources);
            return;
        }

        self.set_state(BusNameState::Listening);
    }

    fn enter_running(&self) {
        let um = self.comm.um();
        let id = self.comm.get_owner_id();

        /* If there's already a stop job queued, don't undo it by activating the service. */
        if um.has_stop_job(&id) {
            log::debug!(
                "{}: Suppressing activation request since unit stop is scheduled.",
                id
            );
            return;
        }

        let service = self.service();
        if !um.relation_active_or_pending(&id) && !um.has_start_job(&service) {
            if let Err(e) = um.unit_start_by_job(&service) {
                log::warn!("{}: Failed to queue service startup job: {}", id, e);
                self.enter_dead(BusNameResult::FailureResources);
                return;
            }
        }

        self.set_state(BusNameState::Running);
    }

    fn enter_dead(&self, result: BusNameResult) {
        if result != BusNameResult::Success {
            self.set_result(result);
        }

        if self.result() != BusNameResult::Success {
            self.set_state(BusNameState::Failed);
        } else {
            self.set_state(BusNameState::Dead);
        }
    }

    /// readiness of the starter fd as reported by the event loop
    pub(crate) fn dispatch_io(&self, revents: u32) -> i32 {
        if self.state() != BusNameState::Listening {
            return 0;
        }

        log::debug!("{}: Activation request", self.comm.get_owner_id());

        if revents != libc::EPOLLIN as u32 {
            log::warn!(
                "{}: Got unexpected poll event (0x{:x}) on starter fd.",
                self.comm.get_owner_id(),
                revents
            );
            self.enter_dead(BusNameResult::FailureResources);
            return 0;
        }

        self.enter_running();
        0
    }

    /// react to a state change of the unit we trigger
    pub(crate) fn trigger_notify(&self, other: &str) {
        if !IN_SET!(self.state(), BusNameState::Running, BusNameState::Listening) {
            return;
        }

        if other != self.service() || unit_name_to_type(other) != UnitType::UnitService {
            return;
        }

        let um = self.comm.um();
        if !um.load_unit_success(other) {
            return;
        }

        let sub_state = um.get_subunit_state(other);
        if sub_state == "failed" && um.get_subunit_result(other) == SERVICE_START_LIMIT_HIT {
            /* The service gave up, so do we. */
            self.enter_dead(BusNameResult::FailureServicePermanent);
            return;
        }

        /* Don't re-arm while the service still has a job queued */
        if um.has_job(other) {
            return;
        }

        if sub_state == "failed" || SERVICE_REARM_STATES.contains(&sub_state.as_str()) {
            self.enter_listening();
        }
    }

    pub(crate) fn serialize(&self, f: &mut dyn fmt::Write, fds: &mut FdSet) -> Result<()> {
        serialize_item(f, "state", &self.get_state())?;
        serialize_item(f, "result", &self.get_result())?;

        if let Some(fd) = self.starter.put_dup(fds)? {
            serialize_item_format(f, "starter-fd", format_args!("{}", fd))?;
        }

        Ok(())
    }

    pub(crate) fn deserialize_item(&self, key: &str, value: &str, fds: &mut FdSet) {
        let id = self.comm.get_owner_id();
        match key {
            "state" => match value.parse::<BusNameState>() {
                Ok(state) => {
                    self.deserialized_state.replace(Some(state));
                }
                Err(_) => log::debug!("{}: Failed to parse state value {}", id, value),
            },
            "result" => match value.parse::<BusNameResult>() {
                Ok(res) => {
                    if res != BusNameResult::Success {
                        self.set_result(res);
                    }
                }
                Err(_) => log::debug!("{}: Failed to parse result value {}", id, value),
            },
            "starter-fd" => {
                let fd = match value.parse::<RawFd>() {
                    Ok(fd) if fd >= 0 => fd,
                    _ => {
                        log::debug!("{}: Failed to parse starter fd value {}", id, value);
                        return;
                    }
                };
                match fds.remove(fd) {
                    Some(owned) => self.starter.set_fd(owned),
                    None => log::debug!("{}: Starter fd {} is not passed in", id, fd),
                }
            }
            _ => log::debug!("{}: Unknown serialization key '{}'", id, key),
        }
    }

    pub(crate) fn coldplug(&self) -> Result<()> {
        assert!(
            self.state() == BusNameState::Dead,
            "{}: coldplug in state {}",
            self.comm.get_owner_id(),
            self.state()
        );

        let pending = match self.deserialized_state.take() {
            Some(v) if v != self.state() => v,
            _ => {
                /* nothing to restore, an inherited fd has no use */
                self.starter.close();
                return Ok(());
            }
        };

        if IN_SET!(pending, BusNameState::Listening, BusNameState::Running) {
            self.starter.open(&self.bus_name())?;
        }

        if pending == BusNameState::Listening {
            self.watch()?;
        }

        self.set_state(pending);
        Ok(())
    }

    pub(crate) fn release_resources(&self) {
        self.starter.release();
    }

    pub(crate) fn dump(&self, prefix: &str) -> String {
        let mut out = String::new();
        let _ = writeln!(out, "{}Bus Name State: {}", prefix, self.state());
        let _ = writeln!(out, "{}Result: {}", prefix, self.result());
        let _ = writeln!(out, "{}Name: {}", prefix, self.bus_name());
        out
    }

    fn starter_fd(&self) -> RawFd {
        self.starter.raw_fd().unwrap_or(-1)
    }
}

/// the registration of the starter fd in the event loop
pub(crate) struct BusNameWatch {
    // associated objects
    mng: Weak<BusNameMng>,
}

impl BusNameWatch {
    pub(crate) fn new(mng: Weak<BusNameMng>) -> BusNameWatch {
        BusNameWatch { mng }
    }
}

impl Source for BusNameWatch {
    fn fd(&self) -> RawFd {
        self.mng.upgrade().map_or(-1, |mng| mng.starter_fd())
    }

    fn epoll_event(&self) -> u32 {
        (libc::EPOLLIN) as u32
    }

    fn priority(&self) -> i8 {
        0i8
    }

    fn dispatch(&self, revents: u32) -> i32 {
        match self.mng.upgrade() {
            None => 0,
            Some(mng) => mng.dispatch_io(revents),
        }
    }

    fn token(&self) -> u64 {
        self as *const BusNameWatch as u64
    }

    fn description(&self) -> String {
        String::from("busname-starter")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fake::{dev_null, FakeUm, FakeUnit};
    use core::unit::RunningMode;
    use std::os::unix::io::AsRawFd;

    const EPOLLIN: u32 = libc::EPOLLIN as u32;

    struct Env {
        um: Rc<FakeUm>,
        unit: Rc<FakeUnit>,
        mng: Rc<BusNameMng>,
    }

    fn setup() -> Env {
        let um = FakeUm::new();
        let comm = Rc::new(BusNameUnitComm::new(um.clone()));
        let unit = FakeUnit::new("org.example.Foo.busname");
        comm.attach_unit(unit.clone());
        let config = Rc::new(BusNameConfig::new());
        config.set_bus_name("org.example.Foo");
        config.set_service("org.example.Foo.service");
        let mng = BusNameMng::new(&comm, &config);
        Env { um, unit, mng }
    }

    fn check_invariants(env: &Env) {
        let state = env.mng.state();
        assert_eq!(
            env.mng.starter.is_open(),
            IN_SET!(state, BusNameState::Listening, BusNameState::Running),
            "fd ownership in state {}",
            state
        );
        if env.mng.starter.is_watched() {
            assert!(env.mng.starter.is_open());
        }
        if env.um.events.enabled() > 0 {
            assert_eq!(state, BusNameState::Listening);
        }
        assert!(env.um.events.registered() <= 1);
    }

    fn activate(env: &Env, revents: u32) -> i32 {
        let source = env.um.events.source().unwrap();
        assert_eq!(source.fd(), env.mng.starter_fd());
        source.dispatch(revents)
    }

    #[test]
    fn test_start_and_activate() {
        let env = setup();
        env.mng.start_action();
        assert_eq!(env.mng.state(), BusNameState::Listening);
        assert_eq!(
            env.um.starter_calls.borrow().as_slice(),
            &[("system".to_string(), "org.example.Foo".to_string())]
        );
        assert_eq!(env.um.events.registered(), 1);
        assert_eq!(env.um.events.enabled(), 1);
        assert_eq!(
            env.unit.notified.borrow().last(),
            Some(&(UnitActiveState::InActive, UnitActiveState::Active))
        );
        check_invariants(&env);

        assert_eq!(activate(&env, EPOLLIN), 0);
        assert_eq!(env.mng.state(), BusNameState::Running);
        assert_eq!(
            env.um.jobs.borrow().as_slice(),
            &["org.example.Foo.service".to_string()]
        );
        assert_eq!(env.um.events.enabled(), 0);
        check_invariants(&env);
    }

    #[test]
    fn test_user_scope() {
        let env = setup();
        env.um.mode.set(RunningMode::User);
        env.mng.start_action();
        assert_eq!(env.um.starter_calls.borrow()[0].0, "user");
    }

    #[test]
    fn test_open_failure() {
        let env = setup();
        env.um.starter_fail.set(true);
        env.mng.start_action();
        assert_eq!(env.mng.state(), BusNameState::Failed);
        assert_eq!(env.mng.result(), BusNameResult::FailureResources);
        assert_eq!(env.um.events.registered(), 0);
        check_invariants(&env);
    }

    #[test]
    fn test_watch_failure() {
        let env = setup();
        env.um.events.fail_enable.set(true);
        env.mng.start_action();
        assert_eq!(env.mng.state(), BusNameState::Failed);
        assert_eq!(env.mng.result(), BusNameResult::FailureResources);
        check_invariants(&env);

        env.um.events.fail_add.set(true);
        env.mng.reset_failed();
        env.mng.start_action();
        assert_eq!(env.mng.state(), BusNameState::Failed);
        check_invariants(&env);
    }

    #[test]
    fn test_service_failed_permanently() {
        let env = setup();
        env.mng.start_action();
        activate(&env, EPOLLIN);
        assert_eq!(env.mng.state(), BusNameState::Running);

        env.um.set_service("failed", SERVICE_START_LIMIT_HIT);
        env.mng.trigger_notify("org.example.Foo.service");
        assert_eq!(env.mng.state(), BusNameState::Failed);
        assert_eq!(env.mng.result(), BusNameResult::FailureServicePermanent);
        assert_eq!(env.um.events.registered(), 0);
        check_invariants(&env);
    }

    #[test]
    fn test_service_failed_transiently() {
        let env = setup();
        env.mng.start_action();
        activate(&env, EPOLLIN);
        let fd = env.mng.starter_fd();

        env.um.set_service("failed", "failureexitcode");
        env.mng.trigger_notify("org.example.Foo.service");
        assert_eq!(env.mng.state(), BusNameState::Listening);
        assert_eq!(env.mng.result(), BusNameResult::Success);
        assert_eq!(env.mng.starter_fd(), fd);
        assert_eq!(env.um.starter_calls.borrow().len(), 1);
        assert_eq!(env.um.events.enabled(), 1);
        check_invariants(&env);
    }

    #[test]
    fn test_service_stopped_rearms() {
        for sub_state in [
            "dead",
            "failed",
            "stop",
            "stopsigterm",
            "stopsigkill",
            "stoppost",
            "finalsigterm",
            "finalsigkill",
            "autorestart",
        ] {
            let env = setup();
            env.mng.start_action();
            activate(&env, EPOLLIN);
            env.um.set_service(sub_state, "success");
            env.mng.trigger_notify("org.example.Foo.service");
            assert_eq!(env.mng.state(), BusNameState::Listening, "{}", sub_state);
            check_invariants(&env);
        }
    }

    #[test]
    fn test_trigger_ignored() {
        let env = setup();
        env.um.set_service("failed", SERVICE_START_LIMIT_HIT);
        env.mng.trigger_notify("org.example.Foo.service");
        assert_eq!(env.mng.state(), BusNameState::Dead);

        env.mng.start_action();
        activate(&env, EPOLLIN);
        env.mng.trigger_notify("other.service");
        env.mng.trigger_notify("org.example.Foo.socket");
        assert_eq!(env.mng.state(), BusNameState::Running);

        env.um.set_service("running", "success");
        env.mng.trigger_notify("org.example.Foo.service");
        assert_eq!(env.mng.state(), BusNameState::Running);
        check_invariants(&env);
    }

    #[test]
    fn test_trigger_service_not_loaded() {
        let env = setup();
        env.mng.start_action();
        activate(&env, EPOLLIN);
        env.um.service_loaded.set(false);
        env.um.set_service("dead", "success");
        env.mng.trigger_notify("org.example.Foo.service");
        assert_eq!(env.mng.state(), BusNameState::Running);

        env.um.set_service("failed", SERVICE_START_LIMIT_HIT);
        env.mng.trigger_notify("org.example.Foo.service");
        assert_eq!(env.mng.state(), BusNameState::Running);
        check_invariants(&env);
    }

    #[test]
    fn test_trigger_service_job_pending() {
        let env = setup();
        env.mng.start_action();
        activate(&env, EPOLLIN);
        env.um.service_job.set(true);
        env.um.set_service("autorestart", "success");
        env.mng.trigger_notify("org.example.Foo.service");
        assert_eq!(env.mng.state(), BusNameState::Running);

        /* a permanent failure still propagates */
        env.um.set_service("failed", SERVICE_START_LIMIT_HIT);
        env.mng.trigger_notify("org.example.Foo.service");
        assert_eq!(env.mng.state(), BusNameState::Failed);
        assert_eq!(env.mng.result(), BusNameResult::FailureServicePermanent);
        check_invariants(&env);
    }

    #[test]
    fn test_unexpected_event() {
        let env = setup();
        env.mng.start_action();
        activate(&env, (libc::EPOLLIN | libc::EPOLLHUP) as u32);
        assert_eq!(env.mng.state(), BusNameState::Failed);
        assert_eq!(env.mng.result(), BusNameResult::FailureResources);
        assert!(!env.mng.starter.is_open());
        assert!(env.um.jobs.borrow().is_empty());
        check_invariants(&env);
    }

    #[test]
    fn test_event_ignored_when_not_listening() {
        let env = setup();
        env.mng.start_action();
        activate(&env, EPOLLIN);
        assert_eq!(env.mng.dispatch_io(libc::EPOLLHUP as u32), 0);
        assert_eq!(env.mng.state(), BusNameState::Running);
        assert_eq!(env.um.jobs.borrow().len(), 1);
    }

    #[test]
    fn test_stop_pending_suppresses_activation() {
        let env = setup();
        env.mng.start_action();
        env.um.stop_pending.set(true);
        activate(&env, EPOLLIN);
        assert_eq!(env.mng.state(), BusNameState::Listening);
        assert!(env.um.jobs.borrow().is_empty());
        check_invariants(&env);
    }

    #[test]
    fn test_service_active_skips_job() {
        let env = setup();
        env.mng.start_action();
        env.um.service_active.set(true);
        activate(&env, EPOLLIN);
        assert_eq!(env.mng.state(), BusNameState::Running);
        assert!(env.um.jobs.borrow().is_empty());
    }

    #[test]
    fn test_job_failure() {
        let env = setup();
        env.mng.start_action();
        env.um.job_fail.set(true);
        activate(&env, EPOLLIN);
        assert_eq!(env.mng.state(), BusNameState::Failed);
        assert_eq!(env.mng.result(), BusNameResult::FailureResources);
        check_invariants(&env);
    }

    #[test]
    fn test_enter_listening_twice() {
        let env = setup();
        env.mng.start_action();
        env.mng.enter_listening();
        assert_eq!(env.mng.state(), BusNameState::Listening);
        assert_eq!(env.um.starter_calls.borrow().len(), 1);
        assert_eq!(env.um.events.registered(), 1);
        assert_eq!(env.um.events.enabled(), 1);
        check_invariants(&env);
    }

    #[test]
    fn test_stop_and_reset_failed() {
        let env = setup();
        env.mng.start_action();
        env.mng.stop_action();
        assert_eq!(env.mng.state(), BusNameState::Dead);
        assert_eq!(env.um.events.registered(), 0);
        check_invariants(&env);

        env.um.starter_fail.set(true);
        env.mng.start_action();
        assert_eq!(env.mng.state(), BusNameState::Failed);
        env.mng.reset_failed();
        assert_eq!(env.mng.state(), BusNameState::Dead);
        assert_eq!(env.mng.result(), BusNameResult::Success);

        /* no-op when not failed */
        env.mng.reset_failed();
        assert_eq!(env.mng.state(), BusNameState::Dead);
    }

    #[test]
    fn test_notify_on_self_transition() {
        let env = setup();
        env.mng.start_action();
        let before = env.unit.notified.borrow().len();
        env.mng.enter_listening();
        assert_eq!(env.unit.notified.borrow().len(), before + 1);
        assert_eq!(
            env.unit.notified.borrow().last(),
            Some(&(UnitActiveState::Active, UnitActiveState::Active))
        );
    }

    #[test]
    #[should_panic]
    fn test_start_while_listening() {
        let env = setup();
        env.mng.start_action();
        env.mng.start_action();
    }

    #[test]
    #[should_panic]
    fn test_stop_while_dead() {
        let env = setup();
        env.mng.stop_action();
    }

    #[test]
    #[should_panic]
    fn test_stop_while_failed() {
        let env = setup();
        env.um.starter_fail.set(true);
        env.mng.start_action();
        env.mng.stop_action();
    }

    #[test]
    fn test_serialize_coldplug() {
        let env = setup();
        env.mng.start_action();
        let mut buf = String::new();
        let mut fds = FdSet::new();
        env.mng.serialize(&mut buf, &mut fds).unwrap();
        assert_eq!(fds.len(), 1);
        let fd = fds.raw_fds()[0];
        assert_eq!(
            buf,
            format!("state=listening\nresult=success\nstarter-fd={}\n", fd)
        );

        let next = setup();
        for (key, value) in core::serialize::deserialize_items(&buf) {
            next.mng.deserialize_item(key, value, &mut fds);
        }
        assert!(fds.is_empty());
        assert_eq!(next.mng.state(), BusNameState::Dead);

        next.mng.coldplug().unwrap();
        assert_eq!(next.mng.state(), BusNameState::Listening);
        assert_eq!(next.mng.result(), BusNameResult::Success);
        assert_eq!(next.mng.starter_fd(), fd);
        assert!(next.um.starter_calls.borrow().is_empty());
        assert_eq!(next.um.events.enabled(), 1);
        check_invariants(&next);

        /* consumed once */
        next.mng.stop_action();
        next.mng.coldplug().unwrap();
        assert_eq!(next.mng.state(), BusNameState::Dead);
    }

    #[test]
    fn test_coldplug_inherited_fd() {
        let env = setup();
        let inherited = dev_null();
        let raw = inherited.as_raw_fd();
        let mut fds = FdSet::from_fds(vec![inherited]);
        env.mng.deserialize_item("state", "listening", &mut fds);
        env.mng
            .deserialize_item("starter-fd", &raw.to_string(), &mut fds);

        env.mng.coldplug().unwrap();
        assert_eq!(env.mng.state(), BusNameState::Listening);
        assert_eq!(env.mng.starter_fd(), raw);
        assert!(env.um.starter_calls.borrow().is_empty());
        assert_eq!(env.um.events.enabled(), 1);
        check_invariants(&env);
    }

    #[test]
    fn test_coldplug_running_failed() {
        let env = setup();
        let mut fds = FdSet::new();
        env.mng.deserialize_item("state", "running", &mut fds);
        env.mng.coldplug().unwrap();
        assert_eq!(env.mng.state(), BusNameState::Running);
        assert_eq!(env.um.starter_calls.borrow().len(), 1);
        assert_eq!(env.um.events.registered(), 0);
        check_invariants(&env);

        let env = setup();
        env.mng.deserialize_item("state", "failed", &mut fds);
        env.mng
            .deserialize_item("result", "service-failed-permanent", &mut fds);
        env.mng.coldplug().unwrap();
        assert_eq!(env.mng.state(), BusNameState::Failed);
        assert_eq!(env.mng.result(), BusNameResult::FailureServicePermanent);
        check_invariants(&env);
    }

    #[test]
    fn test_coldplug_open_failure() {
        let env = setup();
        env.um.starter_fail.set(true);
        let mut fds = FdSet::new();
        env.mng.deserialize_item("state", "listening", &mut fds);
        assert!(env.mng.coldplug().is_err());
        assert_eq!(env.mng.state(), BusNameState::Dead);
        assert!(env.mng.deserialized_state.borrow().is_none());
    }

    #[test]
    fn test_deserialize_malformed() {
        let env = setup();
        let mut fds = FdSet::from_fds(vec![dev_null()]);
        env.mng.deserialize_item("state", "waiting", &mut fds);
        env.mng.deserialize_item("result", "bogus", &mut fds);
        env.mng.deserialize_item("starter-fd", "-1", &mut fds);
        env.mng.deserialize_item("starter-fd", "abc", &mut fds);
        env.mng.deserialize_item("starter-fd", "9999", &mut fds);
        env.mng.deserialize_item("future-key", "1", &mut fds);
        assert!(env.mng.deserialized_state.borrow().is_none());
        assert_eq!(env.mng.result(), BusNameResult::Success);
        assert!(!env.mng.starter.is_open());
        assert_eq!(fds.len(), 1);

        env.mng.coldplug().unwrap();
        assert_eq!(env.mng.state(), BusNameState::Dead);
    }

    #[test]
    fn test_release_resources() {
        let env = setup();
        env.mng.start_action();
        env.mng.release_resources();
        assert!(!env.mng.starter.is_open());
        assert_eq!(env.um.events.registered(), 0);
    }

    #[test]
    fn test_dump() {
        let env = setup();
        assert_eq!(
            env.mng.dump("\t"),
            "\tBus Name State: dead\n\tResult: success\n\tName: org.example.Foo\n"
        );
    }
}
