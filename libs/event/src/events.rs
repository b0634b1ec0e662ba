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

//! The manager loop, seen from a unit.
//!
//! Only the operations units need are part of the trait. Registration is
//! separate from enabling: a source can stay registered while it is switched
//! off, and is switched back on without being added again.
use crate::error::*;
use crate::{EventState, Source};
use std::rc::Rc;

/// An event scheduling framework based on epoll
pub trait Events {
    /// add source which implement Source trait, the source starts disabled
    fn add_source(&self, source: Rc<dyn Source>) -> Result<i32>;

    /// check if the source exists
    fn has_source(&self, source: Rc<dyn Source>) -> bool;

    /// remove the source, it will no longer be dispatched
    fn del_source(&self, source: Rc<dyn Source>) -> Result<i32>;

    /// change the dispatch state of a registered source
    fn set_enabled(&self, source: Rc<dyn Source>, state: EventState) -> Result<i32>;
}
