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

//! BusName is one of the unit types supported in sysmaster. A busname unit holds the
//! activation connection of one D-Bus name and pulls up the corresponding service when
//! a client addresses the name.
//! The BusName configuration file contains three sections: Unit,BusName,and Install.
//!
//! # Example:
//! ``` toml
//! [Unit]
//! Description = "hostname bus name"
//!
//! [BusName]
//! Name = "org.freedesktop.hostname1"
//! Service = "systemd-hostnamed.service"
//!
//! [Install]
//! WantedBy = "busnames.target"
//! ```
//! `[BusName]` section related configuration
//!
//! [BusName]
//!
//! Name: the bus name, it must match the unit name without the ".busname" suffix.
//! Defaults to that prefix.
//!
//! Service: the service unit started when the name is activated.
//! Defaults to the service with the same prefix.
//!

#[cfg(all(feature = "plugin", feature = "noplugin"))]
compile_error!("feature plugin and noplugin cannot be enabled at the same time");

pub use {manager::__um_obj_create, unit::__subunit_create_with_params};

// dependency:
// base -> rentry -> {comm | config}
// starter -> mng -> bus -> unit -> manager
mod base;
mod bus;
mod comm;
mod config;
#[cfg(test)]
mod fake;
mod manager;
mod mng;
mod rentry;
mod starter;
mod unit;
