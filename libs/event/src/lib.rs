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

//! # Event-source contract of the sysmaster reactor
//!
//! The manager owns a single epoll based loop. Units never touch the loop
//! directly: they describe what they want watched by implementing [`Source`]
//! and hand it to the loop through the [`Events`] trait. The loop calls
//! [`Source::dispatch`] with the raw epoll mask when the descriptor fires.
//!
//! # Example:
//! ```rust
//! # use std::os::unix::io::RawFd;
//! # use event::Source;
//! #
//! struct Starter {
//!     fd: RawFd,
//! }
//!
//! impl Source for Starter {
//!     fn fd(&self) -> RawFd {
//!         self.fd
//!     }
//!
//!     fn priority(&self) -> i8 {
//!         0i8
//!     }
//!
//!     fn dispatch(&self, revents: u32) -> i32 {
//!         if revents != libc::EPOLLIN as u32 {
//!             return -1;
//!         }
//!         0
//!     }
//!
//!     fn token(&self) -> u64 {
//!         self.fd as u64
//!     }
//! }
//!
//! let s = Starter { fd: 3 };
//! assert_eq!(s.dispatch(libc::EPOLLIN as u32), 0);
//! assert_eq!(s.dispatch(libc::EPOLLHUP as u32), -1);
//! ```
//!
pub mod error;
pub mod events;
pub mod source;

pub use crate::events::Events;
pub use crate::source::Source;
pub use error::*;

/// The dispatch status of the event
#[derive(PartialEq, Eq, Hash, Debug, Clone, Copy)]
pub enum EventState {
    /// Start scheduling
    On,
    /// Close scheduling, the registration is kept
    Off,
    /// Stop after dispatching once
    OneShot,
}
