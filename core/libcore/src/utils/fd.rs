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

//!
use crate::error::*;
use nix::{
    errno::Errno,
    fcntl::{FcntlArg, FdFlag},
};
use std::collections::HashMap;
use std::os::unix::io::{AsFd, AsRawFd, OwnedFd, RawFd};

///
pub fn fd_cloexec(fd: RawFd, cloexec: bool) -> Result<(), Errno> {
    assert!(fd >= 0);

    let flags = nix::fcntl::fcntl(fd, FcntlArg::F_GETFD)?;

    let fd_flag = FdFlag::from_bits_truncate(flags);

    let nflag = match cloexec {
        true => fd_flag | FdFlag::FD_CLOEXEC,
        false => fd_flag & !FdFlag::FD_CLOEXEC,
    };

    nix::fcntl::fcntl(fd, FcntlArg::F_SETFD(nflag))?;

    Ok(())
}

/// Descriptors carried across re-exec, keyed by their number.
///
/// Before re-exec the units put duplicates in, which stay open over exec.
/// The next instance rebuilds the set from the inherited descriptors and units
/// take theirs back with [`FdSet::remove`]. Whatever is left when the set is
/// dropped gets closed.
#[derive(Debug, Default)]
pub struct FdSet {
    fds: HashMap<RawFd, OwnedFd>,
}

impl FdSet {
    ///
    pub fn new() -> Self {
        FdSet {
            fds: HashMap::new(),
        }
    }

    /// adopt descriptors, e.g. the ones inherited over exec
    pub fn from_fds(fds: Vec<OwnedFd>) -> Self {
        let mut set = FdSet::new();
        for fd in fds {
            set.fds.insert(fd.as_raw_fd(), fd);
        }
        set
    }

    /// duplicate fd into the set and return the number of the duplicate,
    /// the duplicate is kept open over exec
    pub fn put_dup<F: AsFd>(&mut self, fd: &F) -> Result<RawFd> {
        let dup = fd.as_fd().try_clone_to_owned().context(IoSnafu)?;
        let raw = dup.as_raw_fd();
        fd_cloexec(raw, false).context(NixSnafu)?;
        self.fds.insert(raw, dup);
        Ok(raw)
    }

    /// take ownership of fd out of the set
    pub fn remove(&mut self, fd: RawFd) -> Option<OwnedFd> {
        self.fds.remove(&fd)
    }

    ///
    pub fn len(&self) -> usize {
        self.fds.len()
    }

    ///
    pub fn is_empty(&self) -> bool {
        self.fds.is_empty()
    }

    /// the numbers held, sorted
    pub fn raw_fds(&self) -> Vec<RawFd> {
        let mut fds: Vec<RawFd> = self.fds.keys().copied().collect();
        fds.sort_unstable();
        fds
    }
}
