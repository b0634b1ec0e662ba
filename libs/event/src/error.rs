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

//! Error define
use snafu::prelude::*;

/// Event Error
#[derive(Debug, Snafu)]
#[snafu(visibility(pub))]
#[non_exhaustive]
#[allow(missing_docs)]
pub enum Error {
    #[snafu(display("Error(event): Got an error: {:?}", source))]
    Io { source: std::io::Error },
    #[snafu(display("Error(event): Nix error: {}", source))]
    Nix { source: nix::Error },
    #[snafu(display("Error(event): '{}'.", word))]
    Other { word: &'static str },
    #[snafu(display("Error(event): source {} is not registered", token))]
    NotRegistered { token: u64 },
}

/// new Result
pub type Result<T, E = Error> = std::result::Result<T, E>;
