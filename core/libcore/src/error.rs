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

//! Error define, There is no globally defined error library, and each crate defines its own error.rs.
//! Within a crate, only this unified Error can be used, and attention should be paid to avoiding semantic duplication.
//! The unit components and the manager share this Error to avoid frequent conversions.

/// Reuse the Errno from the nix library:
/// Errno is an enumeration type that defines error codes that may be returned by Linux system calls
/// and other system interfaces.
pub use nix::errno::Errno;
use snafu::prelude::*;
#[allow(unused_imports)]
pub use snafu::ResultExt;

/// libcore Error:
/// errors inherited from underlying crates (nix/io/event) plus the unit related error codes.
#[allow(missing_docs)]
#[derive(Debug, Snafu)]
#[snafu(visibility(pub))]
#[non_exhaustive]
pub enum Error {
    #[snafu(display("Error parsing from string: {}", source))]
    Parse {
        source: Box<dyn std::error::Error + Send + Sync>,
    },

    #[snafu(display("IoError(libcore)"))]
    Io {
        source: std::io::Error,
    },

    #[snafu(display("FmtError(libcore)"))]
    Fmt {
        source: std::fmt::Error,
    },

    #[snafu(display("NixError(libcore)"))]
    Nix {
        source: nix::Error,
    },

    #[snafu(display("InvalidData(libcore)"))]
    InvalidData,

    #[snafu(display("NotFound(libcore): '{}'.", what))]
    NotFound {
        what: String,
    },

    #[snafu(display("OtherError(libcore): '{}'.", msg))]
    Other {
        msg: String,
    },

    #[snafu(display("Invalid Name: {}", what))]
    InvalidName {
        what: String,
    },

    /// events error
    #[snafu(display("event error; '{}'.", msg))]
    EventError {
        msg: String,
    },

    #[snafu(display("load unit error '{}'.", msg))]
    LoadError {
        msg: String,
    },

    #[snafu(display("unit configuration error: '{}'.", msg))]
    ConfigureError {
        msg: String,
    },

    /// UnitAction Error
    #[snafu(display("EAgain(UnitActionError)"))]
    UnitActionEAgain,
    #[snafu(display("EOpNotSupp(UnitActionError)"))]
    UnitActionEOpNotSupp,
    #[snafu(display("EInval(UnitActionError)"))]
    UnitActionEInval,
    #[snafu(display("ENoent(UnitActionError)"))]
    UnitActionENoent,
}

/// Convert to the standard linux error code
impl From<Error> for nix::Error {
    fn from(e: Error) -> Self {
        match e {
            Error::Parse { source: _ } => nix::Error::EINVAL,
            Error::Io { source } => source
                .raw_os_error()
                .map_or(nix::Error::EIO, nix::Error::from_i32),
            Error::Fmt { source: _ } => nix::Error::EIO,
            Error::Nix { source } => source,
            Error::InvalidData => nix::Error::EINVAL,
            Error::NotFound { what: _ } => nix::Error::ENOENT,
            Error::Other { msg: _ } => nix::Error::EIO,
            Error::InvalidName { what: _ } => nix::Error::EINVAL,
            Error::EventError { msg: _ } => nix::Error::EIO,
            Error::LoadError { msg: _ } => nix::Error::EIO,
            Error::ConfigureError { msg: _ } => nix::Error::EINVAL,
            Error::UnitActionEAgain => nix::Error::EAGAIN,
            Error::UnitActionEOpNotSupp => nix::Error::ENOTSUP,
            Error::UnitActionEInval => nix::Error::EINVAL,
            Error::UnitActionENoent => nix::Error::ENOENT,
        }
    }
}

#[allow(unused_macros)]
macro_rules! errfrom {
    ($($st:ty),* => $variant:ident) => (
        $(
            impl From<$st> for Error {
                fn from(e: $st) -> Error {
                    Error::$variant { source: e.into() }
                }
            }
        )*
    )
}

errfrom!(std::num::ParseIntError, std::string::ParseError => Parse);
errfrom!(nix::errno::Errno => Nix);

impl From<std::io::Error> for Error {
    fn from(source: std::io::Error) -> Error {
        Error::Io { source }
    }
}

impl From<String> for Error {
    fn from(msg: String) -> Error {
        Error::Other { msg }
    }
}

impl From<event::Error> for Error {
    fn from(source: event::Error) -> Error {
        Error::EventError {
            msg: format!("{:?}", source),
        }
    }
}

/// new Result
pub type Result<T, E = Error> = std::result::Result<T, E>;
