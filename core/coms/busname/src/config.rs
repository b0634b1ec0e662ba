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
//

//! busname config mod load the conf file list and convert it to structure which is defined in this mod.
//!
#![allow(non_snake_case)]
use crate::rentry::SectionBusName;
use confique::{Config, FileFormat, Partial};
use core::error::*;
use std::{cell::RefCell, path::PathBuf, rc::Rc};

#[derive(Config, Default, Debug)]
pub(super) struct BusNameConfigData {
    #[config(nested)]
    pub BusName: SectionBusName,
}

pub(super) struct BusNameConfig {
    // owned objects
    data: Rc<RefCell<BusNameConfigData>>,
}

impl BusNameConfig {
    pub(super) fn new() -> Self {
        BusNameConfig {
            data: Rc::new(RefCell::new(BusNameConfigData::default())),
        }
    }

    pub(super) fn load(&self, paths: Vec<PathBuf>) -> Result<()> {
        type ConfigPartial = <BusNameConfigData as Config>::Partial;
        let mut partial: ConfigPartial = match Partial::from_env() {
            Ok(v) => v,
            Err(e) => {
                return Err(Error::ConfigureError {
                    msg: format!("Invalid Configuration: {}", e),
                })
            }
        };
        /* The first config wins, so add default values at last. */
        log::debug!("Loading busname config from: {:?}", paths);
        for path in paths {
            partial = match confique::File::with_format(&path, FileFormat::Toml).load() {
                Err(e) => {
                    log::error!("Failed to load {path:?}: {e}, skipping");
                    continue;
                }
                Ok(v) => partial.with_fallback(v),
            }
        }
        partial = partial.with_fallback(ConfigPartial::default_values());
        *self.data.borrow_mut() = match BusNameConfigData::from_partial(partial) {
            Err(e) => {
                log::error!("Invalid Configuration: {}", e);
                return Err(Error::ConfigureError {
                    msg: format!("Invalid Configuration: {}", e),
                });
            }
            Ok(v) => v,
        };

        Ok(())
    }

    pub(super) fn bus_name(&self) -> Option<String> {
        self.data.borrow().BusName.Name.clone()
    }

    pub(super) fn set_bus_name(&self, name: &str) {
        self.data.borrow_mut().BusName.Name = Some(name.to_string());
    }

    pub(super) fn service(&self) -> Option<String> {
        self.data.borrow().BusName.Service.clone()
    }

    pub(super) fn set_service(&self, service: &str) {
        self.data.borrow_mut().BusName.Service = Some(service.to_string());
    }
}
