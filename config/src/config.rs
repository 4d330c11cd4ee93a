/*
 * Licensed to the Apache Software Foundation (ASF) under one or more
 * contributor license agreements.  See the NOTICE file distributed with
 * this work for additional information regarding copyright ownership.
 * The ASF licenses this file to You under the Apache License, Version 2.0
 * (the "License"); you may not use this file except in compliance with
 * the License.  You may obtain a copy of the License at
 *
 *     http://www.apache.org/licenses/LICENSE-2.0
 *
 * Unless required by applicable law or agreed to in writing, software
 * distributed under the License is distributed on an "AS IS" BASIS,
 * WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
 * See the License for the specific language governing permissions and
 * limitations under the License.
 */

use std::{collections::HashMap, fs, sync::RwLock};

use cosmo_logger::tracing;
use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};

use crate::{error::ConfigError, location::get_config_location};

pub const COSMO_CONFIG_PREFIX: &str = "cosmo";

static GLOBAL_ROOT_CONFIG: Lazy<RwLock<Option<RootConfig>>> = Lazy::new(|| RwLock::new(None));

/// used to storage all structed config, from some source: cmd, file..;
/// business init by read Config trait
#[derive(Debug, Default, Serialize, Deserialize, Clone)]
pub struct RootConfig {
    #[serde(default)]
    pub node: NodeConfig,

    #[serde(default)]
    pub data: HashMap<String, String>,
}

#[derive(Debug, Serialize, Deserialize, Clone)]
#[serde(default)]
pub struct NodeConfig {
    pub http_port: String,
    pub graph_api_token: String,
    pub router_config_path: String,
    pub log_level: String,
}

impl Default for NodeConfig {
    fn default() -> Self {
        Self {
            http_port: "3002".to_string(),
            graph_api_token: "".to_string(),
            router_config_path: "router.json".to_string(),
            log_level: "info".to_string(),
        }
    }
}

/// Loading the config file is optional; a missing or broken file falls back
/// to defaults so the node can still come up with env-provided settings.
pub fn get_global_config() -> RootConfig {
    if GLOBAL_ROOT_CONFIG.read().unwrap().as_ref().is_none() {
        let c = match RootConfig::load() {
            Ok(v) => v,
            Err(err) => {
                tracing::error!("could not load config, using defaults, error: {}", err);
                RootConfig::default()
            }
        };
        *GLOBAL_ROOT_CONFIG.write().unwrap() = Some(c);
    }

    GLOBAL_ROOT_CONFIG.read().unwrap().as_ref().unwrap().clone()
}

impl RootConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn load() -> Result<Self, ConfigError> {
        let config_path = get_config_location();
        tracing::info!("loading config from: {:?}", config_path);

        let data = fs::read(&config_path)?;
        let conf: HashMap<String, RootConfig> = serde_yaml::from_slice(&data)?;
        conf.get(COSMO_CONFIG_PREFIX)
            .cloned()
            .ok_or(ConfigError::MissingPrefix(COSMO_CONFIG_PREFIX))
    }
}

impl Config for RootConfig {
    fn bool(&self, key: &str) -> bool {
        match self.data.get(key) {
            None => false,
            Some(val) => match val.parse::<bool>() {
                Ok(v) => v,
                Err(_err) => {
                    tracing::error!("key: {}, val: {} is not boolean", key, val);
                    false
                }
            },
        }
    }

    fn string(&self, key: &str) -> String {
        match self.data.get(key) {
            None => "".to_string(),
            Some(val) => val.to_string(),
        }
    }
}

pub trait Config {
    fn bool(&self, key: &str) -> bool;
    fn string(&self, key: &str) -> String;
}
