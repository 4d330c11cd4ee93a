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

use std::path::PathBuf;

pub const ENV_COSMO_CONFIG_PATH: &str = "COSMO_CONFIG_PATH";
pub const DEFAULT_CONFIG_FILE: &str = "cosmo.yaml";

// resolve yaml config file
pub fn get_config_location() -> PathBuf {
    match std::env::var(ENV_COSMO_CONFIG_PATH) {
        Ok(path) => PathBuf::from(path),
        Err(_) => PathBuf::from(DEFAULT_CONFIG_FILE),
    }
}

pub fn set_config_file_path(path: String) {
    std::env::set_var(ENV_COSMO_CONFIG_PATH, path);
}
