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

use crate::level::LevelWrapper;

pub(crate) const ENV_COSMO_LOG_LEVEL: &str = "COSMO_LOG_LEVEL";

pub(crate) fn default() {
    match std::env::var(ENV_COSMO_LOG_LEVEL) {
        Ok(v) => with_level(&v),
        Err(_) => with_level("info"),
    }
}

pub(crate) fn with_level(level: &str) {
    tracing_subscriber::fmt()
        .compact()
        .with_max_level(LevelWrapper::from(level).inner)
        .with_thread_names(false)
        .with_line_number(true)
        // sets this to be the default, global collector for this application.
        .try_init()
        .ok();
}
