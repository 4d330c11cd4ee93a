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

use thiserror::Error;

/// Lookup failures surfaced to the dispatch layer. All of them are
/// caller-handled: the transport answers the peer with an unimplemented
/// status, the process keeps running.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ResolveError {
    #[error("method {method} is not registered on service {service}")]
    MethodNotFound { service: String, method: String },

    #[error("service {service} is not registered")]
    ServiceNotFound { service: String },

    #[error("invalid request path: {path}")]
    InvalidPath { path: String },
}
