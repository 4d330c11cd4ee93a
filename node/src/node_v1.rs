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

//! Binding for the `wg.cosmo.node.v1` api, in the shape the schema generator
//! emits for connect services. The request/response schemas live with that
//! generator; only their fully qualified type names appear here.

use crate::descriptor::{MethodDescriptor, MethodKind, ServiceDescriptor};

pub const SERVICE_NAME: &str = "wg.cosmo.node.v1.NodeService";

pub const METHOD_GET_LATEST_VALID_ROUTER_CONFIG: &str = "GetLatestValidRouterConfig";

pub const TYPE_GET_CONFIG_REQUEST: &str = "wg.cosmo.node.v1.GetConfigRequest";
pub const TYPE_GET_CONFIG_RESPONSE: &str = "wg.cosmo.node.v1.GetConfigResponse";

/// Descriptor for `wg.cosmo.node.v1.NodeService`.
pub fn service_descriptor() -> ServiceDescriptor {
    ServiceDescriptor::new(SERVICE_NAME).with_method(MethodDescriptor::new(
        METHOD_GET_LATEST_VALID_ROUTER_CONFIG,
        TYPE_GET_CONFIG_REQUEST,
        TYPE_GET_CONFIG_RESPONSE,
        MethodKind::Unary,
    ))
}
