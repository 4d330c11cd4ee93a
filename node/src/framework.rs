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

use std::sync::Arc;

use cosmo_config::{get_global_config, RootConfig};
use cosmo_logger::tracing::{debug, info};

use crate::{descriptor::ServiceDescriptor, node_v1, registry::ServiceRegistry};

/// Startup wiring: collects service descriptors and configuration, then
/// hands the transport layer one immutable registry for the process's
/// lifetime.
#[derive(Default)]
pub struct Node {
    registry: ServiceRegistry,
    config: Option<RootConfig>,
}

impl Node {
    pub fn new() -> Node {
        Node::default()
    }

    pub fn with_config(mut self, config: RootConfig) -> Self {
        self.config = Some(config);
        self
    }

    pub fn register_service(mut self, descriptor: ServiceDescriptor) -> Self {
        self.registry = self.registry.with_service(descriptor);
        self
    }

    /// Initializes logging, resolves configuration, and seals the registry.
    /// When no service was registered, the built-in node service binding is
    /// mounted, matching what a bare node deployment serves.
    pub fn init(mut self) -> Arc<ServiceRegistry> {
        let config = self.config.take().unwrap_or_else(get_global_config);
        cosmo_logger::init_with_level(&config.node.log_level);
        debug!("node config: {:?}", config.node);

        if self.registry.is_empty() {
            self.registry = self.registry.with_service(node_v1::service_descriptor());
        }

        for service in self.registry.list_services() {
            for method in service.list_methods() {
                info!(
                    "registered: {}/{} ({})",
                    service.service_name(),
                    method.name(),
                    method.kind()
                );
            }
        }

        Arc::new(self.registry)
    }
}
