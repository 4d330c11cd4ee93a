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

use std::collections::HashMap;

use crate::{
    descriptor::{MethodDescriptor, ServiceDescriptor},
    error::ResolveError,
    invocation::RpcInvocation,
};

/// Service table the transport layer receives at startup. Built once via
/// `with_service`, read-only afterwards; concurrent lookups need no locking
/// because nothing mutates post-construction. Hand it out behind an `Arc`.
#[derive(Debug, Clone, Default)]
pub struct ServiceRegistry {
    services: Vec<ServiceDescriptor>,
    index: HashMap<String, usize>,
}

impl ServiceRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registering the same service name twice replaces the earlier entry in
    /// place, keeping its enumeration position.
    pub fn with_service(mut self, service: ServiceDescriptor) -> Self {
        match self.index.get(service.service_name()) {
            Some(&pos) => self.services[pos] = service,
            None => {
                self.index
                    .insert(service.service_name().to_string(), self.services.len());
                self.services.push(service);
            }
        }
        self
    }

    pub fn is_empty(&self) -> bool {
        self.services.is_empty()
    }

    pub fn resolve_service(&self, name: &str) -> Result<&ServiceDescriptor, ResolveError> {
        self.index
            .get(name)
            .map(|&pos| &self.services[pos])
            .ok_or_else(|| ResolveError::ServiceNotFound {
                service: name.to_string(),
            })
    }

    pub fn resolve(&self, invocation: &RpcInvocation) -> Result<&MethodDescriptor, ResolveError> {
        self.resolve_service(invocation.service_unique_name())?
            .resolve_method(invocation.method_name())
    }

    /// Convenience for the dispatch seam: `/{service}/{method}` straight to
    /// a method descriptor.
    pub fn resolve_path(&self, path: &str) -> Result<&MethodDescriptor, ResolveError> {
        let invocation = RpcInvocation::from_path(path)?;
        self.resolve(&invocation)
    }

    /// Fresh iterator each call, declaration order.
    pub fn list_services(&self) -> impl Iterator<Item = &ServiceDescriptor> {
        self.services.iter()
    }
}

#[cfg(test)]
mod tests {
    use std::{sync::Arc, thread};

    use super::*;
    use crate::descriptor::{MethodDescriptor, MethodKind};
    use crate::node_v1;

    fn registry() -> ServiceRegistry {
        ServiceRegistry::new()
            .with_service(node_v1::service_descriptor())
            .with_service(
                ServiceDescriptor::new("grpc.health.v1.Health").with_method(
                    MethodDescriptor::new(
                        "Check",
                        "grpc.health.v1.HealthCheckRequest",
                        "grpc.health.v1.HealthCheckResponse",
                        MethodKind::Unary,
                    ),
                ),
            )
    }

    #[test]
    fn test_resolve_by_invocation() {
        let registry = registry();
        let invocation = RpcInvocation::default()
            .with_service_unique_name(node_v1::SERVICE_NAME)
            .with_method_name(node_v1::METHOD_GET_LATEST_VALID_ROUTER_CONFIG);

        let method = registry.resolve(&invocation).unwrap();
        assert_eq!(method.name(), "GetLatestValidRouterConfig");
        assert_eq!(method.kind(), MethodKind::Unary);
    }

    #[test]
    fn test_resolve_path() {
        let registry = registry();
        let method = registry
            .resolve_path("/wg.cosmo.node.v1.NodeService/GetLatestValidRouterConfig")
            .unwrap();
        assert_eq!(method.name(), "GetLatestValidRouterConfig");

        let err = registry
            .resolve_path("/wg.cosmo.node.v1.NodeService/Nope")
            .unwrap_err();
        assert!(matches!(err, ResolveError::MethodNotFound { .. }));

        let err = registry.resolve_path("/unknown.Service/Foo").unwrap_err();
        assert!(matches!(err, ResolveError::ServiceNotFound { .. }));

        let err = registry.resolve_path("no-slash").unwrap_err();
        assert!(matches!(err, ResolveError::InvalidPath { .. }));
    }

    #[test]
    fn test_list_services_declaration_order() {
        let registry = registry();
        let names: Vec<&str> = registry.list_services().map(|s| s.service_name()).collect();
        assert_eq!(
            names,
            vec!["wg.cosmo.node.v1.NodeService", "grpc.health.v1.Health"]
        );
    }

    #[test]
    fn test_concurrent_resolution_matches_sequential() {
        let registry = Arc::new(registry());
        let paths = [
            "/wg.cosmo.node.v1.NodeService/GetLatestValidRouterConfig",
            "/wg.cosmo.node.v1.NodeService/Nope",
            "/grpc.health.v1.Health/Check",
            "/unknown.Service/Foo",
            "broken",
        ];

        let sequential: Vec<Result<String, ResolveError>> = paths
            .iter()
            .map(|p| registry.resolve_path(p).map(|m| m.name().to_string()))
            .collect();

        let mut handles = Vec::new();
        for _ in 0..8 {
            let registry = registry.clone();
            handles.push(thread::spawn(move || {
                let mut results = Vec::new();
                for _ in 0..100 {
                    for p in paths.iter() {
                        results.push(registry.resolve_path(p).map(|m| m.name().to_string()));
                    }
                }
                results
            }));
        }

        for handle in handles {
            let results = handle.join().unwrap();
            for chunk in results.chunks(paths.len()) {
                assert_eq!(chunk, sequential.as_slice());
            }
        }
    }
}
