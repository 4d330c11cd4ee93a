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

use std::{collections::HashMap, fmt};

use crate::error::ResolveError;

/// How a method exchanges messages with its peer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MethodKind {
    // exactly one request message, exactly one response message
    Unary,
    ServerStreaming,
    ClientStreaming,
    BidiStreaming,
}

impl MethodKind {
    pub fn description(&self) -> &'static str {
        match self {
            MethodKind::Unary => "unary",
            MethodKind::ServerStreaming => "server streaming",
            MethodKind::ClientStreaming => "client streaming",
            MethodKind::BidiStreaming => "bidi streaming",
        }
    }
}

impl fmt::Display for MethodKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(self.description(), f)
    }
}

/// One method entry: name plus the fully qualified request/response type
/// names the codec layer needs. The schemas behind those names live with the
/// generator that emitted the binding, not here.
#[derive(Debug, Clone)]
pub struct MethodDescriptor {
    name: String,
    request_type: String,
    response_type: String,
    kind: MethodKind,
}

impl MethodDescriptor {
    pub fn new(
        name: impl Into<String>,
        request_type: impl Into<String>,
        response_type: impl Into<String>,
        kind: MethodKind,
    ) -> Self {
        Self {
            name: name.into(),
            request_type: request_type.into(),
            response_type: response_type.into(),
            kind,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn request_type(&self) -> &str {
        &self.request_type
    }

    pub fn response_type(&self) -> &str {
        &self.response_type
    }

    pub fn kind(&self) -> MethodKind {
        self.kind
    }
}

/// Method table for one service, keyed by method name. Built once via
/// `with_method` and read-only afterwards; `list_methods` enumerates in
/// declaration order.
#[derive(Debug, Clone, Default)]
pub struct ServiceDescriptor {
    service_name: String,
    methods: Vec<MethodDescriptor>,
    index: HashMap<String, usize>,
}

impl ServiceDescriptor {
    pub fn new(service_name: impl Into<String>) -> Self {
        Self {
            service_name: service_name.into(),
            methods: Vec::new(),
            index: HashMap::new(),
        }
    }

    /// Registering the same method name twice replaces the earlier entry in
    /// place, so the first declaration keeps its enumeration position.
    pub fn with_method(mut self, method: MethodDescriptor) -> Self {
        match self.index.get(method.name()) {
            Some(&pos) => self.methods[pos] = method,
            None => {
                self.index
                    .insert(method.name().to_string(), self.methods.len());
                self.methods.push(method);
            }
        }
        self
    }

    pub fn service_name(&self) -> &str {
        &self.service_name
    }

    /// Exact, case-sensitive lookup. A miss is a caller-handled result, not
    /// a fatal condition.
    pub fn resolve_method(&self, name: &str) -> Result<&MethodDescriptor, ResolveError> {
        self.index
            .get(name)
            .map(|&pos| &self.methods[pos])
            .ok_or_else(|| ResolveError::MethodNotFound {
                service: self.service_name.clone(),
                method: name.to_string(),
            })
    }

    /// Fresh iterator each call, declaration order.
    pub fn list_methods(&self) -> impl Iterator<Item = &MethodDescriptor> {
        self.methods.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn node_service() -> ServiceDescriptor {
        ServiceDescriptor::new("wg.cosmo.node.v1.NodeService").with_method(
            MethodDescriptor::new(
                "GetLatestValidRouterConfig",
                "wg.cosmo.node.v1.GetConfigRequest",
                "wg.cosmo.node.v1.GetConfigResponse",
                MethodKind::Unary,
            ),
        )
    }

    #[test]
    fn test_resolve_registered_method() {
        let desc = node_service();
        let method = desc.resolve_method("GetLatestValidRouterConfig").unwrap();
        assert_eq!(method.name(), "GetLatestValidRouterConfig");
        assert_eq!(method.kind(), MethodKind::Unary);
        assert_eq!(method.request_type(), "wg.cosmo.node.v1.GetConfigRequest");
        assert_eq!(method.response_type(), "wg.cosmo.node.v1.GetConfigResponse");
    }

    #[test]
    fn test_resolve_missing_method() {
        let desc = node_service();
        let err = desc.resolve_method("Nope").unwrap_err();
        assert_eq!(
            err,
            ResolveError::MethodNotFound {
                service: "wg.cosmo.node.v1.NodeService".to_string(),
                method: "Nope".to_string(),
            }
        );
    }

    #[test]
    fn test_lookup_is_case_sensitive() {
        let desc = node_service();
        assert!(desc.resolve_method("getLatestValidRouterConfig").is_err());
    }

    #[test]
    fn test_list_methods_declaration_order_and_repeatable() {
        let desc = ServiceDescriptor::new("test.Svc")
            .with_method(MethodDescriptor::new(
                "B",
                "test.BReq",
                "test.BResp",
                MethodKind::Unary,
            ))
            .with_method(MethodDescriptor::new(
                "A",
                "test.AReq",
                "test.AResp",
                MethodKind::ServerStreaming,
            ));

        let first: Vec<&str> = desc.list_methods().map(|m| m.name()).collect();
        let second: Vec<&str> = desc.list_methods().map(|m| m.name()).collect();
        assert_eq!(first, vec!["B", "A"]);
        assert_eq!(first, second);
    }

    #[test]
    fn test_duplicate_method_replaces_in_place() {
        let desc = ServiceDescriptor::new("test.Svc")
            .with_method(MethodDescriptor::new(
                "A",
                "test.OldReq",
                "test.OldResp",
                MethodKind::Unary,
            ))
            .with_method(MethodDescriptor::new(
                "B",
                "test.BReq",
                "test.BResp",
                MethodKind::Unary,
            ))
            .with_method(MethodDescriptor::new(
                "A",
                "test.NewReq",
                "test.NewResp",
                MethodKind::Unary,
            ));

        let names: Vec<&str> = desc.list_methods().map(|m| m.name()).collect();
        assert_eq!(names, vec!["A", "B"]);
        assert_eq!(desc.resolve_method("A").unwrap().request_type(), "test.NewReq");
    }
}
