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

use std::{collections::HashMap, str::FromStr};

use crate::error::ResolveError;

/// Unary request envelope: exactly one message plus call metadata.
pub struct Request<T> {
    pub message: T,
    pub metadata: Metadata,
}

impl<T> Request<T> {
    pub fn new(message: T) -> Request<T> {
        Self {
            message,
            metadata: Metadata::new(),
        }
    }

    pub fn into_inner(self) -> T {
        self.message
    }

    pub fn into_parts(self) -> (Metadata, T) {
        (self.metadata, self.message)
    }

    pub fn from_parts(metadata: Metadata, message: T) -> Self {
        Request { message, metadata }
    }

    pub fn map<F, U>(self, f: F) -> Request<U>
    where
        F: FnOnce(T) -> U,
    {
        let m = f(self.message);
        Request {
            message: m,
            metadata: self.metadata,
        }
    }
}

/// Unary response envelope.
pub struct Response<T> {
    message: T,
    metadata: Metadata,
}

impl<T> Response<T> {
    pub fn new(message: T) -> Response<T> {
        Self {
            message,
            metadata: Metadata::new(),
        }
    }

    pub fn into_inner(self) -> T {
        self.message
    }

    pub fn from_parts(metadata: Metadata, message: T) -> Self {
        Self { message, metadata }
    }

    pub fn into_parts(self) -> (Metadata, T) {
        (self.metadata, self.message)
    }

    pub fn map<F, U>(self, f: F) -> Response<U>
    where
        F: FnOnce(T) -> U,
    {
        let u = f(self.message);
        Response {
            message: u,
            metadata: self.metadata,
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct Metadata {
    inner: HashMap<String, String>,
}

impl Metadata {
    pub fn new() -> Self {
        Metadata {
            inner: HashMap::new(),
        }
    }

    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.inner.insert(key.into(), value.into());
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.inner.get(key).map(|v| v.as_str())
    }

    /// Header entries that are not valid UTF-8 are dropped.
    pub fn from_headers(headers: http::HeaderMap) -> Self {
        let mut h: HashMap<String, String> = HashMap::new();
        for (k, v) in headers.into_iter() {
            if let (Some(name), Ok(value)) = (k, v.to_str()) {
                h.insert(name.to_string(), value.to_string());
            }
        }

        Metadata { inner: h }
    }

    /// Entries that do not form valid header names/values are dropped.
    pub fn into_headers(&self) -> http::HeaderMap {
        let mut header = http::HeaderMap::new();
        for (k, v) in self.inner.iter() {
            if let (Ok(name), Ok(value)) = (
                http::header::HeaderName::from_str(k.as_str()),
                http::HeaderValue::from_str(v.as_str()),
            ) {
                header.insert(name, value);
            }
        }

        header
    }
}

/// Routing identity of one call: which service, which method.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RpcInvocation {
    target_service_unique_name: String,
    method_name: String,
}

impl RpcInvocation {
    pub fn with_service_unique_name(mut self, service_unique_name: impl Into<String>) -> Self {
        self.target_service_unique_name = service_unique_name.into();
        self
    }

    pub fn with_method_name(mut self, method_name: impl Into<String>) -> Self {
        self.method_name = method_name.into();
        self
    }

    /// Parses a request path of the form `/{service}/{method}`. Anything
    /// else, including empty segments or extra ones, is rejected; there is
    /// no partial matching.
    pub fn from_path(path: &str) -> Result<Self, ResolveError> {
        let invalid = || ResolveError::InvalidPath {
            path: path.to_string(),
        };

        let rest = path.strip_prefix('/').ok_or_else(invalid)?;
        let mut segments = rest.split('/');
        let service = segments.next().filter(|s| !s.is_empty()).ok_or_else(invalid)?;
        let method = segments.next().filter(|s| !s.is_empty()).ok_or_else(invalid)?;
        if segments.next().is_some() {
            return Err(invalid());
        }

        Ok(RpcInvocation::default()
            .with_service_unique_name(service)
            .with_method_name(method))
    }

    pub fn service_unique_name(&self) -> &str {
        &self.target_service_unique_name
    }

    pub fn method_name(&self) -> &str {
        &self.method_name
    }

    pub fn unique_fingerprint(&self) -> String {
        format!("{}#{}", self.target_service_unique_name, self.method_name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_path() {
        let inv =
            RpcInvocation::from_path("/wg.cosmo.node.v1.NodeService/GetLatestValidRouterConfig")
                .unwrap();
        assert_eq!(inv.service_unique_name(), "wg.cosmo.node.v1.NodeService");
        assert_eq!(inv.method_name(), "GetLatestValidRouterConfig");
        assert_eq!(
            inv.unique_fingerprint(),
            "wg.cosmo.node.v1.NodeService#GetLatestValidRouterConfig"
        );
    }

    #[test]
    fn test_from_path_rejects_malformed() {
        for path in ["", "/", "/svc", "/svc/", "//method", "svc/method", "/svc/m/extra"] {
            let err = RpcInvocation::from_path(path).unwrap_err();
            assert_eq!(
                err,
                ResolveError::InvalidPath {
                    path: path.to_string()
                },
                "path: {:?}",
                path
            );
        }
    }

    #[test]
    fn test_metadata_header_round_trip() {
        let mut metadata = Metadata::new();
        metadata.insert("authorization", "Bearer token");
        metadata.insert("x-request-id", "42");

        let headers = metadata.into_headers();
        let back = Metadata::from_headers(headers);
        assert_eq!(back.get("authorization"), Some("Bearer token"));
        assert_eq!(back.get("x-request-id"), Some("42"));
    }

    #[test]
    fn test_metadata_drops_invalid_header_names() {
        let mut metadata = Metadata::new();
        metadata.insert("not a header name", "value");
        metadata.insert("ok", "value");

        let headers = metadata.into_headers();
        assert!(headers.get("ok").is_some());
        assert_eq!(headers.len(), 1);
    }

    #[test]
    fn test_request_response_envelopes() {
        let req = Request::new(5u32).map(|n| n * 2);
        assert_eq!(req.into_inner(), 10);

        let (metadata, message) = Response::new("ok").into_parts();
        let resp = Response::from_parts(metadata, message);
        assert_eq!(resp.into_inner(), "ok");
    }
}
