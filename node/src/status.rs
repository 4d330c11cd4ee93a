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

use std::{error::Error, fmt};

use http::HeaderValue;

use crate::error::ResolveError;

pub const GRPC_STATUS: &str = "grpc-status";
pub const GRPC_MESSAGE: &str = "grpc-message";

/// error codes for grpc APIs
/// https://github.com/googleapis/googleapis/blob/master/google/rpc/code.proto
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Code {
    // Not an error; returned on success.
    //
    // HTTP Mapping: 200 OK
    Ok = 0,

    // The operation was cancelled, typically by the caller.
    //
    // HTTP Mapping: 499 Client Closed Request
    Cancelled = 1,

    // Unknown error, e.g. an error space we do not recognize.
    //
    // HTTP Mapping: 500 Internal Server Error
    Unknown = 2,

    // The client specified an invalid argument, regardless of system state.
    //
    // HTTP Mapping: 400 Bad Request
    InvalidArgument = 3,

    // The deadline expired before the operation could complete.
    //
    // HTTP Mapping: 504 Gateway Timeout
    DeadlineExceeded = 4,

    // Some requested entity was not found.
    //
    // HTTP Mapping: 404 Not Found
    NotFound = 5,

    // The entity that a client attempted to create already exists.
    //
    // HTTP Mapping: 409 Conflict
    AlreadyExists = 6,

    // The caller does not have permission to execute the operation.
    //
    // HTTP Mapping: 403 Forbidden
    PermissionDenied = 7,

    // Some resource has been exhausted, e.g. a per-user quota.
    //
    // HTTP Mapping: 429 Too Many Requests
    ResourceExhausted = 8,

    // The system is not in a state required for the operation.
    //
    // HTTP Mapping: 400 Bad Request
    FailedPrecondition = 9,

    // The operation was aborted, typically a concurrency issue.
    //
    // HTTP Mapping: 409 Conflict
    Aborted = 10,

    // The operation was attempted past the valid range.
    //
    // HTTP Mapping: 400 Bad Request
    OutOfRange = 11,

    // The operation is not implemented or not supported by this service.
    //
    // HTTP Mapping: 501 Not Implemented
    Unimplemented = 12,

    // Some invariant expected by the underlying system has been broken.
    //
    // HTTP Mapping: 500 Internal Server Error
    Internal = 13,

    // The service is currently unavailable; most likely transient.
    //
    // HTTP Mapping: 503 Service Unavailable
    Unavailable = 14,

    // Unrecoverable data loss or corruption.
    //
    // HTTP Mapping: 500 Internal Server Error
    DataLoss = 15,

    // The request does not have valid authentication credentials.
    //
    // HTTP Mapping: 401 Unauthorized
    Unauthenticated = 16,
}

impl Code {
    pub fn from_i32(i: i32) -> Code {
        Code::from(i)
    }

    pub fn description(&self) -> &'static str {
        match self {
            Code::Ok => "The operation completed successfully",
            Code::Cancelled => "The operation was cancelled",
            Code::Unknown => "Unknown error",
            Code::InvalidArgument => "Client specified an invalid argument",
            Code::DeadlineExceeded => "Deadline expired before operation could complete",
            Code::NotFound => "Some requested entity was not found",
            Code::AlreadyExists => "Some entity that we attempted to create already exists",
            Code::PermissionDenied => "The caller does not have permission",
            Code::ResourceExhausted => "Some resource has been exhausted",
            Code::FailedPrecondition => "The system is not in a state required for the operation",
            Code::Aborted => "The operation was aborted",
            Code::OutOfRange => "Operation was attempted past the valid range",
            Code::Unimplemented => "Operation is not implemented or not supported",
            Code::Internal => "Internal error",
            Code::Unavailable => "The service is currently unavailable",
            Code::DataLoss => "Unrecoverable data loss or corruption",
            Code::Unauthenticated => "The request does not have valid authentication credentials",
        }
    }

    pub fn to_http_header_value(&self) -> HeaderValue {
        match *self {
            Code::Ok => HeaderValue::from_static("0"),
            Code::Cancelled => HeaderValue::from_static("1"),
            Code::Unknown => HeaderValue::from_static("2"),
            Code::InvalidArgument => HeaderValue::from_static("3"),
            Code::DeadlineExceeded => HeaderValue::from_static("4"),
            Code::NotFound => HeaderValue::from_static("5"),
            Code::AlreadyExists => HeaderValue::from_static("6"),
            Code::PermissionDenied => HeaderValue::from_static("7"),
            Code::ResourceExhausted => HeaderValue::from_static("8"),
            Code::FailedPrecondition => HeaderValue::from_static("9"),
            Code::Aborted => HeaderValue::from_static("10"),
            Code::OutOfRange => HeaderValue::from_static("11"),
            Code::Unimplemented => HeaderValue::from_static("12"),
            Code::Internal => HeaderValue::from_static("13"),
            Code::Unavailable => HeaderValue::from_static("14"),
            Code::DataLoss => HeaderValue::from_static("15"),
            Code::Unauthenticated => HeaderValue::from_static("16"),
        }
    }
}

impl fmt::Display for Code {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(self.description(), f)
    }
}

impl From<i32> for Code {
    fn from(i: i32) -> Self {
        match i {
            0 => Code::Ok,
            1 => Code::Cancelled,
            2 => Code::Unknown,
            3 => Code::InvalidArgument,
            4 => Code::DeadlineExceeded,
            5 => Code::NotFound,
            6 => Code::AlreadyExists,
            7 => Code::PermissionDenied,
            8 => Code::ResourceExhausted,
            9 => Code::FailedPrecondition,
            10 => Code::Aborted,
            11 => Code::OutOfRange,
            12 => Code::Unimplemented,
            13 => Code::Internal,
            14 => Code::Unavailable,
            15 => Code::DataLoss,
            16 => Code::Unauthenticated,

            _ => Code::Unknown,
        }
    }
}

#[derive(Debug, Clone)]
pub struct Status {
    // grpc-status
    code: Code,

    // grpc-message
    message: String,
}

impl Status {
    pub fn new(code: Code, message: impl Into<String>) -> Self {
        Status {
            code,
            message: message.into(),
        }
    }

    pub fn with_message(self, message: impl Into<String>) -> Self {
        Status {
            message: message.into(),
            ..self
        }
    }

    pub fn from_error(err: crate::StdError) -> Self {
        Status::new(Code::Internal, err.to_string())
    }

    pub fn code(&self) -> Code {
        self.code
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    /// Renders the status as grpc trailers on an otherwise empty response,
    /// which is how a lookup miss is answered on the wire.
    pub fn to_http(&self) -> http::Response<()> {
        let (mut parts, _) = http::Response::new(()).into_parts();

        parts.headers.insert(
            http::header::CONTENT_TYPE,
            http::HeaderValue::from_static("application/grpc"),
        );

        parts
            .headers
            .insert(GRPC_STATUS, self.code.to_http_header_value());
        parts.headers.insert(
            GRPC_MESSAGE,
            http::HeaderValue::from_str(&self.message)
                .unwrap_or_else(|_| http::HeaderValue::from_static("")),
        );

        http::Response::from_parts(parts, ())
    }
}

/// Every lookup miss is "unimplemented" to the remote peer, never fatal.
impl From<ResolveError> for Status {
    fn from(err: ResolveError) -> Self {
        Status::new(Code::Unimplemented, err.to_string())
    }
}

impl fmt::Display for Status {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_fmt(format_args!(
            "grpc status, code: {}, message: {}",
            self.code, self.message
        ))
    }
}

impl Error for Status {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resolve_errors_map_to_unimplemented() {
        let errors = [
            ResolveError::MethodNotFound {
                service: "wg.cosmo.node.v1.NodeService".to_string(),
                method: "Nope".to_string(),
            },
            ResolveError::ServiceNotFound {
                service: "wg.cosmo.node.v1.Other".to_string(),
            },
            ResolveError::InvalidPath {
                path: "/broken".to_string(),
            },
        ];

        for err in errors {
            let status = Status::from(err);
            assert_eq!(status.code(), Code::Unimplemented);
        }
    }

    #[test]
    fn test_to_http_trailers() {
        let status = Status::new(Code::Unimplemented, "method Nope is not registered");
        let resp = status.to_http();
        assert_eq!(resp.headers().get(GRPC_STATUS).unwrap(), "12");
        assert_eq!(
            resp.headers().get(GRPC_MESSAGE).unwrap(),
            "method Nope is not registered"
        );
        assert_eq!(
            resp.headers().get(http::header::CONTENT_TYPE).unwrap(),
            "application/grpc"
        );
    }

    #[test]
    fn test_code_round_trip() {
        for i in 0..=16 {
            let code = Code::from_i32(i);
            assert_eq!(code.to_http_header_value(), i.to_string().as_str());
        }
        assert_eq!(Code::from_i32(99), Code::Unknown);
    }
}
