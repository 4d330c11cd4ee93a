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

pub mod descriptor;
pub mod error;
pub mod framework;
pub mod invocation;
pub mod node_v1;
pub mod registry;
pub mod status;

pub use descriptor::{MethodDescriptor, MethodKind, ServiceDescriptor};
pub use error::ResolveError;
pub use framework::Node;
pub use registry::ServiceRegistry;
pub use status::{Code, Status};

pub type StdError = Box<dyn std::error::Error + Send + Sync + 'static>;
