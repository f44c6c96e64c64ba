// Copyright 2022 Webb Technologies Inc.
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
// http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

#![deny(unsafe_code)]
#![warn(missing_docs)]

//! # Open Letter Service Crate
//!
//! The backend of the open-letter pledge page. Visitors sign a fixed pledge
//! text with their wallet in the browser; this service records the resulting
//! signatures and serves them back for display, newest first.
//!
//! The service is deliberately small: two operations on one route, a
//! [Sled](https://sled.rs)-backed store created once at startup and reused
//! for the process lifetime, and graceful shutdown on the usual signals.
//! Signatures are stored as submitted; display-side verification is left to
//! readers of the list.

/// The HTTP service wiring.
pub mod service;

/// A type alias for the result used across the open-letter crates.
pub use letter_utils::Result;
