// Copyright 2025 Nibi SDK Contributors
// SPDX-License-Identifier: Apache-2.0, MIT

//! # Nibi Provider
//!
//! A gRPC chain provider for Nibiru.

pub mod error;
pub mod grpc;
pub mod message;
mod provider;
pub mod query;
pub mod response;
pub mod tx;
pub mod util;

pub use error::{Error, Result};
pub use provider::*;

pub use cosmrs;
pub use tonic;
