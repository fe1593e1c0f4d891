// Copyright 2025 John Brosnihan
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.
//! Error types for simulation setup
//!
//! Stepping the simulation is total over valid inputs; everything fallible
//! happens while building bodies, validating configuration or loading scenes.

use thiserror::Error;

/// Errors raised while constructing or configuring a simulation
#[derive(Error, Debug)]
pub enum PhysimError {
    /// A body descriptor violates a geometric invariant
    #[error("invalid body '{name}': {reason}")]
    InvalidBody {
        /// Name of the offending body
        name: String,
        /// What was wrong with it
        reason: String,
    },

    /// World-level configuration is unusable
    #[error("invalid world configuration: {0}")]
    InvalidWorld(String),

    /// Scene file was written for an incompatible format version
    #[error("scene format version {found} is not supported (expected {supported})")]
    UnsupportedSceneVersion {
        /// Version found in the scene file
        found: String,
        /// Version this build understands
        supported: String,
    },

    /// Scene file could not be parsed or serialized
    #[error("malformed scene: {0}")]
    Scene(#[from] serde_json::Error),

    /// Underlying I/O failure
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result alias used throughout the crate
pub type Result<T> = std::result::Result<T, PhysimError>;
