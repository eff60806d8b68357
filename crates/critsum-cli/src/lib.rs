// Dweve Critsum - Criterion benchmark comparison tables
//
// Copyright (c) 2025 Dweve IP B.V. and individual contributors.
//
// SPDX-License-Identifier: Apache-2.0
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License in the LICENSE file at the
// root of this repository or at: http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

//! Critsum CLI library.
//!
//! Argument parsing and execution for the `critsum` binary. All of the
//! aggregation and formatting lives in `critsum-core`; this crate only turns
//! arguments into a [`critsum_core::SummaryConfig`] and prints the result.
//!
//! # Environment
//!
//! - `CRITSUM_CRITERION_DIR`: results directory used when `--dir` is absent
//! - `RUST_LOG`: log filter, overrides `--verbose`

pub mod cli;
pub mod error;

pub use cli::Cli;
pub use error::CliError;
