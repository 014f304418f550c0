// Copyright 2026 jboss-status Contributors
// SPDX-License-Identifier: Apache-2.0

//! Line classification and the positional association state machine.

pub mod classifier;
pub mod machine;

pub use classifier::{classify, tail_token, LineClass, ServerMarker};
pub use machine::{extract_lines, Extractor, PassStats, WindowState};
