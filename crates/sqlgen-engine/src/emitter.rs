// SPDX-FileCopyrightText: 2025-2026 RAprogramm <andrey.rozanov.vl@gmail.com>
// SPDX-License-Identifier: MIT

//! Backend interface.
//!
//! The engine never produces code itself. A [`CodeEmitter`] receives a
//! [`QueryExecutionPlan`] in small steps and builds whatever its output is:
//! token streams, source text, or a trace for tests.
//!
//! A generated body is composed as:
//!
//! ```text
//! Void / mutation ─► emit_update ──────────────────────────────┐
//! Scalar, Boolean ─► emit_select ─► emit_scalar_cast ──────────┤
//! Single, Optional, List ─► emit_select ─► emit_mapping ───────┼─► finish
//! literal result  ─► emit_constant ────────────────────────────┘
//! unsupported     ─► emit_placeholder (complete body, no finish)
//! ```
//!
//! Any step may fail; the generator then tries the next fallback or keeps
//! the original method body.

use crate::{
    mapping::ScalarKind,
    plan::{Cardinality, QueryExecutionPlan}
};

/// Conversion applied to a fetched scalar.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ScalarCast {
    /// Widen or convert to the declared kind.
    To(ScalarKind),
    /// Compare a count with zero.
    CountToBool
}

/// Receives plans and produces method bodies.
pub trait CodeEmitter {
    /// Expression or body fragment.
    type Output;

    /// Emission failure.
    type Error: std::error::Error;

    /// Fetch rows for a select-like plan, shaped by its cardinality.
    fn emit_select(&mut self, plan: &QueryExecutionPlan) -> Result<Self::Output, Self::Error>;

    /// Execute a statement and yield the affected row count.
    fn emit_update(&mut self, plan: &QueryExecutionPlan) -> Result<Self::Output, Self::Error>;

    /// Convert a fetched scalar.
    fn emit_scalar_cast(
        &mut self,
        fetched: Self::Output,
        cast: ScalarCast,
        plan: &QueryExecutionPlan
    ) -> Result<Self::Output, Self::Error>;

    /// Map fetched rows per [`ResultMappingPlan`](crate::ResultMappingPlan).
    fn emit_mapping(
        &mut self,
        fetched: Self::Output,
        plan: &QueryExecutionPlan
    ) -> Result<Self::Output, Self::Error>;

    /// A literal boolean result.
    fn emit_constant(&mut self, value: bool) -> Result<Self::Output, Self::Error>;

    /// Complete diagnostic body for a method no plan exists for.
    fn emit_placeholder(
        &mut self,
        method: &str,
        cardinality: Cardinality
    ) -> Result<Self::Output, Self::Error>;

    /// Wrap a value expression into the final method body.
    fn finish(
        &mut self,
        body: Self::Output,
        plan: &QueryExecutionPlan
    ) -> Result<Self::Output, Self::Error>;
}
