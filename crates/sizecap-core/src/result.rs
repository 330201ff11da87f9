//! Per-image outcome records.
//!
//! A [`ReductionResult`] serializes to the flat JSON object the web front
//! end renders: `original_filename` plus either the success fields or an
//! `error` string. The output artifact itself is never serialized.

use std::path::PathBuf;

use serde::Serialize;

use crate::budget::bytes_to_mb;
use crate::search::SearchOutcome;

/// Width and height in pixels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Dimensions {
    pub width: u32,
    pub height: u32,
}

impl From<(u32, u32)> for Dimensions {
    fn from((width, height): (u32, u32)) -> Self {
        Self { width, height }
    }
}

/// Where the reduced bytes ended up.
#[derive(Debug, Clone, PartialEq)]
pub enum ReducedOutput {
    /// Kept in memory for the caller.
    Bytes(Vec<u8>),
    /// Written to this file.
    File(PathBuf),
}

/// Metrics of a successful reduction.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ReductionReport {
    pub original_size_mb: f64,
    pub final_size_mb: f64,
    /// `(original - final) / original * 100`, or 0 for an empty original.
    pub reduction_percentage: f64,
    pub quality_used: u8,
    pub scale_factor: f64,
    pub original_dimensions: Dimensions,
    pub final_dimensions: Dimensions,
    pub output_filename: String,
    /// `false` when even the smallest attempt exceeds the budget.
    pub within_budget: bool,
    #[serde(skip)]
    pub output: ReducedOutput,
}

impl ReductionReport {
    /// Build a report from the search result.
    ///
    /// `output` replaces the search bytes, so callers move the encoded
    /// buffer out of `outcome` before calling this.
    pub(crate) fn new(
        original_size: usize,
        original_dimensions: (u32, u32),
        outcome: &SearchOutcome,
        final_size: usize,
        output_filename: String,
        output: ReducedOutput,
    ) -> Self {
        Self {
            original_size_mb: bytes_to_mb(original_size),
            final_size_mb: bytes_to_mb(final_size),
            reduction_percentage: reduction_percentage(original_size, final_size),
            quality_used: outcome.quality,
            scale_factor: outcome.scale,
            original_dimensions: original_dimensions.into(),
            final_dimensions: outcome.dimensions.into(),
            output_filename,
            within_budget: outcome.within_budget,
            output,
        }
    }

    /// Encoded bytes, when the output was kept in memory.
    pub fn bytes(&self) -> Option<&[u8]> {
        match &self.output {
            ReducedOutput::Bytes(bytes) => Some(bytes),
            ReducedOutput::File(_) => None,
        }
    }
}

/// Success or failure of one image.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum ReductionOutcome {
    Reduced(ReductionReport),
    Failed { error: String },
}

/// The record produced for every input image.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ReductionResult {
    pub original_filename: String,
    #[serde(flatten)]
    pub outcome: ReductionOutcome,
}

impl ReductionResult {
    pub fn reduced(original_filename: impl Into<String>, report: ReductionReport) -> Self {
        Self {
            original_filename: original_filename.into(),
            outcome: ReductionOutcome::Reduced(report),
        }
    }

    pub fn failed(original_filename: impl Into<String>, error: impl ToString) -> Self {
        Self {
            original_filename: original_filename.into(),
            outcome: ReductionOutcome::Failed {
                error: error.to_string(),
            },
        }
    }

    pub fn report(&self) -> Option<&ReductionReport> {
        match &self.outcome {
            ReductionOutcome::Reduced(report) => Some(report),
            ReductionOutcome::Failed { .. } => None,
        }
    }

    pub fn error(&self) -> Option<&str> {
        match &self.outcome {
            ReductionOutcome::Reduced(_) => None,
            ReductionOutcome::Failed { error } => Some(error),
        }
    }

    pub fn is_success(&self) -> bool {
        self.report().is_some()
    }
}

fn reduction_percentage(original: usize, reduced: usize) -> f64 {
    if original == 0 {
        return 0.0;
    }
    (original as f64 - reduced as f64) / original as f64 * 100.0
}
