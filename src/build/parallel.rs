// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Per-class compilation, in parallel when the feature is on.
//!
//! The four reading classes share the catalog and the keyer read-only and
//! never touch each other, so each one is an independent job. Rayon's
//! `par_iter().collect()` keeps the input order, which here is
//! `ReadingClass::ALL`. Output and diagnostics therefore come back in class
//! order however the jobs were scheduled.
//!
//! Every class gets its own `Diagnostics` buffer; the caller merges them in
//! order. A class that fails still returns its buffer, so the log explains
//! what happened up to the error.

#[cfg(feature = "parallel")]
use rayon::prelude::*;

#[cfg(feature = "parallel")]
use std::sync::atomic::{AtomicUsize, Ordering};

#[cfg(feature = "parallel")]
use indicatif::ProgressBar;

use crate::catalog::Catalog;
use crate::error::{CompileError, Diagnostics};
use crate::hash::ReadingKeyer;
use crate::types::ReadingClass;

use super::{compile_class, CompileOptions, CompiledClass, SourceTables};

/// Result of one class job.
#[derive(Debug)]
pub struct ClassOutcome {
    pub class: ReadingClass,
    pub result: Result<CompiledClass, CompileError>,
    pub diagnostics: Diagnostics,
}

fn run_class(
    class: ReadingClass,
    catalog: &Catalog,
    sources: &SourceTables,
    options: &CompileOptions,
    keyer: &ReadingKeyer,
) -> ClassOutcome {
    let mut diagnostics = Diagnostics::new();
    let result = compile_class(class, catalog, sources, options, keyer, &mut diagnostics);
    ClassOutcome {
        class,
        result,
        diagnostics,
    }
}

/// Compile every class, one rayon job each.
#[cfg(feature = "parallel")]
pub fn compile_classes(
    catalog: &Catalog,
    sources: &SourceTables,
    options: &CompileOptions,
    keyer: &ReadingKeyer,
) -> Vec<ClassOutcome> {
    ReadingClass::ALL
        .par_iter()
        .map(|&class| run_class(class, catalog, sources, options, keyer))
        .collect()
}

/// Compile every class in order.
#[cfg(not(feature = "parallel"))]
pub fn compile_classes(
    catalog: &Catalog,
    sources: &SourceTables,
    options: &CompileOptions,
    keyer: &ReadingKeyer,
) -> Vec<ClassOutcome> {
    ReadingClass::ALL
        .iter()
        .map(|&class| run_class(class, catalog, sources, options, keyer))
        .collect()
}

/// Compile every class in parallel with progress reporting.
#[cfg(feature = "parallel")]
pub fn compile_classes_with_progress(
    catalog: &Catalog,
    sources: &SourceTables,
    options: &CompileOptions,
    keyer: &ReadingKeyer,
    progress: &ProgressBar,
) -> Vec<ClassOutcome> {
    let counter = AtomicUsize::new(0);
    ReadingClass::ALL
        .par_iter()
        .map(|&class| {
            let outcome = run_class(class, catalog, sources, options, keyer);

            let done = counter.fetch_add(1, Ordering::Relaxed) + 1;
            progress.set_position(done as u64);
            let records = outcome.result.as_ref().map(|c| c.len()).unwrap_or(0);
            progress.set_message(format!("{} ({} readings)", class, records));

            outcome
        })
        .collect()
}

/// Non-parallel fallback (no progress).
#[cfg(not(feature = "parallel"))]
pub fn compile_classes_with_progress(
    catalog: &Catalog,
    sources: &SourceTables,
    options: &CompileOptions,
    keyer: &ReadingKeyer,
) -> Vec<ClassOutcome> {
    compile_classes(catalog, sources, options, keyer)
}
