// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! CLI definitions for the kandex command-line interface.
//!
//! Three subcommands: `build` compiles an input directory into C headers (or
//! JSON), `lookup` compiles in memory and resolves one kana string the way
//! the runtime would, and `check` compiles without writing anything and
//! prints the diagnostic summary.

pub mod display;

use clap::{Parser, Subcommand};

use kandex::ReadingClass;

#[derive(Parser)]
#[command(
    name = "kandex",
    about = "Compiles kanji readings and word lists into static balanced search trees",
    version
)]
pub struct Cli {
    /// Log every dropped character and word (same as RUST_LOG=kandex=debug)
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Compile a source directory into runtime artifacts
    Build {
        /// Input directory containing manifest.json and the source tables
        #[arg(short, long)]
        input: String,

        /// Output directory for headers and manifest.json
        #[arg(short, long)]
        output: String,

        /// Emit JSON instead of C headers
        #[arg(long)]
        json: bool,

        /// Hide the progress bar
        #[arg(long)]
        quiet: bool,
    },

    /// Compile in memory and look up one reading
    Lookup {
        /// Input directory containing manifest.json
        #[arg(short, long)]
        input: String,

        /// Reading class to search (on, kun, na or dict)
        class: ReadingClass,

        /// Kana to look up (hiragana is folded for onyomi)
        kana: String,
    },

    /// Compile without writing and report diagnostics
    Check {
        /// Input directory containing manifest.json
        #[arg(short, long)]
        input: String,
    },
}
