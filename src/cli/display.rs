// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Terminal output for the kandex CLI.
//!
//! Build and check summaries list each reading class with its tree shape,
//! then the diagnostics the compile raised. Lookups show every contributor
//! with its rank tier and the affix badge of each variant. Colors use the
//! basic ANSI palette and are dropped when stdout is not a TTY or `NO_COLOR`
//! is set.

use kandex::build::{BuildReport, CompiledDictionary};
use kandex::catalog::{Catalog, COMMON_THRESHOLD, VERY_COMMON_THRESHOLD};
use kandex::error::{DiagnosticKind, Diagnostics};
use kandex::types::{AffixTag, Contributor, ReadingClass, ReadingRecord, Variant};

/// Notable diagnostics listed in full before the rest are summarized.
const NOTABLE_SHOWN: usize = 3;

/// What a piece of output means; each maps to one SGR code.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Paint {
    Heading,
    Class,
    Literal,
    Muted,
    Good,
    Warn,
    Bad,
    Affix(AffixTag),
}

impl Paint {
    fn sgr(self) -> &'static str {
        match self {
            Paint::Heading => "1;36",
            Paint::Class => "36",
            Paint::Literal => "1",
            Paint::Muted => "90",
            Paint::Good => "32",
            Paint::Warn => "33",
            Paint::Bad => "31",
            Paint::Affix(AffixTag::None) => "90",
            Paint::Affix(AffixTag::Prefix) => "34",
            Paint::Affix(AffixTag::Suffix) => "35",
            Paint::Affix(AffixTag::IrregularWord) => "92",
            Paint::Affix(AffixTag::IrregularMeaning) => "96",
        }
    }
}

fn use_colors() -> bool {
    std::env::var_os("NO_COLOR").is_none() && atty::is(atty::Stream::Stdout)
}

fn styled(style: Paint, text: &str, colored: bool) -> String {
    if colored {
        format!("\x1b[{}m{}\x1b[0m", style.sgr(), text)
    } else {
        text.to_string()
    }
}

fn paint(style: Paint, text: &str) -> String {
    styled(style, text, use_colors())
}

/// How a rank reads to someone tuning the catalog.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum RankTier {
    /// Ranked by frequency data.
    Frequent,
    /// A fallback rank: allowlisted or missing from the secondary ranking.
    Fallback,
    /// At or past the unranked sentinel.
    Tail,
}

fn rank_tier(rank: u32) -> RankTier {
    if rank < VERY_COMMON_THRESHOLD {
        RankTier::Frequent
    } else if rank < COMMON_THRESHOLD {
        RankTier::Fallback
    } else {
        RankTier::Tail
    }
}

fn rank_text(rank: u32) -> String {
    let text = format!("{:>6}", rank);
    match rank_tier(rank) {
        RankTier::Frequent => paint(Paint::Good, &text),
        RankTier::Fallback => paint(Paint::Warn, &text),
        RankTier::Tail => paint(Paint::Bad, &text),
    }
}

fn affix_badge(affix: AffixTag, colored: bool) -> String {
    styled(Paint::Affix(affix), &format!("[{}]", affix.c_name()), colored)
}

fn variant_text(variant: &Variant) -> String {
    let badge = affix_badge(variant.affix, use_colors());
    if variant.spelling.is_empty() {
        badge
    } else {
        format!("{} {}", badge, variant.spelling)
    }
}

/// The manifest name of a diagnostic kind (`missing_cross_reference`).
fn diagnostic_label(kind: DiagnosticKind) -> String {
    serde_json::to_value(kind)
        .ok()
        .and_then(|v| v.as_str().map(str::to_string))
        .unwrap_or_else(|| format!("{:?}", kind))
}

fn heading(text: &str) {
    println!("{}", paint(Paint::Heading, text));
}

fn print_catalog(catalog: &Catalog) {
    let ranked = catalog.ranked().count();
    println!(
        "  {} characters, {} ranked, {} unranked",
        catalog.len(),
        paint(Paint::Good, &ranked.to_string()),
        catalog.len() - ranked
    );
}

fn print_classes(dictionary: &CompiledDictionary) {
    heading("classes");
    println!(
        "  {}",
        paint(Paint::Muted, &format!("{:<12}{:>9}{:>8}{:>8}", "class", "records", "height", "plain"))
    );
    for compiled in &dictionary.classes {
        let plain = compiled.packed.iter().filter(|p| p.is_plain()).count();
        println!(
            "  {}{:>9}{:>8}{:>8}",
            paint(Paint::Class, &format!("{:<12}", compiled.class.name())),
            compiled.len(),
            compiled.tree.height(),
            plain
        );
    }
}

/// Per-kind totals, with the first few messages of each notable kind.
fn print_diagnostics(diagnostics: &Diagnostics) {
    heading("diagnostics");
    let summary = diagnostics.summary();
    if summary.is_empty() {
        println!("  {}", paint(Paint::Good, "none"));
        return;
    }
    for (kind, count) in summary {
        let label = format!("{:<26}", diagnostic_label(kind));
        if !kind.is_notable() {
            println!("  {}{:>6}", paint(Paint::Muted, &label), count);
            continue;
        }
        println!("  {}{:>6}", paint(Paint::Warn, &label), count);
        for d in diagnostics.iter().filter(|d| d.kind == kind).take(NOTABLE_SHOWN) {
            println!("    {}", d.message);
        }
        if count > NOTABLE_SHOWN {
            println!("    {}", paint(Paint::Muted, &format!("and {} more", count - NOTABLE_SHOWN)));
        }
    }
}

pub fn print_build_summary(report: &BuildReport, output_dir: &str) {
    let dictionary = &report.dictionary;
    heading(&format!("kandex build -> {}", output_dir));
    print_catalog(&dictionary.catalog);
    print_classes(dictionary);

    heading("artifacts");
    for artifact in &report.manifest.artifacts {
        println!(
            "  {:<24}{:>10} bytes  {}",
            artifact.file,
            artifact.bytes,
            paint(Paint::Muted, &format!("crc32 {}", artifact.crc32))
        );
    }

    print_diagnostics(&dictionary.diagnostics);
}

pub fn print_check_summary(dictionary: &CompiledDictionary) {
    heading("kandex check");
    print_catalog(&dictionary.catalog);
    print_classes(dictionary);
    print_diagnostics(&dictionary.diagnostics);
}

/// One looked-up record: every contributor in rank order with its variants.
pub fn print_record(class: ReadingClass, record: &ReadingRecord, catalog: &Catalog) {
    heading(&format!("{} {}", class, record.reading));
    println!("  key {}", paint(Paint::Muted, &record.name()));
    for attribute in &record.attributes {
        let who = paint(Paint::Literal, &attribute.contributor.to_string());
        let gloss = match &attribute.contributor {
            Contributor::Character(cp) => catalog.get(*cp).map(|e| e.meaning.as_str()),
            Contributor::Word(_) => None,
        };
        match gloss {
            Some(meaning) => println!(
                "  {} {}  {}",
                rank_text(attribute.rank),
                who,
                paint(Paint::Muted, meaning)
            ),
            None => println!("  {} {}", rank_text(attribute.rank), who),
        }
        for variant in attribute.variants.iter() {
            println!("         {}", variant_text(variant));
        }
    }
}
