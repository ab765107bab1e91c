#![deny(missing_docs)]

//! # Pattern Catalog
//!
//! The ordered set of spinner rules and the pass that applies them to a file.
//!
//! - **markup**: Finding empty `<div>` elements and reading their class tokens.
//! - **rules**: Rule, tier and canonical replacement types.
//!
//! Rules run tier by tier (large, small, generic). A rule replaces every
//! element it matches before the next rule sees the text, so a generic rule
//! can only ever pick up what the size-qualified rules left behind. Rendered
//! replacements are component invocations, never `<div>` elements, so no rule
//! can re-match the output of another.

pub(crate) mod markup;

/// Rule, tier and canonical replacement types.
pub mod rules;

pub use markup::SPINNER_MARKER;
pub use rules::{Canonical, Component, Rule, SizeMatch, SizeParam, Tier};

use regex::Captures;
use tracing::debug;

/// Sizes rendered as a large centered spinner.
pub const LARGE_SIZES: &[u32] = &[8, 10, 12, 14, 16];

/// Sizes rendered as an inline spinner.
pub const INLINE_SIZES: &[u32] = &[4, 5];

/// Sizes rendered as a small centered spinner.
pub const SMALL_CENTERED_SIZES: &[u32] = &[6];

/// An ordered, immutable list of rules.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Catalog {
    rules: Vec<Rule>,
}

/// Number of elements one rule replaced in a file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RuleHit {
    /// Name of the rule.
    pub rule: &'static str,
    /// Component the rule rendered.
    pub component: Component,
    /// How many elements were replaced.
    pub count: usize,
}

/// Result of running the catalog over one file's text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CatalogOutcome {
    /// The rewritten text (identical to the input when nothing matched).
    pub text: String,
    /// Rules that fired, in the order they ran.
    pub hits: Vec<RuleHit>,
}

impl CatalogOutcome {
    /// Whether any rule replaced anything.
    pub fn changed(&self) -> bool {
        !self.hits.is_empty()
    }

    /// Total number of replaced elements.
    pub fn replacements(&self) -> usize {
        self.hits.iter().map(|h| h.count).sum()
    }

    /// Components now referenced by the text, in first-use order, without duplicates.
    pub fn components(&self) -> Vec<Component> {
        let mut seen = Vec::new();
        for hit in &self.hits {
            if !seen.contains(&hit.component) {
                seen.push(hit.component);
            }
        }
        seen
    }
}

impl Catalog {
    /// Builds a catalog, ordering rules by tier.
    ///
    /// The sort is stable, so rules within one tier keep the order given.
    pub fn new(mut rules: Vec<Rule>) -> Self {
        rules.sort_by_key(|r| r.tier);
        Self { rules }
    }

    /// The built-in spinner catalog.
    pub fn standard() -> Self {
        Self::new(vec![
            Rule {
                name: "large-centered",
                tier: Tier::Large,
                sizes: SizeMatch::OneOf(LARGE_SIZES),
                required: &["rounded-full"],
                replacement: Canonical {
                    component: Component::Centered,
                    size: Some(SizeParam::Lg),
                },
            },
            Rule {
                name: "small-inline",
                tier: Tier::Small,
                sizes: SizeMatch::OneOf(INLINE_SIZES),
                required: &["rounded-full"],
                replacement: Canonical {
                    component: Component::Inline,
                    size: None,
                },
            },
            Rule {
                name: "small-centered",
                tier: Tier::Small,
                sizes: SizeMatch::OneOf(SMALL_CENTERED_SIZES),
                required: &["rounded-full"],
                replacement: Canonical {
                    component: Component::Centered,
                    size: Some(SizeParam::Sm),
                },
            },
            Rule {
                name: "generic-centered",
                tier: Tier::Generic,
                sizes: SizeMatch::Any,
                required: &[],
                replacement: Canonical {
                    component: Component::Centered,
                    size: None,
                },
            },
        ])
    }

    /// Rules in the order they are applied.
    pub fn rules(&self) -> &[Rule] {
        &self.rules
    }

    /// Applies every rule, in priority order, to `source`.
    pub fn apply(&self, source: &str) -> CatalogOutcome {
        let mut text = source.to_string();
        let mut hits = Vec::new();

        for rule in &self.rules {
            let (next, count) = apply_rule(rule, &text);
            if count > 0 {
                debug!(rule = rule.name, count, "rule matched");
                hits.push(RuleHit {
                    rule: rule.name,
                    component: rule.replacement.component,
                    count,
                });
                text = next;
            }
        }

        CatalogOutcome { text, hits }
    }
}

impl Default for Catalog {
    fn default() -> Self {
        Self::standard()
    }
}

/// Replaces every element `rule` matches, returning the new text and the count.
fn apply_rule(rule: &Rule, text: &str) -> (String, usize) {
    let mut count = 0;
    let rendered = rule.replacement.render();

    let replaced = markup::element_re().replace_all(text, |caps: &Captures| {
        let attrs = caps.name("attrs").map_or("", |m| m.as_str());
        match markup::class_tokens(attrs) {
            Some(classes) if rule.matches(&classes) => {
                count += 1;
                rendered.clone()
            }
            _ => caps[0].to_string(),
        }
    });

    (replaced.into_owned(), count)
}
