//! # Rule Definitions
//!
//! A rule pairs a class-token predicate with the canonical component
//! invocation that replaces a matching element.

use crate::catalog::markup::{has_marker, size_token, SPINNER_MARKER};
use serde::Serialize;
use std::fmt::{self, Display};

/// Priority group of a rule. Earlier tiers are always tried first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Tier {
    /// Size-qualified, block-level spinners.
    Large,
    /// Size-qualified, small spinners.
    Small,
    /// Any remaining element carrying the spinner marker.
    Generic,
}

impl Display for Tier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Tier::Large => write!(f, "large"),
            Tier::Small => write!(f, "small"),
            Tier::Generic => write!(f, "generic"),
        }
    }
}

/// One of the two canonical replacement components.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum Component {
    /// `LoadingCentered`: block-level loading state.
    Centered,
    /// `LoadingInline`: small inline indicator.
    Inline,
}

impl Component {
    /// The exported symbol name of the component.
    pub fn name(&self) -> &'static str {
        match self {
            Component::Centered => "LoadingCentered",
            Component::Inline => "LoadingInline",
        }
    }
}

/// Value of the `size` prop on a canonical invocation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SizeParam {
    /// `size="sm"`
    Sm,
    /// `size="lg"`
    Lg,
}

impl SizeParam {
    /// The prop literal.
    pub fn as_str(&self) -> &'static str {
        match self {
            SizeParam::Sm => "sm",
            SizeParam::Lg => "lg",
        }
    }
}

/// A canonical component invocation template.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Canonical {
    /// Component to invoke.
    pub component: Component,
    /// Optional `size` prop.
    pub size: Option<SizeParam>,
}

impl Canonical {
    /// Renders the self-closing invocation, e.g. `<LoadingCentered size="lg" />`.
    pub fn render(&self) -> String {
        match self.size {
            Some(size) => format!("<{} size=\"{}\" />", self.component.name(), size.as_str()),
            None => format!("<{} />", self.component.name()),
        }
    }
}

/// Which size tokens a rule accepts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SizeMatch {
    /// Size is irrelevant; a missing size token is fine.
    Any,
    /// The spinner's size token must be one of these.
    OneOf(&'static [u32]),
}

impl SizeMatch {
    fn accepts(&self, size: Option<u32>) -> bool {
        match self {
            SizeMatch::Any => true,
            SizeMatch::OneOf(sizes) => size.is_some_and(|s| sizes.contains(&s)),
        }
    }
}

/// An immutable `(pattern, replacement)` rule.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Rule {
    /// Stable identifier used in logs and listings.
    pub name: &'static str,
    /// Priority group.
    pub tier: Tier,
    /// Accepted size tokens.
    pub sizes: SizeMatch,
    /// Class tokens required in addition to the spinner marker.
    pub required: &'static [&'static str],
    /// What a matching element becomes.
    pub replacement: Canonical,
}

impl Rule {
    /// Whether an element with these class tokens is handled by this rule.
    ///
    /// The spinner marker is always required.
    pub fn matches(&self, classes: &[&str]) -> bool {
        has_marker(classes)
            && self.required.iter().all(|r| classes.contains(r))
            && self.sizes.accepts(size_token(classes))
    }
}

impl Display for Rule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}] {}: {}", self.tier, self.name, SPINNER_MARKER)?;
        for token in self.required {
            write!(f, " + {}", token)?;
        }
        if let SizeMatch::OneOf(sizes) = self.sizes {
            let list: Vec<String> = sizes.iter().map(|s| s.to_string()).collect();
            write!(f, ", size in {{{}}}", list.join(", "))?;
        }
        write!(f, " -> {}", self.replacement.render())
    }
}
