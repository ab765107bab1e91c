//! # Markup Scanning
//!
//! Locates empty `<div>` elements in raw JSX-like text and reads the class
//! tokens of their `className` literal.
//!
//! Only the span of a recognised element is ever handed to a rule, so every
//! byte outside it survives a rewrite untouched.

use regex::Regex;
use std::sync::OnceLock;

/// The structural marker token every spinner carries.
pub const SPINNER_MARKER: &str = "animate-spin";

/// Matches an empty `<div ...>` element, either self-closing or paired with an
/// immediate `</div>`. Quoted attribute values may contain `>`; anything else
/// containing `>` (arrow functions in expressions) ends the candidate early and
/// the element is not matched.
pub(crate) fn element_re() -> &'static Regex {
    static ELEMENT_RE: OnceLock<Regex> = OnceLock::new();
    ELEMENT_RE.get_or_init(|| {
        Regex::new(r#"<div(?P<attrs>\s(?:[^>"']|"[^"]*"|'[^']*')*?)?\s*(?:/>|>\s*</div\s*>)"#)
            .expect("Invalid regex constant")
    })
}

/// Extracts the static `className` value from an attribute list.
fn class_name_re() -> &'static Regex {
    static CLASS_NAME_RE: OnceLock<Regex> = OnceLock::new();
    CLASS_NAME_RE.get_or_init(|| {
        Regex::new(
            r#"(?:^|\s)className\s*=\s*(?:"(?P<dq>[^"]*)"|'(?P<sq>[^']*)'|\{\s*"(?P<bdq>[^"]*)"\s*\}|\{\s*'(?P<bsq>[^']*)'\s*\}|\{\s*`(?P<tpl>[^`$]*)`\s*\})"#,
        )
        .expect("Invalid regex constant")
    })
}

/// Returns the whitespace-separated class tokens of the element's `className`.
///
/// Dynamic class expressions (`className={cn(...)}`, interpolated templates)
/// yield `None`.
pub(crate) fn class_tokens(attrs: &str) -> Option<Vec<&str>> {
    let caps = class_name_re().captures(attrs)?;
    let value = ["dq", "sq", "bdq", "bsq", "tpl"]
        .iter()
        .find_map(|name| caps.name(name))?;
    Some(value.as_str().split_whitespace().collect())
}

/// Whether the class list carries the spinner marker as a whole token.
pub(crate) fn has_marker(classes: &[&str]) -> bool {
    classes.iter().any(|c| *c == SPINNER_MARKER)
}

/// Reads the numeric size of a spinner.
///
/// Height (`h-N`) wins, then `size-N`, then width (`w-N`). Responsive or
/// arbitrary values (`md:h-10`, `h-[40px]`, `h-1.5`) are not size tokens.
pub(crate) fn size_token(classes: &[&str]) -> Option<u32> {
    ["h-", "size-", "w-"].iter().find_map(|prefix| {
        classes
            .iter()
            .filter_map(|c| c.strip_prefix(*prefix))
            .find_map(|n| n.parse::<u32>().ok())
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn attrs_of(markup: &str) -> Option<String> {
        element_re()
            .captures(markup)
            .map(|c| c.name("attrs").map_or(String::new(), |m| m.as_str().to_string()))
    }

    #[test]
    fn test_matches_paired_and_self_closing() {
        assert!(element_re().is_match(r#"<div className="animate-spin"></div>"#));
        assert!(element_re().is_match(r#"<div className="animate-spin" />"#));
        assert!(element_re().is_match(r#"<div className="animate-spin"/>"#));
        assert!(element_re().is_match("<div\n  className=\"animate-spin\"\n>\n</div>"));
    }

    #[test]
    fn test_ignores_elements_with_children() {
        let markup = r#"<div className="animate-spin"><span /></div>"#;
        let m = element_re().find(markup).map(|m| m.as_str());
        // The inner span is not a div, so nothing matches at all.
        assert_eq!(m, None);
    }

    #[test]
    fn test_ignores_other_tags() {
        assert!(!element_re().is_match(r#"<divider className="animate-spin" />"#));
        assert!(!element_re().is_match(r#"<span className="animate-spin"></span>"#));
    }

    #[test]
    fn test_quoted_gt_stays_inside_element() {
        let attrs = attrs_of(r#"<div title="a > b" className="animate-spin h-4"></div>"#).unwrap();
        assert_eq!(class_tokens(&attrs), Some(vec!["animate-spin", "h-4"]));
    }

    #[test]
    fn test_arrow_function_attribute_is_not_matched() {
        let markup = r#"<div onClick={() => go()} className="animate-spin"></div>"#;
        assert!(!element_re().is_match(markup));
    }

    #[test]
    fn test_class_tokens_any_attribute_order_and_quote_style() {
        let attrs = attrs_of(r#"<div role="status" className='h-4 animate-spin' />"#).unwrap();
        assert_eq!(class_tokens(&attrs), Some(vec!["h-4", "animate-spin"]));

        let attrs = attrs_of(r#"<div className={"animate-spin h-8"} />"#).unwrap();
        assert_eq!(class_tokens(&attrs), Some(vec!["animate-spin", "h-8"]));

        let attrs = attrs_of("<div className={`animate-spin  w-5`} />").unwrap();
        assert_eq!(class_tokens(&attrs), Some(vec!["animate-spin", "w-5"]));
    }

    #[test]
    fn test_dynamic_class_name_yields_none() {
        assert_eq!(class_tokens(r#" className={cn("animate-spin", size)}"#), None);
        assert_eq!(class_tokens(" className={`animate-spin ${size}`}"), None);
        assert_eq!(class_tokens(r#" data-className="animate-spin""#), None);
    }

    #[test]
    fn test_marker_must_be_whole_token() {
        assert!(has_marker(&["rounded-full", "animate-spin"]));
        assert!(!has_marker(&["animate-spin-slow", "rounded-full"]));
        assert!(!has_marker(&["md:animate-spin"]));
    }

    #[test]
    fn test_size_token_precedence() {
        assert_eq!(size_token(&["w-6", "h-10"]), Some(10));
        assert_eq!(size_token(&["size-5"]), Some(5));
        assert_eq!(size_token(&["w-12", "md:h-4"]), Some(12));
        assert_eq!(size_token(&["h-[40px]", "h-1.5"]), None);
    }
}
