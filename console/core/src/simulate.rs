//! Deterministic simulation of HTTPRoute match semantics.
//!
//! Given a route and a synthetic request, [`evaluate`] reports per rule
//! whether the route would select the request, and which backends the first
//! matching rule resolves to. The evaluation is purely diagnostic: it never
//! fails, and any misconfiguration (such as a malformed regex) is reported as
//! a non-match with an explanatory reason.

use crate::routes::{BackendRef, HeaderMatch, PathMatch, Route, RouteMatch, RouteRule};
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

#[derive(Clone, Debug, Default, Deserialize)]
pub struct SimulateRequest {
    #[serde(default)]
    pub method: String,
    #[serde(default)]
    pub path: String,
    /// Accepted for API compatibility but not evaluated against hostname
    /// conditions.
    #[serde(default)]
    pub host: String,
    #[serde(default)]
    pub headers: HashMap<String, String>,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SimulateResponse {
    pub matched: bool,
    /// Index of the first matching rule, or -1 when no rule matched.
    pub matched_rule: i32,
    /// One entry per rule, in rule order, regardless of match outcome.
    pub match_details: Vec<MatchDetail>,
    pub backends: Vec<BackendRef>,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MatchDetail {
    pub rule_index: usize,
    pub matched: bool,
    pub reason: String,
}

/// Evaluates every rule of `route` against `request`.
///
/// All rules are evaluated even after a match is found so the response is a
/// complete report; only the first match contributes `matchedRule` and
/// `backends`.
pub fn evaluate(route: &Route, request: &SimulateRequest) -> SimulateResponse {
    let mut response = SimulateResponse {
        matched: false,
        matched_rule: -1,
        match_details: Vec::with_capacity(route.rules.len()),
        backends: vec![],
    };

    for (index, rule) in route.rules.iter().enumerate() {
        let (matched, reason) = evaluate_rule(rule, request);
        response.match_details.push(MatchDetail {
            rule_index: index,
            matched,
            reason,
        });

        if matched && !response.matched {
            response.matched = true;
            response.matched_rule = index as i32;
            response.backends = rule.backend_refs.clone();
        }
    }

    response
}

/// A rule matches if any of its blocks matches. A rule without blocks matches
/// every request. The reason for a non-matching rule concatenates every
/// block's failure, in block order.
fn evaluate_rule(rule: &RouteRule, request: &SimulateRequest) -> (bool, String) {
    if rule.matches.is_empty() {
        return (
            true,
            "rule has no match conditions (matches all requests)".to_string(),
        );
    }

    let mut failures = Vec::with_capacity(rule.matches.len());
    for block in &rule.matches {
        match evaluate_block(block, request) {
            Ok(()) => return (true, "all conditions matched".to_string()),
            Err(reason) => failures.push(reason),
        }
    }

    (false, failures.join("; "))
}

/// All conditions present in a block must hold. The first failing condition
/// ends the block's evaluation and becomes its reason.
fn evaluate_block(block: &RouteMatch, request: &SimulateRequest) -> Result<(), String> {
    if let Some(path) = &block.path {
        match path {
            PathMatch::Exact(value) => {
                if request.path != *value {
                    return Err(format!(
                        "path {:?} does not equal {:?}",
                        request.path, value
                    ));
                }
            }
            PathMatch::Prefix(value) => {
                if !request.path.starts_with(value.as_str()) {
                    return Err(format!(
                        "path {:?} does not have prefix {:?}",
                        request.path, value
                    ));
                }
            }
            PathMatch::Regex(pattern) => match Regex::new(pattern) {
                Ok(regex) => {
                    if !regex.is_match(&request.path) {
                        return Err(format!(
                            "path {:?} does not match regex {:?}",
                            request.path, pattern
                        ));
                    }
                }
                Err(error) => {
                    return Err(format!("invalid path regex {pattern:?}: {error}"));
                }
            },
        }
    }

    if let Some(method) = &block.method {
        if request.method != *method {
            return Err(format!(
                "method {:?} does not equal {:?}",
                request.method, method
            ));
        }
    }

    for header in &block.headers {
        // HTTP header names compare case-insensitively; values do not.
        let value = request
            .headers
            .iter()
            .find(|(name, _)| name.eq_ignore_ascii_case(header.name()))
            .map(|(_, value)| value.as_str());

        let Some(value) = value else {
            return Err(format!("header {:?} not present in request", header.name()));
        };

        match header {
            HeaderMatch::Exact(name, expected) => {
                if value != expected {
                    return Err(format!(
                        "header {name:?} value {value:?} does not equal {expected:?}"
                    ));
                }
            }
            HeaderMatch::Regex(name, pattern) => match Regex::new(pattern) {
                Ok(regex) => {
                    if !regex.is_match(value) {
                        return Err(format!(
                            "header {name:?} value {value:?} does not match regex {pattern:?}"
                        ));
                    }
                }
                Err(error) => {
                    return Err(format!("invalid header regex {pattern:?}: {error}"));
                }
            },
        }
    }

    Ok(())
}
