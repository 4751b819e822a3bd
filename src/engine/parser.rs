//! Matching and saturation parser.
//!
//! This module is the operational core of the engine:
//!
//! - Select the rules that are plausible for the input (bucket + phrase
//!   gating; see `compiled_rules.rs` and `trigger.rs`).
//! - Repeatedly apply those rules to build up a `Stash` of `Node`s.
//! - Deduplicate produced nodes to keep saturation finite (see `dedup.rs`).
//! - Resolve nodes of the requested dimension (see `resolve.rs`) and select
//!   the leftmost-longest, non-overlapping spans.
//!
//! ## Pass structure
//!
//! ```text
//! (0) trigger scan         -> buckets + phrases
//! (1) initial regex pass   -> seed from raw input
//! (2) iterative passes     -> predicate + regex rules as the stash grows
//! (3) resolve + select     -> ResolvedToken output
//! ```
//!
//! Output is deterministic for a given input, rule set and context.

use super::compiled_rules::{BUCKETS, CompiledRules, DimensionSet, RuleId};
use super::dedup::NodeKey;
use super::metrics::{PassMetrics, RunMetrics, RunResult, SaturationMetrics};
use super::resolve::resolve_node;
use super::trigger::TriggerInfo;
use crate::api::Context;
use crate::{Dimension, Node, Pattern, Range, ResolvedToken, Rule, Stash, Token, TokenKind};
use regex::Captures;
use std::collections::HashSet;
use std::time::Instant;
use tracing::{Level, debug, enabled, trace};

/// A rule matched up to `next_idx`, with the nodes consumed so far in
/// `route` and `position` pointing at the end of the last one.
///
/// ```text
/// pattern: [Predicate(is_numeral), Regex("\s*%")]
///           ^ consumed                ^ next_idx
///
/// route: [ Node(range:0..3, dim:Numeral) ]   position: 3
/// ```
struct PartialMatch<'a> {
    rule: &'a Rule,
    next_idx: usize,
    position: usize,
    route: Vec<Node>,
}

/// Applies one rule family to an input string.
///
/// ```text
/// new() -> saturate() -> resolve_selected(target)
///            │             └─ leftmost-longest spans of one dimension
///            └─ repeatedly grow stash using rules
/// ```
#[derive(Debug)]
pub struct Parser<'a> {
    input: &'a str,
    /// Discovered nodes (intermediate parse results).
    stash: Stash,
    /// Keys of accepted nodes, to avoid re-adding identical nodes.
    seen: HashSet<NodeKey>,
    compiled: CompiledRules<'a>,
    /// Active rules whose first pattern is a `Regex`.
    regex_rules: Vec<&'a Rule>,
    /// Active rules whose first pattern is a `Predicate`.
    predicate_rules: Vec<&'a Rule>,
    /// Record produced nodes in pass metrics.
    capture_nodes: bool,
}

impl<'a> Parser<'a> {
    /// Create a new `Parser` for `input` using pre-compiled rules.
    pub fn new_compiled(input: &'a str, compiled: CompiledRules<'a>) -> Self {
        let trigger_info = TriggerInfo::scan(input);
        debug!(
            target: "text_recognizer::engine",
            buckets = ?trigger_info.buckets,
            phrases = ?trigger_info.phrases,
            "trigger scan"
        );

        let mut active_rule_ids: HashSet<RuleId> = compiled.index.always_on.iter().copied().collect();
        for (slot, bucket) in BUCKETS.iter().enumerate() {
            if trigger_info.buckets.contains(*bucket) {
                active_rule_ids.extend(&compiled.index.by_bucket[slot]);
            }
        }

        // Phrase gating: required phrases are AND-ed, optional phrases OR-ed.
        let mut phrase_filtered = 0;
        active_rule_ids.retain(|&id| {
            let meta = &compiled.metas[id];
            let required_ok = meta.required_phrases.iter().all(|&p| trigger_info.phrases.contains(p));
            let optional_ok = meta.optional_phrases.is_empty()
                || meta.optional_phrases.iter().any(|&p| trigger_info.phrases.contains(p));
            if !(required_ok && optional_ok) {
                phrase_filtered += 1;
            }
            required_ok && optional_ok
        });

        debug!(
            target: "text_recognizer::engine",
            active = active_rule_ids.len(),
            total = compiled.rules.len(),
            phrase_filtered,
            "active rules"
        );

        let active = |first_is_regex: bool| -> Vec<&'a Rule> {
            compiled
                .rules
                .iter()
                .enumerate()
                .filter(|(id, _)| active_rule_ids.contains(id))
                .filter(|(_, r)| matches!(r.pattern.first(), Some(Pattern::Regex(_))) == first_is_regex)
                .map(|(_, r)| *r)
                .collect()
        };
        let regex_rules = active(true);
        let predicate_rules = active(false);

        Parser {
            input,
            stash: Stash::empty(),
            seen: HashSet::new(),
            compiled,
            regex_rules,
            predicate_rules,
            capture_nodes: false,
        }
    }

    /// Create a new `Parser` for `input` using `rules`.
    pub fn new(input: &'a str, rules: &'a [Rule]) -> Self {
        Self::new_compiled(input, CompiledRules::new(rules))
    }

    /// Keep the nodes produced by each pass in the run metrics.
    pub fn capture_nodes(mut self, capture: bool) -> Self {
        self.capture_nodes = capture;
        self
    }

    pub(crate) fn active_rule_names(&self) -> Vec<&'static str> {
        let mut names: Vec<&'static str> =
            self.regex_rules.iter().chain(self.predicate_rules.iter()).map(|r| r.name).collect();
        names.sort_unstable();
        names.dedup();
        names
    }

    fn regex_node(caps: &Captures<'_>) -> Option<Node> {
        let m = caps.get(0)?;
        let groups: Vec<String> =
            (0..caps.len()).filter_map(|i| caps.get(i).map(|g| g.as_str().to_lowercase())).collect();
        Some(Node {
            range: Range { start: m.start(), end: m.end() },
            token: Token { dim: Dimension::RegexMatch, kind: TokenKind::RegexMatch(groups) },
            rule_name: "<regex>",
            evidence: Vec::new(),
        })
    }

    /// Find nodes that match `pat` and start exactly at `position`.
    ///
    /// ```text
    /// input: "30 degrees"
    /// position: 2 (end of "30")
    /// Pattern::Regex("\\s*degrees?") -> Node at 2..10
    /// Pattern::Predicate(is_numeral)  -> nodes pulled from stash at offset 2
    /// ```
    fn lookup_item(&self, pat: &Pattern, position: usize) -> Vec<Node> {
        match pat {
            Pattern::Regex(re) => {
                if position > self.input.len() {
                    return Vec::new();
                }
                re.captures_at(self.input, position)
                    .filter(|caps| caps.get(0).map(|m| m.start()) == Some(position))
                    .and_then(|caps| Self::regex_node(&caps))
                    .into_iter()
                    .collect()
            }
            Pattern::Predicate(pred) => self
                .stash
                .nodes()
                .iter()
                .filter(|n| n.range.start == position && pred(&n.token))
                .cloned()
                .collect(),
        }
    }

    /// Find nodes that match `pat` anywhere in the input.
    fn lookup_item_anywhere(&self, pat: &Pattern) -> Vec<Node> {
        match pat {
            Pattern::Regex(re) => re.captures_iter(self.input).filter_map(|caps| Self::regex_node(&caps)).collect(),
            Pattern::Predicate(pred) => {
                self.stash.to_pos_ordered_list().into_iter().filter(|n| pred(&n.token)).cloned().collect()
            }
        }
    }

    /// Match a rule's first pattern anywhere and return one `PartialMatch`
    /// per hit.
    fn seed_first_pattern_anywhere(&self, rule: &'a Rule) -> Vec<PartialMatch<'a>> {
        let Some(first) = rule.pattern.first() else {
            return Vec::new();
        };
        self.lookup_item_anywhere(first)
            .into_iter()
            .map(|node| PartialMatch { rule, next_idx: 1, position: node.range.end, route: vec![node] })
            .collect()
    }

    /// Depth-first expansion of partial matches until their rule's pattern
    /// is fully consumed.
    ///
    /// ```text
    /// [m0] --Regex--> [m1] --Predicate--> [m2]
    ///   │                           │
    ///   └─ (dead end, dropped)      └─ complete -> collected
    /// ```
    fn match_all(&self, input_matches: Vec<PartialMatch<'a>>) -> Vec<PartialMatch<'a>> {
        let mut results = Vec::new();
        let mut stack: Vec<PartialMatch<'a>> = input_matches;

        while let Some(m) = stack.pop() {
            if m.next_idx >= m.rule.pattern.len() {
                results.push(m);
                continue;
            }

            let pat = &m.rule.pattern[m.next_idx];
            let nodes = self.lookup_item(pat, m.position);

            // Reverse so the stack explores matches in forward order.
            for node in nodes.into_iter().rev() {
                let mut route = m.route.clone();
                let position = node.range.end;
                route.push(node);
                stack.push(PartialMatch { rule: m.rule, next_idx: m.next_idx + 1, position, route });
            }
        }

        results
    }

    /// Run the rule's production over a complete match and wrap the result
    /// in a `Node` spanning the whole route.
    fn produce_node(&self, m: &PartialMatch) -> Option<Node> {
        if m.next_idx < m.rule.pattern.len() {
            return None;
        }
        let (first, last) = (m.route.first()?, m.route.last()?);
        let tokens: Vec<Token> = m.route.iter().map(|n| n.token.clone()).collect();

        let Some(tok) = (m.rule.production)(&tokens) else {
            trace!(target: "text_recognizer::engine", rule = m.rule.name, "production returned nothing");
            return None;
        };

        if enabled!(target: "text_recognizer::engine", Level::TRACE) {
            let span_text = self.input.get(first.range.start..last.range.end).unwrap_or_default();
            trace!(
                target: "text_recognizer::engine",
                rule = m.rule.name,
                start = first.range.start,
                end = last.range.end,
                text = span_text,
                token = ?tok,
                "production"
            );
        }

        let mut evidence = Vec::new();
        for node in &m.route {
            evidence.push(node.rule_name);
            evidence.extend_from_slice(&node.evidence);
        }
        Some(Node {
            range: Range { start: first.range.start, end: last.range.end },
            token: tok,
            rule_name: m.rule.name,
            evidence,
        })
    }

    /// Apply an ordered set of rules once; returns the produced nodes and the
    /// number of rules whose first pattern matched.
    fn apply_rules_once(&self, rule_set: &[&'a Rule]) -> (Vec<Node>, usize) {
        let mut discovered = Vec::new();
        let mut rules_seeded = 0;

        for &rule in rule_set {
            let starts = self.seed_first_pattern_anywhere(rule);
            if starts.is_empty() {
                continue;
            }
            rules_seeded += 1;
            for m in self.match_all(starts) {
                if let Some(node) = self.produce_node(&m) {
                    discovered.push(node);
                }
            }
        }
        (discovered, rules_seeded)
    }

    fn dimensions_in_stash(&self) -> DimensionSet {
        self.stash.nodes().iter().fold(DimensionSet::empty(), |dims, node| dims | DimensionSet::of(node.token.dim))
    }

    /// Rules with no deps always run; otherwise every dependency must already
    /// be present in the stash.
    fn deps_satisfied(rule: &Rule, dims_in_stash: DimensionSet) -> bool {
        rule.deps.iter().all(|&dep| dims_in_stash.contains(DimensionSet::of(dep)))
    }

    /// Accept the unseen nodes of `discovered` and record the pass.
    fn absorb(&mut self, discovered: Vec<Node>, rules_seeded: usize, started: Instant) -> (Stash, PassMetrics) {
        let mut newly_added = Stash::empty();
        for node in discovered {
            if self.seen.insert(NodeKey::from_node(&node)) {
                newly_added.insert(node);
            }
        }
        let produced = newly_added.nodes().len();
        let capture = self.capture_nodes || enabled!(target: "text_recognizer::engine", Level::DEBUG);
        let nodes = if capture { newly_added.nodes().to_vec() } else { Vec::new() };
        (newly_added, PassMetrics { duration: started.elapsed(), produced, nodes, rules_seeded })
    }

    /// Saturate the stash by repeatedly applying rules until a fixpoint.
    ///
    /// ```text
    /// regex_rules pass
    ///      │
    ///      ▼
    ///  stash grows ──┐
    ///                │ predicate + regex passes
    ///                └── repeat until fixed point
    /// ```
    fn saturate(&mut self) -> SaturationMetrics {
        let mut metrics = SaturationMetrics::default();
        let saturation_start = Instant::now();

        let regex_start = Instant::now();
        let regex_rules = self.regex_rules.clone();
        let (discovered, rules_seeded) = self.apply_rules_once(&regex_rules);
        let (newly_added, pass) = self.absorb(discovered, rules_seeded, regex_start);
        debug!(target: "text_recognizer::engine", pass = 0, produced = pass.produced, "saturation pass");
        metrics.initial_regex = pass;
        if newly_added.null() {
            metrics.total = saturation_start.elapsed();
            return metrics;
        }
        self.stash = self.stash.union(&newly_added);

        let all_saturate_rules: Vec<&'a Rule> =
            self.predicate_rules.iter().chain(self.regex_rules.iter()).copied().collect();

        loop {
            let iteration_start = Instant::now();
            let dims_in_stash = self.dimensions_in_stash();
            let saturate_rules: Vec<&'a Rule> =
                all_saturate_rules.iter().filter(|rule| Self::deps_satisfied(rule, dims_in_stash)).copied().collect();

            let (discovered, rules_seeded) = self.apply_rules_once(&saturate_rules);
            let (newly_added, pass) = self.absorb(discovered, rules_seeded, iteration_start);
            debug!(
                target: "text_recognizer::engine",
                pass = metrics.iterations.len() + 1,
                produced = pass.produced,
                "saturation pass"
            );
            metrics.iterations.push(pass);
            if newly_added.null() {
                break;
            }
            self.stash = self.stash.union(&newly_added);
        }

        metrics.total = saturation_start.elapsed();
        metrics
    }

    /// Resolve every node of dimension `target`, ordered by start offset,
    /// longer spans first, then higher rule priority.
    fn resolve_all(&self, context: &Context, target: Dimension) -> Vec<ResolvedToken> {
        let mut resolved: Vec<ResolvedToken> = self
            .stash
            .nodes()
            .iter()
            .filter(|node| node.token.dim == target)
            .filter_map(|node| resolve_node(context, self.input, node.clone()))
            .collect();

        resolved.sort_by(|a, b| {
            a.node
                .range
                .start
                .cmp(&b.node.range.start)
                .then(b.node.range.end.cmp(&a.node.range.end))
                .then(self.compiled.priority_of(b.node.rule_name).cmp(&self.compiled.priority_of(a.node.rule_name)))
        });
        resolved
    }

    /// Keep the leftmost-longest tokens that do not overlap an already kept
    /// token. Expects the ordering produced by `resolve_all`.
    fn select_spans(resolved: &[ResolvedToken]) -> Vec<ResolvedToken> {
        let mut selected: Vec<ResolvedToken> = Vec::new();
        for rt in resolved {
            let overlaps = selected.last().is_some_and(|kept| kept.node.range.overlaps(&rt.node.range));
            if !overlaps {
                selected.push(rt.clone());
            }
        }
        selected
    }

    /// Saturate the stash, then resolve and select tokens of `target`,
    /// returning timing details alongside.
    pub fn run_with_metrics(mut self, context: &Context, target: Dimension) -> RunResult {
        let total_start = Instant::now();
        let active_rules = self.active_rule_names();
        let saturation = self.saturate();

        let resolve_start = Instant::now();
        let all_tokens = self.resolve_all(context, target);
        let tokens = Self::select_spans(&all_tokens);
        let resolve = resolve_start.elapsed();

        let metrics = RunMetrics { total: total_start.elapsed(), saturation, resolve };
        RunResult { all_tokens, tokens, active_rules, metrics }
    }

    /// Saturate and resolve, discarding timing details.
    pub fn run(self, context: &Context, target: Dimension) -> Vec<ResolvedToken> {
        self.run_with_metrics(context, target).tokens
    }
}
