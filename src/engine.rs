//! Parsing and resolution engine.
//!
//! Every recognizer in the battery runs this engine with its own rule set and
//! a target [`Dimension`](crate::Dimension). Parsing an input string is a
//! pipeline:
//!
//! ```text
//! rules (one family) ──┐
//!                      │  CompiledRules::new           (compiled_rules.rs)
//!                      └───────────────┬──────────────
//!                                      │
//! input ── TriggerInfo::scan ──────────┼─ select active rules (buckets + phrases)
//!         (trigger.rs)                 │
//!                                      v
//!                            Parser::saturate (parser.rs)
//!                              - seed matches (regex-first)
//!                              - iterate to fixpoint
//!                              - dedup via NodeKey (dedup.rs)
//!                                      │
//!                                      v
//!                            resolve_node (resolve.rs)
//!                              - keep the target dimension
//!                              - per-dimension type name + resolution
//!                              - leftmost-longest span selection
//!                                      │
//!                                      v
//!                               Vec<ResolvedToken>
//! ```
//!
//! The engine leans on **saturation**: rules are applied repeatedly until an
//! iteration produces no new nodes, so one rule can build on the nodes of
//! another (a numeral feeds a percentage, a clock time feeds a date-time).
//!
//! ## Debugging
//!
//! Activation, pass and resolution traces are emitted through `tracing` at
//! `debug`/`trace` level under the `text_recognizer::engine` target.

#[path = "engine/compiled_rules.rs"]
mod compiled_rules;
#[path = "engine/dedup.rs"]
mod dedup;
#[path = "engine/metrics.rs"]
mod metrics;
#[path = "engine/parser.rs"]
mod parser;
#[path = "engine/resolve.rs"]
mod resolve;
#[path = "engine/trigger.rs"]
mod trigger;

pub use compiled_rules::BucketMask;
pub use parser::Parser;
