//! Rule compilation and indexing.
//!
//! Parsing is split into two phases:
//!
//! 1. **Compile/index rules** (this module): wrap a rule family in
//!    `CompiledRules` and index it by coarse input buckets.
//! 2. **Run** (see `parser.rs`): scan the input for triggers (`trigger.rs`),
//!    select the active subset, then saturate and resolve.
//!
//! ## Invariants
//!
//! - `RuleId` is an index into `CompiledRules::rules` and `CompiledRules::metas`.
//!   Those vectors must stay aligned.
//! - `RuleIndex::by_bucket` is indexed by a bucket's position in `BUCKETS`.

use crate::{Dimension, Rule};

/// Rule identifier (index into the rules vector).
pub(crate) type RuleId = usize;

bitflags::bitflags! {
    /// Coarse buckets for fast input classification.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct BucketMask: u32 {
        const HAS_DIGITS      = 1 << 0;
        const HAS_COLON       = 1 << 1;
        const HAS_AMPM        = 1 << 2;
        const WEEKDAYISH      = 1 << 3;
        const MONTHISH        = 1 << 4;
        const ORDINALISH      = 1 << 5;
        const HAS_AT          = 1 << 6;
        const CURRENCY_SYMBOL = 1 << 7;
        const HAS_DEGREE      = 1 << 8;
    }
}

pub const BUCKET_COUNT: usize = 9;

/// Every bucket in index order; `RuleIndex::by_bucket[i]` holds the rules
/// gated on `BUCKETS[i]`.
pub const BUCKETS: [BucketMask; BUCKET_COUNT] = [
    BucketMask::HAS_DIGITS,
    BucketMask::HAS_COLON,
    BucketMask::HAS_AMPM,
    BucketMask::WEEKDAYISH,
    BucketMask::MONTHISH,
    BucketMask::ORDINALISH,
    BucketMask::HAS_AT,
    BucketMask::CURRENCY_SYMBOL,
    BucketMask::HAS_DEGREE,
];

bitflags::bitflags! {
    /// Tracks which dimensions are present in the stash, so rules depending
    /// on an absent dimension can be skipped.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct DimensionSet: u16 {
        const TIME         = 1 << 0;
        const NUMERAL      = 1 << 1;
        const REGEX        = 1 << 2;
        const ORDINAL      = 1 << 3;
        const PERCENTAGE   = 1 << 4;
        const QUANTITY     = 1 << 5;
        const PHONE_NUMBER = 1 << 6;
        const EMAIL        = 1 << 7;
    }
}

impl DimensionSet {
    pub fn of(dim: Dimension) -> Self {
        match dim {
            Dimension::Time => DimensionSet::TIME,
            Dimension::Numeral => DimensionSet::NUMERAL,
            Dimension::RegexMatch => DimensionSet::REGEX,
            Dimension::Ordinal => DimensionSet::ORDINAL,
            Dimension::Percentage => DimensionSet::PERCENTAGE,
            Dimension::Quantity => DimensionSet::QUANTITY,
            Dimension::PhoneNumber => DimensionSet::PHONE_NUMBER,
            Dimension::Email => DimensionSet::EMAIL,
        }
    }
}

/// Activation metadata copied out of a `Rule`.
#[derive(Clone, Copy, Debug)]
pub struct RuleMeta {
    pub required_phrases: &'static [&'static str],
    pub optional_phrases: &'static [&'static str],
    pub buckets: BucketMask,
}

#[derive(Default, Debug)]
pub struct RuleIndex {
    pub always_on: Vec<RuleId>,
    pub by_bucket: [Vec<RuleId>; BUCKET_COUNT],
}

/// Pre-compiled rule set with metadata and indexes.
#[derive(Debug)]
pub struct CompiledRules<'a> {
    pub rules: Vec<&'a Rule>,
    pub metas: Vec<RuleMeta>,
    pub index: RuleIndex,
}

impl<'a> CompiledRules<'a> {
    /// Index `rules` by bucket. Rules without bucket requirements are always
    /// on; phrase gating happens later in the parser.
    pub fn new(rules: &'a [Rule]) -> Self {
        let rule_refs: Vec<&Rule> = rules.iter().collect();

        let metas: Vec<RuleMeta> = rule_refs
            .iter()
            .map(|r| RuleMeta {
                required_phrases: r.required_phrases,
                optional_phrases: r.optional_phrases,
                buckets: BucketMask::from_bits_truncate(r.buckets),
            })
            .collect();

        let mut index = RuleIndex::default();
        for (id, meta) in metas.iter().enumerate() {
            if meta.buckets.is_empty() {
                index.always_on.push(id);
                continue;
            }
            for (slot, bucket) in BUCKETS.iter().enumerate() {
                if meta.buckets.contains(*bucket) {
                    index.by_bucket[slot].push(id);
                }
            }
        }

        CompiledRules { rules: rule_refs, metas, index }
    }

    /// Priority of the rule named `name`, 0 when unknown.
    pub fn priority_of(&self, name: &str) -> u16 {
        self.rules.iter().find(|r| r.name == name).map(|r| r.priority).unwrap_or(0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Token;

    fn numeral_rule(buckets: u32) -> Rule {
        rule! {
            name: "test rule",
            pattern: [re!(r"\d+")],
            buckets: buckets,
            prod: |_tokens: &[Token]| -> Option<crate::NumeralData> { None },
        }
    }

    #[test]
    fn rules_without_buckets_are_always_on() {
        let rules = vec![numeral_rule(0), numeral_rule(BucketMask::HAS_DIGITS.bits())];
        let compiled = CompiledRules::new(&rules);
        assert_eq!(compiled.index.always_on, vec![0]);
        assert_eq!(compiled.index.by_bucket[0], vec![1]);
    }

    #[test]
    fn multi_bucket_rules_are_indexed_under_each_bucket() {
        let mask = (BucketMask::HAS_AT | BucketMask::HAS_DEGREE).bits();
        let rules = vec![numeral_rule(mask)];
        let compiled = CompiledRules::new(&rules);
        assert_eq!(compiled.index.by_bucket[6], vec![0]);
        assert_eq!(compiled.index.by_bucket[8], vec![0]);
        assert!(compiled.index.always_on.is_empty());
    }
}
