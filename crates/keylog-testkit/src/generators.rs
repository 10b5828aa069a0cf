//! Proptest generators for property-based testing.

use proptest::prelude::*;

use keylog_core::{ChainCheck, Output, Record};

/// A non-empty key or hash string.
pub fn key() -> impl Strategy<Value = String> {
    "[a-f0-9]{8}".prop_map(String::from)
}

/// A key that may be empty.
pub fn maybe_key() -> impl Strategy<Value = String> {
    prop_oneof![1 => Just(String::new()), 3 => key()]
}

/// A relationship that is empty or whitespace only.
pub fn blank_relationship() -> impl Strategy<Value = String> {
    "[ \t\n]{0,4}".prop_map(String::from)
}

/// Any relationship, blank or not.
pub fn relationship() -> impl Strategy<Value = String> {
    prop_oneof![blank_relationship(), "[a-z]{1,10}".prop_map(String::from)]
}

/// An output paying an arbitrary address.
pub fn output() -> impl Strategy<Value = Output> {
    (maybe_key(), 0u64..=1_000_000).prop_map(|(address, amount)| Output { address, amount })
}

/// An arbitrary record; every field may be empty.
pub fn record() -> impl Strategy<Value = Record> {
    (
        maybe_key(),
        maybe_key(),
        maybe_key(),
        relationship(),
        prop::collection::vec(output(), 1..4),
    )
        .prop_map(|(pk, pre, twice, rel, outputs)| {
            Record::new()
                .public_key(pk)
                .prerotated_key_hash(pre)
                .twice_prerotated_key_hash(twice)
                .relationship(rel)
                .outputs(outputs)
        })
}

/// A record whose outputs all pay its own pre-rotated hash and whose
/// relationship is blank.
pub fn on_chain_record() -> impl Strategy<Value = Record> {
    (
        record(),
        key(),
        blank_relationship(),
        prop::collection::vec(0u64..=1_000_000, 1..4),
    )
        .prop_map(|(record, pre, rel, amounts)| {
            let outputs = amounts
                .into_iter()
                .map(|amount| Output::new(pre.clone(), amount))
                .collect();
            record
                .prerotated_key_hash(pre)
                .relationship(rel)
                .outputs(outputs)
        })
}

/// Records that satisfy every key-log check.
///
/// Built from a ladder of five distinct keys `k0..k4`:
/// record `n` carries `(k(n-1), k(n), k(n+1))` as (public, pre-rotated,
/// twice-pre-rotated).
#[derive(Debug, Clone)]
pub struct ConsistentChain {
    pub record1: Record,
    pub record2: Record,
    pub record3: Option<Record>,
}

impl ConsistentChain {
    /// Overwrite the later operand of `check` with a value no key can match.
    ///
    /// Each check's later operand is read by that check alone, so breaking
    /// one never affects another.
    pub fn break_check(&mut self, check: ChainCheck) {
        const BROKEN: &str = "broken";
        match check {
            ChainCheck::SkipOneHash => self.record2.prerotated_key_hash = BROKEN.into(),
            ChainCheck::NextKeyBinding => self.record2.public_key = BROKEN.into(),
            ChainCheck::ContinuationKeyBinding => {
                if let Some(r3) = self.record3.as_mut() {
                    r3.public_key = BROKEN.into();
                }
            }
            ChainCheck::ContinuationSkipOneHash => {
                if let Some(r3) = self.record3.as_mut() {
                    r3.prerotated_key_hash = BROKEN.into();
                }
            }
        }
    }
}

impl Arbitrary for ConsistentChain {
    type Parameters = ();
    type Strategy = BoxedStrategy<Self>;

    fn arbitrary_with(_: Self::Parameters) -> Self::Strategy {
        (
            prop::collection::hash_set(key(), 5),
            any::<bool>(), // continuation
            1u64..=1_000_000,
            "[a-z]{1,8}",
        )
            .prop_map(|(keys, continuation, amount, rel)| {
                let k: Vec<String> = keys.into_iter().collect();

                let record1 = Record::new()
                    .public_key(k[0].clone())
                    .prerotated_key_hash(k[1].clone())
                    .twice_prerotated_key_hash(k[2].clone());

                let record2 = Record::new()
                    .public_key(k[1].clone())
                    .prerotated_key_hash(k[2].clone())
                    .twice_prerotated_key_hash(k[3].clone());

                if continuation {
                    let record2 = record2
                        .relationship(rel)
                        .outputs(vec![Output::new("ext-merchant", amount)]);
                    let record3 = Record::new()
                        .public_key(k[2].clone())
                        .prerotated_key_hash(k[3].clone())
                        .twice_prerotated_key_hash(k[4].clone());
                    ConsistentChain {
                        record1,
                        record2,
                        record3: Some(record3),
                    }
                } else {
                    let record2 = record2.outputs(vec![Output::new(k[2].clone(), amount)]);
                    ConsistentChain {
                        record1,
                        record2,
                        record3: None,
                    }
                }
            })
            .boxed()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use keylog_core::{assemble_chain_with_placeholders, requires_continuation, validate_chain};

    /// Blank the field if the mask bit is set.
    fn blank(field: &mut String, mask: u8, bit: u8) {
        if mask & (1 << bit) != 0 {
            field.clear();
        }
    }

    proptest! {
        #[test]
        fn test_on_chain_record_needs_no_continuation(rec in on_chain_record()) {
            prop_assert!(!requires_continuation(Some(&rec)));
        }

        #[test]
        fn test_external_output_always_needs_continuation(
            base in record(),
            extra in output(),
            rel in relationship(),
        ) {
            prop_assume!(extra.address != base.prerotated_key_hash);
            let mut base = base.relationship(rel);
            base.outputs.push(extra);
            prop_assert!(requires_continuation(Some(&base)));
        }

        #[test]
        fn test_continuation_ignores_key_fields(
            base in record(),
            pk in maybe_key(),
            twice in maybe_key(),
        ) {
            let before = requires_continuation(Some(&base));
            let changed = base.public_key(pk).twice_prerotated_key_hash(twice);
            prop_assert_eq!(before, requires_continuation(Some(&changed)));
        }

        #[test]
        fn test_consistent_chain_validates(chain in any::<ConsistentChain>()) {
            let result = validate_chain(&chain.record1, &chain.record2, chain.record3.as_ref());
            prop_assert!(result.ok);
            prop_assert!(result.errors.is_empty());
        }

        #[test]
        fn test_blank_operands_never_fail(chain in any::<ConsistentChain>(), mask in any::<u8>()) {
            let ConsistentChain { mut record1, mut record2, mut record3 } = chain;
            blank(&mut record1.public_key, mask, 0);
            blank(&mut record1.prerotated_key_hash, mask, 1);
            blank(&mut record1.twice_prerotated_key_hash, mask, 2);
            blank(&mut record2.public_key, mask, 3);
            blank(&mut record2.twice_prerotated_key_hash, mask, 4);
            if let Some(r3) = record3.as_mut() {
                blank(&mut r3.public_key, mask, 5);
                blank(&mut r3.prerotated_key_hash, mask, 6);
            }

            let result = validate_chain(&record1, &record2, record3.as_ref());
            prop_assert!(result.ok, "errors: {:?}", result.errors);
        }

        #[test]
        fn test_one_error_per_broken_check_in_order(
            chain in any::<ConsistentChain>(),
            mask in 1u8..16,
        ) {
            let mut chain = chain;
            let applicable: Vec<ChainCheck> = ChainCheck::ALL
                .into_iter()
                .filter(|c| chain.record3.is_some() || !c.needs_continuation())
                .collect();
            let broken: Vec<ChainCheck> = applicable
                .iter()
                .enumerate()
                .filter(|(i, _)| mask & (1 << i) != 0)
                .map(|(_, c)| *c)
                .collect();

            for check in &broken {
                chain.break_check(*check);
            }

            let result = validate_chain(&chain.record1, &chain.record2, chain.record3.as_ref());
            let reported: Vec<ChainCheck> = result.violations.iter().map(|v| v.check).collect();
            prop_assert_eq!(reported, broken.clone());
            prop_assert_eq!(result.errors.len(), broken.len());
            prop_assert_eq!(result.ok, broken.is_empty());
        }

        #[test]
        fn test_validation_is_deterministic(r1 in record(), r2 in record(), r3 in record()) {
            let a = validate_chain(&r1, &r2, Some(&r3));
            let b = validate_chain(&r1, &r2, Some(&r3));
            prop_assert_eq!(a, b);
        }

        #[test]
        fn test_assembled_length_follows_continuation(
            r1 in record(),
            r2 in record(),
            r3 in prop::option::of(record()),
        ) {
            let chain = assemble_chain_with_placeholders(&r1, &r2, r3.as_ref());
            let expected: Vec<u8> = if requires_continuation(Some(&r2)) {
                vec![1, 2, 3]
            } else {
                vec![1, 2]
            };
            let indices: Vec<u8> = chain.records().iter().map(|r| r.record_index).collect();
            prop_assert_eq!(indices, expected);
        }

        #[test]
        fn test_tx_id_deterministic(chain in any::<ConsistentChain>()) {
            let a = assemble_chain_with_placeholders(&chain.record1, &chain.record2, chain.record3.as_ref());
            let b = assemble_chain_with_placeholders(&chain.record1, &chain.record2, chain.record3.as_ref());
            prop_assert_eq!(a.compute_id().unwrap(), b.compute_id().unwrap());
        }
    }
}
