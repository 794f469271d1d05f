//! Property-based tests for the document-requirement gate.

use proptest::prelude::*;

use super::gate::DocumentGateStatus;

proptest! {
    #![proptest_config(ProptestConfig::with_cases(200))]

    /// *For any* counts, the gate formula holds:
    /// satisfied iff required == 0, or attached covers all required types
    /// (min == 0), or attached covers min(min, required) (min > 0).
    #[test]
    fn prop_gate_formula(
        required in 0u32..10,
        attached in 0u32..10,
        min in 0u32..10,
    ) {
        let gate = DocumentGateStatus {
            required_document_types: required,
            attached_required_types: attached,
            min_required_documents: min,
        };

        let expected = required == 0
            || (min == 0 && attached >= required)
            || (min > 0 && attached >= min.min(required));

        prop_assert_eq!(gate.is_satisfied(), expected);
    }

    /// *For any* unsatisfied gate, missing_count is positive and the
    /// requirement message mentions it (all-required mode).
    #[test]
    fn prop_unsatisfied_gate_reports_missing(
        required in 1u32..10,
        attached in 0u32..10,
    ) {
        let gate = DocumentGateStatus {
            required_document_types: required,
            attached_required_types: attached,
            min_required_documents: 0,
        };

        if gate.is_satisfied() {
            prop_assert_eq!(gate.missing_count(), 0);
        } else {
            prop_assert!(gate.missing_count() > 0);
            prop_assert!(
                gate.requirement_message()
                    .contains(&gate.missing_count().to_string())
            );
        }
    }

    /// Satisfaction is monotonic in the number of attached required types.
    #[test]
    fn prop_gate_monotonic_in_attached(
        required in 0u32..10,
        attached in 0u32..9,
        min in 0u32..10,
    ) {
        let lower = DocumentGateStatus {
            required_document_types: required,
            attached_required_types: attached,
            min_required_documents: min,
        };
        let higher = DocumentGateStatus {
            attached_required_types: attached + 1,
            ..lower
        };

        prop_assert!(!lower.is_satisfied() || higher.is_satisfied());
    }
}
