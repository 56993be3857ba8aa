use std::num::NonZeroUsize;

use chrono::{TimeZone, Utc};
use orderdesk_core::query::sort::compare_by_key;
use orderdesk_core::{QueryState, Record, RecordStore, SortKey, Status, evaluate};
use proptest::prelude::*;

fn arb_status() -> impl Strategy<Value = Status> {
    prop::sample::select(Status::ALL.to_vec())
}

fn arb_sort_key() -> impl Strategy<Value = SortKey> {
    prop::sample::select(SortKey::ALL.to_vec())
}

/// Small vocabularies so equal sort keys and filter hits are common.
fn arb_record(seq: usize) -> impl Strategy<Value = Record> {
    (
        prop::sample::select(vec!["Andi Lane", "andi lane", "Drew Cano", "Kate Morrison"]),
        prop::sample::select(vec!["Landing Page", "Client Project", "CRM Admin pages"]),
        prop::sample::select(vec!["Meadow Lane Oakland", "Larry San Francisco", "Nest Lane"]),
        0i64..30,
        arb_status(),
    )
        .prop_map(move |(user, project, address, day, status)| Record {
            id: format!("#CMP{}", 801 + seq),
            user: user.to_string(),
            project: project.to_string(),
            address: address.to_string(),
            timestamp: Utc.with_ymd_and_hms(2024, 5, 1, 9, 0, 0).unwrap()
                + chrono::TimeDelta::days(day),
            status,
        })
}

fn arb_store() -> impl Strategy<Value = RecordStore> {
    (0usize..40)
        .prop_flat_map(|n| (0..n).map(arb_record).collect::<Vec<_>>())
        .prop_map(|records| RecordStore::from_records(records).expect("ids are unique"))
}

#[derive(Debug, Clone)]
enum FilterOp {
    Text(String),
    Status(Status),
    Project(String),
    Address(String),
    From(String),
    To(String),
}

fn arb_filter_op() -> impl Strategy<Value = FilterOp> {
    prop_oneof![
        prop::sample::select(vec!["lane", "CMP80", "drew", "2024-05-1", "zzz"])
            .prop_map(|s| FilterOp::Text(s.to_string())),
        arb_status().prop_map(FilterOp::Status),
        prop::sample::select(vec!["Landing Page", "Client Project"])
            .prop_map(|s| FilterOp::Project(s.to_string())),
        prop::sample::select(vec!["oak", "SAN", "nest"]).prop_map(|s| FilterOp::Address(s.to_string())),
        prop::sample::select(vec!["2024-05-10", "2024-05-20", "garbage"])
            .prop_map(|s| FilterOp::From(s.to_string())),
        prop::sample::select(vec!["2024-05-15", "2024-05-25", "31/31"])
            .prop_map(|s| FilterOp::To(s.to_string())),
    ]
}

fn apply(state: &mut QueryState, op: &FilterOp) {
    match op {
        FilterOp::Text(t) => state.set_free_text(t.clone()),
        FilterOp::Status(s) => state.set_status(*s),
        FilterOp::Project(p) => state.set_project(Some(p.clone())),
        FilterOp::Address(a) => state.set_address(a.clone()),
        FilterOp::From(f) => state.set_date_from(Some(f.clone())),
        FilterOp::To(t) => state.set_date_to(Some(t.clone())),
    }
}

fn arb_state() -> impl Strategy<Value = QueryState> {
    (
        prop::collection::vec(arb_filter_op(), 0..3),
        arb_sort_key(),
        any::<bool>(),
        1usize..8,
        1usize..10,
    )
        .prop_map(|(ops, key, flip, page, size)| {
            let mut state = QueryState::new(NonZeroUsize::new(size).unwrap());
            for op in &ops {
                apply(&mut state, op);
            }
            state.toggle_sort(key);
            if flip {
                state.toggle_sort(key);
            }
            state.set_page(page);
            state
        })
}

proptest! {
    #![proptest_config(proptest::test_runner::Config::with_cases(512))]

    #[test]
    fn page_length_is_bounded_and_exact(store in arb_store(), state in arb_state()) {
        let view = evaluate(&store, &state);
        let size = state.page_size().get();
        prop_assert!(view.rows().len() <= size);
        prop_assert!(view.page() >= 1 && view.page() <= view.total_pages());
        let expected = size.min(view.total_count() - (view.page() - 1) * size);
        prop_assert_eq!(view.rows().len(), expected);
        prop_assert_eq!(view.total_pages(), view.total_count().div_ceil(size).max(1));
    }

    #[test]
    fn adding_a_filter_never_grows_the_result(
        store in arb_store(),
        ops in prop::collection::vec(arb_filter_op(), 1..8),
    ) {
        // Keep one op per field so each step only adds a constraint.
        let mut seen = Vec::new();
        let mut state = QueryState::default();
        let mut previous = evaluate(&store, &state).total_count();
        for op in &ops {
            let kind = std::mem::discriminant(op);
            if seen.contains(&kind) {
                continue;
            }
            seen.push(kind);
            apply(&mut state, op);
            let count = evaluate(&store, &state).total_count();
            prop_assert!(count <= previous, "{op:?} grew {previous} -> {count}");
            previous = count;
        }
    }

    #[test]
    fn equal_keys_keep_store_order(store in arb_store(), key in arb_sort_key(), flip in any::<bool>()) {
        let mut state = QueryState::new(NonZeroUsize::new(100).unwrap());
        state.toggle_sort(key);
        if flip {
            state.toggle_sort(key);
        }
        let view = evaluate(&store, &state);
        let position = |id: &str| store.records().iter().position(|r| r.id == id);
        for pair in view.rows().windows(2) {
            if compare_by_key(&pair[0], &pair[1], key).is_eq() {
                prop_assert!(position(&pair[0].id) < position(&pair[1].id));
            }
        }
    }

    #[test]
    fn evaluation_is_idempotent(store in arb_store(), state in arb_state()) {
        prop_assert_eq!(evaluate(&store, &state), evaluate(&store, &state));
    }

    #[test]
    fn filter_changes_reset_page_and_sort_toggles_do_not(
        state in arb_state(),
        op in arb_filter_op(),
        key in arb_sort_key(),
    ) {
        let mut filtered = state.clone();
        apply(&mut filtered, &op);
        prop_assert_eq!(filtered.page(), 1);

        let mut sorted = state.clone();
        sorted.toggle_sort(key);
        prop_assert_eq!(sorted.page(), state.page());
    }
}
