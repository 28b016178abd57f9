//! Integration tests for the view-state engine
//!
//! Generic properties run over collections generated from a seeded RNG so
//! every run sees the same data.

use chrono::{Duration, NaiveDate, TimeZone};
use paydesk::prelude::*;
use paydesk::storage::seed_payments;
use paydesk::view::{NO_DATA_LABEL, filter_by_date_range, filter_by_search, paginate, sort_payments};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::cmp::Ordering;

const FIELDS: [SortField; 3] = [
    SortField::OrderAmount,
    SortField::CreatedAt,
    SortField::CompletedAt,
];

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

/// Payments with few distinct amounts and timestamps so sort keys tie often
fn random_payments(rng: &mut StdRng, count: usize) -> Vec<Payment> {
    let base = Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap();
    let statuses = [
        PaymentStatus::Pending,
        PaymentStatus::Completed,
        PaymentStatus::Rejected,
    ];

    (0..count)
        .map(|i| {
            let created_at = base + Duration::days(rng.gen_range(0..60));
            Payment {
                id: i.to_string(),
                identification: format!("TX-2024-{:03}-T{:03}", i % 1000, i),
                recipient: format!("@user{}", rng.gen_range(0..10)),
                order_amount: (rng.gen_range(1..=5) * 10_000) as f64,
                currency: "COP".to_string(),
                created_at,
                completed_at: created_at + Duration::hours(rng.gen_range(0..3)),
                status: statuses[rng.gen_range(0..statuses.len())],
                scheme: PaymentScheme::ALL[rng.gen_range(0..PaymentScheme::ALL.len())],
            }
        })
        .collect()
}

fn position(payment: &Payment) -> usize {
    payment.id.parse().unwrap()
}

fn identifications(rows: &[&Payment]) -> Vec<String> {
    rows.iter().map(|p| p.identification.clone()).collect()
}

// =============================================================================
// Properties
// =============================================================================

#[test]
fn test_sort_is_stable_in_both_directions() {
    let mut rng = StdRng::seed_from_u64(7);

    for _ in 0..20 {
        let payments = random_payments(&mut rng, 40);

        for field in FIELDS {
            for sort in [SortState::ascending(field), SortState::descending(field)] {
                let sorted = sort_payments(payments.iter().collect(), sort);
                assert_eq!(sorted.len(), payments.len());

                for pair in sorted.windows(2) {
                    let ordering = field.compare(pair[0], pair[1]);
                    match sort.direction() {
                        Some(SortDirection::Ascending) => assert_ne!(ordering, Ordering::Greater),
                        _ => assert_ne!(ordering, Ordering::Less),
                    }
                    if ordering == Ordering::Equal {
                        assert!(position(pair[0]) < position(pair[1]));
                    }
                }
            }
        }
    }
}

#[test]
fn test_neutral_sort_keeps_store_order() {
    let mut rng = StdRng::seed_from_u64(11);
    let payments = random_payments(&mut rng, 30);

    let sorted = sort_payments(payments.iter().collect(), SortState::Neutral);
    assert!(sorted.iter().zip(&payments).all(|(a, b)| std::ptr::eq(*a, b)));
}

#[test]
fn test_three_clicks_restore_neutral() {
    for field in FIELDS {
        for start in [
            SortState::Neutral,
            SortState::ascending(SortField::OrderAmount),
            SortState::descending(SortField::CompletedAt),
        ] {
            let first = start.next(field);
            assert_eq!(first, SortState::ascending(field));
            assert_eq!(first.next(field).next(field), SortState::Neutral);
        }
    }
}

#[test]
fn test_filters_are_idempotent() {
    let mut rng = StdRng::seed_from_u64(3);
    let payments = random_payments(&mut rng, 60);
    let range = DateRange::new(Some(date(2024, 1, 10)), Some(date(2024, 2, 10))).unwrap();

    for query in ["", "user3", "PENDING", "tx-2024-01", "zzz"] {
        let once = filter_by_search(payments.iter().collect(), query);
        let twice = filter_by_search(once.clone(), query);
        assert_eq!(once, twice);
    }

    let once = filter_by_date_range(payments.iter().collect(), &range);
    let twice = filter_by_date_range(once.clone(), &range);
    assert_eq!(once, twice);
    assert!(once.iter().all(|p| range.contains(p.created_on())));
}

#[test]
fn test_filters_never_reorder() {
    let mut rng = StdRng::seed_from_u64(5);
    let payments = random_payments(&mut rng, 60);

    let searched = filter_by_search(payments.iter().collect(), "completed");
    assert!(searched.windows(2).all(|w| position(w[0]) < position(w[1])));
}

#[test]
fn test_pages_cover_filtered_rows_exactly() {
    let mut rng = StdRng::seed_from_u64(13);

    for count in [0, 1, 5, 6, 7, 12, 13, 40] {
        let payments = random_payments(&mut rng, count);
        let mut state = ViewState::new();
        state.toggle_sort(SortField::OrderAmount);

        let filtered = state.filtered(&payments);
        let total_pages = state.derive(&payments).pagination.total_pages;
        assert_eq!(total_pages, filtered.len().div_ceil(PAGE_SIZE).max(1));

        let mut concatenated = Vec::new();
        for page in 1..=total_pages {
            state.set_page(page);
            let view = state.derive(&payments);
            assert!(view.rows.len() <= PAGE_SIZE);
            concatenated.extend(view.rows);
        }
        assert_eq!(concatenated, filtered);
    }
}

// =============================================================================
// Scenarios on the seed data
// =============================================================================

#[test]
fn test_search_maria() {
    let payments = seed_payments();
    let mut state = ViewState::new();
    state.set_query("maria");

    let view = state.derive(&payments);
    assert_eq!(view.rows.len(), 1);
    assert_eq!(view.rows[0].recipient, "@marialopez");
}

#[test]
fn test_ascending_amount_starts_at_35000() {
    let payments = seed_payments();
    let mut state = ViewState::new();
    state.toggle_sort(SortField::OrderAmount);

    let view = state.derive(&payments);
    assert_eq!(view.rows[0].order_amount, 35_000.0);
    assert_eq!(view.rows[0].recipient, "@lauragonzalez");

    state.toggle_sort(SortField::OrderAmount);
    assert_eq!(state.derive(&payments).rows[0].order_amount, 270_000.0);

    state.toggle_sort(SortField::OrderAmount);
    assert_eq!(state.sort(), SortState::Neutral);
    assert_eq!(state.derive(&payments).rows[0].identification, "TX-2025-001-A7B9");
}

#[test]
fn test_fifteen_rows_make_three_pages() {
    let payments = seed_payments();
    let mut state = ViewState::new();
    state.set_page(3);

    let view = state.derive(&payments);
    assert_eq!(view.pagination.total_pages, 3);
    assert!(!view.pagination.has_next);
    assert!(view.pagination.has_prev);

    let expected: Vec<&Payment> = payments[12..15].iter().collect();
    assert_eq!(view.rows, expected);
}

#[test]
fn test_out_of_range_page_unclamped() {
    let payments = seed_payments();
    let mut state = ViewState::new();
    state.set_page(4);

    let view = state.derive(&payments);
    assert!(view.rows.is_empty());
    assert_eq!(view.pagination.page, 4);
    assert!(view.pagination.is_out_of_range());
}

#[test]
fn test_out_of_range_page_clamped_by_caller() {
    let payments = seed_payments();
    let mut state = ViewState::new();
    state.set_page(3);
    state.set_query("completed");
    state.set_page(3);

    let total_pages = state.derive(&payments).pagination.total_pages;
    assert_eq!(total_pages, 2);

    state.clamp_page(total_pages);
    let view = state.derive(&payments);
    assert_eq!(view.pagination.page, 2);
    assert_eq!(view.rows.len(), 4);
}

#[test]
fn test_search_and_date_range_compose() {
    let payments = seed_payments();
    let mut state = ViewState::new();
    state.set_query("completed");
    state.set_date_range(DateRange::new(Some(date(2024, 11, 1)), Some(date(2024, 11, 30))).unwrap());

    let view = state.derive(&payments);
    assert_eq!(
        identifications(&view.rows),
        vec!["TX-2025-005-Q4F7", "TX-2025-006-X6T3", "TX-2025-007-B2H8"]
    );
}

#[test]
fn test_date_bounds_are_inclusive() {
    let payments = seed_payments();
    let day = date(2024, 12, 15);
    let range = DateRange::new(Some(day), Some(day)).unwrap();

    let rows = filter_by_date_range(payments.iter().collect(), &range);
    assert_eq!(identifications(&rows), vec!["TX-2025-001-A7B9"]);
}

#[test]
fn test_sort_applies_before_search() {
    let payments = seed_payments();
    let mut state = ViewState::new();
    state.toggle_sort(SortField::OrderAmount);
    state.toggle_sort(SortField::OrderAmount);
    state.set_query("completed");

    let view = state.derive(&payments);
    assert_eq!(view.rows[0].recipient, "@andresmejia");
    assert_eq!(view.pagination.total, 10);
}

#[test]
fn test_sort_change_keeps_filters() {
    let mut state = ViewState::new();
    state.set_query("maria");
    state.set_date_range(DateRange::new(Some(date(2024, 10, 1)), None).unwrap());
    state.set_page(2);

    state.toggle_sort(SortField::CreatedAt);

    assert_eq!(state.page(), 1);
    assert_eq!(state.query(), "maria");
    assert_eq!(state.date_range().from(), Some(date(2024, 10, 1)));
}

#[test]
fn test_empty_input_flows_through() {
    let mut state = ViewState::new();
    state.set_query("maria");
    state.toggle_sort(SortField::CompletedAt);

    let view = state.derive(&[]);
    assert!(view.rows.is_empty());
    assert_eq!(view.pagination.total, 0);
    assert_eq!(view.pagination.total_pages, 1);
    assert!(paginate(&[], 1, PAGE_SIZE).is_empty());
}

#[test]
fn test_date_range_label_uses_whole_snapshot() {
    let payments = seed_payments();
    assert_eq!(date_range_label(&payments), "sept 15, 2024 - dic 15, 2024");
    assert_eq!(date_range_label(&payments[..1]), "dic 15, 2024 - dic 15, 2024");
    assert_eq!(date_range_label(&[]), NO_DATA_LABEL);
}
