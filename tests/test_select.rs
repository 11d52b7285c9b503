mod common;

use bull_spread::analysis::analyze;
use bull_spread::config::SpreadConfig;
use bull_spread::select::{candidate_pairs, select_pairs};

use common::rows;

fn strikes(pairs: &[bull_spread::select::CandidatePair]) -> Vec<(f64, f64)> {
    pairs
        .iter()
        .map(|p| (p.lower.strike(), p.upper.strike()))
        .collect()
}

#[test]
fn test_three_strikes_make_two_candidates() {
    let rows = rows(
        &[
            ("GGAL", "GFGC120OC", Some(1.0)),
            ("GGAL", "GFGC100OC", Some(9.0)),
            ("GGAL", "GFGC110OC", Some(4.0)),
        ],
        &[("GGAL", 100.0)],
        1.05,
    );
    let pairs = candidate_pairs(&rows);
    assert_eq!(strikes(&pairs), vec![(100.0, 110.0), (110.0, 120.0)]);
    assert_eq!(pairs[0].strike_diff, 10.0);
    assert_eq!(pairs[0].percentage.value(), Some(40.0));
    assert_eq!(pairs[1].percentage.value(), Some(10.0));
}

#[test]
fn test_single_row_group_has_no_pairs() {
    let rows = rows(&[("GGAL", "GFGC100OC", Some(9.0))], &[("GGAL", 100.0)], 1.05);
    assert!(candidate_pairs(&rows).is_empty());
    assert!(candidate_pairs(&[]).is_empty());
}

#[test]
fn test_groups_split_by_underlying_expiration_and_type() {
    let rows = rows(
        &[
            ("GGAL", "GFGC100OC", Some(9.0)),
            ("GGAL", "GFGC110NO", Some(4.0)), // other expiration
            ("GGAL", "GFGV110OC", Some(4.0)), // put
            ("YPFD", "YPFC110OC", Some(4.0)), // other underlying
            ("YPFD", "YPFC120OC", Some(2.0)),
        ],
        &[("GGAL", 100.0), ("YPFD", 115.0)],
        1.05,
    );
    let pairs = candidate_pairs(&rows);
    assert_eq!(pairs.len(), 1);
    assert_eq!(pairs[0].underlying(), "YPFD");
    assert_eq!(strikes(&pairs), vec![(110.0, 120.0)]);
}

#[test]
fn test_groups_in_sorted_order() {
    let rows = rows(
        &[
            ("YPFD", "YPFC110OC", Some(4.0)),
            ("YPFD", "YPFC120OC", Some(2.0)),
            ("GGAL", "GFGC110OC", Some(4.0)),
            ("GGAL", "GFGC100OC", Some(9.0)),
        ],
        &[],
        1.05,
    );
    let pairs = candidate_pairs(&rows);
    let order: Vec<&str> = pairs.iter().map(|p| p.underlying()).collect();
    assert_eq!(order, vec!["GGAL", "YPFD"]);
}

#[test]
fn test_lower_strike_above_threshold_is_excluded() {
    // spot 100, multiplier 1.05 → threshold 105
    let rows = rows(
        &[
            ("GGAL", "GFGC110OC", Some(4.0)),
            ("GGAL", "GFGC120OC", Some(0.1)),
        ],
        &[("GGAL", 100.0)],
        1.05,
    );
    let candidates = candidate_pairs(&rows);
    assert_eq!(candidates.len(), 1);
    assert!(candidates[0].percentage.le(1.0));
    assert!(select_pairs(&rows, &SpreadConfig::default()).is_empty());
}

#[test]
fn test_percentage_filter_is_inclusive() {
    let rows = rows(
        &[
            ("GGAL", "GFGC100OC", Some(8.0)),
            ("GGAL", "GFGC110OC", Some(3.0)),  // 30%
            ("GGAL", "GFGC120OC", Some(3.5)),  // 35%
        ],
        &[("GGAL", 110.0)],
        1.05,
    );
    let selected = select_pairs(&rows, &SpreadConfig::default());
    assert_eq!(strikes(&selected), vec![(100.0, 110.0)]);

    let loose = SpreadConfig {
        max_percentage_difference: 35.0,
        ..SpreadConfig::default()
    };
    assert_eq!(select_pairs(&rows, &loose).len(), 2);
}

#[test]
fn test_duplicate_strikes_are_never_selected() {
    let rows = rows(
        &[
            ("GGAL", "GFGC100OC", Some(8.0)),
            ("GGAL", "GFGC100OC", Some(7.5)),
        ],
        &[("GGAL", 100.0)],
        1.05,
    );
    let candidates = candidate_pairs(&rows);
    assert_eq!(candidates.len(), 1);
    assert_eq!(candidates[0].strike_diff, 0.0);
    assert!(candidates[0].percentage.is_missing());

    let anything = SpreadConfig {
        max_percentage_difference: 100.0,
        spot_multiplier: 2.0,
        ..SpreadConfig::default()
    };
    assert!(!candidates[0].passes(&anything));
}

#[test]
fn test_missing_spot_excludes_asset() {
    let rows = rows(
        &[
            ("GGAL", "GFGC100OC", Some(8.0)),
            ("GGAL", "GFGC110OC", Some(1.0)),
        ],
        &[],
        1.05,
    );
    assert!(rows[0].spot_threshold.is_missing());
    assert_eq!(candidate_pairs(&rows).len(), 1);
    assert!(select_pairs(&rows, &SpreadConfig::default()).is_empty());
}

#[test]
fn test_missing_upper_price_excludes_pair() {
    let rows = rows(
        &[
            ("GGAL", "GFGC100OC", Some(8.0)),
            ("GGAL", "GFGC110OC", None),
        ],
        &[("GGAL", 100.0)],
        1.05,
    );
    assert!(select_pairs(&rows, &SpreadConfig::default()).is_empty());
}

#[test]
fn test_report_uses_the_same_selection() {
    let rows = rows(
        &[
            ("GGAL", "GFGC100OC", Some(8.0)),
            ("GGAL", "GFGC110OC", Some(3.0)),
            ("GGAL", "GFGC120OC", Some(3.5)),
            ("YPFD", "YPFC110OC", Some(4.0)),
            ("YPFD", "YPFC120OC", Some(1.0)),
        ],
        &[("GGAL", 110.0), ("YPFD", 100.0)],
        1.05,
    );
    let config = SpreadConfig::default();
    let selected = select_pairs(&rows, &config);
    let report = analyze(&rows, &config);

    assert_eq!(report.candidates, candidate_pairs(&rows).len());
    let reported: Vec<(f64, f64)> = report
        .spreads
        .iter()
        .map(|e| (e.buy.strike, e.sell.strike))
        .collect();
    assert_eq!(reported, strikes(&selected));
    assert_eq!(reported, vec![(100.0, 110.0)]);
}
