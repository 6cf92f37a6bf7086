//! Property tests for decay scoring

use chrono::{Days, NaiveDate};
use proptest::prelude::*;
use spark_document::Role;
use spark_reputation::{voting_weight, ContributionRecord, DecayEngine};

fn record() -> impl Strategy<Value = ContributionRecord> {
    (0u64..2000, prop::sample::select(Role::ALL.to_vec()), 0.0f64..100.0).prop_map(
        |(offset, role, cs)| {
            let base = NaiveDate::from_ymd_opt(2022, 1, 1).unwrap();
            let date = base.checked_add_days(Days::new(offset)).unwrap();
            ContributionRecord::new("@p", date, role, cs)
        },
    )
}

proptest! {
    #[test]
    fn prop_voting_weight_is_monotonic(a in 0.001f64..1e6, delta in 0.001f64..1e3) {
        prop_assert!(voting_weight(a) < voting_weight(a + delta));
    }

    #[test]
    fn prop_voting_weight_zero_without_score(a in -1e6f64..=0.0) {
        prop_assert_eq!(voting_weight(a), 0.0);
    }

    #[test]
    fn prop_active_never_exceeds_lifetime(
        records in prop::collection::vec(record(), 0..20),
        days in 0u64..3000,
    ) {
        let as_of = NaiveDate::from_ymd_opt(2022, 1, 1)
            .unwrap()
            .checked_add_days(Days::new(days))
            .unwrap();
        let score = DecayEngine::new().score_contributor("@p", &records, as_of);
        prop_assert!(score.active_cs <= score.lifetime_cs);
        prop_assert!(score.active_cs >= 0.0);
    }

    #[test]
    fn prop_higher_tier_records_never_decay(
        cs in 0.0f64..100.0,
        offset in 0u64..2000,
        later in 0u64..2000,
    ) {
        let base = NaiveDate::from_ymd_opt(2022, 1, 1).unwrap();
        let date = base.checked_add_days(Days::new(offset)).unwrap();
        let as_of = date.checked_add_days(Days::new(later)).unwrap();
        let record = ContributionRecord::new("@p", date, Role::Builder, cs);
        let value = DecayEngine::new().record_value(&record, &[record.clone()], as_of);
        prop_assert_eq!(value, cs);
    }

    #[test]
    fn prop_scoring_is_deterministic(records in prop::collection::vec(record(), 0..20)) {
        let engine = DecayEngine::new();
        let as_of = NaiveDate::from_ymd_opt(2027, 6, 1).unwrap();
        prop_assert_eq!(engine.score_all(&records, as_of), engine.score_all(&records, as_of));
    }
}
