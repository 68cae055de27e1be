use std::cmp::Ordering;

use super::normalizer::MAX_RATING;
use super::types::{MemberStatsMap, RankedMember, StarSlot, TieBreak};

const STAR_SLOTS: usize = 5;

/// Leaderboard of rated members, best average first, at most `top_n` long
pub fn rank(stats: &MemberStatsMap, top_n: usize, tie_break: TieBreak) -> Vec<RankedMember> {
    let mut ranked: Vec<RankedMember> = stats
        .iter()
        .filter_map(|(member, s)| {
            s.average().map(|average| RankedMember {
                member: member.to_string(),
                average,
            })
        })
        .collect();

    // sort_by is stable, so FirstSeen keeps map order among equal averages
    ranked.sort_by(|a, b| compare_ranked(a, b, tie_break));
    ranked.truncate(top_n);
    ranked
}

fn compare_ranked(a: &RankedMember, b: &RankedMember, tie_break: TieBreak) -> Ordering {
    b.average.total_cmp(&a.average).then_with(|| match tie_break {
        TieBreak::Alphabetical => a.member.cmp(&b.member),
        TieBreak::FirstSeen => Ordering::Equal,
    })
}

/// Members listed but never rated, in first-appearance order
pub fn unrated_members(stats: &MemberStatsMap) -> Vec<String> {
    stats
        .iter()
        .filter(|(_, s)| !s.is_rated())
        .map(|(member, _)| member.to_string())
        .collect()
}

pub fn star_representation(average: f64) -> [StarSlot; STAR_SLOTS] {
    if average == 0.0 || !average.is_finite() {
        return [StarSlot::Empty; STAR_SLOTS];
    }

    let whole = average.floor();
    std::array::from_fn(|idx| {
        let slot = (idx + 1) as f64;
        if slot <= whole {
            StarSlot::Full
        } else if slot - 0.5 <= average {
            StarSlot::Half
        } else {
            StarSlot::Empty
        }
    })
}

pub fn stars_text(average: f64) -> String {
    star_representation(average).iter().map(StarSlot::symbol).collect()
}

/// Share of the rating scale, 0-100
pub fn progress_percent(average: f64) -> f64 {
    if !average.is_finite() {
        return 0.0;
    }
    (average / MAX_RATING * 100.0).clamp(0.0, 100.0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::ReportRecord;
    use crate::rating::aggregate;
    use serde_json::json;

    fn stats_for(value: serde_json::Value) -> MemberStatsMap {
        let records: Vec<ReportRecord> = serde_json::from_value(value).unwrap();
        aggregate(&records)
    }

    #[test]
    fn test_rank_scenario() {
        let stats = stats_for(json!([
            {"date": "2025-01-01", "members": {"A": {"rating": 4}, "B": {"rating": 0}, "C": {"rating": 2}}}
        ]));
        let ranked = rank(&stats, 2, TieBreak::Alphabetical);

        let pairs: Vec<(&str, f64)> = ranked.iter().map(|r| (r.member.as_str(), r.average)).collect();
        assert_eq!(pairs, vec![("A", 4.0), ("C", 2.0)]);
        assert_eq!(unrated_members(&stats), vec!["B"]);
    }

    #[test]
    fn test_rank_truncates_and_returns_all_when_short() {
        let stats = stats_for(json!([
            {"date": "2025-01-01", "members": {"A": 1, "B": 5, "C": 3, "D": 4}}
        ]));

        let top = rank(&stats, 2, TieBreak::Alphabetical);
        assert_eq!(top.iter().map(|r| r.member.as_str()).collect::<Vec<_>>(), vec!["B", "D"]);
        assert_eq!(rank(&stats, 10, TieBreak::Alphabetical).len(), 4);
        assert!(rank(&stats, 0, TieBreak::Alphabetical).is_empty());
    }

    #[test]
    fn test_rank_is_idempotent_and_sorted() {
        let stats = stats_for(json!([
            {"date": "2025-01-01", "members": {"Eve": 3, "Dan": 3, "Cat": 5, "Bea": 2}},
            {"date": "2025-01-02", "members": {"Eve": 4, "Dan": 4, "Bea": 0}}
        ]));

        let first = rank(&stats, 3, TieBreak::Alphabetical);
        let second = rank(&stats, 3, TieBreak::Alphabetical);
        assert_eq!(first, second);
        assert!(first.windows(2).all(|w| w[0].average >= w[1].average));
        assert_eq!(first.iter().map(|r| r.member.as_str()).collect::<Vec<_>>(), vec!["Cat", "Dan", "Eve"]);

        let by_appearance = rank(&stats, 3, TieBreak::FirstSeen);
        assert_eq!(by_appearance.iter().map(|r| r.member.as_str()).collect::<Vec<_>>(), vec!["Cat", "Eve", "Dan"]);
    }

    #[test]
    fn test_rank_empty_stats() {
        assert!(rank(&MemberStatsMap::new(), 5, TieBreak::Alphabetical).is_empty());
    }

    #[test]
    fn test_star_representation() {
        use StarSlot::{Empty, Full, Half};

        assert_eq!(star_representation(0.0), [Empty; 5]);
        assert_eq!(star_representation(5.0), [Full; 5]);
        assert_eq!(star_representation(2.5), [Full, Full, Half, Empty, Empty]);
        assert_eq!(star_representation(3.7), [Full, Full, Full, Half, Empty]);
        assert_eq!(star_representation(3.2), [Full, Full, Full, Empty, Empty]);
        assert_eq!(star_representation(0.5), [Half, Empty, Empty, Empty, Empty]);
        assert_eq!(stars_text(2.5), "★★⯪☆☆");
    }

    #[test]
    fn test_progress_percent() {
        assert_eq!(progress_percent(2.5), 50.0);
        assert_eq!(progress_percent(5.0), 100.0);
        assert_eq!(progress_percent(f64::NAN), 0.0);
    }
}
