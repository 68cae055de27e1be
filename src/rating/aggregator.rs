use log::debug;

use super::types::{MemberScore, MemberStats, MemberStatsMap, ReportStats, TieBreak};
use crate::domain::{MemberEntry, ReportRecord};

/// Folds all records into per-member statistics in a single pass.
///
/// Unrated entries still create the member's slot, so a member that was
/// never rated shows up with `count == 0`.
pub fn aggregate(records: &[ReportRecord]) -> MemberStatsMap {
    let mut stats = MemberStatsMap::new();

    for record in records {
        for (member, entry) in record.members.iter() {
            fold_entry(stats.entry_or_default(member), entry);
        }
    }

    debug!("Aggregated {} members from {} reports", stats.len(), records.len());
    stats
}

fn fold_entry(slot: &mut MemberStats, entry: &MemberEntry) {
    if let Some(rating) = entry.score() {
        slot.record(rating);
    }
    // Latest entry in record order wins, even without a description
    slot.last_description = entry.description();
}

/// Summary of one record: average of valid ratings plus best and worst member
pub fn aggregate_report(record: &ReportRecord, tie_break: TieBreak) -> ReportStats {
    let rated: Vec<MemberScore> = record
        .members
        .iter()
        .filter_map(|(member, entry)| {
            entry.score().map(|rating| MemberScore {
                member: member.to_string(),
                rating,
            })
        })
        .collect();

    let average = if rated.is_empty() {
        None
    } else {
        Some(rated.iter().map(|s| s.rating).sum::<f64>() / rated.len() as f64)
    };

    ReportStats {
        date: record.date,
        member_count: record.members.len(),
        rated_count: rated.len(),
        average,
        best: pick_extreme(&rated, tie_break, Extreme::Highest),
        worst: pick_extreme(&rated, tie_break, Extreme::Lowest),
    }
}

#[derive(Clone, Copy)]
enum Extreme {
    Highest,
    Lowest,
}

fn pick_extreme(rated: &[MemberScore], tie_break: TieBreak, extreme: Extreme) -> Option<MemberScore> {
    let mut chosen: Option<&MemberScore> = None;

    for candidate in rated {
        chosen = match chosen {
            None => Some(candidate),
            Some(current) if beats(candidate, current, tie_break, extreme) => Some(candidate),
            keep => keep,
        };
    }

    chosen.cloned()
}

fn beats(candidate: &MemberScore, current: &MemberScore, tie_break: TieBreak, extreme: Extreme) -> bool {
    let strictly_better = match extreme {
        Extreme::Highest => candidate.rating > current.rating,
        Extreme::Lowest => candidate.rating < current.rating,
    };
    if strictly_better {
        return true;
    }

    candidate.rating == current.rating
        && match tie_break {
            TieBreak::Alphabetical => candidate.member < current.member,
            TieBreak::FirstSeen => false,
        }
}
