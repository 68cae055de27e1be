use anyhow::Result;
use colored::*;
use std::fmt::Write;

use crate::config::settings::{AnalysisSettings, AppConfig};
use crate::domain::{queries, DataOrigin, ReportContext, ReportRecord};
use crate::rating::{
    aggregate, aggregate_report, overview, progress_percent, rank, stars_text, top_keywords,
    unrated_members, KeywordExtractor, MemberStats, PerformanceLevel, RatingClass,
};
use crate::services::loader::ReportLoader;

const MEDALS: [&str; 3] = ["🥇", "🥈", "🥉"];

/// Terminal dashboard: loads the collection once and prints it.
pub struct SummaryService {
    loader: ReportLoader,
    settings: AnalysisSettings,
}

impl SummaryService {
    pub fn new(config: &AppConfig) -> Result<Self> {
        Ok(Self {
            loader: ReportLoader::new(config)?,
            settings: config.analysis.clone(),
        })
    }

    pub async fn run(&self) -> Result<()> {
        let context = self.loader.load().await;
        print!("{}", render_summary(&context, &self.settings)?);
        Ok(())
    }

    pub async fn run_member(&self, name: &str) -> Result<()> {
        let context = self.loader.load().await;
        match render_member(context.records(), name) {
            Some(text) => print!("{}", text),
            None => anyhow::bail!("No reports mention member '{}'", name),
        }
        Ok(())
    }
}

pub fn render_summary(context: &ReportContext, settings: &AnalysisSettings) -> Result<String> {
    let records = context.records();
    let mut out = String::new();

    writeln!(out, "{}", "Team performance".bold())?;
    writeln!(out, "Source: {}", origin_label(context.origin()).dimmed())?;

    let totals = overview(records);
    writeln!(out)?;
    writeln!(out, "Reports:       {}", totals.total_reports)?;
    writeln!(out, "Team size:     {}", totals.team_size)?;
    writeln!(out, "Ratings given: {}", totals.total_ratings)?;
    match totals.average_rating {
        Some(avg) => writeln!(out, "Average:       {}", colorize_rating(avg))?,
        None => writeln!(out, "Average:       {}", "n/a".dimmed())?,
    }

    let stats = aggregate(records);
    let ranked = rank(&stats, settings.leaderboard_size, settings.tie_break);

    writeln!(out)?;
    writeln!(out, "{}", "Leaderboard".bold())?;
    if ranked.is_empty() {
        writeln!(out, "  {}", "No ratings yet".dimmed())?;
    }
    for (idx, member) in ranked.iter().enumerate() {
        let badge = if idx < settings.top_performers {
            MEDALS.get(idx).copied().unwrap_or("  ")
        } else {
            "  "
        };
        writeln!(
            out,
            "{} {:>2}. {} {} {}",
            badge,
            idx + 1,
            member.member,
            stars_text(member.average).yellow(),
            colorize_rating(member.average)
        )?;
    }

    let unrated = unrated_members(&stats);
    if !unrated.is_empty() {
        writeln!(out)?;
        writeln!(out, "{} {}", "Unrated:".dimmed(), unrated.join(", "))?;
    }

    let extractor = KeywordExtractor::new(&settings.stopwords)?;
    let keywords = top_keywords(&extractor.extract(records), settings.keyword_limit);
    if !keywords.is_empty() {
        writeln!(out)?;
        writeln!(out, "{}", "Keywords".bold())?;
        let line = keywords
            .iter()
            .map(|k| format!("{} ({})", k.word, k.count))
            .collect::<Vec<_>>()
            .join(", ");
        writeln!(out, "  {}", line)?;
    }

    let recent = queries::recent_reports(records, settings.recent_reports);
    if !recent.is_empty() {
        writeln!(out)?;
        writeln!(out, "{}", "Recent reports".bold())?;
        for report in recent {
            write_report_line(&mut out, report, settings)?;
        }
    }

    Ok(out)
}

/// Detail view for one member, `None` when no record mentions them
pub fn render_member(records: &[ReportRecord], name: &str) -> Option<String> {
    let stats = aggregate(records);
    let member_stats = stats.get(name)?;
    let history = queries::member_history(records, name);

    let mut out = String::new();
    write_member(&mut out, name, member_stats, &history).ok()?;
    Some(out)
}

fn write_member(
    out: &mut String,
    name: &str,
    stats: &MemberStats,
    history: &[queries::MemberHistoryEntry],
) -> std::fmt::Result {
    writeln!(out, "{}", name.bold())?;
    match stats.average() {
        Some(avg) => {
            let level = PerformanceLevel::from_rating(avg);
            writeln!(out, "Average:  {} {}", colorize_rating(avg), stars_text(avg).yellow())?;
            writeln!(out, "Level:    {} ({})", level.label(), level.as_str())?;
            writeln!(out, "Progress: {:.0}%", progress_percent(avg))?;
        }
        None => writeln!(out, "Average:  {}", "unrated".dimmed())?,
    }
    writeln!(out, "Ratings:  {}", stats.count)?;
    if let (Some(min), Some(max)) = (stats.min, stats.max) {
        writeln!(out, "Range:    {} - {}", min, max)?;
    }

    writeln!(out)?;
    for entry in history {
        let rating = match entry.rating {
            Some(r) => colorize_rating(r).to_string(),
            None => "-".dimmed().to_string(),
        };
        write!(out, "  {}  {}", entry.date, rating)?;
        if let Some(description) = &entry.description {
            write!(out, "  {}", description.italic())?;
        }
        writeln!(out)?;
    }
    Ok(())
}

fn write_report_line(out: &mut String, report: &ReportRecord, settings: &AnalysisSettings) -> Result<()> {
    let stats = aggregate_report(report, settings.tie_break);
    let average = stats
        .average
        .map(|avg| colorize_rating(avg).to_string())
        .unwrap_or_else(|| "n/a".dimmed().to_string());

    write!(out, "  {}  {} members  avg {}", stats.date, stats.member_count, average)?;
    if let Some(best) = &stats.best {
        write!(out, "  best {}", best.member.green())?;
    }
    writeln!(out)?;
    Ok(())
}

fn colorize_rating(rating: f64) -> ColoredString {
    let text = format!("{:.2}", rating);
    match RatingClass::from_rating(rating) {
        RatingClass::Excellent => text.green(),
        RatingClass::Good => text.yellow(),
        RatingClass::Average => text.truecolor(255, 165, 0),
        RatingClass::Poor => text.red(),
    }
}

fn origin_label(origin: DataOrigin) -> &'static str {
    match origin {
        DataOrigin::Api => "reports API",
        DataOrigin::Snapshot => "local snapshot (API unavailable)",
        DataOrigin::Sample => "built-in sample data",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::sample_reports;

    #[test]
    fn test_summary_lists_every_sample_member() {
        let context = ReportContext::new(sample_reports(), DataOrigin::Sample);
        let text = render_summary(&context, &AnalysisSettings::default()).unwrap();

        for name in ["نادر", "وليد", "أحمد", "محمد", "لمياء"] {
            assert!(text.contains(name), "missing {name}");
        }
        assert!(text.contains("built-in sample data"));
        assert!(text.contains("3.33"));
        assert!(text.contains("🥇"));
    }

    #[test]
    fn test_summary_of_empty_collection() {
        let context = ReportContext::new(Vec::new(), DataOrigin::Snapshot);
        let text = render_summary(&context, &AnalysisSettings::default()).unwrap();

        assert!(text.contains("No ratings yet"));
        assert!(!text.contains("Recent reports"));
    }

    #[test]
    fn test_member_detail() {
        let text = render_member(&sample_reports(), "محمد").unwrap();
        assert!(text.contains("4.00"));
        assert!(text.contains("2025-01-03"));
        assert!(text.contains(PerformanceLevel::Excellent.label()));

        assert!(render_member(&sample_reports(), "nobody").is_none());
    }
}
