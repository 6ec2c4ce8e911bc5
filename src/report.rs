use std::collections::BTreeMap;
use std::fmt::Write;

use crate::analysis::{self, Analysis};
use crate::constants::{display, verdict};
use crate::loader::SourceInfo;
use crate::models::{
    IssueCategory, KeywordCount, RatingBucket, RestaurantAnalysis, SentimentCounts,
    SentimentPercentages,
};

/// Presentation view of one restaurant. Issue categories nobody complained
/// about are left out.
#[derive(Debug, Clone, PartialEq)]
pub struct RestaurantReport {
    pub name: String,
    pub total_comments: usize,
    pub average_rating: f64,
    pub positive_percentage: f64,
    pub sentiment_percentages: SentimentPercentages,
    pub rating_distribution: Vec<RatingBucket>,
    pub sentiment_distribution: SentimentCounts,
    pub common_issues: BTreeMap<IssueCategory, usize>,
    pub top_positive_words: Vec<KeywordCount>,
    pub top_negative_words: Vec<KeywordCount>,
    pub comments_sample: Vec<String>,
}

impl RestaurantReport {
    pub fn new(name: &str, analysis: &RestaurantAnalysis) -> Self {
        Self {
            name: name.to_string(),
            total_comments: analysis.total_comments,
            average_rating: analysis.average_rating,
            positive_percentage: analysis.positive_percentage(),
            sentiment_percentages: analysis.sentiment_percentages,
            rating_distribution: analysis.rating_distribution.clone(),
            sentiment_distribution: analysis.sentiment_distribution,
            common_issues: analysis
                .common_issues
                .iter()
                .filter(|(_, &count)| count > 0)
                .map(|(&category, &count)| (category, count))
                .collect(),
            top_positive_words: analysis.top_positive_words.clone(),
            top_negative_words: analysis.top_negative_words.clone(),
            comments_sample: analysis.comments_sample.clone(),
        }
    }

    /// Most reported issue; ties go to the earliest category.
    pub fn main_issue(&self) -> Option<IssueCategory> {
        let mut main: Option<(IssueCategory, usize)> = None;
        for (&category, &count) in &self.common_issues {
            if main.map_or(true, |(_, best)| count > best) {
                main = Some((category, count));
            }
        }
        main.map(|(category, _)| category)
    }

    pub fn strengths(&self) -> Vec<&str> {
        self.top_positive_words
            .iter()
            .take(display::STRENGTHS_SHOWN)
            .map(|keyword| keyword.word.as_str())
            .collect()
    }

    pub fn verdict(&self) -> Verdict {
        Verdict::assess(self.average_rating, &self.sentiment_percentages)
    }
}

pub fn restaurant_report(analysis: &Analysis, name: &str) -> Option<RestaurantReport> {
    analysis
        .restaurants
        .get(name)
        .map(|restaurant| RestaurantReport::new(name, restaurant))
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Verdict {
    Excellent,
    Acceptable,
    NeedsOverhaul,
    Average,
}

impl Verdict {
    pub fn assess(average_rating: f64, percentages: &SentimentPercentages) -> Self {
        if average_rating >= verdict::EXCELLENT_MIN_RATING
            && percentages.positive >= verdict::EXCELLENT_MIN_POSITIVE_PCT
        {
            Self::Excellent
        } else if average_rating >= verdict::ACCEPTABLE_MIN_RATING
            && percentages.positive >= verdict::ACCEPTABLE_MIN_POSITIVE_PCT
        {
            Self::Acceptable
        } else if percentages.negative >= verdict::OVERHAUL_MIN_NEGATIVE_PCT {
            Self::NeedsOverhaul
        } else {
            Self::Average
        }
    }

    pub fn description(&self) -> &'static str {
        match self {
            Self::Excellent => "Excellent performance, keep the current quality",
            Self::Acceptable => "Acceptable performance, minor improvements needed",
            Self::NeedsOverhaul => "Service quality needs a fundamental review",
            Self::Average => "Average performance, pay closer attention to feedback",
        }
    }
}

/// Short performance summary for one restaurant.
pub fn render_summary(report: &RestaurantReport) -> String {
    let mut output = String::new();
    let pct = &report.sentiment_percentages;

    let _ = writeln!(output, "Summary for {}", report.name);
    let _ = writeln!(output, "{}", "=".repeat(50));
    let _ = writeln!(output);
    let _ = writeln!(output, "Key figures:");
    let _ = writeln!(output, "- Average rating: {:.1}/5", report.average_rating);
    let _ = writeln!(output, "- Positive comments: {:.1}%", report.positive_percentage);
    let _ = writeln!(output, "- Negative comments: {:.1}%", pct.negative);
    let _ = writeln!(output, "- Neutral comments: {:.1}%", pct.neutral);
    let _ = writeln!(output, "- Comments: {}", report.total_comments);

    let strengths = report.strengths();
    if !strengths.is_empty() {
        let _ = writeln!(output);
        let _ = writeln!(output, "Strengths:");
        for word in strengths {
            let _ = writeln!(output, "- {word}");
        }
    }

    if let Some(issue) = report.main_issue() {
        let _ = writeln!(output);
        let _ = writeln!(output, "Main issue: {} ({})", issue.label(), issue);
    }

    let _ = writeln!(output);
    let _ = writeln!(output, "Overall: {}", report.verdict().description());

    output
}

/// Detailed statistics for one restaurant.
pub fn render_stats(report: &RestaurantReport) -> String {
    let mut output = String::new();
    let pct = &report.sentiment_percentages;
    let share = |count: usize| {
        if report.total_comments == 0 {
            0.0
        } else {
            count as f64 / report.total_comments as f64 * 100.0
        }
    };

    let _ = writeln!(output, "Restaurant statistics:");
    let _ = writeln!(output, "- Comments: {}", report.total_comments);
    let _ = writeln!(output, "- Average rating: {:.2} of 5", report.average_rating);
    let _ = writeln!(output);
    let _ = writeln!(output, "Sentiment:");
    let counts = &report.sentiment_distribution;
    let _ = writeln!(output, "- Positive: {:.1}% ({})", pct.positive, counts.positive);
    let _ = writeln!(output, "- Negative: {:.1}% ({})", pct.negative, counts.negative);
    let _ = writeln!(output, "- Neutral: {:.1}% ({})", pct.neutral, counts.neutral);
    let _ = writeln!(output);
    let _ = writeln!(output, "Rating distribution:");
    for bucket in &report.rating_distribution {
        let _ = writeln!(
            output,
            "  {} rating {}: {} comments ({:.1}%)",
            stars(bucket.rating),
            bucket.rating,
            bucket.count,
            share(bucket.count)
        );
    }

    write_keywords(&mut output, "Frequent positive words", &report.top_positive_words);
    write_keywords(&mut output, "Frequent negative words", &report.top_negative_words);

    if !report.common_issues.is_empty() {
        let _ = writeln!(output);
        let _ = writeln!(output, "Reported issues:");
        for (issue, &count) in &report.common_issues {
            let _ = writeln!(
                output,
                "- {} ({}): {} times ({:.1}%)",
                issue.label(),
                issue,
                count,
                share(count)
            );
        }
    }

    if !report.comments_sample.is_empty() {
        let _ = writeln!(output);
        let _ = writeln!(output, "Sample comments:");
        for (index, comment) in report
            .comments_sample
            .iter()
            .take(display::SAMPLE_COMMENTS_SHOWN)
            .enumerate()
        {
            let _ = writeln!(output, "{}. {}", index + 1, comment);
        }
    }

    output
}

fn write_keywords(output: &mut String, title: &str, keywords: &[KeywordCount]) {
    if keywords.is_empty() {
        return;
    }
    let _ = writeln!(output);
    let _ = writeln!(output, "{title}:");
    for keyword in keywords {
        let _ = writeln!(output, "- '{}': {} times", keyword.word, keyword.count);
    }
}

fn stars(rating: f64) -> String {
    "⭐".repeat(rating.clamp(0.0, 5.0) as usize)
}

/// Restaurants in first-appearance order with comment counts, collapsed after
/// the first few.
pub fn render_overview(overview: &[(String, usize)]) -> String {
    let mut output = String::new();
    for (index, (name, count)) in overview
        .iter()
        .take(display::OVERVIEW_RESTAURANTS)
        .enumerate()
    {
        let _ = writeln!(output, "  {}. {} ({} comments)", index + 1, name, count);
    }
    if overview.len() > display::OVERVIEW_RESTAURANTS {
        let _ = writeln!(
            output,
            "  ... and {} more restaurants",
            overview.len() - display::OVERVIEW_RESTAURANTS
        );
    }
    output
}

pub fn build_report(analysis: &Analysis, source: Option<&SourceInfo>) -> String {
    let stats = &analysis.stats;
    let mut output = String::new();

    let _ = writeln!(output, "# Restaurant Review Report");
    if let Some(source) = source {
        let _ = writeln!(
            output,
            "Generated from {} ({:.2} KB, modified {})",
            source.file_name,
            source.size_kb,
            source.modified_label()
        );
    }
    let _ = writeln!(output);
    let _ = writeln!(output, "## Overview");
    let _ = writeln!(output, "- Comments: {}", stats.total_comments);
    let _ = writeln!(output, "- Restaurants: {}", stats.restaurant_count);
    let _ = writeln!(output, "- Comments with a valid rating: {}", stats.valid_ratings);
    let _ = writeln!(output, "- Average rating: {:.2}", stats.average_rating);
    for bucket in &stats.rating_distribution {
        let _ = writeln!(output, "  - rating {}: {}", bucket.rating, bucket.count);
    }

    let _ = writeln!(output);
    let _ = writeln!(output, "## Best Restaurant");
    match &analysis.best_restaurant {
        Some(name) => {
            let score = analysis.restaurants.get(name).map_or(0.0, |r| r.score());
            let _ = writeln!(output, "{name} (score {score:.2})");
        }
        None => {
            let _ = writeln!(output, "No restaurant selected.");
        }
    }

    let _ = writeln!(output);
    let _ = writeln!(output, "## Ranking");
    let scores = analysis::score_restaurants(&analysis.restaurants);
    if scores.is_empty() {
        let _ = writeln!(output, "No restaurants with comments.");
    } else {
        for score in &scores {
            let _ = writeln!(
                output,
                "- {} score {:.2} (rating {:.2}, {:.1}% positive, {} comments)",
                score.restaurant_name,
                score.score,
                score.average_rating,
                score.positive_percentage,
                score.total_comments
            );
        }
    }

    for (name, restaurant) in &analysis.restaurants {
        let report = RestaurantReport::new(name, restaurant);
        let _ = writeln!(output);
        let _ = writeln!(output, "## {name}");
        let _ = writeln!(output);
        let _ = writeln!(output, "```");
        output.push_str(&render_summary(&report));
        let _ = writeln!(output);
        output.push_str(&render_stats(&report));
        let _ = writeln!(output, "```");
    }

    output
}
