use std::collections::BTreeMap;
use std::fmt;

use serde::Serialize;

/// One cleaned review row.
#[derive(Debug, Clone, PartialEq)]
pub struct Review {
    pub restaurant_name: String,
    pub comment_text: String,
    pub date: String,
    pub rating: Option<f64>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Sentiment {
    Positive,
    Negative,
    Neutral,
}

impl fmt::Display for Sentiment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Positive => write!(f, "positive"),
            Self::Negative => write!(f, "negative"),
            Self::Neutral => write!(f, "neutral"),
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct SentimentCounts {
    pub positive: usize,
    pub negative: usize,
    pub neutral: usize,
}

impl SentimentCounts {
    pub fn record(&mut self, sentiment: Sentiment) {
        match sentiment {
            Sentiment::Positive => self.positive += 1,
            Sentiment::Negative => self.negative += 1,
            Sentiment::Neutral => self.neutral += 1,
        }
    }

    pub fn total(&self) -> usize {
        self.positive + self.negative + self.neutral
    }

    /// Share of each label in percent; all zero when nothing was counted.
    pub fn percentages(&self) -> SentimentPercentages {
        let total = self.total();
        if total == 0 {
            return SentimentPercentages::default();
        }

        let share = |count: usize| count as f64 / total as f64 * 100.0;
        SentimentPercentages {
            positive: share(self.positive),
            negative: share(self.negative),
            neutral: share(self.neutral),
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct SentimentPercentages {
    pub positive: f64,
    pub negative: f64,
    pub neutral: f64,
}

/// Complaint themes, in reporting order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum IssueCategory {
    HighPrice,
    SmallPortion,
    LowQuality,
    PoorTaste,
    WrongCombination,
    ServedCold,
    DelayedDelivery,
}

impl IssueCategory {
    pub const ALL: [IssueCategory; 7] = [
        Self::HighPrice,
        Self::SmallPortion,
        Self::LowQuality,
        Self::PoorTaste,
        Self::WrongCombination,
        Self::ServedCold,
        Self::DelayedDelivery,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            Self::HighPrice => "گران بودن",
            Self::SmallPortion => "حجم کم غذا",
            Self::LowQuality => "کیفیت پایین",
            Self::PoorTaste => "طعم نامناسب",
            Self::WrongCombination => "ترکیب نامناسب",
            Self::ServedCold => "سرد بودن غذا",
            Self::DelayedDelivery => "تاخیر در ارسال",
        }
    }
}

impl fmt::Display for IssueCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::HighPrice => "high price",
            Self::SmallPortion => "small portion",
            Self::LowQuality => "low quality",
            Self::PoorTaste => "poor taste",
            Self::WrongCombination => "wrong combination",
            Self::ServedCold => "served cold",
            Self::DelayedDelivery => "delayed delivery",
        };
        write!(f, "{name}")
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct KeywordCount {
    pub word: String,
    pub count: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RatingBucket {
    pub rating: f64,
    pub count: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RestaurantAnalysis {
    pub total_comments: usize,
    pub average_rating: f64,
    pub rating_distribution: Vec<RatingBucket>,
    pub sentiment_distribution: SentimentCounts,
    pub sentiment_percentages: SentimentPercentages,
    pub common_issues: BTreeMap<IssueCategory, usize>,
    pub top_positive_words: Vec<KeywordCount>,
    pub top_negative_words: Vec<KeywordCount>,
    pub comments_sample: Vec<String>,
}

impl RestaurantAnalysis {
    pub fn positive_percentage(&self) -> f64 {
        self.sentiment_percentages.positive
    }

    /// Rating weighted by the share of positive comments.
    pub fn score(&self) -> f64 {
        self.average_rating * self.positive_percentage() / 100.0
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GlobalStats {
    pub total_comments: usize,
    pub valid_ratings: usize,
    pub average_rating: f64,
    pub rating_distribution: Vec<RatingBucket>,
    pub restaurant_count: usize,
    pub restaurant_names: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RestaurantScore {
    pub restaurant_name: String,
    pub score: f64,
    pub average_rating: f64,
    pub positive_percentage: f64,
    pub total_comments: usize,
}
