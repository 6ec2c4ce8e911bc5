//! Fixed tunables for the analysis and its presentation.

/// Label given to rows whose restaurant name is missing.
pub const UNKNOWN_RESTAURANT: &str = "نامشخص";

/// Columns every review table must carry, in validation order.
pub const REQUIRED_COLUMNS: [&str; 4] = ["restaurant_name", "comment_text", "date", "rating"];

/// Raw comments kept per restaurant, in original order.
pub const COMMENT_SAMPLE_SIZE: usize = 5;

/// Keywords reported per polarity.
pub const TOP_KEYWORDS: usize = 5;

/// Presentation limits
pub mod display {
    /// Sample comments shown in the detailed stats view
    pub const SAMPLE_COMMENTS_SHOWN: usize = 3;

    /// Strengths listed in a restaurant summary
    pub const STRENGTHS_SHOWN: usize = 3;

    /// Restaurants listed in the overview before collapsing the rest
    pub const OVERVIEW_RESTAURANTS: usize = 10;
}

/// Verdict thresholds, checked in declaration order
pub mod verdict {
    pub const EXCELLENT_MIN_RATING: f64 = 4.0;
    pub const EXCELLENT_MIN_POSITIVE_PCT: f64 = 70.0;

    pub const ACCEPTABLE_MIN_RATING: f64 = 3.0;
    pub const ACCEPTABLE_MIN_POSITIVE_PCT: f64 = 50.0;

    pub const OVERHAUL_MIN_NEGATIVE_PCT: f64 = 40.0;
}
