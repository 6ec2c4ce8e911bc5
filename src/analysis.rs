use std::collections::BTreeMap;

use serde::Serialize;

use crate::constants::COMMENT_SAMPLE_SIZE;
use crate::lexicon::Polarity;
use crate::models::{
    GlobalStats, RatingBucket, RestaurantAnalysis, RestaurantScore, Review, SentimentCounts,
};
use crate::sentiment;

/// Full result of one analysis pass over a cleaned review table.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Analysis {
    pub stats: GlobalStats,
    pub restaurants: BTreeMap<String, RestaurantAnalysis>,
    pub best_restaurant: Option<String>,
}

pub fn analyze(reviews: &[Review]) -> Analysis {
    let stats = global_stats(reviews);
    let restaurants = analyze_restaurants(reviews);
    let best_restaurant = best_restaurant(&restaurants);

    tracing::info!(
        restaurants = restaurants.len(),
        best = best_restaurant.as_deref().unwrap_or("none"),
        "analysis complete"
    );

    Analysis {
        stats,
        restaurants,
        best_restaurant,
    }
}

pub fn global_stats(reviews: &[Review]) -> GlobalStats {
    let ratings: Vec<f64> = reviews.iter().filter_map(|review| review.rating).collect();

    let mut restaurant_names: Vec<String> = reviews
        .iter()
        .map(|review| review.restaurant_name.clone())
        .collect();
    restaurant_names.sort();
    restaurant_names.dedup();

    GlobalStats {
        total_comments: reviews.len(),
        valid_ratings: ratings.len(),
        average_rating: mean(&ratings),
        rating_distribution: rating_histogram(&ratings),
        restaurant_count: restaurant_names.len(),
        restaurant_names,
    }
}

/// Groups reviews by restaurant and analyzes each group independently.
pub fn analyze_restaurants(reviews: &[Review]) -> BTreeMap<String, RestaurantAnalysis> {
    let mut groups: BTreeMap<&str, Vec<&Review>> = BTreeMap::new();
    for review in reviews {
        groups
            .entry(review.restaurant_name.as_str())
            .or_default()
            .push(review);
    }

    groups
        .into_iter()
        .map(|(name, group)| (name.to_string(), analyze_restaurant(&group)))
        .collect()
}

pub fn analyze_restaurant(reviews: &[&Review]) -> RestaurantAnalysis {
    let ratings: Vec<f64> = reviews.iter().filter_map(|review| review.rating).collect();
    let comments: Vec<&str> = reviews
        .iter()
        .map(|review| review.comment_text.as_str())
        .collect();

    let mut sentiment_distribution = SentimentCounts::default();
    for comment in &comments {
        let result = sentiment::analyze_comment(comment);
        tracing::trace!(
            sentiment = %result.sentiment,
            positive = ?result.positive_words,
            negative = ?result.negative_words,
            "classified comment"
        );
        sentiment_distribution.record(result.sentiment);
    }

    RestaurantAnalysis {
        total_comments: reviews.len(),
        average_rating: mean(&ratings),
        rating_distribution: rating_histogram(&ratings),
        sentiment_percentages: sentiment_distribution.percentages(),
        sentiment_distribution,
        common_issues: sentiment::detect_issues(&comments),
        top_positive_words: sentiment::top_keywords(&comments, Polarity::Positive),
        top_negative_words: sentiment::top_keywords(&comments, Polarity::Negative),
        comments_sample: comments
            .iter()
            .take(COMMENT_SAMPLE_SIZE)
            .map(|comment| comment.to_string())
            .collect(),
    }
}

/// Restaurant with the highest score among those with at least one comment.
///
/// Only a strictly greater score replaces the current pick, and restaurants are
/// visited in name order, so ties go to the lexicographically smallest name.
pub fn best_restaurant(restaurants: &BTreeMap<String, RestaurantAnalysis>) -> Option<String> {
    let mut best: Option<(&String, f64)> = None;

    for (name, analysis) in restaurants {
        if analysis.total_comments == 0 {
            continue;
        }
        let score = analysis.score();
        if best.map_or(true, |(_, best_score)| score > best_score) {
            best = Some((name, score));
        }
    }

    best.map(|(name, _)| name.clone())
}

/// All restaurants with comments, highest score first, ties by name.
pub fn score_restaurants(restaurants: &BTreeMap<String, RestaurantAnalysis>) -> Vec<RestaurantScore> {
    let mut scores: Vec<RestaurantScore> = restaurants
        .iter()
        .filter(|(_, analysis)| analysis.total_comments > 0)
        .map(|(name, analysis)| RestaurantScore {
            restaurant_name: name.clone(),
            score: analysis.score(),
            average_rating: analysis.average_rating,
            positive_percentage: analysis.positive_percentage(),
            total_comments: analysis.total_comments,
        })
        .collect();

    // BTreeMap order plus a stable sort keeps ties alphabetical
    scores.sort_by(|a, b| b.score.total_cmp(&a.score));
    scores
}

/// Restaurants ordered by mean rating, best first, optionally filtered by a
/// case-insensitive name substring.
pub fn rank_by_rating<'a>(
    restaurants: &'a BTreeMap<String, RestaurantAnalysis>,
    search: Option<&str>,
) -> Vec<(&'a str, &'a RestaurantAnalysis)> {
    let needle = search.map(str::to_lowercase);
    let mut ranked: Vec<(&str, &RestaurantAnalysis)> = restaurants
        .iter()
        .filter(|(name, _)| match &needle {
            Some(needle) => name.to_lowercase().contains(needle.as_str()),
            None => true,
        })
        .map(|(name, analysis)| (name.as_str(), analysis))
        .collect();

    ranked.sort_by(|a, b| b.1.average_rating.total_cmp(&a.1.average_rating));
    ranked
}

/// Restaurants in order of first appearance with their comment counts.
pub fn restaurant_overview(reviews: &[Review]) -> Vec<(String, usize)> {
    let mut overview: Vec<(String, usize)> = Vec::new();
    for review in reviews {
        match overview
            .iter_mut()
            .find(|(name, _)| *name == review.restaurant_name)
        {
            Some((_, count)) => *count += 1,
            None => overview.push((review.restaurant_name.clone(), 1)),
        }
    }
    overview
}

fn mean(values: &[f64]) -> f64 {
    if values.is_empty() {
        0.0
    } else {
        values.iter().sum::<f64>() / values.len() as f64
    }
}

/// Count of each distinct rating value, ascending by value.
fn rating_histogram(ratings: &[f64]) -> Vec<RatingBucket> {
    let mut sorted = ratings.to_vec();
    sorted.sort_by(f64::total_cmp);

    let mut buckets: Vec<RatingBucket> = Vec::new();
    for rating in sorted {
        match buckets.last_mut() {
            Some(bucket) if bucket.rating == rating => bucket.count += 1,
            _ => buckets.push(RatingBucket { rating, count: 1 }),
        }
    }
    buckets
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::IssueCategory;
    use proptest::prelude::*;

    fn review(restaurant: &str, comment: &str, rating: Option<f64>) -> Review {
        Review {
            restaurant_name: restaurant.to_string(),
            comment_text: comment.to_string(),
            date: "1403/05/01".to_string(),
            rating,
        }
    }

    fn sample_reviews() -> Vec<Review> {
        vec![
            review("Pizza Roma", "عالی و خوشمزه", Some(5.0)),
            review("Pizza Roma", "خوب بود", Some(4.0)),
            review("Pizza Roma", "بد و سرد بود", Some(2.0)),
            review("Kebab House", "گران و بی\u{200c}مزه", None),
            review("Kebab House", "معمولی", Some(3.0)),
        ]
    }

    #[test]
    fn aggregates_per_restaurant() {
        let restaurants = analyze_restaurants(&sample_reviews());
        assert_eq!(restaurants.len(), 2);

        let pizza = &restaurants["Pizza Roma"];
        assert_eq!(pizza.total_comments, 3);
        assert!((pizza.average_rating - 11.0 / 3.0).abs() < 1e-9);
        assert_eq!(
            pizza.sentiment_distribution,
            SentimentCounts {
                positive: 2,
                negative: 1,
                neutral: 0
            }
        );
        assert_eq!(pizza.common_issues[&IssueCategory::ServedCold], 1);
        assert_eq!(pizza.comments_sample.len(), 3);
        assert_eq!(
            pizza.rating_distribution,
            vec![
                RatingBucket { rating: 2.0, count: 1 },
                RatingBucket { rating: 4.0, count: 1 },
                RatingBucket { rating: 5.0, count: 1 },
            ]
        );
    }

    #[test]
    fn mean_ignores_absent_ratings() {
        let restaurants = analyze_restaurants(&sample_reviews());
        assert_eq!(restaurants["Kebab House"].average_rating, 3.0);
    }

    #[test]
    fn restaurant_without_ratings_has_zero_mean() {
        let reviews = vec![review("A", "خوب", None), review("A", "بد", None)];
        let restaurants = analyze_restaurants(&reviews);
        let analysis = &restaurants["A"];
        assert_eq!(analysis.average_rating, 0.0);
        assert!(analysis.rating_distribution.is_empty());
        assert_eq!(analysis.score(), 0.0);
    }

    #[test]
    fn sample_keeps_first_five_in_order() {
        let reviews: Vec<Review> = (0..8)
            .map(|i| review("A", &format!("comment {i}"), None))
            .collect();
        let restaurants = analyze_restaurants(&reviews);
        assert_eq!(
            restaurants["A"].comments_sample,
            vec!["comment 0", "comment 1", "comment 2", "comment 3", "comment 4"]
        );
    }

    #[test]
    fn global_stats_cover_all_rows() {
        let stats = global_stats(&sample_reviews());
        assert_eq!(stats.total_comments, 5);
        assert_eq!(stats.valid_ratings, 4);
        assert!((stats.average_rating - 3.5).abs() < 1e-9);
        assert_eq!(stats.restaurant_count, 2);
        assert_eq!(stats.restaurant_names, vec!["Kebab House", "Pizza Roma"]);
        assert_eq!(stats.rating_distribution.len(), 4);
    }

    #[test]
    fn empty_input_yields_defaults() {
        let analysis = analyze(&[]);
        assert_eq!(analysis.stats.total_comments, 0);
        assert_eq!(analysis.stats.average_rating, 0.0);
        assert!(analysis.restaurants.is_empty());
        assert_eq!(analysis.best_restaurant, None);
    }

    #[test]
    fn perfect_restaurant_scores_five() {
        let reviews = vec![review("A", "عالی", Some(5.0)), review("A", "خوشمزه", Some(5.0))];
        let restaurants = analyze_restaurants(&reviews);
        assert_eq!(restaurants["A"].score(), 5.0);
    }

    #[test]
    fn best_restaurant_maximizes_score() {
        let analysis = analyze(&sample_reviews());
        // Pizza Roma: 11/3 * 66.7% ~= 2.44; Kebab House: 3.0 * 0% = 0
        assert_eq!(analysis.best_restaurant.as_deref(), Some("Pizza Roma"));
    }

    #[test]
    fn score_ties_go_to_smallest_name() {
        let reviews = vec![
            review("Zeytoon", "عالی", Some(4.0)),
            review("Anar", "عالی", Some(4.0)),
            review("Mahi", "عالی", Some(4.0)),
        ];
        let analysis = analyze(&reviews);
        assert_eq!(analysis.best_restaurant.as_deref(), Some("Anar"));

        let scores = score_restaurants(&analysis.restaurants);
        let names: Vec<_> = scores.iter().map(|s| s.restaurant_name.as_str()).collect();
        assert_eq!(names, vec!["Anar", "Mahi", "Zeytoon"]);
    }

    #[test]
    fn zero_scores_still_select_a_restaurant() {
        let analysis = analyze(&[review("A", "معمولی", None)]);
        assert_eq!(analysis.best_restaurant.as_deref(), Some("A"));
    }

    #[test]
    fn restaurant_with_no_comments_is_never_selected() {
        let mut restaurants = analyze_restaurants(&[review("B", "معمولی", Some(1.0))]);
        restaurants.insert(
            "A".to_string(),
            RestaurantAnalysis {
                total_comments: 0,
                average_rating: 5.0,
                rating_distribution: Vec::new(),
                sentiment_distribution: SentimentCounts::default(),
                sentiment_percentages: crate::models::SentimentPercentages {
                    positive: 100.0,
                    negative: 0.0,
                    neutral: 0.0,
                },
                common_issues: BTreeMap::new(),
                top_positive_words: Vec::new(),
                top_negative_words: Vec::new(),
                comments_sample: Vec::new(),
            },
        );
        assert_eq!(best_restaurant(&restaurants).as_deref(), Some("B"));
        assert_eq!(score_restaurants(&restaurants).len(), 1);
    }

    #[test]
    fn analysis_is_repeatable() {
        let reviews = sample_reviews();
        let first = analyze(&reviews);
        let second = analyze(&reviews);
        assert_eq!(first, second);
        assert_eq!(
            serde_json::to_string(&first).unwrap(),
            serde_json::to_string(&second).unwrap()
        );
    }

    #[test]
    fn rank_by_rating_orders_and_filters() {
        let restaurants = analyze_restaurants(&sample_reviews());
        let ranked = rank_by_rating(&restaurants, None);
        let names: Vec<_> = ranked.iter().map(|(name, _)| *name).collect();
        assert_eq!(names, vec!["Pizza Roma", "Kebab House"]);

        let filtered = rank_by_rating(&restaurants, Some("KEBAB"));
        assert_eq!(filtered.len(), 1);
        assert_eq!(filtered[0].0, "Kebab House");
    }

    #[test]
    fn zero_and_negative_zero_share_a_bucket() {
        let table = crate::loader::RawTable::new(
            &["restaurant_name", "comment_text", "date", "rating"],
            &[&["A", "x", "d", "0"], &["A", "y", "d", "-0"]],
        );
        let reviews = crate::cleaning::clean(&table).unwrap();
        let analysis = analyze(&reviews);
        let expected = vec![RatingBucket { rating: 0.0, count: 2 }];
        assert_eq!(analysis.stats.rating_distribution, expected);
        assert_eq!(analysis.restaurants["A"].rating_distribution, expected);

        // histogram merges equal values even when handed a raw -0.0
        assert_eq!(rating_histogram(&[0.0, -0.0]).len(), 1);
    }

    #[test]
    fn rank_by_rating_breaks_ties_by_name() {
        let reviews = vec![
            review("Zeytoon", "معمولی", Some(4.0)),
            review("Mahi", "معمولی", Some(5.0)),
            review("Anar", "معمولی", Some(4.0)),
            review("Bamboo", "معمولی", Some(4.0)),
        ];
        let restaurants = analyze_restaurants(&reviews);
        let names: Vec<_> = rank_by_rating(&restaurants, None)
            .iter()
            .map(|(name, _)| *name)
            .collect();
        assert_eq!(names, vec!["Mahi", "Anar", "Bamboo", "Zeytoon"]);
    }

    #[test]
    fn overview_keeps_first_appearance_order() {
        let overview = restaurant_overview(&sample_reviews());
        assert_eq!(
            overview,
            vec![("Pizza Roma".to_string(), 3), ("Kebab House".to_string(), 2)]
        );
    }

    proptest! {
        #[test]
        fn sentiment_percentages_sum_to_hundred(
            comments in prop::collection::vec("(عالی|بد|خوب|سرد|معمولی| ){1,8}", 1..20)
        ) {
            let reviews: Vec<Review> = comments
                .iter()
                .map(|comment| review("A", comment, Some(3.0)))
                .collect();
            let restaurants = analyze_restaurants(&reviews);
            let analysis = &restaurants["A"];
            let pct = analysis.sentiment_percentages;

            prop_assert_eq!(analysis.sentiment_distribution.total(), reviews.len());
            prop_assert!((pct.positive + pct.negative + pct.neutral - 100.0).abs() < 1e-9);
            for value in [pct.positive, pct.negative, pct.neutral] {
                prop_assert!((0.0..=100.0).contains(&value));
            }
        }
    }
}
