use crate::constants::{REQUIRED_COLUMNS, UNKNOWN_RESTAURANT};
use crate::error::AnalysisError;
use crate::loader::RawTable;
use crate::models::Review;

struct ColumnIndexes {
    restaurant_name: usize,
    comment_text: usize,
    date: usize,
    rating: usize,
}

fn locate_columns(table: &RawTable) -> Result<ColumnIndexes, AnalysisError> {
    let mut indexes = [0usize; 4];
    for (slot, column) in indexes.iter_mut().zip(REQUIRED_COLUMNS) {
        *slot = table
            .column_index(column)
            .ok_or(AnalysisError::MissingColumn { column })?;
    }

    let [restaurant_name, comment_text, date, rating] = indexes;
    Ok(ColumnIndexes {
        restaurant_name,
        comment_text,
        date,
        rating,
    })
}

fn cell(row: &[Option<String>], index: usize) -> Option<String> {
    row.get(index).cloned().flatten()
}

/// Validates the table shape and turns raw rows into reviews.
///
/// Rows without comment text are dropped, missing restaurant names become
/// [`UNKNOWN_RESTAURANT`] and unusable ratings become `None`.
pub fn clean(table: &RawTable) -> Result<Vec<Review>, AnalysisError> {
    let columns = locate_columns(table)?;

    let mut reviews = Vec::with_capacity(table.len());
    for row in &table.rows {
        let Some(comment_text) = cell(row, columns.comment_text) else {
            continue;
        };

        let raw_rating = cell(row, columns.rating);
        let rating = raw_rating.as_deref().and_then(parse_rating);
        if rating.is_none() {
            if let Some(value) = &raw_rating {
                tracing::debug!(value = %value, "rating is not numeric, treating as absent");
            }
        }

        reviews.push(Review {
            restaurant_name: cell(row, columns.restaurant_name)
                .unwrap_or_else(|| UNKNOWN_RESTAURANT.to_string()),
            comment_text,
            date: cell(row, columns.date).unwrap_or_default(),
            rating,
        });
    }

    tracing::info!(
        before = table.len(),
        after = reviews.len(),
        valid_ratings = reviews.iter().filter(|r| r.rating.is_some()).count(),
        "cleaned review table"
    );
    if reviews.is_empty() {
        tracing::warn!("no reviews left after cleaning");
    }

    Ok(reviews)
}

/// Parses a rating cell; empty, blank, non-numeric and non-finite values are absent.
pub fn parse_rating(value: &str) -> Option<f64> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return None;
    }
    // adding zero folds -0.0 into 0.0
    trimmed
        .parse::<f64>()
        .ok()
        .filter(|rating| rating.is_finite())
        .map(|rating| rating + 0.0)
}

#[cfg(test)]
mod tests {
    use super::*;

    const HEADERS: [&str; 4] = ["restaurant_name", "comment_text", "date", "rating"];

    #[test]
    fn missing_column_is_named() {
        let table = RawTable::new(&["restaurant_name", "comment_text", "rating"], &[]);
        let err = clean(&table).unwrap_err();
        assert!(matches!(err, AnalysisError::MissingColumn { column: "date" }));
        assert!(err.to_string().contains("'date'"));
    }

    #[test]
    fn first_missing_column_wins() {
        let table = RawTable::new(&["date"], &[]);
        let err = clean(&table).unwrap_err();
        assert!(matches!(
            err,
            AnalysisError::MissingColumn {
                column: "restaurant_name"
            }
        ));
    }

    #[test]
    fn drops_rows_without_comments() {
        let table = RawTable::new(&HEADERS, &[&["A", "", "d", "5"], &["A", "خوب", "d", "4"]]);
        let reviews = clean(&table).unwrap();
        assert_eq!(reviews.len(), 1);
        assert_eq!(reviews[0].comment_text, "خوب");
    }

    #[test]
    fn keeps_whitespace_only_comments() {
        let table = RawTable::new(&HEADERS, &[&["A", " ", "d", "5"]]);
        assert_eq!(clean(&table).unwrap().len(), 1);
    }

    #[test]
    fn fills_missing_restaurant_with_unknown() {
        let table = RawTable::new(&HEADERS, &[&["", "بد", "d", "2"]]);
        let reviews = clean(&table).unwrap();
        assert_eq!(reviews[0].restaurant_name, UNKNOWN_RESTAURANT);
    }

    #[test]
    fn bad_ratings_become_absent() {
        let table = RawTable::new(
            &HEADERS,
            &[
                &["A", "x", "d", "abc"],
                &["A", "x", "d", " "],
                &["A", "x", "d", ""],
                &["A", "x", "d", "NaN"],
                &["A", "x", "d", "0"],
                &["A", "x", "d", " 4.5 "],
            ],
        );
        let ratings: Vec<_> = clean(&table).unwrap().into_iter().map(|r| r.rating).collect();
        assert_eq!(ratings, vec![None, None, None, None, Some(0.0), Some(4.5)]);
    }

    #[test]
    fn negative_zero_rating_is_plain_zero() {
        let rating = parse_rating("-0").unwrap();
        assert_eq!(rating, 0.0);
        assert!(rating.is_sign_positive());
    }

    #[test]
    fn extra_columns_and_order_do_not_matter() {
        let table = RawTable::new(
            &["rating", "extra", "date", "comment_text", "restaurant_name"],
            &[&["3", "ignored", "1403/02/02", "خوشمزه", "Kebab"]],
        );
        let reviews = clean(&table).unwrap();
        assert_eq!(
            reviews[0],
            Review {
                restaurant_name: "Kebab".to_string(),
                comment_text: "خوشمزه".to_string(),
                date: "1403/02/02".to_string(),
                rating: Some(3.0),
            }
        );
    }

    #[test]
    fn short_rows_treat_missing_cells_as_absent() {
        let table = RawTable::new(&HEADERS, &[&["A", "خوب"]]);
        let reviews = clean(&table).unwrap();
        assert_eq!(reviews[0].date, "");
        assert_eq!(reviews[0].rating, None);
    }
}
