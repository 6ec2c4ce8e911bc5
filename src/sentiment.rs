//! Lexicon based comment scoring.
//!
//! Everything here is a pure function of the input text and the tables in
//! [`crate::lexicon`]; no state is carried between calls.

use std::collections::BTreeMap;

use crate::constants::TOP_KEYWORDS;
use crate::lexicon::{self, Polarity};
use crate::models::{IssueCategory, KeywordCount, Sentiment};

/// Outcome of classifying one comment, with the lexicon hits that decided it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommentSentiment {
    pub sentiment: Sentiment,
    pub positive_words: Vec<String>,
    pub negative_words: Vec<String>,
}

/// Classifies a comment by counting lexicon hits.
///
/// Whitespace separated tokens are looked up in both word lists, then the raw
/// text is searched for each phrase. More positive hits gives a positive label,
/// more negative hits a negative one, anything else is neutral.
pub fn analyze_comment(comment: &str) -> CommentSentiment {
    let mut positive_words = Vec::new();
    let mut negative_words = Vec::new();

    for token in comment.split_whitespace() {
        if lexicon::is_positive_word(token) {
            positive_words.push(token.to_string());
        }
        if lexicon::is_negative_word(token) {
            negative_words.push(token.to_string());
        }
    }

    for phrase in lexicon::PHRASES {
        if !comment.contains(phrase) {
            continue;
        }
        match lexicon::phrase_polarity(phrase) {
            Polarity::Positive => positive_words.push(phrase.to_string()),
            Polarity::Negative => negative_words.push(phrase.to_string()),
        }
    }

    let sentiment = match positive_words.len().cmp(&negative_words.len()) {
        std::cmp::Ordering::Greater => Sentiment::Positive,
        std::cmp::Ordering::Less => Sentiment::Negative,
        std::cmp::Ordering::Equal => Sentiment::Neutral,
    };

    CommentSentiment {
        sentiment,
        positive_words,
        negative_words,
    }
}

/// Most frequent display keywords of one polarity across `comments`.
///
/// Ties keep the order in which words were first seen.
pub fn top_keywords<S: AsRef<str>>(comments: &[S], polarity: Polarity) -> Vec<KeywordCount> {
    let keywords = lexicon::top_keywords(polarity);
    let mut counts: Vec<KeywordCount> = Vec::new();

    for comment in comments {
        for token in comment.as_ref().split_whitespace() {
            if !keywords.contains(&token) {
                continue;
            }
            match counts.iter_mut().find(|entry| entry.word == token) {
                Some(entry) => entry.count += 1,
                None => counts.push(KeywordCount {
                    word: token.to_string(),
                    count: 1,
                }),
            }
        }
    }

    // stable sort keeps first-seen order among equal counts
    counts.sort_by(|a, b| b.count.cmp(&a.count));
    counts.truncate(TOP_KEYWORDS);
    counts
}

/// Number of comments mentioning each issue category. Every category is
/// present in the result, zero counts included.
pub fn detect_issues<S: AsRef<str>>(comments: &[S]) -> BTreeMap<IssueCategory, usize> {
    let lowered: Vec<String> = comments
        .iter()
        .map(|comment| comment.as_ref().to_lowercase())
        .collect();

    IssueCategory::ALL
        .into_iter()
        .map(|category| {
            let triggers = lexicon::issue_triggers(category);
            let count = lowered
                .iter()
                .filter(|text| triggers.iter().any(|trigger| text.contains(trigger)))
                .count();
            (category, count)
        })
        .collect()
}
