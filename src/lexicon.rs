//! Static word lists behind sentiment scoring, keyword extraction and issue
//! detection. Tables are process-wide constants; nothing here is learned.

use crate::models::IssueCategory;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Polarity {
    Positive,
    Negative,
}

/// Words that count towards a positive label. Multi-word entries only ever
/// match through [`PHRASES`].
pub const POSITIVE_WORDS: &[&str] = &[
    "عالی",
    "خوب",
    "عالیه",
    "خوشمزه",
    "ممتاز",
    "بینظیر",
    "دستمریزاد",
    "خوش طعم",
    "گرم",
    "تازه",
    "داغ",
    "سریع",
    "کیفیت",
    "محترم",
    "مودب",
    "لذیذ",
    "تمیز",
    "بهداشتی",
    "منظم",
    "پرخونه",
    "متراکم",
    "ترد",
    "مثل همیشه",
    "طعم خوب",
    "خوبی داشت",
    "عالی بود",
    "پیشنهاد",
];

pub const NEGATIVE_WORDS: &[&str] = &[
    "بد",
    "ضعیف",
    "افتضاح",
    "بی\u{200c}مزه",
    "سرد",
    "نامرغوب",
    "بدتر",
    "خشک",
    "شور",
    "نپخته",
    "دیر",
    "تاخیر",
    "بی\u{200c}کیفیت",
    "شرم\u{200c}آور",
    "بدمزه",
    "ترش",
    "بیات",
    "کهنه",
    "خراب",
    "گران",
    "قیمت بیشتر",
    "حجم کمتر",
    "پر شده",
    "بد بود",
    "ضعیف بود",
];

/// Phrases searched in the raw comment. A phrase is positive when it is a
/// member of [`POSITIVE_WORDS`], negative otherwise.
pub const PHRASES: &[&str] = &[
    "مثل همیشه",
    "طعم خوب",
    "خوبی داشت",
    "قیمت بیشتر",
    "حجم کمتر",
    "پر شده",
];

/// Narrower lists used only for the top keyword display.
pub const TOP_POSITIVE_KEYWORDS: &[&str] = &["عالی", "خوب", "عالیه", "خوشمزه", "ممتاز", "بینظیر"];

pub const TOP_NEGATIVE_KEYWORDS: &[&str] = &[
    "بد",
    "ضعیف",
    "افتضاح",
    "بی\u{200c}مزه",
    "سرد",
    "گران",
];

/// Substrings that flag a comment as reporting `category`. Matched against
/// the lower-cased comment.
pub fn issue_triggers(category: IssueCategory) -> &'static [&'static str] {
    match category {
        IssueCategory::HighPrice => &["قیمت بیشتر", "گران", "قیمت بالا"],
        IssueCategory::SmallPortion => &["حجم کمتر", "کم حجم", "حجم کم"],
        IssueCategory::LowQuality => &["بی\u{200c}کیفیت", "ضعیف", "افتضاح", "بد", "خراب"],
        IssueCategory::PoorTaste => &["بی\u{200c}مزه", "شور", "ترش", "بدمزه"],
        IssueCategory::WrongCombination => &["پر شده", "سیب\u{200c}زمینی"],
        IssueCategory::ServedCold => &["سرد", "سرد شده"],
        IssueCategory::DelayedDelivery => &["دیر", "تاخیر", "طولانی"],
    }
}

pub fn is_positive_word(token: &str) -> bool {
    POSITIVE_WORDS.contains(&token)
}

pub fn is_negative_word(token: &str) -> bool {
    NEGATIVE_WORDS.contains(&token)
}

pub fn phrase_polarity(phrase: &str) -> Polarity {
    if is_positive_word(phrase) {
        Polarity::Positive
    } else {
        Polarity::Negative
    }
}

pub fn top_keywords(polarity: Polarity) -> &'static [&'static str] {
    match polarity {
        Polarity::Positive => TOP_POSITIVE_KEYWORDS,
        Polarity::Negative => TOP_NEGATIVE_KEYWORDS,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn keyword_lists_are_subsets_of_scoring_lexicons() {
        assert!(TOP_POSITIVE_KEYWORDS.iter().all(|w| is_positive_word(w)));
        assert!(TOP_NEGATIVE_KEYWORDS.iter().all(|w| is_negative_word(w)));
    }

    #[test]
    fn phrases_take_polarity_from_lexicon_membership() {
        assert_eq!(phrase_polarity("مثل همیشه"), Polarity::Positive);
        assert_eq!(phrase_polarity("طعم خوب"), Polarity::Positive);
        assert_eq!(phrase_polarity("خوبی داشت"), Polarity::Positive);
        assert_eq!(phrase_polarity("قیمت بیشتر"), Polarity::Negative);
        assert_eq!(phrase_polarity("حجم کمتر"), Polarity::Negative);
        assert_eq!(phrase_polarity("پر شده"), Polarity::Negative);
    }

    #[test]
    fn every_issue_category_has_triggers() {
        for category in IssueCategory::ALL {
            assert!(!issue_triggers(category).is_empty());
        }
    }
}
