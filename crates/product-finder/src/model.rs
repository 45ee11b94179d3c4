use shop_common::shop_api::{QuestionInfo, RecommendProductsParams};

/// Answer that disables the category filter.
pub const ANY_CATEGORY: &str = "Any";

/// One questionnaire question with its fixed option list.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Question {
    pub id: &'static str,
    pub text: &'static str,
    pub options: &'static [&'static str],
}

const QUESTIONS: [Question; 4] = [
    Question {
        id: "category",
        text: "What type of product are you looking for?",
        options: &["Electronics", "Clothing", "Home Goods", "Books", ANY_CATEGORY],
    },
    Question {
        id: "price_range",
        text: "What's your budget?",
        options: &[
            "Under $50",
            "$50-$100",
            "$100-$500",
            "Over $500",
            "No budget limit",
        ],
    },
    Question {
        id: "feature_priority",
        text: "What's most important to you?",
        options: &["Quality", "Price", "Brand", "Features", "Reviews"],
    },
    Question {
        id: "usage",
        text: "How will you primarily use this product?",
        options: &[
            "Personal",
            "Professional",
            "Gift",
            "Occasional use",
            "Daily use",
        ],
    },
];

/// The product finder questionnaire, in display order.
pub fn get_questions() -> &'static [Question] {
    &QUESTIONS
}

impl From<&Question> for QuestionInfo {
    fn from(question: &Question) -> Self {
        Self {
            id: question.id.to_string(),
            text: question.text.to_string(),
            options: question.options.iter().map(|o| o.to_string()).collect(),
        }
    }
}

/// Answers to the questionnaire. Every answer is optional; an empty string counts as
/// unanswered.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AnswerSet {
    pub category: Option<String>,
    pub price_range: Option<String>,
    pub feature_priority: Option<String>,
    pub usage: Option<String>,
}

impl AnswerSet {
    /// Category to filter on; `None` when unanswered or "Any".
    pub fn category_filter(&self) -> Option<&str> {
        self.category.as_deref().filter(|c| *c != ANY_CATEGORY)
    }

    pub fn price_range(&self) -> Option<PriceRange> {
        self.price_range.as_deref().and_then(PriceRange::parse)
    }

    pub fn feature_priority(&self) -> Option<FeaturePriority> {
        self.feature_priority
            .as_deref()
            .and_then(FeaturePriority::parse)
    }
}

fn answered(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.is_empty())
}

impl From<RecommendProductsParams> for AnswerSet {
    fn from(params: RecommendProductsParams) -> Self {
        Self {
            category: answered(params.category),
            price_range: answered(params.price_range),
            feature_priority: answered(params.feature_priority),
            usage: answered(params.usage),
        }
    }
}

/// Budget bracket. The two middle brackets are inclusive at both ends, so a price of
/// exactly 100 falls in both.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PriceRange {
    Under50,
    From50To100,
    From100To500,
    Over500,
}

impl PriceRange {
    /// Parse a questionnaire answer. "No budget limit" and unknown answers yield `None`.
    pub fn parse(answer: &str) -> Option<Self> {
        match answer {
            "Under $50" => Some(Self::Under50),
            "$50-$100" => Some(Self::From50To100),
            "$100-$500" => Some(Self::From100To500),
            "Over $500" => Some(Self::Over500),
            _ => None,
        }
    }

    pub fn contains(self, price: f64) -> bool {
        match self {
            Self::Under50 => price < 50.0,
            Self::From50To100 => (50.0..=100.0).contains(&price),
            Self::From100To500 => (100.0..=500.0).contains(&price),
            Self::Over500 => price > 500.0,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FeaturePriority {
    Quality,
    Price,
    Brand,
    Features,
    Reviews,
}

impl FeaturePriority {
    pub fn parse(answer: &str) -> Option<Self> {
        match answer {
            "Quality" => Some(Self::Quality),
            "Price" => Some(Self::Price),
            "Brand" => Some(Self::Brand),
            "Features" => Some(Self::Features),
            "Reviews" => Some(Self::Reviews),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_question_order_and_ids() {
        let ids: Vec<&str> = get_questions().iter().map(|q| q.id).collect();
        assert_eq!(ids, vec!["category", "price_range", "feature_priority", "usage"]);
    }

    #[test]
    fn test_every_price_option_parses_or_is_the_no_limit_sentinel() {
        let price_question = &get_questions()[1];
        for option in price_question.options {
            assert_eq!(
                PriceRange::parse(option).is_none(),
                *option == "No budget limit",
                "{option}"
            );
        }
    }

    #[test]
    fn test_every_priority_option_parses() {
        for option in get_questions()[2].options {
            assert!(FeaturePriority::parse(option).is_some(), "{option}");
        }
        assert_eq!(FeaturePriority::parse("quality"), None);
    }

    #[test]
    fn test_bracket_boundaries() {
        assert!(!PriceRange::Under50.contains(50.0));
        assert!(PriceRange::Under50.contains(49.99));
        assert!(PriceRange::From50To100.contains(50.0));
        assert!(PriceRange::From50To100.contains(100.0));
        assert!(PriceRange::From100To500.contains(100.0));
        assert!(PriceRange::From100To500.contains(500.0));
        assert!(!PriceRange::Over500.contains(500.0));
        assert!(PriceRange::Over500.contains(500.01));
    }

    #[test]
    fn test_empty_answers_are_unanswered() {
        let answers = AnswerSet::from(RecommendProductsParams {
            category: Some(String::new()),
            price_range: Some("Under $50".to_string()),
            feature_priority: None,
            usage: Some(String::new()),
        });
        assert_eq!(answers.category, None);
        assert_eq!(answers.usage, None);
        assert_eq!(answers.price_range(), Some(PriceRange::Under50));
    }

    #[test]
    fn test_any_category_disables_filter() {
        let answers = AnswerSet {
            category: Some(ANY_CATEGORY.to_string()),
            ..Default::default()
        };
        assert_eq!(answers.category_filter(), None);
    }
}
