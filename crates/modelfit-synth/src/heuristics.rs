//! Name-based mock value rules.

use rand::{Rng, RngCore};

/// Shape of a fabricated value.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum MockValue {
    /// Integer drawn uniformly from `[min, max]`.
    Integer { min: i64, max: i64 },
    /// Decimal drawn uniformly from `[min, max]`, rendered with one decimal.
    Decimal { min: f64, max: f64 },
    /// `"systolic/diastolic"` reading.
    BloodPressure,
    /// Weighted choice among fixed labels.
    Choice(&'static [(&'static str, f64)]),
}

struct MockRule {
    keywords: &'static [&'static str],
    value: MockValue,
}

// First match wins, so "weight loss" must precede "weight".
const RULES: &[MockRule] = &[
    MockRule {
        keywords: &["weight loss"],
        value: MockValue::Decimal { min: 0.0, max: 10.0 },
    },
    MockRule {
        keywords: &["weight"],
        value: MockValue::Integer { min: 50, max: 100 },
    },
    MockRule {
        keywords: &["height"],
        value: MockValue::Integer { min: 150, max: 200 },
    },
    MockRule {
        keywords: &["bmi"],
        value: MockValue::Decimal {
            min: 18.5,
            max: 30.5,
        },
    },
    MockRule {
        keywords: &["age", "yr"],
        value: MockValue::Integer { min: 20, max: 80 },
    },
    MockRule {
        keywords: &["blood pressure", "bp"],
        value: MockValue::BloodPressure,
    },
    MockRule {
        keywords: &["glucose", "sugar"],
        value: MockValue::Integer { min: 70, max: 170 },
    },
    MockRule {
        keywords: &["cholesterol"],
        value: MockValue::Integer { min: 150, max: 250 },
    },
    MockRule {
        keywords: &["gender", "sex"],
        value: MockValue::Choice(&[("M", 0.5), ("F", 0.5)]),
    },
    MockRule {
        keywords: &["smoker", "smoking"],
        value: MockValue::Choice(&[("No", 0.7), ("Yes", 0.3)]),
    },
    MockRule {
        keywords: &["diabetes", "diabetic"],
        value: MockValue::Choice(&[("No", 0.8), ("Yes", 0.2)]),
    },
];

const FALLBACK: MockValue = MockValue::Integer { min: 0, max: 99 };

/// Resolve the value rule for a column name (case-insensitive substring match).
pub fn rule_for(column: &str) -> MockValue {
    let name_lower = column.to_lowercase();
    RULES
        .iter()
        .find(|rule| rule.keywords.iter().any(|kw| name_lower.contains(kw)))
        .map(|rule| rule.value)
        .unwrap_or(FALLBACK)
}

/// Draw one mock value for `column`.
pub fn mock_value(column: &str, rng: &mut dyn RngCore) -> String {
    match rule_for(column) {
        MockValue::Integer { min, max } => rng.random_range(min..=max).to_string(),
        MockValue::Decimal { min, max } => format!("{:.1}", rng.random_range(min..=max)),
        MockValue::BloodPressure => {
            let systolic = rng.random_range(90..=140);
            let diastolic = rng.random_range(60..=90);
            format!("{systolic}/{diastolic}")
        }
        MockValue::Choice(choices) => weighted_choice(choices, rng).to_string(),
    }
}

fn weighted_choice(choices: &'static [(&'static str, f64)], rng: &mut dyn RngCore) -> &'static str {
    let total: f64 = choices.iter().map(|(_, weight)| weight).sum();
    let mut roll = rng.random_range(0.0..total);
    for (value, weight) in choices {
        if roll < *weight {
            return *value;
        }
        roll -= weight;
    }
    choices.last().map(|(value, _)| *value).unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    #[test]
    fn weight_loss_is_not_weight() {
        assert_eq!(
            rule_for("Weight Loss (kg)"),
            MockValue::Decimal { min: 0.0, max: 10.0 }
        );
        assert_eq!(rule_for("body_weight"), MockValue::Integer { min: 50, max: 100 });
    }

    #[test]
    fn substring_rules_are_case_insensitive() {
        assert_eq!(rule_for("AGE"), MockValue::Integer { min: 20, max: 80 });
        assert_eq!(rule_for("years_yr"), MockValue::Integer { min: 20, max: 80 });
        assert_eq!(rule_for("Resting_BP"), MockValue::BloodPressure);
        assert_eq!(rule_for("blood_sugar"), MockValue::Integer { min: 70, max: 170 });
        assert_eq!(rule_for("zzz"), FALLBACK);
    }

    #[test]
    fn choice_values_come_from_the_label_set() {
        let mut rng = ChaCha8Rng::seed_from_u64(3);
        for _ in 0..200 {
            let value = mock_value("Sex", &mut rng);
            assert!(value == "M" || value == "F");
            let value = mock_value("is_diabetic", &mut rng);
            assert!(value == "Yes" || value == "No");
        }
    }

    #[test]
    fn smoker_split_roughly_follows_weights() {
        let mut rng = ChaCha8Rng::seed_from_u64(11);
        let yes = (0..2000)
            .filter(|_| mock_value("smoker", &mut rng) == "Yes")
            .count();
        assert!((450..=750).contains(&yes), "yes count {yes}");
    }
}
