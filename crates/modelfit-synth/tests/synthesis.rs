use modelfit_core::{Dataset, QuotedRowParser};
use modelfit_synth::{MockColumnSynthesizer, SynthError, SynthOptions};
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

fn seeded(seed: u64) -> MockColumnSynthesizer {
    MockColumnSynthesizer::new(SynthOptions {
        seed: Some(seed),
        ..SynthOptions::default()
    })
}

fn names(values: &[&str]) -> Vec<String> {
    values.iter().map(|value| value.to_string()).collect()
}

fn dataset_with_rows(count: usize) -> String {
    let mut text = String::from("id,score");
    for idx in 0..count {
        text.push_str(&format!("\n{idx},{}", idx * 2));
    }
    text
}

#[test]
fn same_seed_reproduces_output() {
    let text = dataset_with_rows(5);
    let missing = names(&["age", "bmi", "smoker"]);
    let first = seeded(42).synthesize(&missing, &text).expect("synthesize");
    let second = seeded(42).synthesize(&missing, &text).expect("synthesize");
    assert_eq!(first, second);
}

#[test]
fn injected_rng_matches_configured_seed() {
    let text = dataset_with_rows(3);
    let missing = names(&["glucose"]);
    let configured = seeded(7).synthesize(&missing, &text).expect("synthesize");

    let mut rng = ChaCha8Rng::seed_from_u64(7);
    let injected = MockColumnSynthesizer::default()
        .synthesize_with_rng(&missing, &text, &mut rng)
        .expect("synthesize");
    assert_eq!(configured.text, injected.text);
}

#[test]
fn appends_columns_and_truncates_to_sample_rows() {
    let text = dataset_with_rows(25);
    let result = seeded(1)
        .synthesize(&names(&["Age", "Blood Pressure"]), &text)
        .expect("synthesize");

    assert_eq!(result.rows, 10);
    assert_eq!(result.columns, vec!["id", "score", "Age", "Blood Pressure"]);
    assert_eq!(result.added_columns, vec!["Age", "Blood Pressure"]);
    assert!(!result.text.ends_with('\n'));

    let dataset = Dataset::parse(&result.text, &QuotedRowParser).expect("reparse");
    assert_eq!(dataset.row_count(), 10);
    assert_eq!(dataset.dropped_rows, 0);
    for row in &dataset.rows {
        let age: i64 = row[2].parse().expect("integer age");
        assert!((20..=80).contains(&age));
        let (sys, dia) = row[3].split_once('/').expect("sys/dia");
        let sys: i64 = sys.parse().expect("systolic");
        let dia: i64 = dia.parse().expect("diastolic");
        assert!((90..=140).contains(&sys));
        assert!((60..=90).contains(&dia));
    }
}

#[test]
fn decimal_rules_render_one_decimal_in_range() {
    let text = dataset_with_rows(10);
    let result = seeded(9)
        .synthesize(&names(&["BMI", "weight loss"]), &text)
        .expect("synthesize");
    let dataset = Dataset::parse(&result.text, &QuotedRowParser).expect("reparse");
    for row in &dataset.rows {
        for (cell, min, max) in [(&row[2], 18.5, 30.5), (&row[3], 0.0, 10.0)] {
            let (_, fraction) = cell.split_once('.').expect("decimal point");
            assert_eq!(fraction.len(), 1, "{cell}");
            let value: f64 = cell.parse().expect("decimal");
            assert!(value >= min && value <= max, "{cell}");
        }
    }
}

#[test]
fn weight_loss_is_not_generated_as_weight() {
    // weight loss tops out at 10, weight starts at 50.
    let text = dataset_with_rows(10);
    let result = seeded(5)
        .synthesize(&names(&["Weight Loss"]), &text)
        .expect("synthesize");
    let dataset = Dataset::parse(&result.text, &QuotedRowParser).expect("reparse");
    assert!(
        dataset
            .column_cells(2)
            .all(|cell| cell.parse::<f64>().expect("number") <= 10.0)
    );
}

#[test]
fn present_columns_are_not_added_twice() {
    let text = dataset_with_rows(2);
    let result = seeded(3)
        .synthesize(&names(&["score", "sex", "sex"]), &text)
        .expect("synthesize");
    assert_eq!(result.added_columns, vec!["sex"]);
    assert_eq!(result.columns, vec!["id", "score", "sex"]);
}

#[test]
fn short_rows_are_padded_before_appending() {
    let text = "a,b,c\n1\n2,3,4";
    let result = seeded(3)
        .synthesize(&names(&["cholesterol"]), text)
        .expect("synthesize");
    let dataset = Dataset::parse(&result.text, &QuotedRowParser).expect("reparse");
    assert_eq!(dataset.rows[0][..3], ["1", "", ""]);
    assert_eq!(dataset.row_count(), 2);
}

#[test]
fn wide_rows_are_cut_to_header_width() {
    let text = "a,b\n1,2,3,4\n5,6";
    let result = seeded(4)
        .synthesize(&names(&["age"]), text)
        .expect("synthesize");
    let dataset = Dataset::parse(&result.text, &QuotedRowParser).expect("reparse");

    assert_eq!(dataset.columns, vec!["a", "b", "age"]);
    assert_eq!(dataset.dropped_rows, 0);
    assert_eq!(dataset.row_count(), 2);
    assert_eq!(dataset.rows[0][..2], ["1", "2"]);
    let age: i64 = dataset.rows[0][2].parse().expect("integer age");
    assert!((20..=80).contains(&age));
}

#[test]
fn quoted_fields_survive_resynthesis() {
    let text = "name,city\n\"Smith, John\",Lisbon";
    let result = seeded(3)
        .synthesize(&names(&["gender"]), text)
        .expect("synthesize");
    let dataset = Dataset::parse(&result.text, &QuotedRowParser).expect("reparse");
    assert_eq!(dataset.rows[0][0], "Smith, John");
}

#[test]
fn header_only_dataset_yields_header_only_output() {
    let result = seeded(3)
        .synthesize(&names(&["age"]), "id,score\n")
        .expect("synthesize");
    assert_eq!(result.rows, 0);
    assert_eq!(result.text, "id,score,age");
}

#[test]
fn blank_input_fails() {
    let err = seeded(3)
        .synthesize(&names(&["age"]), "\n \n")
        .expect_err("blank input");
    assert!(matches!(err, SynthError::EmptyDataset));
}
