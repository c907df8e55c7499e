// Integration test: search, ranking and comparison over the bundled dataset

use std::path::PathBuf;

use pretty_assertions::assert_eq;

use car_finder::app::{Session, DEFAULT_TOP};
use car_finder::data::filter::{find_model, rank, recommend, Preference, PreferenceSet};
use car_finder::data::loader::load_file;
use car_finder::data::model::{CarDataset, Column};
use car_finder::ui::prompt::Console;
use car_finder::ui::table::render_comparison;

fn bundled() -> CarDataset {
    let path = PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("CARS_DATASET_WITHOUT.csv");
    load_file(&path).expect("bundled dataset loads")
}

fn every_preference_combination(ds: &CarDataset, budget: f64) -> Vec<PreferenceSet> {
    let brand = |v: &str| Preference::Value(v.to_string());
    let mut sets = Vec::new();
    for b in [Preference::NoPreference, brand("Toyota"), brand("kia")] {
        for f in [Preference::NoPreference, brand("Diesel")] {
            for t in [Preference::NoPreference, brand("automatic")] {
                for s in [Preference::NoPreference, Preference::Value(7)] {
                    sets.push(PreferenceSet {
                        budget,
                        brand: b.clone(),
                        transmission: t.clone(),
                        body: Preference::NoPreference,
                        fuel: f.clone(),
                        seats: s.clone(),
                    });
                }
            }
        }
    }
    assert!(!ds.is_empty());
    sets
}

#[test]
fn test_bundled_dataset_drops_malformed_rows() {
    let ds = bundled();
    assert_eq!(ds.len(), 34);
    assert_eq!(ds.dropped_rows, 2);
    assert!(find_model(&ds, "Curvv").is_none());
    assert!(find_model(&ds, "Carens").is_none());
}

#[test]
fn test_loading_twice_is_identical() {
    assert_eq!(bundled(), bundled());
}

#[test]
fn test_candidates_respect_budget_and_ordering() {
    let ds = bundled();
    for budget in [600_000.0, 800_000.0, 1_100_000.0, 1_500_000.0, 5_000_000.0] {
        for prefs in every_preference_combination(&ds, budget) {
            let ranked = rank(&ds, &prefs);
            let k = prefs.specified();

            for c in &ranked {
                assert!(c.car.price <= budget);
                assert_eq!(c.specified, k);
                // Score is one of the discrete steps m/k * 100.
                let expected = if k == 0 { 100.0 } else { c.matched as f64 * 100.0 / k as f64 };
                assert!((c.score - expected).abs() < 1e-9, "{} vs {expected}", c.score);
                assert!(c.matched <= k);
                assert!(k == 0 || c.matched > 0);
            }

            for pair in ranked.windows(2) {
                assert!(pair[0].score >= pair[1].score);
                if pair[0].score == pair[1].score {
                    assert!(pair[0].car.price <= pair[1].car.price);
                }
            }
        }
    }
}

#[test]
fn test_no_preferences_means_full_score() {
    let ds = bundled();
    let rec = recommend(&ds, &PreferenceSet::with_budget(1_000_000.0), usize::MAX);
    assert!(rec.total > 0);
    assert!(rec.top.iter().all(|c| c.score == 100.0));
}

fn toyota_search(ds: &CarDataset) -> PreferenceSet {
    let mut prefs = PreferenceSet::with_budget(1_500_000.0);
    prefs.brand = Preference::Value("Toyota".into());
    assert!(!ds.is_empty());
    prefs
}

fn menu_number(ds: &CarDataset, brand: &str) -> usize {
    ds.options(Column::Brand)
        .iter()
        .position(|b| b == brand)
        .unwrap()
        + 1
}

#[test]
fn test_toyota_under_one_and_a_half_million() {
    let ds = bundled();
    let ranked = rank(&ds, &toyota_search(&ds));

    let shown: Vec<(&str, &str, f64)> = ranked
        .iter()
        .map(|c| (c.car.brand.as_str(), c.car.model.as_str(), c.score))
        .collect();
    assert_eq!(
        shown,
        vec![
            ("Toyota", "Glanza", 100.0),
            ("Toyota", "Rumion", 100.0),
            ("Toyota", "Urban Cruiser Hyryder", 100.0),
        ]
    );

    let rec = recommend(&ds, &toyota_search(&ds), DEFAULT_TOP);
    assert_eq!(rec.total, 3);
}

#[test]
fn test_toyota_session_shows_only_toyotas() {
    let ds = bundled();
    let input = format!("1500000\n{}\n0\n0\n0\n0\n3\n", menu_number(&ds, "Toyota"));

    let mut session = Session::new(&ds, Console::new(input.as_bytes(), Vec::new()), DEFAULT_TOP);
    session.run().unwrap();
    let out = String::from_utf8(session.into_console().into_output()).unwrap();

    assert!(out.contains("showing 3 of 3 matches"));
    let table: Vec<&str> = out
        .lines()
        .skip_while(|l| !l.starts_with("--- Top Recommendations"))
        .skip(3)
        .take_while(|l| !l.is_empty())
        .collect();
    assert_eq!(table.len(), 3);
    for row in table {
        assert!(row.contains("Toyota"), "{row}");
        assert!(row.ends_with("100%"), "{row}");
    }
    assert!(!out.contains(" 0%"));
}

#[test]
fn test_nothing_under_half_a_million() {
    let ds = bundled();
    let rec = recommend(&ds, &PreferenceSet::with_budget(500_000.0), DEFAULT_TOP);
    assert!(rec.is_empty());
}

#[test]
fn test_compare_with_missing_model() {
    let ds = bundled();
    let swift = find_model(&ds, "Swift");
    let missing = find_model(&ds, "Nonexistent-Model");
    assert!(swift.is_some());
    assert!(missing.is_none());

    let mut out = Vec::new();
    render_comparison(&mut out, ("Swift", swift), ("Nonexistent-Model", missing)).unwrap();
    let text = String::from_utf8(out).unwrap();
    assert!(text.contains("Model not found: 'Nonexistent-Model'"));
    assert!(text.contains("Maruti Suzuki"));
    assert!(text.contains("649,000"));
}

#[test]
fn test_interactive_session_end_to_end() {
    let ds = bundled();
    // Budget 1,500,000; brand menu is sorted, so find Toyota's number.
    let toyota = menu_number(&ds, "Toyota");
    let input = format!("1500000\n{toyota}\n0\n0\n0\n0\n2\nSwift\nNonexistent-Model\n3\n");

    let mut session = Session::new(&ds, Console::new(input.as_bytes(), Vec::new()), 3);
    session.run().unwrap();
    let out = String::from_utf8(session.into_console().into_output()).unwrap();

    assert!(out.contains("Brand Selection"));
    assert!(out.contains("0. No preference"));
    assert!(out.contains("Glanza"));
    assert!(out.contains("Model not found: 'Nonexistent-Model'"));
    assert!(out.trim_end().ends_with("Goodbye!"));
}
