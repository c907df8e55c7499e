use std::cmp::Ordering;

use log::debug;

use super::model::{CarDataset, CarRecord, Column};

// ---------------------------------------------------------------------------
// Preferences
// ---------------------------------------------------------------------------

/// One optional dimension: either excluded from scoring or a concrete value.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum Preference<T> {
    #[default]
    NoPreference,
    Value(T),
}

impl<T> Preference<T> {
    pub fn is_specified(&self) -> bool {
        matches!(self, Preference::Value(_))
    }

    pub fn value(&self) -> Option<&T> {
        match self {
            Preference::Value(v) => Some(v),
            Preference::NoPreference => None,
        }
    }
}

/// Everything the user asked for in one search. Every optional field is
/// always populated; "no preference" is explicit.
#[derive(Debug, Clone, PartialEq)]
pub struct PreferenceSet {
    /// Maximum price, finite and `> 0`.
    pub budget: f64,
    pub brand: Preference<String>,
    pub transmission: Preference<String>,
    pub body: Preference<String>,
    pub fuel: Preference<String>,
    pub seats: Preference<u32>,
}

impl PreferenceSet {
    /// A budget-only search: every optional dimension is "no preference".
    pub fn with_budget(budget: f64) -> Self {
        Self {
            budget,
            brand: Preference::NoPreference,
            transmission: Preference::NoPreference,
            body: Preference::NoPreference,
            fuel: Preference::NoPreference,
            seats: Preference::NoPreference,
        }
    }

    /// Text preference for a column, `None` for [`Column::Seats`].
    pub fn text(&self, column: Column) -> Option<&Preference<String>> {
        match column {
            Column::Brand => Some(&self.brand),
            Column::Transmission => Some(&self.transmission),
            Column::Body => Some(&self.body),
            Column::Fuel => Some(&self.fuel),
            Column::Seats => None,
        }
    }

    pub fn text_mut(&mut self, column: Column) -> Option<&mut Preference<String>> {
        match column {
            Column::Brand => Some(&mut self.brand),
            Column::Transmission => Some(&mut self.transmission),
            Column::Body => Some(&mut self.body),
            Column::Fuel => Some(&mut self.fuel),
            Column::Seats => None,
        }
    }

    /// Number of dimensions that take part in scoring (k).
    pub fn specified(&self) -> usize {
        [
            self.brand.is_specified(),
            self.transmission.is_specified(),
            self.body.is_specified(),
            self.fuel.is_specified(),
            self.seats.is_specified(),
        ]
        .into_iter()
        .filter(|s| *s)
        .count()
    }

    /// Number of specified dimensions the record satisfies (m).
    ///
    /// Text compares case-insensitively after trimming; no partial matches.
    pub fn matched(&self, car: &CarRecord) -> usize {
        let text_hits = Column::ALL
            .into_iter()
            .filter_map(|col| Some((self.text(col)?.value()?, car.text(col)?)))
            .filter(|(wanted, actual)| wanted.trim().to_lowercase() == actual.trim().to_lowercase())
            .count();
        let seat_hit = self.seats.value().is_some_and(|s| *s == car.seats);
        text_hits + usize::from(seat_hit)
    }
}

// ---------------------------------------------------------------------------
// Scoring
// ---------------------------------------------------------------------------

/// A budget-qualifying record with its match score.
#[derive(Debug, Clone, PartialEq)]
pub struct ScoredCandidate<'a> {
    pub car: &'a CarRecord,
    /// Percentage in `[0, 100]`: `matched / specified * 100`, or 100 when
    /// nothing was specified.
    pub score: f64,
    pub matched: usize,
    pub specified: usize,
}

/// Outcome of one search.
#[derive(Debug, Clone, PartialEq)]
pub struct Recommendation<'a> {
    /// How many records passed the budget filter and matched at least one
    /// preference (every record within budget when none was given).
    pub total: usize,
    /// The best `limit` candidates, best first.
    pub top: Vec<ScoredCandidate<'a>>,
}

impl Recommendation<'_> {
    pub fn is_empty(&self) -> bool {
        self.total == 0
    }
}

/// Match score as a percentage.
pub fn match_score(matched: usize, specified: usize) -> f64 {
    if specified == 0 {
        100.0
    } else {
        matched as f64 / specified as f64 * 100.0
    }
}

/// Records priced at or under the budget, in dataset order.
pub fn within_budget(dataset: &CarDataset, budget: f64) -> impl Iterator<Item = &CarRecord> {
    dataset.records.iter().filter(move |car| car.price <= budget)
}

/// Budget filter, then score, then order by descending score and ascending
/// price. Full ties keep dataset order (`sort_by` is stable).
///
/// When any preference is given, records matching none of them are dropped.
pub fn rank<'a>(dataset: &'a CarDataset, prefs: &PreferenceSet) -> Vec<ScoredCandidate<'a>> {
    let specified = prefs.specified();
    let mut candidates: Vec<ScoredCandidate<'a>> = within_budget(dataset, prefs.budget)
        .filter_map(|car| {
            let matched = prefs.matched(car);
            if specified > 0 && matched == 0 {
                return None;
            }
            Some(ScoredCandidate {
                car,
                score: match_score(matched, specified),
                matched,
                specified,
            })
        })
        .collect();

    candidates.sort_by(|a, b| {
        // Compare the integer hit counts: the denominators are equal, so this
        // orders like the score without float comparison.
        b.matched
            .cmp(&a.matched)
            .then_with(|| a.car.price.partial_cmp(&b.car.price).unwrap_or(Ordering::Equal))
    });
    candidates
}

/// Rank and keep the top `limit` candidates.
pub fn recommend<'a>(
    dataset: &'a CarDataset,
    prefs: &PreferenceSet,
    limit: usize,
) -> Recommendation<'a> {
    let mut ranked = rank(dataset, prefs);
    let total = ranked.len();
    ranked.truncate(limit);
    debug!(
        "budget {} with {} preferences: {} candidates, showing {}",
        prefs.budget,
        prefs.specified(),
        total,
        ranked.len()
    );
    Recommendation { total, top: ranked }
}

// ---------------------------------------------------------------------------
// Model lookup
// ---------------------------------------------------------------------------

/// Find a model by name, case-insensitively. Accepts either the model name
/// alone ("swift") or brand and model ("Maruti Suzuki Swift"). The first
/// matching row in dataset order wins.
pub fn find_model<'a>(dataset: &'a CarDataset, name: &str) -> Option<&'a CarRecord> {
    let wanted = name.trim().to_lowercase();
    if wanted.is_empty() {
        return None;
    }
    dataset.records.iter().find(|car| {
        car.model.to_lowercase() == wanted || car.full_name().to_lowercase() == wanted
    })
}
