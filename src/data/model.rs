use std::collections::{BTreeMap, BTreeSet};
use std::fmt;

use serde::Serialize;

// ---------------------------------------------------------------------------
// Column – the optional preference dimensions
// ---------------------------------------------------------------------------

/// A categorical column the user can express a preference on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Column {
    Brand,
    Transmission,
    Body,
    Fuel,
    Seats,
}

impl Column {
    /// Prompt order used by the preference collector.
    pub const ALL: [Column; 5] = [
        Column::Brand,
        Column::Transmission,
        Column::Body,
        Column::Fuel,
        Column::Seats,
    ];

    /// Human-readable menu title.
    pub fn title(self) -> &'static str {
        match self {
            Column::Brand => "Brand Selection",
            Column::Transmission => "Transmission Type",
            Column::Body => "Body Type",
            Column::Fuel => "Fuel Type",
            Column::Seats => "Number of Seats",
        }
    }

    /// Noun used in prompts ("Enter the number for your preferred ...").
    pub fn noun(self) -> &'static str {
        match self {
            Column::Brand => "brand",
            Column::Transmission => "transmission",
            Column::Body => "body type",
            Column::Fuel => "fuel type",
            Column::Seats => "number of seats",
        }
    }
}

impl fmt::Display for Column {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.noun())
    }
}

// ---------------------------------------------------------------------------
// CarRecord – one row of the dataset
// ---------------------------------------------------------------------------

/// A single car listing. Text fields keep the dataset's spelling (trimmed);
/// comparisons against preferences are case-insensitive.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CarRecord {
    pub brand: String,
    pub model: String,
    /// Always finite and `>= 0`.
    pub price: f64,
    pub fuel: String,
    pub transmission: String,
    pub body: String,
    /// Always `> 0`.
    pub seats: u32,
}

impl CarRecord {
    /// Text value of a categorical column, `None` for [`Column::Seats`].
    pub fn text(&self, column: Column) -> Option<&str> {
        match column {
            Column::Brand => Some(&self.brand),
            Column::Transmission => Some(&self.transmission),
            Column::Body => Some(&self.body),
            Column::Fuel => Some(&self.fuel),
            Column::Seats => None,
        }
    }

    /// "Brand Model", as shown in comparison headers.
    pub fn full_name(&self) -> String {
        format!("{} {}", self.brand, self.model)
    }
}

// ---------------------------------------------------------------------------
// CarDataset – the complete loaded dataset
// ---------------------------------------------------------------------------

/// The cleaned dataset with pre-computed distinct values per column.
#[derive(Debug, Clone, PartialEq)]
pub struct CarDataset {
    /// All surviving rows, in file order.
    pub records: Vec<CarRecord>,
    /// Sorted distinct spellings for each text column.
    pub text_values: BTreeMap<Column, Vec<String>>,
    /// Sorted distinct seat counts.
    pub seat_values: Vec<u32>,
    /// Rows removed during cleaning.
    pub dropped_rows: usize,
}

impl CarDataset {
    /// Build column indices from the cleaned records.
    ///
    /// Text values are de-duplicated case-insensitively; the first spelling
    /// seen in file order is the one offered in menus.
    pub fn from_records(records: Vec<CarRecord>, dropped_rows: usize) -> Self {
        let mut text_values = BTreeMap::new();
        for column in Column::ALL.into_iter().filter(|c| *c != Column::Seats) {
            let mut seen: BTreeMap<String, String> = BTreeMap::new();
            for rec in &records {
                if let Some(value) = rec.text(column).filter(|v| !v.is_empty()) {
                    seen.entry(value.to_lowercase())
                        .or_insert_with(|| value.to_string());
                }
            }
            text_values.insert(column, seen.into_values().collect());
        }

        let seat_values: Vec<u32> = records
            .iter()
            .map(|r| r.seats)
            .collect::<BTreeSet<_>>()
            .into_iter()
            .collect();

        CarDataset {
            records,
            text_values,
            seat_values,
            dropped_rows,
        }
    }

    /// Menu options for a column, already rendered as text.
    pub fn options(&self, column: Column) -> Vec<String> {
        match column {
            Column::Seats => self.seat_values.iter().map(u32::to_string).collect(),
            other => self.text_values.get(&other).cloned().unwrap_or_default(),
        }
    }

    /// Number of records.
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Whether the dataset is empty.
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn car(brand: &str, model: &str, seats: u32) -> CarRecord {
        CarRecord {
            brand: brand.into(),
            model: model.into(),
            price: 1.0,
            fuel: "Petrol".into(),
            transmission: "Manual".into(),
            body: "SUV".into(),
            seats,
        }
    }

    #[test]
    fn distinct_values_ignore_case_and_keep_first_spelling() {
        let ds = CarDataset::from_records(
            vec![car("Toyota", "Innova", 7), car("TOYOTA", "Fortuner", 7), car("Kia", "Seltos", 5)],
            0,
        );
        assert_eq!(ds.options(Column::Brand), vec!["Kia", "Toyota"]);
        assert_eq!(ds.options(Column::Seats), vec!["5", "7"]);
        assert_eq!(ds.options(Column::Fuel), vec!["Petrol"]);
    }

    #[test]
    fn seats_has_no_text_value() {
        assert_eq!(car("a", "b", 4).text(Column::Seats), None);
    }
}
