use std::io::{self, Write};

use crate::data::filter::Recommendation;
use crate::data::model::CarRecord;

// ---------------------------------------------------------------------------
// Text table
// ---------------------------------------------------------------------------

#[derive(Clone, Copy, PartialEq)]
enum Align {
    Left,
    Right,
}

/// Write a header + rows table with columns sized to their widest cell.
fn write_table<W: Write>(
    out: &mut W,
    headers: &[(&str, Align)],
    rows: &[Vec<String>],
) -> io::Result<()> {
    let widths: Vec<usize> = headers
        .iter()
        .enumerate()
        .map(|(i, (h, _))| {
            rows.iter()
                .filter_map(|r| r.get(i))
                .map(|c| c.chars().count())
                .chain(std::iter::once(h.chars().count()))
                .max()
                .unwrap_or(0)
        })
        .collect();

    let line = |cells: Vec<&str>| -> String {
        cells
            .iter()
            .zip(headers.iter().zip(&widths))
            .map(|(cell, ((_, align), &width))| match align {
                Align::Left => format!("{cell:<width$}"),
                Align::Right => format!("{cell:>width$}"),
            })
            .collect::<Vec<_>>()
            .join("  ")
            .trim_end()
            .to_string()
    };

    writeln!(out, "{}", line(headers.iter().map(|(h, _)| *h).collect()))?;
    let rule: usize = widths.iter().sum::<usize>() + 2 * widths.len().saturating_sub(1);
    writeln!(out, "{}", "-".repeat(rule))?;
    for row in rows {
        writeln!(out, "{}", line(row.iter().map(String::as_str).collect()))?;
    }
    Ok(())
}

/// `1500000.0` → `"1,500,000"`, `1234.5` → `"1,234.50"`.
pub fn format_price(price: f64) -> String {
    let scaled = (price * 100.0).round();
    if scaled >= u64::MAX as f64 {
        // Past u64 range: whole units only.
        return group_thousands(&format!("{price:.0}"));
    }

    let cents = scaled as u64;
    let (whole, frac) = (cents / 100, cents % 100);
    let grouped = group_thousands(&whole.to_string());
    if frac == 0 {
        grouped
    } else {
        format!("{grouped}.{frac:02}")
    }
}

fn group_thousands(digits: &str) -> String {
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }
    grouped
}

// ---------------------------------------------------------------------------
// Search results
// ---------------------------------------------------------------------------

/// Render ranked candidates, or a notice when nothing fits the budget.
pub fn render_results<W: Write>(out: &mut W, rec: &Recommendation<'_>) -> io::Result<()> {
    if rec.is_empty() {
        writeln!(out, "\nNo cars found matching your criteria.")?;
        return Ok(());
    }

    writeln!(
        out,
        "\n--- Top Recommendations (showing {} of {} matches) ---",
        rec.top.len(),
        rec.total
    )?;

    let headers = [
        ("#", Align::Right),
        ("Brand", Align::Left),
        ("Model", Align::Left),
        ("Fuel", Align::Left),
        ("Transmission", Align::Left),
        ("Body", Align::Left),
        ("Seats", Align::Right),
        ("Price", Align::Right),
        ("Match", Align::Right),
    ];
    let rows: Vec<Vec<String>> = rec
        .top
        .iter()
        .enumerate()
        .map(|(i, c)| {
            vec![
                (i + 1).to_string(),
                c.car.brand.clone(),
                c.car.model.clone(),
                c.car.fuel.clone(),
                c.car.transmission.clone(),
                c.car.body.clone(),
                c.car.seats.to_string(),
                format_price(c.car.price),
                format!("{:.0}%", c.score),
            ]
        })
        .collect();

    write_table(out, &headers, &rows)
}

// ---------------------------------------------------------------------------
// Comparison
// ---------------------------------------------------------------------------

/// Show two records side by side. A name that was not found gets its own
/// notice; whatever was found is still shown.
pub fn render_comparison<W: Write>(
    out: &mut W,
    first: (&str, Option<&CarRecord>),
    second: (&str, Option<&CarRecord>),
) -> io::Result<()> {
    writeln!(out, "\n--- Comparison Results ---")?;

    for (name, found) in [first, second] {
        if found.is_none() {
            writeln!(out, "Model not found: '{name}'. Please check the spelling.")?;
        }
    }

    let found: Vec<&CarRecord> = [first.1, second.1].into_iter().flatten().collect();
    if found.is_empty() {
        return Ok(());
    }

    let mut headers = vec![("Attribute", Align::Left)];
    headers.extend(found.iter().map(|c| (c.model.as_str(), Align::Left)));

    let attributes: [(&str, fn(&CarRecord) -> String); 7] = [
        ("Brand", |c| c.brand.clone()),
        ("Model", |c| c.model.clone()),
        ("Price", |c| format_price(c.price)),
        ("Fuel", |c| c.fuel.clone()),
        ("Transmission", |c| c.transmission.clone()),
        ("Body", |c| c.body.clone()),
        ("Seats", |c| c.seats.to_string()),
    ];
    let rows: Vec<Vec<String>> = attributes
        .iter()
        .map(|(label, get)| {
            std::iter::once(label.to_string())
                .chain(found.iter().map(|c| get(c)))
                .collect()
        })
        .collect();

    write_table(out, &headers, &rows)
}
