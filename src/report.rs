//! Formatting and export of projection results
//!
//! The currency is a display label only and never changes any amount.

use std::fmt;
use std::fs::File;
use std::io::Write;
use std::path::Path;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::projection::ProjectionResult;

/// Display currency
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Currency {
    #[default]
    Inr,
    Usd,
    Eur,
    Gbp,
    Jpy,
}

impl Currency {
    pub fn symbol(&self) -> &'static str {
        match self {
            Currency::Inr => "₹",
            Currency::Usd => "$",
            Currency::Eur => "€",
            Currency::Gbp => "£",
            Currency::Jpy => "¥",
        }
    }

    pub fn code(&self) -> &'static str {
        match self {
            Currency::Inr => "INR",
            Currency::Usd => "USD",
            Currency::Eur => "EUR",
            Currency::Gbp => "GBP",
            Currency::Jpy => "JPY",
        }
    }
}

impl fmt::Display for Currency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

impl FromStr for Currency {
    type Err = String;

    /// Accepts an ISO code (any case) or the symbol itself
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_uppercase().as_str() {
            "INR" | "₹" => Ok(Currency::Inr),
            "USD" | "$" => Ok(Currency::Usd),
            "EUR" | "€" => Ok(Currency::Eur),
            "GBP" | "£" => Ok(Currency::Gbp),
            "JPY" | "¥" => Ok(Currency::Jpy),
            other => Err(format!("unknown currency {other:?} (expected INR, USD, EUR, GBP or JPY)")),
        }
    }
}

/// Format an amount as `<symbol><grouped digits>` with no decimals, e.g. `₹1,234,568`
///
/// Negative amounts keep the sign after the symbol: `$-2,000`.
pub fn format_amount(value: f64, currency: Currency) -> String {
    let rounded = format!("{:.0}", value.abs());
    let negative = value < 0.0 && rounded.bytes().any(|b| b != b'0');

    let mut grouped = String::with_capacity(rounded.len() + rounded.len() / 3);
    for (i, ch) in rounded.chars().enumerate() {
        if i > 0 && (rounded.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }

    format!(
        "{}{}{}",
        currency.symbol(),
        if negative { "-" } else { "" },
        grouped
    )
}

const COLUMNS: [&str; 8] = [
    "Age",
    "Year Start Balance",
    "Annual Investment",
    "Custom Investments",
    "Year End Balance",
    "SWP Withdrawal",
    "Custom Withdrawals",
    "Adjusted End Balance",
];

/// Render the year-by-year table as aligned text
///
/// `max_rows` limits the number of years shown; the remainder is summarised in a footer line.
pub fn render_table(result: &ProjectionResult, currency: Currency, max_rows: Option<usize>) -> String {
    let shown = max_rows.unwrap_or(result.len()).min(result.len());

    let cells: Vec<[String; 8]> = result
        .iter()
        .take(shown)
        .map(|r| {
            [
                r.age.to_string(),
                format_amount(r.year_start_balance, currency),
                format_amount(r.annual_investment, currency),
                format_amount(r.custom_investment_total, currency),
                format_amount(r.year_end_balance_pre_withdrawal, currency),
                format_amount(r.swp_withdrawal, currency),
                format_amount(r.custom_withdrawal_total, currency),
                format_amount(r.adjusted_end_balance, currency),
            ]
        })
        .collect();

    let mut widths = COLUMNS.map(|c| c.chars().count());
    for row in &cells {
        for (w, cell) in widths.iter_mut().zip(row) {
            *w = (*w).max(cell.chars().count());
        }
    }

    let mut out = String::new();
    push_line(&mut out, &COLUMNS.map(String::from), &widths);
    let rule_len = widths.iter().sum::<usize>() + 2 * (widths.len() - 1);
    out.push_str(&"-".repeat(rule_len));
    out.push('\n');
    for row in &cells {
        push_line(&mut out, row, &widths);
    }

    if shown < result.len() {
        out.push_str(&format!("... ({} more years)\n", result.len() - shown));
    }

    out
}

fn push_line(out: &mut String, cells: &[String; 8], widths: &[usize; 8]) {
    let line: Vec<String> = cells
        .iter()
        .zip(widths)
        .map(|(cell, &w)| format!("{:>w$}", cell, w = w))
        .collect();
    out.push_str(&line.join("  "));
    out.push('\n');
}

/// Write every year as CSV, one row per age, with unformatted amounts
pub fn write_csv<W: Write>(result: &ProjectionResult, writer: W) -> Result<(), csv::Error> {
    let mut csv_writer = csv::Writer::from_writer(writer);
    for row in result {
        csv_writer.serialize(row)?;
    }
    csv_writer.flush()?;
    Ok(())
}

/// Write the CSV export to a file
pub fn write_csv_path<P: AsRef<Path>>(result: &ProjectionResult, path: P) -> Result<(), csv::Error> {
    let file = File::create(path)?;
    write_csv(result, file)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::plan::ScenarioParameters;
    use crate::projection::{ProjectionEngine, YearRecord};

    #[test]
    fn test_format_amount_groups_thousands() {
        assert_eq!(format_amount(0.0, Currency::Inr), "₹0");
        assert_eq!(format_amount(999.4, Currency::Usd), "$999");
        assert_eq!(format_amount(1000.0, Currency::Usd), "$1,000");
        assert_eq!(format_amount(1_234_567.8, Currency::Eur), "€1,234,568");
        assert_eq!(format_amount(123_456.0, Currency::Gbp), "£123,456");
        assert_eq!(format_amount(-2000.0, Currency::Usd), "$-2,000");
        assert_eq!(format_amount(-0.2, Currency::Jpy), "¥0");
    }

    #[test]
    fn test_currency_parse() {
        assert_eq!("usd".parse::<Currency>(), Ok(Currency::Usd));
        assert_eq!("€".parse::<Currency>(), Ok(Currency::Eur));
        assert!("AUD".parse::<Currency>().is_err());
        assert_eq!(Currency::default().symbol(), "₹");
    }

    fn projection() -> ProjectionResult {
        let params = ScenarioParameters {
            age_start: 95,
            age_end: 97,
            age_retire: 99,
            ..Default::default()
        };
        ProjectionEngine::new(params, &[]).unwrap().project()
    }

    #[test]
    fn test_render_table() {
        let result = projection();
        let table = render_table(&result, Currency::Usd, None);
        let lines: Vec<&str> = table.lines().collect();

        assert_eq!(lines.len(), 2 + 6);
        assert!(lines[0].contains("Adjusted End Balance"));
        assert!(lines[2].trim_start().starts_with("95"));
        assert!(lines[2].contains("$600,000"));

        let truncated = render_table(&result, Currency::Usd, Some(2));
        assert!(truncated.ends_with("... (4 more years)\n"));
    }

    #[test]
    fn test_write_csv() {
        let result = projection();
        let mut buf = Vec::new();
        write_csv(&result, &mut buf).unwrap();

        let mut reader = csv::Reader::from_reader(buf.as_slice());
        let headers = reader.headers().unwrap().clone();
        assert_eq!(&headers[0], "age");
        assert_eq!(&headers[7], "adjusted_end_balance");

        let rows: Vec<YearRecord> = reader.deserialize().collect::<Result<_, _>>().unwrap();
        assert_eq!(rows.len(), result.len());
        assert_eq!(rows[3].age, 98);
    }
}
