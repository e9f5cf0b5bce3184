//! KPI cards and the number formatting they use.

use serde::Serialize;

use salesdash_core::types::SalesSummary;

/// One headline metric card.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct KpiCard {
    pub label: &'static str,
    pub value: String,
}

/// The three headline cards. Missing figures show as zero.
pub fn kpi_cards(summary: &SalesSummary) -> Vec<KpiCard> {
    vec![
        KpiCard {
            label: "Total Revenue",
            value: format_currency(summary.total_sales_or_zero()),
        },
        KpiCard {
            label: "Total Orders",
            value: format_number(summary.total_transactions_or_zero()),
        },
        KpiCard {
            label: "Average Order Value",
            value: format_currency(summary.avg_transaction_value_or_zero()),
        },
    ]
}

/// Thousands-grouped number with at most three fraction digits.
///
/// `1234567.891` → `1,234,567.891`, `1500.5` → `1,500.5`, `42.0` → `42`.
pub fn format_number(value: f64) -> String {
    if !value.is_finite() {
        return "0".to_string();
    }

    let rendered = format!("{:.3}", value.abs());
    let (int_part, frac_part) = rendered.split_once('.').unwrap_or((&rendered, ""));
    let frac_part = frac_part.trim_end_matches('0');

    let mut grouped = String::with_capacity(int_part.len() + int_part.len() / 3);
    for (i, ch) in int_part.chars().enumerate() {
        if i > 0 && (int_part.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }

    let negative = value < 0.0 && (int_part != "0" || !frac_part.is_empty());
    let mut out = String::new();
    if negative {
        out.push('-');
    }
    out.push_str(&grouped);
    if !frac_part.is_empty() {
        out.push('.');
        out.push_str(frac_part);
    }
    out
}

pub fn format_currency(value: f64) -> String {
    format!("${}", format_number(value))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_number_grouping() {
        assert_eq!(format_number(0.0), "0");
        assert_eq!(format_number(999.0), "999");
        assert_eq!(format_number(1000.0), "1,000");
        assert_eq!(format_number(1234567.0), "1,234,567");
        assert_eq!(format_number(100000.0), "100,000");
    }

    #[test]
    fn test_format_number_fraction_digits() {
        assert_eq!(format_number(1500.5), "1,500.5");
        assert_eq!(format_number(2.34567), "2.346");
        assert_eq!(format_number(10.0004), "10");
        assert_eq!(format_number(-1234.25), "-1,234.25");
        assert_eq!(format_number(-0.0001), "0");
    }

    #[test]
    fn test_format_number_non_finite() {
        assert_eq!(format_number(f64::NAN), "0");
        assert_eq!(format_number(f64::INFINITY), "0");
    }

    #[test]
    fn test_kpi_cards() {
        let summary = SalesSummary {
            total_sales: Some(125000.5),
            total_transactions: Some(320.0),
            avg_transaction_value: None,
            location: None,
        };
        let cards = kpi_cards(&summary);
        assert_eq!(cards[0].label, "Total Revenue");
        assert_eq!(cards[0].value, "$125,000.5");
        assert_eq!(cards[1].value, "320");
        assert_eq!(cards[2].label, "Average Order Value");
        assert_eq!(cards[2].value, "$0");
    }
}
