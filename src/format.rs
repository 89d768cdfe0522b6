//! Display formatting for derived statistics. An absent or non-finite
//! value always renders as "N/A" — never as zero.

/// Full USD amount, rounded to whole dollars with thousands separators:
/// `$1,234,567`.
pub fn currency(value: Option<f64>) -> String {
    let Some(v) = finite(value) else {
        return "N/A".to_string();
    };
    let sign = if v < 0.0 { "-" } else { "" };
    format!("{sign}${}", group_thousands(v.abs().round() as u64))
}

/// Compact axis-tick form with an SI-style suffix, `G` spelled as `B`:
/// `$1.2B`, `$45M`, `$950k`.
pub fn currency_compact(value: Option<f64>) -> String {
    let Some(v) = finite(value) else {
        return "N/A".to_string();
    };
    let sign = if v < 0.0 { "-" } else { "" };
    let abs = v.abs();
    let (scaled, suffix) = if abs >= 1e12 {
        (abs / 1e12, "T")
    } else if abs >= 1e9 {
        (abs / 1e9, "B")
    } else if abs >= 1e6 {
        (abs / 1e6, "M")
    } else if abs >= 1e3 {
        (abs / 1e3, "k")
    } else {
        (abs, "")
    };
    if scaled >= 10.0 {
        format!("{sign}${scaled:.0}{suffix}")
    } else {
        format!("{sign}${scaled:.1}{suffix}")
    }
}

/// Growth-rate style percentage with one decimal: `85.5%`.
pub fn percent(value: Option<f64>) -> String {
    match finite(value) {
        Some(v) => format!("{v:.1}%"),
        None => "N/A".to_string(),
    }
}

fn finite(value: Option<f64>) -> Option<f64> {
    value.filter(|v| v.is_finite())
}

fn group_thousands(mut n: u64) -> String {
    let mut groups = Vec::new();
    loop {
        let (rest, group) = (n / 1000, n % 1000);
        if rest == 0 {
            groups.push(group.to_string());
            break;
        }
        groups.push(format!("{group:03}"));
        n = rest;
    }
    groups.reverse();
    groups.join(",")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn absent_values_render_as_na() {
        assert_eq!(currency(None), "N/A");
        assert_eq!(currency_compact(None), "N/A");
        assert_eq!(percent(None), "N/A");
    }

    #[test]
    fn non_finite_values_render_as_na() {
        // investment_per_round with zero rounds produces these.
        assert_eq!(currency(Some(f64::INFINITY)), "N/A");
        assert_eq!(currency(Some(f64::NAN)), "N/A");
        assert_eq!(percent(Some(f64::NEG_INFINITY)), "N/A");
    }

    #[test]
    fn full_currency_groups_thousands() {
        assert_eq!(currency(Some(0.0)), "$0");
        assert_eq!(currency(Some(950.0)), "$950");
        assert_eq!(currency(Some(1_234_567.4)), "$1,234,567");
        assert_eq!(currency(Some(-500_000.0)), "-$500,000");
    }

    #[test]
    fn compact_currency_uses_si_suffixes_with_b_for_billions() {
        assert_eq!(currency_compact(Some(1_230_000_000.0)), "$1.2B");
        assert_eq!(currency_compact(Some(45_000_000.0)), "$45M");
        assert_eq!(currency_compact(Some(950_000.0)), "$950k");
        assert_eq!(currency_compact(Some(2_500.0)), "$2.5k");
        assert_eq!(currency_compact(Some(3_100_000_000_000.0)), "$3.1T");
        assert_eq!(currency_compact(Some(-45_000_000.0)), "-$45M");
    }

    #[test]
    fn percent_keeps_one_decimal() {
        assert_eq!(percent(Some(85.52)), "85.5%");
        assert_eq!(percent(Some(-3.0)), "-3.0%");
    }
}
