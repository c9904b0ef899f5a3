pub const CURRENCY_SYMBOL: &str = "₹";
pub const LAKH: f64 = 100_000.0;
pub const CRORE: f64 = 10_000_000.0;
/// Shown in table cells for streams that are not contributing.
pub const PLACEHOLDER: &str = "-";

const UNIT_SPAN_STYLE: &str =
    "font-size: 0.75rem; color: var(--text-muted); font-weight: normal; margin-left: 4px;";

/// Whole-rupee amount with Indian digit grouping, e.g. `₹1,23,45,678`.
///
/// Non-finite amounts format as `₹0`.
pub fn format_currency(amount: f64) -> String {
    if !amount.is_finite() {
        return format!("{CURRENCY_SYMBOL}0");
    }

    let rounded = amount.round();
    let grouped = group_indian(&format!("{:.0}", rounded.abs()));
    if rounded < 0.0 {
        format!("-{CURRENCY_SYMBOL}{grouped}")
    } else {
        format!("{CURRENCY_SYMBOL}{grouped}")
    }
}

fn group_indian(digits: &str) -> String {
    if digits.len() <= 3 {
        return digits.to_string();
    }

    let (head, tail) = digits.split_at(digits.len() - 3);
    let mut groups = Vec::with_capacity(head.len() / 2 + 1);
    let mut end = head.len();
    while end > 2 {
        groups.push(&head[end - 2..end]);
        end -= 2;
    }
    groups.push(&head[..end]);
    groups.reverse();

    format!("{},{tail}", groups.join(","))
}

/// `(X.XX Cr)` or `(X.XX L)` for large amounts, empty below one lakh.
pub fn format_unit(amount: f64) -> String {
    if !amount.is_finite() || amount < LAKH {
        return String::new();
    }
    if amount >= CRORE {
        format!("({} Cr)", two_decimals(amount / CRORE))
    } else {
        format!("({} L)", two_decimals(amount / LAKH))
    }
}

/// [`format_unit`] without the parentheses, for compact labels next to inputs.
pub fn format_unit_plain(amount: f64) -> String {
    format_unit(amount)
        .trim_start_matches('(')
        .trim_end_matches(')')
        .to_string()
}

/// [`format_unit`] wrapped in an inline span for generated markup.
pub fn format_unit_styled(amount: f64) -> String {
    let unit = format_unit(amount);
    if unit.is_empty() {
        return unit;
    }
    format!("<span style=\"{UNIT_SPAN_STYLE}\">{unit}</span>")
}

/// Currency followed by the styled unit, as used for summary figures.
///
/// Below one lakh this is the bare currency string, with no trailing space.
pub fn format_summary(amount: f64) -> String {
    let unit = format_unit_styled(amount);
    if unit.is_empty() {
        format_currency(amount)
    } else {
        format!("{} {unit}", format_currency(amount))
    }
}

pub fn format_cell(amount: f64) -> String {
    format!("{} <br>{}", format_currency(amount), format_unit_styled(amount))
}

pub fn format_optional_cell(amount: Option<f64>) -> String {
    amount.map_or_else(|| PLACEHOLDER.to_string(), format_cell)
}

fn two_decimals(value: f64) -> String {
    format!("{:.2}", (value * 100.0).round() / 100.0)
}
