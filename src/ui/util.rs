use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;

pub(crate) const CURRENCY: &str = "RM";

/// Currency text with thousands separators and two decimals,
/// e.g. `1234567.89` → `"RM 1,234,567.89"`.
pub(crate) fn format_amount(val: Decimal) -> String {
    let val = val.round_dp(2);
    let cents = format!("{:.2}", val.abs());
    let (whole, frac) = cents.split_once('.').unwrap_or((cents.as_str(), "00"));

    let mut grouped = String::with_capacity(whole.len() + whole.len() / 3);
    for (i, digit) in whole.chars().enumerate() {
        if i > 0 && (whole.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(digit);
    }

    let sign = if val < Decimal::ZERO { "-" } else { "" };
    format!("{sign}{CURRENCY} {grouped}.{frac}")
}

/// At most `max` characters of `s`, ending in "…" when cut.
pub(crate) fn truncate(s: &str, max: usize) -> String {
    match s.char_indices().nth(max) {
        None => s.to_string(),
        Some(_) if max == 0 => String::new(),
        Some(_) => {
            let kept: String = s.chars().take(max - 1).collect();
            kept + "…"
        }
    }
}

/// Fraction of `limit` consumed by `spent`, clamped to 0.0..=1.0.
/// A zero limit reads as full once anything is spent.
pub(crate) fn spent_ratio(spent: Decimal, limit: Decimal) -> f64 {
    if limit > Decimal::ZERO {
        spent
            .checked_div(limit)
            .map_or(1.0, |r| r.to_f64().unwrap_or(1.0))
            .clamp(0.0, 1.0)
    } else if spent > Decimal::ZERO {
        1.0
    } else {
        0.0
    }
}

pub(crate) fn progress_bar(ratio: f64, width: usize) -> String {
    let filled = ((ratio * width as f64) as usize).min(width);
    let empty = width.saturating_sub(filled);
    format!("[{}{}]", "█".repeat(filled), "░".repeat(empty))
}

/// Put a list cursor on `target` (clamped to the list), scrolling the
/// window of `page` rows just enough to keep it visible.
pub(crate) fn scroll_to(index: &mut usize, scroll: &mut usize, target: usize, len: usize, page: usize) {
    let page = page.max(1);
    *index = target.min(len.saturating_sub(1));
    if *index < *scroll {
        *scroll = *index;
    } else if *index >= *scroll + page {
        *scroll = *index + 1 - page;
    }
}
