use lazy_static::lazy_static;
use regex::Regex;

// Parse amount and symbol from converter input ("100.5 BTC")
pub fn parse_amount_and_symbol(input: &str) -> Option<(f64, &str)> {
    lazy_static! {
        static ref RE: Regex = Regex::new(r"^(\d+(?:\.\d+)?)\s+([A-Za-z]+)$").unwrap();
    }

    RE.captures(input.trim()).and_then(|cap| {
        let amount_str = cap.get(1)?.as_str();
        let symbol = cap.get(2)?.as_str();

        amount_str
            .parse::<f64>()
            .ok()
            .map(|amount| (amount, symbol))
    })
}

// Format a price with precision suited to its magnitude
pub fn format_price(price: f64) -> String {
    if price >= 1.0 {
        format!("${:.2}", price)
    } else {
        format!("${:.8}", price)
    }
}

// Compact formatting for market caps and volumes
pub fn format_compact(value: f64) -> String {
    let abs = value.abs();
    let (scaled, suffix) = if abs >= 1e12 {
        (value / 1e12, "T")
    } else if abs >= 1e9 {
        (value / 1e9, "B")
    } else if abs >= 1e6 {
        (value / 1e6, "M")
    } else if abs >= 1e3 {
        (value / 1e3, "K")
    } else {
        (value, "")
    };
    format!("${:.2}{}", scaled, suffix)
}

// Signed percent formatting for change columns
pub fn format_percent(change: f64) -> String {
    format!("{:+.2}%", change)
}
