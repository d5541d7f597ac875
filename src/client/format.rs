//! Display formatting for inventory cards. German conventions: `.` groups
//! thousands, `,` separates decimals.

pub const MISSING: &str = "—";

/// Up to three decimals, trailing zeros dropped.
pub fn group_thousands(value: f64) -> String {
	let rounded = (value * 1000.0).round() / 1000.0;
	let abs = rounded.abs();
	let int = abs.trunc() as u64;
	let frac = ((abs - abs.trunc()) * 1000.0).round() as u64;

	let digits = int.to_string();
	let mut out = String::with_capacity(digits.len() + digits.len() / 3 + 5);
	if rounded < 0.0 {
		out.push('-');
	}
	for (i, ch) in digits.chars().enumerate() {
		if i > 0 && (digits.len() - i) % 3 == 0 {
			out.push('.');
		}
		out.push(ch);
	}
	if frac > 0 && frac < 1000 {
		out.push(',');
		out.push_str(format!("{frac:03}").trim_end_matches('0'));
	}
	out
}

pub fn format_km(km: Option<i64>) -> String {
	match km {
		Some(km) => format!("{} km", group_thousands(km as f64)),
		None => MISSING.to_string(),
	}
}

pub fn format_price(price: Option<f64>) -> String {
	match price {
		Some(price) if price.is_finite() => format!("{} €", group_thousands(price)),
		_ => MISSING.to_string(),
	}
}

/// The text itself, or the placeholder when absent or blank.
pub fn or_missing(text: Option<&str>) -> String {
	match text.map(str::trim) {
		Some(t) if !t.is_empty() => t.to_string(),
		_ => MISSING.to_string(),
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn test_group_thousands() {
		assert_eq!(group_thousands(0.0), "0");
		assert_eq!(group_thousands(999.0), "999");
		assert_eq!(group_thousands(1000.0), "1.000");
		assert_eq!(group_thousands(125_000.0), "125.000");
		assert_eq!(group_thousands(1_234_567.0), "1.234.567");
		assert_eq!(group_thousands(12_900.5), "12.900,5");
		assert_eq!(group_thousands(-1500.0), "-1.500");
		assert_eq!(group_thousands(0.1234), "0,123");
	}

	#[test]
	fn test_km_and_price() {
		assert_eq!(format_km(Some(98_500)), "98.500 km");
		assert_eq!(format_km(Some(0)), "0 km");
		assert_eq!(format_km(None), "—");
		assert_eq!(format_price(Some(18_990.0)), "18.990 €");
		assert_eq!(format_price(None), "—");
		assert_eq!(format_price(Some(f64::NAN)), "—");
	}

	#[test]
	fn test_or_missing() {
		assert_eq!(or_missing(Some("Diesel")), "Diesel");
		assert_eq!(or_missing(Some("  ")), "—");
		assert_eq!(or_missing(None), "—");
	}
}
