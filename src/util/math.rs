// Decimal-safe arithmetic on f64.
// Scales operands by their decimal places so sums like 0.1 + 0.2 come out exact.

use super::format::number_to_string;

/// Number of digits after the decimal point in the rendered number.
fn decimal_places(n: f64) -> i32 {
    number_to_string(n)
        .split_once('.')
        .map_or(0, |(_, frac)| frac.len() as i32)
}

pub fn add(num1: f64, num2: f64) -> f64 {
    let m = 10f64.powi(decimal_places(num1).max(decimal_places(num2)));
    ((num1 * m).round() + (num2 * m).round()) / m
}

pub fn subtract(num1: f64, num2: f64) -> f64 {
    let places = decimal_places(num1).max(decimal_places(num2));
    let m = 10f64.powi(places);
    let raw = ((num1 * m).round() - (num2 * m).round()) / m;
    // Re-render at the operands' precision to drop binary noise.
    format!("{:.*}", places as usize, raw)
        .parse()
        .unwrap_or(raw)
}

pub fn multiply(num1: f64, num2: f64) -> f64 {
    let s1 = number_to_string(num1);
    let s2 = number_to_string(num2);
    let places = decimal_places(num1) + decimal_places(num2);
    let digits1: f64 = s1.replacen('.', "", 1).parse().unwrap_or(f64::NAN);
    let digits2: f64 = s2.replacen('.', "", 1).parse().unwrap_or(f64::NAN);
    digits1 * digits2 / 10f64.powi(places)
}
