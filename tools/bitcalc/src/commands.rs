//! One-shot conversion commands

use colored::{ColoredString, Colorize};
use voltage_bits::{
    format_decimal, from_binary_string, is_binary_string, parse_decimal, sign_bit,
    to_binary_string, Ieee754Fields, Precision, Result,
};

/// Decimal text to binary string
pub fn to_binary(input: &str) -> Result<String> {
    parse_decimal(input).map(to_binary_string)
}

/// Binary string to decimal text
pub fn to_decimal(input: &str, precision: Precision) -> Result<String> {
    from_binary_string(input.trim()).map(|value| format_decimal(value, precision))
}

/// Read input as a binary string when it looks like one, else as a decimal
pub fn read_value(input: &str) -> Result<f64> {
    let trimmed = input.trim();
    if is_binary_string(trimmed) {
        from_binary_string(trimmed)
    } else {
        parse_decimal(trimmed)
    }
}

/// Sign bit of a binary string, or of a decimal after conversion
pub fn sign(input: &str) -> Result<String> {
    let trimmed = input.trim();
    if is_binary_string(trimmed) {
        return Ok(sign_bit(trimmed).to_string());
    }
    let binary = to_binary_string(parse_decimal(trimmed)?);
    Ok(sign_bit(&binary).to_string())
}

/// Label padded to the value column; padding is applied before colouring
fn label(name: &str) -> ColoredString {
    format!("{:<10}", name).bright_cyan()
}

/// Field breakdown of a binary string or decimal
pub fn inspect(input: &str) -> Result<String> {
    let value = read_value(input)?;
    let fields = Ieee754Fields::from_f64(value);
    let unbiased = fields
        .unbiased_exponent()
        .map_or_else(|| "n/a".to_string(), |e| e.to_string());

    let lines = [
        format!("{} {}", label("value:"), format_decimal(value, Precision::Shortest)),
        format!("{} {}", label("binary:"), to_binary_string(value)),
        format!("{} {}", label("fields:"), fields),
        format!("{} {}", label("sign:"), fields.sign),
        format!(
            "{} {} (unbiased {})",
            label("exponent:"),
            fields.exponent,
            unbiased
        ),
        format!("{} {:#015x}", label("mantissa:"), fields.mantissa),
        format!("{} {}", label("class:"), fields.class()),
    ];
    Ok(lines.join("\n"))
}
