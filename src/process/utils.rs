/// Trim whitespace + strip outer quotes if present.
pub fn clean_str(raw: &str) -> &str {
    let trimmed = raw.trim();
    if trimmed.len() >= 2 && trimmed.starts_with('"') && trimmed.ends_with('"') {
        trimmed[1..trimmed.len() - 1].trim()
    } else {
        trimmed
    }
}

/// Integer coercion; empty or malformed input becomes `None`.
/// Accepts integral floats such as `"2020.0"`.
pub fn parse_int(raw: &str) -> Option<i32> {
    let s = clean_str(raw);
    if s.is_empty() {
        return None;
    }
    if let Ok(v) = s.parse::<i32>() {
        return Some(v);
    }
    let f = s.parse::<f64>().ok()?;
    if f.fract() == 0.0 && f >= i32::MIN as f64 && f <= i32::MAX as f64 {
        Some(f as i32)
    } else {
        None
    }
}

/// Float coercion; empty, malformed and non-finite input becomes `None`.
pub fn parse_float(raw: &str) -> Option<f64> {
    let s = clean_str(raw);
    if s.is_empty() {
        return None;
    }
    s.parse::<f64>().ok().filter(|v| v.is_finite())
}

/// Empty text becomes `None`.
pub fn non_empty(raw: &str) -> Option<String> {
    let s = clean_str(raw);
    if s.is_empty() {
        None
    } else {
        Some(s.to_string())
    }
}
