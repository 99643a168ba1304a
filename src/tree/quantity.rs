use anyhow::{bail, Result};

/// Parse a Kubernetes CPU quantity into millicores.
/// Bare values are cores ("2" → 2000, "0.5" → 500), an `m` suffix is
/// millicores ("500m" → 500).
pub fn parse_cpu(s: &str) -> Result<f64> {
    let s = s.trim();
    if s.is_empty() {
        bail!("empty CPU quantity");
    }

    if let Some(number) = s.strip_suffix('m') {
        let millis: f64 = match number.parse() {
            Ok(v) => v,
            Err(_) => bail!("invalid CPU quantity '{}'", s),
        };
        return Ok(millis);
    }

    let cores: f64 = match s.parse() {
        Ok(v) => v,
        Err(_) => bail!("invalid CPU quantity '{}'", s),
    };
    Ok(cores * 1000.0)
}

// Binary suffixes must be checked before decimal ones: "Ki" ends in "i",
// not in "K".
const BINARY_SUFFIXES: [(&str, f64); 6] = [
    ("Ki", 1024.0),
    ("Mi", 1024.0 * 1024.0),
    ("Gi", 1024.0 * 1024.0 * 1024.0),
    ("Ti", 1024.0 * 1024.0 * 1024.0 * 1024.0),
    ("Pi", 1024.0 * 1024.0 * 1024.0 * 1024.0 * 1024.0),
    ("Ei", 1024.0 * 1024.0 * 1024.0 * 1024.0 * 1024.0 * 1024.0),
];

const DECIMAL_SUFFIXES: [(&str, f64); 6] = [
    ("K", 1e3),
    ("M", 1e6),
    ("G", 1e9),
    ("T", 1e12),
    ("P", 1e15),
    ("E", 1e18),
];

/// Parse a Kubernetes memory quantity into bytes.
/// Accepts binary suffixes (Ki/Mi/Gi/...), decimal suffixes (K/M/G/...),
/// and plain numbers including exponent notation ("129e6").
pub fn parse_memory(s: &str) -> Result<f64> {
    let s = s.trim();
    if s.is_empty() {
        bail!("empty memory quantity");
    }

    for (suffix, multiplier) in BINARY_SUFFIXES {
        if let Some(number) = s.strip_suffix(suffix) {
            return scaled(number, multiplier, s);
        }
    }

    for (suffix, multiplier) in DECIMAL_SUFFIXES {
        if let Some(number) = s.strip_suffix(suffix) {
            // "E" doubles as exponent notation; only treat it as exa when
            // the remainder is a complete number ("1.5E" yes, "12E3" never
            // strips, bare "E" falls through to the plain parse and errors).
            if suffix == "E" && number.parse::<f64>().is_err() {
                continue;
            }
            return scaled(number, multiplier, s);
        }
    }

    match s.parse::<f64>() {
        Ok(v) => Ok(v),
        Err(_) => bail!("invalid memory quantity '{}'", s),
    }
}

fn scaled(number: &str, multiplier: f64, original: &str) -> Result<f64> {
    let base: f64 = match number.parse() {
        Ok(v) => v,
        Err(_) => bail!("invalid memory quantity '{}'", original),
    };
    Ok(base * multiplier)
}
