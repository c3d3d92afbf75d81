//! Text helpers shared by the extraction code.
//!
//! Label text scraped from the auction site drifts in casing, accenting and
//! spacing ("Tipo de imóvel:", "TIPO DE IMÓVEL :"), so all label matching
//! goes through [`normalize`] on both sides.

/// Lowercase, accent-fold, collapse whitespace runs and trim.
///
/// Total function: any input yields a valid (possibly empty) string.
pub fn normalize(input: &str) -> String {
    let lowered = input.to_lowercase();
    let folded: String = lowered.chars().map(fold_accent).collect();
    folded.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Map the Portuguese accented repertoire onto plain ASCII.
fn fold_accent(c: char) -> char {
    match c {
        'á' | 'à' | 'â' | 'ã' | 'ä' | 'ª' => 'a',
        'é' | 'è' | 'ê' | 'ë' => 'e',
        'í' | 'ì' | 'î' | 'ï' => 'i',
        'ó' | 'ò' | 'ô' | 'õ' | 'ö' | 'º' | '°' => 'o',
        'ú' | 'ù' | 'û' | 'ü' => 'u',
        'ç' => 'c',
        'ñ' => 'n',
        _ => c,
    }
}

/// Parse a Brazilian-locale currency string ("1.234,56") into a number.
///
/// Returns `None` for anything that does not reduce to a single number.
pub fn parse_brl(input: &str) -> Option<f64> {
    let cleaned: String = input
        .chars()
        .filter(|c| c.is_ascii_digit() || *c == '.' || *c == ',')
        .collect();
    if !cleaned.chars().any(|c| c.is_ascii_digit()) {
        return None;
    }
    cleaned.replace('.', "").replace(',', ".").parse().ok()
}

/// Discount of `minimum` relative to `appraisal`, rendered as "20,00%".
///
/// Empty when the appraisal is missing or non-positive; never divides by zero.
/// Negative discounts (minimum above appraisal) clamp to "0,00%".
pub fn format_discount(appraisal: f64, minimum: f64) -> String {
    if appraisal <= 0.0 {
        return String::new();
    }
    let pct = ((appraisal - minimum) / appraisal * 100.0).max(0.0);
    format!("{:.2}%", pct).replace('.', ",")
}

/// Flatten a value for one spreadsheet cell: newlines become spaces,
/// whitespace runs collapse to one space, ends trimmed.
pub fn sanitize_cell(input: &str) -> String {
    input.split_whitespace().collect::<Vec<_>>().join(" ")
}
