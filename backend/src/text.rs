//! Query text normalization: diacritics stripping and expansion of the
//! common club-type abbreviations.

use unicode_normalization::char::is_combining_mark;
use unicode_normalization::UnicodeNormalization;

/// Decompose to NFD and drop combining marks, reducing accented Latin
/// text to its plain-ASCII skeleton. Pure and idempotent.
pub fn strip_diacritics(s: &str) -> String {
    s.nfd().filter(|c| !is_combining_mark(*c)).collect()
}

/// Lower-case a query and expand a club-type abbreviation in its first
/// token. Unrecognized tokens pass through unchanged.
pub fn normalize_query(q: &str) -> String {
    let s = q.trim();
    if s.is_empty() {
        return String::new();
    }

    let lower = s.to_lowercase();
    let mut parts: Vec<&str> = lower.split_whitespace().collect();
    if parts.is_empty() {
        return String::new();
    }

    parts[0] = match parts[0] {
        "fk" => "fotbalový klub",
        "tj" => "tělovýchovná jednota",
        "sk" => "sportovní klub",
        other => other,
    };

    parts.join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn plain_text_is_untouched() {
        assert_eq!(strip_diacritics("Hranice"), "Hranice");
    }

    #[test]
    fn czech_accents_are_stripped() {
        assert_eq!(strip_diacritics("Příbram"), "Pribram");
        assert_eq!(strip_diacritics("Plzeň"), "Plzen");
        assert_eq!(strip_diacritics("České Budějovice"), "Ceske Budejovice");
    }

    #[test]
    fn stripping_is_idempotent() {
        let once = strip_diacritics("tělovýchovná jednota");
        assert_eq!(strip_diacritics(&once), once);
    }

    #[test]
    fn known_abbreviations_expand() {
        assert_eq!(normalize_query("FK Jablonec"), "fotbalový klub jablonec");
        assert_eq!(normalize_query("TJ Krnov"), "tělovýchovná jednota krnov");
        assert_eq!(normalize_query("SK Hranice"), "sportovní klub hranice");
    }

    #[test]
    fn unknown_first_token_passes_through() {
        assert_eq!(normalize_query("AC Sparta Praha"), "ac sparta praha");
    }

    #[test]
    fn blank_query_normalizes_to_empty() {
        assert_eq!(normalize_query("   "), "");
    }
}
