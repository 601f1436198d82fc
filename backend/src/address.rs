//! Best-effort city extraction from free-form postal addresses of the
//! shape `"<street>, <postal code> <city...>"`.

/// Pull the city name out of an address string. Returns an empty string
/// whenever the shape does not match; this is a heuristic, not a parse.
pub fn extract_city(address: &str) -> String {
    if address.is_empty() {
        return String::new();
    }
    let parts: Vec<&str> = address.split(',').collect();
    if parts.len() < 2 {
        return String::new();
    }
    let last = parts[parts.len() - 1].trim();
    let words: Vec<&str> = last.split_whitespace().collect();
    if words.len() >= 2 {
        // First word is the postal code, the rest is the city.
        words[1..].join(" ")
    } else {
        String::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn city_after_postal_code() {
        assert_eq!(extract_city("Stadionová 1, 10000 Praha"), "Praha");
    }

    #[test]
    fn multi_word_city() {
        assert_eq!(
            extract_city("U Stadionu 3, 29301 Mladá Boleslav"),
            "Mladá Boleslav"
        );
    }

    #[test]
    fn missing_postal_code_yields_empty() {
        assert_eq!(extract_city("Stadionová 1, Praha"), "");
    }

    #[test]
    fn no_comma_yields_empty() {
        assert_eq!(extract_city("Stadionová 1 Praha"), "");
    }

    #[test]
    fn empty_input_yields_empty() {
        assert_eq!(extract_city(""), "");
    }
}
