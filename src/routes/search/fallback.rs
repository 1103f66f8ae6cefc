use crate::models::SuggestionItem;

// (code, name, city, country)
const FALLBACK_AIRPORTS: &[(&str, &str, &str, &str)] = &[
    ("DAC", "Hazrat Shahjalal International Airport", "Dhaka", "Bangladesh"),
    ("DEL", "Indira Gandhi International Airport", "New Delhi", "India"),
    ("JFK", "John F Kennedy International Airport", "New York", "United States"),
    ("LHR", "London Heathrow Airport", "London", "United Kingdom"),
    ("CDG", "Charles de Gaulle Airport", "Paris", "France"),
    ("DXB", "Dubai International Airport", "Dubai", "United Arab Emirates"),
    ("LAX", "Los Angeles International Airport", "Los Angeles", "United States"),
    ("SIN", "Singapore Changi Airport", "Singapore", "Singapore"),
    ("BOM", "Chhatrapati Shivaji International Airport", "Mumbai", "India"),
    ("BKK", "Suvarnabhumi Airport", "Bangkok", "Thailand"),
];

/// 常用机场的本地匹配，命中时不需要令牌也不访问上游
pub fn match_fallback(keyword: &str) -> Vec<SuggestionItem> {
    let needle = keyword.to_lowercase();

    FALLBACK_AIRPORTS
        .iter()
        .filter(|(code, name, city, _)| {
            name.to_lowercase().contains(&needle)
                || code.to_lowercase().contains(&needle)
                || city.to_lowercase().contains(&needle)
        })
        .map(|(code, name, city, country)| SuggestionItem {
            id: code.to_string(),
            code: code.to_string(),
            display_name: name.to_string(),
            city_name: city.to_string(),
            country_name: country.to_string(),
            sub_type: Some("AIRPORT".into()),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn matches_code_city_and_name() {
        assert_eq!(match_fallback("jfk")[0].code, "JFK");
        assert_eq!(match_fallback("Dhaka")[0].code, "DAC");
        assert_eq!(match_fallback("heathrow")[0].code, "LHR");
    }

    #[test]
    fn shared_fragment_returns_every_match() {
        let codes: Vec<_> = match_fallback("de").into_iter().map(|a| a.code).collect();
        assert!(codes.contains(&"DEL".to_string()));
        assert!(codes.contains(&"CDG".to_string()));
    }

    #[test]
    fn unknown_keyword_has_no_match() {
        assert!(match_fallback("zz").is_empty());
    }
}
