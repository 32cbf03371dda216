//! Keyword triggers — decides which lookups a message asks for.
//!
//! Matching is on the lowercased message; city and subject extraction work
//! on the message as written.

use std::sync::LazyLock;

use regex::Regex;

const WEATHER_KEYWORDS: &[&str] = &["météo", "temps"];
const ENCYCLOPEDIA_KEYWORDS: &[&str] = &["qui est", "qui a"];
const JOKE_KEYWORDS: &[&str] = &["blague", "rigolo"];

static CITY_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)à\s+([a-zéèêàâ\s]+)").expect("city pattern is valid")
});

static SUBJECT_PREFIX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)^(qui est|qui a|c'est qui)").expect("subject pattern is valid")
});

/// Which lookups fire for a message. All three are independent.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Triggers {
    pub weather: bool,
    pub encyclopedia: bool,
    pub joke: bool,
}

impl Triggers {
    pub fn any(&self) -> bool {
        self.weather || self.encyclopedia || self.joke
    }
}

pub fn detect(message: &str) -> Triggers {
    let lower = message.to_lowercase();
    let has = |keywords: &[&str]| keywords.iter().any(|k| lower.contains(k));
    Triggers {
        weather: has(WEATHER_KEYWORDS),
        encyclopedia: has(ENCYCLOPEDIA_KEYWORDS),
        joke: has(JOKE_KEYWORDS),
    }
}

/// City named by an "à <city>" phrase, if any.
pub fn extract_city(message: &str) -> Option<String> {
    CITY_PATTERN
        .captures(message)
        .and_then(|c| c.get(1))
        .map(|m| m.as_str().trim().to_string())
        .filter(|city| !city.is_empty())
}

/// The message with a leading "qui est" / "qui a" / "c'est qui" removed.
pub fn extract_subject(message: &str) -> String {
    SUBJECT_PREFIX.replace(message, "").trim().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn weather_keywords_fire_case_insensitively() {
        assert!(detect("Quelle est la MÉTÉO ?").weather);
        assert!(detect("Quel temps fait-il").weather);
        assert!(!detect("Bonjour").weather);
    }

    #[test]
    fn triggers_are_independent() {
        let t = detect("Raconte une blague sur la météo, et qui est Molière");
        assert_eq!(t, Triggers { weather: true, encyclopedia: true, joke: true });
        assert!(t.any());
        assert!(!detect("salut").any());
    }

    #[test]
    fn joke_keywords() {
        assert!(detect("un truc rigolo").joke);
        assert!(detect("Une BLAGUE stp").joke);
    }

    #[test]
    fn city_follows_a() {
        assert_eq!(extract_city("Quelle est la météo à Lyon").as_deref(), Some("Lyon"));
        assert_eq!(extract_city("météo à Saint Étienne?").as_deref(), Some("Saint Étienne"));
        assert_eq!(extract_city("il fait quel temps à  Brest  ").as_deref(), Some("Brest"));
    }

    #[test]
    fn no_city_phrase() {
        assert_eq!(extract_city("Quelle est la météo"), None);
        assert_eq!(extract_city("météo à 42"), None);
    }

    #[test]
    fn subject_strips_leading_trigger() {
        assert_eq!(extract_subject("Qui est Marie Curie"), "Marie Curie");
        assert_eq!(extract_subject("qui a Inventé le vaccin"), "Inventé le vaccin");
        assert_eq!(extract_subject("C'est qui Zidane"), "Zidane");
    }

    #[test]
    fn subject_without_leading_trigger_is_whole_message() {
        assert_eq!(
            extract_subject("  Dis-moi qui est Napoléon  "),
            "Dis-moi qui est Napoléon"
        );
    }
}
