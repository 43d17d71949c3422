//! Section identifiers and the registry of panels discovered on the page

use derive_more::{Display, From};

/// Default landing section id
pub const DEFAULT_LANDING_SECTION: &str = "home";

/// A section key, equal to the id of its panel element.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Display, From)]
pub struct SectionId(String);

impl SectionId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl AsRef<str> for SectionId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl From<&str> for SectionId {
    fn from(id: &str) -> Self {
        Self(id.to_string())
    }
}

impl PartialEq<str> for SectionId {
    fn eq(&self, other: &str) -> bool {
        self.0 == other
    }
}

impl PartialEq<&str> for SectionId {
    fn eq(&self, other: &&str) -> bool {
        self.0 == *other
    }
}

/// All sections of the page, plus which one is the landing section.
///
/// The landing section is always registered, even if no panel with that
/// id was found, so there is always a fallback target.
#[derive(Debug, Clone)]
pub struct SectionRegistry {
    sections: Vec<SectionId>,
    landing: SectionId,
}

impl SectionRegistry {
    pub fn new<I, S>(sections: I, landing: impl Into<SectionId>) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<SectionId>,
    {
        let landing = landing.into();
        let mut ids: Vec<SectionId> = Vec::new();
        for id in sections.into_iter().map(Into::into) {
            if !id.as_str().is_empty() && !ids.contains(&id) {
                ids.push(id);
            }
        }
        if !ids.contains(&landing) {
            ids.insert(0, landing.clone());
        }
        Self {
            sections: ids,
            landing,
        }
    }

    pub fn get(&self, id: &str) -> Option<&SectionId> {
        self.sections.iter().find(|s| s.as_str() == id)
    }

    pub fn contains(&self, id: &str) -> bool {
        self.get(id).is_some()
    }

    pub fn landing(&self) -> &SectionId {
        &self.landing
    }

    pub fn is_landing(&self, id: &SectionId) -> bool {
        *id == self.landing
    }

    pub fn iter(&self) -> impl Iterator<Item = &SectionId> {
        self.sections.iter()
    }
}

/// Extract a section key from a `location.hash` value.
///
/// Returns `None` for an empty fragment (`""` or `"#"`).
pub fn fragment_section(hash: &str) -> Option<&str> {
    let key = hash.strip_prefix('#').unwrap_or(hash);
    (!key.is_empty()).then_some(key)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_registry_inserts_landing() {
        let registry = SectionRegistry::new(["services", "contact"], "home");
        assert_eq!(registry.iter().count(), 3);
        assert!(registry.contains("home"));
        assert_eq!(registry.landing(), &SectionId::from("home"));
    }

    #[test]
    fn test_registry_skips_duplicates_and_blank_ids() {
        let registry = SectionRegistry::new(["home", "about", "about", ""], "home");
        let ids: Vec<&str> = registry.iter().map(SectionId::as_str).collect();
        assert_eq!(ids, vec!["home", "about"]);
    }

    #[test]
    fn test_registry_lookup() {
        let registry = SectionRegistry::new(["home", "pricing"], "home");
        assert!(registry.get("pricing").is_some());
        assert!(registry.get("blog").is_none());
        assert!(registry.is_landing(&SectionId::from("home")));
        assert!(!registry.is_landing(&SectionId::from("pricing")));
    }

    #[test]
    fn test_fragment_section() {
        assert_eq!(fragment_section("#contact"), Some("contact"));
        assert_eq!(fragment_section("contact"), Some("contact"));
        assert_eq!(fragment_section("#"), None);
        assert_eq!(fragment_section(""), None);
    }

    #[test]
    fn test_section_id_display() {
        let id = SectionId::new("about");
        assert_eq!(id.to_string(), "about");
        assert_eq!(id, "about");
    }
}
