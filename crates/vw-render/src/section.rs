//! Section kinds

use serde::Serialize;
use vw_model::LayerId;

/// What a rendered section shows, derived from its category id
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum SectionKind {
    /// Hymn number, addressee, group, strata, pada labels
    StanzaProperties,
    /// Text versions of the stanza
    Versions,
    /// Translations
    Translations,
    /// Metrical data per pada
    MetricalData,
    /// Morphological glossing per pada
    Glossing,
    /// Dictionary links per pada
    Dictionaries,
    /// Any other category
    Other,
}

impl SectionKind {
    /// Kind governed by a category id
    #[must_use]
    pub fn of(category: &LayerId) -> Self {
        match category.as_str() {
            "stanzaProperties_" => Self::StanzaProperties,
            "version_" => Self::Versions,
            "translation_" => Self::Translations,
            "metricaldata_" => Self::MetricalData,
            "glossing_" => Self::Glossing,
            "dictionaries_" => Self::Dictionaries,
            _ => Self::Other,
        }
    }

    /// Whether the section lists the stanza's padas
    #[inline]
    #[must_use]
    pub fn is_pada_based(self) -> bool {
        matches!(self, Self::MetricalData | Self::Glossing | Self::Dictionaries)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn kinds_from_category_ids() {
        assert_eq!(SectionKind::of(&"version_".into()), SectionKind::Versions);
        assert_eq!(SectionKind::of(&"glossing_".into()), SectionKind::Glossing);
        assert_eq!(SectionKind::of(&"commentary_".into()), SectionKind::Other);
        assert!(SectionKind::Dictionaries.is_pada_based());
        assert!(!SectionKind::Translations.is_pada_based());
    }
}
