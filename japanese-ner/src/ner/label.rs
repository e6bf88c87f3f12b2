//! Closed entity label vocabulary.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::NerError;

/// Types of entities the Japanese NER model can emit.
///
/// The "no entity" tag (`O`) has no variant: it is never surfaced to callers.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum EntityLabel {
    /// Person names (e.g., "田中太郎")
    #[serde(rename = "person")]
    Person,
    /// General corporations and organizations
    #[serde(rename = "organization-general")]
    Organization,
    /// Political organizations
    #[serde(rename = "organization-political")]
    PoliticalOrganization,
    /// Other organizations
    #[serde(rename = "organization-other")]
    OtherOrganization,
    /// Locations and place names (e.g., "東京")
    #[serde(rename = "location")]
    Location,
    /// Institutions and facilities
    #[serde(rename = "institution")]
    Institution,
    /// Products
    #[serde(rename = "product")]
    Product,
    /// Events
    #[serde(rename = "event")]
    Event,
}

/// Outcome of parsing a raw model tag.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParsedTag {
    /// A tag inside the vocabulary
    Entity(EntityLabel),
    /// The "outside" tag; not an entity
    Outside,
}

impl EntityLabel {
    /// Every label, in declaration order.
    pub const ALL: [EntityLabel; 8] = [
        EntityLabel::Person,
        EntityLabel::Organization,
        EntityLabel::PoliticalOrganization,
        EntityLabel::OtherOrganization,
        EntityLabel::Location,
        EntityLabel::Institution,
        EntityLabel::Product,
        EntityLabel::Event,
    ];

    /// Canonical name used in APIs and serialized output.
    pub fn as_str(&self) -> &'static str {
        match self {
            EntityLabel::Person => "person",
            EntityLabel::Organization => "organization-general",
            EntityLabel::PoliticalOrganization => "organization-political",
            EntityLabel::OtherOrganization => "organization-other",
            EntityLabel::Location => "location",
            EntityLabel::Institution => "institution",
            EntityLabel::Product => "product",
            EntityLabel::Event => "event",
        }
    }

    /// Tag as emitted by the token-classification model.
    pub fn tag(&self) -> &'static str {
        match self {
            EntityLabel::Person => "PER",
            EntityLabel::Organization => "ORG",
            EntityLabel::PoliticalOrganization => "ORG-P",
            EntityLabel::OtherOrganization => "ORG-O",
            EntityLabel::Location => "LOC",
            EntityLabel::Institution => "INS",
            EntityLabel::Product => "PRD",
            EntityLabel::Event => "EVT",
        }
    }

    /// Japanese description used in reports.
    pub fn description(&self) -> &'static str {
        match self {
            EntityLabel::Person => "人名",
            EntityLabel::Organization => "一般企業・組織",
            EntityLabel::PoliticalOrganization => "政治組織",
            EntityLabel::OtherOrganization => "その他の組織",
            EntityLabel::Location => "場所・地名",
            EntityLabel::Institution => "施設・機関",
            EntityLabel::Product => "製品",
            EntityLabel::Event => "イベント",
        }
    }

    pub fn english_description(&self) -> &'static str {
        match self {
            EntityLabel::Person => "person",
            EntityLabel::Organization => "general corporation organization",
            EntityLabel::PoliticalOrganization => "political organization",
            EntityLabel::OtherOrganization => "other organization",
            EntityLabel::Location => "location",
            EntityLabel::Institution => "institution, facility",
            EntityLabel::Product => "product",
            EntityLabel::Event => "event",
        }
    }

    /// Parse a raw model tag.
    ///
    /// Accepts model tags (`PER`, `ORG-P`, ...), BIO-prefixed tags (`B-LOC`),
    /// the short alias `P` for political organizations and canonical names.
    /// Matching is case-insensitive.
    pub fn parse_tag(raw: &str) -> Result<ParsedTag, NerError> {
        let trimmed = raw.trim();
        let upper = trimmed.to_uppercase();
        let tag = upper
            .strip_prefix("B-")
            .or_else(|| upper.strip_prefix("I-"))
            .unwrap_or(&upper);

        let label = match tag {
            "O" => return Ok(ParsedTag::Outside),
            "PER" | "PERSON" => EntityLabel::Person,
            "ORG" | "ORGANIZATION-GENERAL" => EntityLabel::Organization,
            "ORG-P" | "P" | "ORGANIZATION-POLITICAL" => EntityLabel::PoliticalOrganization,
            "ORG-O" | "ORGANIZATION-OTHER" => EntityLabel::OtherOrganization,
            "LOC" | "LOCATION" => EntityLabel::Location,
            "INS" | "INSTITUTION" => EntityLabel::Institution,
            "PRD" | "PRODUCT" => EntityLabel::Product,
            "EVT" | "EVENT" => EntityLabel::Event,
            _ => return Err(NerError::UnsupportedLabel(trimmed.to_string())),
        };

        Ok(ParsedTag::Entity(label))
    }
}

impl fmt::Display for EntityLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for EntityLabel {
    type Err = NerError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match EntityLabel::parse_tag(s)? {
            ParsedTag::Entity(label) => Ok(label),
            ParsedTag::Outside => Err(NerError::UnsupportedLabel(s.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_model_tags() {
        assert_eq!(
            EntityLabel::parse_tag("PER").unwrap(),
            ParsedTag::Entity(EntityLabel::Person)
        );
        assert_eq!(
            EntityLabel::parse_tag("ORG-P").unwrap(),
            ParsedTag::Entity(EntityLabel::PoliticalOrganization)
        );
        assert_eq!(
            EntityLabel::parse_tag("P").unwrap(),
            ParsedTag::Entity(EntityLabel::PoliticalOrganization)
        );
        assert_eq!(
            EntityLabel::parse_tag("b-loc").unwrap(),
            ParsedTag::Entity(EntityLabel::Location)
        );
        assert_eq!(EntityLabel::parse_tag("O").unwrap(), ParsedTag::Outside);
    }

    #[test]
    fn test_parse_canonical_names() {
        for label in EntityLabel::ALL {
            assert_eq!(label.as_str().parse::<EntityLabel>().unwrap(), label);
            assert_eq!(label.tag().parse::<EntityLabel>().unwrap(), label);
        }
    }

    #[test]
    fn test_unknown_tag_is_rejected() {
        let err = EntityLabel::parse_tag("DATE").unwrap_err();
        assert!(matches!(err, NerError::UnsupportedLabel(ref s) if s == "DATE"));
        assert!("O".parse::<EntityLabel>().is_err());
    }

    #[test]
    fn test_serde_uses_canonical_names() {
        let json = serde_json::to_string(&EntityLabel::PoliticalOrganization).unwrap();
        assert_eq!(json, "\"organization-political\"");
    }

    #[test]
    fn test_every_label_has_descriptions() {
        for label in EntityLabel::ALL {
            assert!(!label.description().is_empty());
            assert!(!label.english_description().is_empty());
        }
    }
}
