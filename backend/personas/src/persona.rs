use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Deserializer, Serialize, Serializer};

use expertdesk_core::ConsultError;

use crate::prompts::{
    HEALTH_ADVISOR_PROMPT, PROGRAMMING_MENTOR_PROMPT, RECIPE_ADVISOR_PROMPT,
    TRAVEL_PLANNER_PROMPT,
};

/// Immutable description of one expert persona.
#[derive(Debug, PartialEq, Eq, Serialize)]
pub struct PersonaDescriptor {
    /// Canonical identifier shown to users.
    pub id: &'static str,
    /// ASCII alias accepted on the command line.
    pub slug: &'static str,
    pub icon: &'static str,
    pub system_prompt: &'static str,
    pub short_description: &'static str,
}

/// The closed set of expert personas, in presentation order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Persona {
    HealthAdvisor,
    RecipeAdvisor,
    ProgrammingMentor,
    TravelPlanner,
}

// Indexed by `Persona as usize`; order must match the enum.
pub(crate) static DESCRIPTORS: [PersonaDescriptor; 4] = [
    PersonaDescriptor {
        id: "健康アドバイザー",
        slug: "health",
        icon: "💊",
        system_prompt: HEALTH_ADVISOR_PROMPT,
        short_description: "健康管理、運動、栄養に関するアドバイスを提供",
    },
    PersonaDescriptor {
        id: "料理レシピアドバイザー",
        slug: "recipe",
        icon: "👨‍🍳",
        system_prompt: RECIPE_ADVISOR_PROMPT,
        short_description: "レシピ提案、調理のコツ、食材の活用法をアドバイス",
    },
    PersonaDescriptor {
        id: "プログラミングメンター",
        slug: "programming",
        icon: "💻",
        system_prompt: PROGRAMMING_MENTOR_PROMPT,
        short_description: "コーディング、デバッグ、技術的な問題解決をサポート",
    },
    PersonaDescriptor {
        id: "旅行プランナー",
        slug: "travel",
        icon: "✈️",
        system_prompt: TRAVEL_PLANNER_PROMPT,
        short_description: "旅行計画、観光スポット、グルメ情報を提案",
    },
];

impl Persona {
    pub const ALL: [Persona; 4] = [
        Persona::HealthAdvisor,
        Persona::RecipeAdvisor,
        Persona::ProgrammingMentor,
        Persona::TravelPlanner,
    ];

    pub fn descriptor(&self) -> &'static PersonaDescriptor {
        &DESCRIPTORS[*self as usize]
    }

    pub fn id(&self) -> &'static str {
        self.descriptor().id
    }

    pub fn slug(&self) -> &'static str {
        self.descriptor().slug
    }

    /// Returns the system prompt that conditions the model for this persona.
    pub fn system_prompt(&self) -> &'static str {
        self.descriptor().system_prompt
    }

    /// Hint shown in an empty input box.
    pub fn input_placeholder(&self) -> String {
        format!("{}に質問したい内容を具体的に入力してください...", self.id())
    }

    /// Status line shown while a request is in flight.
    pub fn working_message(&self) -> String {
        format!("{}が回答を準備中...", self.id())
    }
}

impl Persona {
    /// Exact match on the canonical id; slugs are not accepted.
    pub fn from_id(id: &str) -> Option<Persona> {
        Persona::ALL.into_iter().find(|p| p.id() == id)
    }
}

impl fmt::Display for Persona {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.id())
    }
}

impl FromStr for Persona {
    type Err = ConsultError;

    /// Front-end parsing: a canonical id, or a slug (case-insensitive).
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let needle = s.trim();
        Persona::ALL
            .into_iter()
            .find(|p| p.id() == needle || p.slug().eq_ignore_ascii_case(needle))
            .ok_or_else(|| ConsultError::UnknownPersona(needle.to_string()))
    }
}

impl Serialize for Persona {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.id())
    }
}

impl<'de> Deserialize<'de> for Persona {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        raw.parse().map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_descriptor_table_matches_enum_order() {
        for persona in Persona::ALL {
            let parsed: Persona = persona.id().parse().unwrap();
            assert_eq!(parsed, persona);
        }
    }

    #[test]
    fn test_slug_is_case_insensitive() {
        assert_eq!("Travel".parse::<Persona>().unwrap(), Persona::TravelPlanner);
        assert_eq!(" health ".parse::<Persona>().unwrap(), Persona::HealthAdvisor);
    }

    #[test]
    fn test_from_id_is_exact() {
        assert_eq!(Persona::from_id("旅行プランナー"), Some(Persona::TravelPlanner));
        assert_eq!(Persona::from_id("travel"), None);
        assert_eq!(Persona::from_id(" 旅行プランナー"), None);
    }

    #[test]
    fn test_unknown_persona() {
        let err = "弁護士".parse::<Persona>().unwrap_err();
        assert_eq!(err, ConsultError::UnknownPersona("弁護士".into()));
    }

    #[test]
    fn test_serde_uses_canonical_id() {
        let json = serde_json::to_string(&Persona::ProgrammingMentor).unwrap();
        assert_eq!(json, "\"プログラミングメンター\"");
        let back: Persona = serde_json::from_str("\"recipe\"").unwrap();
        assert_eq!(back, Persona::RecipeAdvisor);
        assert!(serde_json::from_str::<Persona>("\"chef\"").is_err());
    }

    #[test]
    fn test_presentation_texts() {
        let p = Persona::HealthAdvisor;
        assert!(p.input_placeholder().starts_with("健康アドバイザーに"));
        assert_eq!(p.working_message(), "健康アドバイザーが回答を準備中...");
    }
}
