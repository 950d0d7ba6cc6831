use super::character::{Accent, Character};

/// Personas shipped with the binary; used when no catalog file is configured.
pub fn builtin_characters() -> Vec<Character> {
    vec![
        Character {
            id: 1,
            name: "Miguel Santos".to_string(),
            avatar: "Miguel.png".to_string(),
            accent: Accent::Sky,
            age: Some(19),
            nationality: Some("Mexican".to_string()),
            location: Some("Los Angeles, USA".to_string()),
            occupation: Some("College Student".to_string()),
            family_background: Some(
                "Raised in a traditional Mexican family with three sisters. Parents run a small restaurant."
                    .to_string(),
            ),
            scenario: Some(
                "Carmen, Minguel's sister needs to study for an important exam, but parents insist she \
                 help clean after restaurant closing while Miguel is allowed to focus on his studies."
                    .to_string(),
            ),
        },
        Character {
            id: 2,
            name: "Sarah Chen-Williams".to_string(),
            avatar: "Sarah.svg".to_string(),
            accent: Accent::Rose,
            age: Some(35),
            nationality: Some("Chinese".to_string()),
            location: Some("San Francisco, USA".to_string()),
            occupation: Some("Software Engineer".to_string()),
            family_background: Some(
                "First-generation immigrant parents, married to an American husband, mother of two children."
                    .to_string(),
            ),
            scenario: Some(
                "Sarah is offered a promotion to Senior Engineering Manager, but it requires longer \
                 hours and occasional travel. Her parents criticize her for considering it, saying \
                 she's neglecting her children, while male colleagues with families are praised for \
                 career ambition."
                    .to_string(),
            ),
        },
        Character {
            id: 3,
            name: "Jun-ho Park".to_string(),
            avatar: "Junho.svg".to_string(),
            accent: Accent::Purple,
            age: Some(23),
            nationality: Some("South Korean".to_string()),
            location: Some("Seoul, South Korea".to_string()),
            occupation: Some("Graduate Student".to_string()),
            family_background: Some(
                "Upper-middle-class family with conservative values.".to_string(),
            ),
            scenario: Some(
                "His sister is currently working as a designer, and he witnesses familial pressure \
                 on her to marry early and prioritize family over career."
                    .to_string(),
            ),
        },
    ]
}
