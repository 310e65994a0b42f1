use std::fmt;

use serde::{Serialize, Serializer};

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum AssistantKind {
    JApprends,
    Recherche,
    Accueil,
    Autre,
}

impl AssistantKind {
    pub fn label(&self) -> &'static str {
        match self {
            AssistantKind::JApprends => "J'Apprends",
            AssistantKind::Recherche => "Recherche",
            AssistantKind::Accueil => "Accueil",
            AssistantKind::Autre => "Autre",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum SubjectTheme {
    Mathematiques,
    Francais,
    Sciences,
    Histoire,
    Anglais,
    Autre,
}

impl SubjectTheme {
    pub const ALL: [SubjectTheme; 6] = [
        SubjectTheme::Mathematiques,
        SubjectTheme::Francais,
        SubjectTheme::Sciences,
        SubjectTheme::Histoire,
        SubjectTheme::Anglais,
        SubjectTheme::Autre,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            SubjectTheme::Mathematiques => "Mathématiques",
            SubjectTheme::Francais => "Français",
            SubjectTheme::Sciences => "Sciences",
            SubjectTheme::Histoire => "Histoire",
            SubjectTheme::Anglais => "Anglais",
            SubjectTheme::Autre => "Autre",
        }
    }
}

macro_rules! label_impls {
    ($($ty:ty),*) => {
        $(
            impl fmt::Display for $ty {
                fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                    f.write_str(self.label())
                }
            }

            impl Serialize for $ty {
                fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
                    serializer.serialize_str(self.label())
                }
            }
        )*
    };
}

label_impls!(AssistantKind, SubjectTheme);

// Ordered: the first keyword found in the text decides.
const ASSISTANT_KEYWORDS: &[(&str, AssistantKind)] = &[
    ("j'apprends", AssistantKind::JApprends),
    ("apprend", AssistantKind::JApprends),
    ("exercice", AssistantKind::JApprends),
    ("leçon", AssistantKind::JApprends),
    ("quiz", AssistantKind::JApprends),
    ("recherche", AssistantKind::Recherche),
    ("exposé", AssistantKind::Recherche),
    ("enquête", AssistantKind::Recherche),
    ("accueil", AssistantKind::Accueil),
    ("bienvenue", AssistantKind::Accueil),
    ("discussion", AssistantKind::Accueil),
];

const SUBJECT_KEYWORDS: &[(&str, SubjectTheme)] = &[
    ("math", SubjectTheme::Mathematiques),
    ("calcul", SubjectTheme::Mathematiques),
    ("géométrie", SubjectTheme::Mathematiques),
    ("fraction", SubjectTheme::Mathematiques),
    ("français", SubjectTheme::Francais),
    ("francais", SubjectTheme::Francais),
    ("grammaire", SubjectTheme::Francais),
    ("orthographe", SubjectTheme::Francais),
    ("conjugaison", SubjectTheme::Francais),
    ("lecture", SubjectTheme::Francais),
    ("science", SubjectTheme::Sciences),
    ("physique", SubjectTheme::Sciences),
    ("chimie", SubjectTheme::Sciences),
    ("biologie", SubjectTheme::Sciences),
    ("svt", SubjectTheme::Sciences),
    ("histoire", SubjectTheme::Histoire),
    ("géographie", SubjectTheme::Histoire),
    ("anglais", SubjectTheme::Anglais),
    ("english", SubjectTheme::Anglais),
];

fn first_match<T: Copy>(text: &str, table: &[(&str, T)], fallback: T) -> T {
    let haystack = text.to_lowercase();
    table
        .iter()
        .find(|(keyword, _)| haystack.contains(keyword))
        .map(|(_, kind)| *kind)
        .unwrap_or(fallback)
}

pub fn classify_assistant(text: &str) -> AssistantKind {
    first_match(text, ASSISTANT_KEYWORDS, AssistantKind::Autre)
}

pub fn classify_subject(text: &str) -> SubjectTheme {
    first_match(text, SUBJECT_KEYWORDS, SubjectTheme::Autre)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_classify_assistant_case_insensitive() {
        assert_eq!(classify_assistant("Session J'APPRENDS du soir"), AssistantKind::JApprends);
        assert_eq!(classify_assistant("Petite RECHERCHE sur les volcans"), AssistantKind::Recherche);
        assert_eq!(classify_assistant("Accueil"), AssistantKind::Accueil);
    }

    #[test]
    fn test_classify_assistant_first_keyword_wins() {
        // "exercice" is listed before "recherche".
        assert_eq!(classify_assistant("Recherche puis exercice"), AssistantKind::JApprends);
    }

    #[test]
    fn test_classify_assistant_fallback() {
        assert_eq!(classify_assistant("Dessin libre"), AssistantKind::Autre);
        assert_eq!(classify_assistant(""), AssistantKind::Autre);
    }

    #[test]
    fn test_classify_subject() {
        assert_eq!(classify_subject("Mathématiques"), SubjectTheme::Mathematiques);
        assert_eq!(classify_subject("GRAMMAIRE"), SubjectTheme::Francais);
        assert_eq!(classify_subject("Français"), SubjectTheme::Francais);
        assert_eq!(classify_subject("SVT"), SubjectTheme::Sciences);
        assert_eq!(classify_subject("Histoire-Géographie"), SubjectTheme::Histoire);
        assert_eq!(classify_subject("English club"), SubjectTheme::Anglais);
        assert_eq!(classify_subject("Musique"), SubjectTheme::Autre);
    }

    #[test]
    fn test_classify_subject_priority() {
        assert_eq!(classify_subject("Histoire des mathématiques"), SubjectTheme::Mathematiques);
    }

    #[test]
    fn test_labels_serialize() {
        assert_eq!(serde_json::to_string(&AssistantKind::JApprends).unwrap(), "\"J'Apprends\"");
        assert_eq!(SubjectTheme::Francais.to_string(), "Français");
    }
}
