//! Seed data loaded into the in-memory repositories at startup.

use chrono::{NaiveDate, NaiveDateTime};

use crate::domain::activity::{parse_activity_date, ActivityRecord, Difficulty};
use crate::domain::child::Child;
use crate::domain::notification::Notification;
use crate::domain::subscription::{Abonnement, BillingDuration, CataloguePlan, PlanPrice, User};

pub const PARENT_ID: i64 = 1;

fn at(value: &str) -> NaiveDateTime {
    parse_activity_date(value).unwrap_or_default()
}

pub fn users() -> Vec<User> {
    vec![
        User {
            id: PARENT_ID,
            first_name: "Claire".to_string(),
            last_name: "Martin".to_string(),
            email: "claire.martin@example.com".to_string(),
        },
        User {
            id: 2,
            first_name: "Karim".to_string(),
            last_name: "Benali".to_string(),
            email: "karim.benali@example.com".to_string(),
        },
    ]
}

pub fn children() -> Vec<Child> {
    vec![
        Child {
            id: 1,
            parent_id: PARENT_ID,
            first_name: "Léa".to_string(),
            last_name: "Martin".to_string(),
            age: 9,
            grade: "CM1".to_string(),
            avatar_url: None,
        },
        Child {
            id: 2,
            parent_id: PARENT_ID,
            first_name: "Hugo".to_string(),
            last_name: "Martin".to_string(),
            age: 12,
            grade: "5ème".to_string(),
            avatar_url: Some("https://example.com/avatars/hugo.png".to_string()),
        },
        Child {
            id: 3,
            parent_id: 2,
            first_name: "Yasmine".to_string(),
            last_name: "Benali".to_string(),
            age: 8,
            grade: "CE2".to_string(),
            avatar_url: None,
        },
    ]
}

pub fn activities() -> Vec<ActivityRecord> {
    vec![
        ActivityRecord::new(1, 1, at("2024-03-01T17:10:00"), "Exercices de fractions")
            .with_assistant("J'Apprends")
            .with_matiere("Mathématiques")
            .with_difficulty(Difficulty::Moyen)
            .with_duration(25)
            .with_score(72),
        ActivityRecord::new(2, 1, at("2024-03-02T10:00:00"), "Recherche sur les volcans")
            .with_assistant("Recherche")
            .with_matiere("Sciences")
            .with_duration(40),
        ActivityRecord::new(3, 1, at("2024-03-04T18:30:00"), "Dictée de mots")
            .with_assistant("J'Apprends")
            .with_matiere("Français")
            .with_difficulty(Difficulty::Facile)
            .with_duration(15)
            .with_score(90)
            .with_comments("Très bonne concentration"),
        ActivityRecord::new(4, 1, at("2024-03-05T16:45:00"), "Discussion d'accueil")
            .with_assistant("Accueil")
            .with_duration(5),
        ActivityRecord::new(5, 1, at("2024-03-07T17:00:00"), "Leçon de géométrie")
            .with_assistant("J'Apprends")
            .with_matiere("Mathématiques")
            .with_difficulty(Difficulty::Difficile)
            .with_duration(30)
            .with_score(55),
        ActivityRecord::new(6, 1, at("2024-03-09T11:20:00"), "Exposé sur les châteaux forts")
            .with_assistant("Recherche")
            .with_matiere("Histoire")
            .with_difficulty(Difficulty::Moyen)
            .with_duration(45)
            .with_score(80),
        ActivityRecord::new(7, 1, at("2024-03-12T17:40:00"), "Quiz de vocabulaire anglais")
            .with_assistant("J'Apprends")
            .with_matiere("Anglais")
            .with_difficulty(Difficulty::Facile)
            .with_duration(20)
            .with_score(64),
        ActivityRecord::new(8, 1, at("2024-03-14"), "Lecture guidée")
            .with_matiere("Français")
            .with_duration(20),
        ActivityRecord::new(9, 2, at("2024-03-03T19:00:00"), "Équations du premier degré")
            .with_assistant("J'Apprends")
            .with_matiere("Mathématiques")
            .with_difficulty(Difficulty::Difficile)
            .with_duration(35)
            .with_score(68),
        ActivityRecord::new(10, 2, at("2024-03-06T18:15:00"), "Recherche sur la Révolution française")
            .with_assistant("Recherche")
            .with_matiere("Histoire")
            .with_duration(50)
            .with_score(85),
        ActivityRecord::new(11, 2, at("2024-03-08T17:30:00"), "Conjugaison du passé simple")
            .with_assistant("J'Apprends")
            .with_matiere("Français")
            .with_difficulty(Difficulty::Moyen)
            .with_duration(25)
            .with_score(58),
        ActivityRecord::new(12, 2, at("2024-03-11T16:00:00"), "Accueil de la semaine")
            .with_assistant("Accueil")
            .with_duration(5),
        ActivityRecord::new(13, 3, at("2024-03-04T17:00:00"), "Tables de multiplication")
            .with_assistant("J'Apprends")
            .with_matiere("Mathématiques")
            .with_difficulty(Difficulty::Facile)
            .with_duration(15)
            .with_score(95),
    ]
}

pub fn notifications() -> Vec<Notification> {
    let seed: [(&str, &str, &str, &str, bool, bool, bool); 12] = [
        ("progress", "Progrès en mathématiques", "Léa a terminé 5 exercices de fractions.", "il y a 10 min", false, false, true),
        ("activity", "Nouvelle activité de Hugo", "Hugo a commencé une recherche en histoire.", "il y a 1 h", false, false, false),
        ("reminder", "Rappel de séance", "La séance de lecture de Léa est prévue à 18h.", "il y a 2 h", false, false, false),
        ("progress", "Beaux progrès en français", "Hugo a obtenu 85% à sa dernière dictée.", "il y a 3 h", false, false, false),
        ("subscription", "Votre abonnement arrive à échéance", "Pensez à renouveler votre formule Famille.", "il y a 5 h", false, false, false),
        ("badge", "Badge obtenu", "Léa a débloqué le badge « Curieuse ».", "hier", true, false, true),
        ("report", "Rapport hebdomadaire disponible", "Le bilan de la semaine de vos enfants est prêt.", "hier", true, false, false),
        ("progress", "Progrès constants en anglais", "Léa progresse régulièrement en vocabulaire.", "il y a 2 jours", true, false, false),
        ("recommendation", "Nouvelle recommandation", "Une séance de géométrie est conseillée pour Léa.", "il y a 3 jours", true, false, false),
        ("school", "Message de l'école", "Réunion parents-professeurs le 15 mars.", "il y a 4 jours", true, true, false),
        ("system", "Mise à jour de l'application", "De nouvelles fonctionnalités sont disponibles.", "il y a 1 semaine", true, true, false),
        ("goal", "Objectif hebdomadaire atteint", "Hugo a atteint son objectif de 2 heures.", "il y a 1 semaine", true, false, true),
    ];

    seed.iter()
        .enumerate()
        .map(|(i, (kind, subject, message, time, read, archived, favorite))| {
            let mut n = Notification::new((i + 1).to_string(), *kind, *subject, *message, *time);
            n.read = *read;
            n.archived = *archived;
            n.favorite = *favorite;
            n
        })
        .collect()
}

pub fn catalogues() -> Vec<CataloguePlan> {
    vec![
        CataloguePlan {
            id: "decouverte".to_string(),
            name: "Découverte".to_string(),
            description: "Un enfant, les assistants essentiels.".to_string(),
            features: vec!["Assistant J'Apprends".to_string(), "Historique 30 jours".to_string()],
            prices: vec![PlanPrice { duration: BillingDuration::Monthly, price_cents: 499 }],
            max_children: 1,
        },
        CataloguePlan {
            id: "famille".to_string(),
            name: "Famille".to_string(),
            description: "Jusqu'à quatre enfants et tous les assistants.".to_string(),
            features: vec![
                "Tous les assistants".to_string(),
                "Historique illimité".to_string(),
                "Rapport hebdomadaire".to_string(),
            ],
            prices: vec![
                PlanPrice { duration: BillingDuration::Monthly, price_cents: 1299 },
                PlanPrice { duration: BillingDuration::Quarterly, price_cents: 3499 },
                PlanPrice { duration: BillingDuration::Yearly, price_cents: 12990 },
            ],
            max_children: 4,
        },
        CataloguePlan {
            id: "premium".to_string(),
            name: "Premium".to_string(),
            description: "Famille, plus les recommandations personnalisées.".to_string(),
            features: vec![
                "Tous les assistants".to_string(),
                "Recommandations personnalisées".to_string(),
                "Support prioritaire".to_string(),
            ],
            prices: vec![
                PlanPrice { duration: BillingDuration::Monthly, price_cents: 1999 },
                PlanPrice { duration: BillingDuration::Yearly, price_cents: 19990 },
            ],
            max_children: 6,
        },
    ]
}

pub fn subscriptions() -> Vec<Abonnement> {
    let start = NaiveDate::from_ymd_opt(2024, 2, 15).unwrap_or_default();
    vec![Abonnement::new(PARENT_ID, "famille".to_string(), BillingDuration::Monthly, 1299, start)]
}
