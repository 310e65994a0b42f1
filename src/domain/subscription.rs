use std::fmt;
use std::str::FromStr;

use chrono::{Months, NaiveDate};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct User {
    pub id: i64,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BillingDuration {
    Monthly,
    Quarterly,
    Yearly,
}

impl BillingDuration {
    pub fn months(&self) -> u32 {
        match self {
            BillingDuration::Monthly => 1,
            BillingDuration::Quarterly => 3,
            BillingDuration::Yearly => 12,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            BillingDuration::Monthly => "monthly",
            BillingDuration::Quarterly => "quarterly",
            BillingDuration::Yearly => "yearly",
        }
    }
}

impl fmt::Display for BillingDuration {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for BillingDuration {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "monthly" => Ok(BillingDuration::Monthly),
            "quarterly" => Ok(BillingDuration::Quarterly),
            "yearly" => Ok(BillingDuration::Yearly),
            other => Err(format!("unknown duration: {}", other)),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlanPrice {
    pub duration: BillingDuration,
    pub price_cents: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CataloguePlan {
    pub id: String,
    pub name: String,
    pub description: String,
    pub features: Vec<String>,
    pub prices: Vec<PlanPrice>,
    pub max_children: u8,
}

impl CataloguePlan {
    pub fn price_for(&self, duration: BillingDuration) -> Option<u32> {
        self.prices
            .iter()
            .find(|p| p.duration == duration)
            .map(|p| p.price_cents)
    }
}

/// A user's subscription to a catalogue plan.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Abonnement {
    pub id: Uuid,
    pub user_id: i64,
    pub plan_id: String,
    pub duration: BillingDuration,
    pub price_cents: u32,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub active: bool,
}

impl Abonnement {
    pub fn new(
        user_id: i64,
        plan_id: String,
        duration: BillingDuration,
        price_cents: u32,
        start_date: NaiveDate,
    ) -> Self {
        let end_date = start_date
            .checked_add_months(Months::new(duration.months()))
            .unwrap_or(NaiveDate::MAX);
        Self {
            id: Uuid::new_v4(),
            user_id,
            plan_id,
            duration,
            price_cents,
            start_date,
            end_date,
            active: true,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn plan() -> CataloguePlan {
        CataloguePlan {
            id: "famille".to_string(),
            name: "Famille".to_string(),
            description: "Jusqu'à 4 enfants".to_string(),
            features: vec![],
            prices: vec![
                PlanPrice { duration: BillingDuration::Monthly, price_cents: 1299 },
                PlanPrice { duration: BillingDuration::Yearly, price_cents: 12990 },
            ],
            max_children: 4,
        }
    }

    #[test]
    fn test_price_for_offered_duration() {
        assert_eq!(plan().price_for(BillingDuration::Yearly), Some(12990));
        assert_eq!(plan().price_for(BillingDuration::Quarterly), None);
    }

    #[test]
    fn test_abonnement_end_date() {
        let start = NaiveDate::from_ymd_opt(2024, 1, 31).unwrap();
        let abonnement = Abonnement::new(1, "famille".to_string(), BillingDuration::Quarterly, 3500, start);

        assert_eq!(abonnement.end_date, NaiveDate::from_ymd_opt(2024, 4, 30).unwrap());
        assert!(abonnement.active);
    }

    #[test]
    fn test_duration_parse() {
        assert_eq!("yearly".parse::<BillingDuration>().unwrap(), BillingDuration::Yearly);
        assert!("weekly".parse::<BillingDuration>().is_err());
    }
}
