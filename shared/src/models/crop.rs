//! Crop simulation records

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::DailyCondition;

/// A user-owned crop simulation
///
/// `conditions` is append-only, one entry per simulated day, at most
/// `days_cycle` entries. `user_id` and `crop_type_id` are fixed at creation.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Crop {
    pub id: Uuid,
    pub user_id: Uuid,
    pub crop_type_id: Uuid,
    pub name: String,
    pub start_date: NaiveDateTime,
    /// Date of the most recently simulated day; advances by one day per step
    pub last_sim_date: NaiveDateTime,
    pub conditions: Vec<DailyCondition>,
    /// True until the cycle completes or the crop is explicitly deactivated
    pub active: bool,
}

impl Crop {
    /// Number of days simulated so far
    pub fn days_simulated(&self) -> usize {
        self.conditions.len()
    }

    /// Biomass after the most recent simulated day, if any
    pub fn latest_biomass(&self) -> Option<f64> {
        self.conditions.last().map(|c| c.estimated_biomass)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn crop_with_days(days: Vec<DailyCondition>) -> Crop {
        let start = NaiveDate::from_ymd_opt(2024, 3, 1)
            .unwrap()
            .and_hms_opt(0, 0, 0)
            .unwrap();
        Crop {
            id: Uuid::new_v4(),
            user_id: Uuid::new_v4(),
            crop_type_id: Uuid::new_v4(),
            name: "North field".to_string(),
            start_date: start,
            last_sim_date: start,
            conditions: days,
            active: true,
        }
    }

    #[test]
    fn test_days_simulated_tracks_condition_count() {
        let fresh = crop_with_days(vec![]);
        assert_eq!(fresh.days_simulated(), 0);
        assert_eq!(fresh.latest_biomass(), None);

        let grown = crop_with_days(vec![
            DailyCondition {
                day: 1,
                temperature: 25.0,
                rain: 5.0,
                sun_hours: 8.0,
                estimated_biomass: 3.2,
            },
            DailyCondition {
                day: 2,
                temperature: 26.0,
                rain: 4.0,
                sun_hours: 7.0,
                estimated_biomass: 6.8,
            },
        ]);
        assert_eq!(grown.days_simulated(), 2);
        assert_eq!(grown.latest_biomass(), Some(6.8));
    }
}
