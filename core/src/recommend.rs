use crate::calculator::{compute_bmi, target_heart_rate};
use crate::error::Result;
use crate::models::{Recommendations, UserProfile};

impl Recommendations {
    /// Derive display values from a stored profile.
    pub fn from_profile(profile: &UserProfile) -> Result<Self> {
        Ok(Self {
            profile_id: profile.id,
            target_heart_rate: target_heart_rate(profile.age),
            bmi: compute_bmi(profile.weight_kg, profile.height_cm)?,
            pregnancy_due_date: profile.pregnancy_due_date,
        })
    }
}
