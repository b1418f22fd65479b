//! Post-appointment feedback.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::Resource;

/// Area of the stay the feedback is about.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FeedbackCategory {
    /// Overall experience.
    General,
    /// Medical care received.
    Care,
    /// Facility and rooms.
    Facility,
    /// Staff conduct.
    Staff,
    /// Rides.
    Transportation,
    /// Food.
    Meals,
    /// Anything the client does not know about.
    #[serde(other)]
    Other,
}

/// Feedback left by a patient for an appointment.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Feedback {
    /// Feedback ID.
    pub id: u64,
    /// Appointment the feedback refers to.
    pub appointment_id: u64,
    /// Author.
    #[serde(default)]
    pub patient_id: Option<u64>,
    /// Star rating, 1-5.
    pub rating: u8,
    /// Category.
    pub category: FeedbackCategory,
    /// Free-text comment.
    #[serde(default)]
    pub comment: Option<String>,
    /// Net-promoter style likelihood, 0-10.
    #[serde(default)]
    pub recommendation_likelihood: Option<u8>,
    /// Creation time.
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
}

impl Resource for Feedback {
    fn id(&self) -> u64 {
        self.id
    }
}

/// Feedback form payload.
#[derive(Debug, Clone, PartialEq, Serialize, Validate)]
pub struct NewFeedback {
    /// Appointment the feedback refers to.
    #[validate(range(min = 1, message = "Select an appointment"))]
    pub appointment_id: u64,
    /// Star rating.
    #[validate(range(min = 1, max = 5, message = "Rating must be between 1 and 5"))]
    pub rating: u8,
    /// Category.
    pub category: FeedbackCategory,
    /// Free-text comment.
    #[serde(skip_serializing_if = "Option::is_none")]
    #[validate(length(max = 2000, message = "Comments are limited to 2000 characters"))]
    pub comment: Option<String>,
    /// Likelihood to recommend.
    #[serde(skip_serializing_if = "Option::is_none")]
    #[validate(range(max = 10, message = "Recommendation must be between 0 and 10"))]
    pub recommendation_likelihood: Option<u8>,
}

/// Partial update of feedback.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Validate)]
pub struct FeedbackUpdate {
    /// New rating.
    #[serde(skip_serializing_if = "Option::is_none")]
    #[validate(range(min = 1, max = 5, message = "Rating must be between 1 and 5"))]
    pub rating: Option<u8>,
    /// New category.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category: Option<FeedbackCategory>,
    /// New comment.
    #[serde(skip_serializing_if = "Option::is_none")]
    #[validate(length(max = 2000, message = "Comments are limited to 2000 characters"))]
    pub comment: Option<String>,
    /// New likelihood.
    #[serde(skip_serializing_if = "Option::is_none")]
    #[validate(range(max = 10, message = "Recommendation must be between 0 and 10"))]
    pub recommendation_likelihood: Option<u8>,
}

/// Query parameters for listing feedback.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct FeedbackFilter {
    /// Only feedback for this appointment.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub appointment_id: Option<u64>,
    /// Only feedback by this patient.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub patient_id: Option<u64>,
    /// Only feedback in this category.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category: Option<FeedbackCategory>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn feedback(rating: u8, recommendation: Option<u8>) -> NewFeedback {
        NewFeedback {
            appointment_id: 3,
            rating,
            category: FeedbackCategory::Care,
            comment: Some("Friendly staff".into()),
            recommendation_likelihood: recommendation,
        }
    }

    #[test]
    fn test_unknown_category_decodes_as_other() {
        let category: FeedbackCategory = serde_json::from_str("\"parking\"").unwrap();
        assert_eq!(category, FeedbackCategory::Other);
    }

    proptest! {
        #[test]
        fn prop_rating_valid_iff_in_range(rating in any::<u8>()) {
            let ok = feedback(rating, None).validate().is_ok();
            prop_assert_eq!(ok, (1..=5).contains(&rating));
        }

        #[test]
        fn prop_recommendation_valid_iff_at_most_ten(value in any::<u8>()) {
            let ok = feedback(4, Some(value)).validate().is_ok();
            prop_assert_eq!(ok, value <= 10);
        }
    }
}
