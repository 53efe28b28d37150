use thiserror::Error;

use super::model::ServiceType;

pub const MAX_DETAILS_CHARS: usize = 1000;

/// What the service-type picker currently shows.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ServiceChoice {
    Cleaning,
    ConsumableReplacement,
    Repair,
    Other,
}

impl ServiceChoice {
    pub const ALL: [ServiceChoice; 4] = [
        ServiceChoice::Cleaning,
        ServiceChoice::ConsumableReplacement,
        ServiceChoice::Repair,
        ServiceChoice::Other,
    ];

    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            Self::Cleaning => "Cleaning",
            Self::ConsumableReplacement => "Consumable Replacement",
            Self::Repair => "Repair",
            Self::Other => "Other",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum DraftError {
    #[error("Please select a service type")]
    MissingServiceType,
    #[error("Please specify the service type")]
    MissingOtherText,
    #[error("Please provide service details")]
    MissingDetails,
    #[error("Details must not exceed 1000 characters")]
    DetailsTooLong,
}

/// A validated submission, trimmed and ready for the backend.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OrderRequest {
    pub service_type: ServiceType,
    pub details: String,
}

/// The order form as the user is filling it in.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct OrderDraft {
    pub choice: Option<ServiceChoice>,
    pub other_text: String,
    pub details: String,
}

impl OrderDraft {
    /// Checks run in form order; the first failure wins.
    pub fn validate(&self) -> Result<OrderRequest, DraftError> {
        let Some(choice) = self.choice else {
            return Err(DraftError::MissingServiceType);
        };
        if choice == ServiceChoice::Other && self.other_text.trim().is_empty() {
            return Err(DraftError::MissingOtherText);
        }
        if self.details.trim().is_empty() {
            return Err(DraftError::MissingDetails);
        }
        if self.details.chars().count() > MAX_DETAILS_CHARS {
            return Err(DraftError::DetailsTooLong);
        }

        let service_type = match choice {
            ServiceChoice::Cleaning => ServiceType::Cleaning,
            ServiceChoice::ConsumableReplacement => ServiceType::ConsumableReplacement,
            ServiceChoice::Repair => ServiceType::Repair,
            ServiceChoice::Other => ServiceType::Other(self.other_text.trim().to_string()),
        };
        Ok(OrderRequest {
            service_type,
            details: self.details.trim().to_string(),
        })
    }

    /// `42/1000`
    #[must_use]
    pub fn details_counter(&self) -> String {
        format!("{}/{MAX_DETAILS_CHARS}", self.details.chars().count())
    }

    pub fn clear(&mut self) {
        *self = Self::default();
    }
}
