use chrono::{DateTime, Utc};
use serde::Serialize;
use utoipa::ToSchema;
use uuid::Uuid;

use crate::domain::{
    common::generate_timestamp,
    menu::{entities::Dish, value_objects::ProviderKind},
};

#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
pub struct AnalysisResult {
    pub analysis_id: Uuid,
    pub dishes: Vec<Dish>,
    #[serde(skip_serializing)]
    pub raw_response: String,
    pub provider: ProviderKind,
    pub model: String,
    /// Seconds spent waiting on the provider and parsing its answer
    pub processing_time: f64,
    pub analyzed_at: DateTime<Utc>,
}

impl AnalysisResult {
    pub fn new(
        dishes: Vec<Dish>,
        raw_response: String,
        provider: ProviderKind,
        model: String,
        processing_time: f64,
    ) -> Self {
        let (now, timestamp) = generate_timestamp();

        Self {
            analysis_id: Uuid::new_v7(timestamp),
            dishes,
            raw_response,
            provider,
            model,
            processing_time: processing_time.max(0.0),
            analyzed_at: now,
        }
    }
}
