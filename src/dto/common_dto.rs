use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use crate::models::Period;

// Generic envelope for mutations
#[derive(Debug, Serialize, Deserialize)]
pub struct ApiResponse<T> {
    pub success: bool,
    pub message: Option<String>,
    pub data: Option<T>,
}

impl<T> ApiResponse<T> {
    pub fn success_with_message(data: T, message: impl Into<String>) -> Self {
        Self {
            success: true,
            message: Some(message.into()),
            data: Some(data),
        }
    }
}

impl ApiResponse<()> {
    pub fn message(message: impl Into<String>) -> Self {
        Self {
            success: true,
            message: Some(message.into()),
            data: None,
        }
    }
}

// ?startDate=...&endDate=...
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PeriodQuery {
    pub start_date: Option<NaiveDateTime>,
    pub end_date: Option<NaiveDateTime>,
}

impl PeriodQuery {
    /// A period only exists when both bounds are given; a single bound is
    /// treated as no filter.
    pub fn period(&self) -> Option<Period> {
        match (self.start_date, self.end_date) {
            (Some(start), Some(end)) => Some(Period::new(start, end)),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_period_requires_both_bounds() {
        let query: PeriodQuery = serde_json::from_str(
            r#"{"startDate": "2024-01-01T00:00:00", "endDate": "2024-02-01T00:00:00"}"#,
        )
        .unwrap();
        let period = query.period().unwrap();
        assert!(period.start < period.end);

        let query: PeriodQuery =
            serde_json::from_str(r#"{"startDate": "2024-01-01T00:00:00"}"#).unwrap();
        assert_eq!(query.period(), None);

        assert_eq!(PeriodQuery::default().period(), None);
    }
}
