use std::time::Duration;

use async_trait::async_trait;

use crate::models::{Suggestion, SuggestionSettings};

#[derive(Debug, thiserror::Error)]
pub enum SuggestionError {
    #[error("invalid spending amount: {0}")]
    InvalidAmount(f64),
}

/// Source of spending advice for the budget panel.
#[async_trait]
pub trait SuggestionService: Send + Sync {
    async fn suggest(&self, daily_spending: f64) -> Result<Suggestion, SuggestionError>;
}

/// Offline stand-in: waits a fixed delay, then answers from a template.
#[derive(Debug, Clone)]
pub struct TemplateSuggestionService {
    delay: Duration,
    reduction_rate: f64,
    category: String,
}

impl Default for TemplateSuggestionService {
    fn default() -> Self {
        Self::from_settings(&SuggestionSettings::default())
    }
}

impl TemplateSuggestionService {
    pub fn from_settings(settings: &SuggestionSettings) -> Self {
        Self {
            delay: Duration::from_millis(settings.delay_ms),
            reduction_rate: settings.reduction_rate,
            category: settings.category.clone(),
        }
    }

    pub fn compose(&self, daily_spending: f64) -> Suggestion {
        let savings = daily_spending * self.reduction_rate;
        Suggestion {
            suggestion: format!(
                "Based on your spending pattern of ${}/day, consider reducing dining out by {}% to save ${:.2} daily.",
                daily_spending,
                (self.reduction_rate * 100.0).round(),
                savings
            ),
            potential_savings: savings,
            category: self.category.clone(),
        }
    }
}

#[async_trait]
impl SuggestionService for TemplateSuggestionService {
    async fn suggest(&self, daily_spending: f64) -> Result<Suggestion, SuggestionError> {
        if !daily_spending.is_finite() || daily_spending < 0.0 {
            return Err(SuggestionError::InvalidAmount(daily_spending));
        }
        log::debug!("[Suggestion] analysing ${}/day", daily_spending);
        tokio::time::sleep(self.delay).await;
        Ok(self.compose(daily_spending))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn template_matches_dashboard_copy() {
        let service = TemplateSuggestionService::default();
        let s = service.compose(80.0);

        assert_eq!(
            s.suggestion,
            "Based on your spending pattern of $80/day, consider reducing dining out by 20% to save $16.00 daily."
        );
        assert!((s.potential_savings - 16.0).abs() < 1e-9);
        assert_eq!(s.category, "Dining & Entertainment");
    }

    #[test]
    fn fractional_spending_keeps_its_decimals() {
        let s = TemplateSuggestionService::default().compose(42.5);
        assert!(s.suggestion.contains("$42.5/day"));
        assert!(s.suggestion.contains("save $8.50 daily"));
    }

    #[tokio::test(start_paused = true)]
    async fn resolves_only_after_the_delay() {
        let service = TemplateSuggestionService::default();
        let started = tokio::time::Instant::now();

        let s = service.suggest(80.0).await.unwrap();

        assert!(started.elapsed() >= Duration::from_secs(2));
        assert!((s.potential_savings - 16.0).abs() < 1e-9);
    }

    #[tokio::test(start_paused = true)]
    async fn pending_before_the_delay_elapses() {
        let service = TemplateSuggestionService::default();
        let pending =
            tokio::time::timeout(Duration::from_millis(1999), service.suggest(80.0)).await;
        assert!(pending.is_err());
    }

    #[tokio::test]
    async fn rejects_negative_spending() {
        let service = TemplateSuggestionService::default();
        let err = service.suggest(-5.0).await.unwrap_err();
        assert!(matches!(err, SuggestionError::InvalidAmount(_)));
    }

    #[tokio::test(start_paused = true)]
    async fn usable_as_trait_object() {
        let service: Box<dyn SuggestionService> = Box::new(TemplateSuggestionService::default());
        let s = service.suggest(0.0).await.unwrap();
        assert_eq!(s.potential_savings, 0.0);
    }
}
