// mock.rs - Fixed-table suggestion provider with simulated latency.
//
// Stands in for a real AI service. Each known principle id maps to exactly
// three curated goals; anything else maps to an empty list.

use std::time::Duration;

use async_trait::async_trait;

use crate::error::SuggestError;
use crate::provider::SuggestionProvider;

/// Simulated round-trip time of the mock provider.
pub const DEFAULT_LATENCY: Duration = Duration::from_millis(1500);

/// Curated suggestions for a principle id, in display order.
///
/// Unknown ids yield an empty list rather than an error: the id domain is the
/// closed principle catalog, so a miss means a caller bug, not user input.
pub fn suggestions_for(principle_id: &str) -> Vec<String> {
    let table: &[&str] = match principle_id {
        "i-matter" => &[
            "I will practice positive self-talk every morning",
            "I will celebrate one small achievement each day",
            "I will ask for help when I need it without feeling bad",
        ],
        "responsibility" => &[
            "I will complete my homework before recreational activities",
            "I will keep my commitments to friends and family",
            "I will take care of my belongings and space",
        ],
        "considerate" => &[
            "I will listen actively when others are speaking",
            "I will offer help to classmates who are struggling",
            "I will think before I speak to avoid hurting feelings",
        ],
        "strategies" => &[
            "I will break big tasks into smaller, manageable steps",
            "I will use a planner to organize my time effectively",
            "I will practice new skills for 15 minutes each day",
        ],
        _ => &[],
    };
    table.iter().map(|s| s.to_string()).collect()
}

/// Answers from [`suggestions_for`] after a fixed delay.
#[derive(Debug, Clone)]
pub struct MockSuggestionProvider {
    latency: Duration,
}

impl MockSuggestionProvider {
    pub fn new(latency: Duration) -> Self {
        Self { latency }
    }
}

impl Default for MockSuggestionProvider {
    fn default() -> Self {
        Self::new(DEFAULT_LATENCY)
    }
}

#[async_trait]
impl SuggestionProvider for MockSuggestionProvider {
    async fn fetch(&self, principle_id: &str) -> Result<Vec<String>, SuggestError> {
        let latency_ms = self.latency.as_millis() as u64;
        tracing::debug!(principle_id, latency_ms, "mock suggestion fetch");
        if !self.latency.is_zero() {
            tokio::time::sleep(self.latency).await;
        }
        let suggestions = suggestions_for(principle_id);
        if suggestions.is_empty() {
            tracing::warn!(principle_id, "no suggestions for unknown principle id");
        }
        Ok(suggestions)
    }

    fn name(&self) -> &str {
        "mock"
    }
}
