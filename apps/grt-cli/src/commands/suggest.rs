// suggest.rs - `grt suggest`: one-shot suggestion lookup.

use grt_suggest::ProviderConfig;
use grt_tracker::TrackerConfig;

pub async fn execute(config: &TrackerConfig, principle_id: &str, no_delay: bool) -> anyhow::Result<()> {
    let Some(principle) = grt_catalog::find(principle_id) else {
        let known: Vec<&str> = grt_catalog::all().iter().map(|p| p.id).collect();
        anyhow::bail!(
            "unknown principle '{}' (expected one of: {})",
            principle_id,
            known.join(", ")
        );
    };

    let provider_config = effective_config(&config.suggestions, no_delay);
    let provider = grt_suggest::build_provider(&provider_config)?;

    eprintln!("Getting ideas for {}...", principle.name);
    let suggestions = provider.fetch(principle.id).await?;

    println!("Here are some ideas to inspire you:");
    for (i, suggestion) in suggestions.iter().enumerate() {
        println!("  {}. {}", i + 1, suggestion);
    }
    Ok(())
}

fn effective_config(config: &ProviderConfig, no_delay: bool) -> ProviderConfig {
    let mut config = config.clone();
    if no_delay {
        config.latency_ms = 0;
    }
    config
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn no_delay_zeroes_latency_only() {
        let base = ProviderConfig::default();
        let fast = effective_config(&base, true);
        assert_eq!(fast.latency_ms, 0);
        assert_eq!(fast.provider, base.provider);
        assert_eq!(effective_config(&base, false), base);
    }

    #[tokio::test]
    async fn unknown_principle_is_an_error() {
        let result = execute(&TrackerConfig::default(), "kindness", true).await;
        let message = result.unwrap_err().to_string();
        assert!(message.contains("kindness"));
        assert!(message.contains("responsibility"));
    }

    #[tokio::test]
    async fn known_principle_succeeds_without_delay() {
        assert!(execute(&TrackerConfig::default(), "considerate", true)
            .await
            .is_ok());
    }
}
