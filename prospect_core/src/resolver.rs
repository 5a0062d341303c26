//! Contact resolver: one provider round-trip per lookup subject.
//!
//! The resolver owns the prompt, the rate-limit retry policy, and the
//! best-effort decoding of whatever text comes back. It never fails
//! outward: every error path degrades to a null-filled record.

use tracing::{debug, info, warn};

use crate::contact::{ContactRecord, PersonQuery};
use crate::extract::extract_json_object;
use crate::retry::{RetryPolicy, retry_on_rate_limit};
use crate::{ChatMessage, SearchProvider};

const SYSTEM_PROMPT: &str = "You are a data analyzer. You only output in the provided JSON format. \
    You need to help the user by providing the best possible contact information for an individual. \
    Make sure to look deeply for the contact information! \
    Strictly return the result in the following JSON format. Strictly don't add any other \
    supplemental text such as comments or thoughts. Your job is to only output JSON: \
    {\"first_name\": \"FirstName\", \"last_name\": \"LastName\", \"email\": \"email_address\", \
    \"phone_number\": \"phone_number\", \"edu_email\": true/false, \"source_link\": \"source_link\"}";

pub struct ContactResolver<P> {
    provider: P,
    model: String,
    retry: RetryPolicy,
}

impl<P: SearchProvider> ContactResolver<P> {
    pub fn new(provider: P) -> Self {
        let model = provider.default_model().to_string();
        Self {
            provider,
            model,
            retry: RetryPolicy::default(),
        }
    }

    #[must_use]
    pub fn with_model(mut self, model: String) -> Self {
        self.model = model;
        self
    }

    #[must_use]
    pub fn with_retry_policy(mut self, retry: RetryPolicy) -> Self {
        self.retry = retry;
        self
    }

    /// Resolve contact information for one subject.
    ///
    /// Rate limits are retried per the configured policy; any other
    /// provider failure, and any unparsable completion, yields a
    /// null-filled record with a diagnostic log.
    pub async fn resolve(&self, query: &PersonQuery) -> ContactRecord {
        let messages = Self::build_messages(query);

        info!(
            "Looking up contact info for {} {} ({})",
            query.first_name, query.last_name, query.organization
        );

        let response = retry_on_rate_limit(
            || self.provider.chat(&messages, &self.model),
            &self.retry,
        )
        .await;

        let response = match response {
            Ok(response) => response,
            Err(e) => {
                warn!(
                    "Lookup failed for {} {}: {e}",
                    query.first_name, query.last_name
                );
                return ContactRecord::null_filled(query);
            }
        };

        if let Some(usage) = &response.usage {
            debug!("Completion used {} tokens", usage.total_tokens);
        }

        Self::parse_completion(&response.content, query)
    }

    fn build_messages(query: &PersonQuery) -> Vec<ChatMessage> {
        let user_prompt = format!(
            "Name: {} {},  Title: {}, organization: {}. \
             Prefer .edu emails, but if unavailable, provide the closest contact email. \
             Make sure to look deeply for the contact information. \
             Also, try to find the individual's phone number and include a link to the \
             source of the information. Return the response as a JSON object.",
            query.first_name, query.last_name, query.title, query.organization
        );

        vec![
            ChatMessage::system(SYSTEM_PROMPT),
            ChatMessage::user(user_prompt),
        ]
    }

    fn parse_completion(content: &str, query: &PersonQuery) -> ContactRecord {
        let Some(fragment) = extract_json_object(content) else {
            warn!(
                "Failed to find JSON for {} {}",
                query.first_name, query.last_name
            );
            return ContactRecord::null_filled(query);
        };

        match serde_json::from_str(fragment) {
            Ok(record) => record,
            Err(e) => {
                warn!(
                    "Failed to decode JSON for {} {}: {e}",
                    query.first_name, query.last_name
                );
                ContactRecord::null_filled(query)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{ChatResponse, ProviderError, Role};
    use async_trait::async_trait;
    use std::collections::VecDeque;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::{Arc, Mutex};
    use std::time::Duration;

    /// Provider that replays a scripted sequence of outcomes.
    struct ScriptedProvider {
        responses: Mutex<VecDeque<Result<ChatResponse, ProviderError>>>,
        calls: Arc<AtomicUsize>,
    }

    impl ScriptedProvider {
        fn new(
            responses: Vec<Result<ChatResponse, ProviderError>>,
        ) -> (Self, Arc<AtomicUsize>) {
            let calls = Arc::new(AtomicUsize::new(0));
            let provider = Self {
                responses: Mutex::new(responses.into()),
                calls: calls.clone(),
            };
            (provider, calls)
        }
    }

    #[async_trait]
    impl SearchProvider for ScriptedProvider {
        #[expect(clippy::expect_used, reason = "Test failure should panic with context")]
        async fn chat(
            &self,
            _messages: &[ChatMessage],
            _model: &str,
        ) -> Result<ChatResponse, ProviderError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            self.responses
                .lock()
                .expect("scripted responses lock should not be poisoned")
                .pop_front()
                .expect("scripted provider ran out of responses")
        }

        fn default_model(&self) -> &str {
            "test-model"
        }
    }

    fn completion(content: &str) -> Result<ChatResponse, ProviderError> {
        Ok(ChatResponse {
            content: content.to_string(),
            usage: None,
        })
    }

    fn query() -> PersonQuery {
        PersonQuery {
            first_name: "Jane".to_string(),
            last_name: "Doe".to_string(),
            title: "Professor".to_string(),
            organization: "Acme University".to_string(),
        }
    }

    fn fast_retry() -> RetryPolicy {
        RetryPolicy {
            cooldown: Duration::from_millis(10),
            max_retries: 3,
        }
    }

    #[tokio::test]
    async fn embedded_object_wins_over_surrounding_prose() {
        let (provider, _) = ScriptedProvider::new(vec![completion(
            r#"Sure! {"first_name":"Jane","last_name":"Doe","email":"jdoe@acme.edu","phone_number":"555-1234","edu_email":true,"source_link":"http://acme.edu/jane"} Hope that helps!"#,
        )]);
        let resolver = ContactResolver::new(provider);

        let record = resolver.resolve(&query()).await;

        assert_eq!(record.email.as_deref(), Some("jdoe@acme.edu"));
        assert_eq!(record.phone_number.as_deref(), Some("555-1234"));
        assert_eq!(record.edu_email, Some(true));
        assert_eq!(record.source_link.as_deref(), Some("http://acme.edu/jane"));
    }

    #[tokio::test]
    async fn completion_without_json_degrades_to_nulls() {
        let (provider, _) =
            ScriptedProvider::new(vec![completion("I could not find any contact details.")]);
        let resolver = ContactResolver::new(provider);

        let record = resolver.resolve(&query()).await;

        assert_eq!(record, ContactRecord::null_filled(&query()));
    }

    #[tokio::test]
    async fn undecodable_fragment_degrades_to_nulls() {
        let (provider, _) =
            ScriptedProvider::new(vec![completion("{this is not valid json}")]);
        let resolver = ContactResolver::new(provider);

        let record = resolver.resolve(&query()).await;

        assert_eq!(record, ContactRecord::null_filled(&query()));
    }

    #[tokio::test]
    async fn rate_limit_then_success_retries_once() {
        let (provider, calls) = ScriptedProvider::new(vec![
            Err(ProviderError::RateLimited),
            completion(r#"{"first_name":"Jane","last_name":"Doe","email":"jdoe@acme.edu"}"#),
        ]);
        let resolver = ContactResolver::new(provider).with_retry_policy(fast_retry());

        let record = resolver.resolve(&query()).await;

        assert_eq!(calls.load(Ordering::SeqCst), 2);
        assert_eq!(record.email.as_deref(), Some("jdoe@acme.edu"));
    }

    #[tokio::test]
    async fn transport_error_degrades_without_retry() {
        let (provider, calls) = ScriptedProvider::new(vec![Err(ProviderError::Transport(
            "connection refused".to_string(),
        ))]);
        let resolver = ContactResolver::new(provider).with_retry_policy(fast_retry());

        let record = resolver.resolve(&query()).await;

        assert_eq!(calls.load(Ordering::SeqCst), 1);
        assert_eq!(record, ContactRecord::null_filled(&query()));
    }

    #[tokio::test]
    async fn exhausted_rate_limit_budget_degrades_to_nulls() {
        let (provider, calls) = ScriptedProvider::new(vec![
            Err(ProviderError::RateLimited),
            Err(ProviderError::RateLimited),
            Err(ProviderError::RateLimited),
        ]);
        let resolver = ContactResolver::new(provider).with_retry_policy(RetryPolicy {
            cooldown: Duration::from_millis(10),
            max_retries: 2,
        });

        let record = resolver.resolve(&query()).await;

        assert_eq!(calls.load(Ordering::SeqCst), 3);
        assert_eq!(record, ContactRecord::null_filled(&query()));
    }

    #[tokio::test]
    async fn missing_keys_are_kept_absent_not_defaulted() {
        let (provider, _) = ScriptedProvider::new(vec![completion(
            r#"{"first_name":"Jane","last_name":"Doe","email":"jane.doe@acme.org"}"#,
        )]);
        let resolver = ContactResolver::new(provider);

        let record = resolver.resolve(&query()).await;

        assert_eq!(record.email.as_deref(), Some("jane.doe@acme.org"));
        assert_eq!(record.edu_email, None);
        assert_eq!(record.phone_number, None);
        assert_eq!(record.source_link, None);
    }

    #[test]
    fn prompt_embeds_all_query_fields() {
        let messages = ContactResolver::<ScriptedProvider>::build_messages(&query());

        assert_eq!(messages.len(), 2);
        assert_eq!(messages[0].role, Role::System);
        assert_eq!(messages[1].role, Role::User);
        assert!(messages[0].content.contains("only output JSON"));
        for field in ["Jane", "Doe", "Professor", "Acme University"] {
            assert!(messages[1].content.contains(field));
        }
    }
}
