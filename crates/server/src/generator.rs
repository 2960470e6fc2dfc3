//! Notice generation pipeline.
//!
//! Resolve fields, build the prompt, call the model, post-process the text.

use notice_core::config::{LlmConfig, NoticeConfig};
use notice_core::{AppConfig, AppError, AppResult};
use notice_llm::{LlmClient, LlmRequest};
use notice_prompt::{
    build_prompt, format_issue_date, resolve_fields, wrap_document, Clock, NoticeFields,
    NoticeTypeCatalog, PromptOptions, SystemClock,
};
use std::sync::Arc;

const EMPTY_RESPONSE_MESSAGE: &str = "No response generated by the model.";

/// Shared, immutable generator used by every request.
pub struct NoticeGenerator {
    catalog: Arc<NoticeTypeCatalog>,
    llm: Option<Arc<dyn LlmClient>>,
    llm_config: LlmConfig,
    notice_config: NoticeConfig,
    clock: Arc<dyn Clock>,
    missing_key_message: String,
}

impl NoticeGenerator {
    /// Create a generator. `llm` is `None` when no API key was configured;
    /// every call to [`generate`](Self::generate) then fails with a
    /// configuration error.
    pub fn new(
        config: &AppConfig,
        catalog: Arc<NoticeTypeCatalog>,
        llm: Option<Arc<dyn LlmClient>>,
    ) -> Self {
        Self {
            catalog,
            llm,
            llm_config: config.llm.clone(),
            notice_config: config.notice.clone(),
            clock: Arc::new(SystemClock),
            missing_key_message: config.missing_key_message(),
        }
    }

    /// Replace the date source.
    pub fn with_clock(mut self, clock: Arc<dyn Clock>) -> Self {
        self.clock = clock;
        self
    }

    /// Generate one notice.
    ///
    /// `full_document` overrides `notice.wrapDocument` when set.
    pub async fn generate(
        &self,
        fields: NoticeFields,
        full_document: Option<bool>,
    ) -> AppResult<String> {
        let llm = self
            .llm
            .as_ref()
            .ok_or_else(|| AppError::Config(self.missing_key_message.clone()))?;

        let fields = if self.notice_config.extract_fields {
            resolve_fields(fields)
        } else {
            fields
        };

        let built = build_prompt(&fields, &self.catalog, &self.prompt_options())?;

        tracing::debug!(
            notice_type = %fields.notice_type,
            guidance_matched = built.metadata.guidance_matched,
            placeholders = ?built.metadata.placeholder_fields,
            "Prompt built"
        );

        let request = LlmRequest::new(built.user, &self.llm_config.model)
            .with_system(built.system)
            .with_max_tokens(self.llm_config.max_output_tokens)
            .with_temperature(self.llm_config.temperature)
            .with_response_mime_type(&self.llm_config.response_mime_type);

        let response = llm.complete(&request).await.map_err(|e| match e {
            AppError::Llm(msg) => AppError::Llm(format!(
                "Error communicating with the model provider: {}",
                msg
            )),
            other => other,
        })?;

        tracing::info!(
            provider = llm.provider_name(),
            model = %response.model,
            total_tokens = response.usage.total_tokens,
            finish_reason = ?response.finish_reason,
            "Model call completed"
        );

        let text = response.content.trim();
        if text.is_empty() {
            return Err(AppError::EmptyResponse(EMPTY_RESPONSE_MESSAGE.to_string()));
        }

        if full_document.unwrap_or(self.notice_config.wrap_document) {
            Ok(wrap_document(&fields.notice_type, text))
        } else {
            Ok(text.to_string())
        }
    }

    fn prompt_options(&self) -> PromptOptions {
        PromptOptions {
            placeholder: self.notice_config.placeholder.clone(),
            word_limit: self.notice_config.word_limit,
            issue_date: self
                .notice_config
                .include_issue_date
                .then(|| format_issue_date(self.clock.today())),
        }
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use async_trait::async_trait;
    use chrono::NaiveDate;
    use notice_llm::{LlmResponse, LlmUsage};
    use notice_prompt::FixedClock;
    use std::sync::Mutex;

    /// Canned model used in place of a real provider.
    pub(crate) struct FakeLlm {
        reply: Result<String, String>,
        pub(crate) last_request: Mutex<Option<LlmRequest>>,
    }

    impl FakeLlm {
        pub(crate) fn replying(text: &str) -> Self {
            Self {
                reply: Ok(text.to_string()),
                last_request: Mutex::new(None),
            }
        }

        pub(crate) fn failing(msg: &str) -> Self {
            Self {
                reply: Err(msg.to_string()),
                last_request: Mutex::new(None),
            }
        }
    }

    #[async_trait]
    impl LlmClient for FakeLlm {
        fn provider_name(&self) -> &str {
            "fake"
        }

        async fn complete(&self, request: &LlmRequest) -> AppResult<LlmResponse> {
            *self.last_request.lock().unwrap() = Some(request.clone());
            match &self.reply {
                Ok(text) => Ok(LlmResponse {
                    content: text.clone(),
                    model: request.model.clone(),
                    usage: LlmUsage::new(10, 5),
                    finish_reason: Some("STOP".to_string()),
                }),
                Err(msg) => Err(AppError::Llm(msg.clone())),
            }
        }
    }

    fn generator(config: &AppConfig, llm: Arc<FakeLlm>) -> NoticeGenerator {
        NoticeGenerator::new(
            config,
            Arc::new(NoticeTypeCatalog::builtin()),
            Some(llm as Arc<dyn LlmClient>),
        )
    }

    #[tokio::test]
    async fn test_returns_trimmed_text() {
        let llm = Arc::new(FakeLlm::replying("\n  <p>Notice</p>  \n"));
        let notice = generator(&AppConfig::default(), llm.clone())
            .generate(NoticeFields::default(), None)
            .await
            .unwrap();
        assert_eq!(notice, "<p>Notice</p>");

        let request = llm.last_request.lock().unwrap().clone().unwrap();
        assert_eq!(request.model, "gemma-3-12b-it");
        assert_eq!(request.max_tokens, Some(1024));
        assert_eq!(request.response_mime_type.as_deref(), Some("text/plain"));
        assert!(request.prompt.starts_with("SCHOOL NOTICE DETAILS:"));
        assert!(request.system.unwrap().contains("CATEGORY GUIDANCE:"));
    }

    #[tokio::test]
    async fn test_missing_client_fails_before_call() {
        let generator = NoticeGenerator::new(
            &AppConfig::default(),
            Arc::new(NoticeTypeCatalog::builtin()),
            None,
        );

        let err = generator
            .generate(NoticeFields::default(), None)
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::Config(_)));
        assert_eq!(
            err.detail(),
            "API key missing. Set GEMINI_API_KEY in environment variables."
        );
    }

    #[tokio::test]
    async fn test_whitespace_reply_is_empty_response() {
        let llm = Arc::new(FakeLlm::replying("   \n"));
        let err = generator(&AppConfig::default(), llm)
            .generate(NoticeFields::default(), None)
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::EmptyResponse(_)));
    }

    #[tokio::test]
    async fn test_upstream_failure_is_wrapped() {
        let llm = Arc::new(FakeLlm::failing("connection reset"));
        let err = generator(&AppConfig::default(), llm)
            .generate(NoticeFields::default(), None)
            .await
            .unwrap_err();
        assert_eq!(
            err.detail(),
            "Error communicating with the model provider: connection reset"
        );
    }

    #[tokio::test]
    async fn test_extraction_feeds_summary() {
        let llm = Arc::new(FakeLlm::replying("<p>Closed</p>"));
        let fields = NoticeFields {
            notice_type: "Holiday Notice".to_string(),
            key_details: "School will remain closed on March 10, 2026 for all students."
                .to_string(),
            ..NoticeFields::default()
        };

        generator(&AppConfig::default(), llm.clone())
            .generate(fields.clone(), None)
            .await
            .unwrap();
        let prompt = llm.last_request.lock().unwrap().clone().unwrap().prompt;
        assert!(prompt.contains("- Event Date: March 10, 2026\n"));
        assert!(prompt.contains("- Recipient: All Students\n"));

        let mut config = AppConfig::default();
        config.notice.extract_fields = false;
        generator(&config, llm.clone())
            .generate(fields, None)
            .await
            .unwrap();
        let prompt = llm.last_request.lock().unwrap().clone().unwrap().prompt;
        assert!(prompt.contains("- Event Date: [Placeholder]\n"));
    }

    #[tokio::test]
    async fn test_issue_date_comes_from_clock() {
        let mut config = AppConfig::default();
        config.notice.include_issue_date = true;
        let llm = Arc::new(FakeLlm::replying("<p>Notice</p>"));
        let date = NaiveDate::from_ymd_opt(2026, 10, 18).unwrap();

        generator(&config, llm.clone())
            .with_clock(Arc::new(FixedClock(date)))
            .generate(NoticeFields::default(), None)
            .await
            .unwrap();

        let request = llm.last_request.lock().unwrap().clone().unwrap();
        assert!(request.prompt.ends_with("- Date of Issue: October 18, 2026"));
        assert!(request.system.unwrap().contains("October 18, 2026"));
    }

    #[tokio::test]
    async fn test_full_document_override() {
        let mut config = AppConfig::default();
        config.notice.wrap_document = true;
        let llm = Arc::new(FakeLlm::replying("<p>Run</p>"));
        let generator = generator(&config, llm);
        let fields = NoticeFields {
            notice_type: "Sports Day".to_string(),
            ..NoticeFields::default()
        };

        let wrapped = generator.generate(fields.clone(), None).await.unwrap();
        assert!(wrapped.starts_with("<!DOCTYPE html>"));
        assert!(wrapped.contains("<title>Sports Day Notice</title>"));

        let bare = generator.generate(fields, Some(false)).await.unwrap();
        assert_eq!(bare, "<p>Run</p>");
    }
}
