//! Property-based tests for LLM provider translation layers
//!
//! The proxy's contract depends on two things surviving translation:
//! - the user's text reaches the provider verbatim as the only user message
//! - the persona reaches the provider as system content, ahead of the user turn

use super::anthropic::{AnthropicModel, AnthropicResponse, AnthropicUsage};
use super::openai::{OpenAIChoice, OpenAIMessage, OpenAIModel, OpenAIResponse};
use super::types::{ContentBlock, LlmRequest};
use super::{AnthropicService, OpenAIService};
use proptest::prelude::*;

fn arb_text() -> impl Strategy<Value = String> {
    "[a-zA-Z0-9 _.!?,\n]{1,200}"
}

fn arb_openai_model() -> impl Strategy<Value = OpenAIModel> {
    prop_oneof![
        Just(OpenAIModel::GPT4o),
        Just(OpenAIModel::GPT4oMini),
        Just(OpenAIModel::GPT5Mini),
    ]
}

fn arb_anthropic_model() -> impl Strategy<Value = AnthropicModel> {
    prop_oneof![
        Just(AnthropicModel::Claude45Haiku),
        Just(AnthropicModel::Claude45Sonnet),
    ]
}

proptest! {
    #[test]
    fn prop_openai_translate_preserves_user_text(
        model in arb_openai_model(),
        system in arb_text(),
        user in arb_text(),
    ) {
        let svc = OpenAIService::new("k".to_string(), model, None);
        let req = svc.translate_request(&LlmRequest::single_turn(system.clone(), user.clone(), None));

        prop_assert_eq!(req.messages.len(), 2);
        prop_assert_eq!(req.messages[0].role.as_str(), "system");
        prop_assert_eq!(req.messages[0].content.as_deref(), Some(system.as_str()));
        prop_assert_eq!(req.messages[1].role.as_str(), "user");
        prop_assert_eq!(req.messages[1].content.as_deref(), Some(user.as_str()));
    }

    #[test]
    fn prop_anthropic_translate_preserves_user_text(
        model in arb_anthropic_model(),
        system in arb_text(),
        user in arb_text(),
    ) {
        let svc = AnthropicService::new("k".to_string(), model, None);
        let req = svc.translate_request(&LlmRequest::single_turn(system.clone(), user.clone(), None));

        prop_assert_eq!(req.system.len(), 1);
        prop_assert_eq!(&req.system[0].text, &system);
        prop_assert_eq!(req.messages.len(), 1);
        prop_assert_eq!(req.messages[0].content.clone(), vec![ContentBlock::text(user)]);
    }

    #[test]
    fn prop_translated_request_serializes(
        model in arb_openai_model(),
        user in arb_text(),
        max_tokens in proptest::option::of(1u32..10_000),
    ) {
        let svc = OpenAIService::new("k".to_string(), model, None);
        let req = svc.translate_request(&LlmRequest::single_turn("p", user, max_tokens));
        let json = serde_json::to_value(&req).unwrap();
        prop_assert!(json["messages"].is_array());
        prop_assert_eq!(json["stream"].as_bool(), Some(false));
    }

    #[test]
    fn prop_openai_normalize_reply_is_trimmed_text(text in arb_text()) {
        let resp = OpenAIResponse {
            choices: vec![OpenAIChoice {
                message: OpenAIMessage {
                    role: "assistant".to_string(),
                    content: Some(text.clone()),
                },
                finish_reason: Some("stop".to_string()),
            }],
            usage: None,
        };
        let normalized = OpenAIService::normalize_response(resp).unwrap();
        prop_assert!(normalized.end_turn);
        prop_assert_eq!(normalized.reply_text(), Some(text.trim().to_string()));
    }

    #[test]
    fn prop_anthropic_normalize_reply_is_trimmed_text(text in arb_text(), others in 0usize..3) {
        let mut content = vec![ContentBlock::Other; others];
        content.push(ContentBlock::text(text.clone()));
        let resp = AnthropicResponse {
            content,
            stop_reason: Some("end_turn".to_string()),
            usage: AnthropicUsage { input_tokens: 1, output_tokens: 1 },
        };
        let normalized = AnthropicService::normalize_response(resp);
        prop_assert_eq!(normalized.reply_text(), Some(text.trim().to_string()));
    }
}
