//! SendChat command handler.
//!
//! Runs one dialogue cycle for a transport request and shapes the result the
//! way clients consume it: reply text plus whether it is a final pick.

use std::sync::Arc;

use thiserror::Error;

use super::dialogue_engine::{CycleOutcome, DialogueEngine, DialogueError};
use crate::domain::catalog::UiFilter;
use crate::domain::dialogue::{has_drink_line, Conversation, Recommendation};
use crate::ports::{AIError, AIProvider};

/// Command to produce the next assistant reply.
#[derive(Debug, Clone, Default)]
pub struct ChatCommand {
    /// The full conversation so far, oldest first.
    pub conversation: Conversation,
    pub ui_filter: UiFilter,
}

impl ChatCommand {
    pub fn new(conversation: Conversation, ui_filter: UiFilter) -> Self {
        Self {
            conversation,
            ui_filter,
        }
    }
}

/// Result of one chat cycle.
#[derive(Debug, Clone)]
pub struct ChatResult {
    pub response: String,
    /// True when `response` carries a DRINK line.
    pub is_drink_recommendation: bool,
    pub recommendation: Option<Recommendation>,
    pub outcome: CycleOutcome,
}

/// Errors that can occur when running a chat cycle.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ChatError {
    /// The text-completion collaborator failed.
    #[error("AI provider error: {0}")]
    Collaborator(AIError),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl From<DialogueError> for ChatError {
    fn from(err: DialogueError) -> Self {
        match err {
            DialogueError::Collaborator(source) => ChatError::Collaborator(source),
            other => ChatError::Internal(other.to_string()),
        }
    }
}

/// Handler for chat commands.
pub struct ChatHandler<P: ?Sized + AIProvider> {
    engine: Arc<DialogueEngine<P>>,
}

impl<P: ?Sized + AIProvider> ChatHandler<P> {
    pub fn new(engine: Arc<DialogueEngine<P>>) -> Self {
        Self { engine }
    }

    pub fn engine(&self) -> &DialogueEngine<P> {
        &self.engine
    }

    pub async fn handle(&self, cmd: ChatCommand) -> Result<ChatResult, ChatError> {
        let outcome = self
            .engine
            .run_cycle(&cmd.conversation, &cmd.ui_filter)
            .await?;

        Ok(ChatResult {
            response: outcome.response.clone(),
            is_drink_recommendation: has_drink_line(&outcome.response),
            recommendation: outcome.recommendation.clone(),
            outcome,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::ai::{MockAIProvider, MockError};
    use crate::domain::catalog::{CaffeineProfile, Catalog, CatalogContext, CatalogItem};
    use crate::domain::dialogue::{DialoguePolicy, Turn};

    fn handler(provider: MockAIProvider) -> ChatHandler<MockAIProvider> {
        let catalog = Catalog::new(vec![
            CatalogItem::new("Latte", CaffeineProfile::Caffeinated),
            CatalogItem::new("Mocha", CaffeineProfile::Caffeinated),
        ])
        .unwrap();
        let context = Arc::new(CatalogContext::from_catalog(catalog).unwrap());
        let engine = DialogueEngine::new(Arc::new(provider), context, &DialoguePolicy::default()).unwrap();
        ChatHandler::new(Arc::new(engine))
    }

    fn answered(count: usize) -> Conversation {
        let mut conversation = Conversation::new();
        for i in 0..count {
            conversation.push(Turn::assistant("Question?"));
            conversation.push(Turn::user(format!("answer {}", i)));
        }
        conversation
    }

    #[tokio::test]
    async fn question_is_not_a_recommendation() {
        let handler = handler(MockAIProvider::new().with_response("Describe your perfect first sip."));
        let result = handler.handle(ChatCommand::default()).await.unwrap();

        assert_eq!(result.response, "Describe your perfect first sip.");
        assert!(!result.is_drink_recommendation);
        assert!(result.recommendation.is_none());
    }

    #[tokio::test]
    async fn recommendation_flag_matches_outcome() {
        let handler = handler(MockAIProvider::new().with_response("DRINK: mocha\nWHY: chocolatey\nCONFIDENCE: 8"));
        let result = handler
            .handle(ChatCommand::new(answered(4), UiFilter::any()))
            .await
            .unwrap();

        assert!(result.is_drink_recommendation);
        assert_eq!(result.is_drink_recommendation, result.outcome.is_recommendation());
        assert_eq!(result.recommendation.unwrap().name, "Mocha");
        assert!(result.response.starts_with("DRINK: Mocha\n"));
    }

    #[tokio::test]
    async fn collaborator_failure_maps_to_chat_error() {
        let handler = handler(MockAIProvider::new().with_error(MockError::AuthenticationFailed));
        let err = handler.handle(ChatCommand::default()).await.unwrap_err();
        assert_eq!(err, ChatError::Collaborator(AIError::AuthenticationFailed));
    }

    #[test]
    fn invalid_transition_maps_to_internal() {
        let err: ChatError = DialogueError::InvalidTransition(
            crate::domain::foundation::ValidationError::invalid_format("state_transition", "nope"),
        )
        .into();
        assert!(matches!(err, ChatError::Internal(_)));
    }
}
