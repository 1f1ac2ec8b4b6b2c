//! DialogueEngine - runs one request/response cycle against the collaborator.
//!
//! The cycle is an explicit state machine over [`CycleStage`]. Each step
//! names the stage it moves to, and [`StageTracker`] rejects any move the
//! stage graph does not allow, so "one repair, then fallback" holds
//! structurally rather than by branch ordering.
//!
//! The engine holds no per-conversation state. It reads the caller's
//! conversation and never modifies it; a collaborator failure leaves the
//! caller free to retry the whole cycle.

use std::sync::Arc;

use serde::Serialize;
use thiserror::Error;
use tracing::Instrument;

use crate::domain::catalog::{AllowList, CatalogContext, CatalogItem, UiFilter};
use crate::domain::dialogue::{
    has_drink_line, next_unasked_question, strip_grammar_lines, AcceptedOutput, Conversation,
    CyclePath, CycleStage, DialoguePolicy, FallbackSelector, GatePhase, OutputValidator,
    PromptBuilder, PromptMode, QuestionGate, Recommendation, StageTracker, Validation,
    FORCED_NUDGE,
};
use crate::domain::foundation::{CycleId, ValidationError};
use crate::ports::{AIError, AIProvider, CallKind, CompletionRequest, MessageRole, RequestMetadata};

/// Errors surfaced by a dialogue cycle.
///
/// Unresolvable picks are not errors: they end in the fallback path.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DialogueError {
    /// The collaborator call failed. The conversation is untouched.
    #[error("collaborator call failed: {0}")]
    Collaborator(#[from] AIError),

    #[error("illegal cycle transition: {0}")]
    InvalidTransition(#[from] ValidationError),
}

/// Everything one cycle produced.
#[derive(Debug, Clone, Serialize)]
pub struct CycleOutcome {
    pub cycle_id: CycleId,
    /// Text to show the user: a question or the validated grammar lines.
    pub response: String,
    /// Present exactly when the path is a recommendation path.
    pub recommendation: Option<Recommendation>,
    pub path: CyclePath,
    pub phase: GatePhase,
    pub stages: Vec<CycleStage>,
    pub collaborator_calls: usize,
}

impl CycleOutcome {
    pub fn is_recommendation(&self) -> bool {
        self.path.is_recommendation()
    }
}

/// Per-cycle view of the catalog after applying the UI filter.
struct CycleCatalog<'a> {
    menu: Vec<&'a CatalogItem>,
    /// Names listed in prompts.
    prompt_names: AllowList,
    /// Names the validator accepts.
    allow_list: AllowList,
}

enum Step {
    Ask,
    Force,
    Validate { text: String },
    Repair { rejected: String, candidate: Option<String> },
    Revalidate { text: String },
    Fallback,
    Finish(Finish),
}

struct Finish {
    response: String,
    recommendation: Option<Recommendation>,
    path: CyclePath,
}

/// Orchestrates gate, prompts, validation, repair and fallback.
pub struct DialogueEngine<P: ?Sized + AIProvider> {
    provider: Arc<P>,
    catalog: Arc<CatalogContext>,
    filter_affects_allow_list: bool,
    gate: QuestionGate,
    prompts: PromptBuilder,
    validator: OutputValidator,
    fallback: FallbackSelector,
}

impl<P: ?Sized + AIProvider> DialogueEngine<P> {
    pub fn new(
        provider: Arc<P>,
        catalog: Arc<CatalogContext>,
        policy: &DialoguePolicy,
    ) -> Result<Self, ValidationError> {
        Ok(Self {
            provider,
            catalog,
            filter_affects_allow_list: policy.filter_affects_allow_list,
            gate: policy.gate()?,
            prompts: policy.prompt_builder(),
            validator: policy.validator(),
            fallback: policy.fallback_selector(),
        })
    }

    pub fn gate(&self) -> &QuestionGate {
        &self.gate
    }

    pub fn catalog(&self) -> &CatalogContext {
        &self.catalog
    }

    /// Runs one cycle over the full conversation so far.
    pub async fn run_cycle(
        &self,
        conversation: &Conversation,
        filter: &UiFilter,
    ) -> Result<CycleOutcome, DialogueError> {
        let cycle_id = CycleId::new();
        let user_turns = conversation.user_turn_count();
        let phase = self.gate.phase(user_turns);

        let span = tracing::info_span!("dialogue_cycle", %cycle_id, user_turns, ?phase);
        self.drive(cycle_id, phase, conversation, filter)
            .instrument(span)
            .await
    }

    async fn drive(
        &self,
        cycle_id: CycleId,
        phase: GatePhase,
        conversation: &Conversation,
        filter: &UiFilter,
    ) -> Result<CycleOutcome, DialogueError> {
        let view = self.cycle_catalog(filter);
        let mut tracker = StageTracker::new();
        let mut calls = 0usize;
        let mut step = Step::Ask;

        let finish = loop {
            step = match step {
                Step::Ask => {
                    let mode = match phase {
                        GatePhase::Gathering => PromptMode::Gathering,
                        GatePhase::MayRecommend | GatePhase::ForceRecommend => PromptMode::MayRecommend,
                    };
                    let request = self
                        .request(CallKind::Question, cycle_id, &view, mode)
                        .with_turns(conversation.turns());
                    let text = self.complete(request, &mut calls).await?;

                    if phase.allows_recommendation() && has_drink_line(&text) {
                        tracker.advance(CycleStage::Validating)?;
                        Step::Validate { text }
                    } else if phase == GatePhase::ForceRecommend {
                        tracker.advance(CycleStage::ForceRecommend)?;
                        Step::Force
                    } else {
                        if has_drink_line(&text) {
                            tracing::debug!("Discarding recommendation emitted before minimum questions");
                        }
                        tracker.advance(CycleStage::Done)?;
                        Step::Finish(Finish {
                            response: question_reply(&text, conversation),
                            recommendation: None,
                            path: CyclePath::Question,
                        })
                    }
                }

                Step::Force => {
                    let request = self
                        .request(CallKind::Forced, cycle_id, &view, PromptMode::Forced)
                        .with_turns(conversation.turns())
                        .with_message(MessageRole::User, FORCED_NUDGE);
                    let text = self.complete(request, &mut calls).await?;
                    tracker.advance(CycleStage::Validating)?;
                    Step::Validate { text }
                }

                Step::Validate { text } => match self.validate(&text, &view) {
                    Validation::Accepted(output) => {
                        tracker.advance(CycleStage::Done)?;
                        let via = output.via;
                        Step::Finish(accepted(output, CyclePath::Accepted { via }))
                    }
                    Validation::Rejected { candidate } => {
                        tracker.advance(CycleStage::Repairing)?;
                        Step::Repair {
                            rejected: text,
                            candidate: Some(candidate).filter(|c| !c.is_empty()),
                        }
                    }
                    // Only a forced reply can get here without a DRINK line.
                    Validation::NotARecommendation => {
                        tracker.advance(CycleStage::Repairing)?;
                        Step::Repair {
                            rejected: text,
                            candidate: None,
                        }
                    }
                },

                Step::Repair { rejected, candidate } => {
                    tracing::warn!(
                        candidate = candidate.as_deref().unwrap_or("<none>"),
                        "Recommendation outside allow list; issuing repair call"
                    );
                    let message = self.prompts.repair_message(candidate.as_deref(), &view.prompt_names);
                    let request = self
                        .request(CallKind::Repair, cycle_id, &view, PromptMode::Forced)
                        .with_turns(conversation.turns())
                        .with_message(MessageRole::Assistant, rejected)
                        .with_message(MessageRole::User, message);
                    let text = self.complete(request, &mut calls).await?;
                    tracker.advance(CycleStage::Revalidating)?;
                    Step::Revalidate { text }
                }

                Step::Revalidate { text } => match self.validate(&text, &view) {
                    Validation::Accepted(output) => {
                        tracker.advance(CycleStage::Done)?;
                        let via = output.via;
                        Step::Finish(accepted(output, CyclePath::Repaired { via }))
                    }
                    Validation::Rejected { .. } | Validation::NotARecommendation => {
                        tracker.advance(CycleStage::Fallback)?;
                        Step::Fallback
                    }
                },

                Step::Fallback => {
                    let recommendation = self
                        .fallback
                        .select(&conversation.lowercase_text(), &view.allow_list);
                    tracing::warn!(
                        drink = %recommendation.name,
                        "Repair failed to resolve; using fallback selection"
                    );
                    tracker.advance(CycleStage::Done)?;
                    Step::Finish(Finish {
                        response: recommendation.render(),
                        recommendation: Some(recommendation),
                        path: CyclePath::Fallback,
                    })
                }

                Step::Finish(finish) => break finish,
            };
        };

        tracing::info!(
            path = ?finish.path,
            drink = finish.recommendation.as_ref().map(|r| r.name.as_str()),
            collaborator_calls = calls,
            "Dialogue cycle complete"
        );

        Ok(CycleOutcome {
            cycle_id,
            response: finish.response,
            recommendation: finish.recommendation,
            path: finish.path,
            phase,
            stages: tracker.into_visited(),
            collaborator_calls: calls,
        })
    }

    fn cycle_catalog(&self, filter: &UiFilter) -> CycleCatalog<'_> {
        let catalog = self.catalog.catalog();

        let mut menu = catalog.filtered(filter);
        if menu.is_empty() {
            tracing::warn!(?filter, "UI filter excludes every catalog item; showing full menu");
            menu = catalog.items().iter().collect();
        }

        let allow_list = self
            .catalog
            .effective_allow_list(filter, self.filter_affects_allow_list)
            .into_owned();

        let prompt_names = allow_list
            .restricted_to(|name| {
                catalog.get(name).is_none() || menu.iter().any(|item| item.name == name)
            })
            .unwrap_or_else(|| allow_list.clone());

        CycleCatalog {
            menu,
            prompt_names,
            allow_list,
        }
    }

    fn request(
        &self,
        kind: CallKind,
        cycle_id: CycleId,
        view: &CycleCatalog<'_>,
        mode: PromptMode,
    ) -> CompletionRequest {
        let system_prompt = self.prompts.system_prompt(&view.menu, &view.prompt_names, mode);
        CompletionRequest::new(kind, RequestMetadata::for_cycle(cycle_id)).with_system_prompt(system_prompt)
    }

    async fn complete(&self, request: CompletionRequest, calls: &mut usize) -> Result<String, AIError> {
        let kind = request.kind;
        tracing::debug!(
            ?kind,
            prompt_tokens = request
                .system_prompt
                .as_deref()
                .map(|p| self.provider.estimate_tokens(p))
                .unwrap_or_default(),
            messages = request.messages.len(),
            "Calling collaborator"
        );

        *calls += 1;
        let response = self.provider.complete(request).await.map_err(|err| {
            tracing::debug!(?kind, error = %err, "Collaborator call failed");
            err
        })?;
        tracing::debug!(
            ?kind,
            model = %response.model,
            finish_reason = ?response.finish_reason,
            prompt_tokens = response.usage.prompt_tokens,
            completion_tokens = response.usage.completion_tokens,
            "Collaborator replied"
        );
        Ok(response.content)
    }

    fn validate(&self, text: &str, view: &CycleCatalog<'_>) -> Validation {
        self.validator
            .validate(text, &view.allow_list, self.catalog.aliases())
    }
}

fn accepted(output: AcceptedOutput, path: CyclePath) -> Finish {
    Finish {
        response: output.text,
        recommendation: Some(output.recommendation),
        path,
    }
}

/// A reply that must be a question: grammar lines are dropped, and an empty
/// remainder is replaced with the next unasked pool question.
fn question_reply(text: &str, conversation: &Conversation) -> String {
    let stripped = strip_grammar_lines(text);
    if stripped.is_empty() {
        next_unasked_question(conversation).to_string()
    } else {
        stripped
    }
}
