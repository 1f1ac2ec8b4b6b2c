//! System instruction construction.
//!
//! Prompts are pure functions of the menu, the allowed names and the gate
//! phase. The same inputs always produce byte-identical text.

use crate::domain::catalog::{AllowList, CatalogItem};

use super::turn::Conversation;

/// The fixed, ordered elicitation questions.
pub const QUESTION_POOL: [&str; 7] = [
    "Tell me about your best cafe memory.",
    "What tastes are you chasing today?",
    "Describe your perfect first sip.",
    "What do you want to taste last after it's gone?",
    "What tiny detail would make you smile?",
    "What's a flavor you've been curious about lately?",
    "What would you change about your usual?",
];

/// User turn appended to the forced call.
pub const FORCED_NUDGE: &str = "Make the final pick now.";

const SCORING_HINTS: &str = "\
Scoring hints (summarized):
- Citrus/zest/clean/crisp/tonic -> sour + citrus + not-milky (tonics).
- Foam/silk/hug/round/vanilla/maple -> creamy + cozy (lattes/hojicha/matcha).
- \"Not sweet/clean\" -> slightly-sweet/medium-sweet only. \"Dessert/treat\" -> sweet.
- \"Curious about yuzu/tonic\" nudges adventurous/tonic options if tags fit.";

const OUTPUT_GRAMMAR: &str = "\
DRINK: [Name only]
WHY: [Under 10 words, casual tone]
CONFIDENCE: [1-10]";

/// Which instruction variant to build.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PromptMode {
    /// Ask a question; the output grammar is not offered.
    Gathering,
    /// Ask or recommend, at the model's discretion.
    MayRecommend,
    /// Recommend now; no further questions.
    Forced,
}

/// Builds system instructions and repair messages.
#[derive(Debug, Clone)]
pub struct PromptBuilder {
    min_questions: usize,
    enumerate_allowed_names: bool,
}

impl PromptBuilder {
    pub fn new(min_questions: usize, enumerate_allowed_names: bool) -> Self {
        Self {
            min_questions,
            enumerate_allowed_names,
        }
    }

    /// Renders menu lines as `name: tag, tag`.
    pub fn render_menu(items: &[&CatalogItem]) -> String {
        items
            .iter()
            .map(|item| item.menu_line())
            .collect::<Vec<_>>()
            .join("\n")
    }

    pub fn system_prompt(&self, menu: &[&CatalogItem], allowed: &AllowList, mode: PromptMode) -> String {
        let min = self.min_questions;
        let mut sections = Vec::with_capacity(8);

        sections.push(
            "You are a drink specialist at an outdoor cafe.\n\
             Ask ONE short, open question at a time, then wait.\n\
             Interpret narrative answers using the menu tags. Recommend ONE drink from MENU."
                .to_string(),
        );

        sections.push(format!("MENU:\n{}", Self::render_menu(menu)));

        if self.enumerate_allowed_names {
            sections.push(format!(
                "ALLOWED NAMES (copy one exactly as written):\n{}",
                allowed.joined()
            ));
        }

        sections.push(format!(
            "IMPORTANT: You MUST ask AT LEAST {min} questions before making a recommendation.\n\
             Never mention any drink that is not on the MENU, anywhere in your reply."
        ));

        match mode {
            PromptMode::Gathering | PromptMode::MayRecommend => {
                let numbered = QUESTION_POOL
                    .iter()
                    .enumerate()
                    .map(|(i, q)| format!("{}. {}", i + 1, q))
                    .collect::<Vec<_>>()
                    .join("\n");
                sections.push(format!(
                    "Question rules:\n\
                     - Only pick from this question list; ask exactly one at a time:\n{numbered}\n\
                     - Encourage story-like answers. No stacked questions.\n\
                     - Ask questions that haven't been asked yet."
                ));
            }
            PromptMode::Forced => {
                sections.push(
                    "You have asked enough questions. Asking another question is not allowed.\n\
                     Choose the single best drink now."
                        .to_string(),
                );
            }
        }

        sections.push(SCORING_HINTS.to_string());

        match mode {
            PromptMode::Gathering => sections.push(
                "Do NOT recommend a drink yet. Reply with your next question only.".to_string(),
            ),
            PromptMode::MayRecommend => sections.push(format!(
                "Only after {min}+ questions, when ready to recommend, output EXACTLY:\n{OUTPUT_GRAMMAR}"
            )),
            PromptMode::Forced => {
                sections.push(format!("Output EXACTLY these three lines and nothing else:\n{OUTPUT_GRAMMAR}"))
            }
        }

        sections.join("\n\n")
    }

    /// The corrective user turn sent after an unresolved pick.
    ///
    /// `candidate` is `None` when the reply named no drink at all.
    pub fn repair_message(&self, candidate: Option<&str>, allowed: &AllowList) -> String {
        let problem = match candidate {
            Some(name) => format!("\"{name}\" is not an allowed name."),
            None => "Your reply did not name a drink.".to_string(),
        };
        format!(
            "{problem} Choose exactly one of these names, spelled exactly as written:\n{}\n\n\
             Reanswer in this exact format and nothing else:\n{OUTPUT_GRAMMAR}",
            allowed.joined()
        )
    }
}

/// The first pool question no assistant turn has asked yet.
///
/// Wraps around to the first question once the pool is exhausted.
pub fn next_unasked_question(conversation: &Conversation) -> &'static str {
    let asked: Vec<String> = conversation
        .assistant_turns()
        .map(|t| normalize_apostrophes(&t.content).to_lowercase())
        .collect();

    QUESTION_POOL
        .iter()
        .copied()
        .find(|question| {
            let question = question.to_lowercase();
            !asked.iter().any(|turn| turn.contains(&question))
        })
        .unwrap_or(QUESTION_POOL[0])
}

fn normalize_apostrophes(text: &str) -> String {
    text.replace(['\u{2019}', '\u{2018}'], "'")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::catalog::{CaffeineProfile, ServingForm};
    use crate::domain::dialogue::turn::Turn;

    fn items() -> Vec<CatalogItem> {
        vec![
            CatalogItem::new("Latte", CaffeineProfile::Caffeinated)
                .with_tags(["creamy", "cozy"])
                .with_forms([ServingForm::Hot, ServingForm::Iced]),
            CatalogItem::new("Yuzu Tonic", CaffeineProfile::NoCaffeine)
                .with_tags(["citrus", "sour", "sparkling"])
                .with_forms([ServingForm::Iced]),
        ]
    }

    fn allowed() -> AllowList {
        AllowList::new(["Latte", "Yuzu Tonic"]).unwrap()
    }

    fn prompt(mode: PromptMode) -> String {
        let items = items();
        let menu: Vec<&CatalogItem> = items.iter().collect();
        PromptBuilder::new(4, true).system_prompt(&menu, &allowed(), mode)
    }

    #[test]
    fn menu_lines_use_name_colon_tags() {
        let items = items();
        let menu: Vec<&CatalogItem> = items.iter().collect();
        assert_eq!(
            PromptBuilder::render_menu(&menu),
            "Latte: creamy, cozy\nYuzu Tonic: citrus, sour, sparkling"
        );
    }

    #[test]
    fn every_mode_states_minimum_and_forbids_off_menu_items() {
        for mode in [PromptMode::Gathering, PromptMode::MayRecommend, PromptMode::Forced] {
            let text = prompt(mode);
            assert!(text.contains("AT LEAST 4 questions"), "{:?}", mode);
            assert!(text.contains("not on the MENU"), "{:?}", mode);
            assert!(text.contains("Latte, Yuzu Tonic"), "{:?}", mode);
        }
    }

    #[test]
    fn gathering_prompt_never_offers_grammar() {
        let text = prompt(PromptMode::Gathering);
        assert!(!text.contains("DRINK:"));
        assert!(!text.contains("CONFIDENCE:"));
        assert!(text.contains(QUESTION_POOL[6]));
    }

    #[test]
    fn recommending_prompts_carry_grammar() {
        assert!(prompt(PromptMode::MayRecommend).contains("DRINK: [Name only]"));
        let forced = prompt(PromptMode::Forced);
        assert!(forced.contains("CONFIDENCE: [1-10]"));
        assert!(forced.contains("not allowed"));
        assert!(!forced.contains(QUESTION_POOL[0]));
    }

    #[test]
    fn allowed_names_can_be_left_out() {
        let items = items();
        let menu: Vec<&CatalogItem> = items.iter().collect();
        let text = PromptBuilder::new(4, false).system_prompt(&menu, &allowed(), PromptMode::MayRecommend);
        assert!(!text.contains("ALLOWED NAMES"));
    }

    #[test]
    fn prompt_is_deterministic() {
        assert_eq!(prompt(PromptMode::MayRecommend), prompt(PromptMode::MayRecommend));
    }

    #[test]
    fn repair_message_names_candidate_and_full_list() {
        let message = PromptBuilder::new(4, true).repair_message(Some("Flat White"), &allowed());
        assert!(message.starts_with("\"Flat White\" is not an allowed name."));
        assert!(message.contains("Latte, Yuzu Tonic"));
        assert!(message.contains("WHY: [Under 10 words, casual tone]"));
    }

    #[test]
    fn repair_message_without_candidate() {
        let message = PromptBuilder::new(4, true).repair_message(None, &allowed());
        assert!(message.starts_with("Your reply did not name a drink."));
    }

    #[test]
    fn next_question_skips_already_asked() {
        let conversation = Conversation::from_turns(vec![
            Turn::assistant("Tell me about your best cafe memory."),
            Turn::user("Kyoto in the rain"),
            Turn::assistant("Nice! What tastes are you chasing today?"),
            Turn::user("strawberry"),
        ]);
        assert_eq!(next_unasked_question(&conversation), QUESTION_POOL[2]);
    }

    #[test]
    fn next_question_matches_curly_apostrophes() {
        let mut turns: Vec<Turn> = QUESTION_POOL[..3].iter().map(|q| Turn::assistant(*q)).collect();
        turns.push(Turn::assistant("What do you want to taste last after it\u{2019}s gone?"));
        let conversation = Conversation::from_turns(turns);
        assert_eq!(next_unasked_question(&conversation), QUESTION_POOL[4]);
    }

    #[test]
    fn next_question_wraps_when_pool_is_exhausted() {
        let turns = QUESTION_POOL.iter().map(|q| Turn::assistant(*q)).collect();
        assert_eq!(next_unasked_question(&Conversation::from_turns(turns)), QUESTION_POOL[0]);
    }
}
