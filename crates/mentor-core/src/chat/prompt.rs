//! Advisor prompt builder.
//!
//! Transforms a stored history plus a new user message into the exact
//! payload sent to the model gateway: the replayed context in order,
//! followed by the new message wrapped in the fixed MentorAI persona
//! instruction. Pure and stateless -- same inputs always produce the same
//! request.

use mentor_types::chat::Turn;
use mentor_types::llm::{CompletionRequest, Message, MessageRole};

/// The exact phrase the model must answer with for out-of-scope requests.
///
/// The persona template mandates this verbatim, with no other content
/// appended. Enforcement is delegated to the model's instruction-following;
/// the deterministic guarantee here is only that every built prompt carries
/// the instruction.
pub const OUT_OF_SCOPE_REFUSAL: &str =
    "I am a strategic startup advisor and cannot provide information on this subject.";

/// Builds gateway requests from stored history and a new user message.
pub struct AdvisorPromptBuilder;

impl AdvisorPromptBuilder {
    /// Reconstruct the prior conversation as ordered wire messages.
    ///
    /// Each turn's role and text are carried through unchanged. The Gemini
    /// protocol is order-sensitive: prior turns are replayed as
    /// alternating-role context in strict chronological order.
    pub fn replay(history: &[Turn]) -> Vec<Message> {
        history
            .iter()
            .map(|turn| Message {
                role: turn.role,
                content: turn.text.clone(),
            })
            .collect()
    }

    /// Wrap the new user message in the fixed persona instruction.
    pub fn wrap(message: &str) -> String {
        format!(
            "You are a specialized AI assistant named MentorAI. Your purpose is to act as a \
             strategic startup advisor for entrepreneurs.\n\
             You provide detailed analysis on market strategy, competitor analysis (in a table), \
             idea viability, risks, and benefits for any business idea presented to you.\n\
             \n\
             Crucially, you must only respond to requests related to business, startups, and \
             entrepreneurship. If a user asks a question on any other topic, you must respond \
             with the exact phrase: \"{OUT_OF_SCOPE_REFUSAL}\" Do not provide any other response.\n\
             \n\
             User's business idea or request: {message}\n"
        )
    }

    /// Build the complete gateway request for one round.
    pub fn build(history: &[Turn], message: &str) -> CompletionRequest {
        let mut messages = Self::replay(history);
        messages.push(Message {
            role: MessageRole::User,
            content: Self::wrap(message),
        });
        CompletionRequest { messages }
    }
}
