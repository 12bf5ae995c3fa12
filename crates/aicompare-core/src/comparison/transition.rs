//! Pure state transitions for the comparison view-model.
//!
//! `transition` never performs I/O: it returns the next state together with
//! the effects the controller has to run. Responses carry the generation
//! they were issued under; a response from an older generation is dropped.
//! The humanize marker is only released by the request that set it, so at
//! most one humanize request is ever outstanding.

use super::effect::Effect;
use super::event::Event;
use super::state::{ComparisonState, FetchPhase, HumanizeInFlight};
use crate::answer::dedup_by_model;
use crate::notify::Notification;

/// Applies `event` to `state`.
pub fn transition(state: &ComparisonState, event: Event) -> (ComparisonState, Vec<Effect>) {
    let mut next = state.clone();
    let mut effects = Vec::new();

    match event {
        Event::QuestionEdited(text) => {
            next.question = text;
        }

        Event::Submit => {
            let question = state.question.trim();
            if question.is_empty() || state.is_loading() {
                return (next, effects);
            }

            next.generation = state.generation + 1;
            next.answers.clear();
            next.fetch = FetchPhase::Fetching;
            next.asked_question = Some(question.to_string());
            effects.push(Effect::FetchAnswers {
                generation: next.generation,
                question: question.to_string(),
            });
        }

        Event::AnswersLoaded {
            generation,
            answers,
        } => {
            if generation != state.generation || !state.is_loading() {
                tracing::debug!(generation, current = state.generation, "Discarding stale answers");
                return (next, effects);
            }
            next.answers = dedup_by_model(answers);
            next.fetch = FetchPhase::Populated;
        }

        Event::AnswersFailed {
            generation,
            message,
        } => {
            if generation != state.generation || !state.is_loading() {
                tracing::debug!(generation, "Discarding stale fetch failure");
                return (next, effects);
            }
            tracing::warn!(error = %message, "Fetching answers failed");
            next.answers.clear();
            next.fetch = FetchPhase::Failed;
            effects.push(Effect::Notify(Notification::fetch_failed()));
        }

        Event::HumanizeRequested(model) => {
            if !state.can_humanize(&model) {
                return (next, effects);
            }
            let Some(question) = state.asked_question.clone() else {
                return (next, effects);
            };
            next.humanizing = Some(HumanizeInFlight {
                model: model.clone(),
                generation: state.generation,
            });
            effects.push(Effect::Humanize {
                generation: state.generation,
                question,
                model,
            });
        }

        Event::HumanizeSucceeded {
            generation,
            model,
            text,
        } => {
            release_marker(&mut next, &model, generation);
            if generation != state.generation {
                tracing::debug!(%model, generation, "Discarding stale humanize result");
                return (next, effects);
            }
            match next.answers.iter_mut().find(|record| record.model == model) {
                Some(record) => {
                    record.apply_humanized(text);
                }
                None => tracing::warn!(%model, "Humanize result for unknown model"),
            }
        }

        Event::HumanizeFailed {
            generation,
            model,
            message,
        } => {
            release_marker(&mut next, &model, generation);
            if generation != state.generation {
                return (next, effects);
            }
            tracing::warn!(%model, error = %message, "Humanize failed");
            effects.push(Effect::Notify(Notification::humanize_failed()));
        }

        Event::CopyRequested(model) => {
            if let Some(record) = state.answer(&model) {
                effects.push(Effect::CopyToClipboard(record.copy_text().to_string()));
            }
        }

        Event::Reset => {
            next.generation = state.generation + 1;
            next.answers.clear();
            next.fetch = FetchPhase::Idle;
            next.asked_question = None;
        }
    }

    (next, effects)
}

fn release_marker(state: &mut ComparisonState, model: &str, generation: u64) {
    let issued_by_this_request = state
        .humanizing
        .as_ref()
        .is_some_and(|pending| pending.model == model && pending.generation == generation);
    if issued_by_this_request {
        state.humanizing = None;
    }
}
