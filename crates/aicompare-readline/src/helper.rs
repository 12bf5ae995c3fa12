use std::borrow::Cow::{self, Borrowed, Owned};
use std::sync::{Arc, PoisonError, RwLock};

use colored::Colorize;
use rustyline::completion::{Completer, Pair};
use rustyline::highlight::Highlighter;
use rustyline::hint::Hinter;
use rustyline::validate::Validator;
use rustyline::{Context, Helper};

use aicompare_core::comparison::ComparisonState;

use crate::command::COMMANDS;

/// Commands whose argument is a model name from the current answers.
const MODEL_COMMANDS: [&str; 2] = ["/humanize", "/copy"];

/// Line editing support for the REPL.
///
/// Completes slash commands, and model names after `/humanize` and
/// `/copy`. Clones share the model list, so the REPL keeps one handle and
/// refreshes it after every render.
#[derive(Clone, Default)]
pub struct CliHelper {
    models: Arc<RwLock<Vec<String>>>,
}

impl CliHelper {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replaces the completable model names with those shown in `state`.
    pub fn track_models(&self, state: &ComparisonState) {
        let models = state.answers.iter().map(|record| record.model.clone()).collect();
        *self.models.write().unwrap_or_else(PoisonError::into_inner) = models;
    }

    /// Start offset and replacement texts for the input left of the cursor.
    fn candidates(&self, line: &str) -> (usize, Vec<String>) {
        if line.starts_with('/') && !line.contains(char::is_whitespace) {
            let commands = COMMANDS
                .iter()
                .filter(|cmd| cmd.starts_with(line))
                .map(|cmd| format!("{cmd} "))
                .collect();
            return (0, commands);
        }

        let Some((command, rest)) = line.split_once(char::is_whitespace) else {
            return (0, Vec::new());
        };
        if !MODEL_COMMANDS.contains(&command) {
            return (0, Vec::new());
        }

        let prefix = rest.trim_start();
        let start = line.len() - prefix.len();
        let needle = prefix.to_lowercase();
        let models = self.models.read().unwrap_or_else(PoisonError::into_inner);
        let matches = models
            .iter()
            .filter(|model| model.to_lowercase().starts_with(&needle))
            .cloned()
            .collect();
        (start, matches)
    }
}

impl Helper for CliHelper {}

impl Completer for CliHelper {
    type Candidate = Pair;

    fn complete(
        &self,
        line: &str,
        pos: usize,
        _ctx: &Context<'_>,
    ) -> rustyline::Result<(usize, Vec<Pair>)> {
        let (start, replacements) = self.candidates(&line[..pos]);
        let pairs = replacements
            .into_iter()
            .map(|replacement| Pair {
                display: replacement.trim_end().to_string(),
                replacement,
            })
            .collect();
        Ok((start, pairs))
    }
}

impl Highlighter for CliHelper {
    fn highlight<'l>(&self, line: &'l str, _pos: usize) -> Cow<'l, str> {
        if line.starts_with('/') {
            Owned(line.bright_cyan().to_string())
        } else {
            Borrowed(line)
        }
    }

    fn highlight_char(&self, _line: &str, _pos: usize, _forced: bool) -> bool {
        true
    }
}

impl Hinter for CliHelper {
    type Hint = String;

    /// Remainder of the single unambiguous candidate.
    fn hint(&self, line: &str, pos: usize, _ctx: &Context<'_>) -> Option<String> {
        if pos < line.len() {
            return None;
        }
        let (start, candidates) = self.candidates(line);
        let [only] = candidates.as_slice() else {
            return None;
        };
        let rest = only.trim_end().strip_prefix(&line[start..])?;
        (!rest.is_empty()).then(|| rest.to_string())
    }
}

impl Validator for CliHelper {}
