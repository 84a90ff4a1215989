//! Diagnostics reported while binding names
//!
//! Note: miette's `#[derive(Diagnostic)]` reads these fields through the
//! generated code, which the unused-assignment lint cannot see.

#![allow(unused_assignments, reason = "fields are read by the Diagnostic derive")]

use fe_decl::ScopeError;
use fe_span::Location;
use miette::Diagnostic;
use std::mem;
use thiserror::Error;

/// Largest edit distance at which a visible name is offered as a suggestion
const MAX_SUGGESTION_DISTANCE: usize = 3;

/// Errors found while binding a translation unit
#[derive(Debug, Clone, PartialEq, Eq, Error, Diagnostic)]
pub enum BindError {
    /// Redeclaration or scope misuse reported by the scope itself
    #[error(transparent)]
    #[diagnostic(transparent)]
    Scope(#[from] ScopeError),

    /// Identifier used with no visible declaration
    #[error("use of undeclared identifier `{name}`")]
    #[diagnostic(code(bind::undefined))]
    Undefined {
        /// The identifier that was used
        name: String,
        /// Where it was used
        location: Option<Location>,
        /// Visible names close to `name`, nearest first
        suggestions: Vec<String>,
        /// Rendered "did you mean" hint
        #[help]
        help: Option<String>,
    },

    /// A function parameter was given a default value
    #[error("parameter `{name}` cannot have an initializer")]
    #[diagnostic(
        code(bind::initialized_parameter),
        help("remove the initializer from `{name}`")
    )]
    InitializedParameter {
        /// The parameter's name
        name: String,
        /// Where the parameter was declared
        location: Option<Location>,
    },
}

impl BindError {
    /// Builds an undefined-identifier error with its hint filled in
    #[must_use]
    pub fn undefined(
        name: impl Into<String>,
        location: Option<Location>,
        suggestions: Vec<String>,
    ) -> Self {
        let help = (!suggestions.is_empty()).then(|| {
            let quoted: Vec<_> = suggestions.iter().map(|name| format!("`{name}`")).collect();
            format!("did you mean {}?", quoted.join(" or "))
        });
        Self::Undefined {
            name: name.into(),
            location,
            suggestions,
            help,
        }
    }

    /// Where the offending code was written, when known
    #[must_use]
    pub fn location(&self) -> Option<Location> {
        match self {
            Self::Scope(error) => error.location(),
            Self::Undefined { location, .. } | Self::InitializedParameter { location, .. } => {
                *location
            }
        }
    }
}

/// Picks up to `limit` candidates close to `target`, nearest first
///
/// Ties keep the order the candidates were given in.
pub fn compute_suggestions<'name>(
    target: &str,
    candidates: impl IntoIterator<Item = &'name str>,
    limit: usize,
) -> Vec<String> {
    let mut scored: Vec<(&str, usize)> = candidates
        .into_iter()
        .filter(|candidate| *candidate != target)
        .map(|candidate| (candidate, levenshtein_distance(target, candidate)))
        .filter(|(_, distance)| *distance <= MAX_SUGGESTION_DISTANCE)
        .collect();

    scored.sort_by_key(|(_, distance)| *distance);
    let mut suggestions = Vec::with_capacity(limit.min(scored.len()));
    for (candidate, _) in scored {
        if suggestions.len() == limit {
            break;
        }
        if !suggestions.iter().any(|seen| seen == candidate) {
            suggestions.push(candidate.to_string());
        }
    }
    suggestions
}

/// Compute Levenshtein distance between two strings
fn levenshtein_distance(source: &str, target: &str) -> usize {
    let target_chars: Vec<char> = target.chars().collect();
    let mut previous: Vec<usize> = (0..=target_chars.len()).collect();
    let mut current = vec![0; target_chars.len() + 1];

    for (idx, source_char) in source.chars().enumerate() {
        current[0] = idx + 1;
        for (jdx, target_char) in target_chars.iter().enumerate() {
            let cost = usize::from(source_char != *target_char);
            current[jdx + 1] = (previous[jdx + 1] + 1)
                .min(current[jdx] + 1)
                .min(previous[jdx] + cost);
        }
        mem::swap(&mut previous, &mut current);
    }

    previous[target_chars.len()]
}
