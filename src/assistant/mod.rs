//! Assistant avatar state
//!
//! Holds the active character and animation status of the assistant avatar
//! shown by the frontend. The store is an explicit container owned by
//! [`crate::AppState`] and handed to handlers; there is no global instance.

use crate::types::{AppError, Result};
use parking_lot::RwLock;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Character shown when nothing else has been selected
pub const DEFAULT_CHARACTER: &str = "pasalku";

/// What the avatar is currently doing
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum AssistantStatus {
    #[default]
    Idle,
    Listening,
    Thinking,
    Speaking,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct AssistantState {
    pub character: String,
    pub status: AssistantStatus,
}

impl Default for AssistantState {
    fn default() -> Self {
        Self {
            character: DEFAULT_CHARACTER.to_string(),
            status: AssistantStatus::default(),
        }
    }
}

/// Partial update; absent fields are left untouched.
#[derive(Debug, Clone, Default, Serialize, Deserialize, ToSchema)]
pub struct AssistantStateUpdate {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub character: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<AssistantStatus>,
}

#[derive(Debug, Default)]
pub struct AssistantStore {
    state: RwLock<AssistantState>,
}

impl AssistantStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_state(state: AssistantState) -> Self {
        Self {
            state: RwLock::new(state),
        }
    }

    /// Copy of the current state
    pub fn snapshot(&self) -> AssistantState {
        self.state.read().clone()
    }

    pub fn set_character(&self, character: &str) -> Result<AssistantState> {
        let character = validate_character(character)?;
        let mut state = self.state.write();
        state.character = character;
        Ok(state.clone())
    }

    pub fn set_status(&self, status: AssistantStatus) -> AssistantState {
        let mut state = self.state.write();
        state.status = status;
        state.clone()
    }

    /// Apply a partial update atomically.
    ///
    /// Rejects empty updates and blank characters without touching the state.
    pub fn apply(&self, update: AssistantStateUpdate) -> Result<AssistantState> {
        if update.character.is_none() && update.status.is_none() {
            return Err(AppError::InvalidInput(
                "update must set 'character' or 'status'".to_string(),
            ));
        }

        let character = update
            .character
            .as_deref()
            .map(validate_character)
            .transpose()?;

        let mut state = self.state.write();
        if let Some(character) = character {
            state.character = character;
        }
        if let Some(status) = update.status {
            state.status = status;
        }
        Ok(state.clone())
    }

    pub fn reset(&self) -> AssistantState {
        let mut state = self.state.write();
        *state = AssistantState::default();
        state.clone()
    }
}

fn validate_character(character: &str) -> Result<String> {
    let character = character.trim();
    if character.is_empty() {
        return Err(AppError::InvalidInput(
            "character must not be empty".to_string(),
        ));
    }
    Ok(character.to_string())
}
