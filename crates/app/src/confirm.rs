//! Confirmation dialog state.

pub const DEFAULT_MESSAGE: &str = "¿Estás seguro de esta acción?";
pub const CONFIRM_TEXT: &str = "Confirmar";
pub const CANCEL_TEXT: &str = "Cancelar";

/// A yes/no prompt guarding one pending action on `T`.
#[derive(Debug, Clone)]
pub struct ConfirmDialog<T> {
    message: String,
    confirm_text: String,
    cancel_text: String,
    pending: Option<T>,
}

impl<T> Default for ConfirmDialog<T> {
    fn default() -> Self {
        Self {
            message: DEFAULT_MESSAGE.to_string(),
            confirm_text: CONFIRM_TEXT.to_string(),
            cancel_text: CANCEL_TEXT.to_string(),
            pending: None,
        }
    }
}

impl<T> ConfirmDialog<T> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Show the dialog for `target`, replacing any previous one.
    pub fn open(&mut self, target: T) {
        self.pending = Some(target);
    }

    pub fn is_visible(&self) -> bool {
        self.pending.is_some()
    }

    pub fn pending(&self) -> Option<&T> {
        self.pending.as_ref()
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    pub fn confirm_text(&self) -> &str {
        &self.confirm_text
    }

    pub fn cancel_text(&self) -> &str {
        &self.cancel_text
    }

    /// Hide the dialog and hand back the target to act on.
    pub fn confirm(&mut self) -> Option<T> {
        self.pending.take()
    }

    pub fn cancel(&mut self) {
        self.pending = None;
    }
}
