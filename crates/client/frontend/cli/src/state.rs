//! Application state for mode management.

/// Top-level application mode determining input handling.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub enum AppMode {
    /// Navigation, claiming and paging.
    #[default]
    Normal,
    /// Typing the name of a new user.
    AddingUser { input: String },
}

/// Mutable UI-only state. Everything synced with the server lives in the
/// runtime snapshot instead.
#[derive(Clone, Debug, Default)]
pub struct AppState {
    pub mode: AppMode,
}

impl AppState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn start_adding(&mut self) {
        self.mode = AppMode::AddingUser {
            input: String::new(),
        };
    }

    pub fn cancel_adding(&mut self) {
        self.mode = AppMode::Normal;
    }

    /// What to submit. The text stays in place until the server confirms
    /// the user, so a rejected name can be corrected and sent again.
    pub fn submission(&self) -> Option<String> {
        self.input().map(str::to_owned)
    }

    /// Close the input once the server created `name`. Returns whether the
    /// input was closed; text that no longer matches is left alone.
    pub fn user_added(&mut self, name: &str) -> bool {
        let confirmed =
            matches!(&self.mode, AppMode::AddingUser { input } if input.trim() == name);
        if confirmed {
            self.mode = AppMode::Normal;
        }
        confirmed
    }

    pub fn input(&self) -> Option<&str> {
        match &self.mode {
            AppMode::AddingUser { input } => Some(input),
            AppMode::Normal => None,
        }
    }

    pub fn input_mut(&mut self) -> Option<&mut String> {
        match &mut self.mode {
            AppMode::AddingUser { input } => Some(input),
            AppMode::Normal => None,
        }
    }

    pub fn is_adding(&self) -> bool {
        matches!(self.mode, AppMode::AddingUser { .. })
    }
}
