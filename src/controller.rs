use log::debug;
use std::sync::Arc;

use crate::error::GenieError;
use crate::generator::RecipeSource;
use crate::model::Recipe;

/// Example inputs offered to the user
pub const EXAMPLE_INGREDIENTS: [&str; 4] = [
    "peito de frango, arroz, brócolis, molho de soja",
    "ovos, queijo, espinafre, pão",
    "carne moída, macarrão, molho de tomate, cebola",
    "grão de bico, tahine, limão, alho",
];

const IDLE_MESSAGE: &str =
    "Sua criação culinária o aguarda!\nInsira seus ingredientes acima para começar.\n";

/// What the view currently shows. Exactly one is active at a time.
#[derive(Debug, Clone, PartialEq)]
pub enum ViewState {
    Idle,
    Loading,
    Error(String),
    Result(Recipe),
}

/// Keys the ingredients field reacts to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Key {
    Enter,
    Backspace,
    Char(char),
}

/// A key press, with the state of the Shift modifier
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KeyPress {
    pub key: Key,
    pub shift: bool,
}

impl KeyPress {
    pub fn new(key: Key) -> Self {
        KeyPress { key, shift: false }
    }

    pub fn with_shift(key: Key) -> Self {
        KeyPress { key, shift: true }
    }
}

/// Owns the form state and drives one recipe request at a time.
pub struct Controller {
    source: Arc<dyn RecipeSource>,
    input: String,
    state: ViewState,
}

impl Controller {
    pub fn new(source: Arc<dyn RecipeSource>) -> Self {
        Controller {
            source,
            input: String::new(),
            state: ViewState::Idle,
        }
    }

    pub fn input(&self) -> &str {
        &self.input
    }

    pub fn state(&self) -> &ViewState {
        &self.state
    }

    pub fn is_loading(&self) -> bool {
        self.state == ViewState::Loading
    }

    /// Whether the submit control is enabled
    pub fn can_submit(&self) -> bool {
        !self.is_loading() && !self.input.trim().is_empty()
    }

    /// Replace the input text. Ignored while a request is outstanding.
    pub fn set_input(&mut self, text: impl Into<String>) {
        if !self.is_loading() {
            self.input = text.into();
        }
    }

    /// Fill the input with one of [`EXAMPLE_INGREDIENTS`]
    pub fn use_example(&mut self, index: usize) -> bool {
        match EXAMPLE_INGREDIENTS.get(index) {
            Some(example) if !self.is_loading() => {
                self.input = example.to_string();
                true
            }
            _ => false,
        }
    }

    /// Start a request.
    ///
    /// Returns the ingredients to send when the view moved to `Loading`. Blank
    /// input moves the view to `Error` instead, and nothing happens while a
    /// request is already outstanding.
    pub fn begin(&mut self) -> Option<String> {
        if self.is_loading() {
            debug!("Ignoring submission while a request is outstanding");
            return None;
        }

        if self.input.trim().is_empty() {
            self.state = ViewState::Error(GenieError::EmptyInput.to_string());
            return None;
        }

        // Clears any previous error or recipe
        self.state = ViewState::Loading;
        Some(self.input.clone())
    }

    /// Apply the outcome of the request started by [`Controller::begin`]
    pub fn finish(&mut self, result: Result<Recipe, GenieError>) {
        if !self.is_loading() {
            return;
        }

        self.state = match result {
            Ok(recipe) => ViewState::Result(recipe),
            Err(e) => ViewState::Error(e.to_string()),
        };
    }

    /// Run a full request cycle for the current input
    pub async fn submit(&mut self) {
        let Some(ingredients) = self.begin() else {
            return;
        };

        let source = Arc::clone(&self.source);
        let result = source.generate(&ingredients).await;
        self.finish(result);
    }

    /// Handle a key press in the ingredients field.
    ///
    /// Enter submits; Shift+Enter inserts a line break.
    pub async fn on_key(&mut self, press: KeyPress) {
        if self.is_loading() {
            return;
        }

        match press.key {
            Key::Enter if !press.shift => self.submit().await,
            Key::Enter => self.input.push('\n'),
            Key::Backspace => {
                self.input.pop();
            }
            Key::Char(c) => self.input.push(c),
        }
    }

    /// Text rendering of the current view
    pub fn render(&self) -> String {
        match &self.state {
            ViewState::Idle => IDLE_MESSAGE.to_string(),
            ViewState::Loading => "Gerando...\n".to_string(),
            ViewState::Error(message) => format!("Oops! Algo deu errado.\n{}\n", message),
            ViewState::Result(recipe) => recipe.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;

    struct Unreachable;

    #[async_trait]
    impl RecipeSource for Unreachable {
        async fn generate(&self, _ingredients: &str) -> Result<Recipe, GenieError> {
            Err(GenieError::Generation)
        }
    }

    fn controller() -> Controller {
        Controller::new(Arc::new(Unreachable))
    }

    #[test]
    fn test_starts_idle() {
        let controller = controller();
        assert_eq!(controller.state(), &ViewState::Idle);
        assert!(!controller.can_submit());
        assert!(controller.render().contains("aguarda"));
    }

    #[test]
    fn test_begin_with_blank_input_is_error() {
        let mut controller = controller();
        controller.set_input("   \n");
        assert!(controller.begin().is_none());
        assert_eq!(
            controller.state(),
            &ViewState::Error("Por favor, insira alguns ingredientes.".to_string())
        );
    }

    #[test]
    fn test_begin_moves_to_loading_and_blocks_resubmission() {
        let mut controller = controller();
        controller.set_input("ovos");
        assert_eq!(controller.begin().as_deref(), Some("ovos"));
        assert!(controller.is_loading());
        assert!(!controller.can_submit());
        assert!(controller.begin().is_none());

        // Input is frozen while loading
        controller.set_input("outra coisa");
        assert_eq!(controller.input(), "ovos");
        assert!(!controller.use_example(0));
    }

    #[test]
    fn test_finish_without_begin_is_ignored() {
        let mut controller = controller();
        controller.finish(Err(GenieError::Generation));
        assert_eq!(controller.state(), &ViewState::Idle);
    }

    #[test]
    fn test_use_example() {
        let mut controller = controller();
        assert!(controller.use_example(1));
        assert_eq!(controller.input(), "ovos, queijo, espinafre, pão");
        assert!(!controller.use_example(EXAMPLE_INGREDIENTS.len()));
    }

    #[tokio::test]
    async fn test_typing_and_shift_enter() {
        let mut controller = controller();
        for c in "sal".chars() {
            controller.on_key(KeyPress::new(Key::Char(c))).await;
        }
        controller.on_key(KeyPress::with_shift(Key::Enter)).await;
        controller.on_key(KeyPress::new(Key::Char('x'))).await;
        controller.on_key(KeyPress::new(Key::Backspace)).await;

        assert_eq!(controller.input(), "sal\n");
        assert_eq!(controller.state(), &ViewState::Idle);
    }
}
