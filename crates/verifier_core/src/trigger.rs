pub const RECOMPILE_LABEL: &str = "Recompile";

const ENTER_KEY: &str = "Enter";

/// Minimal description of a page element: its tag name and visible label.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ElementInfo {
    pub tag: String,
    pub text: String,
}

impl ElementInfo {
    pub fn new(tag: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            tag: tag.into(),
            text: text.into(),
        }
    }

    pub fn button(text: impl Into<String>) -> Self {
        Self::new("button", text)
    }

    pub fn is_button(&self) -> bool {
        self.tag.eq_ignore_ascii_case("button")
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UiEvent {
    /// Pointer click. `path` holds the clicked element first, then its ancestors.
    Click { path: Vec<ElementInfo> },
    KeyDown { key: String, ctrl: bool, meta: bool },
}

impl UiEvent {
    pub fn click(path: Vec<ElementInfo>) -> Self {
        UiEvent::Click { path }
    }

    pub fn key_down(key: impl Into<String>, ctrl: bool, meta: bool) -> Self {
        UiEvent::KeyDown {
            key: key.into(),
            ctrl,
            meta,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Trigger {
    RecompileClicked,
    Shortcut,
}

impl Trigger {
    /// Keyboard triggers must not reach the host page's own handlers.
    pub fn suppresses_default(self) -> bool {
        matches!(self, Trigger::Shortcut)
    }
}

/// Decides whether a host event asks for verification.
pub fn classify(event: &UiEvent) -> Option<Trigger> {
    match event {
        UiEvent::Click { path } => {
            let button = path.iter().find(|element| element.is_button())?;
            (button.text.trim() == RECOMPILE_LABEL).then_some(Trigger::RecompileClicked)
        }
        UiEvent::KeyDown { key, ctrl, meta } => {
            (key == ENTER_KEY && (*ctrl || *meta)).then_some(Trigger::Shortcut)
        }
    }
}
