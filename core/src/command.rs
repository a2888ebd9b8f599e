use crate::session::Direction;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PreviewCommand {
    Close,
    Navigate(Direction),
}

impl PreviewCommand {
    /// Arrow keys would otherwise scroll the page behind the modal.
    pub fn prevents_default(&self) -> bool {
        matches!(self, PreviewCommand::Navigate(_))
    }
}

/// What a click inside the modal landed on.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ClickTarget {
    Image,
    Previous,
    Next,
    CloseControl,
    Elsewhere,
}

pub fn key_command(key: &str) -> Option<PreviewCommand> {
    match key {
        "Escape" => Some(PreviewCommand::Close),
        "ArrowLeft" => Some(PreviewCommand::Navigate(Direction::Previous)),
        "ArrowRight" => Some(PreviewCommand::Navigate(Direction::Next)),
        _ => None,
    }
}

pub fn click_command(target: ClickTarget) -> Option<PreviewCommand> {
    match target {
        ClickTarget::Image => None,
        ClickTarget::Previous => Some(PreviewCommand::Navigate(Direction::Previous)),
        ClickTarget::Next => Some(PreviewCommand::Navigate(Direction::Next)),
        ClickTarget::CloseControl | ClickTarget::Elsewhere => Some(PreviewCommand::Close),
    }
}

/// Keys that open a preview from a focused thumbnail.
pub fn is_trigger_activation_key(key: &str) -> bool {
    matches!(key, "Enter" | " ")
}
