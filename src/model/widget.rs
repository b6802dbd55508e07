/// Visibility and input state of the chat widget.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WidgetState {
    pub is_open: bool,
    pub is_input_enabled: bool,
}

impl Default for WidgetState {
    fn default() -> Self {
        Self {
            is_open: false,
            is_input_enabled: true,
        }
    }
}

impl WidgetState {
    pub fn phase(&self) -> SendPhase {
        if self.is_input_enabled {
            SendPhase::Idle
        } else {
            SendPhase::Sending
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SendPhase {
    Idle,
    Sending,
}

/// Placeholder content shown in an empty transcript.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Welcome {
    pub title: String,
    pub body: String,
}

/// Which UI elements a host provides. The toggle button and the container
/// are required; everything else is optional.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HostElements {
    pub toggle_button: bool,
    pub container: bool,
    pub close: bool,
    pub messages: bool,
    pub input: bool,
    pub send: bool,
    pub typing: bool,
}

impl HostElements {
    pub const ALL: HostElements = HostElements {
        toggle_button: true,
        container: true,
        close: true,
        messages: true,
        input: true,
        send: true,
        typing: true,
    };
}
