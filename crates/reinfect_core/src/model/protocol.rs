use serde::{Deserialize, Serialize};

/// Clinical partner-management protocol under which index patients were treated
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Protocol {
    /// Standard partner notification
    Control,
    /// Accelerated partner therapy
    Intervention,
}

impl Protocol {
    pub const ALL: [Protocol; 2] = [Protocol::Control, Protocol::Intervention];

    #[must_use]
    pub fn label(&self) -> &'static str {
        match self {
            Protocol::Control => "control",
            Protocol::Intervention => "intervention",
        }
    }
}

impl std::fmt::Display for Protocol {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}
