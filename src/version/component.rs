//! Components whose versions are monitored

/// External process the extension depends on
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Component {
    /// Wake language server
    Wake,
    /// Anvil execution node used by Sake
    Anvil,
}

impl Component {
    /// All monitored components, in display order
    pub const ALL: [Component; 2] = [Component::Wake, Component::Anvil];

    /// Key of this component in the dependency manifest
    pub fn as_str(&self) -> &'static str {
        match self {
            Component::Wake => "wake",
            Component::Anvil => "anvil",
        }
    }

    /// Human-readable name used in status text
    pub fn display_name(&self) -> &'static str {
        match self {
            Component::Wake => "Wake",
            Component::Anvil => "Anvil",
        }
    }
}

impl std::fmt::Display for Component {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.display_name())
    }
}

impl std::str::FromStr for Component {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "wake" => Ok(Component::Wake),
            "anvil" => Ok(Component::Anvil),
            _ => Err(()),
        }
    }
}
