use crate::{datatypes, loggable::delegate_component};

delegate_component!(
    /// **Component**: A display name, typically for an entity or an item like a plot series.
    #[derive(Clone, Debug, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
    Name(datatypes::Utf8) => "rerun.components.Name"
);

delegate_component!(
    /// **Component**: Whether the container, view, entity or instance is currently visible.
    #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
    Visible(datatypes::Bool) => "rerun.components.Visible"
);

impl From<&str> for Name {
    #[inline]
    fn from(name: &str) -> Self {
        Self(name.into())
    }
}

impl From<String> for Name {
    #[inline]
    fn from(name: String) -> Self {
        Self(name.into())
    }
}

impl From<bool> for Visible {
    #[inline]
    fn from(visible: bool) -> Self {
        Self(datatypes::Bool(visible))
    }
}

impl Default for Visible {
    /// Things are visible unless told otherwise.
    #[inline]
    fn default() -> Self {
        Self(datatypes::Bool(true))
    }
}
