use std::{borrow::Cow, collections::HashMap, fmt};

use crate::error::{DeserializationError, DeserializationResult};

/// Field metadata key holding the archetype name.
pub const FIELD_METADATA_KEY_ARCHETYPE: &str = "rerun:archetype";
/// Field metadata key holding the qualified field name.
pub const FIELD_METADATA_KEY_COMPONENT: &str = "rerun:component";
/// Field metadata key holding the component type name.
pub const FIELD_METADATA_KEY_COMPONENT_TYPE: &str = "rerun:component_type";

macro_rules! interned_name {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
        pub struct $name(Cow<'static, str>);

        impl $name {
            #[inline]
            pub const fn new(name: &'static str) -> Self {
                Self(Cow::Borrowed(name))
            }

            #[inline]
            pub fn as_str(&self) -> &str {
                &self.0
            }
        }

        impl From<&'static str> for $name {
            #[inline]
            fn from(name: &'static str) -> Self {
                Self::new(name)
            }
        }

        impl From<String> for $name {
            #[inline]
            fn from(name: String) -> Self {
                Self(Cow::Owned(name))
            }
        }

        impl AsRef<str> for $name {
            #[inline]
            fn as_ref(&self) -> &str {
                self.as_str()
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.as_str())
            }
        }
    };
}

interned_name!(
    /// Fully qualified archetype name, e.g. `rerun.archetypes.Mesh3D`.
    ArchetypeName
);

interned_name!(
    /// Qualified field name, always `<ShortArchetypeName>:<field_name>`.
    ComponentIdentifier
);

interned_name!(
    /// Fully qualified component type name, e.g. `rerun.components.Position3D`.
    ComponentType
);

impl ArchetypeName {
    /// Last `.`-separated segment, e.g. `Mesh3D`.
    pub fn short_name(&self) -> &str {
        let name = self.as_str();
        name.rsplit('.').next().unwrap_or(name)
    }
}

impl ComponentIdentifier {
    /// The part after the `:` separator, or the whole identifier if there is none.
    pub fn field_name(&self) -> &str {
        let name = self.as_str();
        name.split_once(':').map_or(name, |(_, field)| field)
    }
}

/// Stable identity of one field of one archetype.
///
/// The triple is what gets persisted next to the data, so it has to stay
/// byte-stable across versions: renaming a field changes its wire identity.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ComponentDescriptor {
    pub archetype: ArchetypeName,
    pub component: ComponentIdentifier,
    pub component_type: ComponentType,
}

impl ComponentDescriptor {
    #[inline]
    pub const fn new(
        archetype: &'static str,
        component: &'static str,
        component_type: &'static str,
    ) -> Self {
        Self {
            archetype: ArchetypeName::new(archetype),
            component: ComponentIdentifier::new(component),
            component_type: ComponentType::new(component_type),
        }
    }

    #[inline]
    pub fn field_name(&self) -> &str {
        self.component.field_name()
    }

    /// Whether `component` is `<ShortArchetypeName>:<field_name>` for this archetype.
    pub fn is_qualified(&self) -> bool {
        match self.component.as_str().split_once(':') {
            Some((prefix, field)) => prefix == self.archetype.short_name() && !field.is_empty(),
            None => false,
        }
    }

    /// Arrow field metadata carrying this descriptor.
    pub fn to_metadata(&self) -> HashMap<String, String> {
        HashMap::from([
            (
                FIELD_METADATA_KEY_ARCHETYPE.to_string(),
                self.archetype.to_string(),
            ),
            (
                FIELD_METADATA_KEY_COMPONENT.to_string(),
                self.component.to_string(),
            ),
            (
                FIELD_METADATA_KEY_COMPONENT_TYPE.to_string(),
                self.component_type.to_string(),
            ),
        ])
    }

    /// Inverse of [`ComponentDescriptor::to_metadata`]. All three keys are required.
    pub fn from_metadata(metadata: &HashMap<String, String>) -> DeserializationResult<Self> {
        let get = |key: &str| {
            metadata
                .get(key)
                .cloned()
                .ok_or_else(|| DeserializationError::MissingMetadata(key.to_string()))
        };
        Ok(Self {
            archetype: get(FIELD_METADATA_KEY_ARCHETYPE)?.into(),
            component: get(FIELD_METADATA_KEY_COMPONENT)?.into(),
            component_type: get(FIELD_METADATA_KEY_COMPONENT_TYPE)?.into(),
        })
    }
}

impl fmt::Display for ComponentDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}#{}", self.component, self.component_type)
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    const POSITIONS: ComponentDescriptor = ComponentDescriptor::new(
        "rerun.archetypes.Mesh3D",
        "Mesh3D:vertex_positions",
        "rerun.components.Position3D",
    );

    #[test]
    fn names_split_on_separators() {
        assert_eq!(POSITIONS.archetype.short_name(), "Mesh3D");
        assert_eq!(POSITIONS.field_name(), "vertex_positions");
        assert!(POSITIONS.is_qualified());

        let foreign = ComponentDescriptor::new(
            "rerun.archetypes.Mesh3D",
            "Points3D:positions",
            "rerun.components.Position3D",
        );
        assert!(!foreign.is_qualified());
    }

    #[test]
    fn metadata_round_trip() {
        let metadata = POSITIONS.to_metadata();
        assert_eq!(metadata.len(), 3);
        let decoded = ComponentDescriptor::from_metadata(&metadata).unwrap();
        assert_eq!(decoded, POSITIONS);
    }

    #[test]
    fn metadata_requires_every_key() {
        let mut metadata: HashMap<String, String> = POSITIONS.to_metadata();
        metadata.remove(FIELD_METADATA_KEY_COMPONENT_TYPE);
        let err = ComponentDescriptor::from_metadata(&metadata).unwrap_err();
        assert!(matches!(
            err,
            DeserializationError::MissingMetadata(key) if key == FIELD_METADATA_KEY_COMPONENT_TYPE
        ));
    }

    #[test]
    fn owned_and_borrowed_names_compare_equal() {
        let owned = ComponentType::from(String::from("rerun.components.Position3D"));
        assert_eq!(owned, POSITIONS.component_type);
    }
}
