use std::borrow::Cow;

use arrow::array::ArrayRef;
use once_cell::sync::Lazy;

use crate::{
    archetype::{
        arrays_by_descriptor, deserialize_field, Archetype, ArchetypeBuilder, AsComponents,
    },
    batch::SerializedComponentBatch,
    components::{
        AlbedoFactor, ClassId, Color, ImageBuffer, ImageFormat, Position3D, Texcoord2D,
        TriangleIndices, Vector3D,
    },
    descriptor::{ArchetypeName, ComponentDescriptor},
    error::DeserializationResult,
};

const ARCHETYPE_NAME: &str = "rerun.archetypes.Mesh3D";

/// **Archetype**: A 3D triangle mesh as specified by its per-mesh and per-vertex properties.
///
/// Without `triangle_indices` the vertices are read as a triangle soup, three
/// consecutive positions per triangle.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Mesh3D {
    /// The positions of each vertex.
    pub vertex_positions: Option<SerializedComponentBatch>,

    /// Optional indices for the triangles that make up the mesh.
    pub triangle_indices: Option<SerializedComponentBatch>,

    /// An optional normal for each vertex.
    pub vertex_normals: Option<SerializedComponentBatch>,

    /// An optional color for each vertex.
    pub vertex_colors: Option<SerializedComponentBatch>,

    /// An optional uv texture coordinate for each vertex.
    pub vertex_texcoords: Option<SerializedComponentBatch>,

    /// A color multiplier applied to the whole mesh.
    pub albedo_factor: Option<SerializedComponentBatch>,

    /// Raw bytes of the albedo texture, laid out as `albedo_texture_format` says.
    pub albedo_texture_buffer: Option<SerializedComponentBatch>,

    /// The format of `albedo_texture_buffer`, if any.
    pub albedo_texture_format: Option<SerializedComponentBatch>,

    /// Optional class ids for the vertices.
    pub class_ids: Option<SerializedComponentBatch>,
}

impl Mesh3D {
    /// The total number of components: 1 required, 2 recommended, 6 optional.
    pub const NUM_COMPONENTS: usize = 9;

    #[inline]
    pub const fn descriptor_vertex_positions() -> ComponentDescriptor {
        ComponentDescriptor::new(
            ARCHETYPE_NAME,
            "Mesh3D:vertex_positions",
            "rerun.components.Position3D",
        )
    }

    #[inline]
    pub const fn descriptor_triangle_indices() -> ComponentDescriptor {
        ComponentDescriptor::new(
            ARCHETYPE_NAME,
            "Mesh3D:triangle_indices",
            "rerun.components.TriangleIndices",
        )
    }

    #[inline]
    pub const fn descriptor_vertex_normals() -> ComponentDescriptor {
        ComponentDescriptor::new(
            ARCHETYPE_NAME,
            "Mesh3D:vertex_normals",
            "rerun.components.Vector3D",
        )
    }

    #[inline]
    pub const fn descriptor_vertex_colors() -> ComponentDescriptor {
        ComponentDescriptor::new(
            ARCHETYPE_NAME,
            "Mesh3D:vertex_colors",
            "rerun.components.Color",
        )
    }

    #[inline]
    pub const fn descriptor_vertex_texcoords() -> ComponentDescriptor {
        ComponentDescriptor::new(
            ARCHETYPE_NAME,
            "Mesh3D:vertex_texcoords",
            "rerun.components.Texcoord2D",
        )
    }

    #[inline]
    pub const fn descriptor_albedo_factor() -> ComponentDescriptor {
        ComponentDescriptor::new(
            ARCHETYPE_NAME,
            "Mesh3D:albedo_factor",
            "rerun.components.AlbedoFactor",
        )
    }

    #[inline]
    pub const fn descriptor_albedo_texture_buffer() -> ComponentDescriptor {
        ComponentDescriptor::new(
            ARCHETYPE_NAME,
            "Mesh3D:albedo_texture_buffer",
            "rerun.components.ImageBuffer",
        )
    }

    #[inline]
    pub const fn descriptor_albedo_texture_format() -> ComponentDescriptor {
        ComponentDescriptor::new(
            ARCHETYPE_NAME,
            "Mesh3D:albedo_texture_format",
            "rerun.components.ImageFormat",
        )
    }

    #[inline]
    pub const fn descriptor_class_ids() -> ComponentDescriptor {
        ComponentDescriptor::new(
            ARCHETYPE_NAME,
            "Mesh3D:class_ids",
            "rerun.components.ClassId",
        )
    }
}

static REQUIRED_COMPONENTS: Lazy<[ComponentDescriptor; 1]> =
    Lazy::new(|| [Mesh3D::descriptor_vertex_positions()]);

static RECOMMENDED_COMPONENTS: Lazy<[ComponentDescriptor; 2]> = Lazy::new(|| {
    [
        Mesh3D::descriptor_triangle_indices(),
        Mesh3D::descriptor_vertex_normals(),
    ]
});

static OPTIONAL_COMPONENTS: Lazy<[ComponentDescriptor; 6]> = Lazy::new(|| {
    [
        Mesh3D::descriptor_vertex_colors(),
        Mesh3D::descriptor_vertex_texcoords(),
        Mesh3D::descriptor_albedo_factor(),
        Mesh3D::descriptor_albedo_texture_buffer(),
        Mesh3D::descriptor_albedo_texture_format(),
        Mesh3D::descriptor_class_ids(),
    ]
});

static ALL_COMPONENTS: Lazy<[ComponentDescriptor; Mesh3D::NUM_COMPONENTS]> = Lazy::new(|| {
    [
        Mesh3D::descriptor_vertex_positions(),
        Mesh3D::descriptor_triangle_indices(),
        Mesh3D::descriptor_vertex_normals(),
        Mesh3D::descriptor_vertex_colors(),
        Mesh3D::descriptor_vertex_texcoords(),
        Mesh3D::descriptor_albedo_factor(),
        Mesh3D::descriptor_albedo_texture_buffer(),
        Mesh3D::descriptor_albedo_texture_format(),
        Mesh3D::descriptor_class_ids(),
    ]
});

impl Mesh3D {
    /// Starts a mesh from its vertex positions.
    #[inline]
    pub fn new(
        vertex_positions: impl IntoIterator<Item = impl Into<Position3D>>,
    ) -> ArchetypeBuilder<Self> {
        Self::default()
            .into_builder()
            .with_vertex_positions(vertex_positions)
    }

    /// A record with no field set, for partial updates.
    #[inline]
    pub fn update_fields() -> Self {
        Self::default()
    }

    /// A record that clears every field on the receiving side.
    pub fn clear_fields() -> Self {
        Self {
            vertex_positions: Some(SerializedComponentBatch::empty::<Position3D>(
                Self::descriptor_vertex_positions(),
            )),
            triangle_indices: Some(SerializedComponentBatch::empty::<TriangleIndices>(
                Self::descriptor_triangle_indices(),
            )),
            vertex_normals: Some(SerializedComponentBatch::empty::<Vector3D>(
                Self::descriptor_vertex_normals(),
            )),
            vertex_colors: Some(SerializedComponentBatch::empty::<Color>(
                Self::descriptor_vertex_colors(),
            )),
            vertex_texcoords: Some(SerializedComponentBatch::empty::<Texcoord2D>(
                Self::descriptor_vertex_texcoords(),
            )),
            albedo_factor: Some(SerializedComponentBatch::empty::<AlbedoFactor>(
                Self::descriptor_albedo_factor(),
            )),
            albedo_texture_buffer: Some(SerializedComponentBatch::empty::<ImageBuffer>(
                Self::descriptor_albedo_texture_buffer(),
            )),
            albedo_texture_format: Some(SerializedComponentBatch::empty::<ImageFormat>(
                Self::descriptor_albedo_texture_format(),
            )),
            class_ids: Some(SerializedComponentBatch::empty::<ClassId>(
                Self::descriptor_class_ids(),
            )),
        }
    }

    /// Number of vertex positions, if set.
    #[inline]
    pub fn num_vertices(&self) -> Option<usize> {
        self.vertex_positions.as_ref().map(SerializedComponentBatch::len)
    }

    /// Number of triangles: indexed if `triangle_indices` is set, else a soup.
    pub fn num_triangles(&self) -> Option<usize> {
        match &self.triangle_indices {
            Some(indices) => Some(indices.len()),
            None => self.num_vertices().map(|n| n / 3),
        }
    }
}

impl ArchetypeBuilder<Mesh3D> {
    #[inline]
    pub fn with_vertex_positions(
        self,
        vertex_positions: impl IntoIterator<Item = impl Into<Position3D>>,
    ) -> Self {
        self.with_field::<Position3D>(
            Mesh3D::descriptor_vertex_positions(),
            vertex_positions,
            |mesh| &mut mesh.vertex_positions,
        )
    }

    #[inline]
    pub fn with_triangle_indices(
        self,
        triangle_indices: impl IntoIterator<Item = impl Into<TriangleIndices>>,
    ) -> Self {
        self.with_field::<TriangleIndices>(
            Mesh3D::descriptor_triangle_indices(),
            triangle_indices,
            |mesh| &mut mesh.triangle_indices,
        )
    }

    #[inline]
    pub fn with_vertex_normals(
        self,
        vertex_normals: impl IntoIterator<Item = impl Into<Vector3D>>,
    ) -> Self {
        self.with_field::<Vector3D>(
            Mesh3D::descriptor_vertex_normals(),
            vertex_normals,
            |mesh| &mut mesh.vertex_normals,
        )
    }

    #[inline]
    pub fn with_vertex_colors(
        self,
        vertex_colors: impl IntoIterator<Item = impl Into<Color>>,
    ) -> Self {
        self.with_field::<Color>(
            Mesh3D::descriptor_vertex_colors(),
            vertex_colors,
            |mesh| &mut mesh.vertex_colors,
        )
    }

    #[inline]
    pub fn with_vertex_texcoords(
        self,
        vertex_texcoords: impl IntoIterator<Item = impl Into<Texcoord2D>>,
    ) -> Self {
        self.with_field::<Texcoord2D>(
            Mesh3D::descriptor_vertex_texcoords(),
            vertex_texcoords,
            |mesh| &mut mesh.vertex_texcoords,
        )
    }

    #[inline]
    pub fn with_albedo_factor(self, albedo_factor: impl Into<AlbedoFactor>) -> Self {
        self.with_many_albedo_factor([albedo_factor])
    }

    /// Like [`Self::with_albedo_factor`], for sending one value per row in a column.
    #[inline]
    pub fn with_many_albedo_factor(
        self,
        albedo_factor: impl IntoIterator<Item = impl Into<AlbedoFactor>>,
    ) -> Self {
        self.with_field::<AlbedoFactor>(
            Mesh3D::descriptor_albedo_factor(),
            albedo_factor,
            |mesh| &mut mesh.albedo_factor,
        )
    }

    #[inline]
    pub fn with_albedo_texture_buffer(
        self,
        albedo_texture_buffer: impl Into<ImageBuffer>,
    ) -> Self {
        self.with_many_albedo_texture_buffer([albedo_texture_buffer])
    }

    #[inline]
    pub fn with_many_albedo_texture_buffer(
        self,
        albedo_texture_buffer: impl IntoIterator<Item = impl Into<ImageBuffer>>,
    ) -> Self {
        self.with_field::<ImageBuffer>(
            Mesh3D::descriptor_albedo_texture_buffer(),
            albedo_texture_buffer,
            |mesh| &mut mesh.albedo_texture_buffer,
        )
    }

    #[inline]
    pub fn with_albedo_texture_format(
        self,
        albedo_texture_format: impl Into<ImageFormat>,
    ) -> Self {
        self.with_many_albedo_texture_format([albedo_texture_format])
    }

    #[inline]
    pub fn with_many_albedo_texture_format(
        self,
        albedo_texture_format: impl IntoIterator<Item = impl Into<ImageFormat>>,
    ) -> Self {
        self.with_field::<ImageFormat>(
            Mesh3D::descriptor_albedo_texture_format(),
            albedo_texture_format,
            |mesh| &mut mesh.albedo_texture_format,
        )
    }

    /// Sets the albedo texture buffer together with its format.
    #[inline]
    pub fn with_albedo_texture(
        self,
        format: impl Into<ImageFormat>,
        buffer: impl Into<ImageBuffer>,
    ) -> Self {
        self.with_albedo_texture_format(format)
            .with_albedo_texture_buffer(buffer)
    }

    #[inline]
    pub fn with_class_ids(self, class_ids: impl IntoIterator<Item = impl Into<ClassId>>) -> Self {
        self.with_field::<ClassId>(
            Mesh3D::descriptor_class_ids(),
            class_ids,
            |mesh| &mut mesh.class_ids,
        )
    }
}

impl AsComponents for Mesh3D {
    fn as_serialized_batches(&self) -> Vec<SerializedComponentBatch> {
        [
            &self.vertex_positions,
            &self.triangle_indices,
            &self.vertex_normals,
            &self.vertex_colors,
            &self.vertex_texcoords,
            &self.albedo_factor,
            &self.albedo_texture_buffer,
            &self.albedo_texture_format,
            &self.class_ids,
        ]
        .into_iter()
        .flatten()
        .cloned()
        .collect()
    }
}

impl Archetype for Mesh3D {
    #[inline]
    fn name() -> ArchetypeName {
        ArchetypeName::new(ARCHETYPE_NAME)
    }

    #[inline]
    fn display_name() -> &'static str {
        "Mesh 3D"
    }

    #[inline]
    fn required_components() -> Cow<'static, [ComponentDescriptor]> {
        REQUIRED_COMPONENTS.as_slice().into()
    }

    #[inline]
    fn recommended_components() -> Cow<'static, [ComponentDescriptor]> {
        RECOMMENDED_COMPONENTS.as_slice().into()
    }

    #[inline]
    fn optional_components() -> Cow<'static, [ComponentDescriptor]> {
        OPTIONAL_COMPONENTS.as_slice().into()
    }

    #[inline]
    fn all_components() -> Cow<'static, [ComponentDescriptor]> {
        ALL_COMPONENTS.as_slice().into()
    }

    fn from_arrow_components(
        arrow_data: impl IntoIterator<Item = (ComponentDescriptor, ArrayRef)>,
    ) -> DeserializationResult<Self> {
        let arrays = arrays_by_descriptor(arrow_data);
        Ok(Self {
            vertex_positions: deserialize_field::<Position3D>(
                &arrays,
                Self::descriptor_vertex_positions(),
            )?,
            triangle_indices: deserialize_field::<TriangleIndices>(
                &arrays,
                Self::descriptor_triangle_indices(),
            )?,
            vertex_normals: deserialize_field::<Vector3D>(
                &arrays,
                Self::descriptor_vertex_normals(),
            )?,
            vertex_colors: deserialize_field::<Color>(&arrays, Self::descriptor_vertex_colors())?,
            vertex_texcoords: deserialize_field::<Texcoord2D>(
                &arrays,
                Self::descriptor_vertex_texcoords(),
            )?,
            albedo_factor: deserialize_field::<AlbedoFactor>(
                &arrays,
                Self::descriptor_albedo_factor(),
            )?,
            albedo_texture_buffer: deserialize_field::<ImageBuffer>(
                &arrays,
                Self::descriptor_albedo_texture_buffer(),
            )?,
            albedo_texture_format: deserialize_field::<ImageFormat>(
                &arrays,
                Self::descriptor_albedo_texture_format(),
            )?,
            class_ids: deserialize_field::<ClassId>(&arrays, Self::descriptor_class_ids())?,
        })
    }
}

#[cfg(test)]
mod tests {
    use arrow::array::{Array, ArrayRef, UInt16Array};
    use std::sync::Arc;

    use super::*;
    use crate::error::DeserializationError;

    fn triangle() -> ArchetypeBuilder<Mesh3D> {
        Mesh3D::new([[0.0, 0.0, 0.0], [1.0, 0.0, 0.0], [0.0, 1.0, 0.0]])
    }

    #[test]
    fn serializes_in_declaration_order() {
        let mesh = triangle()
            .with_class_ids([1u16, 2, 3])
            .with_vertex_colors([0xFF0000FF_u32, 0x00FF00FF])
            .with_triangle_indices([[0, 1, 2]])
            .build()
            .unwrap();

        let components: Vec<_> = mesh
            .as_serialized_batches()
            .into_iter()
            .map(|batch| (batch.descriptor.field_name().to_owned(), batch.len()))
            .collect();
        assert_eq!(
            components,
            vec![
                ("vertex_positions".to_owned(), 3),
                ("triangle_indices".to_owned(), 1),
                ("vertex_colors".to_owned(), 2),
                ("class_ids".to_owned(), 3),
            ]
        );
    }

    #[test]
    fn later_setter_replaces_the_slot() {
        let mesh = triangle()
            .with_albedo_factor(0xFFFFFFFF_u32)
            .with_albedo_factor(0x808080FF_u32)
            .build()
            .unwrap();
        let factors = mesh
            .albedo_factor
            .unwrap()
            .to_components::<AlbedoFactor>()
            .unwrap();
        assert_eq!(factors, vec![AlbedoFactor::from(0x808080FF_u32)]);
    }

    #[test]
    fn texture_sets_format_and_buffer() {
        let mesh = triangle()
            .with_albedo_texture(ImageFormat::rgb8([1, 1]), vec![255u8, 0, 0])
            .build()
            .unwrap();
        assert_eq!(mesh.albedo_texture_format.map(|b| b.len()), Some(1));
        assert_eq!(mesh.albedo_texture_buffer.map(|b| b.len()), Some(1));
    }

    #[test]
    fn triangle_counts() {
        let soup = triangle().build().unwrap();
        assert_eq!(soup.num_vertices(), Some(3));
        assert_eq!(soup.num_triangles(), Some(1));
        assert_eq!(Mesh3D::update_fields().num_triangles(), None);
    }

    #[test]
    fn clear_fields_sets_every_slot_empty() {
        let cleared = Mesh3D::clear_fields();
        let batches = cleared.as_serialized_batches();
        assert_eq!(batches.len(), Mesh3D::NUM_COMPONENTS);
        assert!(batches.iter().all(SerializedComponentBatch::is_empty));
        assert_eq!(
            batches.iter().map(|b| b.descriptor.clone()).collect::<Vec<_>>(),
            Mesh3D::all_components().to_vec()
        );
    }

    #[test]
    fn reflection_tables_partition_all_components() {
        assert_eq!(Mesh3D::name().short_name(), "Mesh3D");
        assert_eq!(Mesh3D::required_components().len(), 1);
        assert_eq!(
            Mesh3D::required_components().len()
                + Mesh3D::recommended_components().len()
                + Mesh3D::optional_components().len(),
            Mesh3D::all_components().len()
        );
        assert!(Mesh3D::all_components().iter().all(|d| d.is_qualified()));
    }

    #[test]
    fn round_trips_through_arrow_components() {
        let mesh = triangle()
            .with_vertex_normals([[0.0, 0.0, 1.0]; 3])
            .with_class_ids([7u16])
            .build()
            .unwrap();
        let pairs = mesh
            .as_serialized_batches()
            .into_iter()
            .map(|batch| (batch.descriptor, batch.array));
        assert_eq!(Mesh3D::from_arrow_components(pairs).unwrap(), mesh);
    }

    #[test]
    fn unknown_descriptors_are_ignored() {
        let stray = ComponentDescriptor::new(
            "rerun.archetypes.Points3D",
            "Points3D:class_ids",
            "rerun.components.ClassId",
        );
        let array: ArrayRef = Arc::new(UInt16Array::from(vec![1, 2]));
        let mesh = Mesh3D::from_arrow_components([(stray, array)]).unwrap();
        assert_eq!(mesh, Mesh3D::update_fields());
    }

    #[test]
    fn wrong_datatype_fails_deserialization() {
        let array: ArrayRef = Arc::new(UInt16Array::from(vec![1, 2]));
        let err =
            Mesh3D::from_arrow_components([(Mesh3D::descriptor_vertex_positions(), array)])
                .unwrap_err();
        assert!(matches!(err, DeserializationError::DatatypeMismatch { .. }));
    }

    #[test]
    fn empty_positions_are_present() {
        let mesh = Mesh3D::new(Vec::<Position3D>::new()).build().unwrap();
        let batches = mesh.as_serialized_batches();
        assert_eq!(batches.len(), 1);
        assert!(batches[0].array.is_empty());
    }
}
