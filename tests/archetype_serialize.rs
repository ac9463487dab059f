use reclog::{
    archetypes::{Mesh3D, Transform3D, ViewCoordinates},
    blueprint::{archetypes::ContainerBlueprint, components::ContainerKind},
    components::{self, Color, Position3D},
    Archetype, AsComponents, SerializedComponentBatch,
};

mod common;

fn field_names(archetype: &impl AsComponents) -> Vec<String> {
    archetype
        .as_serialized_batches()
        .iter()
        .map(|batch| batch.descriptor.field_name().to_owned())
        .collect()
}

#[test]
fn setter_order_does_not_change_serialization_order() {
    let colors = [Color::from_rgb(255, 0, 0), Color::from_rgb(0, 255, 0)];

    let positions_first = Mesh3D::new(common::positions(3))
        .with_vertex_colors(colors)
        .build()
        .unwrap();
    let colors_first = Mesh3D::update_fields()
        .into_builder()
        .with_vertex_colors(colors)
        .with_vertex_positions(common::positions(3))
        .build()
        .unwrap();

    assert_eq!(positions_first, colors_first);

    assert_eq!(
        field_names(&positions_first),
        ["vertex_positions", "vertex_colors"]
    );
    let batches = positions_first.as_serialized_batches();
    assert_eq!(batches.len(), 2);
    assert_eq!(batches[0].descriptor, Mesh3D::descriptor_vertex_positions());
    assert_eq!(
        batches[0].to_components::<Position3D>().unwrap(),
        common::positions(3)
    );
    assert_eq!(batches[1].descriptor, Mesh3D::descriptor_vertex_colors());
    assert_eq!(batches[1].to_components::<Color>().unwrap(), colors.to_vec());
}

#[test]
fn empty_records_serialize_to_nothing() {
    assert!(Mesh3D::update_fields().as_serialized_batches().is_empty());
    assert!(Transform3D::update_fields().as_serialized_batches().is_empty());
    assert!(ViewCoordinates::update_fields()
        .as_serialized_batches()
        .is_empty());
    assert!(ContainerBlueprint::update_fields()
        .as_serialized_batches()
        .is_empty());
}

fn assert_cleared<A: Archetype>(cleared: &A) {
    let batches = cleared.as_serialized_batches();
    assert_eq!(
        batches
            .iter()
            .map(|batch| batch.descriptor.clone())
            .collect::<Vec<_>>(),
        A::all_components().to_vec(),
        "{}",
        A::display_name()
    );
    assert!(batches.iter().all(SerializedComponentBatch::is_empty));
}

#[test]
fn clear_fields_emits_every_field_empty() {
    assert_cleared(&Mesh3D::clear_fields());
    assert_cleared(&Transform3D::clear_fields());
    assert_cleared(&ViewCoordinates::clear_fields());
    assert_cleared(&ContainerBlueprint::clear_fields());
}

#[test]
fn cleared_records_survive_deserialization() {
    let cleared = ContainerBlueprint::clear_fields();
    let pairs = cleared.as_serialized_batches().into_iter().map(Into::into);
    assert_eq!(ContainerBlueprint::from_arrow_components(pairs).unwrap(), cleared);
}

#[test]
fn mismatched_field_counts_are_allowed() {
    let mesh = Mesh3D::new(common::positions(3))
        .with_vertex_colors([0xFF0000FF_u32, 0x00FF00FF])
        .build()
        .unwrap();
    let lens: Vec<_> = mesh
        .as_serialized_batches()
        .iter()
        .map(SerializedComponentBatch::len)
        .collect();
    assert_eq!(lens, vec![3, 2]);
}

#[test]
fn every_archetype_round_trips() {
    let mesh = Mesh3D::new(common::positions(6))
        .with_triangle_indices([[0, 1, 2], [3, 4, 5]])
        .with_albedo_factor([255, 255, 255, 128])
        .build()
        .unwrap();
    let pairs = mesh.as_serialized_batches().into_iter().map(Into::into);
    assert_eq!(Mesh3D::from_arrow_components(pairs).unwrap(), mesh);

    let transform = Transform3D::from_scale(2.0)
        .with_relation(components::TransformRelation::ChildFromParent)
        .build()
        .unwrap();
    let pairs = transform.as_serialized_batches().into_iter().map(Into::into);
    assert_eq!(Transform3D::from_arrow_components(pairs).unwrap(), transform);

    let view = ViewCoordinates::new(components::ViewCoordinates::FLU)
        .build()
        .unwrap();
    let pairs = view.as_serialized_batches().into_iter().map(Into::into);
    assert_eq!(ViewCoordinates::from_arrow_components(pairs).unwrap(), view);

    let container = ContainerBlueprint::new(ContainerKind::Vertical)
        .with_row_shares([1.0, 1.0])
        .build()
        .unwrap();
    let pairs = container.as_serialized_batches().into_iter().map(Into::into);
    assert_eq!(
        ContainerBlueprint::from_arrow_components(pairs).unwrap(),
        container
    );
}
