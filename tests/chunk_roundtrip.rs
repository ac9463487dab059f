use reclog::{
    archetypes::{Mesh3D, Transform3D},
    components::{ClassId, Translation3D},
    Archetype, AsComponents, ChunkOption, ColumnChunk, IndexColumn,
};

mod common;

#[test]
fn mesh_survives_ipc() {
    let mesh = Mesh3D::new(common::positions(3))
        .with_triangle_indices([[0, 1, 2]])
        .with_class_ids(Vec::<ClassId>::new())
        .build()
        .unwrap();

    let chunk = ColumnChunk::from_archetype("world/mesh", &mesh)
        .unwrap()
        .with_index(IndexColumn::timestamp("log_time", [1_700_000_000_000_000_000]))
        .unwrap();
    let bytes = chunk.encode(&ChunkOption::default()).unwrap();
    let decoded = ColumnChunk::decode(&bytes).unwrap();

    assert_eq!(decoded.entity_path(), "world/mesh");
    assert_eq!(decoded.num_rows(), 1);

    let row = decoded.row(0).unwrap();
    let restored = Mesh3D::from_arrow_components(row.into_iter().map(Into::into)).unwrap();
    assert_eq!(restored.as_serialized_batches().len(), 3);
    // cleared field stays present but empty
    assert_eq!(restored.class_ids.as_ref().map(|b| b.len()), Some(0));
    assert!(restored.vertex_normals.is_none());
    assert_eq!(restored, mesh);
}

#[test]
fn transform_columns_split_across_messages() {
    let translations: Vec<_> = (0..10)
        .map(|i| Translation3D::new(i as f32, 0.0, 0.0))
        .collect();
    let transforms = Transform3D::update_fields()
        .into_builder()
        .with_many_translation(translations.clone())
        .build()
        .unwrap();

    let chunk = ColumnChunk::new("world/body")
        .with_index(IndexColumn::sequence("frame", 0..10))
        .unwrap()
        .with_columns(transforms.columns_of_unit_batches().unwrap())
        .unwrap();

    let option = ChunkOption::default().max_rows_per_message(3);
    let decoded = ColumnChunk::decode(&chunk.encode(&option).unwrap()).unwrap();
    assert_eq!(decoded.num_rows(), 10);
    assert_eq!(decoded.indexes(), chunk.indexes());

    for (row, expected) in translations.iter().enumerate() {
        let batches = decoded.row(row).unwrap();
        let transform =
            Transform3D::from_arrow_components(batches.into_iter().map(Into::into)).unwrap();
        let translation = transform
            .translation
            .unwrap()
            .to_components::<Translation3D>()
            .unwrap();
        assert_eq!(translation, vec![*expected]);
    }
}

#[test]
fn cleared_cells_keep_their_index_values() {
    let class_ids = reclog::SerializedComponentBatch::try_from_loggable::<ClassId>(
        [1_u16, 2, 3],
        Mesh3D::descriptor_class_ids(),
    )
    .unwrap();
    let chunk = ColumnChunk::new("world/mesh")
        .with_index(IndexColumn::sequence("frame", [10, 11, 12]))
        .unwrap()
        .with_column(class_ids.partitioned([2, 0, 1]).unwrap())
        .unwrap();
    let decoded = ColumnChunk::decode(&chunk.encode(&ChunkOption::default()).unwrap()).unwrap();

    let cells: Vec<_> = decoded
        .iter_component(&Mesh3D::descriptor_class_ids())
        .map(|(index, batch)| (index, batch.len()))
        .collect();
    assert_eq!(
        cells,
        vec![
            (vec![("frame", 10)], 2),
            (vec![("frame", 11)], 0),
            (vec![("frame", 12)], 1),
        ]
    );

    let frames: Vec<_> = decoded.iter_rows().map(|(index, _)| index[0].1).collect();
    assert_eq!(frames, vec![10, 11, 12]);
}
