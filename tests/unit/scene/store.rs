use super::*;

fn image_at(store: &mut LayerStore, url: &str, x: f64, y: f64) -> String {
    store
        .add_layer(LayerKind::image(url), Point::new(x, y))
        .id
        .clone()
}

#[test]
fn add_layer_assigns_one_then_two() {
    let mut store = LayerStore::new();
    assert!(store.is_empty());

    let first = store.add_layer(LayerKind::image("a.png"), Point::new(50.0, 50.0));
    assert_eq!(first.z_index, 1);
    assert_eq!(first.opacity, 1.0);
    assert_eq!(first.blend_mode, "normal");

    let second = store.add_layer(LayerKind::image("b.png"), Point::new(0.0, 0.0));
    assert_eq!(second.z_index, 2);
    assert_eq!(store.len(), 2);
}

#[test]
fn ids_are_distinct_under_rapid_calls() {
    let mut store = LayerStore::new();
    let mut ids = std::collections::HashSet::new();
    for _ in 0..64 {
        let id = image_at(&mut store, "a.png", 0.0, 0.0);
        assert!(ids.insert(id));
    }
}

#[test]
fn move_down_swaps_with_rank_neighbor() {
    let mut store = LayerStore::new();
    let id1 = image_at(&mut store, "1.png", 0.0, 0.0);
    let id2 = image_at(&mut store, "2.png", 0.0, 0.0);
    let id3 = image_at(&mut store, "3.png", 0.0, 0.0);

    store.move_down(&id2).unwrap();

    assert_eq!(store.get(&id1).unwrap().z_index, 2);
    assert_eq!(store.get(&id2).unwrap().z_index, 1);
    assert_eq!(store.get(&id3).unwrap().z_index, 3);

    let order: Vec<&str> = store.ordered_view().map(|l| l.id.as_str()).collect();
    assert_eq!(order, vec![id2.as_str(), id1.as_str(), id3.as_str()]);
}

#[test]
fn move_up_at_top_is_a_noop() {
    let mut store = LayerStore::new();
    let bottom = image_at(&mut store, "a.png", 0.0, 0.0);
    let top = image_at(&mut store, "b.png", 0.0, 0.0);

    store.move_up(&top).unwrap();
    assert_eq!(store.get(&bottom).unwrap().z_index, 1);
    assert_eq!(store.get(&top).unwrap().z_index, 2);

    store.move_down(&bottom).unwrap();
    assert_eq!(store.get(&bottom).unwrap().z_index, 1);
}

#[test]
fn z_stays_unique_across_mixed_mutations() {
    let mut store = LayerStore::new();
    let mut ids = Vec::new();
    for i in 0..5 {
        ids.push(image_at(&mut store, "x.png", i as f64, 0.0));
    }

    // Mixed adds and swaps; check the z multiset is a set after each step.
    let check = |store: &LayerStore| {
        let mut seen = std::collections::HashSet::new();
        assert!(store.ordered_view().all(|l| seen.insert(l.z_index)));
    };

    store.move_up(&ids[0]).unwrap();
    check(&store);
    store.move_down(&ids[4]).unwrap();
    check(&store);
    image_at(&mut store, "y.png", 0.0, 0.0);
    check(&store);
    store.move_up(&ids[2]).unwrap();
    store.move_up(&ids[2]).unwrap();
    check(&store);
}

#[test]
fn move_operations_permute_the_z_set() {
    let mut store = LayerStore::new();
    let ids: Vec<String> = (0..4)
        .map(|i| image_at(&mut store, "x.png", i as f64, 0.0))
        .collect();
    let before: std::collections::BTreeSet<i64> =
        store.ordered_view().map(|l| l.z_index).collect();

    store.move_up(&ids[1]).unwrap();
    store.move_down(&ids[3]).unwrap();
    store.move_up(&ids[0]).unwrap();

    let after: std::collections::BTreeSet<i64> = store.ordered_view().map(|l| l.z_index).collect();
    assert_eq!(before, after);
}

#[test]
fn ordered_view_is_deterministic_and_restartable() {
    let mut store = LayerStore::new();
    for i in 0..6 {
        image_at(&mut store, "x.png", i as f64, 0.0);
    }
    let a: Vec<String> = store.ordered_view().map(|l| l.id.clone()).collect();
    let b: Vec<String> = store.ordered_view().map(|l| l.id.clone()).collect();
    assert_eq!(a, b);
}

#[test]
fn update_position_preserves_z_and_rejects_unknown_ids() {
    let mut store = LayerStore::new();
    let id = image_at(&mut store, "a.png", 1.0, 2.0);

    store.update_position(&id, Point::new(9.0, 8.0)).unwrap();
    let layer = store.get(&id).unwrap();
    assert_eq!(layer.position, Point::new(9.0, 8.0));
    assert_eq!(layer.z_index, 1);

    let err = store
        .update_position("missing", Point::new(0.0, 0.0))
        .unwrap_err();
    assert!(matches!(err, EaselError::LayerNotFound(_)));
}

#[test]
fn replace_all_roundtrip_preserves_observable_state() {
    let mut store = LayerStore::new();
    for i in 0..4 {
        image_at(&mut store, "x.png", i as f64, i as f64);
    }
    let bottom = store.ordered_view().next().unwrap().id.clone();
    store.move_up(&bottom).unwrap();

    let snapshot: Vec<Layer> = store.ordered_view().cloned().collect();
    let mut reloaded = LayerStore::new();
    reloaded.replace_all(snapshot);

    let original: Vec<(String, i64)> = store
        .ordered_view()
        .map(|l| (l.id.clone(), l.z_index))
        .collect();
    let restored: Vec<(String, i64)> = reloaded
        .ordered_view()
        .map(|l| (l.id.clone(), l.z_index))
        .collect();
    assert_eq!(original, restored);
}

#[test]
fn replace_all_repairs_duplicate_z_in_input_order() {
    let mut layers = Vec::new();
    for (i, z) in [(0, 7), (1, 7), (2, 3)] {
        layers.push(Layer {
            id: format!("l{i}"),
            kind: LayerKind::image("x.png"),
            position: Point::new(0.0, 0.0),
            opacity: 1.0,
            blend_mode: "normal".to_owned(),
            z_index: z,
        });
    }

    let mut store = LayerStore::new();
    store.replace_all(layers);

    // Input order wins: l0, l1, l2 get z 1, 2, 3.
    assert_eq!(store.get("l0").unwrap().z_index, 1);
    assert_eq!(store.get("l1").unwrap().z_index, 2);
    assert_eq!(store.get("l2").unwrap().z_index, 3);
}

#[test]
fn replace_all_trusts_unique_input() {
    let layers = vec![
        Layer {
            id: "a".to_owned(),
            kind: LayerKind::image("x.png"),
            position: Point::new(0.0, 0.0),
            opacity: 0.5,
            blend_mode: "multiply".to_owned(),
            z_index: 40,
        },
        Layer {
            id: "b".to_owned(),
            kind: LayerKind::text("hello"),
            position: Point::new(1.0, 1.0),
            opacity: 1.0,
            blend_mode: "normal".to_owned(),
            z_index: 10,
        },
    ];

    let mut store = LayerStore::new();
    store.replace_all(layers);

    assert_eq!(store.get("a").unwrap().z_index, 40);
    assert_eq!(store.get("b").unwrap().z_index, 10);
    let order: Vec<&str> = store.ordered_view().map(|l| l.id.as_str()).collect();
    assert_eq!(order, vec!["b", "a"]);
    assert_eq!(store.next_z(), 41);
}
