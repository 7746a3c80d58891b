use designer_timeline::element::{ElementContent, ShapeContent};
use designer_timeline::timeline::Phase;
use designer_timeline::{
    ControlMode, DesignStore, Element, ElementId, KeyframeIndicator, PropertyControl, PropertyKey,
    PropertyMap, PropertyValue, Rgba, SelectionState, WriteTarget,
};

fn number(value: f64) -> PropertyValue {
    PropertyValue::Number(value)
}

// Element with opacity 0.8, an In track and a keyframe at 0% keying opacity 0.3
fn keyed_element() -> (DesignStore, ElementId, designer_timeline::KeyframeId) {
    let mut store = DesignStore::new();
    let element_id = store.add_element(
        Element::new("Box", ElementContent::Shape(ShapeContent::default()))
            .with_style(PropertyKey::Opacity, number(0.8)),
    );
    let animation_id = store.add_animation(element_id, Phase::In).unwrap();
    let keyframe_id = store
        .add_keyframe(
            animation_id,
            0,
            PropertyMap::from([(PropertyKey::Opacity, number(0.3))]),
        )
        .unwrap();
    (store, element_id, keyframe_id)
}

#[test]
fn test_routing_follows_selected_keyframe() {
    let (mut store, element_id, keyframe_id) = keyed_element();
    let mut selection = SelectionState::new();
    selection.select_element(element_id);

    {
        let control = PropertyControl::new(PropertyKey::Opacity, element_id, &selection);
        let resolution = control.resolve(&store).unwrap();
        assert_eq!(resolution.effective_value, Some(number(0.8)));
        assert_eq!(resolution.write_target, WriteTarget::Element);
        assert!(resolution.has_keyframes_on_property);
        assert_eq!(control.indicator(&store), KeyframeIndicator::Animated);
    }

    selection.select_keyframe(keyframe_id);
    let mut control = PropertyControl::new(PropertyKey::Opacity, element_id, &selection);
    assert_eq!(control.display_value(&store), Some(number(0.3)));
    assert_eq!(control.mode(&store), ControlMode::Keyframed);

    assert!(control.apply(&mut store, number(0.5)));
    assert_eq!(store.keyframe(keyframe_id).unwrap().get(PropertyKey::Opacity), Some(number(0.5)));
    assert_eq!(
        store.element(element_id).unwrap().property(PropertyKey::Opacity),
        Some(number(0.8))
    );
}

#[test]
fn test_unkeyed_property_writes_static_even_with_keyframe_selected() {
    let (mut store, element_id, keyframe_id) = keyed_element();
    let mut selection = SelectionState::new();
    selection.select_keyframe(keyframe_id);

    let mut control = PropertyControl::new(PropertyKey::X, element_id, &selection);
    assert_eq!(control.mode(&store), ControlMode::Static);
    assert_eq!(control.indicator(&store), KeyframeIndicator::Static);

    control.apply(&mut store, number(42.0));
    assert_eq!(store.element(element_id).unwrap().property(PropertyKey::X), Some(number(42.0)));
    assert!(!store.keyframe(keyframe_id).unwrap().holds(PropertyKey::X));
}

#[test]
fn test_keyframe_on_other_phase_is_ignored() {
    let (store, element_id, keyframe_id) = keyed_element();
    let mut selection = SelectionState::new();
    selection.set_phase(Phase::Out);
    selection.select_keyframe(keyframe_id);

    let control = PropertyControl::new(PropertyKey::Opacity, element_id, &selection);
    assert_eq!(control.display_value(&store), Some(number(0.8)));
    assert_eq!(control.indicator(&store), KeyframeIndicator::Static);
}

#[test]
fn test_render_change_handler_routes_edit() {
    let (mut store, element_id, _) = keyed_element();
    let selection = SelectionState::new();
    let mut control = PropertyControl::new(PropertyKey::Fill, element_id, &selection);

    let shown = control.render(&mut store, |value, on_change| {
        on_change(PropertyValue::Color(Rgba::BLACK));
        value
    });

    assert_eq!(shown, Some(PropertyValue::Color(Rgba::WHITE)));
    assert_eq!(
        store.element(element_id).unwrap().property(PropertyKey::Fill),
        Some(PropertyValue::Color(Rgba::BLACK))
    );
}

#[test]
fn test_custom_static_setter() {
    let (mut store, element_id, _) = keyed_element();
    let selection = SelectionState::new();
    let mut calls = Vec::new();
    {
        let mut control = PropertyControl::new(PropertyKey::Rotation, element_id, &selection)
            .static_setter(|_store, value| {
                calls.push(value);
                Ok(())
            });
        assert!(control.apply(&mut store, number(90.0)));
    }
    assert_eq!(calls, vec![number(90.0)]);
    assert_eq!(
        store.element(element_id).unwrap().property(PropertyKey::Rotation),
        Some(number(0.0))
    );
}

#[test]
fn test_key_at_playhead_creates_track_lazily() {
    let mut store = DesignStore::new();
    let element_id = store.add_element(
        Element::new("Box", ElementContent::Shape(ShapeContent::default()))
            .with_style(PropertyKey::Opacity, number(0.6)),
    );
    let mut selection = SelectionState::new();
    selection.set_phase(Phase::Loop);
    selection.set_playhead(500);

    let control = PropertyControl::new(PropertyKey::Opacity, element_id, &selection);
    let keyframe_id = control.add_keyframe_at_playhead(&mut store).unwrap();

    let animation = store.animation_for(element_id, Phase::Loop).unwrap();
    assert_eq!(animation.duration, store.default_duration());
    let keyframe = store.keyframe(keyframe_id).unwrap();
    assert_eq!(keyframe.animation_id, animation.id);
    // 500 ms into a 1000 ms track
    assert_eq!(keyframe.position.get(), 50);
    assert_eq!(keyframe.get(PropertyKey::Opacity), Some(number(0.6)));
}

#[test]
fn test_key_at_playhead_keeps_sibling_properties() {
    let (mut store, element_id, keyframe_id) = keyed_element();
    store.set_element_property(element_id, PropertyKey::X, number(12.0)).unwrap();
    let selection = SelectionState::new();

    let control = PropertyControl::new(PropertyKey::X, element_id, &selection);
    let keyed = control.add_keyframe_at_playhead(&mut store).unwrap();

    assert_eq!(keyed, keyframe_id);
    let keyframe = store.keyframe(keyframe_id).unwrap();
    assert_eq!(keyframe.get(PropertyKey::X), Some(number(12.0)));
    assert_eq!(keyframe.get(PropertyKey::Opacity), Some(number(0.3)));
}

#[test]
fn test_stale_element_is_a_no_op() {
    let (mut store, element_id, _) = keyed_element();
    store.remove_element(element_id).unwrap();
    let before = store.snapshot();
    let selection = SelectionState::new();

    let mut control = PropertyControl::new(PropertyKey::Opacity, element_id, &selection);
    assert!(control.resolve(&store).is_none());
    assert!(!control.apply(&mut store, number(0.1)));
    assert!(control.add_keyframe_at_playhead(&mut store).is_none());
    assert!(control.try_add_keyframe_at_playhead(&mut store).unwrap_err().is_not_found());
    assert_eq!(store.snapshot(), before);
}

#[test]
fn test_auto_size_cannot_be_keyed() {
    let (mut store, element_id, _) = keyed_element();
    let selection = SelectionState::new();
    let width = PropertyControl::new(PropertyKey::Width, element_id, &selection);
    let track_before = store.snapshot().keyframes().len();

    assert!(!width.can_key(&store));
    assert!(matches!(
        width.try_add_keyframe_at_playhead(&mut store),
        Err(designer_timeline::StoreError::Property(
            designer_timeline::PropertyError::AutoSized { key: PropertyKey::Width }
        ))
    ));
    assert_eq!(store.snapshot().keyframes().len(), track_before);

    // Once the element has a real width it can be keyed
    store.set_element_property(element_id, PropertyKey::Width, number(320.0)).unwrap();
    assert!(width.can_key(&store));
    let keyframe_id = width.add_keyframe_at_playhead(&mut store).unwrap();
    assert_eq!(store.keyframe(keyframe_id).unwrap().get(PropertyKey::Width), Some(number(320.0)));
}
