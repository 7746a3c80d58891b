use std::cell::RefCell;
use std::rc::Rc;

use designer_timeline::element::{ElementContent, ElementPatch, ShapeContent};
use designer_timeline::state::DesignState;
use designer_timeline::timeline::{AnimationDuration, AnimationPatch, KeyframePatch, KeyframePosition, Phase};
use designer_timeline::{
    DesignStore, Element, PropertyError, PropertyKey, PropertyMap, PropertyValue, StoreError, StoreEvent,
};

fn number(value: f64) -> PropertyValue {
    PropertyValue::Number(value)
}

fn props(entries: &[(PropertyKey, f64)]) -> PropertyMap {
    entries.iter().map(|(key, value)| (*key, number(*value))).collect()
}

// Helper to create a store holding one shape element
fn store_with_shape() -> (DesignStore, designer_timeline::ElementId) {
    let mut store = DesignStore::new();
    let element_id = store.add_element(Element::new(
        "Box",
        ElementContent::Shape(ShapeContent::default()),
    ));
    (store, element_id)
}

#[test]
fn test_keyframe_authoring_is_additive() {
    let (mut store, element_id) = store_with_shape();
    let animation_id = store.add_animation(element_id, Phase::In).unwrap();
    let keyframe_id = store
        .add_keyframe(animation_id, 40, props(&[(PropertyKey::X, 1.0), (PropertyKey::Y, 2.0)]))
        .unwrap();

    store
        .update_keyframe(keyframe_id, KeyframePatch::property(PropertyKey::Opacity, number(0.5)))
        .unwrap();

    let keyframe = store.keyframe(keyframe_id).unwrap();
    assert_eq!(
        keyframe.properties,
        props(&[(PropertyKey::X, 1.0), (PropertyKey::Y, 2.0), (PropertyKey::Opacity, 0.5)])
    );
}

#[test]
fn test_add_animation_is_idempotent() {
    let (mut store, element_id) = store_with_shape();
    let first = store.add_animation(element_id, Phase::Loop).unwrap();
    let second = store.add_animation(element_id, Phase::Loop).unwrap();
    assert_eq!(first, second);
    assert_eq!(store.state().animations().len(), 1);

    // A different phase gets its own track
    let out = store.add_animation(element_id, Phase::Out).unwrap();
    assert_ne!(first, out);
    assert_eq!(store.state().animations().len(), 2);

    let animation = store.animation(first).unwrap();
    assert_eq!(animation.duration, store.default_duration());
    assert_eq!(animation.delay, 0);
}

#[test]
fn test_add_keyframe_merges_at_occupied_position() {
    let (mut store, element_id) = store_with_shape();
    let animation_id = store.add_animation(element_id, Phase::In).unwrap();

    let first = store
        .add_keyframe(animation_id, 40, props(&[(PropertyKey::X, 10.0), (PropertyKey::Y, 5.0)]))
        .unwrap();
    let second = store
        .add_keyframe(animation_id, 40, props(&[(PropertyKey::X, 20.0)]))
        .unwrap();

    assert_eq!(first, second);
    let track = store.keyframes_for(animation_id);
    assert_eq!(track.len(), 1);
    assert_eq!(track[0].get(PropertyKey::X), Some(number(20.0)));
    assert_eq!(track[0].get(PropertyKey::Y), Some(number(5.0)));
}

#[test]
fn test_positions_are_clamped() {
    let (mut store, element_id) = store_with_shape();
    let animation_id = store.add_animation(element_id, Phase::In).unwrap();

    let high = store.add_keyframe(animation_id, 250, PropertyMap::new()).unwrap();
    let low = store.add_keyframe(animation_id, -3, PropertyMap::new()).unwrap();

    assert_eq!(store.keyframe(high).unwrap().position, KeyframePosition::END);
    assert_eq!(store.keyframe(low).unwrap().position, KeyframePosition::START);
}

#[test]
fn test_remove_element_cascades() {
    let (mut store, element_id) = store_with_shape();
    let other_id = store.add_element(Element::new("Other", ElementContent::default()));
    for phase in Phase::ALL {
        let animation_id = store.add_animation(element_id, phase).unwrap();
        store.add_keyframe(animation_id, 0, props(&[(PropertyKey::X, 0.0)])).unwrap();
        store.add_keyframe(animation_id, 100, props(&[(PropertyKey::X, 50.0)])).unwrap();
    }
    let kept_animation = store.add_animation(other_id, Phase::In).unwrap();
    store.add_keyframe(kept_animation, 50, props(&[(PropertyKey::Y, 1.0)])).unwrap();

    store.remove_element(element_id).unwrap();

    let state = store.state();
    assert!(state.element(element_id).is_none());
    assert!(state.animations().iter().all(|animation| animation.element_id != element_id));
    assert!(
        state
            .keyframes()
            .iter()
            .all(|keyframe| state.animation(keyframe.animation_id).is_some())
    );
    assert_eq!(state.animations().len(), 1);
    assert_eq!(state.keyframes().len(), 1);
}

#[test]
fn test_remove_animation_drops_its_keyframes() {
    let (mut store, element_id) = store_with_shape();
    let animation_id = store.add_animation(element_id, Phase::In).unwrap();
    store.add_keyframe(animation_id, 20, props(&[(PropertyKey::X, 3.0)])).unwrap();

    store.remove_animation(animation_id).unwrap();
    assert!(store.animation(animation_id).is_none());
    assert!(store.state().keyframes().is_empty());
    assert!(store.element(element_id).is_some());
}

#[test]
fn test_unknown_ids_are_not_found_and_leave_state_untouched() {
    let (mut store, element_id) = store_with_shape();
    let animation_id = store.add_animation(element_id, Phase::In).unwrap();
    let keyframe_id = store.add_keyframe(animation_id, 10, props(&[(PropertyKey::X, 1.0)])).unwrap();
    store.remove_keyframe(keyframe_id).unwrap();
    let before = store.snapshot();
    let undo_len = store.history().undo_len();

    let err = store
        .update_keyframe(keyframe_id, KeyframePatch::property(PropertyKey::X, number(2.0)))
        .unwrap_err();
    assert!(err.is_not_found());
    assert!(store.remove_keyframe(keyframe_id).unwrap_err().is_not_found());
    assert!(
        store
            .add_animation(designer_timeline::ElementId::new(), Phase::In)
            .unwrap_err()
            .is_not_found()
    );

    assert_eq!(store.snapshot(), before);
    assert_eq!(store.history().undo_len(), undo_len);
}

#[test]
fn test_invalid_properties_are_rejected() {
    let (mut store, element_id) = store_with_shape();
    let animation_id = store.add_animation(element_id, Phase::In).unwrap();

    // Colour key given a number
    let wrong_kind = PropertyMap::from([(PropertyKey::Fill, number(1.0))]);
    assert!(matches!(
        store.add_keyframe(animation_id, 0, wrong_kind),
        Err(StoreError::Property(_))
    ));

    // Map keys don't apply to a shape
    let foreign = props(&[(PropertyKey::MapZoom, 3.0)]);
    assert!(matches!(
        store.add_keyframe(animation_id, 0, foreign),
        Err(StoreError::Property(_))
    ));
    assert!(store.keyframes_for(animation_id).is_empty());
}

#[test]
fn test_keyframe_values_follow_static_rules() {
    let (mut store, element_id) = store_with_shape();
    let animation_id = store.add_animation(element_id, Phase::In).unwrap();

    // Out-of-range values are clamped the same way a static write clamps them
    let keyframe_id = store
        .add_keyframe(animation_id, 10, props(&[(PropertyKey::AnchorX, 5.0), (PropertyKey::Width, -40.0)]))
        .unwrap();
    store.set_element_property(element_id, PropertyKey::AnchorX, number(5.0)).unwrap();
    let keyframe = store.keyframe(keyframe_id).unwrap();
    assert_eq!(keyframe.get(PropertyKey::AnchorX), Some(number(1.0)));
    assert_eq!(keyframe.get(PropertyKey::Width), Some(number(0.0)));
    assert_eq!(
        keyframe.get(PropertyKey::AnchorX),
        store.element(element_id).unwrap().property(PropertyKey::AnchorX)
    );

    // NaN never reaches stored state, on either path
    let before = store.snapshot();
    let nan = props(&[(PropertyKey::AnchorX, 0.5), (PropertyKey::Opacity, f64::NAN)]);
    assert!(matches!(
        store.add_keyframe(animation_id, 20, nan),
        Err(StoreError::Property(PropertyError::NotFinite { key: PropertyKey::Opacity }))
    ));
    assert!(
        store
            .update_keyframe(keyframe_id, KeyframePatch::property(PropertyKey::X, number(f64::INFINITY)))
            .is_err()
    );
    assert!(
        store
            .set_element_property(element_id, PropertyKey::Opacity, number(f64::NAN))
            .is_err()
    );
    assert_eq!(store.snapshot(), before);
}

#[test]
fn test_keyframe_at_finds_merged_keyframe() {
    let (mut store, element_id) = store_with_shape();
    let animation_id = store.add_animation(element_id, Phase::In).unwrap();
    let keyframe_id = store.add_keyframe(animation_id, 75, props(&[(PropertyKey::X, 1.0)])).unwrap();

    let state = store.state();
    assert_eq!(
        state.keyframe_at(animation_id, KeyframePosition::from(75u8)).map(|keyframe| keyframe.id),
        Some(keyframe_id)
    );
    assert!(state.keyframe_at(animation_id, KeyframePosition::from(74u8)).is_none());
}

#[test]
fn test_moving_onto_occupied_position_merges() {
    let (mut store, element_id) = store_with_shape();
    let animation_id = store.add_animation(element_id, Phase::In).unwrap();
    let occupant = store
        .add_keyframe(animation_id, 50, props(&[(PropertyKey::X, 1.0), (PropertyKey::Y, 1.0)]))
        .unwrap();
    let mover = store.add_keyframe(animation_id, 20, props(&[(PropertyKey::X, 9.0)])).unwrap();

    let surviving = store.update_keyframe(mover, KeyframePatch::move_to(50)).unwrap();

    assert_eq!(surviving, occupant);
    assert!(store.keyframe(mover).is_none());
    let track = store.keyframes_for(animation_id);
    assert_eq!(track.len(), 1);
    assert_eq!(track[0].get(PropertyKey::X), Some(number(9.0)));
    assert_eq!(track[0].get(PropertyKey::Y), Some(number(1.0)));
}

#[test]
fn test_remove_keyframe_property() {
    let (mut store, element_id) = store_with_shape();
    let animation_id = store.add_animation(element_id, Phase::In).unwrap();
    let keyframe_id = store
        .add_keyframe(animation_id, 0, props(&[(PropertyKey::X, 1.0), (PropertyKey::Y, 2.0)]))
        .unwrap();

    store.remove_keyframe_property(keyframe_id, PropertyKey::X).unwrap();
    let keyframe = store.keyframe(keyframe_id).unwrap();
    assert!(!keyframe.holds(PropertyKey::X));
    assert!(keyframe.holds(PropertyKey::Y));
}

#[test]
fn test_update_animation() {
    let (mut store, element_id) = store_with_shape();
    let animation_id = store.add_animation(element_id, Phase::Out).unwrap();

    store
        .update_animation(animation_id, AnimationPatch {
            duration: Some(AnimationDuration::new(2000).unwrap()),
            delay: Some(500),
        })
        .unwrap();

    let animation = store.animation(animation_id).unwrap();
    assert_eq!(animation.duration.as_millis(), 2000);
    assert_eq!(animation.delay, 500);
    assert_eq!(animation.end_ms(), 2500);
    assert!(AnimationDuration::new(0).is_err());
}

#[test]
fn test_undo_redo_round_trip() {
    let (mut store, element_id) = store_with_shape();
    store
        .set_element_property(element_id, PropertyKey::Opacity, number(0.25))
        .unwrap();
    store
        .update_element(element_id, ElementPatch {
            name: Some("Renamed".to_owned()),
            ..Default::default()
        })
        .unwrap();

    assert!(store.undo());
    assert_eq!(store.element(element_id).unwrap().name, "Box");
    assert_eq!(store.element(element_id).unwrap().property(PropertyKey::Opacity), Some(number(0.25)));

    assert!(store.undo());
    assert_eq!(store.element(element_id).unwrap().property(PropertyKey::Opacity), Some(number(1.0)));

    assert!(store.redo());
    assert!(store.redo());
    assert_eq!(store.element(element_id).unwrap().name, "Renamed");
    assert!(!store.redo());

    // A fresh mutation clears the redo stack
    store.undo();
    store.set_element_property(element_id, PropertyKey::X, number(4.0)).unwrap();
    assert!(!store.can_redo());
}

#[test]
fn test_listeners_see_state_after_mutation() {
    let (mut store, element_id) = store_with_shape();
    let seen: Rc<RefCell<Vec<(StoreEvent, usize)>>> = Rc::default();
    let sink = Rc::clone(&seen);
    let subscription = store.subscribe(move |event: &StoreEvent, state: &DesignState| {
        sink.borrow_mut().push((event.clone(), state.animations().len()));
    });

    let animation_id = store.add_animation(element_id, Phase::In).unwrap();
    // Idempotent call emits nothing
    store.add_animation(element_id, Phase::In).unwrap();

    assert_eq!(
        seen.borrow().as_slice(),
        &[(
            StoreEvent::AnimationCreated {
                animation_id,
                element_id,
                phase: Phase::In,
            },
            1
        )]
    );

    assert!(store.unsubscribe(subscription));
    store.remove_animation(animation_id).unwrap();
    assert_eq!(seen.borrow().len(), 1);
}

#[test]
fn test_replace_state_normalizes_and_clears_history() {
    let (mut store, element_id) = store_with_shape();
    let animation_id = store.add_animation(element_id, Phase::In).unwrap();
    store.add_keyframe(animation_id, 0, props(&[(PropertyKey::X, 0.0)])).unwrap();
    let saved = store.snapshot();

    let mut fresh = DesignStore::new();
    fresh.replace_state(saved.clone());
    assert_eq!(fresh.snapshot(), saved);
    assert!(!fresh.can_undo());
}
