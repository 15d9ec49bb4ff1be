use fixture::{generate, NodeLayout, MAX_NODE_COUNT, MIN_NODE_COUNT};
use proptest::prelude::*;
use script::{Script, ScriptLimits, SpId};

fn layout_and_node() -> impl Strategy<Value = (u32, u32)> {
    (MIN_NODE_COUNT..=MAX_NODE_COUNT).prop_flat_map(|count| (Just(count), 0..count))
}

proptest! {
    #[test]
    fn prop_frames_numbered_from_one((count, node) in layout_and_node()) {
        let layout = NodeLayout::new(count).unwrap();
        let script = generate(&layout, SpId::new(node)).unwrap();
        prop_assert!(script.check_sequence().is_ok());
        prop_assert!(script.stats().frames >= 10);
    }

    #[test]
    fn prop_generated_text_parses_back((count, node) in layout_and_node()) {
        let layout = NodeLayout::new(count).unwrap();
        let script = generate(&layout, SpId::new(node)).unwrap();
        let parsed = Script::parse(&script.to_string(), &ScriptLimits::default()).unwrap();
        prop_assert_eq!(parsed, script);
    }

    #[test]
    fn prop_generation_is_pure((count, node) in layout_and_node()) {
        let layout = NodeLayout::new(count).unwrap();
        let a = generate(&layout, SpId::new(node)).unwrap();
        let b = generate(&layout, SpId::new(node)).unwrap();
        prop_assert_eq!(a.to_string(), b.to_string());
    }

    #[test]
    fn prop_targets_in_range_from_ten_nodes((count, node) in layout_and_node()) {
        prop_assume!(count >= 10);
        let layout = NodeLayout::new(count).unwrap();
        let script = generate(&layout, SpId::new(node)).unwrap();
        for target in script.stats().targets {
            prop_assert!(layout.contains(target), "SP {} targets {}", node, target);
        }
    }
}

#[test]
fn every_supported_layout_generates() {
    for count in MIN_NODE_COUNT..=MAX_NODE_COUNT {
        let layout = NodeLayout::new(count).unwrap();
        let scripts = fixture::generate_all(&layout);
        assert_eq!(scripts.len(), count as usize);
    }
}
