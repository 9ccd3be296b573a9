//! End-to-end timeline properties over realistic scripts.

use chatcast::{ChatScript, EventKind, Timeline, TimingConfig};

fn compile(json: &str) -> (ChatScript, Timeline) {
    let script = ChatScript::from_json(json).unwrap();
    let cast = script.cast();
    let timeline = Timeline::compile(&script.items, &cast, &TimingConfig::default());
    (script, timeline)
}

#[test]
fn overlay_window_matches_divider_timestamps() {
    let (script, timeline) = compile(
        r#"{
        "items": [
            {"sender": "a", "message": "first", "order": 0},
            {"sender": "time_divider", "message": "That evening", "order": 1},
            {"sender": "a", "message": "second", "order": 2}
        ]
    }"#,
    );
    let divider = timeline
        .events
        .iter()
        .find(|e| e.kind == EventKind::Divider)
        .unwrap();

    let inside = (divider.typing_start + divider.appear_time) / 2.0;
    assert!(timeline.overlay_state(&script.items, inside).active);
    assert!(
        !timeline
            .overlay_state(&script.items, divider.appear_time)
            .active
    );
    assert_eq!(
        timeline.overlay_state(&script.items, inside).text,
        Some("That evening")
    );
}

#[test]
fn explicit_overrides_shift_the_whole_tail() {
    let base = r#"{
        "items": [
            {"sender": "a", "message": "one", "order": 0},
            {"sender": "b", "message": "two", "order": 1},
            {"sender": "a", "message": "three", "order": 2}
        ]
    }"#;
    let overridden = r#"{
        "items": [
            {"sender": "a", "message": "one", "order": 0},
            {"sender": "b", "message": "two", "explicit_delay": 4.0, "explicit_reaction_delay": 2.0, "order": 1},
            {"sender": "a", "message": "three", "order": 2}
        ]
    }"#;
    let (_, plain) = compile(base);
    let (_, shifted) = compile(overridden);

    assert_eq!(shifted.events[1].appear_time - shifted.events[1].reaction_start, 6.0);
    let delta = shifted.events[1].appear_time - plain.events[1].appear_time;
    assert!(delta > 0.0);
    // Later events move by exactly the same amount.
    assert!(
        (shifted.events[2].appear_time - plain.events[2].appear_time - delta).abs() < 1e-9
    );
}

#[test]
fn timeline_json_is_stable_across_serialization() {
    let (_, timeline) = compile(
        r#"{
        "items": [
            {"sender": "a", "message": "hello there, how have you been lately?", "order": 0},
            {"sender": "b", "message": "good!", "typing_speed": "fast", "order": 1}
        ]
    }"#,
    );
    let json = serde_json::to_string(&timeline).unwrap();
    let back: Timeline = serde_json::from_str(&json).unwrap();
    assert_eq!(back.events, timeline.events);
    assert_eq!(back.total_duration, timeline.total_duration);
}

#[test]
fn long_conversation_stays_monotonic() {
    let mut items = Vec::new();
    for i in 0..40u32 {
        let sender = match i % 4 {
            0 | 1 => "a",
            2 => "time_divider",
            _ => "b",
        };
        items.push(format!(
            r#"{{"sender": "{sender}", "message": "message body {i}", "order": {i}}}"#
        ));
    }
    let json = format!(r#"{{"items": [{}]}}"#, items.join(","));
    let (_, timeline) = compile(&json);

    assert_eq!(timeline.events.len(), 40);
    for pair in timeline.events.windows(2) {
        assert!(pair[1].appear_time > pair[0].appear_time);
        assert_eq!(pair[1].reaction_start, pair[0].appear_time);
    }
}
