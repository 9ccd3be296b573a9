//! Cross-executor equivalence: the realtime and stepped drivers must
//! leave an identical ordered set of visible messages for the same
//! compiled timeline.

use chatcast::playback::NullIntroAudio;
use chatcast::{
    AudioCue, AudioSink, CancelToken, CastDirectory, CharacterMeta, ChatScript, DialogueItem,
    PlayOptions, PlaybackResult, RealtimeExecutor, RenderSink, Side, SteppedExecutor, Timeline,
    TimelineEvent, TimingConfig,
};

#[derive(Default)]
struct VisibleMessages {
    appeared: Vec<usize>,
    consecutive_flags: Vec<bool>,
}

impl RenderSink for VisibleMessages {
    fn on_message_appear(
        &mut self,
        event: &TimelineEvent,
        _item: &DialogueItem,
        _meta: &CharacterMeta,
        consecutive: bool,
    ) {
        self.appeared.push(event.index);
        self.consecutive_flags.push(consecutive);
    }
    fn on_typing_show(&mut self, _meta: &CharacterMeta) {}
    fn on_typing_hide(&mut self) {}
    fn on_overlay_show(&mut self, _text: Option<&str>) {}
    fn on_overlay_hide(&mut self) {}
}

impl AudioSink for VisibleMessages {
    fn on_cue(&mut self, _cue: AudioCue) {}
}

fn script() -> ChatScript {
    ChatScript::from_json(
        r#"{
        "characters": [
            {"id": "alice", "display_name": "Alice", "side": "left"},
            {"id": "me", "display_name": "Me", "side": "right"}
        ],
        "items": [
            {"sender": "alice", "message": "did you see the news?", "order": 0},
            {"sender": "alice", "message": "unbelievable", "order": 1},
            {"sender": "me", "message": "hold on, reading now", "order": 2},
            {"sender": "time_divider", "message": "Ten minutes later", "order": 3},
            {"sender": "me", "message": "ok wow", "order": 4},
            {"sender": "alice", "image_path": "stickers/shock.png", "order": 5}
        ]
    }"#,
    )
    .unwrap()
}

#[test]
fn realtime_completion_matches_stepped_final_state() {
    let script = script();
    let cast = script.cast();
    let config = TimingConfig::default();
    let timeline = Timeline::compile(&script.items, &cast, &config);

    let mut realtime = RealtimeExecutor::new(
        &timeline,
        &script.items,
        &cast,
        &config,
        CancelToken::new(),
    );
    let mut realtime_sink = VisibleMessages::default();
    let mut audio = VisibleMessages::default();
    let mut intro_audio = NullIntroAudio;
    let options = PlayOptions {
        start_at: 0,
        speed: 500.0,
    };
    let result = realtime.run(
        None,
        options,
        &mut realtime_sink,
        &mut audio,
        &mut intro_audio,
    );
    assert_eq!(result, PlaybackResult::Completed);

    let mut stepped = SteppedExecutor::new(&timeline, &script.items, &cast);
    let mut stepped_sink = VisibleMessages::default();
    stepped.update(timeline.total_duration, &mut stepped_sink);

    assert_eq!(realtime_sink.appeared, stepped_sink.appeared);
    assert_eq!(
        realtime_sink.consecutive_flags,
        stepped_sink.consecutive_flags
    );
}

#[test]
fn stepped_frame_walk_matches_realtime_order() {
    let script = script();
    let cast = script.cast();
    let config = TimingConfig::default();
    let timeline = Timeline::compile(&script.items, &cast, &config);

    let mut stepped = SteppedExecutor::new(&timeline, &script.items, &cast);
    let mut sink = VisibleMessages::default();
    let fps = 60.0;
    let frames = (timeline.total_duration * fps).ceil() as u64 + 1;
    for frame in 0..frames {
        stepped.update(frame as f64 / fps, &mut sink);
    }

    let expected: Vec<usize> = timeline.events.iter().map(|e| e.index).collect();
    assert_eq!(sink.appeared, expected);
    assert!(stepped.finished());
}

#[test]
fn unknown_sender_plays_through_with_placeholder() {
    let items = vec![DialogueItem {
        sender: "deleted-character".to_string(),
        message: Some("still here".to_string()),
        image_path: None,
        explicit_delay: None,
        explicit_reaction_delay: None,
        typing_speed: chatcast::TypingSpeed::Normal,
        order: 0,
    }];
    let cast = CastDirectory::new(vec![CharacterMeta {
        id: "alice".to_string(),
        display_name: "Alice".to_string(),
        avatar_path: None,
        side: Side::Left,
    }]);
    let config = TimingConfig::default();
    let timeline = Timeline::compile(&items, &cast, &config);

    let mut stepped = SteppedExecutor::new(&timeline, &items, &cast);
    let mut sink = VisibleMessages::default();
    stepped.update(timeline.total_duration, &mut sink);
    assert_eq!(sink.appeared, vec![0]);
}
