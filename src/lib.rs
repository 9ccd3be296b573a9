//! chatcast - deterministic chat playback timeline engine
//!
//! Turns a scripted multi-character conversation into a precise,
//! replayable schedule of visual and audio events, and plays that
//! schedule back two interchangeable ways:
//!
//! - live, with real wall-clock waits, for an interactive preview
//! - stepped, driven by an external frame clock, for frame-accurate
//!   video capture
//!
//! Both drivers interpret the same compiled [`timeline::Timeline`], so
//! the preview and the exported video always show identical state at
//! identical offsets.
//!
//! # Usage
//!
//! ```no_run
//! use std::path::Path;
//! use chatcast::cast::CastDirectory;
//! use chatcast::script::ChatScript;
//! use chatcast::timeline::Timeline;
//! use chatcast::timing::TimingConfig;
//!
//! let script = ChatScript::load(Path::new("project.json")).unwrap();
//! let config = TimingConfig::default();
//! let timeline = Timeline::compile(&script.items, &CastDirectory::default(), &config);
//! println!("runs for {:.2}s", timeline.total_duration);
//! ```

pub mod cast;
pub mod playback;
pub mod script;
pub mod timeline;
pub mod timing;

pub use cast::{CastDirectory, CharacterMeta, Side};
pub use playback::{
    AudioCue, AudioSink, CancelToken, PlayOptions, PlaybackResult, RealtimeExecutor, RenderSink,
    SteppedExecutor,
};
pub use script::{ChatScript, DialogueItem, IntroSpec, ScriptError, ThemeKind, TypingSpeed};
pub use timeline::{EventKind, Timeline, TimelineEvent};
pub use timing::{TimingConfig, TimingResult};
