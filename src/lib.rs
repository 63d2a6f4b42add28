//! Hot-reloading of compiled shader effects for interactive playgrounds.
//!
//! This crate keeps a compiled GPU effect in sync with its source file during
//! development: each playground owns a [`ShaderHotReloader`] that polls the
//! watched file once per frame, rebuilds it through an external effect
//! compiler when it changes, and swaps in the fresh artifact while keeping
//! the last good one on any failure. Build diagnostics go to a pluggable
//! [`ReportSink`], typically a word-wrapping on-screen [`StatusLabel`].
//!
//! The camera, frame-rate and procedural-geometry helpers the playgrounds
//! share live here too, so a playground can focus on its shader technique.
//!
//! # Quick Start
//!
//! ```rust,no_run
//! use shader_playground::{ShaderHotReloader, StatusLabel};
//!
//! let label = StatusLabel::shared(100);
//!
//! let mut reloader = ShaderHotReloader::builder("assets/Shaders")
//!     .compiler("mgfxc")
//!     .platform("DesktopGL")
//!     .sink(label.clone())
//!     .build("RayMarching.fx")
//!     .expect("failed to initialise shader hot reloader");
//!
//! let mut effect = reloader
//!     .load("RayMarching")
//!     .expect("no prebuilt effect in the content directory");
//!
//! // Once per update tick:
//! if reloader.check_for_changes() {
//!     // A failed rebuild keeps the previous effect current.
//!     effect = reloader.load("RayMarching").expect("resource disappeared");
//!     // Recreate device objects from effect.bytes() here,
//!     // and draw label.lock().text() somewhere visible.
//! }
//! ```

pub mod builder;
pub mod camera;
pub mod compile;
pub mod error;
pub mod geometry;
pub mod report;
pub mod resource;
pub mod stats;
pub mod watcher;

pub use builder::ShaderHotReloaderBuilder;
pub use camera::OrbitCamera;
pub use compile::{BuildOutput, ShaderCompiler};
pub use error::Error;
pub use report::{LogSink, ReportSink, StatusLabel, wrap};
pub use resource::{CompiledResource, HotReloadable, HotReloadableTask, ResourceContext};
pub use stats::FrameRateCounter;
pub use watcher::ShaderHotReloader;

const DEFAULT_COMPILER: &str = "mgfxc";
const DEFAULT_PLATFORM: &str = "DesktopGL";
const DEFAULT_PROFILE: &str = "HiDef";
const DEFAULT_WRAP_WIDTH: usize = 100;
const BUILD_SUBDIR: &str = "hotreloadshaders";
const CONTENT_SUBDIR: &str = "Content/Shaders";
