use crate::compile::ShaderCompiler;
use crate::error::Error;
use crate::report::{LogSink, ReportSink};
use crate::watcher::ShaderHotReloader;
use crate::{BUILD_SUBDIR, CONTENT_SUBDIR, DEFAULT_COMPILER, DEFAULT_PLATFORM, DEFAULT_PROFILE};
use std::path::{Path, PathBuf};

/// Builder for configuring a ShaderHotReloader instance.
///
/// Provides an interface for customising the compiler invocation (program,
/// platform, profile, compression) and the directories the reloader works
/// with. Calling [`build`](Self::build) resolves the watched file against the
/// source root and fails fast if it does not exist.
///
/// # Example
///
/// ```rust,no_run
/// use shader_playground::{ShaderHotReloader, StatusLabel};
///
/// let label = StatusLabel::shared(100);
///
/// let mut reloader = ShaderHotReloader::builder("assets/Shaders")
///     .compiler("mgfxc")
///     .platform("DesktopGL")
///     .profile("HiDef")
///     .sink(label.clone())
///     .build("RayMarching.fx")
///     .expect("failed to initialise shader hot reloader");
/// ```
pub struct ShaderHotReloaderBuilder {
    source_root: PathBuf,
    binary_root: Option<PathBuf>,
    build_dir: Option<PathBuf>,
    content_dir: Option<PathBuf>,
    compiler: PathBuf,
    platform: String,
    profile: String,
    compress: bool,
    sink: Option<Box<dyn ReportSink>>,
}

impl ShaderHotReloaderBuilder {
    /// Creates a new builder with default settings.
    ///
    /// # Arguments
    ///
    /// * `source_root` - Directory the watched source path is resolved against
    pub fn new(source_root: impl AsRef<Path>) -> Self {
        Self {
            source_root: source_root.as_ref().to_path_buf(),
            binary_root: None,
            build_dir: None,
            content_dir: None,
            compiler: PathBuf::from(DEFAULT_COMPILER),
            platform: DEFAULT_PLATFORM.to_string(),
            profile: DEFAULT_PROFILE.to_string(),
            compress: false,
            sink: None,
        }
    }

    /// Sets the external compiler program to invoke.
    pub fn compiler(mut self, program: impl Into<PathBuf>) -> Self {
        self.compiler = program.into();
        self
    }

    /// Sets the target platform passed to the compiler.
    pub fn platform(mut self, platform: impl Into<String>) -> Self {
        self.platform = platform.into();
        self
    }

    /// Sets the color/precision profile passed to the compiler.
    pub fn profile(mut self, profile: impl Into<String>) -> Self {
        self.profile = profile.into();
        self
    }

    /// Enables or disables artifact compression.
    pub fn compress(mut self, enabled: bool) -> Self {
        self.compress = enabled;
        self
    }

    /// Sets the root the build and content directories are derived from.
    ///
    /// Defaults to the running executable's directory. The build output goes
    /// to `<binary_root>/hotreloadshaders/` and freshly built artifacts are
    /// staged into `<binary_root>/Content/Shaders/`, unless either directory
    /// is overridden explicitly.
    pub fn binary_root(mut self, root: impl Into<PathBuf>) -> Self {
        self.binary_root = Some(root.into());
        self
    }

    /// Overrides the build output directory (recreated on every reload).
    pub fn build_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.build_dir = Some(dir.into());
        self
    }

    /// Overrides the runtime search path artifacts are staged into.
    pub fn content_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.content_dir = Some(dir.into());
        self
    }

    /// Sets the sink that receives reload status and build diagnostics.
    ///
    /// Defaults to a sink that forwards everything to the `tracing` log.
    pub fn sink(mut self, sink: impl ReportSink + 'static) -> Self {
        self.sink = Some(Box::new(sink));
        self
    }

    /// Builds the reloader watching `relative_source_path`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Configuration`] if the resolved source file does not
    /// exist, or an I/O error if no binary root was configured and the
    /// executable's directory cannot be determined.
    pub fn build(self, relative_source_path: impl AsRef<Path>) -> Result<ShaderHotReloader, Error> {
        let source_path = self.source_root.join(relative_source_path.as_ref());

        let binary_root = match self.binary_root {
            Some(root) => root,
            None => default_binary_root()?,
        };
        let build_dir = self
            .build_dir
            .unwrap_or_else(|| binary_root.join(BUILD_SUBDIR));
        let content_dir = self
            .content_dir
            .unwrap_or_else(|| binary_root.join(CONTENT_SUBDIR));

        let compiler = ShaderCompiler::new(self.compiler)
            .platform(self.platform)
            .profile(self.profile)
            .compress(self.compress);

        let sink = self.sink.unwrap_or_else(|| Box::new(LogSink));

        ShaderHotReloader::new_with_config(source_path, compiler, build_dir, content_dir, sink)
    }
}

fn default_binary_root() -> std::io::Result<PathBuf> {
    let exe = std::env::current_exe()?;
    exe.parent().map(Path::to_path_buf).ok_or_else(|| {
        std::io::Error::new(
            std::io::ErrorKind::NotFound,
            "executable has no parent directory",
        )
    })
}
