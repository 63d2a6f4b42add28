use crate::ShaderHotReloaderBuilder;
use crate::compile::{self, ShaderCompiler};
use crate::error::Error;
use crate::report::ReportSink;
use crate::resource::{CompiledResource, ResourceContext};
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::SystemTime;
use tracing::{info, warn};

/// Keeps one compiled shader effect in sync with its on-disk source.
///
/// The reloader records the source file's modification time at construction
/// and compares against it on every [`check_for_changes`] call. When the file
/// is newer, the external compiler is run synchronously inside the calling
/// tick, the freshly built artifact is staged into the runtime search path
/// and swapped in, and the previous resource is kept on any failure.
///
/// One reloader owns one watched source and one current resource; each
/// playground constructs and holds its own instance.
///
/// [`check_for_changes`]: ShaderHotReloader::check_for_changes
pub struct ShaderHotReloader {
    source_path: PathBuf,
    source_stem: String,
    last_update: SystemTime,
    compiler: ShaderCompiler,
    build_dir: PathBuf,
    content_dir: PathBuf,
    context: ResourceContext,
    current: Option<Arc<CompiledResource>>,
    logical_name: Option<String>,
    sink: Box<dyn ReportSink>,
}

impl ShaderHotReloader {
    /// Creates a builder for customizing reloader configuration.
    pub fn builder(source_root: impl AsRef<Path>) -> ShaderHotReloaderBuilder {
        ShaderHotReloaderBuilder::new(source_root)
    }

    pub(crate) fn new_with_config(
        source_path: PathBuf,
        compiler: ShaderCompiler,
        build_dir: PathBuf,
        content_dir: PathBuf,
        sink: Box<dyn ReportSink>,
    ) -> Result<Self, Error> {
        let metadata =
            fs::metadata(&source_path).map_err(|_| Error::Configuration(source_path.clone()))?;
        let last_update = metadata.modified()?;

        let source_stem = source_path
            .file_stem()
            .and_then(|s| s.to_str())
            .map(str::to_string)
            .ok_or_else(|| Error::Configuration(source_path.clone()))?;

        info!(source = %source_path.display(), "shader hot reloading enabled");

        Ok(Self {
            source_path,
            source_stem,
            last_update,
            compiler,
            build_dir,
            content_dir: content_dir.clone(),
            context: ResourceContext::new(content_dir),
            current: None,
            logical_name: None,
            sink,
        })
    }

    /// The watched source file.
    pub fn source_path(&self) -> &Path {
        &self.source_path
    }

    /// Polls the watched source and rebuilds if it changed.
    ///
    /// Returns `true` when a change was detected (whether or not the rebuild
    /// succeeded), `false` otherwise. The unchanged path is a single file
    /// stat; the changed path runs the whole compile-and-swap synchronously,
    /// stalling the tick for the duration of the external build. No failure
    /// escapes as an error: build problems are reported through the sink and
    /// the previously loaded resource stays current. Call once per frame.
    pub fn check_for_changes(&mut self) -> bool {
        let modified = match fs::metadata(&self.source_path).and_then(|m| m.modified()) {
            Ok(time) => time,
            Err(e) => {
                warn!(source = %self.source_path.display(), "could not stat watched source: {e}");
                return false;
            }
        };

        if modified <= self.last_update {
            return false;
        }

        // Advance the baseline even on failure so an unchanged failing file
        // does not re-trigger every tick.
        self.last_update = modified;

        if let Err(e) = self.reload() {
            warn!(source = %self.source_path.display(), "shader reload failed: {e}");
            self.sink.report(&e.to_string());
        }
        true
    }

    /// Returns the current compiled resource, loading it on first use.
    ///
    /// `logical_name` is recorded on the first call and used to stage every
    /// later rebuild; subsequent calls return whatever resource is current.
    ///
    /// # Errors
    ///
    /// [`Error::ResourceNotFound`] when no artifact for `logical_name` exists
    /// in the runtime search path and no prior successful build produced one.
    pub fn load(&mut self, logical_name: &str) -> Result<Arc<CompiledResource>, Error> {
        if self.logical_name.is_none() {
            self.logical_name = Some(logical_name.to_string());
        }
        if let Some(current) = &self.current {
            return Ok(current.clone());
        }
        let resource = self.context.load(logical_name)?;
        self.current = Some(resource.clone());
        Ok(resource)
    }

    fn reload(&mut self) -> Result<(), Error> {
        info!(source = %self.source_path.display(), "shader source changed, recompiling");

        compile::recreate_build_dir(&self.build_dir)?;
        self.compiler.compile(&self.source_path, &self.build_dir)?;

        let artifact = compile::resolve_artifact(&self.build_dir, &self.source_stem)?;
        let name = self
            .logical_name
            .clone()
            .unwrap_or_else(|| self.source_stem.clone());
        compile::stage_artifact(&artifact, &self.content_dir, &name)?;

        // Build the replacement fully before dropping the old generation;
        // a consumer holding the previous Arc keeps rendering with it.
        let context = ResourceContext::new(&self.content_dir);
        let resource = context.load(&name)?;
        self.context = context;
        self.current = Some(resource);

        info!(shader = %name, "shader recompiled successfully");
        self.sink.report(&format!("Shader {name} reloaded"));
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::report::LogSink;

    #[test]
    fn missing_source_fails_construction() {
        let tmp = tempfile::tempdir().unwrap();
        let missing = tmp.path().join("Shaders/NotThere.fx");
        let result = ShaderHotReloader::new_with_config(
            missing.clone(),
            ShaderCompiler::default(),
            tmp.path().join("build"),
            tmp.path().join("content"),
            Box::new(LogSink),
        );
        match result {
            Err(Error::Configuration(path)) => assert_eq!(path, missing),
            Err(other) => panic!("expected configuration error, got {other}"),
            Ok(_) => panic!("expected configuration error"),
        }
    }
}
