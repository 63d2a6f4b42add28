use crate::error::Error;
use parking_lot::Mutex;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;

/// An opaque compiled shader artifact, identified by its logical name.
///
/// The bytes are whatever the effect compiler produced; this crate never
/// interprets them. Consumers hand them to their GPU layer to create the
/// actual device object. Resources are shared as `Arc` clones so a playground
/// can keep drawing with the previous generation while a reload is staged.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompiledResource {
    name: String,
    bytes: Vec<u8>,
}

impl CompiledResource {
    /// Logical name the resource was loaded under.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Raw compiled bytecode.
    pub fn bytes(&self) -> &[u8] {
        &self.bytes
    }
}

/// Directory-backed loader for compiled shader artifacts.
///
/// The runtime equivalent of a content manager pointed at one search path:
/// `load` resolves a logical name to the single file in the directory with
/// that stem and reads it. Contexts are cheap and disposable; the reloader
/// drops its context and creates a fresh one after every successful rebuild
/// so no handle to the replaced artifact survives.
#[derive(Debug, Clone)]
pub struct ResourceContext {
    root: PathBuf,
}

impl ResourceContext {
    /// Creates a loader over `root`. The directory may not exist yet; loads
    /// simply fail with [`Error::ResourceNotFound`] until it does.
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// The backing directory.
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Loads the artifact stored under `name`.
    ///
    /// # Errors
    ///
    /// [`Error::ResourceNotFound`] if no file in the backing directory has
    /// the requested stem, [`Error::ArtifactResolution`] if several do.
    pub fn load(&self, name: &str) -> Result<Arc<CompiledResource>, Error> {
        if !self.root.is_dir() {
            return Err(Error::ResourceNotFound(name.to_string()));
        }
        let path = match crate::compile::resolve_artifact(&self.root, name) {
            Ok(path) => path,
            Err(Error::ArtifactResolution { matches: 0, .. }) => {
                return Err(Error::ResourceNotFound(name.to_string()));
            }
            Err(e) => return Err(e),
        };
        let bytes = fs::read(&path)?;
        Ok(Arc::new(CompiledResource { name: name.to_string(), bytes }))
    }
}

/// Trait for render tasks that support shader hot reloading.
///
/// Implementing this trait allows a task to rebuild its GPU state when the
/// watched shader has been recompiled and swapped.
///
/// # Example
///
/// ```rust,no_run
/// use shader_playground::{CompiledResource, HotReloadable};
/// use std::sync::Arc;
///
/// struct RayMarchingBlock {
///     effect_bytecode: Arc<CompiledResource>,
/// }
///
/// impl HotReloadable for RayMarchingBlock {
///     fn recreate_pipeline(
///         &mut self,
///         resource: &Arc<CompiledResource>,
///     ) -> Result<(), Box<dyn std::error::Error>> {
///         // Recreate the effect on the device from resource.bytes() here.
///         self.effect_bytecode = resource.clone();
///         Ok(())
///     }
/// }
/// ```
pub trait HotReloadable {
    /// Recreates the pipeline from a newly compiled resource.
    ///
    /// Called after a successful reload; the previous device objects should
    /// only be dropped once the replacements exist.
    fn recreate_pipeline(
        &mut self,
        resource: &Arc<CompiledResource>,
    ) -> Result<(), Box<dyn std::error::Error>>;
}

/// Shared wrapper for a hot-reloadable task.
///
/// Stores the task behind `Arc<Mutex<_>>` so the reload path can reach it
/// independently of the frame loop that normally drives it.
pub struct HotReloadableTask<T> {
    pub task: Arc<Mutex<T>>,
}

impl<T> HotReloadableTask<T> {
    pub fn new(task: T) -> Self {
        Self {
            task: Arc::new(Mutex::new(task)),
        }
    }
}

impl<T> Clone for HotReloadableTask<T> {
    fn clone(&self) -> Self {
        Self {
            task: self.task.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn load_reads_artifact_by_stem() {
        let tmp = tempfile::tempdir().unwrap();
        fs::write(tmp.path().join("Hologram.fxb"), b"fxb").unwrap();

        let context = ResourceContext::new(tmp.path());
        let resource = context.load("Hologram").unwrap();
        assert_eq!(resource.name(), "Hologram");
        assert_eq!(resource.bytes(), b"fxb");
    }

    #[test]
    fn missing_artifact_is_resource_not_found() {
        let tmp = tempfile::tempdir().unwrap();
        let context = ResourceContext::new(tmp.path());
        assert!(matches!(context.load("Nope"), Err(Error::ResourceNotFound(_))));

        // Same answer when the search path itself is absent.
        let context = ResourceContext::new(tmp.path().join("not/there"));
        assert!(matches!(context.load("Nope"), Err(Error::ResourceNotFound(_))));
    }

    #[test]
    fn ambiguous_artifacts_fail_loudly() {
        let tmp = tempfile::tempdir().unwrap();
        fs::write(tmp.path().join("Voro.fxb"), b"a").unwrap();
        fs::write(tmp.path().join("Voro.bak"), b"b").unwrap();

        let context = ResourceContext::new(tmp.path());
        assert!(matches!(
            context.load("Voro"),
            Err(Error::ArtifactResolution { matches: 2, .. })
        ));
    }

    #[test]
    fn shared_task_clones_point_at_one_instance() {
        let task = HotReloadableTask::new(0u32);
        let clone = task.clone();
        *task.task.lock() += 1;
        assert_eq!(*clone.task.lock(), 1);
    }
}
