use crate::error::Error;
use crate::{DEFAULT_COMPILER, DEFAULT_PLATFORM, DEFAULT_PROFILE};
use std::ffi::OsString;
use std::fs;
use std::path::{Path, PathBuf};
use std::process::Command;
use tracing::debug;

/// External effect compiler invoked once per detected source change.
///
/// The compiler is an ordinary subprocess: it receives the target platform,
/// a color/compression profile, the source file and an output directory, and
/// communicates failure through its exit status with diagnostics on
/// stdout/stderr. The invocation blocks the calling tick until the process
/// exits.
#[derive(Debug, Clone)]
pub struct ShaderCompiler {
    program: PathBuf,
    platform: String,
    profile: String,
    compress: bool,
}

impl ShaderCompiler {
    /// Creates a compiler invocation for `program` with default settings.
    pub fn new(program: impl Into<PathBuf>) -> Self {
        Self {
            program: program.into(),
            platform: DEFAULT_PLATFORM.to_string(),
            profile: DEFAULT_PROFILE.to_string(),
            compress: false,
        }
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

    /// Runs the compiler on `source`, placing artifacts in `out_dir`.
    ///
    /// Blocks until the process exits. Returns the captured output on exit
    /// status zero; a non-zero status becomes [`Error::BuildFailure`] carrying
    /// the combined stdout and stderr text.
    pub fn compile(&self, source: &Path, out_dir: &Path) -> Result<BuildOutput, Error> {
        let mut command = Command::new(&self.program);
        command.args(self.arguments(source, out_dir));
        if let Some(dir) = source.parent() {
            command.current_dir(dir);
        }

        debug!(program = %self.program.display(), source = %source.display(), "invoking shader compiler");

        let output = command.output()?;
        let build = BuildOutput {
            stdout: String::from_utf8_lossy(&output.stdout).into_owned(),
            stderr: String::from_utf8_lossy(&output.stderr).into_owned(),
        };

        if !output.status.success() {
            return Err(Error::BuildFailure {
                status: output.status.code().unwrap_or(-1),
                diagnostics: build.diagnostics(),
            });
        }
        Ok(build)
    }

    fn arguments(&self, source: &Path, out_dir: &Path) -> Vec<OsString> {
        let mut args: Vec<OsString> = vec![
            "--platform".into(),
            self.platform.clone().into(),
            "--profile".into(),
            self.profile.clone().into(),
        ];
        if !self.compress {
            args.push("--no-compress".into());
        }
        args.push(source.into());
        args.push(out_dir.into());
        args
    }
}

impl Default for ShaderCompiler {
    fn default() -> Self {
        Self::new(DEFAULT_COMPILER)
    }
}

/// Captured stdout and stderr of one compiler run.
#[derive(Debug, Clone)]
pub struct BuildOutput {
    /// Everything the compiler wrote to stdout.
    pub stdout: String,
    /// Everything the compiler wrote to stderr.
    pub stderr: String,
}

impl BuildOutput {
    /// Combined stderr and stdout, stderr first, suitable for display.
    pub fn diagnostics(&self) -> String {
        let mut text = self.stderr.trim_end().to_string();
        if !self.stdout.trim().is_empty() {
            if !text.is_empty() {
                text.push('\n');
            }
            text.push_str(self.stdout.trim_end());
        }
        text
    }
}

/// Recreates the build output directory, clearing any stale prior output.
pub(crate) fn recreate_build_dir(dir: &Path) -> std::io::Result<()> {
    match fs::remove_dir_all(dir) {
        Ok(()) => {}
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {}
        Err(e) => return Err(e),
    }
    fs::create_dir_all(dir)
}

/// Resolves the single build artifact in `out_dir` whose stem matches `stem`.
///
/// Zero or multiple candidates are a hard failure; the reload is abandoned
/// rather than guessing which file the compiler meant.
pub(crate) fn resolve_artifact(out_dir: &Path, stem: &str) -> Result<PathBuf, Error> {
    let mut matches: Vec<PathBuf> = Vec::new();
    for entry in fs::read_dir(out_dir)? {
        let path = entry?.path();
        if path.is_file() && path.file_stem().and_then(|s| s.to_str()) == Some(stem) {
            matches.push(path);
        }
    }

    if matches.len() == 1 {
        Ok(matches.remove(0))
    } else {
        Err(Error::ArtifactResolution {
            stem: stem.to_string(),
            matches: matches.len(),
        })
    }
}

/// Copies a built artifact into the runtime search path under `logical_name`,
/// keeping the artifact's own extension. Returns the staged path.
pub(crate) fn stage_artifact(
    artifact: &Path,
    content_dir: &Path,
    logical_name: &str,
) -> Result<PathBuf, Error> {
    fs::create_dir_all(content_dir)?;
    let mut dest = content_dir.join(logical_name);
    if let Some(ext) = artifact.extension() {
        dest.set_extension(ext);
    }
    fs::copy(artifact, &dest)?;
    Ok(dest)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn arguments_follow_the_compiler_contract() {
        let compiler = ShaderCompiler::new("mgfxc").platform("Windows").profile("HiDef");
        let args = compiler.arguments(Path::new("Shaders/Voro.fx"), Path::new("out"));
        let args: Vec<String> = args.iter().map(|a| a.to_string_lossy().into_owned()).collect();
        assert_eq!(
            args,
            ["--platform", "Windows", "--profile", "HiDef", "--no-compress", "Shaders/Voro.fx", "out"]
        );
    }

    #[test]
    fn compression_flag_is_dropped_when_enabled() {
        let compiler = ShaderCompiler::new("mgfxc").compress(true);
        let args = compiler.arguments(Path::new("a.fx"), Path::new("out"));
        assert!(!args.iter().any(|a| a == "--no-compress"));
    }

    #[test]
    fn recreate_build_dir_clears_stale_output() {
        let tmp = tempfile::tempdir().unwrap();
        let dir = tmp.path().join("hotreloadshaders");
        fs::create_dir_all(&dir).unwrap();
        fs::write(dir.join("stale.fxb"), b"old").unwrap();

        recreate_build_dir(&dir).unwrap();
        assert!(dir.exists());
        assert_eq!(fs::read_dir(&dir).unwrap().count(), 0);
    }

    #[test]
    fn resolve_artifact_requires_exactly_one_match() {
        let tmp = tempfile::tempdir().unwrap();
        let dir = tmp.path();

        assert!(matches!(
            resolve_artifact(dir, "Voro"),
            Err(Error::ArtifactResolution { matches: 0, .. })
        ));

        fs::write(dir.join("Voro.fxb"), b"a").unwrap();
        assert_eq!(resolve_artifact(dir, "Voro").unwrap(), dir.join("Voro.fxb"));

        fs::write(dir.join("Voro.dat"), b"b").unwrap();
        assert!(matches!(
            resolve_artifact(dir, "Voro"),
            Err(Error::ArtifactResolution { matches: 2, .. })
        ));
    }

    #[test]
    fn stage_artifact_renames_to_logical_name() {
        let tmp = tempfile::tempdir().unwrap();
        let artifact = tmp.path().join("Voro.fxb");
        fs::write(&artifact, b"bytecode").unwrap();

        let content = tmp.path().join("Content/Shaders");
        let staged = stage_artifact(&artifact, &content, "VoroBlock").unwrap();
        assert_eq!(staged, content.join("VoroBlock.fxb"));
        assert_eq!(fs::read(staged).unwrap(), b"bytecode");
    }
}
