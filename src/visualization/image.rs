//! Glue around the external layout engine and image viewer.
//!
//! Both are opaque programs: the engine reads DOT on stdin and writes an image
//! with `-T<format> -o <file>`, the viewer is given the image path.
use crate::errors::InclusionError;
use std::io::{ErrorKind, Write};
use std::path::Path;
use std::process::{Command, Stdio};

pub const DEFAULT_LAYOUT_ENGINE: &str = "dot";
pub const DEFAULT_VIEWER: &str = "display";
pub const DEFAULT_FORMAT: &str = "png";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExternalTools {
    pub layout_engine: String,
    pub viewer: String,
    pub format: String,
}

impl Default for ExternalTools {
    fn default() -> Self {
        Self {
            layout_engine: DEFAULT_LAYOUT_ENGINE.to_string(),
            viewer: DEFAULT_VIEWER.to_string(),
            format: DEFAULT_FORMAT.to_string(),
        }
    }
}

impl ExternalTools {
    /// Lay out `dot` into an image file at `out`.
    ///
    /// # Errors
    /// Returns `InclusionError::Visualization` if the engine cannot be started
    /// or exits with a non-success status.
    pub fn render_image(&self, dot: &str, out: &Path) -> Result<(), InclusionError> {
        let engine = &self.layout_engine;
        let output = Command::new(engine)
            .arg(format!("-T{}", self.format))
            .arg("-o")
            .arg(out)
            .stdin(Stdio::piped())
            .stdout(Stdio::null())
            .stderr(Stdio::piped())
            .spawn()
            .and_then(|mut child| {
                if let Some(mut stdin) = child.stdin.take() {
                    // An engine that quits early is reported through its exit status
                    match stdin.write_all(dot.as_bytes()) {
                        Err(e) if e.kind() != ErrorKind::BrokenPipe => return Err(e),
                        _ => {}
                    }
                }
                child.wait_with_output()
            })
            .map_err(|e| {
                InclusionError::Visualization(format!("Failed to run layout engine '{engine}': {e}"))
            })?;
        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            return Err(InclusionError::Visualization(format!(
                "Layout engine '{engine}' failed with code {:?}: {}",
                output.status.code(),
                stderr.trim()
            )));
        }
        tracing::debug!("laid out {} with {}", out.display(), engine);
        Ok(())
    }

    /// Open `image` in the viewer and wait for it to exit.
    ///
    /// # Errors
    /// Returns `InclusionError::Visualization` if the viewer cannot be started
    /// or exits with a non-success status.
    pub fn view(&self, image: &Path) -> Result<(), InclusionError> {
        let viewer = &self.viewer;
        let status = Command::new(viewer).arg(image).status().map_err(|e| {
            InclusionError::Visualization(format!("Failed to run viewer '{viewer}': {e}"))
        })?;
        if !status.success() {
            return Err(InclusionError::Visualization(format!(
                "Viewer '{viewer}' failed with code {:?}",
                status.code()
            )));
        }
        Ok(())
    }

    /// Lay out `dot` into a transient image and show it.
    ///
    /// The image is removed when this returns, whether or not either tool succeeded.
    ///
    /// # Errors
    /// Returns `InclusionError::Io` if the transient file cannot be created, or
    /// any error from [`ExternalTools::render_image`] and [`ExternalTools::view`].
    pub fn show(&self, dot: &str) -> Result<(), InclusionError> {
        let tmp = self.transient_image()?;
        self.render_image(dot, tmp.path())?;
        self.view(tmp.path())
    }

    fn transient_image(&self) -> Result<tempfile::NamedTempFile, InclusionError> {
        let suffix = format!(".{}", self.format);
        tempfile::Builder::new()
            .prefix("show-inclusion-")
            .suffix(&suffix)
            .tempfile()
            .map_err(|e| InclusionError::io(std::env::temp_dir(), e))
    }
}
