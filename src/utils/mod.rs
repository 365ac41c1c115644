pub mod table {
    // Helper to render a separator line
    fn sep(widths: &[usize]) -> String {
        let mut s = String::from("+");
        for w in widths {
            s.push_str(&"-".repeat(w + 2));
            s.push('+');
        }
        s
    }

    // Helper to render a row line
    fn line(cells: &[String], widths: &[usize]) -> String {
        let mut s = String::from("|");
        for (cell, w) in cells.iter().zip(widths) {
            s.push(' ');
            s.push_str(cell);
            let len = cell.chars().count();
            if len < *w {
                s.push_str(&" ".repeat(w - len));
            }
            s.push_str(" |");
        }
        s
    }

    /// Render a simple ASCII table given headers and rows.
    #[must_use]
    pub fn render(headers: &[&str], rows: &[Vec<String>]) -> String {
        let cols = headers.len();
        let mut widths: Vec<usize> = headers.iter().map(|h| h.chars().count()).collect();
        for row in rows {
            for (c, w) in widths.iter_mut().enumerate() {
                *w = (*w).max(row.get(c).map_or(0, |s| s.chars().count()));
            }
        }

        let mut out = String::new();
        out.push_str(&sep(&widths));
        out.push('\n');
        let header_cells: Vec<String> = headers.iter().map(|s| (*s).to_string()).collect();
        out.push_str(&line(&header_cells, &widths));
        out.push('\n');
        out.push_str(&sep(&widths));
        out.push('\n');
        for row in rows {
            let cells: Vec<String> = (0..cols).map(|i| row.get(i).cloned().unwrap_or_default()).collect();
            out.push_str(&line(&cells, &widths));
            out.push('\n');
        }
        out.push_str(&sep(&widths));
        out
    }
}

pub mod config {
    use serde::Deserialize;
    use std::fs;
    use std::path::{Path, PathBuf};

    #[derive(Debug, Clone, Deserialize, Default)]
    pub struct ResolveConfig {
        pub include_guard: Option<String>,
        pub max_depth: Option<usize>,
    }

    #[derive(Debug, Clone, Deserialize, Default)]
    pub struct DotConfig {
        pub show_system: Option<bool>,
        pub rankdir: Option<String>, // "TB" | "LR"
        pub theme: Option<String>,   // "light" | "dark"
        pub fontsize: Option<u32>,
    }

    #[derive(Debug, Clone, Deserialize, Default)]
    pub struct ToolsConfig {
        pub layout_engine: Option<String>,
        pub viewer: Option<String>,
        pub format: Option<String>,
    }

    #[derive(Debug, Clone, Deserialize, Default)]
    #[serde(deny_unknown_fields)]
    pub struct Config {
        pub resolve: Option<ResolveConfig>,
        pub dot: Option<DotConfig>,
        pub tools: Option<ToolsConfig>,
    }

    pub const CONFIG_FILE_NAME: &str = "show-inclusion.toml";

    fn default_config_path(root: &Path) -> PathBuf {
        root.join(CONFIG_FILE_NAME)
    }

    /// Load a config file; unreadable or invalid files are logged and yield `None`.
    #[must_use]
    pub fn load_config_at(path: &Path) -> Option<Config> {
        let data = match fs::read_to_string(path) {
            Ok(d) => d,
            Err(e) => {
                tracing::warn!("cannot read config {}: {}", path.display(), e);
                return None;
            }
        };
        match toml::from_str::<Config>(&data) {
            Ok(cfg) => Some(cfg),
            Err(e) => {
                tracing::warn!("ignoring invalid config {}: {}", path.display(), e);
                None
            }
        }
    }

    /// Look for `show-inclusion.toml` directly under `root`.
    #[must_use]
    pub fn load_config_near(root: &Path) -> Option<Config> {
        let p = default_config_path(root);
        if p.exists() {
            load_config_at(&p)
        } else {
            None
        }
    }

    /// Explicit `--config` wins; otherwise the default file under `cwd`, if any.
    #[must_use]
    pub fn load(explicit: Option<&Path>, cwd: &Path) -> Config {
        let cfg = match explicit {
            Some(p) => load_config_at(p),
            None => load_config_near(cwd),
        };
        cfg.unwrap_or_default()
    }
}

pub mod workdir {
    use crate::errors::InclusionError;
    use std::path::{Path, PathBuf};

    /// Canonicalize `input` (relative paths are taken from `cwd`) and require it
    /// to live under `cwd`.
    ///
    /// # Errors
    /// `InclusionError::Io` when either path cannot be canonicalized (e.g. the
    /// input does not exist), `InclusionError::OutsideWorkingDir` when the input
    /// is not below `cwd`.
    pub fn ensure_within(cwd: &Path, input: &Path) -> Result<PathBuf, InclusionError> {
        let cwd = cwd.canonicalize().map_err(|e| InclusionError::io(cwd, e))?;
        let joined = cwd.join(input);
        let path = joined.canonicalize().map_err(|e| InclusionError::io(input, e))?;
        if !path.starts_with(&cwd) {
            return Err(InclusionError::OutsideWorkingDir { path, cwd });
        }
        Ok(path)
    }

    /// [`ensure_within`] against the process working directory.
    ///
    /// # Errors
    /// See [`ensure_within`].
    pub fn ensure_within_current(input: &Path) -> Result<PathBuf, InclusionError> {
        let cwd = std::env::current_dir().map_err(|e| InclusionError::io(".", e))?;
        ensure_within(&cwd, input)
    }
}
