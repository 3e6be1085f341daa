use std::fmt;
use std::path::{Path, PathBuf};

use walkdir::WalkDir;

use crate::config::Config;
use crate::template::{PageError, render_page};

#[derive(Debug)]
pub enum BuildError {
    Io(std::io::Error),
    Page(PathBuf, PageError),
    InvalidPath(PathBuf),
}

impl From<std::io::Error> for BuildError {
    fn from(err: std::io::Error) -> Self {
        BuildError::Io(err)
    }
}

impl fmt::Display for BuildError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BuildError::Io(e) => write!(f, "IO error: {}", e),
            BuildError::Page(path, e) => write!(f, "{}: {}", path.display(), e),
            BuildError::InvalidPath(p) => write!(f, "Invalid path: {}", p.display()),
        }
    }
}

impl std::error::Error for BuildError {}

/// Walks the content tree and mirrors it into the output directory, one
/// generated page per markdown file, plus a verbatim copy of the static
/// directory. Any failing document aborts the whole build.
pub struct Site {
    config: Config,
}

impl Site {
    pub fn new(config: Config) -> Self {
        Self { config }
    }

    pub fn build(&self) -> Result<(), BuildError> {
        let output = &self.config.output;
        if output.exists() {
            std::fs::remove_dir_all(output)?;
        }
        std::fs::create_dir_all(output)?;

        if self.config.static_dir.exists() {
            println!("Copying static files to {}", output.display());
            copy_dir(&self.config.static_dir, output)?;
        }

        println!("Generating pages from {}", self.config.content.display());
        let template = std::fs::read_to_string(&self.config.template)?;
        self.generate_pages(&template)
    }

    fn generate_pages(&self, template: &str) -> Result<(), BuildError> {
        for entry in WalkDir::new(&self.config.content)
            .into_iter()
            .filter_map(|e| e.ok())
            .filter(|e| {
                e.path().is_file() && e.path().extension().map(|ext| ext == "md").unwrap_or(false)
            })
        {
            let path = entry.path();
            let relative = path
                .strip_prefix(&self.config.content)
                .map_err(|_| BuildError::InvalidPath(path.to_path_buf()))?;
            let dest = self.config.output.join(relative).with_extension("html");

            println!(" * {} -> {}", path.display(), dest.display());
            let markdown = std::fs::read_to_string(path)?;
            let html = render_page(&markdown, template)
                .map_err(|e| BuildError::Page(path.to_path_buf(), e))?;

            if let Some(parent) = dest.parent() {
                std::fs::create_dir_all(parent)?;
            }
            std::fs::write(dest, html)?;
        }

        Ok(())
    }
}

fn copy_dir(source: &Path, destination: &Path) -> Result<(), BuildError> {
    for entry in WalkDir::new(source).into_iter().filter_map(|e| e.ok()) {
        let relative = entry
            .path()
            .strip_prefix(source)
            .map_err(|_| BuildError::InvalidPath(entry.path().to_path_buf()))?;
        if relative.as_os_str().is_empty() {
            continue;
        }
        let dest = destination.join(relative);
        if entry.path().is_dir() {
            std::fs::create_dir_all(&dest)?;
        } else {
            println!(" * {} -> {}", entry.path().display(), dest.display());
            std::fs::copy(entry.path(), &dest)?;
        }
    }

    Ok(())
}
