//! Output filename resolution
//!
//! A candidate name is built from the source basename, an optional prefix
//! derived from the source's folder, and an optional user prefix. Collisions
//! with files already in the output directory, or with names handed out
//! earlier in the same batch, get an `_N` suffix on the stem.

use std::collections::HashSet;
use std::ffi::OsStr;
use std::io::ErrorKind;
use std::path::{Component, Path, PathBuf};
use log::{debug, warn};
use serde::{Deserialize, Serialize};
use crate::error::{SaverError, Result};

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct NamingOptions {
    /// Prepended to every output name; empty disables it.
    pub prefix: String,
    /// Prefix names with the source's folder path.
    pub folder_structure: bool,
    /// Folder paths are taken relative to this directory when set.
    pub base_dir: Option<PathBuf>,
}

impl NamingOptions {
    pub fn validate(&self) -> Result<()> {
        if self.prefix.contains(['/', '\\']) {
            return Err(SaverError::config(format!(
                "Filename prefix must not contain path separators: {:?}", self.prefix
            )));
        }
        Ok(())
    }
}

/// Resolve `.` and `..` segments without touching the filesystem.
pub fn normalize(path: &Path) -> PathBuf {
    let mut out = PathBuf::new();
    for component in path.components() {
        match component {
            Component::CurDir => {}
            Component::ParentDir => match out.components().next_back() {
                Some(Component::Normal(_)) => {
                    out.pop();
                }
                Some(Component::RootDir) | Some(Component::Prefix(_)) => {}
                _ => out.push(".."),
            },
            other => out.push(other.as_os_str()),
        }
    }
    out
}

/// File name component as UTF-8, warning when bytes had to be replaced.
fn name_text(name: &OsStr) -> String {
    match name.to_str() {
        Some(text) => text.to_string(),
        None => {
            let lossy = name.to_string_lossy().into_owned();
            warn!("Name {:?} is not valid UTF-8, using {:?}", name, lossy);
            lossy
        }
    }
}

/// Prefix derived from the folder `source` lives in, e.g. `drums-` or `kits-808-`.
pub fn folder_prefix(source: &Path, base_dir: Option<&Path>) -> String {
    let parent = normalize(source.parent().unwrap_or(Path::new("")));

    let relative = base_dir.and_then(|base| parent.strip_prefix(normalize(base)).ok().map(Path::to_path_buf));
    if let Some(relative) = relative {
        let segments: Vec<String> = relative.components()
            .filter_map(|c| match c {
                Component::Normal(name) => Some(name_text(name).replace('\\', "-")),
                _ => None,
            })
            .collect();

        if segments.is_empty() {
            return String::new();
        }
        return format!("{}-", segments.join("-"));
    }

    match parent.file_name().map(name_text) {
        Some(name) if !name.is_empty() => format!("{}-", name),
        _ => String::new(),
    }
}

/// Name the output would get before collision handling.
pub fn candidate_name(source: &Path, options: &NamingOptions) -> Result<String> {
    let base_name = source.file_name()
        .map(name_text)
        .ok_or_else(|| SaverError::encode(format!(
            "Cannot derive a file name from {}", source.display()
        )))?;

    let mut name = base_name;
    if options.folder_structure {
        name = format!("{}{}", folder_prefix(source, options.base_dir.as_deref()), name);
    }
    if !options.prefix.is_empty() {
        name = format!("{}{}", options.prefix, name);
    }
    Ok(name)
}

/// `kick.wav` + 2 -> `kick_2.wav`
fn with_suffix(name: &str, n: u32) -> String {
    match name.rfind('.') {
        Some(dot) if dot > 0 => format!("{}_{}{}", &name[..dot], n, &name[dot..]),
        _ => format!("{}_{}", name, n),
    }
}

/// Hands out distinct output names for one batch.
#[derive(Debug)]
pub struct NameResolver {
    output_dir: PathBuf,
    options: NamingOptions,
    claimed: HashSet<String>,
}

impl NameResolver {
    pub fn new(output_dir: impl Into<PathBuf>, options: NamingOptions) -> Self {
        Self {
            output_dir: output_dir.into(),
            options,
            claimed: HashSet::new(),
        }
    }

    pub fn resolve(&mut self, source: &Path) -> Result<String> {
        let candidate = candidate_name(source, &self.options)?;

        let mut name = candidate.clone();
        let mut n = 0;
        while self.is_taken(&name)? {
            n += 1;
            name = with_suffix(&candidate, n);
        }
        if n > 0 {
            debug!("{} is taken, using {}", candidate, name);
        }

        self.claimed.insert(name.clone());
        Ok(name)
    }

    pub fn claimed(&self) -> &HashSet<String> {
        &self.claimed
    }

    fn is_taken(&self, name: &str) -> Result<bool> {
        if self.claimed.contains(name) {
            return Ok(true);
        }
        // Dangling symlinks count as taken; writing would follow them.
        match std::fs::symlink_metadata(self.output_dir.join(name)) {
            Ok(_) => Ok(true),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(false),
            Err(e) => Err(SaverError::engine(format!(
                "Cannot check {} in {}: {}", name, self.output_dir.display(), e
            ))),
        }
    }
}
