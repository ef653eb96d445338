//! Input discovery, mapping and decoding

use crate::corpus::Input;
use anyhow::{Context, Result, bail};
use globset::{Glob, GlobSet, GlobSetBuilder};
use ignore::WalkBuilder;
use memmap2::Mmap;
use serde::{Deserialize, Serialize};
use std::fs::File;
use std::path::{Path, PathBuf};

/// How file contents become symbols
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum Encoding {
    /// Text when the content is UTF-8 and not binary, bytes otherwise
    #[default]
    Auto,
    Bytes,
    /// UTF-8 text, one symbol per char
    Text,
}

/// A memory-mapped input file
pub struct Document {
    pub path: PathBuf,
    // Zero-length files cannot be mapped on every platform
    data: Option<Mmap>,
}

impl Document {
    pub fn open(path: &Path) -> Result<Self> {
        let file = File::open(path).with_context(|| format!("Failed to open {}", path.display()))?;
        let len = file
            .metadata()
            .with_context(|| format!("Failed to stat {}", path.display()))?
            .len();

        let data = if len == 0 {
            None
        } else {
            let mmap = unsafe { Mmap::map(&file) }
                .with_context(|| format!("Failed to map {}", path.display()))?;
            Some(mmap)
        };

        Ok(Self {
            path: path.to_path_buf(),
            data,
        })
    }

    pub fn bytes(&self) -> &[u8] {
        self.data.as_deref().unwrap_or(&[])
    }

    pub fn decode(&self, encoding: Encoding) -> Result<Input<'_>> {
        decode(self.bytes(), encoding).with_context(|| format!("Failed to decode {}", self.path.display()))
    }
}

/// Interpret `content` according to `encoding`
pub fn decode(content: &[u8], encoding: Encoding) -> Result<Input<'_>> {
    match encoding {
        Encoding::Bytes => Ok(Input::Bytes(content)),
        Encoding::Text => {
            let text = std::str::from_utf8(content).context("Content is not valid UTF-8")?;
            Ok(Input::Text(text))
        }
        Encoding::Auto => {
            if is_likely_binary(content) {
                return Ok(Input::Bytes(content));
            }
            Ok(match std::str::from_utf8(content) {
                Ok(text) => Input::Text(text),
                Err(_) => Input::Bytes(content),
            })
        }
    }
}

/// Check if content is likely binary
///
/// Examines first 8KB for null bytes or high ratio of control bytes
pub fn is_likely_binary(content: &[u8]) -> bool {
    let sample = &content[..content.len().min(8192)];

    if sample.contains(&0) {
        return true;
    }

    let control_count = sample
        .iter()
        .filter(|&&b| b < 0x20 && b != b'\n' && b != b'\r' && b != b'\t')
        .count();

    control_count > sample.len() / 8
}

/// Expand `paths` into a sorted list of files.
///
/// Files named explicitly are always kept. Directories are walked honoring
/// .gitignore and hidden-file rules; their files are kept when they match
/// one of `globs` (all of them when `globs` is empty).
pub fn collect_files(paths: &[PathBuf], globs: &[String]) -> Result<Vec<PathBuf>> {
    let matcher = build_glob_set(globs)?;
    let mut files = Vec::new();

    for path in paths {
        if path.is_file() {
            files.push(path.clone());
            continue;
        }
        if !path.is_dir() {
            bail!("No such file or directory: {}", path.display());
        }

        let walker = WalkBuilder::new(path)
            .hidden(true)
            .git_ignore(true)
            .git_global(true)
            .git_exclude(true)
            .filter_entry(|entry| {
                let name = entry.file_name().to_string_lossy();
                !matches!(name.as_ref(), ".git" | "node_modules" | "target")
            })
            .build();

        for entry in walker {
            let entry = match entry {
                Ok(entry) => entry,
                Err(err) => {
                    log::warn!("skipping entry: {err}");
                    continue;
                }
            };
            let file_path = entry.path();
            if !file_path.is_file() {
                continue;
            }
            if matcher.as_ref().is_none_or(|set| set.is_match(file_path)) {
                files.push(file_path.to_path_buf());
            }
        }
    }

    files.sort();
    files.dedup();
    log::debug!("collected {} input files", files.len());
    Ok(files)
}

fn build_glob_set(globs: &[String]) -> Result<Option<GlobSet>> {
    if globs.is_empty() {
        return Ok(None);
    }
    let mut builder = GlobSetBuilder::new();
    for pattern in globs {
        builder.add(Glob::new(pattern).with_context(|| format!("Invalid glob pattern: {pattern}"))?);
    }
    Ok(Some(builder.build().context("Failed to build glob set")?))
}
