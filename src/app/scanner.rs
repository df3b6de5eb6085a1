use crate::app::formatter::FragmentSink;
use crate::app::models::{Classification, FileEntry, RunConfig};
use anyhow::{Context, Result};
use globset::{Glob, GlobSet, GlobSetBuilder};
use ignore::WalkBuilder;
use pathdiff::diff_paths;
use std::fmt::Display;
use std::fs;
use std::path::{Path, MAIN_SEPARATOR_STR};

pub struct Scanner<'a> {
    config: &'a RunConfig,
    byte_set: GlobSet,
    str_set: GlobSet,
}

impl<'a> Scanner<'a> {
    /// Compiles every pattern before anything is visited, so a bad pattern
    /// aborts the run with nothing emitted.
    pub fn new(config: &'a RunConfig) -> Result<Self> {
        Ok(Self {
            config,
            byte_set: build_globset(&config.byte_patterns, "byte")?,
            str_set: build_globset(&config.str_patterns, "string")?,
        })
    }

    /// Walks the source and collects the map entries of every embedded file.
    pub fn scan(&self) -> Result<FragmentSink> {
        let root = &self.config.source;
        let info = fs::metadata(root).with_context(|| {
            format!("Error reading source directory or file \"{}\"", root.display())
        })?;

        let mut sink = FragmentSink::new();

        if !info.is_dir() {
            let name = root.file_name().unwrap_or(root.as_os_str());
            let entry = FileEntry {
                path: root.to_path_buf(),
                relative_path: self.relative_id(&name.to_string_lossy()),
                is_dir: false,
            };
            self.visit(entry, &mut sink);
            return Ok(sink);
        }

        let walker = WalkBuilder::new(root)
            .standard_filters(false)
            .follow_links(false)
            .sort_by_file_name(|a, b| a.cmp(b))
            .build();

        for result in walker {
            match result {
                Ok(entry) => {
                    // Skip the root folder itself without any status line
                    if entry.depth() == 0 {
                        continue;
                    }
                    let relative = diff_paths(entry.path(), root)
                        .unwrap_or_else(|| entry.path().to_path_buf());
                    let is_dir = entry.file_type().is_some_and(|t| t.is_dir());
                    self.visit(
                        FileEntry {
                            path: entry.into_path(),
                            relative_path: self.relative_id(&relative.to_string_lossy()),
                            is_dir,
                        },
                        &mut sink,
                    );
                }
                Err(err) => self.report_error(&self.walk_error_id(&err), &err),
            }
        }

        Ok(sink)
    }

    fn relative_id(&self, relative: &str) -> String {
        let id = format!("{}{}", self.config.prefix, relative);
        match &self.config.path_sep {
            Some(sep) => id.replace(MAIN_SEPARATOR_STR, sep),
            None => id,
        }
    }

    /// Key of the object a walk error refers to, when the error names one.
    fn walk_error_id(&self, err: &ignore::Error) -> String {
        match error_path(err) {
            Some(path) => {
                let relative = diff_paths(path, &self.config.source)
                    .unwrap_or_else(|| path.to_path_buf());
                self.relative_id(&relative.to_string_lossy())
            }
            None => self.relative_id(""),
        }
    }

    fn classify(&self, path: &Path) -> Classification {
        let Some(name) = path.file_name() else {
            return self.config.default_format.classification();
        };

        // Byte and string matches are independent of each other
        let matched = Classification {
            bytes: self.byte_set.is_match(name),
            string: self.str_set.is_match(name),
        };

        if matched.is_skipped() {
            self.config.default_format.classification()
        } else {
            matched
        }
    }

    fn visit(&self, entry: FileEntry, sink: &mut FragmentSink) {
        if entry.is_dir {
            self.status(&entry.relative_path, "directory");
            return;
        }

        let mut class = self.classify(&entry.path);
        if class.is_skipped() {
            self.status(&entry.relative_path, class.describe());
            return;
        }

        let data = match fs::read(&entry.path) {
            Ok(data) => data,
            Err(err) => {
                self.report_error(&entry.relative_path, &err);
                return;
            }
        };

        if class.bytes && sink.has_bytes(&entry.relative_path) {
            log::warn!(
                "Duplicate key \"{}\" in the byte map, keeping the first file and skipping {}",
                entry.relative_path,
                entry.path.display()
            );
            class.bytes = false;
        }
        if class.string && sink.has_str(&entry.relative_path) {
            log::warn!(
                "Duplicate key \"{}\" in the string map, keeping the first file and skipping {}",
                entry.relative_path,
                entry.path.display()
            );
            class.string = false;
        }

        if class.bytes {
            sink.push_bytes(&entry.relative_path, &data);
        }
        if class.string {
            sink.push_str(&entry.relative_path, &data);
        }

        if class.is_skipped() {
            self.status(&entry.relative_path, "skipped (duplicate key)");
        } else {
            self.status(&entry.relative_path, class.describe());
        }
    }

    fn status(&self, relative: &str, message: &str) {
        if !self.config.silent {
            println!("Processing \"{}\": {}", relative, message);
        }
    }

    /// Per-object failures never stop the walk.
    fn report_error(&self, relative: &str, err: &dyn Display) {
        if !self.config.silent {
            self.status(relative, &format!("skipped due to an error: {}", err));
        } else if !self.config.to_console() {
            log::warn!("File \"{}\" skipped due to an error: {}", relative, err);
        }
    }
}

fn error_path(err: &ignore::Error) -> Option<&Path> {
    match err {
        ignore::Error::WithPath { path, .. } => Some(path.as_path()),
        ignore::Error::WithDepth { err, .. } | ignore::Error::WithLineNumber { err, .. } => {
            error_path(err)
        }
        ignore::Error::Loop { child, .. } => Some(child.as_path()),
        _ => None,
    }
}

fn build_globset(patterns: &[String], kind: &str) -> Result<GlobSet> {
    let mut builder = GlobSetBuilder::new();
    for pat in patterns {
        builder.add(
            Glob::new(pat)
                .with_context(|| format!("Error parsing {} file pattern \"{}\"", kind, pat))?,
        );
    }
    Ok(builder.build()?)
}
