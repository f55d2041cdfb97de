use std::{
    fs,
    io::ErrorKind,
    path::{Path, PathBuf},
};

use tracing::{debug, info};

use crate::{
    error::Result,
    io::{BundleSet, fragment::render_fragment},
    options::ExtractOptions,
};

/// Files and directories produced by one or more [`BundleEmitter::emit`] calls
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EmitReport {
    pub directories: Vec<PathBuf>,
    pub descriptors: usize,
    pub fragments: usize,
}

impl EmitReport {
    pub fn merge(&mut self, other: EmitReport) {
        self.directories.extend(other.directories);
        self.descriptors += other.descriptors;
        self.fragments += other.fragments;
    }
}

/// Writes bundle sets under a destination root.
///
/// Each set's directory is owned by the emitter for the duration of a run:
/// previous contents are discarded, never merged.
#[derive(Debug, Clone)]
pub struct BundleEmitter {
    destination: PathBuf,
    options: ExtractOptions,
}

impl BundleEmitter {
    pub fn new(destination: impl Into<PathBuf>, options: ExtractOptions) -> Self {
        Self {
            destination: destination.into(),
            options,
        }
    }

    pub fn destination(&self) -> &Path {
        &self.destination
    }

    pub fn emit(&self, set: &BundleSet<'_>) -> Result<EmitReport> {
        let target = self.destination.join(&set.directory);

        let mut report = if self.options.atomic_writes {
            let parent = target.parent().unwrap_or(&self.destination);
            fs::create_dir_all(parent)?;
            let staging = tempfile::Builder::new()
                .prefix(".staging-")
                .tempdir_in(parent)?;
            let report = self.populate(staging.path(), set)?;
            remove_dir_if_present(&target)?;
            // The emptied TempDir guard is dropped after the rename
            fs::rename(staging.path(), &target)?;
            report
        } else {
            reset_dir(&target)?;
            self.populate(&target, set)?
        };

        report.directories.push(target.clone());
        info!("Wrote {} bundles to {}", set.len(), target.display());
        Ok(report)
    }

    fn populate(&self, dir: &Path, set: &BundleSet<'_>) -> Result<EmitReport> {
        let mut report = EmitReport::default();

        for bundle in &set.bundles {
            let bundle_dir = match &bundle.subdir {
                Some(subdir) => {
                    let path = dir.join(subdir);
                    fs::create_dir_all(&path)?;
                    path
                }
                None => dir.to_path_buf(),
            };

            if let Some(descriptor) = &bundle.descriptor {
                let path = bundle_dir.join(format!("{}.json", bundle.name));
                fs::write(&path, descriptor.to_json_string(self.options.descriptor_format)?)?;
                debug!("Wrote descriptor {}", path.display());
                report.descriptors += 1;
            }

            if let Some(fragment) = &bundle.fragment {
                let path = bundle_dir.join(format!("{}.svg", bundle.name));
                fs::write(&path, render_fragment(fragment, &self.options)?)?;
                debug!("Wrote fragment {}", path.display());
                report.fragments += 1;
            }
        }

        Ok(report)
    }
}

/// Removes `dir` and recreates it empty. A missing directory is already clean.
pub fn reset_dir(dir: &Path) -> Result<()> {
    remove_dir_if_present(dir)?;
    fs::create_dir_all(dir)?;
    Ok(())
}

fn remove_dir_if_present(dir: &Path) -> Result<()> {
    match fs::remove_dir_all(dir) {
        Ok(()) => Ok(()),
        Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
        Err(e) => Err(e.into()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        drawing::Drawing,
        io::{AssetBundle, Descriptor, Fragment},
        types::{Geometry, Quad},
    };
    use tempfile::TempDir;

    fn drawing() -> Drawing {
        Drawing::parse(
            "test",
            r#"<svg xmlns="http://www.w3.org/2000/svg"><g id="one"><rect width="1" height="1"/></g></svg>"#,
        )
        .expect("Should parse")
    }

    fn set<'a>(drawing: &'a Drawing) -> BundleSet<'a> {
        let mut set = BundleSet::new("out");
        set.push(AssetBundle {
            name: "1".to_string(),
            subdir: None,
            descriptor: Some(Descriptor::Guide(Geometry::Quad(Quad::from_rect(0.0, 0.0, 1.0, 1.0)))),
            fragment: drawing.root.child_elements().next().map(Fragment::new),
        });
        set
    }

    #[test]
    fn test_reset_tolerates_missing_directory() {
        let temp = TempDir::new().expect("Should create temp dir");
        let dir = temp.path().join("never").join("existed");
        reset_dir(&dir).expect("Should reset");
        assert!(dir.is_dir());
    }

    #[test]
    fn test_emit_replaces_previous_contents() {
        let temp = TempDir::new().expect("Should create temp dir");
        let stale = temp.path().join("out").join("stale.svg");
        fs::create_dir_all(stale.parent().expect("Should have parent")).expect("Should create");
        fs::write(&stale, "old").expect("Should write");

        let d = drawing();
        for atomic_writes in [true, false] {
            let options = ExtractOptions { atomic_writes, ..ExtractOptions::default() };
            let emitter = BundleEmitter::new(temp.path(), options);
            let report = emitter.emit(&set(&d)).expect("Should emit");

            assert_eq!(report.descriptors, 1);
            assert_eq!(report.fragments, 1);
            assert!(!stale.exists());
            assert!(temp.path().join("out").join("1.json").is_file());
            assert!(temp.path().join("out").join("1.svg").is_file());
        }

        // No staging directories left behind
        let leftovers: Vec<_> = fs::read_dir(temp.path())
            .expect("Should list")
            .filter_map(|e| e.ok())
            .filter(|e| e.file_name().to_string_lossy().starts_with(".staging-"))
            .collect();
        assert!(leftovers.is_empty());
    }

    #[test]
    fn test_subdirectories_are_created() {
        let temp = TempDir::new().expect("Should create temp dir");
        let d = drawing();
        let mut set = set(&d);
        set.bundles[0].subdir = Some("round".to_string());

        BundleEmitter::new(temp.path(), ExtractOptions::default())
            .emit(&set)
            .expect("Should emit");
        assert!(temp.path().join("out").join("round").join("1.json").is_file());
    }
}
