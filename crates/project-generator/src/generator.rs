//! Project Generator
//!
//! Materializes a template directory into a new project:
//! 1. render `manifest.json` against the request's model
//! 2. write every listed file, rendered or copied as-is
//! 3. work out which files to open, and the Java source folders
//! 4. run the initial Gradle task

use std::path::{Component, Path, PathBuf};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use tracing::{debug, info};

use andmore_core::SharedConsole;

use crate::error::GeneratorError;
use crate::gradle::GradleTask;
use crate::manifest::{FileTemplate, TemplateManifest};
use crate::model::{ProjectRequest, TemplateModel};
use crate::renderer::{PlaceholderRenderer, TemplateRenderer};

/// Where Gradle puts the generated `R.java`, relative to the project
pub const GENERATED_SOURCES: &str = "build/generated/source/r/debug";

/// Result of generating a project
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeneratedProject {
    pub project_dir: PathBuf,
    /// Every file written, in manifest order
    pub files: Vec<PathBuf>,
    /// Files to open; the file to bring to front comes last
    pub files_to_open: Vec<PathBuf>,
    /// Java source folders for the project's classpath
    pub source_entries: Vec<PathBuf>,
}

/// Template-driven project generator
pub struct ProjectGenerator {
    template_dir: PathBuf,
    renderer: Arc<dyn TemplateRenderer>,
    build: Option<GradleTask>,
    cancel: Option<Arc<AtomicBool>>,
}

impl ProjectGenerator {
    /// Generator for the template in `template_dir`, running
    /// `generateDebugSources` afterwards
    pub fn new(template_dir: impl Into<PathBuf>) -> Self {
        Self {
            template_dir: template_dir.into(),
            renderer: Arc::new(PlaceholderRenderer),
            build: Some(GradleTask::generate_debug_sources()),
            cancel: None,
        }
    }

    /// The empty-app template shipped with this crate
    pub fn bundled_template_dir() -> PathBuf {
        Path::new(env!("CARGO_MANIFEST_DIR"))
            .join("templates")
            .join("app")
            .join("empty")
    }

    /// Use a different template renderer
    pub fn with_renderer(mut self, renderer: Arc<dyn TemplateRenderer>) -> Self {
        self.renderer = renderer;
        self
    }

    /// Replace the post-generation build step; `None` skips it
    pub fn with_build_step(mut self, build: Option<GradleTask>) -> Self {
        self.build = build;
        self
    }

    /// Abort between files once `flag` is set
    pub fn with_cancel_flag(mut self, flag: Arc<AtomicBool>) -> Self {
        self.cancel = Some(flag);
        self
    }

    /// Directory the template is read from
    pub fn template_dir(&self) -> &Path {
        &self.template_dir
    }

    fn check_cancelled(&self) -> Result<(), GeneratorError> {
        match self.cancel {
            Some(ref flag) if flag.load(Ordering::Relaxed) => Err(GeneratorError::Cancelled),
            _ => Ok(()),
        }
    }

    async fn read_template(&self, src: &str) -> Result<String, GeneratorError> {
        let path = self.template_dir.join(src);
        tokio::fs::read_to_string(&path)
            .await
            .map_err(|source| GeneratorError::Read { path, source })
    }

    /// Render and parse the template's manifest
    pub async fn load_manifest(&self, model: &TemplateModel) -> Result<TemplateManifest, GeneratorError> {
        let text = self.read_template(TemplateManifest::FILE_NAME).await?;
        let rendered = self
            .renderer
            .render(&text, model)
            .map_err(|source| GeneratorError::Render {
                file: self.template_dir.join(TemplateManifest::FILE_NAME),
                source,
            })?;
        TemplateManifest::from_json(&rendered)
    }

    async fn materialize(
        &self,
        template: &FileTemplate,
        dest: &Path,
        model: &TemplateModel,
    ) -> Result<(), GeneratorError> {
        if let Some(parent) = dest.parent() {
            tokio::fs::create_dir_all(parent).await?;
        }

        if template.skip_template {
            let src = self.template_dir.join(&template.src);
            tokio::fs::copy(&src, dest)
                .await
                .map_err(|source| GeneratorError::Read { path: src, source })?;
        } else {
            let text = self.read_template(&template.src).await?;
            let rendered = self
                .renderer
                .render(&text, model)
                .map_err(|source| GeneratorError::Render {
                    file: self.template_dir.join(&template.src),
                    source,
                })?;
            tokio::fs::write(dest, rendered).await?;
        }

        debug!("wrote {}", dest.display());
        Ok(())
    }

    /// Generate a project
    pub async fn generate(
        &self,
        request: &ProjectRequest,
        console: &SharedConsole,
    ) -> Result<GeneratedProject, GeneratorError> {
        request.validate()?;

        let model = request.model();
        let manifest = self.load_manifest(&model).await?;

        let mut files = Vec::with_capacity(manifest.files.len());
        let mut to_open = OpenList::default();
        for template in &manifest.files {
            self.check_cancelled()?;

            let dest = resolve_destination(request.workspace_root(), &template.dest)?;
            self.materialize(template, &dest, &model).await?;

            to_open.add(&dest, template.open, template.show);
            files.push(dest);
        }

        let project_dir = request.project_dir();
        let mut source_entries: Vec<PathBuf> = manifest
            .src_entries
            .iter()
            .map(|entry| project_dir.join(entry.trim_start_matches('/')))
            .collect();
        source_entries.push(project_dir.join(GENERATED_SOURCES));

        if let Some(ref build) = self.build {
            self.check_cancelled()?;
            build.run(&project_dir, console).await?;
        }

        info!("Generated {} ({} files)", project_dir.display(), files.len());
        Ok(GeneratedProject {
            project_dir,
            files,
            files_to_open: to_open.finish(),
            source_entries,
        })
    }
}

/// Map a workspace path such as `/MyApp/src/Main.java` under `workspace_root`.
///
/// The path must name a project and a file inside it, and may not climb
/// out of the workspace.
pub fn resolve_destination(workspace_root: &Path, dest: &str) -> Result<PathBuf, GeneratorError> {
    let relative = Path::new(dest.trim_start_matches(['/', '\\']));

    let mut segments = 0;
    for component in relative.components() {
        match component {
            Component::Normal(_) => segments += 1,
            Component::CurDir => {}
            _ => return Err(GeneratorError::InvalidDestination(dest.to_string())),
        }
    }
    if segments < 2 {
        return Err(GeneratorError::InvalidDestination(dest.to_string()));
    }

    Ok(workspace_root.join(relative))
}

/// Order in which generated files are opened.
///
/// Files flagged `open` are queued in manifest order. A file that is also
/// flagged `show` is held back and opened last; if another `show` file
/// follows, the earlier one joins the queue at that point.
#[derive(Debug, Default)]
pub(crate) struct OpenList {
    queue: Vec<PathBuf>,
    show: Option<PathBuf>,
}

impl OpenList {
    pub(crate) fn add(&mut self, file: &Path, open: bool, show: bool) {
        if !open {
            return;
        }
        if show {
            if let Some(previous) = self.show.replace(file.to_path_buf()) {
                self.queue.push(previous);
            }
        } else {
            self.queue.push(file.to_path_buf());
        }
    }

    pub(crate) fn finish(mut self) -> Vec<PathBuf> {
        self.queue.extend(self.show);
        self.queue
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use andmore_core::BufferConsole;

    fn console() -> SharedConsole {
        Arc::new(BufferConsole::new())
    }

    /// Writes a template directory from (path, content) pairs
    fn template(files: &[(&str, &str)]) -> tempfile::TempDir {
        let dir = tempfile::tempdir().unwrap();
        for (path, content) in files {
            let path = dir.path().join(path);
            std::fs::create_dir_all(path.parent().unwrap()).unwrap();
            std::fs::write(path, content).unwrap();
        }
        dir
    }

    const MANIFEST: &str = r#"{
        "files": [
            { "src": "Main.java", "dest": "/${projectName}/src/${packagePath}/${activityName}.java", "open": true, "show": true },
            { "src": "notes.txt", "dest": "/${projectName}/notes.txt", "skipTemplate": true, "open": true },
            { "src": "layout.xml", "dest": "/${projectName}/res/layout/${layoutName}.xml", "open": true },
            { "src": "notes.txt", "dest": "/${projectName}/raw/copy.txt", "skipTemplate": true }
        ],
        "srcEntries": ["src"]
    }"#;

    fn sample_template() -> tempfile::TempDir {
        template(&[
            ("manifest.json", MANIFEST),
            ("Main.java", "package ${packageName};\nclass ${activityName} {}\n"),
            ("notes.txt", "kept as ${written}\n"),
            ("layout.xml", "<layout name=\"${layoutName}\"/>\n"),
        ])
    }

    #[test]
    fn test_open_list_single_show_goes_last() {
        let mut list = OpenList::default();
        list.add(Path::new("a"), true, true);
        list.add(Path::new("b"), true, false);
        list.add(Path::new("c"), false, false);
        list.add(Path::new("d"), true, false);
        assert_eq!(list.finish(), vec![PathBuf::from("b"), PathBuf::from("d"), PathBuf::from("a")]);
    }

    #[test]
    fn test_open_list_later_show_demotes_earlier() {
        let mut list = OpenList::default();
        list.add(Path::new("a"), true, true);
        list.add(Path::new("b"), true, false);
        list.add(Path::new("c"), true, true);
        assert_eq!(list.finish(), vec![PathBuf::from("b"), PathBuf::from("a"), PathBuf::from("c")]);
    }

    #[test]
    fn test_show_without_open_is_not_opened() {
        let mut list = OpenList::default();
        list.add(Path::new("a"), false, true);
        assert!(list.finish().is_empty());
    }

    #[test]
    fn test_resolve_destination() {
        let root = Path::new("/ws");
        assert_eq!(
            resolve_destination(root, "/App/src/Main.java").unwrap(),
            PathBuf::from("/ws/App/src/Main.java")
        );
        assert!(resolve_destination(root, "/App").is_err());
        assert!(resolve_destination(root, "/App/../../etc/passwd").is_err());
        assert!(resolve_destination(root, "").is_err());
    }

    #[tokio::test]
    async fn test_generate_writes_every_file() {
        let tpl = sample_template();
        let ws = tempfile::tempdir().unwrap();
        let request = ProjectRequest::new(ws.path(), "Hello", "com.example.hello");

        let project = ProjectGenerator::new(tpl.path())
            .with_build_step(None)
            .generate(&request, &console())
            .await
            .unwrap();

        let dir = ws.path().join("Hello");
        assert_eq!(project.project_dir, dir);
        assert_eq!(project.files.len(), 4);
        for file in &project.files {
            assert!(file.is_file(), "missing {}", file.display());
        }

        let activity = dir.join("src/com/example/hello/MainActivity.java");
        assert_eq!(
            std::fs::read_to_string(&activity).unwrap(),
            "package com.example.hello;\nclass MainActivity {}\n"
        );
        assert_eq!(
            std::fs::read_to_string(dir.join("notes.txt")).unwrap(),
            "kept as ${written}\n"
        );
        assert_eq!(
            std::fs::read_to_string(dir.join("res/layout/activity_main.xml")).unwrap(),
            "<layout name=\"activity_main\"/>\n"
        );

        assert_eq!(
            project.files_to_open,
            vec![dir.join("notes.txt"), dir.join("res/layout/activity_main.xml"), activity]
        );
        assert_eq!(
            project.source_entries,
            vec![dir.join("src"), dir.join(GENERATED_SOURCES)]
        );
    }

    #[tokio::test]
    async fn test_generate_overwrites_existing_files() {
        let tpl = sample_template();
        let ws = tempfile::tempdir().unwrap();
        let notes = ws.path().join("Hello/notes.txt");
        std::fs::create_dir_all(notes.parent().unwrap()).unwrap();
        std::fs::write(&notes, "old").unwrap();

        let request = ProjectRequest::new(ws.path(), "Hello", "com.example.hello");
        ProjectGenerator::new(tpl.path())
            .with_build_step(None)
            .generate(&request, &console())
            .await
            .unwrap();

        assert_eq!(std::fs::read_to_string(&notes).unwrap(), "kept as ${written}\n");
    }

    #[tokio::test]
    async fn test_unknown_variable_in_template() {
        let tpl = template(&[
            ("manifest.json", r#"{ "files": [ { "src": "a.txt", "dest": "/${projectName}/a.txt" } ] }"#),
            ("a.txt", "${missing}"),
        ]);
        let ws = tempfile::tempdir().unwrap();
        let request = ProjectRequest::new(ws.path(), "Hello", "com.example");

        let err = ProjectGenerator::new(tpl.path())
            .with_build_step(None)
            .generate(&request, &console())
            .await
            .unwrap_err();
        assert!(matches!(err, GeneratorError::Render { .. }));
    }

    #[tokio::test]
    async fn test_missing_template_file() {
        let tpl = template(&[(
            "manifest.json",
            r#"{ "files": [ { "src": "gone.bin", "dest": "/${projectName}/gone.bin", "skipTemplate": true } ] }"#,
        )]);
        let ws = tempfile::tempdir().unwrap();
        let request = ProjectRequest::new(ws.path(), "Hello", "com.example");

        let err = ProjectGenerator::new(tpl.path())
            .with_build_step(None)
            .generate(&request, &console())
            .await
            .unwrap_err();
        assert!(matches!(err, GeneratorError::Read { .. }));
    }

    #[tokio::test]
    async fn test_cancelled_before_first_file() {
        let tpl = sample_template();
        let ws = tempfile::tempdir().unwrap();
        let request = ProjectRequest::new(ws.path(), "Hello", "com.example");
        let flag = Arc::new(AtomicBool::new(true));

        let err = ProjectGenerator::new(tpl.path())
            .with_cancel_flag(flag)
            .generate(&request, &console())
            .await
            .unwrap_err();
        assert!(matches!(err, GeneratorError::Cancelled));
        assert!(!ws.path().join("Hello").exists());
    }

    #[tokio::test]
    async fn test_invalid_request() {
        let tpl = sample_template();
        let ws = tempfile::tempdir().unwrap();
        let request = ProjectRequest::new(ws.path(), "Hello", "not a package");

        let err = ProjectGenerator::new(tpl.path())
            .generate(&request, &console())
            .await
            .unwrap_err();
        assert!(matches!(err, GeneratorError::InvalidRequest(_)));
    }

    #[tokio::test]
    async fn test_bundled_template() {
        let ws = tempfile::tempdir().unwrap();
        let request = ProjectRequest::new(ws.path(), "Sample", "org.example.sample").activity("StartActivity");

        let project = ProjectGenerator::new(ProjectGenerator::bundled_template_dir())
            .with_build_step(None)
            .generate(&request, &console())
            .await
            .unwrap();

        let dir = ws.path().join("Sample");
        let activity = dir.join("app/src/main/java/org/example/sample/StartActivity.java");
        assert_eq!(project.files_to_open.last(), Some(&activity));
        assert_eq!(project.files_to_open.len(), 3);

        let source = std::fs::read_to_string(&activity).unwrap();
        assert!(source.contains("package org.example.sample;"));
        assert!(source.contains("public class StartActivity"));
        assert!(source.contains("R.layout.activity_main"));

        let manifest = std::fs::read_to_string(dir.join("app/src/main/AndroidManifest.xml")).unwrap();
        assert!(manifest.contains("package=\"org.example.sample\""));
        assert!(dir.join(".gitignore").is_file());
        assert_eq!(project.source_entries[0], dir.join("app/src/main/java"));
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn test_build_step_runs_in_project() {
        use std::os::unix::fs::PermissionsExt;

        let tpl = template(&[
            (
                "manifest.json",
                r#"{ "files": [ { "src": "gradlew", "dest": "/${projectName}/gradlew", "skipTemplate": true } ] }"#,
            ),
            ("gradlew", "#!/bin/sh\necho \"ran $1 in $(basename \"$PWD\")\"\n"),
        ]);
        let wrapper = tpl.path().join("gradlew");
        std::fs::set_permissions(&wrapper, std::fs::Permissions::from_mode(0o755)).unwrap();

        let ws = tempfile::tempdir().unwrap();
        let request = ProjectRequest::new(ws.path(), "Built", "com.example");
        let buffer = Arc::new(BufferConsole::new());
        let console: SharedConsole = buffer.clone();

        ProjectGenerator::new(tpl.path())
            .generate(&request, &console)
            .await
            .unwrap();

        assert_eq!(buffer.output(), "ran generateDebugSources in Built\n");
    }
}
