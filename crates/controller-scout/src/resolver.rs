//! Controller discovery over a source tree.
//!
//! Responsibilities:
//! - Walk the root directory without descending into symlinked directories,
//!   keeping regular files (and symlinks to files inside the root) with the
//!   source extension and dropping anything under a dependency directory.
//! - Sniff one qualified name per file (see [`crate::extract`]).
//! - Resolve each name through a [`MetadataFacility`] and keep the ones that
//!   carry a controller marker or have a route-marked method.

use std::collections::{BTreeMap, BTreeSet};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::{Duration, Instant};

use tokio::sync::Semaphore;
use tokio::task::JoinSet;
use walkdir::WalkDir;

use crate::extract::extract_qualified_name;
use crate::metadata::{MetadataError, MetadataFacility, is_controller};
use crate::model::QualifiedName;

pub const DEFAULT_SOURCE_EXTENSION: &str = "php";
pub const DEFAULT_EXCLUDED_SEGMENT: &str = "vendor";
pub const DEFAULT_MAX_PARALLEL_READS: usize = 64;

/// Resolver configuration. Nothing else is kept between calls.
#[derive(Debug, Clone)]
pub struct ResolverSettings {
    /// Scan boundary. Need not exist.
    pub root: PathBuf,
    /// Extension of source files, compared case-sensitively without the dot.
    pub source_extension: String,
    /// Paths containing this substring anywhere are skipped. Empty disables
    /// the exclusion.
    pub excluded_segment: String,
    /// Optional upper bound on a single discovery run.
    pub deadline: Option<Duration>,
    /// Cap on concurrent file reads in [`ControllerResolver::resolve_parallel`].
    pub max_parallel_reads: usize,
}

impl ResolverSettings {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self {
            root: root.into(),
            source_extension: DEFAULT_SOURCE_EXTENSION.to_string(),
            excluded_segment: DEFAULT_EXCLUDED_SEGMENT.to_string(),
            deadline: None,
            max_parallel_reads: DEFAULT_MAX_PARALLEL_READS,
        }
    }

    /// True if `path` should be scanned: matching extension and no excluded
    /// substring in the full path.
    pub fn is_candidate(&self, path: &Path) -> bool {
        let ext_ok = path
            .extension()
            .and_then(|s| s.to_str())
            .map(|ext| ext == self.source_extension)
            .unwrap_or(false);
        if !ext_ok {
            return false;
        }
        self.excluded_segment.is_empty()
            || !path.to_string_lossy().contains(self.excluded_segment.as_str())
    }
}

#[derive(Debug, thiserror::Error)]
pub enum ResolveError {
    #[error(transparent)]
    Metadata(#[from] MetadataError),
    #[error("controller discovery under {} exceeded deadline of {deadline:?}", .root.display())]
    DeadlineExceeded { root: PathBuf, deadline: Duration },
    #[error("scan task failed: {0}")]
    Task(#[from] tokio::task::JoinError),
}

/// Framework-facing seam for anything that can list controllers.
pub trait ResolveControllers {
    fn resolve(&self) -> Result<BTreeSet<QualifiedName>, ResolveError>;
}

#[derive(Debug)]
pub struct ControllerResolver<M> {
    settings: ResolverSettings,
    metadata: M,
}

impl<M: MetadataFacility> ControllerResolver<M> {
    pub fn new(root: impl Into<PathBuf>, metadata: M) -> Self {
        Self::with_settings(ResolverSettings::new(root), metadata)
    }

    pub fn with_settings(settings: ResolverSettings, metadata: M) -> Self {
        Self { settings, metadata }
    }

    pub fn settings(&self) -> &ResolverSettings {
        &self.settings
    }

    /// Discover controllers under the root.
    ///
    /// A missing root yields an empty set. Unreadable files, files without a
    /// type declaration and names the metadata facility does not know are
    /// skipped. Only metadata failures and an exceeded deadline are errors.
    pub fn resolve(&self) -> Result<BTreeSet<QualifiedName>, ResolveError> {
        let root = &self.settings.root;
        if !root.is_dir() {
            tracing::debug!("controller root {} is not a directory", root.display());
            return Ok(BTreeSet::new());
        }
        let started = Instant::now();
        let mut controllers = BTreeSet::new();
        let mut scanned = 0usize;
        for path in candidate_files(&self.settings) {
            self.check_deadline(started)?;
            scanned += 1;
            let Some(name) = read_candidate(&path) else {
                continue;
            };
            if self.accept(&name, &path)? {
                controllers.insert(name);
            }
        }
        tracing::info!(
            "discovered {} controller(s) in {} candidate file(s) under {}",
            controllers.len(),
            scanned,
            root.display()
        );
        Ok(controllers)
    }

    /// Same result as [`Self::resolve`], with file reads and name extraction
    /// fanned out over tokio tasks. Metadata lookups stay on the calling task.
    pub async fn resolve_parallel(&self) -> Result<BTreeSet<QualifiedName>, ResolveError> {
        match self.settings.deadline {
            Some(deadline) => tokio::time::timeout(deadline, self.resolve_parallel_inner())
                .await
                .map_err(|_| self.deadline_error(deadline))?,
            None => self.resolve_parallel_inner().await,
        }
    }

    async fn resolve_parallel_inner(&self) -> Result<BTreeSet<QualifiedName>, ResolveError> {
        let root = &self.settings.root;
        if !root.is_dir() {
            tracing::debug!("controller root {} is not a directory", root.display());
            return Ok(BTreeSet::new());
        }
        let started = Instant::now();
        let settings = self.settings.clone();
        let paths = tokio::task::spawn_blocking(move || {
            candidate_files(&settings).collect::<Vec<PathBuf>>()
        })
        .await?;
        let scanned = paths.len();
        if scanned > 0 {
            self.check_deadline(started)?;
        }

        let permits = Arc::new(Semaphore::new(self.settings.max_parallel_reads.max(1)));
        let mut set = JoinSet::new();
        for path in paths {
            let permits = Arc::clone(&permits);
            set.spawn(async move {
                let _permit = permits.acquire_owned().await.ok();
                let read = tokio::fs::read(&path).await;
                sniff_name(&path, read).map(|name| (name, path))
            });
        }

        // Single accumulation point; first path seen is kept for logging.
        let mut names: BTreeMap<QualifiedName, PathBuf> = BTreeMap::new();
        while let Some(res) = set.join_next().await {
            if let Some((name, path)) = res? {
                names.entry(name).or_insert(path);
            }
        }

        let mut controllers = BTreeSet::new();
        for (name, path) in names {
            self.check_deadline(started)?;
            if self.accept(&name, &path)? {
                controllers.insert(name);
            }
        }
        tracing::info!(
            "discovered {} controller(s) in {} candidate file(s) under {} (parallel)",
            controllers.len(),
            scanned,
            root.display()
        );
        Ok(controllers)
    }

    fn accept(&self, name: &QualifiedName, path: &Path) -> Result<bool, MetadataError> {
        let Some(ty) = self.metadata.resolve_type(name)? else {
            tracing::trace!("{} from {} is not a known type", name, path.display());
            return Ok(false);
        };
        let accepted = is_controller(&self.metadata, &ty)?;
        if accepted {
            tracing::debug!("controller {} ({})", name, path.display());
        } else {
            tracing::trace!("{} carries no controller or route marker", name);
        }
        Ok(accepted)
    }

    fn check_deadline(&self, started: Instant) -> Result<(), ResolveError> {
        match self.settings.deadline {
            Some(deadline) if started.elapsed() >= deadline => Err(self.deadline_error(deadline)),
            _ => Ok(()),
        }
    }

    fn deadline_error(&self, deadline: Duration) -> ResolveError {
        tracing::warn!(
            "controller discovery under {} exceeded {:?}",
            self.settings.root.display(),
            deadline
        );
        ResolveError::DeadlineExceeded {
            root: self.settings.root.clone(),
            deadline,
        }
    }
}

impl<M: MetadataFacility> ResolveControllers for ControllerResolver<M> {
    fn resolve(&self) -> Result<BTreeSet<QualifiedName>, ResolveError> {
        ControllerResolver::resolve(self)
    }
}

/// Candidate files under the root in file-name order. Symlinked directories
/// are not descended into; a symlinked file is kept only when its target
/// resolves inside the root.
fn candidate_files(settings: &ResolverSettings) -> impl Iterator<Item = PathBuf> + '_ {
    let canonical_root = settings.root.canonicalize().ok();
    WalkDir::new(&settings.root)
        .follow_links(false)
        .sort_by_file_name()
        .into_iter()
        .filter_map(|entry| match entry {
            Ok(e) => Some(e),
            Err(e) => {
                tracing::debug!("skipping unreadable entry: {}", e);
                None
            }
        })
        .filter(move |e| {
            let root = canonical_root.as_deref();
            e.file_type().is_file() || (e.path_is_symlink() && linked_file_inside(e.path(), root))
        })
        .map(|e| e.into_path())
        .filter(move |p| settings.is_candidate(p))
}

fn linked_file_inside(link: &Path, canonical_root: Option<&Path>) -> bool {
    let Some(root) = canonical_root else {
        return false;
    };
    match link.canonicalize() {
        Ok(target) if target.starts_with(root) && target.is_file() => true,
        Ok(target) => {
            tracing::debug!(
                "skipping {}: link target {} is outside the root or not a file",
                link.display(),
                target.display()
            );
            false
        }
        Err(e) => {
            tracing::debug!("skipping dangling link {}: {}", link.display(), e);
            false
        }
    }
}

fn read_candidate(path: &Path) -> Option<QualifiedName> {
    sniff_name(path, std::fs::read(path))
}

/// Shared tail of both discovery paths: log unreadable and nameless files
/// the same way.
fn sniff_name(path: &Path, read: std::io::Result<Vec<u8>>) -> Option<QualifiedName> {
    let contents = match read {
        Ok(bytes) => bytes,
        Err(e) => {
            tracing::warn!("skipping {}: failed to read: {}", path.display(), e);
            return None;
        }
    };
    let name = extract_qualified_name(&contents);
    if name.is_none() {
        tracing::debug!("skipping {}: no type declaration", path.display());
    }
    name
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Marker;
    use crate::registry::{LoadResult, TypeDescriptor, TypeRegistry};

    fn write_php(root: &Path, rel: &str, body: &str) {
        let path = root.join(rel);
        if let Some(dir) = path.parent() {
            std::fs::create_dir_all(dir).unwrap();
        }
        std::fs::write(&path, format!("<?php\n{}", body)).unwrap();
    }

    fn qn(s: &str) -> QualifiedName {
        s.parse().unwrap()
    }

    fn names(set: &BTreeSet<QualifiedName>) -> Vec<String> {
        set.iter().map(|n| n.to_string()).collect()
    }

    fn app_registry() -> TypeRegistry {
        let reg = TypeRegistry::new();
        reg.extend([
            TypeDescriptor::new(qn("App\\Controllers\\AdminController"))
                .with_marker(Marker::controller(Some("/admin"))),
            TypeDescriptor::new(qn("App\\Controllers\\BlogController"))
                .with_method("helper", vec![])
                .with_method(
                    "index",
                    vec![Marker::route(Some("blog_index"), "/blog", &["GET"])],
                ),
            TypeDescriptor::new(qn("App\\Services\\PlainService"))
                .with_marker(Marker::other("Injectable"))
                .with_method("run", vec![Marker::other("Cached")]),
            TypeDescriptor::new(qn("Vendor\\Lib\\ExternalController"))
                .with_marker(Marker::controller(Some("/ext"))),
        ])
        .unwrap();
        reg
    }

    const ADMIN: &str = "namespace App\\Controllers;\nuse Mitsuki\\Attributes\\Controller;\n\n#[Controller(\"/admin\")]\nclass AdminController {}\n";
    const BLOG: &str = "namespace App\\Controllers;\n\nclass BlogController {\n    #[Route(\"blog_index\", \"/blog\", [\"GET\"])]\n    public function index() {}\n}\n";
    const PLAIN: &str = "namespace App\\Services;\nclass PlainService {}\n";
    const EXTERNAL: &str = "namespace Vendor\\Lib;\n#[Controller(\"/ext\")]\nclass ExternalController {}\n";

    #[test]
    fn missing_root_is_empty() {
        let resolver = ControllerResolver::new("/invalid/path/to/nowhere", app_registry());
        assert!(resolver.resolve().unwrap().is_empty());
    }

    #[test]
    fn root_pointing_at_a_file_is_empty() {
        let dir = tempfile::tempdir().unwrap();
        write_php(dir.path(), "AdminController.php", ADMIN);
        let resolver =
            ControllerResolver::new(dir.path().join("AdminController.php"), app_registry());
        assert!(resolver.resolve().unwrap().is_empty());
    }

    #[test]
    fn type_level_marker_is_accepted() {
        let dir = tempfile::tempdir().unwrap();
        write_php(dir.path(), "App/Controllers/AdminController.php", ADMIN);
        let found = ControllerResolver::new(dir.path(), app_registry())
            .resolve()
            .unwrap();
        assert_eq!(names(&found), vec!["App\\Controllers\\AdminController"]);
    }

    #[test]
    fn route_marked_method_is_accepted() {
        let dir = tempfile::tempdir().unwrap();
        write_php(dir.path(), "App/Controllers/BlogController.php", BLOG);
        let found = ControllerResolver::new(dir.path(), app_registry())
            .resolve()
            .unwrap();
        assert!(found.contains(&qn("App\\Controllers\\BlogController")));
    }

    #[test]
    fn unmarked_type_is_ignored() {
        let dir = tempfile::tempdir().unwrap();
        write_php(dir.path(), "App/Services/PlainService.php", PLAIN);
        let found = ControllerResolver::new(dir.path(), app_registry())
            .resolve()
            .unwrap();
        assert!(found.is_empty());
    }

    #[test]
    fn vendor_paths_are_excluded() {
        let dir = tempfile::tempdir().unwrap();
        write_php(dir.path(), "vendor/ExternalController.php", EXTERNAL);
        write_php(dir.path(), "lib/myvendorish/ExternalController.php", EXTERNAL);
        let found = ControllerResolver::new(dir.path(), app_registry())
            .resolve()
            .unwrap();
        assert!(found.is_empty());
    }

    #[test]
    fn root_under_vendor_excludes_everything() {
        let dir = tempfile::tempdir().unwrap();
        let root = dir.path().join("vendor").join("app");
        write_php(&root, "AdminController.php", ADMIN);
        let found = ControllerResolver::new(&root, app_registry())
            .resolve()
            .unwrap();
        assert!(found.is_empty());
    }

    #[test]
    fn other_extensions_are_ignored() {
        let dir = tempfile::tempdir().unwrap();
        write_php(dir.path(), "AdminController.inc", ADMIN);
        write_php(dir.path(), "AdminController.PHP", ADMIN);
        let found = ControllerResolver::new(dir.path(), app_registry())
            .resolve()
            .unwrap();
        assert!(found.is_empty());
    }

    #[test]
    fn custom_extension_and_exclusion() {
        let dir = tempfile::tempdir().unwrap();
        write_php(dir.path(), "src/AdminController.inc", ADMIN);
        write_php(dir.path(), "third_party/ExternalController.inc", EXTERNAL);
        let mut settings = ResolverSettings::new(dir.path());
        settings.source_extension = "inc".into();
        settings.excluded_segment = "third_party".into();
        let found = ControllerResolver::with_settings(settings, app_registry())
            .resolve()
            .unwrap();
        assert_eq!(names(&found), vec!["App\\Controllers\\AdminController"]);
    }

    #[test]
    fn unreadable_nameless_and_unknown_files_are_skipped() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("binary.php"), [0xff_u8, 0xfe, 0x00, 0xc3]).unwrap();
        write_php(dir.path(), "helpers.php", "function url_for($x) { return $x; }\n");
        write_php(dir.path(), "Unknown.php", "namespace App;\nclass NotRegistered {}\n");
        write_php(dir.path(), "App/Controllers/AdminController.php", ADMIN);
        let found = ControllerResolver::new(dir.path(), app_registry())
            .resolve()
            .unwrap();
        assert_eq!(names(&found), vec!["App\\Controllers\\AdminController"]);
    }

    #[test]
    fn mixed_tree_is_idempotent_and_deduplicated() {
        let dir = tempfile::tempdir().unwrap();
        write_php(dir.path(), "App/Controllers/AdminController.php", ADMIN);
        write_php(dir.path(), "backup/AdminController.php", ADMIN);
        write_php(dir.path(), "App/Controllers/BlogController.php", BLOG);
        write_php(dir.path(), "App/Services/PlainService.php", PLAIN);
        write_php(dir.path(), "vendor/lib/ExternalController.php", EXTERNAL);

        let resolver = ControllerResolver::new(dir.path(), app_registry());
        let first = resolver.resolve().unwrap();
        let second = resolver.resolve().unwrap();
        assert_eq!(first, second);
        assert_eq!(
            names(&first),
            vec![
                "App\\Controllers\\AdminController",
                "App\\Controllers\\BlogController"
            ]
        );
    }

    #[test]
    fn only_first_class_per_file_is_considered() {
        let dir = tempfile::tempdir().unwrap();
        write_php(
            dir.path(),
            "Both.php",
            "namespace App\\Services;\nclass PlainService {}\nclass AdminController {}\n",
        );
        let found = ControllerResolver::new(dir.path(), app_registry())
            .resolve()
            .unwrap();
        assert!(found.is_empty());
    }

    #[test]
    fn metadata_failure_propagates() {
        let dir = tempfile::tempdir().unwrap();
        write_php(dir.path(), "Broken.php", "namespace App;\nclass Broken {}\n");
        let reg = TypeRegistry::with_loader(|name: &QualifiedName| -> LoadResult {
            Err(MetadataError::Loader {
                name: name.clone(),
                reason: "autoload map unreadable".into(),
            })
        });
        let err = ControllerResolver::new(dir.path(), reg)
            .resolve()
            .unwrap_err();
        assert!(matches!(
            err,
            ResolveError::Metadata(MetadataError::Loader { .. })
        ));
    }

    #[test]
    fn loader_populates_registry_during_discovery() {
        let dir = tempfile::tempdir().unwrap();
        write_php(dir.path(), "Api/StatusController.php", "namespace Api;\nclass StatusController {}\n");
        let reg = TypeRegistry::with_loader(|name: &QualifiedName| -> LoadResult {
            Ok(Some(TypeDescriptor::new(name.clone()).with_method(
                "show",
                vec![Marker::route(None, "/status", &["GET"])],
            )))
        });
        let resolver = ControllerResolver::new(dir.path(), &reg);
        assert_eq!(names(&resolver.resolve().unwrap()), vec!["Api\\StatusController"]);
        assert_eq!(reg.len().unwrap(), 1);
    }

    #[test]
    fn zero_deadline_is_exceeded() {
        let dir = tempfile::tempdir().unwrap();
        write_php(dir.path(), "App/Controllers/AdminController.php", ADMIN);
        let mut settings = ResolverSettings::new(dir.path());
        settings.deadline = Some(Duration::ZERO);
        let err = ControllerResolver::with_settings(settings, app_registry())
            .resolve()
            .unwrap_err();
        assert!(matches!(err, ResolveError::DeadlineExceeded { .. }));
    }

    #[test]
    fn global_registry_backs_a_resolver() {
        let dir = tempfile::tempdir().unwrap();
        write_php(
            dir.path(),
            "Global/HealthController.php",
            "namespace Global\\Health;\nclass HealthController {}\n",
        );
        TypeRegistry::global()
            .register(
                TypeDescriptor::new(qn("Global\\Health\\HealthController"))
                    .with_marker(Marker::controller(None)),
            )
            .unwrap();
        let resolver = ControllerResolver::new(dir.path(), TypeRegistry::global());
        assert!(resolver
            .resolve()
            .unwrap()
            .contains(&qn("Global\\Health\\HealthController")));
    }

    #[test]
    fn trait_object_seam() {
        let dir = tempfile::tempdir().unwrap();
        write_php(dir.path(), "App/Controllers/BlogController.php", BLOG);
        let resolver = ControllerResolver::new(dir.path(), app_registry());
        let seam: &dyn ResolveControllers = &resolver;
        assert_eq!(seam.resolve().unwrap().len(), 1);
    }

    #[tokio::test]
    async fn parallel_matches_sequential() {
        let dir = tempfile::tempdir().unwrap();
        write_php(dir.path(), "App/Controllers/AdminController.php", ADMIN);
        write_php(dir.path(), "copy/AdminController.php", ADMIN);
        write_php(dir.path(), "App/Controllers/BlogController.php", BLOG);
        write_php(dir.path(), "App/Services/PlainService.php", PLAIN);
        write_php(dir.path(), "vendor/ExternalController.php", EXTERNAL);
        write_php(dir.path(), "notes.php", "// nothing here\n");

        let mut settings = ResolverSettings::new(dir.path());
        settings.max_parallel_reads = 2;
        let resolver = ControllerResolver::with_settings(settings, app_registry());
        let sequential = resolver.resolve().unwrap();
        let parallel = resolver.resolve_parallel().await.unwrap();
        assert_eq!(sequential, parallel);
        assert_eq!(parallel.len(), 2);
    }

    #[test]
    fn latin1_source_is_still_discovered() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("App/Controllers/AdminController.php");
        std::fs::create_dir_all(path.parent().unwrap()).unwrap();
        let mut src = b"<?php\n// Auteur: Ren".to_vec();
        src.push(0xE9);
        src.extend_from_slice(b"\nnamespace App\\Controllers;\nclass AdminController {}\n");
        std::fs::write(&path, src).unwrap();

        let found = ControllerResolver::new(dir.path(), app_registry())
            .resolve()
            .unwrap();
        assert_eq!(names(&found), vec!["App\\Controllers\\AdminController"]);
    }

    #[test]
    fn sniff_name_skips_unreadable_and_nameless_input() {
        let path = Path::new("App/Missing.php");
        let missing = std::io::Error::new(std::io::ErrorKind::NotFound, "gone");
        assert!(sniff_name(path, Err(missing)).is_none());
        assert!(sniff_name(path, Ok(b"<?php\nfunction f() {}\n".to_vec())).is_none());
        assert_eq!(
            sniff_name(path, Ok(b"<?php\nclass Legacy {}\n".to_vec())),
            Some(QualifiedName::global("Legacy"))
        );
    }

    #[cfg(unix)]
    #[test]
    fn symlinked_files_inside_the_root_are_scanned() {
        use std::os::unix::fs::symlink;

        let dir = tempfile::tempdir().unwrap();
        let outside = tempfile::tempdir().unwrap();
        write_php(dir.path(), "shared/admin.src", ADMIN);
        write_php(outside.path(), "BlogController.php", BLOG);
        std::fs::create_dir_all(dir.path().join("App")).unwrap();
        symlink(
            dir.path().join("shared/admin.src"),
            dir.path().join("App/AdminController.php"),
        )
        .unwrap();
        symlink(
            outside.path().join("BlogController.php"),
            dir.path().join("App/BlogController.php"),
        )
        .unwrap();
        symlink(outside.path(), dir.path().join("linked_dir")).unwrap();
        symlink(
            dir.path().join("gone.php"),
            dir.path().join("App/Dangling.php"),
        )
        .unwrap();

        let found = ControllerResolver::new(dir.path(), app_registry())
            .resolve()
            .unwrap();
        assert_eq!(names(&found), vec!["App\\Controllers\\AdminController"]);
    }

    #[tokio::test]
    async fn parallel_reads_latin1_source() {
        let dir = tempfile::tempdir().unwrap();
        let mut src = b"<?php\n/* caf".to_vec();
        src.push(0xE9);
        src.extend_from_slice(b" */\nnamespace App\\Controllers;\nclass BlogController {}\n");
        std::fs::write(dir.path().join("BlogController.php"), src).unwrap();
        let resolver = ControllerResolver::new(dir.path(), app_registry());
        assert_eq!(
            names(&resolver.resolve_parallel().await.unwrap()),
            vec!["App\\Controllers\\BlogController"]
        );
    }

    #[tokio::test]
    async fn parallel_zero_deadline_is_exceeded_like_sequential() {
        let dir = tempfile::tempdir().unwrap();
        write_php(dir.path(), "A.php", "namespace App;\nclass A {}\n");
        let mut settings = ResolverSettings::new(dir.path());
        settings.deadline = Some(Duration::ZERO);
        let resolver = ControllerResolver::with_settings(settings, app_registry());

        let sequential = resolver.resolve().unwrap_err();
        let parallel = resolver.resolve_parallel().await.unwrap_err();
        assert!(matches!(sequential, ResolveError::DeadlineExceeded { .. }));
        assert!(matches!(parallel, ResolveError::DeadlineExceeded { .. }));
    }

    #[tokio::test]
    async fn parallel_generous_deadline_completes() {
        let dir = tempfile::tempdir().unwrap();
        write_php(dir.path(), "App/Controllers/AdminController.php", ADMIN);
        let mut settings = ResolverSettings::new(dir.path());
        settings.deadline = Some(Duration::from_secs(30));
        let resolver = ControllerResolver::with_settings(settings, app_registry());
        assert_eq!(resolver.resolve_parallel().await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn parallel_missing_root_is_empty() {
        let resolver = ControllerResolver::new("/invalid/path/to/nowhere", app_registry());
        assert!(resolver.resolve_parallel().await.unwrap().is_empty());
    }
}
