use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::Context as _;
use env_flags::env_flags;
use once_cell::sync::OnceCell;

use controller_scout::config::{OutputFormat, UserConfig, expand_home, load_user_config, pick};
use controller_scout::manifest;
use controller_scout::{ControllerResolver, ResolveControllers, ResolverSettings, TypeRegistry};

fn init_tracing(home: &Path, user_cfg: Option<&UserConfig>) {
    env_flags! {
        /// Tracing filter, e.g. "info", "debug", or targets format.
        RUST_LOG: &str = "info";
        /// Preferred filter env (alias). If set, overrides RUST_LOG.
        TRACING_FILTER: &str = "";
        /// Pretty formatting for logs (ignored if TRACING_JSON=true).
        TRACING_PRETTY: bool = false;
        /// Compact single-line formatting for logs (ignored if TRACING_JSON=true)
        TRACING_COMPACT: bool = true;
        /// JSON formatting for logs
        TRACING_JSON: bool = false;
        /// If true, also log to file under <SCOUT_HOME>/logs or LOG_DIR
        LOG_TO_FILE: bool = false;
        /// Optional explicit log directory (absolute). Defaults to <SCOUT_HOME>/logs
        LOG_DIR: &str = "";
    }

    use tracing_subscriber::fmt::MakeWriter;
    use tracing_subscriber::{EnvFilter, Layer, Registry, layer::SubscriberExt, prelude::*};

    type BoxedLayer = Box<dyn Layer<Registry> + Send + Sync>;

    fn styled<W>(json: bool, compact: bool, pretty: bool, ansi: bool, writer: W) -> BoxedLayer
    where
        W: for<'w> MakeWriter<'w> + Send + Sync + 'static,
    {
        let base = tracing_subscriber::fmt::layer()
            .with_file(false)
            .with_line_number(false)
            .with_target(true)
            .with_ansi(ansi)
            .with_writer(writer);
        if json {
            base.json().boxed()
        } else if compact {
            base.compact().boxed()
        } else if pretty {
            base.pretty().boxed()
        } else {
            base.boxed()
        }
    }

    let env_set = |k: &str| std::env::var_os(k).is_some();
    let logging = user_cfg.and_then(|c| c.logging.as_ref());

    let rust_log = if !(*TRACING_FILTER).is_empty() {
        (*TRACING_FILTER).to_string()
    } else {
        pick(
            env_set("RUST_LOG"),
            (*RUST_LOG).to_string(),
            logging.and_then(|l| l.level.clone()),
        )
    };
    let tracing_json = pick(env_set("TRACING_JSON"), *TRACING_JSON, logging.and_then(|l| l.json));
    let tracing_compact = pick(
        env_set("TRACING_COMPACT"),
        *TRACING_COMPACT,
        logging.and_then(|l| l.compact),
    );
    let tracing_pretty = pick(
        env_set("TRACING_PRETTY"),
        *TRACING_PRETTY,
        logging.and_then(|l| l.pretty),
    );
    let log_to_file = pick(env_set("LOG_TO_FILE"), *LOG_TO_FILE, logging.and_then(|l| l.to_file));
    let log_dir = if !(*LOG_DIR).is_empty() {
        PathBuf::from((*LOG_DIR).to_string())
    } else {
        logging
            .and_then(|l| l.dir.as_deref())
            .map(expand_home)
            .unwrap_or_else(|| home.join("logs"))
    };

    let filter = EnvFilter::try_new(rust_log).unwrap_or_else(|_| EnvFilter::new("info"));

    // stdout carries the discovered names; logs always go to stderr.
    let mut layers: Vec<BoxedLayer> = vec![styled(
        tracing_json,
        tracing_compact,
        tracing_pretty,
        true,
        std::io::stderr,
    )];

    static FILE_GUARD: OnceCell<tracing_appender::non_blocking::WorkerGuard> = OnceCell::new();
    let mut dir_error = None;
    if log_to_file {
        match std::fs::create_dir_all(&log_dir) {
            Ok(()) => {
                let appender = tracing_appender::rolling::daily(&log_dir, "controller-scout.log");
                let (nb, guard) = tracing_appender::non_blocking(appender);
                let _ = FILE_GUARD.set(guard);
                layers.push(styled(tracing_json, tracing_compact, tracing_pretty, false, nb));
            }
            Err(e) => dir_error = Some(e),
        }
    }

    if let Err(e) = tracing_subscriber::registry()
        .with(layers)
        .with(filter)
        .try_init()
    {
        tracing::debug!("tracing already set: {:?}", e);
    }
    if let Some(e) = dir_error {
        tracing::warn!("failed to create log dir {}: {}", log_dir.display(), e);
    }
}

fn scout_home() -> PathBuf {
    match std::env::var("SCOUT_HOME") {
        Ok(h) if !h.is_empty() => PathBuf::from(h),
        _ => match std::env::var("HOME") {
            Ok(home) => PathBuf::from(home).join(".controller-scout"),
            Err(_) => std::env::current_dir()
                .unwrap_or_else(|_| PathBuf::from("."))
                .join(".controller-scout"),
        },
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let home = scout_home();
    let (user_cfg, cfg_error) = match load_user_config(&home) {
        Ok(cfg) => (cfg, None),
        Err(e) => (None, Some(e)),
    };
    init_tracing(&home, user_cfg.as_ref());
    if let Some(e) = cfg_error {
        tracing::warn!("ignoring user config: {:#}", e);
    }

    env_flags! {
        /// Source root to scan. If empty, defaults to the current execution directory.
        SCOUT_ROOT: &str = "";
        /// Source file extension (without the dot).
        SCOUT_EXTENSION: &str = "php";
        /// Paths containing this substring are skipped. Empty disables the exclusion.
        SCOUT_EXCLUDE: &str = "vendor";
        /// Discovery deadline in milliseconds; 0 means none.
        SCOUT_DEADLINE_MS: u64 = 0;
        /// Fan out file reads across tokio tasks.
        SCOUT_PARALLEL: bool = false;
        /// Cap on concurrent file reads when SCOUT_PARALLEL=true.
        SCOUT_MAX_PARALLEL_READS: usize = 64;
        /// Registration table (TOML/YAML/JSON). Defaults to <root>/.scout/registry.toml when present.
        SCOUT_REGISTRY: &str = "";
        /// Output format: "lines" (default) or "json".
        SCOUT_OUTPUT: &str = "lines";
    }

    let env_set = |k: &str| std::env::var_os(k).is_some();
    let discovery = user_cfg.as_ref().and_then(|c| c.discovery.as_ref());

    let root = if !(*SCOUT_ROOT).is_empty() {
        expand_home(*SCOUT_ROOT)
    } else if let Some(r) = discovery.and_then(|d| d.root.as_deref()) {
        expand_home(r)
    } else {
        std::env::current_dir().unwrap_or_else(|_| PathBuf::from("."))
    };

    let mut settings = ResolverSettings::new(root.clone());
    settings.source_extension = pick(
        env_set("SCOUT_EXTENSION"),
        (*SCOUT_EXTENSION).to_string(),
        discovery.and_then(|d| d.extension.clone()),
    );
    settings.excluded_segment = pick(
        env_set("SCOUT_EXCLUDE"),
        (*SCOUT_EXCLUDE).to_string(),
        discovery.and_then(|d| d.exclude.clone()),
    );
    let deadline_ms = pick(
        env_set("SCOUT_DEADLINE_MS"),
        *SCOUT_DEADLINE_MS,
        discovery.and_then(|d| d.deadline_ms),
    );
    settings.deadline = (deadline_ms > 0).then(|| Duration::from_millis(deadline_ms));
    settings.max_parallel_reads = pick(
        env_set("SCOUT_MAX_PARALLEL_READS"),
        *SCOUT_MAX_PARALLEL_READS,
        discovery.and_then(|d| d.max_parallel_reads),
    );
    let parallel = pick(
        env_set("SCOUT_PARALLEL"),
        *SCOUT_PARALLEL,
        discovery.and_then(|d| d.parallel),
    );
    let output: OutputFormat = pick(
        env_set("SCOUT_OUTPUT"),
        (*SCOUT_OUTPUT).to_string(),
        discovery.and_then(|d| d.output.clone()),
    )
    .parse()?;

    tracing::info!(
        "scanning {} (extension={}, exclude={:?}, parallel={}, deadline_ms={})",
        root.display(),
        settings.source_extension,
        settings.excluded_segment,
        parallel,
        deadline_ms
    );

    // An explicitly requested table must load; the default one is optional.
    let requested = if !(*SCOUT_REGISTRY).is_empty() {
        Some(expand_home(*SCOUT_REGISTRY))
    } else {
        discovery
            .and_then(|d| d.registry.as_deref())
            .map(expand_home)
    };
    let registry = TypeRegistry::global();
    match requested {
        Some(path) => {
            manifest::load_into(registry, &path)
                .with_context(|| format!("load registration table {}", path.display()))?;
        }
        None => {
            let default_path = root.join(".scout").join("registry.toml");
            if default_path.exists() {
                if let Err(e) = manifest::load_into(registry, &default_path) {
                    tracing::warn!("failed to load {}: {}", default_path.display(), e);
                }
            } else {
                tracing::debug!("no registration table at {}", default_path.display());
            }
        }
    }

    let resolver = ControllerResolver::with_settings(settings, registry);
    let controllers = if parallel {
        resolver.resolve_parallel().await?
    } else {
        ResolveControllers::resolve(&resolver)?
    };

    match output {
        OutputFormat::Lines => {
            for name in &controllers {
                println!("{}", name);
            }
        }
        OutputFormat::Json => {
            println!("{}", serde_json::to_string_pretty(&controllers)?);
        }
    }
    Ok(())
}
