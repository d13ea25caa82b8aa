// src/lib.rs

pub mod build_info;
pub mod cli;
pub mod components;
pub mod duration;
pub mod errors;
pub mod fs;
pub mod guard;
pub mod logging;
pub mod pool;
pub mod procs;
pub mod watch;

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, Result};
use tracing::{info, warn};

use crate::build_info::detect_build_type;
use crate::cli::{
    BuildTypeArgs, CliArgs, Command, CountArgs, LocateArgs, NetworkArgs, WatchArgs,
};
use crate::components::ComponentMap;
use crate::duration::parse_duration;
use crate::fs::RealFileSystem;
use crate::guard::{BoundedOutcome, run_bounded_async_outcome};
use crate::pool::{Locator, ProcessPool, SearchPath, TokioSpawner};
use crate::watch::{WatchBudget, WriterSink, watch_child};

/// Exit code used by `watch` when the keyword was not seen.
pub const EXIT_NOT_FOUND: i32 = 2;

/// High-level entry point used by `main.rs`.
///
/// Returns the process exit code on success.
pub async fn run(args: CliArgs) -> Result<i32> {
    match args.command {
        Command::Network(net) => run_network(net).await,
        Command::Watch(watch) => run_watch(watch).await,
        Command::Locate(locate) => run_locate(locate),
        Command::BuildType(build) => run_build_type(build),
        Command::Count(count) => run_count(count),
        Command::Components => {
            for (name, dir) in ComponentMap::default().iter() {
                println!("{name:<12} src/{dir}");
            }
            Ok(0)
        }
    }
}

async fn run_network(args: NetworkArgs) -> Result<i32> {
    let search = search_path_or(args.paths, || SearchPath::new([PathBuf::from(".")]));
    let pool = ProcessPool::new(
        Locator::new(search),
        Arc::new(TokioSpawner::new().quiet(args.quiet)),
    );

    let summary = pool
        .run_all(&args.binary, args.count)
        .await
        .with_context(|| format!("running {} copies of '{}'", args.count, args.binary))?;

    println!(
        "{}: {} launched, {} succeeded, {} failed",
        summary.program.display(),
        summary.launched(),
        summary.succeeded(),
        summary.failed()
    );
    if !summary.all_succeeded() {
        warn!(failed = summary.failed(), "some node processes did not exit cleanly");
    }

    Ok(0)
}

async fn run_watch(args: WatchArgs) -> Result<i32> {
    let budget = WatchBudget::new(args.line_limit, args.repeat)?;
    let timeout = args
        .timeout
        .as_deref()
        .map(parse_duration)
        .transpose()?;

    let (program, rest) = args
        .command
        .split_first()
        .map(|(p, r)| (p.clone(), r.to_vec()))
        .context("no command given")?;
    let keyword = args.keyword.clone();

    let scan = async move {
        let mut sink = WriterSink::stdout();
        watch_child(&program, &rest, &keyword, &budget, &mut sink).await
    };

    let watched = match timeout {
        None => Some(scan.await?),
        Some(deadline) => match run_bounded_async_outcome(scan, deadline).await {
            BoundedOutcome::Completed(res) => Some(res?),
            BoundedOutcome::TimedOut => {
                warn!(
                    keyword = %args.keyword,
                    timeout = ?deadline,
                    "gave up waiting for keyword; command left running"
                );
                None
            }
            BoundedOutcome::Failed(msg) => anyhow::bail!("watch task failed: {msg}"),
        },
    };

    let Some(mut watched) = watched else {
        return Ok(EXIT_NOT_FOUND);
    };

    if args.wait {
        let status = watched.child.wait().await.context("waiting for command")?;
        info!(status = %status, "command exited");
    } else if let Err(e) = watched.child.kill().await {
        warn!(error = %e, "failed to stop command after scan");
    }

    if watched.found {
        println!("found '{}'", args.keyword);
        Ok(0)
    } else {
        println!("'{}' not found", args.keyword);
        Ok(EXIT_NOT_FOUND)
    }
}

fn run_locate(args: LocateArgs) -> Result<i32> {
    let search = search_path_or(args.paths, SearchPath::from_env);
    let path = Locator::new(search).resolve(&args.name)?;
    println!("{}", path.display());
    Ok(0)
}

fn run_build_type(args: BuildTypeArgs) -> Result<i32> {
    let found = detect_build_type(&RealFileSystem, &args.dir)
        .with_context(|| format!("reading build type from {}", args.dir.display()))?;
    match found {
        Some(build_type) => {
            println!("{build_type}");
            Ok(0)
        }
        None => {
            println!("unknown");
            Ok(EXIT_NOT_FOUND)
        }
    }
}

fn run_count(args: CountArgs) -> Result<i32> {
    let count = procs::count_matching(&args.name)?;
    println!("{count}");

    match args.expect {
        Some(expected) if count < expected => {
            warn!(name = %args.name, count, expected, "fewer matching processes than expected");
            Ok(EXIT_NOT_FOUND)
        }
        _ => Ok(0),
    }
}

fn search_path_or(paths: Vec<PathBuf>, fallback: impl FnOnce() -> SearchPath) -> SearchPath {
    if paths.is_empty() {
        fallback()
    } else {
        SearchPath::new(paths)
    }
}
