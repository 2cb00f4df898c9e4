//! Group numbers or delimited records.

use std::fmt::{Display, Write as _};
use std::path::PathBuf;

use grouping_common::timing::{AccumTimer, TimingReport};
use grouping_common::GroupingResult;
use grouping_core::{Cluster, ClusterSummary, Grouper, KeyFn};
use serde::Serialize;

use crate::input::{parse_records, parse_values, read_input, Record};

pub struct GroupArgs {
    pub path: Option<PathBuf>,
    pub tolerance: f64,
    pub field: Option<usize>,
    pub delimiter: char,
    pub json: bool,
}

#[derive(Serialize)]
struct ClusterReport<'a, T> {
    #[serde(flatten)]
    summary: ClusterSummary,
    members: &'a [T],
}

pub fn run(args: GroupArgs, timings: &mut TimingReport) -> anyhow::Result<()> {
    let content = {
        let _timer = timings.scoped("read");
        read_input(args.path.as_deref())
            .map_err(|e| anyhow::anyhow!("Failed to read input: {e}"))?
    };

    match args.field {
        None => {
            let values = {
                let _timer = timings.scoped("parse");
                parse_values(&content)?
            };
            tracing::debug!(count = values.len(), "parsed values");
            let count = values.len();
            let grouper = Grouper::scalar(args.tolerance)?;
            let clusters = group_timed(&grouper, values, timings)?;
            emit(&clusters, count, args.tolerance, args.json)
        }
        Some(field) => {
            let records = {
                let _timer = timings.scoped("parse");
                parse_records(&content, field, args.delimiter)?
            };
            tracing::debug!(count = records.len(), field, "parsed records");
            let count = records.len();
            let grouper = Grouper::new(args.tolerance, |record: &Record| record.key)?;
            let clusters = group_timed(&grouper, records, timings)?;
            emit(&clusters, count, args.tolerance, args.json)
        }
    }
}

/// Feed `items` through a session, timing every push.
fn group_timed<T, K: KeyFn<T>>(
    grouper: &Grouper<K>,
    items: Vec<T>,
    timings: &mut TimingReport,
) -> GroupingResult<Vec<Cluster<T>>> {
    let mut push_timer = AccumTimer::new();
    let mut session = grouper.session();
    for item in items {
        push_timer.begin();
        let placed = session.push(item);
        push_timer.end();
        placed?;
    }
    timings.record("group.push", push_timer.total().as_secs_f64());
    tracing::debug!(
        pushes = push_timer.count(),
        avg_ns = push_timer.average().as_nanos() as u64,
        "items assigned"
    );

    let _timer = timings.scoped("group.sort");
    Ok(session.finish())
}

fn emit<T: Display + Serialize>(
    clusters: &[Cluster<T>],
    items: usize,
    tolerance: f64,
    json: bool,
) -> anyhow::Result<()> {
    if json {
        println!("{}", render_json(clusters)?);
    } else {
        print!("{}", render_text(clusters, items, tolerance));
    }
    Ok(())
}

pub fn render_json<T: Serialize>(clusters: &[Cluster<T>]) -> serde_json::Result<String> {
    let reports: Vec<ClusterReport<'_, T>> = clusters
        .iter()
        .map(|cluster| ClusterReport {
            summary: cluster.summary(),
            members: cluster.members(),
        })
        .collect();
    serde_json::to_string_pretty(&reports)
}

pub fn render_text<T: Display>(clusters: &[Cluster<T>], items: usize, tolerance: f64) -> String {
    let mut out = String::new();
    let _ = writeln!(
        out,
        "Grouped {items} item(s) into {} cluster(s) (tolerance {tolerance})",
        clusters.len()
    );
    for (rank, cluster) in clusters.iter().enumerate() {
        let _ = writeln!(
            out,
            "  #{:<3} mean {:.3}  min {:.3}  max {:.3}  count {}",
            rank + 1,
            cluster.mean(),
            cluster.min(),
            cluster.max(),
            cluster.len()
        );
        for member in cluster {
            let _ = writeln!(out, "       {member}");
        }
    }
    out
}
