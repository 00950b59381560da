// Snapshot run against an in-memory backend: plan order, failure downgrade, end-to-end report

mod common;

use chrono::NaiveDate;
use common::{DownSource, FakeSource, row, target};
use promreceipt::collector::{collect, discover_directory};
use promreceipt::models::{ExpressionKind, OsFamily};
use promreceipt::reconciler::QUERY_PLAN;
use promreceipt::render::render;

fn expr(os_family: OsFamily, kind: ExpressionKind) -> &'static str {
    QUERY_PLAN
        .iter()
        .find(|q| q.os_family == os_family && q.kind == kind)
        .map(|q| q.expr)
        .unwrap()
}

fn ts() -> chrono::NaiveDateTime {
    NaiveDate::from_ymd_opt(2025, 6, 1)
        .unwrap()
        .and_hms_opt(12, 0, 0)
        .unwrap()
}

#[tokio::test]
async fn targets_then_every_expression_in_plan_order() {
    let source = FakeSource::default().with_targets(vec![]);
    collect(&source).await;
    let calls = source.calls.borrow();
    assert_eq!(calls[0], "targets");
    let queried: Vec<&str> = calls[1..].iter().map(String::as_str).collect();
    let planned: Vec<&str> = QUERY_PLAN.iter().map(|q| q.expr).collect();
    assert_eq!(queried, planned);
}

#[tokio::test]
async fn linux_host_end_to_end() {
    let source = FakeSource::default()
        .with_targets(vec![])
        .with_series(
            expr(OsFamily::Linux, ExpressionKind::CpuUtilization),
            vec![row(&[("instance", "h1"), ("job", "web")], 12.5)],
        )
        .with_series(
            expr(OsFamily::Linux, ExpressionKind::MemoryTotal),
            vec![row(&[("instance", "h1")], 8_589_934_592.0)],
        )
        .with_series(
            expr(OsFamily::Linux, ExpressionKind::MemoryAvailable),
            vec![row(&[("instance", "h1")], 4_294_967_296.0)],
        );
    let hosts = collect(&source).await;
    let out = render(&hosts, ts());
    assert!(out.contains(" Job:   web"));
    assert!(out.contains(" Type:  linux"));
    assert!(out.contains("12.5%"));
    assert!(out.contains(" RAM:   4096M / 8192M"));
    assert!(!out.contains("Uptime"));
}

#[tokio::test]
async fn memory_only_host_gets_job_from_target_directory() {
    let source = FakeSource::default()
        .with_targets(vec![target(&[("instance", "h2"), ("job", "batch")], &[])])
        .with_series(
            expr(OsFamily::Windows, ExpressionKind::MemoryAvailable),
            vec![row(&[("instance", "h2")], 1024.0)],
        );
    let hosts = collect(&source).await;
    let out = render(&hosts, ts());
    assert!(out.contains("h2\n Job:   batch\n Type:  unknown"));
}

#[tokio::test]
async fn cpu_row_job_fallback_is_not_replaced_by_memory_labels() {
    let source = FakeSource::default()
        .with_targets(vec![])
        .with_series(
            expr(OsFamily::Linux, ExpressionKind::CpuUtilization),
            vec![row(&[("instance", "h3")], 40.0)],
        )
        .with_series(
            expr(OsFamily::Linux, ExpressionKind::MemoryAvailable),
            vec![row(&[("instance", "h3"), ("job", "db")], 1024.0)],
        );
    let hosts = collect(&source).await;
    let out = render(&hosts, ts());
    assert!(out.contains("h3\n Job:   unknown\n Type:  linux"));
    assert!(!out.contains("db"));
}

#[tokio::test]
async fn failed_expression_counts_as_no_rows() {
    let cpu = expr(OsFamily::Linux, ExpressionKind::CpuUtilization);
    let source = FakeSource::default()
        .with_targets(vec![])
        .with_failing(cpu)
        .with_series(
            expr(OsFamily::Linux, ExpressionKind::Uptime),
            vec![row(&[("instance", "h1"), ("pool", "edge")], 3600.0)],
        );
    let hosts = collect(&source).await;
    assert_eq!(hosts.len(), 1);
    let h1 = &hosts["h1"];
    assert_eq!(h1.cpu_percent, None);
    assert_eq!(h1.os_family, OsFamily::Unknown);
    assert_eq!(h1.job.as_deref(), Some("edge"));
    // the remaining expressions still ran
    assert_eq!(source.calls.borrow().len(), 1 + QUERY_PLAN.len());
}

#[tokio::test]
async fn failed_discovery_yields_empty_directory() {
    let source = FakeSource::default();
    assert!(discover_directory(&source).await.is_empty());
}

#[tokio::test]
async fn host_seen_by_both_families_keeps_first_job_and_last_family() {
    let source = FakeSource::default()
        .with_targets(vec![])
        .with_series(
            expr(OsFamily::Linux, ExpressionKind::CpuUtilization),
            vec![row(&[("instance", "dual"), ("job", "linux-pool")], 5.0)],
        )
        .with_series(
            expr(OsFamily::Windows, ExpressionKind::CpuUtilization),
            vec![row(&[("instance", "dual"), ("job", "windows-pool")], 7.0)],
        );
    let hosts = collect(&source).await;
    let dual = &hosts["dual"];
    assert_eq!(dual.job.as_deref(), Some("linux-pool"));
    assert_eq!(dual.os_family, OsFamily::Windows);
    assert_eq!(dual.cpu_percent, Some(7.0));
}

#[tokio::test]
async fn all_fetches_failing_renders_only_header_and_divider() {
    let hosts = collect(&DownSource).await;
    assert!(hosts.is_empty());
    let out = render(&hosts, ts());
    assert_eq!(out.lines().count(), 3);
    assert!(out.ends_with(&"-".repeat(32)));
}
