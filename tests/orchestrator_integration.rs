//! Integration tests for parallel batch rendering

use std::collections::BTreeSet;
use std::fs;
use std::path::Path;
use std::sync::Mutex;

use ink_template::{
    JobError, Orchestrator, OutputTarget, RemoteSettings, RenderRequest, Reporter, SourceResolver,
    TemplateSource,
};
use pretty_assertions::assert_eq;

/// Records status callbacks instead of printing them
#[derive(Default)]
struct RecordingReporter {
    succeeded: Mutex<Vec<String>>,
    failed: Mutex<Vec<String>>,
}

impl Reporter for RecordingReporter {
    fn job_succeeded(&self, source: &TemplateSource) {
        self.succeeded.lock().unwrap().push(source.to_string());
    }

    fn job_failed(&self, source: &TemplateSource, _error: &JobError) {
        self.failed.lock().unwrap().push(source.to_string());
    }
}

fn recording_orchestrator() -> Orchestrator<RecordingReporter> {
    let resolver = SourceResolver::new(&RemoteSettings::default()).expect("Should build client");
    Orchestrator::with_reporter(resolver, RecordingReporter::default())
}

fn write_template(dir: &Path, name: &str, body: &str) -> TemplateSource {
    let path = dir.join(name);
    fs::write(&path, body).unwrap();
    TemplateSource::Local(path)
}

#[test]
fn test_one_failure_fails_batch_but_not_siblings() {
    let dir = tempfile::tempdir().unwrap();
    let mut requests: Vec<RenderRequest> = (0..4)
        .map(|i| {
            let source = write_template(dir.path(), &format!("t{}.txt.in", i), "v={{ .One }}");
            RenderRequest::new(source, "1.0")
        })
        .collect();
    requests.push(RenderRequest::new(
        TemplateSource::Local(dir.path().join("missing.txt.in")),
        "1.0",
    ));

    let orchestrator = recording_orchestrator();
    let report = orchestrator.render_all(requests);

    assert!(!report.is_success());
    assert_eq!(report.len(), 5);
    assert_eq!(report.failures().count(), 1);
    for i in 0..4 {
        let output = dir.path().join(format!("t{}.txt", i));
        assert_eq!(fs::read_to_string(output).unwrap(), "v=1.0");
    }

    let reporter = orchestrator.reporter();
    assert_eq!(reporter.succeeded.lock().unwrap().len(), 4);
    let failed = reporter.failed.lock().unwrap();
    assert_eq!(failed.len(), 1);
    assert!(failed[0].ends_with("missing.txt.in"));
}

#[test]
fn test_concurrent_jobs_keep_their_own_replacement() {
    let dir = tempfile::tempdir().unwrap();
    let requests: Vec<RenderRequest> = (0..32)
        .map(|i| {
            let source = write_template(
                dir.path(),
                &format!("job{}.txt.in", i),
                "{{ .One }}|{{ ink }}|{{ .Ten }}",
            );
            RenderRequest::new(source, format!("r{}", i))
        })
        .collect();

    let report = recording_orchestrator().render_all(requests);

    assert!(report.is_success());
    assert_eq!(report.len(), 32);
    for i in 0..32 {
        let output = dir.path().join(format!("job{}.txt", i));
        let expected = format!("r{i}|r{i}|r{i}");
        assert_eq!(fs::read_to_string(output).unwrap(), expected);
    }
}

#[test]
fn test_exactly_one_outcome_per_request() {
    let dir = tempfile::tempdir().unwrap();
    let good = write_template(dir.path(), "good.txt.in", "{{ ink }}");
    let bad_syntax = write_template(dir.path(), "bad.txt.in", "{{ ink");
    let unbound = write_template(dir.path(), "unbound.txt.in", "{{ shout }}");

    let requests = vec![
        RenderRequest::new(good.clone(), "x"),
        RenderRequest::new(bad_syntax.clone(), "x"),
        RenderRequest::new(unbound.clone(), "x"),
    ];
    let report = recording_orchestrator().render_all(requests);

    let seen: BTreeSet<String> = report.outcomes.iter().map(|o| o.source.to_string()).collect();
    let expected: BTreeSet<String> = [&good, &bad_syntax, &unbound]
        .iter()
        .map(|s| s.to_string())
        .collect();
    assert_eq!(seen, expected);
    assert_eq!(report.failures().count(), 2);
}

#[test]
fn test_mixed_dialects_in_one_batch() {
    let dir = tempfile::tempdir().unwrap();
    let builtin = write_template(dir.path(), "a.txt.in", "{{ .Ink }}");
    let user = write_template(dir.path(), "b.txt.in", "VERSION");

    let requests = vec![
        RenderRequest::new(builtin, "2.0"),
        RenderRequest::new(user, "2.0").with_find("VERSION"),
    ];
    let report = recording_orchestrator().render_all(requests);

    assert!(report.is_success());
    assert_eq!(fs::read_to_string(dir.path().join("a.txt")).unwrap(), "2.0");
    assert_eq!(fs::read_to_string(dir.path().join("b.txt")).unwrap(), "2.0");
}

#[test]
fn test_streamed_jobs_report_no_success_lines() {
    let dir = tempfile::tempdir().unwrap();
    let source = write_template(dir.path(), "s.txt.in", "{{ ink }}\n");

    let orchestrator = recording_orchestrator();
    let report = orchestrator.render_all(vec![RenderRequest::new(source, "out").with_stream(true)]);

    assert!(report.is_success());
    assert!(matches!(report.outcomes[0].result, Ok(OutputTarget::Stream)));
    assert!(orchestrator.reporter().succeeded.lock().unwrap().is_empty());
    assert!(!dir.path().join("s.txt").exists());
}

#[test]
fn test_local_and_remote_jobs_together() {
    let mut server = mockito::Server::new();
    let mock = server
        .mock("GET", "/r.txt.in")
        .with_status(200)
        .with_body("{{ .Two }}")
        .create();

    let dir = tempfile::tempdir().unwrap();
    let local = write_template(dir.path(), "l.txt.in", "{{ .Three }}");
    let remote = TemplateSource::classify(&format!("{}/r.txt.in", server.url()));

    let requests = vec![
        RenderRequest::new(remote, "z").with_stream(true),
        RenderRequest::new(local, "z"),
    ];
    let report = recording_orchestrator().render_all(requests);

    mock.assert();
    assert!(report.is_success());
    assert_eq!(fs::read_to_string(dir.path().join("l.txt")).unwrap(), "z");
}

#[test]
fn test_empty_batch_succeeds() {
    let report = recording_orchestrator().render_all(Vec::new());
    assert!(report.is_success());
    assert!(report.is_empty());
}
