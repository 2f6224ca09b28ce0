//! Parallel rendering of many templates with one aggregate outcome
//!
//! Every request runs on its own scoped thread through
//! resolve → select dialect → render → write. The orchestrator joins every
//! thread it spawned, so it observes exactly one outcome per request.

use std::thread;

use tracing::debug;

use crate::output::OutputTarget;
use crate::renderer::{builtin, Dialect};
use crate::source::{SourceResolver, TemplateSource};
use crate::JobError;

/// One template to render
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderRequest {
    pub source: TemplateSource,
    pub replacement: String,
    /// `None` selects the builtin dialect
    pub find: Option<String>,
    pub emit_to_stream: bool,
}

impl RenderRequest {
    pub fn new(source: TemplateSource, replacement: impl Into<String>) -> Self {
        Self {
            source,
            replacement: replacement.into(),
            find: None,
            emit_to_stream: false,
        }
    }

    /// Use the user dialect with this find value
    pub fn with_find(mut self, find: impl Into<String>) -> Self {
        self.find = Some(find.into());
        self
    }

    /// Write to standard output instead of a derived file
    pub fn with_stream(mut self, emit_to_stream: bool) -> Self {
        self.emit_to_stream = emit_to_stream;
        self
    }
}

/// The terminal state of one job
#[derive(Debug)]
pub struct JobOutcome {
    pub source: TemplateSource,
    pub result: Result<OutputTarget, JobError>,
}

impl JobOutcome {
    pub fn is_success(&self) -> bool {
        self.result.is_ok()
    }
}

/// Outcomes of every job in a batch, in no particular order
#[derive(Debug, Default)]
pub struct BatchReport {
    pub outcomes: Vec<JobOutcome>,
}

impl BatchReport {
    /// True only if every job succeeded
    pub fn is_success(&self) -> bool {
        self.outcomes.iter().all(JobOutcome::is_success)
    }

    pub fn failures(&self) -> impl Iterator<Item = &JobOutcome> {
        self.outcomes.iter().filter(|o| !o.is_success())
    }

    pub fn len(&self) -> usize {
        self.outcomes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.outcomes.is_empty()
    }
}

/// Receives per-job status as each job finishes
///
/// Called from worker threads, so implementations must be `Sync`.
pub trait Reporter: Sync {
    fn job_succeeded(&self, source: &TemplateSource);
    fn job_failed(&self, source: &TemplateSource, error: &JobError);
}

/// Prints `[ink]` status lines: successes to stdout, failures to stderr
#[derive(Debug, Default, Clone, Copy)]
pub struct ConsoleReporter;

impl Reporter for ConsoleReporter {
    fn job_succeeded(&self, source: &TemplateSource) {
        println!("[ink] Template {} rendered successfully.", source);
    }

    fn job_failed(&self, source: &TemplateSource, error: &JobError) {
        eprintln!("[ink] ERROR: Failed to render template {}. {}", source, error);
    }
}

pub struct Orchestrator<R = ConsoleReporter> {
    resolver: SourceResolver,
    reporter: R,
}

impl Orchestrator<ConsoleReporter> {
    pub fn new(resolver: SourceResolver) -> Self {
        Self::with_reporter(resolver, ConsoleReporter)
    }
}

impl<R: Reporter> Orchestrator<R> {
    pub fn with_reporter(resolver: SourceResolver, reporter: R) -> Self {
        Self { resolver, reporter }
    }

    pub fn reporter(&self) -> &R {
        &self.reporter
    }

    /// Render every request in parallel and wait for all of them
    pub fn render_all(&self, requests: Vec<RenderRequest>) -> BatchReport {
        let (local, remote): (Vec<_>, Vec<_>) =
            requests.into_iter().partition(|r| !r.source.is_remote());
        debug!(local = local.len(), remote = remote.len(), "dispatching render jobs");

        let outcomes: Vec<JobOutcome> = thread::scope(|scope| {
            let jobs: Vec<_> = local
                .iter()
                .chain(remote.iter())
                .enumerate()
                .map(|(index, request)| {
                    let handle = thread::Builder::new()
                        .name(format!("ink-job-{}", index))
                        .spawn_scoped(scope, move || self.run_and_report(request));
                    (request, handle)
                })
                .collect();

            jobs.into_iter()
                .map(|(request, handle)| {
                    let result = match handle {
                        Ok(handle) => handle.join().unwrap_or_else(|_| {
                            let err = JobError::Panicked;
                            self.reporter.job_failed(&request.source, &err);
                            Err(err)
                        }),
                        Err(source) => {
                            let err = JobError::Spawn(source);
                            self.reporter.job_failed(&request.source, &err);
                            Err(err)
                        }
                    };
                    JobOutcome {
                        source: request.source.clone(),
                        result,
                    }
                })
                .collect()
        });

        BatchReport { outcomes }
    }

    fn run_and_report(&self, request: &RenderRequest) -> Result<OutputTarget, JobError> {
        let result = self.run_job(request);
        match &result {
            Ok(_) => {
                debug!(source = %request.source, "job succeeded");
                // a status line would corrupt streamed output
                if !request.emit_to_stream {
                    self.reporter.job_succeeded(&request.source);
                }
            }
            Err(err) => {
                debug!(source = %request.source, error = %err, "job failed");
                self.reporter.job_failed(&request.source, err);
            }
        }
        result
    }

    /// Run one job start to finish on the calling thread
    pub fn run_job(&self, request: &RenderRequest) -> Result<OutputTarget, JobError> {
        let acquired = self.resolver.resolve(&request.source)?;
        let dialect = Dialect::select(request.find.as_deref())?;

        let rendered = match &dialect {
            Dialect::Builtin => builtin::render_builtin(&acquired.text, &request.replacement)
                .map_err(|err| JobError::from_builtin(&request.source, err))?,
            Dialect::User(pattern) => pattern.apply(&acquired.text, &request.replacement),
        };

        let target = OutputTarget::for_source(&request.source, request.emit_to_stream)?;
        target.write(&rendered)?;
        Ok(target)
    }
}
