//! Batch orchestration: one search per image, one result per input.
//!
//! Per-image failures (unreadable source, undecodable bytes, encode or
//! write errors) are turned into failed [`ReductionResult`]s here and never
//! escape. Only whole-call preconditions (budget, policy, empty batch) are
//! returned as `Err`.

use std::borrow::Cow;
use std::fs;
use std::path::{Path, PathBuf};

use tracing::{info, warn};

use crate::budget::SizeBudget;
use crate::codec::{Codec, JpegCodec};
use crate::error::{ReduceError, Result};
use crate::naming::{output_file_name, unique_output_file_names};
use crate::result::{ReducedOutput, ReductionReport, ReductionResult};
use crate::search::{search_encoding, SearchPolicy};

/// One input image.
#[derive(Debug, Clone, PartialEq)]
pub enum ImageSource {
    /// Bytes already in memory, with the name shown to the user.
    Memory { name: String, bytes: Vec<u8> },
    /// A file read when the item is processed.
    Path(PathBuf),
}

impl ImageSource {
    pub fn memory(name: impl Into<String>, bytes: Vec<u8>) -> Self {
        Self::Memory {
            name: name.into(),
            bytes,
        }
    }

    pub fn path(path: impl Into<PathBuf>) -> Self {
        Self::Path(path.into())
    }

    /// Name reported as `original_filename`.
    pub fn display_name(&self) -> String {
        match self {
            Self::Memory { name, .. } => name.clone(),
            Self::Path(path) => path
                .file_name()
                .map(|name| name.to_string_lossy().into_owned())
                .unwrap_or_else(|| path.display().to_string()),
        }
    }

    fn load(&self) -> Result<Cow<'_, [u8]>> {
        match self {
            Self::Memory { bytes, .. } => Ok(Cow::Borrowed(bytes)),
            Self::Path(path) => fs::read(path)
                .map(Cow::Owned)
                .map_err(|e| ReduceError::io(path, e)),
        }
    }
}

/// Destination for reduced bytes.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum OutputTarget {
    /// Return the bytes inside each result.
    #[default]
    Memory,
    /// Write `reduced_<stem>.jpg` files into this directory, creating it
    /// if needed.
    Directory(PathBuf),
}

/// Immutable reduction settings shared by every image of a call.
#[derive(Debug, Clone)]
pub struct Reducer<C = JpegCodec> {
    budget: SizeBudget,
    policy: SearchPolicy,
    output: OutputTarget,
    workers: usize,
    codec: C,
}

impl Reducer<JpegCodec> {
    /// Reducer with the default policy, in-memory output and the JPEG codec.
    ///
    /// # Errors
    ///
    /// `ReduceError::InvalidBudget` if `budget_mb` is not a positive number.
    pub fn new(budget_mb: f64) -> Result<Self> {
        Ok(Self {
            budget: SizeBudget::from_mb(budget_mb)?,
            policy: SearchPolicy::default(),
            output: OutputTarget::Memory,
            workers: 1,
            codec: JpegCodec,
        })
    }
}

impl<C: Codec> Reducer<C> {
    /// Replace the search policy after validating it.
    pub fn with_policy(mut self, policy: SearchPolicy) -> Result<Self> {
        policy.validate()?;
        self.policy = policy;
        Ok(self)
    }

    pub fn with_output(mut self, output: OutputTarget) -> Self {
        self.output = output;
        self
    }

    /// Number of threads used by [`reduce_many`](Self::reduce_many).
    /// Values below 1 are treated as 1.
    pub fn with_workers(mut self, workers: usize) -> Self {
        self.workers = workers.max(1);
        self
    }

    /// Swap the codec, keeping every other setting.
    pub fn with_codec<D: Codec>(self, codec: D) -> Reducer<D> {
        Reducer {
            budget: self.budget,
            policy: self.policy,
            output: self.output,
            workers: self.workers,
            codec,
        }
    }

    pub fn budget(&self) -> &SizeBudget {
        &self.budget
    }

    pub fn policy(&self) -> &SearchPolicy {
        &self.policy
    }

    /// Reduce one image. Failures are reported inside the result.
    pub fn reduce_one(&self, source: &ImageSource) -> ReductionResult {
        let name = source.display_name();
        let output_filename = output_file_name(&name);
        self.reduce_named(source, name, &output_filename)
    }

    /// Reduce every source, returning results in input order.
    ///
    /// Output names are unique within the call: inputs sharing a stem get
    /// their batch index appended (see [`unique_output_file_names`]).
    ///
    /// # Errors
    ///
    /// `ReduceError::EmptyBatch` when `sources` is empty. Nothing else
    /// fails the call.
    pub fn reduce_many(&self, sources: &[ImageSource]) -> Result<Vec<ReductionResult>> {
        if sources.is_empty() {
            return Err(ReduceError::EmptyBatch);
        }

        let names: Vec<String> = sources.iter().map(ImageSource::display_name).collect();
        let outputs = unique_output_file_names(&names);
        let jobs: Vec<Job<'_>> = sources
            .iter()
            .zip(names)
            .zip(outputs)
            .map(|((source, name), output)| Job {
                source,
                name,
                output,
            })
            .collect();

        let results = if self.workers <= 1 || jobs.len() == 1 {
            jobs.iter().map(|job| self.run(job)).collect()
        } else {
            self.reduce_parallel(&jobs)
        };

        let failed = results.iter().filter(|r| !r.is_success()).count();
        info!(total = results.len(), failed, "batch finished");
        Ok(results)
    }

    /// Split the batch into contiguous chunks, one thread each. Every
    /// thread fills the result slots of its own chunk, so output order is
    /// input order regardless of completion order.
    fn reduce_parallel(&self, jobs: &[Job<'_>]) -> Vec<ReductionResult> {
        let chunk = jobs.len().div_ceil(self.workers);
        let mut slots: Vec<Option<ReductionResult>> = vec![None; jobs.len()];

        std::thread::scope(|scope| {
            for (inputs, outputs) in jobs.chunks(chunk).zip(slots.chunks_mut(chunk)) {
                scope.spawn(move || {
                    for (job, slot) in inputs.iter().zip(outputs.iter_mut()) {
                        *slot = Some(self.run(job));
                    }
                });
            }
        });

        slots
            .into_iter()
            .zip(jobs)
            .map(|(slot, job)| {
                // the scope joins every worker, so each slot is filled
                slot.unwrap_or_else(|| {
                    ReductionResult::failed(job.name.clone(), "no result produced")
                })
            })
            .collect()
    }

    fn run(&self, job: &Job<'_>) -> ReductionResult {
        self.reduce_named(job.source, job.name.clone(), &job.output)
    }

    fn reduce_named(
        &self,
        source: &ImageSource,
        name: String,
        output_filename: &str,
    ) -> ReductionResult {
        let reduced = source
            .load()
            .and_then(|bytes| self.reduce_bytes(&bytes, output_filename));
        record(name, reduced)
    }

    fn reduce_bytes(&self, bytes: &[u8], output_filename: &str) -> Result<ReductionReport> {
        let image = self.codec.decode(bytes)?;
        let original_dimensions = image.dimensions();

        let mut outcome = search_encoding(&self.codec, image, &self.budget, &self.policy)?;
        let encoded = std::mem::take(&mut outcome.bytes);
        let final_size = encoded.len();
        let output = match &self.output {
            OutputTarget::Memory => ReducedOutput::Bytes(encoded),
            OutputTarget::Directory(dir) => {
                ReducedOutput::File(write_output(dir, output_filename, &encoded)?)
            }
        };

        Ok(ReductionReport::new(
            bytes.len(),
            original_dimensions,
            &outcome,
            final_size,
            output_filename.to_string(),
            output,
        ))
    }
}

/// One batch slot: the source plus its reported and output names.
struct Job<'a> {
    source: &'a ImageSource,
    name: String,
    output: String,
}

/// Turn a reduction attempt into its result record, logging either way.
fn record(name: String, reduced: Result<ReductionReport>) -> ReductionResult {
    match reduced {
        Ok(report) => {
            info!(
                file = %name,
                original_mb = report.original_size_mb,
                final_mb = report.final_size_mb,
                quality = report.quality_used,
                scale = report.scale_factor,
                within_budget = report.within_budget,
                "image reduced"
            );
            ReductionResult::reduced(name, report)
        }
        Err(e) => {
            warn!(file = %name, error = %e, "image reduction failed");
            ReductionResult::failed(name, e)
        }
    }
}

fn write_output(dir: &Path, file_name: &str, bytes: &[u8]) -> Result<PathBuf> {
    fs::create_dir_all(dir).map_err(|e| ReduceError::io(dir, e))?;
    let path = dir.join(file_name);
    fs::write(&path, bytes).map_err(|e| ReduceError::io(&path, e))?;
    Ok(path)
}

/// Reduce one in-memory image with the default policy.
///
/// # Errors
///
/// Only `ReduceError::InvalidBudget`; decode and encode failures come back
/// as a failed result.
pub fn reduce_one(bytes: &[u8], display_name: &str, budget_mb: f64) -> Result<ReductionResult> {
    let reducer = Reducer::new(budget_mb)?;
    let reduced = reducer.reduce_bytes(bytes, &output_file_name(display_name));
    Ok(record(display_name.to_string(), reduced))
}

/// Reduce many in-memory images with the default policy, in input order.
///
/// # Errors
///
/// `ReduceError::InvalidBudget` or `ReduceError::EmptyBatch`; nothing is
/// processed in either case.
pub fn reduce_many<I, S>(images: I, budget_mb: f64) -> Result<Vec<ReductionResult>>
where
    I: IntoIterator<Item = (Vec<u8>, S)>,
    S: Into<String>,
{
    let reducer = Reducer::new(budget_mb)?;
    let sources: Vec<ImageSource> = images
        .into_iter()
        .map(|(bytes, name)| ImageSource::memory(name, bytes))
        .collect();
    reducer.reduce_many(&sources)
}
