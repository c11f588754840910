//! Pipeline orchestration engine
//!
//! This module provides the CoreEngine that drives a full analytics run by
//! coordinating the reader, filter chain, analytics modules and writer built
//! through the [`ComponentFactory`].
//!
//! The engine enforces the run's invariants:
//! - Stages run strictly in order (read -> filter -> analyze -> write)
//! - A failing stage is logged and skipped, never aborting the run
//! - Filters and analytics only ever see the output of the previous stage

use crate::config::{ComponentConfig, RunConfig};
use crate::core::factory::ComponentFactory;
use crate::core::registry::PluginRegistry;
use crate::types::{ComponentKind, PipelineError, ResultPayload, Transaction};
use tracing::{debug, error, info, warn};

/// Position of a run in its lifecycle
///
/// Runs only ever move forward through these states.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum RunStage {
    Init,
    ReaderReady,
    Filtered,
    Analyzed,
    Written,
    Done,
}

/// A stage failure recorded during a run
#[derive(Debug, Clone, PartialEq)]
pub struct StageFailure {
    /// Stage the failure happened in
    pub stage: RunStage,
    /// Type name or component name that failed
    pub component: String,
    /// The underlying error
    pub error: PipelineError,
}

/// Summary of a completed run
///
/// Lets callers tell "no transactions matched" apart from "the reader
/// failed" without inspecting logs.
#[derive(Debug, Clone, PartialEq)]
pub struct RunReport {
    /// Final stage reached (always `Done` after `run`)
    pub stage: RunStage,
    /// Transactions returned by the reader
    pub transactions_read: usize,
    /// Transactions left after the filter chain
    pub transactions_analyzed: usize,
    /// Payloads produced by analytics modules
    pub payloads_produced: usize,
    /// Payloads successfully delivered to the writer
    pub payloads_written: usize,
    /// Every failure encountered, in the order it happened
    pub failures: Vec<StageFailure>,
}

impl RunReport {
    /// Create an empty report positioned at `Init`
    pub fn new() -> Self {
        RunReport {
            stage: RunStage::Init,
            transactions_read: 0,
            transactions_analyzed: 0,
            payloads_produced: 0,
            payloads_written: 0,
            failures: Vec::new(),
        }
    }

    /// Whether every stage completed without a failure
    pub fn is_clean(&self) -> bool {
        self.failures.is_empty()
    }

    fn advance(&mut self, next: RunStage) {
        debug_assert!(next >= self.stage, "run stages never move backwards");
        debug!(from = ?self.stage, to = ?next, "Run stage transition");
        self.stage = next;
    }

    fn record(&mut self, stage: RunStage, component: &str, error: PipelineError) {
        self.failures.push(StageFailure {
            stage,
            component: component.to_string(),
            error,
        });
    }
}

impl Default for RunReport {
    fn default() -> Self {
        Self::new()
    }
}

/// Pipeline orchestration engine
///
/// Holds only the component factory. All run state lives in the values
/// passed between stages, so one engine can execute any number of
/// independent runs.
#[derive(Debug, Clone, Default)]
pub struct CoreEngine {
    factory: ComponentFactory,
}

impl CoreEngine {
    /// Create an engine using the built-in component registry
    pub fn new() -> Self {
        Self::with_registry(PluginRegistry::new())
    }

    /// Create an engine resolving components through `registry`
    pub fn with_registry(registry: PluginRegistry) -> Self {
        CoreEngine {
            factory: ComponentFactory::new(registry),
        }
    }

    pub fn factory(&self) -> &ComponentFactory {
        &self.factory
    }

    /// Execute a full run
    ///
    /// Never fails: every problem is logged and recorded in the returned
    /// report while the run continues with degraded data.
    pub fn run(&self, config: &RunConfig) -> RunReport {
        let mut report = RunReport::new();
        info!(
            data_source = %config.data_source.component_type,
            filters = config.filters.len(),
            analytics = config.analytics.len(),
            "Starting pipeline run"
        );

        let transactions = self.read_transactions(&config.data_source, &mut report);
        report.transactions_read = transactions.len();
        report.advance(RunStage::ReaderReady);

        let filtered = self.apply_filters(transactions, &config.filters, &mut report);
        report.transactions_analyzed = filtered.len();
        report.advance(RunStage::Filtered);

        let payloads = self.run_analytics(&filtered, &config.analytics, &mut report);
        report.payloads_produced = payloads.len();
        report.advance(RunStage::Analyzed);

        match &config.output {
            Some(output) => {
                report.payloads_written = self.dispatch(&payloads, output, &mut report);
            }
            None => warn!(
                payloads = payloads.len(),
                "No output configured; analytics results are discarded"
            ),
        }
        report.advance(RunStage::Written);

        report.advance(RunStage::Done);
        info!(
            read = report.transactions_read,
            analyzed = report.transactions_analyzed,
            produced = report.payloads_produced,
            written = report.payloads_written,
            failures = report.failures.len(),
            "Pipeline run finished"
        );
        report
    }

    /// Build the reader and read the batch
    ///
    /// Any creation or read failure yields an empty transaction set.
    pub fn read_transactions(
        &self,
        source: &ComponentConfig,
        report: &mut RunReport,
    ) -> Vec<Transaction> {
        let mut reader = match self
            .factory
            .create_reader(&source.component_type, &source.options)
        {
            Ok(reader) => reader,
            Err(e) => {
                error!(error = %e, "Reader unavailable; continuing with no transactions");
                report.record(RunStage::Init, &source.component_type, e);
                return Vec::new();
            }
        };

        match reader.read_all() {
            Ok(transactions) => {
                info!(
                    reader = reader.name(),
                    count = transactions.len(),
                    "Read transactions"
                );
                transactions
            }
            Err(e) => {
                let e = PipelineError::stage_execution(ComponentKind::Reader, reader.name(), &e);
                error!(error = %e, "Read failed; continuing with no transactions");
                report.record(RunStage::Init, reader.name(), e);
                Vec::new()
            }
        }
    }

    /// Thread the transactions through each configured filter in order
    ///
    /// A filter that cannot be built or fails to apply is skipped and its
    /// input passes through unchanged.
    pub fn apply_filters(
        &self,
        transactions: Vec<Transaction>,
        filters: &[ComponentConfig],
        report: &mut RunReport,
    ) -> Vec<Transaction> {
        let mut current = transactions;

        for filter_config in filters {
            let filter = match self
                .factory
                .create_filter(&filter_config.component_type, &filter_config.options)
            {
                Ok(filter) => filter,
                Err(e) => {
                    warn!(error = %e, "Skipping unavailable filter");
                    report.record(RunStage::ReaderReady, &filter_config.component_type, e);
                    continue;
                }
            };

            match filter.apply(&current) {
                Ok(kept) => {
                    info!(
                        filter = filter.name(),
                        remaining = kept.len(),
                        removed = current.len().saturating_sub(kept.len()),
                        "Applied filter"
                    );
                    current = kept;
                }
                Err(e) => {
                    let e =
                        PipelineError::stage_execution(ComponentKind::Filter, filter.name(), &e);
                    warn!(error = %e, "Filter failed; passing input through unchanged");
                    report.record(RunStage::ReaderReady, filter.name(), e);
                }
            }
        }

        current
    }

    /// Run each configured analytics module over the filtered set
    ///
    /// Modules that cannot be built are left out. A module whose analysis
    /// fails produces an error payload so writers can tell it apart from an
    /// empty result.
    pub fn run_analytics(
        &self,
        transactions: &[Transaction],
        analytics: &[ComponentConfig],
        report: &mut RunReport,
    ) -> Vec<ResultPayload> {
        let mut payloads = Vec::with_capacity(analytics.len());

        for analytics_config in analytics {
            let module = match self
                .factory
                .create_analytics(&analytics_config.component_type, &analytics_config.options)
            {
                Ok(module) => module,
                Err(e) => {
                    warn!(error = %e, "Skipping unavailable analytics module");
                    report.record(RunStage::Filtered, &analytics_config.component_type, e);
                    continue;
                }
            };

            match module.analyze(transactions) {
                Ok(result) => {
                    debug!(
                        module = module.name(),
                        keys = result.len(),
                        "Analytics completed"
                    );
                    payloads.push(ResultPayload::success(module.name(), result));
                }
                Err(e) => {
                    let e =
                        PipelineError::stage_execution(ComponentKind::Analytics, module.name(), &e);
                    warn!(error = %e, "Analytics module failed");
                    payloads.push(ResultPayload::failure(module.name(), e.to_string()));
                    report.record(RunStage::Filtered, module.name(), e);
                }
            }
        }

        payloads
    }

    /// Build the writer once and deliver every payload in order
    ///
    /// Returns the number of payloads written. A failed write is logged and
    /// does not stop the remaining payloads.
    pub fn dispatch(
        &self,
        payloads: &[ResultPayload],
        output: &ComponentConfig,
        report: &mut RunReport,
    ) -> usize {
        let mut writer = match self
            .factory
            .create_writer(&output.component_type, &output.options)
        {
            Ok(writer) => writer,
            Err(e) => {
                error!(error = %e, "Writer unavailable; no results will be written");
                report.record(RunStage::Analyzed, &output.component_type, e);
                return 0;
            }
        };

        let mut written = 0;
        for payload in payloads {
            match writer.write(payload) {
                Ok(()) => written += 1,
                Err(e) => {
                    let e =
                        PipelineError::stage_execution(ComponentKind::Writer, writer.name(), &e);
                    warn!(module = %payload.module, error = %e, "Failed to write payload");
                    report.record(RunStage::Analyzed, writer.name(), e);
                }
            }
        }

        info!(
            writer = writer.name(),
            written,
            total = payloads.len(),
            "Wrote analytics payloads"
        );
        written
    }
}
