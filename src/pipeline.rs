//! Per-view recomputation driven by triggers.
//!
//! Every trigger that needs a new graph (data load, brand change, threshold
//! change) hands out a [`BuildTicket`] stamped with a fresh [`Generation`].
//! The build itself may finish at any time; [`ViewPipeline::commit`] only
//! accepts the result of the most recent ticket, so a slow build can never
//! overwrite a newer one. Tickets also carry the [`ViewId`] of the pipeline
//! that issued them, so a build from another view is never applied even when
//! the counters happen to agree. Canvas changes reuse the committed graph and
//! only redo the layout.

use std::sync::atomic::{AtomicU64, Ordering};

use tracing::debug;

use crate::builder::build_graph;
use crate::catalog::NoteCatalog;
use crate::config::{LayoutConfig, ThresholdConfig};
use crate::ir::{FormulationRecord, Graph};
use crate::layout::{Layout, LayoutError, SlotTable, compute_slots, layout_with_slots};

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Generation(u64);

impl Generation {
    pub fn value(self) -> u64 {
        self.0
    }
}

static NEXT_VIEW: AtomicU64 = AtomicU64::new(1);

/// Identity of one [`ViewPipeline`], unique within the process.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ViewId(u64);

impl ViewId {
    fn next() -> Self {
        ViewId(NEXT_VIEW.fetch_add(1, Ordering::Relaxed))
    }

    pub fn value(self) -> u64 {
        self.0
    }
}

/// Parameters captured when a build was requested.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BuildTicket {
    pub view: ViewId,
    pub generation: Generation,
    pub brand: Option<String>,
    pub threshold: u32,
}

impl BuildTicket {
    pub fn build(&self, records: &[FormulationRecord]) -> BuiltGraph {
        BuiltGraph {
            view: self.view,
            generation: self.generation,
            graph: build_graph(records, self.brand.as_deref(), self.threshold),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct BuiltGraph {
    pub view: ViewId,
    pub generation: Generation,
    pub graph: Graph,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CommitOutcome {
    Applied,
    Stale { generation: Generation, latest: Generation },
    /// The build was requested by a different pipeline.
    ForeignView { view: ViewId, expected: ViewId },
}

/// Not `Clone`: a copy would share the view id and accept the original's builds.
#[derive(Debug)]
pub struct ViewPipeline {
    view: ViewId,
    brand: Option<String>,
    threshold: u32,
    config: LayoutConfig,
    issued: u64,
    graph: Graph,
    committed: Option<Generation>,
    slots: SlotTable,
    layout: Layout,
}

impl ViewPipeline {
    pub fn new(
        brand: Option<&str>,
        thresholds: &ThresholdConfig,
        width: f64,
        height: f64,
        config: LayoutConfig,
    ) -> Result<Self, LayoutError> {
        let slots = compute_slots(NoteCatalog::global().sorted_order(), width, height, &config)?;
        Ok(Self {
            view: ViewId::next(),
            brand: brand.map(str::to_string),
            threshold: thresholds.threshold_for(brand),
            config,
            issued: 0,
            graph: Graph::new(),
            committed: None,
            layout: Layout::empty(width, height),
            slots,
        })
    }

    pub fn view(&self) -> ViewId {
        self.view
    }

    pub fn brand(&self) -> Option<&str> {
        self.brand.as_deref()
    }

    pub fn threshold(&self) -> u32 {
        self.threshold
    }

    pub fn graph(&self) -> &Graph {
        &self.graph
    }

    pub fn layout(&self) -> &Layout {
        &self.layout
    }

    pub fn committed_generation(&self) -> Option<Generation> {
        self.committed
    }

    pub fn latest_generation(&self) -> Option<Generation> {
        (self.issued > 0).then_some(Generation(self.issued))
    }

    /// Data (re)load trigger.
    pub fn request_build(&mut self) -> BuildTicket {
        self.issued += 1;
        BuildTicket {
            view: self.view,
            generation: Generation(self.issued),
            brand: self.brand.clone(),
            threshold: self.threshold,
        }
    }

    /// Switches the brand and its table threshold. The old brand's pending builds go stale.
    pub fn set_brand(&mut self, brand: Option<&str>, thresholds: &ThresholdConfig) -> BuildTicket {
        self.brand = brand.map(str::to_string);
        self.threshold = thresholds.threshold_for(brand);
        self.request_build()
    }

    pub fn set_threshold(&mut self, threshold: u32) -> BuildTicket {
        self.threshold = threshold;
        self.request_build()
    }

    /// Stores a finished build if it belongs to the latest ticket, then relays it out.
    pub fn commit(&mut self, built: BuiltGraph) -> Result<CommitOutcome, LayoutError> {
        if built.view != self.view {
            debug!(
                view = built.view.value(),
                expected = self.view.value(),
                "discarding graph built for another view"
            );
            return Ok(CommitOutcome::ForeignView {
                view: built.view,
                expected: self.view,
            });
        }
        let latest = Generation(self.issued);
        if built.generation != latest {
            debug!(
                generation = built.generation.value(),
                latest = latest.value(),
                "discarding stale graph build"
            );
            return Ok(CommitOutcome::Stale {
                generation: built.generation,
                latest,
            });
        }
        self.layout = layout_with_slots(&built.graph, &self.slots)?;
        self.graph = built.graph;
        self.committed = Some(built.generation);
        Ok(CommitOutcome::Applied)
    }

    /// Synchronous load: request, build and commit in one go.
    pub fn refresh(&mut self, records: &[FormulationRecord]) -> Result<CommitOutcome, LayoutError> {
        let ticket = self.request_build();
        self.commit(ticket.build(records))
    }

    /// Canvas dimension trigger. Slots move, the graph stays.
    pub fn resize(&mut self, width: f64, height: f64) -> Result<(), LayoutError> {
        let slots = compute_slots(NoteCatalog::global().sorted_order(), width, height, &self.config)?;
        self.layout = layout_with_slots(&self.graph, &slots)?;
        self.slots = slots;
        Ok(())
    }
}
