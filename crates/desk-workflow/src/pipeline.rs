//! Pipeline definition and execution

use crate::graph::PipelineGraph;
use desk_core::{ConversationState, Error, ReportSlot, Result, Stage};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::Arc;
use tracing::{debug, info};

/// States of the pipeline state machine
///
/// `START -> RESEARCHER -> QUANT -> MANAGER -> END`, linear, no branches.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PipelineNode {
    Start,
    Researcher,
    Quant,
    Manager,
    End,
}

impl PipelineNode {
    /// Every node in execution order
    pub const SEQUENCE: [Self; 5] = [
        Self::Start,
        Self::Researcher,
        Self::Quant,
        Self::Manager,
        Self::End,
    ];

    /// The node that follows this one, `None` once `End` is reached
    pub fn next(self) -> Option<Self> {
        match self {
            Self::Start => Some(Self::Researcher),
            Self::Researcher => Some(Self::Quant),
            Self::Quant => Some(Self::Manager),
            Self::Manager => Some(Self::End),
            Self::End => None,
        }
    }

    /// Report slot the stage at this node must fill
    pub fn slot(self) -> Option<ReportSlot> {
        match self {
            Self::Researcher => Some(ReportSlot::Researcher),
            Self::Quant => Some(ReportSlot::Quant),
            Self::Manager => Some(ReportSlot::Risk),
            Self::Start | Self::End => None,
        }
    }

    /// Label of the edge leaving this node
    pub fn edge_label(self) -> Option<&'static str> {
        match self {
            Self::Start => Some("Ticker"),
            Self::Researcher => Some("Sentiment Analysis"),
            Self::Quant => Some("Technical Analysis"),
            Self::Manager => Some("Risk Calculation"),
            Self::End => None,
        }
    }
}

impl fmt::Display for PipelineNode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Self::Start => "START",
            Self::Researcher => "RESEARCHER",
            Self::Quant => "QUANT",
            Self::Manager => "MANAGER",
            Self::End => "END",
        };
        f.write_str(label)
    }
}

/// The advisory pipeline
///
/// Holds one stage per working node. A pipeline carries no per-request data,
/// so a single instance can run any number of independent conversations,
/// including concurrently from different threads.
///
/// # Example
///
/// ```ignore
/// use desk_workflow::Pipeline;
/// use std::sync::Arc;
///
/// let pipeline = Pipeline::builder()
///     .researcher(Arc::new(researcher))
///     .quant(Arc::new(quant))
///     .manager(Arc::new(manager))
///     .build()?;
///
/// let state = pipeline.run(ConversationState::new("Analyze TSLA for trading"))?;
/// ```
pub struct Pipeline {
    researcher: Arc<dyn Stage>,
    quant: Arc<dyn Stage>,
    manager: Arc<dyn Stage>,
}

impl Pipeline {
    /// Create a new pipeline builder
    pub fn builder() -> PipelineBuilder {
        PipelineBuilder::new()
    }

    /// Stage bound to a node, `None` for `Start` and `End`
    pub fn stage(&self, node: PipelineNode) -> Option<&Arc<dyn Stage>> {
        match node {
            PipelineNode::Researcher => Some(&self.researcher),
            PipelineNode::Quant => Some(&self.quant),
            PipelineNode::Manager => Some(&self.manager),
            PipelineNode::Start | PipelineNode::End => None,
        }
    }

    /// Run the state machine from `START` to `END`
    ///
    /// Each stage reads the current state and its output is folded in with
    /// [`ConversationState::apply`]. The first stage error aborts the run.
    pub fn run(&self, state: ConversationState) -> Result<ConversationState> {
        let mut state = state;
        let mut node = PipelineNode::Start;

        while let Some(next) = node.next() {
            debug!("Pipeline transition {} -> {}", node, next);

            if let Some(stage) = self.stage(next) {
                let output = stage.process(&state)?;
                if output.slot() != stage.slot() {
                    return Err(Error::ProcessingFailed(format!(
                        "stage {} wrote the {} report, expected {}",
                        stage.name(),
                        output.slot(),
                        stage.slot()
                    )));
                }
                state = state.apply(output)?;
                info!(
                    stage = stage.name(),
                    node = %next,
                    ticker = state.ticker().map_or("-", |t| t.as_str()),
                    "Stage completed"
                );
            }

            node = next;
        }

        Ok(state)
    }

    /// Describe the node sequence for rendering
    pub fn graph(&self) -> PipelineGraph {
        PipelineGraph::new(
            PipelineNode::SEQUENCE
                .iter()
                .map(|&node| {
                    let name = self
                        .stage(node)
                        .map_or_else(|| node.to_string(), |s| s.name().to_string());
                    (node, name)
                })
                .collect(),
        )
    }
}

/// Builder for constructing pipelines
#[derive(Default)]
pub struct PipelineBuilder {
    researcher: Option<Arc<dyn Stage>>,
    quant: Option<Arc<dyn Stage>>,
    manager: Option<Arc<dyn Stage>>,
}

impl PipelineBuilder {
    /// Create a new pipeline builder
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the stage for the `RESEARCHER` node
    pub fn researcher(mut self, stage: Arc<dyn Stage>) -> Self {
        self.researcher = Some(stage);
        self
    }

    /// Set the stage for the `QUANT` node
    pub fn quant(mut self, stage: Arc<dyn Stage>) -> Self {
        self.quant = Some(stage);
        self
    }

    /// Set the stage for the `MANAGER` node
    pub fn manager(mut self, stage: Arc<dyn Stage>) -> Self {
        self.manager = Some(stage);
        self
    }

    /// Build the pipeline
    ///
    /// Every node needs a stage, and each stage must fill the slot its node
    /// is responsible for.
    pub fn build(self) -> Result<Pipeline> {
        let researcher = Self::bind(self.researcher, PipelineNode::Researcher)?;
        let quant = Self::bind(self.quant, PipelineNode::Quant)?;
        let manager = Self::bind(self.manager, PipelineNode::Manager)?;

        Ok(Pipeline {
            researcher,
            quant,
            manager,
        })
    }

    fn bind(stage: Option<Arc<dyn Stage>>, node: PipelineNode) -> Result<Arc<dyn Stage>> {
        let stage = stage.ok_or_else(|| {
            Error::InitializationFailed(format!("no stage set for node {node}"))
        })?;

        if node.slot() != Some(stage.slot()) {
            return Err(Error::InitializationFailed(format!(
                "stage {} fills the {} report and cannot run at node {}",
                stage.name(),
                stage.slot(),
                node
            )));
        }

        Ok(stage)
    }
}
