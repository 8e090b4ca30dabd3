//! Rendering of the pipeline as a diagram

use crate::pipeline::PipelineNode;

/// Ordered description of a pipeline's nodes
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PipelineGraph {
    nodes: Vec<(PipelineNode, String)>,
}

impl PipelineGraph {
    /// Create a graph from `(node, display name)` pairs in execution order
    pub fn new(nodes: Vec<(PipelineNode, String)>) -> Self {
        Self { nodes }
    }

    pub fn nodes(&self) -> &[(PipelineNode, String)] {
        &self.nodes
    }

    /// Plain-text rendering, one box per node
    pub fn to_ascii(&self) -> String {
        let width = self
            .nodes
            .iter()
            .map(|(_, name)| name.chars().count())
            .max()
            .unwrap_or(0)
            + 4;
        let border = format!("+{}+", "-".repeat(width));
        let mut out = String::new();

        for (i, (node, name)) in self.nodes.iter().enumerate() {
            if i > 0 {
                out.push_str(&format!("{:^w$}\n", "|", w = width + 2));
                out.push_str(&format!("{:^w$}\n", "v", w = width + 2));
            }
            out.push_str(&border);
            out.push('\n');
            out.push_str(&format!("|{name:^width$}|\n"));
            out.push_str(&border);
            out.push('\n');

            if let Some(label) = node.edge_label().filter(|_| i + 1 < self.nodes.len()) {
                out.push_str(&format!("{:^w$}\n", format!("({label})"), w = width + 2));
            }
        }

        out
    }

    /// Mermaid flowchart rendering
    pub fn to_mermaid(&self) -> String {
        let mut out = String::from("flowchart TD\n");

        for pair in self.nodes.windows(2) {
            let (from, from_name) = &pair[0];
            let (to, to_name) = &pair[1];
            let arrow = from
                .edge_label()
                .map_or_else(|| " --> ".to_string(), |l| format!(" -->|{l}| "));
            out.push_str(&format!(
                "    {}{}{}\n",
                Self::mermaid_node(*from, from_name),
                arrow,
                Self::mermaid_node(*to, to_name),
            ));
        }

        out
    }

    fn mermaid_node(node: PipelineNode, name: &str) -> String {
        let id = format!("{node:?}");
        match node {
            PipelineNode::Start | PipelineNode::End => format!("{id}([{name}])"),
            _ => format!("{id}[{name}]"),
        }
    }
}
