extern crate dot;

use std::io;
use std::io::Write;

use crate::formula::Formula;

/// Flattened view of a formula tree for GraphViz output.
///
/// Nodes are numbered in preorder, so structurally equal subtrees at different
/// positions remain separate nodes.
pub struct FormulaTree<'a> {
    pub nodes: Vec<&'a Formula>,
    edges: Vec<GraphEdge>,
}

type GraphNode = usize;
type GraphEdge = (usize, &'static str, usize);

impl<'a> FormulaTree<'a> {
    pub fn new(root: &'a Formula) -> Self {
        let mut tree = Self {
            nodes: Vec::new(),
            edges: Vec::new(),
        };
        tree.visit(root);
        tree
    }

    pub fn render_dot<W: Write>(&self, writer: &mut W) -> io::Result<()> {
        dot::render(self, writer)
    }

    fn visit(&mut self, node: &'a Formula) -> GraphNode {
        let id = self.nodes.len();
        self.nodes.push(node);

        match node {
            Formula::Atom(_) => {}
            Formula::Not(f) => {
                let child = self.visit(f);
                self.edges.push((id, "", child));
            }
            Formula::BinaryOp(_, l, r) => {
                let left = self.visit(l);
                self.edges.push((id, "L", left));
                let right = self.visit(r);
                self.edges.push((id, "R", right));
            }
        }

        id
    }
}

impl<'a> dot::Labeller<'a, GraphNode, GraphEdge> for FormulaTree<'_> {
    fn graph_id(&self) -> dot::Id<'a> {
        dot::Id::new("parse_tree").expect("cannot create Id named 'parse_tree'")
    }

    fn node_id(&self, n: &GraphNode) -> dot::Id<'a> {
        dot::Id::new(format!("n_{}", n))
            .unwrap_or_else(|_| panic!("cannot create Id named 'n_{n}'"))
    }

    fn node_label(&self, n: &GraphNode) -> dot::LabelText<'a> {
        match self.nodes[*n] {
            Formula::BinaryOp(op, _, _) => dot::LabelText::label(format!("{:?}", op)),
            Formula::Not(_) => dot::LabelText::label("Not".to_string()),
            Formula::Atom(v) => dot::LabelText::label(format!("Atom {}", v)),
        }
    }

    fn edge_label(&self, e: &GraphEdge) -> dot::LabelText<'a> {
        dot::LabelText::label(e.1)
    }
}

impl<'a> dot::GraphWalk<'a, GraphNode, GraphEdge> for FormulaTree<'_> {
    fn nodes(&self) -> dot::Nodes<'a, GraphNode> {
        (0..self.nodes.len()).collect()
    }

    fn edges(&self) -> dot::Edges<'a, GraphEdge> {
        self.edges.clone().into()
    }

    fn source(&self, e: &GraphEdge) -> GraphNode {
        e.0
    }

    fn target(&self, e: &GraphEdge) -> GraphNode {
        e.2
    }
}
