//! The program state graph.
//!
//! Each node is a reachable (block, DP, CC) state; each edge carries the
//! command executed on the transition. Control-flow cycles are edges
//! between dense integer ids, never owning references. Pointer and Switch
//! pick their DP/CC outcome from runtime stack state, so the builder
//! conservatively fans out one edge per possible outcome.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::block::BlockMap;
use crate::color::Color;
use crate::command::Command;
use crate::direction::{CodelChooser, Direction};
use crate::grid::Grid;
use crate::movement::next_transition;

/// An outgoing transition: target node id plus the command to execute.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct StateEdge {
    pub target: usize,
    pub command: Command,
}

/// One program state: a block together with the DP/CC it was entered with.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StateNode {
    /// Dense node id; node 0 is the entry state.
    pub id: usize,
    pub block: usize,
    /// Codel count of the block, the operand of Push.
    pub block_size: usize,
    pub dp: Direction,
    pub cc: CodelChooser,
    pub transitions: Vec<StateEdge>,
}

/// The reachable state space of a program.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct StateGraph {
    nodes: Vec<StateNode>,
}

impl StateGraph {
    /// Explore every state reachable from (block containing (0,0), Right,
    /// Left). The graph is empty when the grid is empty or the top-left
    /// codel is white or black; such a program never starts.
    pub fn build(grid: &Grid) -> StateGraph {
        let blocks = BlockMap::build(grid);
        let mut graph = StateGraph::default();
        if grid.is_empty() || matches!(grid.get((0, 0)), Color::White | Color::Black) {
            return graph;
        }

        let mut interned: HashMap<(usize, Direction, CodelChooser), usize> = HashMap::new();
        let mut worklist: Vec<usize> = Vec::new();

        let entry_block = blocks.id_at((0, 0));
        graph.intern(
            &blocks,
            &mut interned,
            &mut worklist,
            entry_block,
            Direction::Right,
            CodelChooser::Left,
        );

        while let Some(id) = worklist.pop() {
            let (block, dp, cc) = {
                let node = &graph.nodes[id];
                (node.block, node.dp, node.cc)
            };
            let Some(t) = next_transition(grid, &blocks, block, dp, cc) else {
                continue;
            };

            let outcomes: Vec<(Direction, CodelChooser)> = match t.command {
                Command::Pointer => (0..4).map(|i| (t.dp.rotate(i), t.cc)).collect(),
                Command::Switch => vec![(t.dp, t.cc), (t.dp, t.cc.toggle())],
                _ => vec![(t.dp, t.cc)],
            };

            for (dp, cc) in outcomes {
                let target =
                    graph.intern(&blocks, &mut interned, &mut worklist, t.block, dp, cc);
                graph.nodes[id].transitions.push(StateEdge {
                    target,
                    command: t.command,
                });
            }
        }

        graph
    }

    /// Look up the node for a state, creating and enqueueing it on first
    /// sight. Interning keeps the state space finite: at most
    /// |blocks| × 4 × 2 nodes exist.
    fn intern(
        &mut self,
        blocks: &BlockMap,
        interned: &mut HashMap<(usize, Direction, CodelChooser), usize>,
        worklist: &mut Vec<usize>,
        block: usize,
        dp: Direction,
        cc: CodelChooser,
    ) -> usize {
        *interned.entry((block, dp, cc)).or_insert_with(|| {
            let id = self.nodes.len();
            self.nodes.push(StateNode {
                id,
                block,
                block_size: blocks.get(block).size(),
                dp,
                cc,
                transitions: Vec::new(),
            });
            worklist.push(id);
            id
        })
    }

    pub fn nodes(&self) -> &[StateNode] {
        &self.nodes
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }
}
