use std::collections::HashMap;

/// Type of transposition table entry
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NodeType {
    Exact,      // Score inside the window
    LowerBound, // Failed high (score >= beta)
    UpperBound, // Failed low (score <= alpha)
}

impl NodeType {
    /// Bound kind of `score` searched with the window `(alpha, beta)`.
    pub fn classify(score: i32, alpha: i32, beta: i32) -> Self {
        if score <= alpha {
            NodeType::UpperBound
        } else if score >= beta {
            NodeType::LowerBound
        } else {
            NodeType::Exact
        }
    }
}

/// Transposition table entry
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TTEntry {
    pub depth: u32,
    pub score: i32,
    pub node_type: NodeType,
}

/// Position key -> searched value. Only meaningful within one root search.
#[derive(Debug, Default)]
pub struct TranspositionTable {
    table: HashMap<u64, TTEntry>,
}

impl TranspositionTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Score stored for `key` if it was searched at least `depth` deep and
    /// its bound settles the window `(alpha, beta)`.
    pub fn probe(&self, key: u64, depth: u32, alpha: i32, beta: i32) -> Option<i32> {
        let entry = self.table.get(&key)?;
        if entry.depth < depth {
            return None;
        }
        match entry.node_type {
            NodeType::Exact => Some(entry.score),
            NodeType::LowerBound if entry.score >= beta => Some(entry.score),
            NodeType::UpperBound if entry.score <= alpha => Some(entry.score),
            _ => None,
        }
    }

    /// Depth-preferred replacement: a shallower result never overwrites a
    /// deeper one.
    pub fn store(&mut self, key: u64, depth: u32, score: i32, node_type: NodeType) {
        let should_replace = self
            .table
            .get(&key)
            .map_or(true, |existing| depth >= existing.depth);

        if should_replace {
            self.table.insert(key, TTEntry { depth, score, node_type });
        }
    }

    pub fn clear(&mut self) {
        self.table.clear();
    }

    pub fn len(&self) -> usize {
        self.table.len()
    }

    pub fn is_empty(&self) -> bool {
        self.table.is_empty()
    }
}
