// * Disjoint-Set Clusterer
// * Union by rank with path compression over flat parent/rank arrays addressed by document index

use std::collections::HashMap;

/// Union-Find forest over `[0, len)`
///
/// Created fresh for every run and discarded once clusters are read off.
#[derive(Debug, Clone)]
pub struct DisjointSet {
    parent: Vec<usize>,
    rank: Vec<u32>,
}

impl DisjointSet {
    /// Forest of `len` singleton sets
    pub fn new(len: usize) -> Self {
        Self {
            parent: (0..len).collect(),
            rank: vec![0; len],
        }
    }

    /// Forest with every pair already unioned
    pub fn from_pairs<I>(len: usize, pairs: I) -> Self
    where
        I: IntoIterator<Item = (usize, usize)>,
    {
        let mut forest = Self::new(len);
        for (a, b) in pairs {
            forest.union(a, b);
        }
        forest
    }

    pub fn len(&self) -> usize {
        self.parent.len()
    }

    pub fn is_empty(&self) -> bool {
        self.parent.is_empty()
    }

    /// Root of `x`, rewriting every visited node to point at it
    ///
    /// # Panics
    /// If `x >= self.len()`; the forest must be sized before use.
    pub fn find(&mut self, x: usize) -> usize {
        let parent = self.parent[x];
        if parent == x {
            return x;
        }
        let root = self.find(parent);
        self.parent[x] = root;
        root
    }

    /// Merges the sets holding `x` and `y`; returns false if they were already joined
    ///
    /// The lower-rank root goes under the higher-rank one. On a tie `y`'s root goes
    /// under `x`'s root and that root's rank grows by one.
    ///
    /// # Panics
    /// If either index is out of range.
    pub fn union(&mut self, x: usize, y: usize) -> bool {
        let root_x = self.find(x);
        let root_y = self.find(y);
        if root_x == root_y {
            return false;
        }

        match self.rank[root_x].cmp(&self.rank[root_y]) {
            std::cmp::Ordering::Greater => self.parent[root_y] = root_x,
            std::cmp::Ordering::Less => self.parent[root_x] = root_y,
            std::cmp::Ordering::Equal => {
                self.parent[root_y] = root_x;
                self.rank[root_x] += 1;
            }
        }
        true
    }

    pub fn connected(&mut self, x: usize, y: usize) -> bool {
        self.find(x) == self.find(y)
    }

    /// Groups every index by root
    ///
    /// Clusters appear in order of their smallest member, members in ascending order.
    pub fn clusters(&mut self) -> Vec<Vec<usize>> {
        let mut slots: HashMap<usize, usize> = HashMap::new();
        let mut clusters: Vec<Vec<usize>> = Vec::new();

        for index in 0..self.len() {
            let root = self.find(index);
            let slot = *slots.entry(root).or_insert_with(|| {
                clusters.push(Vec::new());
                clusters.len() - 1
            });
            clusters[slot].push(index);
        }

        clusters
    }

    /// Every index sharing `x`'s root, `x` included
    pub fn members_of(&mut self, x: usize) -> Vec<usize> {
        let root = self.find(x);
        (0..self.len()).filter(|&i| self.find(i) == root).collect()
    }
}
