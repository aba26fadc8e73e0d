use std::collections::VecDeque;

use gridsearch_core::Pos;

use crate::searcher::{Algorithm, SearchOutcome, Searcher};
use crate::traits::Pather;

impl Searcher {
    /// Breadth-first search from `start` to `end`.
    ///
    /// Each step has cost 1 and weights are ignored. Cells are visited in
    /// non-decreasing hop count; among equal counts, in discovery order.
    /// The returned path has the minimum possible number of hops.
    pub fn bfs<P: Pather>(&mut self, pather: &P, start: Pos, end: Pos) -> SearchOutcome {
        let mut out = self.begin(Algorithm::Bfs, pather, start, end);
        let Some(si) = self.idx(start) else {
            return out;
        };

        let mut queue: VecDeque<Pos> = VecDeque::new();
        self.closed[si] = true;
        queue.push_back(start);

        let mut nbuf = std::mem::take(&mut self.nbuf);

        while let Some(cp) = queue.pop_front() {
            if cp == end {
                out.found = true;
                break;
            }
            if cp != start {
                out.trace.push(cp);
            }

            nbuf.clear();
            pather.neighbors(cp, &mut nbuf);

            for &np in nbuf.iter() {
                let Some(ni) = self.idx(np) else {
                    continue;
                };
                if self.closed[ni] {
                    continue;
                }
                self.closed[ni] = true;
                queue.push_back(np);
                out.predecessors.discover(np, cp);
            }
        }

        self.nbuf = nbuf;
        out
    }
}
