use gridsearch_core::Pos;

use crate::searcher::{Algorithm, Frontier, SearchOutcome, Searcher};
use crate::traits::WeightedPather;

impl Searcher {
    /// Weighted shortest-path search from `start` to `end`.
    ///
    /// Entering a cell costs its weight. The frontier pops the globally
    /// cheapest entry, earliest insertion first among equals. A popped cell
    /// that is already finalized is skipped; otherwise it is finalized,
    /// reported visited, and its neighbors are relaxed.
    pub fn dijkstra<P: WeightedPather>(
        &mut self,
        pather: &P,
        start: Pos,
        end: Pos,
    ) -> SearchOutcome {
        let mut out = self.begin(Algorithm::Dijkstra, pather, start, end);
        let Some(si) = self.idx(start) else {
            return out;
        };

        let mut open = Frontier::default();
        self.dist[si] = 0;
        open.push(si, 0);

        let mut nbuf = std::mem::take(&mut self.nbuf);

        while let Some(current) = open.pop() {
            let ci = current.idx;
            if self.closed[ci] {
                continue;
            }
            self.closed[ci] = true;

            let cp = self.dims.pos(ci);
            if cp == end {
                out.found = true;
                break;
            }
            if cp != start {
                out.trace.push(cp);
            }

            let current_dist = self.dist[ci];
            nbuf.clear();
            pather.neighbors(cp, &mut nbuf);

            for &np in nbuf.iter() {
                let Some(ni) = self.idx(np) else {
                    continue;
                };
                let alt = current_dist + pather.cost(cp, np);
                if alt >= self.dist[ni] {
                    continue;
                }
                self.dist[ni] = alt;
                out.predecessors.improve(np, cp);
                open.push(ni, alt);
            }
        }

        self.nbuf = nbuf;
        out
    }
}
