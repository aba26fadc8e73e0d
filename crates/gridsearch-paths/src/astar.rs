use gridsearch_core::Pos;

use crate::searcher::{Algorithm, Frontier, SearchOutcome, Searcher};
use crate::traits::AstarPather;

impl Searcher {
    /// Heuristic best-first (A*) search from `start` to `end`.
    ///
    /// Every move costs 1 regardless of cell weight; the frontier is
    /// ordered by `g + estimate`, earliest insertion first among equals.
    /// The returned path is optimal in hop count, not in total weight.
    /// Stale frontier entries of already expanded cells are skipped, so
    /// each cell appears in the trace at most once.
    pub fn astar<P: AstarPather>(&mut self, pather: &P, start: Pos, end: Pos) -> SearchOutcome {
        let mut out = self.begin(Algorithm::Astar, pather, start, end);
        let Some(si) = self.idx(start) else {
            return out;
        };

        // `dist` holds g-scores.
        let mut open = Frontier::default();
        self.dist[si] = 0;
        open.push(si, pather.estimate(start, end));

        let mut nbuf = std::mem::take(&mut self.nbuf);

        while let Some(current) = open.pop() {
            let ci = current.idx;

            // Skip stale entries.
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

            let current_g = self.dist[ci];
            nbuf.clear();
            pather.neighbors(cp, &mut nbuf);

            for &np in nbuf.iter() {
                let Some(ni) = self.idx(np) else {
                    continue;
                };
                let tentative_g = current_g + 1;
                if tentative_g >= self.dist[ni] {
                    continue;
                }
                self.dist[ni] = tentative_g;
                out.predecessors.improve(np, cp);
                open.push(ni, tentative_g + pather.estimate(np, end));
            }
        }

        self.nbuf = nbuf;
        out
    }
}

#[cfg(test)]
mod tests {
    use gridsearch_core::{Grid, Pos};

    use crate::Searcher;

    #[test]
    fn goes_straight_through_heavy_cells() {
        // Dijkstra detours along the bottom row; A* ignores weights.
        let g = Grid::parse(
            "
            S9E
            111",
        )
        .unwrap();
        let mut s = Searcher::new(g.dims());
        let out = s.astar(&g, Pos::new(0, 0), Pos::new(0, 2));
        assert!(out.found);
        assert_eq!(out.path(), vec![Pos::new(0, 1)]);
        assert_eq!(out.trace, vec![Pos::new(0, 1)]);
    }

    #[test]
    fn heuristic_focuses_the_search() {
        let g = Grid::uniform(5, 5, 1);
        let mut s = Searcher::new(g.dims());
        let astar = s.astar(&g, Pos::new(2, 0), Pos::new(2, 4));
        let bfs = s.bfs(&g, Pos::new(2, 0), Pos::new(2, 4));
        assert!(astar.found);
        assert_eq!(astar.path().len(), 3);
        assert_eq!(astar.trace, vec![Pos::new(2, 1), Pos::new(2, 2), Pos::new(2, 3)]);
        assert!(astar.trace.len() < bfs.trace.len());
    }

    #[test]
    fn detours_around_a_wall() {
        let g = Grid::parse(
            "
            .....
            S.#.E
            .....",
        )
        .unwrap();
        let mut s = Searcher::new(g.dims());
        let out = s.astar(&g, Pos::new(1, 0), Pos::new(1, 4));
        assert!(out.found);
        // Six moves around the wall: five cells between the endpoints.
        assert_eq!(out.path().len(), 5);
        // No cell is reported twice.
        let mut seen = out.trace.clone();
        seen.sort();
        seen.dedup();
        assert_eq!(seen.len(), out.trace.len());
    }
}
