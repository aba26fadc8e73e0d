use gridsearch_core::Pos;

use crate::searcher::{Algorithm, SearchOutcome, Searcher};
use crate::traits::Pather;

impl Searcher {
    /// Depth-first search from `start` to `end`.
    ///
    /// Descends into the first unvisited neighbor in priority order and
    /// backtracks on dead ends. The first path that reaches `end` is
    /// accepted; it is not necessarily the shortest.
    ///
    /// The descent uses an explicit stack of `(cell, next neighbor slot)`
    /// frames, so deep corridors cannot exhaust the call stack.
    pub fn dfs<P: Pather>(&mut self, pather: &P, start: Pos, end: Pos) -> SearchOutcome {
        let mut out = self.begin(Algorithm::Dfs, pather, start, end);
        let Some(si) = self.idx(start) else {
            return out;
        };
        if start == end {
            out.found = true;
            return out;
        }

        self.closed[si] = true;
        let mut stack: Vec<(Pos, usize)> = vec![(start, 0)];
        let mut nbuf = std::mem::take(&mut self.nbuf);

        while let Some(frame) = stack.last_mut() {
            let (cp, slot) = *frame;
            nbuf.clear();
            pather.neighbors(cp, &mut nbuf);
            let Some(&np) = nbuf.get(slot) else {
                // Dead end: backtrack.
                stack.pop();
                continue;
            };
            frame.1 += 1;

            let Some(ni) = self.idx(np) else {
                continue;
            };
            if self.closed[ni] {
                continue;
            }
            out.predecessors.discover(np, cp);
            if np == end {
                out.found = true;
                break;
            }
            self.closed[ni] = true;
            out.trace.push(np);
            stack.push((np, 0));
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
    fn descends_east_first() {
        let g = Grid::parse(
            "
            S..
            ...
            ..E",
        )
        .unwrap();
        let mut s = Searcher::new(g.dims());
        let out = s.dfs(&g, Pos::new(0, 0), Pos::new(2, 2));
        assert!(out.found);
        // East to the wall of the grid, then south down the last column.
        assert_eq!(
            out.trace,
            vec![Pos::new(0, 1), Pos::new(0, 2), Pos::new(1, 2)]
        );
        assert_eq!(out.path(), vec![Pos::new(0, 1), Pos::new(0, 2), Pos::new(1, 2)]);
    }

    #[test]
    fn follows_first_open_corridor() {
        let g = Grid::parse(
            "
            S..#
            .#.#
            ...E",
        )
        .unwrap();
        let mut s = Searcher::new(g.dims());
        let out = s.dfs(&g, Pos::new(0, 0), Pos::new(2, 3));
        assert!(out.found);
        // (0,1) -> (0,2) -> (1,2) -> (2,2) reaches E's west neighbor directly.
        assert_eq!(
            out.trace,
            vec![Pos::new(0, 1), Pos::new(0, 2), Pos::new(1, 2), Pos::new(2, 2)]
        );
        let path = out.path();
        assert_eq!(path.last(), Some(&Pos::new(2, 2)));
    }

    #[test]
    fn dead_end_branch_is_abandoned() {
        let g = Grid::parse(
            "
            S.#
            .##
            ..E",
        )
        .unwrap();
        let mut s = Searcher::new(g.dims());
        let out = s.dfs(&g, Pos::new(0, 0), Pos::new(2, 2));
        assert!(out.found);
        // (0,1) is a dead end, visited first, then the west column.
        assert_eq!(
            out.trace,
            vec![Pos::new(0, 1), Pos::new(1, 0), Pos::new(2, 0), Pos::new(2, 1)]
        );
        assert_eq!(out.path(), vec![Pos::new(1, 0), Pos::new(2, 0), Pos::new(2, 1)]);
    }

    #[test]
    fn long_corridor_does_not_recurse() {
        let g = Grid::uniform(1, 50_000, 1);
        let mut s = Searcher::new(g.dims());
        let out = s.dfs(&g, Pos::new(0, 0), Pos::new(0, 49_999));
        assert!(out.found);
        assert_eq!(out.trace.len(), 49_998);
        assert_eq!(out.path().len(), 49_998);
    }
}
