use quickcheck::{Arbitrary, Gen};

/// Board dimensions plus a sequence of legal plays on them.
#[derive(Clone, Debug)]
pub struct PlaySequence {
    pub rows: usize,
    pub columns: usize,
    pub win_length: usize,
    pub plays: Vec<(usize, char)>,
}

impl Arbitrary for PlaySequence {
    fn arbitrary(g: &mut Gen) -> Self {
        let rows = usize::arbitrary(g) % 8 + 1;
        let columns = usize::arbitrary(g) % 8 + 1;
        let win_length = usize::arbitrary(g) % 5 + 1;
        let num_plays = usize::arbitrary(g) % (rows * columns + 1);

        // Track per-column heights so that every generated play lands.
        let mut heights = vec![0_usize; columns];
        let mut plays = Vec::with_capacity(num_plays);
        for _ in 0..num_plays {
            let open: Vec<usize> = (0..columns).filter(|&c| heights[c] < rows).collect();
            if open.is_empty() {
                break;
            }
            let column = open[usize::arbitrary(g) % open.len()];
            let token = if bool::arbitrary(g) { 'x' } else { 'o' };
            heights[column] += 1;
            plays.push((column, token));
        }

        Self {
            rows,
            columns,
            win_length,
            plays,
        }
    }
}
