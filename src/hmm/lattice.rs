//! Dynamic-programming lattice shared by the forward and Viterbi engines.
//!
//! All matrices are flat, row-major buffers. With `T` time steps and `L`
//! candidate states the lattice holds:
//! - `initial`: `[L]`, probability of leaving the start state for state `l`.
//! - `trans`: `[L][L]`, probability of moving from state `i` to state `j`.
//! - `state`: `[T][L]`, probability of state `l` emitting the observation at `t`.
//! - `score`: `[T][L]`, alpha (forward) or delta (Viterbi) values.
//! - `backward_edge`: `[T][L]`, the predecessor chosen for `(t, l)`; only
//!   allocated with [`LatticeOpt::VITERBI`].

use bitflags::bitflags;

bitflags! {
    /// Buffers a [`Lattice`] allocates.
    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    pub struct LatticeOpt: u8 {
        const FORWARD = 0x01;
        const VITERBI = 0x02;
    }
}

#[derive(Debug, Clone)]
pub struct Lattice {
    opt: LatticeOpt,
    /// The number of candidate states (L).
    num_states: usize,
    /// The number of time steps (T).
    num_items: usize,
    pub(crate) initial: Vec<f64>,
    pub(crate) trans: Vec<f64>,
    pub(crate) state: Vec<f64>,
    score: Vec<f64>,
    backward_edge: Vec<usize>,
}

impl Lattice {
    pub fn new(opt: LatticeOpt, num_states: usize, num_items: usize) -> Self {
        let (l, t) = (num_states, num_items);
        let backward_edge = if opt.contains(LatticeOpt::VITERBI) {
            vec![0; t * l]
        } else {
            Vec::new()
        };
        Self {
            opt,
            num_states: l,
            num_items: t,
            initial: vec![0.0; l],
            trans: vec![0.0; l * l],
            state: vec![0.0; t * l],
            score: vec![0.0; t * l],
            backward_edge,
        }
    }

    pub fn num_states(&self) -> usize {
        self.num_states
    }

    pub fn num_items(&self) -> usize {
        self.num_items
    }

    /// Alpha or delta value at `(t, l)`, `t` counted from 0.
    #[inline]
    pub fn score(&self, t: usize, l: usize) -> f64 {
        self.score[self.num_states * t + l]
    }

    /// Scores of the last time step.
    pub fn last_row(&self) -> &[f64] {
        match self.num_items {
            0 => &[],
            t => &self.score[self.num_states * (t - 1)..],
        }
    }

    /// `α[T]` summed over states; 1.0 for an empty lattice.
    pub fn total(&self) -> f64 {
        if self.num_items == 0 {
            return 1.0;
        }
        self.last_row().iter().sum()
    }

    pub(crate) fn forward_score(&mut self) {
        debug_assert!(self.opt.contains(LatticeOpt::FORWARD));
        let (l_n, t_n) = (self.num_states, self.num_items);
        if t_n == 0 {
            return;
        }

        /* alpha[0][j] = initial[j] * state[0][j] */
        for j in 0..l_n {
            self.score[j] = self.initial[j] * self.state[j];
        }

        /* alpha[t][j] = state[t][j] * \sum_{i} alpha[t-1][i] * trans[i][j] */
        for t in 1..t_n {
            let (prev, cur) = self.score.split_at_mut(l_n * t);
            let prev = &prev[l_n * (t - 1)..];
            let cur = &mut cur[..l_n];
            cur.iter_mut().for_each(|v| *v = 0.0);
            for (i, &a) in prev.iter().enumerate() {
                if a == 0.0 {
                    continue;
                }
                let row = &self.trans[l_n * i..l_n * (i + 1)];
                for (v, &p) in cur.iter_mut().zip(row) {
                    *v += a * p;
                }
            }
            for (v, &e) in cur.iter_mut().zip(&self.state[l_n * t..l_n * (t + 1)]) {
                *v *= e;
            }
        }
    }

    /// Fill delta scores and write the best path into `labels`.
    ///
    /// Ties keep the lowest state index, both in the recurrence and at the
    /// final step, so an all-zero lattice decodes to state 0 throughout.
    /// Returns `δ[T][labels[T-1]]`.
    pub(crate) fn viterbi(&mut self, labels: &mut [usize]) -> f64 {
        debug_assert!(self.opt.contains(LatticeOpt::VITERBI));
        let (l_n, t_n) = (self.num_states, self.num_items);
        assert!(t_n > 0 && l_n > 0, "viterbi on an empty lattice");
        assert_eq!(labels.len(), t_n);

        for j in 0..l_n {
            self.score[j] = self.initial[j] * self.state[j];
        }

        for t in 1..t_n {
            for j in 0..l_n {
                let emit = self.state[l_n * t + j];
                let mut max_score = f64::NEG_INFINITY;
                let mut argmax = 0;
                for i in 0..l_n {
                    /* Transit from (t-1, i) to (t, j). */
                    let score = self.score[l_n * (t - 1) + i] * self.trans[l_n * i + j] * emit;
                    if max_score < score {
                        max_score = score;
                        argmax = i;
                    }
                }
                self.backward_edge[l_n * t + j] = argmax;
                self.score[l_n * t + j] = max_score;
            }
        }

        /* Find the node (T-1, i) with the maximum score. */
        let mut max_score = f64::NEG_INFINITY;
        labels[t_n - 1] = 0;
        for (i, &v) in self.last_row().iter().enumerate() {
            if max_score < v {
                max_score = v;
                labels[t_n - 1] = i;
            }
        }
        /* Tag labels by tracing the backward links. */
        for t in (0..t_n - 1).rev() {
            labels[t] = self.backward_edge[l_n * (t + 1) + labels[t + 1]];
        }
        max_score
    }
}
