//! The suffix array builder: a linear-time induced-sorting (SAIS family) construction that does
//! all of its bucket bookkeeping in place, inside the output array, using three reserved sentinel
//! values instead of an auxiliary bucket-state array.
//!
//! The top-level entry point is [build]; everything else in this module is the recursive engine
//! behind it. The recursion reduces the alphabet by ranking leftmost S-type (LMS) substrings and
//! calls itself on the reduced problem, bottoming out when ranks already form a permutation.

/// Slot is unfilled.
const EMPTY: usize = usize::MAX;
/// Bucket currently holds exactly one entry still to be placed.
const UNIQUE: usize = usize::MAX - 1;
/// Bucket will hold two or more entries; an adjacent cell holds a counter.
const MULTI: usize = usize::MAX - 2;

/// Construct the suffix array of `text`, appending the usual zero sentinel.
///
/// The returned array has length `text.len() + 1` and is a permutation of `0..=text.len()`,
/// with `SA[0] == text.len()` (the sentinel suffix sorts first).
pub fn build(text: &[u8]) -> Vec<usize> {
    let n = text.len() + 1;
    let mut t = dense_alphabet(text);
    let sigma = t.iter().copied().max().map(|m| m + 1).unwrap_or(1);
    let mut sa = vec![0usize; n];
    solve(&mut t, &mut sa, sigma, true);
    sa
}

/// Map input bytes onto a dense alphabet `1..=k` (reserving `0` for the sentinel), then append the
/// sentinel. Bytes that never occur are simply absent from the range, keeping `sigma` (and hence
/// the counting arrays the algorithm builds over `1..sigma`) no larger than it needs to be.
fn dense_alphabet(text: &[u8]) -> Vec<usize> {
    let mut present = [false; 256];
    for &b in text {
        present[b as usize] = true;
    }
    let mut rank = [0usize; 256];
    let mut next = 1;
    for (symbol, slot) in present.iter().zip(rank.iter_mut()) {
        if *symbol {
            *slot = next;
            next += 1;
        }
    }
    let mut t = Vec::with_capacity(text.len() + 1);
    t.extend(text.iter().map(|&b| rank[b as usize]));
    t.push(0);
    t
}

/// Permute `sa` into the suffix array of `t` (which must end in a unique zero sentinel) over an
/// alphabet of size `sigma`. When `recursive` is false the induced sort runs but the recursive
/// reduction is skipped; this is used at the bottom of the recursion, where the caller only wants
/// sorted LMS substrings.
pub fn solve(t: &mut [usize], sa: &mut [usize], sigma: usize, recursive: bool) {
    let n = t.len();
    Builder { t, sa, sigma, n }.solve(recursive)
}

struct Builder<'a> {
    t: &'a mut [usize],
    sa: &'a mut [usize],
    sigma: usize,
    n: usize,
}

impl Builder<'_> {
    fn solve(&mut self, recursive: bool) {
        if self.n <= 1 {
            self.sa[0] = 0;
            return;
        }
        self.rename();
        let n1 = self.sort_lms_chars();
        if n1 == 1 {
            self.induced_sort_all();
            return;
        }
        self.induced_sort_all();
        if !recursive {
            self.retain_sorted_lms_substrs();
            self.induced_sort_all();
            return;
        }
        let end_pos = self.move_sorted_lms_substrs_to_end();
        let (max_rank, has_ties) = self.construct_t1(end_pos);
        self.recurse_on_reduced_problem(n1, max_rank, has_ties);
        self.lift_reduced_suffixes(n1);
        self.induced_sort_all();
    }

    /// Phase 1: alphabet compaction. Rewrites `T` in place so that every symbol is the bucket
    /// endpoint its suffix must eventually reach — head for L-type, tail for S-type — then fills
    /// `SA` with `EMPTY` for the following phases.
    fn rename(&mut self) {
        let (t, sa, n, sigma) = (&mut *self.t, &mut *self.sa, self.n, self.sigma);

        for &c in t.iter() {
            sa[c] += 1;
        }
        let mut prev = 1;
        for i in 1..sigma {
            sa[i] += prev;
            prev = sa[i];
        }
        for c in &mut t[..n - 1] {
            *c = sa[*c - 1];
        }
        // `sigma` may equal `n` when every symbol in this call's alphabet is already distinct
        // (e.g. a short top-level input with no repeated bytes); the counting cells beyond
        // `n - 1` don't exist and, since each subproblem's `sa` always starts zeroed, don't need
        // clearing anyway.
        for slot in &mut sa[..=sigma.min(n - 1)] {
            *slot = 0;
        }
        for &c in t.iter() {
            sa[c] += 1;
        }
        let mut prev = 0;
        for i in 1..n {
            sa[i] += prev;
            prev = sa[i];
        }

        let mut tip1_is_s = true;
        let mut tip1 = 0usize;
        for i in (0..n - 1).rev() {
            let ti_is_s = t[i] < tip1 || (t[i] == tip1 && tip1_is_s);
            if ti_is_s {
                t[i] = sa[t[i]];
            }
            tip1 = t[i];
            tip1_is_s = ti_is_s;
        }
        sa.fill(EMPTY);
    }

    /// The right-to-left placement protocol: place `i` into the bucket ending at `sa[ti]`.
    /// Returns whether placement shifted the bucket (in which case a caller mid-scan of the
    /// bucket head should rescan).
    fn place_right_to_left(&mut self, i: usize, ti: usize) -> bool {
        let sa = &mut *self.sa;
        match sa[ti] {
            UNIQUE => {
                sa[ti] = i;
                false
            }
            MULTI => {
                if sa[ti - 1] == EMPTY {
                    if ti >= 2 && sa[ti - 2] == EMPTY {
                        sa[ti - 2] = i;
                        sa[ti - 1] = 1;
                        return false;
                    }
                    sa[ti] = i;
                    sa[ti - 1] = EMPTY;
                    false
                } else {
                    let counter = sa[ti - 1];
                    if ti >= counter + 2 && sa[ti - counter - 2] == EMPTY {
                        sa[ti - counter - 2] = i;
                        sa[ti - 1] = counter + 1;
                        return false;
                    }
                    let left_bound = ti - counter + 1;
                    for j in (left_bound..=ti).rev() {
                        sa[j] = sa[j - 2];
                    }
                    sa[ti - counter] = i;
                    sa[ti - counter - 1] = EMPTY;
                    true
                }
            }
            _ => {
                let mut j = ti;
                while sa[j] != EMPTY {
                    j -= 1;
                }
                sa[j] = i;
                false
            }
        }
    }

    /// The left-to-right mirror of [Builder::place_right_to_left].
    fn place_left_to_right(&mut self, i: usize, ti: usize) -> bool {
        let sa = &mut *self.sa;
        match sa[ti] {
            UNIQUE => {
                sa[ti] = i;
                false
            }
            MULTI => {
                if sa[ti + 1] == EMPTY {
                    let j = ti + 2;
                    if j < sa.len() && sa[j] == EMPTY {
                        sa[j] = i;
                        sa[ti + 1] = 1;
                        return false;
                    }
                    sa[ti] = i;
                    sa[ti + 1] = EMPTY;
                    false
                } else {
                    let counter = sa[ti + 1];
                    let j = ti + counter + 2;
                    if j < sa.len() && sa[j] == EMPTY {
                        sa[j] = i;
                        sa[ti + 1] = counter + 1;
                        return false;
                    }
                    let right_bound = ti + counter;
                    for j in ti..right_bound {
                        sa[j] = sa[j + 2];
                    }
                    sa[ti + counter] = i;
                    sa[ti + counter + 1] = EMPTY;
                    true
                }
            }
            _ => {
                let mut j = ti;
                while sa[j] != EMPTY {
                    j += 1;
                }
                sa[j] = i;
                false
            }
        }
    }

    /// Phase 2: mark LMS buckets, place LMS positions via the right-to-left protocol, then strip
    /// the `MULTI`/counter scaffolding so each bucket's LMS entries sit contiguously at its tail.
    /// Returns the number of LMS positions found, including the sentinel.
    fn sort_lms_chars(&mut self) -> usize {
        let n = self.n;

        let mut ti_is_s = false;
        let mut ti = self.t[n - 2];
        for im1 in (0..n - 2).rev() {
            let tim1 = self.t[im1];
            let tim1_is_s = tim1 < ti || (tim1 == ti && ti_is_s);
            if !tim1_is_s && ti_is_s {
                match self.sa[ti] {
                    EMPTY => self.sa[ti] = UNIQUE,
                    UNIQUE => self.sa[ti] = MULTI,
                    _ => {}
                }
            }
            ti = tim1;
            ti_is_s = tim1_is_s;
        }

        self.sa[0] = n - 1;
        let mut lms_count = 1;
        let mut ti_is_s = false;
        let mut ti = self.t[n - 2];
        let mut i = n - 2;
        for im1 in (0..n - 2).rev() {
            let tim1 = self.t[im1];
            let tim1_is_s = tim1 < ti || (tim1 == ti && ti_is_s);
            if !tim1_is_s && ti_is_s {
                self.place_right_to_left(i, ti);
                lms_count += 1;
            }
            ti = tim1;
            ti_is_s = tim1_is_s;
            i = im1;
        }

        let mut i = n - 1;
        while i != 0 {
            if self.sa[i] == MULTI {
                let count = self.sa[i - 1];
                let left_bound = i + 1 - count;
                for j in (left_bound..=i).rev() {
                    self.sa[j] = self.sa[j - 2];
                }
                i -= count;
                self.sa[i] = EMPTY;
                i -= 1;
                self.sa[i] = EMPTY;
            }
            i -= 1;
        }
        lms_count
    }

    /// Phase 3: induce L-type suffixes left to right, then S-type suffixes right to left, from
    /// whatever is currently placed in `sa` (LMS positions on the first call, sorted LMS
    /// substrings on later calls).
    fn induced_sort_all(&mut self) {
        let n = self.n;

        let mut tip1_is_s = true;
        let mut tip1 = 0usize;
        for i in (0..n - 1).rev() {
            let ti = self.t[i];
            let ti_is_s = ti < tip1 || (ti == tip1 && tip1_is_s);
            if !ti_is_s {
                match self.sa[ti] {
                    EMPTY => self.sa[ti] = UNIQUE,
                    UNIQUE => self.sa[ti] = MULTI,
                    _ => {}
                }
            }
            tip1 = ti;
            tip1_is_s = ti_is_s;
        }

        let mut i = 0;
        let mut shifted_bucket_head = EMPTY;
        while i < n {
            let sa_i = self.sa[i];
            if sa_i == MULTI {
                shifted_bucket_head = i;
                i += 2;
                continue;
            }
            if sa_i < UNIQUE && sa_i > 0 {
                let j = sa_i - 1;
                let tj = self.t[j];
                if tj >= self.t[sa_i]
                    && self.place_left_to_right(j, tj)
                    && shifted_bucket_head == tj
                {
                    i -= 1;
                    continue;
                }
            }
            i += 1;
        }

        let mut i = 1;
        while i < n {
            if self.sa[i] == MULTI {
                let c = self.sa[i + 1];
                for j in i..i + c {
                    self.sa[j] = self.sa[j + 2];
                }
                i += c;
                self.sa[i] = EMPTY;
                i += 1;
                self.sa[i] = EMPTY;
            }
            i += 1;
        }

        self.remove_lms();

        let mut tip1_is_s = true;
        let mut tip1 = 0usize;
        for i in (0..n - 1).rev() {
            let ti = self.t[i];
            let ti_is_s = ti < tip1 || (ti == tip1 && tip1_is_s);
            if ti_is_s {
                match self.sa[ti] {
                    EMPTY => self.sa[ti] = UNIQUE,
                    UNIQUE => self.sa[ti] = MULTI,
                    _ => {}
                }
            }
            tip1 = ti;
            tip1_is_s = ti_is_s;
        }

        let mut i = n - 1;
        let mut shifted_bucket_head = EMPTY;
        while i != 0 {
            let sa_i = self.sa[i];
            if sa_i == MULTI {
                shifted_bucket_head = i;
                i -= 2;
                continue;
            }
            if sa_i < UNIQUE && sa_i > 0 {
                let j = sa_i - 1;
                let tj = self.t[j];
                let suf_j_is_s = if tj < self.t[sa_i] {
                    true
                } else if tj == self.t[sa_i] {
                    if tj > i {
                        true
                    } else {
                        let suspected_tail = tj;
                        self.sa[suspected_tail] == MULTI
                            || suspected_tail < self.t[self.sa[suspected_tail + 1]]
                    }
                } else {
                    false
                };
                if suf_j_is_s && self.place_right_to_left(j, tj) && shifted_bucket_head == tj {
                    i += 1;
                    continue;
                }
            }
            i -= 1;
        }
    }

    /// Re-marks every LMS position as `UNIQUE`/`MULTI` (mirroring `sort_lms_chars`'s first pass)
    /// and then erases them from `sa`, so the following induced sort sees a clean slate for
    /// S-type positions.
    fn remove_lms(&mut self) {
        let n = self.n;

        let mut ti_is_s = false;
        let mut ti = self.t[n - 2];
        for im1 in (0..n - 2).rev() {
            let tim1 = self.t[im1];
            let tim1_is_s = tim1 < ti || (tim1 == ti && ti_is_s);
            if !tim1_is_s && ti_is_s {
                match self.sa[ti] {
                    MULTI => self.sa[ti - 1] += 1,
                    UNIQUE => {
                        self.sa[ti] = MULTI;
                        self.sa[ti - 1] = 2;
                    }
                    _ => self.sa[ti] = UNIQUE,
                }
            }
            ti = tim1;
            ti_is_s = tim1_is_s;
        }

        let mut i = n - 1;
        while i != 0 {
            match self.sa[i] {
                UNIQUE => {
                    self.sa[i] = EMPTY;
                    i -= 1;
                }
                MULTI => {
                    let c = self.sa[i - 1];
                    for j in i + 1 - c..=i {
                        self.sa[j] = EMPTY;
                    }
                    i -= c;
                }
                _ => i -= 1,
            }
        }
    }

    fn is_s_type_bucket_tail(&self, sa_i: usize) -> bool {
        self.t[sa_i] < self.t[sa_i + 1]
    }

    /// Terminal-recursion variant: erase everything except sorted LMS substrings, leaving `sa`
    /// ready for one final induced sort.
    fn retain_sorted_lms_substrs(&mut self) {
        let mut i = self.n - 1;
        loop {
            let mut sa_i = self.sa[i];
            if self.is_s_type_bucket_tail(sa_i) {
                let mut tail = i;
                loop {
                    if sa_i != 0 && self.t[sa_i - 1] > self.t[sa_i] {
                        // LMS substring: retain.
                    } else {
                        self.sa[i] = EMPTY;
                    }
                    if i == 0 {
                        return;
                    }
                    i -= 1;
                    sa_i = self.sa[i];
                    if self.t[sa_i] != tail {
                        if self.is_s_type_bucket_tail(sa_i) {
                            tail = i;
                            continue;
                        } else {
                            break;
                        }
                    }
                }
            }
            self.sa[i] = EMPTY;
            if i == 0 {
                return;
            }
            i -= 1;
        }
    }

    /// Compacts sorted LMS substring positions into `sa[end_pos+1..n]`, returning `end_pos`: the
    /// last index left available for the reduced problem's own workspace.
    fn move_sorted_lms_substrs_to_end(&mut self) -> usize {
        let n = self.n;
        let mut i = n - 1;
        let mut end_pos = n - 1;
        loop {
            let mut sa_i = self.sa[i];
            if self.is_s_type_bucket_tail(sa_i) {
                let mut tail = i;
                loop {
                    if sa_i != 0 && self.t[sa_i - 1] > self.t[sa_i] {
                        self.sa[end_pos] = sa_i;
                        end_pos -= 1;
                    }
                    if i == 0 {
                        self.sa[end_pos] = n - 1;
                        for slot in &mut self.sa[..end_pos] {
                            *slot = EMPTY;
                        }
                        return end_pos;
                    }
                    i -= 1;
                    sa_i = self.sa[i];
                    if self.t[sa_i] != tail {
                        if self.is_s_type_bucket_tail(sa_i) {
                            tail = i;
                            continue;
                        } else {
                            break;
                        }
                    }
                }
            }
            self.sa[i] = EMPTY;
            if i == 0 {
                self.sa[end_pos] = n - 1;
                for slot in &mut self.sa[..end_pos] {
                    *slot = EMPTY;
                }
                return end_pos;
            }
            i -= 1;
        }
    }

    fn length_of_lms_substr(&self, k: usize) -> usize {
        let n = self.n;
        let mut prev = self.t[k];
        let mut next_lms_index = 0;
        let mut i = k + 1;
        while i != n {
            let curr = self.t[i];
            if prev > curr {
                next_lms_index = i;
            } else if prev < curr && next_lms_index != 0 {
                return next_lms_index - k + 1;
            }
            prev = curr;
            i += 1;
        }
        n - k
    }

    /// Ranks the sorted LMS substrings found in `sa[end_pos+1..n]`, writing rank `r` at
    /// `sa[position/2]` and compacting the result — the reduced problem's text `T1` — to
    /// `sa[0..n1]`. Returns `(max_rank, has_ties)`.
    fn construct_t1(&mut self, end_pos: usize) -> (usize, bool) {
        let n = self.n;
        let mut prev_lms_len = 0;
        let mut prev_lms_idx = 0;
        let mut rank = 0;
        let mut has_ties = false;
        for i in end_pos + 1..n {
            let curr_lms_idx = self.sa[i];
            let curr_lms_len = self.length_of_lms_substr(curr_lms_idx);
            if curr_lms_len != prev_lms_len {
                rank += 1;
            } else {
                let identical = (0..curr_lms_len)
                    .all(|k| self.t[prev_lms_idx + k] == self.t[curr_lms_idx + k]);
                if identical {
                    has_ties = true;
                } else {
                    rank += 1;
                }
            }
            self.sa[curr_lms_idx / 2] = rank;
            prev_lms_len = curr_lms_len;
            prev_lms_idx = curr_lms_idx;
        }

        let mut j = 0;
        for i in 0..end_pos {
            let sa_i = self.sa[i];
            if sa_i != EMPTY {
                self.sa[j] = sa_i;
                j += 1;
            }
        }
        self.sa[j] = 0;
        for slot in &mut self.sa[j + 1..end_pos] {
            *slot = EMPTY;
        }
        (rank, has_ties)
    }

    /// Recurses on the reduced problem `T1` (`sa[0..n1]`) using `sa[n-n1..n]` as its own suffix
    /// array workspace, then lifts the result back into `sa[0..n1]` as ranks.
    fn recurse_on_reduced_problem(&mut self, n1: usize, max_rank: usize, has_ties: bool) {
        let n = self.n;
        let (head, tail) = self.sa.split_at_mut(n - n1);
        let t1 = &mut head[..n1];
        tail.fill(0);
        solve(t1, tail, max_rank, has_ties);
        for i in 0..n1 {
            self.sa[i] = self.sa[n - n1 + i];
        }
    }

    /// Replaces the ranks left in `sa[0..n1]` with the actual LMS text positions they refer to,
    /// then re-buckets those positions by symbol so the next induced sort can take over.
    fn lift_reduced_suffixes(&mut self, n1: usize) {
        let n = self.n;

        // Enumerate the n1 LMS positions (right to left) into the sa[n-n1..n] region, reusing it
        // as scratch now that the recursive call above is finished with it.
        {
            let (_, lms) = self.sa.split_at_mut(n - n1);
            let mut j = n1 - 1;
            lms[j] = n - 1;
            if j > 0 {
                j -= 1;
                let mut ti_is_s = false;
                let mut ti = self.t[n - 2];
                let mut i = n - 2;
                'outer: for im1 in (0..n - 2).rev() {
                    let tim1 = self.t[im1];
                    let tim1_is_s = tim1 < ti || (tim1 == ti && ti_is_s);
                    if !tim1_is_s && ti_is_s {
                        lms[j] = i;
                        if j == 0 {
                            break 'outer;
                        }
                        j -= 1;
                    }
                    i = im1;
                    ti = tim1;
                    ti_is_s = tim1_is_s;
                }
            }
        }

        // sa[i] currently holds a rank; look it up in the lms table to recover the text position.
        {
            let (head, lms) = self.sa.split_at_mut(n - n1);
            for slot in &mut head[..n1] {
                *slot = lms[*slot];
            }
            lms.fill(EMPTY);
        }

        let mut curr_tail = 0usize;
        let mut offset = 0usize;
        for i in (1..n1).rev() {
            let sa_i_val = self.sa[i];
            self.sa[i] = EMPTY;
            let j = self.t[sa_i_val];
            if j == curr_tail {
                offset += 1;
            } else {
                curr_tail = j;
                offset = 0;
            }
            self.sa[curr_tail - offset] = sa_i_val;
        }
    }
}
