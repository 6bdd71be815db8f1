/// Initialize a RNG from a `u64` seed using `SplitMix32`.
///
/// Only the low 32 bits of the seed reach the expander. The expander is
/// shuffled before any word is drawn so the first state words are not a
/// trivial function of the seed.
macro_rules! from_splitmix32 {
    ($seed:expr) => {{
        let mut rng = crate::xoroshiro::SplitMix32::new($seed as u32);
        rng.shuffle();
        rng
    }};
}

/// Implement the xoshiro jump-polynomial technique for a 4-word `u32` state.
///
/// Every bit of the polynomial costs one state step whether it is set or not,
/// so a jump is always 128 steps.
macro_rules! impl_jump {
    (u32, $self:expr, $poly:expr) => {
        let mut s0 = 0;
        let mut s1 = 0;
        let mut s2 = 0;
        let mut s3 = 0;
        for j in $poly.iter() {
            for b in 0..32 {
                if (j & 1 << b) != 0 {
                    s0 ^= $self.s[0];
                    s1 ^= $self.s[1];
                    s2 ^= $self.s[2];
                    s3 ^= $self.s[3];
                }
                $self.step();
            }
        }
        $self.s[0] = s0;
        $self.s[1] = s1;
        $self.s[2] = s2;
        $self.s[3] = s3;
    };
    (lanes, $self:expr, $poly:expr, $W:expr) => {
        let mut acc = [[0u32; $W]; 4];
        for j in $poly.iter() {
            for b in 0..32 {
                if (j & 1 << b) != 0 {
                    for (word, lanes) in acc.iter_mut().zip($self.s.iter()) {
                        for (a, s) in word.iter_mut().zip(lanes.iter()) {
                            *a ^= *s;
                        }
                    }
                }
                $self.next_lanes();
            }
        }
        $self.s = acc;
    };
}

/// Implement the xoshiro iteration for `u32` output.
///
/// Takes the four state words as places; the lane generator passes the
/// words of one lane at a time.
macro_rules! impl_xoshiro_u32 {
    ($s0:expr, $s1:expr, $s2:expr, $s3:expr) => {
        let t = $s1 << 9;

        $s2 ^= $s0;
        $s3 ^= $s1;
        $s1 ^= $s2;
        $s0 ^= $s3;

        $s2 ^= t;

        $s3 = $s3.rotate_left(11);
    };
}

/// Map an all-zero state to a different one.
macro_rules! deal_with_zero_state {
    ($state:expr, $Self:ident) => {
        if $state.iter().all(|&x| x == 0) {
            return $Self::seed_from_u64(0);
        }
    };
}

/// Build `$num_states` generators from one seed, each one further along the
/// stream than the previous by a single application of `$advance`.
#[cfg(feature = "std")]
macro_rules! impl_initialize_states {
    ($first:expr, $num_states:expr, $advance:ident) => {{
        let mut states = Vec::with_capacity($num_states);
        let mut cur = $first;
        for _ in 0..$num_states {
            states.push(cur);
            cur.$advance();
        }
        states
    }};
}
