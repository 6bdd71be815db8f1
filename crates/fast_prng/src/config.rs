//! Plain bounds records for configuring range mappers.
//!
//! These hold whatever a config file or caller supplied, unvalidated.
//! Converting them into [`IntRange`](crate::IntRange) or
//! [`FloatRange`](crate::FloatRange) runs the validation, and with the
//! `serde` feature the ranges deserialize through these records, so a
//! config file with inverted bounds fails to load with a
//! [`RangeError`](crate::RangeError) message instead of producing a
//! mapper.

/// Inclusive integer bounds `[low, high]`.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct IntBounds {
    /// Lower bound, inclusive.
    pub low: i32,
    /// Upper bound, inclusive.
    pub high: i32,
}

/// Half-open float bounds `[low, high)`.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FloatBounds {
    /// Lower bound, inclusive.
    pub low: f32,
    /// Upper bound, exclusive.
    pub high: f32,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{FloatRange, IntRange, RangeError};

    #[test]
    fn bounds_convert_with_validation() {
        let range = IntRange::try_from(IntBounds { low: 1, high: 100 }).unwrap();
        assert_eq!(IntBounds::from(range), IntBounds { low: 1, high: 100 });

        assert_eq!(
            FloatRange::try_from(FloatBounds { low: 3.0, high: 3.0 }),
            Err(RangeError::EmptyFloat { bound: 3.0 })
        );
    }

    #[cfg(feature = "serde")]
    #[test]
    fn ranges_deserialize_through_bounds() {
        let range: FloatRange = serde_json::from_str(r#"{"low": 2.5, "high": 2.75}"#).unwrap();
        assert_eq!(range.width(), 0.25);

        let err = serde_json::from_str::<IntRange>(r#"{"low": 10, "high": -10}"#).unwrap_err();
        assert!(err.to_string().contains("greater than upper bound"));

        let json = serde_json::to_string(&IntRange::new(-3, 3).unwrap()).unwrap();
        assert_eq!(json, r#"{"low":-3,"high":3}"#);
    }

    #[cfg(feature = "serde")]
    #[test]
    fn lane_states_round_trip() {
        use crate::{LanePair, LaneXoshiro128Plus, Xoshiro128Plus};
        use rand_core::SeedableRng;

        let mut block = LaneXoshiro128Plus::<4>::seed_from_u64(1);
        block.next_lanes();
        let json = serde_json::to_string(&block).unwrap();
        let mut restored: LaneXoshiro128Plus<4> = serde_json::from_str(&json).unwrap();
        assert_eq!(restored, block);
        assert_eq!(restored.next_lanes(), block.next_lanes());

        let pair = LanePair::<4>::seed_from_u64(9);
        let json = serde_json::to_string(&pair).unwrap();
        assert_eq!(serde_json::from_str::<LanePair<4>>(&json).unwrap(), pair);

        // Three lanes cannot fill a block of four, and five overflow it.
        let three = serde_json::to_string(&[block.lane(0); 3]).unwrap();
        assert!(serde_json::from_str::<LaneXoshiro128Plus<4>>(&three).is_err());
        let five = serde_json::to_string(&[block.lane(0); 5]).unwrap();
        assert!(serde_json::from_str::<LaneXoshiro128Plus<4>>(&five).is_err());

        // An all-zero lane is remapped instead of being accepted as a stuck stream.
        let zeroed = r#"[{"s":[0,0,0,0]},{"s":[1,2,3,4]}]"#;
        let restored: LaneXoshiro128Plus<2> = serde_json::from_str(zeroed).unwrap();
        assert_eq!(restored.lane(0), Xoshiro128Plus::seed_from_u64(0));
        assert_eq!(restored.lane(1).state(), [1, 2, 3, 4]);
    }
}
