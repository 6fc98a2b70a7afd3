use crate::{
    animation::timer::Animation,
    foundation::{
        error::{TexAnimError, TexAnimResult},
        math::checked_lcm_u64,
    },
};

/// `true` when every animation sits at the start of its own cycle, so a shared counter can
/// restart without a visible jump. Vacuously true for an empty set.
pub fn all_on_frame_zero(animations: &[Animation]) -> bool {
    animations.iter().all(Animation::is_on_frame_zero)
}

/// Ticks until every animation is back at frame zero at the same time: the lcm of the individual
/// cycle lengths. An empty set has a combined cycle of 1.
pub fn combined_cycle_len(animations: &[Animation]) -> TexAnimResult<u64> {
    animations.iter().try_fold(1u64, |acc, a| {
        checked_lcm_u64(acc, u64::from(a.cycle_len())).ok_or_else(|| {
            TexAnimError::validation("combined animation cycle overflows u64")
        })
    })
}
