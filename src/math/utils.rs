use rand::Rng;

/// Random number in [-1, 1]
#[inline]
pub fn random_unit(rng: &mut impl Rng) -> f32 {
    rng.gen_range(-1.0..=1.0)
}

#[inline]
pub fn random_range(rng: &mut impl Rng, lo: f32, hi: f32) -> f32 {
    rng.gen_range(lo..=hi)
}
