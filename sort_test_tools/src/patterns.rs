//! Input patterns for testing and benchmarking sorts, all as `i32`.
//!
//! Everything random is derived from one seed per process, so a failing test can be reproduced
//! by passing the printed seed back in via the `OVERRIDE_SEED` env var.

use std::env;
use std::str::FromStr;
use std::sync::atomic::{AtomicBool, Ordering};

use once_cell::sync::OnceCell;

use rand::prelude::*;

use zipf::ZipfDistribution;

// --- Public ---

pub fn random(len: usize) -> Vec<i32> {
    //     .
    // : . : :
    // :.:::.::

    random_vec(len)
}

pub fn random_uniform<R>(len: usize, range: R) -> Vec<i32>
where
    R: Into<rand::distributions::Uniform<i32>>,
{
    // :.:.:.::
    let mut rng = new_rng();
    let dist: rand::distributions::Uniform<i32> = range.into();

    (0..len).map(|_| dist.sample(&mut rng)).collect()
}

pub fn random_zipf(len: usize, exponent: f64) -> Vec<i32> {
    // Few values are very common, most are rare.
    // https://en.wikipedia.org/wiki/Zipf's_law
    if len == 0 {
        return Vec::new();
    }

    let mut rng = new_rng();
    let dist = ZipfDistribution::new(len, exponent).unwrap();

    (0..len).map(|_| dist.sample(&mut rng) as i32).collect()
}

pub fn random_sorted(len: usize, sorted_percent: f64) -> Vec<i32> {
    //     .:
    //   .:::. :
    // .::::::.::
    // [----][--]
    // sorted  random

    let mut v = random_vec(len);
    let sorted_len = ((len as f64) * (sorted_percent / 100.0)).round() as usize;

    v[0..sorted_len.min(len)].sort_unstable();

    v
}

pub fn all_equal(len: usize) -> Vec<i32> {
    // ......
    // ::::::

    vec![66; len]
}

pub fn ascending(len: usize) -> Vec<i32> {
    //     .:
    //   .:::
    // .:::::

    (0..len as i32).collect()
}

pub fn descending(len: usize) -> Vec<i32> {
    // :.
    // :::.
    // :::::.

    (0..len as i32).rev().collect()
}

pub fn saw_mixed(len: usize, saw_count: usize) -> Vec<i32> {
    // :.  :.    .::.    .:
    // :::.:::..::::::..:::

    if len == 0 {
        return Vec::new();
    }

    let mut vals = random_vec(len);
    let chunk_len = (len / saw_count.max(1)).max(1);
    let saw_directions = random_uniform((len / chunk_len) + 1, 0..=1);

    for (chunk, direction) in vals.chunks_mut(chunk_len).zip(saw_directions) {
        if direction == 0 {
            chunk.sort();
        } else {
            chunk.sort_by_key(|&e| std::cmp::Reverse(e));
        }
    }

    vals
}

pub fn pipe_organ(len: usize) -> Vec<i32> {
    //   .:.
    // .:::::.

    let mut vals = random_vec(len);

    let (first_half, second_half) = vals.split_at_mut(len / 2);
    first_half.sort();
    second_half.sort_by_key(|&e| std::cmp::Reverse(e));

    vals
}

static RANDOM_EACH_TIME: AtomicBool = AtomicBool::new(false);

/// Every call to a random pattern yields new values from now on.
///
/// By default `patterns::random(4)` yields the same values for the whole process. Benchmarks
/// should call this to avoid measuring a single input over and over.
pub fn use_random_seed_each_time() {
    if override_seed().is_some() {
        panic!("Using use_random_seed_each_time conflicts with the external seed override.");
    }

    RANDOM_EACH_TIME.store(true, Ordering::Release);
}

pub fn random_init_seed() -> u64 {
    if RANDOM_EACH_TIME.load(Ordering::Acquire) {
        return thread_rng().gen();
    }

    static SEED: OnceCell<u64> = OnceCell::new();
    *SEED.get_or_init(|| override_seed().unwrap_or_else(|| thread_rng().gen()))
}

// --- Private ---

fn override_seed() -> Option<u64> {
    env::var("OVERRIDE_SEED")
        .ok()
        .map(|seed| u64::from_str(&seed).expect("OVERRIDE_SEED must be a u64"))
}

fn new_rng() -> StdRng {
    StdRng::seed_from_u64(random_init_seed())
}

fn random_vec(len: usize) -> Vec<i32> {
    let mut rng = new_rng();

    (0..len).map(|_| rng.gen::<i32>()).collect()
}
