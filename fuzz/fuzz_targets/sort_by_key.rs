#![no_main]

use libfuzzer_sys::fuzz_target;

// Sorts by the high nibble only, the index tags must stay ascending within equal keys.
fuzz_target!(|data: &[u8]| {
    let mut v = data
        .iter()
        .enumerate()
        .map(|(idx, &byte)| (byte >> 4, idx))
        .collect::<Vec<_>>();

    mergebu::sort_by_key(&mut v, |&(key, _)| key);

    assert!(v.windows(2).all(|w| w[0] <= w[1]));
});
