//! Deterministic identifier generation for structural edits.

use rustc_hash::FxHashSet;
use smol_str::SmolStr;

/// Pick the first identifier derived from `base` that does not collide with
/// any name in `taken`.
///
/// The sequence is `base`, `base2`, `base3`, ... so the result is fully
/// determined by the existing sibling set, which keeps "add resource" style
/// edits reproducible across sessions.
pub fn unique_identifier<'a, I>(base: &str, taken: I) -> SmolStr
where
    I: IntoIterator<Item = &'a str>,
{
    let taken: FxHashSet<&str> = taken.into_iter().collect();
    if !taken.contains(base) {
        return SmolStr::new(base);
    }
    let mut suffix = 2usize;
    loop {
        let candidate = format!("{base}{suffix}");
        if !taken.contains(candidate.as_str()) {
            return SmolStr::new(candidate);
        }
        suffix += 1;
    }
}
