use std::collections::HashMap;

/// Shannon entropy (base 2) of a string's character distribution
///
/// Characters are grouped by `char`, not byte. The empty string has entropy 0.
///
/// # Examples
///
/// ```
/// use phishing_features::lexical::shannon_entropy;
///
/// assert_eq!(shannon_entropy(""), 0.0);
/// assert_eq!(shannon_entropy("aaaa"), 0.0);
/// assert!((shannon_entropy("abcd") - 2.0).abs() < 1e-12);
/// ```
pub fn shannon_entropy(s: &str) -> f64 {
    let mut counts: HashMap<char, usize> = HashMap::new();
    let mut total = 0usize;
    for c in s.chars() {
        *counts.entry(c).or_insert(0) += 1;
        total += 1;
    }

    if total == 0 {
        return 0.0;
    }

    let total = total as f64;
    let entropy: f64 = counts
        .values()
        .map(|&count| {
            let p = count as f64 / total;
            -p * p.log2()
        })
        .sum();

    // A single distinct character sums to -0.0
    entropy.max(0.0)
}
