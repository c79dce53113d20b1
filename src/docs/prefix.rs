/// Leading flag-name segments that differ between `flags`.
///
/// Flags are split on `.` and the dot-separated suffix shared by all of them
/// is dropped; what remains of each flag is its prefix. The output is aligned
/// with the input.
///
/// ```
/// use confdoc::docs::find_flags_prefix;
///
/// let prefixes = find_flags_prefix(&["blocks-storage.s3.endpoint", "ruler-storage.s3.endpoint"]);
/// assert_eq!(prefixes, vec!["blocks-storage", "ruler-storage"]);
/// ```
pub fn find_flags_prefix<S: AsRef<str>>(flags: &[S]) -> Vec<String> {
    let mut tokens: Vec<Vec<&str>> = flags
        .iter()
        .map(|flag| flag.as_ref().split('.').collect())
        .collect();

    let Some(shortest) = tokens.iter().map(Vec::len).min() else {
        return Vec::new();
    };

    for _ in 0..shortest {
        let Some(last) = tokens[0].last().copied() else {
            break;
        };
        if tokens.iter().any(|flag| flag.last() != Some(&last)) {
            break;
        }
        for flag in &mut tokens {
            flag.pop();
        }
    }

    tokens.iter().map(|flag| flag.join(".")).collect()
}
