use std::borrow::Cow;

/// Canonical form of a single path segment.
///
/// The first character is lowercased so that `UserId` and `userId` resolve to
/// the same column. The rest of the segment is kept as written.
pub fn canonical_name(name: &str) -> Cow<'_, str> {
    let mut chars = name.chars();
    match chars.next() {
        Some(first) if first.is_uppercase() => {
            let mut out = String::with_capacity(name.len());
            out.extend(first.to_lowercase());
            out.push_str(chars.as_str());
            Cow::Owned(out)
        }
        _ => Cow::Borrowed(name),
    }
}
