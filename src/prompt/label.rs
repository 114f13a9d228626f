/// Turn a schema property name into prompt text.
///
/// Underscores become spaces, camelCase humps are split, and the result is
/// sentence-cased: `dnsSearchPath` -> `Dns search path`.
pub fn humanize(segment: &str) -> String {
    let mut spaced = String::with_capacity(segment.len() + 4);
    let mut prev: Option<char> = None;

    for c in segment.chars() {
        let c = if c == '_' { ' ' } else { c };
        if c.is_uppercase() && prev.is_some_and(|p| p.is_alphanumeric()) {
            spaced.push(' ');
        }
        spaced.push(c);
        prev = Some(c);
    }

    let mut chars = spaced.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars.flat_map(char::to_lowercase)).collect(),
        None => String::new(),
    }
}
