use harvester_core::Domain;

/// Output file for a domain: `{domain}_urls.txt`, with path-hostile characters replaced.
pub fn output_filename(domain: &Domain) -> String {
    format!("{}_urls.txt", sanitize(domain.as_str()))
}

fn sanitize(input: &str) -> String {
    input
        .chars()
        .map(|c| if is_forbidden(c) { '_' } else { c })
        .collect()
}

fn is_forbidden(c: char) -> bool {
    matches!(c,
        '\\' | '/' | ':' | '*' | '?' | '"' | '<' | '>' | '|' | '\0'..='\u{1F}'
    )
}
