//! Input normalization for profile handles.
//!
//! Users paste whatever is on their clipboard: `acme`, `@Acme`, or a full
//! profile URL with trailing path or query noise. Everything downstream
//! (prompt, identity check, synthetic sources) works on the canonical form.

const PROFILE_HOST_MARKER: &str = "instagram.com/";

/// Canonicalize free-form input into a bare lowercase handle.
///
/// Pure and total: never fails, idempotent on already-canonical input.
/// Empty/whitespace-only input yields an empty string; callers reject that
/// before issuing a request.
///
/// ```
/// use audita_analysis::handle::normalize_handle;
///
/// assert_eq!(normalize_handle("  @Apple "), "apple");
/// assert_eq!(normalize_handle("https://instagram.com/apple?hl=en"), "apple");
/// ```
pub fn normalize_handle(raw: &str) -> String {
    let lowered = raw.trim().to_lowercase();

    let segment = match lowered.find(PROFILE_HOST_MARKER) {
        Some(idx) => {
            let rest = &lowered[idx + PROFILE_HOST_MARKER.len()..];
            let end = rest.find(['/', '?']).unwrap_or(rest.len());
            &rest[..end]
        }
        None => lowered.as_str(),
    };

    segment.strip_prefix('@').unwrap_or(segment).to_string()
}

/// Canonical public URL for a normalized handle.
pub fn profile_url(handle: &str) -> String {
    format!("https://instagram.com/{handle}")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn all_input_shapes_collapse_to_the_same_handle() {
        for input in [
            "handle",
            "@handle",
            "https://instagram.com/handle",
            "https://instagram.com/handle/",
            "https://instagram.com/handle?x=1",
            "https://www.instagram.com/handle/",
        ] {
            assert_eq!(normalize_handle(input), "handle", "input: {input}");
        }
    }

    #[test]
    fn trims_and_lowercases() {
        assert_eq!(normalize_handle("  @Apple "), "apple");
        assert_eq!(normalize_handle("ACME_Store"), "acme_store");
    }

    #[test]
    fn normalization_is_idempotent() {
        for input in ["handle", "@Handle", "https://instagram.com/Handle/"] {
            let once = normalize_handle(input);
            assert_eq!(normalize_handle(&once), once);
        }
    }

    #[test]
    fn whitespace_only_input_yields_empty() {
        assert_eq!(normalize_handle("   "), "");
    }

    #[test]
    fn profile_url_points_at_the_handle() {
        assert_eq!(profile_url("acme"), "https://instagram.com/acme");
    }
}
