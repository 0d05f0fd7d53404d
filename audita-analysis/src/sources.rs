//! Grounding-source extraction.
//!
//! Citations come from provider metadata only. When none are present the
//! configured fallback applies: one synthetic link to the canonical profile
//! URL, or nothing — never fabricated unrelated sources.

use crate::handle::profile_url;
use crate::types::Source;
use audita_common::SourceFallback;
use audita_llm::gemini::WebCitation;
use audita_llm::prompt::FALLBACK_SOURCE_TITLE;

pub fn sources_from_citations(
    citations: Vec<WebCitation>,
    fallback: SourceFallback,
    handle: &str,
) -> Vec<Source> {
    if citations.is_empty() {
        return match fallback {
            SourceFallback::SyntheticProfileLink => vec![Source {
                title: format!("Perfil de Instagram @{handle}"),
                uri: profile_url(handle),
            }],
            SourceFallback::None => Vec::new(),
        };
    }

    citations
        .into_iter()
        .map(|citation| Source {
            title: citation
                .title
                .filter(|t| !t.trim().is_empty())
                .unwrap_or_else(|| FALLBACK_SOURCE_TITLE.to_string()),
            uri: citation.uri,
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn citation(title: Option<&str>, uri: &str) -> WebCitation {
        WebCitation {
            title: title.map(str::to_string),
            uri: uri.to_string(),
        }
    }

    #[test]
    fn citations_map_to_sources_with_title_fallback() {
        let sources = sources_from_citations(
            vec![
                citation(Some("Acme on Instagram"), "https://instagram.com/acme"),
                citation(None, "https://acme.example"),
                citation(Some("  "), "https://news.example/acme"),
            ],
            SourceFallback::SyntheticProfileLink,
            "acme",
        );
        assert_eq!(sources.len(), 3);
        assert_eq!(sources[0].title, "Acme on Instagram");
        assert_eq!(sources[1].title, FALLBACK_SOURCE_TITLE);
        assert_eq!(sources[2].title, FALLBACK_SOURCE_TITLE);
    }

    #[test]
    fn no_citations_with_synthetic_policy_yields_exactly_one_profile_link() {
        let sources =
            sources_from_citations(Vec::new(), SourceFallback::SyntheticProfileLink, "acme");
        assert_eq!(sources.len(), 1);
        assert_eq!(sources[0].uri, "https://instagram.com/acme");
    }

    #[test]
    fn no_citations_with_none_policy_yields_empty() {
        let sources = sources_from_citations(Vec::new(), SourceFallback::None, "acme");
        assert!(sources.is_empty());
    }
}
