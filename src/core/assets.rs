//! Embedded codex documents.
//!
//! The codex (the reference prose for signatures, statuses, spreads,
//! and the collaborator protocol) is baked into the binary so `docs`
//! works anywhere the binary runs, with no install directory to locate.

/// Embeds codex documents at compile time and generates the lookup and
/// listing functions over them.
macro_rules! embedded_docs {
    ($($path:expr => $const_name:ident),* $(,)?) => {
        $(
            pub const $const_name: &str =
                include_str!(concat!("../../codex/", $path));
        )*

        pub fn get_embedded_doc(path: &str) -> Option<String> {
            let key = path.strip_prefix("codex/").unwrap_or(path);
            match key {
                $( $path => Some($const_name.to_string()), )*
                _ => None,
            }
        }

        pub fn list_docs() -> Vec<String> {
            vec![ $( $path.to_string(), )* ]
        }
    };
}

embedded_docs! {
    "OVERVIEW.md" => EMBEDDED_OVERVIEW,
    "STATUSES.md" => EMBEDDED_STATUSES,
    "HOUSES.md" => EMBEDDED_HOUSES,
    "CHANNELS.md" => EMBEDDED_CHANNELS,
    "SPREADS.md" => EMBEDDED_SPREADS,
    "COLLABORATOR.md" => EMBEDDED_COLLABORATOR,
}

pub fn get_doc(path: &str) -> Option<String> {
    get_embedded_doc(path)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_every_listed_doc_resolves() {
        for path in list_docs() {
            let doc = get_doc(&path);
            assert!(doc.is_some(), "doc {} missing", path);
            assert!(!doc.unwrap().is_empty());
        }
    }

    #[test]
    fn test_prefix_is_tolerated() {
        assert_eq!(get_doc("codex/OVERVIEW.md"), get_doc("OVERVIEW.md"));
        assert!(get_doc("MISSING.md").is_none());
    }
}
