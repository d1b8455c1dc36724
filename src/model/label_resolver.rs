//! Label resolution for Newick strings inside Nexus files.
//!
//! Nexus files may abbreviate tip names in their tree strings, either via a
//! `TRANSLATE` table (`1 hCoV-19/...`, `2 hCoV-19/...`) or by referring to the
//! 1-based position of a taxon in the `TAXA` block. [LabelResolver] maps the
//! raw token found in the Newick string to the full tip name.

use std::collections::HashMap;

// =#========================================================================#=
// LABEL RESOLVER
// =#========================================================================€=
/// Resolves raw Newick labels into tip names.
///
/// - [`Verbatim`](Self::Verbatim): plain Newick files, or Nexus without
///   `TAXA` block or `TRANSLATE` command
/// - [`Nexus`](Self::Nexus): Nexus files; tries in order:
///   1. Key of the `TRANSLATE` map
///   2. Integer as 1-based index of label in the `TAXA` block
///   3. Verbatim label, which must then be listed in the `TAXA` block
///      (if one was given)
#[derive(Debug, Clone, Default)]
pub enum LabelResolver {
    /// Labels are taken as they are.
    #[default]
    Verbatim,

    /// Labels are resolved through `TRANSLATE` and `TAXA` information.
    Nexus {
        /// `TRANSLATE` key -> tip name
        translation: HashMap<String, String>,
        /// Tip names in `TAXA` block order (possibly empty)
        taxa: Vec<String>,
    },
}

impl LabelResolver {
    /// Creates a resolver for a Nexus file.
    ///
    /// Falls back to [`Verbatim`](Self::Verbatim) if neither a translation nor
    /// taxa are given.
    pub fn for_nexus(translation: Option<HashMap<String, String>>, taxa: Vec<String>) -> Self {
        match translation {
            None if taxa.is_empty() => LabelResolver::Verbatim,
            translation => LabelResolver::Nexus {
                translation: translation.unwrap_or_default(),
                taxa,
            },
        }
    }

    /// Resolves a raw label.
    ///
    /// # Errors
    /// Returns a message if the label cannot be resolved against a `TAXA` block.
    pub fn resolve_label(&self, raw: &str) -> Result<String, String> {
        match self {
            LabelResolver::Verbatim => Ok(raw.to_string()),
            LabelResolver::Nexus { translation, taxa } => {
                if let Some(label) = translation.get(raw) {
                    return Ok(label.clone());
                }

                if let Ok(position) = raw.parse::<usize>() {
                    if (1..=taxa.len()).contains(&position) {
                        return Ok(taxa[position - 1].clone());
                    }
                }

                if taxa.is_empty() || taxa.iter().any(|t| t == raw) {
                    Ok(raw.to_string())
                } else {
                    Err(format!("'{raw}' is neither a TRANSLATE key nor a TAXA label"))
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_translate_takes_precedence_over_index() {
        let translation = HashMap::from([("2".to_string(), "Kea".to_string())]);
        let taxa = vec!["Kaka".to_string(), "Kakapo".to_string()];
        let resolver = LabelResolver::for_nexus(Some(translation), taxa);

        assert_eq!(resolver.resolve_label("2").unwrap(), "Kea");
        assert_eq!(resolver.resolve_label("1").unwrap(), "Kaka");
        assert_eq!(resolver.resolve_label("Kakapo").unwrap(), "Kakapo");
        assert!(resolver.resolve_label("Kiwi").is_err());
    }

    #[test]
    fn test_without_taxa_or_translation_is_verbatim() {
        let resolver = LabelResolver::for_nexus(None, Vec::new());
        assert!(matches!(resolver, LabelResolver::Verbatim));
        assert_eq!(resolver.resolve_label("7").unwrap(), "7");
    }
}
