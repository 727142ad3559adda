//! Captured inter-token whitespace.
//!
//! Whitespace is data, not derived: every node hydrated from real parsed
//! source carries the literal separator text observed at parse time, keyed
//! by a small per-kind region index. Regeneration of an unedited subtree
//! replays these regions verbatim, which is what makes the round trip
//! byte-identical. Synthesized nodes keep `use_default = true` and fall
//! back to [`NodeKind::default_regions`](super::NodeKind::default_regions).

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use smol_str::SmolStr;

/// Per-node table of literal inter-token separators.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WhitespaceDescriptor {
    /// Region index → literal separator text. Ordered for stable egress.
    #[serde(default)]
    pub regions: IndexMap<u32, SmolStr>,
    /// `true` = synthesize canonical formatting, `false` = replay captured
    /// whitespace exactly. A wire descriptor that omits this field counts
    /// as captured: the producer only sends a descriptor for parsed nodes.
    #[serde(default)]
    pub use_default: bool,
}

impl Default for WhitespaceDescriptor {
    fn default() -> Self {
        Self {
            regions: IndexMap::new(),
            use_default: true,
        }
    }
}

impl WhitespaceDescriptor {
    /// Descriptor for a freshly synthesized node.
    pub fn synthesized() -> Self {
        Self::default()
    }

    /// Descriptor replaying captured regions.
    pub fn captured<I, S>(regions: I) -> Self
    where
        I: IntoIterator<Item = (u32, S)>,
        S: Into<SmolStr>,
    {
        Self {
            regions: regions.into_iter().map(|(k, v)| (k, v.into())).collect(),
            use_default: false,
        }
    }

    /// Literal text of one region. Unknown indices read as the empty
    /// string, matching the lenient behavior of the wire producer.
    pub fn region(&self, index: u32) -> &str {
        self.regions.get(&index).map(SmolStr::as_str).unwrap_or("")
    }

    pub fn set_region(&mut self, index: u32, text: impl Into<SmolStr>) {
        self.regions.insert(index, text.into());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_synthesized_defaults() {
        let ws = WhitespaceDescriptor::synthesized();
        assert!(ws.use_default);
        assert_eq!(ws.region(0), "");
    }

    #[test]
    fn test_captured_regions_replay() {
        let ws = WhitespaceDescriptor::captured([(0, ""), (1, " "), (2, " "), (3, "")]);
        assert!(!ws.use_default);
        assert_eq!(ws.region(1), " ");
        assert_eq!(ws.region(9), "");
    }

    #[test]
    fn test_set_region_overrides_captured_text() {
        let mut ws = WhitespaceDescriptor::captured([(0, " "), (1, "")]);
        ws.set_region(0, "\n");
        ws.set_region(2, " ");
        assert_eq!(ws.region(0), "\n");
        assert_eq!(ws.region(1), "");
        assert_eq!(ws.region(2), " ");
    }

    #[test]
    fn test_wire_deserialization() {
        let ws: WhitespaceDescriptor =
            serde_json::from_str(r#"{"regions":{"0":"","1":" "},"use_default":false}"#).unwrap();
        assert!(!ws.use_default);
        assert_eq!(ws.region(1), " ");

        // A descriptor on the wire is captured unless it says otherwise.
        let ws: WhitespaceDescriptor =
            serde_json::from_str(r#"{"regions":{"0":"\n"}}"#).unwrap();
        assert!(!ws.use_default);
        assert_eq!(ws.region(0), "\n");

        let ws: WhitespaceDescriptor =
            serde_json::from_str(r#"{"regions":{},"use_default":true}"#).unwrap();
        assert!(ws.use_default);
    }
}
