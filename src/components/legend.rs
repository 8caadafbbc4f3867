use crate::core::registry::PlantRegistry;

/// Color → plant-name mapping shown under the header.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LegendEntry {
    pub color: String,
    pub name: String,
}

/// Legend entries in registry (insertion) order. Empty when there are no
/// plants, in which case nothing renders.
pub fn legend(registry: &PlantRegistry) -> Vec<LegendEntry> {
    registry
        .plants()
        .iter()
        .map(|p| LegendEntry {
            color: p.color.clone(),
            name: p.name.clone(),
        })
        .collect()
}

pub fn render(entries: &[LegendEntry]) -> String {
    if entries.is_empty() {
        return String::new();
    }
    let mut out = String::new();
    for entry in entries {
        out.push_str(&format!("  ● {} {}\n", entry.color, entry.name));
    }
    out
}
