use std::collections::HashSet;
use std::fs;
use std::path::Path;

use anyhow::{bail, Context, Result};
use serde::{Deserialize, Serialize};

use crate::selection::{RootSelection, SectionGroup};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ChecklistConfig {
    /// Label of the master "select all" row.
    pub title: String,
    pub sections: Vec<SectionConfig>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SectionConfig {
    pub title: String,
    pub items: Vec<String>,
    #[serde(default = "default_expanded")]
    pub expanded: bool,
    /// Items that start out selected.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub selected: Vec<String>,
}

fn default_expanded() -> bool {
    true
}

impl SectionConfig {
    pub fn new(title: &str, items: impl IntoIterator<Item = String>) -> Self {
        Self {
            title: title.to_string(),
            items: items.into_iter().collect(),
            expanded: true,
            selected: Vec::new(),
        }
    }
}

impl Default for ChecklistConfig {
    fn default() -> Self {
        Self {
            title: "Select All".to_string(),
            sections: vec![
                SectionConfig::new("Section A", (1..=8).map(|n| format!("A{n}"))),
                SectionConfig::new("Section B", (1..=8).map(|n| format!("B{n}"))),
            ],
        }
    }
}

impl ChecklistConfig {
    pub fn load(path: &Path) -> Result<Self> {
        let raw = fs::read_to_string(path)
            .with_context(|| format!("failed to read config {}", path.display()))?;
        let config: Self = serde_json::from_str(&raw)
            .with_context(|| format!("failed to parse config {}", path.display()))?;
        config.validate()?;
        log::info!(
            "config: loaded {} sections from {}",
            config.sections.len(),
            path.display()
        );
        Ok(config)
    }

    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    pub fn validate(&self) -> Result<()> {
        if self.sections.is_empty() {
            bail!("config must define at least one section");
        }
        for section in &self.sections {
            let names: HashSet<&str> = section.items.iter().map(String::as_str).collect();
            if let Some(unknown) = section
                .selected
                .iter()
                .find(|name| !names.contains(name.as_str()))
            {
                bail!(
                    "section '{}' marks unknown item '{unknown}' as selected",
                    section.title
                );
            }
        }
        Ok(())
    }

    /// Builds the selection model. Duplicate item names are rejected here.
    pub fn build(&self) -> Result<RootSelection> {
        self.validate()?;
        let groups = self
            .sections
            .iter()
            .map(|section| -> Result<SectionGroup> {
                let selected: HashSet<&str> =
                    section.selected.iter().map(String::as_str).collect();
                let group = SectionGroup::with_selection(
                    section.title.as_str(),
                    section
                        .items
                        .iter()
                        .map(|name| (name.as_str(), selected.contains(name.as_str()))),
                )?;
                group.set_expanded(section.expanded);
                Ok(group)
            })
            .collect::<Result<Vec<_>>>()?;
        RootSelection::new(self.title.as_str(), groups)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn default_matches_two_sections_of_eight() {
        let config = ChecklistConfig::default();
        assert_eq!(config.sections.len(), 2);
        assert_eq!(config.sections[0].items.first().map(String::as_str), Some("A1"));
        assert_eq!(config.sections[1].items.last().map(String::as_str), Some("B8"));
        assert!(config.sections.iter().all(|s| s.items.len() == 8 && s.expanded));
    }

    #[test]
    fn builds_model_with_initial_state() {
        let mut config = ChecklistConfig::default();
        config.sections[1].selected = config.sections[1].items.clone();
        config.sections[0].expanded = false;

        let root = config.build().unwrap();

        assert_eq!(root.title(), "Select All");
        assert!(!root.groups()[0].is_expanded());
        assert!(root.groups()[1].is_all_selected());
        assert!(!root.is_all_selected());
        assert_eq!(root.selected_count().get(), 8);
    }

    #[test]
    fn rejects_unknown_selected_item() {
        let mut config = ChecklistConfig::default();
        config.sections[0].selected = vec!["Z1".to_string()];
        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("unknown item 'Z1'"));
    }

    #[test]
    fn rejects_duplicate_items_on_build() {
        let config = ChecklistConfig {
            title: "All".to_string(),
            sections: vec![SectionConfig::new(
                "Dupes",
                ["X".to_string(), "X".to_string()],
            )],
        };
        assert!(config.build().is_err());
    }

    #[test]
    fn rejects_empty_section_list() {
        let config = ChecklistConfig {
            title: "All".to_string(),
            sections: Vec::new(),
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn loads_json_with_defaults_filled_in() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(
            file,
            r#"{{"sections": [{{"title": "Fruit", "items": ["apple", "pear"], "selected": ["pear"]}}]}}"#
        )
        .unwrap();

        let config = ChecklistConfig::load(file.path()).unwrap();

        assert_eq!(config.title, "Select All");
        assert!(config.sections[0].expanded);
        let root = config.build().unwrap();
        assert_eq!(root.selected_count().get(), 1);
    }

    #[test]
    fn json_round_trips_through_print_format() {
        let config = ChecklistConfig::default();
        let json = config.to_json().unwrap();
        let parsed: ChecklistConfig = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, config);
    }

    #[test]
    fn load_reports_missing_file() {
        let err = ChecklistConfig::load(Path::new("/definitely/not/here.json")).unwrap_err();
        assert!(err.to_string().contains("failed to read config"));
    }
}
