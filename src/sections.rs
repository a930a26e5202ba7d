//! Section Switcher
//!
//! Exactly one named section of the console is active at a time.

use std::fmt;
use std::str::FromStr;

/// Top-level sections, in sidebar order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Section {
    /// Summary cards and graph links
    Charts,
    /// Preset optimisation prompts
    Optimisation,
    /// Chat with the analysis assistant
    Assistant,
}

impl Section {
    pub const ALL: [Section; 3] = [Section::Charts, Section::Optimisation, Section::Assistant];

    /// Stable identifier
    pub fn id(&self) -> &'static str {
        match self {
            Section::Charts => "charts",
            Section::Optimisation => "optimisation",
            Section::Assistant => "assistant",
        }
    }

    /// Sidebar label
    pub fn label(&self) -> &'static str {
        match self {
            Section::Charts => "Charts",
            Section::Optimisation => "Optimisation",
            Section::Assistant => "TeraOps Assistant",
        }
    }
}

impl fmt::Display for Section {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for Section {
    type Err = UnknownSection;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let key = s.trim().to_lowercase();
        let key = key.strip_suffix("-section").unwrap_or(&key);

        match key {
            "charts" | "dashboard" => Ok(Section::Charts),
            "optimisation" | "optimization" | "tools" => Ok(Section::Optimisation),
            "assistant" | "chat" | "teraops assistant" => Ok(Section::Assistant),
            _ => Err(UnknownSection(s.trim().to_string())),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("Unknown section: {0} (expected charts, optimisation or assistant)")]
pub struct UnknownSection(pub String);

/// Tracks which section is visible
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SectionSwitcher {
    active: [bool; 3],
}

impl SectionSwitcher {
    /// Start with `initial` active
    pub fn new(initial: Section) -> Self {
        let mut switcher = Self { active: [false; 3] };
        switcher.activate(initial);
        switcher
    }

    /// Make `section` the only active one
    pub fn activate(&mut self, section: Section) {
        for (flag, candidate) in self.active.iter_mut().zip(Section::ALL) {
            *flag = candidate == section;
        }
    }

    /// Activate a section by name
    pub fn activate_named(&mut self, name: &str) -> Result<Section, UnknownSection> {
        let section = name.parse()?;
        self.activate(section);
        Ok(section)
    }

    pub fn is_active(&self, section: Section) -> bool {
        Section::ALL
            .iter()
            .position(|s| *s == section)
            .map(|i| self.active[i])
            .unwrap_or(false)
    }

    /// The section currently shown
    pub fn active(&self) -> Section {
        Section::ALL
            .into_iter()
            .zip(self.active)
            .find_map(|(section, on)| on.then_some(section))
            .unwrap_or(Section::Charts)
    }
}

impl Default for SectionSwitcher {
    fn default() -> Self {
        Self::new(Section::Charts)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn active_count(switcher: &SectionSwitcher) -> usize {
        Section::ALL.iter().filter(|s| switcher.is_active(**s)).count()
    }

    #[test]
    fn test_default_is_charts() {
        let switcher = SectionSwitcher::default();
        assert_eq!(switcher.active(), Section::Charts);
        assert_eq!(active_count(&switcher), 1);
    }

    #[test]
    fn test_switch_deactivates_all_others() {
        let mut switcher = SectionSwitcher::default();

        for target in Section::ALL {
            switcher.activate(target);
            assert_eq!(switcher.active(), target);
            for other in Section::ALL {
                assert_eq!(switcher.is_active(other), other == target);
            }
        }
    }

    #[test]
    fn test_activate_same_section_twice() {
        let mut switcher = SectionSwitcher::new(Section::Assistant);
        switcher.activate(Section::Assistant);
        assert_eq!(active_count(&switcher), 1);
        assert!(switcher.is_active(Section::Assistant));
    }

    #[test]
    fn test_activate_named() {
        let mut switcher = SectionSwitcher::default();
        assert_eq!(switcher.activate_named("Chat").unwrap(), Section::Assistant);
        assert_eq!(switcher.activate_named("optimization").unwrap(), Section::Optimisation);
        assert_eq!(switcher.activate_named("dashboard-section").unwrap(), Section::Charts);

        let err = switcher.activate_named("settings").unwrap_err();
        assert_eq!(err, UnknownSection("settings".to_string()));
        // Unknown names leave the current section alone
        assert_eq!(switcher.active(), Section::Charts);
    }
}
