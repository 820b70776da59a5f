//! Difficulty profiles for note generation
//!
//! A profile is only meaningful paired with its originating generation mode:
//! synthetic profiles carry a note density, onset-driven profiles carry a
//! retention probability. Two modes x three tiers = six fixed profiles; the
//! closed enum rules out invalid selections at compile time.

/// Note generation strategy
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GenerationMode {
    /// Uniform random placement, independent of audio content
    Synthetic,
    /// Notes placed on detected onsets in the decoded waveform
    OnsetDriven,
}

impl GenerationMode {
    /// Human-readable name shown in prompts and logs
    pub fn label(self) -> &'static str {
        match self {
            GenerationMode::Synthetic => "Random",
            GenerationMode::OnsetDriven => "Beat Analysis",
        }
    }
}

/// Difficulty tier shared by both generation modes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tier {
    Easy,
    Medium,
    Hard,
}

impl Tier {
    /// All tiers in menu order
    pub const ALL: [Tier; 3] = [Tier::Easy, Tier::Medium, Tier::Hard];

    /// Human-readable name shown in prompts and logs
    pub fn label(self) -> &'static str {
        match self {
            Tier::Easy => "Easy",
            Tier::Medium => "Medium",
            Tier::Hard => "Hard",
        }
    }
}

/// Difficulty parameterization for one generation mode
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum DifficultyProfile {
    /// Synthetic generation: density in notes per second
    Synthetic {
        label: &'static str,
        notes_per_second: f64,
    },
    /// Onset-driven generation: probability a detected onset becomes a note
    OnsetDriven {
        label: &'static str,
        retention_probability: f64,
    },
}

impl DifficultyProfile {
    /// Resolve the profile for a mode/tier pair
    pub fn for_run(mode: GenerationMode, tier: Tier) -> Self {
        match mode {
            GenerationMode::Synthetic => {
                let notes_per_second = match tier {
                    Tier::Easy => 1.5,
                    Tier::Medium => 2.5,
                    Tier::Hard => 4.0,
                };
                DifficultyProfile::Synthetic {
                    label: tier.label(),
                    notes_per_second,
                }
            }
            GenerationMode::OnsetDriven => {
                let retention_probability = match tier {
                    Tier::Easy => 0.35,
                    Tier::Medium => 0.60,
                    Tier::Hard => 0.90,
                };
                DifficultyProfile::OnsetDriven {
                    label: tier.label(),
                    retention_probability,
                }
            }
        }
    }

    /// Tier label for logs
    pub fn label(&self) -> &'static str {
        match self {
            DifficultyProfile::Synthetic { label, .. } => label,
            DifficultyProfile::OnsetDriven { label, .. } => label,
        }
    }
}
