//! Energetic scaling tables
//!
//! Neuron density across animal clades, compute per dollar across hardware
//! generations, and frontier training runs. Small, curated, and compiled in.

/// Biological groups in legend order
pub const BIO_GROUPS: [&str; 4] = ["Reptiles", "Birds", "Mammals", "Primates"];

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Organism {
    pub entity: &'static str,
    pub body_mass_kg: f64,
    pub neurons: f64,
    pub neurons_per_kg: f64,
    pub group: &'static str,
    pub impact: &'static str,
    pub notes: &'static str,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Processor {
    pub entity: &'static str,
    pub year: i32,
    /// Computations per second per dollar
    pub cps_per_dollar: f64,
    pub category: &'static str,
    pub impact: &'static str,
    pub notes: &'static str,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TrainingRun {
    pub entity: &'static str,
    pub year: i32,
    pub flops: f64,
    pub impact: &'static str,
    pub notes: &'static str,
}

const fn organism(
    entity: &'static str,
    body_mass_kg: f64,
    neurons: f64,
    neurons_per_kg: f64,
    group: &'static str,
    impact: &'static str,
    notes: &'static str,
) -> Organism {
    Organism {
        entity,
        body_mass_kg,
        neurons,
        neurons_per_kg,
        group,
        impact,
        notes,
    }
}

const fn processor(
    entity: &'static str,
    year: i32,
    cps_per_dollar: f64,
    impact: &'static str,
    notes: &'static str,
) -> Processor {
    Processor {
        entity,
        year,
        cps_per_dollar,
        category: "Hardware",
        impact,
        notes,
    }
}

pub const ORGANISMS: &[Organism] = &[
    organism("Crocodile", 90.0, 8.3e7, 9.22e5, "Reptiles", "Low", "Low neuron density; ~20x fewer than endotherms"),
    organism("Goldcrest", 0.0045, 1.64e8, 3.64e10, "Birds", "High", "Smallest bird, extreme density"),
    organism("Corvid/Rook", 0.5, 2e9, 4e9, "Birds", "High", "Primate-like forebrain neurons"),
    organism("Parrot (African Grey)", 0.4, 3e9, 7.5e9, "Birds", "High", "High cognition, tool use"),
    organism("Pigeon", 0.35, 3.1e8, 8.86e8, "Birds", "Medium", "Common bird baseline"),
    organism("Mouse", 0.02, 7.1e7, 3.55e9, "Mammals", "Medium", "Rodent baseline"),
    organism("Rat", 0.3, 2e8, 6.67e8, "Mammals", "Medium", "Rodent"),
    organism("Cat", 4.0, 7.6e8, 1.9e8, "Mammals", "Medium", "Carnivore"),
    organism("Dog", 15.0, 5.3e8, 3.5e7, "Mammals", "Medium", "Carnivore"),
    organism("Elephant", 4000.0, 2.57e11, 6.43e7, "Mammals", "High", "Largest land mammal; 257B neurons but low density"),
    organism("Marmoset", 0.3, 1.4e9, 4.67e9, "Primates", "High", "Small primate, linear scaling"),
    organism("Macaque", 7.0, 6.4e9, 9.14e8, "Primates", "High", "Old World monkey"),
    organism("Chimpanzee", 50.0, 2.8e10, 5.6e8, "Primates", "High", "Great ape, closest relative"),
    organism("Human", 70.0, 8.6e10, 1.23e9, "Primates", "Transformative", "86B neurons, EQ~7 (outlier)"),
    organism("Lizard", 0.1, 1e7, 1e8, "Reptiles", "Low", "Small reptile baseline"),
];

pub const HARDWARE: &[Processor] = &[
    processor("Zeus II 1939", 1939, 6.5e-6, "Low", "Kurzweil baseline; relay computer"),
    processor("ENIAC 1945", 1945, 1e-4, "Medium", "Vacuum tube era"),
    processor("UNIVAC 1951", 1951, 1e-3, "Medium", "First commercial computer"),
    processor("IBM 7090 1959", 1959, 0.1, "Medium", "Transistor mainframe"),
    processor("Intel 4004 1971", 1971, 10.0, "High", "First microprocessor"),
    processor("Intel 8086 1978", 1978, 100.0, "Medium", "PC architecture foundation"),
    processor("Intel 386 1985", 1985, 1e4, "Medium", "32-bit era"),
    processor("Pentium 1993", 1993, 1e6, "Medium", "Superscalar x86"),
    processor("Pentium 4 2000", 2000, 1e8, "Medium", "GHz race peak"),
    processor("Core i7 2008", 2008, 1e9, "High", "Multi-core era"),
    processor("NVIDIA V100 2017", 2017, 1e10, "High", "GPU for deep learning"),
    processor("NVIDIA A100 2020", 2020, 5e10, "High", "AI accelerator"),
    processor("NVIDIA B200 2024", 2024, 5e11, "Transformative", "~75 quadrillion-fold increase since 1939"),
    processor("Projected 2026", 2026, 2e12, "High", "Kurzweil trajectory projection"),
];

pub const AI_MODELS: &[TrainingRun] = &[
    TrainingRun { entity: "AlexNet 2012", year: 2012, flops: 6e17, impact: "High", notes: "Deep learning breakthrough; ImageNet" },
    TrainingRun { entity: "GPT-2 2019", year: 2019, flops: 1e19, impact: "High", notes: "Emergent scaling behaviors" },
    TrainingRun { entity: "GPT-3 2020", year: 2020, flops: 3.14e23, impact: "Transformative", notes: "175B params; few-shot learning" },
    TrainingRun { entity: "GPT-4 2023", year: 2023, flops: 2e25, impact: "Transformative", notes: "Multimodal frontier" },
    TrainingRun { entity: "Grok-4 2026", year: 2026, flops: 5e26, impact: "Transformative", notes: "Projected frontier model" },
];

/// Organisms belonging to one group, in table order
pub fn organisms_in(group: &str) -> impl Iterator<Item = &'static Organism> + '_ {
    ORGANISMS.iter().filter(move |o| o.group == group)
}
