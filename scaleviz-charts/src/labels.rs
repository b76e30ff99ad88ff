//! Annotation tables
//!
//! Which points get a visible label, what the label says, and where it sits
//! relative to its point. Lookups are substring matches against the event or
//! entity name and the first matching entry wins, so table order matters.

/// Event substring → short label for the AI compute timeline
const SHORT_LABELS: &[(&str, &str)] = &[
    ("Vacuum Tube", "Vacuum Tube"),
    ("Turing Machine", "Turing Machine"),
    ("Shannon", "Shannon"),
    ("ENIAC", "ENIAC"),
    ("Transistor", "Transistor"),
    ("Dartmouth", "AI Born"),
    ("Perceptron", "Perceptron"),
    ("Integrated Circuit", "IC"),
    ("Moore", "Moore's Law"),
    ("Intel 4004", "4004"),
    ("First AI Winter", "AI Winter I"),
    ("Backpropagation", "Backprop"),
    ("Second AI Winter", "AI Winter II"),
    ("Deep Blue", "Deep Blue"),
    ("CUDA", "CUDA"),
    ("ImageNet dataset", "ImageNet"),
    ("AWS launch", "AWS"),
    ("AlexNet", "AlexNet"),
    ("DQN", "DQN"),
    ("GANs", "GANs"),
    ("AlphaGo", "AlphaGo"),
    ("Transformers", "Transformers"),
    ("GPT-1", "GPT-1/BERT"),
    ("GPT-2", "GPT-2"),
    ("GPT-3", "GPT-3"),
    ("AlphaFold", "AlphaFold"),
    ("DALL-E", "DALL-E"),
    ("ChatGPT", "ChatGPT"),
    ("Stable Diffusion", "Stable Diff"),
    ("GPT-4", "GPT-4"),
    ("Gemini 1.0", "Gemini/Llama2"),
    ("Sora", "Sora/Claude3/o1"),
    ("Llama 3.1", "Llama 3.1"),
    ("Grok-3", "Grok-3"),
    ("o3", "o3/Claude4"),
    ("Quantum", "Quantum"),
    ("Agentic AI", "Agentic AI"),
    ("Optimus", "Optimus"),
    ("Omni-modal", "Omni-modal"),
];

/// Position of a label relative to its point
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LabelPlacement {
    /// Horizontal offset in years; negative places the label to the left
    pub year_offset: f64,
    /// Vertical offset as a multiplier of the point's value
    pub value_multiplier: f64,
    /// Counter-clockwise text rotation in degrees
    pub rotation: f64,
}

impl LabelPlacement {
    const fn new(year_offset: f64, value_multiplier: f64, rotation: f64) -> Self {
        Self {
            year_offset,
            value_multiplier,
            rotation,
        }
    }

    pub fn is_leftward(&self) -> bool {
        self.year_offset < 0.0
    }
}

/// Placement for labels missing from the table
pub const DEFAULT_PLACEMENT: LabelPlacement = LabelPlacement::new(1.5, 2.5, 30.0);

/// Label → placement; `None` suppresses a label that the frontier-cluster
/// note already covers
const LABEL_PLACEMENTS: &[(&str, Option<LabelPlacement>)] = &[
    ("Vacuum Tube", Some(LabelPlacement::new(2.0, 3.0, 25.0))),
    ("Turing Machine", Some(LabelPlacement::new(2.0, 4.0, 30.0))),
    ("Shannon", Some(LabelPlacement::new(-8.0, 0.3, -30.0))),
    ("ENIAC", Some(LabelPlacement::new(2.0, 3.0, 25.0))),
    ("Transistor", Some(LabelPlacement::new(2.0, 4.0, 30.0))),
    ("AI Born", Some(LabelPlacement::new(2.0, 3.0, 25.0))),
    ("Perceptron", Some(LabelPlacement::new(-6.0, 0.4, -25.0))),
    ("IC", Some(LabelPlacement::new(2.0, 3.0, 25.0))),
    ("Moore's Law", Some(LabelPlacement::new(2.0, 3.0, 30.0))),
    ("4004", Some(LabelPlacement::new(-5.0, 0.4, -20.0))),
    ("AI Winter I", Some(LabelPlacement::new(2.0, 3.0, 25.0))),
    ("Backprop", Some(LabelPlacement::new(2.0, 4.0, 30.0))),
    ("AI Winter II", Some(LabelPlacement::new(-6.0, 0.3, -20.0))),
    ("Deep Blue", Some(LabelPlacement::new(2.0, 4.0, 30.0))),
    ("CUDA", Some(LabelPlacement::new(1.0, 4.0, 35.0))),
    ("ImageNet", Some(LabelPlacement::new(1.0, 3.0, 30.0))),
    ("AWS", Some(LabelPlacement::new(-5.0, 0.3, -25.0))),
    ("AlexNet", Some(LabelPlacement::new(1.5, 3.0, 35.0))),
    ("DQN", Some(LabelPlacement::new(-4.0, 0.3, -20.0))),
    ("GANs", Some(LabelPlacement::new(-5.0, 0.4, -25.0))),
    ("AlphaGo", Some(LabelPlacement::new(1.0, 3.0, 35.0))),
    ("Transformers", Some(LabelPlacement::new(-5.0, 0.3, -30.0))),
    ("GPT-1/BERT", Some(LabelPlacement::new(1.0, 3.0, 30.0))),
    ("GPT-2", Some(LabelPlacement::new(1.0, 2.5, 30.0))),
    ("GPT-3", Some(LabelPlacement::new(0.8, 2.5, 35.0))),
    ("AlphaFold", Some(LabelPlacement::new(-3.5, 0.35, -25.0))),
    ("DALL-E", Some(LabelPlacement::new(-3.5, 0.45, -20.0))),
    ("ChatGPT", Some(LabelPlacement::new(0.6, 3.0, 45.0))),
    ("Stable Diff", Some(LabelPlacement::new(-3.5, 0.25, -35.0))),
    ("GPT-4", Some(LabelPlacement::new(0.5, 2.2, 50.0))),
    ("Gemini/Llama2", None),
    ("Sora/Claude3/o1", Some(LabelPlacement::new(0.4, 2.0, 50.0))),
    ("Llama 3.1", None),
    ("Grok-3", Some(LabelPlacement::new(0.4, 1.8, 50.0))),
    ("o3/Claude4", Some(LabelPlacement::new(-1.8, 0.55, -40.0))),
    ("Quantum", Some(LabelPlacement::new(-3.5, 0.4, -30.0))),
    ("Agentic AI", Some(LabelPlacement::new(0.3, 1.6, 55.0))),
    ("Optimus", Some(LabelPlacement::new(-1.5, 0.6, -40.0))),
    ("Omni-modal", Some(LabelPlacement::new(0.3, 1.5, 55.0))),
];

/// Events that get an arrow label on the interactive AI timeline:
/// `(year, substring of the event name)`
pub const KEY_EVENTS: &[(i32, &str)] = &[
    (1936, "Turing Machine"),
    (1945, "ENIAC"),
    (1947, "Transistor"),
    (1956, "AI Born"),
    (1965, "Moore's Law"),
    (1997, "Deep Blue"),
    (2007, "CUDA"),
    (2009, "ImageNet"),
    (2012, "AlexNet"),
    (2016, "AlphaGo"),
    (2017, "Transformers"),
    (2020, "GPT-3"),
    (2022, "ChatGPT"),
    (2023, "GPT-4"),
    (2025, "Grok-3"),
];

/// Event substring → anchor label on the adoption timeline
const ADOPTION_ANCHORS: &[(&str, &str)] = &[
    ("World Wide Web", "WWW"),
    ("WWW", "WWW"),
    ("ARPANET", "ARPANET"),
    ("iPhone", "iPhone"),
    ("ChatGPT", "ChatGPT"),
];

/// Entity label on the energetic biology panel: mass multiplier, value
/// multiplier, text
pub const BIOLOGY_LABELS: &[(&str, f64, f64, &str)] = &[
    ("Human", 1.5, 1.5, "Human<br>(86B neurons, EQ~7)"),
    ("Elephant", 0.3, 0.4, "Elephant"),
    ("Goldcrest", 2.0, 2.0, "Goldcrest<br>(smallest bird)"),
    ("Corvid/Rook", 2.0, 1.5, "Corvid"),
    ("Mouse", 2.0, 0.5, "Mouse"),
    ("Crocodile", 0.3, 2.0, "Crocodile"),
];

/// Entity label on the energetic technology panel: year offset, value
/// multiplier, text
pub const TECHNOLOGY_LABELS: &[(&str, f64, f64, &str)] = &[
    ("Zeus II 1939", -5.0, 3.0, "Zeus II<br>(1939)"),
    ("ENIAC 1945", 3.0, 2.0, "ENIAC"),
    ("Intel 4004 1971", 3.0, 2.0, "Intel 4004"),
    ("NVIDIA B200 2024", 2.0, 0.3, "NVIDIA B200<br>(75 quadrillion-fold)"),
    ("Projected 2026", 2.0, 2.0, "2026<br>projected"),
];

/// Short label for a milestone event, if it is one worth labelling
pub fn short_label(event: &str) -> Option<&'static str> {
    SHORT_LABELS
        .iter()
        .find(|(key, _)| event.contains(key))
        .map(|(_, label)| *label)
}

/// Placement for a short label; `None` when the label is suppressed
pub fn placement_for(label: &str) -> Option<LabelPlacement> {
    match LABEL_PLACEMENTS.iter().find(|(name, _)| *name == label) {
        Some((_, placement)) => *placement,
        None => Some(DEFAULT_PLACEMENT),
    }
}

/// Key-event label for a milestone on the interactive timeline
pub fn key_event_label(year: i32, event: &str) -> Option<&'static str> {
    KEY_EVENTS
        .iter()
        .find(|(key_year, label)| *key_year == year && event.contains(label))
        .map(|(_, label)| *label)
}

/// Anchor label for an adoption event
pub fn adoption_anchor(event: &str) -> Option<&'static str> {
    ADOPTION_ANCHORS
        .iter()
        .find(|(key, _)| event.contains(key))
        .map(|(_, label)| *label)
}

/// Lookup in one of the energetic entity label tables
pub fn entity_label(
    table: &'static [(&'static str, f64, f64, &'static str)],
    entity: &str,
) -> Option<(f64, f64, &'static str)> {
    table
        .iter()
        .find(|(name, ..)| *name == entity)
        .map(|(_, dx, mult, text)| (*dx, *mult, *text))
}
