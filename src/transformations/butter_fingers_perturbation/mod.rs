//! Keyboard-neighbour typos

use augment_plugin::{
    Capability, Operation, PluginContext, PluginDescriptor, SentenceOperation, TaskType,
    Transformation,
};

use crate::plugin::{ClassRegistration, PackageKind, PackageRegistration};

pub static DESCRIPTOR: PluginDescriptor = PluginDescriptor {
    class_name: "ButterFingersPerturbation",
    capability: Capability::Sentence,
    tasks: &[
        TaskType::TextClassification,
        TaskType::TextToTextGeneration,
        TaskType::TextTagging,
    ],
    locales: &["en"],
    heavy: false,
};

/// Fraction of characters that are candidates for a typo
const DEFAULT_PROBABILITY: f64 = 0.05;

pub fn registration() -> PackageRegistration {
    PackageRegistration::new("butter_fingers_perturbation", PackageKind::Transformation)
        .with_class(ClassRegistration::transformation(&DESCRIPTOR, build))
}

fn build(context: &PluginContext) -> anyhow::Result<Transformation> {
    Ok(Transformation::Sentence(Box::new(
        ButterFingersPerturbation::new(DEFAULT_PROBABILITY, context.seed)?,
    )))
}

/// Replaces every n-th character with a neighbouring key on a QWERTY layout.
///
/// The perturbed positions and the chosen neighbour depend only on the
/// character index and the seed.
pub struct ButterFingersPerturbation {
    stride: u64,
    seed: u64,
}

impl ButterFingersPerturbation {
    pub fn new(probability: f64, seed: u64) -> anyhow::Result<Self> {
        if !(probability > 0.0 && probability <= 1.0) {
            anyhow::bail!("probability must be in (0, 1], got {probability}");
        }
        Ok(Self {
            stride: (1.0 / probability).round().max(1.0) as u64,
            seed,
        })
    }
}

fn neighbours(key: char) -> Option<&'static str> {
    Some(match key {
        'q' => "wa",
        'w' => "qes",
        'e' => "wrd",
        'r' => "etf",
        't' => "ryg",
        'y' => "tuh",
        'u' => "yij",
        'i' => "uok",
        'o' => "ipl",
        'p' => "ol",
        'a' => "qsz",
        's' => "adw",
        'd' => "sfe",
        'f' => "dgr",
        'g' => "fht",
        'h' => "gjy",
        'j' => "hku",
        'k' => "jli",
        'l' => "ko",
        'z' => "ax",
        'x' => "zc",
        'c' => "xv",
        'v' => "cb",
        'b' => "vn",
        'n' => "bm",
        'm' => "n",
        _ => return None,
    })
}

impl Operation for ButterFingersPerturbation {
    fn descriptor(&self) -> &'static PluginDescriptor {
        &DESCRIPTOR
    }
}

impl SentenceOperation for ButterFingersPerturbation {
    fn generate(&self, sentence: &str) -> String {
        sentence
            .chars()
            .enumerate()
            .map(|(index, c)| {
                let position = index as u64 + self.seed;
                if position % self.stride != 0 {
                    return c;
                }
                let Some(keys) = neighbours(c.to_ascii_lowercase()) else {
                    return c;
                };
                let keys: Vec<char> = keys.chars().collect();
                let typo = keys[(position % keys.len() as u64) as usize];
                if c.is_ascii_uppercase() {
                    typo.to_ascii_uppercase()
                } else {
                    typo
                }
            })
            .collect()
    }
}
