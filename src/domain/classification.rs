use std::fmt;

use serde::{Deserialize, Serialize};

use super::Confidence;

/// The two classes the local model distinguishes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum ClassLabel {
    Normal,
    Pneumonia,
}

impl ClassLabel {
    /// Output index order of the classifier head.
    pub const ALL: [ClassLabel; 2] = [ClassLabel::Normal, ClassLabel::Pneumonia];

    pub fn from_index(index: usize) -> Option<Self> {
        Self::ALL.get(index).copied()
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            ClassLabel::Normal => "NORMAL",
            ClassLabel::Pneumonia => "PNEUMONIA",
        }
    }
}

impl fmt::Display for ClassLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Classification {
    pub label: ClassLabel,
    pub confidence: Confidence,
    pub normal_probability: Confidence,
    pub pneumonia_probability: Confidence,
}

impl Classification {
    /// Builds a classification from the two softmax outputs, in `ClassLabel::ALL` order.
    pub fn from_probabilities(normal: f64, pneumonia: f64) -> Self {
        let (label, confidence) = if pneumonia > normal {
            (ClassLabel::Pneumonia, pneumonia)
        } else {
            (ClassLabel::Normal, normal)
        };
        Self {
            label,
            confidence: Confidence::new(confidence),
            normal_probability: Confidence::new(normal),
            pneumonia_probability: Confidence::new(pneumonia),
        }
    }
}
