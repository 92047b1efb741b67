//! Colormap data type and sample lookup.

use serde::{Deserialize, Serialize};

/// Suffix appended to the name of a reversed colormap variant.
pub const REVERSED_SUFFIX: &str = "_r";

/// An ordered list of color samples mapping scalar values to colors.
///
/// Samples are stored as RGBA f32 with all channels in [0, 1]. Lookup is
/// nearest-sample: the unit interval is split into `len()` equal bins and
/// [`color_at`](Self::color_at) returns the sample whose bin contains the
/// input. There is no interpolation between samples.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Colormap {
    name: String,
    samples: Vec<[f32; 4]>,
}

impl Colormap {
    /// Create a colormap from a name and its sample sequence.
    ///
    /// # Panics
    /// Panics if `samples` is empty. File-sourced data goes through
    /// [`parse_samples`](crate::parse::parse_samples), which reports an
    /// empty table as a typed error before this constructor runs.
    pub fn new(name: impl Into<String>, samples: Vec<[f32; 4]>) -> Self {
        assert!(!samples.is_empty(), "colormap needs at least one sample");
        Self {
            name: name.into(),
            samples,
        }
    }

    /// The registered name of this colormap.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The sample sequence, first to last.
    pub fn samples(&self) -> &[[f32; 4]] {
        &self.samples
    }

    /// Number of samples. Always at least 1.
    pub fn len(&self) -> usize {
        self.samples.len()
    }

    /// Always false; kept for API symmetry with `len`.
    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    /// Whether this colormap follows the reversed-variant naming
    /// convention.
    pub fn is_reversed(&self) -> bool {
        self.name.ends_with(REVERSED_SUFFIX)
    }

    /// The reversed variant: same samples in inverse order, name with
    /// [`REVERSED_SUFFIX`] appended.
    pub fn reversed(&self) -> Self {
        let mut samples = self.samples.clone();
        samples.reverse();
        Self {
            name: format!("{}{REVERSED_SUFFIX}", self.name),
            samples,
        }
    }

    /// Look up the color for `t`, clamped to [0, 1].
    ///
    /// The unit interval is split into `len()` equal bins; `t` selects the
    /// sample owning its bin, so `color_at(0.0)` is the first sample and
    /// `color_at(1.0)` the last.
    pub fn color_at(&self, t: f32) -> [f32; 4] {
        let t = t.clamp(0.0, 1.0);
        let index = ((t * self.samples.len() as f32) as usize).min(self.samples.len() - 1);
        self.samples[index]
    }
}
