use sabun_chart::{SoundSlots, same_stem};
use std::fmt::{Display, Formatter, Result as FmtResult};

/// How many of a chart's sound slots another chart fills with the same sound.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Overlap {
    pub matched: usize,
    pub total: usize,
    /// `matched / total`, in `[0, 1]`.
    pub ratio: f64,
}
impl Overlap {
    /// Compares every slot of `source` against the same slot in `target`,
    /// ignoring sound file extensions.
    ///
    /// Returns `None` when either side declares no slots; there is nothing to
    /// compare.
    pub fn between(source: &SoundSlots, target: &SoundSlots) -> Option<Self> {
        if source.is_empty() || target.is_empty() {
            return None;
        }
        let matched = source
            .iter()
            .filter(|(slot, name)| target.get(*slot).is_some_and(|other| same_stem(name, other)))
            .count();
        let total = source.len();
        #[allow(clippy::cast_precision_loss)]
        let ratio = matched as f64 / total as f64;
        Some(Self { matched, total, ratio })
    }

    /// Every source slot is accounted for.
    pub fn is_complete(&self) -> bool {
        self.matched == self.total
    }
}
impl Display for Overlap {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        write!(f, "[sound {}/{}]", self.matched, self.total)
    }
}
