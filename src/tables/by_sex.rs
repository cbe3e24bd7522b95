//! Scalars that differ only by sex

use crate::input::Sex;
use serde::{Deserialize, Serialize};

/// One value per sex, e.g. a sick-leave coefficient or a statutory age
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BySex<T> {
    pub female: T,
    pub male: T,
}

impl<T: Copy> BySex<T> {
    pub fn new(female: T, male: T) -> Self {
        Self { female, male }
    }

    pub fn get(&self, sex: Sex) -> T {
        match sex {
            Sex::Female => self.female,
            Sex::Male => self.male,
        }
    }
}

impl BySex<f64> {
    /// Share of the annual contribution base lost to average sick days
    /// (roughly 17 days for women and 12 for men out of 365)
    pub fn default_sick_leave() -> Self {
        Self::new(0.046, 0.033)
    }
}

impl BySex<u32> {
    pub fn default_retirement_ages() -> Self {
        Self::new(60, 65)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_get_by_sex() {
        let ages = BySex::<u32>::default_retirement_ages();
        assert_eq!(ages.get(Sex::Female), 60);
        assert_eq!(ages.get(Sex::Male), 65);

        let sick = BySex::<f64>::default_sick_leave();
        assert!(sick.get(Sex::Female) > sick.get(Sex::Male));
    }
}
