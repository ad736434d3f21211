//! Consistency checks run after a config is assembled

use super::error::ConfigResult;

pub trait Validatable: Sized {
    fn validate(&self) -> ConfigResult<()>;

    /// Consume `self`, handing it back only if it passes [`validate`](Self::validate)
    fn validated(self) -> ConfigResult<Self> {
        self.validate().map(|()| self)
    }
}
