use super::error::{Error, Result};

pub trait BoundCheck {
    /// return the reason if fail
    fn check(&self) -> Option<&'static str>;
    fn bound_check(&self) -> Result<()> {
        match self.check() {
            Some(reason) => {
                tracing::debug!(reason, "bound_check_fail");
                Err(Error::illegal(reason))
            }
            None => Ok(()),
        }
    }
}

/// true if the string is empty or only whitespace
#[inline]
pub fn blank(src: &str) -> bool {
    src.trim().is_empty()
}
