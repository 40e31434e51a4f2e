use super::SymbolError;

/// Cooperative cancellation signal polled between pipeline stages.
pub trait Cancellation {
    fn is_cancelled(&self) -> bool;

    fn check(&self) -> Result<(), SymbolError> {
        if self.is_cancelled() {
            Err(SymbolError::Cancelled)
        } else {
            Ok(())
        }
    }
}

impl<F> Cancellation for F
where
    F: Fn() -> bool,
{
    fn is_cancelled(&self) -> bool {
        self()
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct NeverCancelled;

impl Cancellation for NeverCancelled {
    fn is_cancelled(&self) -> bool {
        false
    }
}
