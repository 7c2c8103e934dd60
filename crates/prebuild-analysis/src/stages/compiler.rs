//! Seam for the external compiler invocation.

use crate::unit::BuildUnit;

/// Runs the compiler for a build unit. The compiler is expected to write
/// its diagnostic log to the unit's `ErrorLog` path when one is set.
pub trait Compiler {
    fn compile(&self, unit: &BuildUnit) -> Result<(), String>;
}

impl<F> Compiler for F
where
    F: Fn(&BuildUnit) -> Result<(), String>,
{
    fn compile(&self, unit: &BuildUnit) -> Result<(), String> {
        self(unit)
    }
}
