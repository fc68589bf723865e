use crate::driver::{Driver, ProgramHandle};
use crate::program::ShaderProgram;

/// Owns the graphics driver and the record of which program is currently
/// bound to it. Every program operation takes the context explicitly; there
/// is no hidden global binding state.
///
/// One context per graphics context, one thread at a time. Nothing here is
/// safe for concurrent mutation without external serialization, matching the
/// driver's own threading rules.
pub struct Context<D: Driver> {
    driver: D,
    active: Option<ProgramHandle>,
}

impl<D: Driver> Context<D> {
    pub fn new(driver: D) -> Self {
        Self {
            driver,
            active: None,
        }
    }

    /// Binds `program` to the driver (or unbinds with `None`) and records it
    /// as the active program. This is the only place the register changes.
    pub fn set_active(&mut self, program: Option<&ShaderProgram>) {
        let id = program.map(ShaderProgram::id);
        self.driver.use_program(id);
        self.active = id;
    }

    /// The currently active program, as last set through [`set_active`].
    ///
    /// [`set_active`]: Context::set_active
    pub fn active(&self) -> Option<ProgramHandle> {
        self.active
    }

    pub(crate) fn driver(&self) -> &D {
        &self.driver
    }

    pub(crate) fn driver_mut(&mut self) -> &mut D {
        &mut self.driver
    }

    /// Consumes the context and hands the driver back to the embedder.
    pub fn into_driver(self) -> D {
        self.driver
    }
}
