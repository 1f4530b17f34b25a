//! Edit mode flag.
//!
//! `main_status` records how the session was opened; `status` is the
//! current toggle. Transforms and paste are only legal while `status` is on.

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct EditMode {
    main_status: bool,
    status: bool,
}

impl EditMode {
    pub fn new(status: bool) -> Self {
        Self {
            main_status: status,
            status,
        }
    }

    /// Reset both the opening status and the current status.
    pub fn set_init(&mut self, status: bool) {
        *self = Self::new(status);
    }

    pub fn get(&self) -> bool {
        self.status
    }

    /// Whether the session was opened in edit mode.
    pub fn get_main(&self) -> bool {
        self.main_status
    }

    pub fn set(&mut self, status: bool) {
        self.status = status;
    }

    pub fn toggle(&mut self) {
        self.status = !self.status;
    }
}
