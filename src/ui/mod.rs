pub mod step_input;
pub mod terminal_guard;
pub mod wizard_screen;

pub use step_input::{InputEvent, StepInput};
pub use terminal_guard::{install_panic_hook, TerminalGuard};
