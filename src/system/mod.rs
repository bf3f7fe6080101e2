//! # System Interaction Layer
//!
//! The boundary between the resolution pipeline and the operating system.
//!
//! - **`launcher`**: verifies that a resolved candidate is actually runnable
//!   and hands control to it, either by replacing the process image (Unix)
//!   or by spawning a child and propagating its exit code.

pub mod launcher;
