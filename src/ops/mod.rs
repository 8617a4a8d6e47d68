//! Operator commands over a discovered topology

pub mod shell;
pub mod walk;

pub use shell::{parse_line, Flow, Session, Verb};
pub use walk::{Visit, WalkReport, Walker};
