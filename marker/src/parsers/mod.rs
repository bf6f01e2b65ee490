//! # Parsers
//!
//! Turning what students hand in into structured answers:
//! - [`student_parser`]: free-form answer text to `{global index -> token}`, with Teil offsets.
//! - [`submission_parser`]: stored draft documents to a [`crate::types::StudentSubmission`].
//!
//! Reference documents are parsed in [`crate::reference`].

pub mod student_parser;
pub mod submission_parser;
