pub mod diagnostics;
pub mod member;

pub use diagnostics::{Diagnostic, Diagnostics, Severity};
pub use member::{MemberArgs, MemberResource, MemberState};
