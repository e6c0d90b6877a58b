//! In-memory edits of a policy's bindings.
//!
//! Role names may repeat across bindings on the wire; the first binding with a
//! matching role is the one read and written. Member lists are treated as sets.
//! Conditions, audit configs and every other field are left as fetched.

use service_core::grpc::{Binding, Policy};

fn binding_for<'a>(policy: &'a Policy, role: &str) -> Option<&'a Binding> {
    policy.bindings.iter().find(|b| b.role == role)
}

/// Grant `member` the `role`. Returns `true` if the policy changed.
pub fn add_member(policy: &mut Policy, role: &str, member: &str) -> bool {
    match policy.bindings.iter_mut().find(|b| b.role == role) {
        Some(binding) if binding.members.iter().any(|m| m == member) => false,
        Some(binding) => {
            binding.members.push(member.to_string());
            true
        }
        None => {
            policy.bindings.push(Binding {
                role: role.to_string(),
                members: vec![member.to_string()],
                condition: None,
            });
            true
        }
    }
}

/// Revoke `role` from `member`. Returns `true` if the policy changed.
///
/// A binding left with no members stays in the policy.
pub fn remove_member(policy: &mut Policy, role: &str, member: &str) -> bool {
    let Some(binding) = policy.bindings.iter_mut().find(|b| b.role == role) else {
        return false;
    };
    let before = binding.members.len();
    binding.members.retain(|m| m != member);
    binding.members.len() != before
}

/// Whether the first binding for `role` lists `member`.
pub fn has_member(policy: &Policy, role: &str, member: &str) -> bool {
    binding_for(policy, role).is_some_and(|b| b.members.iter().any(|m| m == member))
}
