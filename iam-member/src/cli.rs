//! Command-line surface for driving member lifecycles directly.

use clap::{Parser, Subcommand};
use serde_json::{Value, json};

use crate::resource::{Diagnostics, MemberArgs};
use crate::startup::Provider;

/// Manage individual role bindings on IAM policies.
///
/// Connection settings come from `IAM_GO_ADDRESS`, `IAM_GO_TOKEN` and
/// `IAM_GO_INSECURE` (or a `configuration` file).
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Grant a role to a member on a resource.
    Create {
        /// Resource name, e.g. "/" or "//service/projects/p".
        #[arg(long)]
        resource: String,

        /// Role name, e.g. "roles/viewer".
        #[arg(long)]
        role: String,

        /// Member, e.g. "serviceAccount:x@y".
        #[arg(long)]
        member: String,
    },

    /// Show a binding by ID ("resource role member").
    Read {
        /// Identity token.
        id: String,
    },

    /// Revoke a binding by ID.
    Delete {
        /// Identity token.
        id: String,
    },

    /// Adopt an existing binding by ID.
    Import {
        /// Identity token.
        id: String,
    },
}

/// Execute `command` and return the JSON document to print.
pub async fn run(command: Command, provider: &Provider) -> Result<Value, Diagnostics> {
    let members = provider.members();
    match command {
        Command::Create {
            resource,
            role,
            member,
        } => {
            let state = members
                .create(&MemberArgs {
                    resource,
                    role,
                    member,
                })
                .await?;
            Ok(json!(state))
        }
        Command::Read { id } => match members.read(&id).await? {
            Some(state) => Ok(json!(state)),
            None => Ok(Value::Null),
        },
        Command::Delete { id } => {
            members.delete(&id).await?;
            Ok(json!({ "id": id, "deleted": true }))
        }
        Command::Import { id } => Ok(json!(members.import(&id).await?)),
    }
}
