use service_core::error::AppError;
use std::fmt;
use std::str::FromStr;
use validator::{Validate, ValidationError};

/// One desired `(resource, role, member)` binding row.
///
/// The identity token is the three fields joined by single spaces, so no
/// field may contain whitespace. Both constructors validate, which means an
/// `IamMember` that exists is always safe to serialize and parse back.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Validate)]
pub struct IamMember {
    #[validate(
        length(min = 1, message = "must not be empty"),
        custom(function = "no_whitespace")
    )]
    resource: String,

    #[validate(
        length(min = 1, message = "must not be empty"),
        custom(function = "no_whitespace")
    )]
    role: String,

    #[validate(
        length(min = 1, message = "must not be empty"),
        custom(function = "no_whitespace")
    )]
    member: String,
}

impl IamMember {
    pub fn new(
        resource: impl Into<String>,
        role: impl Into<String>,
        member: impl Into<String>,
    ) -> Result<Self, AppError> {
        let iam_member = Self {
            resource: resource.into(),
            role: role.into(),
            member: member.into(),
        };
        iam_member.validate()?;
        Ok(iam_member)
    }

    pub fn resource(&self) -> &str {
        &self.resource
    }

    pub fn role(&self) -> &str {
        &self.role
    }

    pub fn member(&self) -> &str {
        &self.member
    }

    /// Identity token persisted by the host: `"resource role member"`.
    pub fn id(&self) -> String {
        self.to_string()
    }
}

impl fmt::Display for IamMember {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {} {}", self.resource, self.role, self.member)
    }
}

impl FromStr for IamMember {
    type Err = AppError;

    /// Parse an identity token produced by [`IamMember::id`].
    fn from_str(id: &str) -> Result<Self, Self::Err> {
        let fields: Vec<&str> = id.split_whitespace().collect();
        let [resource, role, member] = fields.as_slice() else {
            return Err(AppError::BadRequest(anyhow::anyhow!(
                "unexpected format of ID ({}), expected \"resource role member\"",
                id
            )));
        };
        Self::new(*resource, *role, *member)
    }
}

fn no_whitespace(value: &str) -> Result<(), ValidationError> {
    if value.chars().any(char::is_whitespace) {
        let mut err = ValidationError::new("whitespace");
        err.message = Some("contains whitespace".into());
        return Err(err);
    }
    Ok(())
}
